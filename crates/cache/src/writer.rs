//! Append-only encoder for cache blobs.

use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::CacheEncode;
use crate::error::{CacheError, Result};
use crate::format::CacheFormat;

/// Serializes values into a framed cache blob.
///
/// Integers and floats are little-endian. Strings carry a `u32` byte length,
/// collections a `u32` element count; nothing is padded or terminated.
pub struct CacheWriter {
	buf: BytesMut,
	overflow: Option<usize>,
}

impl CacheWriter {
	/// Starts a blob with the header for `format`.
	pub fn new(format: CacheFormat) -> Self {
		let mut buf = BytesMut::with_capacity(4096);
		buf.put_slice(format.magic.as_bytes());
		buf.put_u32_le(format.version);
		Self {
			buf,
			overflow: None,
		}
	}

	/// Writer without a header, for encoding fragments.
	pub fn headerless() -> Self {
		Self {
			buf: BytesMut::new(),
			overflow: None,
		}
	}

	pub fn put_u8(&mut self, v: u8) {
		self.buf.put_u8(v);
	}

	pub fn put_bool(&mut self, v: bool) {
		self.buf.put_u8(u8::from(v));
	}

	pub fn put_u16(&mut self, v: u16) {
		self.buf.put_u16_le(v);
	}

	pub fn put_u32(&mut self, v: u32) {
		self.buf.put_u32_le(v);
	}

	pub fn put_i32(&mut self, v: i32) {
		self.buf.put_i32_le(v);
	}

	pub fn put_f32(&mut self, v: f32) {
		self.buf.put_f32_le(v);
	}

	pub fn put_f64(&mut self, v: f64) {
		self.buf.put_f64_le(v);
	}

	/// Writes a count or byte-length prefix.
	///
	/// Lengths beyond `u32::MAX` are recorded and reported by [`Self::finish`].
	pub fn put_len(&mut self, len: usize) {
		match u32::try_from(len) {
			Ok(n) => self.buf.put_u32_le(n),
			Err(_) => {
				self.overflow.get_or_insert(len);
				self.buf.put_u32_le(u32::MAX);
			}
		}
	}

	pub fn put_str(&mut self, s: &str) {
		self.put_len(s.len());
		self.buf.put_slice(s.as_bytes());
	}

	/// Presence flag, then the string when present.
	pub fn put_opt_str(&mut self, s: Option<&str>) {
		self.put_bool(s.is_some());
		if let Some(s) = s {
			self.put_str(s);
		}
	}

	/// Count-prefixed sequence, each element written by `f`.
	pub fn put_seq<I, F>(&mut self, items: I, mut f: F)
	where
		I: IntoIterator,
		I::IntoIter: ExactSizeIterator,
		F: FnMut(&mut Self, I::Item),
	{
		let items = items.into_iter();
		self.put_len(items.len());
		for item in items {
			f(self, item);
		}
	}

	/// Count-prefixed sequence of `(key, value)` pairs.
	pub fn put_map<'a, K, V, I>(&mut self, entries: I)
	where
		K: CacheEncode + 'a,
		V: CacheEncode + 'a,
		I: IntoIterator<Item = (&'a K, &'a V)>,
		I::IntoIter: ExactSizeIterator,
	{
		self.put_seq(entries, |w, (k, v)| {
			k.encode(w);
			v.encode(w);
		});
	}

	pub fn put<T: CacheEncode + ?Sized>(&mut self, value: &T) {
		value.encode(self);
	}

	pub fn len(&self) -> usize {
		self.buf.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Completes the blob.
	pub fn finish(self) -> Result<Bytes> {
		if let Some(len) = self.overflow {
			return Err(CacheError::LengthOverflow(len));
		}
		Ok(self.buf.freeze())
	}
}
