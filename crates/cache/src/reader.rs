//! Bounds-checked decoder for cache blobs.

use bytes::Buf;

use crate::codec::CacheDecode;
use crate::error::{CacheError, Result};
use crate::format::{CacheFormat, HEADER_SIZE, Magic};

/// Cursor over a framed cache blob.
///
/// Every accessor checks the remaining length first, so a truncated blob
/// surfaces as [`CacheError::Truncated`] instead of a panic.
pub struct CacheReader<'a> {
	buf: &'a [u8],
}

impl<'a> CacheReader<'a> {
	/// Validates the header for `format` and positions the cursor after it.
	pub fn open(data: &'a [u8], format: CacheFormat) -> Result<Self> {
		if data.len() < HEADER_SIZE {
			return Err(CacheError::Truncated {
				needed: HEADER_SIZE,
				remaining: data.len(),
			});
		}
		let mut reader = Self { buf: data };
		let mut found = [0u8; 4];
		reader.buf.copy_to_slice(&mut found);
		let found = Magic(found);
		if found != format.magic {
			return Err(CacheError::BadMagic {
				expected: format.magic,
				found,
			});
		}
		let version = reader.buf.get_u32_le();
		if version != format.version {
			return Err(CacheError::UnsupportedVersion {
				expected: format.version,
				found: version,
			});
		}
		Ok(reader)
	}

	/// Reader over a headerless fragment.
	pub fn headerless(data: &'a [u8]) -> Self {
		Self { buf: data }
	}

	fn need(&self, n: usize) -> Result<()> {
		if self.buf.remaining() < n {
			return Err(CacheError::Truncated {
				needed: n,
				remaining: self.buf.remaining(),
			});
		}
		Ok(())
	}

	pub fn remaining(&self) -> usize {
		self.buf.remaining()
	}

	pub fn get_u8(&mut self) -> Result<u8> {
		self.need(1)?;
		Ok(self.buf.get_u8())
	}

	pub fn get_bool(&mut self) -> Result<bool> {
		match self.get_u8()? {
			0 => Ok(false),
			1 => Ok(true),
			other => Err(CacheError::InvalidBool(other)),
		}
	}

	pub fn get_u16(&mut self) -> Result<u16> {
		self.need(2)?;
		Ok(self.buf.get_u16_le())
	}

	pub fn get_u32(&mut self) -> Result<u32> {
		self.need(4)?;
		Ok(self.buf.get_u32_le())
	}

	pub fn get_i32(&mut self) -> Result<i32> {
		self.need(4)?;
		Ok(self.buf.get_i32_le())
	}

	pub fn get_f32(&mut self) -> Result<f32> {
		self.need(4)?;
		Ok(self.buf.get_f32_le())
	}

	pub fn get_f64(&mut self) -> Result<f64> {
		self.need(8)?;
		Ok(self.buf.get_f64_le())
	}

	/// Reads a count or byte-length prefix.
	pub fn get_len(&mut self) -> Result<usize> {
		Ok(self.get_u32()? as usize)
	}

	pub fn get_string(&mut self) -> Result<String> {
		let len = self.get_len()?;
		self.need(len)?;
		let bytes = self.buf[..len].to_vec();
		self.buf.advance(len);
		Ok(String::from_utf8(bytes)?)
	}

	/// Presence flag, then the string when present.
	pub fn get_opt_string(&mut self) -> Result<Option<String>> {
		if self.get_bool()? {
			self.get_string().map(Some)
		} else {
			Ok(None)
		}
	}

	/// Count-prefixed sequence, each element read by `f`.
	///
	/// `f` may fail with any error that a [`CacheError`] converts into, so
	/// callers can decode nested structures with their own error types.
	pub fn get_seq<T, E, F>(&mut self, mut f: F) -> std::result::Result<Vec<T>, E>
	where
		F: FnMut(&mut Self) -> std::result::Result<T, E>,
		E: From<CacheError>,
	{
		let count = self.get_len()?;
		// A corrupt count must not trigger a huge allocation up front.
		let mut out = Vec::with_capacity(count.min(self.remaining()));
		for _ in 0..count {
			out.push(f(self)?);
		}
		Ok(out)
	}

	/// Count-prefixed `(key, value)` pairs collected into any map type.
	pub fn get_map<K, V, M>(&mut self) -> Result<M>
	where
		K: CacheDecode,
		V: CacheDecode,
		M: FromIterator<(K, V)>,
	{
		let pairs = self.get_seq::<_, CacheError, _>(|r| Ok((K::decode(r)?, V::decode(r)?)))?;
		Ok(pairs.into_iter().collect())
	}

	pub fn get<T: CacheDecode>(&mut self) -> Result<T> {
		T::decode(self)
	}

	/// Asserts the blob was consumed exactly.
	pub fn finish(self) -> Result<()> {
		match self.buf.remaining() {
			0 => Ok(()),
			n => Err(CacheError::TrailingBytes(n)),
		}
	}
}
