//! Encoding conventions shared by every cached structure.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use indexmap::{IndexMap, IndexSet};

use crate::error::Result;
use crate::reader::CacheReader;
use crate::writer::CacheWriter;

/// Types with a fixed cache wire form.
pub trait CacheEncode {
	fn encode(&self, w: &mut CacheWriter);
}

/// Inverse of [`CacheEncode`].
pub trait CacheDecode: Sized {
	fn decode(r: &mut CacheReader<'_>) -> Result<Self>;
}

macro_rules! prim_impl {
	($($t:ty => $put:ident, $get:ident);* $(;)?) => {
		$(
			impl CacheEncode for $t {
				fn encode(&self, w: &mut CacheWriter) {
					w.$put(*self);
				}
			}

			impl CacheDecode for $t {
				fn decode(r: &mut CacheReader<'_>) -> Result<Self> {
					r.$get()
				}
			}
		)*
	};
}

prim_impl! {
	bool => put_bool, get_bool;
	u8 => put_u8, get_u8;
	u16 => put_u16, get_u16;
	u32 => put_u32, get_u32;
	i32 => put_i32, get_i32;
	f32 => put_f32, get_f32;
	f64 => put_f64, get_f64;
}

impl CacheEncode for str {
	fn encode(&self, w: &mut CacheWriter) {
		w.put_str(self);
	}
}

impl CacheEncode for String {
	fn encode(&self, w: &mut CacheWriter) {
		w.put_str(self);
	}
}

impl CacheDecode for String {
	fn decode(r: &mut CacheReader<'_>) -> Result<Self> {
		r.get_string()
	}
}

/// Optional strings use a presence flag rather than a sentinel length.
impl CacheEncode for Option<String> {
	fn encode(&self, w: &mut CacheWriter) {
		w.put_opt_str(self.as_deref());
	}
}

impl CacheDecode for Option<String> {
	fn decode(r: &mut CacheReader<'_>) -> Result<Self> {
		r.get_opt_string()
	}
}

impl<T: CacheEncode, const N: usize> CacheEncode for [T; N] {
	fn encode(&self, w: &mut CacheWriter) {
		for item in self {
			item.encode(w);
		}
	}
}

impl<T: CacheDecode + Default + Copy, const N: usize> CacheDecode for [T; N] {
	fn decode(r: &mut CacheReader<'_>) -> Result<Self> {
		let mut out = [T::default(); N];
		for slot in &mut out {
			*slot = T::decode(r)?;
		}
		Ok(out)
	}
}

impl<T: CacheEncode> CacheEncode for Vec<T> {
	fn encode(&self, w: &mut CacheWriter) {
		w.put_seq(self, |w, item| item.encode(w));
	}
}

impl<T: CacheDecode> CacheDecode for Vec<T> {
	fn decode(r: &mut CacheReader<'_>) -> Result<Self> {
		r.get_seq(T::decode)
	}
}

impl<T: CacheEncode, S> CacheEncode for IndexSet<T, S> {
	fn encode(&self, w: &mut CacheWriter) {
		w.put_seq(self, |w, item| item.encode(w));
	}
}

impl<T, S> CacheDecode for IndexSet<T, S>
where
	T: CacheDecode + Hash + Eq,
	S: BuildHasher + Default,
{
	fn decode(r: &mut CacheReader<'_>) -> Result<Self> {
		Ok(r.get_seq(T::decode)?.into_iter().collect())
	}
}

impl<K: CacheEncode, V: CacheEncode, S> CacheEncode for IndexMap<K, V, S> {
	fn encode(&self, w: &mut CacheWriter) {
		w.put_map(self);
	}
}

impl<K, V, S> CacheDecode for IndexMap<K, V, S>
where
	K: CacheDecode + Hash + Eq,
	V: CacheDecode,
	S: BuildHasher + Default,
{
	fn decode(r: &mut CacheReader<'_>) -> Result<Self> {
		r.get_map()
	}
}

impl<K: CacheEncode, V: CacheEncode, S> CacheEncode for HashMap<K, V, S> {
	fn encode(&self, w: &mut CacheWriter) {
		w.put_map(self);
	}
}

impl<K, V, S> CacheDecode for HashMap<K, V, S>
where
	K: CacheDecode + Hash + Eq,
	V: CacheDecode,
	S: BuildHasher + Default,
{
	fn decode(r: &mut CacheReader<'_>) -> Result<Self> {
		r.get_map()
	}
}
