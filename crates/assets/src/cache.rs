//! Asset index cache blob.
//!
//! ```text
//! [ASI\0][version: u32]
//! llid_lookup: count + (llid, count + uuids)
//! nt_lookup:   count + (category, count + (uuid, value))
//! ```

use std::path::Path;

use gamedex_cache::{CacheFormat, CacheReader, CacheWriter, read_cache_file, write_cache_file};
use tracing::info;

use crate::error::Result;
use crate::index::AssetIndex;

/// Magic `ASI\0`, version 1.
pub const ASSET_CACHE_FORMAT: CacheFormat = CacheFormat::new(b"ASI\0", 1);

impl AssetIndex {
	pub fn to_cache_bytes(&self) -> Result<Vec<u8>> {
		let mut w = CacheWriter::new(ASSET_CACHE_FORMAT);
		w.put(&self.llid_lookup);
		w.put(&self.nt_lookup);
		Ok(w.finish()?.to_vec())
	}

	/// Decodes a cache blob. Bytes left after `nt_lookup` are an error.
	pub fn from_cache_bytes(data: &[u8]) -> Result<Self> {
		let mut r = CacheReader::open(data, ASSET_CACHE_FORMAT)?;
		let llid_lookup = r.get()?;
		let nt_lookup = r.get()?;
		r.finish()?;
		Ok(Self {
			llid_lookup,
			nt_lookup,
		})
	}

	pub fn save_cache(&self, path: &Path) -> Result<()> {
		let bytes = self.to_cache_bytes()?;
		write_cache_file(path, &bytes)?;
		info!(path = %path.display(), llids = self.llid_count(), "saved asset index cache");
		Ok(())
	}

	pub fn load_cache(path: &Path) -> Result<Self> {
		let bytes = read_cache_file(path)?;
		let index = Self::from_cache_bytes(&bytes)?;
		info!(path = %path.display(), llids = index.llid_count(), "loaded asset index cache");
		Ok(index)
	}
}
