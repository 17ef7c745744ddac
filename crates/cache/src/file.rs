//! Cache file persistence.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::Builder;
use tracing::debug;

use crate::error::{CacheError, Result};

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> CacheError + '_ {
	move |error| CacheError::Io {
		path: path.to_path_buf(),
		error,
	}
}

/// Writes `data` to `path` via a uniquely named temporary file beside it.
///
/// Readers never observe a half-written cache: the file only appears under
/// its final name once fully flushed. On failure the temporary file is
/// removed.
pub fn write_cache_file(path: &Path, data: &[u8]) -> Result<()> {
	let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
		Some(parent) => {
			fs::create_dir_all(parent).map_err(io_err(parent))?;
			parent
		}
		None => Path::new("."),
	};
	let prefix = match path.file_name() {
		Some(name) => format!(".{}.", name.to_string_lossy()),
		None => ".cache.".to_string(),
	};
	let mut tmp = Builder::new()
		.prefix(&prefix)
		.suffix(".tmp")
		.tempfile_in(dir)
		.map_err(io_err(dir))?;
	tmp.write_all(data).map_err(io_err(tmp.path()))?;
	tmp.as_file().sync_all().map_err(io_err(tmp.path()))?;
	tmp.persist(path).map_err(|e| CacheError::Io {
		path: path.to_path_buf(),
		error: e.error,
	})?;
	debug!(path = %path.display(), bytes = data.len(), "wrote cache file");
	Ok(())
}

/// Reads a whole cache file into memory.
pub fn read_cache_file(path: &Path) -> Result<Vec<u8>> {
	fs::read(path).map_err(io_err(path))
}
