//! Error types for cache framing and decoding.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::Magic;

/// Errors produced while reading or writing a cache blob.
///
/// Every variant is fatal for the blob being decoded: callers must discard
/// whatever they were building and fall back to a source build.
#[derive(Debug, Error)]
pub enum CacheError {
	/// The blob does not start with the expected magic tag.
	#[error("bad cache magic: expected {expected}, found {found}")]
	BadMagic { expected: Magic, found: Magic },

	/// The blob was written by a different format version.
	#[error("unsupported cache version {found} (expected {expected})")]
	UnsupportedVersion { expected: u32, found: u32 },

	/// The blob ended in the middle of a value.
	#[error("truncated cache: needed {needed} bytes, {remaining} remaining")]
	Truncated { needed: usize, remaining: usize },

	/// A string payload was not valid UTF-8.
	#[error("invalid UTF-8 in cache string: {0}")]
	InvalidUtf8(#[from] std::string::FromUtf8Error),

	/// A boolean byte was neither 0 nor 1.
	#[error("invalid boolean byte {0:#04x}")]
	InvalidBool(u8),

	/// Decoding finished with unread bytes left over.
	#[error("{0} trailing bytes after cache payload")]
	TrailingBytes(usize),

	/// A count prefix does not fit in the address space.
	#[error("collection length {0} exceeds u32 range")]
	LengthOverflow(usize),

	/// Reading or writing the cache file failed.
	#[error("I/O error on {path}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
