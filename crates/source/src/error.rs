use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while enumerating or reading source entries.
#[derive(Debug, Error)]
pub enum SourceError {
	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},

	#[error("failed to walk {root}: {message}")]
	Walk { root: PathBuf, message: String },

	#[error("entry {name} is not valid UTF-8")]
	Utf8 { name: String },

	#[error("entry {name} is not well-formed XML: {message}")]
	Xml { name: String, message: String },
}

/// Errors raised by [`crate::PathTree`] lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathTreeError {
	#[error("path not found: {0}")]
	NotFound(String),
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
