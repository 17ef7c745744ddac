//! Error types for the asset name index.

use gamedex_cache::CacheError;
use gamedex_source::SourceError;
use thiserror::Error;

/// Fatal errors while building, encoding or decoding an [`crate::AssetIndex`].
///
/// Unknown llids are not errors; [`crate::AssetIndex::fields`] answers them
/// with empty fields.
#[derive(Debug, Error)]
pub enum AssetError {
	/// A non-blank line in a category file is not a triple statement.
	#[error("{file}:{line}: malformed triple: {text}")]
	MalformedLine {
		file: String,
		line: usize,
		text: String,
	},

	#[error("asset cache: {0}")]
	Cache(#[from] CacheError),

	#[error("asset source: {0}")]
	Source(#[from] SourceError),

	#[error("triple pattern: {0}")]
	Pattern(#[from] regex::Error),
}

/// Result type for asset index operations.
pub type Result<T> = std::result::Result<T, AssetError>;
