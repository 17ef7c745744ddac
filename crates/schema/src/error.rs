//! Error types for the schema graph.

use gamedex_cache::CacheError;
use gamedex_source::{PathTreeError, SourceError};
use thiserror::Error;

use crate::value::ValueError;

/// Fatal errors while building, encoding or decoding a [`crate::TypeGraph`].
///
/// Records that are merely incomplete (a type definition without a `name` or
/// `id`) are logged and skipped instead; everything here aborts the build.
#[derive(Debug, Error)]
pub enum SchemaError {
	/// A type names a mixin that does not exist.
	#[error("type '{type_name}' references unknown mixin '{mixin}'")]
	DanglingMixinReference { type_name: String, mixin: String },

	/// Two types share a name, ignoring case.
	#[error("duplicate type name '{name}'")]
	DuplicateType { name: String },

	/// A property's literal value could not be parsed for its kind.
	#[error("invalid value for property '{property}' of type '{type_name}': {error}")]
	ValueParse {
		type_name: String,
		property: String,
		#[source]
		error: ValueError,
	},

	#[error(transparent)]
	Value(#[from] ValueError),

	#[error("schema cache: {0}")]
	Cache(#[from] CacheError),

	#[error("schema source: {0}")]
	Source(#[from] SourceError),

	#[error(transparent)]
	PathTree(#[from] PathTreeError),
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
