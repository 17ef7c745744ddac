//! Facade error types.

use std::path::PathBuf;

use gamedex_assets::AssetError;
use gamedex_schema::SchemaError;
use thiserror::Error;

/// Errors loading an [`crate::IndexConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config {path}: {error}")]
	Read {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},

	#[error("failed to parse config: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Any failure surfaced by the facade.
#[derive(Debug, Error)]
pub enum GamedexError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Schema(#[from] SchemaError),

	#[error(transparent)]
	Assets(#[from] AssetError),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, GamedexError>;
