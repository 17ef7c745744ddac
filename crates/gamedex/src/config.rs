//! TOML configuration.
//!
//! ```toml
//! [schema]
//! root = "ObjectData/"
//! cache = "cache/types.fti"
//! minimize = false
//!
//! [assets]
//! root = "assets/"
//! cache = "cache/assets.asi"
//! ```
//!
//! Every key is optional. Without a `cache` path the index is always built
//! from source and nothing is written.

use std::fs;
use std::path::{Path, PathBuf};

use gamedex_schema::SchemaOptions;
use serde::Deserialize;

use crate::error::ConfigError;

/// Settings for both indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
	pub schema: SchemaConfig,
	pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
	/// Entry-name prefix of type definition files.
	pub root: String,
	/// Cache file read before, and written after, a source build.
	pub cache: Option<PathBuf>,
	/// Drop properties equal to their inherited value.
	pub minimize: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
	/// Entry-name prefix of category files.
	pub root: String,
	pub cache: Option<PathBuf>,
}

impl IndexConfig {
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
		let text = fs::read_to_string(path).map_err(|error| ConfigError::Read {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}
}

impl SchemaConfig {
	pub fn options(&self) -> SchemaOptions {
		SchemaOptions {
			root: self.root.clone(),
			minimize: self.minimize,
		}
	}
}
