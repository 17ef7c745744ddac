//! Game data indexer.
//!
//! Ties the [`TypeGraph`] and the [`AssetIndex`] to a TOML configuration and
//! their cache files. Most callers need only [`IndexConfig::from_file`] and
//! [`Index::load`]:
//!
//! ```no_run
//! use gamedex::{DirSource, Index, IndexConfig};
//!
//! gamedex::init_logging();
//! let config = IndexConfig::from_file("gamedex.toml".as_ref())?;
//! let index = Index::load(&DirSource::new("data"), &config)?;
//! let fields = index.assets.fields("urn:llid:1234");
//! # Ok::<(), gamedex::GamedexError>(())
//! ```

mod config;
mod error;
mod load;
mod logging;

pub use config::{AssetsConfig, IndexConfig, SchemaConfig};
pub use error::{ConfigError, GamedexError, Result};
pub use gamedex_assets::{AssetError, AssetFields, AssetIndex};
pub use gamedex_schema::{PropertyValue, SchemaError, TypeGraph, TypeNode, ValueKind};
pub use gamedex_source::{DirSource, EntrySource, MemorySource, SourceEntry};
pub use load::{Index, load_assets, load_schema};
pub use logging::init_logging;
