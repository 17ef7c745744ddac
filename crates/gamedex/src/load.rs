//! Cache-first loading.
//!
//! Both indices load the same way: decode the configured cache file if it
//! exists, otherwise (or if decoding fails) build from source and write the
//! cache for next time. A failed cache write only costs the next start-up,
//! so it is logged and the freshly built index is still returned.

use std::path::Path;

use gamedex_assets::AssetIndex;
use gamedex_schema::TypeGraph;
use gamedex_source::{EntrySource, ScopedSource};
use tracing::{debug, warn};

use crate::config::IndexConfig;
use crate::error::Result;

fn cached<T, E: std::fmt::Display>(
	what: &str,
	path: Option<&Path>,
	load: impl FnOnce(&Path) -> std::result::Result<T, E>,
) -> Option<T> {
	let path = path?;
	if !path.exists() {
		debug!(index = what, path = %path.display(), "no cache file yet");
		return None;
	}
	match load(path) {
		Ok(value) => Some(value),
		Err(error) => {
			warn!(index = what, path = %path.display(), %error, "cache unusable; rebuilding from source");
			None
		}
	}
}

fn store<E: std::fmt::Display>(
	what: &str,
	path: Option<&Path>,
	save: impl FnOnce(&Path) -> std::result::Result<(), E>,
) {
	if let Some(path) = path
		&& let Err(error) = save(path)
	{
		warn!(index = what, path = %path.display(), %error, "failed to write cache");
	}
}

/// Loads the type graph from its cache, or builds it from `source`.
pub fn load_schema<S: EntrySource>(source: &S, config: &IndexConfig) -> Result<TypeGraph> {
	let cache = config.schema.cache.as_deref();
	if let Some(graph) = cached("schema", cache, TypeGraph::load_cache) {
		return Ok(graph);
	}
	let graph = TypeGraph::build(source, &config.schema.options())?;
	store("schema", cache, |path| graph.save_cache(path));
	Ok(graph)
}

/// Loads the asset index from its cache, or builds it from the entries of
/// `source` under the configured asset root.
pub fn load_assets<S: EntrySource>(source: &S, config: &IndexConfig) -> Result<AssetIndex> {
	let cache = config.assets.cache.as_deref();
	if let Some(index) = cached("assets", cache, AssetIndex::load_cache) {
		return Ok(index);
	}
	let index = AssetIndex::build(&ScopedSource::new(source, &config.assets.root))?;
	store("assets", cache, |path| index.save_cache(path));
	Ok(index)
}

/// Both indices, loaded together.
#[derive(Debug, Clone)]
pub struct Index {
	pub schema: TypeGraph,
	pub assets: AssetIndex,
}

impl Index {
	pub fn load<S: EntrySource>(source: &S, config: &IndexConfig) -> Result<Self> {
		Ok(Self {
			schema: load_schema(source, config)?,
			assets: load_assets(source, config)?,
		})
	}
}
