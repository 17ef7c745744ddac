//! Schema graph cache blob.
//!
//! ```text
//! [FTI\0][version: u32]
//! [type count: u32]
//! per type:
//!   name, id: u32, path
//!   traits:     count + strings
//!   mixins:     count + type names
//!   properties: count + (name, id, source?, kind tag, traits, value)
//!   behaviors:  count + (name, id, type, source?, traits)
//! ```
//!
//! Mixins travel as names, never as nested types, so shared ancestors are
//! written once and cycles cannot occur on the wire.

use std::path::Path;

use gamedex_cache::{
	CacheFormat, CacheReader, CacheWriter, read_cache_file, write_cache_file,
};
use indexmap::IndexSet;
use rustc_hash::FxHashMap as HashMap;
use tracing::info;

use super::{TypeGraph, name_key, resolve_mixins};
use crate::error::{Result, SchemaError};
use crate::node::{Behavior, Property, TypeIndex, TypeNode};
use crate::value::{PropertyValue, ValueKind};

/// Magic `FTI\0`, version 1.
pub const SCHEMA_CACHE_FORMAT: CacheFormat = CacheFormat::new(b"FTI\0", 1);

fn write_property(w: &mut CacheWriter, p: &Property) {
	w.put_str(&p.name);
	w.put_str(&p.id);
	w.put_opt_str(p.source.as_deref());
	w.put_str(p.kind().as_str());
	w.put(&p.traits);
	p.value.encode(w);
}

fn read_property(r: &mut CacheReader<'_>) -> Result<Property> {
	let name = r.get_string()?;
	let id = r.get_string()?;
	let source = r.get_opt_string()?;
	let kind: ValueKind = r.get_string()?.parse()?;
	let traits = r.get()?;
	let value = PropertyValue::decode(kind, r)?;
	Ok(Property {
		name,
		id,
		source,
		traits,
		value,
	})
}

fn write_behavior(w: &mut CacheWriter, b: &Behavior) {
	w.put_str(&b.name);
	w.put_str(&b.id);
	w.put_str(&b.kind);
	w.put_opt_str(b.source.as_deref());
	w.put(&b.traits);
}

fn read_behavior(r: &mut CacheReader<'_>) -> Result<Behavior> {
	Ok(Behavior {
		name: r.get_string()?,
		id: r.get_string()?,
		kind: r.get_string()?,
		source: r.get_opt_string()?,
		traits: r.get()?,
	})
}

impl TypeGraph {
	/// Encodes the graph as a cache blob.
	pub fn to_cache_bytes(&self) -> Result<Vec<u8>> {
		let mut w = CacheWriter::new(SCHEMA_CACHE_FORMAT);
		w.put_seq(&self.nodes, |w, node| {
			w.put_str(&node.name);
			w.put_u32(node.id);
			w.put_str(&node.path);
			w.put(&node.traits);
			w.put_seq(&node.mixins, |w, idx| w.put_str(&self.nodes[idx.as_usize()].name));
			w.put_seq(node.properties.values(), write_property);
			w.put_seq(node.behaviors.values(), write_behavior);
		});
		Ok(w.finish()?.to_vec())
	}

	/// Decodes a cache blob.
	///
	/// All types are read before any mixin name is resolved; the graph is
	/// returned only if the whole blob decodes, names are unique ignoring
	/// case, and every mixin resolves.
	pub fn from_cache_bytes(data: &[u8]) -> Result<Self> {
		let mut r = CacheReader::open(data, SCHEMA_CACHE_FORMAT)?;
		let mut nodes: Vec<TypeNode> = Vec::new();
		let mut pending: Vec<Vec<String>> = Vec::new();
		let mut by_name: HashMap<String, TypeIndex> = HashMap::default();

		let count = r.get_len()?;
		for _ in 0..count {
			let name = r.get_string()?;
			let id = r.get_u32()?;
			let path = r.get_string()?;
			let index = TypeIndex::from_usize(nodes.len());
			let mut node = TypeNode::new(index, name, id, path);
			node.traits = r.get::<IndexSet<String>>()?;
			pending.push(r.get::<Vec<String>>()?);
			node.properties = r
				.get_seq(read_property)?
				.into_iter()
				.map(|p| (p.name.clone(), p))
				.collect();
			node.behaviors = r
				.get_seq(read_behavior)?
				.into_iter()
				.map(|b| (b.name.clone(), b))
				.collect();
			let key = name_key(&node.name);
			if by_name.contains_key(&key) {
				return Err(SchemaError::DuplicateType { name: node.name });
			}
			by_name.insert(key, index);
			nodes.push(node);
		}
		r.finish()?;

		for (node, names) in nodes.iter_mut().zip(&pending) {
			node.mixins = resolve_mixins(&by_name, &node.name, names)?;
		}
		Ok(TypeGraph::assemble(nodes, by_name))
	}

	/// Writes the cache blob to `path`.
	pub fn save_cache(&self, path: &Path) -> Result<()> {
		let bytes = self.to_cache_bytes()?;
		write_cache_file(path, &bytes)?;
		info!(path = %path.display(), types = self.len(), "saved type graph cache");
		Ok(())
	}

	/// Reads and decodes the cache blob at `path`.
	pub fn load_cache(path: &Path) -> Result<Self> {
		let bytes = read_cache_file(path)?;
		let graph = Self::from_cache_bytes(&bytes)?;
		info!(path = %path.display(), types = graph.len(), "loaded type graph cache");
		Ok(graph)
	}
}
