//! The mixin type graph.
//!
//! # Mental Model
//!
//! Types live in a dense node table. Each node lists its mixins as indices
//! into that table; a type may declare several mixins, so the hierarchy is a
//! directed graph rather than a tree and no query assumes a single parent.
//!
//! Two indices are derived from the mixin lists and never persisted:
//!
//! - the children index (mixin → types declaring it), and
//! - the path tree (definition path → type).
//!
//! Both are rebuilt in full whenever a graph is assembled, whether from source
//! definitions ([`TypeGraph::build`]) or from a cache blob
//! ([`TypeGraph::from_cache_bytes`]).
//!
//! # Construction
//!
//! Every construction path creates all nodes before resolving any mixin name.
//! Pending names are then resolved against the complete table, so definition
//! order never matters and an unknown name is reported as
//! [`SchemaError::DanglingMixinReference`]. Nothing is published until the
//! whole graph has been assembled.

mod build;
mod cache;

use std::collections::VecDeque;

use gamedex_source::{PathTree, PathTreeError};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use build::SchemaOptions;
pub use cache::SCHEMA_CACHE_FORMAT;

use crate::error::{Result, SchemaError};
use crate::node::{Property, TypeIndex, TypeNode};

/// Immutable mixin graph with name, hierarchy and path lookups.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
	nodes: Vec<TypeNode>,
	by_name: HashMap<String, TypeIndex>,
	children: Vec<Vec<TypeIndex>>,
	paths: PathTree<TypeIndex>,
}

/// Lower-cased lookup key for a type name.
pub(crate) fn name_key(name: &str) -> String {
	name.to_lowercase()
}

/// Resolves `names` against the complete name table.
pub(crate) fn resolve_mixins(
	by_name: &HashMap<String, TypeIndex>,
	type_name: &str,
	names: &[String],
) -> Result<Vec<TypeIndex>> {
	let mut out: Vec<TypeIndex> = Vec::with_capacity(names.len());
	for mixin in names {
		let idx = by_name.get(&name_key(mixin)).copied().ok_or_else(|| {
			SchemaError::DanglingMixinReference {
				type_name: type_name.to_string(),
				mixin: mixin.clone(),
			}
		})?;
		if !out.contains(&idx) {
			out.push(idx);
		}
	}
	Ok(out)
}

/// Breadth-first walk over the transitive mixins of `start`, excluding it.
fn walk_mixins(nodes: &[TypeNode], start: TypeIndex) -> impl Iterator<Item = &TypeNode> {
	let mut seen = HashSet::default();
	seen.insert(start);
	let mut queue: VecDeque<TypeIndex> = nodes[start.as_usize()].mixins.iter().copied().collect();
	std::iter::from_fn(move || {
		while let Some(idx) = queue.pop_front() {
			if !seen.insert(idx) {
				continue;
			}
			let node = &nodes[idx.as_usize()];
			queue.extend(node.mixins.iter().copied());
			return Some(node);
		}
		None
	})
}

/// First property called `name` inherited through the mixins of `start`.
pub(crate) fn inherited_property<'a>(
	nodes: &'a [TypeNode],
	start: TypeIndex,
	name: &str,
) -> Option<&'a Property> {
	walk_mixins(nodes, start).find_map(|node| node.properties.get(name))
}

impl TypeGraph {
	/// Publishes a node table whose mixins are already resolved.
	pub(crate) fn assemble(nodes: Vec<TypeNode>, by_name: HashMap<String, TypeIndex>) -> Self {
		let mut children = vec![Vec::new(); nodes.len()];
		for node in &nodes {
			for mixin in &node.mixins {
				children[mixin.as_usize()].push(node.index);
			}
		}
		let mut paths = PathTree::new();
		for node in &nodes {
			paths.add(&node.path, node.index);
		}
		Self {
			nodes,
			by_name,
			children,
			paths,
		}
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Case-insensitive exact lookup.
	pub fn get_type(&self, name: &str) -> Option<&TypeNode> {
		self.by_name
			.get(&name_key(name))
			.map(|idx| &self.nodes[idx.as_usize()])
	}

	pub fn node(&self, idx: TypeIndex) -> Option<&TypeNode> {
		self.nodes.get(idx.as_usize())
	}

	/// Every type. Order is not stable across rebuilds.
	pub fn all_types(&self) -> impl ExactSizeIterator<Item = &TypeNode> {
		self.nodes.iter()
	}

	/// Types that declare `name` as a direct mixin. Unknown names yield nothing.
	pub fn sub_types(&self, name: &str) -> Vec<&TypeNode> {
		let Some(node) = self.get_type(name) else {
			return Vec::new();
		};
		self.children[node.index.as_usize()]
			.iter()
			.map(|idx| &self.nodes[idx.as_usize()])
			.collect()
	}

	/// Direct mixins of `node`, in declaration order.
	///
	/// Indices that do not exist in this graph are skipped, so a node taken
	/// from another graph cannot cause a panic.
	pub fn mixins<'a>(&'a self, node: &'a TypeNode) -> impl Iterator<Item = &'a TypeNode> + 'a {
		node.mixins.iter().filter_map(|idx| self.node(*idx))
	}

	/// Every transitive mixin of `name`, breadth-first, each once.
	pub fn ancestors(&self, name: &str) -> Vec<&TypeNode> {
		match self.get_type(name) {
			Some(node) => walk_mixins(&self.nodes, node.index).collect(),
			None => Vec::new(),
		}
	}

	/// True if `name` is `ancestor` or mixes it in, directly or transitively.
	pub fn is_a(&self, name: &str, ancestor: &str) -> bool {
		let (Some(node), Some(target)) = (self.get_type(name), self.get_type(ancestor)) else {
			return false;
		};
		node.index == target.index
			|| walk_mixins(&self.nodes, node.index).any(|n| n.index == target.index)
	}

	/// Property `property` of `name`, falling back to its mixins breadth-first.
	pub fn find_property(&self, name: &str, property: &str) -> Option<&Property> {
		let node = self.get_type(name)?;
		node.properties
			.get(property)
			.or_else(|| inherited_property(&self.nodes, node.index, property))
	}

	/// Types defined under the directory `path`.
	pub fn list_path(
		&self,
		path: &str,
		recursive: bool,
	) -> std::result::Result<Vec<&TypeNode>, PathTreeError> {
		Ok(self
			.paths
			.list(path, recursive)?
			.into_iter()
			.map(|idx| &self.nodes[idx.as_usize()])
			.collect())
	}

	/// Subdirectory names below `path`.
	pub fn list_directories(&self, path: &str) -> std::result::Result<Vec<&str>, PathTreeError> {
		self.paths.list_directories(path)
	}
}

#[cfg(test)]
mod tests;
