//! Directory-style index over entry paths.

use std::collections::BTreeMap;

use crate::error::PathTreeError;

#[derive(Debug, Clone)]
struct DirNode {
	dirs: BTreeMap<String, usize>,
	values: Vec<usize>,
}

impl DirNode {
	fn new() -> Self {
		Self {
			dirs: BTreeMap::new(),
			values: Vec::new(),
		}
	}
}

/// Values filed under the directory part of their path.
///
/// `add("a/b/c.xml", v)` files `v` under directory `a/b`. The empty path and
/// `/` both name the root.
#[derive(Debug, Clone)]
pub struct PathTree<V> {
	nodes: Vec<DirNode>,
	values: Vec<V>,
}

impl<V> Default for PathTree<V> {
	fn default() -> Self {
		Self::new()
	}
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
	path.split(['/', '\\']).filter(|s| !s.is_empty())
}

impl<V> PathTree<V> {
	pub fn new() -> Self {
		Self {
			nodes: vec![DirNode::new()],
			values: Vec::new(),
		}
	}

	pub fn add(&mut self, path: &str, value: V) {
		let segs: Vec<&str> = segments(path).collect();
		let dirs = segs.len().saturating_sub(1);
		let mut cur = 0;
		for seg in &segs[..dirs] {
			cur = match self.nodes[cur].dirs.get(*seg) {
				Some(&idx) => idx,
				None => {
					let idx = self.nodes.len();
					self.nodes.push(DirNode::new());
					self.nodes[cur].dirs.insert((*seg).to_string(), idx);
					idx
				}
			};
		}
		let slot = self.values.len();
		self.values.push(value);
		self.nodes[cur].values.push(slot);
	}

	fn find(&self, path: &str) -> Result<usize, PathTreeError> {
		let mut cur = 0;
		for seg in segments(path) {
			cur = *self.nodes[cur]
				.dirs
				.get(seg)
				.ok_or_else(|| PathTreeError::NotFound(path.to_string()))?;
		}
		Ok(cur)
	}

	/// Values filed directly under `path`, or anywhere below it when `recursive`.
	pub fn list(&self, path: &str, recursive: bool) -> Result<Vec<&V>, PathTreeError> {
		let start = self.find(path)?;
		let mut out = Vec::new();
		let mut stack = vec![start];
		while let Some(idx) = stack.pop() {
			let node = &self.nodes[idx];
			out.extend(node.values.iter().map(|&slot| &self.values[slot]));
			if recursive {
				stack.extend(node.dirs.values().rev());
			}
		}
		Ok(out)
	}

	/// Names of the immediate subdirectories of `path`, sorted.
	pub fn list_directories(&self, path: &str) -> Result<Vec<&str>, PathTreeError> {
		let idx = self.find(path)?;
		Ok(self.nodes[idx].dirs.keys().map(String::as_str).collect())
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}
