//! Entry enumeration and content access.
//!
//! Upstream, entries come out of an encrypted container reader. The indices
//! only need a name and the three content accessors below, so any backing
//! store can stand in: a plain directory, or buffers held in memory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use crate::error::{Result, SourceError};
use crate::xml::XmlElement;

/// A named blob of source data.
pub trait SourceEntry {
	/// Entry path, `/`-separated and relative to the source root.
	fn name(&self) -> &str;

	fn read_bytes(&self) -> Result<Vec<u8>>;

	fn read_string(&self) -> Result<String> {
		String::from_utf8(self.read_bytes()?).map_err(|_| SourceError::Utf8 {
			name: self.name().to_string(),
		})
	}

	/// Parses the entry as XML and returns the root element.
	fn read_xml(&self) -> Result<XmlElement> {
		let text = self.read_string()?;
		XmlElement::parse(&text).map_err(|e| SourceError::Xml {
			name: self.name().to_string(),
			message: e.to_string(),
		})
	}
}

/// An enumerable collection of entries.
pub trait EntrySource {
	type Entry: SourceEntry;

	/// All entries, sorted by name.
	fn entries(&self) -> Result<Vec<Self::Entry>>;
}

/// Entry backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileEntry {
	name: String,
	path: PathBuf,
}

impl FileEntry {
	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl SourceEntry for FileEntry {
	fn name(&self) -> &str {
		&self.name
	}

	fn read_bytes(&self) -> Result<Vec<u8>> {
		fs::read(&self.path).map_err(|error| SourceError::Io {
			path: self.path.clone(),
			error,
		})
	}
}

/// Every regular file under a directory tree.
#[derive(Debug, Clone)]
pub struct DirSource {
	root: PathBuf,
}

impl DirSource {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl EntrySource for DirSource {
	type Entry = FileEntry;

	fn entries(&self) -> Result<Vec<FileEntry>> {
		let mut out = Vec::new();
		for entry in WalkDir::new(&self.root).sort_by_file_name() {
			let entry = entry.map_err(|e| SourceError::Walk {
				root: self.root.clone(),
				message: e.to_string(),
			})?;
			if !entry.file_type().is_file() {
				continue;
			}
			let Ok(rel) = entry.path().strip_prefix(&self.root) else {
				continue;
			};
			let name = rel
				.components()
				.map(|c| c.as_os_str().to_string_lossy())
				.collect::<Vec<_>>()
				.join("/");
			trace!(name = %name, "source entry");
			out.push(FileEntry {
				name,
				path: entry.into_path(),
			});
		}
		out.sort_by(|a, b| a.name.cmp(&b.name));
		Ok(out)
	}
}

/// Entry held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEntry {
	name: String,
	data: Vec<u8>,
}

impl SourceEntry for MemoryEntry {
	fn name(&self) -> &str {
		&self.name
	}

	fn read_bytes(&self) -> Result<Vec<u8>> {
		Ok(self.data.clone())
	}
}

/// In-memory entry collection, e.g. for already-decrypted container contents.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
	entries: Vec<MemoryEntry>,
}

impl MemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces the entry called `name`.
	pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
		let name = name.into();
		let data = data.into();
		match self.entries.iter_mut().find(|e| e.name == name) {
			Some(existing) => existing.data = data,
			None => self.entries.push(MemoryEntry { name, data }),
		}
	}

	pub fn with(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
		self.insert(name, data);
		self
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl EntrySource for MemorySource {
	type Entry = MemoryEntry;

	fn entries(&self) -> Result<Vec<MemoryEntry>> {
		let mut out = self.entries.clone();
		out.sort_by(|a, b| a.name.cmp(&b.name));
		Ok(out)
	}
}

/// View of another source restricted to names starting with `prefix`.
#[derive(Debug, Clone, Copy)]
pub struct ScopedSource<'a, S> {
	inner: &'a S,
	prefix: &'a str,
}

impl<'a, S> ScopedSource<'a, S> {
	pub fn new(inner: &'a S, prefix: &'a str) -> Self {
		Self { inner, prefix }
	}
}

impl<S: EntrySource> EntrySource for ScopedSource<'_, S> {
	type Entry = S::Entry;

	fn entries(&self) -> Result<Vec<S::Entry>> {
		let mut entries = self.inner.entries()?;
		entries.retain(|e| e.name().starts_with(self.prefix));
		Ok(entries)
	}
}

/// Final path segment of an entry name.
pub fn base_name(name: &str) -> &str {
	name.rsplit('/').next().unwrap_or(name)
}

/// Base name with everything from the first `.` removed.
pub fn file_stem(name: &str) -> &str {
	let base = base_name(name);
	base.split('.').next().unwrap_or(base)
}
