//! Source-side collaborators for the gamedex indices.
//!
//! - [`EntrySource`] / [`SourceEntry`]: enumerate named entries and read them
//!   as bytes, UTF-8 text, or an [`XmlElement`] tree.
//! - [`DirSource`] and [`MemorySource`]: the two bundled entry sources, and
//!   [`ScopedSource`] to restrict either to a name prefix.
//! - [`PathTree`]: directory-style browsing over entry paths.

mod entry;
mod error;
mod path_tree;
mod xml;

pub use entry::{
	DirSource, EntrySource, FileEntry, MemoryEntry, MemorySource, ScopedSource, SourceEntry, base_name,
	file_stem,
};
pub use error::{PathTreeError, Result, SourceError};
pub use path_tree::PathTree;
pub use xml::XmlElement;
