//! Binary cache framing shared by the gamedex indices.
//!
//! Every persisted structure is a blob of the form
//!
//! ```text
//! [magic: 4 bytes][version: u32 LE][payload]
//! ```
//!
//! The payload follows a handful of fixed conventions:
//!
//! - integers and floats are fixed-width little-endian;
//! - strings are a `u32` byte length followed by UTF-8 bytes;
//! - optional strings are a presence byte followed by the string when present;
//! - sequences and mappings are a `u32` element count followed by the elements,
//!   with no terminator or padding.
//!
//! Readers accept exactly one version per magic. A blob from any other version
//! is rejected with [`CacheError::UnsupportedVersion`]; there is no migration.

mod codec;
mod error;
mod file;
mod format;
mod reader;
mod writer;

pub use codec::{CacheDecode, CacheEncode};
pub use error::{CacheError, Result};
pub use file::{read_cache_file, write_cache_file};
pub use format::{CacheFormat, HEADER_SIZE, Magic};
pub use reader::CacheReader;
pub use writer::CacheWriter;
