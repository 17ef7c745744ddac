//! Blob header definitions.

use std::fmt;
use std::mem::size_of;

/// Four-byte tag identifying which structure a cache blob holds.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Magic(pub [u8; 4]);

impl Magic {
	pub const fn new(bytes: &[u8; 4]) -> Self {
		Self(*bytes)
	}

	pub const fn as_bytes(&self) -> &[u8; 4] {
		&self.0
	}
}

impl fmt::Display for Magic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("\"")?;
		for byte in self.0 {
			write!(f, "{}", byte.escape_ascii())?;
		}
		f.write_str("\"")
	}
}

impl fmt::Debug for Magic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Magic({self})")
	}
}

/// Magic tag and the single version a reader accepts.
///
/// There is no compatibility window: a blob whose version differs from
/// [`CacheFormat::version`] is rejected outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheFormat {
	pub magic: Magic,
	pub version: u32,
}

impl CacheFormat {
	pub const fn new(magic: &[u8; 4], version: u32) -> Self {
		Self {
			magic: Magic::new(magic),
			version,
		}
	}
}

/// Total header size in bytes (magic + version).
pub const HEADER_SIZE: usize = size_of::<[u8; 4]>() + size_of::<u32>();
