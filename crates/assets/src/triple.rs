//! Line parser for the simplified triple dialect.
//!
//! ```text
//! <urn:uuid:4f1c> <http://example/name> "Rusty Sword" .
//! ```
//!
//! The predicate is a single whitespace-free token and is discarded. Only the
//! uuid and the quoted literal are kept.

use regex::Regex;

use crate::error::{AssetError, Result};

const TRIPLE_PATTERN: &str = r#"^<urn:uuid:([^>]+)>\s+\S+\s+"((?:[^"\\]|\\.)*)"\s*\.\s*$"#;

/// One parsed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
	pub uuid: String,
	pub value: String,
}

/// Compiled triple grammar, shared across every file of one build.
#[derive(Debug, Clone)]
pub struct TripleParser {
	re: Regex,
}

impl TripleParser {
	pub fn new() -> Result<Self> {
		Ok(Self {
			re: Regex::new(TRIPLE_PATTERN)?,
		})
	}

	/// Parses a single line. `None` if it does not match the grammar.
	pub fn parse_line(&self, line: &str) -> Option<Triple> {
		let caps = self.re.captures(line)?;
		Some(Triple {
			uuid: caps[1].to_string(),
			value: unescape(&caps[2]),
		})
	}

	/// Parses every non-blank line of `text`.
	///
	/// The first line that fails to match aborts with
	/// [`AssetError::MalformedLine`], numbered from 1.
	pub fn parse_file(&self, file: &str, text: &str) -> Result<Vec<Triple>> {
		let mut out = Vec::new();
		for (n, line) in text.lines().enumerate() {
			let line = line.trim_end_matches('\r');
			if line.trim().is_empty() {
				continue;
			}
			match self.parse_line(line) {
				Some(triple) => out.push(triple),
				None => {
					return Err(AssetError::MalformedLine {
						file: file.to_string(),
						line: n + 1,
						text: line.to_string(),
					});
				}
			}
		}
		Ok(out)
	}
}

/// Resolves `\"`, `\\`, `\n`, `\t` and `\r`. Any other escaped character
/// stands for itself.
fn unescape(raw: &str) -> String {
	if !raw.contains('\\') {
		return raw.to_string();
	}
	let mut out = String::with_capacity(raw.len());
	let mut chars = raw.chars();
	while let Some(c) = chars.next() {
		if c != '\\' {
			out.push(c);
			continue;
		}
		match chars.next() {
			Some('n') => out.push('\n'),
			Some('t') => out.push('\t'),
			Some('r') => out.push('\r'),
			Some(other) => out.push(other),
			None => out.push('\\'),
		}
	}
	out
}
