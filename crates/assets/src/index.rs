//! Index construction and lookups.

use std::iter;

use gamedex_source::{EntrySource, SourceEntry, file_stem};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::{debug, info, trace, warn};

use crate::error::Result;
use crate::triple::TripleParser;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Classification tags, in the order they appear in [`AssetFields::tags`].
pub const TAG_CATEGORIES: [&str; 19] = [
	"model",
	"texture",
	"animation",
	"skeleton",
	"sound",
	"music",
	"particle",
	"effect",
	"material",
	"shader",
	"font",
	"image",
	"video",
	"movie",
	"ui",
	"world",
	"zone",
	"collision",
	"script",
];

const LLID_FILE: &str = "llid";
const NAME_CATEGORY: &str = "name";
const RELPATH_CATEGORY: &str = "relpath";
const LLID_PREFIX: &str = "urn:llid:";

fn is_indexed(stem: &str) -> bool {
	matches!(stem, LLID_FILE | NAME_CATEGORY | RELPATH_CATEGORY) || TAG_CATEGORIES.contains(&stem)
}

fn strip_llid(llid: &str) -> &str {
	llid.strip_prefix(LLID_PREFIX).unwrap_or(llid)
}

/// Display fields resolved for one llid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFields {
	pub name: String,
	pub relpath: String,
	/// Matching tag categories followed by the name, joined with `:`.
	pub tags: String,
}

/// uuid/llid cross reference with per-category uuid mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetIndex {
	/// llid (without `urn:llid:`) to uuids, in source order.
	pub(crate) llid_lookup: FxIndexMap<String, Vec<String>>,
	/// category to uuid to value.
	pub(crate) nt_lookup: FxIndexMap<String, FxIndexMap<String, String>>,
}

impl AssetIndex {
	/// Builds the index from every recognized category file in `source`.
	///
	/// A file is recognized by its stem: `llid`, `name`, `relpath` or one of
	/// [`TAG_CATEGORIES`]. Files sharing a stem are merged in entry order; a
	/// later value for the same uuid replaces the earlier one.
	pub fn build<S: EntrySource>(source: &S) -> Result<Self> {
		let parser = TripleParser::new()?;
		let mut index = Self::default();

		for entry in source.entries()? {
			let name = entry.name();
			let stem = file_stem(name);
			if !is_indexed(stem) {
				trace!(name, "not a category file; skipping");
				continue;
			}
			let text = entry.read_string()?;
			let triples = parser.parse_file(name, &text)?;
			debug!(name, category = stem, statements = triples.len(), "parsed category file");

			if stem == LLID_FILE {
				for t in triples {
					index
						.llid_lookup
						.entry(strip_llid(&t.value).to_string())
						.or_default()
						.push(t.uuid);
				}
			} else {
				let map = index.nt_lookup.entry(stem.to_string()).or_default();
				for t in triples {
					map.insert(t.uuid, t.value);
				}
			}
		}

		info!(
			llids = index.llid_lookup.len(),
			categories = index.nt_lookup.len(),
			"built asset index"
		);
		Ok(index)
	}

	/// Resolves name, relpath and tags for `llid`.
	///
	/// Accepts the llid with or without its `urn:llid:` prefix. Unknown llids
	/// yield empty fields. When an llid aliases several uuids the first one
	/// is used.
	pub fn fields(&self, llid: &str) -> AssetFields {
		let key = strip_llid(llid);
		let Some((uuid, aliases)) = self
			.llid_lookup
			.get(key)
			.and_then(|uuids| Some((uuids.first()?, uuids.len())))
		else {
			debug!(llid = key, "unknown llid");
			return AssetFields::default();
		};
		if aliases > 1 {
			warn!(llid = key, uuids = aliases, "llid maps to several uuids; using the first");
		}

		let name = self.field(NAME_CATEGORY, uuid).unwrap_or_default();
		let relpath = self.field(RELPATH_CATEGORY, uuid).unwrap_or_default();
		let tags = TAG_CATEGORIES
			.iter()
			.copied()
			.filter(|category| self.field(category, uuid).is_some())
			.chain(iter::once(name))
			.collect::<Vec<_>>()
			.join(":");

		AssetFields {
			name: name.to_string(),
			relpath: relpath.to_string(),
			tags,
		}
	}

	/// First uuid recorded for `llid`.
	pub fn uuid_for(&self, llid: &str) -> Option<&str> {
		self.llid_lookup
			.get(strip_llid(llid))
			.and_then(|uuids| uuids.first())
			.map(String::as_str)
	}

	/// Value of `category` for `uuid`.
	pub fn field(&self, category: &str, uuid: &str) -> Option<&str> {
		self.nt_lookup
			.get(category)
			.and_then(|map| map.get(uuid))
			.map(String::as_str)
	}

	/// llids that alias more than one uuid.
	pub fn inconsistent_llids(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.llid_lookup
			.iter()
			.filter(|(_, uuids)| uuids.len() > 1)
			.map(|(llid, uuids)| (llid.as_str(), uuids.as_slice()))
	}

	pub fn llid_count(&self) -> usize {
		self.llid_lookup.len()
	}

	/// Number of uuids with a value in `category`.
	pub fn category_len(&self, category: &str) -> usize {
		self.nt_lookup.get(category).map_or(0, |map| map.len())
	}
}
