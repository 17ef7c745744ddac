//! Graph construction from XML type definitions.
//!
//! A definition file looks like:
//!
//! ```xml
//! <class name="SpawnPoint" id="2">
//!     <trait name="Placeable"/>
//!     <mixin name="BaseEntity"/>
//!     <property name="radius" type="Float32" id="p7" source="spawn.xml">
//!         <set value="2.5"/>
//!         <trait name="Editable"/>
//!     </property>
//!     <property name="loot" type="AssocUInt32" id="p8">
//!         <set index="gold" value="10"/>
//!         <set index="gems" value="1"/>
//!     </property>
//!     <behavior name="OnSpawn" type="Script" id="b1"/>
//! </class>
//! ```

use gamedex_source::{EntrySource, SourceEntry, XmlElement};
use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, info, warn};

use super::{TypeGraph, inherited_property, name_key, resolve_mixins};
use crate::error::{Result, SchemaError};
use crate::node::{Behavior, Property, TypeIndex, TypeNode};
use crate::value::{PropertyValue, ValueKind};

/// Options for [`TypeGraph::build`].
#[derive(Debug, Clone, Default)]
pub struct SchemaOptions {
	/// Entry-name prefix selecting definition files. Empty selects everything.
	pub root: String,
	/// Drop properties whose value equals the one inherited from a mixin.
	///
	/// Compared against the full, unminimized tables of the mixins. Off by
	/// default.
	pub minimize: bool,
}

/// Reference name of a `trait` or `mixin` element: `name` attribute, else text.
fn element_name(el: &XmlElement) -> Option<&str> {
	el.attr("name")
		.filter(|s| !s.is_empty())
		.or_else(|| Some(el.text()).filter(|s| !s.is_empty()))
}

fn set_literal(set: &XmlElement) -> &str {
	set.attr("value").unwrap_or_else(|| set.text())
}

fn collect_traits(el: &XmlElement) -> Vec<String> {
	el.children_named("trait")
		.filter_map(element_name)
		.map(str::to_string)
		.collect()
}

fn parse_property(type_name: &str, el: &XmlElement) -> Result<Option<Property>> {
	let Some(name) = el.attr("name").filter(|s| !s.is_empty()) else {
		warn!(type_name, "property without a name; skipping");
		return Ok(None);
	};
	let Some(tag) = el.attr("type") else {
		warn!(type_name, property = name, "property without a type; skipping");
		return Ok(None);
	};
	let kind: ValueKind = tag.parse()?;
	let parsed = if kind.is_assoc() {
		let pairs = el.children_named("set").filter_map(|set| match set.attr("index") {
			Some(index) => Some((index, set_literal(set))),
			None => {
				debug!(type_name, property = name, "set without index; skipping");
				None
			}
		});
		PropertyValue::parse_assoc(kind, pairs)
	} else {
		match el.child("set") {
			Some(set) => PropertyValue::parse_scalar(kind, set_literal(set)),
			None => Ok(PropertyValue::default_for(kind)),
		}
	};
	let value = parsed.map_err(|error| SchemaError::ValueParse {
		type_name: type_name.to_string(),
		property: name.to_string(),
		error,
	})?;
	Ok(Some(Property {
		name: name.to_string(),
		id: el.attr("id").unwrap_or_default().to_string(),
		source: el.attr("source").map(str::to_string),
		traits: collect_traits(el),
		value,
	}))
}

fn parse_behavior(type_name: &str, el: &XmlElement) -> Option<Behavior> {
	let Some(name) = el.attr("name").filter(|s| !s.is_empty()) else {
		warn!(type_name, "behavior without a name; skipping");
		return None;
	};
	Some(Behavior {
		name: name.to_string(),
		id: el.attr("id").unwrap_or_default().to_string(),
		kind: el.attr("type").unwrap_or_default().to_string(),
		source: el.attr("source").map(str::to_string),
		traits: collect_traits(el),
	})
}

/// Drops properties equal to their inherited value.
///
/// Every drop is decided before any is applied, so each comparison sees the
/// mixins' tables as parsed.
fn minimize(nodes: &mut [TypeNode]) {
	let parsed: &[TypeNode] = nodes;
	let mut drops: Vec<(usize, String)> = Vec::new();
	for node in parsed {
		for property in node.properties.values() {
			if inherited_property(parsed, node.index, &property.name)
				.is_some_and(|inherited| inherited.value == property.value)
			{
				debug!(type_name = %node.name, property = %property.name, "dropping inherited duplicate");
				drops.push((node.index.as_usize(), property.name.clone()));
			}
		}
	}
	for (i, name) in drops {
		nodes[i].properties.shift_remove(&name);
	}
}

impl TypeGraph {
	/// Builds the graph from every `.xml` entry under `options.root`.
	///
	/// Definitions lacking a non-empty `name` or a `u32` `id`, unreadable
	/// entries, and repeated names are logged and skipped. Unknown mixins,
	/// unknown value kinds and unparseable literals abort the build.
	pub fn build<S: EntrySource>(source: &S, options: &SchemaOptions) -> Result<Self> {
		let mut nodes: Vec<TypeNode> = Vec::new();
		let mut roots: Vec<XmlElement> = Vec::new();
		let mut by_name: HashMap<String, TypeIndex> = HashMap::default();

		for entry in source.entries()? {
			let path = entry.name();
			if !path.starts_with(options.root.as_str()) || !path.ends_with(".xml") {
				continue;
			}
			let root = match entry.read_xml() {
				Ok(root) => root,
				Err(error) => {
					warn!(path, %error, "unreadable type definition; skipping");
					continue;
				}
			};
			let Some(name) = root.attr("name").filter(|s| !s.is_empty()) else {
				warn!(path, "type definition without a name; skipping");
				continue;
			};
			let Some(id) = root.attr("id").and_then(|s| s.trim().parse::<u32>().ok()) else {
				warn!(path, name, "type definition without a valid id; skipping");
				continue;
			};
			let key = name_key(name);
			if by_name.contains_key(&key) {
				warn!(path, name, "duplicate type name; keeping first definition");
				continue;
			}
			let index = TypeIndex::from_usize(nodes.len());
			by_name.insert(key, index);
			nodes.push(TypeNode::new(index, name.to_string(), id, path.to_string()));
			roots.push(root);
		}

		// Every type exists now, so mixins may refer forward in source order.
		for (node, root) in nodes.iter_mut().zip(&roots) {
			node.traits = collect_traits(root).into_iter().collect();
			let names: Vec<String> = root
				.children_named("mixin")
				.filter_map(element_name)
				.map(str::to_string)
				.collect();
			node.mixins = resolve_mixins(&by_name, &node.name, &names)?;
		}

		for (i, root) in roots.iter().enumerate() {
			let type_name = nodes[i].name.clone();
			let mut properties = IndexMap::new();
			for el in root.children_named("property") {
				if let Some(property) = parse_property(&type_name, el)? {
					properties.insert(property.name.clone(), property);
				}
			}
			let behaviors = root
				.children_named("behavior")
				.filter_map(|el| parse_behavior(&type_name, el))
				.map(|b| (b.name.clone(), b))
				.collect();
			nodes[i].properties = properties;
			nodes[i].behaviors = behaviors;
		}

		if options.minimize {
			minimize(&mut nodes);
		}

		let graph = TypeGraph::assemble(nodes, by_name);
		info!(types = graph.len(), root = %options.root, "built type graph from source");
		Ok(graph)
	}
}
