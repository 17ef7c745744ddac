//! Type, property and behavior records.

use indexmap::{IndexMap, IndexSet};

use crate::value::{PropertyValue, ValueKind};

/// Dense index of a [`TypeNode`] within its [`crate::TypeGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIndex(u32);

impl TypeIndex {
	pub(crate) fn from_usize(idx: usize) -> Self {
		Self(idx as u32)
	}

	pub fn as_usize(self) -> usize {
		self.0 as usize
	}
}

/// A named, typed property with its default value.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
	pub name: String,
	/// Opaque identifier from the definition file.
	pub id: String,
	/// Diagnostic provenance, when the definition recorded one.
	pub source: Option<String>,
	pub traits: Vec<String>,
	pub value: PropertyValue,
}

impl Property {
	pub fn kind(&self) -> ValueKind {
		self.value.kind()
	}
}

/// A named behavior attached to a type. Behaviors carry no value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Behavior {
	pub name: String,
	pub id: String,
	pub kind: String,
	pub source: Option<String>,
	pub traits: Vec<String>,
}

/// One type of the schema graph.
///
/// Mixins are stored as indices into the owning graph; use
/// [`crate::TypeGraph::mixins`] to walk them as nodes.
#[derive(Clone, Debug)]
pub struct TypeNode {
	pub(crate) index: TypeIndex,
	pub(crate) name: String,
	pub(crate) id: u32,
	pub(crate) path: String,
	pub(crate) traits: IndexSet<String>,
	pub(crate) mixins: Vec<TypeIndex>,
	pub(crate) properties: IndexMap<String, Property>,
	pub(crate) behaviors: IndexMap<String, Behavior>,
}

impl TypeNode {
	pub(crate) fn new(index: TypeIndex, name: String, id: u32, path: String) -> Self {
		Self {
			index,
			name,
			id,
			path,
			traits: IndexSet::new(),
			mixins: Vec::new(),
			properties: IndexMap::new(),
			behaviors: IndexMap::new(),
		}
	}

	pub fn index(&self) -> TypeIndex {
		self.index
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn id(&self) -> u32 {
		self.id
	}

	/// Entry path the type was defined in.
	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn traits(&self) -> &IndexSet<String> {
		&self.traits
	}

	pub fn has_trait(&self, name: &str) -> bool {
		self.traits.contains(name)
	}

	/// Direct mixins, in declaration order.
	pub fn mixin_indices(&self) -> &[TypeIndex] {
		&self.mixins
	}

	/// Properties declared on this type itself.
	pub fn properties(&self) -> &IndexMap<String, Property> {
		&self.properties
	}

	pub fn property(&self, name: &str) -> Option<&Property> {
		self.properties.get(name)
	}

	pub fn behaviors(&self) -> &IndexMap<String, Behavior> {
		&self.behaviors
	}

	pub fn behavior(&self, name: &str) -> Option<&Behavior> {
		self.behaviors.get(name)
	}
}

impl PartialEq for TypeNode {
	fn eq(&self, other: &Self) -> bool {
		self.index == other.index && self.name == other.name
	}
}

impl Eq for TypeNode {}
