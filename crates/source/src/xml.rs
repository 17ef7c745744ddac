//! Owned XML element tree.
//!
//! Consumers only ever select child elements by tag and read attributes, so
//! the tree keeps elements, attributes and concatenated text and drops
//! everything else (comments, processing instructions, namespaces).

/// A single XML element with its attributes and element children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
	tag: String,
	attributes: Vec<(String, String)>,
	text: String,
	children: Vec<XmlElement>,
}

impl XmlElement {
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			..Self::default()
		}
	}

	/// Builder-style attribute insertion, mainly for synthesized documents.
	pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push((name.into(), value.into()));
		self
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = text.into();
		self
	}

	pub fn with_child(mut self, child: XmlElement) -> Self {
		self.children.push(child);
		self
	}

	/// Parses `text` and returns its root element.
	pub fn parse(text: &str) -> Result<Self, roxmltree::Error> {
		let doc = roxmltree::Document::parse(text)?;
		Ok(Self::from_node(doc.root_element()))
	}

	fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
		let attributes = node
			.attributes()
			.map(|a| (a.name().to_string(), a.value().to_string()))
			.collect();
		let mut text = String::new();
		let mut children = Vec::new();
		for child in node.children() {
			if child.is_element() {
				children.push(Self::from_node(child));
			} else if child.is_text()
				&& let Some(t) = child.text()
			{
				text.push_str(t);
			}
		}
		Self {
			tag: node.tag_name().name().to_string(),
			attributes,
			text: text.trim().to_string(),
			children,
		}
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Attribute value by exact name.
	pub fn attr(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(k, _)| k == name)
			.map(|(_, v)| v.as_str())
	}

	/// Trimmed text content directly under this element.
	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn children(&self) -> &[XmlElement] {
		&self.children
	}

	/// First direct child with the given tag.
	pub fn child(&self, tag: &str) -> Option<&XmlElement> {
		self.children.iter().find(|c| c.tag == tag)
	}

	/// Every direct child with the given tag, in document order.
	pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
		self.children.iter().filter(move |c| c.tag == tag)
	}
}
