//! Typed property values.
//!
//! A property's kind is a closed set of wire discriminants. [`PropertyValue`]
//! carries one variant per kind, so the value's shape always matches its kind
//! and encode/decode are exhaustive matches.
//!
//! Several kinds share a wire form but stay distinct tags: `String`,
//! `EntityRef` and `AssetID` are all one string; `AssocString`,
//! `AssocEntityRef` and `AssocAttachedNifAsset` are all string-to-string maps.

mod codec;
mod parse;

use std::fmt;
use std::str::FromStr;

use gamedex_cache::CacheError;
use indexmap::IndexMap;
use thiserror::Error;

pub use codec::{decode_tagged, encode_tagged};

/// Insertion-ordered associative payload keyed by `index` strings.
pub type AssocMap<V> = IndexMap<String, V>;

/// Errors raised by the value codec and literal parser.
#[derive(Debug, Error)]
pub enum ValueError {
	/// The discriminant is not one of the known value kinds.
	#[error("unsupported value type '{0}'")]
	UnsupportedType(String),

	/// A value was paired with a discriminant of a different kind.
	#[error("value of kind {found} cannot be encoded as {expected}")]
	KindMismatch { expected: ValueKind, found: ValueKind },

	/// A literal could not be parsed for its kind.
	#[error("cannot parse '{text}' as {kind}")]
	Parse { kind: ValueKind, text: String },

	#[error(transparent)]
	Cache(#[from] CacheError),
}

macro_rules! value_kinds {
	($($variant:ident => $tag:literal),* $(,)?) => {
		/// Wire discriminant of a property value.
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		pub enum ValueKind {
			$($variant,)*
		}

		impl ValueKind {
			pub const ALL: &'static [ValueKind] = &[$(ValueKind::$variant,)*];

			/// Case-sensitive wire tag.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(ValueKind::$variant => $tag,)*
				}
			}
		}

		impl FromStr for ValueKind {
			type Err = ValueError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($tag => Ok(ValueKind::$variant),)*
					other => Err(ValueError::UnsupportedType(other.to_string())),
				}
			}
		}
	};
}

value_kinds! {
	Boolean => "Boolean",
	UInt16 => "UInt16",
	UInt32 => "UInt32",
	SInt32 => "SInt32",
	Float32 => "Float32",
	Float64 => "Float64",
	Point3 => "Point3",
	Point2 => "Point2",
	Color => "Color",
	ColorA => "ColorA",
	String => "String",
	EntityRef => "EntityRef",
	AssetId => "AssetID",
	AssocString => "AssocString",
	AssocEntityRef => "AssocEntityRef",
	AssocAttachedNifAsset => "AssocAttachedNifAsset",
	AssocPoint3 => "AssocPoint3",
	AssocUInt32 => "AssocUInt32",
	AssocSInt32 => "AssocSInt32",
}

impl ValueKind {
	/// Associative kinds are populated from every nested `set` element.
	pub const fn is_assoc(self) -> bool {
		self.element_kind().is_some()
	}

	/// Scalar kind of an associative kind's values.
	pub const fn element_kind(self) -> Option<ValueKind> {
		match self {
			ValueKind::AssocString => Some(ValueKind::String),
			ValueKind::AssocEntityRef => Some(ValueKind::EntityRef),
			ValueKind::AssocAttachedNifAsset => Some(ValueKind::AssetId),
			ValueKind::AssocPoint3 => Some(ValueKind::Point3),
			ValueKind::AssocUInt32 => Some(ValueKind::UInt32),
			ValueKind::AssocSInt32 => Some(ValueKind::SInt32),
			_ => None,
		}
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// 8-bit color channels.
///
/// The `Color` kind only stores RGB; decoding always yields `a == 255`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: u8,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 255 }
	}

	pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a }
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::rgb(0, 0, 0)
	}
}

/// A property value, one variant per [`ValueKind`].
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
	Boolean(bool),
	UInt16(u16),
	UInt32(u32),
	SInt32(i32),
	Float32(f32),
	Float64(f64),
	Point3([f32; 3]),
	Point2([f32; 2]),
	Color(Color),
	ColorA(Color),
	String(String),
	EntityRef(String),
	AssetId(String),
	AssocString(AssocMap<String>),
	AssocEntityRef(AssocMap<String>),
	AssocAttachedNifAsset(AssocMap<String>),
	AssocPoint3(AssocMap<[f32; 3]>),
	AssocUInt32(AssocMap<u32>),
	AssocSInt32(AssocMap<i32>),
}

impl PropertyValue {
	pub fn kind(&self) -> ValueKind {
		match self {
			PropertyValue::Boolean(_) => ValueKind::Boolean,
			PropertyValue::UInt16(_) => ValueKind::UInt16,
			PropertyValue::UInt32(_) => ValueKind::UInt32,
			PropertyValue::SInt32(_) => ValueKind::SInt32,
			PropertyValue::Float32(_) => ValueKind::Float32,
			PropertyValue::Float64(_) => ValueKind::Float64,
			PropertyValue::Point3(_) => ValueKind::Point3,
			PropertyValue::Point2(_) => ValueKind::Point2,
			PropertyValue::Color(_) => ValueKind::Color,
			PropertyValue::ColorA(_) => ValueKind::ColorA,
			PropertyValue::String(_) => ValueKind::String,
			PropertyValue::EntityRef(_) => ValueKind::EntityRef,
			PropertyValue::AssetId(_) => ValueKind::AssetId,
			PropertyValue::AssocString(_) => ValueKind::AssocString,
			PropertyValue::AssocEntityRef(_) => ValueKind::AssocEntityRef,
			PropertyValue::AssocAttachedNifAsset(_) => ValueKind::AssocAttachedNifAsset,
			PropertyValue::AssocPoint3(_) => ValueKind::AssocPoint3,
			PropertyValue::AssocUInt32(_) => ValueKind::AssocUInt32,
			PropertyValue::AssocSInt32(_) => ValueKind::AssocSInt32,
		}
	}

	/// Zero value of `kind`, used when a definition carries no `set` element.
	pub fn default_for(kind: ValueKind) -> Self {
		match kind {
			ValueKind::Boolean => PropertyValue::Boolean(false),
			ValueKind::UInt16 => PropertyValue::UInt16(0),
			ValueKind::UInt32 => PropertyValue::UInt32(0),
			ValueKind::SInt32 => PropertyValue::SInt32(0),
			ValueKind::Float32 => PropertyValue::Float32(0.0),
			ValueKind::Float64 => PropertyValue::Float64(0.0),
			ValueKind::Point3 => PropertyValue::Point3([0.0; 3]),
			ValueKind::Point2 => PropertyValue::Point2([0.0; 2]),
			ValueKind::Color => PropertyValue::Color(Color::default()),
			ValueKind::ColorA => PropertyValue::ColorA(Color::argb(0, 0, 0, 0)),
			ValueKind::String => PropertyValue::String(String::new()),
			ValueKind::EntityRef => PropertyValue::EntityRef(String::new()),
			ValueKind::AssetId => PropertyValue::AssetId(String::new()),
			ValueKind::AssocString => PropertyValue::AssocString(AssocMap::new()),
			ValueKind::AssocEntityRef => PropertyValue::AssocEntityRef(AssocMap::new()),
			ValueKind::AssocAttachedNifAsset => {
				PropertyValue::AssocAttachedNifAsset(AssocMap::new())
			}
			ValueKind::AssocPoint3 => PropertyValue::AssocPoint3(AssocMap::new()),
			ValueKind::AssocUInt32 => PropertyValue::AssocUInt32(AssocMap::new()),
			ValueKind::AssocSInt32 => PropertyValue::AssocSInt32(AssocMap::new()),
		}
	}
}

#[cfg(test)]
mod tests;
