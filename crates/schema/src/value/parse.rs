//! Literal grammar for `set` values in type definitions.
//!
//! | Kind | Accepted text |
//! |------|---------------|
//! | `Boolean` | `true`/`false`/`1`/`0`/`yes`/`no`, any case |
//! | `UInt16`, `UInt32` | decimal or `0x` hexadecimal |
//! | `SInt32` | decimal |
//! | `Float32`, `Float64` | float literal |
//! | `Point3`, `Point2` | components split on commas and/or whitespace |
//! | `Color` | `r,g,b` or `#RRGGBB` |
//! | `ColorA` | `a,r,g,b` or `#AARRGGBB` |
//! | string kinds | verbatim |
//!
//! Associative kinds parse each pair's value with the element kind's rule.

use std::str::FromStr;

use super::{AssocMap, Color, PropertyValue, ValueError, ValueKind};

fn fail(kind: ValueKind, text: &str) -> ValueError {
	ValueError::Parse {
		kind,
		text: text.to_string(),
	}
}

fn parse_bool(text: &str) -> Option<bool> {
	match text.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" => Some(true),
		"false" | "0" | "no" => Some(false),
		_ => None,
	}
}

fn parse_unsigned<T>(text: &str) -> Option<T>
where
	T: FromStr + TryFrom<u64>,
{
	let text = text.trim();
	match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
		Some(hex) => u64::from_str_radix(hex, 16).ok().and_then(|v| T::try_from(v).ok()),
		None => text.parse().ok(),
	}
}

fn components(text: &str) -> impl Iterator<Item = &str> {
	text.split(|c: char| c == ',' || c.is_whitespace())
		.filter(|s| !s.is_empty())
}

fn parse_floats<const N: usize>(text: &str) -> Option<[f32; N]> {
	let mut out = [0.0f32; N];
	let mut parts = components(text);
	for slot in &mut out {
		*slot = parts.next()?.parse().ok()?;
	}
	parts.next().is_none().then_some(out)
}

fn parse_bytes<const N: usize>(text: &str) -> Option<[u8; N]> {
	let text = text.trim();
	let mut out = [0u8; N];
	if let Some(hex) = text.strip_prefix('#') {
		if hex.len() != N * 2 || !hex.is_ascii() {
			return None;
		}
		for (i, slot) in out.iter_mut().enumerate() {
			*slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
		}
		return Some(out);
	}
	let mut parts = components(text);
	for slot in &mut out {
		*slot = parts.next()?.parse().ok()?;
	}
	parts.next().is_none().then_some(out)
}

impl PropertyValue {
	/// Parses a single `set` literal for a non-associative kind.
	pub fn parse_scalar(kind: ValueKind, text: &str) -> Result<Self, ValueError> {
		let parsed = match kind {
			ValueKind::Boolean => parse_bool(text).map(PropertyValue::Boolean),
			ValueKind::UInt16 => parse_unsigned(text).map(PropertyValue::UInt16),
			ValueKind::UInt32 => parse_unsigned(text).map(PropertyValue::UInt32),
			ValueKind::SInt32 => text.trim().parse().ok().map(PropertyValue::SInt32),
			ValueKind::Float32 => text.trim().parse().ok().map(PropertyValue::Float32),
			ValueKind::Float64 => text.trim().parse().ok().map(PropertyValue::Float64),
			ValueKind::Point3 => parse_floats(text).map(PropertyValue::Point3),
			ValueKind::Point2 => parse_floats(text).map(PropertyValue::Point2),
			ValueKind::Color => {
				parse_bytes::<3>(text).map(|[r, g, b]| PropertyValue::Color(Color::rgb(r, g, b)))
			}
			ValueKind::ColorA => parse_bytes::<4>(text)
				.map(|[a, r, g, b]| PropertyValue::ColorA(Color::argb(a, r, g, b))),
			ValueKind::String => Some(PropertyValue::String(text.to_string())),
			ValueKind::EntityRef => Some(PropertyValue::EntityRef(text.to_string())),
			ValueKind::AssetId => Some(PropertyValue::AssetId(text.to_string())),
			ValueKind::AssocString
			| ValueKind::AssocEntityRef
			| ValueKind::AssocAttachedNifAsset
			| ValueKind::AssocPoint3
			| ValueKind::AssocUInt32
			| ValueKind::AssocSInt32 => None,
		};
		parsed.ok_or_else(|| fail(kind, text))
	}

	/// Builds an associative value from `(index, value)` literal pairs.
	///
	/// A repeated index keeps its first position and takes the last value.
	pub fn parse_assoc<'a, I>(kind: ValueKind, pairs: I) -> Result<Self, ValueError>
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let Some(elem) = kind.element_kind() else {
			return Err(fail(kind, "<associative>"));
		};
		let mut strings = AssocMap::new();
		let mut points = AssocMap::new();
		let mut unsigned = AssocMap::new();
		let mut signed = AssocMap::new();
		for (key, text) in pairs {
			let key = key.to_string();
			match PropertyValue::parse_scalar(elem, text).map_err(|_| fail(kind, text))? {
				PropertyValue::String(s) | PropertyValue::EntityRef(s) | PropertyValue::AssetId(s) => {
					strings.insert(key, s);
				}
				PropertyValue::Point3(p) => {
					points.insert(key, p);
				}
				PropertyValue::UInt32(v) => {
					unsigned.insert(key, v);
				}
				PropertyValue::SInt32(v) => {
					signed.insert(key, v);
				}
				_ => return Err(fail(kind, text)),
			}
		}
		Ok(match kind {
			ValueKind::AssocString => PropertyValue::AssocString(strings),
			ValueKind::AssocEntityRef => PropertyValue::AssocEntityRef(strings),
			ValueKind::AssocAttachedNifAsset => PropertyValue::AssocAttachedNifAsset(strings),
			ValueKind::AssocPoint3 => PropertyValue::AssocPoint3(points),
			ValueKind::AssocUInt32 => PropertyValue::AssocUInt32(unsigned),
			_ => PropertyValue::AssocSInt32(signed),
		})
	}
}
