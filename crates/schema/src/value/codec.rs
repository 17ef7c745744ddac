use gamedex_cache::{CacheReader, CacheWriter};

use super::{Color, PropertyValue, ValueError, ValueKind};

impl PropertyValue {
	/// Writes the wire form of this value (without its kind tag).
	pub fn encode(&self, w: &mut CacheWriter) {
		match self {
			PropertyValue::Boolean(v) => w.put_bool(*v),
			PropertyValue::UInt16(v) => w.put_u16(*v),
			PropertyValue::UInt32(v) => w.put_u32(*v),
			PropertyValue::SInt32(v) => w.put_i32(*v),
			PropertyValue::Float32(v) => w.put_f32(*v),
			PropertyValue::Float64(v) => w.put_f64(*v),
			PropertyValue::Point3(p) => w.put(p),
			PropertyValue::Point2(p) => w.put(p),
			PropertyValue::Color(c) => {
				w.put_u8(c.r);
				w.put_u8(c.g);
				w.put_u8(c.b);
			}
			PropertyValue::ColorA(c) => {
				w.put_u8(c.a);
				w.put_u8(c.r);
				w.put_u8(c.g);
				w.put_u8(c.b);
			}
			PropertyValue::String(s) | PropertyValue::EntityRef(s) | PropertyValue::AssetId(s) => {
				w.put_str(s)
			}
			PropertyValue::AssocString(m)
			| PropertyValue::AssocEntityRef(m)
			| PropertyValue::AssocAttachedNifAsset(m) => w.put(m),
			PropertyValue::AssocPoint3(m) => w.put(m),
			PropertyValue::AssocUInt32(m) => w.put(m),
			PropertyValue::AssocSInt32(m) => w.put(m),
		}
	}

	/// Reads a value of `kind`; exact inverse of [`Self::encode`].
	pub fn decode(kind: ValueKind, r: &mut CacheReader<'_>) -> Result<Self, ValueError> {
		Ok(match kind {
			ValueKind::Boolean => PropertyValue::Boolean(r.get_bool()?),
			ValueKind::UInt16 => PropertyValue::UInt16(r.get_u16()?),
			ValueKind::UInt32 => PropertyValue::UInt32(r.get_u32()?),
			ValueKind::SInt32 => PropertyValue::SInt32(r.get_i32()?),
			ValueKind::Float32 => PropertyValue::Float32(r.get_f32()?),
			ValueKind::Float64 => PropertyValue::Float64(r.get_f64()?),
			ValueKind::Point3 => PropertyValue::Point3(r.get()?),
			ValueKind::Point2 => PropertyValue::Point2(r.get()?),
			ValueKind::Color => {
				let (red, green, blue) = (r.get_u8()?, r.get_u8()?, r.get_u8()?);
				PropertyValue::Color(Color::rgb(red, green, blue))
			}
			ValueKind::ColorA => {
				let (a, red, green, blue) = (r.get_u8()?, r.get_u8()?, r.get_u8()?, r.get_u8()?);
				PropertyValue::ColorA(Color::argb(a, red, green, blue))
			}
			ValueKind::String => PropertyValue::String(r.get_string()?),
			ValueKind::EntityRef => PropertyValue::EntityRef(r.get_string()?),
			ValueKind::AssetId => PropertyValue::AssetId(r.get_string()?),
			ValueKind::AssocString => PropertyValue::AssocString(r.get()?),
			ValueKind::AssocEntityRef => PropertyValue::AssocEntityRef(r.get()?),
			ValueKind::AssocAttachedNifAsset => PropertyValue::AssocAttachedNifAsset(r.get()?),
			ValueKind::AssocPoint3 => PropertyValue::AssocPoint3(r.get()?),
			ValueKind::AssocUInt32 => PropertyValue::AssocUInt32(r.get()?),
			ValueKind::AssocSInt32 => PropertyValue::AssocSInt32(r.get()?),
		})
	}
}

/// Encodes `value` under the textual discriminant `tag`.
///
/// Fails with [`ValueError::UnsupportedType`] for an unknown tag and
/// [`ValueError::KindMismatch`] if `value` is of another kind.
pub fn encode_tagged(tag: &str, value: &PropertyValue, w: &mut CacheWriter) -> Result<(), ValueError> {
	let kind: ValueKind = tag.parse()?;
	if kind != value.kind() {
		return Err(ValueError::KindMismatch {
			expected: kind,
			found: value.kind(),
		});
	}
	value.encode(w);
	Ok(())
}

/// Decodes a value whose kind is given by the textual discriminant `tag`.
pub fn decode_tagged(tag: &str, r: &mut CacheReader<'_>) -> Result<PropertyValue, ValueError> {
	let kind: ValueKind = tag.parse()?;
	PropertyValue::decode(kind, r)
}
