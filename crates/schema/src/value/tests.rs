use gamedex_cache::{CacheError, CacheReader, CacheWriter};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn roundtrip(value: &PropertyValue) -> PropertyValue {
	let mut w = CacheWriter::headerless();
	value.encode(&mut w);
	let bytes = w.finish().expect("finish");
	let mut r = CacheReader::headerless(&bytes);
	let out = PropertyValue::decode(value.kind(), &mut r).expect("decode");
	r.finish().expect("fully consumed");
	out
}

fn assoc<V: Clone>(pairs: &[(&str, V)]) -> AssocMap<V> {
	pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn sample(kind: ValueKind) -> PropertyValue {
	match kind {
		ValueKind::Boolean => PropertyValue::Boolean(true),
		ValueKind::UInt16 => PropertyValue::UInt16(65535),
		ValueKind::UInt32 => PropertyValue::UInt32(0xDEAD_BEEF),
		ValueKind::SInt32 => PropertyValue::SInt32(-42),
		ValueKind::Float32 => PropertyValue::Float32(3.5),
		ValueKind::Float64 => PropertyValue::Float64(-1.0e100),
		ValueKind::Point3 => PropertyValue::Point3([1.0, -2.5, 3.25]),
		ValueKind::Point2 => PropertyValue::Point2([0.5, 8.0]),
		ValueKind::Color => PropertyValue::Color(Color::rgb(10, 20, 30)),
		ValueKind::ColorA => PropertyValue::ColorA(Color::argb(40, 10, 20, 30)),
		ValueKind::String => PropertyValue::String("Hello".into()),
		ValueKind::EntityRef => PropertyValue::EntityRef("SpawnPoint".into()),
		ValueKind::AssetId => PropertyValue::AssetId("urn:llid:abc".into()),
		ValueKind::AssocString => PropertyValue::AssocString(assoc(&[("a", "x".to_string())])),
		ValueKind::AssocEntityRef => {
			PropertyValue::AssocEntityRef(assoc(&[("slot", "Hero".to_string())]))
		}
		ValueKind::AssocAttachedNifAsset => PropertyValue::AssocAttachedNifAsset(assoc(&[
			("head", "hat.nif".to_string()),
			("hand", "sword.nif".to_string()),
		])),
		ValueKind::AssocPoint3 => PropertyValue::AssocPoint3(assoc(&[("p", [1.0, 2.0, 3.0])])),
		ValueKind::AssocUInt32 => PropertyValue::AssocUInt32(assoc(&[("n", 7u32)])),
		ValueKind::AssocSInt32 => PropertyValue::AssocSInt32(assoc(&[("n", -7i32), ("m", 0)])),
	}
}

#[test]
fn every_kind_roundtrips() {
	for &kind in ValueKind::ALL {
		let value = sample(kind);
		assert_eq!(value.kind(), kind);
		assert_eq!(roundtrip(&value), value, "kind {kind}");
	}
}

#[test]
fn every_tag_parses_back_to_its_kind() {
	assert_eq!(ValueKind::ALL.len(), 19);
	for &kind in ValueKind::ALL {
		assert_eq!(kind.as_str().parse::<ValueKind>().expect("tag"), kind);
	}
	assert_eq!(ValueKind::AssetId.as_str(), "AssetID");
}

#[test]
fn color_drops_alpha_on_the_wire() {
	let value = PropertyValue::Color(Color::argb(7, 1, 2, 3));
	let mut w = CacheWriter::headerless();
	value.encode(&mut w);
	let bytes = w.finish().expect("finish");
	assert_eq!(&bytes[..], &[1, 2, 3]);
	assert_eq!(
		roundtrip(&value),
		PropertyValue::Color(Color::argb(255, 1, 2, 3))
	);
}

#[test]
fn color_a_is_argb_order() {
	let mut w = CacheWriter::headerless();
	PropertyValue::ColorA(Color::argb(4, 1, 2, 3)).encode(&mut w);
	assert_eq!(&w.finish().expect("finish")[..], &[4, 1, 2, 3]);
}

#[test]
fn shared_wire_forms_keep_distinct_tags() {
	let mut w = CacheWriter::headerless();
	PropertyValue::EntityRef("x".into()).encode(&mut w);
	let bytes = w.finish().expect("finish");
	let mut r = CacheReader::headerless(&bytes);
	assert_eq!(
		decode_tagged("AssetID", &mut r).expect("decode"),
		PropertyValue::AssetId("x".into())
	);
}

#[test]
fn unknown_tag_fails_on_encode_and_decode() {
	let mut w = CacheWriter::headerless();
	let err = encode_tagged("Quaternion", &PropertyValue::UInt32(1), &mut w).expect_err("encode");
	assert!(matches!(err, ValueError::UnsupportedType(ref t) if t == "Quaternion"));
	assert!(w.is_empty());

	let mut r = CacheReader::headerless(&[0, 0, 0, 0]);
	let err = decode_tagged("boolean", &mut r).expect_err("decode is case-sensitive");
	assert!(matches!(err, ValueError::UnsupportedType(_)));
}

#[test]
fn encode_rejects_mismatched_tag() {
	let mut w = CacheWriter::headerless();
	let err = encode_tagged("UInt16", &PropertyValue::UInt32(1), &mut w).expect_err("mismatch");
	assert!(matches!(
		err,
		ValueError::KindMismatch {
			expected: ValueKind::UInt16,
			found: ValueKind::UInt32
		}
	));
}

#[test]
fn truncated_value_is_a_cache_error() {
	let mut r = CacheReader::headerless(&[1, 0]);
	let err = PropertyValue::decode(ValueKind::UInt32, &mut r).expect_err("short");
	assert!(matches!(err, ValueError::Cache(CacheError::Truncated { .. })));
}

#[test]
fn scalar_literals() {
	let cases = [
		(ValueKind::Boolean, "TRUE", PropertyValue::Boolean(true)),
		(ValueKind::Boolean, "0", PropertyValue::Boolean(false)),
		(ValueKind::UInt16, "0x10", PropertyValue::UInt16(16)),
		(ValueKind::UInt32, " 4000000000 ", PropertyValue::UInt32(4_000_000_000)),
		(ValueKind::SInt32, "-12", PropertyValue::SInt32(-12)),
		(ValueKind::Float32, "1.5", PropertyValue::Float32(1.5)),
		(ValueKind::Float64, "2e3", PropertyValue::Float64(2000.0)),
		(ValueKind::Point3, "1, 2 ,3", PropertyValue::Point3([1.0, 2.0, 3.0])),
		(ValueKind::Point2, "4 5", PropertyValue::Point2([4.0, 5.0])),
		(ValueKind::Color, "255,0,128", PropertyValue::Color(Color::rgb(255, 0, 128))),
		(ValueKind::Color, "#FF0080", PropertyValue::Color(Color::rgb(255, 0, 128))),
		(ValueKind::ColorA, "#80FF0000", PropertyValue::ColorA(Color::argb(128, 255, 0, 0))),
		(ValueKind::String, " padded ", PropertyValue::String(" padded ".into())),
	];
	for (kind, text, expected) in cases {
		assert_eq!(PropertyValue::parse_scalar(kind, text).expect(text), expected);
	}
}

#[test]
fn bad_literals_name_kind_and_text() {
	for (kind, text) in [
		(ValueKind::UInt16, "70000"),
		(ValueKind::Boolean, "maybe"),
		(ValueKind::Point3, "1,2"),
		(ValueKind::Point2, "1,2,3"),
		(ValueKind::Color, "#12345"),
		(ValueKind::AssocString, "x"),
	] {
		match PropertyValue::parse_scalar(kind, text) {
			Err(ValueError::Parse { kind: k, text: t }) => {
				assert_eq!(k, kind);
				assert_eq!(t, text);
			}
			other => panic!("{kind} {text:?}: {other:?}"),
		}
	}
}

#[test]
fn assoc_literals_use_element_rules() {
	let value = PropertyValue::parse_assoc(ValueKind::AssocPoint3, [("a", "1,2,3"), ("b", "0 0 1")])
		.expect("parse");
	assert_eq!(
		value,
		PropertyValue::AssocPoint3(assoc(&[("a", [1.0, 2.0, 3.0]), ("b", [0.0, 0.0, 1.0])]))
	);

	let err = PropertyValue::parse_assoc(ValueKind::AssocUInt32, [("a", "-1")]).expect_err("neg");
	assert!(matches!(err, ValueError::Parse { kind: ValueKind::AssocUInt32, .. }));

	let nif = PropertyValue::parse_assoc(ValueKind::AssocAttachedNifAsset, [("x", "a.nif")])
		.expect("parse");
	assert_eq!(nif.kind(), ValueKind::AssocAttachedNifAsset);
}

#[test]
fn assoc_equality_ignores_insertion_order() {
	let a = PropertyValue::AssocUInt32(assoc(&[("x", 1), ("y", 2)]));
	let b = PropertyValue::AssocUInt32(assoc(&[("y", 2), ("x", 1)]));
	assert_eq!(a, b);
}

proptest! {
	#[test]
	fn scalars_roundtrip(u in any::<u32>(), i in any::<i32>(), h in any::<u16>(), s in ".*") {
		for value in [
			PropertyValue::UInt32(u),
			PropertyValue::SInt32(i),
			PropertyValue::UInt16(h),
			PropertyValue::String(s.clone()),
		] {
			prop_assert_eq!(roundtrip(&value), value);
		}
	}

	#[test]
	fn finite_floats_roundtrip(x in -1.0e30f32..1.0e30, y in -1.0e30f32..1.0e30, d in any::<f64>().prop_filter("finite", |d| d.is_finite())) {
		let point = PropertyValue::Point3([x, y, x - y]);
		prop_assert_eq!(roundtrip(&point), point);
		let wide = PropertyValue::Float64(d);
		prop_assert_eq!(roundtrip(&wide), wide);
	}

	#[test]
	fn colors_roundtrip_with_opaque_alpha(a in any::<u8>(), r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
		prop_assert_eq!(
			roundtrip(&PropertyValue::Color(Color::argb(a, r, g, b))),
			PropertyValue::Color(Color::rgb(r, g, b))
		);
		let argb = PropertyValue::ColorA(Color::argb(a, r, g, b));
		prop_assert_eq!(roundtrip(&argb), argb);
	}

	#[test]
	fn string_maps_roundtrip(map in proptest::collection::vec(("[a-z]{1,8}", ".{0,12}"), 0..8)) {
		let map: AssocMap<String> = map.into_iter().collect();
		let value = PropertyValue::AssocEntityRef(map);
		prop_assert_eq!(roundtrip(&value), value);
	}
}
