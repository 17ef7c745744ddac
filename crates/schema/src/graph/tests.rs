use gamedex_source::MemorySource;
use pretty_assertions::assert_eq;

use super::*;
use crate::value::{PropertyValue, ValueError, ValueKind};

fn source(defs: &[(&str, &str)]) -> MemorySource {
	defs.iter()
		.fold(MemorySource::new(), |src, (name, xml)| src.with(*name, *xml))
}

fn names<'a>(nodes: impl IntoIterator<Item = &'a TypeNode>) -> Vec<&'a str> {
	let mut out: Vec<&str> = nodes.into_iter().map(TypeNode::name).collect();
	out.sort();
	out
}

fn entity_source() -> MemorySource {
	source(&[
		("Types/BaseEntity.xml", r##"<class name="BaseEntity" id="1">
			<trait name="Root"/>
			<property name="health" type="UInt32" id="p1"><set value="100"/></property>
			<property name="tint" type="Color" id="p2"><set value="#102030"/></property>
		</class>"##),
		("Types/Spawn/SpawnPoint.xml", r#"<class name="SpawnPoint" id="2">
			<mixin name="baseentity"/>
			<property name="radius" type="Float32" id="p3" source="spawn.xml">
				<set value="2.5"/>
				<trait name="Editable"/>
				<trait>Visible</trait>
			</property>
			<property name="loot" type="AssocUInt32" id="p4">
				<set index="gold" value="10"/>
				<set index="gems" value="0x2"/>
			</property>
			<behavior name="OnSpawn" type="Script" id="b1"><trait name="Server"/></behavior>
		</class>"#),
	])
}

#[test]
fn sub_types_are_direct_children_only() {
	let graph = TypeGraph::build(&entity_source(), &SchemaOptions::default()).expect("build");
	assert_eq!(graph.len(), 2);

	let subs = graph.sub_types("BaseEntity");
	assert_eq!(names(subs), vec!["SpawnPoint"]);
	assert!(graph.sub_types("SpawnPoint").is_empty());
	assert!(graph.sub_types("Nope").is_empty());
}

#[test]
fn lookup_is_case_insensitive_and_soft() {
	let graph = TypeGraph::build(&entity_source(), &SchemaOptions::default()).expect("build");
	let node = graph.get_type("SPAWNPOINT").expect("spawn point");
	assert_eq!(node.name(), "SpawnPoint");
	assert_eq!(node.id(), 2);
	assert_eq!(node.path(), "Types/Spawn/SpawnPoint.xml");
	assert!(graph.get_type("missing").is_none());
}

#[test]
fn mixin_references_resolve_to_nodes() {
	let graph = TypeGraph::build(&entity_source(), &SchemaOptions::default()).expect("build");
	let base = graph.get_type("BaseEntity").expect("base");
	let spawn = graph.get_type("SpawnPoint").expect("spawn");
	let mixins: Vec<&TypeNode> = graph.mixins(spawn).collect();
	assert_eq!(mixins, vec![base]);
	assert!(base.has_trait("Root"));
}

#[test]
fn properties_and_behaviors_are_parsed() {
	let graph = TypeGraph::build(&entity_source(), &SchemaOptions::default()).expect("build");
	let spawn = graph.get_type("SpawnPoint").expect("spawn");

	let radius = spawn.property("radius").expect("radius");
	assert_eq!(radius.id, "p3");
	assert_eq!(radius.source.as_deref(), Some("spawn.xml"));
	assert_eq!(radius.traits, vec!["Editable", "Visible"]);
	assert_eq!(radius.value, PropertyValue::Float32(2.5));

	let loot = spawn.property("loot").expect("loot");
	assert_eq!(loot.kind(), ValueKind::AssocUInt32);
	match &loot.value {
		PropertyValue::AssocUInt32(map) => {
			assert_eq!(map.get("gold"), Some(&10));
			assert_eq!(map.get("gems"), Some(&2));
		}
		other => panic!("unexpected value {other:?}"),
	}

	let behavior = spawn.behavior("OnSpawn").expect("behavior");
	assert_eq!(behavior.kind, "Script");
	assert_eq!(behavior.source, None);
	assert_eq!(behavior.traits, vec!["Server"]);
}

/// A node from a larger graph indexes past the end of a smaller one.
#[test]
fn mixins_of_foreign_node_do_not_panic() {
	let small = TypeGraph::build(
		&source(&[("A.xml", r#"<class name="A" id="1"/>"#)]),
		&SchemaOptions::default(),
	)
	.expect("build small");
	let large = TypeGraph::build(
		&source(&[
			("1/A.xml", r#"<class name="A" id="1"/>"#),
			("2/B.xml", r#"<class name="B" id="2"/>"#),
			("3/C.xml", r#"<class name="C" id="3"><mixin name="B"/></class>"#),
		]),
		&SchemaOptions::default(),
	)
	.expect("build large");
	let foreign = large.get_type("C").expect("c");
	assert_eq!(small.mixins(foreign).count(), 0);
	assert_eq!(large.mixins(foreign).map(TypeNode::name).collect::<Vec<_>>(), vec!["B"]);
}

#[test]
fn mixins_may_be_declared_later_in_source_order() {
	let src = source(&[
		("a/Child.xml", r#"<class name="Child" id="3"><mixin name="Zed"/><mixin name="Alpha"/></class>"#),
		("b/Alpha.xml", r#"<class name="Alpha" id="1"/>"#),
		("c/Zed.xml", r#"<class name="Zed" id="2"/>"#),
	]);
	let graph = TypeGraph::build(&src, &SchemaOptions::default()).expect("build");
	let child = graph.get_type("Child").expect("child");
	let mixins: Vec<&str> = graph.mixins(child).map(TypeNode::name).collect();
	assert_eq!(mixins, vec!["Zed", "Alpha"]);
	assert_eq!(names(graph.sub_types("Zed")), vec!["Child"]);
	assert_eq!(names(graph.sub_types("Alpha")), vec!["Child"]);
}

#[test]
fn unknown_mixin_is_fatal() {
	let src = source(&[("T.xml", r#"<class name="T" id="1"><mixin name="Ghost"/></class>"#)]);
	match TypeGraph::build(&src, &SchemaOptions::default()) {
		Err(SchemaError::DanglingMixinReference { type_name, mixin }) => {
			assert_eq!(type_name, "T");
			assert_eq!(mixin, "Ghost");
		}
		other => panic!("expected dangling mixin, got {other:?}"),
	}
}

#[test]
fn incomplete_definitions_are_skipped() {
	let src = source(&[
		("NoName.xml", r#"<class id="1"/>"#),
		("EmptyName.xml", r#"<class name="" id="1"/>"#),
		("BadId.xml", r#"<class name="BadId" id="-4"/>"#),
		("NoId.xml", r#"<class name="NoId"/>"#),
		("Broken.xml", r#"<class name="Broken""#),
		("Good.xml", r#"<class name="Good" id="7"/>"#),
		("notes.txt", "not xml"),
	]);
	let graph = TypeGraph::build(&src, &SchemaOptions::default()).expect("build");
	assert_eq!(names(graph.all_types()), vec!["Good"]);
}

#[test]
fn duplicate_names_keep_the_first_definition() {
	let src = source(&[
		("a/Thing.xml", r#"<class name="Thing" id="1"/>"#),
		("b/thing.xml", r#"<class name="thing" id="2"/>"#),
	]);
	let graph = TypeGraph::build(&src, &SchemaOptions::default()).expect("build");
	assert_eq!(graph.len(), 1);
	assert_eq!(graph.get_type("THING").expect("thing").id(), 1);
}

#[test]
fn root_prefix_limits_the_scan() {
	let src = source(&[
		("Types/A.xml", r#"<class name="A" id="1"/>"#),
		("Other/B.xml", r#"<class name="B" id="2"/>"#),
	]);
	let options = SchemaOptions {
		root: "Types/".into(),
		..SchemaOptions::default()
	};
	let graph = TypeGraph::build(&src, &options).expect("build");
	assert_eq!(names(graph.all_types()), vec!["A"]);
}

#[test]
fn unknown_property_type_is_fatal() {
	let src = source(&[(
		"T.xml",
		r#"<class name="T" id="1"><property name="q" type="Quaternion" id="x"/></class>"#,
	)]);
	let err = TypeGraph::build(&src, &SchemaOptions::default()).expect_err("unknown kind");
	assert!(matches!(err, SchemaError::Value(ValueError::UnsupportedType(ref t)) if t == "Quaternion"));
}

#[test]
fn bad_literal_names_type_and_property() {
	let src = source(&[(
		"T.xml",
		r#"<class name="T" id="1"><property name="n" type="UInt16" id="x"><set value="big"/></property></class>"#,
	)]);
	match TypeGraph::build(&src, &SchemaOptions::default()) {
		Err(SchemaError::ValueParse {
			type_name,
			property,
			..
		}) => {
			assert_eq!(type_name, "T");
			assert_eq!(property, "n");
		}
		other => panic!("expected value parse error, got {other:?}"),
	}
}

#[test]
fn missing_set_uses_kind_default() {
	let src = source(&[(
		"T.xml",
		r#"<class name="T" id="1"><property name="flag" type="Boolean" id="x"/></class>"#,
	)]);
	let graph = TypeGraph::build(&src, &SchemaOptions::default()).expect("build");
	let flag = graph.find_property("t", "flag").expect("flag");
	assert_eq!(flag.value, PropertyValue::Boolean(false));
}

#[test]
fn minimize_drops_properties_equal_to_inherited() {
	let src = source(&[
		("1/Base.xml", r#"<class name="Base" id="1">
			<property name="hp" type="UInt32" id="a"><set value="10"/></property>
			<property name="speed" type="Float32" id="b"><set value="1.0"/></property>
		</class>"#),
		("2/Derived.xml", r#"<class name="Derived" id="2"><mixin name="Base"/>
			<property name="hp" type="UInt32" id="a"><set value="10"/></property>
			<property name="speed" type="Float32" id="b"><set value="2.0"/></property>
		</class>"#),
	]);

	let full = TypeGraph::build(&src, &SchemaOptions::default()).expect("build");
	assert_eq!(full.get_type("Derived").expect("derived").properties().len(), 2);

	let options = SchemaOptions {
		minimize: true,
		..SchemaOptions::default()
	};
	let min = TypeGraph::build(&src, &options).expect("build");
	let derived = min.get_type("Derived").expect("derived");
	assert!(derived.property("hp").is_none());
	assert_eq!(
		derived.property("speed").map(|p| &p.value),
		Some(&PropertyValue::Float32(2.0))
	);
	// Still reachable through the mixin.
	assert_eq!(
		min.find_property("Derived", "hp").map(|p| &p.value),
		Some(&PropertyValue::UInt32(10))
	);
}

/// Whether the mixin's file sorts first or last, the result is the same.
#[test]
fn minimize_is_independent_of_definition_order() {
	let base = r#"<class name="Base" id="1">
		<property name="hp" type="UInt32" id="a"><set value="10"/></property>
	</class>"#;
	let derived = r#"<class name="Derived" id="2"><mixin name="Base"/>
		<property name="hp" type="UInt32" id="a"><set value="10"/></property>
		<property name="armor" type="UInt32" id="c"><set value="3"/></property>
	</class>"#;
	let options = SchemaOptions {
		minimize: true,
		..SchemaOptions::default()
	};

	for (base_path, derived_path) in [("1/Base.xml", "2/Derived.xml"), ("2/Base.xml", "1/Derived.xml")] {
		let src = source(&[(base_path, base), (derived_path, derived)]);
		let graph = TypeGraph::build(&src, &options).expect("build");
		let derived = graph.get_type("Derived").expect("derived");
		let kept: Vec<&str> = derived.properties().keys().map(String::as_str).collect();
		assert_eq!(kept, vec!["armor"], "{base_path} / {derived_path}");
		assert!(graph.get_type("Base").expect("base").property("hp").is_some());
	}
}

#[test]
fn ancestors_and_is_a_follow_every_parent() {
	let src = source(&[
		("Root.xml", r#"<class name="Root" id="1"/>"#),
		("Left.xml", r#"<class name="Left" id="2"><mixin name="Root"/></class>"#),
		("Right.xml", r#"<class name="Right" id="3"><mixin name="Root"/></class>"#),
		("Diamond.xml", r#"<class name="Diamond" id="4"><mixin name="Left"/><mixin name="Right"/></class>"#),
	]);
	let graph = TypeGraph::build(&src, &SchemaOptions::default()).expect("build");
	let ancestors: Vec<&str> = graph.ancestors("Diamond").into_iter().map(TypeNode::name).collect();
	assert_eq!(ancestors, vec!["Left", "Right", "Root"]);
	assert!(graph.is_a("Diamond", "root"));
	assert!(graph.is_a("Left", "Left"));
	assert!(!graph.is_a("Left", "Right"));
	assert!(!graph.is_a("Ghost", "Root"));
	assert_eq!(names(graph.sub_types("Root")), vec!["Left", "Right"]);
}

#[test]
fn path_queries_follow_definition_paths() {
	let graph = TypeGraph::build(&entity_source(), &SchemaOptions::default()).expect("build");
	assert_eq!(names(graph.list_path("Types", false).expect("list")), vec!["BaseEntity"]);
	assert_eq!(
		names(graph.list_path("Types", true).expect("list")),
		vec!["BaseEntity", "SpawnPoint"]
	);
	assert_eq!(graph.list_directories("Types").expect("dirs"), vec!["Spawn"]);
	assert!(matches!(
		graph.list_path("Nowhere", true),
		Err(PathTreeError::NotFound(_))
	));
}

#[test]
fn cache_roundtrip_preserves_structure() {
	let graph = TypeGraph::build(&entity_source(), &SchemaOptions::default()).expect("build");
	let bytes = graph.to_cache_bytes().expect("encode");
	assert_eq!(&bytes[..4], b"FTI\0");
	assert_eq!(&bytes[4..8], &1u32.to_le_bytes());

	let decoded = TypeGraph::from_cache_bytes(&bytes).expect("decode");
	assert_eq!(decoded.len(), graph.len());
	for node in graph.all_types() {
		let other = decoded.get_type(node.name()).expect("type survives");
		assert_eq!(other.id(), node.id());
		assert_eq!(other.path(), node.path());
		assert_eq!(other.traits(), node.traits());
		assert_eq!(other.mixin_indices().len(), node.mixin_indices().len());
		assert_eq!(other.properties(), node.properties());
		assert_eq!(other.behaviors(), node.behaviors());
	}
	let base = decoded.get_type("BaseEntity").expect("base");
	assert_eq!(names(decoded.sub_types("BaseEntity")), vec!["SpawnPoint"]);
	let spawn = decoded.get_type("SpawnPoint").expect("spawn");
	assert_eq!(decoded.mixins(spawn).collect::<Vec<_>>(), vec![base]);
	assert_eq!(
		names(decoded.list_path("Types", true).expect("paths rebuilt")),
		vec!["BaseEntity", "SpawnPoint"]
	);
}

#[test]
fn empty_graph_roundtrips() {
	let bytes = TypeGraph::default().to_cache_bytes().expect("encode");
	let decoded = TypeGraph::from_cache_bytes(&bytes).expect("decode");
	assert_eq!(decoded.all_types().count(), 0);
	assert!(decoded.is_empty());
}
