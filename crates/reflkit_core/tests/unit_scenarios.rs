#![allow(missing_docs)]

use std::collections::HashMap;

use reflkit::rfl::{
	FieldDef, FieldOptions, RflError, Type, Value, map_get, parse_tag, seq_append, seq_as, seq_get, struct_field_names, struct_get_field, struct_to_map,
};

#[test]
fn map_lookup_of_present_and_absent_keys() {
	let m = Value::of(HashMap::from([(1_i64, 1_u64), (2, 2), (3, 3)]));
	assert_eq!(map_get::<u64, _>(&m, 2_i64).expect("key 2"), 2);

	let err = map_get::<u64, _>(&m, 4_i64).expect_err("key 4");
	assert!(matches!(err, RflError::NotFound { .. }));
}

#[test]
fn sequence_bounds_and_append() {
	let s = Value::of(vec![1_i64, 2, 3]);
	let err = seq_get::<i64>(&s, 3).expect_err("index 3");
	assert!(matches!(err, RflError::IndexOutOfRange { index: 3, len: 3 }));

	let grown = seq_append(&s, 4_i64).expect("append");
	assert_eq!(seq_as::<i64>(&grown).expect("as"), vec![1, 2, 3, 4]);
}

#[test]
fn private_field_needs_addressable_record() {
	let ty = Type::record("SS")
		.field(FieldDef::new("I", Type::i64()))
		.field(FieldDef::new("u", Type::u64()).private())
		.build()
		.expect("record builds");
	let record = Value::record(&ty, [("I", Value::of(1_i64)), ("u", Value::of(7_u64))]).expect("record value");
	let opt = FieldOptions::exact().with_private_access();

	let handle = Value::ptr(record.clone());
	assert_eq!(struct_get_field::<u64>(&handle, "u", &opt).expect("addressable"), 7);

	let err = struct_get_field::<u64>(&record, "u", &opt).expect_err("copy");
	assert!(matches!(err, RflError::ValueUnaddressable { .. }));
}

#[test]
fn outer_field_shadows_embedded_field() {
	let inner = Type::record("Inner")
		.field(FieldDef::new("Name", Type::string()))
		.field(FieldDef::new("Depth", Type::i64()))
		.build()
		.expect("inner builds");
	let outer = Type::record("Outer")
		.field(FieldDef::embedded(inner.clone()))
		.field(FieldDef::new("Name", Type::string()))
		.build()
		.expect("outer builds");

	let inner_value = Value::record(&inner, [("Name", Value::of("inner".to_owned())), ("Depth", Value::of(2_i64))]).expect("inner value");
	let outer_value = Value::record(&outer, [("Inner", inner_value), ("Name", Value::of("outer".to_owned()))]).expect("outer value");

	let m = struct_to_map(&Value::ptr(outer_value.clone()), "", true).expect("flattened map");
	assert_eq!(m.len(), 2);
	assert_eq!(m["Name"], Value::of("outer".to_owned()));
	assert_eq!(m["Depth"], Value::of(2_i64));

	let names = struct_field_names(&outer_value, true).expect("flattened names");
	assert_eq!(names, ["Depth", "Name"]);
}

#[test]
fn tag_with_presence_and_valued_attributes() {
	let field = FieldDef::new("S", Type::string()).tag("json", "s,optional,k1=v1,omitempty");
	let tag = parse_tag(&field, "json", ",").expect("tag parses");

	assert_eq!(tag.name, "s");
	assert!(!tag.ignored);
	let expected = HashMap::from([
		("optional".to_owned(), String::new()),
		("k1".to_owned(), "v1".to_owned()),
		("omitempty".to_owned(), String::new()),
	]);
	assert_eq!(tag.attrs, expected);
}
