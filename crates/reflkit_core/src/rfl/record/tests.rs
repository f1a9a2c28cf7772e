use crate::rfl::{FieldDef, FieldOptions, RflError, Type, Value, struct_field_names, struct_get_field, struct_set_field};

fn ss() -> Type {
	Type::record("SS")
		.field(FieldDef::new("I", Type::i64()))
		.field(FieldDef::new("u", Type::u64()).private())
		.field(FieldDef::new("S", Type::string()))
		.field(FieldDef::new("A", Type::dynamic()))
		.build()
		.expect("SS builds")
}

fn sample() -> Value {
	Value::record(&ss(), [("I", Value::of(1_i64)), ("u", Value::of(2_u64)), ("S", Value::of("s".to_owned()))]).expect("sample builds")
}

fn private() -> FieldOptions {
	FieldOptions::exact().with_private_access()
}

#[test]
fn default_options_are_exact_without_private_access() {
	let opt = FieldOptions::default();
	assert!(opt.case_sensitive);
	assert!(!opt.private_access);
	assert_eq!(FieldOptions::folded().with_private_access(), FieldOptions {
		case_sensitive: false,
		private_access: true,
	});
}

#[test]
fn get_visible_field_from_copy_and_pointer() {
	assert_eq!(struct_get_field::<i64>(&sample(), "I", &FieldOptions::exact()).expect("copy"), 1);
	assert_eq!(struct_get_field::<String>(&Value::ptr(sample()), "S", &FieldOptions::exact()).expect("pointer"), "s");
	assert_eq!(struct_get_field::<i64>(&Value::dynamic(sample()), "I", &FieldOptions::exact()).expect("wrapped"), 1);
}

#[test]
fn get_invisible_field_requires_address() {
	let handle = Value::ptr(sample());
	assert_eq!(struct_get_field::<u64>(&handle, "u", &private()).expect("addressable"), 2);

	let err = struct_get_field::<u64>(&sample(), "u", &private()).expect_err("copy");
	assert!(matches!(err, RflError::ValueUnaddressable { .. }));

	let err = struct_get_field::<u64>(&Value::ptr(Value::dynamic(sample())), "u", &private()).expect_err("unwrapped copy");
	assert!(matches!(err, RflError::ValueUnaddressable { .. }));
}

#[test]
fn get_invisible_field_without_capability_is_denied() {
	let err = struct_get_field::<u64>(&Value::ptr(sample()), "u", &FieldOptions::exact()).expect_err("no capability");
	assert!(matches!(err, RflError::PrivilegeDenied { ref field } if field == "u"));
}

#[test]
fn get_folded_lookup() {
	assert_eq!(struct_get_field::<i64>(&sample(), "i", &FieldOptions::folded()).expect("folded"), 1);

	let err = struct_get_field::<i64>(&sample(), "i", &FieldOptions::exact()).expect_err("exact");
	assert!(matches!(err, RflError::NotFound { what: "field", .. }));
}

#[test]
fn ambiguous_folded_lookup_is_not_found() {
	let ty = Type::record("Twins")
		.field(FieldDef::new("Name", Type::string()))
		.field(FieldDef::new("NAME", Type::string()))
		.build()
		.expect("record builds");
	let value = Value::zero(&ty);

	let ambiguous = struct_get_field::<String>(&value, "name", &FieldOptions::folded()).expect_err("two matches");
	let absent = struct_get_field::<String>(&value, "nick", &FieldOptions::folded()).expect_err("no match");
	assert!(matches!(ambiguous, RflError::NotFound { .. }));
	assert!(matches!(absent, RflError::NotFound { .. }));

	assert_eq!(struct_get_field::<String>(&value, "NAME", &FieldOptions::exact()).expect("exact still works"), "");
}

#[test]
fn get_failures() {
	let err = struct_get_field::<i64>(&Value::of(1_i64), "I", &FieldOptions::exact()).expect_err("not a record");
	assert!(matches!(err, RflError::TypeInvalid { expected: "record", .. }));

	let err = struct_get_field::<i64>(&Value::null_ptr(&ss()), "I", &FieldOptions::exact()).expect_err("nil pointer");
	assert!(matches!(err, RflError::TypeInvalid { .. }));

	let err = struct_get_field::<u64>(&sample(), "I", &FieldOptions::exact()).expect_err("wrong type");
	assert!(matches!(err, RflError::TypeUnmatched { context: "field", .. }));
}

#[test]
fn get_dynamic_field() {
	let err = struct_get_field::<Value>(&sample(), "A", &FieldOptions::exact()).expect_err("nil any");
	assert!(matches!(err, RflError::TypeUnmatched { context: "field", .. }));

	let err = struct_get_field::<i64>(&sample(), "A", &FieldOptions::exact()).expect_err("nil into i64");
	assert!(matches!(err, RflError::TypeUnmatched { .. }));
}

#[test]
fn set_through_pointer() {
	let mut handle = Value::ptr(sample());
	struct_set_field(&mut handle, "I", 10_i64, &FieldOptions::exact()).expect("visible");
	struct_set_field(&mut handle, "u", 20_u64, &private()).expect("invisible");
	struct_set_field(&mut handle, "s", "t".to_owned(), &FieldOptions::folded()).expect("folded");
	struct_set_field(&mut handle, "A", 1.5_f64, &FieldOptions::exact()).expect("any slot");

	assert_eq!(struct_get_field::<i64>(&handle, "I", &FieldOptions::exact()).expect("I"), 10);
	assert_eq!(struct_get_field::<u64>(&handle, "u", &private()).expect("u"), 20);
	assert_eq!(struct_get_field::<String>(&handle, "S", &FieldOptions::exact()).expect("S"), "t");
	assert_eq!(struct_get_field::<f64>(&handle, "A", &FieldOptions::exact()).expect("A"), 1.5);

	struct_set_field(&mut handle, "A", Value::nil(), &FieldOptions::exact()).expect("nil into any");
	let err = struct_get_field::<f64>(&handle, "A", &FieldOptions::exact()).expect_err("A was cleared");
	assert!(matches!(err, RflError::TypeUnmatched { context: "field", .. }));
}

#[test]
fn set_on_copy_is_unsettable() {
	let mut copy = sample();
	let err = struct_set_field(&mut copy, "I", 10_i64, &FieldOptions::exact()).expect_err("copy");
	assert!(matches!(err, RflError::ValueUnsettable { ref field } if field == "I"));

	let err = struct_set_field(&mut copy, "u", 10_u64, &private()).expect_err("invisible on copy");
	assert!(matches!(err, RflError::ValueUnaddressable { .. }));
	assert_eq!(copy, sample());
}

#[test]
fn set_failures_in_order() {
	let mut handle = Value::ptr(sample());
	let err = struct_set_field(&mut handle, "X", 1_i64, &FieldOptions::exact()).expect_err("missing");
	assert!(matches!(err, RflError::NotFound { .. }));

	let err = struct_set_field(&mut handle, "u", 1_i64, &FieldOptions::exact()).expect_err("denied before type check");
	assert!(matches!(err, RflError::PrivilegeDenied { .. }));

	let err = struct_set_field(&mut handle, "I", 1_u64, &FieldOptions::exact()).expect_err("type differs");
	assert!(matches!(err, RflError::TypeUnmatched { context: "field", .. }));

	let err = struct_set_field(&mut handle, "I", Value::nil(), &FieldOptions::exact()).expect_err("nil into i64");
	assert!(matches!(err, RflError::TypeUnmatched { .. }));

	let mut not_record = Value::ptr(Value::of(1_i64));
	let err = struct_set_field(&mut not_record, "I", 1_i64, &FieldOptions::exact()).expect_err("not a record");
	assert!(matches!(err, RflError::TypeInvalid { .. }));
}

#[test]
fn field_names_list_visible_fields() {
	assert_eq!(struct_field_names(&sample(), false).expect("names"), ["I", "S", "A"]);
	assert!(matches!(struct_field_names(&Value::of(1_i64), false), Err(RflError::TypeInvalid { .. })));
}

#[test]
fn field_names_flatten_embedded_records() {
	let base = Type::record("Base")
		.field(FieldDef::new("ID", Type::i64()))
		.field(FieldDef::new("Name", Type::string()))
		.field(FieldDef::new("secret", Type::string()).private())
		.build()
		.expect("base builds");
	let user = Type::record("User")
		.field(FieldDef::new("Name", Type::string()))
		.field(FieldDef::embedded(Type::ptr(base)))
		.field(FieldDef::new("Email", Type::string()))
		.build()
		.expect("user builds");
	let value = Value::zero(&user);

	assert_eq!(struct_field_names(&value, false).expect("direct"), ["Name", "Base", "Email"]);
	assert_eq!(struct_field_names(&value, true).expect("flattened"), ["ID", "Name", "Email"]);
}

#[test]
fn later_declaration_moves_name() {
	let base = Type::record("Base").field(FieldDef::new("Tag", Type::string())).field(FieldDef::new("ID", Type::i64())).build().expect("base");
	let outer = Type::record("Outer")
		.field(FieldDef::embedded(base))
		.field(FieldDef::new("Tag", Type::string()))
		.build()
		.expect("outer");

	assert_eq!(struct_field_names(&Value::zero(&outer), true).expect("names"), ["ID", "Tag"]);
}
