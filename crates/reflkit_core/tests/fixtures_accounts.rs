#![allow(missing_docs)]

use std::collections::HashMap;

use reflkit::rfl::{
	FieldOptions, RflError, Type, TypeCatalog, Value, map_set, parse_tags_of, seq_append, seq_len, struct_field_names, struct_get_field, struct_set_field, struct_to_map,
	value_as,
};
use reflkit_testkit::read_fixture;

fn catalog() -> TypeCatalog {
	TypeCatalog::from_json(&read_fixture("schemas/accounts.json")).expect("accounts schema loads")
}

fn account(catalog: &TypeCatalog) -> Value {
	let ty = catalog.resolve("Account").expect("account type");
	let audit_ty = catalog.resolve("Audit").expect("audit type");
	let user_id = catalog.resolve("UserId").expect("user id type");

	let audit = Value::record(&audit_ty, [("CreatedBy", Value::of("ops".to_owned())), ("Revision", Value::of(3_u32))]).expect("audit value");
	let mut handle = Value::ptr(Value::zero(&ty));
	let opt = FieldOptions::exact();

	struct_set_field(&mut handle, "ID", Value::of(42_u64).convert(&user_id).expect("user id"), &opt).expect("set id");
	struct_set_field(&mut handle, "Name", "alice".to_owned(), &opt).expect("set name");
	struct_set_field(&mut handle, "Audit", Value::ptr(audit), &opt).expect("set audit");
	struct_set_field(&mut handle, "Revision", 9_i64, &opt).expect("set revision");
	struct_set_field(&mut handle, "password", "hunter2".to_owned(), &opt.with_private_access()).expect("set password");
	handle
}

#[test]
fn schema_types_reject_underlying_values() {
	let catalog = catalog();
	let mut handle = account(&catalog);

	let err = struct_set_field(&mut handle, "ID", 7_u64, &FieldOptions::exact()).expect_err("u64 is not UserId");
	assert!(matches!(err, RflError::TypeUnmatched { context: "field", .. }));
	assert_eq!(value_as::<u64>(&struct_get_field::<Value>(&handle, "ID", &FieldOptions::exact()).expect("id")).expect("converts"), 42);

	let err = struct_get_field::<String>(&handle, "password", &FieldOptions::exact()).expect_err("no capability");
	assert!(matches!(err, RflError::PrivilegeDenied { .. }));
}

#[test]
fn tagged_projection_of_schema_record() {
	let catalog = catalog();
	let handle = account(&catalog);

	let m = struct_to_map(&handle, "json", true).expect("projection");
	let mut keys = m.keys().map(String::as_str).collect::<Vec<_>>();
	keys.sort_unstable();
	assert_eq!(keys, ["created_by", "id", "name", "rev"]);
	assert_eq!(m["name"], Value::of("alice".to_owned()));
	assert_eq!(value_as::<u32>(&m["rev"]).expect("rev"), 3);
}

#[test]
fn omitempty_tracks_current_values() {
	let catalog = catalog();
	let mut handle = account(&catalog);

	let mut labels = struct_get_field::<Value>(&handle, "Labels", &FieldOptions::exact()).expect("labels");
	map_set(&mut labels, "tier".to_owned(), Value::of("gold".to_owned())).expect("label");
	struct_set_field(&mut handle, "Labels", labels, &FieldOptions::exact()).expect("store labels");

	let m = struct_to_map(&handle, "json", true).expect("projection");
	assert!(m.contains_key("labels"));
	assert_eq!(
		serde_json::to_value(&m["labels"]).expect("labels serialize"),
		serde_json::json!({ "tier": "gold" })
	);
}

#[test]
fn field_listing_and_tags_follow_declaration_order() {
	let catalog = catalog();
	let handle = account(&catalog);

	assert_eq!(struct_field_names(&handle, false).expect("direct"), ["ID", "Name", "Labels", "Audit", "Revision"]);
	assert_eq!(struct_field_names(&handle, true).expect("flattened"), ["ID", "Name", "Labels", "CreatedBy", "Revision"]);

	let tags = parse_tags_of(&handle, "json", ",").expect("tags");
	let names = tags.iter().map(|tag| tag.name.as_str()).collect::<Vec<_>>();
	assert_eq!(names, ["id", "name", "labels", "-"]);
	assert!(tags[2].has_attr("omitempty"));
	assert!(tags[3].ignored);
}

#[test]
fn json_view_hides_invisible_fields() {
	let catalog = catalog();
	let handle = account(&catalog);

	let json = serde_json::to_value(&handle).expect("account serializes");
	assert_eq!(json["Name"], "alice");
	assert_eq!(json["Audit"]["Revision"], 3);
	assert!(json.get("password").is_none());
}

#[test]
fn accounts_alias_grows_by_append() {
	let catalog = catalog();
	let accounts_ty = catalog.resolve("Accounts").expect("accounts type");
	let account_ty = catalog.resolve("Account").expect("account type");

	let list = Value::zero(&accounts_ty);
	let list = seq_append(&list, Value::zero(&account_ty)).expect("append zero account");
	assert_eq!(seq_len(&list).expect("len"), 1);
	assert_eq!(list.ty(), &accounts_ty);

	let err = seq_append(&list, Value::zero(&Type::i64())).expect_err("wrong element");
	assert!(matches!(err, RflError::TypeUnmatched { .. }));

	let labels: HashMap<String, Value> = HashMap::new();
	let err = seq_append(&list, labels).expect_err("map is not an account");
	assert!(matches!(err, RflError::TypeUnmatched { .. }));
}
