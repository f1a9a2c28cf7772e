use std::collections::BTreeMap;

use serde::Deserialize;

use crate::rfl::catalog::TypeCatalog;
use crate::rfl::{FieldDef, Result, Type};

/// Top-level schema document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDoc {
	types: Vec<TypeDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum TypeDecl {
	Record { name: String, fields: Vec<FieldDecl> },
	Alias { name: String, of: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDecl {
	name: String,
	#[serde(rename = "type")]
	ty: String,
	#[serde(default)]
	private: bool,
	#[serde(default)]
	embedded: bool,
	#[serde(default)]
	tags: BTreeMap<String, String>,
}

pub(super) fn load(catalog: &mut TypeCatalog, text: &str) -> Result<()> {
	let doc: SchemaDoc = serde_json::from_str(text)?;
	tracing::debug!(types = doc.types.len(), "loading type schema");

	for decl in doc.types {
		let ty = match decl {
			TypeDecl::Record { name, fields } => {
				let mut builder = Type::record(name);
				for field in fields {
					builder = builder.field(field_def(catalog, field)?);
				}
				builder.build()?
			}
			TypeDecl::Alias { name, of } => Type::named(name, &catalog.parse_type(&of)?),
		};
		catalog.register(ty)?;
	}
	Ok(())
}

fn field_def(catalog: &TypeCatalog, decl: FieldDecl) -> Result<FieldDef> {
	let mut field = FieldDef::new(decl.name, catalog.parse_type(&decl.ty)?);
	field.visible = !decl.private;
	field.embedded = decl.embedded;
	for (key, raw) in decl.tags {
		field = field.tag(key, raw);
	}
	Ok(field)
}
