use std::collections::BTreeMap;

use crate::rfl::{Kind, Result, RflError, Type};

mod parse;
mod schema;

/// Registry of named types, usually populated once at startup.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
	types: BTreeMap<String, Type>,
}

impl TypeCatalog {
	/// Empty catalog; basic types resolve without registration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a named type.
	pub fn register(&mut self, ty: Type) -> Result<()> {
		let Some(name) = ty.name() else {
			return Err(RflError::TypeInvalid {
				expected: "named type",
				got: ty.to_string(),
			});
		};
		if basic_type(name).is_some() || self.types.contains_key(name) {
			return Err(RflError::DuplicateType { name: name.to_owned() });
		}

		tracing::debug!(name, kind = ty.kind().as_str(), "registered type");
		self.types.insert(name.to_owned(), ty);
		Ok(())
	}

	/// Look up a registered or basic type by name.
	pub fn get(&self, name: &str) -> Option<Type> {
		basic_type(name).or_else(|| self.types.get(name).cloned())
	}

	/// Like [`TypeCatalog::get`], failing with `NotFound` when the name is unknown.
	pub fn resolve(&self, name: &str) -> Result<Type> {
		self.get(name).ok_or_else(|| RflError::NotFound {
			what: "type",
			name: name.to_owned(),
		})
	}

	/// Registered type names in sorted order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.types.keys().map(String::as_str)
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Whether no types are registered.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Parse a type expression such as `HashMap<String, Vec<*User>>`.
	pub fn parse_type(&self, expr: &str) -> Result<Type> {
		parse::parse_type(self, expr)
	}

	/// Build a catalog from a JSON schema document.
	pub fn from_json(text: &str) -> Result<Self> {
		let mut catalog = Self::new();
		catalog.load_json(text)?;
		Ok(catalog)
	}

	/// Register every type declared in a JSON schema document, in order.
	pub fn load_json(&mut self, text: &str) -> Result<()> {
		schema::load(self, text)
	}
}

/// Predeclared type for a basic type name.
fn basic_type(name: &str) -> Option<Type> {
	let kind = match name {
		"bool" => Kind::Bool,
		"isize" => Kind::Isize,
		"i8" => Kind::I8,
		"i16" => Kind::I16,
		"i32" => Kind::I32,
		"i64" => Kind::I64,
		"usize" => Kind::Usize,
		"u8" => Kind::U8,
		"u16" => Kind::U16,
		"u32" => Kind::U32,
		"u64" => Kind::U64,
		"f32" => Kind::F32,
		"f64" => Kind::F64,
		"String" => Kind::String,
		_ => return None,
	};
	Type::scalar(kind)
}
