use std::fmt;
use std::sync::Arc;

use crate::rfl::{Kind, Result, RflError};

/// Shared, cheaply clonable type descriptor.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Type(Arc<TypeDef>);

#[derive(Debug, PartialEq, Eq, Hash)]
struct TypeDef {
	name: Option<Box<str>>,
	repr: TypeRepr,
}

/// Underlying representation of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRepr {
	/// Predeclared scalar; the kind is always scalar.
	Basic(Kind),
	/// Growable sequence of `elem`.
	Seq(Type),
	/// Fixed-size array of `len` elements.
	Array(Type, usize),
	/// Map from key type to value type.
	Map(Type, Type),
	/// Record fields in declaration order.
	Record(Box<[FieldDef]>),
	/// Dynamic-typing wrapper.
	Dynamic,
	/// Nullable pointer to `elem`.
	Ptr(Type),
}

/// One record field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDef {
	/// Declared field name.
	pub name: Box<str>,
	/// Declared field type.
	pub ty: Type,
	/// Whether the field is visible outside its defining module.
	pub visible: bool,
	/// Whether the field embeds another record anonymously.
	pub embedded: bool,
	/// Raw tag strings keyed by tag name.
	pub tags: Vec<(Box<str>, Box<str>)>,
}

impl FieldDef {
	/// Visible, non-embedded field without tags.
	pub fn new(name: impl Into<Box<str>>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
			visible: true,
			embedded: false,
			tags: Vec::new(),
		}
	}

	/// Embedded field named after the embedded type (or its pointee).
	pub fn embedded(ty: Type) -> Self {
		let name = match ty.repr() {
			TypeRepr::Ptr(elem) => elem.to_string(),
			_ => ty.to_string(),
		};
		Self {
			embedded: true,
			..Self::new(name, ty)
		}
	}

	/// Mark the field invisible outside its defining module.
	pub fn private(mut self) -> Self {
		self.visible = false;
		self
	}

	/// Attach a raw tag string under `key`; a later tag with the same key replaces it.
	pub fn tag(mut self, key: impl Into<Box<str>>, raw: impl Into<Box<str>>) -> Self {
		let key = key.into();
		self.tags.retain(|(existing, _)| *existing != key);
		self.tags.push((key, raw.into()));
		self
	}

	/// Look up the raw tag string stored under `key`.
	pub fn lookup_tag(&self, key: &str) -> Option<&str> {
		self.tags.iter().find(|(name, _)| name.as_ref() == key).map(|(_, raw)| raw.as_ref())
	}
}

/// Builder for named record types.
#[derive(Debug)]
pub struct RecordBuilder {
	name: Box<str>,
	fields: Vec<FieldDef>,
}

impl RecordBuilder {
	/// Append a field declaration.
	pub fn field(mut self, field: FieldDef) -> Self {
		self.fields.push(field);
		self
	}

	/// Finish the record, rejecting duplicate field names.
	pub fn build(self) -> Result<Type> {
		for (idx, field) in self.fields.iter().enumerate() {
			if self.fields[..idx].iter().any(|prior| prior.name == field.name) {
				return Err(RflError::DuplicateField {
					record: self.name.to_string(),
					field: field.name.to_string(),
				});
			}
		}
		Ok(Type::new(Some(self.name), TypeRepr::Record(self.fields.into_boxed_slice())))
	}
}

impl Type {
	fn new(name: Option<Box<str>>, repr: TypeRepr) -> Self {
		Self(Arc::new(TypeDef { name, repr }))
	}

	fn basic(kind: Kind) -> Self {
		Self::new(Some(kind_type_name(kind).into()), TypeRepr::Basic(kind))
	}

	/// `bool`.
	pub fn bool() -> Self {
		Self::basic(Kind::Bool)
	}

	/// `isize`.
	pub fn isize() -> Self {
		Self::basic(Kind::Isize)
	}

	/// `i8`.
	pub fn i8() -> Self {
		Self::basic(Kind::I8)
	}

	/// `i16`.
	pub fn i16() -> Self {
		Self::basic(Kind::I16)
	}

	/// `i32`.
	pub fn i32() -> Self {
		Self::basic(Kind::I32)
	}

	/// `i64`.
	pub fn i64() -> Self {
		Self::basic(Kind::I64)
	}

	/// `usize`.
	pub fn usize() -> Self {
		Self::basic(Kind::Usize)
	}

	/// `u8`.
	pub fn u8() -> Self {
		Self::basic(Kind::U8)
	}

	/// `u16`.
	pub fn u16() -> Self {
		Self::basic(Kind::U16)
	}

	/// `u32`.
	pub fn u32() -> Self {
		Self::basic(Kind::U32)
	}

	/// `u64`.
	pub fn u64() -> Self {
		Self::basic(Kind::U64)
	}

	/// `f32`.
	pub fn f32() -> Self {
		Self::basic(Kind::F32)
	}

	/// `f64`.
	pub fn f64() -> Self {
		Self::basic(Kind::F64)
	}

	/// `String`.
	pub fn string() -> Self {
		Self::basic(Kind::String)
	}

	/// Predeclared scalar type for a scalar kind.
	pub fn scalar(kind: Kind) -> Option<Self> {
		kind.is_scalar().then(|| Self::basic(kind))
	}

	/// Dynamic wrapper type ("any").
	pub fn dynamic() -> Self {
		Self::new(None, TypeRepr::Dynamic)
	}

	/// Unnamed growable sequence type.
	pub fn seq(elem: Type) -> Self {
		Self::new(None, TypeRepr::Seq(elem))
	}

	/// Unnamed fixed-size array type.
	pub fn array(elem: Type, len: usize) -> Self {
		Self::new(None, TypeRepr::Array(elem, len))
	}

	/// Unnamed map type.
	pub fn map(key: Type, value: Type) -> Self {
		Self::new(None, TypeRepr::Map(key, value))
	}

	/// Unnamed pointer type.
	pub fn ptr(elem: Type) -> Self {
		Self::new(None, TypeRepr::Ptr(elem))
	}

	/// Distinct named type sharing `underlying`'s representation.
	pub fn named(name: impl Into<Box<str>>, underlying: &Type) -> Self {
		Self::new(Some(name.into()), underlying.repr().clone())
	}

	/// Start a named record type.
	pub fn record(name: impl Into<Box<str>>) -> RecordBuilder {
		RecordBuilder {
			name: name.into(),
			fields: Vec::new(),
		}
	}

	/// Declared name, if any.
	pub fn name(&self) -> Option<&str> {
		self.0.name.as_deref()
	}

	/// Underlying representation.
	pub fn repr(&self) -> &TypeRepr {
		&self.0.repr
	}

	/// Structural kind.
	pub fn kind(&self) -> Kind {
		match self.repr() {
			TypeRepr::Basic(kind) => *kind,
			TypeRepr::Seq(_) => Kind::Seq,
			TypeRepr::Array(..) => Kind::Array,
			TypeRepr::Map(..) => Kind::Map,
			TypeRepr::Record(_) => Kind::Record,
			TypeRepr::Dynamic => Kind::Dynamic,
			TypeRepr::Ptr(_) => Kind::Ptr,
		}
	}

	/// Element type of sequences, arrays, and pointers.
	pub fn elem(&self) -> Option<&Type> {
		match self.repr() {
			TypeRepr::Seq(elem) | TypeRepr::Array(elem, _) | TypeRepr::Ptr(elem) => Some(elem),
			_ => None,
		}
	}

	/// Key and value types of maps.
	pub fn map_types(&self) -> Option<(&Type, &Type)> {
		match self.repr() {
			TypeRepr::Map(key, value) => Some((key, value)),
			_ => None,
		}
	}

	/// Record field declarations, empty for non-records.
	pub fn fields(&self) -> &[FieldDef] {
		match self.repr() {
			TypeRepr::Record(fields) => fields,
			_ => &[],
		}
	}

	/// Same name and same representation.
	pub fn is_identical(&self, other: &Type) -> bool {
		Arc::ptr_eq(&self.0, &other.0) || self == other
	}

	/// Usable as `target` without any representation change.
	pub fn is_assignable_to(&self, target: &Type) -> bool {
		if self.is_identical(target) || target.kind() == Kind::Dynamic {
			return true;
		}
		(self.name().is_none() || target.name().is_none()) && self.repr() == target.repr()
	}

	/// Usable as `target` after a representation change that may lose data.
	pub fn is_convertible_to(&self, target: &Type) -> bool {
		if self.is_assignable_to(target) || self.repr() == target.repr() {
			return true;
		}

		let (from, to) = (self.kind(), target.kind());
		if from.is_numeric() && to.is_numeric() {
			return true;
		}
		if from.is_integer() && to == Kind::String {
			return true;
		}
		if from == Kind::String && is_text_seq(target) {
			return true;
		}
		to == Kind::String && is_text_seq(self)
	}
}

/// Sequence of `u8` (bytes) or `i32` (code points).
pub(crate) fn is_text_seq(ty: &Type) -> bool {
	match ty.repr() {
		TypeRepr::Seq(elem) => matches!(elem.kind(), Kind::U8 | Kind::I32),
		_ => false,
	}
}

fn kind_type_name(kind: Kind) -> &'static str {
	match kind {
		Kind::String => "String",
		other => other.as_str(),
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(name) = self.name() {
			return f.write_str(name);
		}
		match self.repr() {
			TypeRepr::Basic(kind) => f.write_str(kind_type_name(*kind)),
			TypeRepr::Seq(elem) => write!(f, "Vec<{elem}>"),
			TypeRepr::Array(elem, len) => write!(f, "[{elem}; {len}]"),
			TypeRepr::Map(key, value) => write!(f, "HashMap<{key}, {value}>"),
			TypeRepr::Record(fields) => {
				f.write_str("struct {")?;
				for (idx, field) in fields.iter().enumerate() {
					let sep = if idx == 0 { " " } else { ", " };
					write!(f, "{sep}{}: {}", field.name, field.ty)?;
				}
				f.write_str(" }")
			}
			TypeRepr::Dynamic => f.write_str("any"),
			TypeRepr::Ptr(elem) => write!(f, "*{elem}"),
		}
	}
}

impl fmt::Debug for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Type({self})")
	}
}
