use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::rfl::{FieldOptions, Kind, Reflect, Result, RflError, Type, TypeRepr, struct_set_field};

/// Runtime value paired with its type descriptor.
#[derive(Debug, Clone)]
pub struct Value {
	ty: Type,
	data: Data,
}

/// Storage for a [`Value`]; the variant always matches the type's representation.
#[derive(Debug, Clone)]
pub(crate) enum Data {
	Bool(bool),
	Int(i64),
	Uint(u64),
	Float(f64),
	String(String),
	/// Elements of sequences and arrays.
	Seq(Vec<Value>),
	Map(HashMap<Value, Value>),
	/// Field values in declaration order.
	Record(Vec<Value>),
	Ptr(Option<Box<Value>>),
	Dynamic(Option<Box<Value>>),
}

/// One key/value pair enumerated from a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
	/// Entry key.
	pub key: Value,
	/// Entry value.
	pub value: Value,
}

impl Value {
	pub(crate) fn from_parts(ty: Type, data: Data) -> Self {
		Self { ty, data }
	}

	/// Wrap a native value.
	pub fn of<T: Reflect>(value: T) -> Self {
		value.into_value()
	}

	/// Default value of `ty`.
	pub fn zero(ty: &Type) -> Self {
		let data = match ty.repr() {
			TypeRepr::Basic(kind) => zero_scalar(*kind),
			TypeRepr::Seq(_) => Data::Seq(Vec::new()),
			TypeRepr::Array(elem, len) => Data::Seq((0..*len).map(|_| Self::zero(elem)).collect()),
			TypeRepr::Map(..) => Data::Map(HashMap::new()),
			TypeRepr::Record(fields) => Data::Record(fields.iter().map(|field| Self::zero(&field.ty)).collect()),
			TypeRepr::Dynamic => Data::Dynamic(None),
			TypeRepr::Ptr(_) => Data::Ptr(None),
		};
		Self { ty: ty.clone(), data }
	}

	/// Empty dynamic wrapper.
	pub fn nil() -> Self {
		Self {
			ty: Type::dynamic(),
			data: Data::Dynamic(None),
		}
	}

	/// Box `inner` in a dynamic wrapper.
	pub fn dynamic(inner: Value) -> Self {
		Self {
			ty: Type::dynamic(),
			data: Data::Dynamic(Some(Box::new(inner))),
		}
	}

	/// Pointer to `inner`.
	pub fn ptr(inner: Value) -> Self {
		Self {
			ty: Type::ptr(inner.ty.clone()),
			data: Data::Ptr(Some(Box::new(inner))),
		}
	}

	/// Nil pointer to `elem`.
	pub fn null_ptr(elem: &Type) -> Self {
		Self {
			ty: Type::ptr(elem.clone()),
			data: Data::Ptr(None),
		}
	}

	/// Record of type `ty` with the named fields assigned and the rest zeroed.
	pub fn record<I, S>(ty: &Type, fields: I) -> Result<Self>
	where
		I: IntoIterator<Item = (S, Value)>,
		S: AsRef<str>,
	{
		if ty.kind() != Kind::Record {
			return Err(RflError::TypeInvalid {
				expected: "record",
				got: ty.to_string(),
			});
		}

		// Constructing through a pointer keeps invisible fields writable.
		let mut handle = Self::ptr(Self::zero(ty));
		let opt = FieldOptions::exact().with_private_access();
		for (name, value) in fields {
			struct_set_field(&mut handle, name.as_ref(), value, &opt)?;
		}
		let Data::Ptr(Some(inner)) = handle.data else {
			return Err(RflError::TypeInvalid {
				expected: "record",
				got: ty.to_string(),
			});
		};
		Ok(*inner)
	}

	/// Type descriptor.
	pub fn ty(&self) -> &Type {
		&self.ty
	}

	/// Structural kind.
	pub fn kind(&self) -> Kind {
		self.ty.kind()
	}

	/// Target of a pointer or content of a dynamic wrapper.
	pub fn elem(&self) -> Option<&Value> {
		match &self.data {
			Data::Ptr(inner) | Data::Dynamic(inner) => inner.as_deref(),
			_ => None,
		}
	}

	pub(crate) fn elem_mut(&mut self) -> Option<&mut Value> {
		match &mut self.data {
			Data::Ptr(inner) | Data::Dynamic(inner) => inner.as_deref_mut(),
			_ => None,
		}
	}

	/// Whether this is a nil pointer or an empty dynamic wrapper.
	pub fn is_nil(&self) -> bool {
		matches!(self.data, Data::Ptr(None) | Data::Dynamic(None))
	}

	/// Whether this equals the default value of its type.
	pub fn is_zero(&self) -> bool {
		match &self.data {
			Data::Bool(value) => !value,
			Data::Int(value) => *value == 0,
			Data::Uint(value) => *value == 0,
			Data::Float(value) => value.to_bits() == 0,
			Data::String(value) => value.is_empty(),
			Data::Seq(items) => match self.kind() {
				Kind::Array => items.iter().all(Value::is_zero),
				_ => items.is_empty(),
			},
			Data::Map(entries) => entries.is_empty(),
			Data::Record(fields) => fields.iter().all(Value::is_zero),
			Data::Ptr(inner) | Data::Dynamic(inner) => inner.is_none(),
		}
	}

	/// Value with every dynamic wrapper layer removed; `None` for an empty wrapper.
	pub fn concrete(&self) -> Option<&Value> {
		let mut value = self;
		while let Data::Dynamic(inner) = &value.data {
			value = inner.as_deref()?;
		}
		Some(value)
	}

	pub(crate) fn into_concrete(self) -> Option<Value> {
		let mut value = self;
		loop {
			match value.data {
				Data::Dynamic(inner) => value = *inner?,
				data => return Some(Self { ty: value.ty, data }),
			}
		}
	}

	/// Place this value into a slot of type `target` it is assignable to.
	pub(crate) fn assign_to(self, target: &Type) -> Value {
		if target.kind() == Kind::Dynamic {
			if self.kind() == Kind::Dynamic {
				return self;
			}
			return Self::dynamic(self);
		}
		Self {
			ty: target.clone(),
			data: self.data,
		}
	}

	pub(crate) fn data(&self) -> &Data {
		&self.data
	}

	pub(crate) fn data_mut(&mut self) -> &mut Data {
		&mut self.data
	}

	pub(crate) fn into_data(self) -> Data {
		self.data
	}
}

fn zero_scalar(kind: Kind) -> Data {
	match kind {
		Kind::Bool => Data::Bool(false),
		Kind::String => Data::String(String::new()),
		kind if kind.is_signed() => Data::Int(0),
		kind if kind.is_unsigned() => Data::Uint(0),
		_ => Data::Float(0.0),
	}
}

// Equality and hashing look through dynamic wrappers so map keys stored
// behind `any` slots still match their concrete lookups.
impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self.concrete(), other.concrete()) {
			(None, None) => true,
			(Some(left), Some(right)) => left.ty.is_identical(&right.ty) && left.data == right.data,
			_ => false,
		}
	}
}

impl Eq for Value {}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		let Some(value) = self.concrete() else {
			0_u8.hash(state);
			return;
		};
		1_u8.hash(state);
		value.ty.hash(state);
		value.data.hash(state);
	}
}

impl PartialEq for Data {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Bool(left), Self::Bool(right)) => left == right,
			(Self::Int(left), Self::Int(right)) => left == right,
			(Self::Uint(left), Self::Uint(right)) => left == right,
			(Self::Float(left), Self::Float(right)) => float_bits(*left) == float_bits(*right),
			(Self::String(left), Self::String(right)) => left == right,
			(Self::Seq(left), Self::Seq(right)) | (Self::Record(left), Self::Record(right)) => left == right,
			(Self::Map(left), Self::Map(right)) => left == right,
			(Self::Ptr(left), Self::Ptr(right)) | (Self::Dynamic(left), Self::Dynamic(right)) => left == right,
			_ => false,
		}
	}
}

/// Bit pattern used for float equality and hashing; `-0.0` folds into `0.0`.
fn float_bits(value: f64) -> u64 {
	if value == 0.0 { 0 } else { value.to_bits() }
}

impl Hash for Data {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Self::Bool(value) => value.hash(state),
			Self::Int(value) => value.hash(state),
			Self::Uint(value) => value.hash(state),
			Self::Float(value) => float_bits(*value).hash(state),
			Self::String(value) => value.hash(state),
			Self::Seq(items) | Self::Record(items) => items.hash(state),
			Self::Map(entries) => entries.len().hash(state),
			Self::Ptr(inner) | Self::Dynamic(inner) => inner.hash(state),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use crate::rfl::{FieldDef, FieldOptions, Kind, RflError, Type, Value, struct_get_field};

	#[test]
	fn zero_values_by_kind() {
		assert!(Value::zero(&Type::i64()).is_zero());
		assert!(Value::zero(&Type::string()).is_zero());
		assert!(Value::zero(&Type::ptr(Type::u8())).is_nil());

		let array = Value::zero(&Type::array(Type::f32(), 3));
		assert_eq!(array.kind(), Kind::Array);
		assert!(array.is_zero());
	}

	#[test]
	fn negative_zero_float_is_not_zero() {
		assert!(!Value::of(-0.0_f64).is_zero());
		assert!(Value::of(0.0_f64).is_zero());
	}

	#[test]
	fn equality_sees_through_dynamic_wrappers() {
		assert_eq!(Value::dynamic(Value::of(2_i64)), Value::of(2_i64));
		assert_ne!(Value::of(2_i64), Value::of(2_u64));
		assert_eq!(Value::nil(), Value::dynamic(Value::nil()));
	}

	#[test]
	fn wrapped_keys_hash_like_concrete_keys() {
		let mut map = HashMap::new();
		map.insert(Value::dynamic(Value::of("k".to_owned())), 1);
		assert_eq!(map.get(&Value::of("k".to_owned())), Some(&1));
	}

	#[test]
	fn signed_zero_keys_collide() {
		assert_eq!(Value::of(-0.0_f64), Value::of(0.0_f64));

		let mut map = HashMap::new();
		map.insert(Value::of(0.0_f64), "zero");
		map.insert(Value::of(-0.0_f64), "negative zero");
		assert_eq!(map.len(), 1);
		assert_eq!(map.get(&Value::of(0.0_f64)), Some(&"negative zero"));
	}

	#[test]
	fn record_construction_assigns_named_fields() {
		let ty = Type::record("SS")
			.field(FieldDef::new("I", Type::i64()))
			.field(FieldDef::new("u", Type::u64()).private())
			.build()
			.expect("record builds");

		let value = Value::record(&ty, [("I", Value::of(-1_i64)), ("u", Value::of(2_u64))]).expect("record value builds");
		assert_eq!(value.ty(), &ty);
		assert!(!value.is_zero());
		let opt = FieldOptions::exact().with_private_access();
		let handle = Value::ptr(value);
		assert_eq!(struct_get_field::<i64>(&handle, "I", &opt).expect("I"), -1);
		assert_eq!(struct_get_field::<u64>(&handle, "u", &opt).expect("u"), 2);

		let err = Value::record(&Type::i64(), [("I", Value::of(1_i64))]).expect_err("not a record type");
		assert!(matches!(err, RflError::TypeInvalid { expected: "record", .. }));

		let err = Value::record(&ty, [("X", Value::of(1_i64))]).expect_err("unknown field");
		assert!(matches!(err, RflError::NotFound { .. }));
	}
}
