use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::rfl::value::Data;
use crate::rfl::{Type, Value};

/// Native type with a static descriptor and a dynamic value form.
pub trait Reflect: Sized {
	/// Descriptor of `Self`.
	fn static_type() -> Type;

	/// Wrap `self` as a value of [`Reflect::static_type`].
	fn into_value(self) -> Value;

	/// Reinterpret a value whose type is identical or assignable to [`Reflect::static_type`].
	fn from_value(value: Value) -> Option<Self>;
}

impl Reflect for Value {
	fn static_type() -> Type {
		Type::dynamic()
	}

	fn into_value(self) -> Value {
		self
	}

	fn from_value(value: Value) -> Option<Self> {
		Some(value)
	}
}

impl Reflect for bool {
	fn static_type() -> Type {
		Type::bool()
	}

	fn into_value(self) -> Value {
		Value::from_parts(Type::bool(), Data::Bool(self))
	}

	fn from_value(value: Value) -> Option<Self> {
		match value.into_data() {
			Data::Bool(value) => Some(value),
			_ => None,
		}
	}
}

impl Reflect for String {
	fn static_type() -> Type {
		Type::string()
	}

	fn into_value(self) -> Value {
		Value::from_parts(Type::string(), Data::String(self))
	}

	fn from_value(value: Value) -> Option<Self> {
		match value.into_data() {
			Data::String(value) => Some(value),
			_ => None,
		}
	}
}

macro_rules! reflect_int {
	($($native:ty => $ctor:ident, $variant:ident, $wide:ty;)*) => {
		$(
			impl Reflect for $native {
				fn static_type() -> Type {
					Type::$ctor()
				}

				fn into_value(self) -> Value {
					Value::from_parts(Type::$ctor(), Data::$variant(self as $wide))
				}

				fn from_value(value: Value) -> Option<Self> {
					match value.into_data() {
						Data::$variant(raw) => Some(raw as $native),
						_ => None,
					}
				}
			}
		)*
	};
}

reflect_int! {
	isize => isize, Int, i64;
	i8 => i8, Int, i64;
	i16 => i16, Int, i64;
	i32 => i32, Int, i64;
	i64 => i64, Int, i64;
	usize => usize, Uint, u64;
	u8 => u8, Uint, u64;
	u16 => u16, Uint, u64;
	u32 => u32, Uint, u64;
	u64 => u64, Uint, u64;
}

impl Reflect for f32 {
	fn static_type() -> Type {
		Type::f32()
	}

	fn into_value(self) -> Value {
		Value::from_parts(Type::f32(), Data::Float(f64::from(self)))
	}

	fn from_value(value: Value) -> Option<Self> {
		match value.into_data() {
			Data::Float(raw) => Some(raw as f32),
			_ => None,
		}
	}
}

impl Reflect for f64 {
	fn static_type() -> Type {
		Type::f64()
	}

	fn into_value(self) -> Value {
		Value::from_parts(Type::f64(), Data::Float(self))
	}

	fn from_value(value: Value) -> Option<Self> {
		match value.into_data() {
			Data::Float(raw) => Some(raw),
			_ => None,
		}
	}
}

impl<T: Reflect> Reflect for Option<T> {
	fn static_type() -> Type {
		Type::ptr(T::static_type())
	}

	fn into_value(self) -> Value {
		match self {
			Some(inner) => Value::from_parts(Self::static_type(), Data::Ptr(Some(Box::new(into_slot::<T>(inner))))),
			None => Value::null_ptr(&T::static_type()),
		}
	}

	fn from_value(value: Value) -> Option<Self> {
		match value.into_data() {
			Data::Ptr(None) => Some(None),
			Data::Ptr(Some(inner)) => T::from_value(*inner).map(Some),
			_ => None,
		}
	}
}

impl<T: Reflect> Reflect for Vec<T> {
	fn static_type() -> Type {
		Type::seq(T::static_type())
	}

	fn into_value(self) -> Value {
		let items = self.into_iter().map(into_slot::<T>).collect();
		Value::from_parts(Self::static_type(), Data::Seq(items))
	}

	fn from_value(value: Value) -> Option<Self> {
		match value.into_data() {
			Data::Seq(items) => items.into_iter().map(T::from_value).collect(),
			_ => None,
		}
	}
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
	fn static_type() -> Type {
		Type::array(T::static_type(), N)
	}

	fn into_value(self) -> Value {
		let items = self.into_iter().map(into_slot::<T>).collect();
		Value::from_parts(Self::static_type(), Data::Seq(items))
	}

	fn from_value(value: Value) -> Option<Self> {
		let items = Vec::<T>::from_value(value)?;
		items.try_into().ok()
	}
}

impl<K, V> Reflect for HashMap<K, V>
where
	K: Reflect + Eq + Hash,
	V: Reflect,
{
	fn static_type() -> Type {
		Type::map(K::static_type(), V::static_type())
	}

	fn into_value(self) -> Value {
		let entries = self.into_iter().map(|(key, value)| (into_slot::<K>(key), into_slot::<V>(value))).collect();
		Value::from_parts(Self::static_type(), Data::Map(entries))
	}

	fn from_value(value: Value) -> Option<Self> {
		match value.into_data() {
			Data::Map(entries) => entries.into_iter().map(|(key, value)| Some((K::from_value(key)?, V::from_value(value)?))).collect(),
			_ => None,
		}
	}
}

impl<K, V> Reflect for BTreeMap<K, V>
where
	K: Reflect + Ord,
	V: Reflect,
{
	fn static_type() -> Type {
		Type::map(K::static_type(), V::static_type())
	}

	fn into_value(self) -> Value {
		let entries = self.into_iter().map(|(key, value)| (into_slot::<K>(key), into_slot::<V>(value))).collect();
		Value::from_parts(Self::static_type(), Data::Map(entries))
	}

	fn from_value(value: Value) -> Option<Self> {
		match value.into_data() {
			Data::Map(entries) => entries.into_iter().map(|(key, value)| Some((K::from_value(key)?, V::from_value(value)?))).collect(),
			_ => None,
		}
	}
}

/// Convert a native element into the value stored for a `T`-typed slot.
fn into_slot<T: Reflect>(item: T) -> Value {
	item.into_value().assign_to(&T::static_type())
}
