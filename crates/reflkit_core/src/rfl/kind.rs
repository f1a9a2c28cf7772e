use crate::rfl::Value;

/// Coarse structural category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Boolean scalar.
	Bool,
	/// Pointer-width signed integer.
	Isize,
	/// 8-bit signed integer.
	I8,
	/// 16-bit signed integer.
	I16,
	/// 32-bit signed integer.
	I32,
	/// 64-bit signed integer.
	I64,
	/// Pointer-width unsigned integer.
	Usize,
	/// 8-bit unsigned integer.
	U8,
	/// 16-bit unsigned integer.
	U16,
	/// 32-bit unsigned integer.
	U32,
	/// 64-bit unsigned integer.
	U64,
	/// 32-bit float.
	F32,
	/// 64-bit float.
	F64,
	/// UTF-8 string.
	String,
	/// Growable ordered sequence.
	Seq,
	/// Fixed-size array.
	Array,
	/// Hash map.
	Map,
	/// Structured record with named fields.
	Record,
	/// Dynamic-typing wrapper holding any value or nothing.
	Dynamic,
	/// Nullable indirection.
	Ptr,
}

impl Kind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Isize => "isize",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::Usize => "usize",
			Self::U8 => "u8",
			Self::U16 => "u16",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::F32 => "f32",
			Self::F64 => "f64",
			Self::String => "string",
			Self::Seq => "seq",
			Self::Array => "array",
			Self::Map => "map",
			Self::Record => "record",
			Self::Dynamic => "dynamic",
			Self::Ptr => "ptr",
		}
	}

	/// Whether this is a signed integer kind.
	pub fn is_signed(self) -> bool {
		matches!(self, Self::Isize | Self::I8 | Self::I16 | Self::I32 | Self::I64)
	}

	/// Whether this is an unsigned integer kind.
	pub fn is_unsigned(self) -> bool {
		matches!(self, Self::Usize | Self::U8 | Self::U16 | Self::U32 | Self::U64)
	}

	/// Whether this is any integer kind.
	pub fn is_integer(self) -> bool {
		self.is_signed() || self.is_unsigned()
	}

	/// Whether this is a float kind.
	pub fn is_float(self) -> bool {
		matches!(self, Self::F32 | Self::F64)
	}

	/// Whether this is any numeric kind.
	pub fn is_numeric(self) -> bool {
		self.is_integer() || self.is_float()
	}

	/// Whether values of this kind carry no inner structure.
	pub fn is_scalar(self) -> bool {
		self.is_numeric() || matches!(self, Self::Bool | Self::String)
	}
}

/// Return true when `kind` equals one of `candidates`.
pub fn is_kind_in(kind: Kind, candidates: &[Kind]) -> bool {
	candidates.contains(&kind)
}

/// Root value reached by stripping pointers and dynamic wrappers.
#[derive(Debug, Clone, Copy)]
pub struct Indirect<'a> {
	/// Concrete value, or `None` when a nil pointer or empty wrapper was hit.
	pub value: Option<&'a Value>,
	/// Whether the root was reached through a pointer.
	pub addressable: bool,
}

/// Mutable counterpart of [`Indirect`].
#[derive(Debug)]
pub struct IndirectMut<'a> {
	/// Concrete value, or `None` when a nil pointer or empty wrapper was hit.
	pub value: Option<&'a mut Value>,
	/// Whether the root was reached through a pointer.
	pub addressable: bool,
}

/// Strip pointer and dynamic-wrapper layers until a concrete kind is reached.
pub fn indirect(mut value: &Value) -> Indirect<'_> {
	let mut addressable = false;
	loop {
		let kind = value.kind();
		if !is_kind_in(kind, &[Kind::Ptr, Kind::Dynamic]) {
			return Indirect {
				value: Some(value),
				addressable,
			};
		}

		// Unboxing a dynamic wrapper yields a copy; only pointer targets are addressable.
		addressable = kind == Kind::Ptr;
		let Some(inner) = value.elem() else {
			return Indirect { value: None, addressable };
		};
		value = inner;
	}
}

/// Mutable variant of [`indirect`].
pub fn indirect_mut(mut value: &mut Value) -> IndirectMut<'_> {
	let mut addressable = false;
	loop {
		let kind = value.kind();
		if !is_kind_in(kind, &[Kind::Ptr, Kind::Dynamic]) {
			return IndirectMut {
				value: Some(value),
				addressable,
			};
		}

		addressable = kind == Kind::Ptr;
		let Some(inner) = value.elem_mut() else {
			return IndirectMut { value: None, addressable };
		};
		value = inner;
	}
}
