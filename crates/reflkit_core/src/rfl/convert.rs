use crate::rfl::ty::is_text_seq;
use crate::rfl::value::Data;
use crate::rfl::{Kind, Reflect, Result, RflError, Type, Value};

/// Produce a `T` from a value of unknown concrete type.
///
/// Tries, in order and after every unwrap step: assignability, convertibility,
/// and unboxing one dynamic-wrapper layer. Conversions may lose precision
/// (float to int truncates, narrowing ints wrap); that is accepted, not an error.
pub fn value_as<T: Reflect>(value: &Value) -> Result<T> {
	let target = T::static_type();
	let mut current = value;

	loop {
		if current.ty().is_assignable_to(&target) {
			return reinterpret(current.clone().assign_to(&target), &target);
		}
		if current.ty().is_convertible_to(&target) {
			let converted = convert_value(current, &target).ok_or_else(|| RflError::unmatched("value", current.ty(), &target))?;
			tracing::trace!(from = %current.ty(), to = %target, "converted value");
			return reinterpret(converted, &target);
		}

		if current.kind() != Kind::Dynamic {
			break;
		}
		let Some(inner) = current.elem() else {
			break;
		};
		tracing::trace!(inner = %inner.ty(), "unwrapped dynamic layer");
		current = inner;
	}

	Err(RflError::unmatched("value", current.ty(), &target))
}

/// Strict type assertion: the concrete stored type must be `T` itself,
/// unless `T` is the dynamic wrapper. An empty value never satisfies it.
pub fn assert_as<T: Reflect>(value: &Value, context: &'static str) -> Result<T> {
	let target = T::static_type();
	let Some(concrete) = value.concrete() else {
		return Err(RflError::unmatched(context, "nil", &target));
	};

	if target.kind() != Kind::Dynamic && !concrete.ty().is_identical(&target) {
		return Err(RflError::unmatched(context, concrete.ty(), &target));
	}
	reinterpret(concrete.clone(), &target)
}

/// Like [`assert_as`], but an empty element read into the dynamic wrapper yields its zero value.
pub(crate) fn assert_item_as<T: Reflect>(value: &Value, context: &'static str) -> Result<T> {
	let target = T::static_type();
	if value.concrete().is_none() && target.kind() == Kind::Dynamic {
		return reinterpret(Value::nil(), &target);
	}
	assert_as(value, context)
}

impl Value {
	/// Convert to a runtime type descriptor, e.g. one resolved from a [`TypeCatalog`](crate::rfl::TypeCatalog).
	///
	/// Follows the same rules as [`value_as`], so dynamic layers are unwrapped and lossy numeric conversions succeed.
	pub fn convert(&self, target: &Type) -> Result<Value> {
		let mut current = self;
		loop {
			if let Some(converted) = convert_value(current, target) {
				return Ok(converted);
			}
			match current.elem() {
				Some(inner) if current.kind() == Kind::Dynamic => current = inner,
				_ => return Err(RflError::unmatched("value", current.ty(), target)),
			}
		}
	}
}

/// Check that `value` may be stored in a slot of type `slot` and shape it for storage.
///
/// An empty value is accepted only by dynamic slots, which receive their zero value.
pub(crate) fn place(value: Value, slot: &Type, context: &'static str) -> Result<Value> {
	let Some(concrete) = value.into_concrete() else {
		if slot.kind() == Kind::Dynamic {
			return Ok(Value::zero(slot));
		}
		return Err(RflError::unmatched(context, "nil", slot));
	};

	if !concrete.ty().is_assignable_to(slot) {
		return Err(RflError::unmatched(context, concrete.ty(), slot));
	}
	Ok(concrete.assign_to(slot))
}

/// Convert `value` to `target`, or `None` when the types are not convertible.
pub(crate) fn convert_value(value: &Value, target: &Type) -> Option<Value> {
	let source = value.ty();
	if source.is_assignable_to(target) {
		return Some(value.clone().assign_to(target));
	}
	if source.repr() == target.repr() {
		return Some(value.clone().assign_to(target));
	}

	let to = target.kind();
	let data = match (value.data(), to) {
		(data, to) if source.kind().is_numeric() && to.is_numeric() => convert_numeric(data, to)?,
		(Data::Int(raw), Kind::String) => Data::String(code_point(u64::try_from(*raw).unwrap_or(u64::MAX)).to_string()),
		(Data::Uint(raw), Kind::String) => Data::String(code_point(*raw).to_string()),
		(Data::String(text), Kind::Seq) if is_text_seq(target) => Data::Seq(explode_text(text, target)?),
		(Data::Seq(items), Kind::String) if is_text_seq(source) => Data::String(join_text(items, source)?),
		_ => return None,
	};

	if source.kind().is_float() && to.is_integer() {
		tracing::trace!(from = %source, to = %target, "float to integer conversion truncates");
	}
	Some(Value::from_parts(target.clone(), data))
}

fn convert_numeric(data: &Data, to: Kind) -> Option<Data> {
	let converted = match *data {
		Data::Int(raw) if to.is_signed() => Data::Int(wrap_signed(raw, to)),
		Data::Int(raw) if to.is_unsigned() => Data::Uint(wrap_unsigned(raw as u64, to)),
		Data::Int(raw) if to == Kind::F32 => Data::Float(f64::from(raw as f32)),
		Data::Int(raw) => Data::Float(raw as f64),
		Data::Uint(raw) if to.is_signed() => Data::Int(wrap_signed(raw as i64, to)),
		Data::Uint(raw) if to.is_unsigned() => Data::Uint(wrap_unsigned(raw, to)),
		Data::Uint(raw) if to == Kind::F32 => Data::Float(f64::from(raw as f32)),
		Data::Uint(raw) => Data::Float(raw as f64),
		Data::Float(raw) if to.is_signed() => Data::Int(saturate_signed(raw, to)),
		Data::Float(raw) if to.is_unsigned() => Data::Uint(saturate_unsigned(raw, to)),
		Data::Float(raw) => Data::Float(round_float(raw, to)),
		_ => return None,
	};
	Some(converted)
}

fn wrap_signed(raw: i64, to: Kind) -> i64 {
	match to {
		Kind::I8 => i64::from(raw as i8),
		Kind::I16 => i64::from(raw as i16),
		Kind::I32 => i64::from(raw as i32),
		Kind::Isize => raw as isize as i64,
		_ => raw,
	}
}

fn wrap_unsigned(raw: u64, to: Kind) -> u64 {
	match to {
		Kind::U8 => u64::from(raw as u8),
		Kind::U16 => u64::from(raw as u16),
		Kind::U32 => u64::from(raw as u32),
		Kind::Usize => raw as usize as u64,
		_ => raw,
	}
}

fn saturate_signed(raw: f64, to: Kind) -> i64 {
	match to {
		Kind::I8 => i64::from(raw as i8),
		Kind::I16 => i64::from(raw as i16),
		Kind::I32 => i64::from(raw as i32),
		Kind::Isize => raw as isize as i64,
		_ => raw as i64,
	}
}

fn saturate_unsigned(raw: f64, to: Kind) -> u64 {
	match to {
		Kind::U8 => u64::from(raw as u8),
		Kind::U16 => u64::from(raw as u16),
		Kind::U32 => u64::from(raw as u32),
		Kind::Usize => raw as usize as u64,
		_ => raw as u64,
	}
}

fn round_float(raw: f64, to: Kind) -> f64 {
	if to == Kind::F32 { f64::from(raw as f32) } else { raw }
}

fn code_point(raw: u64) -> char {
	u32::try_from(raw).ok().and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn explode_text(text: &str, target: &Type) -> Option<Vec<Value>> {
	let elem = target.elem()?;
	let items = match elem.kind() {
		Kind::U8 => text.bytes().map(|byte| Value::from_parts(elem.clone(), Data::Uint(u64::from(byte)))).collect(),
		Kind::I32 => text.chars().map(|ch| Value::from_parts(elem.clone(), Data::Int(i64::from(u32::from(ch))))).collect(),
		_ => return None,
	};
	Some(items)
}

fn join_text(items: &[Value], source: &Type) -> Option<String> {
	match source.elem()?.kind() {
		Kind::U8 => {
			let bytes = items
				.iter()
				.map(|item| match item.data() {
					Data::Uint(raw) => Some(*raw as u8),
					_ => None,
				})
				.collect::<Option<Vec<_>>>()?;
			Some(String::from_utf8_lossy(&bytes).into_owned())
		}
		Kind::I32 => items
			.iter()
			.map(|item| match item.data() {
				Data::Int(raw) => Some(code_point(u64::try_from(*raw).unwrap_or(u64::MAX))),
				_ => None,
			})
			.collect(),
		_ => None,
	}
}

fn reinterpret<T: Reflect>(value: Value, target: &Type) -> Result<T> {
	let got = value.ty().clone();
	T::from_value(value).ok_or_else(|| RflError::unmatched("value", got, target))
}
