use crate::rfl::convert::{assert_item_as, convert_value, place};
use crate::rfl::value::Data;
use crate::rfl::{Kind, Reflect, Result, RflError, Type, Value, indirect, indirect_mut, is_kind_in, value_as};

const SEQ_KINDS: &[Kind] = &[Kind::Seq, Kind::Array];

/// Number of elements in a sequence or array.
pub fn seq_len(s: &Value) -> Result<usize> {
	Ok(seq_view(s)?.1.len())
}

/// All elements as dynamic values, in order.
pub fn seq_get_all(s: &Value) -> Result<Vec<Value>> {
	Ok(seq_view(s)?.1.to_vec())
}

/// Element at `index` as exactly `T`.
///
/// An empty dynamic element yields `T`'s zero value when `T` is the dynamic wrapper.
pub fn seq_get<T: Reflect>(s: &Value, index: usize) -> Result<T> {
	let (_, items) = seq_view(s)?;
	let item = items.get(index).ok_or(RflError::IndexOutOfRange { index, len: items.len() })?;
	assert_item_as::<T>(item, "item")
}

/// Replace the element at `index`.
pub fn seq_set<T: Reflect>(s: &mut Value, index: usize, value: T) -> Result<()> {
	let (ty, items) = seq_view_mut(s)?;
	let len = items.len();
	let slot = items.get_mut(index).ok_or(RflError::IndexOutOfRange { index, len })?;
	*slot = place(value.into_value(), &elem_type(&ty)?, "item")?;
	Ok(())
}

/// Return a new sequence with `value` appended; fixed arrays are rejected.
pub fn seq_append<T: Reflect>(s: &Value, value: T) -> Result<Value> {
	let (ty, items) = seq_view(s)?;
	if ty.kind() != Kind::Seq {
		return Err(RflError::TypeInvalid {
			expected: Kind::Seq.as_str(),
			got: ty.to_string(),
		});
	}

	let item = place(value.into_value(), &elem_type(&ty)?, "item")?;
	let mut grown = Vec::with_capacity(items.len() + 1);
	grown.extend_from_slice(items);
	grown.push(item);
	Ok(Value::from_parts(ty, Data::Seq(grown)))
}

/// Convert a whole sequence or array to `Vec<T>` by its declared element type.
pub fn seq_as<T: Reflect>(s: &Value) -> Result<Vec<T>> {
	let (ty, items) = seq_view(s)?;
	let target = Vec::<T>::static_type();
	if ty.is_identical(&target) {
		return items
			.iter()
			.map(|item| T::from_value(item.clone()))
			.collect::<Option<Vec<_>>>()
			.ok_or_else(|| RflError::unmatched("item", &ty, &target));
	}

	let src_elem = elem_type(&ty)?;
	let dst_elem = T::static_type();
	if !src_elem.is_convertible_to(&dst_elem) {
		return Err(RflError::unmatched("item", src_elem, dst_elem));
	}

	items
		.iter()
		.map(|item| {
			convert_value(item, &dst_elem)
				.and_then(T::from_value)
				.ok_or_else(|| RflError::unmatched("item", item.ty(), &dst_elem))
		})
		.collect()
}

/// Convert every element with [`value_as`], unwrapping dynamic elements one by one.
pub fn seq_values_as<T: Reflect>(s: &Value) -> Result<Vec<T>> {
	let (_, items) = seq_view(s)?;
	items.iter().map(value_as::<T>).collect()
}

fn seq_view(s: &Value) -> Result<(Type, &[Value])> {
	let root = indirect(s).value;
	match root {
		Some(value) if is_kind_in(value.kind(), SEQ_KINDS) => match value.data() {
			Data::Seq(items) => Ok((value.ty().clone(), items.as_slice())),
			_ => Err(not_a_seq(s)),
		},
		_ => Err(not_a_seq(s)),
	}
}

fn seq_view_mut(s: &mut Value) -> Result<(Type, &mut Vec<Value>)> {
	let err = not_a_seq(s);
	let Some(root) = indirect_mut(s).value else {
		return Err(err);
	};
	if !is_kind_in(root.kind(), SEQ_KINDS) {
		return Err(err);
	}
	let ty = root.ty().clone();
	match root.data_mut() {
		Data::Seq(items) => Ok((ty, items)),
		_ => Err(err),
	}
}

fn elem_type(ty: &Type) -> Result<Type> {
	ty.elem().cloned().ok_or_else(|| RflError::TypeInvalid {
		expected: "seq or array",
		got: ty.to_string(),
	})
}

fn not_a_seq(s: &Value) -> RflError {
	RflError::TypeInvalid {
		expected: "seq or array",
		got: s.ty().to_string(),
	}
}
