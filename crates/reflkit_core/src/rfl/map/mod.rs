use std::collections::HashMap;
use std::hash::Hash;

use crate::rfl::convert::{convert_value, place};
use crate::rfl::value::Data;
use crate::rfl::{Kind, MapEntry, Reflect, Result, RflError, Type, Value, assert_as, indirect, indirect_mut};

/// Number of entries in a map value.
pub fn map_len(m: &Value) -> Result<usize> {
	Ok(map_view(m)?.1.len())
}

/// Look up `key` and return the stored value as exactly `V`.
pub fn map_get<V: Reflect, K: Reflect>(m: &Value, key: K) -> Result<V> {
	let (ty, entries) = map_view(m)?;
	let (key_ty, _) = map_types(&ty)?;
	let key = place(key.into_value(), &key_ty, "key")?;

	let stored = entries.get(&key).ok_or_else(|| RflError::NotFound {
		what: "key",
		name: render_key(&key),
	})?;
	assert_as::<V>(stored, "value")
}

/// Insert or replace the entry for `key`.
pub fn map_set<K: Reflect, V: Reflect>(m: &mut Value, key: K, value: V) -> Result<()> {
	let (ty, entries) = map_view_mut(m)?;
	let (key_ty, value_ty) = map_types(&ty)?;
	let key = place(key.into_value(), &key_ty, "key")?;
	let value = place(value.into_value(), &value_ty, "value")?;
	entries.insert(key, value);
	Ok(())
}

/// Remove the entry for `key`; removing an absent key succeeds.
pub fn map_delete<K: Reflect>(m: &mut Value, key: K) -> Result<()> {
	let (ty, entries) = map_view_mut(m)?;
	let (key_ty, _) = map_types(&ty)?;
	let key = place(key.into_value(), &key_ty, "key")?;
	entries.remove(&key);
	Ok(())
}

/// All keys, in unspecified order.
pub fn map_keys(m: &Value) -> Result<Vec<Value>> {
	Ok(map_view(m)?.1.keys().cloned().collect())
}

/// All entries, in unspecified order.
pub fn map_entries(m: &Value) -> Result<Vec<MapEntry>> {
	let entries = map_view(m)?.1;
	Ok(entries
		.iter()
		.map(|(key, value)| MapEntry {
			key: key.clone(),
			value: value.clone(),
		})
		.collect())
}

/// Convert a whole map to `HashMap<K, V>`, converting keys and values independently.
pub fn map_as<K, V>(m: &Value) -> Result<HashMap<K, V>>
where
	K: Reflect + Eq + Hash,
	V: Reflect,
{
	let (ty, entries) = map_view(m)?;
	let target = HashMap::<K, V>::static_type();
	if ty.is_identical(&target) {
		let source = indirect(m).value.cloned().unwrap_or_else(|| Value::zero(&target));
		return HashMap::<K, V>::from_value(source).ok_or_else(|| RflError::unmatched("map", &ty, &target));
	}

	let (src_key, src_value) = map_types(&ty)?;
	let (dst_key, dst_value) = map_types(&target)?;
	if !src_key.is_convertible_to(&dst_key) {
		return Err(RflError::unmatched("key", src_key, dst_key));
	}
	if !src_value.is_convertible_to(&dst_value) {
		return Err(RflError::unmatched("value", src_value, dst_value));
	}

	let mut out = HashMap::with_capacity(entries.len());
	for (key, value) in entries {
		let key = convert_value(key, &dst_key)
			.and_then(K::from_value)
			.ok_or_else(|| RflError::unmatched("key", key.ty(), &dst_key))?;
		let value = convert_value(value, &dst_value)
			.and_then(V::from_value)
			.ok_or_else(|| RflError::unmatched("value", value.ty(), &dst_value))?;
		out.insert(key, value);
	}
	Ok(out)
}

fn map_view(m: &Value) -> Result<(Type, &HashMap<Value, Value>)> {
	let root = indirect(m).value;
	match root.map(|value| (value.ty().clone(), value.data())) {
		Some((ty, Data::Map(entries))) => Ok((ty, entries)),
		_ => Err(not_a_map(m)),
	}
}

fn map_view_mut(m: &mut Value) -> Result<(Type, &mut HashMap<Value, Value>)> {
	let err = not_a_map(m);
	let Some(root) = indirect_mut(m).value else {
		return Err(err);
	};
	let ty = root.ty().clone();
	match root.data_mut() {
		Data::Map(entries) => Ok((ty, entries)),
		_ => Err(err),
	}
}

fn map_types(ty: &Type) -> Result<(Type, Type)> {
	match ty.map_types() {
		Some((key, value)) => Ok((key.clone(), value.clone())),
		None => Err(RflError::TypeInvalid {
			expected: "map",
			got: ty.to_string(),
		}),
	}
}

fn not_a_map(m: &Value) -> RflError {
	RflError::TypeInvalid {
		expected: Kind::Map.as_str(),
		got: m.ty().to_string(),
	}
}

fn render_key(key: &Value) -> String {
	serde_json::to_string(key).unwrap_or_else(|_| key.ty().to_string())
}
