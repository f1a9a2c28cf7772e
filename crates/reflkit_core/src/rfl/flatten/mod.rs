use std::collections::HashMap;

use crate::rfl::record::{RecordRef, embedded_record, record_ref};
use crate::rfl::{FieldDef, Result, RflError, Value, indirect, parse_tag};

/// One projected field, keyed internally by its source field name.
#[derive(Debug)]
struct FieldProjection {
	out_key: String,
	value: Value,
}

/// Project a record's visible fields into a map.
///
/// With a non-empty `tag_name`, keys come from that tag (`,`-delimited); `-`
/// or an empty tag name drops the field, and `omitempty` drops zero values.
/// With `flatten_embedded`, embedded records contribute their fields without
/// overriding fields the outer record declares.
pub fn struct_to_map(record: &Value, tag_name: &str, flatten_embedded: bool) -> Result<HashMap<String, Value>> {
	let rec = record_ref(record)?;
	let projected = project(rec, tag_name, flatten_embedded)?;
	Ok(projected.into_values().map(|field| (field.out_key, field.value)).collect())
}

fn project(rec: RecordRef<'_>, tag_name: &str, flatten_embedded: bool) -> Result<HashMap<String, FieldProjection>> {
	let mut out = HashMap::new();
	for (def, value) in rec.iter() {
		if def.embedded && flatten_embedded {
			if !def.visible && !rec.addressable {
				continue;
			}
			if let Some(inner) = embedded_root(def, value, rec.addressable) {
				for (name, field) in project(inner, tag_name, flatten_embedded)? {
					out.entry(name).or_insert(field);
				}
				continue;
			}
		}

		if !def.visible {
			continue;
		}
		let Some(out_key) = output_key(def, value, tag_name)? else {
			continue;
		};
		out.insert(def.name.to_string(), FieldProjection {
			out_key,
			value: value.clone(),
		});
	}
	Ok(out)
}

/// Embedded record value, or `None` when the field does not hold a record (e.g. a nil pointer).
fn embedded_root<'a>(def: &FieldDef, value: &'a Value, addressable: bool) -> Option<RecordRef<'a>> {
	embedded_record(&def.ty)?;
	let root = indirect(value);
	let inner = record_ref(value).ok()?;
	// Reached without a pointer, the embedded record shares its parent's address.
	Some(RecordRef {
		addressable: root.addressable || addressable,
		..inner
	})
}

/// Project fields with keys chosen by `key_fn(name, visible)`; `None` skips the field.
///
/// With a non-empty `tag_name`, fields without that tag are skipped. Embedded
/// records are not flattened. Invisible fields accepted by `key_fn` require the
/// record to be addressable.
pub fn struct_to_map_keyed<F>(record: &Value, tag_name: &str, key_fn: F) -> Result<HashMap<String, Value>>
where
	F: Fn(&str, bool) -> Option<String>,
{
	let rec = record_ref(record)?;
	let mut out = HashMap::with_capacity(rec.fields.len());
	for (def, value) in rec.iter() {
		if !tag_name.is_empty() && def.lookup_tag(tag_name).is_none() {
			continue;
		}
		let Some(name) = output_key(def, value, tag_name)? else {
			continue;
		};
		let Some(key) = key_fn(&name, def.visible).filter(|key| !key.is_empty()) else {
			continue;
		};
		if !def.visible && !rec.addressable {
			return Err(RflError::ValueUnaddressable {
				field: def.name.to_string(),
			});
		}
		out.insert(key, value.clone());
	}
	Ok(out)
}

fn output_key(def: &FieldDef, value: &Value, tag_name: &str) -> Result<Option<String>> {
	if tag_name.is_empty() || def.lookup_tag(tag_name).is_none() {
		return Ok(Some(def.name.to_string()));
	}

	let tag = parse_tag(def, tag_name, ",")?;
	if tag.ignored || tag.name.is_empty() {
		return Ok(None);
	}
	if tag.has_attr("omitempty") && value.is_zero() {
		return Ok(None);
	}
	Ok(Some(tag.name))
}
