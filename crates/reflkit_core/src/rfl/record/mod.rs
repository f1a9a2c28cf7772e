use crate::rfl::convert::place;
use crate::rfl::value::Data;
use crate::rfl::{FieldDef, Kind, Reflect, Result, RflError, Type, TypeRepr, Value, assert_as, indirect, indirect_mut};

/// Lookup and visibility switches for record field access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOptions {
	/// Match field names exactly; otherwise fold case and require a unique match.
	pub case_sensitive: bool,
	/// Allow reading and writing invisible fields on addressable records.
	pub private_access: bool,
}

impl Default for FieldOptions {
	fn default() -> Self {
		Self::exact()
	}
}

impl FieldOptions {
	/// Case-sensitive lookup without private access.
	pub fn exact() -> Self {
		Self {
			case_sensitive: true,
			private_access: false,
		}
	}

	/// Case-insensitive lookup without private access.
	pub fn folded() -> Self {
		Self {
			case_sensitive: false,
			..Self::exact()
		}
	}

	/// Same options with the private-access capability granted.
	pub fn with_private_access(self) -> Self {
		Self {
			private_access: true,
			..self
		}
	}
}

/// Record reached by stripping indirections, with its field storage.
#[derive(Clone, Copy)]
pub(crate) struct RecordRef<'a> {
	pub(crate) value: &'a Value,
	pub(crate) fields: &'a [Value],
	pub(crate) addressable: bool,
}

impl<'a> RecordRef<'a> {
	/// Field declarations paired with their current values.
	pub(crate) fn iter(self) -> impl Iterator<Item = (&'a FieldDef, &'a Value)> {
		self.value.ty().fields().iter().zip(self.fields)
	}
}

pub(crate) fn record_ref(value: &Value) -> Result<RecordRef<'_>> {
	let root = indirect(value);
	match root.value.map(|rec| (rec, rec.data())) {
		Some((rec, Data::Record(fields))) => Ok(RecordRef {
			value: rec,
			fields: fields.as_slice(),
			addressable: root.addressable,
		}),
		_ => Err(not_a_record(value)),
	}
}

pub(crate) fn not_a_record(value: &Value) -> RflError {
	RflError::TypeInvalid {
		expected: Kind::Record.as_str(),
		got: value.ty().to_string(),
	}
}

/// Read a direct field as exactly `T`.
pub fn struct_get_field<T: Reflect>(record: &Value, name: &str, opt: &FieldOptions) -> Result<T> {
	let rec = record_ref(record)?;
	let idx = locate(rec.value.ty(), name, opt)?;
	check_access(&rec.value.ty().fields()[idx], rec.addressable, opt)?;
	let stored = rec.fields.get(idx).ok_or_else(|| not_found(name))?;
	assert_as::<T>(stored, "field")
}

/// Write a direct field; the record must be reached through a pointer.
pub fn struct_set_field<T: Reflect>(record: &mut Value, name: &str, value: T, opt: &FieldOptions) -> Result<()> {
	let err = not_a_record(record);
	let root = indirect_mut(record);
	let addressable = root.addressable;
	let Some(rec) = root.value.filter(|rec| rec.kind() == Kind::Record) else {
		return Err(err);
	};

	let ty = rec.ty().clone();
	let idx = locate(&ty, name, opt)?;
	let field = &ty.fields()[idx];
	check_access(field, addressable, opt)?;
	if !addressable {
		return Err(RflError::ValueUnsettable {
			field: field.name.to_string(),
		});
	}

	let value = place(value.into_value(), &field.ty, "field")?;
	match rec.data_mut() {
		Data::Record(values) => match values.get_mut(idx) {
			Some(slot) => {
				*slot = value;
				Ok(())
			}
			None => Err(not_found(name)),
		},
		_ => Err(err),
	}
}

/// Visible field names in declaration order, optionally flattening embedded records.
///
/// When flattening, a name declared again later moves to its later position.
pub fn struct_field_names(record: &Value, flatten_embedded: bool) -> Result<Vec<String>> {
	let rec = record_ref(record)?;
	let mut names = Vec::new();
	collect_names(rec.value.ty(), flatten_embedded, &mut names);
	Ok(names)
}

fn collect_names(ty: &Type, flatten_embedded: bool, names: &mut Vec<String>) {
	for field in ty.fields() {
		if flatten_embedded && field.embedded {
			if let Some(inner) = embedded_record(&field.ty) {
				collect_names(inner, flatten_embedded, names);
				continue;
			}
		}
		if !field.visible {
			continue;
		}
		names.retain(|name| name.as_str() != field.name.as_ref());
		names.push(field.name.to_string());
	}
}

/// Record type behind any number of pointer layers.
pub(crate) fn embedded_record(ty: &Type) -> Option<&Type> {
	match ty.repr() {
		TypeRepr::Record(_) => Some(ty),
		TypeRepr::Ptr(elem) => embedded_record(elem),
		_ => None,
	}
}

/// Index of the field called `name`; folded lookups must match exactly one field.
pub(crate) fn find_field(fields: &[FieldDef], name: &str, case_sensitive: bool) -> Option<usize> {
	if case_sensitive {
		return fields.iter().position(|field| field.name.as_ref() == name);
	}

	let folded = name.to_lowercase();
	let mut hits = fields
		.iter()
		.enumerate()
		.filter(|(_, field)| field.name.to_lowercase() == folded)
		.map(|(idx, _)| idx);
	let first = hits.next()?;
	hits.next().is_none().then_some(first)
}

fn locate(ty: &Type, name: &str, opt: &FieldOptions) -> Result<usize> {
	find_field(ty.fields(), name, opt.case_sensitive).ok_or_else(|| not_found(name))
}

fn check_access(field: &FieldDef, addressable: bool, opt: &FieldOptions) -> Result<()> {
	if field.visible {
		return Ok(());
	}
	if !opt.private_access {
		return Err(RflError::PrivilegeDenied {
			field: field.name.to_string(),
		});
	}
	if !addressable {
		return Err(RflError::ValueUnaddressable {
			field: field.name.to_string(),
		});
	}
	tracing::trace!(field = %field.name, "accessing invisible field");
	Ok(())
}

fn not_found(name: &str) -> RflError {
	RflError::NotFound {
		what: "field",
		name: name.to_owned(),
	}
}

#[cfg(test)]
mod tests;
