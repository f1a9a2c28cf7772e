use std::collections::HashMap;

use crate::rfl::record::{find_field, record_ref};
use crate::rfl::{FieldDef, Result, RflError, Value};

/// Parsed field tag such as `json:"name,omitempty"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
	/// First tag segment.
	pub name: String,
	/// Name of the field carrying the tag.
	pub field_name: String,
	/// Whether the name is `-`.
	pub ignored: bool,
	/// Remaining segments; presence-only attributes map to an empty string.
	pub attrs: HashMap<String, String>,
}

impl Tag {
	/// Attribute value, if present.
	pub fn get_attr(&self, key: &str) -> Option<&str> {
		self.attrs.get(key).map(String::as_str)
	}

	/// Attribute value, or `default` when absent.
	pub fn get_attr_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
		self.get_attr(key).unwrap_or(default)
	}

	/// Whether the attribute is present, with or without a value.
	pub fn has_attr(&self, key: &str) -> bool {
		self.attrs.contains_key(key)
	}
}

/// Parse the tag stored under `tag_name` on `field`, splitting segments on `delim`.
///
/// An empty `delim` splits after each character, so the first character is the name.
pub fn parse_tag(field: &FieldDef, tag_name: &str, delim: &str) -> Result<Tag> {
	let raw = field.lookup_tag(tag_name).ok_or_else(|| RflError::NotFound {
		what: "tag",
		name: tag_name.to_owned(),
	})?;

	let segments = if delim.is_empty() {
		raw.char_indices().map(|(at, ch)| &raw[at..at + ch.len_utf8()]).collect::<Vec<_>>()
	} else {
		raw.split(delim).collect()
	};
	let (name, rest) = segments.split_first().map_or(("", &[][..]), |(name, rest)| (*name, rest));
	let name = name.to_owned();

	let mut attrs = HashMap::new();
	for &segment in rest {
		let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
		attrs.insert(key.to_owned(), value.to_owned());
	}

	Ok(Tag {
		ignored: name == "-",
		name,
		field_name: field.name.to_string(),
		attrs,
	})
}

/// Parse the tag of the direct field `field_name` on a record value.
pub fn parse_tag_of(record: &Value, field_name: &str, tag_name: &str, delim: &str) -> Result<Tag> {
	let rec = record_ref(record)?;
	let fields = rec.value.ty().fields();
	let idx = find_field(fields, field_name, true).ok_or_else(|| RflError::NotFound {
		what: "field",
		name: field_name.to_owned(),
	})?;
	parse_tag(&fields[idx], tag_name, delim)
}

/// Parse the tags of every field on a record value, skipping fields without one.
pub fn parse_tags_of(record: &Value, tag_name: &str, delim: &str) -> Result<Vec<Tag>> {
	let rec = record_ref(record)?;
	rec.value
		.ty()
		.fields()
		.iter()
		.filter(|field| field.lookup_tag(tag_name).is_some())
		.map(|field| parse_tag(field, tag_name, delim))
		.collect()
}
