use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::rfl::Value;
use crate::rfl::value::Data;

/// JSON inspection view: nil is `null`, maps become objects with stringified
/// keys sorted by label, and records expose their visible fields.
impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self.data() {
			Data::Bool(value) => serializer.serialize_bool(*value),
			Data::Int(value) => serializer.serialize_i64(*value),
			Data::Uint(value) => serializer.serialize_u64(*value),
			Data::Float(value) => serializer.serialize_f64(*value),
			Data::String(value) => serializer.serialize_str(value),
			Data::Seq(items) => serializer.collect_seq(items),
			Data::Map(entries) => {
				let mut labeled = entries.iter().map(|(key, value)| (key_label(key), value)).collect::<Vec<_>>();
				labeled.sort_by(|left, right| left.0.cmp(&right.0));
				let mut map = serializer.serialize_map(Some(labeled.len()))?;
				for (key, value) in labeled {
					map.serialize_entry(&key, value)?;
				}
				map.end()
			}
			Data::Record(values) => {
				let fields = self.ty().fields();
				let mut map = serializer.serialize_map(None)?;
				for (def, value) in fields.iter().zip(values) {
					if def.visible {
						map.serialize_entry(def.name.as_ref(), value)?;
					}
				}
				map.end()
			}
			Data::Ptr(inner) | Data::Dynamic(inner) => match inner {
				Some(inner) => inner.serialize(serializer),
				None => serializer.serialize_none(),
			},
		}
	}
}

fn key_label(key: &Value) -> String {
	match key.concrete().map(Value::data) {
		Some(Data::String(text)) => text.clone(),
		Some(Data::Bool(value)) => value.to_string(),
		Some(Data::Int(value)) => value.to_string(),
		Some(Data::Uint(value)) => value.to_string(),
		Some(Data::Float(value)) => value.to_string(),
		Some(_) => serde_json::to_string(key).unwrap_or_else(|_| key.ty().to_string()),
		None => "null".to_owned(),
	}
}
