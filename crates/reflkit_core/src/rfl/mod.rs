mod catalog;
mod convert;
mod error;
mod flatten;
mod json;
mod kind;
mod map;
mod record;
mod reflect;
mod seq;
mod tag;
mod ty;
mod value;

/// Named type registry and schema loading.
pub use catalog::TypeCatalog;
/// Type reconciler and strict type assertion.
pub use convert::{assert_as, value_as};
/// Error and result aliases.
pub use error::{Result, RflError};
/// Record-to-map projections.
pub use flatten::{struct_to_map, struct_to_map_keyed};
/// Kind classification and indirection stripping.
pub use kind::{Indirect, IndirectMut, Kind, indirect, indirect_mut, is_kind_in};
/// Map accessors.
pub use map::{map_as, map_delete, map_entries, map_get, map_keys, map_len, map_set};
/// Record field accessors and lookup options.
pub use record::{FieldOptions, struct_field_names, struct_get_field, struct_set_field};
/// Native types with a static descriptor.
pub use reflect::Reflect;
/// Sequence and array accessors.
pub use seq::{seq_append, seq_as, seq_get, seq_get_all, seq_len, seq_set, seq_values_as};
/// Field tag parsing.
pub use tag::{Tag, parse_tag, parse_tag_of, parse_tags_of};
/// Type descriptors and record builders.
pub use ty::{FieldDef, RecordBuilder, Type, TypeRepr};
/// Dynamic values.
pub use value::{MapEntry, Value};
