use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, RflError>;

/// Errors produced while inspecting, converting, and mutating dynamic values.
#[derive(Debug, Error)]
pub enum RflError {
	/// Operation requires a structural kind the input does not have.
	#[error("type invalid: require {expected} (got {got})")]
	TypeInvalid {
		/// Required kind label.
		expected: &'static str,
		/// Actual type of the input.
		got: String,
	},
	/// Concrete value type is incompatible with the requested or declared type.
	#[error("type unmatched: {context} type is {got} (expect {expected})")]
	TypeUnmatched {
		/// Which part of the operation mismatched (`key`, `value`, `item`, `field`).
		context: &'static str,
		/// Actual type seen.
		got: String,
		/// Type that was required.
		expected: String,
	},
	/// Named lookup found no unique match.
	#[error("not found: {what} '{name}'")]
	NotFound {
		/// Lookup category (`key`, `field`, `tag`, `type`).
		what: &'static str,
		/// Requested name or rendered key.
		name: String,
	},
	/// Invisible field accessed through a non-addressable record.
	#[error("value unaddressable: accessing invisible field '{field}' requires an addressable record")]
	ValueUnaddressable {
		/// Field name.
		field: String,
	},
	/// Field located but the handle path to it forbids mutation.
	#[error("value unsettable: field '{field}' is not reached through an addressable record")]
	ValueUnsettable {
		/// Field name.
		field: String,
	},
	/// Sequence index outside `[0, len)`.
	#[error("index out of range: index={index}, len={len}")]
	IndexOutOfRange {
		/// Requested index.
		index: usize,
		/// Sequence length.
		len: usize,
	},
	/// Invisible field accessed without the private-access capability.
	#[error("privilege denied: field '{field}' is invisible and private access is disabled")]
	PrivilegeDenied {
		/// Field name.
		field: String,
	},
	/// Catalog already holds a type with this name.
	#[error("duplicate type: {name}")]
	DuplicateType {
		/// Duplicated type name.
		name: String,
	},
	/// Record declares the same field name twice.
	#[error("duplicate field {field} on {record}")]
	DuplicateField {
		/// Record type name.
		record: String,
		/// Duplicated field name.
		field: String,
	},
	/// Type expression syntax is invalid.
	#[error("invalid type expression: {expr}")]
	InvalidTypeExpr {
		/// Original expression text.
		expr: String,
	},
	/// Schema document could not be decoded.
	#[error("schema: {0}")]
	Schema(#[from] serde_json::Error),
}

impl RflError {
	pub(crate) fn unmatched(context: &'static str, got: impl ToString, expected: impl ToString) -> Self {
		Self::TypeUnmatched {
			context,
			got: got.to_string(),
			expected: expected.to_string(),
		}
	}
}
