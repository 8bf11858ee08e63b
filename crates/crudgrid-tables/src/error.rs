//! Error types for table configuration and evaluation

use thiserror::Error;

/// Errors raised while configuring or evaluating a table
///
/// `FieldNotFound`, `UnorderableField` and `InvalidConfig` are configuration
/// errors: they surface when a [`Table`](crate::Table) is constructed, so a
/// misdeclared column fails at startup instead of on the first request.
#[derive(Debug, Error)]
pub enum TableError {
	/// A path segment does not name a field of the type it is applied to
	#[error("field `{segment}` not found on `{type_name}`")]
	FieldNotFound {
		/// The record (or scalar kind) the segment was looked up on
		type_name: String,
		/// The segment that failed to resolve
		segment: String,
	},

	/// The resolved field has no total order
	#[error("field `{path}` of kind `{kind}` cannot be ordered")]
	UnorderableField {
		/// The full dotted path
		path: String,
		/// Name of the field kind
		kind: &'static str,
	},

	/// A sort token could not be parsed
	#[error("malformed sort token: {0:?}")]
	MalformedSortToken(String),

	/// The table configuration is inconsistent
	#[error("invalid table configuration: {0}")]
	InvalidConfig(String),

	/// A settings document could not be parsed
	#[error("failed to parse table settings: {0}")]
	Settings(#[from] toml::de::Error),

	/// Writing CSV output failed
	#[cfg(feature = "export")]
	#[error("CSV export failed: {0}")]
	Csv(#[from] csv::Error),

	/// Flushing export output failed
	#[cfg(feature = "export")]
	#[error("export I/O failed: {0}")]
	Io(#[from] std::io::Error),

	/// Building JSON output failed
	#[cfg(feature = "export")]
	#[error("JSON export failed: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;
