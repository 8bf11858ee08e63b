//! Static column declarations

use serde::{Deserialize, Serialize};

fn enabled() -> bool {
	true
}

/// Declaration of one table column
///
/// The title is a field name or a dotted path on the record type. It doubles
/// as the stable key used in sort tokens; the header shown to users is
/// resolved from the field's display name.
///
/// # Example
///
/// ```rust
/// use crudgrid_tables::column::ColumnDescriptor;
///
/// let notes = ColumnDescriptor::new("Notes").sortable(false);
/// assert_eq!(notes.title(), "Notes");
/// assert!(!notes.is_sortable());
/// assert!(notes.is_exportable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
	title: String,
	#[serde(default = "enabled")]
	sortable: bool,
	#[serde(default = "enabled")]
	exportable: bool,
}

impl ColumnDescriptor {
	/// Creates a sortable, exportable column for `path`
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			title: path.into(),
			sortable: true,
			exportable: true,
		}
	}

	/// Sets whether this column can be sorted
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets whether this column is included in exports
	pub fn exportable(mut self, exportable: bool) -> Self {
		self.exportable = exportable;
		self
	}

	/// Returns the field path
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Returns whether this column can be sorted
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Returns whether this column is included in exports
	pub fn is_exportable(&self) -> bool {
		self.exportable
	}
}
