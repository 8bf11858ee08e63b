//! Table settings loaded from TOML
//!
//! ```toml
//! default_sort = "Name-asc"
//! default_page_size = 25
//! search_fields = ["Name", "Email"]
//! case_insensitive_search = true
//!
//! [[columns]]
//! title = "Name"
//!
//! [[columns]]
//! title = "Notes"
//! sortable = false
//! ```

use crate::column::ColumnDescriptor;
use crate::error::Result;
use crate::search::CaseSensitivity;
use crate::table::TableConfig;
use serde::{Deserialize, Serialize};

fn default_page_size() -> i32 {
	10
}

/// Serializable form of a [`TableConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSettings {
	/// Default sort token
	pub default_sort: String,
	/// Page size used when a request names none
	#[serde(default = "default_page_size")]
	pub default_page_size: i32,
	/// Searchable field paths
	#[serde(default)]
	pub search_fields: Vec<String>,
	/// Whether search ignores case
	#[serde(default)]
	pub case_insensitive_search: bool,
	/// Columns in display order
	#[serde(default)]
	pub columns: Vec<ColumnDescriptor>,
}

impl TableSettings {
	/// Parses settings from a TOML document
	///
	/// # Errors
	///
	/// Returns [`TableError::Settings`](crate::TableError::Settings) when the
	/// document is not valid TOML or does not match the settings layout.
	pub fn from_toml_str(content: &str) -> Result<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Converts the settings into a configuration for records of type `T`
	///
	/// Paths are not checked here; [`Table::new`](crate::Table::new) does that.
	pub fn into_config<T>(self) -> TableConfig<T> {
		let case = if self.case_insensitive_search {
			CaseSensitivity::Insensitive
		} else {
			CaseSensitivity::Sensitive
		};
		TableConfig::new(self.default_sort)
			.columns(self.columns)
			.search_fields(self.search_fields)
			.default_page_size(self.default_page_size)
			.case_sensitivity(case)
	}
}
