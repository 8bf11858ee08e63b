//! # Crudgrid
//!
//! Metadata-driven data tables for Rust.
//!
//! Crudgrid turns a record type and a declarative list of columns into
//! render-ready headers, and orders, searches and paginates record sequences
//! by field names supplied at runtime. Field names are bound to typed
//! accessors once, when a table is configured, so a misdeclared column fails
//! at startup rather than on the first request.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `macros` - `#[derive(Record)]`
//! - `export` - CSV and JSON export of exportable columns
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use crudgrid::prelude::*;
//!
//! #[derive(Record)]
//! #[record(rename_all = "PascalCase")]
//! struct Client {
//!     name: String,
//!     #[record(display = "Email Address")]
//!     email: String,
//!     notes: Option<String>,
//! }
//!
//! let registry = TableRegistry::builder()
//!     .register(
//!         TableConfig::<Client>::new("Name-asc")
//!             .column(ColumnDescriptor::new("Name"))
//!             .column(ColumnDescriptor::new("Email"))
//!             .column(ColumnDescriptor::new("Notes").sortable(false))
//!             .search_fields(["Name", "Email", "Notes"]),
//!     )?
//!     .build();
//!
//! let table = registry.table::<Client>().unwrap();
//! let headers = table.headers("Name-asc");
//! let rows: Vec<&Client> = table
//!     .query(&clients, &TableQuery::new().with_sort("Email-desc"))
//!     .collect();
//! ```

pub use crudgrid_tables as tables;

#[cfg(feature = "macros")]
pub use crudgrid_macros::Record;

pub use crudgrid_tables::{
	CaseSensitivity, ColumnDescriptor, ColumnHeader, PageInfo, PageSize, PageSizeOption, Record,
	Result, SortDirection, SortToken, Table, TableConfig, TableError, TableQuery, TableRegistry,
	TableSettings,
};

/// Commonly used types and traits
pub mod prelude {
	pub use crate::{
		CaseSensitivity, ColumnDescriptor, ColumnHeader, PageSize, SortDirection, SortToken, Table,
		TableConfig, TableError, TableQuery, TableRegistry, TableSettings,
	};
	pub use crudgrid_tables::record::{FieldType, Record, Value};

	#[cfg(feature = "macros")]
	pub use crudgrid_macros::Record;
}
