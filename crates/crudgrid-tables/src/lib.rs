//! Metadata-driven data tables
//!
//! This crate turns a record type and a list of column declarations into
//! render-ready column headers, and orders, searches and paginates record
//! sequences by field names chosen at runtime.
//!
//! # Features
//!
//! - **Record schemas**: static per-type field registries, usually generated
//!   with `#[derive(Record)]`
//! - **Property paths**: dotted field paths (`Address.City`) compiled once into
//!   composed accessors
//! - **Column headers**: titles from field display names, with click-to-toggle
//!   sort actions
//! - **Ordering**: stable, lazy ordering by runtime sort tokens (`Name-asc`)
//! - **Search**: literal substring search over declared text fields
//! - **Pagination**: page-size menus and lazy page selection
//! - **Export**: CSV and JSON export of exportable columns (requires `export`
//!   feature)
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[TableConfig] --> B[Table]
//!     B --> C[ResolvedPath]
//!     B --> D[OrderingPlan]
//!     B --> E[SearchFilter]
//!     B --> F[ColumnHeader]
//!     C --> G[RecordSchema]
//!     D --> C
//!     E --> C
//!     H[TableRegistry] --> B
//!     I[TableSettings] --> A
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use crudgrid_tables::{ColumnDescriptor, Record, Table, TableConfig, TableQuery};
//!
//! #[derive(Record)]
//! struct Client {
//!     #[record(rename = "Name")]
//!     name: String,
//!     #[record(rename = "Email", display = "Email Address")]
//!     email: String,
//! }
//!
//! let table = Table::new(
//!     TableConfig::<Client>::new("Name-asc")
//!         .column(ColumnDescriptor::new("Name"))
//!         .column(ColumnDescriptor::new("Email"))
//!         .search_field("Email"),
//! )?;
//!
//! let headers = table.headers("Name-asc");
//! let page: Vec<&Client> = table
//!     .query(&clients, &TableQuery::new().with_search("example.com"))
//!     .collect();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
#[cfg(feature = "export")]
mod export;
pub mod ordering;
pub mod pagination;
pub mod path;
pub mod record;
pub mod registry;
pub mod search;
pub mod settings;
pub mod sort;
pub mod table;

// Re-exports for convenience
pub use column::{
	ColumnDescriptor, ColumnHeader, generate_column_headers, resolve_column_headers,
};
pub use error::{Result, TableError};
pub use ordering::{Ordered, OrderingPlan, order_records};
pub use pagination::{PageInfo, PageSize, PageSizeOption, page_size_options, paginate};
pub use path::{Accessor, ResolvedPath, resolve_path};
pub use record::{FieldKind, FieldSchema, FieldType, Record, RecordSchema, Value, ValueCategory};
pub use registry::{TableRegistry, TableRegistryBuilder};
pub use search::{CaseSensitivity, SearchFilter, Searched};
pub use settings::TableSettings;
pub use sort::{SortDirection, SortToken};
pub use table::{QueryPage, Table, TableConfig, TableQuery};
