//! Column descriptors and render-facing headers

pub mod descriptor;
pub mod header;

pub use descriptor::ColumnDescriptor;
pub use header::{ColumnHeader, generate_column_headers, resolve_column_headers};
