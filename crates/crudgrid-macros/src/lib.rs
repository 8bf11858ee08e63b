//! Procedural macros for crudgrid
//!
//! Provides `#[derive(Record)]`, which generates the static field schema and
//! indexed field access a type needs to be used as a table record.
//!
//! ## Attributes
//!
//! Container attributes:
//! - `#[record(name = "...")]` sets the type name used in error messages
//! - `#[record(rename_all = "...")]` renames every field; one of
//!   `PascalCase`, `camelCase`, `snake_case`, `kebab-case`
//!
//! Field attributes:
//! - `#[record(rename = "...")]` sets the path segment naming the field
//! - `#[record(display = "...")]` sets the title shown in column headers
//! - `#[record(skip)]` leaves the field out of the schema
//!
//! # Examples
//!
//! ```rust,ignore
//! #[derive(Record)]
//! #[record(rename_all = "PascalCase")]
//! struct Client {
//!     name: String,                       // -> "Name"
//!     #[record(display = "Email Address")]
//!     email: String,                      // -> "Email"
//!     address: Option<Address>,           // -> "Address", nested record
//!     #[record(skip)]
//!     password_hash: String,
//! }
//!
//! #[derive(Record)]
//! struct Address {
//!     #[record(rename = "City", display = "Home City")]
//!     city: String,
//! }
//! ```
//!
//! Every non-skipped field type must implement `FieldType`. The derive also
//! implements `FieldType` for the type itself, so a record can be nested in
//! another one.

mod crate_paths;
mod record_derive;

use proc_macro::TokenStream;

/// Derive `Record` and `FieldType` for a struct with named fields.
///
/// Generic structs, tuple structs and enums are rejected.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
	record_derive::derive(input)
}
