//! Record schemas and borrowed field values
//!
//! A record type describes its fields once, in a static [`RecordSchema`], and
//! hands out borrowed [`Value`]s by field index. Everything that binds a
//! runtime field name to a record (path resolution, ordering, search, export)
//! goes through this registry instead of per-table code.
//!
//! The schema is normally generated with `#[derive(Record)]` from the
//! `crudgrid-macros` crate, but it can be written by hand:
//!
//! ```rust
//! use crudgrid_tables::record::{FieldSchema, FieldType, Record, RecordSchema, Value};
//!
//! struct Client {
//!     name: String,
//!     visits: u32,
//! }
//!
//! impl Record for Client {
//!     fn schema() -> &'static RecordSchema {
//!         static SCHEMA: RecordSchema = RecordSchema::new(
//!             "Client",
//!             &[
//!                 FieldSchema::new("Name", <String as FieldType>::KIND).with_display_name("Client Name"),
//!                 FieldSchema::new("Visits", <u32 as FieldType>::KIND),
//!             ],
//!         );
//!         &SCHEMA
//!     }
//!
//!     fn record_schema(&self) -> &'static RecordSchema {
//!         Self::schema()
//!     }
//!
//!     fn field(&self, index: usize) -> Value<'_> {
//!         match index {
//!             0 => self.name.to_value(),
//!             1 => self.visits.to_value(),
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let client = Client { name: "Ada".to_string(), visits: 3 };
//! assert_eq!(client.field(0).as_text(), Some("Ada"));
//! assert_eq!(Client::schema().field("Name").map(|(index, _)| index), Some(0));
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::borrow::Cow;
use std::fmt;

/// Broad family of a field's values
///
/// Each category maps to one native comparison in the ordering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCategory {
	/// Strings
	Text,
	/// Signed, unsigned and floating point numbers
	Number,
	/// Dates, date-times and timestamps
	Temporal,
	/// Booleans
	Boolean,
}

/// Declared type of a record field
#[derive(Clone, Copy)]
pub enum FieldKind {
	/// String data
	Text,
	/// Signed integer
	Integer,
	/// Unsigned integer
	Unsigned,
	/// Floating point number
	Float,
	/// Boolean flag
	Boolean,
	/// Calendar date
	Date,
	/// Date and time without a time zone
	DateTime,
	/// UTC timestamp
	Timestamp,
	/// Nested record, the entry point for dotted paths
	Record(fn() -> &'static RecordSchema),
	/// Collection of values
	List,
}

impl FieldKind {
	/// Returns a short, stable name for this kind
	pub fn name(&self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Integer => "integer",
			Self::Unsigned => "unsigned",
			Self::Float => "float",
			Self::Boolean => "boolean",
			Self::Date => "date",
			Self::DateTime => "datetime",
			Self::Timestamp => "timestamp",
			Self::Record(_) => "record",
			Self::List => "list",
		}
	}

	/// Returns the value category, or `None` for kinds without a total order
	pub fn category(&self) -> Option<ValueCategory> {
		match self {
			Self::Text => Some(ValueCategory::Text),
			Self::Integer | Self::Unsigned | Self::Float => Some(ValueCategory::Number),
			Self::Date | Self::DateTime | Self::Timestamp => Some(ValueCategory::Temporal),
			Self::Boolean => Some(ValueCategory::Boolean),
			Self::Record(_) | Self::List => None,
		}
	}

	/// Returns the schema of a nested record field
	pub fn nested_schema(&self) -> Option<&'static RecordSchema> {
		match self {
			Self::Record(schema) => Some(schema()),
			_ => None,
		}
	}

	/// Returns true for string fields
	pub fn is_text(&self) -> bool {
		matches!(self, Self::Text)
	}
}

impl fmt::Debug for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Record(schema) => write!(f, "Record({})", schema().type_name()),
			other => f.write_str(other.name()),
		}
	}
}

/// Static description of one record field
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
	name: &'static str,
	display_name: Option<&'static str>,
	kind: FieldKind,
}

impl FieldSchema {
	/// Creates a field description without display metadata
	pub const fn new(name: &'static str, kind: FieldKind) -> Self {
		Self {
			name,
			display_name: None,
			kind,
		}
	}

	/// Attaches the human-readable name shown in column headers
	pub const fn with_display_name(self, display_name: &'static str) -> Self {
		Self {
			name: self.name,
			display_name: Some(display_name),
			kind: self.kind,
		}
	}

	/// Returns the path segment that names this field
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns the declared display name, if any
	pub fn display_name(&self) -> Option<&'static str> {
		self.display_name
	}

	/// Returns the declared kind
	pub fn kind(&self) -> FieldKind {
		self.kind
	}
}

/// Static field registry of one record type
#[derive(Debug)]
pub struct RecordSchema {
	type_name: &'static str,
	fields: &'static [FieldSchema],
}

impl RecordSchema {
	/// Creates a schema; field indices follow the slice order
	pub const fn new(type_name: &'static str, fields: &'static [FieldSchema]) -> Self {
		Self { type_name, fields }
	}

	/// Returns the record type name used in error messages
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Returns all fields in index order
	pub fn fields(&self) -> &'static [FieldSchema] {
		self.fields
	}

	/// Looks up a field by exact, case-sensitive name
	pub fn field(&self, name: &str) -> Option<(usize, &'static FieldSchema)> {
		self.fields
			.iter()
			.enumerate()
			.find(|(_, field)| field.name == name)
	}
}

/// A record type whose fields can be addressed at runtime
pub trait Record {
	/// Returns the static schema of this type
	fn schema() -> &'static RecordSchema
	where
		Self: Sized;

	/// Returns the schema through a trait object
	fn record_schema(&self) -> &'static RecordSchema;

	/// Returns the value of the field at `index` in the schema
	///
	/// Out-of-range indices yield [`Value::Null`].
	fn field(&self, index: usize) -> Value<'_>;
}

/// A borrowed view of one field value
#[derive(Clone, Copy)]
pub enum Value<'a> {
	/// Absent value (`None`, or an absent nested record along a path)
	Null,
	/// String value
	Text(&'a str),
	/// Signed integer value
	Integer(i64),
	/// Unsigned integer value
	Unsigned(u64),
	/// Floating point value
	Float(f64),
	/// Boolean value
	Boolean(bool),
	/// Calendar date
	Date(NaiveDate),
	/// Date-time without time zone
	DateTime(NaiveDateTime),
	/// UTC timestamp
	Timestamp(DateTime<Utc>),
	/// Nested record
	Record(&'a dyn Record),
	/// A value with no scalar representation, such as a list
	Opaque,
}

impl<'a> Value<'a> {
	/// Returns true for [`Value::Null`]
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns the string slice of a text value
	pub fn as_text(&self) -> Option<&'a str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the nested record of a record value
	pub fn as_record(&self) -> Option<&'a dyn Record> {
		match self {
			Self::Record(record) => Some(*record),
			_ => None,
		}
	}
}

impl fmt::Debug for Value<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
			Self::Integer(v) => f.debug_tuple("Integer").field(v).finish(),
			Self::Unsigned(v) => f.debug_tuple("Unsigned").field(v).finish(),
			Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
			Self::Boolean(v) => f.debug_tuple("Boolean").field(v).finish(),
			Self::Date(v) => f.debug_tuple("Date").field(v).finish(),
			Self::DateTime(v) => f.debug_tuple("DateTime").field(v).finish(),
			Self::Timestamp(v) => f.debug_tuple("Timestamp").field(v).finish(),
			Self::Record(record) => f
				.debug_tuple("Record")
				.field(&record.record_schema().type_name())
				.finish(),
			Self::Opaque => f.write_str("Opaque"),
		}
	}
}

/// Renders the value as a table cell
impl fmt::Display for Value<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null | Self::Opaque => Ok(()),
			Self::Text(v) => f.write_str(v),
			Self::Integer(v) => write!(f, "{v}"),
			Self::Unsigned(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::Boolean(v) => write!(f, "{v}"),
			Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
			Self::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
			Self::Timestamp(v) => f.write_str(&v.to_rfc3339()),
			Self::Record(record) => f.write_str(record.record_schema().type_name()),
		}
	}
}

/// Rust types that can back a record field
pub trait FieldType {
	/// Declared kind of fields of this type
	const KIND: FieldKind;

	/// Borrows the value
	fn to_value(&self) -> Value<'_>;
}

impl FieldType for String {
	const KIND: FieldKind = FieldKind::Text;

	fn to_value(&self) -> Value<'_> {
		Value::Text(self.as_str())
	}
}

impl FieldType for &str {
	const KIND: FieldKind = FieldKind::Text;

	fn to_value(&self) -> Value<'_> {
		Value::Text(self)
	}
}

impl FieldType for Cow<'_, str> {
	const KIND: FieldKind = FieldKind::Text;

	fn to_value(&self) -> Value<'_> {
		Value::Text(self.as_ref())
	}
}

macro_rules! impl_signed {
	($($ty:ty),*) => {
		$(
			impl FieldType for $ty {
				const KIND: FieldKind = FieldKind::Integer;

				fn to_value(&self) -> Value<'_> {
					Value::Integer(*self as i64)
				}
			}
		)*
	};
}

macro_rules! impl_unsigned {
	($($ty:ty),*) => {
		$(
			impl FieldType for $ty {
				const KIND: FieldKind = FieldKind::Unsigned;

				fn to_value(&self) -> Value<'_> {
					Value::Unsigned(*self as u64)
				}
			}
		)*
	};
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl FieldType for f32 {
	const KIND: FieldKind = FieldKind::Float;

	fn to_value(&self) -> Value<'_> {
		Value::Float(f64::from(*self))
	}
}

impl FieldType for f64 {
	const KIND: FieldKind = FieldKind::Float;

	fn to_value(&self) -> Value<'_> {
		Value::Float(*self)
	}
}

impl FieldType for bool {
	const KIND: FieldKind = FieldKind::Boolean;

	fn to_value(&self) -> Value<'_> {
		Value::Boolean(*self)
	}
}

impl FieldType for NaiveDate {
	const KIND: FieldKind = FieldKind::Date;

	fn to_value(&self) -> Value<'_> {
		Value::Date(*self)
	}
}

impl FieldType for NaiveDateTime {
	const KIND: FieldKind = FieldKind::DateTime;

	fn to_value(&self) -> Value<'_> {
		Value::DateTime(*self)
	}
}

impl FieldType for DateTime<Utc> {
	const KIND: FieldKind = FieldKind::Timestamp;

	fn to_value(&self) -> Value<'_> {
		Value::Timestamp(*self)
	}
}

impl<T: FieldType> FieldType for Option<T> {
	const KIND: FieldKind = T::KIND;

	fn to_value(&self) -> Value<'_> {
		match self {
			Some(value) => value.to_value(),
			None => Value::Null,
		}
	}
}

impl<T: FieldType> FieldType for Box<T> {
	const KIND: FieldKind = T::KIND;

	fn to_value(&self) -> Value<'_> {
		self.as_ref().to_value()
	}
}

impl<T> FieldType for Vec<T> {
	const KIND: FieldKind = FieldKind::List;

	fn to_value(&self) -> Value<'_> {
		Value::Opaque
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;

	#[derive(Debug, Clone)]
	pub(crate) struct Address {
		pub(crate) city: String,
		pub(crate) zip: Option<u32>,
	}

	impl Record for Address {
		fn schema() -> &'static RecordSchema {
			static SCHEMA: RecordSchema = RecordSchema::new(
				"Address",
				&[
					FieldSchema::new("City", <String as FieldType>::KIND)
						.with_display_name("Home City"),
					FieldSchema::new("Zip", <Option<u32> as FieldType>::KIND),
				],
			);
			&SCHEMA
		}

		fn record_schema(&self) -> &'static RecordSchema {
			Self::schema()
		}

		fn field(&self, index: usize) -> Value<'_> {
			match index {
				0 => self.city.to_value(),
				1 => self.zip.to_value(),
				_ => Value::Null,
			}
		}
	}

	impl FieldType for Address {
		const KIND: FieldKind = FieldKind::Record(<Address as Record>::schema);

		fn to_value(&self) -> Value<'_> {
			Value::Record(self)
		}
	}

	#[derive(Debug, Clone)]
	pub(crate) struct Client {
		pub(crate) name: String,
		pub(crate) email: String,
		pub(crate) notes: Option<String>,
		pub(crate) visits: i32,
		pub(crate) rating: f64,
		pub(crate) joined: NaiveDate,
		pub(crate) address: Option<Address>,
		pub(crate) tags: Vec<String>,
	}

	impl Record for Client {
		fn schema() -> &'static RecordSchema {
			static SCHEMA: RecordSchema = RecordSchema::new(
				"Client",
				&[
					FieldSchema::new("Name", <String as FieldType>::KIND),
					FieldSchema::new("Email", <String as FieldType>::KIND)
						.with_display_name("Email Address"),
					FieldSchema::new("Notes", <Option<String> as FieldType>::KIND),
					FieldSchema::new("Visits", <i32 as FieldType>::KIND),
					FieldSchema::new("Rating", <f64 as FieldType>::KIND),
					FieldSchema::new("Joined", <NaiveDate as FieldType>::KIND)
						.with_display_name("Member Since"),
					FieldSchema::new("Address", <Option<Address> as FieldType>::KIND)
						.with_display_name("Postal Address"),
					FieldSchema::new("Tags", <Vec<String> as FieldType>::KIND),
				],
			);
			&SCHEMA
		}

		fn record_schema(&self) -> &'static RecordSchema {
			Self::schema()
		}

		fn field(&self, index: usize) -> Value<'_> {
			match index {
				0 => self.name.to_value(),
				1 => self.email.to_value(),
				2 => self.notes.to_value(),
				3 => self.visits.to_value(),
				4 => self.rating.to_value(),
				5 => self.joined.to_value(),
				6 => self.address.to_value(),
				7 => self.tags.to_value(),
				_ => Value::Null,
			}
		}
	}

	pub(crate) fn client(name: &str, email: &str, visits: i32) -> Client {
		Client {
			name: name.to_string(),
			email: email.to_string(),
			notes: None,
			visits,
			rating: 0.0,
			joined: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
			address: None,
			tags: Vec::new(),
		}
	}

	#[test]
	fn test_schema_lookup_is_case_sensitive() {
		let schema = Client::schema();
		assert_eq!(schema.type_name(), "Client");
		assert_eq!(schema.field("Email").map(|(index, _)| index), Some(1));
		assert!(schema.field("email").is_none());
	}

	#[test]
	fn test_field_kinds_and_categories() {
		let schema = Client::schema();
		let kind = |name: &str| schema.field(name).unwrap().1.kind();

		assert_eq!(kind("Name").category(), Some(ValueCategory::Text));
		assert_eq!(kind("Notes").category(), Some(ValueCategory::Text));
		assert_eq!(kind("Visits").category(), Some(ValueCategory::Number));
		assert_eq!(kind("Rating").category(), Some(ValueCategory::Number));
		assert_eq!(kind("Joined").category(), Some(ValueCategory::Temporal));
		assert_eq!(kind("Address").category(), None);
		assert_eq!(kind("Tags").category(), None);
		assert_eq!(
			kind("Address").nested_schema().map(RecordSchema::type_name),
			Some("Address")
		);
	}

	#[test]
	fn test_optional_values() {
		let mut record = client("Ada", "ada@example.com", 2);
		assert!(record.field(2).is_null());
		assert!(record.field(6).is_null());

		record.notes = Some("vip".to_string());
		record.address = Some(Address {
			city: "Paris".to_string(),
			zip: None,
		});
		assert_eq!(record.field(2).as_text(), Some("vip"));
		let address = record.field(6).as_record().unwrap();
		assert_eq!(address.field(0).as_text(), Some("Paris"));
		assert!(address.field(1).is_null());
	}

	#[test]
	fn test_out_of_range_field_is_null() {
		let record = client("Ada", "ada@example.com", 2);
		assert!(record.field(99).is_null());
	}

	#[test]
	fn test_value_display() {
		let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
		assert_eq!(Value::Text("x").to_string(), "x");
		assert_eq!(Value::Integer(-4).to_string(), "-4");
		assert_eq!(Value::Boolean(true).to_string(), "true");
		assert_eq!(Value::Date(date).to_string(), "2024-03-09");
		assert_eq!(
			Value::DateTime(date.and_hms_opt(7, 5, 0).unwrap()).to_string(),
			"2024-03-09 07:05:00"
		);
		assert_eq!(Value::Null.to_string(), "");
		assert_eq!(Value::Opaque.to_string(), "");
	}
}
