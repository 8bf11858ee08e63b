//! Property path resolution
//!
//! A path is a dotted chain of field names (`"Address.City"`). Resolution walks
//! the static schemas once, validates every segment, and composes the chain of
//! field lookups into a single accessor. Evaluating the accessor afterwards is
//! a sequence of indexed field reads; no string is looked at per record.

use crate::error::{Result, TableError};
use crate::record::{FieldKind, Record, RecordSchema, Value};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type Getter = Arc<dyn for<'a> Fn(&'a dyn Record) -> Value<'a> + Send + Sync>;

fn getter<F>(f: F) -> Getter
where
	F: for<'a> Fn(&'a dyn Record) -> Value<'a> + Send + Sync + 'static,
{
	Arc::new(f)
}

/// Composes field reads along `indices` into one function
///
/// A non-record value met before the last index (an absent optional nested
/// record) short-circuits to [`Value::Null`].
fn compose(indices: &[usize]) -> Getter {
	match indices {
		[] => getter(|_| Value::Null),
		[index] => {
			let index = *index;
			getter(move |record| record.field(index))
		}
		[index, rest @ ..] => {
			let index = *index;
			let inner = compose(rest);
			getter(move |record| match record.field(index) {
				Value::Record(nested) => inner(nested),
				_ => Value::Null,
			})
		}
	}
}

/// Typed accessor for a resolved path on records of type `T`
pub struct Accessor<T> {
	getter: Getter,
	_record: PhantomData<fn(&T)>,
}

impl<T: Record> Accessor<T> {
	/// Reads the value at the end of the path
	pub fn get<'a>(&self, record: &'a T) -> Value<'a> {
		(self.getter)(record)
	}
}

impl<T> Clone for Accessor<T> {
	fn clone(&self) -> Self {
		Self {
			getter: Arc::clone(&self.getter),
			_record: PhantomData,
		}
	}
}

impl<T> fmt::Debug for Accessor<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Accessor").finish_non_exhaustive()
	}
}

/// A validated path together with its accessor and leaf metadata
pub struct ResolvedPath<T> {
	path: String,
	kind: FieldKind,
	display_name: Option<&'static str>,
	accessor: Accessor<T>,
}

impl<T: Record> ResolvedPath<T> {
	/// Returns the original dotted path
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the kind of the final field
	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	/// Returns the display name declared on the final field
	///
	/// Display names declared on intermediate fields are not consulted.
	pub fn display_name(&self) -> Option<&'static str> {
		self.display_name
	}

	/// Returns the display name, falling back to the raw path
	pub fn title(&self) -> String {
		self.display_name
			.map(str::to_string)
			.unwrap_or_else(|| self.path.clone())
	}

	/// Returns the composed accessor
	pub fn accessor(&self) -> &Accessor<T> {
		&self.accessor
	}

	/// Reads the value at the end of the path
	pub fn get<'a>(&self, record: &'a T) -> Value<'a> {
		self.accessor.get(record)
	}
}

impl<T> Clone for ResolvedPath<T> {
	fn clone(&self) -> Self {
		Self {
			path: self.path.clone(),
			kind: self.kind,
			display_name: self.display_name,
			accessor: self.accessor.clone(),
		}
	}
}

impl<T> fmt::Debug for ResolvedPath<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResolvedPath")
			.field("path", &self.path)
			.field("kind", &self.kind)
			.field("display_name", &self.display_name)
			.finish_non_exhaustive()
	}
}

/// Resolves a dotted path against the schema of `T`
///
/// # Errors
///
/// Returns [`TableError::FieldNotFound`] when a segment is empty, does not name
/// a field, or follows a field that is not a nested record.
///
/// # Examples
///
/// ```rust
/// # use crudgrid_tables::record::{FieldSchema, FieldType, Record, RecordSchema, Value};
/// # struct Client { name: String }
/// # impl Record for Client {
/// #     fn schema() -> &'static RecordSchema {
/// #         static SCHEMA: RecordSchema = RecordSchema::new(
/// #             "Client",
/// #             &[FieldSchema::new("Name", <String as FieldType>::KIND).with_display_name("Client Name")],
/// #         );
/// #         &SCHEMA
/// #     }
/// #     fn record_schema(&self) -> &'static RecordSchema { Self::schema() }
/// #     fn field(&self, index: usize) -> Value<'_> {
/// #         if index == 0 { self.name.to_value() } else { Value::Null }
/// #     }
/// # }
/// use crudgrid_tables::path::resolve_path;
///
/// let name = resolve_path::<Client>("Name").unwrap();
/// assert_eq!(name.display_name(), Some("Client Name"));
///
/// let client = Client { name: "Ada".to_string() };
/// assert_eq!(name.get(&client).as_text(), Some("Ada"));
///
/// assert!(resolve_path::<Client>("Missing").is_err());
/// ```
pub fn resolve_path<T: Record>(path: &str) -> Result<ResolvedPath<T>> {
	let mut schema: &'static RecordSchema = T::schema();
	let mut indices = Vec::new();
	let mut leaf = None;

	for segment in path.split('.') {
		if let Some((_, kind)) = leaf {
			// The previous segment must open a nested record
			schema = match FieldKind::nested_schema(&kind) {
				Some(nested) => nested,
				None => {
					return Err(TableError::FieldNotFound {
						type_name: FieldKind::name(&kind).to_string(),
						segment: segment.to_string(),
					});
				}
			};
		}

		let (index, field) = schema
			.field(segment)
			.ok_or_else(|| TableError::FieldNotFound {
				type_name: schema.type_name().to_string(),
				segment: segment.to_string(),
			})?;

		indices.push(index);
		leaf = Some((field.display_name(), field.kind()));
	}

	let (display_name, kind) = leaf.ok_or_else(|| TableError::FieldNotFound {
		type_name: schema.type_name().to_string(),
		segment: path.to_string(),
	})?;

	Ok(ResolvedPath {
		path: path.to_string(),
		kind,
		display_name,
		accessor: Accessor {
			getter: compose(&indices),
			_record: PhantomData,
		},
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::tests::{Address, Client, client};
	use rstest::rstest;

	#[rstest]
	#[case("Name", None)]
	#[case("Email", Some("Email Address"))]
	#[case("Address", Some("Postal Address"))]
	#[case("Address.City", Some("Home City"))]
	#[case("Address.Zip", None)]
	fn test_display_name_comes_from_leaf(#[case] path: &str, #[case] expected: Option<&str>) {
		let resolved = resolve_path::<Client>(path).unwrap();
		assert_eq!(resolved.display_name(), expected);
		assert_eq!(resolved.path(), path);
	}

	#[test]
	fn test_title_falls_back_to_path() {
		assert_eq!(resolve_path::<Client>("Name").unwrap().title(), "Name");
		assert_eq!(resolve_path::<Client>("Address.Zip").unwrap().title(), "Address.Zip");
		assert_eq!(resolve_path::<Client>("Address.City").unwrap().title(), "Home City");
	}

	#[test]
	fn test_single_segment_accessor() {
		let record = client("Ada", "ada@example.com", 4);
		let visits = resolve_path::<Client>("Visits").unwrap();
		assert!(matches!(visits.get(&record), Value::Integer(4)));
	}

	#[test]
	fn test_nested_accessor() {
		let mut record = client("Ada", "ada@example.com", 4);
		let city = resolve_path::<Client>("Address.City").unwrap();
		assert!(city.get(&record).is_null());

		record.address = Some(Address {
			city: "Lyon".to_string(),
			zip: Some(69001),
		});
		assert_eq!(city.get(&record).as_text(), Some("Lyon"));

		let zip = resolve_path::<Client>("Address.Zip").unwrap();
		assert!(matches!(zip.get(&record), Value::Unsigned(69001)));
	}

	#[test]
	fn test_unknown_field() {
		let err = resolve_path::<Client>("Phone").unwrap_err();
		match err {
			TableError::FieldNotFound { type_name, segment } => {
				assert_eq!(type_name, "Client");
				assert_eq!(segment, "Phone");
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[test]
	fn test_unknown_nested_field() {
		let err = resolve_path::<Client>("Address.Street").unwrap_err();
		assert!(matches!(
			err,
			TableError::FieldNotFound { ref type_name, ref segment }
				if type_name == "Address" && segment == "Street"
		));
	}

	#[test]
	fn test_segment_after_scalar() {
		let err = resolve_path::<Client>("Name.Length").unwrap_err();
		assert!(matches!(
			err,
			TableError::FieldNotFound { ref type_name, ref segment }
				if type_name == "text" && segment == "Length"
		));
	}

	#[rstest]
	#[case("")]
	#[case("Address.")]
	#[case(".Name")]
	#[case("Address..City")]
	fn test_empty_segments_are_rejected(#[case] path: &str) {
		assert!(matches!(
			resolve_path::<Client>(path),
			Err(TableError::FieldNotFound { .. })
		));
	}

	#[test]
	fn test_case_sensitive_segments() {
		assert!(resolve_path::<Client>("name").is_err());
		assert!(resolve_path::<Client>("address.City").is_err());
	}
}
