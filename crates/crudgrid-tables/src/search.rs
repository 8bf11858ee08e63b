//! Search predicate composition
//!
//! A [`SearchFilter`] holds the resolved text fields a table declares as
//! searchable. Applied to a query it keeps every record where at least one of
//! those fields contains the query as a literal substring.

use crate::path::{ResolvedPath, resolve_path};
use crate::record::{Record, Value};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// How query text is compared against field values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseSensitivity {
	/// Ordinal comparison
	#[default]
	Sensitive,
	/// Both sides are lowercased before comparison
	Insensitive,
}

impl CaseSensitivity {
	fn normalize(self, text: &str) -> String {
		match self {
			Self::Sensitive => text.to_string(),
			Self::Insensitive => text.to_lowercase(),
		}
	}

	fn contains(self, haystack: &str, needle: &str) -> bool {
		match self {
			Self::Sensitive => haystack.contains(needle),
			Self::Insensitive => haystack.to_lowercase().contains(needle),
		}
	}
}

/// Disjunction of substring tests over the searchable fields of `T`
pub struct SearchFilter<T> {
	fields: Vec<ResolvedPath<T>>,
	case: CaseSensitivity,
}

impl<T: Record> SearchFilter<T> {
	/// Builds a filter over the given field paths
	///
	/// Paths that do not resolve, or resolve to a non-text field, are left out
	/// with a warning instead of failing the table.
	pub fn new<S: AsRef<str>>(paths: &[S], case: CaseSensitivity) -> Self {
		let fields = paths
			.iter()
			.filter_map(|path| {
				let path = path.as_ref();
				match resolve_path::<T>(path) {
					Ok(resolved) if resolved.kind().is_text() => Some(resolved),
					Ok(resolved) => {
						tracing::warn!(
							path,
							kind = resolved.kind().name(),
							"excluding non-text search field"
						);
						None
					}
					Err(err) => {
						tracing::warn!(path, error = %err, "excluding unresolved search field");
						None
					}
				}
			})
			.collect();
		Self { fields, case }
	}

	/// Returns the paths that take part in matching
	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(ResolvedPath::path)
	}

	/// Returns the configured case sensitivity
	pub fn case_sensitivity(&self) -> CaseSensitivity {
		self.case
	}

	/// Returns true when `record` matches `query`
	///
	/// A blank query matches everything. Absent values never match.
	pub fn matches(&self, record: &T, query: &str) -> bool {
		let query = query.trim();
		if query.is_empty() {
			return true;
		}
		self.matches_needle(record, &self.case.normalize(query))
	}

	fn matches_needle(&self, record: &T, needle: &str) -> bool {
		self.fields.iter().any(|field| match field.get(record) {
			Value::Text(text) => self.case.contains(text, needle),
			_ => false,
		})
	}

	/// Filters a record sequence lazily
	///
	/// # Examples
	///
	/// ```rust
	/// # use crudgrid_tables::record::{FieldSchema, FieldType, Record, RecordSchema, Value};
	/// # struct Client { name: String, email: String }
	/// # impl Record for Client {
	/// #     fn schema() -> &'static RecordSchema {
	/// #         static SCHEMA: RecordSchema = RecordSchema::new("Client", &[
	/// #             FieldSchema::new("Name", <String as FieldType>::KIND),
	/// #             FieldSchema::new("Email", <String as FieldType>::KIND),
	/// #         ]);
	/// #         &SCHEMA
	/// #     }
	/// #     fn record_schema(&self) -> &'static RecordSchema { Self::schema() }
	/// #     fn field(&self, index: usize) -> Value<'_> {
	/// #         match index { 0 => self.name.to_value(), 1 => self.email.to_value(), _ => Value::Null }
	/// #     }
	/// # }
	/// use crudgrid_tables::search::{CaseSensitivity, SearchFilter};
	///
	/// let clients = vec![
	///     Client { name: "Ada".into(), email: "ada@x.io".into() },
	///     Client { name: "Bob".into(), email: "bob@y.io".into() },
	/// ];
	/// let filter = SearchFilter::<Client>::new(&["Name", "Email"], CaseSensitivity::Sensitive);
	/// let hits: Vec<_> = filter.apply(&clients, "y.io").map(|c| c.name.as_str()).collect();
	/// assert_eq!(hits, ["Bob"]);
	/// ```
	pub fn apply<I>(&self, records: I, query: &str) -> Searched<I::IntoIter, T>
	where
		I: IntoIterator,
		I::Item: Borrow<T>,
	{
		let query = query.trim();
		let needle = (!query.is_empty()).then(|| self.case.normalize(query));
		Searched {
			source: records.into_iter(),
			filter: self.clone(),
			needle,
		}
	}
}

impl<T> Clone for SearchFilter<T> {
	fn clone(&self) -> Self {
		Self {
			fields: self.fields.clone(),
			case: self.case,
		}
	}
}

impl<T> fmt::Debug for SearchFilter<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SearchFilter")
			.field("fields", &self.fields)
			.field("case", &self.case)
			.finish()
	}
}

/// Lazily filtered record sequence produced by [`SearchFilter::apply`]
pub struct Searched<I, T> {
	source: I,
	filter: SearchFilter<T>,
	needle: Option<String>,
}

impl<I, T> Iterator for Searched<I, T>
where
	I: Iterator,
	I::Item: Borrow<T>,
	T: Record,
{
	type Item = I::Item;

	fn next(&mut self) -> Option<Self::Item> {
		let Some(needle) = self.needle.as_deref() else {
			return self.source.next();
		};
		let filter = &self.filter;
		self.source
			.find(|record| filter.matches_needle(record.borrow(), needle))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		match self.needle {
			None => self.source.size_hint(),
			Some(_) => (0, self.source.size_hint().1),
		}
	}
}

impl<I, T> fmt::Debug for Searched<I, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Searched")
			.field("filter", &self.filter)
			.field("needle", &self.needle)
			.finish_non_exhaustive()
	}
}
