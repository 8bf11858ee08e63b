//! Dynamic ordering engine
//!
//! A runtime sort token is compiled into an [`OrderingPlan`]: a resolved path
//! plus the native comparison for the category of the leaf field. Plans are
//! applied to record sequences through [`Ordered`], a lazy adapter that
//! leaves the source untouched until the first element is requested.

use crate::error::{Result, TableError};
use crate::path::{ResolvedPath, resolve_path};
use crate::record::{FieldKind, Record, Value, ValueCategory};
use crate::sort::{SortDirection, SortToken};
use chrono::NaiveDateTime;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::vec;

/// Native comparison between two values of one category
pub type Comparator = fn(&Value<'_>, &Value<'_>) -> Ordering;

/// Returns the comparison for a field kind, or `None` when the kind has no
/// total order
pub fn comparator_for(kind: &FieldKind) -> Option<Comparator> {
	let comparator: Comparator = match kind.category()? {
		ValueCategory::Text => compare_text,
		ValueCategory::Number => compare_number,
		ValueCategory::Temporal => compare_temporal,
		ValueCategory::Boolean => compare_boolean,
	};
	Some(comparator)
}

/// Orders nulls first, then defers to `compare` for two present values
fn with_nulls_first(a: &Value<'_>, b: &Value<'_>, compare: Comparator) -> Ordering {
	match (a.is_null(), b.is_null()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Less,
		(false, true) => Ordering::Greater,
		(false, false) => compare(a, b),
	}
}

fn compare_text(a: &Value<'_>, b: &Value<'_>) -> Ordering {
	with_nulls_first(a, b, |a, b| match (a, b) {
		(Value::Text(a), Value::Text(b)) => a.cmp(b),
		_ => Ordering::Equal,
	})
}

fn compare_number(a: &Value<'_>, b: &Value<'_>) -> Ordering {
	with_nulls_first(a, b, |a, b| match (*a, *b) {
		(Value::Integer(a), Value::Integer(b)) => a.cmp(&b),
		(Value::Unsigned(a), Value::Unsigned(b)) => a.cmp(&b),
		(Value::Integer(a), Value::Unsigned(b)) => i128::from(a).cmp(&i128::from(b)),
		(Value::Unsigned(a), Value::Integer(b)) => i128::from(a).cmp(&i128::from(b)),
		(Value::Float(a), Value::Float(b)) => a.total_cmp(&b),
		(Value::Float(a), Value::Integer(b)) => a.total_cmp(&(b as f64)),
		(Value::Float(a), Value::Unsigned(b)) => a.total_cmp(&(b as f64)),
		(Value::Integer(a), Value::Float(b)) => (a as f64).total_cmp(&b),
		(Value::Unsigned(a), Value::Float(b)) => (a as f64).total_cmp(&b),
		_ => Ordering::Equal,
	})
}

fn as_naive(value: &Value<'_>) -> Option<NaiveDateTime> {
	match value {
		Value::Date(date) => date.and_hms_opt(0, 0, 0),
		Value::DateTime(datetime) => Some(*datetime),
		Value::Timestamp(timestamp) => Some(timestamp.naive_utc()),
		_ => None,
	}
}

fn compare_temporal(a: &Value<'_>, b: &Value<'_>) -> Ordering {
	with_nulls_first(a, b, |a, b| match (as_naive(a), as_naive(b)) {
		(Some(a), Some(b)) => a.cmp(&b),
		_ => Ordering::Equal,
	})
}

fn compare_boolean(a: &Value<'_>, b: &Value<'_>) -> Ordering {
	with_nulls_first(a, b, |a, b| match (a, b) {
		(Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
		_ => Ordering::Equal,
	})
}

/// A compiled ordering over one field path
pub struct OrderingPlan<T> {
	path: ResolvedPath<T>,
	compare: Comparator,
}

impl<T: Record> OrderingPlan<T> {
	/// Resolves `path` and selects the comparison for its leaf field
	///
	/// # Errors
	///
	/// [`TableError::FieldNotFound`] for unknown paths and
	/// [`TableError::UnorderableField`] for nested records and lists.
	pub fn compile(path: &str) -> Result<Self> {
		let resolved = resolve_path::<T>(path)?;
		Self::from_resolved(resolved)
	}

	/// Builds a plan from an already resolved path
	pub fn from_resolved(path: ResolvedPath<T>) -> Result<Self> {
		let kind = path.kind();
		let compare = comparator_for(&kind).ok_or_else(|| TableError::UnorderableField {
			path: path.path().to_string(),
			kind: kind.name(),
		})?;
		tracing::debug!(path = path.path(), kind = kind.name(), "compiled ordering plan");
		Ok(Self { path, compare })
	}

	/// Returns the resolved path
	pub fn path(&self) -> &ResolvedPath<T> {
		&self.path
	}

	/// Compares two records in ascending order of the planned field
	pub fn compare(&self, a: &T, b: &T) -> Ordering {
		(self.compare)(&self.path.get(a), &self.path.get(b))
	}

	/// Applies the plan to a record sequence
	///
	/// The returned iterator is lazy; see [`Ordered`].
	pub fn apply<I>(&self, records: I, direction: SortDirection) -> Ordered<I::IntoIter, T>
	where
		I: IntoIterator,
		I::Item: Borrow<T>,
	{
		Ordered::new(records.into_iter(), self.clone(), direction)
	}
}

impl<T> Clone for OrderingPlan<T> {
	fn clone(&self) -> Self {
		Self {
			path: self.path.clone(),
			compare: self.compare,
		}
	}
}

impl<T> fmt::Debug for OrderingPlan<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OrderingPlan")
			.field("path", &self.path)
			.finish_non_exhaustive()
	}
}

enum State<I: Iterator> {
	Pending(I),
	Sorted(vec::IntoIter<I::Item>),
}

/// Lazily ordered record sequence
///
/// The source is drained and stable-sorted on the first call to `next`, never
/// earlier. Equal keys keep their source order in both directions.
pub struct Ordered<I: Iterator, T> {
	state: State<I>,
	plan: OrderingPlan<T>,
	direction: SortDirection,
}

impl<I, T> Ordered<I, T>
where
	I: Iterator,
	I::Item: Borrow<T>,
	T: Record,
{
	fn new(source: I, plan: OrderingPlan<T>, direction: SortDirection) -> Self {
		Self {
			state: State::Pending(source),
			plan,
			direction,
		}
	}

	/// Returns the direction this sequence is ordered in
	pub fn direction(&self) -> SortDirection {
		self.direction
	}

	/// Returns the path this sequence is ordered by
	pub fn path(&self) -> &str {
		self.plan.path().path()
	}

	fn materialize(&mut self) {
		let state = std::mem::replace(&mut self.state, State::Sorted(Vec::new().into_iter()));
		let mut items: Vec<I::Item> = match state {
			State::Pending(source) => source.collect(),
			State::Sorted(items) => items.collect(),
		};

		let plan = &self.plan;
		match self.direction {
			SortDirection::Ascending => {
				items.sort_by(|a, b| plan.compare(a.borrow(), b.borrow()));
			}
			SortDirection::Descending => {
				items.sort_by(|a, b| plan.compare(a.borrow(), b.borrow()).reverse());
			}
		}
		self.state = State::Sorted(items.into_iter());
	}
}

impl<I, T> Iterator for Ordered<I, T>
where
	I: Iterator,
	I::Item: Borrow<T>,
	T: Record,
{
	type Item = I::Item;

	fn next(&mut self) -> Option<Self::Item> {
		if matches!(self.state, State::Pending(_)) {
			self.materialize();
		}
		match &mut self.state {
			State::Sorted(items) => items.next(),
			State::Pending(_) => None,
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		match &self.state {
			State::Pending(source) => source.size_hint(),
			State::Sorted(items) => items.size_hint(),
		}
	}
}

impl<I: Iterator, T> fmt::Debug for Ordered<I, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Ordered")
			.field("plan", &self.plan)
			.field("direction", &self.direction)
			.field("materialized", &matches!(self.state, State::Sorted(_)))
			.finish()
	}
}

/// Picks the token to apply: the runtime token when it parses, the default
/// otherwise
pub(crate) fn effective_token(default_sort: &SortToken, sort: &str) -> SortToken {
	if sort.trim().is_empty() {
		return default_sort.clone();
	}
	match SortToken::parse(sort) {
		Ok(token) => token,
		Err(err) => {
			tracing::warn!(token = sort, error = %err, "falling back to default sort order");
			default_sort.clone()
		}
	}
}

/// Orders records by a runtime sort token
///
/// An empty `sort` selects `default_sort`. A malformed `sort` is logged and
/// replaced by `default_sort`; the default itself must be valid.
///
/// # Errors
///
/// [`TableError::MalformedSortToken`] when `default_sort` does not parse,
/// [`TableError::FieldNotFound`] or [`TableError::UnorderableField`] when the
/// selected path cannot be ordered.
///
/// # Examples
///
/// ```rust
/// # use crudgrid_tables::record::{FieldSchema, FieldType, Record, RecordSchema, Value};
/// # #[derive(Debug)]
/// # struct Client { name: String }
/// # impl Record for Client {
/// #     fn schema() -> &'static RecordSchema {
/// #         static SCHEMA: RecordSchema =
/// #             RecordSchema::new("Client", &[FieldSchema::new("Name", <String as FieldType>::KIND)]);
/// #         &SCHEMA
/// #     }
/// #     fn record_schema(&self) -> &'static RecordSchema { Self::schema() }
/// #     fn field(&self, index: usize) -> Value<'_> {
/// #         if index == 0 { self.name.to_value() } else { Value::Null }
/// #     }
/// # }
/// use crudgrid_tables::ordering::order_records;
///
/// let clients = vec![
///     Client { name: "Bob".to_string() },
///     Client { name: "Al".to_string() },
/// ];
/// let names: Vec<String> = order_records::<Client, _>(clients, "Name-desc", "Name-asc")
///     .unwrap()
///     .map(|client| client.name)
///     .collect();
/// assert_eq!(names, ["Al", "Bob"]);
/// ```
pub fn order_records<T, I>(records: I, default_sort: &str, sort: &str) -> Result<Ordered<I::IntoIter, T>>
where
	T: Record,
	I: IntoIterator,
	I::Item: Borrow<T>,
{
	let default_token = SortToken::parse(default_sort)?;
	let token = effective_token(&default_token, sort);
	let plan = OrderingPlan::<T>::compile(token.path())?;
	Ok(plan.apply(records, token.direction()))
}
