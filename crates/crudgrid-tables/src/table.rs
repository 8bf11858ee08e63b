//! Table configuration and the per-type table engine
//!
//! A [`TableConfig`] is the static declaration of one table. [`Table::new`]
//! validates it once, resolves every column path, and compiles one ordering
//! plan per sortable column. Requests then only look plans up by path.

use crate::column::header::build_headers;
use crate::column::{ColumnDescriptor, ColumnHeader, resolve_column_headers};
use crate::error::Result;
use crate::ordering::{Ordered, OrderingPlan, effective_token};
use crate::pagination::{PageSize, PageSizeOption, page_size_options, paginate};
use crate::path::{ResolvedPath, resolve_path};
use crate::record::Record;
use crate::search::{CaseSensitivity, SearchFilter, Searched};
use crate::sort::SortToken;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::iter::{Skip, Take};
use std::marker::PhantomData;

/// Page of records produced by [`Table::query`]
pub type QueryPage<I, T> = Take<Skip<Ordered<Searched<I, T>, T>>>;

/// Static declaration of a table over records of type `T`
///
/// # Example
///
/// ```rust,ignore
/// let config = TableConfig::<Client>::new("Name-asc")
///     .column(ColumnDescriptor::new("Name"))
///     .column(ColumnDescriptor::new("Email"))
///     .column(ColumnDescriptor::new("Notes").sortable(false))
///     .search_fields(["Name", "Email"])
///     .default_page_size(25);
/// ```
pub struct TableConfig<T> {
	columns: Vec<ColumnDescriptor>,
	default_sort: String,
	search_fields: Vec<String>,
	default_page_size: i32,
	case_sensitivity: CaseSensitivity,
	_record: PhantomData<fn() -> T>,
}

impl<T> TableConfig<T> {
	/// Creates an empty configuration with the given default sort token
	pub fn new(default_sort: impl Into<String>) -> Self {
		Self {
			columns: Vec::new(),
			default_sort: default_sort.into(),
			search_fields: Vec::new(),
			default_page_size: 10,
			case_sensitivity: CaseSensitivity::default(),
			_record: PhantomData,
		}
	}

	/// Appends a column
	pub fn column(mut self, column: ColumnDescriptor) -> Self {
		self.columns.push(column);
		self
	}

	/// Appends several columns in order
	pub fn columns(mut self, columns: impl IntoIterator<Item = ColumnDescriptor>) -> Self {
		self.columns.extend(columns);
		self
	}

	/// Declares a searchable field path
	pub fn search_field(mut self, path: impl Into<String>) -> Self {
		self.search_fields.push(path.into());
		self
	}

	/// Declares several searchable field paths
	pub fn search_fields<S: Into<String>>(mut self, paths: impl IntoIterator<Item = S>) -> Self {
		self.search_fields.extend(paths.into_iter().map(Into::into));
		self
	}

	/// Sets the page size used when a request names none (`-1` for all)
	pub fn default_page_size(mut self, size: i32) -> Self {
		self.default_page_size = size;
		self
	}

	/// Sets how search queries are compared
	pub fn case_sensitivity(mut self, case: CaseSensitivity) -> Self {
		self.case_sensitivity = case;
		self
	}

	/// Returns the declared columns
	pub fn column_descriptors(&self) -> &[ColumnDescriptor] {
		&self.columns
	}

	/// Returns the default sort token as declared
	pub fn default_sort(&self) -> &str {
		&self.default_sort
	}

	/// Returns the declared search paths
	pub fn search_paths(&self) -> &[String] {
		&self.search_fields
	}
}

impl<T> Clone for TableConfig<T> {
	fn clone(&self) -> Self {
		Self {
			columns: self.columns.clone(),
			default_sort: self.default_sort.clone(),
			search_fields: self.search_fields.clone(),
			default_page_size: self.default_page_size,
			case_sensitivity: self.case_sensitivity,
			_record: PhantomData,
		}
	}
}

impl<T> fmt::Debug for TableConfig<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TableConfig")
			.field("columns", &self.columns)
			.field("default_sort", &self.default_sort)
			.field("search_fields", &self.search_fields)
			.field("default_page_size", &self.default_page_size)
			.field("case_sensitivity", &self.case_sensitivity)
			.finish()
	}
}

/// One table request, usually deserialized from query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableQuery {
	/// Sort token, e.g. `Name-asc`
	pub sort: Option<String>,
	/// Free-text search
	pub search: Option<String>,
	/// 1-based page number
	pub page: Option<usize>,
	/// Page size, `-1` for all records
	pub page_size: Option<i32>,
}

impl TableQuery {
	/// Creates an empty query
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the sort token
	pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
		self.sort = Some(sort.into());
		self
	}

	/// Sets the search text
	pub fn with_search(mut self, search: impl Into<String>) -> Self {
		self.search = Some(search.into());
		self
	}

	/// Sets the page number
	pub fn with_page(mut self, page: usize) -> Self {
		self.page = Some(page);
		self
	}

	/// Sets the page size
	pub fn with_page_size(mut self, page_size: i32) -> Self {
		self.page_size = Some(page_size);
		self
	}
}

/// Validated table engine for records of type `T`
///
/// A table is immutable after construction and can be shared freely between
/// threads; the header cache is filled at most once.
pub struct Table<T> {
	config: TableConfig<T>,
	pub(crate) columns: Vec<ResolvedPath<T>>,
	default_sort: SortToken,
	default_plan: OrderingPlan<T>,
	plans: HashMap<String, OrderingPlan<T>>,
	search: SearchFilter<T>,
	default_page_size: PageSize,
	headers: OnceCell<Vec<ColumnHeader>>,
}

impl<T: Record> Table<T> {
	/// Validates `config` and compiles its ordering plans
	///
	/// # Errors
	///
	/// - [`TableError::MalformedSortToken`](crate::TableError::MalformedSortToken)
	///   when the default sort token does not parse
	/// - [`TableError::InvalidConfig`](crate::TableError::InvalidConfig) for an
	///   invalid default page size
	/// - [`TableError::FieldNotFound`](crate::TableError::FieldNotFound) when a
	///   column path or the default sort path does not resolve
	/// - [`TableError::UnorderableField`](crate::TableError::UnorderableField)
	///   when a sortable column or the default sort path has no total order
	pub fn new(config: TableConfig<T>) -> Result<Self> {
		let default_sort = SortToken::parse(&config.default_sort)?;
		let default_page_size = PageSize::from_value(config.default_page_size)?;

		let columns = config
			.columns
			.iter()
			.map(|column| resolve_path::<T>(column.title()))
			.collect::<Result<Vec<_>>>()?;

		let mut plans = HashMap::new();
		for (column, resolved) in config.columns.iter().zip(&columns) {
			if column.is_sortable() && !plans.contains_key(resolved.path()) {
				let plan = OrderingPlan::from_resolved(resolved.clone())?;
				plans.insert(resolved.path().to_string(), plan);
			}
		}
		let default_plan = match plans.get(default_sort.path()) {
			Some(plan) => plan.clone(),
			None => OrderingPlan::compile(default_sort.path())?,
		};

		let search = SearchFilter::new(&config.search_fields, config.case_sensitivity);

		tracing::debug!(
			record = T::schema().type_name(),
			columns = columns.len(),
			sortable = plans.len(),
			default_sort = %default_sort,
			"table configured"
		);

		Ok(Self {
			config,
			columns,
			default_sort,
			default_plan,
			plans,
			search,
			default_page_size,
			headers: OnceCell::new(),
		})
	}

	/// Returns the configuration this table was built from
	pub fn config(&self) -> &TableConfig<T> {
		&self.config
	}

	/// Returns the parsed default sort token
	pub fn default_sort(&self) -> &SortToken {
		&self.default_sort
	}

	/// Returns the default page size
	pub fn default_page_size(&self) -> PageSize {
		self.default_page_size
	}

	/// Returns the search filter
	pub fn search_filter(&self) -> &SearchFilter<T> {
		&self.search
	}

	/// Returns the generated headers, computing them on first use
	pub fn default_headers(&self) -> &[ColumnHeader] {
		self.headers.get_or_init(|| {
			let titles: Vec<String> = self.columns.iter().map(ResolvedPath::title).collect();
			build_headers(&self.default_sort, &self.config.columns, &titles)
		})
	}

	/// Returns headers whose order actions reflect `current_sort`
	///
	/// A non-blank token is first mapped through [`Table::effective_sort`], so
	/// the actions always toggle the order [`Table::sort`] actually applied.
	pub fn headers(&self, current_sort: &str) -> Vec<ColumnHeader> {
		if current_sort.trim().is_empty() {
			return resolve_column_headers(self.default_headers(), current_sort);
		}
		let applied = self.effective_sort(current_sort).to_string();
		resolve_column_headers(self.default_headers(), &applied)
	}

	fn plan_for(&self, path: &str) -> Option<&OrderingPlan<T>> {
		self.plans
			.get(path)
			.or_else(|| (path == self.default_sort.path()).then_some(&self.default_plan))
	}

	/// Returns the token [`Table::sort`] applies for a runtime `sort` value
	///
	/// Blank, malformed, unknown and non-sortable tokens all map to the
	/// default sort token.
	pub fn effective_sort(&self, sort: &str) -> SortToken {
		let token = effective_token(&self.default_sort, sort);
		if self.plan_for(token.path()).is_some() {
			return token;
		}
		tracing::warn!(token = sort, "unsortable path, falling back to default sort order");
		self.default_sort.clone()
	}

	/// Orders records by a runtime sort token, degrading to the default order
	pub fn sort<I>(&self, records: I, sort: &str) -> Ordered<I::IntoIter, T>
	where
		I: IntoIterator,
		I::Item: Borrow<T>,
	{
		let token = self.effective_sort(sort);
		let plan = self.plan_for(token.path()).unwrap_or(&self.default_plan);
		plan.apply(records, token.direction())
	}

	/// Filters records by the declared search fields
	pub fn search<I>(&self, records: I, query: &str) -> Searched<I::IntoIter, T>
	where
		I: IntoIterator,
		I::Item: Borrow<T>,
	{
		self.search.apply(records, query)
	}

	/// Converts a requested page size, falling back to the default
	pub fn page_size(&self, requested: Option<i32>) -> PageSize {
		match requested.map(PageSize::from_value) {
			Some(Ok(size)) => size,
			Some(Err(err)) => {
				tracing::warn!(error = %err, "falling back to default page size");
				self.default_page_size
			}
			None => self.default_page_size,
		}
	}

	/// Builds the page-size menu, selecting `current` or the default size
	pub fn page_size_options(&self, current: Option<i32>) -> Vec<PageSizeOption> {
		page_size_options(Some(self.page_size(current).value()))
	}

	/// Runs a full request: search, then sort, then paginate
	///
	/// Nothing is pulled from `records` until the returned page is iterated.
	pub fn query<I>(&self, records: I, query: &TableQuery) -> QueryPage<I::IntoIter, T>
	where
		I: IntoIterator,
		I::Item: Borrow<T>,
	{
		let searched = self.search(records, query.search.as_deref().unwrap_or_default());
		let sorted = self.sort(searched, query.sort.as_deref().unwrap_or_default());
		paginate(
			sorted,
			query.page.unwrap_or(1),
			self.page_size(query.page_size),
		)
	}
}

impl<T> fmt::Debug for Table<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Table")
			.field("config", &self.config)
			.field("default_sort", &self.default_sort)
			.field("sortable", &self.plans.keys().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}
