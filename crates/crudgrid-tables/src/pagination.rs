//! Page-size menus and pagination

use crate::error::{Result, TableError};
use serde::Serialize;
use std::iter::{Skip, Take};

/// Value of the "no limit" page size
pub const ALL_RECORDS: i32 = -1;

const CHOICES: [(&str, i32); 4] = [
	("Show 10 Records", 10),
	("Show 25 Records", 25),
	("Show 50 Records", 50),
	("Show All", ALL_RECORDS),
];

/// One entry of the page-size menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSizeOption {
	/// Label shown to users
	pub text: String,
	/// Submitted value; `"-1"` means no limit
	pub value: String,
	/// Whether this entry matches the current page size
	pub selected: bool,
}

/// Builds the fixed page-size menu with the entry matching `current` selected
///
/// A value outside the menu selects nothing.
///
/// ```rust
/// use crudgrid_tables::pagination::page_size_options;
///
/// let options = page_size_options(Some(25));
/// assert_eq!(options.len(), 4);
/// assert!(options[1].selected);
/// assert_eq!(options[3].value, "-1");
/// ```
pub fn page_size_options(current: Option<i32>) -> Vec<PageSizeOption> {
	CHOICES
		.iter()
		.map(|&(text, value)| PageSizeOption {
			text: text.to_string(),
			value: value.to_string(),
			selected: current == Some(value),
		})
		.collect()
}

/// Number of records shown per page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
	/// At most this many records per page
	Limited(usize),
	/// Every record on one page
	All,
}

impl PageSize {
	/// Converts a submitted page-size value
	///
	/// # Errors
	///
	/// [`TableError::InvalidConfig`] for zero and for negative values other
	/// than `-1`.
	pub fn from_value(value: i32) -> Result<Self> {
		match value {
			ALL_RECORDS => Ok(Self::All),
			n if n > 0 => Ok(Self::Limited(n.unsigned_abs() as usize)),
			n => Err(TableError::InvalidConfig(format!("invalid page size {n}"))),
		}
	}

	/// Returns the submitted representation, `-1` for [`PageSize::All`]
	pub fn value(self) -> i32 {
		match self {
			Self::Limited(n) => i32::try_from(n).unwrap_or(i32::MAX),
			Self::All => ALL_RECORDS,
		}
	}

	/// Returns the page limit, `None` when unlimited
	pub fn limit(self) -> Option<usize> {
		match self {
			Self::Limited(n) => Some(n),
			Self::All => None,
		}
	}
}

impl Default for PageSize {
	fn default() -> Self {
		Self::Limited(10)
	}
}

/// Lazily selects one 1-based page of `records`
///
/// Page `0` is treated as page `1`. Pages past the end are empty.
pub fn paginate<I: IntoIterator>(records: I, page: usize, size: PageSize) -> Take<Skip<I::IntoIter>> {
	let page = page.max(1);
	match size {
		PageSize::Limited(n) => records
			.into_iter()
			.skip((page - 1).saturating_mul(n))
			.take(n),
		PageSize::All => {
			let skip = if page == 1 { 0 } else { usize::MAX };
			records.into_iter().skip(skip).take(usize::MAX)
		}
	}
}

/// Page navigation state for a known number of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
	/// Total number of records
	pub total_items: usize,
	/// Current page number (1-indexed)
	pub current_page: usize,
	/// Records per page, `None` when unlimited
	pub per_page: Option<usize>,
}

impl PageInfo {
	/// Creates page state; page `0` is treated as page `1`
	pub fn new(total_items: usize, page: usize, size: PageSize) -> Self {
		Self {
			total_items,
			current_page: page.max(1),
			per_page: size.limit(),
		}
	}

	/// Returns the total number of pages
	///
	/// A zero page size holds no records, so it yields no pages.
	pub fn total_pages(&self) -> usize {
		if self.total_items == 0 {
			return 0;
		}
		match self.per_page {
			Some(0) => 0,
			Some(per_page) => self.total_items.div_ceil(per_page),
			None => 1,
		}
	}

	/// Returns the start index for the current page (0-indexed)
	pub fn start_index(&self) -> usize {
		match self.per_page {
			Some(per_page) => (self.current_page - 1)
				.saturating_mul(per_page)
				.min(self.total_items),
			None if self.current_page == 1 => 0,
			None => self.total_items,
		}
	}

	/// Returns the end index for the current page (exclusive, 0-indexed)
	pub fn end_index(&self) -> usize {
		match self.per_page {
			Some(per_page) => self
				.start_index()
				.saturating_add(per_page)
				.min(self.total_items),
			None => self.total_items,
		}
	}

	/// Returns whether a later page exists
	pub fn has_next(&self) -> bool {
		self.current_page < self.total_pages()
	}

	/// Returns whether an earlier page exists
	pub fn has_previous(&self) -> bool {
		self.current_page > 1
	}

	/// Returns the next page number, if any
	pub fn next_page(&self) -> Option<usize> {
		self.has_next().then(|| self.current_page + 1)
	}

	/// Returns the previous page number, if any
	pub fn previous_page(&self) -> Option<usize> {
		self.has_previous().then(|| self.current_page - 1)
	}
}
