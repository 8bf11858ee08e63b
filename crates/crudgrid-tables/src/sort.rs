//! Sort tokens
//!
//! A sort token is the compact `"<path>-<direction>"` string carried in links
//! and query parameters, e.g. `"Name-asc"` or `"Address.City-desc"`.

use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
	/// Ascending order
	#[serde(rename = "asc")]
	Ascending,
	/// Descending order, used when a token carries no direction
	#[default]
	#[serde(rename = "desc")]
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn opposite(self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Returns the token suffix (`asc` or `desc`)
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Ascending => "asc",
			Self::Descending => "desc",
		}
	}

	/// Parses an exact token suffix
	pub fn from_suffix(suffix: &str) -> Option<Self> {
		match suffix {
			"asc" => Some(Self::Ascending),
			"desc" => Some(Self::Descending),
			_ => None,
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A parsed `path-direction` sort token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortToken {
	path: String,
	direction: SortDirection,
}

impl SortToken {
	/// Creates a token from its parts
	pub fn new(path: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			path: path.into(),
			direction,
		}
	}

	/// Creates an ascending token
	pub fn ascending(path: impl Into<String>) -> Self {
		Self::new(path, SortDirection::Ascending)
	}

	/// Creates a descending token
	pub fn descending(path: impl Into<String>) -> Self {
		Self::new(path, SortDirection::Descending)
	}

	/// Parses a token
	///
	/// The string is split on its last `-` only when the suffix is exactly
	/// `asc` or `desc`; otherwise the whole string is the path and the
	/// direction defaults to descending.
	///
	/// # Errors
	///
	/// Returns [`TableError::MalformedSortToken`] when the path is empty or
	/// contains an empty dotted segment.
	///
	/// # Examples
	///
	/// ```rust
	/// use crudgrid_tables::sort::{SortDirection, SortToken};
	///
	/// let token = SortToken::parse("Created-At-asc").unwrap();
	/// assert_eq!(token.path(), "Created-At");
	/// assert_eq!(token.direction(), SortDirection::Ascending);
	///
	/// let bare = SortToken::parse("Name").unwrap();
	/// assert_eq!(bare.direction(), SortDirection::Descending);
	/// assert_eq!(bare.to_string(), "Name-desc");
	///
	/// assert!(SortToken::parse("-asc").is_err());
	/// ```
	pub fn parse(token: &str) -> Result<Self> {
		let trimmed = token.trim();
		let (path, direction) = match trimmed.rsplit_once('-') {
			Some((path, suffix)) => match SortDirection::from_suffix(suffix) {
				Some(direction) => (path, direction),
				None => (trimmed, SortDirection::default()),
			},
			None => (trimmed, SortDirection::default()),
		};

		if path.is_empty() || path.split('.').any(str::is_empty) {
			return Err(TableError::MalformedSortToken(token.to_string()));
		}

		Ok(Self::new(path, direction))
	}

	/// Returns the field path
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the direction
	pub fn direction(&self) -> SortDirection {
		self.direction
	}

	/// Returns the same path with the opposite direction
	pub fn opposite(&self) -> Self {
		Self::new(self.path.clone(), self.direction.opposite())
	}
}

impl fmt::Display for SortToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.path, self.direction)
	}
}

impl FromStr for SortToken {
	type Err = TableError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}
