//! Column header generation and click-to-toggle resolution

use super::descriptor::ColumnDescriptor;
use crate::error::Result;
use crate::path::resolve_path;
use crate::record::Record;
use crate::sort::SortToken;
use serde::Serialize;

/// Render-facing description of one column
///
/// `order_action` is the sort token a renderer should request when the
/// header is activated next. It is recomputed for every request by
/// [`resolve_column_headers`]; everything else is fixed at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnHeader {
	index: usize,
	key: String,
	title: String,
	order_action: String,
	sortable: bool,
	exportable: bool,
}

impl ColumnHeader {
	/// Returns the 1-based position in declaration order
	pub fn index(&self) -> usize {
		self.index
	}

	/// Returns the declared path, used as the sort token identifier
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the resolved display title
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Returns the sort token to apply when this header is activated
	pub fn order_action(&self) -> &str {
		&self.order_action
	}

	/// Returns whether the column can be sorted
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Returns whether the column is exported
	pub fn is_exportable(&self) -> bool {
		self.exportable
	}
}

fn initial_order_action(default_sort: &SortToken, path: &str) -> String {
	if default_sort.path() == path {
		default_sort.opposite().to_string()
	} else {
		SortToken::descending(path).to_string()
	}
}

/// Builds headers from descriptors whose titles are already resolved
pub(crate) fn build_headers(
	default_sort: &SortToken,
	columns: &[ColumnDescriptor],
	titles: &[String],
) -> Vec<ColumnHeader> {
	columns
		.iter()
		.zip(titles)
		.enumerate()
		.map(|(position, (column, title))| ColumnHeader {
			index: position + 1,
			key: column.title().to_string(),
			title: title.clone(),
			order_action: initial_order_action(default_sort, column.title()),
			sortable: column.is_sortable(),
			exportable: column.is_exportable(),
		})
		.collect()
}

/// Generates the headers of a table over records of type `T`
///
/// Titles come from the display name declared on each path's final field and
/// fall back to the raw path. The column matching the default sort offers the
/// opposite direction first; every other column offers descending.
///
/// # Errors
///
/// [`TableError::MalformedSortToken`](crate::TableError::MalformedSortToken)
/// when `default_sort` does not parse and
/// [`TableError::FieldNotFound`](crate::TableError::FieldNotFound) for any
/// path that does not resolve. No column is ever dropped silently.
pub fn generate_column_headers<T: Record>(
	default_sort: &str,
	columns: &[ColumnDescriptor],
) -> Result<Vec<ColumnHeader>> {
	let default_sort = SortToken::parse(default_sort)?;
	let titles = columns
		.iter()
		.map(|column| resolve_path::<T>(column.title()).map(|resolved| resolved.title()))
		.collect::<Result<Vec<_>>>()?;
	Ok(build_headers(&default_sort, columns, &titles))
}

/// Recomputes each header's next sort action for the current sort token
///
/// A column currently sorted ascending offers descending next; every other
/// column offers ascending. Headers without an order action are copied as is.
///
/// `current_sort` is compared verbatim against `<Key>-asc`: it is not trimmed
/// or parsed, and a bare `Key` (implicitly descending) counts as not
/// ascending. Pass the token that was actually applied to the page, such as
/// the [`SortToken`] display form returned by `Table::effective_sort`.
pub fn resolve_column_headers(headers: &[ColumnHeader], current_sort: &str) -> Vec<ColumnHeader> {
	headers
		.iter()
		.map(|header| {
			let mut header = header.clone();
			if !header.order_action.is_empty() {
				let ascending = SortToken::ascending(header.key.as_str()).to_string();
				header.order_action = if current_sort == ascending {
					SortToken::descending(header.key.as_str()).to_string()
				} else {
					ascending
				};
			}
			header
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::TableError;
	use crate::record::tests::Client;
	use rstest::{fixture, rstest};

	#[fixture]
	fn columns() -> Vec<ColumnDescriptor> {
		vec![
			ColumnDescriptor::new("Name"),
			ColumnDescriptor::new("Email"),
			ColumnDescriptor::new("Notes").exportable(false),
		]
	}

	#[rstest]
	fn test_generate_headers(columns: Vec<ColumnDescriptor>) {
		let headers = generate_column_headers::<Client>("Name-asc", &columns).unwrap();

		let indices: Vec<_> = headers.iter().map(ColumnHeader::index).collect();
		assert_eq!(indices, [1, 2, 3]);

		let keys: Vec<_> = headers.iter().map(ColumnHeader::key).collect();
		assert_eq!(keys, ["Name", "Email", "Notes"]);

		let titles: Vec<_> = headers.iter().map(ColumnHeader::title).collect();
		assert_eq!(titles, ["Name", "Email Address", "Notes"]);

		let actions: Vec<_> = headers.iter().map(ColumnHeader::order_action).collect();
		assert_eq!(actions, ["Name-desc", "Email-desc", "Notes-desc"]);

		assert!(headers.iter().all(ColumnHeader::is_sortable));
		assert!(headers[0].is_exportable());
		assert!(!headers[2].is_exportable());
	}

	#[rstest]
	fn test_default_descending_offers_ascending(columns: Vec<ColumnDescriptor>) {
		let headers = generate_column_headers::<Client>("Email-desc", &columns).unwrap();
		assert_eq!(headers[0].order_action(), "Name-desc");
		assert_eq!(headers[1].order_action(), "Email-asc");
	}

	#[rstest]
	fn test_bare_default_is_descending(columns: Vec<ColumnDescriptor>) {
		let headers = generate_column_headers::<Client>("Email", &columns).unwrap();
		assert_eq!(headers[1].order_action(), "Email-asc");
	}

	#[test]
	fn test_nested_title_from_leaf() {
		let columns = [
			ColumnDescriptor::new("Address.City"),
			ColumnDescriptor::new("Address.Zip"),
		];
		let headers = generate_column_headers::<Client>("Address.City-asc", &columns).unwrap();
		assert_eq!(headers[0].title(), "Home City");
		assert_eq!(headers[0].key(), "Address.City");
		assert_eq!(headers[0].order_action(), "Address.City-desc");
		assert_eq!(headers[1].title(), "Address.Zip");
	}

	#[test]
	fn test_unknown_column_fails() {
		let columns = [ColumnDescriptor::new("Name"), ColumnDescriptor::new("Phone")];
		let result = generate_column_headers::<Client>("Name-asc", &columns);
		assert!(matches!(result, Err(TableError::FieldNotFound { .. })));
	}

	#[test]
	fn test_non_sortable_column_flag_is_copied() {
		let columns = [ColumnDescriptor::new("Tags").sortable(false)];
		let headers = generate_column_headers::<Client>("Name-asc", &columns).unwrap();
		assert!(!headers[0].is_sortable());
	}

	#[rstest]
	fn test_toggle(columns: Vec<ColumnDescriptor>) {
		let headers = generate_column_headers::<Client>("Name-asc", &columns).unwrap();
		let toggled = resolve_column_headers(&headers, "Name-asc");

		assert_eq!(toggled[0].order_action(), "Name-desc");
		assert_eq!(toggled[1].order_action(), "Email-asc");
		assert_eq!(toggled[2].order_action(), "Notes-asc");

		for (before, after) in headers.iter().zip(&toggled) {
			assert_eq!(before.index(), after.index());
			assert_eq!(before.key(), after.key());
			assert_eq!(before.title(), after.title());
			assert_eq!(before.is_sortable(), after.is_sortable());
			assert_eq!(before.is_exportable(), after.is_exportable());
		}
	}

	#[rstest]
	fn test_toggle_round_trip(columns: Vec<ColumnDescriptor>) {
		let headers = generate_column_headers::<Client>("Name-asc", &columns).unwrap();
		let first = resolve_column_headers(&headers, "Name-asc");
		// Following the offered action flips it, following it again restores it
		let second = resolve_column_headers(&first, first[0].order_action());
		assert_eq!(second[0].order_action(), "Name-asc");
		let third = resolve_column_headers(&second, second[0].order_action());
		assert_eq!(third[0].order_action(), first[0].order_action());
	}

	#[rstest]
	#[case("")]
	#[case("Name-desc")]
	#[case("Email-asc")]
	fn test_inactive_columns_offer_ascending(columns: Vec<ColumnDescriptor>, #[case] current: &str) {
		let headers = generate_column_headers::<Client>("Name-asc", &columns).unwrap();
		let toggled = resolve_column_headers(&headers, current);
		assert_eq!(toggled[0].order_action(), "Name-asc");
		assert_eq!(toggled[2].order_action(), "Notes-asc");
	}

	#[rstest]
	#[case("Name")]
	#[case(" Name-asc")]
	#[case("name-asc")]
	fn test_current_sort_compared_verbatim(columns: Vec<ColumnDescriptor>, #[case] current: &str) {
		let headers = generate_column_headers::<Client>("Name-asc", &columns).unwrap();
		let toggled = resolve_column_headers(&headers, current);
		assert_eq!(toggled[0].order_action(), "Name-asc");
	}

	#[test]
	fn test_empty_order_action_is_untouched() {
		let header = ColumnHeader {
			index: 1,
			key: "Name".to_string(),
			title: "Name".to_string(),
			order_action: String::new(),
			sortable: false,
			exportable: true,
		};
		let toggled = resolve_column_headers(std::slice::from_ref(&header), "Name-asc");
		assert_eq!(toggled, [header]);
	}

	#[rstest]
	fn test_header_serializes_for_renderers(columns: Vec<ColumnDescriptor>) {
		let headers = generate_column_headers::<Client>("Name-asc", &columns).unwrap();
		let json = serde_json::to_value(&headers[1]).unwrap();
		assert_eq!(json["index"], 2);
		assert_eq!(json["key"], "Email");
		assert_eq!(json["title"], "Email Address");
		assert_eq!(json["order_action"], "Email-desc");
	}
}
