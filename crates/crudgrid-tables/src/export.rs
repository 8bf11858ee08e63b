//! CSV and JSON export of exportable columns

use crate::column::ColumnHeader;
use crate::error::Result;
use crate::path::ResolvedPath;
use crate::record::{Record, Value};
use crate::table::Table;
use csv::Writer;
use serde_json::{Map, Number};
use std::borrow::Borrow;
use std::io;

fn to_json(value: Value<'_>) -> serde_json::Value {
	match value {
		Value::Null | Value::Opaque => serde_json::Value::Null,
		Value::Text(text) => serde_json::Value::String(text.to_string()),
		Value::Integer(n) => serde_json::Value::from(n),
		Value::Unsigned(n) => serde_json::Value::from(n),
		Value::Float(n) => Number::from_f64(n)
			.map(serde_json::Value::Number)
			.unwrap_or(serde_json::Value::Null),
		Value::Boolean(flag) => serde_json::Value::Bool(flag),
		Value::Date(_) | Value::DateTime(_) | Value::Timestamp(_) => {
			serde_json::Value::String(value.to_string())
		}
		Value::Record(record) => {
			let object = record
				.record_schema()
				.fields()
				.iter()
				.enumerate()
				.map(|(index, field)| (field.name().to_string(), to_json(record.field(index))))
				.collect::<Map<_, _>>();
			serde_json::Value::Object(object)
		}
	}
}

impl<T: Record> Table<T> {
	fn exported(&self) -> impl Iterator<Item = (&ColumnHeader, &ResolvedPath<T>)> {
		self.default_headers()
			.iter()
			.zip(&self.columns)
			.filter(|(header, _)| header.is_exportable())
	}

	/// Writes records as CSV
	///
	/// The first row holds the titles of the exportable columns; each record
	/// follows as one row in column declaration order.
	///
	/// # Errors
	///
	/// [`TableError::Csv`](crate::TableError::Csv) or
	/// [`TableError::Io`](crate::TableError::Io) when writing fails.
	pub fn export_csv<I, W>(&self, records: I, writer: W) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Borrow<T>,
		W: io::Write,
	{
		let mut writer = Writer::from_writer(writer);
		writer.write_record(self.exported().map(|(header, _)| header.title()))?;

		let mut rows = 0usize;
		for record in records {
			let record = record.borrow();
			writer.write_record(self.exported().map(|(_, path)| path.get(record).to_string()))?;
			rows += 1;
		}
		writer.flush()?;

		tracing::debug!(record = T::schema().type_name(), rows, "exported CSV");
		Ok(())
	}

	/// Converts records into a JSON array of objects keyed by column key
	///
	/// Numbers and booleans keep their JSON types, absent values become
	/// `null` and temporal values are rendered as strings.
	pub fn export_json<I>(&self, records: I) -> serde_json::Value
	where
		I: IntoIterator,
		I::Item: Borrow<T>,
	{
		let rows = records
			.into_iter()
			.map(|record| {
				let record = record.borrow();
				let object = self
					.exported()
					.map(|(header, path)| (header.key().to_string(), to_json(path.get(record))))
					.collect::<Map<_, _>>();
				serde_json::Value::Object(object)
			})
			.collect();
		serde_json::Value::Array(rows)
	}

	/// Serializes [`Table::export_json`] output to a string
	///
	/// # Errors
	///
	/// [`TableError::Json`](crate::TableError::Json) when serialization fails.
	pub fn export_json_string<I>(&self, records: I) -> Result<String>
	where
		I: IntoIterator,
		I::Item: Borrow<T>,
	{
		Ok(serde_json::to_string(&self.export_json(records))?)
	}
}

#[cfg(test)]
mod tests {
	use crate::column::ColumnDescriptor;
	use crate::record::tests::{Address, Client, client};
	use crate::table::{Table, TableConfig};
	use serde_json::json;

	fn table() -> Table<Client> {
		Table::new(
			TableConfig::new("Name-asc")
				.column(ColumnDescriptor::new("Name"))
				.column(ColumnDescriptor::new("Email"))
				.column(ColumnDescriptor::new("Notes").exportable(false))
				.column(ColumnDescriptor::new("Visits"))
				.column(ColumnDescriptor::new("Joined"))
				.column(ColumnDescriptor::new("Address.City")),
		)
		.unwrap()
	}

	fn records() -> Vec<Client> {
		let mut records = vec![
			client("Ada", "ada@example.com", 4),
			client("Bob, Jr.", "bob@example.com", 0),
		];
		records[0].notes = Some("hidden".to_string());
		records[0].address = Some(Address {
			city: "Lyon".to_string(),
			zip: Some(69001),
		});
		records
	}

	#[test]
	fn test_export_csv() {
		let mut output = Vec::new();
		table().export_csv(&records(), &mut output).unwrap();
		let csv = String::from_utf8(output).unwrap();
		let lines: Vec<_> = csv.lines().collect();
		assert_eq!(
			lines,
			[
				"Name,Email Address,Visits,Member Since,Home City",
				"Ada,ada@example.com,4,2024-01-01,Lyon",
				"\"Bob, Jr.\",bob@example.com,0,2024-01-01,",
			]
		);
	}

	#[test]
	fn test_export_csv_without_records_writes_titles() {
		let mut output = Vec::new();
		table().export_csv(Vec::<Client>::new(), &mut output).unwrap();
		assert_eq!(
			String::from_utf8(output).unwrap(),
			"Name,Email Address,Visits,Member Since,Home City\n"
		);
	}

	#[test]
	fn test_export_json() {
		let exported = table().export_json(&records());
		assert_eq!(
			exported,
			json!([
				{
					"Name": "Ada",
					"Email": "ada@example.com",
					"Visits": 4,
					"Joined": "2024-01-01",
					"Address.City": "Lyon"
				},
				{
					"Name": "Bob, Jr.",
					"Email": "bob@example.com",
					"Visits": 0,
					"Joined": "2024-01-01",
					"Address.City": null
				}
			])
		);
	}

	#[test]
	fn test_export_nested_record_as_object() {
		let table = Table::new(
			TableConfig::<Client>::new("Name-asc")
				.column(ColumnDescriptor::new("Address").sortable(false)),
		)
		.unwrap();
		let exported = table.export_json(&records()[..1]);
		assert_eq!(exported, json!([{ "Address": { "City": "Lyon", "Zip": 69001 } }]));
	}

	#[test]
	fn test_export_json_string() {
		let text = table().export_json_string(Vec::<Client>::new()).unwrap();
		assert_eq!(text, "[]");
	}
}
