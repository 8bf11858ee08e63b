use crudgrid::prelude::*;
use crudgrid_integration_tests::{Agent, TICKET_SETTINGS, Ticket, ticket};
use rstest::*;

#[fixture]
fn tickets() -> Vec<Ticket> {
	vec![
		ticket(7, "Printer on fire", true),
		ticket(9, "Password reset", false),
		ticket(8, "printer jam", true),
	]
}

#[fixture]
fn registry() -> TableRegistry {
	let settings = TableSettings::from_toml_str(TICKET_SETTINGS).unwrap();
	TableRegistry::builder()
		.register(settings.into_config::<Ticket>())
		.unwrap()
		.register(TableConfig::<Agent>::new("Name-asc").column(ColumnDescriptor::new("Name")))
		.unwrap()
		.build()
}

#[rstest]
fn test_registry_from_settings(registry: TableRegistry, tickets: Vec<Ticket>) {
	let table = registry.table::<Ticket>().unwrap();

	let titles: Vec<_> = table
		.default_headers()
		.iter()
		.map(ColumnHeader::title)
		.collect();
	assert_eq!(titles, ["Id", "Subject Line", "Open"]);
	assert_eq!(table.default_headers()[0].order_action(), "Id-asc");

	let ids: Vec<u64> = table
		.query(&tickets, &TableQuery::new().with_search("PRINTER"))
		.map(|ticket| ticket.id)
		.collect();
	assert_eq!(ids, [8, 7]);
	assert_eq!(table.default_page_size(), PageSize::Limited(50));
}

#[rstest]
fn test_registry_lookup_by_type(registry: TableRegistry) {
	assert_eq!(registry.type_names(), ["Agent", "Ticket"]);
	assert_eq!(
		registry.table::<Agent>().unwrap().default_sort(),
		&SortToken::ascending("Name")
	);
}

#[rstest]
fn test_sort_token_round_trip() {
	let token: SortToken = "Open-asc".parse().unwrap();
	assert_eq!(token.direction(), SortDirection::Ascending);
	assert_eq!(token.opposite().to_string(), "Open-desc");
}

#[rstest]
fn test_export_through_facade(registry: TableRegistry, tickets: Vec<Ticket>) {
	let table = registry.table::<Ticket>().unwrap();
	let json = table.export_json(table.sort(&tickets, "Id-asc"));
	assert_eq!(
		json,
		serde_json::json!([
			{ "Id": 7, "Subject": "Printer on fire" },
			{ "Id": 8, "Subject": "printer jam" },
			{ "Id": 9, "Subject": "Password reset" }
		])
	);
}
