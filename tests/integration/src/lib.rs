//! Integration test utilities for crudgrid
//!
//! Record types and settings shared by the tests that exercise the `crudgrid`
//! facade the way an application would: through the prelude and the derive.

use crudgrid::prelude::*;

/// Support ticket rendered in a help-desk table
#[derive(Debug, Clone, Record)]
#[record(rename_all = "PascalCase")]
pub struct Ticket {
	pub id: u64,
	#[record(display = "Subject Line")]
	pub subject: String,
	pub open: bool,
}

/// Agent assigned to tickets
#[derive(Debug, Clone, Record)]
#[record(rename_all = "PascalCase")]
pub struct Agent {
	pub name: String,
}

/// Table settings for [`Ticket`], as an application would ship them
pub const TICKET_SETTINGS: &str = r#"
default_sort = "Id-desc"
default_page_size = 50
search_fields = ["Subject"]
case_insensitive_search = true

[[columns]]
title = "Id"

[[columns]]
title = "Subject"

[[columns]]
title = "Open"
exportable = false
"#;

/// Builds a ticket
pub fn ticket(id: u64, subject: &str, open: bool) -> Ticket {
	Ticket {
		id,
		subject: subject.to_string(),
		open,
	}
}
