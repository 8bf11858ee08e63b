//! Per-record-type table registry
//!
//! Tables are registered once at startup through [`TableRegistryBuilder`] and
//! looked up by record type afterwards. Registration validates each
//! configuration, so a registry that builds holds only working tables.

use crate::error::{Result, TableError};
use crate::record::Record;
use crate::table::{Table, TableConfig};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

struct Entry {
	type_name: &'static str,
	table: Arc<dyn Any + Send + Sync>,
}

/// Immutable collection of validated tables keyed by record type
#[derive(Default)]
pub struct TableRegistry {
	tables: HashMap<TypeId, Entry>,
}

impl TableRegistry {
	/// Starts a new registry
	pub fn builder() -> TableRegistryBuilder {
		TableRegistryBuilder::default()
	}

	/// Returns the table registered for `T`
	pub fn table<T: Record + 'static>(&self) -> Option<&Table<T>> {
		self.tables
			.get(&TypeId::of::<T>())
			.and_then(|entry| entry.table.downcast_ref::<Table<T>>())
	}

	/// Returns a shared handle to the table registered for `T`
	pub fn shared<T: Record + 'static>(&self) -> Option<Arc<Table<T>>> {
		let entry = self.tables.get(&TypeId::of::<T>())?;
		Arc::clone(&entry.table).downcast::<Table<T>>().ok()
	}

	/// Returns true when a table is registered for `T`
	pub fn contains<T: 'static>(&self) -> bool {
		self.tables.contains_key(&TypeId::of::<T>())
	}

	/// Returns the record type names of all registered tables, sorted
	pub fn type_names(&self) -> Vec<&'static str> {
		let mut names: Vec<_> = self.tables.values().map(|entry| entry.type_name).collect();
		names.sort_unstable();
		names
	}

	/// Returns the number of registered tables
	pub fn len(&self) -> usize {
		self.tables.len()
	}

	/// Returns true when no table is registered
	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}
}

impl fmt::Debug for TableRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TableRegistry")
			.field("tables", &self.type_names())
			.finish()
	}
}

/// Builder for [`TableRegistry`]
#[derive(Default)]
pub struct TableRegistryBuilder {
	tables: HashMap<TypeId, Entry>,
}

impl TableRegistryBuilder {
	/// Validates `config` and registers the resulting table for `T`
	///
	/// # Errors
	///
	/// Any error from [`Table::new`], or [`TableError::InvalidConfig`] when a
	/// table for `T` is already registered.
	pub fn register<T: Record + 'static>(mut self, config: TableConfig<T>) -> Result<Self> {
		let type_name = T::schema().type_name();
		if self.tables.contains_key(&TypeId::of::<T>()) {
			return Err(TableError::InvalidConfig(format!(
				"table for {type_name} is already registered"
			)));
		}

		let table = Table::new(config)?;
		tracing::debug!(record = type_name, "registered table");
		self.tables.insert(
			TypeId::of::<T>(),
			Entry {
				type_name,
				table: Arc::new(table),
			},
		);
		Ok(self)
	}

	/// Finishes the registry
	pub fn build(self) -> TableRegistry {
		TableRegistry {
			tables: self.tables,
		}
	}
}

impl fmt::Debug for TableRegistryBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TableRegistryBuilder")
			.field("tables", &self.tables.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::ColumnDescriptor;
	use crate::record::tests::{Address, Client};

	fn client_config() -> TableConfig<Client> {
		TableConfig::new("Name-asc").column(ColumnDescriptor::new("Name"))
	}

	fn address_config() -> TableConfig<Address> {
		TableConfig::new("City-desc").column(ColumnDescriptor::new("City"))
	}

	#[test]
	fn test_lookup_by_type() {
		let registry = TableRegistry::builder()
			.register(client_config())
			.unwrap()
			.register(address_config())
			.unwrap()
			.build();

		assert_eq!(registry.len(), 2);
		assert_eq!(registry.type_names(), ["Address", "Client"]);
		assert_eq!(
			registry.table::<Client>().unwrap().default_sort().to_string(),
			"Name-asc"
		);
		assert_eq!(
			registry.shared::<Address>().unwrap().default_sort().to_string(),
			"City-desc"
		);
	}

	#[test]
	fn test_missing_type() {
		let registry = TableRegistry::builder().register(client_config()).unwrap().build();
		assert!(registry.contains::<Client>());
		assert!(!registry.contains::<Address>());
		assert!(registry.table::<Address>().is_none());
		assert!(TableRegistry::default().is_empty());
	}

	#[test]
	fn test_duplicate_registration() {
		let result = TableRegistry::builder()
			.register(client_config())
			.and_then(|builder| builder.register(client_config()));
		assert!(matches!(result, Err(TableError::InvalidConfig(_))));
	}

	#[test]
	fn test_invalid_config_fails_registration() {
		let result = TableRegistry::builder()
			.register(TableConfig::<Client>::new("Name-asc").column(ColumnDescriptor::new("Phone")));
		assert!(matches!(result, Err(TableError::FieldNotFound { .. })));
	}
}
