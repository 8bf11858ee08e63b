//! Helper functions for dynamic crate path resolution using proc_macro_crate

use proc_macro2::TokenStream;
use quote::quote;

/// Resolves the path to the crudgrid_tables crate dynamically.
///
/// # Strategy
///
/// 1. Internal usage (`Itself`, e.g. integration tests of crudgrid-tables):
///    use `::crudgrid_tables`
/// 2. `crudgrid-tables` is a dependency: use it under its (possibly renamed)
///    name
/// 3. Only the `crudgrid` facade is a dependency: use `::crudgrid::tables`
/// 4. Fallback: use `::crudgrid_tables`
pub(crate) fn get_crudgrid_tables_crate() -> TokenStream {
	use proc_macro_crate::{FoundCrate, crate_name};

	match crate_name("crudgrid-tables") {
		Ok(FoundCrate::Itself) => return quote!(::crudgrid_tables),
		Ok(FoundCrate::Name(name)) => {
			let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
			return quote!(::#ident);
		}
		Err(_) => {}
	}

	if let Ok(FoundCrate::Name(name)) = crate_name("crudgrid") {
		let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
		return quote!(::#ident::tables);
	}

	quote!(::crudgrid_tables)
}
