use crate::crate_paths::get_crudgrid_tables_crate;
use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result, parse_macro_input};

/// Field renaming rule from `#[record(rename_all = "...")]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenameRule {
	Pascal,
	Camel,
	Snake,
	Kebab,
}

impl RenameRule {
	fn parse(value: &syn::LitStr) -> Result<Self> {
		match value.value().as_str() {
			"PascalCase" => Ok(Self::Pascal),
			"camelCase" => Ok(Self::Camel),
			"snake_case" => Ok(Self::Snake),
			"kebab-case" => Ok(Self::Kebab),
			other => Err(syn::Error::new_spanned(
				value,
				format!("unsupported rename_all rule `{other}`"),
			)),
		}
	}

	fn apply(self, name: &str) -> String {
		match self {
			Self::Pascal => name.to_upper_camel_case(),
			Self::Camel => name.to_lower_camel_case(),
			Self::Snake => name.to_snake_case(),
			Self::Kebab => name.to_kebab_case(),
		}
	}
}

/// Configuration from the container `#[record(...)]` attribute
#[derive(Debug, Default)]
struct RecordAttr {
	name: Option<String>,
	rename_all: Option<RenameRule>,
}

impl RecordAttr {
	fn from_attrs(attrs: &[syn::Attribute]) -> Result<Self> {
		let mut config = Self::default();

		for attr in attrs {
			if !attr.path().is_ident("record") {
				continue;
			}

			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("name") {
					let value: syn::LitStr = meta.value()?.parse()?;
					config.name = Some(value.value());
					Ok(())
				} else if meta.path.is_ident("rename_all") {
					let value: syn::LitStr = meta.value()?.parse()?;
					config.rename_all = Some(RenameRule::parse(&value)?);
					Ok(())
				} else {
					Err(meta.error("unsupported record attribute"))
				}
			})?;
		}

		Ok(config)
	}
}

/// Configuration from a field `#[record(...)]` attribute
#[derive(Debug, Default)]
struct FieldAttr {
	rename: Option<String>,
	display: Option<String>,
	skip: bool,
}

impl FieldAttr {
	fn from_attrs(attrs: &[syn::Attribute]) -> Result<Self> {
		let mut config = Self::default();

		for attr in attrs {
			if !attr.path().is_ident("record") {
				continue;
			}

			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("rename") {
					let value: syn::LitStr = meta.value()?.parse()?;
					config.rename = Some(value.value());
					Ok(())
				} else if meta.path.is_ident("display") {
					let value: syn::LitStr = meta.value()?.parse()?;
					config.display = Some(value.value());
					Ok(())
				} else if meta.path.is_ident("skip") {
					config.skip = true;
					Ok(())
				} else {
					Err(meta.error("unsupported record field attribute"))
				}
			})?;
		}

		Ok(config)
	}
}

/// Derive Record implementation
pub(crate) fn derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	match derive_impl(input) {
		Ok(tokens) => tokens.into(),
		Err(err) => err.to_compile_error().into(),
	}
}

fn derive_impl(input: DeriveInput) -> Result<TokenStream> {
	let struct_name = &input.ident;

	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"Record cannot be derived for generic types",
		));
	}

	let fields = match &input.data {
		Data::Struct(data) => match &data.fields {
			Fields::Named(fields) => &fields.named,
			_ => {
				return Err(syn::Error::new_spanned(
					struct_name,
					"Record can only be derived for structs with named fields",
				));
			}
		},
		_ => {
			return Err(syn::Error::new_spanned(
				struct_name,
				"Record can only be derived for structs",
			));
		}
	};

	let config = RecordAttr::from_attrs(&input.attrs)?;
	let type_name = config
		.name
		.unwrap_or_else(|| struct_name.unraw().to_string());

	let krate = get_crudgrid_tables_crate();

	let mut schema_entries = Vec::new();
	let mut match_arms = Vec::new();
	let mut seen = Vec::new();

	for field in fields {
		let attr = FieldAttr::from_attrs(&field.attrs)?;
		if attr.skip {
			continue;
		}

		let Some(ident) = field.ident.as_ref() else {
			continue;
		};
		let raw_name = ident.unraw().to_string();
		let name = match (attr.rename, config.rename_all) {
			(Some(rename), _) => rename,
			(None, Some(rule)) => rule.apply(&raw_name),
			(None, None) => raw_name,
		};

		if name.is_empty() || name.contains('.') {
			return Err(syn::Error::new_spanned(
				ident,
				format!("record field name `{name}` must be non-empty and contain no `.`"),
			));
		}
		if seen.contains(&name) {
			return Err(syn::Error::new_spanned(
				ident,
				format!("duplicate record field name `{name}`"),
			));
		}

		let ty = &field.ty;
		let display = attr
			.display
			.map(|display| quote!(.with_display_name(#display)));
		schema_entries.push(quote! {
			#krate::record::FieldSchema::new(
				#name,
				<#ty as #krate::record::FieldType>::KIND,
			)#display
		});

		let index = Literal::usize_unsuffixed(match_arms.len());
		match_arms.push(quote! {
			#index => #krate::record::FieldType::to_value(&self.#ident),
		});

		seen.push(name);
	}

	let expanded = quote! {
		impl #krate::record::Record for #struct_name {
			fn schema() -> &'static #krate::record::RecordSchema {
				static SCHEMA: #krate::record::RecordSchema = #krate::record::RecordSchema::new(
					#type_name,
					&[#(#schema_entries),*],
				);
				&SCHEMA
			}

			fn record_schema(&self) -> &'static #krate::record::RecordSchema {
				<Self as #krate::record::Record>::schema()
			}

			fn field(&self, index: usize) -> #krate::record::Value<'_> {
				match index {
					#(#match_arms)*
					_ => #krate::record::Value::Null,
				}
			}
		}

		impl #krate::record::FieldType for #struct_name {
			const KIND: #krate::record::FieldKind =
				#krate::record::FieldKind::Record(<#struct_name as #krate::record::Record>::schema);

			fn to_value(&self) -> #krate::record::Value<'_> {
				#krate::record::Value::Record(self)
			}
		}
	};

	Ok(expanded)
}
