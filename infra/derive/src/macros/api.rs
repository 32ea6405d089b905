use super::error::derive_names;
use proc_macro2::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::Parser;
use syn::{Attribute, ItemFn, ItemStruct, LitBool, LitStr};

/// Arguments accepted by `#[api_model(...)]`.
#[derive(Default)]
struct ModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

impl ModelArgs {
    fn parse_meta(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("rename_all") {
            if self.rename_all.is_some() {
                return Err(meta.error("Duplicate argument"));
            }
            self.rename_all = Some(meta.value()?.parse()?);
            return Ok(());
        }
        if meta.path.is_ident("deny_unknown_fields") {
            if self.deny_unknown_fields.is_some() {
                return Err(meta.error("Duplicate argument"));
            }
            let value: LitBool = meta.value()?.parse()?;
            self.deny_unknown_fields = Some(value.value);
            return Ok(());
        }
        Err(meta.error("Unsupported argument; expected rename_all or deny_unknown_fields"))
    }
}

/// Serde container attributes already present on the struct.
#[derive(Default)]
struct ExistingSerde {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

impl ExistingSerde {
    fn collect(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut existing = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    existing.rename_all = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("deny_unknown_fields") {
                    existing.deny_unknown_fields = true;
                } else if meta.input.peek(syn::Token![=]) {
                    let _: syn::Expr = meta.value()?.parse()?;
                }
                Ok(())
            })?;
        }
        Ok(existing)
    }
}

/// Expands `#[api_model]`: common derives, `ToSchema` under `server`, camelCase and
/// strict field checking unless overridden.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    let mut parsed = ModelArgs::default();
    let parser = syn::meta::parser(|meta| parsed.parse_meta(&meta));
    if let Err(err) = parser.parse2(args) {
        return err.to_compile_error();
    }

    let existing = match ExistingSerde::collect(&input.attrs) {
        Ok(existing) => existing,
        Err(err) => return err.to_compile_error(),
    };

    let derives = derive_names(&input.attrs);
    let mut missing = Vec::new();
    if !derives.contains("Debug") {
        missing.push(quote! { Debug });
    }
    if !derives.contains("Serialize") {
        missing.push(quote! { ::serde::Serialize });
    }
    if !derives.contains("Deserialize") {
        missing.push(quote! { ::serde::Deserialize });
    }
    let derive_attr =
        if missing.is_empty() { quote! {} } else { quote! { #[derive(#(#missing),*)] } };

    let schema_attr = if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let rename_value = parsed
        .rename_all
        .unwrap_or_else(|| LitStr::new("camelCase", proc_macro2::Span::call_site()));
    let rename_attr = match &existing.rename_all {
        Some(current) if current.value() != rename_value.value() => {
            return syn::Error::new_spanned(
                current,
                "Conflicting serde rename_all; remove it or pass the same value to api_model",
            )
            .to_compile_error();
        }
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #rename_value)] },
    };

    let deny = parsed.deny_unknown_fields.unwrap_or(true);
    let deny_attr = match (existing.deny_unknown_fields, deny) {
        (true, false) => {
            return syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set via serde; remove it before disabling",
            )
            .to_compile_error();
        }
        (false, true) => quote! { #[serde(deny_unknown_fields)] },
        _ => quote! {},
    };

    quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
        #input
    }
}

/// Expands `#[api_handler]`: attaches `utoipa::path` under the `server` feature.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}
