use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Variant, parse_macro_input, spanned::Spanned};

use crate::utils;

struct VariantSpec {
    ident: Ident,
    canonical: String,
    aliases: Vec<String>,
}

fn variant_spec(variant: &Variant) -> syn::Result<VariantSpec> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new(
            variant.span(),
            "CliValue only supports enums with unit variants",
        ));
    }

    let mut spec = VariantSpec {
        ident: variant.ident.clone(),
        canonical: utils::to_kebab_case(&variant.ident.to_string()),
        aliases: Vec::new(),
    };

    for attr in &variant.attrs {
        if !attr.path().is_ident("cli") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                spec.canonical = lit.value();
                return Ok(());
            }
            if meta.path.is_ident("alias") {
                let lit: LitStr = meta.value()?.parse()?;
                spec.aliases.push(lit.value());
                return Ok(());
            }
            Err(meta.error("unsupported cli attribute; expected name/alias"))
        })?;
    }

    Ok(spec)
}

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = input.ident.clone();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new(input.span(), "CliValue can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let mut option_name = utils::to_kebab_case(&enum_ident.to_string());
    for attr in &input.attrs {
        if !attr.path().is_ident("cli_value") {
            continue;
        }
        let parse_result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("option") {
                let lit: LitStr = meta.value()?.parse()?;
                option_name = lit.value();
                return Ok(());
            }
            Err(meta.error("unsupported cli_value attribute; expected option = \"...\""))
        });
        if let Err(err) = parse_result {
            return err.to_compile_error().into();
        }
    }

    let specs = match data_enum
        .variants
        .iter()
        .map(variant_spec)
        .collect::<syn::Result<Vec<_>>>()
    {
        Ok(specs) => specs,
        Err(err) => return err.to_compile_error().into(),
    };

    let parse_arms = specs.iter().map(|spec| {
        let ident = &spec.ident;
        let tokens = std::iter::once(&spec.canonical)
            .chain(spec.aliases.iter())
            .map(|v| LitStr::new(v, Span::call_site()));
        quote! { #(#tokens)|* => Ok(Self::#ident), }
    });
    let display_arms = specs.iter().map(|spec| {
        let ident = &spec.ident;
        let canonical = LitStr::new(&spec.canonical, Span::call_site());
        quote! { Self::#ident => #canonical, }
    });

    let values_lit = LitStr::new(
        &specs
            .iter()
            .map(|spec| spec.canonical.as_str())
            .collect::<Vec<_>>()
            .join("|"),
        Span::call_site(),
    );
    let option_lit = LitStr::new(&option_name, Span::call_site());

    let expanded = quote! {
        impl #enum_ident {
            /// Canonical spellings accepted on the command line, `|`-separated.
            pub const VALUES: &'static str = #values_lit;

            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        Self::VALUES
                    ))),
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let value = match self {
                    #(#display_arms)*
                };
                write!(f, "{value}")
            }
        }
    };

    TokenStream::from(expanded)
}
