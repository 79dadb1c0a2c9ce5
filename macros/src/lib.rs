//! Derive grid layouts for structs and trace tests with procedural macros.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput, ItemFn, LitStr};

mod sheet;

/// Implement `cellgrid_codec::Sheet` for a struct with named fields.
///
/// Fields are laid out in declaration order. Field attributes:
///
/// - `#[sheet(rename = "key")]`: use `key` in schema grids instead of the field name
/// - `#[sheet(datetime)]`: format the field with the configured datetime layout
/// - `#[sheet(csv)]`: pack a list of scalars into one separated cell
/// - `#[sheet(skip)]`: leave the field out of the grid; it is rebuilt with [Default]
///
/// # Example
///
/// ```ignore
/// #[derive(Sheet)]
/// struct Event {
///     #[sheet(rename = "when", datetime)]
///     at: DateTime<Utc>,
///     #[sheet(csv)]
///     tags: Vec<String>,
///     #[sheet(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Sheet, attributes(sheet))]
pub fn derive_sheet(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    sheet::expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Run a test function with a `tracing` subscriber that writes to the test output.
///
/// The maximum level defaults to `DEBUG` and can be overridden with a string literal, e.g.
/// `#[test_traced("TRACE")]`.
///
/// The crate using this attribute must depend on `tracing` and `tracing-subscriber`.
#[proc_macro_attribute]
pub fn test_traced(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    // Parse the log level
    let level = if attr.is_empty() {
        LitStr::new("DEBUG", Span::call_site())
    } else {
        parse_macro_input!(attr as LitStr)
    };
    let level = match level.value().to_uppercase().as_str() {
        value @ ("TRACE" | "DEBUG" | "INFO" | "WARN" | "ERROR") => format_ident!("{}", value),
        _ => {
            return syn::Error::new_spanned(
                level,
                "level must be one of TRACE, DEBUG, INFO, WARN, ERROR",
            )
            .to_compile_error()
            .into();
        }
    };

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;
    let expanded = quote! {
        #[test]
        #(#attrs)*
        #vis #sig {
            let subscriber = ::tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(::tracing::Level::#level)
                .with_line_number(true)
                .finish();
            let dispatcher = ::tracing::Dispatch::new(subscriber);
            ::tracing::dispatcher::with_default(&dispatcher, || #block)
        }
    };
    TokenStream::from(expanded)
}
