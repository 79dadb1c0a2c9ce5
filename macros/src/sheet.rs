//! Expansion of `#[derive(Sheet)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse_quote, Attribute, Data, DeriveInput, Error, Fields, Lit, LitStr, Meta, NestedMeta,
    Result,
};

/// Options collected from the `#[sheet(...)]` attributes of one field.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<LitStr>,
    datetime: bool,
    csv: bool,
    skip: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path.is_ident("sheet")) {
            let Meta::List(list) = attr.parse_meta()? else {
                return Err(Error::new_spanned(attr, "expected #[sheet(...)]"));
            };
            for nested in list.nested {
                match nested {
                    NestedMeta::Meta(Meta::NameValue(pair)) if pair.path.is_ident("rename") => {
                        let Lit::Str(key) = pair.lit else {
                            return Err(Error::new_spanned(pair.lit, "expected a string"));
                        };
                        let value = key.value();
                        if value.is_empty() || value == "-" || value.contains([',', ':']) {
                            return Err(Error::new_spanned(
                                key,
                                "key must be non-empty, not `-`, and free of `,` and `:`",
                            ));
                        }
                        parsed.rename = Some(key);
                    }
                    NestedMeta::Meta(Meta::Path(path)) if path.is_ident("datetime") => {
                        parsed.datetime = true;
                    }
                    NestedMeta::Meta(Meta::Path(path)) if path.is_ident("csv") => {
                        parsed.csv = true;
                    }
                    NestedMeta::Meta(Meta::Path(path)) if path.is_ident("skip") => {
                        parsed.skip = true;
                    }
                    other => {
                        return Err(Error::new_spanned(
                            other,
                            "expected `rename = \"..\"`, `datetime`, `csv`, or `skip`",
                        ));
                    }
                }
            }
        }
        Ok(parsed)
    }

    /// Renders the field tag read by `StructShape::field`.
    fn tag(&self) -> String {
        let mut tag = self
            .rename
            .as_ref()
            .map(LitStr::value)
            .unwrap_or_default();
        if self.datetime {
            tag.push_str(",datetime");
        }
        if self.csv {
            tag.push_str(",csv");
        }
        tag
    }
}

pub fn expand(mut input: DeriveInput) -> Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.clone(),
            _ => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "Sheet can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "Sheet can only be derived for structs",
            ))
        }
    };

    for param in input.generics.type_params_mut() {
        param.bounds.push(parse_quote!(::cellgrid_codec::Sheet));
    }

    let mut shape = Vec::new();
    let mut values = Vec::new();
    let mut inits = Vec::new();
    for field in &fields {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let name = ident.to_string();
        let ty = &field.ty;

        if attrs.skip {
            let alias = match &attrs.rename {
                Some(key) => quote!(::core::option::Option::Some(#key)),
                None => quote!(::core::option::Option::None),
            };
            shape.push(quote!(.exclude(#name, #alias)));
            inits.push(quote!(#ident: ::core::default::Default::default()));
            continue;
        }

        let tag = attrs.tag();
        shape.push(quote!(.field(#name, #tag, <#ty as ::cellgrid_codec::Sheet>::shape())));
        values.push(quote!(::cellgrid_codec::Sheet::to_value(&self.#ident)));
        inits.push(quote!(#ident: fields.next::<#ty>()?));
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::cellgrid_codec::Sheet for #ident #ty_generics #where_clause {
            fn shape() -> ::cellgrid_codec::Shape {
                ::cellgrid_codec::Shape::Struct(
                    ::cellgrid_codec::StructShape::new(::core::any::type_name::<Self>())
                        #(#shape)*
                )
            }

            fn to_value(&self) -> ::cellgrid_codec::Value {
                ::cellgrid_codec::Value::Struct(::std::vec![#(#values),*])
            }

            #[allow(unused_mut, unused_variables)]
            fn from_value(
                value: ::cellgrid_codec::Value,
            ) -> ::core::result::Result<Self, ::cellgrid_codec::Error> {
                let mut fields = ::cellgrid_codec::FieldValues::new(value)?;
                ::core::result::Result::Ok(Self { #(#inits),* })
            }
        }
    })
}
