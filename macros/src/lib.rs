//! Derive macros for Composable Glue
//!
//! This crate provides procedural macros that remove the hand-written
//! `get`/`set` boilerplate when linking child components to a parent model.
//!
//! # Available Macros
//!
//! - `#[derive(Glue)]` - Generates one descriptor constructor per tagged field
//!
//! # Example
//!
//! ```ignore
//! use composable_glue_macros::Glue;
//!
//! #[derive(Glue, Clone, Debug)]
//! struct Model {
//!     #[glue(embed = Msg::Counter, msg = Msg, sub_msg = CounterMsg)]
//!     counter: Counter,
//!
//!     #[glue(simple)]
//!     label: String,
//!
//!     #[glue(lazy, poly, msg = Msg)]
//!     settings: Option<Settings>,
//! }
//!
//! // Generated constructors:
//! let counter = Model::counter_glue();   // Glue<Model, Counter, Msg, CounterMsg>
//! let label = Model::label_glue();       // SimpleGlue<Model, String>
//! let settings = Model::settings_glue(); // LazyGlue<Model, Settings, Msg, Msg>
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Field, Fields, GenericArgument, Path,
    PathArguments, Type,
};

/// Derive macro for parent model structs
///
/// For every field carrying a `#[glue(...)]` attribute, generates an
/// associated function `<field>_glue()` returning a descriptor whose `get`
/// reads that field and whose `set` rebuilds the struct with only that field
/// replaced. Generated descriptors satisfy the round-trip and
/// non-interference laws by construction.
///
/// # Attributes
///
/// - `#[glue(embed = Path, msg = Type, sub_msg = Type)]` - [`Glue`] with an explicit embedding
/// - `#[glue(poly, msg = Type)]` - [`Glue`] whose embedding is the identity
/// - `#[glue(simple)]` - `SimpleGlue` for a message-less child
/// - `lazy` - combined with either of the first two forms on an `Option<T>`
///   field, generates a `LazyGlue` over `T`
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to anything but a struct with named fields
/// - An attribute mixes incompatible keys or misses a required one
/// - `lazy` is used on a field that is not an `Option<T>`
///
/// [`Glue`]: https://docs.rs/composable-glue
#[proc_macro_derive(Glue, attributes(glue))]
pub fn derive_glue(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Glue)] can only be used on structs",
        ));
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new_spanned(
            &data_struct.fields,
            "#[derive(Glue)] requires named fields",
        ));
    };

    let mut constructors = Vec::new();
    for field in &fields.named {
        if let Some(options) = parse_field(field)? {
            constructors.push(constructor(field, &options)?);
        }
    }

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #(#constructors)*
        }
    })
}

/// Parsed `#[glue(...)]` attribute of one field
#[derive(Default)]
struct GlueOptions {
    embed: Option<Path>,
    msg: Option<Type>,
    sub_msg: Option<Type>,
    poly: bool,
    simple: bool,
    lazy: bool,
}

/// Descriptor flavour requested by a field attribute
enum Flavour<'a> {
    General {
        embed: &'a Path,
        msg: &'a Type,
        sub_msg: &'a Type,
    },
    Poly {
        msg: &'a Type,
    },
    Simple,
}

fn parse_field(field: &Field) -> syn::Result<Option<GlueOptions>> {
    let attrs: Vec<&Attribute> = field
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("glue"))
        .collect();

    let [attr] = attrs.as_slice() else {
        return match attrs.len() {
            0 => Ok(None),
            _ => Err(syn::Error::new_spanned(
                field,
                "only one #[glue(...)] attribute is allowed per field",
            )),
        };
    };

    let mut options = GlueOptions::default();
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("embed") {
            options.embed = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("msg") {
            options.msg = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("sub_msg") {
            options.sub_msg = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("poly") {
            options.poly = true;
        } else if meta.path.is_ident("simple") {
            options.simple = true;
        } else if meta.path.is_ident("lazy") {
            options.lazy = true;
        } else {
            return Err(meta.error("expected one of: embed, msg, sub_msg, poly, simple, lazy"));
        }
        Ok(())
    })?;

    Ok(Some(options))
}

fn flavour<'a>(field: &Field, options: &'a GlueOptions) -> syn::Result<Flavour<'a>> {
    let error = |message: &str| Err(syn::Error::new_spanned(field, message));

    match options {
        GlueOptions {
            simple: true,
            embed: None,
            msg: None,
            sub_msg: None,
            poly: false,
            lazy: false,
        } => Ok(Flavour::Simple),
        GlueOptions { simple: true, .. } => {
            error("`simple` cannot be combined with other glue keys")
        },
        GlueOptions {
            poly: true,
            embed: None,
            sub_msg: None,
            msg: Some(msg),
            ..
        } => Ok(Flavour::Poly { msg }),
        GlueOptions { poly: true, msg: None, .. } => error("`poly` requires `msg = Type`"),
        GlueOptions { poly: true, .. } => {
            error("`poly` uses the identity embedding; remove `embed` and `sub_msg`")
        },
        GlueOptions {
            embed: Some(embed),
            msg: Some(msg),
            sub_msg: Some(sub_msg),
            ..
        } => Ok(Flavour::General {
            embed,
            msg,
            sub_msg,
        }),
        GlueOptions { .. } => error(
            "expected `embed = Path, msg = Type, sub_msg = Type`, `poly, msg = Type` or `simple`",
        ),
    }
}

fn constructor(field: &Field, options: &GlueOptions) -> syn::Result<TokenStream2> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "field must be named"));
    };
    let fn_name = format_ident!("{}_glue", ident.unraw());
    let field_ty = &field.ty;
    let doc = format!("Descriptor linking `Self` to its `{}` field", ident.unraw());

    let get = quote! { |model: &Self| &model.#ident };
    let set = quote! { |value, model| Self { #ident: value, ..model } };

    let body = match (flavour(field, options)?, options.lazy) {
        (Flavour::Simple, _) => quote! {
            pub fn #fn_name() -> ::composable_glue::SimpleGlue<Self, #field_ty> {
                ::composable_glue::SimpleGlue::new(#get, #set)
            }
        },
        (Flavour::General { embed, msg, sub_msg }, false) => quote! {
            pub fn #fn_name() -> ::composable_glue::Glue<Self, #field_ty, #msg, #sub_msg> {
                ::composable_glue::Glue::new(#embed, #get, #set)
            }
        },
        (Flavour::Poly { msg }, false) => quote! {
            pub fn #fn_name() -> ::composable_glue::Glue<Self, #field_ty, #msg, #msg> {
                ::composable_glue::Glue::poly(#get, #set)
            }
        },
        (Flavour::General { embed, msg, sub_msg }, true) => {
            let inner = option_inner(field_ty)?;
            quote! {
                pub fn #fn_name() -> ::composable_glue::LazyGlue<Self, #inner, #msg, #sub_msg> {
                    ::composable_glue::LazyGlue::new(#embed, #get, #set)
                }
            }
        },
        (Flavour::Poly { msg }, true) => {
            let inner = option_inner(field_ty)?;
            quote! {
                pub fn #fn_name() -> ::composable_glue::LazyGlue<Self, #inner, #msg, #msg> {
                    ::composable_glue::LazyGlue::poly(#get, #set)
                }
            }
        },
    };

    Ok(quote! {
        #[doc = #doc]
        #[must_use]
        #[allow(clippy::needless_update)]
        #body
    })
}

/// Extract `T` from a field typed `Option<T>`
fn option_inner(ty: &Type) -> syn::Result<&Type> {
    let not_option = || syn::Error::new_spanned(ty, "`lazy` requires a field of type `Option<T>`");

    let Type::Path(type_path) = ty else {
        return Err(not_option());
    };
    let Some(segment) = type_path.path.segments.last() else {
        return Err(not_option());
    };
    if segment.ident != "Option" {
        return Err(not_option());
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return Err(not_option());
    };
    match arguments.args.first() {
        Some(GenericArgument::Type(inner)) if arguments.args.len() == 1 => Ok(inner),
        _ => Err(not_option()),
    }
}
