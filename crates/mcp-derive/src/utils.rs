//! Shared codegen helpers: struct-name → name/description defaults,
//! and `syn::Type` → [`mcp_schema::TypeDescriptor`] construction tokens.
//! Grounded on the teacher's `utils.rs::type_to_schema`, generalized to
//! emit a `TypeDescriptor` constructor (evaluated once behind a
//! `OnceLock` by the generated schema accessor) instead of a
//! `JsonSchema` literal directly, so the mapping rules live in one
//! place (`mcp-schema::convert_type`) shared with `mcp-compiler` rather
//! than duplicated per call site.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Field, GenericArgument, PathArguments, Type};

use crate::attrs::{doc_comment, find_attr_args, kebab_case};

/// `FooTool` / `FooPrompt` / `FooResource` → readable words ("Foo
/// Tool"), used as a description fallback when no attribute supplies one
/// (mirrors the teacher's `camel_to_readable`).
pub fn camel_to_readable(input: &str) -> String {
    let mut out = String::new();
    for (i, ch) in input.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

pub fn auto_name(struct_name: &str) -> String {
    kebab_case(struct_name).replace('-', "_")
}

/// Returns `true` when `ty` is `Option<_>`.
pub fn is_option_type(ty: &Type) -> bool {
    option_inner(ty).is_some()
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else { return None };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(t) => Some(t),
        _ => None,
    })
}

fn vec_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != "Vec" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else { return None };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(t) => Some(t),
        _ => None,
    })
}

/// Emits a `mcp_schema::TypeDescriptor` constructor expression for `ty`.
/// Named types this macro cannot see the definition of (anything beyond
/// the primitives/`Option`/`Vec`) fall through to `Unknown` — the same
/// "does not throw, degrades to `{}` plus a warning" contract
/// `mcp-schema::convert_type` documents, since a single derive expansion
/// has no view of the whole crate the way `mcp-compiler`'s struct table
/// does.
pub fn type_descriptor_tokens(ty: &Type) -> TokenStream {
    if let Some(inner) = option_inner(ty) {
        return type_descriptor_tokens(inner);
    }
    if let Some(inner) = vec_inner(ty) {
        let inner_tokens = type_descriptor_tokens(inner);
        return quote! { mcp_schema::TypeDescriptor::Array(Box::new(#inner_tokens)) };
    }
    let Type::Path(type_path) = ty else {
        let label = quote!(#ty).to_string();
        return quote! { mcp_schema::TypeDescriptor::Unknown(#label.to_string()) };
    };
    let Some(ident) = type_path.path.get_ident() else {
        let label = quote!(#ty).to_string();
        return quote! { mcp_schema::TypeDescriptor::Unknown(#label.to_string()) };
    };
    match ident.to_string().as_str() {
        "String" | "str" => quote! { mcp_schema::TypeDescriptor::String },
        "bool" => quote! { mcp_schema::TypeDescriptor::Boolean },
        "f32" | "f64" => quote! { mcp_schema::TypeDescriptor::Number },
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64" | "u128" | "usize" => {
            quote! { mcp_schema::TypeDescriptor::Integer }
        }
        other => {
            let label = other.to_string();
            quote! { mcp_schema::TypeDescriptor::Unknown(#label.to_string()) }
        }
    }
}

/// Builds the `mcp_schema::FieldDescriptor::new(...)` expression for one
/// struct field, folding in `#[param(...)]` constraints and the doc
/// comment / member description tie-break (spec §4.1).
pub fn field_descriptor_tokens(field: &Field) -> syn::Result<TokenStream> {
    let ident = field.ident.as_ref().ok_or_else(|| {
        syn::Error::new_spanned(field, "Tool/Prompt derive requires named struct fields")
    })?;
    let name = ident.to_string();
    let ty_tokens = type_descriptor_tokens(&field.ty);
    let optional = is_option_type(&field.ty);

    let param = find_attr_args(&field.attrs, "param").unwrap_or_default();
    let description = param.string("description").map(str::to_string).or_else(|| doc_comment(&field.attrs));
    let description_tokens = description.map(|d| quote! { descriptor.description = Some(#d.to_string()); });

    let marked_optional = param.bool_flag("optional");
    let optional_tokens = (optional || marked_optional).then(|| quote! { descriptor = descriptor.optional(); });

    let min = param.strings.get("min").and_then(|s| s.parse::<f64>().ok());
    let max = param.strings.get("max").and_then(|s| s.parse::<f64>().ok());
    let min_length = param.strings.get("min_length").and_then(|s| s.parse::<u64>().ok());
    let max_length = param.strings.get("max_length").and_then(|s| s.parse::<u64>().ok());
    let min_tokens = min.map(|m| quote! { descriptor.minimum = Some(#m); });
    let max_tokens = max.map(|m| quote! { descriptor.maximum = Some(#m); });
    let min_length_tokens = min_length.map(|m| quote! { descriptor.min_length = Some(#m); });
    let max_length_tokens = max_length.map(|m| quote! { descriptor.max_length = Some(#m); });

    Ok(quote! {
        {
            #[allow(unused_mut)]
            let mut descriptor = mcp_schema::FieldDescriptor::new(#name, #ty_tokens);
            #optional_tokens
            #description_tokens
            #min_tokens
            #max_tokens
            #min_length_tokens
            #max_length_tokens
            descriptor
        }
    })
}
