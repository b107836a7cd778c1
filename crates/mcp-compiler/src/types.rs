//! AST-facing half of the Type→Schema Converter: maps a `syn::Type`
//! (plus the field's doc comment / `#[param]` attribute) onto the
//! language-neutral [`mcp_schema::TypeDescriptor`] the converter in
//! `mcp-schema` consumes. This is the Rust realization of "consumes an
//! AST type-literal" from spec §4.1 — `syn::Type` is this workspace's
//! AST type-literal node.

use std::collections::HashMap;

use mcp_schema::{FieldDescriptor, TypeDescriptor};
use syn::{Fields, GenericArgument, ItemStruct, Path, PathArguments, Type};

use crate::attrs::{doc_comment, find_attr_args};

/// Struct name → its field list, so nested object references (`Foo`
/// referencing another declared struct `Bar`) resolve recursively
/// instead of falling through to `Unknown`.
pub type StructTable<'a> = HashMap<String, &'a ItemStruct>;

pub fn build_struct_table(items: &[syn::Item]) -> StructTable<'_> {
    let mut table = HashMap::new();
    for item in items {
        if let syn::Item::Struct(s) = item {
            table.insert(s.ident.to_string(), s);
        }
    }
    table
}

/// Convert one struct's named fields into the member list the Type→Schema
/// Converter operates on (spec §4.1).
pub fn struct_fields_to_descriptors(s: &ItemStruct, table: &StructTable) -> Vec<FieldDescriptor> {
    let Fields::Named(named) = &s.fields else {
        return Vec::new();
    };
    named
        .named
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let (ty, optional) = type_to_descriptor(&field.ty, table);
            let mut descriptor = FieldDescriptor::new(ident.to_string(), ty);
            if optional {
                descriptor = descriptor.optional();
            }
            if let Some(description) = doc_comment(&field.attrs) {
                descriptor = descriptor.with_description(description);
            }
            if let Some(param) = find_attr_args(&field.attrs, "param") {
                if let Some(description) = param.string("description") {
                    descriptor.description = Some(description.to_string());
                }
                descriptor.minimum = param.strings.get("min").and_then(|s| s.parse().ok());
                descriptor.maximum = param.strings.get("max").and_then(|s| s.parse().ok());
                descriptor.min_length = param.strings.get("min_length").and_then(|s| s.parse().ok());
                descriptor.max_length = param.strings.get("max_length").and_then(|s| s.parse().ok());
            }
            Some(descriptor)
        })
        .collect()
}

/// Returns `(descriptor, optional)` — `optional` is true for `Option<T>`
/// members (spec §4.1 "trailing `?`" rule, ported to Rust's `Option`).
pub fn type_to_descriptor(ty: &Type, table: &StructTable) -> (TypeDescriptor, bool) {
    let Type::Path(type_path) = ty else {
        return (TypeDescriptor::Unknown(quote::quote!(#ty).to_string()), false);
    };
    let segment = type_path.path.segments.last().expect("non-empty path");
    let ident = segment.ident.to_string();

    match ident.as_str() {
        "Option" => {
            let inner = first_generic_type(&segment.arguments);
            let (descriptor, _) = inner
                .map(|t| type_to_descriptor(t, table))
                .unwrap_or((TypeDescriptor::Unknown("Option<?>".into()), false));
            (descriptor, true)
        }
        "Vec" => {
            let inner = first_generic_type(&segment.arguments);
            let (descriptor, _) = inner
                .map(|t| type_to_descriptor(t, table))
                .unwrap_or((TypeDescriptor::Unknown("Vec<?>".into()), false));
            (TypeDescriptor::Array(Box::new(descriptor)), false)
        }
        "String" | "str" => (TypeDescriptor::String, false),
        "bool" => (TypeDescriptor::Boolean, false),
        "f32" | "f64" => (TypeDescriptor::Number, false),
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64" | "u128" | "usize" => {
            (TypeDescriptor::Integer, false)
        }
        "()" => (TypeDescriptor::Null, false),
        other => {
            if let Some(referenced) = table.get(other) {
                let nested = struct_fields_to_descriptors(referenced, table);
                (TypeDescriptor::Object(nested), false)
            } else {
                (TypeDescriptor::Unknown(other.to_string()), false)
            }
        }
    }
}

fn first_generic_type(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(t) => Some(t),
        _ => None,
    })
}

/// A fieldless enum whose variants are all unit variants converts to a
/// `StringEnum` (spec §4.1 "literal union of strings").
pub fn unit_enum_to_descriptor(e: &syn::ItemEnum) -> Option<TypeDescriptor> {
    let all_unit = e.variants.iter().all(|v| matches!(v.fields, Fields::Unit));
    if !all_unit {
        return None;
    }
    Some(TypeDescriptor::StringEnum(e.variants.iter().map(|v| v.ident.to_string()).collect()))
}

pub fn path_last_ident(path: &Path) -> Option<String> {
    path.segments.last().map(|s| s.ident.to_string())
}
