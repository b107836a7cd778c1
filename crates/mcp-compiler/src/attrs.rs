//! Attribute literal extraction shared by the Source Parser and
//! Implementation Discoverer. Grounded on the `syn::Attribute` parsing
//! idiom `turul-mcp-derive`'s `tool_attr.rs`/`resource_attr.rs` use for
//! their `#[tool(...)]`/`#[resource(...)]` proc-macro attributes,
//! generalized here to read the same attribute shape from arbitrary
//! source text rather than a macro's own `TokenStream` input.

use std::collections::HashMap;

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Lit, Meta, MetaNameValue, Token};

/// Parsed `key = "value"` / `key = true` pairs out of a `#[name(...)]`
/// attribute's argument list.
#[derive(Debug, Default, Clone)]
pub struct AttrArgs {
    pub strings: HashMap<String, String>,
    pub bools: HashMap<String, bool>,
    /// Bracketed list arguments, e.g. `tools = ["a", "b"]`.
    pub lists: HashMap<String, Vec<String>>,
}

impl AttrArgs {
    pub fn string(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
    pub fn bool_flag(&self, key: &str) -> bool {
        self.bools.get(key).copied().unwrap_or(false)
    }
    pub fn list(&self, key: &str) -> Vec<String> {
        self.lists.get(key).cloned().unwrap_or_default()
    }
}

/// Find the first attribute named `name` (e.g. `tool`, `prompt`,
/// `resource`, `router`, `skill`, `mcp_server`) and parse its arguments.
pub fn find_attr_args(attrs: &[Attribute], name: &str) -> Option<AttrArgs> {
    let attr = attrs.iter().find(|a| a.path().is_ident(name))?;
    Some(parse_attr_args(attr))
}

pub fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|a| a.path().is_ident(name))
}

pub fn has_derive(attrs: &[Attribute], trait_name: &str) -> bool {
    attrs.iter().any(|attr| {
        if !attr.path().is_ident("derive") {
            return false;
        }
        let Ok(paths) = attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated) else {
            return false;
        };
        paths.iter().any(|p| p.is_ident(trait_name))
    })
}

fn parse_attr_args(attr: &Attribute) -> AttrArgs {
    let mut out = AttrArgs::default();
    let Meta::List(list) = &attr.meta else {
        return out;
    };
    let Ok(entries) = syn::parse2::<Punctuated<Expr, Token![,]>>(list.tokens.clone()) else {
        return out;
    };
    for entry in entries {
        let Expr::Assign(assign) = entry else { continue };
        let Expr::Path(key_path) = *assign.left else { continue };
        let Some(key) = key_path.path.get_ident().map(|i| i.to_string()) else { continue };
        match *assign.right {
            Expr::Lit(syn::ExprLit { lit: Lit::Str(s), .. }) => {
                out.strings.insert(key, s.value());
            }
            Expr::Lit(syn::ExprLit { lit: Lit::Bool(b), .. }) => {
                out.bools.insert(key, b.value());
            }
            Expr::Array(array) => {
                let values = array
                    .elems
                    .iter()
                    .filter_map(|e| match e {
                        Expr::Lit(syn::ExprLit { lit: Lit::Str(s), .. }) => Some(s.value()),
                        _ => None,
                    })
                    .collect();
                out.lists.insert(key, values);
            }
            _ => {}
        }
    }
    out
}

/// Extract `name = value` literal pairs from a `const x: T = Struct { .. }`
/// or struct-literal field-init list — used to read a server's inline
/// `auth` object or a static resource's `data`/`value` literal.
pub fn struct_literal_fields(expr: &Expr) -> HashMap<String, Expr> {
    let mut out = HashMap::new();
    if let Expr::Struct(s) = expr {
        for field in &s.fields {
            if let syn::Member::Named(ident) = &field.member {
                out.insert(ident.to_string(), field.expr.clone());
            }
        }
    }
    out
}

pub fn expr_as_string(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(syn::ExprLit { lit: Lit::Str(s), .. }) => Some(s.value()),
        _ => None,
    }
}

/// Doc comments attached via `#[doc = "..."]` (what `///` desugars to).
pub fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(MetaNameValue { value: Expr::Lit(syn::ExprLit { lit: Lit::Str(s), .. }), .. }) = &attr.meta {
                Some(s.value().trim().to_string())
            } else {
                None
            }
        })
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
