//! `key = "value"` attribute-argument extraction for `#[tool(...)]`,
//! `#[param(...)]`, `#[prompt(...)]`, `#[arg(...)]`, `#[resource(...)]`,
//! `#[router(...)]`, `#[skill(...)]`, and `#[mcp_server(...)]`. Grounded
//! on the teacher's `tool_attr.rs`/`resource_attr.rs` parsing idiom,
//! collapsed to one generic extractor shared by every derive here
//! instead of one hand-rolled parser per attribute.

use std::collections::HashMap;

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Lit, Meta, MetaNameValue, Token};

#[derive(Debug, Default, Clone)]
pub struct AttrArgs {
    pub strings: HashMap<String, String>,
    pub bools: HashMap<String, bool>,
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

pub fn find_attr_args(attrs: &[Attribute], name: &str) -> Option<AttrArgs> {
    let attr = attrs.iter().find(|a| a.path().is_ident(name))?;
    Some(parse_attr_args(attr))
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

/// Doc comments attached via `#[doc = "..."]` (what `///` desugars to) —
/// used as a description fallback when an attribute omits one.
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

/// `FooBarTool` → `foo-bar-tool` (spec §4.9 smart default for a missing
/// `name`). Matches `mcp_server::metadata_store::kebab_case` exactly —
/// duplicated here rather than imported because this crate never links
/// against `mcp-server`'s runtime keyring at macro-expansion time; only
/// the code it *emits* does, at the user's own compile time.
pub fn kebab_case(struct_name: &str) -> String {
    let mut out = String::with_capacity(struct_name.len() + 4);
    for (i, ch) in struct_name.chars().enumerate() {
        if ch.is_uppercase() {
            if i != 0 {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
