//! `#[mcp_server(...)]` (spec §3.1 `ServerDecl`, §4.2 point 4). An
//! attribute, not a derive — it decorates the struct in place rather
//! than requiring a separate marker trait, matching `mcp-compiler`'s
//! `parse_server` which looks for the bare attribute (no accompanying
//! `#[derive(...)]` is required of a server struct).
//!
//! ```ignore
//! #[mcp_server(name = "weather-server", version = "1.2.0", description = "Weather MCP server")]
//! #[auth(keys = ["demo-key"], clients = ["demo-client"], permissions = ["tools:call"])]
//! struct WeatherServer;
//! ```
//!
//! Expands to an inherent `server_info()` returning [`mcp_protocol::Implementation`]
//! with the smart name/version defaults spec §4.9 describes, and an
//! `auth_config()` returning the parsed `#[auth(...)]` declaration, if
//! present. A unit struct additionally gets `instance()`, matching
//! DESIGN.md's resolution of the `export default class` auto-
//! instantiation question — a struct with fields must be constructed
//! explicitly by the author instead.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Fields, ItemStruct, Result};

use crate::attrs::{doc_comment, find_attr_args, kebab_case};

pub fn expand(attr_args: TokenStream, item: ItemStruct) -> Result<TokenStream> {
    let struct_name = &item.ident;

    let server_attr_list: syn::punctuated::Punctuated<syn::Expr, syn::Token![,]> =
        syn::parse2(attr_args).unwrap_or_default();
    let synthetic_attr: syn::Attribute = syn::parse_quote! { #[mcp_server(#server_attr_list)] };
    let mut attrs = item.attrs.clone();
    attrs.push(synthetic_attr);

    let server_attr = find_attr_args(&attrs, "mcp_server").unwrap_or_default();
    let name = server_attr.string("name").map(str::to_string).unwrap_or_else(|| kebab_case(&struct_name.to_string()));
    let version = server_attr.string("version").map(str::to_string).unwrap_or_else(|| "1.0.0".to_string());
    let description = server_attr.string("description").map(str::to_string).or_else(|| doc_comment(&item.attrs));
    let description_tokens = match description {
        Some(d) => quote! { Some(#d.to_string()) },
        None => quote! { None },
    };

    let auth_fn = match find_attr_args(&item.attrs, "auth") {
        Some(auth_attr) => {
            let keys = auth_attr.list("keys");
            let clients = auth_attr.list("clients");
            let permissions = auth_attr.list("permissions");
            quote! {
                pub fn auth_config() -> Option<mcp_protocol::AuthConfig> {
                    Some(mcp_protocol::AuthConfig {
                        keys: ::std::vec![ #(#keys.to_string()),* ],
                        clients: ::std::vec![ #(#clients.to_string()),* ],
                        permissions: ::std::vec![ #(#permissions.to_string()),* ],
                    })
                }
            }
        }
        None => quote! {
            pub fn auth_config() -> Option<mcp_protocol::AuthConfig> {
                None
            }
        },
    };

    let is_unit = matches!(item.fields, Fields::Unit);
    let instance_fn = is_unit.then(|| {
        quote! {
            /// Auto-instantiation for a unit struct carrying `#[mcp_server]`
            /// with no required constructor arguments.
            pub fn instance() -> Self {
                #struct_name
            }
        }
    });

    // `#[auth(...)]`, if present, is parsed above and must not also reach
    // the compiler as an unrecognized helper attribute on the struct
    // item itself; strip it the way `#[mcp_server]` is implicitly
    // consumed by being the macro invoked here.
    let mut retained_attrs = item.attrs.clone();
    retained_attrs.retain(|a| !a.path().is_ident("auth"));

    let vis = &item.vis;
    let ident = &item.ident;
    let generics = &item.generics;
    let fields = &item.fields;
    let semi = if matches!(item.fields, Fields::Named(_)) { None } else { Some(quote! { ; }) };

    let expanded = quote! {
        #(#retained_attrs)*
        #vis struct #ident #generics #fields #semi

        #[automatically_derived]
        impl #struct_name {
            pub fn server_info() -> mcp_protocol::Implementation {
                mcp_protocol::Implementation {
                    name: #name.to_string(),
                    version: #version.to_string(),
                    description: #description_tokens,
                }
            }

            #auth_fn
            #instance_fn
        }
    };
    Ok(expanded)
}
