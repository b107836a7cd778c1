//! `#[derive(Router)]` (spec §3.1 `RouterDecl`, §4.5 bundling). A router
//! bundles a fixed list of already-declared tool names behind one
//! namespaced entry point; it has no handler of its own.
//!
//! ```ignore
//! #[derive(Router)]
//! #[router(name = "billing", description = "Billing operations", tools = ["charge", "refund"])]
//! struct BillingRouter;
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::attrs::{doc_comment, find_attr_args};
use crate::utils::{auto_name, camel_to_readable};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let router_attr = find_attr_args(&input.attrs, "router").unwrap_or_default();
    let name = router_attr.string("name").map(str::to_string).unwrap_or_else(|| auto_name(&struct_name.to_string()));
    let description = router_attr
        .string("description")
        .map(str::to_string)
        .or_else(|| doc_comment(&input.attrs))
        .unwrap_or_else(|| camel_to_readable(&struct_name.to_string()));
    let tool_calls: Vec<TokenStream> = router_attr.list("tools").iter().map(|t| quote! { .tool(#t) }).collect();

    let expanded = quote! {
        #[automatically_derived]
        impl #struct_name {
            pub fn into_router_definition() -> mcp_builders::traits::RouterDefinition {
                mcp_builders::RouterBuilder::new(#name)
                    .description(#description)
                    #(#tool_calls)*
                    .build()
            }
        }
    };
    Ok(expanded)
}
