//! `#[derive(Resource)]` (spec §3.1 `ResourceDecl`, §4.6 read algorithm,
//! §6.4 static content serialization). Resource structs carry no
//! per-call arguments — they describe one fixed URI, so the struct body
//! is typically a unit struct; any fields present are ignored by the
//! generated code (they exist, if at all, for the author's own use).
//!
//! Static form:
//!
//! ```ignore
//! #[derive(Resource)]
//! #[resource(uri = "config://server", name = "Server Config", mime_type = "application/json",
//!            value = r#"{"apiVersion":"3.0.0"}"#)]
//! struct ServerConfigResource;
//! ```
//!
//! Dynamic form — the author implements an associated `read`:
//!
//! ```ignore
//! #[derive(Resource)]
//! #[resource(uri = "clock://now", name = "Current Time", dynamic = true)]
//! struct ClockResource;
//!
//! impl ClockResource {
//!     async fn read() -> mcp_protocol::McpResult<mcp_builders::ResourcePayload> {
//!         Ok(mcp_builders::ResourcePayload::Text(format!("{:?}", std::time::SystemTime::now())))
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::attrs::{doc_comment, find_attr_args};
use crate::utils::{auto_name, camel_to_readable};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let resource_attr = find_attr_args(&input.attrs, "resource").unwrap_or_default();
    let uri = resource_attr.string("uri").ok_or_else(|| {
        syn::Error::new_spanned(struct_name, "#[derive(Resource)] requires #[resource(uri = \"...\")]")
    })?.to_string();
    let name = resource_attr.string("name").map(str::to_string).unwrap_or_else(|| auto_name(&struct_name.to_string()));
    let description = resource_attr
        .string("description")
        .map(str::to_string)
        .or_else(|| doc_comment(&input.attrs))
        .unwrap_or_else(|| camel_to_readable(&struct_name.to_string()));
    let mime_type = resource_attr.string("mime_type").map(str::to_string);
    let mime_type_call = mime_type.as_ref().map(|m| quote! { .mime_type(#m) });
    let hidden = resource_attr.bool_flag("hidden");
    let hidden_call = hidden.then(|| quote! { .hidden() });

    let body = if resource_attr.bool_flag("dynamic") {
        quote! { .dynamic(|| async move { Self::read().await }) }
    } else {
        let literal = resource_attr.string("data").or_else(|| resource_attr.string("value")).unwrap_or("").to_string();
        quote! {
            .literal(
                serde_json::from_str::<serde_json::Value>(#literal)
                    .unwrap_or_else(|_| serde_json::Value::String(#literal.to_string()))
            )
        }
    };

    let expanded = quote! {
        #[automatically_derived]
        impl #struct_name {
            pub fn into_built_resource() -> ::std::result::Result<mcp_builders::BuiltResource, String> {
                mcp_builders::ResourceBuilder::new(#uri, #name)
                    .description(#description)
                    #mime_type_call
                    #hidden_call
                    #body
                    .build()
            }
        }
    };
    Ok(expanded)
}
