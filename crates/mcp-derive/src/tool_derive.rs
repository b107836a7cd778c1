//! `#[derive(Tool)]`: the proc-macro half of the bare-interface pattern
//! (spec §3.1 `ToolDecl`, §4.9 EXPANDED). A struct's fields are its
//! parameters — the same "struct is its own params type" shape
//! `mcp-compiler` reads back out of source text with `syn::parse_file`,
//! so one annotated struct serves both the static analyzer and this
//! runtime macro.
//!
//! The author still writes the implementation by hand:
//!
//! ```ignore
//! #[derive(Tool, serde::Deserialize)]
//! #[tool(name = "add", description = "Add two numbers")]
//! struct AddTool {
//!     #[param(description = "First number")]
//!     a: f64,
//!     #[param(description = "Second number")]
//!     b: f64,
//! }
//!
//! impl AddTool {
//!     async fn execute(&self) -> mcp_protocol::McpResult<serde_json::Value> {
//!         Ok(serde_json::json!({ "sum": self.a + self.b }))
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{doc_comment, find_attr_args};
use crate::utils::{auto_name, camel_to_readable, field_descriptor_tokens};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(struct_name, "#[derive(Tool)] only supports structs"));
    };
    let fields = match &data.fields {
        Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(struct_name, "#[derive(Tool)] requires named fields or a unit struct"));
        }
    };

    let tool_attr = find_attr_args(&input.attrs, "tool").unwrap_or_default();
    let name = tool_attr.string("name").map(str::to_string).unwrap_or_else(|| auto_name(&struct_name.to_string()));
    let description = tool_attr
        .string("description")
        .map(str::to_string)
        .or_else(|| doc_comment(&input.attrs))
        .unwrap_or_else(|| camel_to_readable(&struct_name.to_string()));
    let hidden = tool_attr.bool_flag("hidden");

    let field_descriptors = fields.iter().map(|f| field_descriptor_tokens(f)).collect::<Result<Vec<_>>>()?;
    let version_fallback = mcp_server_fallback_version();

    let hidden_call = hidden.then(|| quote! { .hidden() });

    let expanded = quote! {
        #[automatically_derived]
        impl #struct_name {
            /// Input schema synthesized from this struct's fields (spec
            /// §4.1); computed once and cached for the process lifetime.
            pub fn __mcp_input_schema() -> mcp_schema::JsonSchema {
                static SCHEMA: ::std::sync::OnceLock<mcp_schema::JsonSchema> = ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    let fields = ::std::vec![ #(#field_descriptors),* ];
                    mcp_schema::convert_object_fields(&fields).schema
                }).clone()
            }

            /// Reconstructs `Self` from the wire arguments the
            /// Dispatcher already validated against `__mcp_input_schema`
            /// (spec §4.6 step 2) — requires `Self: serde::Deserialize`.
            pub fn __mcp_from_args(args: serde_json::Value) -> ::std::result::Result<Self, String>
            where
                Self: for<'de> serde::Deserialize<'de>,
            {
                serde_json::from_value(args).map_err(|e| e.to_string())
            }

            /// Assembles the runtime [`mcp_builders::BuiltTool`] this
            /// declaration funnels into — the same builder a
            /// hand-written server would call directly (spec Design
            /// Notes §9, "programmatic API remains ground truth").
            pub fn into_built_tool() -> mcp_builders::BuiltTool
            where
                Self: for<'de> serde::Deserialize<'de>,
            {
                mcp_server::metadata_store::register(mcp_server::metadata_store::MetadataEntry {
                    type_name: ::std::stringify!(#struct_name),
                    kind: "tool",
                    declared_name: Some(#name.to_string()),
                    declared_version: Some(#version_fallback.to_string()),
                });

                mcp_builders::ToolBuilder::new(#name)
                    .description(#description)
                    .input_schema(Self::__mcp_input_schema())
                    #hidden_call
                    .execute(|args| async move {
                        let instance = Self::__mcp_from_args(args)
                            .map_err(mcp_protocol::McpError::Validation)?;
                        let value = instance.execute().await?;
                        Ok(mcp_server::normalize::normalize_value(
                            serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
                        ))
                    })
                    .build()
            }
        }
    };
    Ok(expanded)
}

fn mcp_server_fallback_version() -> TokenStream {
    quote! { ::std::option_env!("CARGO_PKG_VERSION").unwrap_or("1.0.0") }
}
