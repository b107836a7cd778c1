//! `#[derive(Prompt)]` (spec §3.1 `PromptDecl`, §4.6 `prompts/get`).
//!
//! Static form — a literal `template` attribute, substituted the way
//! [`mcp_builders::message::render_template`] does:
//!
//! ```ignore
//! #[derive(Prompt)]
//! #[prompt(name = "weather_report", template = "Generate a {style} weather report for {location}.")]
//! struct WeatherReportPrompt {
//!     location: String,
//!     style: String,
//! }
//! ```
//!
//! Dynamic form — fields double as the prompt's argument schema, and
//! the author supplies `render`:
//!
//! ```ignore
//! #[derive(Prompt, serde::Deserialize)]
//! #[prompt(name = "summary", dynamic = true)]
//! struct SummaryPrompt { topic: String }
//!
//! impl SummaryPrompt {
//!     async fn render(&self) -> mcp_protocol::McpResult<String> {
//!         Ok(format!("Summarize {}", self.topic))
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{doc_comment, find_attr_args};
use crate::utils::auto_name;

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(struct_name, "#[derive(Prompt)] only supports structs"));
    };
    let fields = match &data.fields {
        Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(struct_name, "#[derive(Prompt)] requires named fields or a unit struct"));
        }
    };

    let prompt_attr = find_attr_args(&input.attrs, "prompt").unwrap_or_default();
    let name = prompt_attr.string("name").map(str::to_string).unwrap_or_else(|| auto_name(&struct_name.to_string()));
    let description = prompt_attr.string("description").map(str::to_string).or_else(|| doc_comment(&input.attrs));
    let description_call = description.as_ref().map(|d| quote! { .description(#d) });
    let hidden = prompt_attr.bool_flag("hidden");
    let hidden_call = hidden.then(|| quote! { .hidden() });

    let argument_calls: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let ident = field.ident.as_ref().expect("named field");
            let field_name = ident.to_string();
            let param = find_attr_args(&field.attrs, "param").unwrap_or_default();
            let description = param.string("description").unwrap_or("").to_string();
            let required = !(param.bool_flag("optional") || crate::utils::is_option_type(&field.ty));
            quote! { .argument(#field_name, #description, #required) }
        })
        .collect();

    let body = if let Some(template) = prompt_attr.string("template") {
        quote! { .template(#template) }
    } else {
        quote! {
            .dynamic(|args| async move {
                let value = serde_json::Value::Object(args.into_iter().collect());
                let instance: Self = serde_json::from_value(value).map_err(|e| mcp_protocol::McpError::Validation(e.to_string()))?;
                instance.render().await
            })
        }
    };

    let expanded = quote! {
        #[automatically_derived]
        impl #struct_name {
            pub fn into_built_prompt() -> mcp_builders::BuiltPrompt
            where
                Self: for<'de> serde::Deserialize<'de>,
            {
                mcp_builders::PromptBuilder::new(#name)
                    #description_call
                    #(#argument_calls)*
                    #hidden_call
                    #body
                    .build()
            }
        }
    };
    Ok(expanded)
}
