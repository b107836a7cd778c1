//! `#[derive(Skill)]` (spec §3.1 `SkillDecl`, §4.5 bundling). A skill
//! groups already-declared tools, resources, and prompts under one
//! named, markdown-renderable bundle.
//!
//! ```ignore
//! #[derive(Skill)]
//! #[skill(name = "onboarding", description = "New customer onboarding",
//!         tools = ["create_account"], resources = ["config://server"], prompts = ["welcome"])]
//! struct OnboardingSkill;
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::attrs::{doc_comment, find_attr_args};
use crate::utils::{auto_name, camel_to_readable};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let skill_attr = find_attr_args(&input.attrs, "skill").unwrap_or_default();
    let name = skill_attr.string("name").map(str::to_string).unwrap_or_else(|| auto_name(&struct_name.to_string()));
    let description = skill_attr
        .string("description")
        .map(str::to_string)
        .or_else(|| doc_comment(&input.attrs))
        .unwrap_or_else(|| camel_to_readable(&struct_name.to_string()));
    let tool_calls: Vec<TokenStream> = skill_attr.list("tools").iter().map(|t| quote! { .tool(#t) }).collect();
    let resource_calls: Vec<TokenStream> = skill_attr.list("resources").iter().map(|r| quote! { .resource(#r) }).collect();
    let prompt_calls: Vec<TokenStream> = skill_attr.list("prompts").iter().map(|p| quote! { .prompt(#p) }).collect();

    let expanded = quote! {
        #[automatically_derived]
        impl #struct_name {
            pub fn into_skill_definition() -> mcp_builders::traits::SkillDefinition {
                mcp_builders::SkillBuilder::new(#name)
                    .description(#description)
                    #(#tool_calls)*
                    #(#resource_calls)*
                    #(#prompt_calls)*
                    .build()
            }
        }
    };
    Ok(expanded)
}
