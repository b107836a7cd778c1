//! Interface Compiler (spec §4): a static source analyzer standing in
//! for the original's TypeScript-checker-driven discovery pipeline.
//! Rust has no structural typing to scan for interface satisfaction, so
//! this crate recognizes a fixed vocabulary of attributes
//! (`#[derive(Tool)]`/`#[tool(..)]` and friends) as the declaration
//! surface instead, then links each declaration to its implementation
//! exactly as the original links an interface to its assigned handler.
//!
//! Pipeline: [`parser`] extracts declarations from source text, then
//! [`discoverer`] finds the handler bound to each one (bare-interface
//! `impl` block, or `*Helper<T>` wrapper), then [`validator`] checks
//! completeness, uniqueness, and cross-references.

pub mod attrs;
pub mod discoverer;
pub mod model;
pub mod parser;
pub mod types;
pub mod validator;

pub use model::{
    AuthDecl, Declaration, HelperKind, Implementation, ImplementationKind, ParseResult, PromptBody, PromptDecl,
    ResourceBody, ResourceDecl, RouterDecl, ServerDecl, SkillDecl, StructInstance, ToolDecl,
};
pub use validator::Diagnostic;

/// Runs the full pipeline over one source file's text and returns a
/// linked [`ParseResult`] — `validation_errors` is empty when every
/// declaration is implemented, unique, and cross-referenced correctly.
pub fn compile(source: &str) -> syn::Result<ParseResult> {
    let file = syn::parse_file(source)?;
    Ok(compile_file(&file))
}

pub fn compile_file(file: &syn::File) -> ParseResult {
    let decls = parser::parse_file(file);
    let (implementations, instances) = discoverer::discover(file);

    let mut result = ParseResult::default();
    for decl in decls {
        match decl {
            Declaration::Tool(t) => result.tools.push(t),
            Declaration::Prompt(p) => result.prompts.push(p),
            Declaration::Resource(r) => result.resources.push(r),
            Declaration::Skill(s) => result.skills.push(s),
            Declaration::Router(r) => result.routers.push(r),
            Declaration::Server(s) => result.server = Some(s),
        }
    }

    validator::link(&mut result, instances, implementations);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_a_complete_single_tool_server() {
        let source = r#"
            #[mcp_server(name = "calculator", version = "1.0.0")]
            struct CalculatorServer;

            #[derive(Tool)]
            #[tool(name = "add", description = "Add two numbers")]
            struct AddTool {
                a: f64,
                b: f64,
            }

            impl AddTool {
                async fn execute(&self) -> f64 {
                    self.a + self.b
                }
            }

            fn main() {
                let _server = CalculatorServer::new();
            }
        "#;
        let result = compile(source).unwrap();
        assert_eq!(result.tools.len(), 1);
        assert!(result.server.is_some());
        assert!(result.validation_errors.is_empty(), "unexpected errors: {:?}", result.validation_errors);
    }

    #[test]
    fn reports_every_problem_in_one_pass() {
        let source = r#"
            #[derive(Tool)]
            #[tool(name = "orphan")]
            struct OrphanTool { x: f64 }

            #[derive(Skill)]
            #[skill(name = "s", tools = ["does_not_exist"])]
            struct S;
        "#;
        let result = compile(source).unwrap();
        assert!(result.validation_errors.len() >= 2);
    }
}
