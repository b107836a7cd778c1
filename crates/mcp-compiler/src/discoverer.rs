//! Implementation Discoverer (spec §4.3): finds the handler bound to
//! each declared interface, in either the bare-interface pattern
//! (`impl FooTool { async fn execute(...) }`) or the wrapper pattern
//! (`const X: ToolHelper<FooTool> = ...`), plus struct instantiations.

use syn::visit::Visit;
use syn::{Expr, ExprCall, ExprPath, Item, ItemConst, ItemImpl, ItemStatic, Type};

use crate::model::{HelperKind, Implementation, ImplementationKind, StructInstance};

/// Bare-interface method names recognized per declaration kind — the
/// Rust analogue of `const f: FooTool = handlerFn` binding directly to
/// the interface type, since Rust has no structural typing to match on:
/// an `impl StructName` block providing the expected method *is* the
/// bare-interface implementation.
const TOOL_METHOD: &str = "execute";
const PROMPT_METHOD: &str = "render";
const RESOURCE_METHOD: &str = "read";

pub fn discover(file: &syn::File) -> (Vec<Implementation>, Vec<StructInstance>) {
    let mut implementations = Vec::new();
    let mut instances = Vec::new();

    for item in &file.items {
        match item {
            Item::Impl(item_impl) => {
                if let Some(implementation) = bare_implementation(item_impl) {
                    implementations.push(implementation);
                }
            }
            Item::Const(item_const) => {
                if let Some(implementation) = wrapper_implementation_const(item_const) {
                    implementations.push(implementation);
                }
            }
            Item::Static(item_static) => {
                if let Some(implementation) = wrapper_implementation_static(item_static) {
                    implementations.push(implementation);
                }
            }
            Item::Struct(item_struct) => {
                // Unit-like struct with no fields is the Rust relaxation
                // of `export default class` auto-instantiation (DESIGN.md
                // decision #4): it needs no constructor args, so there is
                // nothing an author could get wrong by omitting `new()`.
                if matches!(item_struct.fields, syn::Fields::Unit) {
                    instances.push(StructInstance {
                        instance_name: item_struct.ident.to_string(),
                        struct_name: item_struct.ident.to_string(),
                        auto: true,
                    });
                }
            }
            _ => {}
        }
    }

    // `StructName::new(...)` calls anywhere in the file's function bodies
    // are explicit instantiations (spec §4.3 "top-level `new ClassName`").
    let mut visitor = NewCallVisitor::default();
    visitor.visit_file(file);
    for struct_name in visitor.found {
        instances.push(StructInstance { instance_name: struct_name.clone(), struct_name, auto: false });
    }

    (implementations, instances)
}

fn bare_implementation(item_impl: &ItemImpl) -> Option<Implementation> {
    // Only inherent impls (`impl Foo { .. }`), not trait impls, count as
    // bare-interface bindings — a trait impl is plumbing, not a handler.
    if item_impl.trait_.is_some() {
        return None;
    }
    let Type::Path(type_path) = item_impl.self_ty.as_ref() else {
        return None;
    };
    let struct_name = type_path.path.segments.last()?.ident.to_string();

    let (method_name, helper_type) = item_impl.items.iter().find_map(|item| {
        let syn::ImplItem::Fn(method) = item else { return None };
        let name = method.sig.ident.to_string();
        match name.as_str() {
            TOOL_METHOD => Some((name, HelperKind::Tool)),
            PROMPT_METHOD => Some((name, HelperKind::Prompt)),
            RESOURCE_METHOD => Some((name, HelperKind::Resource)),
            _ => None,
        }
    })?;

    Some(Implementation {
        name: method_name,
        interface_name: struct_name.clone(),
        helper_type,
        kind: ImplementationKind::ClassProperty,
        class_name: Some(struct_name),
        is_bare_interface: true,
    })
}

/// `const x: ToolHelper<Foo> = ...` / `PromptHelper<Foo>` /
/// `ResourceHelper<Foo>` — the wrapper pattern (spec §4.3). Preferred
/// over the bare pattern when both could match the same name, since a
/// wrapper is an unambiguous, explicit annotation.
fn wrapper_implementation_const(item_const: &ItemConst) -> Option<Implementation> {
    wrapper_from_type(&item_const.ty, &item_const.ident.to_string(), ImplementationKind::Const)
}

fn wrapper_implementation_static(item_static: &ItemStatic) -> Option<Implementation> {
    wrapper_from_type(&item_static.ty, &item_static.ident.to_string(), ImplementationKind::Const)
}

fn wrapper_from_type(ty: &Type, binding_name: &str, kind: ImplementationKind) -> Option<Implementation> {
    let Type::Path(type_path) = ty else { return None };
    let segment = type_path.path.segments.last()?;
    let wrapper = segment.ident.to_string();
    let helper_type = match wrapper.as_str() {
        "ToolHelper" => HelperKind::Tool,
        "PromptHelper" => HelperKind::Prompt,
        "ResourceHelper" => HelperKind::Resource,
        _ => return None,
    };
    let syn::PathArguments::AngleBracketed(generics) = &segment.arguments else {
        return None;
    };
    let interface_name = generics.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(Type::Path(p)) => p.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    })?;

    Some(Implementation {
        name: binding_name.to_string(),
        interface_name,
        helper_type,
        kind,
        class_name: None,
        is_bare_interface: false,
    })
}

#[derive(Default)]
struct NewCallVisitor {
    found: Vec<String>,
}

impl<'ast> Visit<'ast> for NewCallVisitor {
    fn visit_expr_call(&mut self, call: &'ast ExprCall) {
        if let Expr::Path(ExprPath { path, .. }) = call.func.as_ref() {
            if path.segments.len() >= 2 {
                let last_two: Vec<_> = path.segments.iter().rev().take(2).collect();
                if last_two[0].ident == "new" {
                    self.found.push(last_two[1].ident.to_string());
                }
            }
        }
        syn::visit::visit_expr_call(self, call);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_interface_execute_method_is_discovered() {
        let source = r#"
            #[derive(Tool)]
            #[tool(name = "add")]
            struct AddTool { a: f64, b: f64 }

            impl AddTool {
                async fn execute(&self) -> f64 { self.a + self.b }
            }
        "#;
        let file = syn::parse_file(source).unwrap();
        let (implementations, _) = discover(&file);
        assert_eq!(implementations.len(), 1);
        assert!(implementations[0].is_bare_interface);
        assert_eq!(implementations[0].helper_type, HelperKind::Tool);
    }

    #[test]
    fn wrapper_pattern_is_discovered() {
        let source = r#"
            const add_tool: ToolHelper<AddTool> = ToolHelper::new();
        "#;
        let file = syn::parse_file(source).unwrap();
        let (implementations, _) = discover(&file);
        assert_eq!(implementations.len(), 1);
        assert!(!implementations[0].is_bare_interface);
        assert_eq!(implementations[0].interface_name, "AddTool");
    }

    #[test]
    fn explicit_new_call_is_an_instance() {
        let source = r#"
            fn main() {
                let server = MyServer::new();
            }
        "#;
        let file = syn::parse_file(source).unwrap();
        let (_, instances) = discover(&file);
        assert!(instances.iter().any(|i| i.struct_name == "MyServer" && !i.auto));
    }

    #[test]
    fn unit_struct_server_is_auto_instantiated() {
        let source = r#"
            #[mcp_server(name = "demo")]
            struct DemoServer;
        "#;
        let file = syn::parse_file(source).unwrap();
        let (_, instances) = discover(&file);
        assert!(instances.iter().any(|i| i.struct_name == "DemoServer" && i.auto));
    }
}
