//! Top-level item collection.
//!
//! The item table records where each enum, function, module and
//! module-level `let` capture is declared. It stores node pointers rather
//! than nodes so a compilation unit can be shared between threads; nodes
//! are recovered from the unit's tree on demand.

use indexmap::IndexMap;
use rowan::ast::SyntaxNodePtr;
use smol_str::SmolStr;
use strand_syntax::syntax::{StrandLanguage, SyntaxKind, SyntaxNode};
use text_size::TextRange;

use crate::cst;
use crate::diagnostics::CompileError;

type NodePtr = SyntaxNodePtr<StrandLanguage>;

/// A declared module and its members.
#[derive(Debug, Clone)]
pub(crate) struct ModuleItem {
    pub(crate) node: NodePtr,
    pub(crate) methods: IndexMap<SmolStr, NodePtr>,
}

/// Items declared at the top level of a source file.
#[derive(Debug, Clone, Default)]
pub(crate) struct ItemTable {
    enums: IndexMap<SmolStr, NodePtr>,
    functions: IndexMap<SmolStr, NodePtr>,
    modules: IndexMap<SmolStr, ModuleItem>,
    captures: IndexMap<SmolStr, NodePtr>,
}

impl ItemTable {
    /// Collects items from a parsed source file.
    pub(crate) fn collect(root: &SyntaxNode) -> Result<Self, CompileError> {
        let mut table = Self::default();
        let mut seen: IndexMap<SmolStr, TextRange> = IndexMap::new();

        for item in root.children() {
            let Some((name, range)) = cst::declared_name(&item) else {
                continue;
            };
            if seen.insert(name.clone(), range).is_some() {
                return Err(CompileError::DuplicateDefinition {
                    name,
                    range: Some(range),
                });
            }

            let ptr = NodePtr::new(&item);
            match item.kind() {
                SyntaxKind::EnumDecl => {
                    table.enums.insert(name, ptr);
                }
                SyntaxKind::FnDecl => {
                    table.functions.insert(name, ptr);
                }
                SyntaxKind::ModuleDecl => {
                    let mut methods = IndexMap::new();
                    for method in cst::children(&item, SyntaxKind::FnDecl) {
                        if let Some((method_name, method_range)) = cst::declared_name(&method) {
                            if methods
                                .insert(method_name.clone(), NodePtr::new(&method))
                                .is_some()
                            {
                                return Err(CompileError::DuplicateDefinition {
                                    name: method_name,
                                    range: Some(method_range),
                                });
                            }
                        }
                    }
                    table.modules.insert(name, ModuleItem { node: ptr, methods });
                }
                SyntaxKind::LetStmt => {
                    table.captures.insert(name, ptr);
                }
                _ => {}
            }
        }

        Ok(table)
    }

    pub(crate) fn enum_decl(&self, name: &str) -> Option<&NodePtr> {
        self.enums.get(name)
    }

    pub(crate) fn function(&self, name: &str) -> Option<&NodePtr> {
        self.functions.get(name)
    }

    pub(crate) fn module(&self, name: &str) -> Option<&ModuleItem> {
        self.modules.get(name)
    }

    pub(crate) fn capture(&self, name: &str) -> Option<&NodePtr> {
        self.captures.get(name)
    }

    pub(crate) fn enum_names(&self) -> impl Iterator<Item = &SmolStr> {
        self.enums.keys()
    }

    pub(crate) fn function_names(&self) -> impl Iterator<Item = &SmolStr> {
        self.functions.keys()
    }

    pub(crate) fn module_names(&self) -> impl Iterator<Item = &SmolStr> {
        self.modules.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCode;
    use strand_syntax::parse;

    #[test]
    fn test_collect_items() {
        let source = r#"
enum Color { RED = 1 }
let c = Color;
fn f(x: Color) -> bool { return x == c.RED; }
module M { e: Color; fn forward(self) { return self.e; } }
"#;
        let parse = parse(source);
        let table = ItemTable::collect(&parse.syntax()).unwrap();
        assert!(table.enum_decl("Color").is_some());
        assert!(table.capture("c").is_some());
        assert!(table.function("f").is_some());
        let module = table.module("M").expect("module");
        assert!(module.methods.contains_key("forward"));
        assert!(table.function("forward").is_none());
    }

    #[test]
    fn test_duplicate_names() {
        let parse = parse("enum Color { RED = 1 }\nfn Color() { }");
        let error = ItemTable::collect(&parse.syntax()).unwrap_err();
        assert_eq!(error.code(), DiagnosticCode::DuplicateDefinition);
        assert_eq!(error.to_string(), "'Color' is already defined");
    }
}
