//! Compilation units.
//!
//! A [`CompilationUnit`] owns one parsed source file together with the
//! options it was created with. Enum types, module classes and function
//! graphs are produced lazily on first use and cached for the lifetime of
//! the unit, so every reference within the unit observes the same
//! `Arc<EnumType>`.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use rowan::GreenNode;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use strand_syntax::syntax::{SyntaxKind, SyntaxNode};
use text_size::TextRange;
use tracing::{debug, trace};

use crate::cst;
use crate::diagnostics::CompileError;
use crate::emit::Emitter;
use crate::enums::{qualified_name, EnumDefinition, EnumRegistry};
use crate::ir::Graph;
use crate::items::ItemTable;
use crate::options::CompileOptions;
use crate::types::{ClassType, EnumType, Ty};

/// A parsed and item-collected source file.
pub struct CompilationUnit {
    source: Arc<str>,
    green: GreenNode,
    items: ItemTable,
    options: CompileOptions,
    registry: Arc<EnumRegistry>,
    enums: Mutex<FxHashMap<SmolStr, Arc<EnumType>>>,
    classes: Mutex<FxHashMap<SmolStr, Arc<ClassType>>>,
    graphs: Mutex<FxHashMap<SmolStr, Arc<Graph>>>,
}

impl std::fmt::Debug for CompilationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilationUnit")
            .field("module", &self.options.module)
            .field("features", &self.options.features)
            .finish_non_exhaustive()
    }
}

impl CompilationUnit {
    /// Parses `source` and collects its items, resolving enums against the
    /// process-wide registry.
    pub fn new(source: &str, options: CompileOptions) -> Result<Self, CompileError> {
        Self::with_registry(source, options, Arc::clone(EnumRegistry::global()))
    }

    /// Like [`new`](Self::new), with an explicit registry.
    pub fn with_registry(
        source: &str,
        options: CompileOptions,
        registry: Arc<EnumRegistry>,
    ) -> Result<Self, CompileError> {
        let parse = strand_syntax::parse(source);
        if let Some(error) = parse.errors().first() {
            return Err(CompileError::Syntax {
                message: error.message.clone(),
                range: Some(error.range),
            });
        }

        let root = parse.syntax();
        let items = ItemTable::collect(&root)?;
        debug!(
            module = %options.module,
            enums = items.enum_names().count(),
            functions = items.function_names().count(),
            modules = items.module_names().count(),
            "collected items"
        );

        Ok(Self {
            source: Arc::from(source),
            green: root.green().into_owned(),
            items,
            options,
            registry,
            enums: Mutex::new(FxHashMap::default()),
            classes: Mutex::new(FxHashMap::default()),
            graphs: Mutex::new(FxHashMap::default()),
        })
    }

    /// Source text of the unit.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Options the unit was created with.
    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Registry enum types are resolved against.
    #[must_use]
    pub fn registry(&self) -> &Arc<EnumRegistry> {
        &self.registry
    }

    /// Root of the syntax tree.
    #[must_use]
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub(crate) fn items(&self) -> &ItemTable {
        &self.items
    }

    /// Names of the declared enums, in source order.
    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.items.enum_names().map(SmolStr::as_str)
    }

    /// Names of the declared functions, in source order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.items.function_names().map(SmolStr::as_str)
    }

    /// Names of the declared modules, in source order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.items.module_names().map(SmolStr::as_str)
    }

    // =========================================================================
    // Graphs
    // =========================================================================

    /// Type checks and emits the graph of the free function `name`.
    pub fn function_graph(&self, name: &str) -> Result<Arc<Graph>, CompileError> {
        if let Some(graph) = self.graphs.lock().get(name) {
            return Ok(Arc::clone(graph));
        }

        let node = self
            .items
            .function(name)
            .map(|ptr| ptr.to_node(&self.root()))
            .ok_or_else(|| CompileError::UnknownFunction {
                name: SmolStr::new(name),
                range: None,
            })?;
        let graph = Arc::new(Emitter::emit_function(self, &node, name, None)?);
        Ok(self.cache_graph(name, graph))
    }

    /// Type checks and emits the graph of `method` on `module`. The graph is
    /// named `Module.method`.
    pub fn method_graph(&self, module: &str, method: &str) -> Result<Arc<Graph>, CompileError> {
        let graph_name = format!("{module}.{method}");
        if let Some(graph) = self.graphs.lock().get(graph_name.as_str()) {
            return Ok(Arc::clone(graph));
        }

        let class = self.class_type(module)?;
        let node = self
            .items
            .module(module)
            .and_then(|item| item.methods.get(method))
            .map(|ptr| ptr.to_node(&self.root()))
            .ok_or_else(|| CompileError::UnknownFunction {
                name: SmolStr::new(&graph_name),
                range: None,
            })?;
        let graph = Arc::new(Emitter::emit_function(
            self,
            &node,
            &graph_name,
            Some(class),
        )?);
        Ok(self.cache_graph(&graph_name, graph))
    }

    fn cache_graph(&self, name: &str, graph: Arc<Graph>) -> Arc<Graph> {
        let mut graphs = self.graphs.lock();
        Arc::clone(graphs.entry(SmolStr::new(name)).or_insert(graph))
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// The enum type declared as `name` in this unit.
    pub fn enum_type(&self, name: &str) -> Result<Arc<EnumType>, CompileError> {
        self.resolve_enum(name, TextRange::default())
            .map_err(|error| match error {
                CompileError::UnknownTypeName { name, .. } => {
                    CompileError::UnknownTypeName { name, range: None }
                }
                other => other,
            })
    }

    /// The class type of module `name`, built from its attribute
    /// declarations.
    pub fn class_type(&self, name: &str) -> Result<Arc<ClassType>, CompileError> {
        self.class_type_in(name, &mut Vec::new())
    }

    /// `resolving` holds the modules whose attributes are being resolved on
    /// this call path.
    fn class_type_in(
        &self,
        name: &str,
        resolving: &mut Vec<SmolStr>,
    ) -> Result<Arc<ClassType>, CompileError> {
        if let Some(class) = self.classes.lock().get(name) {
            return Ok(Arc::clone(class));
        }

        let item = self
            .items
            .module(name)
            .ok_or_else(|| CompileError::UnknownTypeName {
                name: SmolStr::new(name),
                range: None,
            })?;
        let node = item.node.to_node(&self.root());
        if resolving.iter().any(|pending| pending == name) {
            return Err(CompileError::unsupported(
                format!("module '{name}' cannot contain itself"),
                node.text_range(),
            ));
        }
        resolving.push(SmolStr::new(name));
        let attributes = self.class_attributes(&node, resolving);
        resolving.pop();
        let attributes = attributes?;

        let class = Arc::new(ClassType::new(
            qualified_name(&self.options.module, name),
            SmolStr::new(name),
            attributes,
        ));
        let mut classes = self.classes.lock();
        Ok(Arc::clone(
            classes.entry(SmolStr::new(name)).or_insert(class),
        ))
    }

    fn class_attributes(
        &self,
        node: &SyntaxNode,
        resolving: &mut Vec<SmolStr>,
    ) -> Result<IndexMap<SmolStr, Ty>, CompileError> {
        let mut attributes = IndexMap::new();
        for attr in cst::children(node, SyntaxKind::AttrDecl) {
            let Some((attr_name, attr_range)) = cst::declared_name(&attr) else {
                continue;
            };
            let type_ref = cst::child(&attr, SyntaxKind::TypeRef).ok_or_else(|| {
                CompileError::unsupported(
                    format!("attribute '{attr_name}' has no type"),
                    attr_range,
                )
            })?;
            let ty = self.resolve_type_ref_in(&type_ref, resolving)?;
            if attributes.insert(attr_name.clone(), ty).is_some() {
                return Err(CompileError::DuplicateDefinition {
                    name: attr_name,
                    range: Some(attr_range),
                });
            }
        }
        Ok(attributes)
    }

    /// Resolves a reference to the enum declared as `name`. With enum
    /// support disabled, the reference fails as an unknown type name.
    pub(crate) fn resolve_enum(
        &self,
        name: &str,
        range: TextRange,
    ) -> Result<Arc<EnumType>, CompileError> {
        let unknown = || CompileError::UnknownTypeName {
            name: SmolStr::new(name),
            range: Some(range),
        };
        if !self.options.features.enum_support {
            return Err(unknown());
        }
        let ptr = self.items.enum_decl(name).ok_or_else(unknown)?;

        let mut enums = self.enums.lock();
        if let Some(ty) = enums.get(name) {
            return Ok(Arc::clone(ty));
        }

        let node = ptr.to_node(&self.root());
        let definition = EnumDefinition::from_syntax(&node, &self.options.module)?;
        let ty = self.registry.resolve(&definition)?;
        trace!(name, qualified = ty.qualified_name(), "resolved enum reference");
        enums.insert(SmolStr::new(name), Arc::clone(&ty));
        Ok(ty)
    }

    /// Resolves a `TypeRef` node.
    pub(crate) fn resolve_type_ref(&self, node: &SyntaxNode) -> Result<Ty, CompileError> {
        self.resolve_type_ref_in(node, &mut Vec::new())
    }

    fn resolve_type_ref_in(
        &self,
        node: &SyntaxNode,
        resolving: &mut Vec<SmolStr>,
    ) -> Result<Ty, CompileError> {
        if cst::token(node, SyntaxKind::KwNone).is_some() {
            return Ok(Ty::None);
        }
        let (name, range) = cst::declared_name(node).ok_or_else(|| {
            CompileError::unsupported("malformed type annotation", node.text_range())
        })?;

        if let Some(inner) = cst::child(node, SyntaxKind::TypeRef) {
            if name != "List" {
                return Err(CompileError::UnknownTypeName {
                    name,
                    range: Some(range),
                });
            }
            return Ok(Ty::list(self.resolve_type_ref_in(&inner, resolving)?));
        }

        if let Some(ty) = Ty::from_builtin_name(&name) {
            return Ok(ty);
        }
        if self.items.enum_decl(&name).is_some() {
            return self.resolve_enum(&name, range).map(Ty::Enum);
        }
        if self.items.module(&name).is_some() {
            return self.class_type_in(&name, resolving).map(Ty::Class);
        }
        Err(CompileError::UnknownTypeName {
            name,
            range: Some(range),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCode;

    fn unit(source: &str) -> CompilationUnit {
        CompilationUnit::with_registry(
            source,
            CompileOptions::for_module("unit_tests").with_enum_support(true),
            Arc::new(EnumRegistry::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_unit_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompilationUnit>();
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let error = CompilationUnit::new("enum Color { RED = }", CompileOptions::default())
            .unwrap_err();
        assert_eq!(error.code(), DiagnosticCode::Syntax);
        assert!(error.range().is_some());
    }

    #[test]
    fn test_enum_type_is_cached_per_unit() {
        let unit = unit("enum Color { RED = 1, GREEN = 2 }");
        let first = unit.enum_type("Color").unwrap();
        let second = unit.enum_type("Color").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.qualified_name(), "__strand__.unit_tests.Color");
        assert_eq!(unit.registry().len(), 1);
    }

    #[test]
    fn test_enum_type_requires_feature() {
        let unit = CompilationUnit::with_registry(
            "enum Color { RED = 1 }",
            CompileOptions::for_module("unit_tests"),
            Arc::new(EnumRegistry::new()),
        )
        .unwrap();
        let error = unit.enum_type("Color").unwrap_err();
        assert_eq!(error.to_string(), "Unknown type name 'Color'");
        assert!(unit.registry().is_empty());
    }

    #[test]
    fn test_class_type_from_attributes() {
        let unit = unit(
            "enum Color { RED = 1 }\nmodule TestModule { e: Color; counts: List[int]; }",
        );
        let class = unit.class_type("TestModule").unwrap();
        assert_eq!(class.qualified_name(), "__strand__.unit_tests.TestModule");
        let attributes: Vec<String> = class
            .attributes()
            .map(|(name, ty)| format!("{name}: {ty}"))
            .collect();
        assert_eq!(
            attributes,
            vec!["e: Enum<__strand__.unit_tests.Color>", "counts: int[]"]
        );
    }

    #[test]
    fn test_recursive_module_is_rejected() {
        let unit = unit("module Node { next: Node; }");
        let error = unit.class_type("Node").unwrap_err();
        assert_eq!(error.to_string(), "module 'Node' cannot contain itself");
    }

    #[test]
    fn test_indirect_recursive_module_is_rejected() {
        let unit = unit("module A { b: List[B]; }\nmodule B { a: A; }");
        let error = unit.class_type("A").unwrap_err();
        assert_eq!(error.to_string(), "module 'A' cannot contain itself");
    }

    #[test]
    fn test_unknown_function() {
        let unit = unit("fn f() -> int { return 1; }");
        let error = unit.function_graph("g").unwrap_err();
        assert_eq!(error.to_string(), "function 'g' is not defined");
    }

    #[test]
    fn test_graphs_are_cached() {
        let unit = unit("fn f() -> int { return 1; }");
        let first = unit.function_graph("f").unwrap();
        let second = unit.function_graph("f").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unknown_type_annotation() {
        let unit = unit("fn f(x: Shape) -> int { return 1; }");
        let error = unit.function_graph("f").unwrap_err();
        assert_eq!(error.to_string(), "Unknown type name 'Shape'");
        assert_eq!(error.range(), Some(TextRange::new(8.into(), 13.into())));
    }
}
