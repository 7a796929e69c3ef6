//! Local identifier collection.
//!
//! Before a scope is emitted, every name bound anywhere in it must be known so
//! it can be hoisted. Collection walks statements without entering nested
//! function or class bodies: those are separate scopes and only contribute
//! their own name to the enclosing one.

use ahash::AHashSet;
use indexmap::IndexSet;
use ruff_python_ast::name::Name;

use crate::{
    dispatch::{Dispatch, NodeKind, dispatch_expr, dispatch_stmt},
    error::TranslateError,
    expressions::{ClassDef, ExprLoc, FunctionDef, Identifier, ImportAlias, Node, Operator},
    parse::CodeRange,
    signature::Signature,
};

/// Supplies the exported names of an imported module for wildcard imports.
pub(crate) trait ExportSource {
    /// Names a module exports, compiling it first if needed.
    ///
    /// A module included as raw target text exports nothing the collector can see.
    fn exports(&self, module: &str, position: CodeRange) -> Result<Vec<Name>, TranslateError>;
}

/// Names bound at the top level of a module or class body, in first-binding order.
pub(crate) fn collect(nodes: &[Node], exports: &dyn ExportSource) -> Result<IndexSet<Name>, TranslateError> {
    let mut collector = LocalCollector::new(exports);
    collector.statements(nodes)?;
    Ok(collector.names)
}

/// Locals of a function: its parameters, then names bound in its body.
///
/// Names declared `global` or `nonlocal` in the body belong to an outer scope
/// and are left out.
pub(crate) fn collect_function(
    signature: &Signature,
    body: &[Node],
    exports: &dyn ExportSource,
) -> Result<IndexSet<Name>, TranslateError> {
    let mut collector = LocalCollector::new(exports);
    collector.names.extend(signature.param_names().cloned());
    collector.statements(body)?;
    let LocalCollector { mut names, outer, .. } = collector;
    names.retain(|name| !outer.contains(name));
    Ok(names)
}

struct LocalCollector<'a> {
    names: IndexSet<Name>,
    /// Names declared `global` or `nonlocal`.
    outer: AHashSet<Name>,
    exports: &'a dyn ExportSource,
}

impl<'a> LocalCollector<'a> {
    fn new(exports: &'a dyn ExportSource) -> Self {
        Self {
            names: IndexSet::new(),
            outer: AHashSet::new(),
            exports,
        }
    }

    fn statements(&mut self, nodes: &[Node]) -> Result<(), TranslateError> {
        nodes.iter().try_for_each(|node| dispatch_stmt(self, node))
    }

    fn targets(&mut self, targets: &[ExprLoc]) -> Result<(), TranslateError> {
        targets.iter().try_for_each(|target| dispatch_expr(self, target))
    }

    /// Re-binding keeps the position of the first occurrence.
    fn add(&mut self, name: &Name) {
        self.names.insert(name.clone());
    }
}

impl Dispatch for LocalCollector<'_> {
    type Output = ();

    /// Containers, calls and no-op statements bind nothing.
    fn unhandled(&mut self, _kind: NodeKind, _position: CodeRange) -> Result<(), TranslateError> {
        Ok(())
    }

    fn visit_assign(&mut self, targets: &[ExprLoc], _value: &ExprLoc, _position: CodeRange) -> Result<(), TranslateError> {
        self.targets(targets)
    }

    fn visit_aug_assign(
        &mut self,
        target: &ExprLoc,
        _op: Operator,
        _value: &ExprLoc,
        _position: CodeRange,
    ) -> Result<(), TranslateError> {
        dispatch_expr(self, target)
    }

    fn visit_if(&mut self, _test: &ExprLoc, body: &[Node], or_else: &[Node], _position: CodeRange) -> Result<(), TranslateError> {
        self.statements(body)?;
        self.statements(or_else)
    }

    fn visit_while(
        &mut self,
        _test: &ExprLoc,
        body: &[Node],
        or_else: &[Node],
        _position: CodeRange,
    ) -> Result<(), TranslateError> {
        self.statements(body)?;
        self.statements(or_else)
    }

    fn visit_for(
        &mut self,
        target: &ExprLoc,
        _iter: &ExprLoc,
        body: &[Node],
        or_else: &[Node],
        _position: CodeRange,
    ) -> Result<(), TranslateError> {
        dispatch_expr(self, target)?;
        self.statements(body)?;
        self.statements(or_else)
    }

    fn visit_function_def(&mut self, def: &FunctionDef) -> Result<(), TranslateError> {
        self.add(&def.name.name);
        Ok(())
    }

    fn visit_class_def(&mut self, def: &ClassDef) -> Result<(), TranslateError> {
        self.add(&def.name.name);
        Ok(())
    }

    fn visit_import(&mut self, aliases: &[ImportAlias], _position: CodeRange) -> Result<(), TranslateError> {
        for alias in aliases {
            match &alias.asname {
                Some(asname) => self.add(asname),
                None => {
                    let top_level = alias.name.as_str().split('.').next().unwrap_or_default();
                    self.add(&Name::new(top_level));
                }
            }
        }
        Ok(())
    }

    fn visit_import_from(&mut self, module: &Name, aliases: &[ImportAlias], position: CodeRange) -> Result<(), TranslateError> {
        for alias in aliases {
            if alias.is_wildcard() {
                for name in self.exports.exports(module.as_str(), position)? {
                    self.add(&name);
                }
            } else {
                self.add(alias.binding());
            }
        }
        Ok(())
    }

    fn visit_global(&mut self, names: &[Identifier], _position: CodeRange) -> Result<(), TranslateError> {
        self.outer.extend(names.iter().map(|ident| ident.name.clone()));
        Ok(())
    }

    fn visit_nonlocal(&mut self, names: &[Identifier], position: CodeRange) -> Result<(), TranslateError> {
        self.visit_global(names, position)
    }

    fn visit_name(&mut self, ident: &Identifier) -> Result<(), TranslateError> {
        self.add(&ident.name);
        Ok(())
    }

    fn visit_list(&mut self, elts: &[ExprLoc], _position: CodeRange) -> Result<(), TranslateError> {
        self.targets(elts)
    }

    fn visit_tuple(&mut self, elts: &[ExprLoc], _position: CodeRange) -> Result<(), TranslateError> {
        self.targets(elts)
    }

    fn visit_starred(&mut self, value: &ExprLoc, _position: CodeRange) -> Result<(), TranslateError> {
        dispatch_expr(self, value)
    }
}
