//! Double dispatch over the closed set of syntax node kinds.
//!
//! [`Dispatch`] has one method per kind the translator understands. Each
//! default implementation forwards to [`Dispatch::unhandled`], so a pass only
//! overrides the kinds it cares about and everything else goes through one
//! checked path. [`dispatch_stmt`] and [`dispatch_expr`] are exhaustive
//! matches: adding a node variant without routing it is a compile error.

use ruff_python_ast::name::Name;
use tracing::trace;

use crate::{
    args::CallArgs,
    error::{Support, TranslateError},
    expressions::{
        BoolOperator, ClassDef, CmpOperator, DictItem, Expr, ExprLoc, FStringPart, FunctionDef, Identifier,
        ImportAlias, Lambda, Literal, Node, Operator, SliceBounds, UnaryOperator,
    },
    parse::CodeRange,
};

/// Every syntax node kind the parser can produce, handled or not.
///
/// The display form is the feature name used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum NodeKind {
    // statements
    #[strum(serialize = "expression statements")]
    ExprStmt,
    #[strum(serialize = "assignments")]
    Assign,
    #[strum(serialize = "augmented assignments")]
    AugAssign,
    #[strum(serialize = "`if` statements")]
    If,
    #[strum(serialize = "`while` loops")]
    While,
    #[strum(serialize = "`for` loops")]
    For,
    #[strum(serialize = "`async for` loops")]
    AsyncFor,
    #[strum(serialize = "`return` statements")]
    Return,
    #[strum(serialize = "`pass` statements")]
    Pass,
    #[strum(serialize = "`break` statements")]
    Break,
    #[strum(serialize = "`continue` statements")]
    Continue,
    #[strum(serialize = "function definitions")]
    FunctionDef,
    #[strum(serialize = "`async def` functions")]
    AsyncFunctionDef,
    #[strum(serialize = "class definitions")]
    ClassDef,
    #[strum(serialize = "`import` statements")]
    Import,
    #[strum(serialize = "`from ... import` statements")]
    ImportFrom,
    #[strum(serialize = "relative imports")]
    RelativeImport,
    #[strum(serialize = "`global` declarations")]
    Global,
    #[strum(serialize = "`nonlocal` declarations")]
    Nonlocal,
    #[strum(serialize = "`del` statements")]
    Delete,
    #[strum(serialize = "`type` alias statements")]
    TypeAlias,
    #[strum(serialize = "`with` statements")]
    With,
    #[strum(serialize = "`async with` statements")]
    AsyncWith,
    #[strum(serialize = "`match` statements")]
    Match,
    #[strum(serialize = "`raise` statements")]
    Raise,
    #[strum(serialize = "`try` statements")]
    Try,
    #[strum(serialize = "`assert` statements")]
    Assert,
    #[strum(serialize = "IPython escape commands")]
    IpyEscapeCommand,
    // expressions
    #[strum(serialize = "literals")]
    Literal,
    #[strum(serialize = "name references")]
    Name,
    #[strum(serialize = "list displays")]
    List,
    #[strum(serialize = "tuple displays")]
    Tuple,
    #[strum(serialize = "dict displays")]
    Dict,
    #[strum(serialize = "set displays")]
    Set,
    #[strum(serialize = "attribute access")]
    Attribute,
    #[strum(serialize = "subscripts")]
    Subscript,
    #[strum(serialize = "slices")]
    Slice,
    #[strum(serialize = "extended slices")]
    ExtendedSlice,
    #[strum(serialize = "binary operators")]
    BinOp,
    #[strum(serialize = "matrix multiplication")]
    MatMult,
    #[strum(serialize = "unary operators")]
    UnaryOp,
    #[strum(serialize = "boolean operators")]
    BoolOp,
    #[strum(serialize = "comparisons")]
    Compare,
    #[strum(serialize = "conditional expressions")]
    IfElse,
    #[strum(serialize = "calls")]
    Call,
    #[strum(serialize = "lambdas")]
    Lambda,
    #[strum(serialize = "f-strings")]
    FString,
    #[strum(serialize = "template strings")]
    TString,
    #[strum(serialize = "starred expressions")]
    Starred,
    #[strum(serialize = "assignment expressions")]
    Named,
    #[strum(serialize = "list comprehensions")]
    ListComp,
    #[strum(serialize = "set comprehensions")]
    SetComp,
    #[strum(serialize = "dict comprehensions")]
    DictComp,
    #[strum(serialize = "generator expressions")]
    Generator,
    #[strum(serialize = "`await` expressions")]
    Await,
    #[strum(serialize = "`yield` expressions")]
    Yield,
    #[strum(serialize = "`yield from` expressions")]
    YieldFrom,
    #[strum(serialize = "bytes literals")]
    BytesLiteral,
    #[strum(serialize = "ellipsis literals")]
    EllipsisLiteral,
    #[strum(serialize = "complex literals")]
    ComplexLiteral,
    #[strum(serialize = "integer literals wider than 64 bits")]
    BigIntLiteral,
}

impl NodeKind {
    /// How permanently a kind is rejected when no handler accepts it.
    pub fn support(self) -> Support {
        match self {
            Self::AsyncFor
            | Self::AsyncFunctionDef
            | Self::AsyncWith
            | Self::Raise
            | Self::Try
            | Self::MatMult
            | Self::Generator
            | Self::Await
            | Self::Yield
            | Self::YieldFrom
            | Self::ComplexLiteral => Support::Never,
            _ => Support::NotYet,
        }
    }
}

/// A pass over the syntax tree with one handler per node kind.
///
/// Handlers receive the node's children by reference; nodes are never mutated.
pub(crate) trait Dispatch {
    type Output;

    /// Called for every kind this pass has no handler for.
    fn unhandled(&mut self, kind: NodeKind, position: CodeRange) -> Result<Self::Output, TranslateError>;

    fn visit_expr_stmt(&mut self, expr: &ExprLoc) -> Result<Self::Output, TranslateError> {
        self.unhandled(NodeKind::ExprStmt, expr.position)
    }

    fn visit_assign(
        &mut self,
        targets: &[ExprLoc],
        value: &ExprLoc,
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (targets, value);
        self.unhandled(NodeKind::Assign, position)
    }

    fn visit_aug_assign(
        &mut self,
        target: &ExprLoc,
        op: Operator,
        value: &ExprLoc,
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (target, op, value);
        self.unhandled(NodeKind::AugAssign, position)
    }

    fn visit_if(
        &mut self,
        test: &ExprLoc,
        body: &[Node],
        or_else: &[Node],
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (test, body, or_else);
        self.unhandled(NodeKind::If, position)
    }

    fn visit_while(
        &mut self,
        test: &ExprLoc,
        body: &[Node],
        or_else: &[Node],
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (test, body, or_else);
        self.unhandled(NodeKind::While, position)
    }

    fn visit_for(
        &mut self,
        target: &ExprLoc,
        iter: &ExprLoc,
        body: &[Node],
        or_else: &[Node],
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (target, iter, body, or_else);
        self.unhandled(NodeKind::For, position)
    }

    fn visit_return(&mut self, value: Option<&ExprLoc>, position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = value;
        self.unhandled(NodeKind::Return, position)
    }

    fn visit_pass(&mut self, position: CodeRange) -> Result<Self::Output, TranslateError> {
        self.unhandled(NodeKind::Pass, position)
    }

    fn visit_break(&mut self, position: CodeRange) -> Result<Self::Output, TranslateError> {
        self.unhandled(NodeKind::Break, position)
    }

    fn visit_continue(&mut self, position: CodeRange) -> Result<Self::Output, TranslateError> {
        self.unhandled(NodeKind::Continue, position)
    }

    fn visit_function_def(&mut self, def: &FunctionDef) -> Result<Self::Output, TranslateError> {
        self.unhandled(NodeKind::FunctionDef, def.position)
    }

    fn visit_class_def(&mut self, def: &ClassDef) -> Result<Self::Output, TranslateError> {
        self.unhandled(NodeKind::ClassDef, def.position)
    }

    fn visit_import(&mut self, aliases: &[ImportAlias], position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = aliases;
        self.unhandled(NodeKind::Import, position)
    }

    fn visit_import_from(
        &mut self,
        module: &Name,
        aliases: &[ImportAlias],
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (module, aliases);
        self.unhandled(NodeKind::ImportFrom, position)
    }

    fn visit_global(&mut self, names: &[Identifier], position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = names;
        self.unhandled(NodeKind::Global, position)
    }

    fn visit_nonlocal(&mut self, names: &[Identifier], position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = names;
        self.unhandled(NodeKind::Nonlocal, position)
    }

    fn visit_literal(&mut self, literal: &Literal, position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = literal;
        self.unhandled(NodeKind::Literal, position)
    }

    fn visit_name(&mut self, ident: &Identifier) -> Result<Self::Output, TranslateError> {
        self.unhandled(NodeKind::Name, ident.position)
    }

    fn visit_list(&mut self, elts: &[ExprLoc], position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = elts;
        self.unhandled(NodeKind::List, position)
    }

    fn visit_tuple(&mut self, elts: &[ExprLoc], position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = elts;
        self.unhandled(NodeKind::Tuple, position)
    }

    fn visit_dict(&mut self, items: &[DictItem], position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = items;
        self.unhandled(NodeKind::Dict, position)
    }

    fn visit_attribute(
        &mut self,
        object: &ExprLoc,
        attr: &Name,
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (object, attr);
        self.unhandled(NodeKind::Attribute, position)
    }

    fn visit_subscript(
        &mut self,
        object: &ExprLoc,
        index: &ExprLoc,
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (object, index);
        self.unhandled(NodeKind::Subscript, position)
    }

    fn visit_slice(
        &mut self,
        object: &ExprLoc,
        bounds: &SliceBounds,
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (object, bounds);
        self.unhandled(NodeKind::Slice, position)
    }

    fn visit_bin_op(
        &mut self,
        left: &ExprLoc,
        op: Operator,
        right: &ExprLoc,
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (left, op, right);
        self.unhandled(NodeKind::BinOp, position)
    }

    fn visit_unary_op(
        &mut self,
        op: UnaryOperator,
        operand: &ExprLoc,
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (op, operand);
        self.unhandled(NodeKind::UnaryOp, position)
    }

    fn visit_bool_op(
        &mut self,
        op: BoolOperator,
        values: &[ExprLoc],
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (op, values);
        self.unhandled(NodeKind::BoolOp, position)
    }

    fn visit_compare(
        &mut self,
        left: &ExprLoc,
        comparisons: &[(CmpOperator, ExprLoc)],
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (left, comparisons);
        self.unhandled(NodeKind::Compare, position)
    }

    fn visit_if_else(
        &mut self,
        test: &ExprLoc,
        body: &ExprLoc,
        orelse: &ExprLoc,
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (test, body, orelse);
        self.unhandled(NodeKind::IfElse, position)
    }

    fn visit_call(
        &mut self,
        callee: &ExprLoc,
        args: &CallArgs,
        position: CodeRange,
    ) -> Result<Self::Output, TranslateError> {
        let _ = (callee, args);
        self.unhandled(NodeKind::Call, position)
    }

    fn visit_lambda(&mut self, lambda: &Lambda, position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = lambda;
        self.unhandled(NodeKind::Lambda, position)
    }

    fn visit_fstring(&mut self, parts: &[FStringPart], position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = parts;
        self.unhandled(NodeKind::FString, position)
    }

    fn visit_starred(&mut self, value: &ExprLoc, position: CodeRange) -> Result<Self::Output, TranslateError> {
        let _ = value;
        self.unhandled(NodeKind::Starred, position)
    }
}

/// Routes a statement to the handler for its kind.
pub(crate) fn dispatch_stmt<D: Dispatch + ?Sized>(pass: &mut D, node: &Node) -> Result<D::Output, TranslateError> {
    match node {
        Node::Expr(expr) => pass.visit_expr_stmt(expr),
        Node::Assign {
            targets,
            value,
            position,
        } => pass.visit_assign(targets, value, *position),
        Node::AugAssign {
            target,
            op,
            value,
            position,
        } => pass.visit_aug_assign(target, *op, value, *position),
        Node::If {
            test,
            body,
            or_else,
            position,
        } => pass.visit_if(test, body, or_else, *position),
        Node::While {
            test,
            body,
            or_else,
            position,
        } => pass.visit_while(test, body, or_else, *position),
        Node::For {
            target,
            iter,
            body,
            or_else,
            position,
        } => pass.visit_for(target, iter, body, or_else, *position),
        Node::Return { value, position } => pass.visit_return(value.as_ref(), *position),
        Node::Pass { position } => pass.visit_pass(*position),
        Node::Break { position } => pass.visit_break(*position),
        Node::Continue { position } => pass.visit_continue(*position),
        Node::FunctionDef(def) => pass.visit_function_def(def),
        Node::ClassDef(def) => pass.visit_class_def(def),
        Node::Import { aliases, position } => pass.visit_import(aliases, *position),
        Node::ImportFrom {
            module,
            aliases,
            position,
        } => pass.visit_import_from(module, aliases, *position),
        Node::Global { names, position } => pass.visit_global(names, *position),
        Node::Nonlocal { names, position } => pass.visit_nonlocal(names, *position),
        Node::Unhandled { kind, position } => {
            trace!(%kind, "no statement handler");
            pass.unhandled(*kind, *position)
        }
    }
}

/// Routes an expression to the handler for its kind.
pub(crate) fn dispatch_expr<D: Dispatch + ?Sized>(pass: &mut D, expr: &ExprLoc) -> Result<D::Output, TranslateError> {
    let position = expr.position;
    match &expr.expr {
        Expr::Literal(literal) => pass.visit_literal(literal, position),
        Expr::Name(ident) => pass.visit_name(ident),
        Expr::List(elts) => pass.visit_list(elts, position),
        Expr::Tuple(elts) => pass.visit_tuple(elts, position),
        Expr::Dict(items) => pass.visit_dict(items, position),
        Expr::Attribute { object, attr } => pass.visit_attribute(object, attr, position),
        Expr::Subscript { object, index } => pass.visit_subscript(object, index, position),
        Expr::Slice { object, bounds } => pass.visit_slice(object, bounds, position),
        Expr::BinOp { left, op, right } => pass.visit_bin_op(left, *op, right, position),
        Expr::UnaryOp { op, operand } => pass.visit_unary_op(*op, operand, position),
        Expr::BoolOp { op, values } => pass.visit_bool_op(*op, values, position),
        Expr::Compare { left, comparisons } => pass.visit_compare(left, comparisons, position),
        Expr::IfElse { test, body, orelse } => pass.visit_if_else(test, body, orelse, position),
        Expr::Call { callee, args } => pass.visit_call(callee, args, position),
        Expr::Lambda(lambda) => pass.visit_lambda(lambda, position),
        Expr::FString(parts) => pass.visit_fstring(parts, position),
        Expr::Starred(value) => pass.visit_starred(value, position),
        Expr::Unhandled(kind) => {
            trace!(%kind, "no expression handler");
            pass.unhandled(*kind, position)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A pass with no handlers at all.
    struct Nothing;

    impl Dispatch for Nothing {
        type Output = ();

        fn unhandled(&mut self, kind: NodeKind, position: CodeRange) -> Result<(), TranslateError> {
            Err(TranslateError::unhandled(kind, position))
        }
    }

    #[test]
    fn missing_handler_is_reported_with_kind() {
        let node = Node::Pass {
            position: CodeRange::default(),
        };
        let err = dispatch_stmt(&mut Nothing, &node).expect_err("pass has no handler");
        let TranslateError::Unsupported { feature, support, .. } = err else {
            panic!("expected an unsupported construct error, got {err:?}");
        };
        assert_eq!(feature, "`pass` statements");
        assert_eq!(support, Support::NotYet);
    }

    #[test]
    fn generator_kinds_are_never_supported() {
        for kind in [NodeKind::Generator, NodeKind::Yield, NodeKind::Try, NodeKind::MatMult] {
            assert_eq!(kind.support(), Support::Never, "{kind} should be a permanent exclusion");
        }
        assert_eq!(NodeKind::ListComp.support(), Support::NotYet);
    }
}
