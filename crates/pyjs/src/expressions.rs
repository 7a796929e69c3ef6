use ruff_python_ast::name::Name;

use crate::{args::CallArgs, dispatch::NodeKind, parse::CodeRange, signature::Signature};

/// A name in source code together with where it appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: Name,
    pub position: CodeRange,
}

impl Identifier {
    pub fn new(name: impl Into<Name>, position: CodeRange) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    pub fn as_str(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Binary operators, both arithmetic and bitwise.
///
/// Matrix multiplication has no counterpart and never reaches this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Neg,
    Pos,
    Invert,
}

/// Defined separately since these operators always return a bool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOperator {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

/// One entry of a dict display: `key: value` or `**mapping`.
#[derive(Debug, Clone)]
pub enum DictItem {
    Pair { key: ExprLoc, value: ExprLoc },
    Unpack(ExprLoc),
}

/// A piece of an f-string.
#[derive(Debug, Clone)]
pub enum FStringPart {
    Literal(String),
    Interpolation {
        expr: Box<ExprLoc>,
        /// `!s`, `!r` or `!a` was given.
        has_conversion: bool,
        has_format_spec: bool,
        /// The `{expr=}` self-documenting form.
        is_debug: bool,
    },
}

/// The bounds of `object[lower:upper:step]`.
#[derive(Debug, Clone)]
pub struct SliceBounds {
    pub lower: Option<ExprLoc>,
    pub upper: Option<ExprLoc>,
    pub step: Option<ExprLoc>,
}

/// A lambda expression: a signature and a single returned expression.
#[derive(Debug, Clone)]
pub struct Lambda {
    pub signature: Signature,
    pub body: ExprLoc,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    Name(Identifier),
    List(Vec<ExprLoc>),
    Tuple(Vec<ExprLoc>),
    Dict(Vec<DictItem>),
    Attribute {
        object: Box<ExprLoc>,
        attr: Name,
    },
    Subscript {
        object: Box<ExprLoc>,
        index: Box<ExprLoc>,
    },
    Slice {
        object: Box<ExprLoc>,
        bounds: Box<SliceBounds>,
    },
    BinOp {
        left: Box<ExprLoc>,
        op: Operator,
        right: Box<ExprLoc>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<ExprLoc>,
    },
    /// `a and b and c`, kept flat in source order.
    BoolOp {
        op: BoolOperator,
        values: Vec<ExprLoc>,
    },
    /// `a < b <= c`: the left operand and each `(operator, comparator)` pair.
    Compare {
        left: Box<ExprLoc>,
        comparisons: Vec<(CmpOperator, ExprLoc)>,
    },
    IfElse {
        test: Box<ExprLoc>,
        body: Box<ExprLoc>,
        orelse: Box<ExprLoc>,
    },
    Call {
        callee: Box<ExprLoc>,
        args: CallArgs,
    },
    Lambda(Box<Lambda>),
    FString(Vec<FStringPart>),
    /// `*value`; only meaningful as an unpacking assignment target.
    Starred(Box<ExprLoc>),
    /// A construct the translator has no handler for.
    Unhandled(NodeKind),
}

/// An expression together with its source position.
#[derive(Debug, Clone)]
pub struct ExprLoc {
    pub position: CodeRange,
    pub expr: Expr,
}

impl ExprLoc {
    pub fn new(position: CodeRange, expr: Expr) -> Self {
        Self { position, expr }
    }

    /// The name this expression refers to, if it is a bare name.
    pub fn as_name(&self) -> Option<&Identifier> {
        match &self.expr {
            Expr::Name(ident) => Some(ident),
            _ => None,
        }
    }
}

/// One `name [as alias]` clause of an import statement.
#[derive(Debug, Clone)]
pub struct ImportAlias {
    pub name: Name,
    pub asname: Option<Name>,
    pub position: CodeRange,
}

impl ImportAlias {
    /// The name bound in the importing scope.
    pub fn binding(&self) -> &Name {
        self.asname.as_ref().unwrap_or(&self.name)
    }

    pub fn is_wildcard(&self) -> bool {
        self.name.as_str() == "*"
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: Identifier,
    pub signature: Signature,
    pub body: Vec<Node>,
    /// Decorator expressions in source order; applied last to first.
    pub decorators: Vec<ExprLoc>,
    pub position: CodeRange,
}

impl FunctionDef {
    /// True when the function carries a bare `@staticmethod` decorator.
    pub fn is_staticmethod(&self) -> bool {
        self.decorators
            .iter()
            .any(|d| d.as_name().is_some_and(|n| n.as_str() == "staticmethod"))
    }
}

#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: Identifier,
    pub bases: Vec<ExprLoc>,
    /// Class keywords such as `metaclass=...`.
    pub has_keywords: bool,
    pub body: Vec<Node>,
    pub decorators: Vec<ExprLoc>,
    pub position: CodeRange,
}

/// A statement.
#[derive(Debug, Clone)]
pub enum Node {
    Expr(ExprLoc),
    /// `a = b = value`; each target is a name, attribute, subscript or unpacking pattern.
    Assign {
        targets: Vec<ExprLoc>,
        value: ExprLoc,
        position: CodeRange,
    },
    AugAssign {
        target: ExprLoc,
        op: Operator,
        value: ExprLoc,
        position: CodeRange,
    },
    If {
        test: ExprLoc,
        body: Vec<Node>,
        or_else: Vec<Node>,
        position: CodeRange,
    },
    While {
        test: ExprLoc,
        body: Vec<Node>,
        or_else: Vec<Node>,
        position: CodeRange,
    },
    For {
        target: ExprLoc,
        iter: ExprLoc,
        body: Vec<Node>,
        or_else: Vec<Node>,
        position: CodeRange,
    },
    Return {
        value: Option<ExprLoc>,
        position: CodeRange,
    },
    Pass {
        position: CodeRange,
    },
    Break {
        position: CodeRange,
    },
    Continue {
        position: CodeRange,
    },
    FunctionDef(Box<FunctionDef>),
    ClassDef(Box<ClassDef>),
    Import {
        aliases: Vec<ImportAlias>,
        position: CodeRange,
    },
    ImportFrom {
        module: Name,
        aliases: Vec<ImportAlias>,
        position: CodeRange,
    },
    Global {
        names: Vec<Identifier>,
        position: CodeRange,
    },
    Nonlocal {
        names: Vec<Identifier>,
        position: CodeRange,
    },
    /// A statement the translator has no handler for.
    Unhandled {
        kind: NodeKind,
        position: CodeRange,
    },
}
