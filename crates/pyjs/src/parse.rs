use std::fmt;

use ruff_python_ast::{
    self as ast, BoolOp, CmpOp, ConversionFlag, ElifElseClause, Expr as AstExpr, InterpolatedStringElement, Keyword,
    Number, Operator as AstOperator, ParameterWithDefault, Parameters, Stmt, UnaryOp, name::Name,
};
use ruff_python_parser::parse_module;
use ruff_text_size::{Ranged, TextRange};

use crate::{
    args::{Arg, CallArgs, Kwarg},
    dispatch::NodeKind,
    error::{CodeLoc, TranslateError},
    expressions::{
        BoolOperator, ClassDef, CmpOperator, DictItem, Expr, ExprLoc, FStringPart, FunctionDef, Identifier,
        ImportAlias, Lambda, Literal, Node, Operator, SliceBounds, UnaryOperator,
    },
    signature::{Param, Signature},
};

/// Maximum nesting depth for AST structures during parsing.
/// Matches CPython's limit of ~200 for nested parentheses.
#[cfg(not(debug_assertions))]
pub const MAX_NESTING_DEPTH: u16 = 200;
/// In debug builds, we use a lower limit because stack frames are much larger.
#[cfg(debug_assertions)]
pub const MAX_NESTING_DEPTH: u16 = 35;

/// Parses a whole module into statement nodes.
pub(crate) fn parse(code: &str) -> Result<Vec<Node>, TranslateError> {
    let mut parser = Parser::new(code);
    let parsed = parse_module(code).map_err(|e| TranslateError::syntax(e.to_string(), parser.convert_range(e.range())))?;
    let module = parsed.into_syntax();
    parser.parse_statements(module.body)
}

/// Converts the ruff AST into the translator's own read-only representation.
///
/// Constructs the translator cannot handle are kept as `Unhandled` nodes
/// rather than rejected here, so the dispatcher stays the one place
/// unsupported syntax is reported.
struct Parser {
    /// Byte offset of every `\n` in the source.
    line_ends: Vec<usize>,
    /// Remaining nesting depth budget for recursive structures.
    depth_remaining: u16,
}

impl Parser {
    fn new(code: &str) -> Self {
        let line_ends = code.match_indices('\n').map(|(i, _)| i).collect();
        Self {
            line_ends,
            depth_remaining: MAX_NESTING_DEPTH,
        }
    }

    fn parse_statements(&mut self, statements: impl IntoIterator<Item = Stmt>) -> Result<Vec<Node>, TranslateError> {
        statements.into_iter().map(|s| self.parse_statement(s)).collect()
    }

    /// Folds `elif`/`else` clauses into nested `If` nodes in the else branch.
    fn parse_elif_else_clauses(&mut self, clauses: Vec<ElifElseClause>) -> Result<Vec<Node>, TranslateError> {
        let mut tail: Vec<Node> = Vec::new();
        for clause in clauses.into_iter().rev() {
            match clause.test {
                Some(test) => {
                    let position = self.convert_range(clause.range);
                    let test = self.parse_expression(test)?;
                    let body = self.parse_statements(clause.body)?;
                    tail = vec![Node::If {
                        test,
                        body,
                        or_else: tail,
                        position,
                    }];
                }
                None => {
                    tail = self.parse_statements(clause.body)?;
                }
            }
        }
        Ok(tail)
    }

    fn parse_statement(&mut self, statement: Stmt) -> Result<Node, TranslateError> {
        self.decr_depth_remaining(|| statement.range())?;
        let result = self.parse_statement_impl(statement);
        self.depth_remaining += 1;
        result
    }

    fn parse_statement_impl(&mut self, statement: Stmt) -> Result<Node, TranslateError> {
        let position = self.convert_range(statement.range());
        let unhandled = |kind| Ok(Node::Unhandled { kind, position });
        match statement {
            Stmt::FunctionDef(function) => {
                if function.is_async {
                    return unhandled(NodeKind::AsyncFunctionDef);
                }
                let signature = self.parse_signature(&function.parameters)?;
                let name = self.identifier(&function.name.id, function.name.range);
                let body = self.parse_statements(function.body)?;
                let decorators = function
                    .decorator_list
                    .into_iter()
                    .map(|d| self.parse_expression(d.expression))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::FunctionDef(Box::new(FunctionDef {
                    name,
                    signature,
                    body,
                    decorators,
                    position,
                })))
            }
            Stmt::ClassDef(c) => {
                let name = self.identifier(&c.name.id, c.name.range);
                let (bases, has_keywords) = match c.arguments {
                    Some(arguments) => {
                        let ast::Arguments { args, keywords, .. } = *arguments;
                        let bases = args
                            .into_vec()
                            .into_iter()
                            .map(|arg| self.parse_expression(arg))
                            .collect::<Result<Vec<_>, _>>()?;
                        (bases, !keywords.is_empty())
                    }
                    None => (Vec::new(), false),
                };
                let decorators = c
                    .decorator_list
                    .into_iter()
                    .map(|d| self.parse_expression(d.expression))
                    .collect::<Result<Vec<_>, _>>()?;
                let body = self.parse_statements(c.body)?;
                Ok(Node::ClassDef(Box::new(ClassDef {
                    name,
                    bases,
                    has_keywords,
                    body,
                    decorators,
                    position,
                })))
            }
            Stmt::Return(ast::StmtReturn { value, .. }) => Ok(Node::Return {
                value: value.map(|v| self.parse_expression(*v)).transpose()?,
                position,
            }),
            Stmt::Assign(ast::StmtAssign { targets, value, .. }) => Ok(Node::Assign {
                targets: targets
                    .into_iter()
                    .map(|t| self.parse_expression(t))
                    .collect::<Result<Vec<_>, _>>()?,
                value: self.parse_expression(*value)?,
                position,
            }),
            // Annotations are dropped; a bare `x: int` binds nothing.
            Stmt::AnnAssign(ast::StmtAnnAssign { target, value, .. }) => match value {
                Some(value) => Ok(Node::Assign {
                    targets: vec![self.parse_expression(*target)?],
                    value: self.parse_expression(*value)?,
                    position,
                }),
                None => Ok(Node::Pass { position }),
            },
            Stmt::AugAssign(ast::StmtAugAssign { target, op, value, .. }) => {
                let Some(op) = convert_op(op) else {
                    return unhandled(NodeKind::MatMult);
                };
                Ok(Node::AugAssign {
                    target: self.parse_expression(*target)?,
                    op,
                    value: self.parse_expression(*value)?,
                    position,
                })
            }
            Stmt::For(ast::StmtFor {
                is_async,
                target,
                iter,
                body,
                orelse,
                ..
            }) => {
                if is_async {
                    return unhandled(NodeKind::AsyncFor);
                }
                Ok(Node::For {
                    target: self.parse_expression(*target)?,
                    iter: self.parse_expression(*iter)?,
                    body: self.parse_statements(body)?,
                    or_else: self.parse_statements(orelse)?,
                    position,
                })
            }
            Stmt::While(ast::StmtWhile { test, body, orelse, .. }) => Ok(Node::While {
                test: self.parse_expression(*test)?,
                body: self.parse_statements(body)?,
                or_else: self.parse_statements(orelse)?,
                position,
            }),
            Stmt::If(ast::StmtIf {
                test,
                body,
                elif_else_clauses,
                ..
            }) => {
                let test = self.parse_expression(*test)?;
                let body = self.parse_statements(body)?;
                let or_else = self.parse_elif_else_clauses(elif_else_clauses)?;
                Ok(Node::If {
                    test,
                    body,
                    or_else,
                    position,
                })
            }
            Stmt::Import(ast::StmtImport { names, .. }) => Ok(Node::Import {
                aliases: names.iter().map(|alias| self.import_alias(alias)).collect(),
                position,
            }),
            Stmt::ImportFrom(ast::StmtImportFrom {
                module, names, level, ..
            }) => {
                let Some(module) = module.filter(|_| level == 0) else {
                    return unhandled(NodeKind::RelativeImport);
                };
                Ok(Node::ImportFrom {
                    module: module.id,
                    aliases: names.iter().map(|alias| self.import_alias(alias)).collect(),
                    position,
                })
            }
            Stmt::Global(ast::StmtGlobal { names, .. }) => Ok(Node::Global {
                names: names.iter().map(|id| self.identifier(&id.id, id.range)).collect(),
                position,
            }),
            Stmt::Nonlocal(ast::StmtNonlocal { names, .. }) => Ok(Node::Nonlocal {
                names: names.iter().map(|id| self.identifier(&id.id, id.range)).collect(),
                position,
            }),
            Stmt::Expr(ast::StmtExpr { value, .. }) => self.parse_expression(*value).map(Node::Expr),
            Stmt::Pass(_) => Ok(Node::Pass { position }),
            Stmt::Break(_) => Ok(Node::Break { position }),
            Stmt::Continue(_) => Ok(Node::Continue { position }),
            Stmt::Delete(_) => unhandled(NodeKind::Delete),
            Stmt::TypeAlias(_) => unhandled(NodeKind::TypeAlias),
            Stmt::With(w) => unhandled(if w.is_async { NodeKind::AsyncWith } else { NodeKind::With }),
            Stmt::Match(_) => unhandled(NodeKind::Match),
            Stmt::Raise(_) => unhandled(NodeKind::Raise),
            Stmt::Try(_) => unhandled(NodeKind::Try),
            Stmt::Assert(_) => unhandled(NodeKind::Assert),
            Stmt::IpyEscapeCommand(_) => unhandled(NodeKind::IpyEscapeCommand),
        }
    }

    fn parse_expression(&mut self, expression: AstExpr) -> Result<ExprLoc, TranslateError> {
        self.decr_depth_remaining(|| expression.range())?;
        let result = self.parse_expression_impl(expression);
        self.depth_remaining += 1;
        result
    }

    fn parse_expressions(&mut self, expressions: Vec<AstExpr>) -> Result<Vec<ExprLoc>, TranslateError> {
        expressions.into_iter().map(|e| self.parse_expression(e)).collect()
    }

    fn parse_boxed(&mut self, expression: AstExpr) -> Result<Box<ExprLoc>, TranslateError> {
        self.parse_expression(expression).map(Box::new)
    }

    fn parse_expression_impl(&mut self, expression: AstExpr) -> Result<ExprLoc, TranslateError> {
        let position = self.convert_range(expression.range());
        let expr = match expression {
            AstExpr::BoolOp(ast::ExprBoolOp { op, values, .. }) => Expr::BoolOp {
                op: match op {
                    BoolOp::And => BoolOperator::And,
                    BoolOp::Or => BoolOperator::Or,
                },
                values: self.parse_expressions(values)?,
            },
            AstExpr::BinOp(ast::ExprBinOp { left, op, right, .. }) => match convert_op(op) {
                Some(op) => Expr::BinOp {
                    left: self.parse_boxed(*left)?,
                    op,
                    right: self.parse_boxed(*right)?,
                },
                None => Expr::Unhandled(NodeKind::MatMult),
            },
            AstExpr::UnaryOp(ast::ExprUnaryOp { op, operand, .. }) => Expr::UnaryOp {
                op: match op {
                    UnaryOp::Not => UnaryOperator::Not,
                    UnaryOp::USub => UnaryOperator::Neg,
                    UnaryOp::UAdd => UnaryOperator::Pos,
                    UnaryOp::Invert => UnaryOperator::Invert,
                },
                operand: self.parse_boxed(*operand)?,
            },
            AstExpr::Lambda(ast::ExprLambda { parameters, body, .. }) => {
                let signature = match parameters {
                    Some(parameters) => self.parse_signature(&parameters)?,
                    None => Signature::default(),
                };
                Expr::Lambda(Box::new(Lambda {
                    signature,
                    body: self.parse_expression(*body)?,
                }))
            }
            AstExpr::If(ast::ExprIf { test, body, orelse, .. }) => Expr::IfElse {
                test: self.parse_boxed(*test)?,
                body: self.parse_boxed(*body)?,
                orelse: self.parse_boxed(*orelse)?,
            },
            AstExpr::Dict(ast::ExprDict { items, .. }) => {
                let items = items
                    .into_iter()
                    .map(|ast::DictItem { key, value }| match key {
                        Some(key) => Ok(DictItem::Pair {
                            key: self.parse_expression(key)?,
                            value: self.parse_expression(value)?,
                        }),
                        None => Ok(DictItem::Unpack(self.parse_expression(value)?)),
                    })
                    .collect::<Result<Vec<_>, TranslateError>>()?;
                Expr::Dict(items)
            }
            AstExpr::Compare(ast::ExprCompare {
                left,
                ops,
                comparators,
                ..
            }) => {
                let left = self.parse_boxed(*left)?;
                let comparisons = ops
                    .into_vec()
                    .into_iter()
                    .zip(comparators.into_vec())
                    .map(|(op, comparator)| Ok((convert_compare_op(op), self.parse_expression(comparator)?)))
                    .collect::<Result<Vec<_>, TranslateError>>()?;
                Expr::Compare { left, comparisons }
            }
            AstExpr::Call(ast::ExprCall { func, arguments, .. }) => {
                let ast::Arguments { args, keywords, .. } = arguments;
                let positional = args
                    .into_vec()
                    .into_iter()
                    .map(|arg| match arg {
                        AstExpr::Starred(ast::ExprStarred { value, .. }) => Ok(Arg::Spread(self.parse_expression(*value)?)),
                        other => Ok(Arg::Value(self.parse_expression(other)?)),
                    })
                    .collect::<Result<Vec<_>, TranslateError>>()?;
                let keywords = self.parse_keywords(keywords)?;
                Expr::Call {
                    callee: self.parse_boxed(*func)?,
                    args: CallArgs { positional, keywords },
                }
            }
            AstExpr::FString(ast::ExprFString { value, .. }) => {
                let mut parts = Vec::new();
                for fstring_part in &value {
                    match fstring_part {
                        ast::FStringPart::Literal(lit) => parts.push(FStringPart::Literal(lit.value.to_string())),
                        ast::FStringPart::FString(fstring) => {
                            for element in &fstring.elements {
                                parts.push(self.parse_fstring_element(element)?);
                            }
                        }
                    }
                }
                Expr::FString(parts)
            }
            AstExpr::StringLiteral(ast::ExprStringLiteral { value, .. }) => {
                Expr::Literal(Literal::Str(value.to_string()))
            }
            AstExpr::NumberLiteral(ast::ExprNumberLiteral { value, .. }) => match value {
                Number::Int(i) => match i.as_i64() {
                    Some(i) => Expr::Literal(Literal::Int(i)),
                    None => Expr::Unhandled(NodeKind::BigIntLiteral),
                },
                Number::Float(f) => Expr::Literal(Literal::Float(f)),
                Number::Complex { .. } => Expr::Unhandled(NodeKind::ComplexLiteral),
            },
            AstExpr::BooleanLiteral(ast::ExprBooleanLiteral { value, .. }) => Expr::Literal(Literal::Bool(value)),
            AstExpr::NoneLiteral(_) => Expr::Literal(Literal::None),
            AstExpr::Attribute(ast::ExprAttribute { value, attr, .. }) => Expr::Attribute {
                object: self.parse_boxed(*value)?,
                attr: attr.id,
            },
            AstExpr::Subscript(ast::ExprSubscript { value, slice, .. }) => {
                let object = self.parse_boxed(*value)?;
                match *slice {
                    AstExpr::Slice(ast::ExprSlice { lower, upper, step, .. }) => Expr::Slice {
                        object,
                        bounds: Box::new(SliceBounds {
                            lower: lower.map(|e| self.parse_expression(*e)).transpose()?,
                            upper: upper.map(|e| self.parse_expression(*e)).transpose()?,
                            step: step.map(|e| self.parse_expression(*e)).transpose()?,
                        }),
                    },
                    AstExpr::Tuple(ref t) if t.elts.iter().any(|e| matches!(e, AstExpr::Slice(_))) => {
                        Expr::Unhandled(NodeKind::ExtendedSlice)
                    }
                    index => Expr::Subscript {
                        object,
                        index: self.parse_boxed(index)?,
                    },
                }
            }
            AstExpr::Name(ast::ExprName { id, range, .. }) => Expr::Name(self.identifier(&id, range)),
            AstExpr::List(ast::ExprList { elts, .. }) => Expr::List(self.parse_expressions(elts)?),
            AstExpr::Tuple(ast::ExprTuple { elts, .. }) => Expr::Tuple(self.parse_expressions(elts)?),
            AstExpr::Starred(ast::ExprStarred { value, .. }) => Expr::Starred(self.parse_boxed(*value)?),
            AstExpr::Slice(_) => Expr::Unhandled(NodeKind::ExtendedSlice),
            AstExpr::Named(_) => Expr::Unhandled(NodeKind::Named),
            AstExpr::Set(_) => Expr::Unhandled(NodeKind::Set),
            AstExpr::ListComp(_) => Expr::Unhandled(NodeKind::ListComp),
            AstExpr::SetComp(_) => Expr::Unhandled(NodeKind::SetComp),
            AstExpr::DictComp(_) => Expr::Unhandled(NodeKind::DictComp),
            AstExpr::Generator(_) => Expr::Unhandled(NodeKind::Generator),
            AstExpr::Await(_) => Expr::Unhandled(NodeKind::Await),
            AstExpr::Yield(_) => Expr::Unhandled(NodeKind::Yield),
            AstExpr::YieldFrom(_) => Expr::Unhandled(NodeKind::YieldFrom),
            AstExpr::TString(_) => Expr::Unhandled(NodeKind::TString),
            AstExpr::BytesLiteral(_) => Expr::Unhandled(NodeKind::BytesLiteral),
            AstExpr::EllipsisLiteral(_) => Expr::Unhandled(NodeKind::EllipsisLiteral),
            AstExpr::IpyEscapeCommand(_) => Expr::Unhandled(NodeKind::IpyEscapeCommand),
        };
        Ok(ExprLoc::new(position, expr))
    }

    /// Parses a single f-string element (literal or interpolation).
    fn parse_fstring_element(&mut self, element: &InterpolatedStringElement) -> Result<FStringPart, TranslateError> {
        match element {
            InterpolatedStringElement::Literal(lit) => Ok(FStringPart::Literal(lit.value.to_string())),
            InterpolatedStringElement::Interpolation(interp) => Ok(FStringPart::Interpolation {
                expr: self.parse_boxed((*interp.expression).clone())?,
                has_conversion: interp.conversion != ConversionFlag::None,
                has_format_spec: interp.format_spec.is_some(),
                is_debug: interp.debug_text.is_some(),
            }),
        }
    }

    fn parse_keywords(&mut self, keywords: impl IntoIterator<Item = Keyword>) -> Result<Vec<Kwarg>, TranslateError> {
        keywords
            .into_iter()
            .map(|kwarg| {
                let value = self.parse_expression(kwarg.value)?;
                Ok(match kwarg.arg {
                    Some(name) => Kwarg::Named { name: name.id, value },
                    None => Kwarg::Spread(value),
                })
            })
            .collect()
    }

    fn parse_signature(&mut self, params: &Parameters) -> Result<Signature, TranslateError> {
        Ok(Signature {
            pos_only: self.parse_params_with_defaults(&params.posonlyargs)?,
            args: self.parse_params_with_defaults(&params.args)?,
            var_args: params.vararg.as_ref().map(|p| p.name.id.clone()),
            kw_only: self.parse_params_with_defaults(&params.kwonlyargs)?,
            var_kwargs: params.kwarg.as_ref().map(|p| p.name.id.clone()),
        })
    }

    fn parse_params_with_defaults(&mut self, params: &[ParameterWithDefault]) -> Result<Vec<Param>, TranslateError> {
        params
            .iter()
            .map(|p| {
                let default = match &p.default {
                    Some(expr) => Some(self.parse_expression((**expr).clone())?),
                    None => None,
                };
                Ok(Param {
                    name: p.parameter.name.id.clone(),
                    default,
                })
            })
            .collect()
    }

    fn import_alias(&self, alias: &ast::Alias) -> ImportAlias {
        ImportAlias {
            name: alias.name.id.clone(),
            asname: alias.asname.as_ref().map(|a| a.id.clone()),
            position: self.convert_range(alias.range),
        }
    }

    fn identifier(&self, id: &Name, range: TextRange) -> Identifier {
        Identifier::new(id.clone(), self.convert_range(range))
    }

    fn convert_range(&self, range: TextRange) -> CodeRange {
        CodeRange::new(self.offset_to_loc(range.start().into()), self.offset_to_loc(range.end().into()))
    }

    fn offset_to_loc(&self, offset: usize) -> CodeLoc {
        let line_no = self.line_ends.partition_point(|&end| end < offset);
        let line_start = match line_no {
            0 => 0,
            n => self.line_ends[n - 1] + 1,
        };
        CodeLoc::new(to_u32(line_no + 1), to_u32(offset - line_start + 1))
    }

    /// Decrements the depth remaining for nested structures.
    /// Returns an error if the depth remaining goes to zero.
    fn decr_depth_remaining(&mut self, get_range: impl FnOnce() -> TextRange) -> Result<(), TranslateError> {
        if let Some(depth_remaining) = self.depth_remaining.checked_sub(1) {
            self.depth_remaining = depth_remaining;
            Ok(())
        } else {
            let position = self.convert_range(get_range());
            Err(TranslateError::syntax("too many nested parentheses", position))
        }
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// `None` for matrix multiplication, which has no counterpart.
fn convert_op(op: AstOperator) -> Option<Operator> {
    Some(match op {
        AstOperator::Add => Operator::Add,
        AstOperator::Sub => Operator::Sub,
        AstOperator::Mult => Operator::Mult,
        AstOperator::MatMult => return None,
        AstOperator::Div => Operator::Div,
        AstOperator::Mod => Operator::Mod,
        AstOperator::Pow => Operator::Pow,
        AstOperator::LShift => Operator::LShift,
        AstOperator::RShift => Operator::RShift,
        AstOperator::BitOr => Operator::BitOr,
        AstOperator::BitXor => Operator::BitXor,
        AstOperator::BitAnd => Operator::BitAnd,
        AstOperator::FloorDiv => Operator::FloorDiv,
    })
}

fn convert_compare_op(op: CmpOp) -> CmpOperator {
    match op {
        CmpOp::Eq => CmpOperator::Eq,
        CmpOp::NotEq => CmpOperator::NotEq,
        CmpOp::Lt => CmpOperator::Lt,
        CmpOp::LtE => CmpOperator::LtE,
        CmpOp::Gt => CmpOperator::Gt,
        CmpOp::GtE => CmpOperator::GtE,
        CmpOp::Is => CmpOperator::Is,
        CmpOp::IsNot => CmpOperator::IsNot,
        CmpOp::In => CmpOperator::In,
        CmpOp::NotIn => CmpOperator::NotIn,
    }
}

/// Source range of a node, as 1-based line/column start and end points.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct CodeRange {
    start: CodeLoc,
    end: CodeLoc,
}

/// Custom Debug implementation to make displaying code much less verbose.
impl fmt::Debug for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

impl CodeRange {
    #[must_use]
    pub const fn new(start: CodeLoc, end: CodeLoc) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn start(&self) -> CodeLoc {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> CodeLoc {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(code: &str) -> Node {
        let mut nodes = parse(code).expect("code should parse");
        assert_eq!(nodes.len(), 1, "expected a single statement");
        nodes.remove(0)
    }

    #[test]
    fn positions_are_one_based() {
        let Node::Assign { position, .. } = parse_one("x = 1\n") else {
            panic!("expected an assignment");
        };
        assert_eq!(position.start(), CodeLoc::new(1, 1));
        assert_eq!(position.end(), CodeLoc::new(1, 6));

        let nodes = parse("a = 1\nif a:\n    b = 2\n").expect("code should parse");
        let Node::If { body, .. } = &nodes[1] else {
            panic!("expected an if statement");
        };
        let Node::Assign { position, .. } = &body[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(position.start(), CodeLoc::new(3, 5));
    }

    #[test]
    fn elif_chains_nest_in_else_branch() {
        let Node::If { or_else, .. } = parse_one("if a:\n    pass\nelif b:\n    pass\nelse:\n    pass\n") else {
            panic!("expected an if statement");
        };
        assert!(matches!(or_else.as_slice(), [Node::If { or_else, .. }] if or_else.len() == 1));
    }

    #[test]
    fn unsupported_statements_become_unhandled_nodes() {
        let node = parse_one("try:\n    pass\nexcept:\n    pass\n");
        assert!(matches!(node, Node::Unhandled { kind: NodeKind::Try, .. }));

        let node = parse_one("from . import x\n");
        assert!(matches!(node, Node::Unhandled { kind: NodeKind::RelativeImport, .. }));
    }

    #[test]
    fn stepped_slices_keep_their_step() {
        let Node::Expr(expr) = parse_one("a[1:2:3]") else {
            panic!("expected an expression statement");
        };
        let Expr::Slice { bounds, .. } = expr.expr else {
            panic!("expected a slice");
        };
        assert!(bounds.lower.is_some() && bounds.upper.is_some() && bounds.step.is_some());
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err = parse("def (:\n").expect_err("invalid syntax");
        assert!(matches!(err, TranslateError::Syntax { .. }), "got {err:?}");
    }
}
