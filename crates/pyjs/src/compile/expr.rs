//! Expressions: operators, displays, comparisons, slices and f-strings.

use super::Translator;
use crate::{
    block,
    error::TranslateError,
    expressions::{CmpOperator, DictItem, Expr, ExprLoc, FStringPart, Literal, Operator, SliceBounds, UnaryOperator},
    js,
    parse::CodeRange,
};

pub(super) fn literal(literal: &Literal) -> String {
    match literal {
        Literal::None => "null".to_owned(),
        Literal::Bool(value) => value.to_string(),
        Literal::Int(value) => value.to_string(),
        Literal::Float(value) => js::float(*value),
        Literal::Str(value) => js::string(value),
    }
}

/// Infix symbol for operators that have one.
pub(super) fn operator_symbol(op: Operator) -> &'static str {
    match op {
        Operator::Add => "+",
        Operator::Sub => "-",
        Operator::Mult => "*",
        Operator::Div | Operator::FloorDiv => "/",
        Operator::Mod => "%",
        Operator::Pow => "**",
        Operator::LShift => "<<",
        Operator::RShift => ">>",
        Operator::BitOr => "|",
        Operator::BitXor => "^",
        Operator::BitAnd => "&",
    }
}

pub(super) fn binary(left: &str, op: Operator, right: &str) -> String {
    match op {
        Operator::Pow => format!("Math.pow({left}, {right})"),
        Operator::FloorDiv => format!("Math.floor({left} / {right})"),
        _ => format!("({left} {} {right})", operator_symbol(op)),
    }
}

pub(super) fn unary(op: UnaryOperator, operand: &str) -> String {
    let symbol = match op {
        UnaryOperator::Not => "!",
        UnaryOperator::Neg => "-",
        UnaryOperator::Pos => "+",
        UnaryOperator::Invert => "~",
    };
    format!("{symbol}({operand})")
}

/// An array of `items`, with spread groups concatenated onto the literal prefix.
pub(super) fn concat(items: Vec<Spreadable>) -> String {
    let mut groups: Vec<String> = Vec::new();
    let mut run: Vec<String> = Vec::new();
    for item in items {
        match item {
            Spreadable::Item(text) => run.push(text),
            Spreadable::Spread(text) => {
                if !run.is_empty() || groups.is_empty() {
                    groups.push(format!("[{}]", std::mem::take(&mut run).join(", ")));
                }
                groups.push(format!("Array.prototype.slice.call({text})"));
            }
        }
    }
    if !run.is_empty() || groups.is_empty() {
        groups.push(format!("[{}]", run.join(", ")));
    }
    let head = groups.remove(0);
    if groups.is_empty() {
        head
    } else {
        format!("{head}.concat({})", groups.join(", "))
    }
}

/// Copies the own properties of every argument after the first into the first.
const MERGE: &str = "for (var $i = 1; $i < arguments.length; $i++) {
for (var $n in arguments[$i]) {
if (Object.prototype.hasOwnProperty.call(arguments[$i], $n)) {
$r[$n] = arguments[$i][$n];
}
}
}
return $r;";

/// Shallow merge of object `parts` into a fresh object, later parts winning.
pub(super) fn merge(parts: Vec<String>) -> String {
    let mut args = vec!["{}".to_owned()];
    args.extend(parts);
    format!("(function ($r) {{\n{MERGE}\n}})({})", args.join(", "))
}

/// One element of an argument list or display that may be spread.
pub(super) enum Spreadable {
    Item(String),
    Spread(String),
}

impl Translator<'_> {
    /// List and tuple displays, both arrays.
    pub(super) fn sequence(&mut self, elts: &[ExprLoc]) -> Result<String, TranslateError> {
        let items = elts
            .iter()
            .map(|elt| match &elt.expr {
                Expr::Starred(inner) => self.expr(inner).map(Spreadable::Spread),
                _ => self.expr(elt).map(Spreadable::Item),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(concat(items))
    }

    /// Literal-keyed dicts become object literals; computed keys are filled in
    /// one by one and `**` unpacking merges, all in source order.
    pub(super) fn dict(&mut self, items: &[DictItem]) -> Result<String, TranslateError> {
        let mut parts = Vec::new();
        let mut pairs = Vec::new();
        let mut computed = false;
        let mut unpacked = false;
        for item in items {
            match item {
                DictItem::Pair { key, value } => {
                    computed |= !matches!(key.expr, Expr::Literal(Literal::Str(_) | Literal::Int(_)));
                    pairs.push((self.expr(key)?, self.expr(value)?));
                }
                DictItem::Unpack(mapping) => {
                    unpacked = true;
                    if !pairs.is_empty() {
                        parts.push(object(std::mem::take(&mut pairs), computed));
                        computed = false;
                    }
                    parts.push(self.expr(mapping)?);
                }
            }
        }
        if !unpacked {
            return Ok(object(pairs, computed));
        }
        if !pairs.is_empty() {
            parts.push(object(pairs, computed));
        }
        Ok(merge(parts))
    }

    pub(super) fn slice(&mut self, object: &ExprLoc, bounds: &SliceBounds, position: CodeRange) -> Result<String, TranslateError> {
        if bounds.step.is_some() {
            return Err(TranslateError::not_yet("stepped slices", position));
        }
        let object = self.expr(object)?;
        let lower = self.optional(bounds.lower.as_ref())?;
        let upper = self.optional(bounds.upper.as_ref())?;
        Ok(block::wrap_call(
            &[("$o", object), ("$l", lower), ("$u", upper), ("$s", "null".to_owned())],
            Vec::<&str>::new(),
            [
                "return typeof $o.slice === \"function\" ? $o.slice($l === null ? 0 : $l, $u === null ? $o.length : $u) : $o.__getslice__($l, $u, $s);"
                    .to_owned(),
            ],
        ))
    }

    fn optional(&mut self, expr: Option<&ExprLoc>) -> Result<String, TranslateError> {
        expr.map_or_else(|| Ok("null".to_owned()), |e| self.expr(e))
    }

    /// A single comparison is a plain infix expression. A chain evaluates each
    /// operand at most once, left to right, stopping at the first false pair.
    pub(super) fn compare(&mut self, left: &ExprLoc, comparisons: &[(CmpOperator, ExprLoc)]) -> Result<String, TranslateError> {
        let left = self.expr(left)?;
        if let [(op, right)] = comparisons {
            let right = self.expr(right)?;
            return Ok(comparison(*op, &left, &right));
        }
        let temps: Vec<String> = (0..=comparisons.len()).map(|i| format!("${i}")).collect();
        let mut tests = Vec::with_capacity(comparisons.len());
        for (i, (op, right)) in comparisons.iter().enumerate() {
            let right = format!("({} = {})", temps[i + 1], self.expr(right)?);
            tests.push(comparison(*op, &temps[i], &right));
        }
        Ok(block::wrap(
            &temps,
            [format!("{} = {left};", temps[0]), format!("return {};", tests.join(" && "))],
        ))
    }

    pub(super) fn fstring(&mut self, parts: &[FStringPart], position: CodeRange) -> Result<String, TranslateError> {
        let mut pieces = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                FStringPart::Literal(text) => pieces.push(js::string(text)),
                FStringPart::Interpolation {
                    expr,
                    has_conversion,
                    has_format_spec,
                    is_debug,
                } => {
                    if *is_debug {
                        return Err(TranslateError::not_yet("self-documenting f-string expressions", position));
                    }
                    if *has_conversion {
                        return Err(TranslateError::not_yet("f-string conversions", position));
                    }
                    if *has_format_spec {
                        return Err(TranslateError::not_yet("f-string format specifications", position));
                    }
                    pieces.push(format!("String({})", self.expr(expr)?));
                }
            }
        }
        Ok(match pieces.as_slice() {
            [] => "\"\"".to_owned(),
            [only] if only.starts_with('"') => only.clone(),
            _ => format!("({})", pieces.join(" + ")),
        })
    }
}

/// `key: value` pairs as an object literal, or filled in one by one when a key
/// is computed.
fn object(pairs: Vec<(String, String)>, computed: bool) -> String {
    if !computed {
        let fields: Vec<String> = pairs.into_iter().map(|(k, v)| format!("{k}: {v}")).collect();
        return format!("{{{}}}", fields.join(", "));
    }
    let mut segments: Vec<String> = pairs.into_iter().map(|(k, v)| format!("$d[{k}] = {v};")).collect();
    segments.push("return $d;".to_owned());
    block::wrap_call(&[("$d", "{}".to_owned())], Vec::<&str>::new(), segments)
}

/// One comparison of already-translated operands.
fn comparison(op: CmpOperator, left: &str, right: &str) -> String {
    let symbol = match op {
        CmpOperator::Eq | CmpOperator::Is => "===",
        CmpOperator::NotEq | CmpOperator::IsNot => "!==",
        CmpOperator::Lt => "<",
        CmpOperator::LtE => "<=",
        CmpOperator::Gt => ">",
        CmpOperator::GtE => ">=",
        CmpOperator::In => return membership(left, right),
        CmpOperator::NotIn => return format!("!{}", membership(left, right)),
    };
    format!("({left} {symbol} {right})")
}

/// `left in right`: `__contains__`, then `indexOf` for arrays and strings,
/// then property lookup.
fn membership(left: &str, right: &str) -> String {
    block::wrap_call(
        &[("$x", left.to_owned()), ("$y", right.to_owned())],
        Vec::<&str>::new(),
        [
            "return typeof $y.__contains__ === \"function\" ? $y.__contains__($x) : typeof $y.indexOf === \"function\" ? $y.indexOf($x) !== -1 : $x in $y;"
                .to_owned(),
        ],
    )
}
