//! Statements: assignment, control flow and loops.

use super::{Context, Scope, Translator};
use crate::{
    block,
    error::TranslateError,
    expressions::{Expr, ExprLoc, Literal, Node, Operator},
    js,
    parse::CodeRange,
};

/// Parameter name of the scope that fans a value out to unpacking targets.
const UNPACKED: &str = "$t";

impl Translator<'_> {
    pub(super) fn assign(&mut self, targets: &[ExprLoc], value: &ExprLoc, position: CodeRange) -> Result<String, TranslateError> {
        let value = self.expr(value)?;
        match targets {
            [target] => self.bind(target, &value),
            [] => Err(TranslateError::syntax("assignment without a target", position)),
            _ => {
                // `a = b = value` and unpacking both evaluate the value once.
                let bindings = targets
                    .iter()
                    .map(|target| self.bind(target, UNPACKED))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!(
                    "{};",
                    block::wrap_call(&[(UNPACKED, value)], Vec::<&str>::new(), bindings)
                ))
            }
        }
    }

    /// Binds `value`, the text of an already-evaluated expression, to `target`.
    pub(super) fn bind(&mut self, target: &ExprLoc, value: &str) -> Result<String, TranslateError> {
        match &target.expr {
            Expr::Name(ident) => Ok(format!("{} = {value};", js::ident(ident.as_str()))),
            Expr::Attribute { object, attr } => Ok(format!("{}.{attr} = {value};", self.expr(object)?)),
            Expr::Subscript { object, index } => Ok(format!("{}[{}] = {value};", self.expr(object)?, self.expr(index)?)),
            Expr::List(elts) | Expr::Tuple(elts) => self.fan_out(elts, value, target.position),
            Expr::Slice { .. } => Err(TranslateError::not_yet("assignment to slices", target.position)),
            _ => Err(TranslateError::syntax("cannot assign to this expression", target.position)),
        }
    }

    /// Binds each element of `targets` by index into `value`.
    ///
    /// At most one target may be starred; it receives the elements left over
    /// between the targets before and after it.
    fn fan_out(&mut self, targets: &[ExprLoc], value: &str, position: CodeRange) -> Result<String, TranslateError> {
        let starred: Vec<usize> = targets
            .iter()
            .enumerate()
            .filter(|(_, t)| matches!(t.expr, Expr::Starred(_)))
            .map(|(i, _)| i)
            .collect();
        if starred.len() > 1 {
            return Err(TranslateError::syntax("multiple starred expressions in assignment", position));
        }
        let star = starred.first().copied();
        let mut bindings = Vec::with_capacity(targets.len());
        for (i, target) in targets.iter().enumerate() {
            let binding = match (&target.expr, star) {
                (Expr::Starred(inner), _) => {
                    let after = targets.len() - i - 1;
                    self.bind(
                        inner,
                        &format!("Array.prototype.slice.call({UNPACKED}, {i}, {UNPACKED}.length - {after})"),
                    )?
                }
                (_, Some(s)) if i > s => {
                    let from_end = targets.len() - i;
                    self.bind(target, &format!("{UNPACKED}[{UNPACKED}.length - {from_end}]"))?
                }
                _ => self.bind(target, &format!("{UNPACKED}[{i}]"))?,
            };
            bindings.push(binding);
        }
        Ok(format!(
            "{};",
            block::wrap_call(&[(UNPACKED, value.to_owned())], Vec::<&str>::new(), bindings)
        ))
    }

    pub(super) fn aug_assign(
        &mut self,
        target: &ExprLoc,
        op: Operator,
        value: &ExprLoc,
        position: CodeRange,
    ) -> Result<String, TranslateError> {
        if !matches!(target.expr, Expr::Name(_) | Expr::Attribute { .. } | Expr::Subscript { .. }) {
            return Err(TranslateError::syntax("illegal target for augmented assignment", position));
        }
        if !matches!(op, Operator::Pow | Operator::FloorDiv) {
            let target = self.expr(target)?;
            let value = self.expr(value)?;
            return Ok(format!("{target} {}= {value};", super::expr::operator_symbol(op)));
        }
        // No compound operator exists, so the target is read and written
        // separately; its object and index are bound first to evaluate them once.
        let (bindings, place) = match &target.expr {
            Expr::Attribute { object, attr } => (vec![("$o", self.expr(object)?)], format!("$o.{attr}")),
            Expr::Subscript { object, index } => (
                vec![("$o", self.expr(object)?), ("$i", self.expr(index)?)],
                "$o[$i]".to_owned(),
            ),
            _ => (Vec::new(), self.expr(target)?),
        };
        let value = self.expr(value)?;
        let update = format!("{place} = {};", super::expr::binary(&place, op, &value));
        if bindings.is_empty() {
            Ok(update)
        } else {
            Ok(format!("{};", block::wrap_call(&bindings, Vec::<&str>::new(), [update])))
        }
    }

    pub(super) fn if_stmt(&mut self, test: &ExprLoc, body: &[Node], or_else: &[Node]) -> Result<String, TranslateError> {
        let test = self.expr(test)?;
        let body = self.statements(body)?;
        let mut out = format!("if ({test}) {{\n{body}\n}}");
        if !or_else.is_empty() {
            let or_else = self.statements(or_else)?;
            out.push_str(&format!(" else {{\n{or_else}\n}}"));
        }
        Ok(out)
    }

    pub(super) fn while_loop(
        &mut self,
        test: &ExprLoc,
        body: &[Node],
        or_else: &[Node],
        position: CodeRange,
    ) -> Result<String, TranslateError> {
        if !or_else.is_empty() {
            return Err(TranslateError::never("`while`-`else` clauses", position));
        }
        let test = self.expr(test)?;
        let body = self.child(Context {
            loops: self.ctx.loops + 1,
            ..self.ctx
        })
        .statements(body)?;
        Ok(format!("while ({test}) {{\n{body}\n}}"))
    }

    /// Index-based iteration: `__len__`/`__getitem__` when the iterable has
    /// them, `length` and indexing otherwise.
    pub(super) fn for_loop(
        &mut self,
        target: &ExprLoc,
        iter: &ExprLoc,
        body: &[Node],
        or_else: &[Node],
        position: CodeRange,
    ) -> Result<String, TranslateError> {
        if !or_else.is_empty() {
            return Err(TranslateError::not_yet("`for`-`else` clauses", position));
        }
        let depth = self.ctx.for_depth;
        let (index, items) = (format!("$i{depth}"), format!("$it{depth}"));
        let iter = self.expr(iter)?;
        let length =
            format!("(typeof {items}.__len__ === \"function\" ? {items}.__len__() : {items}.length)");
        let item = format!(
            "(typeof {items}.__getitem__ === \"function\" ? {items}.__getitem__({index}) : {items}[{index}])"
        );
        let binding = self.bind(target, &item)?;
        let body = self.child(Context {
            loops: self.ctx.loops + 1,
            for_depth: depth + 1,
            ..self.ctx
        })
        .statements(body)?;
        Ok(format!(
            "for (var {index} = 0, {items} = {iter}; {index} < {length}; {index}++) {{\n{}\n}}",
            block::lines([binding, body])
        ))
    }

    pub(super) fn return_stmt(&mut self, value: Option<&ExprLoc>, position: CodeRange) -> Result<String, TranslateError> {
        if !self.ctx.is_function() {
            return Err(TranslateError::syntax("'return' outside function", position));
        }
        match value {
            None => Ok("return;".to_owned()),
            Some(value) if self.ctx.scope == Scope::Initializer => {
                if matches!(value.expr, Expr::Literal(Literal::None)) {
                    Ok("return;".to_owned())
                } else {
                    Err(TranslateError::never("returning a value from `__init__`", position))
                }
            }
            Some(value) => Ok(format!("return {};", self.expr(value)?)),
        }
    }

    pub(super) fn loop_jump(&mut self, keyword: &'static str, position: CodeRange) -> Result<String, TranslateError> {
        if self.ctx.loops == 0 {
            return Err(TranslateError::syntax(format!("'{keyword}' outside loop"), position));
        }
        Ok(format!("{keyword};"))
    }
}
