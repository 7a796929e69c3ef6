//! Call sites.
//!
//! Every call goes through a small invoker scope that receives the callee, the
//! receiver, the positional argument array and the keyword object, so each is
//! evaluated exactly once and in source order. What the invoker does with them
//! depends on the [`CallConvention`].

use super::{
    Translator,
    expr::{Spreadable, concat, merge},
};
use crate::{
    args::{Arg, CallArgs, Kwarg},
    block,
    error::TranslateError,
    expressions::{Expr, ExprLoc},
    js,
    options::CallConvention,
};

/// Builds the argument bundle when the callee is translated Python, and falls
/// back to a plain positional call otherwise.
const BUNDLE_INVOKE: &str = "return $f.func_defaults !== undefined ? $f.call($s, {$pyjs_call: true, args: $a, kwargs: $k}) : $f.apply($s, $a);";

/// Attaches keyword arguments and a defaults copy to the callee for the
/// duration of the call.
const SIDE_CHANNEL_INVOKE: [&str; 6] = [
    "$f.kwargs = $k;",
    "$f.defaults = ($f.func_defaults || []).concat([]);",
    "var $r = $f.apply($s, $a);",
    "delete $f.kwargs;",
    "delete $f.defaults;",
    "return $r;",
];

/// Routes arguments to the host's `console.log`, or its global `print` when
/// there is no console.
const PRINT: &str = "if (typeof console !== \"undefined\" && typeof console.log !== \"undefined\") {
console.log.apply(console, $p);
} else {
print.apply(null, $p);
}";

impl Translator<'_> {
    pub(super) fn call(&mut self, callee: &ExprLoc, args: &CallArgs) -> Result<String, TranslateError> {
        if callee.as_name().is_some_and(|name| name.as_str() == "print") && args.is_plain_positional() {
            return self.print(args);
        }
        match &callee.expr {
            Expr::Attribute { object, attr } => {
                // The receiver is evaluated once and bound before the method is looked up.
                let receiver = self.expr(object)?;
                let positional = self.positional(&args.positional)?;
                let keywords = self.keywords(&args.keywords)?;
                let invoke = self.invoke(format!("$s.{attr}"), "$s".to_owned(), positional, keywords);
                Ok(block::wrap_call(
                    &[("$s", receiver)],
                    Vec::<&str>::new(),
                    [format!("return {invoke};")],
                ))
            }
            _ => {
                let callee = self.expr(callee)?;
                let positional = self.positional(&args.positional)?;
                let keywords = self.keywords(&args.keywords)?;
                Ok(self.invoke(callee, "null".to_owned(), positional, keywords))
            }
        }
    }

    /// Calls `callee` with `receiver` as `this` under the configured convention.
    pub(super) fn invoke(&self, callee: String, receiver: String, positional: String, keywords: String) -> String {
        let bindings = [("$f", callee), ("$s", receiver), ("$a", positional), ("$k", keywords)];
        match self.options().call_convention {
            CallConvention::Bundle => block::wrap_call(&bindings, Vec::<&str>::new(), [BUNDLE_INVOKE.to_owned()]),
            CallConvention::SideChannel => block::wrap_call(
                &bindings,
                Vec::<&str>::new(),
                SIDE_CHANNEL_INVOKE.iter().map(|line| (*line).to_owned()),
            ),
        }
    }

    /// The positional argument array, with `*args` spread in place.
    fn positional(&mut self, args: &[Arg]) -> Result<String, TranslateError> {
        let items = args
            .iter()
            .map(|arg| match arg {
                Arg::Value(value) => self.expr(value).map(Spreadable::Item),
                Arg::Spread(value) => self.expr(value).map(Spreadable::Spread),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(concat(items))
    }

    /// The keyword object: a literal, or a merge when `**mapping` is present.
    fn keywords(&mut self, keywords: &[Kwarg]) -> Result<String, TranslateError> {
        let mut parts = Vec::new();
        let mut fields = Vec::new();
        let mut spread = false;
        for keyword in keywords {
            match keyword {
                Kwarg::Named { name, value } => fields.push(format!("{}: {}", js::string(name), self.expr(value)?)),
                Kwarg::Spread(mapping) => {
                    spread = true;
                    if !fields.is_empty() {
                        parts.push(format!("{{{}}}", std::mem::take(&mut fields).join(", ")));
                    }
                    parts.push(self.expr(mapping)?);
                }
            }
        }
        let literal = format!("{{{}}}", fields.join(", "));
        if !spread {
            return Ok(literal);
        }
        if !fields.is_empty() {
            parts.push(literal);
        }
        Ok(merge(parts))
    }

    fn print(&mut self, args: &CallArgs) -> Result<String, TranslateError> {
        let values = self.positional(&args.positional)?;
        Ok(block::wrap_call(&[("$p", values)], Vec::<&str>::new(), [PRINT.to_owned()]))
    }
}
