//! Function definitions and lambdas.
//!
//! A Python function becomes a target function object `$fn` carrying
//! `__name__`, `func_defaults` (positional defaults, evaluated once at
//! definition) and `func_kwdefaults`. Its body starts with a prologue that
//! recovers positional arguments, keyword arguments and defaults according to
//! the call convention, then binds every parameter.

use ruff_python_ast::name::Name;
use tracing::trace;

use super::{Context, Scope, Translator};
use crate::{
    block,
    error::TranslateError,
    expressions::{ExprLoc, FunctionDef, Lambda, Node},
    js,
    options::CallConvention,
    prepare,
    signature::{Param, Signature},
};

/// Recovers the call-local bundle, or builds one when called natively.
const BUNDLE_PROLOGUE: &str = "var $c = arguments.length === 1 && arguments[0] != null && arguments[0].$pyjs_call === true ? arguments[0] : {$pyjs_call: true, args: Array.prototype.slice.call(arguments), kwargs: {}};
var $a = $c.args, $k = $c.kwargs, $d = $fn.func_defaults;";

/// Reads the keyword arguments and defaults attached to the function object.
const SIDE_CHANNEL_PROLOGUE: &str = "var $k = $fn.kwargs || {}, $d = $fn.defaults !== undefined ? $fn.defaults : $fn.func_defaults, $a = Array.prototype.slice.call(arguments);";

/// Methods invoked on an instance receive it as the first positional argument.
const METHOD_RECEIVER: &str = "if (this != null && this.__class__ !== undefined) {
$a = [this].concat($a);
}";

/// What a function body is made of.
#[derive(Clone, Copy)]
enum Body<'n> {
    Statements(&'n [Node]),
    /// A lambda's single returned expression.
    Expression(&'n ExprLoc),
}

impl Translator<'_> {
    pub(super) fn function_def(&mut self, def: &FunctionDef) -> Result<String, TranslateError> {
        let scope = match self.ctx.scope {
            Scope::Class if def.is_staticmethod() => Scope::Function,
            Scope::Class if def.name.as_str() == "__init__" => Scope::Initializer,
            Scope::Class => Scope::Method,
            _ => Scope::Function,
        };
        trace!(name = def.name.as_str(), ?scope, "function definition");
        let value = self.function_value(def.name.as_str(), &def.signature, Body::Statements(&def.body), scope)?;
        let name = js::ident(def.name.as_str());
        let mut statements = vec![format!("{name} = {value};")];
        statements.extend(self.decorate(&name, &def.decorators)?);
        Ok(block::lines(statements))
    }

    /// Applies decorators innermost first, rebinding `name` after each.
    ///
    /// `@staticmethod` only changes how the function is defined and is not called.
    pub(super) fn decorate(&mut self, name: &str, decorators: &[ExprLoc]) -> Result<Vec<String>, TranslateError> {
        let mut statements = Vec::with_capacity(decorators.len());
        for decorator in decorators.iter().rev() {
            if decorator.as_name().is_some_and(|n| n.as_str() == "staticmethod") {
                continue;
            }
            let decorator = self.expr(decorator)?;
            let call = self.invoke(decorator, "null".to_owned(), format!("[{name}]"), "{}".to_owned());
            statements.push(format!("{name} = {call};"));
        }
        Ok(statements)
    }

    pub(super) fn lambda(&mut self, lambda: &Lambda) -> Result<String, TranslateError> {
        self.function_value("<lambda>", &lambda.signature, Body::Expression(&lambda.body), Scope::Function)
    }

    /// The expression creating the function object.
    ///
    /// Defaults are evaluated here, in the defining scope; the body is emitted
    /// by a child translator for the function's own scope.
    fn function_value(
        &mut self,
        name: &str,
        signature: &Signature,
        body: Body<'_>,
        scope: Scope,
    ) -> Result<String, TranslateError> {
        let locals: Vec<Name> = match body {
            Body::Statements(nodes) => prepare::collect_function(signature, nodes, self.compiler)?
                .into_iter()
                .collect(),
            Body::Expression(_) => signature.param_names().cloned().collect(),
        };
        let defaults = signature
            .positional_defaults()
            .map(|default| self.expr(default))
            .collect::<Result<Vec<_>, _>>()?;
        let kw_defaults = signature
            .kw_only
            .iter()
            .filter_map(|param| param.default.as_ref().map(|default| (param, default)))
            .map(|(param, default)| -> Result<String, TranslateError> {
                Ok(format!("{}: {}", js::string(param.name.as_str()), self.expr(default)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut inner = self.child(Context::of(scope));
        let body = match body {
            Body::Statements(nodes) => inner.statements(nodes)?,
            Body::Expression(expr) => format!("return {};", inner.expr(expr)?),
        };
        let prologue = block::lines(
            [self.prologue(scope)]
                .into_iter()
                .chain(block::hoist(&locals))
                .chain(bind_params(name, signature)),
        );

        let mut segments = vec![
            format!("var $fn = function () {{\n{}\n}};", block::lines([prologue, body])),
            format!("$fn.__name__ = {};", js::string(name)),
            format!("$fn.func_defaults = [{}];", defaults.join(", ")),
        ];
        if !kw_defaults.is_empty() {
            segments.push(format!("$fn.func_kwdefaults = {{{}}};", kw_defaults.join(", ")));
        }
        segments.push("return $fn;".to_owned());
        Ok(block::wrap(Vec::<&str>::new(), segments))
    }

    fn prologue(&self, scope: Scope) -> String {
        let recover = match self.options().call_convention {
            CallConvention::Bundle => BUNDLE_PROLOGUE,
            CallConvention::SideChannel => SIDE_CHANNEL_PROLOGUE,
        };
        if matches!(scope, Scope::Method | Scope::Initializer) {
            format!("{recover}\n{METHOD_RECEIVER}")
        } else {
            recover.to_owned()
        }
    }
}

/// One binding statement per parameter, in signature order.
///
/// A positional parameter takes, in order: the positional argument at its
/// index, a keyword argument of its name (unless positional-only), its default,
/// and otherwise raises `TypeError` when the body starts.
fn bind_params(function: &str, signature: &Signature) -> Vec<String> {
    let first_default = signature.first_default();
    let mut statements = Vec::new();
    for (index, param) in signature.positional().enumerate() {
        let mut sources = vec![format!("$a.length > {index} ? $a[{index}]")];
        if index >= signature.pos_only.len() {
            sources.push(keyword_source(param.name.as_str()));
        }
        let fallback = if param.default.is_some() {
            format!("$d[{}]", index - first_default)
        } else {
            missing(function, param)
        };
        statements.push(format!("{} = {} : {fallback};", js::ident(param.name.as_str()), sources.join(" : ")));
    }
    if let Some(var_args) = &signature.var_args {
        statements.push(format!(
            "{} = $a.slice({});",
            js::ident(var_args.as_str()),
            signature.positional_count()
        ));
    }
    for param in &signature.kw_only {
        let fallback = if param.default.is_some() {
            format!("$fn.func_kwdefaults[{}]", js::string(param.name.as_str()))
        } else {
            missing(function, param)
        };
        statements.push(format!("{} = {} : {fallback};", js::ident(param.name.as_str()), keyword_source(param.name.as_str())));
    }
    if let Some(var_kwargs) = &signature.var_kwargs {
        let target = js::ident(var_kwargs.as_str());
        statements.push(format!(
            "{target} = {{}};\nfor (var $n in $k) {{\nif (Object.prototype.hasOwnProperty.call($k, $n)) {{\n{target}[$n] = $k[$n];\n}}\n}}"
        ));
    }
    statements
}

fn keyword_source(name: &str) -> String {
    let key = js::string(name);
    format!("Object.prototype.hasOwnProperty.call($k, {key}) ? $k[{key}]")
}

/// Raises the missing-argument `TypeError` when evaluated.
fn missing(function: &str, param: &Param) -> String {
    let message = js::string(&format!("{function}() missing required argument: '{}'", param.name));
    format!("(function () {{\nthrow new TypeError({message});\n}})()")
}
