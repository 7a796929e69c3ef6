//! Class definitions.
//!
//! A class becomes a constructor function `$cls` built inside its own scope.
//! Every call of `$cls` constructs: it allocates an instance from
//! `$cls.prototype` with `Object.create`, tags it with `__class__` and runs
//! `__init__` with the caller's arguments. The receiver the call arrives with
//! is ignored and `new` is never used, so `C(x)`, `obj.__class__(x)` and
//! `C.call(anything, x)` all behave the same. Names bound in the class body
//! are defined on both the constructor and its prototype.

use super::{Context, Scope, Translator};
use crate::{
    block,
    error::TranslateError,
    expressions::ClassDef,
    js,
    options::CallConvention,
    prepare,
};

/// Hands the caller's bundle to `__init__` unchanged.
const BUNDLE_CONSTRUCT: &str = "var $c = arguments.length === 1 && arguments[0] != null && arguments[0].$pyjs_call === true ? arguments[0] : {$pyjs_call: true, args: Array.prototype.slice.call(arguments), kwargs: {}};
var $t = Object.create($cls.prototype);
$t.__class__ = $cls;
if ($t.__init__ !== undefined) {
$t.__init__.call($t, $c);
}
return $t;";

/// Moves the keyword arguments attached to the class over to `__init__`.
const SIDE_CHANNEL_CONSTRUCT: &str = "var $t = Object.create($cls.prototype);
$t.__class__ = $cls;
if ($t.__init__ !== undefined) {
var $init = $t.__init__;
$init.kwargs = $cls.kwargs || {};
$init.defaults = ($init.func_defaults || []).concat([]);
$init.apply($t, Array.prototype.slice.call(arguments));
delete $init.kwargs;
delete $init.defaults;
}
return $t;";

/// Links `$cls` to `$base` for instance and class attribute lookup.
const INHERIT: &str = "$cls.prototype = Object.create($base.prototype);
$cls.prototype.constructor = $cls;
Object.setPrototypeOf($cls, $base);";

impl Translator<'_> {
    pub(super) fn class_def(&mut self, def: &ClassDef) -> Result<String, TranslateError> {
        if def.has_keywords {
            return Err(TranslateError::not_yet("class keywords", def.position));
        }
        let bases: Vec<_> = def
            .bases
            .iter()
            .filter(|base| !base.as_name().is_some_and(|name| name.as_str() == "object"))
            .collect();
        let base = match bases.as_slice() {
            [] => None,
            [base] => Some(self.expr(base)?),
            _ => return Err(TranslateError::never("multiple inheritance", def.position)),
        };

        let locals = prepare::collect(&def.body, self.compiler)?;
        let body = self.child(Context::of(Scope::Class)).statements(&def.body)?;
        let construct = match self.options().call_convention {
            CallConvention::Bundle => BUNDLE_CONSTRUCT,
            CallConvention::SideChannel => SIDE_CHANNEL_CONSTRUCT,
        };
        let mut segments = vec![
            format!("var $cls = function () {{\n{construct}\n}};"),
            format!("$cls.__name__ = {};", js::string(def.name.as_str())),
            "$cls.func_defaults = [];".to_owned(),
        ];
        let mut bindings = Vec::new();
        if let Some(base) = base {
            bindings.push(("$base", base));
            segments.push(INHERIT.to_owned());
        }
        segments.push(body);
        segments.extend(locals.iter().map(|name| {
            let local = js::ident(name.as_str());
            // Functions have read-only `name` and `length`; plain assignment to them is ignored.
            format!(
                "Object.defineProperty($cls, {}, {{value: {local}, writable: true, enumerable: true, configurable: true}});\n$cls.prototype.{name} = {local};",
                js::string(name.as_str())
            )
        }));
        segments.push("return $cls;".to_owned());

        let name = js::ident(def.name.as_str());
        let value = block::wrap_call(&bindings, locals.iter(), segments);
        let mut statements = vec![format!("{name} = {value};")];
        statements.extend(self.decorate(&name, &def.decorators)?);
        Ok(block::lines(statements))
    }
}
