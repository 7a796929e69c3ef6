use pretty_assertions::assert_eq;
use pyjs::{CallConvention, CompileOptions, Compiler, MemoryResolver, compile_str};

#[test]
fn empty_module_defines_an_empty_namespace() {
    let module = compile_str("", "empty").expect("empty module should compile");
    assert_eq!(module.code, "/* module empty */\nvar empty;\n(function ($ns) {\n})(empty = {});");
    assert!(module.exports.is_empty());
}

#[test]
fn top_level_names_are_hoisted_and_exported() {
    let module = compile_str("x = 1\n", "m").expect("module should compile");
    assert_eq!(
        module.code,
        "/* module m */\nvar m;\n(function ($ns) {\nvar x;\nx = 1;\n$ns.x = x;\n})(m = {});"
    );
}

#[test]
fn exports_keep_first_binding_order() {
    let module = compile_str("b = 1\na = 2\nb = 3\ndef f():\n    inner = 1\n", "m").expect("module should compile");
    assert_eq!(module.exports, ["b", "a", "f"]);
}

#[test]
fn reserved_words_are_renamed_but_exported_under_their_python_name() {
    let module = compile_str("new = 1\n", "m").expect("module should compile");
    assert!(module.code.contains("var new$;"), "{}", module.code);
    assert!(module.code.contains("$ns.new = new$;"), "{}", module.code);
}

#[test]
fn dotted_module_names_use_a_single_variable() {
    let module = compile_str("", "pkg.mod").expect("module should compile");
    assert!(module.code.starts_with("/* module pkg.mod */\nvar pkg$mod;\n"), "{}", module.code);
}

#[test]
fn function_definition_shape() {
    let module = compile_str("def f(a):\n    return a\n", "m").expect("module should compile");
    let expected = [
        "/* module m */",
        "var m;",
        "(function ($ns) {",
        "var f;",
        "f = (function () {",
        "var $fn = function () {",
        "var $c = arguments.length === 1 && arguments[0] != null && arguments[0].$pyjs_call === true ? arguments[0] : {$pyjs_call: true, args: Array.prototype.slice.call(arguments), kwargs: {}};",
        "var $a = $c.args, $k = $c.kwargs, $d = $fn.func_defaults;",
        "var a;",
        "a = $a.length > 0 ? $a[0] : Object.prototype.hasOwnProperty.call($k, \"a\") ? $k[\"a\"] : (function () {",
        "throw new TypeError(\"f() missing required argument: 'a'\");",
        "})();",
        "return a;",
        "};",
        "$fn.__name__ = \"f\";",
        "$fn.func_defaults = [];",
        "return $fn;",
        "})();",
        "$ns.f = f;",
        "})(m = {});",
    ]
    .join("\n");
    assert_eq!(module.code, expected);
}

#[test]
fn operators_map_to_target_forms() {
    let module = compile_str("x = a ** b // c\ny = not a\nz = a if b else c\n", "m").expect("module should compile");
    assert!(module.code.contains("x = Math.floor(Math.pow(a, b) / c);"), "{}", module.code);
    assert!(module.code.contains("y = !(a);"), "{}", module.code);
    assert!(module.code.contains("z = (b ? a : c);"), "{}", module.code);
}

#[test]
fn equality_and_identity_are_strict() {
    let module = compile_str("x = a == b\ny = a is not None\n", "m").expect("module should compile");
    assert!(module.code.contains("x = (a === b);"), "{}", module.code);
    assert!(module.code.contains("y = (a !== null);"), "{}", module.code);
}

#[test]
fn side_channel_calls_attach_and_detach_keywords() {
    let compiler = Compiler::new(
        MemoryResolver::new(),
        CompileOptions::default().with_call_convention(CallConvention::SideChannel),
    );
    let module = compiler
        .compile_source("f(1, k=2)\n", "m", "m.py")
        .expect("module should compile");
    for line in ["$f.kwargs = $k;", "var $r = $f.apply($s, $a);", "delete $f.kwargs;", "delete $f.defaults;"] {
        assert!(module.code.contains(line), "missing `{line}` in:\n{}", module.code);
    }
    assert!(module.code.contains("})(f, null, [1], {\"k\": 2});"), "{}", module.code);
}

#[test]
fn bundle_calls_pass_one_argument_object() {
    let module = compile_str("f(1, k=2)\n", "m").expect("module should compile");
    assert!(module.code.contains("{$pyjs_call: true, args: $a, kwargs: $k}"), "{}", module.code);
    assert!(!module.code.contains("$f.kwargs"), "{}", module.code);
}

#[test]
fn global_declarations_leave_names_to_the_module_scope() {
    let module = compile_str("n = 0\ndef bump():\n    global n\n    n += 1\n", "m").expect("module should compile");
    assert!(module.code.contains("/* global n */"), "{}", module.code);
    assert!(module.code.contains("var n, bump;"), "{}", module.code);
    assert!(!module.code.contains("var n;"), "{}", module.code);
}

#[test]
fn builtins_prelude_is_imported_first() {
    let resolver = MemoryResolver::new().with_target("__builtin__", "function len(x) { return x.length; }");
    let compiler = Compiler::new(resolver, CompileOptions::default().with_builtins("__builtin__"));
    let module = compiler
        .compile_source("n = len([1])\n", "__main__", "main.py")
        .expect("module should compile");
    let prelude = module.code.find("function len(x)").expect("builtins are inlined");
    let body = module.code.find("n = ").expect("body is emitted");
    assert!(prelude < body, "{}", module.code);
}

#[test]
fn classes_without_a_real_base_are_not_linked() {
    for code in ["class C:\n    pass\n", "class C(object):\n    pass\n"] {
        let module = compile_str(code, "m").expect("module should compile");
        assert!(!module.code.contains("$base"), "{}", module.code);
        assert!(!module.code.contains("Object.setPrototypeOf"), "{}", module.code);
        assert!(!module.code.contains("Object.create($base.prototype)"), "{}", module.code);
    }
    let module = compile_str("class C(B):\n    pass\n", "m").expect("module should compile");
    assert!(module.code.contains("$cls.prototype = Object.create($base.prototype);"), "{}", module.code);
}

#[test]
fn runtime_globals_cannot_be_rebound() {
    let module = compile_str("Math = 1\ny = 2 ** 3\n", "m").expect("module should compile");
    assert!(module.code.contains("var Math$, y;"), "{}", module.code);
    assert!(module.code.contains("y = Math.pow(2, 3);"), "{}", module.code);
    assert!(module.code.contains("$ns.Math = Math$;"), "{}", module.code);
}

#[test]
fn power_update_evaluates_the_subscript_once() {
    let module = compile_str("a[f()] **= 2\n", "m").expect("module should compile");
    assert!(
        module
            .code
            .contains("(function ($o, $i) {\n$o[$i] = Math.pow($o[$i], 2);\n})(a, (function ($f, $s, $a, $k) {"),
        "{}",
        module.code
    );
}
