//! Behaviour of compiled programs, checked by running them under node.
//!
//! Each program runs under both call conventions unless the test is about
//! where they differ. Tests pass trivially when node is not installed.

mod common;

use common::{compile, run_node};
use pretty_assertions::assert_eq;
use pyjs::{CallConvention, CompileOptions, MemoryResolver};

const CONVENTIONS: [CallConvention; 2] = [CallConvention::Bundle, CallConvention::SideChannel];

/// Asserts that `code` prints `expected` under every call convention.
fn assert_prints(code: &str, expected: &str) {
    for convention in CONVENTIONS {
        let program = compile(
            MemoryResolver::new(),
            CompileOptions::default().with_call_convention(convention),
            code,
        );
        if let Some(out) = run_node(&program) {
            assert_eq!(out, expected, "under {convention}");
        }
    }
}

#[test]
fn parameters_bind_from_positions_keywords_and_defaults() {
    let code = "\
def describe(a, b=10, *rest, scale=1, **extra):
    print(a, b, rest.length, scale, extra['tag'])
describe(1, 2, 3, 4, scale=5, tag='x')
describe(1, tag='y')
describe(b=7, a=6, tag='z')
";
    assert_prints(code, "1 2 2 5 x\n1 10 0 1 y\n6 7 0 1 z\n");
}

#[test]
fn positional_only_and_keyword_only_parameters() {
    let code = "\
def p(a, /, b, *, c, d=4):
    print(a, b, c, d)
p(1, 2, c=3)
p(1, b=2, c=3, d=5)
";
    assert_prints(code, "1 2 3 4\n1 2 3 5\n");
}

#[test]
fn defaults_are_evaluated_once_at_definition() {
    let code = "\
n = 1
def f(x=n):
    return x
n = 2
print(f(), f(3))
";
    assert_prints(code, "1 3\n");
}

#[test]
fn call_site_spreads_merge_into_the_arguments() {
    let code = "\
def f(a, b, c=0, d=0):
    print(a, b, c, d)
args = [1, 2]
opts = {'d': 4}
f(*args, **opts)
f(0, *args[1:], c=3, **opts)
";
    assert_prints(code, "1 2 0 4\n0 2 3 4\n");
}

#[test]
fn keyword_mappings_are_copied_per_call() {
    let code = "\
def f(**kw):
    kw['seen'] = 1
    return kw
opts = {'a': 1}
out = f(**opts)
print(out['a'], out['seen'], 'seen' in opts)
";
    assert_prints(code, "1 1 false\n");
}

#[test]
fn classes_construct_and_inherit() {
    let code = "\
class Base:
    kind = 'base'
    def __init__(self, name):
        self.name = name
    def hello(self, greeting='hi'):
        return greeting + ' ' + self.name
class Child(Base):
    def shout(self):
        return self.hello(greeting='HEY')
c = Child('bob')
print(c.hello(), c.shout(), c.kind, Child.kind)
print(c.__class__ is Child, Base.hello(c, 'yo'))
";
    assert_prints(code, "hi bob HEY bob base base\ntrue yo bob\n");
}

#[test]
fn initializers_accept_keyword_arguments() {
    let code = "\
class Point:
    def __init__(self, x=0, y=0):
        self.x = x
        self.y = y
p = Point(y=5)
print(p.x, p.y)
";
    assert_prints(code, "0 5\n");
}

#[test]
fn static_methods_take_no_receiver() {
    let code = "\
class Maths:
    @staticmethod
    def double(x):
        return x * 2
m = Maths()
print(Maths.double(2), m.double(3))
";
    assert_prints(code, "4 6\n");
}

#[test]
fn decorators_apply_innermost_first() {
    let code = "\
def add(n):
    def decorate(fn):
        def run(x):
            return fn(x) + n
        return run
    return decorate
def twice(fn):
    def run(x):
        return fn(fn(x))
    return run
@add(100)
@twice
def inc(x):
    return x + 1
print(inc(1))
";
    assert_prints(code, "103\n");
}

#[test]
fn chained_comparisons_short_circuit() {
    let code = "\
def noisy(x):
    print('eval', x)
    return x
print(1 < noisy(0) < noisy(5))
print(0 < noisy(1) <= noisy(1) < 2)
";
    assert_prints(code, "eval 0\nfalse\neval 1\neval 1\ntrue\n");
}

#[test]
fn unpacking_assigns_by_position() {
    let code = "\
a, (b, *c), d = [1, [2, 3, 4], 5]
print(a, b, c.length, c[1], d)
x = y = [7]
print(x is y)
first, *middle, last = [1, 2, 3, 4]
print(first, middle.length, last)
";
    assert_prints(code, "1 2 2 4 5\ntrue\n1 2 4\n");
}

#[test]
fn loops_iterate_with_break_and_continue() {
    let code = "\
total = 0
for row in [[1, 2], [3, 4]]:
    for cell in row:
        if cell == 3:
            continue
        total += cell
print(total)
i = 0
while True:
    i += 1
    if i > 4:
        break
print(i)
for k, v in [['a', 1], ['b', 2]]:
    print(k, v)
";
    assert_prints(code, "7\n5\na 1\nb 2\n");
}

#[test]
fn protocol_methods_drive_iteration_and_membership() {
    let code = "\
class Evens:
    def __len__(self):
        return 3
    def __getitem__(self, i):
        return i * 2
    def __contains__(self, x):
        return x % 2 == 0
seen = []
for x in Evens():
    seen.push(x)
print(seen.join(','), 4 in Evens(), 3 not in Evens())
";
    assert_prints(code, "0,2,4 true true\n");
}

#[test]
fn membership_and_slices() {
    let code = "\
print(2 in [1, 2], 'a' in {'a': 1}, 5 not in [1], 'ell' in 'hello')
print([1, 2, 3, 4][1:3].length, 'hello'[1:], 'hello'[:2])
";
    assert_prints(code, "true true true true\n2 ello he\n");
}

#[test]
fn expressions_and_literals() {
    let code = "\
name = 'w'
print(f'hi {name}!', 7 // 2, 2 ** 10, -7 % 3 == -1, not None)
print(1 if 0 else 2, 0 or 'fallback', 3 and 4)
base = {'a': 1}
d = {**base, 'b': 2}
key = 'c'
e = {key: 3}
print(d['a'], d['b'], e['c'])
add = lambda a, b=1: a + b
print(add(1), add(1, b=5))
";
    assert_prints(code, "hi w! 3 1024 true true\n2 fallback 4\n1 2 3\n2 6\n");
}

#[test]
fn global_and_closure_scopes() {
    let code = "\
count = 0
def bump():
    global count
    count += 1
bump()
bump()
def counter():
    n = 0
    def step():
        nonlocal n
        n += 1
        return n
    return step
s = counter()
s()
print(count, s())
";
    assert_prints(code, "2 2\n");
}

#[test]
fn missing_arguments_raise_type_error() {
    let code = "\
def need(a):
    return a
";
    let program = compile(MemoryResolver::new(), CompileOptions::default(), code);
    let program = format!(
        "{program}\ntry {{ __main__.need(); }} catch (e) {{ console.log(e instanceof TypeError, e.message); }}"
    );
    if let Some(out) = run_node(&program) {
        assert_eq!(out, "true need() missing required argument: 'a'\n");
    }
}

/// A callee re-entered natively during a keyword call sees different keywords
/// under the two conventions.
#[test]
fn native_reentry_observes_pending_keywords_only_with_side_channel() {
    let code = "\
from native import call
def f(n, tag='plain'):
    if n == 0:
        return tag
    return call(f, 0)
print(f(1, tag='outer'))
";
    let native = "function call(f, x) { return f(x); }";
    for (convention, expected) in [(CallConvention::Bundle, "plain\n"), (CallConvention::SideChannel, "outer\n")] {
        let program = compile(
            MemoryResolver::new().with_target("native", native),
            CompileOptions::default().with_call_convention(convention),
            code,
        );
        if let Some(out) = run_node(&program) {
            assert_eq!(out, expected, "under {convention}");
        }
    }
}

#[test]
fn classes_construct_when_called_through_an_instance() {
    let code = "\
class Vec:
    def __init__(self, x):
        self.x = x
    def scaled(self, k):
        return self.__class__(self.x * k)
v = Vec(2)
w = v.scaled(3)
print(w.x, w.__class__ is Vec, v.x)
";
    assert_prints(code, "6 true 2\n");
}

#[test]
fn class_attributes_may_use_function_property_names() {
    let code = "\
class Dog:
    name = 'rex'
    length = 4
print(Dog.name, Dog.length, Dog().name)
";
    assert_prints(code, "rex 4 rex\n");
}

#[test]
fn python_bindings_do_not_shadow_runtime_globals() {
    let code = "\
class Math:
    pass
String = 'shadow'
print(2 ** 3, 7 // 2, f'{String}!')
";
    assert_prints(code, "8 3 shadow!\n");
}

#[test]
fn power_and_floor_updates_evaluate_the_target_once() {
    let code = "\
calls = []
def key():
    calls.push(1)
    return 'n'
d = {'n': 3}
d[key()] **= 2
d[key()] //= 2
print(d['n'], calls.length)
";
    assert_prints(code, "4 2\n");
}
