mod common;

use std::{cell::Cell, io, rc::Rc};

use common::{compile, run_node};
use pyjs::{CompileOptions, Compiler, MemoryResolver, ModuleResolver, ModuleSource};

const SHAPES: &str = "def area(w, h=1):\n    return w * h\nunit = 1\n";

#[test]
fn from_import_binds_names_from_the_compiled_namespace() {
    let resolver = MemoryResolver::new().with_source("shapes", SHAPES);
    let code = compile(resolver, CompileOptions::default(), "from shapes import area, unit as u\nprint(area(2, 3), u)\n");
    assert!(code.contains("/* module shapes */"), "{code}");
    assert!(code.contains("area = shapes.area;"), "{code}");
    assert!(code.contains("u = shapes.unit;"), "{code}");
    if let Some(out) = run_node(&code) {
        assert_eq!(out, "6 1\n");
    }
}

#[test]
fn wildcard_import_binds_every_export() {
    let resolver = MemoryResolver::new().with_source("shapes", SHAPES);
    let code = compile(resolver, CompileOptions::default(), "from shapes import *\nprint(area(4), unit)\n");
    if let Some(out) = run_node(&code) {
        assert_eq!(out, "4 1\n");
    }
}

#[test]
fn plain_and_aliased_imports_bind_the_namespace() {
    let resolver = MemoryResolver::new().with_source("shapes", SHAPES);
    let code = compile(
        resolver,
        CompileOptions::default(),
        "import shapes\nimport shapes as s\nprint(shapes.area(2, h=5), s.unit)\n",
    );
    assert!(code.contains("s = shapes;"), "{code}");
    if let Some(out) = run_node(&code) {
        assert_eq!(out, "10 1\n");
    }
}

#[test]
fn target_modules_are_included_verbatim() {
    let native = "function twice(x) { return 2 * x; }";
    let resolver = MemoryResolver::new().with_target("native", native);
    let code = compile(
        resolver,
        CompileOptions::default(),
        "from native import twice\nfrom native import twice as double\nprint(twice(4), double(5))\n",
    );
    assert!(code.contains(native), "{code}");
    assert!(code.contains("double = twice;"), "{code}");
    assert!(!code.contains("twice = twice;"), "{code}");
    if let Some(out) = run_node(&code) {
        assert_eq!(out, "8 10\n");
    }
}

#[test]
fn imported_modules_can_import_each_other() {
    let resolver = MemoryResolver::new()
        .with_source("base", "scale = 3\n")
        .with_source("derived", "from base import scale\ndef grow(x):\n    return x * scale\n");
    let code = compile(resolver, CompileOptions::default(), "from derived import grow\nprint(grow(2))\n");
    if let Some(out) = run_node(&code) {
        assert_eq!(out, "6\n");
    }
}

/// Counts lookups to observe caching.
struct Counting {
    inner: MemoryResolver,
    lookups: Rc<Cell<usize>>,
}

impl ModuleResolver for Counting {
    fn resolve(&self, module: &str, options: &CompileOptions) -> io::Result<Option<ModuleSource>> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.resolve(module, options)
    }
}

#[test]
fn modules_are_resolved_once_per_compiler() {
    let lookups = Rc::new(Cell::new(0));
    let resolver = Counting {
        inner: MemoryResolver::new().with_source("shapes", SHAPES),
        lookups: Rc::clone(&lookups),
    };
    let compiler = Compiler::new(resolver, CompileOptions::default());
    let module = compiler
        .compile_source(
            "from shapes import *\nfrom shapes import area\ndef f():\n    import shapes\n",
            "__main__",
            "main.py",
        )
        .expect("module should compile");
    assert_eq!(lookups.get(), 1);
    // Every import site still inlines the module text.
    assert_eq!(module.code.matches("/* module shapes */").count(), 3);
}

#[test]
fn modules_may_bind_their_own_name() {
    let resolver = MemoryResolver::new().with_source("point", "def point(x):\n    return [x, x]\norigin = 0\n");
    let code = compile(
        resolver,
        CompileOptions::default(),
        "from point import point, origin\nprint(point(2).length, origin)\n",
    );
    assert!(code.contains("$ns.point = point;"), "{code}");
    if let Some(out) = run_node(&code) {
        assert_eq!(out, "2 0\n");
    }
}
