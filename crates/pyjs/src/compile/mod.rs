//! The translation engine.
//!
//! A [`Compiler`] owns the module resolver and the cache of compiled imports.
//! Each module body is emitted by a [`Translator`], which implements
//! [`Dispatch`] and hands every construct to one handler in the sibling
//! modules. Nested function and class bodies get a child translator with their
//! own [`Context`].

mod call;
mod class;
mod expr;
mod function;
mod import;
mod stmt;

use std::{cell::RefCell, rc::Rc};

use ahash::AHashMap;
use ruff_python_ast::name::Name;
use tracing::{debug, info_span};

use crate::{
    args::CallArgs,
    block,
    dispatch::{Dispatch, NodeKind, dispatch_expr, dispatch_stmt},
    error::{CompileError, TranslateError},
    expressions::{
        BoolOperator, ClassDef, CmpOperator, DictItem, ExprLoc, FStringPart, FunctionDef, Identifier, ImportAlias,
        Lambda, Literal, Node, Operator, SliceBounds, UnaryOperator,
    },
    js,
    options::CompileOptions,
    parse::{CodeRange, parse},
    prepare::{self, ExportSource},
    resolve::{ModuleResolver, ModuleSource},
};

/// Parameter holding the module's namespace object inside its scope.
const NAMESPACE: &str = "$ns";

/// The output of compiling one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledModule {
    pub name: String,
    /// Self-contained target text that defines the module's namespace variable.
    pub code: String,
    /// Names the module binds at top level, in first-binding order.
    pub exports: Vec<String>,
}

/// An imported module after resolution, cached by name.
#[derive(Debug, Clone)]
enum Imported {
    Target(Rc<str>),
    Compiled(Rc<CompiledModule>),
}

/// Compiles Python modules, resolving their imports through a [`ModuleResolver`].
///
/// Imported modules are compiled once per compiler and reused for every later
/// import of the same name.
pub struct Compiler {
    resolver: Box<dyn ModuleResolver>,
    options: CompileOptions,
    modules: RefCell<AHashMap<String, Imported>>,
    /// Modules whose compilation is in progress, innermost last.
    loading: RefCell<Vec<String>>,
}

impl Compiler {
    pub fn new(resolver: impl ModuleResolver + 'static, options: CompileOptions) -> Self {
        Self {
            resolver: Box::new(resolver),
            options,
            modules: RefCell::new(AHashMap::new()),
            loading: RefCell::new(Vec::new()),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles `code` as the module `module_name`.
    ///
    /// `filename` is used in error locations only. When builtins are enabled,
    /// the module starts with a wildcard import of the builtins module.
    pub fn compile_source(&self, code: &str, module_name: &str, filename: &str) -> Result<CompiledModule, CompileError> {
        let prelude = self.options.include_builtins.then(|| Node::ImportFrom {
            module: Name::new(&self.options.builtins_module),
            aliases: vec![ImportAlias {
                name: Name::new("*"),
                asname: None,
                position: CodeRange::default(),
            }],
            position: CodeRange::default(),
        });
        self.compile_unit(code, module_name, filename, prelude)
    }

    fn compile_unit(
        &self,
        code: &str,
        module_name: &str,
        filename: &str,
        prelude: Option<Node>,
    ) -> Result<CompiledModule, CompileError> {
        let _span = info_span!("compile", module = module_name).entered();
        debug!(filename, "compiling module");
        let mut nodes = parse(code).map_err(|e| e.into_compile_error(filename))?;
        if let Some(prelude) = prelude {
            nodes.insert(0, prelude);
        }
        self.loading.borrow_mut().push(module_name.to_owned());
        let result = self.translate_module(&nodes, module_name);
        self.loading.borrow_mut().pop();
        result.map_err(|e| e.into_compile_error(filename))
    }

    /// Emits the namespace declaration and the module body wrapped in a hoisted
    /// scope that receives the fresh namespace object.
    fn translate_module(&self, nodes: &[Node], module_name: &str) -> Result<CompiledModule, TranslateError> {
        let names = prepare::collect(nodes, self)?;
        let var = js::module_var(module_name);
        let body = Translator::new(self, Context::module()).statements(nodes)?;
        let exports: Vec<String> = names.iter().map(ToString::to_string).collect();
        // The namespace is reached through `$ns` inside the scope, since a
        // top-level binding may share the module's name.
        let publish = block::lines(
            exports
                .iter()
                .map(|name| format!("{NAMESPACE}.{name} = {};", js::ident(name))),
        );
        let scope = block::wrap_call(&[(NAMESPACE, format!("{var} = {{}}"))], names.iter(), [body, publish]);
        debug!(exports = exports.len(), "module compiled");
        Ok(CompiledModule {
            name: module_name.to_owned(),
            code: format!("/* module {module_name} */\nvar {var};\n{scope};"),
            exports,
        })
    }

    /// Resolves and, for source modules, compiles an imported module.
    fn import(&self, module: &str, position: CodeRange) -> Result<Imported, TranslateError> {
        let cached = self.modules.borrow().get(module).cloned();
        if let Some(imported) = cached {
            return Ok(imported);
        }
        if self.loading.borrow().iter().any(|loading| loading == module) {
            return Err(TranslateError::import(module, "circular import", position));
        }
        let source = self
            .resolver
            .resolve(module, &self.options)
            .map_err(|e| TranslateError::import(module, e.to_string(), position))?
            .ok_or_else(|| TranslateError::import(module, "module not found", position))?;
        let imported = match source {
            ModuleSource::Target { code } => {
                debug!(module, "including target module");
                Imported::Target(code.into())
            }
            ModuleSource::Source { code, filename } => {
                let compiled = self
                    .compile_unit(&code, module, &filename, None)
                    .map_err(|e| TranslateError::Module(Box::new(e)))?;
                Imported::Compiled(Rc::new(compiled))
            }
        };
        self.modules
            .borrow_mut()
            .insert(module.to_owned(), imported.clone());
        Ok(imported)
    }
}

impl ExportSource for Compiler {
    fn exports(&self, module: &str, position: CodeRange) -> Result<Vec<Name>, TranslateError> {
        Ok(match self.import(module, position)? {
            Imported::Target(_) => Vec::new(),
            Imported::Compiled(compiled) => compiled.exports.iter().map(Name::new).collect(),
        })
    }
}

/// Compiles a single module with no importable modules available.
pub fn compile_str(code: &str, module_name: &str) -> Result<CompiledModule, CompileError> {
    let compiler = Compiler::new(crate::resolve::MemoryResolver::new(), CompileOptions::default());
    compiler.compile_source(code, module_name, &format!("{module_name}.py"))
}

/// The kind of scope a body is emitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Module,
    Class,
    Function,
    /// A function defined directly in a class body.
    Method,
    /// `__init__` defined directly in a class body.
    Initializer,
}

/// Where the translator currently is.
#[derive(Debug, Clone, Copy)]
struct Context {
    scope: Scope,
    /// Enclosing loops of either kind within the current function.
    loops: u32,
    /// Enclosing `for` loops within the current function; numbers loop temporaries.
    for_depth: u32,
}

impl Context {
    fn module() -> Self {
        Self::of(Scope::Module)
    }

    fn of(scope: Scope) -> Self {
        Self {
            scope,
            loops: 0,
            for_depth: 0,
        }
    }

    fn is_function(self) -> bool {
        matches!(self.scope, Scope::Function | Scope::Method | Scope::Initializer)
    }
}

/// Emits target text for one scope.
struct Translator<'a> {
    compiler: &'a Compiler,
    ctx: Context,
}

impl<'a> Translator<'a> {
    fn new(compiler: &'a Compiler, ctx: Context) -> Self {
        Self { compiler, ctx }
    }

    /// A translator for a nested scope or loop body.
    fn child(&self, ctx: Context) -> Self {
        Self::new(self.compiler, ctx)
    }

    fn options(&self) -> &'a CompileOptions {
        &self.compiler.options
    }

    fn statements(&mut self, nodes: &[Node]) -> Result<String, TranslateError> {
        let statements = nodes
            .iter()
            .map(|node| dispatch_stmt(self, node))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(block::lines(statements))
    }

    fn expr(&mut self, expr: &ExprLoc) -> Result<String, TranslateError> {
        dispatch_expr(self, expr)
    }

    fn exprs(&mut self, exprs: &[ExprLoc]) -> Result<Vec<String>, TranslateError> {
        exprs.iter().map(|e| self.expr(e)).collect()
    }
}

impl Dispatch for Translator<'_> {
    type Output = String;

    fn unhandled(&mut self, kind: NodeKind, position: CodeRange) -> Result<String, TranslateError> {
        Err(TranslateError::unhandled(kind, position))
    }

    fn visit_expr_stmt(&mut self, expr: &ExprLoc) -> Result<String, TranslateError> {
        let text = self.expr(expr)?;
        // A leading brace would start a block.
        if text.starts_with('{') {
            Ok(format!("({text});"))
        } else {
            Ok(format!("{text};"))
        }
    }

    fn visit_assign(&mut self, targets: &[ExprLoc], value: &ExprLoc, position: CodeRange) -> Result<String, TranslateError> {
        self.assign(targets, value, position)
    }

    fn visit_aug_assign(
        &mut self,
        target: &ExprLoc,
        op: Operator,
        value: &ExprLoc,
        position: CodeRange,
    ) -> Result<String, TranslateError> {
        self.aug_assign(target, op, value, position)
    }

    fn visit_if(&mut self, test: &ExprLoc, body: &[Node], or_else: &[Node], _position: CodeRange) -> Result<String, TranslateError> {
        self.if_stmt(test, body, or_else)
    }

    fn visit_while(
        &mut self,
        test: &ExprLoc,
        body: &[Node],
        or_else: &[Node],
        position: CodeRange,
    ) -> Result<String, TranslateError> {
        self.while_loop(test, body, or_else, position)
    }

    fn visit_for(
        &mut self,
        target: &ExprLoc,
        iter: &ExprLoc,
        body: &[Node],
        or_else: &[Node],
        position: CodeRange,
    ) -> Result<String, TranslateError> {
        self.for_loop(target, iter, body, or_else, position)
    }

    fn visit_return(&mut self, value: Option<&ExprLoc>, position: CodeRange) -> Result<String, TranslateError> {
        self.return_stmt(value, position)
    }

    fn visit_pass(&mut self, _position: CodeRange) -> Result<String, TranslateError> {
        Ok("/* pass */".to_owned())
    }

    fn visit_break(&mut self, position: CodeRange) -> Result<String, TranslateError> {
        self.loop_jump("break", position)
    }

    fn visit_continue(&mut self, position: CodeRange) -> Result<String, TranslateError> {
        self.loop_jump("continue", position)
    }

    fn visit_function_def(&mut self, def: &FunctionDef) -> Result<String, TranslateError> {
        self.function_def(def)
    }

    fn visit_class_def(&mut self, def: &ClassDef) -> Result<String, TranslateError> {
        self.class_def(def)
    }

    fn visit_import(&mut self, aliases: &[ImportAlias], _position: CodeRange) -> Result<String, TranslateError> {
        self.import(aliases)
    }

    fn visit_import_from(
        &mut self,
        module: &Name,
        aliases: &[ImportAlias],
        position: CodeRange,
    ) -> Result<String, TranslateError> {
        self.import_from(module, aliases, position)
    }

    fn visit_global(&mut self, names: &[Identifier], _position: CodeRange) -> Result<String, TranslateError> {
        Ok(declaration_comment("global", names))
    }

    fn visit_nonlocal(&mut self, names: &[Identifier], _position: CodeRange) -> Result<String, TranslateError> {
        Ok(declaration_comment("nonlocal", names))
    }

    fn visit_literal(&mut self, literal: &Literal, _position: CodeRange) -> Result<String, TranslateError> {
        Ok(expr::literal(literal))
    }

    fn visit_name(&mut self, ident: &Identifier) -> Result<String, TranslateError> {
        Ok(js::ident(ident.as_str()).into_owned())
    }

    fn visit_list(&mut self, elts: &[ExprLoc], _position: CodeRange) -> Result<String, TranslateError> {
        self.sequence(elts)
    }

    fn visit_tuple(&mut self, elts: &[ExprLoc], _position: CodeRange) -> Result<String, TranslateError> {
        self.sequence(elts)
    }

    fn visit_dict(&mut self, items: &[DictItem], _position: CodeRange) -> Result<String, TranslateError> {
        self.dict(items)
    }

    fn visit_attribute(&mut self, object: &ExprLoc, attr: &Name, _position: CodeRange) -> Result<String, TranslateError> {
        Ok(format!("{}.{attr}", self.expr(object)?))
    }

    fn visit_subscript(&mut self, object: &ExprLoc, index: &ExprLoc, _position: CodeRange) -> Result<String, TranslateError> {
        Ok(format!("{}[{}]", self.expr(object)?, self.expr(index)?))
    }

    fn visit_slice(&mut self, object: &ExprLoc, bounds: &SliceBounds, position: CodeRange) -> Result<String, TranslateError> {
        self.slice(object, bounds, position)
    }

    fn visit_bin_op(
        &mut self,
        left: &ExprLoc,
        op: Operator,
        right: &ExprLoc,
        _position: CodeRange,
    ) -> Result<String, TranslateError> {
        let (left, right) = (self.expr(left)?, self.expr(right)?);
        Ok(expr::binary(&left, op, &right))
    }

    fn visit_unary_op(&mut self, op: UnaryOperator, operand: &ExprLoc, _position: CodeRange) -> Result<String, TranslateError> {
        let operand = self.expr(operand)?;
        Ok(expr::unary(op, &operand))
    }

    fn visit_bool_op(&mut self, op: BoolOperator, values: &[ExprLoc], _position: CodeRange) -> Result<String, TranslateError> {
        let joiner = match op {
            BoolOperator::And => " && ",
            BoolOperator::Or => " || ",
        };
        Ok(format!("({})", self.exprs(values)?.join(joiner)))
    }

    fn visit_compare(
        &mut self,
        left: &ExprLoc,
        comparisons: &[(CmpOperator, ExprLoc)],
        _position: CodeRange,
    ) -> Result<String, TranslateError> {
        self.compare(left, comparisons)
    }

    fn visit_if_else(
        &mut self,
        test: &ExprLoc,
        body: &ExprLoc,
        orelse: &ExprLoc,
        _position: CodeRange,
    ) -> Result<String, TranslateError> {
        Ok(format!("({} ? {} : {})", self.expr(test)?, self.expr(body)?, self.expr(orelse)?))
    }

    fn visit_call(&mut self, callee: &ExprLoc, args: &CallArgs, _position: CodeRange) -> Result<String, TranslateError> {
        self.call(callee, args)
    }

    fn visit_lambda(&mut self, lambda: &Lambda, _position: CodeRange) -> Result<String, TranslateError> {
        self.lambda(lambda)
    }

    fn visit_fstring(&mut self, parts: &[FStringPart], position: CodeRange) -> Result<String, TranslateError> {
        self.fstring(parts, position)
    }
}

fn declaration_comment(keyword: &str, names: &[Identifier]) -> String {
    let names: Vec<&str> = names.iter().map(Identifier::as_str).collect();
    format!("/* {keyword} {} */", names.join(", "))
}
