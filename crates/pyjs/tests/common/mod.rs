//! Helpers shared by integration tests.

use std::{io::Write, process::Command};

use pyjs::{CompileOptions, Compiler, MemoryResolver};

/// Compiles `code` as `__main__` with the given resolver and options.
pub fn compile(resolver: MemoryResolver, options: CompileOptions, code: &str) -> String {
    Compiler::new(resolver, options)
        .compile_source(code, "__main__", "main.py")
        .unwrap_or_else(|err| panic!("compilation failed: {err}"))
        .code
}

/// Runs `program` under node and returns its stdout, or `None` when node is not installed.
pub fn run_node(program: &str) -> Option<String> {
    Command::new("node").arg("--version").output().ok()?;
    let mut file = tempfile::Builder::new()
        .suffix(".js")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(program.as_bytes()).expect("failed to write program");
    let output = Command::new("node")
        .arg(file.path())
        .output()
        .expect("failed to run node");
    assert!(
        output.status.success(),
        "node failed:\n{}\n--- program ---\n{program}",
        String::from_utf8_lossy(&output.stderr)
    );
    Some(String::from_utf8(output.stdout).expect("node output is utf-8"))
}
