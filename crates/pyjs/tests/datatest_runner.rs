//! Runs every `test_cases/*.py` fixture.
//!
//! A fixture whose first line is `# error: <text>` must fail to compile with a
//! message containing `<text>`. Any other fixture must compile; when node is
//! installed its output is run and stdout compared with the fixture's
//! `# expect: <line>` comments, in order.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};

use pyjs::{CompileOptions, Compiler, FsResolver};

const ERROR_PREFIX: &str = "# error: ";
const EXPECT_PREFIX: &str = "# expect: ";

fn run_case(path: &Path) -> datatest_stable::Result<()> {
    let code = fs::read_to_string(path)?;
    let root = path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let compiler = Compiler::new(FsResolver::new([root]), CompileOptions::default());
    let result = compiler.compile_source(&code, "__main__", &path.display().to_string());

    if let Some(expected) = code.lines().next().and_then(|line| line.strip_prefix(ERROR_PREFIX)) {
        return match result {
            Ok(_) => Err(format!("expected a compile error containing `{expected}`").into()),
            Err(err) if err.to_string().contains(expected.trim()) => Ok(()),
            Err(err) => Err(format!("expected an error containing `{expected}`, got `{err}`").into()),
        };
    }

    let module = result.map_err(|err| format!("compilation failed: {err}"))?;
    let expected: String = code
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix(EXPECT_PREFIX))
        .map(|line| format!("{line}\n"))
        .collect();
    let Some(actual) = run_node(&module.code)? else {
        return Ok(());
    };
    if actual == expected {
        Ok(())
    } else {
        Err(format!("stdout mismatch\n--- expected ---\n{expected}--- actual ---\n{actual}").into())
    }
}

/// Stdout of `program` under node, or `None` when node is not installed.
fn run_node(program: &str) -> datatest_stable::Result<Option<String>> {
    if Command::new("node").arg("--version").output().is_err() {
        return Ok(None);
    }
    let mut file = tempfile::Builder::new().suffix(".js").tempfile()?;
    file.write_all(program.as_bytes())?;
    let output = Command::new("node").arg(file.path()).output()?;
    if !output.status.success() {
        return Err(format!(
            "node failed:\n{}\n--- program ---\n{program}",
            String::from_utf8_lossy(&output.stderr)
        )
        .into());
    }
    Ok(Some(String::from_utf8(output.stdout)?))
}

datatest_stable::harness!(run_case, "test_cases", r"^.*\.py$");
