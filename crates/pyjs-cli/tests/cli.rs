use std::{fs, path::Path, process::Command};

fn pyjs(args: &[&str], dir: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_pyjs"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run pyjs")
}

#[test]
fn compiles_a_file_with_imports_from_its_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("app.py"), "from util import double\nx = double(2)\n").expect("write app");
    fs::write(dir.path().join("util.js"), "function double(x) { return 2 * x; }\n").expect("write util");

    let output = pyjs(&["app.py"], dir.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.starts_with("/* module __main__ */\n"), "{stdout}");
    assert!(stdout.contains("function double(x)"), "{stdout}");
}

#[test]
fn include_directories_are_searched_after_the_file_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("lib")).expect("mkdir");
    fs::write(dir.path().join("app.py"), "import shapes\n").expect("write app");
    fs::write(dir.path().join("lib").join("shapes.py"), "unit = 1\n").expect("write lib");

    let missing = pyjs(&["app.py"], dir.path());
    assert!(!missing.status.success());

    let found = pyjs(&["app.py", "-I", "lib"], dir.path());
    assert!(found.status.success(), "{}", String::from_utf8_lossy(&found.stderr));
    let stdout = String::from_utf8(found.stdout).expect("utf-8 output");
    assert!(stdout.contains("/* module shapes */"), "{stdout}");
}

#[test]
fn compile_errors_exit_with_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("bad.py"), "x = 1\ntry:\n    pass\nexcept:\n    pass\n").expect("write");

    let output = pyjs(&["bad.py"], dir.path());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert_eq!(stderr.trim_end(), "bad.py:2:1: unsupported construct: `try` statements (never supported)");

    let output = pyjs(&["bad.py", "--error-format", "json"], dir.path());
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).expect("json error");
    assert_eq!(json["kind"], "unsupported_construct");
    assert_eq!(json["location"]["line"], 2);
}

#[test]
fn unreadable_input_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = pyjs(&["absent.py"], dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.starts_with("error: reading absent.py"), "{stderr}");
}
