//! Tracing setup for the command-line binary.
//!
//! The subscriber is only installed when `PYJS_LOG` (or `RUST_LOG`) is set:
//!
//! ```bash
//! PYJS_LOG=debug pyjs app.py
//! PYJS_LOG="pyjs::compile=trace" pyjs app.py
//! ```

use tracing_subscriber::EnvFilter;

/// `PYJS_LOG` takes precedence over `RUST_LOG`; both use the same directive syntax.
fn build_filter() -> EnvFilter {
    match std::env::var("PYJS_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Installs a stderr `fmt` subscriber, keeping stdout for the compiled program.
pub fn init_tracing() {
    if std::env::var_os("PYJS_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
