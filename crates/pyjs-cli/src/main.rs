use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pyjs::{CallConvention, CompileError, CompileOptions, Compiler, FsResolver};
use tracing::debug;

mod tracing_config;

/// Compile a Python module to a self-contained JavaScript program.
#[derive(Debug, Parser)]
#[command(name = "pyjs", version, about)]
struct Args {
    /// Python source file to compile as `__main__`.
    file: PathBuf,

    /// Import everything from the builtins module before the program runs.
    #[arg(long)]
    include_builtins: bool,

    /// Module imported by `--include-builtins`.
    #[arg(long, value_name = "NAME", default_value = "__builtin__")]
    builtins_module: String,

    /// How keyword arguments and defaults are passed between functions.
    #[arg(long, value_enum, default_value_t = ConventionArg::Bundle)]
    call_convention: ConventionArg,

    /// Additional directory to search for imported modules.
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    include: Vec<PathBuf>,

    /// Format of compile errors written to stderr.
    #[arg(long, value_enum, default_value_t = ErrorFormat::Text)]
    error_format: ErrorFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConventionArg {
    Bundle,
    SideChannel,
}

impl From<ConventionArg> for CallConvention {
    fn from(arg: ConventionArg) -> Self {
        match arg {
            ConventionArg::Bundle => Self::Bundle,
            ConventionArg::SideChannel => Self::SideChannel,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ErrorFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_config::init_tracing();
    let args = Args::parse();
    match run(&args) {
        Ok(Ok(code)) => match write_output(&code) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
        Ok(Err(err)) => {
            report(&err, args.error_format);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Compiles the input file. The outer error is for I/O, the inner for the program.
fn run(args: &Args) -> anyhow::Result<Result<String, CompileError>> {
    let code = fs::read_to_string(&args.file).with_context(|| format!("reading {}", args.file.display()))?;
    let roots = search_roots(&args.file, &args.include);
    debug!(?roots, "module search roots");

    let mut options = CompileOptions::default().with_call_convention(args.call_convention.into());
    if args.include_builtins {
        options = options.with_builtins(args.builtins_module.clone());
    }
    let compiler = Compiler::new(FsResolver::new(roots), options);
    let filename = args.file.display().to_string();
    Ok(compiler
        .compile_source(&code, "__main__", &filename)
        .map(|module| module.code))
}

/// The input file's directory, then each `-I` directory.
fn search_roots(file: &Path, include: &[PathBuf]) -> Vec<PathBuf> {
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::iter::once(dir).chain(include.iter().cloned()).collect()
}

fn write_output(code: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{code}").context("writing output")?;
    stdout.flush().context("writing output")
}

fn report(err: &CompileError, format: ErrorFormat) {
    match format {
        ErrorFormat::Text => eprintln!("{err}"),
        ErrorFormat::Json => match serde_json::to_string(err) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{err}"),
        },
    }
}
