//! Module lookup for imports.
//!
//! The compiler never touches the filesystem directly: it asks a
//! [`ModuleResolver`] for the text behind a module name, which keeps import
//! resolution testable with in-memory modules.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use ahash::AHashMap;
use tracing::debug;

use crate::options::CompileOptions;

/// The text behind an imported module name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSource {
    /// Target-language text, included verbatim.
    Target { code: String },
    /// Python source, compiled recursively under the imported module's name.
    Source { code: String, filename: String },
}

/// Maps module names to module text.
pub trait ModuleResolver {
    /// Looks up `module`. `Ok(None)` means no module of either kind exists.
    fn resolve(&self, module: &str, options: &CompileOptions) -> io::Result<Option<ModuleSource>>;
}

/// Resolves modules against directories on disk.
///
/// For each root in order, `a.b` is looked up as `<root>/a/b.<target extension>`,
/// then `<root>/a/b.<source extension>` for each configured source extension.
#[derive(Debug, Clone, Default)]
pub struct FsResolver {
    roots: Vec<PathBuf>,
}

impl FsResolver {
    pub fn new<P: Into<PathBuf>>(roots: impl IntoIterator<Item = P>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ModuleResolver for FsResolver {
    fn resolve(&self, module: &str, options: &CompileOptions) -> io::Result<Option<ModuleSource>> {
        let relative: PathBuf = module.split('.').collect();
        for root in &self.roots {
            let base = root.join(&relative);
            let target = with_extension(&base, &options.target_extension);
            if target.is_file() {
                debug!(module, path = %target.display(), "resolved target module");
                return Ok(Some(ModuleSource::Target {
                    code: fs::read_to_string(&target)?,
                }));
            }
            for extension in &options.source_extensions {
                let source = with_extension(&base, extension);
                if source.is_file() {
                    debug!(module, path = %source.display(), "resolved source module");
                    return Ok(Some(ModuleSource::Source {
                        code: fs::read_to_string(&source)?,
                        filename: source.display().to_string(),
                    }));
                }
            }
        }
        Ok(None)
    }
}

/// Appends `.extension` without replacing anything after a dot in the stem.
fn with_extension(base: &Path, extension: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// Serves modules from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    modules: AHashMap<String, ModuleSource>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a Python module, reported under the filename `<module>.py`.
    #[must_use]
    pub fn with_source(mut self, module: &str, code: impl Into<String>) -> Self {
        self.modules.insert(
            module.to_owned(),
            ModuleSource::Source {
                code: code.into(),
                filename: format!("{module}.py"),
            },
        );
        self
    }

    /// Registers a module of target-language text.
    #[must_use]
    pub fn with_target(mut self, module: &str, code: impl Into<String>) -> Self {
        self.modules
            .insert(module.to_owned(), ModuleSource::Target { code: code.into() });
        self
    }
}

impl ModuleResolver for MemoryResolver {
    fn resolve(&self, module: &str, _options: &CompileOptions) -> io::Result<Option<ModuleSource>> {
        Ok(self.modules.get(module).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn target_text_is_preferred_over_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("util.py"), "x = 1\n").expect("write source");
        fs::write(dir.path().join("util.js"), "var x = 1;").expect("write target");

        let resolver = FsResolver::new([dir.path()]);
        let found = resolver.resolve("util", &CompileOptions::default()).expect("resolve");
        assert_eq!(
            found,
            Some(ModuleSource::Target {
                code: "var x = 1;".to_owned()
            })
        );
    }

    #[test]
    fn dotted_names_are_nested_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("pkg")).expect("mkdir");
        let file = dir.path().join("pkg").join("shapes.pyjs");
        fs::write(&file, "unit = 1\n").expect("write source");

        let resolver = FsResolver::new([dir.path()]);
        let found = resolver.resolve("pkg.shapes", &CompileOptions::default()).expect("resolve");
        assert_eq!(
            found,
            Some(ModuleSource::Source {
                code: "unit = 1\n".to_owned(),
                filename: file.display().to_string(),
            })
        );
    }

    #[test]
    fn earlier_roots_win_and_missing_modules_are_none() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        fs::write(first.path().join("m.py"), "a = 1\n").expect("write");
        fs::write(second.path().join("m.js"), "var a = 2;").expect("write");

        let resolver = FsResolver::new([first.path(), second.path()]);
        let options = CompileOptions::default();
        assert!(matches!(
            resolver.resolve("m", &options).expect("resolve"),
            Some(ModuleSource::Source { .. })
        ));
        assert_eq!(resolver.resolve("absent", &options).expect("resolve"), None);
    }

    #[test]
    fn memory_modules_report_a_python_filename() {
        let resolver = MemoryResolver::new().with_source("a.b", "x = 1\n");
        let Some(ModuleSource::Source { filename, .. }) =
            resolver.resolve("a.b", &CompileOptions::default()).expect("resolve")
        else {
            panic!("expected a source module");
        };
        assert_eq!(filename, "a.b.py");
    }
}
