//! Source scanning helpers for the architecture tests.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Whether `path` is test code, which may import across layers.
pub fn is_test_path(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str() == "tests")
        || path.file_name().is_some_and(|n| {
            n == "tests.rs" || n.to_string_lossy().starts_with("tests_")
        })
}

/// Every `.rs` file under `dir`, in path order.
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "rs"))
        .collect()
}

/// Top-level crate modules referenced as `crate::<module>` on `line`.
pub fn crate_modules_on_line(line: &str) -> Vec<&str> {
    line.match_indices("crate::")
        .map(|(at, needle)| {
            let rest = &line[at + needle.len()..];
            let end = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            &rest[..end]
        })
        .filter(|module| !module.is_empty())
        .collect()
}

/// References from non-test files in `dir` to crate modules outside
/// `allowed` (and outside `layer` itself), as `path:line: crate::module`.
pub fn collect_layer_violations(dir: &Path, allowed: &[&str], layer: &str) -> Vec<String> {
    assert!(dir.is_dir(), "layer directory {} does not exist", dir.display());

    let mut violations = Vec::new();
    for path in rust_files(dir) {
        if is_test_path(&path) {
            continue;
        }
        let content = read_required_file(&path);
        for (index, line) in content.lines().enumerate() {
            for module in crate_modules_on_line(line) {
                if module != layer && !allowed.contains(&module) {
                    violations.push(format!("{}:{}: crate::{module}", path.display(), index + 1));
                }
            }
        }
    }
    violations
}

pub fn read_required_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()))
}

pub fn format_violation_list<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| format!("  - {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
