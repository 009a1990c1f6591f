//! Architecture Layer Dependency Tests
//!
//! These tests enforce the layered architecture dependency rules:
//!
//! ```text
//! export
//!       ↓
//! hierarchy        contracts
//!       ↓               ↓
//! extract, codec, config
//!       ↓
//! model
//!       ↓
//! base
//! ```
//!
//! Dependency Rules:
//! - base → no crate imports
//! - model → base
//! - codec → base, model
//! - extract → base, model
//! - contracts → model
//! - config → base, codec, extract
//! - hierarchy → base, model, codec, extract
//! - export → base, model, codec, extract, config
//! - Nothing depends on export

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod tests_architecture_helpers;

use std::path::Path;

use rstest::rstest;
use tests_architecture_helpers::*;

#[rstest]
#[case("base", &[])]
#[case("model", &["base"])]
#[case("codec", &["base", "model"])]
#[case("extract", &["base", "model"])]
#[case("contracts", &["model"])]
#[case("hierarchy", &["base", "model", "codec", "extract"])]
#[case("export", &["base", "model", "codec", "extract", "config"])]
fn test_layer_dependencies(#[case] layer: &str, #[case] allowed: &[&str]) {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer);
    let violations = collect_layer_violations(&dir, allowed, layer);
    assert!(
        violations.is_empty(),
        "\n❌ {layer} may only depend on {allowed:?}.\nViolations:\n{}\n",
        format_violation_list(&violations)
    );
}

#[test]
fn test_config_dependencies() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/config.rs");
    let content = read_required_file(&path);
    let violations: Vec<_> = content
        .lines()
        .take_while(|line| !line.starts_with("#[cfg(test)]"))
        .flat_map(crate_modules_on_line)
        .filter(|module| !["base", "codec", "extract"].contains(module))
        .collect();
    assert!(
        violations.is_empty(),
        "\n❌ config may only depend on base, codec and extract.\nViolations:\n{}\n",
        format_violation_list(&violations)
    );
}

#[test]
fn test_nothing_depends_on_export() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let violations: Vec<_> = rust_files(&src)
        .into_iter()
        .filter(|path| !path.starts_with(src.join("export")) && !is_test_path(path))
        .filter(|path| path.file_name().is_some_and(|n| n != "lib.rs"))
        .filter(|path| read_required_file(path).contains("crate::export"))
        .map(|path| path.display().to_string())
        .collect();
    assert!(
        violations.is_empty(),
        "\n❌ Only the crate root may reference export.\nViolations:\n{}\n",
        format_violation_list(&violations)
    );
}

/// Verifies that the format constants are defined in base/constants.rs
#[test]
fn test_base_constants_defined() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/base/constants.rs");
    let content = read_required_file(&path);

    let required_constants = [
        "pub const STORE_MAGIC",
        "pub const STORE_VERSION_LEGACY",
        "pub const STORE_VERSION_TAGGED",
        "pub const DEFAULT_CONTRACTS_DIR",
        "pub const ANCESTORS_PROGRESS_FRACTIONS",
    ];

    let missing: Vec<_> = required_constants
        .iter()
        .filter(|constant| !content.contains(*constant))
        .collect();

    assert!(
        missing.is_empty(),
        "\n❌ Missing required constants in base/constants.rs:\n{}\n",
        format_violation_list(&missing)
    );
}
