//! Export actions over extracted ancestors and saved stores.

use std::fs;

use tempfile::TempDir;
use typetrack::config::TypeTrackerConfig;
use typetrack::export::{
    ExportKind, ExportOutcome, FractionProgress, ProgressIndicator, SignatureServerStatus,
    export_ancestors, export_contracts, save_contract_store,
};
use typetrack::extract::{AncestorsExtractor, StaticExtractor};

use crate::helpers::fixtures::*;

struct IdleServer;

impl SignatureServerStatus for IdleServer {
    fn is_processing_requests(&self) -> bool {
        false
    }
}

#[test]
fn test_static_ancestors_export() {
    let dir = TempDir::new().unwrap();
    let extractor = StaticExtractor::new(shop_console());
    let kind = ExportKind::for_extractor(extractor.kind());
    let destination = dir
        .path()
        .join(format!("{}.{}", kind.default_file_name("shop"), kind.extensions()[0]));
    let progress = FractionProgress::new();

    let outcome = export_ancestors(
        &extractor,
        &shop_project("/work/shop"),
        Some(&ruby()),
        &destination,
        &progress,
        &TypeTrackerConfig::default(),
    )
    .unwrap();

    assert_eq!(outcome, ExportOutcome::Written { records: 5 });
    assert!(destination.ends_with("shopancestors-by-rubymine.txt"));
    let report = fs::read_to_string(&destination).unwrap();
    assert!(report.starts_with("Module: Auditable\nAncestors: Auditable \n\n"));
    assert!(report.contains(
        "Module: Admin\nAncestors: Admin User Searchable ApplicationRecord Auditable ActiveRecord::Base \n\n"
    ));
    assert!(progress.fraction() >= 1.0 - 1e-9);
}

#[test]
fn test_contracts_export_copies_saved_store() {
    let dir = TempDir::new().unwrap();
    let project = shop_project(dir.path());
    let config = TypeTrackerConfig::default();
    let source = save_contract_store(&project, shop_methods(), &config).unwrap();

    let destination = dir.path().join("export.mv.db");
    let copied = export_contracts(&project, &[&IdleServer], &destination, &config).unwrap();

    assert_eq!(fs::read(&destination).unwrap(), fs::read(&source).unwrap());
    assert_eq!(copied, fs::metadata(&destination).unwrap().len());
}
