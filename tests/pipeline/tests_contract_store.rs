//! Contract stores written to disk feeding member tables.

use std::sync::Arc;

use tempfile::TempDir;
use typetrack::base::{ModuleId, RootScope};
use typetrack::codec::{ContractStore, WireLayout};
use typetrack::config::TypeTrackerConfig;
use typetrack::export::save_contract_store;
use typetrack::extract::ObjectSpaceExtractor;
use typetrack::hierarchy::{AncestorSource, HierarchyCache, MethodTable};

use crate::helpers::fixtures::*;

#[test]
fn test_saved_store_round_trips_into_member_table() {
    for layout in [WireLayout::Legacy, WireLayout::Tagged] {
        let dir = TempDir::new().unwrap();
        let project = shop_project(dir.path());
        let config = TypeTrackerConfig::new().with_store_layout(layout);

        let path = save_contract_store(&project, shop_methods(), &config).unwrap();
        let store = ContractStore::load(&path).unwrap();
        assert_eq!(store.layout(), layout);
        assert_eq!(store.methods(), shop_methods().as_slice());

        let table = MethodTable::from_store(&store);
        assert_eq!(table.len(), shop_methods().len());
    }
}

#[test]
fn test_object_space_records_drive_a_materialized_cache() {
    let records = ObjectSpaceExtractor::parse_output(
        "User: User Searchable ApplicationRecord Auditable ActiveRecord::Base Object Kernel BasicObject\n",
    )
    .unwrap();
    let cache = HierarchyCache::new(
        ModuleId::new("shop"),
        AncestorSource::materialized(records),
        Arc::new(MethodTable::from_methods(shop_methods())),
    );

    let names: Vec<_> = cache
        .get_members_with_caching("User", RootScope::default())
        .iter()
        .map(|s| s.name.to_string())
        .collect();
    assert_eq!(
        names,
        vec!["to_s", "password_digest", "search", "audit_log", "save", "puts"]
    );
}
