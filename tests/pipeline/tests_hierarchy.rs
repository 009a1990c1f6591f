//! Static extraction feeding the hierarchy cache and symbol provider.

use std::sync::Arc;

use typetrack::base::{ModuleId, RootScope};
use typetrack::extract::StaticExtractor;
use typetrack::hierarchy::{
    AncestorSource, ClassHierarchySymbolProvider, HierarchyCache, MethodTable, ModuleRegistry,
};
use typetrack::model::Visibility;

use crate::helpers::fixtures::*;

const ROOT: RootScope = RootScope::new(3);

fn registry_with_shop() -> (Arc<ModuleRegistry>, Arc<typetrack::extract::RecordedConsole>) {
    let console = shop_console();
    let source = AncestorSource::extracted(
        Arc::new(StaticExtractor::new(console.clone())),
        shop_project("/work/shop"),
        Some(ruby()),
    );
    let registry = Arc::new(ModuleRegistry::new());
    registry.register(HierarchyCache::new(
        ModuleId::new("shop"),
        source,
        Arc::new(MethodTable::from_methods(shop_methods())),
    ));
    (registry, console)
}

#[test]
fn test_members_follow_static_linearization() {
    let (registry, console) = registry_with_shop();
    let provider = ClassHierarchySymbolProvider::new(Arc::clone(&registry));

    let mut seen = Vec::new();
    let completed = provider.process_dynamic_symbols(
        Some(&ModuleId::new("shop")),
        "Admin",
        ROOT,
        |symbol| {
            seen.push((symbol.name.to_string(), symbol.owner.to_string(), symbol.visibility));
            true
        },
    );

    assert!(completed);
    assert_eq!(
        seen,
        vec![
            ("grant".to_owned(), "Admin".to_owned(), Visibility::Protected),
            ("to_s".to_owned(), "User".to_owned(), Visibility::Public),
            ("password_digest".to_owned(), "User".to_owned(), Visibility::Private),
            ("search".to_owned(), "Searchable".to_owned(), Visibility::Public),
            ("audit_log".to_owned(), "Auditable".to_owned(), Visibility::Public),
            ("save".to_owned(), "ActiveRecord::Base".to_owned(), Visibility::Public),
        ]
    );
    assert_eq!(console.executions(), 1);
}

#[test]
fn test_one_extraction_serves_every_class_until_invalidated() {
    let (registry, console) = registry_with_shop();
    let cache = registry.cache_for(&ModuleId::new("shop")).unwrap();

    for class in ["Admin", "User", "ApplicationRecord", "Auditable"] {
        cache.get_members_with_caching(class, ROOT);
    }
    assert_eq!(console.executions(), 1);
    assert_eq!(cache.cached_entries(), 4);

    registry.invalidate(&ModuleId::new("shop"));
    let user = cache.get_members_with_caching("User", ROOT);
    assert_eq!(user.len(), 5);
    assert_eq!(console.executions(), 2);
}

#[test]
fn test_disposed_module_contributes_nothing() {
    let (registry, _) = registry_with_shop();
    let provider = ClassHierarchySymbolProvider::new(Arc::clone(&registry));
    registry.dispose(&ModuleId::new("shop"));

    let mut count = 0;
    assert!(provider.process_dynamic_symbols(
        Some(&ModuleId::new("shop")),
        "Admin",
        ROOT,
        |_| {
            count += 1;
            true
        }
    ));
    assert_eq!(count, 0);
}
