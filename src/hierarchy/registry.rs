use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::base::{ModuleId, RootScope};

use super::cache::HierarchyCache;
use super::members::Symbol;

/// One [`HierarchyCache`] per module, created when a module is registered and
/// disposed when it is removed.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    caches: RwLock<IndexMap<ModuleId, Arc<HierarchyCache>>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `cache` under its module, disposing any cache it replaces.
    pub fn register(&self, cache: HierarchyCache) -> Arc<HierarchyCache> {
        let cache = Arc::new(cache);
        let previous = self
            .caches
            .write()
            .insert(cache.module().clone(), Arc::clone(&cache));
        if let Some(previous) = previous {
            previous.dispose();
        }
        debug!(module = %cache.module(), "hierarchy cache registered");
        cache
    }

    pub fn cache_for(&self, module: &ModuleId) -> Option<Arc<HierarchyCache>> {
        self.caches.read().get(module).cloned()
    }

    /// Remove and dispose the cache of `module`. Returns whether one existed.
    pub fn dispose(&self, module: &ModuleId) -> bool {
        let removed = self.caches.write().shift_remove(module);
        match removed {
            Some(cache) => {
                cache.dispose();
                true
            }
            None => false,
        }
    }

    /// Invalidate the cache of `module`, e.g. after its roots or SDK changed.
    pub fn invalidate(&self, module: &ModuleId) {
        if let Some(cache) = self.cache_for(module) {
            cache.invalidate();
        }
    }

    pub fn invalidate_all(&self) {
        let caches: Vec<_> = self.caches.read().values().cloned().collect();
        for cache in caches {
            cache.invalidate();
        }
    }

    /// Registered modules, in registration order.
    pub fn modules(&self) -> Vec<ModuleId> {
        self.caches.read().keys().cloned().collect()
    }
}

/// Feeds hierarchy members into symbol resolution.
#[derive(Debug, Clone)]
pub struct ClassHierarchySymbolProvider {
    registry: Arc<ModuleRegistry>,
}

impl ClassHierarchySymbolProvider {
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self { registry }
    }

    /// Offer every member visible on `fqn` to `processor`, nearest ancestor
    /// first, until it returns `false`.
    ///
    /// Returns `false` if the processor stopped early, `true` otherwise
    /// (including when the element belongs to no module or the module has no
    /// cache).
    pub fn process_dynamic_symbols<F>(
        &self,
        module: Option<&ModuleId>,
        fqn: &str,
        root: RootScope,
        mut processor: F,
    ) -> bool
    where
        F: FnMut(&Symbol) -> bool,
    {
        let Some(cache) = module.and_then(|module| self.registry.cache_for(module)) else {
            return true;
        };
        cache
            .get_members_with_caching(fqn, root)
            .iter()
            .all(|symbol| processor(symbol))
    }
}
