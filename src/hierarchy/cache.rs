//! Per-module member cache keyed by `(class, root)`.
//!
//! ```text
//! get_members_with_caching(fqn, root)
//!     │  read lock on generation (held until the answer is produced)
//!     ▼
//! members[(fqn, root)] ── hit ──▶ Arc<[Symbol]>
//!     │ miss (single flight per key)
//!     ▼
//! table[()]  ── hit ──▶ AncestorTable
//!     │ miss (single flight, one extraction per generation)
//!     ▼
//! AncestorSource::load()
//! ```
//!
//! `invalidate` takes the write lock, so it waits for in-flight queries and
//! no query started after it can see results from before it.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::base::{ModuleId, RootScope};
use crate::extract::{
    AncestorsExtractor, ExtractionFailure, NoopListener, ProjectContext, RuntimeHandle,
};
use crate::model::AncestorRecord;

use super::flight::{EntryState, FlightMap};
use super::members::{MemberProvider, Symbol};

/// Where a cache gets its ancestor chains from.
#[derive(Clone)]
pub enum AncestorSource {
    /// Run an extraction strategy the first time any chain is needed.
    Extractor {
        extractor: Arc<dyn AncestorsExtractor>,
        project: ProjectContext,
        runtime: Option<RuntimeHandle>,
    },
    /// Chains that were already extracted (or loaded from an export).
    Materialized(Arc<[AncestorRecord]>),
}

impl AncestorSource {
    pub fn extracted(
        extractor: Arc<dyn AncestorsExtractor>,
        project: ProjectContext,
        runtime: Option<RuntimeHandle>,
    ) -> Self {
        Self::Extractor {
            extractor,
            project,
            runtime,
        }
    }

    pub fn materialized(records: impl Into<Arc<[AncestorRecord]>>) -> Self {
        Self::Materialized(records.into())
    }

    fn load(&self) -> Result<AncestorTable, ExtractionFailure> {
        match self {
            Self::Extractor {
                extractor,
                project,
                runtime,
            } => {
                let runtime = runtime.as_ref().ok_or(ExtractionFailure::MissingRuntime)?;
                debug!(
                    project = %project.name,
                    strategy = %extractor.kind(),
                    "extracting ancestors"
                );
                let records = extractor.extract_ancestors(project, runtime, &NoopListener)?;
                Ok(AncestorTable::from_records(&records))
            }
            Self::Materialized(records) => Ok(AncestorTable::from_records(records)),
        }
    }
}

impl fmt::Debug for AncestorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extractor {
                extractor, project, ..
            } => f
                .debug_struct("Extractor")
                .field("kind", &extractor.kind())
                .field("project", &project.name)
                .finish(),
            Self::Materialized(records) => f
                .debug_tuple("Materialized")
                .field(&records.len())
                .finish(),
        }
    }
}

/// Ancestor chains by module name.
#[derive(Debug, Default)]
struct AncestorTable {
    chains: FxHashMap<String, Vec<String>>,
}

impl AncestorTable {
    /// Later records for the same name replace earlier ones.
    fn from_records(records: &[AncestorRecord]) -> Self {
        let chains = records
            .iter()
            .map(|record| (record.module_name.clone(), record.ancestors.clone()))
            .collect();
        Self { chains }
    }

    fn chain(&self, name: &str) -> Option<&[String]> {
        self.chains.get(name).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    fqn: String,
    root: RootScope,
}

struct Generation {
    number: u64,
    source: AncestorSource,
    disposed: bool,
}

/// Memoized member lookups for one module.
pub struct HierarchyCache {
    module: ModuleId,
    members: Arc<dyn MemberProvider>,
    generation: RwLock<Generation>,
    table: FlightMap<(), Arc<AncestorTable>, ExtractionFailure>,
    entries: FlightMap<CacheKey, Arc<[Symbol]>, ExtractionFailure>,
}

impl HierarchyCache {
    pub fn new(module: ModuleId, source: AncestorSource, members: Arc<dyn MemberProvider>) -> Self {
        Self {
            module,
            members,
            generation: RwLock::new(Generation {
                number: 0,
                source,
                disposed: false,
            }),
            table: FlightMap::new(),
            entries: FlightMap::new(),
        }
    }

    pub fn module(&self) -> &ModuleId {
        &self.module
    }

    /// All members visible on `fqn` through its ancestor chain, nearest
    /// ancestor first, for resolution root `root`.
    ///
    /// A member name declared by several ancestors is reported once, from
    /// the nearest one. Unknown classes yield an empty list. Extraction
    /// failures also yield an empty list and are not remembered, so the next
    /// call retries.
    pub fn get_members_with_caching(&self, fqn: &str, root: RootScope) -> Arc<[Symbol]> {
        let generation = self.generation.read();
        if generation.disposed {
            return Arc::from([]);
        }

        let key = CacheKey {
            fqn: fqn.to_owned(),
            root,
        };
        let resolved = self.entries.get_or_resolve(&key, || {
            trace!(module = %self.module, fqn, root = root.0, "resolving members");
            self.resolve_members(&generation.source, fqn, root)
        });

        match resolved {
            Ok(symbols) => symbols,
            Err(err) => {
                warn!(module = %self.module, fqn, error = %err, "member resolution failed");
                Arc::from([])
            }
        }
    }

    fn resolve_members(
        &self,
        source: &AncestorSource,
        fqn: &str,
        root: RootScope,
    ) -> Result<Arc<[Symbol]>, ExtractionFailure> {
        let table = self
            .table
            .get_or_resolve(&(), || source.load().map(Arc::new))?;

        let Some(chain) = table.chain(fqn) else {
            trace!(module = %self.module, fqn, "no ancestors known");
            return Ok(Arc::from([]));
        };

        let mut seen = FxHashSet::default();
        let mut symbols = Vec::new();
        for ancestor in chain {
            for method in self.members.members_of(ancestor) {
                if seen.insert(method.name.clone()) {
                    symbols.push(Symbol::from_method(&method, root));
                }
            }
        }
        Ok(symbols.into())
    }

    /// Drop every cached result and extracted chain. Waits for in-flight
    /// queries, which complete with pre-invalidation answers.
    pub fn invalidate(&self) {
        let mut generation = self.generation.write();
        self.reset(&mut generation);
        debug!(module = %self.module, generation = generation.number, "hierarchy cache invalidated");
    }

    /// Replace the ancestor source; implies [`HierarchyCache::invalidate`].
    pub fn set_source(&self, source: AncestorSource) {
        let mut generation = self.generation.write();
        generation.source = source;
        self.reset(&mut generation);
        debug!(module = %self.module, generation = generation.number, "ancestor source replaced");
    }

    /// Invalidate and stop answering. Later queries return an empty list.
    pub fn dispose(&self) {
        let mut generation = self.generation.write();
        generation.disposed = true;
        self.reset(&mut generation);
        debug!(module = %self.module, "hierarchy cache disposed");
    }

    fn reset(&self, generation: &mut Generation) {
        generation.number += 1;
        self.entries.clear();
        self.table.clear();
    }

    /// Bumped by every invalidation.
    pub fn generation(&self) -> u64 {
        self.generation.read().number
    }

    pub fn is_disposed(&self) -> bool {
        self.generation.read().disposed
    }

    /// Number of `(class, root)` results currently memoized.
    pub fn cached_entries(&self) -> usize {
        self.entries.resolved_len()
    }

    pub fn entry_state(&self, fqn: &str, root: RootScope) -> EntryState {
        self.entries.state(&CacheKey {
            fqn: fqn.to_owned(),
            root,
        })
    }
}

impl fmt::Debug for HierarchyCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchyCache")
            .field("module", &self.module)
            .field("generation", &self.generation())
            .field("cached_entries", &self.cached_entries())
            .finish()
    }
}
