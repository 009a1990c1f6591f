//! # typetrack-base
//!
//! Core library of the Ruby type tracker: record codec, ancestor extraction,
//! the per-module class hierarchy cache, observed call contracts and export.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! base       → ModuleId, RootScope, constants
//! model      → Location, LibraryOrigin, ClassDescriptor, MethodDescriptor
//! codec      → Binary record codec, contract store framing
//! extract    → ObjectSpace and static ancestor extraction
//! contracts  → Signature registry, nearest-version lookup
//! config     → Contract store location, wire layout, progress steps
//! hierarchy  → Per-module member cache, single-flight, module registry
//! export     → Ancestors reports, contract store export, progress
//! ```
//!
//! Each layer may use only the layers it lists:
//!
//! ```text
//! model      ← base
//! codec      ← base, model
//! extract    ← base, model
//! contracts  ← model
//! config     ← base, codec, extract
//! hierarchy  ← base, model, codec, extract
//! export     ← base, model, codec, extract, config
//! ```

// ============================================================================
// MODULES (dependency order: base → model → codec → extract → contracts →
// config → hierarchy → export)
// ============================================================================

/// Foundation types: ModuleId, RootScope, constants
pub mod base;

/// Value types exchanged by every layer
pub mod model;

/// Binary record codec and contract store
pub mod codec;

/// Ancestor extraction strategies
pub mod extract;

/// Observed call contracts
pub mod contracts;

/// Crate configuration
pub mod config;

/// Class hierarchy cache and symbol provider
pub mod hierarchy;

/// Export actions
pub mod export;

// Re-export foundation types
pub use base::{ModuleId, RootScope};
pub use codec::{ContractStore, DecodeError, EncodeError, WireLayout};
pub use config::TypeTrackerConfig;
pub use extract::{AncestorsExtractor, ExtractionFailure, ObjectSpaceExtractor, StaticExtractor};
pub use hierarchy::{ClassHierarchySymbolProvider, HierarchyCache, ModuleRegistry, Symbol};
pub use model::{
    AncestorRecord, ClassDescriptor, LibraryOrigin, Location, MethodDescriptor, Visibility,
};
