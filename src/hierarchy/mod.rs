//! Class hierarchy cache: memoized "members visible on class X".
//!
//! Each module owns a [`HierarchyCache`]. A query walks the class's ancestor
//! chain (extracted once per cache generation) and collects the members each
//! ancestor declares, nearest ancestor first. Results are memoized per
//! `(class, root)`; concurrent queries for the same key share one resolution.
//!
//! - [`FlightMap`] - Single-flight memo map used for both the ancestor table
//!   and the per-key results
//! - [`HierarchyCache`] - The per-module cache
//! - [`ModuleRegistry`] - Module lifecycle: one cache per registered module
//! - [`ClassHierarchySymbolProvider`] - Feeds members into symbol resolution

mod cache;
mod flight;
mod members;
mod registry;

pub use cache::{AncestorSource, HierarchyCache};
pub use flight::{EntryState, FlightMap};
pub use members::{MemberProvider, MethodTable, Symbol};
pub use registry::{ClassHierarchySymbolProvider, ModuleRegistry};

#[cfg(test)]
mod tests;
