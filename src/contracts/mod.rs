//! Observed call contracts.
//!
//! A contract records, for one call shape (method, receiver, argument types),
//! the return type seen under one library version. Lookups pick the version
//! nearest to what the project has installed.

mod registry;
mod version;

pub use registry::SignatureRegistry;
pub use version::{compare_versions, nearest_version};
