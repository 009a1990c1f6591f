//! Foundation types for the type tracker.
//!
//! This module provides the identifiers and constants used throughout the crate:
//! - [`ModuleId`] - Names a compilation module that owns a hierarchy cache
//! - [`RootScope`] - Opaque scope marker supplied by symbol resolution
//! - Domain constants (store magic, default paths, progress steps)
//!
//! This module has NO dependencies on other typetrack modules.

pub mod constants;
mod ids;

pub use ids::{ModuleId, RootScope};
