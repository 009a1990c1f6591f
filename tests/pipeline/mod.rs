//! End-to-end tests across layers
//!
//! - Static extraction feeding the hierarchy cache and symbol provider
//! - Contract stores feeding member tables
//! - Export of ancestors and contracts
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod tests_contract_store;
mod tests_export;
mod tests_hierarchy;
