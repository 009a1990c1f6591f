//! Export actions: write ancestors reports and copy contract stores.
//!
//! ```text
//! export_ancestors:  advance ─▶ extract (2 checkpoints) ─▶ advance ─▶ write ─▶ advance
//!                                   │ failure
//!                                   ▼
//!                        write "<message>\n", ExportOutcome::ExtractionFailed
//!
//! export_contracts:  servers busy? ─▶ Blocked
//!                          │ no
//!                          ▼
//!                    copy <contracts_dir>/<project> ─▶ destination
//! ```

mod ancestors;
mod contracts;
mod error;
mod kind;
mod progress;

pub use ancestors::{ExportOutcome, export_ancestors, render_ancestors_report};
pub use contracts::{
    SignatureServerStatus, check_contracts_exportable, export_contracts, save_contract_store,
};
pub use error::ExportError;
pub use kind::ExportKind;
pub use progress::{FractionProgress, ProgressIndicator, ProgressSteps};
