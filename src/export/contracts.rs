use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::ContractStore;
use crate::config::TypeTrackerConfig;
use crate::extract::ProjectContext;
use crate::model::MethodDescriptor;

use super::error::ExportError;

const BLOCKED_TITLE: &str = "Cannot export contracts";
const BLOCKED_MESSAGE: &str =
    "Cannot export contracts while have some programs running under type tracker";

/// A signature server collecting contracts from a traced program.
pub trait SignatureServerStatus {
    fn is_processing_requests(&self) -> bool;
}

/// Refuse to export while any server may still be writing to the store.
pub fn check_contracts_exportable(
    servers: &[&dyn SignatureServerStatus],
) -> Result<(), ExportError> {
    if servers.iter().any(|server| server.is_processing_requests()) {
        return Err(ExportError::blocked(BLOCKED_TITLE, BLOCKED_MESSAGE));
    }
    Ok(())
}

/// Copy the project's contract store to `destination`, replacing any file
/// already there. Returns the number of bytes copied.
pub fn export_contracts(
    project: &ProjectContext,
    servers: &[&dyn SignatureServerStatus],
    destination: &Path,
    config: &TypeTrackerConfig,
) -> Result<u64, ExportError> {
    check_contracts_exportable(servers)?;

    let source = config.contract_store_path(project);
    let bytes = fs::copy(&source, destination)?;
    info!(
        project = %project.name,
        from = %source.display(),
        to = %destination.display(),
        bytes,
        "exported contracts"
    );
    Ok(bytes)
}

/// Write `methods` as the project's contract store, in the configured layout.
/// Returns where the store was written.
pub fn save_contract_store(
    project: &ProjectContext,
    methods: Vec<MethodDescriptor>,
    config: &TypeTrackerConfig,
) -> Result<PathBuf, ExportError> {
    let path = config.contract_store_path(project);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let store = ContractStore::with_methods(config.store_layout, methods);
    store.save(&path)?;
    debug!(project = %project.name, layout = ?config.store_layout, "contract store saved");
    Ok(path)
}
