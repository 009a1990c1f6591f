//! Tunables shared by the codec, cache and export layers.

use std::path::{Path, PathBuf};

use crate::base::constants::{ANCESTORS_PROGRESS_FRACTIONS, DEFAULT_CONTRACTS_DIR};
use crate::codec::WireLayout;
use crate::extract::ProjectContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTrackerConfig {
    /// Directory holding one contract store per project. A relative path is
    /// resolved against the project root.
    pub contracts_dir: PathBuf,
    /// Progress steps an ancestors export is divided into.
    pub ancestors_progress_fractions: u32,
    /// Layout for newly written contract stores.
    pub store_layout: WireLayout,
}

impl Default for TypeTrackerConfig {
    fn default() -> Self {
        Self {
            contracts_dir: PathBuf::from(DEFAULT_CONTRACTS_DIR),
            ancestors_progress_fractions: ANCESTORS_PROGRESS_FRACTIONS,
            store_layout: WireLayout::default(),
        }
    }
}

impl TypeTrackerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contracts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.contracts_dir = dir.into();
        self
    }

    pub fn with_ancestors_progress_fractions(mut self, fractions: u32) -> Self {
        self.ancestors_progress_fractions = fractions;
        self
    }

    pub fn with_store_layout(mut self, layout: WireLayout) -> Self {
        self.store_layout = layout;
        self
    }

    /// `<contracts_dir>/<project name>`.
    pub fn contract_store_path(&self, project: &ProjectContext) -> PathBuf {
        self.contracts_root(&project.root).join(&project.name)
    }

    fn contracts_root(&self, project_root: &Path) -> PathBuf {
        if self.contracts_dir.is_absolute() {
            self.contracts_dir.clone()
        } else {
            project_root.join(&self.contracts_dir)
        }
    }
}
