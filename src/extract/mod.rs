//! Ancestor extraction: producing ordered ancestor chains for a project.
//!
//! Two strategies implement [`AncestorsExtractor`]:
//!
//! - [`ObjectSpaceExtractor`] asks the live runtime: every loaded module
//!   reports its own `ancestors`. Reflects runtime truth, including ancestors
//!   defined dynamically, but only sees what has been loaded.
//! - [`StaticExtractor`] asks the runtime for declarations only
//!   (`class`/`module`/`include`/`prepend`) and linearizes them itself on top
//!   of a built-in core prelude. Independent of load order, blind to
//!   metaprogramming.
//!
//! Both drive the same [`RuntimeConsole`] collaborator and report two
//! checkpoints to an [`ExtractionListener`]:
//!
//! ```text
//! execute script ──▶ console_executed()
//!        │
//! read output    ──▶ information_extracted()
//!        │
//! parse / linearize ──▶ Vec<AncestorRecord>
//! ```
//!
//! Extraction blocks the calling thread until the list is complete or the
//! first error; errors abort the whole run.

mod console;
mod error;
mod object_space;
mod prelude;
mod static_analysis;

pub use console::{ConsoleSession, RecordedConsole, RuntimeConsole};
pub use error::{ConsoleError, ExtractionFailure};
pub use object_space::ObjectSpaceExtractor;
pub use static_analysis::StaticExtractor;

use std::fmt;
use std::path::PathBuf;

use crate::model::AncestorRecord;

/// The project an extraction runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub name: String,
    pub root: PathBuf,
    /// Extra source roots (vendored or bundled libraries) scanned alongside `root`.
    pub load_paths: Vec<PathBuf>,
}

impl ProjectContext {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            load_paths: Vec::new(),
        }
    }

    pub fn with_load_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.load_paths.push(path.into());
        self
    }

    /// `root` followed by every load path.
    pub fn source_roots(&self) -> impl Iterator<Item = &PathBuf> {
        std::iter::once(&self.root).chain(self.load_paths.iter())
    }
}

/// The runtime (SDK) the console boots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeHandle {
    pub interpreter: PathBuf,
    pub version: String,
}

impl RuntimeHandle {
    pub fn new(interpreter: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            version: version.into(),
        }
    }
}

/// Which strategy produced a set of ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractorKind {
    ObjectSpace,
    Static,
}

impl ExtractorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ObjectSpace => "object-space",
            Self::Static => "static",
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress checkpoints fired during extraction.
///
/// Only used for progress accounting; neither callback signals success.
pub trait ExtractionListener: Send + Sync {
    /// The console finished executing the extraction script.
    fn console_executed(&self) {}

    /// The console output has been read back.
    fn information_extracted(&self) {}
}

/// Listener that ignores both checkpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl ExtractionListener for NoopListener {}

/// One strategy for producing ancestor chains.
pub trait AncestorsExtractor: Send + Sync {
    fn kind(&self) -> ExtractorKind;

    /// Produce the ancestor chain of every class/module the strategy can see.
    fn extract_ancestors(
        &self,
        project: &ProjectContext,
        runtime: &RuntimeHandle,
        listener: &dyn ExtractionListener,
    ) -> Result<Vec<AncestorRecord>, ExtractionFailure>;
}

/// Execute `script` and read its output, firing both listener checkpoints.
pub(crate) fn run_console(
    console: &dyn RuntimeConsole,
    project: &ProjectContext,
    runtime: &RuntimeHandle,
    script: &str,
    listener: &dyn ExtractionListener,
) -> Result<String, ExtractionFailure> {
    tracing::debug!(
        project = %project.name,
        runtime = %runtime.version,
        "executing extraction script"
    );
    let session = console.execute(project, runtime, script)?;
    listener.console_executed();

    let output = session.extract_output()?;
    listener.information_extracted();
    tracing::trace!(bytes = output.len(), "console output extracted");
    Ok(output)
}
