use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::TypeTrackerConfig;
use crate::extract::{AncestorsExtractor, ExtractionFailure, ProjectContext, RuntimeHandle};
use crate::model::AncestorRecord;

use super::error::ExportError;
use super::progress::{ProgressIndicator, ProgressSteps};

/// What an ancestors export left in its destination file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The report, covering this many modules.
    Written { records: usize },
    /// Extraction failed; the file holds this message.
    ExtractionFailed(String),
}

/// Render the plain-text ancestors report.
///
/// ```text
/// Module: User
/// Ancestors: User ApplicationRecord Object ⏎
/// ⏎
/// Module: Kernel
/// Ancestors: Nothing found⏎
/// ⏎
/// ```
///
/// Every ancestor is followed by one space, including the last.
pub fn render_ancestors_report(records: &[AncestorRecord]) -> String {
    let mut report = String::new();
    for record in records {
        let _ = writeln!(report, "Module: {}", record.module_name);
        report.push_str("Ancestors: ");
        if record.ancestors.is_empty() {
            report.push_str("Nothing found");
        }
        for ancestor in &record.ancestors {
            report.push_str(ancestor);
            report.push(' ');
        }
        report.push_str("\n\n");
    }
    report
}

/// Extract ancestors with `extractor` and write the report to `destination`.
///
/// Progress moves through `config.ancestors_progress_fractions` steps: one
/// before extraction, one per extraction checkpoint, one before writing and
/// one after. A failed extraction (including a missing runtime) is written to
/// the file as its message and reported as [`ExportOutcome::ExtractionFailed`];
/// only I/O errors are returned as `Err`.
pub fn export_ancestors(
    extractor: &dyn AncestorsExtractor,
    project: &ProjectContext,
    runtime: Option<&RuntimeHandle>,
    destination: &Path,
    progress: &dyn ProgressIndicator,
    config: &TypeTrackerConfig,
) -> Result<ExportOutcome, ExportError> {
    let steps = ProgressSteps::new(progress, config.ancestors_progress_fractions);
    steps.advance();

    let extracted = runtime
        .ok_or(ExtractionFailure::MissingRuntime)
        .and_then(|runtime| extractor.extract_ancestors(project, runtime, &steps));
    let records = match extracted {
        Ok(records) => records,
        Err(failure) => {
            let message = failure.to_string();
            warn!(
                project = %project.name,
                strategy = %extractor.kind(),
                error = %message,
                "ancestors extraction failed"
            );
            fs::write(destination, format!("{message}\n"))?;
            return Ok(ExportOutcome::ExtractionFailed(message));
        }
    };

    steps.advance();
    fs::write(destination, render_ancestors_report(&records))?;
    steps.advance();

    info!(
        project = %project.name,
        strategy = %extractor.kind(),
        records = records.len(),
        path = %destination.display(),
        "exported ancestors"
    );
    Ok(ExportOutcome::Written {
        records: records.len(),
    })
}
