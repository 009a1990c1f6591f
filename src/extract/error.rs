//! Error types for ancestor extraction.

use thiserror::Error;

/// Error reported by a runtime console collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConsoleError(pub String);

impl ConsoleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Terminal failure of one extraction run. No partial results survive it.
///
/// `Clone` so a single failed run can be handed to every caller that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    /// The runtime console could not execute the script or return its output.
    #[error("Runtime console failed: {0}")]
    Console(String),

    /// A line of console output did not match the expected shape.
    #[error("Malformed console output at line {line}: {content}")]
    MalformedOutput { line: usize, content: String },

    /// A class or module (transitively) inherits from itself.
    #[error("Inheritance cycle through {0}")]
    InheritanceCycle(String),

    /// No runtime (SDK) is configured for the module.
    #[error("Ruby SDK is not set")]
    MissingRuntime,
}

impl From<ConsoleError> for ExtractionFailure {
    fn from(err: ConsoleError) -> Self {
        Self::Console(err.0)
    }
}

impl ExtractionFailure {
    pub fn malformed(line: usize, content: impl Into<String>) -> Self {
        Self::MalformedOutput {
            line,
            content: content.into(),
        }
    }
}
