//! Error types for export actions.

use thiserror::Error;

use crate::codec::EncodeError;

/// Why an export did not produce its file.
///
/// Extraction failures are not here: an ancestors export writes them into the
/// output file instead.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A precondition refused the export before anything was written.
    #[error("{title}: {message}")]
    Blocked { title: String, message: String },

    /// Encoding a contract store failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Reading the source or writing the destination failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub fn blocked(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Blocked {
            title: title.into(),
            message: message.into(),
        }
    }
}
