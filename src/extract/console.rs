//! The runtime console collaborator.
//!
//! A console boots the project's runtime (an IRB / Rails console for a Ruby
//! project), evaluates a script and hands back whatever the script printed.
//! Extractors own the scripts and the parsing of their output; consoles own
//! process management, timeouts and the transport.

use parking_lot::Mutex;

use super::error::ConsoleError;
use super::{ProjectContext, RuntimeHandle};

/// Executes scripts in a runtime booted for a project.
pub trait RuntimeConsole: Send + Sync {
    /// Boot the console for `project` on `runtime` and evaluate `script`.
    ///
    /// Returns once the console reports the script has finished executing.
    fn execute(
        &self,
        project: &ProjectContext,
        runtime: &RuntimeHandle,
        script: &str,
    ) -> Result<Box<dyn ConsoleSession>, ConsoleError>;
}

/// A finished console run whose output has not been read yet.
pub trait ConsoleSession: Send {
    /// Collect everything the script printed.
    fn extract_output(self: Box<Self>) -> Result<String, ConsoleError>;
}

/// Console that replays a captured transcript instead of booting a runtime.
///
/// Useful for re-running extraction against saved console output and for
/// exercising extractors without a Ruby installation.
#[derive(Debug)]
pub struct RecordedConsole {
    transcript: Result<String, ConsoleError>,
    scripts: Mutex<Vec<String>>,
}

impl RecordedConsole {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            transcript: Ok(output.into()),
            scripts: Mutex::new(Vec::new()),
        }
    }

    /// A console whose every execution fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            transcript: Err(ConsoleError::new(message)),
            scripts: Mutex::new(Vec::new()),
        }
    }

    /// Number of scripts executed so far.
    pub fn executions(&self) -> usize {
        self.scripts.lock().len()
    }

    pub fn last_script(&self) -> Option<String> {
        self.scripts.lock().last().cloned()
    }
}

impl RuntimeConsole for RecordedConsole {
    fn execute(
        &self,
        _project: &ProjectContext,
        _runtime: &RuntimeHandle,
        script: &str,
    ) -> Result<Box<dyn ConsoleSession>, ConsoleError> {
        self.scripts.lock().push(script.to_owned());
        let output = self.transcript.clone()?;
        Ok(Box::new(RecordedSession { output }))
    }
}

struct RecordedSession {
    output: String,
}

impl ConsoleSession for RecordedSession {
    fn extract_output(self: Box<Self>) -> Result<String, ConsoleError> {
        Ok(self.output)
    }
}
