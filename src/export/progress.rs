use parking_lot::Mutex;

use crate::extract::ExtractionListener;

/// A progress bar owned by whoever runs the export.
pub trait ProgressIndicator: Send + Sync {
    fn fraction(&self) -> f64;
    fn set_fraction(&self, fraction: f64);
}

/// In-memory indicator, for callers without a UI.
#[derive(Debug, Default)]
pub struct FractionProgress {
    fraction: Mutex<f64>,
}

impl FractionProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressIndicator for FractionProgress {
    fn fraction(&self) -> f64 {
        *self.fraction.lock()
    }

    fn set_fraction(&self, fraction: f64) {
        *self.fraction.lock() = fraction;
    }
}

/// Moves an indicator forward in equal steps.
///
/// Also listens to extraction, so both extraction checkpoints count as steps.
pub struct ProgressSteps<'a> {
    indicator: &'a dyn ProgressIndicator,
    step: f64,
}

impl<'a> ProgressSteps<'a> {
    /// `fractions` steps fill the indicator; zero is treated as one.
    pub fn new(indicator: &'a dyn ProgressIndicator, fractions: u32) -> Self {
        Self {
            indicator,
            step: 1.0 / f64::from(fractions.max(1)),
        }
    }

    /// Advance by one step, never past 1.0.
    pub fn advance(&self) {
        let next = (self.indicator.fraction() + self.step).min(1.0);
        self.indicator.set_fraction(next);
    }
}

impl ExtractionListener for ProgressSteps<'_> {
    fn console_executed(&self) {
        self.advance();
    }

    fn information_extracted(&self) {
        self.advance();
    }
}
