use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors raised while setting up or measuring a scenario.
#[derive(Debug, Clone, Error)]
pub enum BenchError {
    /// A programming mistake in how a scenario or the harness was configured.
    /// Never retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A variant failed while being timed.
    #[error(transparent)]
    Measurement(#[from] MeasurementError),
}

impl BenchError {
    pub fn configuration(message: impl Into<String>) -> Self {
        BenchError::Configuration(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, BenchError::Configuration(_))
    }
}

/// A variant returned an error or panicked inside the timing engine.
///
/// Carries how far the repetition loop got before the failure so the
/// report can show it; no elapsed time survives a failed run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("variant '{variant}' failed after {completed_calls} of {repetitions} calls: {cause}")]
pub struct MeasurementError {
    pub variant: String,
    pub completed_calls: u32,
    pub repetitions: u32,
    pub warmup: bool,
    pub cause: String,
}

/// Why a whole scenario produced no ranked table.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScenarioFailure {
    #[error("all {count} variants failed")]
    AllVariantsFailed { count: usize },

    #[error("baseline '{baseline}' failed: {cause}")]
    BaselineFailed { baseline: String, cause: String },

    #[error("{message}")]
    Configuration { message: String },

    /// Scenario code outside a variant call panicked (workload building,
    /// registration, summary).
    #[error("panicked: {message}")]
    Panicked { message: String },
}
