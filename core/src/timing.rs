use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::trace;

use crate::error::{BenchError, MeasurementError, Result};
use crate::registry::Variant;

/// One timed window: `repetitions` back-to-back calls of a single variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub repetitions: u32,
}

impl Sample {
    /// Mean time per call, shown next to the window. Ratios use the whole window.
    pub fn per_call(&self) -> Duration {
        self.elapsed / self.repetitions.max(1)
    }
}

fn serialize_secs<S: serde::Serializer>(value: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}

/// Runs a variant a fixed number of times against a monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimingEngine {
    warmup: u32,
}

impl TimingEngine {
    pub fn new(warmup: u32) -> Self {
        Self { warmup }
    }

    /// Time `repetitions` calls of `variant` over the same `workload`.
    ///
    /// Stops at the first failing call and returns a [`MeasurementError`]
    /// recording how many calls completed; the elapsed time of a failed
    /// run is discarded.
    pub fn run<W>(&self, variant: &Variant<W>, workload: &W, repetitions: u32) -> Result<Sample> {
        if repetitions == 0 {
            return Err(BenchError::configuration(format!(
                "repetitions must be at least 1 (variant '{}')",
                variant.name()
            )));
        }

        for _ in 0..self.warmup {
            if let Err(cause) = variant.invoke(workload) {
                return Err(MeasurementError {
                    variant: variant.name().to_string(),
                    completed_calls: 0,
                    repetitions,
                    warmup: true,
                    cause: format!("{:#}", cause),
                }
                .into());
            }
        }

        let start = Instant::now();
        for completed in 0..repetitions {
            if let Err(cause) = variant.invoke(workload) {
                return Err(MeasurementError {
                    variant: variant.name().to_string(),
                    completed_calls: completed,
                    repetitions,
                    warmup: false,
                    cause: format!("{:#}", cause),
                }
                .into());
            }
        }
        let elapsed = start.elapsed();

        trace!(target: "zenbench::timing", variant = variant.name(), repetitions, ?elapsed, "timed window closed");
        Ok(Sample { elapsed, repetitions })
    }
}
