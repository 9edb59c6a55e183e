use std::fmt;

use serde::Serialize;

use crate::error::{MeasurementError, ScenarioFailure};
use crate::timing::Sample;

/// A sample, or the error that stopped the variant from producing one.
pub type SampleOutcome = std::result::Result<Sample, MeasurementError>;

/// Speed of a variant relative to the baseline: `baseline_elapsed / elapsed`.
///
/// Above 1 is faster than the baseline, below 1 is slower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Ratio {
    Speedup(f64),
    /// One of the windows was below clock resolution.
    Immeasurable,
}

impl Ratio {
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Speedup(v) => Some(*v),
            Ratio::Immeasurable => None,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Speedup(v) => write!(f, "{:.2}x", v),
            Ratio::Immeasurable => f.write_str("immeasurable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantRatio {
    pub name: String,
    pub ratio: Ratio,
}

/// Turn a complete set of samples into ratios against `baseline`.
///
/// Only called once every variant of the scenario has been measured.
/// Failed variants get no ratio. A failed baseline fails the whole
/// scenario.
pub fn aggregate(samples: &[(String, SampleOutcome)], baseline: &str) -> Result<Vec<VariantRatio>, ScenarioFailure> {
    if samples.iter().all(|(_, outcome)| outcome.is_err()) {
        return Err(ScenarioFailure::AllVariantsFailed { count: samples.len() });
    }

    let base = match samples.iter().find(|(name, _)| name == baseline) {
        Some((_, Ok(sample))) => sample.elapsed,
        Some((_, Err(err))) => {
            return Err(ScenarioFailure::BaselineFailed {
                baseline: baseline.to_string(),
                cause: err.cause.clone(),
            });
        }
        None => {
            return Err(ScenarioFailure::Configuration {
                message: format!("baseline '{}' was never measured", baseline),
            });
        }
    };

    let ratios = samples
        .iter()
        .filter_map(|(name, outcome)| {
            let sample = outcome.as_ref().ok()?;
            let ratio = if name == baseline {
                Ratio::Speedup(1.0)
            } else if base.is_zero() || sample.elapsed.is_zero() {
                Ratio::Immeasurable
            } else {
                Ratio::Speedup(base.as_nanos() as f64 / sample.elapsed.as_nanos() as f64)
            };
            Some(VariantRatio {
                name: name.clone(),
                ratio,
            })
        })
        .collect();
    Ok(ratios)
}
