use crate::aggregate::{Ratio, SampleOutcome, VariantRatio};
use crate::error::ScenarioFailure;

/// Everything measured for one scenario, in registration order.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub scenario: String,
    pub title: String,
    /// Workload summary, empty when the scenario never got past BUILD.
    pub workload: String,
    pub repetitions: u32,
    pub baseline: Option<String>,
    pub samples: Vec<(String, SampleOutcome)>,
    pub ratios: Result<Vec<VariantRatio>, ScenarioFailure>,
}

impl ScenarioResult {
    /// A scenario that stopped before producing any samples.
    pub fn aborted(scenario: impl Into<String>, title: impl Into<String>, failure: ScenarioFailure) -> Self {
        Self {
            scenario: scenario.into(),
            title: title.into(),
            workload: String::new(),
            repetitions: 0,
            baseline: None,
            samples: Vec::new(),
            ratios: Err(failure),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.ratios.is_err()
    }

    pub fn failure(&self) -> Option<&ScenarioFailure> {
        self.ratios.as_ref().err()
    }

    pub fn sample(&self, variant: &str) -> Option<&SampleOutcome> {
        self.samples
            .iter()
            .find(|(name, _)| name == variant)
            .map(|(_, outcome)| outcome)
    }

    pub fn ratio(&self, variant: &str) -> Option<Ratio> {
        self.ratios
            .as_ref()
            .ok()?
            .iter()
            .find(|r| r.name == variant)
            .map(|r| r.ratio)
    }

    /// Successful variant with the shortest window; ties go to the one
    /// registered first.
    pub fn fastest(&self) -> Option<&str> {
        let mut best: Option<(&str, std::time::Duration)> = None;
        for (name, outcome) in &self.samples {
            if let Ok(sample) = outcome
                && best.is_none_or(|(_, elapsed)| sample.elapsed < elapsed)
            {
                best = Some((name.as_str(), sample.elapsed));
            }
        }
        best.map(|(name, _)| name)
    }
}
