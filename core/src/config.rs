use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

/// Repetitions used when neither the config nor the scenario asks for a count.
pub const DEFAULT_REPETITIONS: u32 = 1000;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_COLLECTION_SIZE: usize = 10_000;

/// Explicit configuration handed to the scenario runner.
///
/// Loaded from TOML (kebab-case keys) and then patched by CLI flags:
///
/// ```toml
/// repetitions = 500
/// warmup = 10
/// seed = 7
///
/// [scenarios.string-assembly]
/// repetitions = 50
/// baseline = "batch-join"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct HarnessConfig {
    /// Global repetition count. When unset each scenario falls back to its
    /// own default and then to [`DEFAULT_REPETITIONS`].
    pub repetitions: Option<u32>,
    /// Untimed calls made before each timed window.
    pub warmup: u32,
    /// Seed for workloads that need pseudo-random input.
    pub seed: u64,
    /// Element count of the membership-test workload; must fit in `1..=u32::MAX`.
    pub collection_size: usize,
    pub scenarios: BTreeMap<String, ScenarioOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScenarioOverride {
    pub repetitions: Option<u32>,
    pub baseline: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            repetitions: None,
            warmup: 0,
            seed: DEFAULT_SEED,
            collection_size: DEFAULT_COLLECTION_SIZE,
            scenarios: BTreeMap::new(),
        }
    }
}

impl HarnessConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| BenchError::configuration(format!("invalid harness config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.collection_len().map(|_| ())
    }

    /// `collection_size` as an element count workloads can index with `u32`.
    pub fn collection_len(&self) -> Result<u32> {
        match u32::try_from(self.collection_size) {
            Ok(0) => Err(BenchError::configuration("collection-size must be at least 1")),
            Ok(len) => Ok(len),
            Err(_) => Err(BenchError::configuration(format!(
                "collection-size {} exceeds {}",
                self.collection_size,
                u32::MAX
            ))),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| BenchError::configuration(format!("failed to read config '{}': {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Resolve the repetition count for one scenario.
    ///
    /// Precedence: `[scenarios.<name>]` override, global `repetitions`,
    /// the scenario's own default, then [`DEFAULT_REPETITIONS`].
    pub fn repetitions_for(&self, scenario: &str, scenario_default: Option<u32>) -> u32 {
        self.scenarios
            .get(scenario)
            .and_then(|o| o.repetitions)
            .or(self.repetitions)
            .or(scenario_default)
            .unwrap_or(DEFAULT_REPETITIONS)
    }

    pub fn baseline_for(&self, scenario: &str) -> Option<&str> {
        self.scenarios.get(scenario).and_then(|o| o.baseline.as_deref())
    }
}
