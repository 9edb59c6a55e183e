//! Counting word frequencies.

use std::collections::HashMap;

use rustc_hash::FxHashMap;
use zenbench_core::{HarnessConfig, Result, Scenario, ScenarioMeta, VariantRegistry, Workload};

const PATTERN: [&str; 6] = ["a", "b", "a", "c", "b", "a"];
pub const PATTERN_REPEATS: usize = 100;

#[derive(Debug, Clone)]
pub struct CountingWorkload {
    pub words: Vec<&'static str>,
}

impl CountingWorkload {
    pub fn new(repeats: usize) -> Self {
        Self {
            words: PATTERN.repeat(repeats),
        }
    }
}

impl Workload for CountingWorkload {
    fn summary(&self) -> String {
        let mut distinct = self.words.clone();
        distinct.sort_unstable();
        distinct.dedup();
        format!("{} words, {} distinct", self.words.len(), distinct.len())
    }
}

pub fn get_then_insert(w: &CountingWorkload) -> HashMap<&'static str, usize> {
    let mut counts = HashMap::new();
    for word in &w.words {
        let current = counts.get(word).copied().unwrap_or(0);
        counts.insert(*word, current + 1);
    }
    counts
}

pub fn entry_api(w: &CountingWorkload) -> HashMap<&'static str, usize> {
    let mut counts = HashMap::new();
    for word in &w.words {
        *counts.entry(*word).or_insert(0) += 1;
    }
    counts
}

pub fn fx_entry_api(w: &CountingWorkload) -> FxHashMap<&'static str, usize> {
    let mut counts = FxHashMap::default();
    for word in &w.words {
        *counts.entry(*word).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyCount;

impl ScenarioMeta for FrequencyCount {
    fn name(&self) -> &'static str {
        "frequency-count"
    }

    fn title(&self) -> &'static str {
        "Frequency count: get-then-insert vs entry API"
    }
}

impl Scenario for FrequencyCount {
    type Workload = CountingWorkload;

    fn default_repetitions(&self) -> Option<u32> {
        Some(1000)
    }

    fn build(&self, _config: &HarnessConfig) -> Result<CountingWorkload> {
        Ok(CountingWorkload::new(PATTERN_REPEATS))
    }

    fn register(&self, registry: &mut VariantRegistry<CountingWorkload>) -> Result<()> {
        registry.register("get-then-insert", get_then_insert)?;
        registry.register("entry-api", entry_api)?;
        registry.register("fx-entry-api", fx_entry_api)?;
        Ok(())
    }
}
