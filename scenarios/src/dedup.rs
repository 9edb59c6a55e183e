//! Removing duplicates from a list of small integers.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use zenbench_core::{HarnessConfig, Result, Scenario, ScenarioMeta, VariantRegistry, Workload};

pub const LEN: usize = 1000;
pub const MAX_VALUE: u32 = 100;

#[derive(Debug, Clone)]
pub struct DedupWorkload {
    pub values: Vec<u32>,
    pub seed: u64,
}

impl DedupWorkload {
    /// `len` values in `0..=max`, reproducible for a given seed.
    pub fn seeded(len: usize, max: u32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let values = (0..len).map(|_| rng.gen_range(0..=max)).collect();
        Self { values, seed }
    }
}

impl Workload for DedupWorkload {
    fn summary(&self) -> String {
        format!("{} integers in 0..={} (seed {})", self.values.len(), MAX_VALUE, self.seed)
    }
}

pub fn linear_dedup(w: &DedupWorkload) -> Vec<u32> {
    let mut unique = Vec::new();
    for value in &w.values {
        if !unique.contains(value) {
            unique.push(*value);
        }
    }
    unique
}

/// Order of the result is unspecified.
pub fn hash_dedup(w: &DedupWorkload) -> Vec<u32> {
    w.values.iter().copied().collect::<HashSet<_>>().into_iter().collect()
}

/// Keeps first-occurrence order.
pub fn ordered_hash_dedup(w: &DedupWorkload) -> Vec<u32> {
    let mut seen = HashSet::with_capacity(w.values.len());
    w.values.iter().copied().filter(|v| seen.insert(*v)).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplication;

impl ScenarioMeta for Deduplication {
    fn name(&self) -> &'static str {
        "deduplication"
    }

    fn title(&self) -> &'static str {
        "Deduplication: contains-check loop vs hash set"
    }
}

impl Scenario for Deduplication {
    type Workload = DedupWorkload;

    fn default_repetitions(&self) -> Option<u32> {
        Some(100)
    }

    fn build(&self, config: &HarnessConfig) -> Result<DedupWorkload> {
        debug!(target: "zenbench::scenarios", seed = config.seed, "seeding deduplication workload");
        Ok(DedupWorkload::seeded(LEN, MAX_VALUE, config.seed))
    }

    fn register(&self, registry: &mut VariantRegistry<DedupWorkload>) -> Result<()> {
        registry.register("linear-dedup", linear_dedup)?;
        registry.register("hash-dedup", hash_dedup)?;
        registry.register("ordered-hash-dedup", ordered_hash_dedup)?;
        Ok(())
    }
}
