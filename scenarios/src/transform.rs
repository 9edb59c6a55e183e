//! Filter and square: explicit loop vs iterator adapters.

use zenbench_core::{HarnessConfig, Result, Scenario, ScenarioMeta, VariantRegistry};

pub const LEN: u64 = 1000;

pub fn loop_push(numbers: &[u64]) -> Vec<u64> {
    let mut out = Vec::new();
    for n in numbers {
        if n % 2 == 0 {
            out.push(n * n);
        }
    }
    out
}

pub fn iterator_chain(numbers: &[u64]) -> Vec<u64> {
    numbers.iter().filter(|n| *n % 2 == 0).map(|n| n * n).collect()
}

pub fn filter_map(numbers: &[u64]) -> Vec<u64> {
    numbers.iter().filter_map(|&n| (n % 2 == 0).then_some(n * n)).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterTransform;

impl ScenarioMeta for FilterTransform {
    fn name(&self) -> &'static str {
        "filter-transform"
    }

    fn title(&self) -> &'static str {
        "Filter and transform: push loop vs iterator adapters"
    }
}

impl Scenario for FilterTransform {
    type Workload = Vec<u64>;

    fn default_repetitions(&self) -> Option<u32> {
        Some(1000)
    }

    fn build(&self, _config: &HarnessConfig) -> Result<Vec<u64>> {
        Ok((0..LEN).collect())
    }

    fn register(&self, registry: &mut VariantRegistry<Vec<u64>>) -> Result<()> {
        registry.register("loop-push", |w: &Vec<u64>| loop_push(w))?;
        registry.register("iterator-chain", |w: &Vec<u64>| iterator_chain(w))?;
        registry.register("filter-map", |w: &Vec<u64>| filter_map(w))?;
        Ok(())
    }
}
