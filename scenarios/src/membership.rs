//! Is a value present? Scan a sequence or ask a hash set.

use std::collections::HashSet;

use zenbench_core::{HarnessConfig, Result, Scenario, ScenarioMeta, VariantRegistry, Workload};

/// The same integers held twice: once in order, once hashed.
#[derive(Debug, Clone)]
pub struct MembershipWorkload {
    pub sequence: Vec<u32>,
    pub set: HashSet<u32>,
    pub target: u32,
}

impl MembershipWorkload {
    /// Integers `0..size`, looking for the last one (worst case for a scan).
    pub fn new(size: u32) -> Self {
        let sequence: Vec<u32> = (0..size).collect();
        let set = sequence.iter().copied().collect();
        let target = size.saturating_sub(1);
        Self { sequence, set, target }
    }
}

impl Workload for MembershipWorkload {
    fn summary(&self) -> String {
        format!("{} integers, target {}", self.sequence.len(), self.target)
    }
}

pub fn sequence_scan(w: &MembershipWorkload) -> bool {
    for item in &w.sequence {
        if *item == w.target {
            return true;
        }
    }
    false
}

pub fn sequence_contains(w: &MembershipWorkload) -> bool {
    w.sequence.contains(&w.target)
}

pub fn hash_lookup(w: &MembershipWorkload) -> bool {
    w.set.contains(&w.target)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MembershipTest;

impl ScenarioMeta for MembershipTest {
    fn name(&self) -> &'static str {
        "membership-test"
    }

    fn title(&self) -> &'static str {
        "Membership test: linear scan vs hash lookup"
    }
}

impl Scenario for MembershipTest {
    type Workload = MembershipWorkload;

    fn default_repetitions(&self) -> Option<u32> {
        Some(1000)
    }

    fn build(&self, config: &HarnessConfig) -> Result<MembershipWorkload> {
        Ok(MembershipWorkload::new(config.collection_len()?))
    }

    fn register(&self, registry: &mut VariantRegistry<MembershipWorkload>) -> Result<()> {
        registry.register("sequence-scan", sequence_scan)?;
        registry.register("sequence-contains", sequence_contains)?;
        registry.register("hash-lookup", hash_lookup)?;
        Ok(())
    }
}
