pub mod counting;
pub mod dedup;
pub mod membership;
pub mod narrative;
pub mod string_assembly;
pub mod transform;

#[cfg(test)]
mod counting_test;

use zenbench_core::DynScenario;

pub use counting::FrequencyCount;
pub use dedup::Deduplication;
pub use membership::MembershipTest;
pub use string_assembly::StringAssembly;
pub use transform::FilterTransform;

/// Every predefined scenario, in the order `zenbench` runs them:
/// membership-test, string-assembly, deduplication, filter-transform,
/// frequency-count.
pub fn catalog() -> Vec<Box<dyn DynScenario>> {
    vec![
        Box::new(MembershipTest),
        Box::new(StringAssembly),
        Box::new(Deduplication),
        Box::new(FilterTransform),
        Box::new(FrequencyCount),
    ]
}
