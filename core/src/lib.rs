//! Micro-benchmark harness: register equivalent variants of an operation,
//! time each one over the same workload and rank them against a baseline.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod registry;
pub mod report;
pub mod result;
pub mod runner;
pub mod timing;
pub mod workload;

#[cfg(test)]
mod runner_test;

pub use aggregate::{Ratio, SampleOutcome, VariantRatio, aggregate};
pub use config::{HarnessConfig, ScenarioOverride};
pub use error::{BenchError, MeasurementError, Result, ScenarioFailure};
pub use registry::{Variant, VariantRegistry};
pub use report::{Report, ReportBody, ReportRow, render};
pub use result::ScenarioResult;
pub use runner::{DynScenario, Phase, Scenario, ScenarioMeta, ScenarioRunner};
pub use timing::{Sample, TimingEngine};
pub use workload::Workload;
