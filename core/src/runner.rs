use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use crate::aggregate::{SampleOutcome, aggregate};
use crate::config::HarnessConfig;
use crate::error::{BenchError, Result, ScenarioFailure};
use crate::registry::{VariantRegistry, panic_message};
use crate::report::{self, Report};
use crate::result::ScenarioResult;
use crate::timing::TimingEngine;
use crate::workload::Workload;

/// Name and title shared by typed and type-erased scenarios.
pub trait ScenarioMeta {
    /// Stable kebab-case key, e.g. `membership-test`.
    fn name(&self) -> &'static str;
    fn title(&self) -> &'static str;
}

/// A named comparison of several variants over one workload.
pub trait Scenario: ScenarioMeta {
    type Workload: Workload;

    /// Repetitions used when the config does not pin a count.
    fn default_repetitions(&self) -> Option<u32> {
        None
    }

    /// Explicit baseline; `None` means the first registered variant.
    fn baseline(&self) -> Option<&'static str> {
        None
    }

    /// Construct the workload. Invalid settings are a configuration error.
    fn build(&self, config: &HarnessConfig) -> Result<Self::Workload>;

    fn register(&self, registry: &mut VariantRegistry<Self::Workload>) -> Result<()>;
}

/// Object-safe view of a [`Scenario`] so a catalog can mix workload types.
pub trait DynScenario: ScenarioMeta {
    fn execute(&self, runner: &ScenarioRunner) -> Report;

    /// Variant names in registration order.
    fn variant_names(&self) -> Result<Vec<String>>;
}

impl<S: Scenario> DynScenario for S {
    fn execute(&self, runner: &ScenarioRunner) -> Report {
        runner.execute(self)
    }

    fn variant_names(&self) -> Result<Vec<String>> {
        let mut registry = VariantRegistry::new();
        self.register(&mut registry)?;
        Ok(registry.names().into_iter().map(str::to_string).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Build,
    Register,
    Measure,
    Aggregate,
    Report,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Build => "build",
            Phase::Register => "register",
            Phase::Measure => "measure",
            Phase::Aggregate => "aggregate",
            Phase::Report => "report",
            Phase::Done => "done",
            Phase::Failed => "failed",
        };
        f.write_str(label)
    }
}

fn enter(scenario: &str, phase: Phase) {
    debug!(target: "zenbench::runner", scenario, %phase, "entering phase");
}

/// Drives scenarios one at a time on the calling thread.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: HarnessConfig,
    engine: TimingEngine,
}

impl ScenarioRunner {
    pub fn new(config: HarnessConfig) -> Self {
        let engine = TimingEngine::new(config.warmup);
        Self { config, engine }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// BUILD through AGGREGATE.
    ///
    /// Configuration problems return `Err` straight away. Measurement
    /// failures are recorded per variant and never stop the siblings.
    pub fn run<S: Scenario + ?Sized>(&self, scenario: &S) -> Result<ScenarioResult> {
        let name = scenario.name();
        let repetitions = self.config.repetitions_for(name, scenario.default_repetitions());

        enter(name, Phase::Build);
        let workload = scenario.build(&self.config)?;

        enter(name, Phase::Register);
        let mut registry = VariantRegistry::new();
        scenario.register(&mut registry)?;
        if registry.is_empty() {
            return Err(BenchError::configuration(format!(
                "scenario '{}' registered no variants",
                name
            )));
        }
        let explicit = self.config.baseline_for(name).or(scenario.baseline());
        let baseline = registry.resolve_baseline(explicit)?;
        registry.freeze();

        enter(name, Phase::Measure);
        let mut samples: Vec<(String, SampleOutcome)> = Vec::with_capacity(registry.len());
        for variant in registry.list() {
            let outcome = match self.engine.run(variant, &workload, repetitions) {
                Ok(sample) => Ok(sample),
                Err(BenchError::Measurement(err)) => {
                    warn!(target: "zenbench::runner", scenario = name, "{}", err);
                    Err(err)
                }
                Err(err) => return Err(err),
            };
            samples.push((variant.name().to_string(), outcome));
        }

        let ratios = if samples.iter().all(|(_, outcome)| outcome.is_err()) {
            enter(name, Phase::Failed);
            Err(ScenarioFailure::AllVariantsFailed { count: samples.len() })
        } else {
            enter(name, Phase::Aggregate);
            aggregate(&samples, &baseline)
        };

        Ok(ScenarioResult {
            scenario: name.to_string(),
            title: scenario.title().to_string(),
            workload: workload.summary(),
            repetitions,
            baseline: Some(baseline),
            samples,
            ratios,
        })
    }

    /// Full lifecycle for one scenario. Always yields a report: either a
    /// ranked table or a "scenario failed" notice. A panic in scenario code
    /// is contained here so later scenarios still run.
    pub fn execute<S: Scenario + ?Sized>(&self, scenario: &S) -> Report {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| self.run(scenario))) {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(err)) => Err(ScenarioFailure::Configuration {
                message: err.to_string(),
            }),
            Err(payload) => Err(ScenarioFailure::Panicked {
                message: panic_message(payload.as_ref()),
            }),
        };
        let result = match outcome {
            Ok(result) => result,
            Err(failure) => {
                enter(scenario.name(), Phase::Failed);
                warn!(target: "zenbench::runner", scenario = scenario.name(), "{}", failure);
                ScenarioResult::aborted(scenario.name(), scenario.title(), failure)
            }
        };

        if !result.is_failed() {
            enter(scenario.name(), Phase::Report);
        }
        let report = report::render(&result);
        if !result.is_failed() {
            enter(scenario.name(), Phase::Done);
        }
        info!(
            target: "zenbench::runner",
            scenario = scenario.name(),
            failed = report.is_failed(),
            "scenario finished"
        );
        report
    }

    /// Execute every scenario in catalog order.
    pub fn run_all(&self, scenarios: &[Box<dyn DynScenario>]) -> Vec<Report> {
        scenarios.iter().map(|scenario| scenario.execute(self)).collect()
    }
}
