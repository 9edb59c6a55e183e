//! Prerequisite checks run by `zenbench check` and `run --preflight`.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use zenbench_core::{DynScenario, ScenarioMeta};

const LAYOUT: &[&str] = &["Cargo.toml", "core/Cargo.toml", "scenarios/Cargo.toml", "cli/Cargo.toml"];
const CLOCK_PROBE_LIMIT: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl Check {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            detail: detail.into(),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Preflight {
    pub checks: Vec<Check>,
}

impl Preflight {
    pub fn ready(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

impl fmt::Display for Preflight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            let mark = if check.passed { "ok" } else { "FAIL" };
            writeln!(f, "[{:>4}] {}: {}", mark, check.name, check.detail)?;
        }
        let verdict = if self.ready() { "ready" } else { "not ready" };
        writeln!(f, "{}", verdict)
    }
}

pub fn run(scenarios: &[Box<dyn DynScenario>], root: Option<&Path>) -> Preflight {
    let mut checks = vec![check_clock(), check_catalog(scenarios)];
    if let Some(root) = root {
        checks.push(check_layout(root));
    }
    Preflight { checks }
}

/// The monotonic clock must advance within a bounded number of reads.
pub fn check_clock() -> Check {
    let start = Instant::now();
    let mut tick = Duration::ZERO;
    for _ in 0..CLOCK_PROBE_LIMIT {
        tick = start.elapsed();
        if !tick.is_zero() {
            break;
        }
    }
    if tick.is_zero() {
        Check::fail("clock", "monotonic clock did not advance")
    } else {
        Check::pass("clock", format!("monotonic clock advances (first tick {:?})", tick))
    }
}

pub fn check_catalog(scenarios: &[Box<dyn DynScenario>]) -> Check {
    if scenarios.is_empty() {
        return Check::fail("catalog", "no scenarios selected");
    }
    let mut seen = HashSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario.name()) {
            return Check::fail("catalog", format!("scenario '{}' appears twice", scenario.name()));
        }
        match scenario.variant_names() {
            Ok(names) if names.is_empty() => {
                return Check::fail("catalog", format!("scenario '{}' registers no variants", scenario.name()));
            }
            Ok(_) => {}
            Err(err) => {
                return Check::fail("catalog", format!("scenario '{}': {}", scenario.name(), err));
            }
        }
    }
    Check::pass("catalog", format!("{} scenario(s) registered", scenarios.len()))
}

pub fn check_layout(root: &Path) -> Check {
    let missing: Vec<&str> = LAYOUT.iter().copied().filter(|rel| !root.join(rel).is_file()).collect();
    if missing.is_empty() {
        Check::pass("layout", format!("workspace files present under {}", root.display()))
    } else {
        Check::fail("layout", format!("missing under {}: {}", root.display(), missing.join(", ")))
    }
}
