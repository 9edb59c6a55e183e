use std::env::consts::{ARCH, OS};
use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use zenbench_core::{DynScenario, HarnessConfig, Report, ScenarioMeta};

#[derive(Debug, Serialize)]
pub struct RunRecord<'a> {
    pub generated_at: String,
    pub os: &'static str,
    pub arch: &'static str,
    pub total_secs: f64,
    pub config: &'a HarnessConfig,
    pub scenarios: &'a [Report],
}

pub fn write_banner<W: Write>(out: &mut W, config: &HarnessConfig, scenarios: usize) -> Result<()> {
    let repetitions = config
        .repetitions
        .map(|n| n.to_string())
        .unwrap_or_else(|| "per scenario".to_string());
    writeln!(out, "zenbench: {} scenario(s) on {}/{}", scenarios, OS, ARCH)?;
    writeln!(
        out,
        "repetitions: {} | warmup: {} | seed: {}\n",
        repetitions, config.warmup, config.seed
    )?;
    Ok(())
}

pub fn write_total<W: Write>(out: &mut W, total: Duration) -> Result<()> {
    writeln!(out, "total: {:.3} s", total.as_secs_f64())?;
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, config: &HarnessConfig, reports: &[Report], total: Duration) -> Result<()> {
    let record = RunRecord {
        generated_at: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        os: OS,
        arch: ARCH,
        total_secs: total.as_secs_f64(),
        config,
        scenarios: reports,
    };
    serde_json::to_writer_pretty(&mut *out, &record).context("serialize run record")?;
    writeln!(out)?;
    Ok(())
}

pub fn write_catalog<W: Write>(out: &mut W, scenarios: &[Box<dyn DynScenario>]) -> Result<()> {
    for (index, scenario) in scenarios.iter().enumerate() {
        writeln!(out, "{}. {} - {}", index + 1, scenario.name(), scenario.title())?;
        let variants = scenario
            .variant_names()
            .with_context(|| format!("list variants of '{}'", scenario.name()))?;
        for variant in variants {
            writeln!(out, "     {}", variant)?;
        }
    }
    Ok(())
}
