//! Pure rendering of a [`ScenarioResult`] into a ranked table.
//!
//! Rows keep registration order; speed only decides which row carries the
//! fastest marker. The same record serializes to JSON and displays as text.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::aggregate::Ratio;
use crate::result::ScenarioResult;

const FASTEST_MARKER: &str = "<- fastest";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub scenario: String,
    pub title: String,
    pub workload: String,
    pub repetitions: u32,
    pub baseline: Option<String>,
    #[serde(flatten)]
    pub body: ReportBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ReportBody {
    Ranked { rows: Vec<ReportRow> },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub elapsed_secs: Option<f64>,
    pub per_call_secs: Option<f64>,
    pub ratio: Option<Ratio>,
    pub failed: bool,
    pub fastest: bool,
    pub baseline: bool,
    pub error: Option<String>,
}

impl Report {
    pub fn is_failed(&self) -> bool {
        matches!(self.body, ReportBody::Failed { .. })
    }

    pub fn rows(&self) -> &[ReportRow] {
        match &self.body {
            ReportBody::Ranked { rows } => rows,
            ReportBody::Failed { .. } => &[],
        }
    }

    pub fn row(&self, name: &str) -> Option<&ReportRow> {
        self.rows().iter().find(|row| row.name == name)
    }
}

pub fn render(result: &ScenarioResult) -> Report {
    let body = match &result.ratios {
        Err(failure) => ReportBody::Failed {
            reason: failure.to_string(),
        },
        Ok(_) => {
            let fastest = result.fastest();
            let rows = result
                .samples
                .iter()
                .map(|(name, outcome)| match outcome {
                    Ok(sample) => ReportRow {
                        name: name.clone(),
                        elapsed_secs: Some(sample.elapsed.as_secs_f64()),
                        per_call_secs: Some(sample.per_call().as_secs_f64()),
                        ratio: result.ratio(name),
                        failed: false,
                        fastest: fastest == Some(name.as_str()),
                        baseline: result.baseline.as_deref() == Some(name.as_str()),
                        error: None,
                    },
                    Err(err) => ReportRow {
                        name: name.clone(),
                        elapsed_secs: None,
                        per_call_secs: None,
                        ratio: None,
                        failed: true,
                        fastest: false,
                        baseline: result.baseline.as_deref() == Some(name.as_str()),
                        error: Some(err.to_string()),
                    },
                })
                .collect();
            ReportBody::Ranked { rows }
        }
    };

    Report {
        scenario: result.scenario.clone(),
        title: result.title.clone(),
        workload: result.workload.clone(),
        repetitions: result.repetitions,
        baseline: result.baseline.clone(),
        body,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} | {}", self.scenario, self.title)?;
        let rows = match &self.body {
            ReportBody::Failed { reason } => return writeln!(f, "   scenario failed: {}", reason),
            ReportBody::Ranked { rows } => rows,
        };

        writeln!(
            f,
            "   workload: {} | repetitions: {} | baseline: {}",
            self.workload,
            self.repetitions,
            self.baseline.as_deref().unwrap_or("-")
        )?;

        let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max("variant".len());
        writeln!(
            f,
            "   {:<width$}  {:>12}  {:>12}  {:>12}",
            "variant", "elapsed (s)", "per call", "ratio"
        )?;
        for row in rows {
            let elapsed = match row.elapsed_secs {
                Some(secs) => format!("{:.6}", secs),
                None => "FAILED".to_string(),
            };
            let per_call = row
                .per_call_secs
                .map(|secs| format!("{:.1?}", Duration::from_secs_f64(secs)))
                .unwrap_or_else(|| "-".to_string());
            let ratio = row.ratio.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());
            write!(f, "   {:<width$}  {:>12}  {:>12}  {:>12}", row.name, elapsed, per_call, ratio)?;
            if row.fastest {
                write!(f, "  {}", FASTEST_MARKER)?;
            }
            if let Some(error) = &row.error {
                write!(f, "  {}", error)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
