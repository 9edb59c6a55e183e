use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use std::time::Instant;

static TRACE_INIT: Once = Once::new();
const DEFAULT_TRACE_FILTER: &str = "zenbench::cli=debug,zenbench::runner=debug,zenbench::timing=info,zenbench::scenarios=debug";
const INTERRUPT_MESSAGE: &str = "Interrupted by user.";

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use zenbench_core::registry::panic_message;
use zenbench_core::{DynScenario, HarnessConfig, ScenarioMeta, ScenarioRunner};

mod lessons;
mod output;
mod preflight;

#[derive(Debug, Parser)]
#[command(
    name = "zenbench",
    author,
    version,
    about = "Idiomatic vs naive Rust, timed side by side",
    long_about = None,
    after_help = "With no subcommand every scenario runs with default settings."
)]
struct CliArgs {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Args)]
struct RunArgs {
    /// Run only this scenario (repeatable); catalog order is kept
    #[arg(long = "only", value_name = "SCENARIO")]
    only: Vec<String>,

    /// Repetitions per timed window for every scenario
    #[arg(long, value_name = "N")]
    repetitions: Option<u32>,

    /// Untimed calls before each timed window
    #[arg(long, value_name = "N")]
    warmup: Option<u32>,

    /// Seed for pseudo-random workloads
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// TOML file with harness settings; flags override it
    #[arg(long, value_name = "FILE", value_parser = parse_sanitized_path)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Refuse to run unless the prerequisite check passes
    #[arg(long)]
    preflight: bool,

    /// Workspace root whose file layout --preflight also verifies
    #[arg(long, value_name = "DIR", value_parser = parse_sanitized_path, requires = "preflight")]
    root: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the predefined scenarios and print a ranked table for each.
    Run(RunArgs),
    /// List scenarios in run order with their variants.
    List,
    /// Check that the harness is ready to produce meaningful timings.
    Check {
        /// Workspace root whose file layout should be verified
        #[arg(long, value_name = "DIR", value_parser = parse_sanitized_path)]
        root: Option<PathBuf>,
    },
    /// Print the before/after lessons behind each scenario.
    Lessons {
        /// Show a single lesson topic
        #[arg(value_name = "TOPIC")]
        topic: Option<String>,
    },
}

fn sanitize_path(raw: &str) -> anyhow::Result<PathBuf> {
    let p = Path::new(raw);

    for comp in p.components() {
        if matches!(comp, Component::ParentDir) {
            return Err(anyhow::anyhow!(
                "Parent directory components ('..') are not allowed in file paths."
            ));
        }
    }

    Ok(p.to_path_buf())
}

fn parse_sanitized_path(raw: &str) -> Result<PathBuf, String> {
    sanitize_path(raw).map_err(|e| e.to_string())
}

fn env_toggle_enabled(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    !(trimmed.eq_ignore_ascii_case("0") || trimmed.eq_ignore_ascii_case("false") || trimmed.eq_ignore_ascii_case("off"))
}

fn filter_expr_from(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("1")
        || trimmed.eq_ignore_ascii_case("true")
        || trimmed.eq_ignore_ascii_case("on")
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Tracing stays off unless `ZENBENCH_TRACE` is set. Its value is either a
/// toggle (`1`, `on`, ...) or an `EnvFilter` expression.
fn maybe_init_tracing() {
    let raw = match std::env::var("ZENBENCH_TRACE") {
        Ok(value) => value,
        Err(_) => return,
    };

    if !env_toggle_enabled(&raw) {
        return;
    }

    TRACE_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        let filter_expr = filter_expr_from(&raw).or_else(|| std::env::var("RUST_LOG").ok());

        let builder = fmt().with_writer(std::io::stderr);

        let builder = match filter_expr.and_then(|expr| EnvFilter::try_new(expr).ok()) {
            Some(filter) => builder.with_env_filter(filter),
            None => builder.with_env_filter(DEFAULT_TRACE_FILTER),
        };

        let _ = builder.try_init();
    });
}

fn install_interrupt_handler() {
    if let Err(e) = ctrlc::set_handler(|| {
        eprintln!("\n{}", INTERRUPT_MESSAGE);
        std::process::exit(1);
    }) {
        eprintln!("Warning: could not install interrupt handler: {}", e);
    }
}

fn build_config(args: &RunArgs) -> anyhow::Result<HarnessConfig> {
    let mut config = match &args.config {
        Some(path) => HarnessConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))?,
        None => HarnessConfig::default(),
    };
    if let Some(repetitions) = args.repetitions {
        config.repetitions = Some(repetitions);
    }
    if let Some(warmup) = args.warmup {
        config.warmup = warmup;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

pub(crate) fn select_scenarios(only: &[String]) -> anyhow::Result<Vec<Box<dyn DynScenario>>> {
    let all = zenbench_scenarios::catalog();
    if only.is_empty() {
        return Ok(all);
    }
    for name in only {
        if !all.iter().any(|s| s.name() == name) {
            bail!("Unknown scenario '{}'. Use `zenbench list` to see what is available.", name);
        }
    }
    Ok(all
        .into_iter()
        .filter(|s| only.iter().any(|name| name == s.name()))
        .collect())
}

fn run_scenarios(args: &RunArgs) -> anyhow::Result<ExitCode> {
    let config = build_config(args)?;
    let scenarios = select_scenarios(&args.only)?;
    tracing::debug!(target: "zenbench::cli", scenarios = scenarios.len(), ?config, "starting run");

    if args.preflight {
        let report = preflight::run(&scenarios, args.root.as_deref());
        if !report.ready() {
            eprint!("{}", report);
            bail!("prerequisite check failed; no scenarios were run");
        }
    }

    let runner = ScenarioRunner::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let start = Instant::now();
    match args.format {
        OutputFormat::Text => {
            output::write_banner(&mut out, runner.config(), scenarios.len())?;
            for scenario in &scenarios {
                let report = scenario.execute(&runner);
                writeln!(out, "{}", report)?;
                out.flush()?;
            }
            output::write_total(&mut out, start.elapsed())?;
        }
        OutputFormat::Json => {
            let reports = runner.run_all(&scenarios);
            output::write_json(&mut out, runner.config(), &reports, start.elapsed())?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_cli(args: CliArgs) -> anyhow::Result<ExitCode> {
    let command = args.command.unwrap_or(Commands::Run(RunArgs::default()));
    let stdout = io::stdout();
    match command {
        Commands::Run(run) => run_scenarios(&run),
        Commands::List => {
            output::write_catalog(&mut stdout.lock(), &zenbench_scenarios::catalog())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { root } => {
            let report = preflight::run(&zenbench_scenarios::catalog(), root.as_deref());
            print!("{}", report);
            Ok(if report.ready() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Lessons { topic } => {
            lessons::render(&mut stdout.lock(), topic.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    maybe_init_tracing();
    install_interrupt_handler();

    // Caught panics surface as report rows or an `Error:` line instead.
    panic::set_hook(Box::new(|info| tracing::debug!(target: "zenbench::cli", "{}", info)));

    let args = CliArgs::parse();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| run_cli(args)))
        .unwrap_or_else(|payload| Err(anyhow::anyhow!("panicked: {}", panic_message(payload.as_ref()))));
    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
