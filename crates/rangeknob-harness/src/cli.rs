#![forbid(unsafe_code)]

use std::io::Write as _;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::check::{CheckReport, check};
use crate::error::{HarnessError, Result};
use crate::logging::{self, LogFormat};
use crate::replay::replay;
use crate::scenario;
use crate::trace::Trace;

#[derive(Debug, Parser)]
#[command(
    name = "rangeknob-harness",
    about = "Replay and check range slider drag traces",
    version
)]
pub struct Cli {
    /// Diagnostic log format (filter with RANGEKNOB_LOG).
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a trace and print every transition and effect.
    Replay(ReplayArgs),

    /// Replay a trace and verify invariants and expected notifications.
    Check(CheckArgs),

    /// Print a built-in trace as JSON.
    Scenario(ScenarioArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Trace file (JSON).
    pub trace: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Also print a digest of the effect stream.
    #[arg(long)]
    pub hash: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Trace file (JSON).
    pub trace: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
pub struct ScenarioArgs {
    /// Scenario name.
    pub name: Option<String>,

    /// Print the available scenario names.
    #[arg(long, conflicts_with = "name")]
    pub list: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format)?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => emit(&run_replay(&args)?),
        Commands::Check(args) => {
            let report = run_check(&args)?;
            emit(&render_check(&report, args.format)?)?;
            if report.passed() {
                Ok(())
            } else {
                Err(HarnessError::CheckFailed {
                    failed: report.violations.len(),
                })
            }
        }
        Commands::Scenario(args) => emit(&run_scenario(&args)?),
    }
}

fn emit(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Replay output as it would be printed.
pub fn run_replay(args: &ReplayArgs) -> Result<String> {
    let trace = Trace::load(&args.trace)?;
    let report = replay(&trace)?;
    let mut output = match args.format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => {
            let mut json = report.to_json_pretty()?;
            json.push('\n');
            json
        }
    };
    if args.hash {
        output.push_str(&report.digest()?);
        output.push('\n');
    }
    Ok(output)
}

pub fn run_check(args: &CheckArgs) -> Result<CheckReport> {
    let trace = Trace::load(&args.trace)?;
    check(&trace)
}

fn render_check(report: &CheckReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => {
            let mut json = report.to_json_pretty()?;
            json.push('\n');
            json
        }
    })
}

pub fn run_scenario(args: &ScenarioArgs) -> Result<String> {
    if args.list {
        let mut names = scenario::NAMES.join("\n");
        names.push('\n');
        return Ok(names);
    }
    let Some(name) = args.name.as_deref() else {
        return Err(HarnessError::invalid("scenario needs a name or --list"));
    };
    let mut json = scenario::require(name)?.to_json_pretty()?;
    json.push('\n');
    Ok(json)
}
