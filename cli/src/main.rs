//! `scenario-roi` command-line driver

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use scenario_roi_core::export::{
    comparison_table, projection_table, role_cost_table, role_hours_table, stage_cost_table,
    stage_duration_table, stage_hours_table, summary_table, Measure, DEFAULT_DELIMITER,
};
use scenario_roi_core::ingest::RawWorkflow;
use scenario_roi_core::{
    parse_workflow, run_analysis, AnalysisConfig, AnalysisReport, ComparisonTable, IngestReport,
    Table, Workflow,
};

#[derive(Parser)]
#[command(name = "scenario-roi", version, about = "Workflow scenario time, cost and ROI analysis")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default workflow in the raw record schema
    Template,
    /// Run the analysis pipeline over a workflow file
    Analyze(AnalyzeArgs),
    /// Copy one scenario's steps into another and print the updated workflow
    Copy(CopyArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Workflow JSON (raw record schema)
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Analysis config JSON (default: built-in defaults)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print a single table instead of the full report
    #[arg(long, value_enum)]
    table: Option<TableKind>,
    /// Scenario for per-scenario tables (default: the baseline)
    #[arg(long)]
    scenario: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Field delimiter for csv output
    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,
}

#[derive(Parser)]
struct CopyArgs {
    /// Workflow JSON (raw record schema)
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Source scenario
    #[arg(long)]
    from: String,
    /// Target scenario (created when missing)
    #[arg(long)]
    to: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum TableKind {
    StageHours,
    RoleHours,
    Durations,
    StageCosts,
    RoleCosts,
    StageComparison,
    RoleComparison,
    CostComparison,
    RoleCostComparison,
    Projection,
    Summary,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Template => {
            let raw = RawWorkflow::from(&Workflow::with_defaults());
            serde_json::to_writer_pretty(&mut stdout, &raw)?;
            writeln!(stdout)?;
        }
        Commands::Analyze(args) => analyze(&args, &mut stdout)?,
        Commands::Copy(args) => copy(&args, &mut stdout)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_workflow(path: &Path) -> Result<(Workflow, IngestReport)> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read workflow file: {:?}", path))?;
    let (workflow, report) =
        parse_workflow(&json).with_context(|| format!("Failed to ingest workflow: {:?}", path))?;
    if !report.is_clean() {
        tracing::warn!(
            issues = report.issues.len(),
            "Input values were adjusted during ingestion"
        );
    }
    Ok((workflow, report))
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    AnalysisConfig::from_json_str(&json)
        .with_context(|| format!("Failed to load config: {:?}", path))
}

fn analyze<W: Write>(args: &AnalyzeArgs, out: &mut W) -> Result<()> {
    let (workflow, ingest) = load_workflow(&args.input)?;
    let config = load_config(args.config.as_deref())?;
    let report = run_analysis(&workflow, &config)?;

    let Some(kind) = args.table else {
        if args.format == Format::Csv {
            bail!("--format csv needs --table");
        }
        let full = serde_json::json!({ "report": report, "ingest": ingest });
        serde_json::to_writer_pretty(&mut *out, &full)?;
        writeln!(out)?;
        return Ok(());
    };

    let table = build_table(kind, &report, args.scenario.as_deref())?;
    match args.format {
        Format::Csv => table.write_delimited(out, args.delimiter)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &table.to_json()?)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn build_table(kind: TableKind, report: &AnalysisReport, scenario: Option<&str>) -> Result<Table> {
    let comparison = |table: &Option<ComparisonTable>, measure| -> Result<Table> {
        match table {
            Some(table) => Ok(comparison_table(table, measure)),
            None => bail!("The workflow has no scenarios to compare"),
        }
    };

    let table = match kind {
        TableKind::StageComparison => comparison(&report.stage_hours, Measure::Hours)?,
        TableKind::RoleComparison => comparison(&report.role_hours, Measure::Hours)?,
        TableKind::CostComparison => comparison(&report.stage_costs, Measure::Currency)?,
        TableKind::RoleCostComparison => comparison(&report.role_costs, Measure::Currency)?,
        TableKind::Projection => projection_table(report.projection_rows()),
        TableKind::Summary => summary_table(report),
        per_scenario => {
            let name = scenario
                .or(report.baseline.as_deref())
                .context("The workflow has no scenarios")?;
            let summary = report
                .scenario(name)
                .with_context(|| format!("Scenario '{}' not found", name))?;
            match per_scenario {
                TableKind::StageHours => stage_hours_table(&summary.hours_by_stage),
                TableKind::RoleHours => role_hours_table(&summary.hours_by_role),
                TableKind::Durations => stage_duration_table(&summary.calendar_weeks),
                TableKind::StageCosts => stage_cost_table(&summary.cost_by_stage),
                _ => role_cost_table(&summary.cost_by_role),
            }
        }
    };
    Ok(table)
}

fn copy<W: Write>(args: &CopyArgs, out: &mut W) -> Result<()> {
    let (mut workflow, _) = load_workflow(&args.input)?;
    copy_steps(&mut workflow, &args.from, &args.to);
    serde_json::to_writer_pretty(&mut *out, &RawWorkflow::from(&workflow))?;
    writeln!(out)?;
    Ok(())
}

/// Copy `from` into `to`; an empty source is reported by the copier itself
fn copy_steps(workflow: &mut Workflow, from: &str, to: &str) -> Option<usize> {
    let copied = workflow.copy_scenario(from, to);
    if let Some(count) = copied {
        tracing::info!(from, to, steps = count, "Copied scenario");
    }
    copied
}
