use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;

use kira_lesioncal::config::{TableFile, load_table};
use kira_lesioncal::error::CalibrationError;
use kira_lesioncal::input::{InputError, InputFormat, ScoreRecord, load_scores};
use kira_lesioncal::model::{
    AdjustmentTable, CalibrationProfile, ClassCatalog, ClassInfo, ProfilePreset,
};
use kira_lesioncal::pipeline::Pipeline;
use kira_lesioncal::pipeline::stage5_report::{RecordOutcome, Stage5Input, write_reports};

#[derive(Parser, Debug)]
#[command(name = "kira-lesioncal")]
#[command(version)]
#[command(about = "Calibrate, rebalance and rank skin-lesion classifier outputs", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calibrate a batch of exported score vectors and write reports
    Run(RunArgs),

    /// Print the builtin class catalog and adjustment table as JSON
    Catalog,
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Score file (.tsv, .json, optionally .gz)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    out: PathBuf,

    /// Profile preset supplying defaults
    #[arg(long, value_enum, default_value_t = PresetArg::Default)]
    preset: PresetArg,

    /// Softmax temperature (overrides the preset)
    #[arg(short, long)]
    temperature: Option<f64>,

    /// Number of ranked classes per prediction (overrides the preset)
    #[arg(long)]
    top_n: Option<usize>,

    /// Adjustment table JSON (defaults to the builtin HAM10000 table)
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,

    /// Skip class rebalancing
    #[arg(long)]
    no_rebalance: bool,

    /// Input format; inferred from the file name when omitted
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    Default,
    Serving,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Auto,
    Tsv,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("configuration: {0}")]
    Config(#[from] CalibrationError),
    #[error("record '{id}': {source}")]
    Record {
        id: String,
        #[source]
        source: CalibrationError,
    },
    #[error("writing reports: {0}")]
    Io(#[from] std::io::Error),
    #[error("serializing catalog: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    kira_lesioncal::logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Run(args) => run_batch(&args),
        Commands::Catalog => {
            println!("{}", render_catalog()?);
            Ok(())
        }
    }
}

fn run_batch(args: &RunArgs) -> Result<(), CliError> {
    let pipeline = build_pipeline(args)?;
    let records = load_scores(&args.input, input_format(args.format), pipeline.catalog())?;
    let outcomes = predict_all(&pipeline, &records)?;

    let input = Stage5Input {
        outcomes: &outcomes,
        pipeline: &pipeline,
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&input, &args.out)?;
    Ok(())
}

fn build_profile(args: &RunArgs) -> CalibrationProfile {
    let preset = match args.preset {
        PresetArg::Default => ProfilePreset::Default,
        PresetArg::Serving => ProfilePreset::Serving,
    };
    let mut profile = CalibrationProfile::from_preset(preset);
    if let Some(t) = args.temperature {
        profile.temperature = t;
    }
    if let Some(n) = args.top_n {
        profile.top_n = n;
    }
    if args.no_rebalance {
        profile.rebalance = false;
    }
    profile
}

fn build_pipeline(args: &RunArgs) -> Result<Pipeline, CliError> {
    let catalog = ClassCatalog::ham10000();
    let table = match &args.table {
        Some(path) => load_table(path, &catalog)?,
        None => AdjustmentTable::ham10000_v1(&catalog)?,
    };
    Ok(Pipeline::new(catalog, table, build_profile(args))?)
}

fn input_format(arg: FormatArg) -> Option<InputFormat> {
    match arg {
        FormatArg::Auto => None,
        FormatArg::Tsv => Some(InputFormat::Tsv),
        FormatArg::Json => Some(InputFormat::Json),
    }
}

/// Stops at the first failing record: a bad record means the model and
/// the calibration tables disagree, not a per-image problem.
fn predict_all(pipeline: &Pipeline, records: &[ScoreRecord]) -> Result<Vec<RecordOutcome>, CliError> {
    let mut outcomes = Vec::with_capacity(records.len());
    for record in records {
        let prediction = pipeline
            .predict(&record.scores)
            .map_err(|source| CliError::Record {
                id: record.id.clone(),
                source,
            })?;
        outcomes.push(RecordOutcome {
            id: record.id.clone(),
            prediction,
        });
    }
    Ok(outcomes)
}

#[derive(Serialize)]
struct CatalogDump<'a> {
    classes: Vec<&'a ClassInfo>,
    table: TableFile,
    profile: CalibrationProfile,
}

fn render_catalog() -> Result<String, CliError> {
    let catalog = ClassCatalog::ham10000();
    let table = AdjustmentTable::ham10000_v1(&catalog)?;
    let dump = CatalogDump {
        classes: catalog.iter().collect(),
        table: TableFile::from_table(&table),
        profile: CalibrationProfile::default_v1(),
    };
    Ok(serde_json::to_string_pretty(&dump)?)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
