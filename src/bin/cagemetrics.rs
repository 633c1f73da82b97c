//! Cagemetrics CLI - Command-line interface for behavior summarization
//!
//! Commands:
//! - init: Create a project folder with an initial config
//! - process: Turn a supervised table mapping into the summary workbooks
//! - validate: Check a table mapping against the collaborator schema
//! - schema: Print the expected collaborator column set

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cagemetrics::pipeline::{DEFAULT_DURATION_FILE, DEFAULT_FREQUENCY_FILE};
use cagemetrics::schema::{self, BehaviorCatalog};
use cagemetrics::types::SupervisedTables;
use cagemetrics::{
    cache, BehaviorPipeline, ProcessError, ProjectSession, CAGEMETRICS_VERSION,
};

/// Cagemetrics - behavior-table summarization for paired-mouse recordings
#[derive(Parser)]
#[command(name = "cagemetrics")]
#[command(version = CAGEMETRICS_VERSION)]
#[command(about = "Summarize supervised behavior tables into spreadsheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a project folder with videos/, tables/, and config.yaml
    Init {
        /// Project name, used as the folder name
        name: String,

        /// Directory to create the project folder in
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
    },

    /// Process a supervised table mapping into the two summary workbooks
    Process {
        /// Input file with the table mapping (defaults to the project cache)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Project folder; derives input and output paths from the session
        #[arg(long)]
        project: Option<PathBuf>,

        /// Input format
        #[arg(long, default_value = "cache")]
        input_format: InputFormat,

        /// Output path for the frequency workbook
        #[arg(long)]
        frequencies: Option<PathBuf>,

        /// Output path for the duration workbook
        #[arg(long)]
        durations: Option<PathBuf>,
    },

    /// Validate a table mapping against the collaborator schema
    Validate {
        /// Input file with the table mapping
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "cache")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the expected collaborator column set
    Schema {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Table cache envelope written by `cagemetrics` (supervised_data.json)
    Cache,
    /// Bare cage -> table JSON mapping
    Json,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn run(cli: Cli) -> Result<(), MetricsCliError> {
    match cli.command {
        Commands::Init { name, base_dir } => cmd_init(&name, &base_dir),

        Commands::Process {
            input,
            project,
            input_format,
            frequencies,
            durations,
        } => cmd_process(
            input.as_deref(),
            project.as_deref(),
            input_format,
            frequencies.as_deref(),
            durations.as_deref(),
        ),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Schema { json } => cmd_schema(json),
    }
}

fn cmd_init(name: &str, base_dir: &Path) -> Result<(), MetricsCliError> {
    let session = ProjectSession::create(base_dir, name)?;

    println!("Project created at {}", session.root().display());
    println!("  config: {}", session.config_path().display());
    println!(
        "  videos: {}",
        session.config().video_path.display()
    );
    println!(
        "  tables: {}",
        session.config().table_path.display()
    );

    Ok(())
}

fn cmd_process(
    input: Option<&Path>,
    project: Option<&Path>,
    input_format: InputFormat,
    frequencies: Option<&Path>,
    durations: Option<&Path>,
) -> Result<(), MetricsCliError> {
    let session = project.map(ProjectSession::open).transpose()?;

    let input_path = match (input, &session) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(session)) => session.cache_path(),
        (None, None) => return Err(MetricsCliError::NoInput),
    };

    let frequency_path = frequencies
        .map(Path::to_path_buf)
        .or_else(|| session.as_ref().map(|s| s.frequency_report_path()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FREQUENCY_FILE));
    let duration_path = durations
        .map(Path::to_path_buf)
        .or_else(|| session.as_ref().map(|s| s.duration_report_path()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DURATION_FILE));

    let tables = read_tables(&input_path, &input_format)?;
    if tables.is_empty() {
        return Err(MetricsCliError::NoCages);
    }

    let reports = BehaviorPipeline::new().process_and_save(
        &tables,
        &frequency_path,
        &duration_path,
    )?;

    println!(
        "Processed {} cages into {} rows",
        tables.len(),
        reports.frequency.rows.len()
    );
    println!("  frequencies: {}", frequency_path.display());
    println!("  durations:   {}", duration_path.display());

    Ok(())
}

fn cmd_validate(
    input: &Path,
    input_format: InputFormat,
    json: bool,
) -> Result<(), MetricsCliError> {
    let tables = read_tables(input, &input_format)?;
    let catalog = BehaviorCatalog::default();

    let mut errors: Vec<CageErrorDetail> = Vec::new();
    for (cage, table) in &tables {
        let mut cage_errors = Vec::new();
        if table.check_shape().is_err() || table.frame_count() == 0 {
            cage_errors.push("table has no frames or ragged columns".to_string());
        }
        for column in schema::missing_columns(table, &catalog) {
            cage_errors.push(format!("missing column {}", column));
        }
        if !cage_errors.is_empty() {
            errors.push(CageErrorDetail {
                cage: cage.clone(),
                errors: cage_errors,
            });
        }
    }

    let report = ValidationReport {
        total_cages: tables.len(),
        valid_cages: tables.len() - errors.len(),
        invalid_cages: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total cages:   {}", report.total_cages);
        println!("Valid cages:   {}", report.valid_cages);
        println!("Invalid cages: {}", report.invalid_cages);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for detail in &report.errors {
                for error in &detail.errors {
                    println!("  - {}: {}", detail.cage, error);
                }
            }
        }
    }

    if report.invalid_cages > 0 {
        Err(MetricsCliError::ValidationFailed(report.invalid_cages))
    } else {
        Ok(())
    }
}

fn cmd_schema(json: bool) -> Result<(), MetricsCliError> {
    let catalog = BehaviorCatalog::default();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&catalog.expected_columns())?
        );
        return Ok(());
    }

    println!("Expected collaborator columns");
    println!();
    println!("Speed traces:");
    println!("  individual{{1,2}}_speed");
    println!();
    println!("Solo behaviors (per individual):");
    for behavior in &catalog.solo {
        println!("  individual{{1,2}}_{}", behavior);
    }
    println!();
    println!("Directed interactions (per ordered pairing, actor first):");
    for behavior in &catalog.interactions {
        println!("  individual{{1,2}}_individual{{2,1}}_{}", behavior);
    }
    println!();
    println!("Mutual pair behaviors:");
    for behavior in &catalog.mutual {
        println!("  individual1_individual2_{}", behavior);
    }

    Ok(())
}

fn read_tables(path: &Path, format: &InputFormat) -> Result<SupervisedTables, MetricsCliError> {
    match format {
        InputFormat::Cache => Ok(cache::load_tables(path)?),
        InputFormat::Json => {
            let content = fs::read_to_string(path)?;
            Ok(schema::parse_tables(&content)?)
        }
    }
}

// CLI error types

#[derive(Debug)]
enum MetricsCliError {
    Io(std::io::Error),
    Process(ProcessError),
    Json(serde_json::Error),
    NoInput,
    NoCages,
    ValidationFailed(usize),
}

impl From<std::io::Error> for MetricsCliError {
    fn from(e: std::io::Error) -> Self {
        MetricsCliError::Io(e)
    }
}

impl From<ProcessError> for MetricsCliError {
    fn from(e: ProcessError) -> Self {
        MetricsCliError::Process(e)
    }
}

impl From<serde_json::Error> for MetricsCliError {
    fn from(e: serde_json::Error) -> Self {
        MetricsCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<MetricsCliError> for CliError {
    fn from(e: MetricsCliError) -> Self {
        match e {
            MetricsCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            MetricsCliError::Process(e) => CliError {
                code: "PROCESS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'cagemetrics validate' for a full schema report".to_string()),
            },
            MetricsCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            MetricsCliError::NoInput => CliError {
                code: "NO_INPUT".to_string(),
                message: "No input file and no project folder given".to_string(),
                hint: Some("Pass --input <tables.json> or --project <dir>".to_string()),
            },
            MetricsCliError::NoCages => CliError {
                code: "NO_CAGES".to_string(),
                message: "Input contains no cage tables".to_string(),
                hint: Some("Ensure the collaborator run produced tables".to_string()),
            },
            MetricsCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} cages failed validation", count),
                hint: Some("Fix the reported columns and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_cages: usize,
    valid_cages: usize,
    invalid_cages: usize,
    errors: Vec<CageErrorDetail>,
}

#[derive(serde::Serialize)]
struct CageErrorDetail {
    cage: String,
    errors: Vec<String>,
}
