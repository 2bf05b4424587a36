//! tabsample CLI: preview the schema and a row sample of a delimited dataset.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tabsample_core::config::SamplerConfig;
use tabsample_core::datasource::SourceDocument;
use tabsample_sampler::stream::Row;
use tabsample_sampler::{sample, sample_all, with_num_rows, SamplerRegistry, SamplingOpt};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabsample")]
#[command(about = "Sample rows and infer schemas from delimited text in object storage", long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer the schema from the first eligible file's header
    Schema {
        /// Path to the YAML source document (format + location)
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Stream a row sample as JSON arrays, one per line
    Rows {
        /// Path to the YAML source document (format + location)
        #[arg(short, long)]
        source: PathBuf,

        /// Total rows to sample across all files
        #[arg(short = 'n', long, conflicts_with = "all")]
        num_rows: Option<usize>,

        /// Sample every row of every file
        #[arg(long)]
        all: bool,

        /// Rows buffered between the sampler and the writer (overrides config)
        #[arg(long)]
        capacity: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Logs go to stderr so stdout stays clean for JSON output.
fn init_logging(level: LogLevel) {
    let default = Level::from(level).to_string().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let result = match cli.command {
        Commands::Schema { source } => print_schema(&source),
        Commands::Rows {
            source,
            num_rows,
            all,
            capacity,
        } => print_rows(&source, sampling_opts(num_rows, all), capacity),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn sampling_opts(num_rows: Option<usize>, all: bool) -> Vec<SamplingOpt> {
    let mut opts = Vec::new();
    if let Some(n) = num_rows {
        opts.push(with_num_rows(n));
    }
    if all {
        opts.push(sample_all());
    }
    opts
}

fn load_source(path: &Path) -> Result<SourceDocument, Box<dyn std::error::Error>> {
    let yaml = fs::read_to_string(path)?;
    Ok(SourceDocument::from_yaml_str(&yaml)?)
}

fn print_schema(source: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_source(source)?;
    let cfg = SamplerConfig::from_env();
    let sampler = SamplerRegistry::with_defaults().create(&doc.format, &doc.location, &cfg)?;

    let schema = sampler.sample_schema()?;
    info!(fields = schema.len(), dir = %doc.location.full_dir_path(), "sampled schema");

    println!("{}", serde_json::to_string_pretty(&schema)?);
    println!("fingerprint: {}", schema.fingerprint()?);
    Ok(())
}

fn print_rows(
    source: &Path,
    opts: Vec<SamplingOpt>,
    capacity: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_source(source)?;
    let cfg = SamplerConfig::from_env();
    let sampler = SamplerRegistry::with_defaults().create(&doc.format, &doc.location, &cfg)?;

    let result = sample(sampler, capacity.unwrap_or(cfg.channel_capacity), opts)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", serde_json::to_string(&result.schema.names())?)?;

    let mut rows = result.rows;
    let mut count = 0usize;
    for row in rows.by_ref() {
        writeln!(out, "{}", row_to_json(&row))?;
        count += 1;
    }
    rows.finish()?;
    info!(rows = count, "sampled rows");
    Ok(())
}

fn row_to_json(row: &Row) -> serde_json::Value {
    serde_json::Value::Array(
        row.iter()
            .map(|cell| serde_json::Value::String(String::from_utf8_lossy(cell).into_owned()))
            .collect(),
    )
}
