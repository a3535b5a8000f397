// src/bin/query_bench/app.rs
use anyhow::{Context as _, Result};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

use query_bench::bench::{Report, RunnerConfig, Sweep, DEFAULT_RECORD_COUNTS};
use query_bench::{BenchmarkRunner, ConnectionProvider, SqliteProvider, TimeUnit};

use crate::formatters::{self, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "query-bench")]
#[command(about = "Measure SELECT/INSERT/UPDATE/DELETE latency against a SQLite database", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Database file to benchmark
    #[arg(short, long, default_value = "bench.sqlite")]
    database: PathBuf,

    /// JSON file with runner settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Record counts to sweep (default: 5 10 50 100)
    #[arg(short, long, num_args = 1..)]
    records: Vec<usize>,

    /// Maximum concurrent update/delete chunk tasks
    #[arg(short, long)]
    workers: Option<usize>,

    /// Identifiers per update/delete chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Rows per insert transaction
    #[arg(long)]
    batch_size: Option<usize>,

    /// Row limit of the measured SELECT
    #[arg(long)]
    select_limit: Option<usize>,

    /// Unit timings are reported in
    #[arg(long, value_enum)]
    unit: Option<TimeUnit>,

    /// Fail the run when any update/delete chunk fails
    #[arg(long)]
    strict: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    /// Runner settings: defaults, then the config file, then flags
    fn runner_config(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => RunnerConfig::default(),
        };

        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(select_limit) = self.select_limit {
            config.select_limit = select_limit;
        }
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
        if self.strict {
            config.strict = true;
        }

        config.validate()?;
        Ok(config)
    }

    fn sweep(&self) -> Sweep {
        if self.records.is_empty() {
            Sweep::new(DEFAULT_RECORD_COUNTS.to_vec())
        } else {
            Sweep::new(self.records.clone())
        }
    }
}

/// Initialize env_logger with a default level derived from `-v` flags
pub fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Runs the sweep and prints the results
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.runner_config()?;
    debug!("Runner config: {:?}", config);

    let provider = SqliteProvider::new(&cli.database);
    provider
        .ensure_schema()
        .with_context(|| format!("Failed to prepare {}", cli.database.display()))?;
    let target = provider.describe();

    let runner = BenchmarkRunner::new(provider, config.clone())?;
    let sweep = cli.sweep();
    info!("Running {} suites against {}", sweep.len(), target);

    let measurements = sweep.run(&runner)?;
    let report = Report::new(target, config, measurements);

    let formatter = formatters::for_format(cli.format, !cli.no_color);
    println!("{}", formatter.format_info("Results:"));
    println!("{}", formatter.format_report(&report)?);

    Ok(())
}
