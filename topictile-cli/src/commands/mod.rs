//! CLI command implementations

use crate::config::CliConfig;
use crate::input::CsvDataset;
use crate::output::{create_formatter, OutputFormat, OutputFormatter};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use topictile_core::{Algorithm, DatasetSelector, Embedder, SegmentationConfig};

pub mod evaluate;
pub mod generate_config;
pub mod list;
pub mod segment;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment a dataset and score the result with Pk and WinDiff
    Evaluate(evaluate::EvaluateArgs),

    /// Segment a dataset and print the predicted boundaries
    Segment(segment::SegmentArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List known datasets
    Datasets,

    /// List segmentation algorithms
    Algorithms,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Evaluate(args) => args.execute(),
            Commands::Segment(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => list::execute(*subcommand),
        }
    }
}

/// Arguments shared by the commands that run a segmentation algorithm
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Dataset to load (ami, icsi, test)
    #[arg(short, long, value_name = "NAME")]
    pub dataset: DatasetSelector,

    /// Segmentation algorithm
    #[arg(short, long, value_name = "NAME", default_value = "texttiling-lexical")]
    pub algorithm: Algorithm,

    /// Directory holding one sub-directory of CSV tables per dataset
    #[arg(long, value_name = "DIR", env = "TOPICTILE_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of worker threads (0 = auto)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Everything a command needs once arguments and configuration are resolved
pub struct RunContext {
    /// Loaded configuration
    pub config: CliConfig,
    /// Segmentation settings for the selected dataset
    pub segmentation: SegmentationConfig,
    /// Embedding backend, built only for algorithms that need one
    pub embedder: Option<Arc<dyn Embedder>>,
    /// CSV tables under the data directory
    pub source: CsvDataset,
}

impl RunArgs {
    /// Set up logging and threads, then resolve configuration
    pub fn prepare(&self) -> Result<RunContext> {
        self.init_logging();
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        self.configure_threads(&config);

        let segmentation = config.segmentation_for(self.dataset)?;
        let embedder = if self.algorithm.requires_embedder() {
            Some(config.embedding.build()?)
        } else {
            None
        };

        Ok(RunContext {
            segmentation,
            embedder,
            source: CsvDataset::new(&self.data_dir),
            config,
        })
    }

    /// Formatter for the resolved format and destination
    pub fn formatter(&self, config: &CliConfig) -> Result<Box<dyn OutputFormatter>> {
        let format = self.format.unwrap_or(config.output.format);
        let writer: Box<dyn Write + Send> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };
        Ok(create_formatter(format, writer, config.output.pretty_json))
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }

    fn configure_threads(&self, config: &CliConfig) {
        let requested = self.threads.unwrap_or(config.performance.worker_threads);
        let threads = if requested == 0 {
            num_cpus::get()
        } else {
            requested
        };

        match rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            Ok(()) => log::debug!("Using {threads} worker threads"),
            Err(e) => log::debug!("Thread pool already configured: {e}"),
        }
    }
}
