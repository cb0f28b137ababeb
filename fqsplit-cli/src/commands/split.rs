//! Split command implementation

use crate::config::{CliConfig, SplitSection};
use crate::error::CliError;
use crate::input::Input;
use crate::output::naming::{default_prefix, output_name, output_names};
use crate::output::{FileSink, JsonFormatter, ReportFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use crate::size::{parse_size, size_arg};
use anyhow::{Context, Result};
use clap::Args;
use fqsplit_core::{
    RoundRobinSplitter, SequentialChunker, SplitConfig, SplitReport, TailPolicy,
};
use std::io;
use std::path::{Path, PathBuf};

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// FASTQ file to split; standard input when omitted or "-"
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Where the records go
    #[command(flatten)]
    pub outputs: OutputSelection,

    /// Fill outputs one after another instead of round-robin (needs --max-size)
    #[arg(short = 'k', long)]
    pub no_round_robin: bool,

    /// Prefix for generated output names [default: input name without extensions]
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Suffix for generated output names; its extension selects compression
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Lines forming one record
    #[arg(short, long, value_name = "N")]
    pub lines_per_record: Option<usize>,

    /// Compression level for compressed outputs
    #[arg(short, long, value_name = "LEVEL")]
    pub compression_level: Option<u32>,

    /// Read granularity
    #[arg(short = 'b', long, value_name = "SIZE", value_parser = size_arg, hide = true)]
    pub buffer_size: Option<u64>,

    /// Print the produced file names, one per line
    #[arg(short = 'P', long)]
    pub print: bool,

    /// Report format on stdout
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Fail when the input ends inside a record
    #[arg(long)]
    pub strict: bool,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Exactly one way of choosing the outputs
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct OutputSelection {
    /// Distribute round-robin over N generated files
    #[arg(short, long, value_name = "N")]
    pub number: Option<usize>,

    /// Distribute round-robin over these files (repeatable)
    #[arg(short, long, value_name = "FILE")]
    pub output: Vec<PathBuf>,

    /// Round-robin: one output per SIZE of input. Sequential: maximum
    /// uncompressed bytes per output
    #[arg(short, long, value_name = "SIZE", value_parser = size_arg)]
    pub max_size: Option<u64>,
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// One produced file per line
    Text,
    /// JSON document with per-file statistics
    Json,
}

/// How the input will be split
#[derive(Debug, PartialEq, Eq)]
enum Plan {
    RoundRobin(Vec<PathBuf>),
    Sequential { max_size: u64 },
}

/// Settings after merging the configuration file and the flags
#[derive(Debug)]
struct Settings {
    split: SplitConfig,
    suffix: String,
    compression_level: u32,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        let file_config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let settings = self.settings(&file_config.split)?;
        log::debug!("Arguments: {:?}", self);
        log::debug!("Settings: {:?}", settings);

        let mut progress = ProgressReporter::new(self.quiet);
        let mut input = Input::open(self.input.as_deref(), &mut progress)?;
        log::info!(
            "Reading {} ({})",
            display_input(input.path()),
            input.codec().name()
        );
        let prefix = self
            .prefix
            .clone()
            .unwrap_or_else(|| default_prefix(input.path()));

        let plan = self.plan(&input, &prefix, &settings.suffix)?;
        let (files, report) = match plan {
            Plan::RoundRobin(files) => {
                log::info!("Splitting round-robin over {} files", files.len());
                let report = split_round_robin(&mut input, &files, &settings, &progress)?;
                (files, report)
            }
            Plan::Sequential { max_size } => {
                log::info!("Splitting sequentially, at most {max_size} bytes per file");
                let mut split = settings.split.clone();
                split.max_size = Some(max_size);
                split_sequential(&mut input, &prefix, &settings, split, &progress)?
            }
        };
        progress.finish(files.len());

        if let Some(tail) = report.truncated_tail {
            log::warn!("Last record is incomplete ({tail} bytes)");
        }
        log::info!(
            "Wrote {} bytes to {} files",
            report.bytes_written(),
            files.len()
        );

        self.print_report(&files, &report, settings.split.lines_per_record)
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
            // A logger may already be installed when called more than once.
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }

    /// Merge flags over the configuration file
    fn settings(&self, file: &SplitSection) -> Result<Settings> {
        let buffer_size = match self.buffer_size {
            Some(size) => size,
            None => parse_size(&file.buffer_size)?,
        };
        let buffer_size = usize::try_from(buffer_size)
            .map_err(|_| CliError::InvalidSize(buffer_size.to_string()))?;

        let tail_policy = if self.strict {
            TailPolicy::Reject
        } else {
            TailPolicy::Passthrough
        };
        let split = SplitConfig::builder()
            .lines_per_record(self.lines_per_record.unwrap_or(file.lines_per_record))
            .buffer_size(buffer_size)
            .tail_policy(tail_policy)
            .build()?;

        Ok(Settings {
            split,
            suffix: self.suffix.clone().unwrap_or_else(|| file.suffix.clone()),
            compression_level: self.compression_level.unwrap_or(file.compression_level),
        })
    }

    /// Choose between round-robin and sequential splitting
    fn plan(&self, input: &Input, prefix: &str, suffix: &str) -> Result<Plan> {
        let selection = &self.outputs;

        if self.no_round_robin || (input.is_stdin() && selection.max_size.is_some()) {
            let max_size = selection.max_size.ok_or_else(|| {
                CliError::NoOutputSelected(
                    "--no-round-robin requires --max-size".to_string(),
                )
            })?;
            return Ok(Plan::Sequential { max_size });
        }

        if !selection.output.is_empty() {
            return Ok(Plan::RoundRobin(selection.output.clone()));
        }

        let number = match (selection.max_size, selection.number) {
            (Some(max_size), _) => {
                let size = input.size().filter(|&size| size > 0).ok_or_else(|| {
                    CliError::EmptyInput(display_input(input.path()))
                })?;
                if max_size == 0 {
                    return Err(CliError::InvalidSize("0".to_string()).into());
                }
                usize::try_from(size / max_size + 1)
                    .map_err(|_| CliError::InvalidSize(max_size.to_string()))?
            }
            (None, Some(number)) if number > 0 => number,
            (None, Some(_)) => {
                return Err(CliError::NoOutputSelected(
                    "--number must be at least 1".to_string(),
                )
                .into())
            }
            (None, None) => {
                return Err(CliError::NoOutputSelected(
                    "use --number, --output or --max-size".to_string(),
                )
                .into())
            }
        };

        Ok(Plan::RoundRobin(output_names(prefix, suffix, number)))
    }

    fn print_report(
        &self,
        files: &[PathBuf],
        report: &SplitReport,
        lines_per_record: usize,
    ) -> Result<()> {
        let format = match (self.format, self.print) {
            (Some(format), _) => format,
            (None, true) => ReportFormat::Text,
            (None, false) => return Ok(()),
        };

        let stdout = io::stdout().lock();
        match format {
            ReportFormat::Text => TextFormatter::new(stdout).format_report(files, report),
            ReportFormat::Json => {
                JsonFormatter::new(stdout, lines_per_record).format_report(files, report)
            }
        }
    }
}

fn split_round_robin(
    input: &mut Input,
    files: &[PathBuf],
    settings: &Settings,
    progress: &ProgressReporter,
) -> Result<SplitReport> {
    let mut sinks = files
        .iter()
        .map(|path| FileSink::create(path, settings.compression_level))
        .collect::<io::Result<Vec<_>>>()
        .context("Failed to create output files")?;
    progress.set_output(&format!("{} files", sinks.len()));

    let mut splitter = RoundRobinSplitter::new(settings.split.clone())?;
    let report = splitter
        .split(input.reader(), &mut sinks)
        .with_context(|| format!("Failed to split {}", display_input(input.path())))?;
    Ok(report)
}

fn split_sequential(
    input: &mut Input,
    prefix: &str,
    settings: &Settings,
    config: SplitConfig,
    progress: &ProgressReporter,
) -> Result<(Vec<PathBuf>, SplitReport)> {
    let mut chunker = SequentialChunker::new(config)?;
    let mut files = Vec::new();
    let mut factory = |sequence: usize| -> io::Result<FileSink> {
        let sink = FileSink::create(
            output_name(prefix, sequence, &settings.suffix),
            settings.compression_level,
        )?;
        progress.set_output(&sink.path().display().to_string());
        files.push(sink.path().to_path_buf());
        Ok(sink)
    };

    let name = display_input(input.path());
    let report = chunker
        .split(input.reader(), &mut factory)
        .with_context(|| format!("Failed to split {name}"))?;
    Ok((files, report))
}

fn display_input(path: Option<&Path>) -> String {
    path.map_or_else(|| "stdin".to_string(), |p| p.display().to_string())
}
