//! CLI command implementations

use clap::{Parser, Subcommand};

pub mod generate_config;
pub mod split;

/// Split FASTQ files without breaking records
#[derive(Debug, Parser)]
#[command(name = "fqsplit", version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split a FASTQ file over several outputs
    Split(split::SplitArgs),

    /// Write a configuration file with the default settings
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Split(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }

    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Split(_) => "split",
            Commands::GenerateConfig(_) => "generate-config",
        }
    }
}
