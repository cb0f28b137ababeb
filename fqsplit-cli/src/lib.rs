//! fqsplit CLI library
//!
//! Argument parsing, input decompression, compressed output files and run
//! reports around the `fqsplit-core` splitters.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod size;

pub use commands::{Cli, Commands};
pub use error::{CliError, CliResult};
