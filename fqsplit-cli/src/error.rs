//! Error handling for the CLI application

use fqsplit_core::SplitError;
use std::fmt;

/// CLI-specific failures that the core library does not know about
#[derive(Debug)]
pub enum CliError {
    /// Size string that is not an integer with an optional K/M/G suffix
    InvalidSize(String),
    /// None of `--number`, `--output` or `--max-size` was usable
    NoOutputSelected(String),
    /// Input whose size cannot drive the output count
    EmptyInput(String),
    /// Configuration file problem
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidSize(size) => write!(
                f,
                "Invalid size: {size} (expected an integer with optional K, M or G suffix)"
            ),
            CliError::NoOutputSelected(msg) => write!(f, "No outputs selected: {msg}"),
            CliError::EmptyInput(input) => write!(
                f,
                "Cannot determine size of input or input is empty: {input}"
            ),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Whether the failure comes from how the command was invoked
    pub fn is_usage(&self) -> bool {
        matches!(self, CliError::InvalidSize(_) | CliError::NoOutputSelected(_))
    }
}

/// Exit status for invocation mistakes, matching clap's own usage errors
pub const USAGE_EXIT_CODE: u8 = 2;

/// Whether `err` was caused by the arguments rather than by the run itself
///
/// Rejected splitter settings count as usage errors wherever they sit in
/// the context chain.
pub fn is_usage_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<SplitError>()
            .is_some_and(SplitError::is_configuration)
            || cause.downcast_ref::<CliError>().is_some_and(CliError::is_usage)
    })
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_size_display() {
        let error = CliError::InvalidSize("12Q".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid size: 12Q (expected an integer with optional K, M or G suffix)"
        );
    }

    #[test]
    fn test_no_output_selected_display() {
        let error = CliError::NoOutputSelected("--no-round-robin needs --max-size".to_string());
        assert_eq!(
            error.to_string(),
            "No outputs selected: --no-round-robin needs --max-size"
        );
    }

    #[test]
    fn test_empty_input_display() {
        let error = CliError::EmptyInput("reads.fastq".to_string());
        assert!(error.to_string().ends_with("reads.fastq"));
    }

    #[test]
    fn test_error_converts_into_anyhow() {
        let failure: CliResult<()> = Err(CliError::ConfigError("bad key".to_string()).into());
        let err = failure.unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: bad key");
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }

    #[test]
    fn test_usage_errors() {
        let buffer: anyhow::Error = SplitError::BufferTooSmall {
            size: 512,
            minimum: 1024,
        }
        .into();
        assert!(is_usage_error(&buffer));
        assert!(is_usage_error(&buffer.context("Failed to split reads.fq")));

        let selection: anyhow::Error = CliError::NoOutputSelected("none".to_string()).into();
        assert!(is_usage_error(&selection));
        assert!(is_usage_error(&CliError::InvalidSize("0".to_string()).into()));
    }

    #[test]
    fn test_runtime_errors_are_not_usage_errors() {
        let truncated: anyhow::Error = SplitError::TruncatedRecord { bytes: 7 }.into();
        assert!(!is_usage_error(&truncated));
        assert!(!is_usage_error(&CliError::EmptyInput("reads.fq".to_string()).into()));
        assert!(!is_usage_error(&CliError::ConfigError("bad key".to_string()).into()));

        let io: anyhow::Error = std::io::Error::other("disk full").into();
        assert!(!is_usage_error(&io.context("Failed to write out.fq")));
    }
}
