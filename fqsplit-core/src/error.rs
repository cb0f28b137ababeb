//! Error types for record splitting

use thiserror::Error;

/// Errors raised by the splitters.
///
/// Configuration variants are raised before any I/O happens. Everything else
/// is fatal to the run it occurred in; nothing is retried.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Round-robin splitting was asked to distribute over no sinks
    #[error("invalid configuration: at least one output is required")]
    NoOutputs,

    /// Buffer size below the configured minimum
    #[error("invalid configuration: buffer size {size} is below the minimum of {minimum} bytes")]
    BufferTooSmall {
        /// Requested buffer size in bytes
        size: usize,
        /// Configured minimum in bytes
        minimum: usize,
    },

    /// A record must span at least one line
    #[error("invalid configuration: lines per record must be at least 1")]
    InvalidLinesPerRecord,

    /// Sequential chunking needs a maximum output size
    #[error("invalid configuration: a maximum size is required for sequential splitting")]
    MissingMaxSize,

    /// Maximum size does not leave room for a single buffer
    #[error("invalid configuration: maximum size {max_size} must be larger than buffer size {buffer_size}")]
    MaxSizeTooSmall {
        /// Requested maximum output size in bytes
        max_size: u64,
        /// Configured buffer size in bytes
        buffer_size: usize,
    },

    /// Reading the input or writing an output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended inside a record and the tail policy rejects that
    #[error("input ends with an incomplete record ({bytes} trailing bytes)")]
    TruncatedRecord {
        /// Size of the incomplete trailing record
        bytes: usize,
    },
}

impl SplitError {
    /// Whether the error was raised by configuration validation
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SplitError::NoOutputs
                | SplitError::BufferTooSmall { .. }
                | SplitError::InvalidLinesPerRecord
                | SplitError::MissingMaxSize
                | SplitError::MaxSizeTooSmall { .. }
        )
    }
}

/// Result type for splitting operations
pub type Result<T> = std::result::Result<T, SplitError>;
