//! Configuration types for the splitters

use crate::error::{Result, SplitError};
use crate::report::SplitReport;

/// Lines forming one FASTQ record
pub const DEFAULT_LINES_PER_RECORD: usize = 4;

/// Read granularity in bytes
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Smallest buffer accepted unless the minimum is lowered explicitly
pub const DEFAULT_MIN_BUFFER_SIZE: usize = 1024;

/// What to do when the input ends in the middle of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TailPolicy {
    /// Write the incomplete tail to the current output and log a warning
    #[default]
    Passthrough,
    /// Fail the run with [`SplitError::TruncatedRecord`]
    Reject,
}

impl TailPolicy {
    /// Apply the policy to an incomplete final record of `bytes` bytes
    pub(crate) fn settle(self, bytes: usize, report: &mut SplitReport) -> Result<()> {
        match self {
            TailPolicy::Passthrough => {
                log::warn!("input ends with an incomplete record; passing {bytes} bytes through");
                report.truncated_tail = Some(bytes);
                Ok(())
            }
            TailPolicy::Reject => Err(SplitError::TruncatedRecord { bytes }),
        }
    }
}

/// Splitter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SplitConfig {
    /// Number of newline-terminated lines per record
    pub lines_per_record: usize,
    /// Bytes requested from the input per read
    pub buffer_size: usize,
    /// Lower bound enforced on `buffer_size`
    pub min_buffer_size: usize,
    /// Maximum bytes per output, sequential mode only
    pub max_size: Option<u64>,
    /// Handling of a truncated final record
    pub tail_policy: TailPolicy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            lines_per_record: DEFAULT_LINES_PER_RECORD,
            buffer_size: DEFAULT_BUFFER_SIZE,
            min_buffer_size: DEFAULT_MIN_BUFFER_SIZE,
            max_size: None,
            tail_policy: TailPolicy::default(),
        }
    }
}

impl SplitConfig {
    /// Create a builder starting from the defaults
    pub fn builder() -> SplitConfigBuilder {
        SplitConfigBuilder::default()
    }

    /// Check the settings shared by both splitting modes
    pub fn validate(&self) -> Result<()> {
        if self.lines_per_record < 1 {
            return Err(SplitError::InvalidLinesPerRecord);
        }
        if self.buffer_size < self.min_buffer_size {
            return Err(SplitError::BufferTooSmall {
                size: self.buffer_size,
                minimum: self.min_buffer_size,
            });
        }
        Ok(())
    }

    /// Check the settings and return the maximum size for sequential mode
    pub fn validate_sequential(&self) -> Result<u64> {
        self.validate()?;
        let max_size = self.max_size.ok_or(SplitError::MissingMaxSize)?;
        if max_size <= self.buffer_size as u64 {
            return Err(SplitError::MaxSizeTooSmall {
                max_size,
                buffer_size: self.buffer_size,
            });
        }
        Ok(max_size)
    }
}

/// Builder for [`SplitConfig`]
#[derive(Debug, Default)]
pub struct SplitConfigBuilder {
    config: SplitConfig,
}

impl SplitConfigBuilder {
    /// Set the number of lines per record
    pub fn lines_per_record(mut self, lines: usize) -> Self {
        self.config.lines_per_record = lines;
        self
    }

    /// Set the read buffer size in bytes
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    /// Lower (or raise) the minimum accepted buffer size
    pub fn min_buffer_size(mut self, size: usize) -> Self {
        self.config.min_buffer_size = size;
        self
    }

    /// Set the maximum size of each sequential output
    pub fn max_size(mut self, size: u64) -> Self {
        self.config.max_size = Some(size);
        self
    }

    /// Set the truncated tail policy
    pub fn tail_policy(mut self, policy: TailPolicy) -> Self {
        self.config.tail_policy = policy;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<SplitConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SplitConfig::default();
        assert_eq!(config.lines_per_record, 4);
        assert_eq!(config.buffer_size, 65536);
        assert_eq!(config.min_buffer_size, 1024);
        assert_eq!(config.max_size, None);
        assert_eq!(config.tail_policy, TailPolicy::Passthrough);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_buffer_below_minimum_is_rejected() {
        let result = SplitConfig::builder().buffer_size(512).build();
        assert!(matches!(
            result,
            Err(SplitError::BufferTooSmall {
                size: 512,
                minimum: 1024
            })
        ));
    }

    #[test]
    fn test_lowered_minimum_accepts_small_buffer() {
        let config = SplitConfig::builder()
            .min_buffer_size(512)
            .buffer_size(512)
            .build()
            .unwrap();
        assert_eq!(config.buffer_size, 512);
    }

    #[test]
    fn test_zero_lines_per_record_is_rejected() {
        let result = SplitConfig::builder().lines_per_record(0).build();
        assert!(matches!(result, Err(SplitError::InvalidLinesPerRecord)));
    }

    #[test]
    fn test_tail_policy_settle() {
        let mut report = SplitReport::default();
        TailPolicy::Passthrough.settle(7, &mut report).unwrap();
        assert_eq!(report.truncated_tail, Some(7));

        let mut report = SplitReport::default();
        let result = TailPolicy::Reject.settle(7, &mut report);
        assert!(matches!(result, Err(SplitError::TruncatedRecord { bytes: 7 })));
        assert_eq!(report.truncated_tail, None);
    }

    #[test]
    fn test_sequential_validation() {
        let config = SplitConfig::default();
        assert!(matches!(
            config.validate_sequential(),
            Err(SplitError::MissingMaxSize)
        ));

        let config = SplitConfig::builder()
            .buffer_size(4096)
            .max_size(4096)
            .build()
            .unwrap();
        assert!(matches!(
            config.validate_sequential(),
            Err(SplitError::MaxSizeTooSmall {
                max_size: 4096,
                buffer_size: 4096
            })
        ));

        let config = SplitConfig::builder()
            .buffer_size(4096)
            .max_size(4097)
            .build()
            .unwrap();
        assert_eq!(config.validate_sequential().unwrap(), 4097);
    }
}
