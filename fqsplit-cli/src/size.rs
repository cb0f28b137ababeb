//! Human-readable byte sizes

use crate::error::CliError;

const SIZE_SUFFIXES: [(char, u64); 3] = [('K', 1024), ('M', 1024 * 1024), ('G', 1024 * 1024 * 1024)];

/// Parse `64K`, `128M`, `2G` or a plain integer into bytes.
///
/// Suffixes are powers of 1024 and case-insensitive.
pub fn parse_size(text: &str) -> Result<u64, CliError> {
    let invalid = || CliError::InvalidSize(text.to_string());
    let trimmed = text.trim();

    let (digits, multiplier) = match trimmed.chars().last() {
        Some(last) if last.is_ascii_alphabetic() => {
            let upper = last.to_ascii_uppercase();
            let (_, multiplier) = SIZE_SUFFIXES
                .iter()
                .find(|(suffix, _)| *suffix == upper)
                .ok_or_else(invalid)?;
            (&trimmed[..trimmed.len() - 1], *multiplier)
        }
        _ => (trimmed, 1),
    };

    let value: u64 = digits.parse().map_err(|_| invalid())?;
    value.checked_mul(multiplier).ok_or_else(invalid)
}

/// `clap` value parser for size arguments
pub fn size_arg(text: &str) -> Result<u64, String> {
    parse_size(text).map_err(|e| e.to_string())
}
