//! Output file naming

use std::path::{Path, PathBuf};

/// Prefix used when reading standard input
pub const STDIN_PREFIX: &str = "split.";

const COMPRESSION_EXTENSIONS: [&str; 7] = [".gz", ".gzip", ".bz2", ".bzip2", ".xz", ".zst", ".zstd"];

/// Prefix derived from the input file name.
///
/// `reads.fastq.gz` becomes `reads.`; standard input gives [`STDIN_PREFIX`].
pub fn default_prefix(input: Option<&Path>) -> String {
    let Some(name) = input.and_then(Path::file_name) else {
        return STDIN_PREFIX.to_string();
    };
    let name = name.to_string_lossy();
    let lower = name.to_ascii_lowercase();

    let mut end = lower.len();
    if let Some(ext) = COMPRESSION_EXTENSIONS.iter().find(|ext| lower.ends_with(*ext)) {
        end -= ext.len();
    }
    for ext in [".fastq", ".fq"] {
        if lower[..end].ends_with(ext) {
            end -= ext.len();
            break;
        }
    }

    format!("{}.", &name[..end])
}

/// `<prefix><sequence><suffix>`
pub fn output_name(prefix: &str, sequence: usize, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}{sequence}{suffix}"))
}

/// Names for `count` round-robin outputs
pub fn output_names(prefix: &str, suffix: &str, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|sequence| output_name(prefix, sequence, suffix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix_strips_known_extensions() {
        assert_eq!(default_prefix(Some(Path::new("reads.fastq.gz"))), "reads.");
        assert_eq!(default_prefix(Some(Path::new("/data/s1_R1.fq"))), "s1_R1.");
        assert_eq!(default_prefix(Some(Path::new("lane2.FQ.BZ2"))), "lane2.");
        assert_eq!(default_prefix(Some(Path::new("reads.txt"))), "reads.txt.");
    }

    #[test]
    fn test_default_prefix_for_stdin() {
        assert_eq!(default_prefix(None), "split.");
    }

    #[test]
    fn test_output_names() {
        let names = output_names("out/reads.", ".fastq.gz", 3);
        assert_eq!(
            names,
            vec![
                PathBuf::from("out/reads.0.fastq.gz"),
                PathBuf::from("out/reads.1.fastq.gz"),
                PathBuf::from("out/reads.2.fastq.gz"),
            ]
        );
    }
}
