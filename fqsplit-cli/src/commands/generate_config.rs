//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        let template = self.generate_template()?;
        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        eprintln!("Configuration written to {}", self.output.display());
        eprintln!(
            "Use it with: fqsplit split --config {} INPUT -n 4",
            self.output.display()
        );
        Ok(())
    }

    /// Default settings as a commented TOML document
    fn generate_template(&self) -> Result<String> {
        let body = CliConfig::default().to_toml()?;
        Ok(format!(
            "# fqsplit configuration\n\
             # Command-line flags take precedence over these values.\n\
             # buffer_size accepts K, M and G suffixes (powers of 1024).\n\
             # The suffix extension selects compression: .gz .bz2 .xz .zst\n\n{body}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_template_parses_back() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("fqsplit.toml"),
            force: false,
        };

        let template = args.generate_template().unwrap();
        assert!(template.starts_with("# fqsplit configuration"));
        assert_eq!(CliConfig::from_toml(&template).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("fqsplit.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
            force: false,
        };

        assert!(args.execute().is_ok());
        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("lines_per_record = 4"));

        // A second run needs --force.
        assert!(args.execute().is_err());
        let forced = GenerateConfigArgs {
            output: output_path,
            force: true,
        };
        assert!(forced.execute().is_ok());
    }
}
