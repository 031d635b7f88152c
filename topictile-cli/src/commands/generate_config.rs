//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "topictile.toml")]
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

        std::fs::write(&self.output, CliConfig::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("Configuration template written to {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("1. Tune the thresholds and windows in the file");
        println!(
            "2. Run: topictile evaluate -d ami -a texttiling-lexical -c {}",
            self.output.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_parseable_template() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("topictile.toml");
        let args = GenerateConfigArgs {
            output: output.clone(),
            force: false,
        };

        args.execute().unwrap();
        assert!(CliConfig::load(&output).is_ok());
        assert!(args.execute().is_err());
    }
}
