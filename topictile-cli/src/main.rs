//! Command-line entry point for topictile

use anyhow::Result;
use clap::Parser;
use topictile_cli::commands::Commands;

/// Topic segmentation of meeting transcripts with Pk/WinDiff evaluation
#[derive(Debug, Parser)]
#[command(name = "topictile", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_evaluate() {
        let cli = Cli::try_parse_from([
            "topictile",
            "evaluate",
            "-d",
            "ami",
            "-a",
            "texttiling-lexical",
            "--data-dir",
            "data",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Evaluate(_)));
    }

    #[test]
    fn test_rejects_unknown_algorithm() {
        let result = Cli::try_parse_from(["topictile", "evaluate", "-d", "ami", "-a", "lda"]);
        assert!(result.is_err());
    }
}
