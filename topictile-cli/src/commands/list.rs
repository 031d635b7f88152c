//! List command implementation

use super::ListCommands;
use crate::output::OutputFormat;
use anyhow::Result;
use topictile_core::{Algorithm, DatasetSelector};

/// Print the requested listing to stdout
pub fn execute(subcommand: ListCommands) -> Result<()> {
    match subcommand {
        ListCommands::Datasets => {
            println!("Known datasets (read from <data-dir>/<name>/):");
            for dataset in DatasetSelector::ALL {
                println!("  {:<8} utterances.csv, annotations.csv", dataset.name());
            }
        }
        ListCommands::Algorithms => {
            println!("Segmentation algorithms:");
            for algorithm in Algorithm::ALL {
                let note = if algorithm.requires_embedder() {
                    " [embeddings]"
                } else {
                    ""
                };
                println!(
                    "  {:<20} {}{note}",
                    algorithm.name(),
                    algorithm.description()
                );
            }
        }
        ListCommands::Formats => {
            println!("Output formats:");
            for (format, description) in OutputFormat::ALL {
                println!("  {:<10} {description}", format.name());
            }
        }
    }
    Ok(())
}
