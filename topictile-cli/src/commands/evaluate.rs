//! Evaluate command implementation

use super::RunArgs;
use crate::output::RunInfo;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use topictile_core::{DatasetSource, Evaluator};

/// Arguments for the evaluate command
#[derive(Debug, Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

impl EvaluateArgs {
    /// Execute the evaluate command
    pub fn execute(&self) -> Result<()> {
        let context = self.run.prepare()?;
        let args = &self.run;

        log::info!("Evaluating {} on {}", args.algorithm, args.dataset);

        let evaluator = Evaluator::new(args.algorithm, &context.segmentation, context.embedder)?;
        let corpus = context
            .source
            .load(args.dataset)
            .with_context(|| format!("Failed to load dataset {}", args.dataset))?;

        let mut reporter = ProgressReporter::new(args.quiet);
        reporter.init_meetings(corpus.len() as u64);
        let evaluation = evaluator.evaluate(&corpus, &reporter);
        reporter.finish();
        let evaluation = evaluation?;

        let summary = reporter.summary();
        if summary.failed > 0 {
            log::warn!("{} meetings could not be segmented", summary.failed);
        }
        log::info!(
            "Segmented {} meetings; {} skipped without annotations, {} dropped from averages",
            summary.segmented,
            summary.unannotated,
            summary.unscored
        );

        let mut formatter = self.run.formatter(&context.config)?;
        formatter.format_evaluation(
            &RunInfo {
                dataset: args.dataset,
                algorithm: args.algorithm,
            },
            &evaluation,
        )?;
        formatter.finish()?;

        Ok(())
    }
}
