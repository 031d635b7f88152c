//! JSON output formatter

use super::{MeetingSegmentation, OutputFormatter, RunInfo};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use topictile_core::{Evaluation, GranularityReport};

/// JSON formatter - one document per run
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    evaluation: Option<EvaluationData>,
    segmentations: Vec<MeetingSegmentation>,
}

/// Data structure for evaluation output
#[derive(Debug, Serialize)]
pub struct EvaluationData {
    /// Dataset name
    pub dataset: String,
    /// Algorithm name
    pub algorithm: String,
    /// Merged metric report
    pub metrics: BTreeMap<String, f64>,
    /// Per-granularity details
    pub granularities: Vec<GranularityReport>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            evaluation: None,
            segmentations: Vec::new(),
        }
    }

    fn write_value<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn format_evaluation(&mut self, run: &RunInfo, evaluation: &Evaluation) -> Result<()> {
        self.evaluation = Some(EvaluationData {
            dataset: run.dataset.to_string(),
            algorithm: run.algorithm.to_string(),
            metrics: evaluation
                .report
                .iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            granularities: evaluation.granularities.clone(),
        });
        Ok(())
    }

    fn format_segmentation(&mut self, segmentation: &MeetingSegmentation) -> Result<()> {
        self.segmentations.push(segmentation.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(evaluation) = self.evaluation.take() {
            self.write_value(&evaluation)?;
        } else {
            let segmentations = std::mem::take(&mut self.segmentations);
            self.write_value(&segmentations)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
