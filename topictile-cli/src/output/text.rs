//! Plain text output formatter

use super::{MeetingSegmentation, OutputFormatter, RunInfo};
use anyhow::Result;
use std::io::{self, Write};
use topictile_core::Evaluation;

/// Plain text formatter - aligned metric lines, one meeting per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn format_evaluation(&mut self, run: &RunInfo, evaluation: &Evaluation) -> Result<()> {
        writeln!(self.writer, "Dataset:   {}", run.dataset)?;
        writeln!(self.writer, "Algorithm: {}", run.algorithm)?;
        writeln!(self.writer)?;

        for (name, value) in evaluation.report.iter() {
            writeln!(self.writer, "{name:<28}{value:.6}")?;
        }

        writeln!(self.writer)?;
        for details in &evaluation.granularities {
            writeln!(
                self.writer,
                "{}: {} meetings scored, {} skipped",
                details.granularity, details.meetings_evaluated, details.meetings_failed
            )?;
        }
        Ok(())
    }

    fn format_segmentation(&mut self, segmentation: &MeetingSegmentation) -> Result<()> {
        let boundaries: Vec<String> = segmentation
            .boundaries
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(
            self.writer,
            "{}\t{}\t[{}]",
            segmentation.meeting_id,
            segmentation.group_count,
            boundaries.join(", ")
        )?;

        if let Some(transcript) = &segmentation.transcript {
            writeln!(self.writer)?;
            write!(self.writer, "{transcript}")?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
