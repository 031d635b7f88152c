//! Markdown output formatter

use super::{MeetingSegmentation, OutputFormatter, RunInfo};
use anyhow::Result;
use std::io::Write;
use topictile_core::Evaluation;

/// Markdown formatter - outputs results as tables
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    meeting_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            meeting_count: 0,
        }
    }
}

impl<W: Write + Send> OutputFormatter for MarkdownFormatter<W> {
    fn format_evaluation(&mut self, run: &RunInfo, evaluation: &Evaluation) -> Result<()> {
        writeln!(self.writer, "## {} on {}", run.algorithm, run.dataset)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Granularity | Pk | WinDiff | Meetings | Skipped |")?;
        writeln!(self.writer, "|---|---|---|---|---|")?;
        for details in &evaluation.granularities {
            writeln!(
                self.writer,
                "| {} | {:.4} | {:.4} | {} | {} |",
                details.granularity,
                details.average_pk,
                details.average_windiff,
                details.meetings_evaluated,
                details.meetings_failed
            )?;
        }
        Ok(())
    }

    fn format_segmentation(&mut self, segmentation: &MeetingSegmentation) -> Result<()> {
        self.meeting_count += 1;
        writeln!(
            self.writer,
            "{}. **{}** ({} groups): {:?}",
            self.meeting_count,
            segmentation.meeting_id,
            segmentation.group_count,
            segmentation.boundaries
        )?;

        if let Some(transcript) = &segmentation.transcript {
            writeln!(self.writer)?;
            writeln!(self.writer, "```text")?;
            write!(self.writer, "{transcript}")?;
            writeln!(self.writer, "```")?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.meeting_count > 0 {
            writeln!(self.writer)?;
            writeln!(self.writer, "---")?;
            writeln!(self.writer, "*Total meetings: {}*", self.meeting_count)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{evaluation, run_info, segmentation, SharedBuffer};

    #[test]
    fn test_evaluation_table() {
        let buffer = SharedBuffer::default();
        let mut formatter = MarkdownFormatter::new(buffer.clone());
        formatter
            .format_evaluation(&run_info(), &evaluation())
            .unwrap();
        formatter.finish().unwrap();

        let output = buffer.contents();
        assert!(output.starts_with("## even on test"));
        assert!(output.contains("| flattened |"));
        assert!(output.contains("| top_level |"));
        assert!(!output.contains("Total meetings"));
    }

    #[test]
    fn test_segmentation_list() {
        let buffer = SharedBuffer::default();
        let mut formatter = MarkdownFormatter::new(buffer.clone());
        formatter.format_segmentation(&segmentation(true)).unwrap();
        formatter.finish().unwrap();

        let output = buffer.contents();
        assert!(output.contains("1. **m1** (6 groups): [2, 4]"));
        assert!(output.contains("```text"));
        assert!(output.contains("*Total meetings: 1*"));
    }
}
