//! Segment command implementation

use super::RunArgs;
use crate::output::MeetingSegmentation;
use crate::progress::ProgressReporter;
use anyhow::{bail, Context, Result};
use clap::Args;
use topictile_core::{render_transcript, DatasetSource, Evaluator};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Only segment this meeting
    #[arg(short, long, value_name = "ID")]
    pub meeting: Option<String>,

    /// Include the transcript with topic change markers
    #[arg(short, long)]
    pub transcript: bool,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        let context = self.run.prepare()?;
        let args = &self.run;

        let evaluator = Evaluator::new(args.algorithm, &context.segmentation, context.embedder)?;
        let corpus = context
            .source
            .load(args.dataset)
            .with_context(|| format!("Failed to load dataset {}", args.dataset))?;

        let meetings: Vec<_> = match &self.meeting {
            Some(id) => match corpus.meeting(id) {
                Some(meeting) => vec![meeting],
                None => bail!("Meeting '{id}' not found in {}", args.dataset),
            },
            None => corpus.meetings().collect(),
        };

        let mut reporter = ProgressReporter::new(args.quiet);
        reporter.init_meetings(meetings.len() as u64);

        let mut segmentations = Vec::with_capacity(meetings.len());
        for meeting in meetings {
            // failures are reported through the observer and skipped
            if let Ok(boundaries) = evaluator.segment_meeting(meeting, &reporter) {
                let transcript = self
                    .transcript
                    .then(|| render_transcript(meeting, &boundaries));
                segmentations.push(MeetingSegmentation {
                    meeting_id: meeting.id.clone(),
                    group_count: meeting.group_count(),
                    boundaries,
                    transcript,
                });
            }
        }
        reporter.finish();

        if segmentations.is_empty() {
            bail!("No meeting of {} could be segmented", args.dataset);
        }

        let mut formatter = self.run.formatter(&context.config)?;
        for segmentation in &segmentations {
            formatter.format_segmentation(segmentation)?;
        }
        formatter.finish()?;

        Ok(())
    }
}
