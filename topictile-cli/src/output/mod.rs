//! Output formatting module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use topictile_core::{Algorithm, DatasetSelector, Evaluation};

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain text
    #[default]
    Text,
    /// JSON document
    Json,
    /// Markdown tables
    Markdown,
}

impl OutputFormat {
    /// Every supported format with a short description
    pub const ALL: [(OutputFormat, &'static str); 3] = [
        (OutputFormat::Text, "aligned plain text"),
        (OutputFormat::Json, "JSON document for further processing"),
        (OutputFormat::Markdown, "Markdown tables for reports"),
    ];

    /// Lowercase format name
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }
}

/// What was run
#[derive(Debug, Clone, Copy)]
pub struct RunInfo {
    /// Dataset evaluated
    pub dataset: DatasetSelector,
    /// Algorithm evaluated
    pub algorithm: Algorithm,
}

/// Predicted segmentation of one meeting
#[derive(Debug, Clone, Serialize)]
pub struct MeetingSegmentation {
    /// Meeting key
    pub meeting_id: String,
    /// Number of utterance groups
    pub group_count: usize,
    /// Predicted boundary indices
    pub boundaries: Vec<usize>,
    /// Rendered transcript, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Format the result of an evaluation run
    fn format_evaluation(&mut self, run: &RunInfo, evaluation: &Evaluation) -> Result<()>;

    /// Format the predicted segmentation of one meeting
    fn format_segmentation(&mut self, segmentation: &MeetingSegmentation) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Create the formatter for `format` writing to `writer`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send>,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use topictile_core::{
        Corpus, Evaluator, Meeting, NullObserver, SegmentationConfig, AnnotationSegment,
    };

    /// Writer whose contents can be read back after the formatter is done
    #[derive(Clone, Default)]
    pub struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    pub fn run_info() -> RunInfo {
        RunInfo {
            dataset: DatasetSelector::Test,
            algorithm: Algorithm::Even,
        }
    }

    pub fn evaluation() -> Evaluation {
        let meeting = Meeting::from_texts("m1", (0..10).map(|i| format!("group {i}")));
        let segments = [(0, 3), (3, 6), (6, 10)]
            .iter()
            .map(|&(s, e)| AnnotationSegment::new(s, e))
            .collect();
        let corpus = Corpus::from_parts([meeting], [("m1".to_string(), segments)]);
        Evaluator::new(Algorithm::Even, &SegmentationConfig::default(), None)
            .unwrap()
            .evaluate(&corpus, &NullObserver)
            .unwrap()
    }

    pub fn segmentation(transcript: bool) -> MeetingSegmentation {
        MeetingSegmentation {
            meeting_id: "m1".into(),
            group_count: 6,
            boundaries: vec![2, 4],
            transcript: transcript.then(|| "a\nb\n".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::SharedBuffer;
    use super::*;

    #[test]
    fn test_create_formatter_for_every_format() {
        for (format, _) in OutputFormat::ALL {
            let buffer = SharedBuffer::default();
            let mut formatter = create_formatter(format, Box::new(buffer.clone()), true);
            formatter.finish().unwrap();
        }
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::Markdown.name(), "markdown");
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
