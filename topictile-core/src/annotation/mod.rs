//! Reference boundary extraction from hierarchical annotations
//!
//! Annotators label nested topic spans. The metric engine needs one flat
//! binary vector per meeting, so each [`AnnotationFlattener`] turns a
//! meeting's ordered [`AnnotationSegment`] list into such a vector at one
//! [`Granularity`]. The format quirks (first and last segments are not
//! topic changes, a repeated end marks a parent span) live here and nowhere
//! else.

mod all_levels;
mod top_level;

pub use all_levels::AllLevelsFlattener;
pub use top_level::TopLevelFlattener;

use crate::dataset::Corpus;
use crate::error::Result;
use crate::observer::{EvaluationObserver, Event};
use crate::types::AnnotationSegment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Annotation level a reference vector is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Every annotated segment, at any nesting depth
    Flattened,
    /// Top-level segments only
    TopLevel,
}

impl Granularity {
    /// Both granularities, in report order
    pub const ALL: [Granularity; 2] = [Granularity::Flattened, Granularity::TopLevel];

    /// Metric-name suffix
    pub fn suffix(&self) -> &'static str {
        match self {
            Granularity::Flattened => "flattened",
            Granularity::TopLevel => "top_level",
        }
    }

    /// Flattener implementing this granularity
    pub fn flattener(&self) -> Box<dyn AnnotationFlattener> {
        match self {
            Granularity::Flattened => Box::new(AllLevelsFlattener),
            Granularity::TopLevel => Box::new(TopLevelFlattener),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Turns one meeting's annotation segments into a reference vector
pub trait AnnotationFlattener: Send + Sync {
    /// Granularity produced by this flattener
    fn granularity(&self) -> Granularity;

    /// Binary vector of exactly `group_count` entries
    fn flatten(
        &self,
        meeting_id: &str,
        segments: &[AnnotationSegment],
        group_count: usize,
        observer: &dyn EvaluationObserver,
    ) -> Result<Vec<u8>>;
}

/// Reference vectors for every annotated meeting of a corpus
///
/// Meetings without annotation rows are reported as
/// [`Event::MissingAnnotation`] and left out. A meeting whose annotations
/// cannot be flattened is reported as [`Event::MeetingScoreFailed`] and also
/// left out.
pub fn flatten_corpus(
    flattener: &dyn AnnotationFlattener,
    corpus: &Corpus,
    observer: &dyn EvaluationObserver,
) -> BTreeMap<String, Vec<u8>> {
    let mut references = BTreeMap::new();

    for meeting in corpus.meetings() {
        let Some(segments) = corpus.annotations(&meeting.id) else {
            observer.on_event(&Event::MissingAnnotation {
                meeting_id: meeting.id.clone(),
            });
            continue;
        };

        match flattener.flatten(&meeting.id, segments, meeting.group_count(), observer) {
            Ok(binary) => {
                references.insert(meeting.id.clone(), binary);
            }
            Err(e) => observer.on_event(&Event::MeetingScoreFailed {
                meeting_id: meeting.id.clone(),
                granularity: flattener.granularity().suffix().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    references
}

/// Mark segment starts, leaving out the first and last segment
///
/// Index 0 is never marked. Starts at or past `group_count` are clamped to
/// the last group.
pub(crate) fn mark_starts(
    meeting_id: &str,
    starts: &[usize],
    group_count: usize,
    observer: &dyn EvaluationObserver,
) -> Vec<u8> {
    let mut binary = vec![0u8; group_count];
    if group_count == 0 || starts.len() < 3 {
        return binary;
    }

    for &start in &starts[1..starts.len() - 1] {
        let index = if start >= group_count {
            observer.on_event(&Event::ClampedStart {
                meeting_id: meeting_id.to_string(),
                start,
                group_count,
            });
            group_count - 1
        } else {
            start
        };

        if index > 0 {
            binary[index] = 1;
        }
    }

    binary
}
