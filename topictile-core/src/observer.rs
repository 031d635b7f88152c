//! Event sink for recoverable conditions during segmentation and evaluation
//!
//! Skipped meetings, degenerate inputs and annotation quirks are reported to
//! an injected [`EvaluationObserver`] instead of global logging state.
//! [`LogObserver`] forwards everything to the `log` facade.

use std::fmt;
use std::sync::Mutex;

/// Something worth reporting that does not stop the run
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Meeting has utterances but no annotation rows
    MissingAnnotation {
        /// Meeting key
        meeting_id: String,
    },
    /// Meeting too short to score, empty boundary list emitted
    DegenerateMeeting {
        /// Meeting key
        meeting_id: String,
        /// Number of utterance groups
        group_count: usize,
    },
    /// End position shared by more than two segments
    AmbiguousNesting {
        /// Meeting key
        meeting_id: String,
        /// Shared end position
        end: usize,
        /// How many segments share it
        occurrences: usize,
    },
    /// Annotation start past the last group, clamped
    ClampedStart {
        /// Meeting key
        meeting_id: String,
        /// Start as annotated
        start: usize,
        /// Number of utterance groups
        group_count: usize,
    },
    /// Strategy produced boundaries for a meeting
    MeetingSegmented {
        /// Meeting key
        meeting_id: String,
        /// Predicted boundary indices
        boundaries: Vec<usize>,
    },
    /// Strategy failed for a meeting
    SegmentationFailed {
        /// Meeting key
        meeting_id: String,
        /// Error message
        reason: String,
    },
    /// Metric computation failed for a meeting
    MeetingScoreFailed {
        /// Meeting key
        meeting_id: String,
        /// Granularity suffix
        granularity: String,
        /// Error message
        reason: String,
    },
    /// Reference topic change found at a group
    TopicChange {
        /// Meeting key
        meeting_id: String,
        /// Group where the new topic starts
        group_index: usize,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::MissingAnnotation { meeting_id } => {
                write!(f, "{meeting_id} not found in annotation table, skipped")
            }
            Event::DegenerateMeeting {
                meeting_id,
                group_count,
            } => write!(
                f,
                "{meeting_id} has only {group_count} utterance groups, no boundaries scored"
            ),
            Event::AmbiguousNesting {
                meeting_id,
                end,
                occurrences,
            } => write!(
                f,
                "{meeting_id}: end position {end} shared by {occurrences} segments, nesting ignored"
            ),
            Event::ClampedStart {
                meeting_id,
                start,
                group_count,
            } => write!(
                f,
                "{meeting_id}: segment start {start} outside {group_count} groups, clamped"
            ),
            Event::MeetingSegmented {
                meeting_id,
                boundaries,
            } => write!(f, "{meeting_id}: {} boundaries {boundaries:?}", boundaries.len()),
            Event::SegmentationFailed { meeting_id, reason } => {
                write!(f, "{meeting_id}: segmentation failed: {reason}")
            }
            Event::MeetingScoreFailed {
                meeting_id,
                granularity,
                reason,
            } => write!(f, "{meeting_id}: {granularity} metrics skipped: {reason}"),
            Event::TopicChange {
                meeting_id,
                group_index,
            } => write!(f, "{meeting_id}: topic change at group {group_index}"),
        }
    }
}

/// Receives [`Event`]s from the flatteners, scorer and evaluator
pub trait EvaluationObserver: Send + Sync {
    /// Handle one event
    fn on_event(&self, event: &Event);
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl EvaluationObserver for LogObserver {
    fn on_event(&self, event: &Event) {
        match event {
            Event::SegmentationFailed { .. } | Event::MeetingScoreFailed { .. } => {
                log::warn!("{event}")
            }
            Event::AmbiguousNesting { .. } | Event::ClampedStart { .. } => log::warn!("{event}"),
            Event::MissingAnnotation { .. } | Event::DegenerateMeeting { .. } => {
                log::info!("{event}")
            }
            Event::MeetingSegmented { .. } => log::debug!("{event}"),
            Event::TopicChange { .. } => log::trace!("{event}"),
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl EvaluationObserver for NullObserver {
    fn on_event(&self, _event: &Event) {}
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Count events matching a predicate
    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

impl EvaluationObserver for RecordingObserver {
    fn on_event(&self, event: &Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
