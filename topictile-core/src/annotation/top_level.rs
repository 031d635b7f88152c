//! Top-level flattening: nested sub-segments collapse into their parent

use super::{mark_starts, AnnotationFlattener, Granularity};
use crate::error::{Result, TilingError};
use crate::observer::{EvaluationObserver, Event};
use crate::types::AnnotationSegment;
use std::collections::{BTreeSet, HashMap};

/// Keeps only top-level segment starts
///
/// An end position that occurs exactly twice in a meeting's annotation list
/// brackets a parent span and its children. Everything between the two
/// occurrences collapses into one segment starting at the earliest start
/// inside the bracket, and segments already collected that fall inside that
/// span are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLevelFlattener;

impl TopLevelFlattener {
    /// Walk the annotation list and return top-level segments in order
    pub fn top_level_segments(
        &self,
        meeting_id: &str,
        segments: &[AnnotationSegment],
        observer: &dyn EvaluationObserver,
    ) -> Vec<AnnotationSegment> {
        let mut positions: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, segment) in segments.iter().enumerate() {
            positions.entry(segment.end).or_default().push(i);
        }

        let mut reported = BTreeSet::new();
        let mut top_level: Vec<AnnotationSegment> = Vec::new();
        let mut i = 0;

        while i < segments.len() {
            let end = segments[i].end;
            let occurrences = &positions[&end];

            match occurrences.as_slice() {
                [first, second] if *first == i => {
                    let bracket = &segments[i..=*second];
                    let start = bracket.iter().map(|s| s.start).min().unwrap_or(segments[i].start);
                    top_level.retain(|s| !(s.start >= start && s.end <= end));
                    top_level.push(AnnotationSegment::new(start, end));
                    i = second + 1;
                }
                _ => {
                    if occurrences.len() > 2 && reported.insert(end) {
                        observer.on_event(&Event::AmbiguousNesting {
                            meeting_id: meeting_id.to_string(),
                            end,
                            occurrences: occurrences.len(),
                        });
                    }
                    top_level.push(segments[i]);
                    i += 1;
                }
            }
        }

        top_level
    }
}

impl AnnotationFlattener for TopLevelFlattener {
    fn granularity(&self) -> Granularity {
        Granularity::TopLevel
    }

    fn flatten(
        &self,
        meeting_id: &str,
        segments: &[AnnotationSegment],
        group_count: usize,
        observer: &dyn EvaluationObserver,
    ) -> Result<Vec<u8>> {
        let top_level = self.top_level_segments(meeting_id, segments, observer);
        if top_level.is_empty() {
            return Err(TilingError::alignment(meeting_id, "no top-level segments"));
        }

        let starts: Vec<usize> = top_level.iter().map(|s| s.start).collect();
        Ok(mark_starts(meeting_id, &starts, group_count, observer))
    }
}
