//! All-levels flattening: every annotated segment counts

use super::{mark_starts, AnnotationFlattener, Granularity};
use crate::error::{Result, TilingError};
use crate::observer::EvaluationObserver;
use crate::types::AnnotationSegment;

/// Marks the start of every segment regardless of nesting
#[derive(Debug, Clone, Copy, Default)]
pub struct AllLevelsFlattener;

impl AnnotationFlattener for AllLevelsFlattener {
    fn granularity(&self) -> Granularity {
        Granularity::Flattened
    }

    fn flatten(
        &self,
        meeting_id: &str,
        segments: &[AnnotationSegment],
        group_count: usize,
        observer: &dyn EvaluationObserver,
    ) -> Result<Vec<u8>> {
        if segments.is_empty() {
            return Err(TilingError::alignment(meeting_id, "no annotation segments"));
        }

        let starts: Vec<usize> = segments.iter().map(|s| s.start).collect();
        Ok(mark_starts(meeting_id, &starts, group_count, observer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;

    fn segments(pairs: &[(usize, usize)]) -> Vec<AnnotationSegment> {
        pairs.iter().map(|&(s, e)| AnnotationSegment::new(s, e)).collect()
    }

    #[test]
    fn test_nested_segments_all_count() {
        let segs = segments(&[(0, 2), (2, 3), (3, 4), (2, 4), (4, 5)]);
        let binary = AllLevelsFlattener
            .flatten("m", &segs, 6, &NullObserver)
            .unwrap();
        assert_eq!(binary, vec![0, 0, 1, 1, 0, 0]);
    }

    #[test]
    fn test_length_matches_group_count() {
        let segs = segments(&[(0, 3), (3, 6), (6, 9)]);
        let binary = AllLevelsFlattener
            .flatten("m", &segs, 12, &NullObserver)
            .unwrap();
        assert_eq!(binary.len(), 12);
        assert_eq!(binary.iter().filter(|&&b| b == 1).count(), 1);
    }

    #[test]
    fn test_empty_annotation_is_alignment_error() {
        let err = AllLevelsFlattener
            .flatten("m", &[], 6, &NullObserver)
            .unwrap_err();
        assert!(matches!(err, TilingError::DataAlignment { .. }));
    }
}
