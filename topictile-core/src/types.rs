//! Typed records for meetings, annotations and boundary sets

use crate::error::{Result, TilingError};
use std::fmt;

/// A contiguous run of utterances sharing a group id, joined into one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceGroup {
    /// Position of the group within its meeting (0-based, dense)
    pub index: usize,
    /// Concatenated caption text
    pub text: String,
}

impl UtteranceGroup {
    /// Create a new utterance group
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// One meeting: an identifier plus its ordered utterance groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    /// Opaque meeting key
    pub id: String,
    /// Groups in meeting order
    pub groups: Vec<UtteranceGroup>,
}

impl Meeting {
    /// Build a meeting, checking that group indices are `0..n` in order
    pub fn from_groups(id: impl Into<String>, groups: Vec<UtteranceGroup>) -> Result<Self> {
        let id = id.into();
        for (expected, group) in groups.iter().enumerate() {
            if group.index != expected {
                return Err(TilingError::InvalidInput(format!(
                    "meeting '{id}': expected group index {expected}, found {}",
                    group.index
                )));
            }
        }
        Ok(Self { id, groups })
    }

    /// Build a meeting from plain texts, assigning dense indices
    pub fn from_texts<S: Into<String>>(id: impl Into<String>, texts: impl IntoIterator<Item = S>) -> Self {
        let groups = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| UtteranceGroup::new(index, text))
            .collect();
        Self {
            id: id.into(),
            groups,
        }
    }

    /// Number of utterance groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Borrow group texts in order
    pub fn texts(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.text.as_str()).collect()
    }
}

impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Meeting '{}': {} groups", self.id, self.groups.len())
    }
}

/// A human-labelled topic span, in utterance-group indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationSegment {
    /// First group of the span
    pub start: usize,
    /// End position of the span
    pub end: usize,
}

impl AnnotationSegment {
    /// Create a new annotation segment
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Topic-change positions of one meeting
///
/// Holds the sorted, de-duplicated sparse form. Index 0 is never a boundary
/// (it is the start of the meeting) and indices at or past `group_count` are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundarySet {
    indices: Vec<usize>,
    group_count: usize,
}

impl BoundarySet {
    /// Build from a sparse index list
    pub fn from_indices(indices: &[usize], group_count: usize) -> Self {
        let mut indices: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i > 0 && i < group_count)
            .collect();
        indices.sort_unstable();
        indices.dedup();
        Self {
            indices,
            group_count,
        }
    }

    /// Build from a dense binary vector
    pub fn from_binary(binary: &[u8]) -> Self {
        let indices: Vec<usize> = binary
            .iter()
            .enumerate()
            .filter(|(i, &bit)| *i > 0 && bit == 1)
            .map(|(i, _)| i)
            .collect();
        Self {
            indices,
            group_count: binary.len(),
        }
    }

    /// Dense binary form, one entry per group
    pub fn to_binary(&self) -> Vec<u8> {
        let mut binary = vec![0u8; self.group_count];
        for &i in &self.indices {
            binary[i] = 1;
        }
        binary
    }

    /// Sorted boundary indices
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Length of the dense form
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Number of boundaries
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether there are no boundaries
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Consume into the sparse index list
    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }
}
