//! Dataset rows, typed corpus construction and dataset selection
//!
//! Raw tabular rows are converted into [`Meeting`]s and per-meeting
//! [`AnnotationSegment`] lists once, at the load boundary. Nothing past this
//! module looks at column names.

use crate::error::{Result, TilingError};
use crate::types::{AnnotationSegment, Meeting, UtteranceGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One row of the utterance table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceRow {
    /// Meeting key
    pub meeting_id: String,
    /// Utterance group the caption belongs to
    #[serde(rename = "caption_group_id")]
    pub group_id: usize,
    /// Caption text
    pub caption: String,
}

/// One row of the annotation table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRow {
    /// Meeting key
    pub meeting_id: String,
    /// Start group index
    #[serde(rename = "st")]
    pub start: usize,
    /// End group index
    #[serde(rename = "en")]
    pub end: usize,
}

/// Typed view of one dataset
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    meetings: BTreeMap<String, Meeting>,
    annotations: BTreeMap<String, Vec<AnnotationSegment>>,
}

impl Corpus {
    /// Build a corpus from the two raw tables
    ///
    /// Captions of the same group are joined with a single space in row
    /// order. Annotation rows keep their table order, which the top-level
    /// flattener depends on. Group ids must be dense from 0 per meeting.
    pub fn from_rows(utterances: Vec<UtteranceRow>, annotations: Vec<AnnotationRow>) -> Result<Self> {
        let mut grouped: BTreeMap<String, BTreeMap<usize, Vec<String>>> = BTreeMap::new();
        for row in utterances {
            grouped
                .entry(row.meeting_id)
                .or_default()
                .entry(row.group_id)
                .or_default()
                .push(row.caption);
        }

        let mut meetings = BTreeMap::new();
        for (meeting_id, groups) in grouped {
            let groups: Vec<UtteranceGroup> = groups
                .into_iter()
                .map(|(index, captions)| UtteranceGroup::new(index, captions.join(" ")))
                .collect();
            let meeting = Meeting::from_groups(meeting_id.clone(), groups)?;
            meetings.insert(meeting_id, meeting);
        }

        let mut segments: BTreeMap<String, Vec<AnnotationSegment>> = BTreeMap::new();
        for row in annotations {
            segments
                .entry(row.meeting_id)
                .or_default()
                .push(AnnotationSegment::new(row.start, row.end));
        }

        Ok(Self {
            meetings,
            annotations: segments,
        })
    }

    /// Build a corpus from already typed records
    pub fn from_parts(
        meetings: impl IntoIterator<Item = Meeting>,
        annotations: impl IntoIterator<Item = (String, Vec<AnnotationSegment>)>,
    ) -> Self {
        Self {
            meetings: meetings.into_iter().map(|m| (m.id.clone(), m)).collect(),
            annotations: annotations.into_iter().collect(),
        }
    }

    /// Meetings in key order
    pub fn meetings(&self) -> impl Iterator<Item = &Meeting> {
        self.meetings.values()
    }

    /// Look up one meeting
    pub fn meeting(&self, meeting_id: &str) -> Option<&Meeting> {
        self.meetings.get(meeting_id)
    }

    /// Annotation segments of a meeting, if it has any
    pub fn annotations(&self, meeting_id: &str) -> Option<&[AnnotationSegment]> {
        self.annotations.get(meeting_id).map(Vec::as_slice)
    }

    /// Number of meetings in the utterance table
    pub fn len(&self) -> usize {
        self.meetings.len()
    }

    /// Whether the utterance table was empty
    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }
}

/// Known evaluation datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatasetSelector {
    /// AMI meeting corpus
    Ami,
    /// ICSI meeting corpus
    Icsi,
    /// Small test set
    Test,
}

impl DatasetSelector {
    /// Every known dataset
    pub const ALL: [DatasetSelector; 3] = [
        DatasetSelector::Ami,
        DatasetSelector::Icsi,
        DatasetSelector::Test,
    ];

    /// Lowercase name, used for directory names and config sections
    pub fn name(&self) -> &'static str {
        match self {
            DatasetSelector::Ami => "ami",
            DatasetSelector::Icsi => "icsi",
            DatasetSelector::Test => "test",
        }
    }
}

impl fmt::Display for DatasetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetSelector {
    type Err = TilingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ami" => Ok(DatasetSelector::Ami),
            "icsi" => Ok(DatasetSelector::Icsi),
            "test" => Ok(DatasetSelector::Test),
            _ => Err(TilingError::UnknownDataset(s.to_string())),
        }
    }
}

/// Produces the tables of a dataset
pub trait DatasetSource {
    /// Load one dataset
    fn load(&self, dataset: DatasetSelector) -> Result<Corpus>;
}
