//! Windowed segmentation metrics: Pk and WindowDiff
//!
//! Both metrics slide a window of width `k` over a reference and a
//! hypothesis binary vector and count disagreements. Pk asks whether each
//! window contains any boundary, WindowDiff compares the number of
//! boundaries. Lower is better, 0 means identical segmentations.

use crate::annotation::Granularity;
use crate::error::{Result, TilingError};
use crate::observer::{EvaluationObserver, Event};
use crate::types::BoundarySet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Window width for a reference vector: half the average segment length
///
/// Computed as `round(n / (2 * boundaries))` with ties to even, clamped to
/// `1..=n`. A reference without boundaries has no defined window.
pub fn default_window(reference: &[u8]) -> Result<usize> {
    let boundaries = reference.iter().filter(|&&b| b == 1).count();
    if boundaries == 0 {
        return Err(TilingError::InvalidInput(
            "reference has no boundaries, window size undefined".into(),
        ));
    }

    let k = (reference.len() as f64 / (boundaries as f64 * 2.0)).round_ties_even() as usize;
    Ok(k.clamp(1, reference.len().max(1)))
}

fn check_inputs(reference: &[u8], hypothesis: &[u8], k: usize) -> Result<()> {
    if reference.len() != hypothesis.len() {
        return Err(TilingError::InvalidInput(format!(
            "reference has {} entries, hypothesis has {}",
            reference.len(),
            hypothesis.len()
        )));
    }
    if k == 0 || k > reference.len() {
        return Err(TilingError::InvalidInput(format!(
            "window size {k} outside 1..={}",
            reference.len()
        )));
    }
    Ok(())
}

fn boundaries_in(window: &[u8]) -> usize {
    window.iter().filter(|&&b| b == 1).count()
}

/// Pk score of a hypothesis against a reference
///
/// Fraction of the `n - k + 1` windows in which exactly one of the two
/// vectors has a boundary.
pub fn pk(reference: &[u8], hypothesis: &[u8], k: usize) -> Result<f64> {
    check_inputs(reference, hypothesis, k)?;

    let windows = reference.len() - k + 1;
    let errors = reference
        .windows(k)
        .zip(hypothesis.windows(k))
        .filter(|(r, h)| (boundaries_in(r) > 0) != (boundaries_in(h) > 0))
        .count();

    Ok(errors as f64 / windows as f64)
}

/// WindowDiff score of a hypothesis against a reference
///
/// Fraction of the `n - k + 1` windows in which the boundary counts differ.
pub fn window_diff(reference: &[u8], hypothesis: &[u8], k: usize) -> Result<f64> {
    check_inputs(reference, hypothesis, k)?;

    let windows = reference.len() - k + 1;
    let errors = reference
        .windows(k)
        .zip(hypothesis.windows(k))
        .filter(|(r, h)| boundaries_in(r) != boundaries_in(h))
        .count();

    Ok(errors as f64 / windows as f64)
}

/// Scores of one meeting at one granularity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeetingScore {
    /// Pk score
    pub pk: f64,
    /// WindowDiff score
    pub windiff: f64,
    /// Window width used for both
    pub window: usize,
}

/// Averages over one granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranularityReport {
    /// Annotation level the references came from
    pub granularity: Granularity,
    /// Mean Pk over scored meetings
    pub average_pk: f64,
    /// Mean WindowDiff over scored meetings
    pub average_windiff: f64,
    /// Number of meetings contributing to the averages
    pub meetings_evaluated: usize,
    /// Number of meetings left out because they could not be scored
    pub meetings_failed: usize,
    /// Per-meeting scores
    pub meetings: BTreeMap<String, MeetingScore>,
}

impl GranularityReport {
    /// Name of the Pk entry in a [`MetricReport`]
    pub fn pk_key(&self) -> String {
        format!("average_Pk_{}", self.granularity.suffix())
    }

    /// Name of the WindowDiff entry in a [`MetricReport`]
    pub fn windiff_key(&self) -> String {
        format!("average_windiff_{}", self.granularity.suffix())
    }

    /// Two-entry metric report
    pub fn to_report(&self) -> MetricReport {
        let mut report = MetricReport::default();
        report.entries.insert(self.pk_key(), self.average_pk);
        report.entries.insert(self.windiff_key(), self.average_windiff);
        report
    }
}

/// Named scalar metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricReport {
    entries: BTreeMap<String, f64>,
}

impl MetricReport {
    /// Combine two reports, failing if any name appears in both
    pub fn merge(mut self, other: MetricReport) -> Result<Self> {
        for (name, value) in other.entries {
            if self.entries.contains_key(&name) {
                return Err(TilingError::MetricKeyCollision(name));
            }
            self.entries.insert(name, value);
        }
        Ok(self)
    }

    /// Look up a metric by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(name).copied()
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, &value)| (name.as_str(), value))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scores predicted boundaries against reference vectors
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricEngine;

impl MetricEngine {
    /// Create a metric engine
    pub fn new() -> Self {
        Self
    }

    /// Score one meeting
    pub fn score_meeting(
        &self,
        meeting_id: &str,
        predicted: &[usize],
        reference: &[u8],
    ) -> Result<MeetingScore> {
        let group_count = reference.len();
        if let Some(&outside) = predicted.iter().find(|&&i| i >= group_count) {
            return Err(TilingError::alignment(
                meeting_id,
                format!("predicted boundary {outside} outside {group_count} groups"),
            ));
        }

        let hypothesis = BoundarySet::from_indices(predicted, group_count).to_binary();
        let window = default_window(reference)
            .map_err(|e| TilingError::alignment(meeting_id, e.to_string()))?;

        Ok(MeetingScore {
            pk: pk(reference, &hypothesis, window)?,
            windiff: window_diff(reference, &hypothesis, window)?,
            window,
        })
    }

    /// Average scores over every meeting that has a reference vector
    ///
    /// Meetings that cannot be scored are reported through the observer and
    /// left out of the averages. Fails only when no meeting can be scored.
    pub fn evaluate(
        &self,
        predictions: &BTreeMap<String, Vec<usize>>,
        references: &BTreeMap<String, Vec<u8>>,
        granularity: Granularity,
        observer: &dyn EvaluationObserver,
    ) -> Result<GranularityReport> {
        let mut meetings = BTreeMap::new();
        let mut failed = 0;

        for (meeting_id, reference) in references {
            let scored = match predictions.get(meeting_id) {
                Some(predicted) => self.score_meeting(meeting_id, predicted, reference),
                None => Err(TilingError::alignment(meeting_id.as_str(), "no prediction")),
            };

            match scored {
                Ok(score) => {
                    meetings.insert(meeting_id.clone(), score);
                }
                Err(e) => {
                    failed += 1;
                    observer.on_event(&Event::MeetingScoreFailed {
                        meeting_id: meeting_id.clone(),
                        granularity: granularity.suffix().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if meetings.is_empty() {
            return Err(TilingError::AllMeetingsFailed {
                stage: format!("{granularity} scoring"),
                failed,
            });
        }

        let count = meetings.len() as f64;
        let average_pk = meetings.values().map(|s| s.pk).sum::<f64>() / count;
        let average_windiff = meetings.values().map(|s| s.windiff).sum::<f64>() / count;

        log::info!(
            "{granularity}: Pk {average_pk:.4}, WinDiff {average_windiff:.4} on {} meetings",
            meetings.len()
        );

        Ok(GranularityReport {
            granularity,
            average_pk,
            average_windiff,
            meetings_evaluated: meetings.len(),
            meetings_failed: failed,
            meetings,
        })
    }
}
