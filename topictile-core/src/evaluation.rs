//! Evaluation orchestration
//!
//! Segments every meeting of a corpus with one strategy, builds reference
//! vectors at both granularities and scores the predictions against them.

use crate::annotation::{flatten_corpus, Granularity};
use crate::config::SegmentationConfig;
use crate::dataset::{Corpus, DatasetSelector, DatasetSource};
use crate::embedding::Embedder;
use crate::error::{Result, TilingError};
use crate::metrics::{GranularityReport, MetricEngine, MetricReport};
use crate::observer::{EvaluationObserver, Event};
use crate::strategy::{build_strategy, Algorithm, SegmentationStrategy};
use crate::types::{BoundarySet, Meeting};
use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Marker placed before each topic-change group in rendered transcripts
pub const TOPIC_CHANGE_MARKER: &str = "<<------ Topic Change ------>>";

/// Result of a full evaluation run
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Merged four-entry report
    pub report: MetricReport,
    /// Per-granularity details, in report order
    pub granularities: Vec<GranularityReport>,
    /// Predicted boundaries per meeting
    pub predictions: BTreeMap<String, Vec<usize>>,
}

/// Runs one segmentation algorithm over a corpus and scores it
pub struct Evaluator {
    algorithm: Algorithm,
    strategy: Box<dyn SegmentationStrategy>,
    engine: MetricEngine,
}

impl Evaluator {
    /// Build the strategy up front so configuration errors surface before
    /// any meeting is processed
    pub fn new(
        algorithm: Algorithm,
        config: &SegmentationConfig,
        embedder: Option<Arc<dyn Embedder>>,
    ) -> Result<Self> {
        let strategy = build_strategy(algorithm, config, embedder)?;
        log::debug!("Built strategy '{}'", strategy.name());
        Ok(Self {
            algorithm,
            strategy,
            engine: MetricEngine::new(),
        })
    }

    /// Algorithm being evaluated
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Strategy in use
    pub fn strategy(&self) -> &dyn SegmentationStrategy {
        self.strategy.as_ref()
    }

    /// Segment one meeting, reporting the outcome to the observer
    pub fn segment_meeting(
        &self,
        meeting: &Meeting,
        observer: &dyn EvaluationObserver,
    ) -> Result<Vec<usize>> {
        match self.strategy.segment(meeting, observer) {
            Ok(boundaries) => {
                observer.on_event(&Event::MeetingSegmented {
                    meeting_id: meeting.id.clone(),
                    boundaries: boundaries.clone(),
                });
                Ok(boundaries)
            }
            Err(e) => {
                observer.on_event(&Event::SegmentationFailed {
                    meeting_id: meeting.id.clone(),
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Predicted boundaries for every meeting of the corpus
    ///
    /// Meetings are independent; with the `parallel` feature they are
    /// processed on the rayon pool. A failing meeting is left out of the
    /// result. Fails only when every meeting fails.
    pub fn segment_corpus(
        &self,
        corpus: &Corpus,
        observer: &dyn EvaluationObserver,
    ) -> Result<BTreeMap<String, Vec<usize>>> {
        let meetings: Vec<&Meeting> = corpus.meetings().collect();
        if meetings.is_empty() {
            return Err(TilingError::InvalidInput("corpus has no meetings".into()));
        }

        #[cfg(feature = "parallel")]
        let outcomes: Vec<(&str, Result<Vec<usize>>)> = meetings
            .par_iter()
            .map(|m| (m.id.as_str(), self.segment_meeting(m, observer)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<(&str, Result<Vec<usize>>)> = meetings
            .iter()
            .map(|m| (m.id.as_str(), self.segment_meeting(m, observer)))
            .collect();

        let total = outcomes.len();
        let predictions: BTreeMap<String, Vec<usize>> = outcomes
            .into_iter()
            .filter_map(|(id, outcome)| outcome.ok().map(|b| (id.to_string(), b)))
            .collect();

        if predictions.is_empty() {
            return Err(TilingError::AllMeetingsFailed {
                stage: "segmentation".into(),
                failed: total,
            });
        }

        log::info!(
            "Segmented {} of {total} meetings with {}",
            predictions.len(),
            self.strategy.name()
        );
        Ok(predictions)
    }

    /// Segment, flatten and score at both granularities
    pub fn evaluate(&self, corpus: &Corpus, observer: &dyn EvaluationObserver) -> Result<Evaluation> {
        let predictions = self.segment_corpus(corpus, observer)?;

        let mut report = MetricReport::default();
        let mut granularities = Vec::with_capacity(Granularity::ALL.len());

        for granularity in Granularity::ALL {
            let flattener = granularity.flattener();
            let references = flatten_corpus(flattener.as_ref(), corpus, observer);
            report_topic_changes(&references, observer);

            let details = self
                .engine
                .evaluate(&predictions, &references, granularity, observer)?;
            report = report.merge(details.to_report())?;
            granularities.push(details);
        }

        Ok(Evaluation {
            report,
            granularities,
            predictions,
        })
    }
}

fn report_topic_changes(references: &BTreeMap<String, Vec<u8>>, observer: &dyn EvaluationObserver) {
    for (meeting_id, reference) in references {
        for &group_index in BoundarySet::from_binary(reference).indices() {
            observer.on_event(&Event::TopicChange {
                meeting_id: meeting_id.clone(),
                group_index,
            });
        }
    }
}

/// Load a dataset and evaluate one algorithm on it
pub fn run(
    dataset: DatasetSelector,
    algorithm: Algorithm,
    config: &SegmentationConfig,
    source: &dyn DatasetSource,
    embedder: Option<Arc<dyn Embedder>>,
    observer: &dyn EvaluationObserver,
) -> Result<Evaluation> {
    let evaluator = Evaluator::new(algorithm, config, embedder)?;
    let corpus = source.load(dataset)?;
    log::info!("Loaded {dataset}: {} meetings", corpus.len());
    evaluator.evaluate(&corpus, observer)
}

/// Meeting text with a marker line before every boundary group
pub fn render_transcript(meeting: &Meeting, boundaries: &[usize]) -> String {
    let boundaries = BoundarySet::from_indices(boundaries, meeting.group_count());
    let mut marks = boundaries.indices().iter().peekable();
    let mut out = String::new();

    for group in &meeting.groups {
        if marks.next_if_eq(&&group.index).is_some() {
            out.push('\n');
            out.push_str(TOPIC_CHANGE_MARKER);
            out.push_str("\n\n");
        }
        out.push_str(&group.text);
        out.push('\n');
    }

    out
}
