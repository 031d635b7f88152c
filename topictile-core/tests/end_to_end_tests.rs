//! End-to-end tests for segmentation and evaluation on in-memory corpora

use std::sync::Arc;
use topictile_core::{
    run, Algorithm, AnnotationRow, AnnotationSegment, CachedEmbedder, Corpus, DatasetSelector,
    DatasetSource, Embedder, Evaluator, Event, HashingEmbedder, Meeting, NullObserver,
    RecordingObserver, Result, SegmentationConfig, TilingError, UtteranceRow,
};

const BUDGET: [&str; 4] = [
    "the budget for the remote is twelve euros",
    "production costs must stay under the budget",
    "twelve euros budget means cheaper production costs",
    "we cannot exceed the production budget",
];

const DESIGN: [&str; 4] = [
    "the case colour should be bright yellow",
    "yellow rubber case with curved buttons",
    "buttons on a curved yellow case look fun",
    "rubber buttons and a bright colour case",
];

const MARKETING: [&str; 4] = [
    "young customers want fashionable gadgets",
    "market research shows customers want fashion",
    "fashionable gadgets sell to young customers",
    "research says the market is young",
];

fn three_topic_meeting(id: &str) -> Meeting {
    Meeting::from_texts(id, BUDGET.iter().chain(&DESIGN).chain(&MARKETING).copied())
}

fn three_topic_annotation() -> Vec<AnnotationSegment> {
    vec![
        AnnotationSegment::new(0, 4),
        AnnotationSegment::new(4, 8),
        AnnotationSegment::new(8, 10),
        AnnotationSegment::new(10, 12),
    ]
}

struct FixedSource(Corpus);

impl DatasetSource for FixedSource {
    fn load(&self, _dataset: DatasetSelector) -> Result<Corpus> {
        Ok(self.0.clone())
    }
}

fn corpus(ids: &[&str]) -> Corpus {
    Corpus::from_parts(
        ids.iter().map(|id| three_topic_meeting(id)),
        ids.iter().map(|id| (id.to_string(), three_topic_annotation())),
    )
}

#[test]
fn test_lexical_texttiling_finds_topic_shifts() {
    let config = SegmentationConfig::builder().smoothing(0, 0).build().unwrap();
    let evaluator = Evaluator::new(Algorithm::TextTilingLexical, &config, None).unwrap();
    let predictions = evaluator
        .segment_corpus(&corpus(&["m1"]), &NullObserver)
        .unwrap();

    assert_eq!(predictions["m1"], vec![4, 8]);
}

#[test]
fn test_full_report_has_four_entries() {
    let evaluation = run(
        DatasetSelector::Test,
        Algorithm::TextTilingLexical,
        &SegmentationConfig::default(),
        &FixedSource(corpus(&["m1", "m2"])),
        None,
        &NullObserver,
    )
    .unwrap();

    let names: Vec<&str> = evaluation.report.iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![
            "average_Pk_flattened",
            "average_Pk_top_level",
            "average_windiff_flattened",
            "average_windiff_top_level",
        ]
    );
    for (_, value) in evaluation.report.iter() {
        assert!((0.0..=1.0).contains(&value));
    }
    assert_eq!(evaluation.granularities.len(), 2);
    assert_eq!(evaluation.granularities[0].meetings_evaluated, 2);
}

#[test]
fn test_embedding_strategies_run_offline() {
    let embedder: Arc<dyn Embedder> = Arc::new(CachedEmbedder::new(HashingEmbedder::default()));
    for algorithm in [Algorithm::TextTilingBert, Algorithm::TextTilingSbert] {
        let evaluation = run(
            DatasetSelector::Ami,
            algorithm,
            &SegmentationConfig::default(),
            &FixedSource(corpus(&["m1"])),
            Some(embedder.clone()),
            &NullObserver,
        )
        .unwrap();
        assert_eq!(evaluation.report.len(), 4);
    }
}

#[test]
fn test_unannotated_and_degenerate_meetings_do_not_fail_run() {
    let corpus = Corpus::from_parts(
        [
            three_topic_meeting("annotated"),
            three_topic_meeting("unannotated"),
            Meeting::from_texts("tiny", ["hello", "bye"]),
        ],
        [
            ("annotated".to_string(), three_topic_annotation()),
            ("tiny".to_string(), vec![AnnotationSegment::new(0, 2)]),
        ],
    );
    let observer = RecordingObserver::new();
    let evaluator =
        Evaluator::new(Algorithm::TextTilingLexical, &SegmentationConfig::default(), None).unwrap();
    let evaluation = evaluator.evaluate(&corpus, &observer).unwrap();

    assert_eq!(evaluation.predictions["tiny"], Vec::<usize>::new());
    assert!(observer.count(|e| matches!(e, Event::DegenerateMeeting { .. })) >= 1);
    assert_eq!(
        observer.count(|e| matches!(e, Event::MissingAnnotation { meeting_id } if meeting_id == "unannotated")),
        2
    );
    // "tiny" has no reference boundaries, so it drops out at both granularities
    assert_eq!(
        observer.count(|e| matches!(e, Event::MeetingScoreFailed { meeting_id, .. } if meeting_id == "tiny")),
        2
    );
    assert_eq!(evaluation.granularities[1].meetings_evaluated, 1);
}

#[test]
fn test_unknown_selectors_fail_fast() {
    assert!(matches!(
        "lda".parse::<Algorithm>(),
        Err(TilingError::UnsupportedAlgorithm(_))
    ));
    assert!(matches!(
        "switchboard".parse::<DatasetSelector>(),
        Err(TilingError::UnknownDataset(_))
    ));
}

#[test]
fn test_every_meeting_failing_is_an_error() {
    let corpus = Corpus::from_parts(
        [three_topic_meeting("m1")],
        [("m1".to_string(), vec![AnnotationSegment::new(0, 12)])],
    );
    let evaluator = Evaluator::new(Algorithm::Even, &SegmentationConfig::default(), None).unwrap();
    let err = evaluator.evaluate(&corpus, &NullObserver).unwrap_err();
    assert!(matches!(err, TilingError::AllMeetingsFailed { .. }));
}

#[test]
fn test_corpus_from_rows_matches_from_parts() {
    let utterances = vec![
        UtteranceRow {
            meeting_id: "m".into(),
            group_id: 0,
            caption: "hello".into(),
        },
        UtteranceRow {
            meeting_id: "m".into(),
            group_id: 0,
            caption: "there".into(),
        },
        UtteranceRow {
            meeting_id: "m".into(),
            group_id: 1,
            caption: "budget talk".into(),
        },
    ];
    let annotations = vec![AnnotationRow {
        meeting_id: "m".into(),
        start: 0,
        end: 1,
    }];
    let corpus = Corpus::from_rows(utterances, annotations).unwrap();

    let meeting = corpus.meeting("m").unwrap();
    assert_eq!(meeting.texts(), vec!["hello there", "budget talk"]);
    assert_eq!(corpus.annotations("m").unwrap(), &[AnnotationSegment::new(0, 1)]);
}

#[test]
fn test_nested_annotation_scores_differ_by_granularity() {
    let meeting = Meeting::from_texts("m", (0..12).map(|i| format!("utterance {i}")));
    let annotation = vec![
        AnnotationSegment::new(0, 4),
        AnnotationSegment::new(4, 6),
        AnnotationSegment::new(6, 8),
        AnnotationSegment::new(4, 8),
        AnnotationSegment::new(8, 11),
        AnnotationSegment::new(11, 12),
    ];
    let corpus = Corpus::from_parts([meeting], [("m".to_string(), annotation)]);

    let config = SegmentationConfig::builder()
        .even(topictile_core::EvenSpacing::Interval(4))
        .build()
        .unwrap();
    let evaluator = Evaluator::new(Algorithm::Even, &config, None).unwrap();
    let evaluation = evaluator.evaluate(&corpus, &NullObserver).unwrap();

    assert_eq!(evaluation.predictions["m"], vec![4, 8]);
    assert_eq!(evaluation.report.get("average_Pk_top_level"), Some(0.0));
    assert!(evaluation.report.get("average_Pk_flattened").unwrap() > 0.0);
}
