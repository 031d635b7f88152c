//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use topictile_core::{EvaluationObserver, Event, LogObserver};

/// Counts of what happened during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Meetings segmented successfully
    pub segmented: usize,
    /// Meetings whose segmentation failed
    pub failed: usize,
    /// Meetings skipped for lack of annotations, counted per granularity
    pub unannotated: usize,
    /// Meetings dropped from a metric average
    pub unscored: usize,
}

/// Observer that drives a progress bar and forwards events to the log
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
    log: LogObserver,
    segmented: AtomicUsize,
    failed: AtomicUsize,
    unannotated: AtomicUsize,
    unscored: AtomicUsize,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
            log: LogObserver,
            segmented: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            unannotated: AtomicUsize::new(0),
            unscored: AtomicUsize::new(0),
        }
    }

    /// Initialize progress bar for meeting processing
    pub fn init_meetings(&mut self, total_meetings: u64) {
        if self.quiet {
            return;
        }

        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} meetings {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");

        let pb = ProgressBar::new(total_meetings).with_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        self.progress_bar = Some(pb);
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }

    /// Counts collected so far
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            segmented: self.segmented.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            unannotated: self.unannotated.load(Ordering::Relaxed),
            unscored: self.unscored.load(Ordering::Relaxed),
        }
    }

    fn meeting_completed(&self, meeting_id: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Processed: {meeting_id}"));
            pb.inc(1);
        }
    }
}

impl EvaluationObserver for ProgressReporter {
    fn on_event(&self, event: &Event) {
        match event {
            Event::MeetingSegmented { meeting_id, .. } => {
                self.segmented.fetch_add(1, Ordering::Relaxed);
                self.meeting_completed(meeting_id);
            }
            Event::SegmentationFailed { meeting_id, .. } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                self.meeting_completed(meeting_id);
            }
            Event::MissingAnnotation { .. } => {
                self.unannotated.fetch_add(1, Ordering::Relaxed);
            }
            Event::MeetingScoreFailed { .. } => {
                self.unscored.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }

        match &self.progress_bar {
            Some(pb) => pb.suspend(|| self.log.on_event(event)),
            None => self.log.on_event(event),
        }
    }
}
