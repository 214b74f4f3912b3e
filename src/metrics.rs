//! Per-run tallies for the batch translation job.
//!
//! A `RunMetrics` is owned by one invocation and printed at the end; nothing
//! is shared between runs.

use serde::Serialize;
use std::fmt;

/// Counters collected while translating a docs tree.
#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// English files that had an entry in the translation table
    processed: usize,

    /// English files with no table entry (after URL correction)
    skipped_no_entry: usize,

    /// (file, language) pairs with neither translated content nor title
    skipped_language: usize,

    /// Translated files written to disk
    written: usize,

    /// Files that could not be read or written
    failed: usize,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    pub fn record_no_entry(&mut self) {
        self.skipped_no_entry += 1;
    }

    pub fn record_language_skipped(&mut self) {
        self.skipped_language += 1;
    }

    pub fn record_written(&mut self) {
        self.written += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Snapshot of the counters.
    pub fn report(&self) -> MetricsReport {
        let attempted = self.written + self.skipped_language;
        let write_rate = if attempted > 0 {
            (self.written as f64 / attempted as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            processed: self.processed,
            skipped_no_entry: self.skipped_no_entry,
            skipped_language: self.skipped_language,
            written: self.written,
            failed: self.failed,
            write_rate,
        }
    }
}

/// Final tally of a translation run.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub processed: usize,
    pub skipped_no_entry: usize,
    pub skipped_language: usize,
    pub written: usize,
    pub failed: usize,

    /// Share of (file, language) pairs that produced an output file (0-100)
    pub write_rate: f64,
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} written={} skipped_no_entry={} skipped_language={} failed={} write_rate={:.1}%",
            self.processed,
            self.written,
            self.skipped_no_entry,
            self.skipped_language,
            self.failed,
            self.write_rate
        )
    }
}
