//! Observability metrics: question latency and ingestion counts.

use std::collections::VecDeque;
use std::time::Duration;

/// Latency samples kept for averages and percentiles; older ones are dropped.
pub const LATENCY_WINDOW: usize = 10_000;

/// Collects runtime metrics for the question answering service.
#[derive(Debug)]
pub struct MetricsCollector {
    /// Most recent question latencies, capped at [`LATENCY_WINDOW`]
    question_latencies_us: VecDeque<f64>,
    total_questions: u64,
    total_documents: u64,
    total_batches: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            question_latencies_us: VecDeque::with_capacity(LATENCY_WINDOW),
            total_questions: 0,
            total_documents: 0,
            total_batches: 0,
        }
    }

    /// Record an answered question with its duration.
    pub fn record_question(&mut self, duration: Duration) {
        self.total_questions += 1;
        if self.question_latencies_us.len() == LATENCY_WINDOW {
            self.question_latencies_us.pop_front();
        }
        self.question_latencies_us.push_back(duration.as_micros() as f64);
    }

    /// Record a batch of `count` documents added.
    pub fn record_documents(&mut self, count: usize) {
        self.total_batches += 1;
        self.total_documents += count as u64;
    }

    pub fn total_questions(&self) -> u64 {
        self.total_questions
    }

    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    pub fn total_batches(&self) -> u64 {
        self.total_batches
    }

    /// Average latency over the recent window, in microseconds.
    pub fn avg_question_latency_us(&self) -> f64 {
        if self.question_latencies_us.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.question_latencies_us.iter().sum();
        sum / self.question_latencies_us.len() as f64
    }

    /// Get a percentile of question latency (e.g., 50.0, 95.0, 99.0).
    pub fn percentile_question_latency_us(&self, percentile: f64) -> f64 {
        if self.question_latencies_us.is_empty() {
            return 0.0;
        }

        let mut sorted: Vec<f64> = self.question_latencies_us.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let index = ((percentile / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[index.min(sorted.len() - 1)]
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
