//! Batch outcome bookkeeping shared by both tools

use serde::Serialize;
use tracing::{info, warn};

/// Outcome of a batch. A failed item never aborts the batch.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    /// `(item, reason)` for every failed item, in processing order
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, item: impl Into<String>, reason: impl ToString) {
        self.failed += 1;
        self.failures.push((item.into(), reason.to_string()));
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Log the final counts and every failure
    pub fn log_summary(&self, stage: &str) {
        for (item, reason) in &self.failures {
            warn!(stage, item = %item, reason = %reason, "Item failed");
        }
        info!(
            stage,
            succeeded = self.succeeded,
            failed = self.failed,
            total = self.total(),
            "Batch complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut report = BatchReport::default();
        report.record_success();
        report.record_failure("a", "timed out");
        report.record_success();

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), 3);
        assert_eq!(report.failures, vec![("a".to_string(), "timed out".to_string())]);
        report.log_summary("test");
    }
}
