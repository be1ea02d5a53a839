//! Per-record migration outcomes and batch-level bookkeeping.

use serde::Serialize;

use crate::types::Pid;

/// The terminal state of one legacy record after a pipeline pass.
/// Every input record yields exactly one outcome; none are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// A new catalog item was created and committed.
    Imported { pid: Pid },
    /// An item with this barcode already exists; benign skip, keeps
    /// reruns idempotent.
    SkippedDuplicate { existing_pid: Pid },
    /// Neither the primary legacy-id lookup nor the barcode fallback
    /// found the document.
    SkippedUnresolvedDocument,
    /// Any other record-scoped failure (location miss, normalization,
    /// ambiguous barcode, commit failure).
    Errored { reason: String },
}

impl MigrationOutcome {
    /// `true` for the benign skips that carry no error entry.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::SkippedDuplicate { .. })
    }
}

/// Ordered record of what happened to every record in a batch, plus
/// running counts for the end-of-run summary.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    entries: Vec<(String, MigrationOutcome)>,
    pub imported: usize,
    pub duplicates: usize,
    pub unresolved_documents: usize,
    pub errors: usize,
}

impl BatchReport {
    /// Record the outcome for one barcode, in input order.
    pub fn push(&mut self, barcode: String, outcome: MigrationOutcome) {
        match &outcome {
            MigrationOutcome::Imported { .. } => self.imported += 1,
            MigrationOutcome::SkippedDuplicate { .. } => self.duplicates += 1,
            MigrationOutcome::SkippedUnresolvedDocument => self.unresolved_documents += 1,
            MigrationOutcome::Errored { .. } => self.errors += 1,
        }
        self.entries.push((barcode, outcome));
    }

    /// All outcomes in input order.
    pub fn entries(&self) -> &[(String, MigrationOutcome)] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_updates_counts() {
        let mut report = BatchReport::default();
        report.push(
            "B1".to_string(),
            MigrationOutcome::Imported {
                pid: "I1".to_string(),
            },
        );
        report.push(
            "B2".to_string(),
            MigrationOutcome::SkippedDuplicate {
                existing_pid: "I1".to_string(),
            },
        );
        report.push("B3".to_string(), MigrationOutcome::SkippedUnresolvedDocument);
        report.push(
            "B4".to_string(),
            MigrationOutcome::Errored {
                reason: "missing barcode".to_string(),
            },
        );

        assert_eq!(report.imported, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.unresolved_documents, 1);
        assert_eq!(report.errors, 1);
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn entries_preserve_input_order() {
        let mut report = BatchReport::default();
        report.push("B2".to_string(), MigrationOutcome::SkippedUnresolvedDocument);
        report.push(
            "B1".to_string(),
            MigrationOutcome::Imported {
                pid: "I1".to_string(),
            },
        );

        let barcodes: Vec<&str> = report.entries().iter().map(|(b, _)| b.as_str()).collect();
        assert_eq!(barcodes, vec!["B2", "B1"]);
    }

    #[test]
    fn only_duplicate_counts_as_benign_skip() {
        assert!(MigrationOutcome::SkippedDuplicate {
            existing_pid: "I1".to_string()
        }
        .is_skip());
        assert!(!MigrationOutcome::SkippedUnresolvedDocument.is_skip());
        assert!(!MigrationOutcome::Errored {
            reason: "x".to_string()
        }
        .is_skip());
    }
}
