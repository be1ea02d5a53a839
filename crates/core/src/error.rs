use crate::types::LegacyId;

/// A structural defect in a legacy record found during normalization
/// (missing barcode, unknown status value, ...).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct NormalizationError(pub String);

/// Record-scoped migration failures. Every variant is recoverable at the
/// batch level: the orchestrator converts it into an audit entry and
/// moves on to the next record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A reference entity that should already have been migrated could
    /// not be found under its legacy identifier.
    #[error("{entity} {legacy_id} not found")]
    ReferenceNotFound {
        entity: &'static str,
        legacy_id: LegacyId,
    },

    #[error("{0}")]
    Normalization(#[from] NormalizationError),

    /// More than one catalog item shares the barcode. The natural-key
    /// uniqueness invariant was violated upstream; never auto-resolved.
    #[error("found {count} items with barcode {barcode}")]
    AmbiguousBarcode { barcode: String, count: usize },

    /// The transactional create failed. The store has already rolled
    /// back; no partial item persists.
    #[error("commit failed: {0}")]
    Commit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_not_found_matches_audit_wording() {
        let err = RecordError::ReferenceNotFound {
            entity: "Document",
            legacy_id: 10,
        };
        assert_eq!(err.to_string(), "Document 10 not found");
    }

    #[test]
    fn ambiguous_barcode_reports_count() {
        let err = RecordError::AmbiguousBarcode {
            barcode: "B7".to_string(),
            count: 2,
        };
        assert_eq!(err.to_string(), "found 2 items with barcode B7");
    }

    #[test]
    fn normalization_error_is_transparent() {
        let err = RecordError::from(NormalizationError("missing barcode".to_string()));
        assert_eq!(err.to_string(), "missing barcode");
    }
}
