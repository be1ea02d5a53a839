//! Record normalization: reshape a raw legacy item into the target
//! schema. Pure transformation, no I/O, safe to retry.

use crate::error::NormalizationError;
use crate::record::{CleanItemRecord, ItemStatus, LegacyItemRecord};

/// Clean a raw legacy record into a [`CleanItemRecord`].
///
/// Strips legacy-only fields, trims string fields, and validates the
/// structural invariants: a non-empty barcode and a recognized legacy
/// status value. Failure is record-scoped; the batch continues.
pub fn normalize(record: &LegacyItemRecord) -> Result<CleanItemRecord, NormalizationError> {
    let barcode = record.barcode.trim();
    if barcode.is_empty() {
        return Err(NormalizationError("missing barcode".to_string()));
    }

    Ok(CleanItemRecord {
        barcode: barcode.to_string(),
        legacy_document_id: record.legacy_document_id,
        legacy_location_id: record.legacy_location_id,
        status: map_legacy_status(record.status.as_deref())?,
        shelf: clean_optional(record.shelf.as_deref()),
        description: clean_optional(record.description.as_deref()),
    })
}

/// Map a legacy circulation status string onto the catalog vocabulary.
///
/// An absent or blank status means the item circulates; loan state is
/// not carried over, so "on loan" also maps to `CanCirculate`.
fn map_legacy_status(raw: Option<&str>) -> Result<ItemStatus, NormalizationError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(ItemStatus::CanCirculate);
    };

    match raw.to_lowercase().as_str() {
        "on shelf" | "on loan" => Ok(ItemStatus::CanCirculate),
        "for reference" => Ok(ItemStatus::ForReference),
        "missing" => Ok(ItemStatus::Missing),
        "in binding" => Ok(ItemStatus::InBinding),
        "scrapped" | "lost" => Ok(ItemStatus::Scrapped),
        other => Err(NormalizationError(format!("unknown status '{other}'"))),
    }
}

/// Trim an optional field; blank collapses to `None`.
fn clean_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_record(barcode: &str, status: Option<&str>) -> LegacyItemRecord {
        LegacyItemRecord {
            barcode: barcode.to_string(),
            legacy_document_id: 10,
            legacy_location_id: 1,
            status: status.map(String::from),
            shelf: None,
            description: None,
            creation_date: None,
            modification_date: None,
        }
    }

    // -- barcode tests --------------------------------------------------------

    #[test]
    fn barcode_is_trimmed() {
        let clean = normalize(&raw_record("  B1  ", None)).unwrap();
        assert_eq!(clean.barcode, "B1");
    }

    #[test]
    fn missing_barcode_rejected() {
        let err = normalize(&raw_record("", None)).unwrap_err();
        assert_eq!(err.to_string(), "missing barcode");
    }

    #[test]
    fn whitespace_barcode_rejected() {
        assert!(normalize(&raw_record("   ", None)).is_err());
    }

    // -- status mapping tests -------------------------------------------------

    #[test]
    fn absent_status_defaults_to_circulating() {
        let clean = normalize(&raw_record("B1", None)).unwrap();
        assert_eq!(clean.status, ItemStatus::CanCirculate);
    }

    #[test]
    fn legacy_status_mapping() {
        let cases = [
            ("on shelf", ItemStatus::CanCirculate),
            ("on loan", ItemStatus::CanCirculate),
            ("for reference", ItemStatus::ForReference),
            ("missing", ItemStatus::Missing),
            ("in binding", ItemStatus::InBinding),
            ("scrapped", ItemStatus::Scrapped),
            ("lost", ItemStatus::Scrapped),
        ];
        for (legacy, expected) in cases {
            let clean = normalize(&raw_record("B1", Some(legacy))).unwrap();
            assert_eq!(clean.status, expected, "legacy status: {legacy}");
        }
    }

    #[test]
    fn status_mapping_is_case_insensitive() {
        let clean = normalize(&raw_record("B1", Some("On Shelf"))).unwrap();
        assert_eq!(clean.status, ItemStatus::CanCirculate);
    }

    #[test]
    fn unknown_status_rejected_with_value_in_reason() {
        let err = normalize(&raw_record("B1", Some("vaporized"))).unwrap_err();
        assert_eq!(err.to_string(), "unknown status 'vaporized'");
    }

    // -- passthrough field tests ----------------------------------------------

    #[test]
    fn shelf_and_description_are_trimmed() {
        let mut record = raw_record("B1", None);
        record.shelf = Some(" A-12 ".to_string());
        record.description = Some("  ".to_string());

        let clean = normalize(&record).unwrap();
        assert_eq!(clean.shelf.as_deref(), Some("A-12"));
        assert!(clean.description.is_none());
    }

    #[test]
    fn legacy_only_fields_are_dropped() {
        let mut record = raw_record("B1", None);
        record.creation_date = Some("1999-04-21".to_string());

        let clean = normalize(&record).unwrap();
        // CleanItemRecord has no creation_date field; the legacy ids are
        // kept because resolution still needs them downstream.
        assert_eq!(clean.legacy_document_id, 10);
        assert_eq!(clean.legacy_location_id, 1);
    }

    #[test]
    fn normalize_is_retry_safe() {
        let record = raw_record("B1", Some("missing"));
        let first = normalize(&record).unwrap();
        let second = normalize(&record).unwrap();
        assert_eq!(first, second);
    }
}
