//! Legacy item records as they appear in the dump, and the cleaned
//! target-schema form produced by normalization.

use serde::{Deserialize, Serialize};

use crate::types::LegacyId;

// ---------------------------------------------------------------------------
// Legacy input
// ---------------------------------------------------------------------------

/// One raw item object from the legacy dump file. Read-only input,
/// consumed once per batch.
///
/// The legacy key names (`id_bibrec`, `id_crcLIBRARY`) are preserved on
/// the wire; unknown dump keys are ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyItemRecord {
    /// Natural key for the physical item; globally unique post-migration.
    /// Defaulted when absent so that a record missing its barcode fails
    /// normalization instead of aborting the whole dump parse.
    #[serde(default)]
    pub barcode: String,

    /// Legacy numeric reference to the bibliographic record.
    #[serde(rename = "id_bibrec")]
    pub legacy_document_id: LegacyId,

    /// Legacy numeric reference to the internal location (library).
    #[serde(rename = "id_crcLIBRARY")]
    pub legacy_location_id: LegacyId,

    /// Legacy circulation status string, mapped to [`ItemStatus`] by the
    /// normalizer.
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub shelf: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Legacy-only field; dropped during normalization.
    #[serde(default)]
    pub creation_date: Option<String>,

    /// Legacy-only field; dropped during normalization.
    #[serde(default)]
    pub modification_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Item status
// ---------------------------------------------------------------------------

/// Circulation status of an item in the target catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    CanCirculate,
    ForReference,
    Missing,
    InBinding,
    Scrapped,
}

impl ItemStatus {
    /// Return the status name as stored in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CanCirculate => "CAN_CIRCULATE",
            Self::ForReference => "FOR_REFERENCE",
            Self::Missing => "MISSING",
            Self::InBinding => "IN_BINDING",
            Self::Scrapped => "SCRAPPED",
        }
    }

    /// Parse a stored status string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CAN_CIRCULATE" => Some(Self::CanCirculate),
            "FOR_REFERENCE" => Some(Self::ForReference),
            "MISSING" => Some(Self::Missing),
            "IN_BINDING" => Some(Self::InBinding),
            "SCRAPPED" => Some(Self::Scrapped),
            _ => None,
        }
    }

    /// All valid stored status values.
    pub const ALL: &'static [&'static str] = &[
        "CAN_CIRCULATE",
        "FOR_REFERENCE",
        "MISSING",
        "IN_BINDING",
        "SCRAPPED",
    ];
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Cleaned output
// ---------------------------------------------------------------------------

/// A legacy record reshaped into the target schema. Produced by
/// [`crate::normalize::normalize`]; legacy-only fields are gone and the
/// required fields have been validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanItemRecord {
    pub barcode: String,
    pub legacy_document_id: LegacyId,
    pub legacy_location_id: LegacyId,
    pub status: ItemStatus,
    pub shelf: Option<String>,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
