/// Numeric keys used by the legacy source system to reference
/// documents and internal locations. Superseded by PIDs after migration.
pub type LegacyId = i64;

/// Persistent identifier minted by the target catalog on entity creation.
pub type Pid = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
