/// All record identifiers are UUIDs (v7, so they sort by creation time).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh record identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}

/// Parse a client-supplied identifier.
///
/// Malformed input yields `None` so callers can treat it exactly like an id
/// that does not resolve.
pub fn parse_id(raw: &str) -> Option<DbId> {
    uuid::Uuid::parse_str(raw.trim()).ok()
}
