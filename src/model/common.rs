use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

pub type Id = Uuid;

pub fn generate_id() -> Id {
    Uuid::new_v4()
}

/// Payload ids are optional; a nil UUID counts as "not supplied".
pub fn supplied_id(id: Option<Id>) -> Option<Id> {
    id.filter(|id| !id.is_nil())
}

/// Timestamps are optional too; the zero date `0001-01-01T00:00:00Z` counts
/// as "not supplied".
pub fn supplied_timestamp(timestamp: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    let unset = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).single();
    timestamp.filter(|t| Some(*t) != unset)
}
