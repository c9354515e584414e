//! The follow-up scheduling engine.
//!
//! Everything here takes `now` as an explicit parameter — no module reads the
//! wall clock — so every schedule computation and state transition is
//! deterministic under test.

use chrono::{DateTime, Utc};

pub mod advisor;
pub mod aggregator;
pub mod emitter;
pub mod frequency;
pub mod interaction;
pub mod urgency;

/// The notification type the engine owns.
pub const FOLLOW_UP_TYPE: &str = "follow_up";

/// Parse a stored RFC 3339 timestamp. Returns `None` on malformed data so
/// callers can skip the row instead of failing the whole scan.
pub(crate) fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{DateTime, Utc};

    use crate::db::DbConnection;

    /// RFC 3339 stamp for a test instant.
    pub fn stamp(at: DateTime<Utc>) -> String {
        at.to_rfc3339()
    }

    /// A follow-up-enabled connection fixture. Last interaction is pinned to
    /// 2026-03-01T12:00Z so elapsed-day assertions stay readable.
    pub fn sample_connection(
        id: &str,
        frequency: &str,
        next_follow_up_at: Option<&str>,
    ) -> DbConnection {
        DbConnection {
            id: id.to_string(),
            name: Some("Sam Okafor".to_string()),
            profession_or_role: Some("Product designer".to_string()),
            relationship_type: "professional".to_string(),
            key_interests: vec!["rock climbing".to_string()],
            important_facts: vec!["Moving to Lisbon in June".to_string()],
            tags: vec!["conference".to_string()],
            follow_up_enabled: true,
            follow_up_frequency: frequency.to_string(),
            last_interaction_at: Some("2026-03-01T12:00:00+00:00".to_string()),
            next_follow_up_at: next_follow_up_at.map(str::to_string),
            is_favorite: false,
            created_at: "2026-02-01T12:00:00+00:00".to_string(),
            updated_at: "2026-03-01T12:00:00+00:00".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_handles_offsets_and_garbage() {
        let parsed = parse_instant("2026-03-08T12:00:00+00:00").expect("valid timestamp");
        assert_eq!(parsed.to_rfc3339(), "2026-03-08T12:00:00+00:00");

        let offset = parse_instant("2026-03-08T14:00:00+02:00").expect("offset timestamp");
        assert_eq!(offset, parsed, "instants compare in UTC");

        assert!(parse_instant("next tuesday").is_none());
        assert!(parse_instant("").is_none());
    }
}
