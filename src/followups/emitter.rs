//! Notification emitter: scans for newly-due follow-ups and raises at most
//! one active notification per connection.
//!
//! The scan runs opportunistically (every session start is typical), so it
//! must be safe under arbitrary repetition: the active-notification check
//! plus the store's partial unique index guarantee repeated or racing scans
//! never produce duplicates.

use chrono::{DateTime, Utc};

use crate::db::{ConnectionDb, DbConnection, DbError, NewNotification};

use super::urgency::days_since;
use super::{parse_instant, FOLLOW_UP_TYPE};

/// Scan eligible connections whose follow-up is due at or before `now` and
/// emit a reminder notification for each that doesn't already have an active
/// one. Returns the number of notifications created.
pub fn scan_and_emit(db: &ConnectionDb, now: DateTime<Utc>) -> Result<usize, DbError> {
    let due = db.list_due_follow_ups(&now.to_rfc3339())?;
    let mut created = 0usize;

    for connection in &due {
        // Idempotence guard: one active follow_up notification per connection
        if db.find_active_notification(&connection.id, FOLLOW_UP_TYPE)?.is_some() {
            continue;
        }

        let fields = build_reminder(connection, now);
        match db.insert_notification(&fields, &now.to_rfc3339())? {
            Some(notification) => {
                created += 1;
                log::info!(
                    "follow-ups: emitted {} for connection {}",
                    notification.id,
                    connection.id
                );
            }
            // Another session won the insert race; their notification stands
            None => log::info!(
                "follow-ups: concurrent scan already notified connection {}",
                connection.id
            ),
        }
    }

    Ok(created)
}

/// Compose the reminder for a due connection.
///
/// The elapsed-day count runs from the last recorded interaction, or from the
/// connection's creation when there has never been one. When the connection
/// has recorded interests, the first one personalizes the message.
fn build_reminder(connection: &DbConnection, now: DateTime<Utc>) -> NewNotification {
    let since = connection
        .last_interaction_at
        .as_deref()
        .and_then(parse_instant)
        .or_else(|| parse_instant(&connection.created_at));
    let elapsed_days = since.map(|then| days_since(then, now)).unwrap_or(0);

    let message = match connection.key_interests.first() {
        Some(interest) => format!(
            "It's been {} days. Ask about their {}?",
            elapsed_days, interest
        ),
        None => format!(
            "It's been {} days since you last connected.",
            elapsed_days
        ),
    };

    let display_name = connection.name.as_deref().unwrap_or("this contact");

    NewNotification {
        connection_id: Some(connection.id.clone()),
        notification_type: FOLLOW_UP_TYPE.to_string(),
        title: format!("Time to reconnect with {}", display_name),
        message: Some(message),
        action_url: Some(format!("/connection/{}", connection.id)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::db::test_utils::test_db;
    use crate::followups::testing::{sample_connection, stamp};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 8, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_due_connection_gets_one_notification() {
        let _ = env_logger::builder().is_test(true).try_init();
        let db = test_db();
        db.upsert_connection(&sample_connection(
            "c1",
            "weekly",
            Some(&stamp(now() - Duration::days(2))),
        ))
        .unwrap();

        assert_eq!(scan_and_emit(&db, now()).unwrap(), 1);

        let notification = db
            .find_active_notification("c1", FOLLOW_UP_TYPE)
            .unwrap()
            .expect("notification exists");
        assert_eq!(notification.title, "Time to reconnect with Sam Okafor");
    }

    #[test]
    fn test_repeated_scan_does_not_duplicate() {
        let db = test_db();
        db.upsert_connection(&sample_connection(
            "c1",
            "weekly",
            Some(&stamp(now() - Duration::days(2))),
        ))
        .unwrap();

        assert_eq!(scan_and_emit(&db, now()).unwrap(), 1);
        assert_eq!(scan_and_emit(&db, now()).unwrap(), 0);
        // Later scan before the schedule advances still finds the active row
        assert_eq!(scan_and_emit(&db, now() + Duration::hours(6)).unwrap(), 0);

        assert_eq!(db.list_active_notifications(20).unwrap().len(), 1);
    }

    #[test]
    fn test_not_yet_due_is_skipped() {
        let db = test_db();
        db.upsert_connection(&sample_connection(
            "c1",
            "weekly",
            Some(&stamp(now() + Duration::days(3))),
        ))
        .unwrap();
        assert_eq!(scan_and_emit(&db, now()).unwrap(), 0);
    }

    #[test]
    fn test_frequency_none_never_emits() {
        let db = test_db();
        // Stale due date left behind by a prior frequency setting
        db.upsert_connection(&sample_connection(
            "c1",
            "none",
            Some(&stamp(now() - Duration::days(30))),
        ))
        .unwrap();
        assert_eq!(scan_and_emit(&db, now()).unwrap(), 0);
        assert!(db.list_active_notifications(20).unwrap().is_empty());
    }

    #[test]
    fn test_message_personalized_with_first_interest() {
        let db = test_db();
        let mut conn = sample_connection("c1", "weekly", Some(&stamp(now() - Duration::days(2))));
        conn.last_interaction_at = Some(stamp(now() - Duration::days(9)));
        db.upsert_connection(&conn).unwrap();

        scan_and_emit(&db, now()).unwrap();
        let notification = db.find_active_notification("c1", FOLLOW_UP_TYPE).unwrap().unwrap();
        assert_eq!(
            notification.message.as_deref(),
            Some("It's been 9 days. Ask about their rock climbing?")
        );
    }

    #[test]
    fn test_generic_message_without_interests_uses_creation_time() {
        let db = test_db();
        let mut conn = sample_connection("c1", "weekly", Some(&stamp(now() - Duration::days(2))));
        conn.key_interests = Vec::new();
        conn.last_interaction_at = None;
        conn.created_at = stamp(now() - Duration::days(12));
        db.upsert_connection(&conn).unwrap();

        scan_and_emit(&db, now()).unwrap();
        let notification = db.find_active_notification("c1", FOLLOW_UP_TYPE).unwrap().unwrap();
        assert_eq!(
            notification.message.as_deref(),
            Some("It's been 12 days since you last connected.")
        );
    }
}
