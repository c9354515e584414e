//! Interaction logger: the state transition that advances a connection's
//! schedule when the user actually gets in touch.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::db::{ConnectionDb, DbError, ScheduleUpdate};
use crate::error::FollowUpError;

use super::frequency::FollowUpFrequency;
use super::FOLLOW_UP_TYPE;

/// The schedule state written by `log_interaction` / `snooze`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleChange {
    pub connection_id: String,
    pub last_interaction_at: Option<String>,
    pub next_follow_up_at: Option<String>,
    pub dismissed_notifications: usize,
}

/// Record that the user connected now: stamp `last_interaction_at`, recompute
/// `next_follow_up_at` from the connection's frequency, and dismiss any
/// outstanding follow-up notifications.
///
/// All writes land in one transaction. Within it the schedule update runs
/// before the dismissal: if the commit fails the schedule hasn't silently
/// advanced past a still-active notification, and a clean retry repeats the
/// whole unit.
pub fn log_interaction(
    db: &ConnectionDb,
    connection_id: &str,
    now: DateTime<Utc>,
) -> Result<ScheduleChange, FollowUpError> {
    let connection = db
        .get_connection(connection_id)?
        .ok_or_else(|| FollowUpError::NotFound(connection_id.to_string()))?;

    let frequency = FollowUpFrequency::from_str_lossy(&connection.follow_up_frequency);
    let now_stamp = now.to_rfc3339();
    let next_follow_up_at = frequency.next_due(now).map(|due| due.to_rfc3339());

    let dismissed = db
        .with_transaction(|tx| {
            tx.update_connection_schedule(
                connection_id,
                &ScheduleUpdate {
                    last_interaction_at: Some(Some(now_stamp.clone())),
                    next_follow_up_at: Some(next_follow_up_at.clone()),
                },
                &now_stamp,
            )
            .map_err(|e| e.to_string())?;
            tx.dismiss_notifications(connection_id, FOLLOW_UP_TYPE)
                .map_err(|e| e.to_string())
        })
        .map_err(DbError::Transaction)?;

    log::info!(
        "follow-ups: logged interaction for {} (next due {:?}, {} notifications dismissed)",
        connection_id,
        next_follow_up_at,
        dismissed
    );

    Ok(ScheduleChange {
        connection_id: connection_id.to_string(),
        last_interaction_at: Some(now_stamp),
        next_follow_up_at,
        dismissed_notifications: dismissed,
    })
}

/// Push the next follow-up out by `days` without recording contact.
///
/// Deliberately leaves `last_interaction_at` and any active notifications
/// alone: the user hasn't connected, they've only deferred the reminder.
pub fn snooze(
    db: &ConnectionDb,
    connection_id: &str,
    days: i64,
    now: DateTime<Utc>,
) -> Result<ScheduleChange, FollowUpError> {
    let connection = db
        .get_connection(connection_id)?
        .ok_or_else(|| FollowUpError::NotFound(connection_id.to_string()))?;

    let next_follow_up_at = (now + Duration::days(days)).to_rfc3339();
    db.update_connection_schedule(
        connection_id,
        &ScheduleUpdate {
            last_interaction_at: None,
            next_follow_up_at: Some(Some(next_follow_up_at.clone())),
        },
        &now.to_rfc3339(),
    )?;

    Ok(ScheduleChange {
        connection_id: connection_id.to_string(),
        last_interaction_at: connection.last_interaction_at,
        next_follow_up_at: Some(next_follow_up_at),
        dismissed_notifications: 0,
    })
}
