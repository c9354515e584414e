// Follow-ups service — the operations the follow-ups view and the session
// startup hook call into.

use chrono::{DateTime, Utc};

use crate::db::ConnectionDb;
use crate::error::FollowUpError;
use crate::followups::aggregator::{self, GroupedFollowUps};
use crate::followups::frequency::FollowUpFrequency;
use crate::followups::interaction::{self, ScheduleChange};
use crate::followups::{emitter, parse_instant};

/// The grouped follow-ups view: overdue / this week / coming up.
pub fn get_follow_ups(
    db: &ConnectionDb,
    now: DateTime<Utc>,
) -> Result<GroupedFollowUps, FollowUpError> {
    Ok(aggregator::aggregate(db, now)?)
}

/// "Done" on a follow-up card: log the interaction, advance the schedule,
/// clear the reminder.
pub fn mark_done(
    db: &ConnectionDb,
    connection_id: &str,
    now: DateTime<Utc>,
) -> Result<ScheduleChange, FollowUpError> {
    interaction::log_interaction(db, connection_id, now)
}

/// Defer a follow-up by `days` without recording contact.
pub fn snooze(
    db: &ConnectionDb,
    connection_id: &str,
    days: i64,
    now: DateTime<Utc>,
) -> Result<ScheduleChange, FollowUpError> {
    interaction::snooze(db, connection_id, days, now)
}

/// Opportunistic due-follow-up scan, run on each session start. Safe to call
/// arbitrarily often. Returns the number of notifications created.
pub fn run_due_scan(db: &ConnectionDb, now: DateTime<Utc>) -> Result<usize, FollowUpError> {
    Ok(emitter::scan_and_emit(db, now)?)
}

/// Apply an edit to a connection's follow-up policy (frequency + enabled),
/// recomputing `next_follow_up_at` so it stays derivable from the policy.
///
/// The recompute anchors on the last recorded interaction, falling back to
/// the connection's creation time, falling back to `now` for rows with
/// unparseable stamps.
pub fn update_follow_up_policy(
    db: &ConnectionDb,
    connection_id: &str,
    frequency: FollowUpFrequency,
    enabled: bool,
    now: DateTime<Utc>,
) -> Result<Option<String>, FollowUpError> {
    let connection = db
        .get_connection(connection_id)?
        .ok_or_else(|| FollowUpError::NotFound(connection_id.to_string()))?;

    let anchor = connection
        .last_interaction_at
        .as_deref()
        .and_then(parse_instant)
        .or_else(|| parse_instant(&connection.created_at))
        .unwrap_or(now);
    let next_follow_up_at = frequency.next_due(anchor).map(|due| due.to_rfc3339());

    db.update_follow_up_settings(
        connection_id,
        frequency.as_str(),
        enabled,
        next_follow_up_at.as_deref(),
        &now.to_rfc3339(),
    )?;
    Ok(next_follow_up_at)
}
