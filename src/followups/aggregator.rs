//! Groups follow-up-eligible connections into urgency buckets for the
//! follow-ups view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::{ConnectionDb, DbConnection, DbError, DbTodo};

use super::parse_instant;
use super::urgency::{self, Urgency};

/// How many open todos ride along with each card as display context.
const MAX_CONTEXT_TODOS: i32 = 3;

/// A follow-up-eligible connection enriched for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpEntry {
    pub connection: DbConnection,
    /// Up to three open todos, in the store's stable insertion order.
    pub open_todos: Vec<DbTodo>,
    pub urgency: Urgency,
    pub due_at: DateTime<Utc>,
    /// Indicator copy for the card: "Due today", "Due in N days",
    /// "N days overdue".
    pub status_label: String,
}

/// The three urgency buckets, each sorted soonest-due first.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedFollowUps {
    pub overdue: Vec<FollowUpEntry>,
    pub this_week: Vec<FollowUpEntry>,
    pub coming_up: Vec<FollowUpEntry>,
}

impl GroupedFollowUps {
    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.this_week.is_empty() && self.coming_up.is_empty()
    }
}

/// Build the grouped follow-ups view.
///
/// Eligibility (enabled, recurring frequency, scheduled due date) is enforced
/// by the store query. Each surviving connection is classified against `now`
/// and every bucket is sorted ascending by due date — the front of each list
/// is what the user should act on first.
pub fn aggregate(db: &ConnectionDb, now: DateTime<Utc>) -> Result<GroupedFollowUps, DbError> {
    let eligible = db.list_follow_up_eligible()?;
    let mut groups = GroupedFollowUps::default();

    for connection in eligible {
        let due_at = match connection.next_follow_up_at.as_deref().and_then(parse_instant) {
            Some(due) => due,
            None => {
                log::warn!(
                    "follow-ups: connection {} has unparseable next_follow_up_at, skipping",
                    connection.id
                );
                continue;
            }
        };

        let open_todos = db.list_open_todos(&connection.id, MAX_CONTEXT_TODOS)?;
        let urgency = urgency::classify(due_at, now);
        let entry = FollowUpEntry {
            connection,
            open_todos,
            urgency,
            due_at,
            status_label: urgency::status_label(due_at, now),
        };

        match urgency {
            Urgency::Overdue => groups.overdue.push(entry),
            Urgency::DueSoon => groups.this_week.push(entry),
            Urgency::Upcoming => groups.coming_up.push(entry),
        }
    }

    for bucket in [
        &mut groups.overdue,
        &mut groups.this_week,
        &mut groups.coming_up,
    ] {
        bucket.sort_by_key(|entry| entry.due_at);
    }

    Ok(groups)
}
