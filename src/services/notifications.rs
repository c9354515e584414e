// Notification feed service — what the bell icon and its dropdown call into.

use crate::db::{ConnectionDb, DbNotification};
use crate::error::FollowUpError;

/// Default page size for the notification feed.
const DEFAULT_FEED_LIMIT: i32 = 20;

/// Active notifications, newest first.
pub fn list_feed(
    db: &ConnectionDb,
    limit: Option<i32>,
) -> Result<Vec<DbNotification>, FollowUpError> {
    Ok(db.list_active_notifications(limit.unwrap_or(DEFAULT_FEED_LIMIT))?)
}

/// Badge count: active and unread.
pub fn unread_count(db: &ConnectionDb) -> Result<i64, FollowUpError> {
    Ok(db.unread_notification_count()?)
}

/// Mark a single notification read.
pub fn mark_read(db: &ConnectionDb, id: &str) -> Result<(), FollowUpError> {
    Ok(db.mark_notification_read(id)?)
}

/// Mark every unread notification read.
pub fn mark_all_read(db: &ConnectionDb) -> Result<usize, FollowUpError> {
    Ok(db.mark_all_notifications_read()?)
}

/// Dismiss one notification from the feed.
pub fn dismiss(db: &ConnectionDb, id: &str) -> Result<(), FollowUpError> {
    Ok(db.dismiss_notification(id)?)
}
