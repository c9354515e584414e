use rusqlite::params;
use uuid::Uuid;

use super::*;

const NOTIFICATION_COLUMNS: &str =
    "id, connection_id, type, title, message, action_url, is_read, is_dismissed, created_at";

impl ConnectionDb {
    // =========================================================================
    // Notifications
    // =========================================================================

    /// Look up the active (not dismissed) notification of a given type for a
    /// connection, if one exists. At most one can exist — the partial unique
    /// index on `(connection_id, type) WHERE is_dismissed = 0` guarantees it.
    pub fn find_active_notification(
        &self,
        connection_id: &str,
        notification_type: &str,
    ) -> Result<Option<DbNotification>, DbError> {
        let sql = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE connection_id = ?1 AND type = ?2 AND is_dismissed = 0"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![connection_id, notification_type], Self::map_notification_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Insert a notification, assigning its id and creation stamp.
    ///
    /// Uses `INSERT OR IGNORE` so that losing a check-then-insert race against
    /// another session degrades to a no-op instead of a constraint error.
    /// Returns `None` when the row was swallowed by the unique index.
    pub fn insert_notification(
        &self,
        fields: &NewNotification,
        now: &str,
    ) -> Result<Option<DbNotification>, DbError> {
        let id = format!("ntf-{}", Uuid::new_v4());
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO notifications
                (id, connection_id, type, title, message, action_url, is_read, is_dismissed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, 0, ?7)",
            params![
                id,
                fields.connection_id,
                fields.notification_type,
                fields.title,
                fields.message,
                fields.action_url,
                now,
            ],
        )?;
        if inserted == 0 {
            return Ok(None);
        }
        Ok(Some(DbNotification {
            id,
            connection_id: fields.connection_id.clone(),
            notification_type: fields.notification_type.clone(),
            title: fields.title.clone(),
            message: fields.message.clone(),
            action_url: fields.action_url.clone(),
            is_read: false,
            is_dismissed: false,
            created_at: now.to_string(),
        }))
    }

    /// Dismiss all active notifications of a type for a connection.
    /// Returns the number of rows dismissed. Idempotent.
    pub fn dismiss_notifications(
        &self,
        connection_id: &str,
        notification_type: &str,
    ) -> Result<usize, DbError> {
        let dismissed = self.conn.execute(
            "UPDATE notifications SET is_dismissed = 1
             WHERE connection_id = ?1 AND type = ?2 AND is_dismissed = 0",
            params![connection_id, notification_type],
        )?;
        Ok(dismissed)
    }

    /// Dismiss a single notification by id.
    pub fn dismiss_notification(&self, id: &str) -> Result<(), DbError> {
        self.conn.execute(
            "UPDATE notifications SET is_dismissed = 1 WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    /// Active notifications, newest first, for the notification feed.
    pub fn list_active_notifications(&self, limit: i32) -> Result<Vec<DbNotification>, DbError> {
        let sql = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE is_dismissed = 0
             ORDER BY created_at DESC
             LIMIT ?1"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], Self::map_notification_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Count of active, unread notifications (the badge number).
    pub fn unread_notification_count(&self) -> Result<i64, DbError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM notifications WHERE is_dismissed = 0 AND is_read = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Mark a single notification as read.
    pub fn mark_notification_read(&self, id: &str) -> Result<(), DbError> {
        self.conn.execute(
            "UPDATE notifications SET is_read = 1 WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    /// Mark every unread notification as read.
    pub fn mark_all_notifications_read(&self) -> Result<usize, DbError> {
        let updated = self
            .conn
            .execute("UPDATE notifications SET is_read = 1 WHERE is_read = 0", [])?;
        Ok(updated)
    }

    /// Helper: map a row to `DbNotification`.
    fn map_notification_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DbNotification> {
        Ok(DbNotification {
            id: row.get(0)?,
            connection_id: row.get(1)?,
            notification_type: row.get(2)?,
            title: row.get(3)?,
            message: row.get(4)?,
            action_url: row.get(5)?,
            is_read: row.get::<_, i32>(6)? != 0,
            is_dismissed: row.get::<_, i32>(7)? != 0,
            created_at: row.get(8)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_db;
    use super::*;

    fn follow_up_fields(connection_id: &str) -> NewNotification {
        NewNotification {
            connection_id: Some(connection_id.to_string()),
            notification_type: "follow_up".to_string(),
            title: "Time to reconnect with Sam".to_string(),
            message: Some("It's been 9 days since you last connected.".to_string()),
            action_url: Some(format!("/connection/{connection_id}")),
        }
    }

    #[test]
    fn test_insert_then_find_active() {
        let db = test_db();
        let created = db
            .insert_notification(&follow_up_fields("c1"), "2026-03-08T12:00:00+00:00")
            .unwrap()
            .expect("inserted");
        assert!(created.id.starts_with("ntf-"));

        let found = db
            .find_active_notification("c1", "follow_up")
            .unwrap()
            .expect("active row");
        assert_eq!(found.id, created.id);
        assert!(!found.is_read);
    }

    #[test]
    fn test_second_active_insert_is_swallowed() {
        let db = test_db();
        db.insert_notification(&follow_up_fields("c1"), "2026-03-08T12:00:00+00:00")
            .unwrap()
            .expect("first insert lands");
        let second = db
            .insert_notification(&follow_up_fields("c1"), "2026-03-08T12:00:05+00:00")
            .unwrap();
        assert!(second.is_none(), "racing insert must be ignored, not error");
    }

    #[test]
    fn test_dismiss_is_bulk_and_idempotent() {
        let db = test_db();
        db.insert_notification(&follow_up_fields("c1"), "2026-03-08T12:00:00+00:00")
            .unwrap();
        assert_eq!(db.dismiss_notifications("c1", "follow_up").unwrap(), 1);
        assert_eq!(db.dismiss_notifications("c1", "follow_up").unwrap(), 0);
        assert!(db.find_active_notification("c1", "follow_up").unwrap().is_none());
    }

    #[test]
    fn test_feed_ordering_and_unread_count() {
        let db = test_db();
        db.insert_notification(&follow_up_fields("c1"), "2026-03-08T12:00:00+00:00")
            .unwrap();
        db.insert_notification(&follow_up_fields("c2"), "2026-03-09T12:00:00+00:00")
            .unwrap();

        let feed = db.list_active_notifications(20).unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].connection_id.as_deref(), Some("c2"), "newest first");

        assert_eq!(db.unread_notification_count().unwrap(), 2);
        db.mark_notification_read(&feed[0].id).unwrap();
        assert_eq!(db.unread_notification_count().unwrap(), 1);
        db.mark_all_notifications_read().unwrap();
        assert_eq!(db.unread_notification_count().unwrap(), 0);
    }
}
