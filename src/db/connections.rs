use rusqlite::params;

use super::*;

const CONNECTION_COLUMNS: &str = "id, name, profession_or_role, relationship_type, key_interests,
        important_facts, tags, follow_up_enabled, follow_up_frequency,
        last_interaction_at, next_follow_up_at, is_favorite, created_at, updated_at";

impl ConnectionDb {
    // =========================================================================
    // Connections
    // =========================================================================

    /// Insert or update a connection. Returns true if the row was newly
    /// inserted (not updated).
    pub fn upsert_connection(&self, connection: &DbConnection) -> Result<bool, DbError> {
        let existed: bool = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM connections WHERE id = ?1)",
                params![connection.id],
                |row| row.get(0),
            )
            .unwrap_or(true);

        self.conn.execute(
            "INSERT INTO connections (
                id, name, profession_or_role, relationship_type, key_interests,
                important_facts, tags, follow_up_enabled, follow_up_frequency,
                last_interaction_at, next_follow_up_at, is_favorite, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
             ON CONFLICT(id) DO UPDATE SET
                name = COALESCE(excluded.name, connections.name),
                profession_or_role = COALESCE(excluded.profession_or_role, connections.profession_or_role),
                relationship_type = excluded.relationship_type,
                key_interests = excluded.key_interests,
                important_facts = excluded.important_facts,
                tags = excluded.tags,
                follow_up_enabled = excluded.follow_up_enabled,
                follow_up_frequency = excluded.follow_up_frequency,
                last_interaction_at = excluded.last_interaction_at,
                next_follow_up_at = excluded.next_follow_up_at,
                is_favorite = excluded.is_favorite,
                updated_at = excluded.updated_at",
            params![
                connection.id,
                connection.name,
                connection.profession_or_role,
                connection.relationship_type,
                encode_string_list(&connection.key_interests),
                encode_string_list(&connection.important_facts),
                encode_string_list(&connection.tags),
                connection.follow_up_enabled as i32,
                connection.follow_up_frequency,
                connection.last_interaction_at,
                connection.next_follow_up_at,
                connection.is_favorite as i32,
                connection.created_at,
                connection.updated_at,
            ],
        )?;
        Ok(!existed)
    }

    /// Get a connection by ID.
    pub fn get_connection(&self, id: &str) -> Result<Option<DbConnection>, DbError> {
        let sql = format!("SELECT {CONNECTION_COLUMNS} FROM connections WHERE id = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![id], Self::map_connection_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// All connections participating in follow-up logic: reminders enabled, a
    /// recurring frequency, and a scheduled due date. Ordered soonest-due
    /// first, which is the order the urgency buckets preserve.
    pub fn list_follow_up_eligible(&self) -> Result<Vec<DbConnection>, DbError> {
        let sql = format!(
            "SELECT {CONNECTION_COLUMNS} FROM connections
             WHERE follow_up_enabled = 1
               AND follow_up_frequency != 'none'
               AND next_follow_up_at IS NOT NULL
             ORDER BY next_follow_up_at ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::map_connection_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Eligible connections whose follow-up is due at or before `now`.
    ///
    /// Stored stamps all use the `+00:00` offset form (see [`DbConnection`]),
    /// so within that single format the due check can compare strings
    /// directly in SQL.
    pub fn list_due_follow_ups(&self, now: &str) -> Result<Vec<DbConnection>, DbError> {
        let sql = format!(
            "SELECT {CONNECTION_COLUMNS} FROM connections
             WHERE follow_up_enabled = 1
               AND follow_up_frequency != 'none'
               AND next_follow_up_at IS NOT NULL
               AND next_follow_up_at <= ?1
             ORDER BY next_follow_up_at ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![now], Self::map_connection_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Apply a partial update to a connection's schedule fields.
    ///
    /// Only the fields present in the update are written. Callers that need
    /// both writes plus notification dismissal to land together wrap this in
    /// `with_transaction`.
    pub fn update_connection_schedule(
        &self,
        id: &str,
        update: &ScheduleUpdate,
        now: &str,
    ) -> Result<(), DbError> {
        if let Some(ref last_interaction_at) = update.last_interaction_at {
            self.conn.execute(
                "UPDATE connections SET last_interaction_at = ?1, updated_at = ?3 WHERE id = ?2",
                params![last_interaction_at, id, now],
            )?;
        }
        if let Some(ref next_follow_up_at) = update.next_follow_up_at {
            self.conn.execute(
                "UPDATE connections SET next_follow_up_at = ?1, updated_at = ?3 WHERE id = ?2",
                params![next_follow_up_at, id, now],
            )?;
        }
        Ok(())
    }

    /// Rewrite a connection's follow-up policy fields in one statement.
    /// The recomputed `next_follow_up_at` is decided by the caller.
    pub fn update_follow_up_settings(
        &self,
        id: &str,
        frequency: &str,
        enabled: bool,
        next_follow_up_at: Option<&str>,
        now: &str,
    ) -> Result<(), DbError> {
        self.conn.execute(
            "UPDATE connections SET
                follow_up_frequency = ?1,
                follow_up_enabled = ?2,
                next_follow_up_at = ?3,
                updated_at = ?5
             WHERE id = ?4",
            params![frequency, enabled as i32, next_follow_up_at, id, now],
        )?;
        Ok(())
    }

    /// Helper: map a row to `DbConnection`.
    fn map_connection_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DbConnection> {
        Ok(DbConnection {
            id: row.get(0)?,
            name: row.get(1)?,
            profession_or_role: row.get(2)?,
            relationship_type: row.get(3)?,
            key_interests: decode_string_list(row.get(4)?),
            important_facts: decode_string_list(row.get(5)?),
            tags: decode_string_list(row.get(6)?),
            follow_up_enabled: row.get::<_, i32>(7)? != 0,
            follow_up_frequency: row.get(8)?,
            last_interaction_at: row.get(9)?,
            next_follow_up_at: row.get(10)?,
            is_favorite: row.get::<_, i32>(11).unwrap_or(0) != 0,
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }
}
