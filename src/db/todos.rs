use rusqlite::params;
use uuid::Uuid;

use super::*;

impl ConnectionDb {
    // =========================================================================
    // Todos (display context for follow-up cards — never mutated by the engine)
    // =========================================================================

    /// Insert a todo for a connection.
    pub fn insert_todo(
        &self,
        connection_id: Option<&str>,
        text: &str,
        now: &str,
    ) -> Result<DbTodo, DbError> {
        let id = format!("todo-{}", Uuid::new_v4());
        self.conn.execute(
            "INSERT INTO todos (id, connection_id, text, is_completed, created_at)
             VALUES (?1, ?2, ?3, 0, ?4)",
            params![id, connection_id, text, now],
        )?;
        Ok(DbTodo {
            id,
            connection_id: connection_id.map(str::to_string),
            text: text.to_string(),
            is_completed: false,
            created_at: now.to_string(),
        })
    }

    /// Mark a todo completed.
    pub fn complete_todo(&self, id: &str) -> Result<(), DbError> {
        self.conn.execute(
            "UPDATE todos SET is_completed = 1 WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    /// Open (incomplete) todos for a connection, oldest first, capped at
    /// `limit`. Insertion order is the stable order the follow-up cards show.
    pub fn list_open_todos(&self, connection_id: &str, limit: i32) -> Result<Vec<DbTodo>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, connection_id, text, is_completed, created_at
             FROM todos
             WHERE connection_id = ?1 AND is_completed = 0
             ORDER BY created_at ASC, id ASC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![connection_id, limit], |row| {
            Ok(DbTodo {
                id: row.get(0)?,
                connection_id: row.get(1)?,
                text: row.get(2)?,
                is_completed: row.get::<_, i32>(3)? != 0,
                created_at: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_db;

    #[test]
    fn test_open_todos_cap_and_completion_filter() {
        let db = test_db();
        for i in 0..5 {
            db.insert_todo(
                Some("c1"),
                &format!("todo {i}"),
                &format!("2026-03-0{}T12:00:00+00:00", i + 1),
            )
            .unwrap();
        }
        let done = db.insert_todo(Some("c1"), "done already", "2026-03-01T00:00:00+00:00").unwrap();
        db.complete_todo(&done.id).unwrap();

        let open = db.list_open_todos("c1", 3).unwrap();
        assert_eq!(open.len(), 3, "capped at limit");
        assert_eq!(open[0].text, "todo 0", "oldest first");
        assert!(open.iter().all(|t| !t.is_completed));
    }
}
