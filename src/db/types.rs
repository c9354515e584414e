//! Shared type definitions for the database layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors specific to database operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Failed to create database directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Schema migration failed: {0}")]
    Migration(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),
}

/// A row from the `connections` table.
///
/// `key_interests`, `important_facts`, and `tags` are JSON arrays decoded from
/// TEXT columns. Schedule timestamps are RFC 3339 UTC strings; `None` means
/// no recorded interaction / no scheduled reminder.
///
/// Invariant: every timestamp this crate writes comes from chrono's
/// `to_rfc3339()` on a `DateTime<Utc>`, so stamps always carry the `+00:00`
/// offset form. The SQL due/eligibility filters compare these strings
/// lexicographically, which is only correct within that one normalized form.
/// Rows written by other tools (e.g. with a `Z` suffix) would sort after
/// their `+00:00` equivalent and must be normalized before insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbConnection {
    pub id: String,
    pub name: Option<String>,
    pub profession_or_role: Option<String>,
    pub relationship_type: String,
    pub key_interests: Vec<String>,
    pub important_facts: Vec<String>,
    pub tags: Vec<String>,
    pub follow_up_enabled: bool,
    pub follow_up_frequency: String,
    pub last_interaction_at: Option<String>,
    pub next_follow_up_at: Option<String>,
    pub is_favorite: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A row from the `notifications` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbNotification {
    pub id: String,
    pub connection_id: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub message: Option<String>,
    pub action_url: Option<String>,
    pub is_read: bool,
    pub is_dismissed: bool,
    pub created_at: String,
}

/// Fields for inserting a new notification. The id and created_at stamp are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub connection_id: Option<String>,
    pub notification_type: String,
    pub title: String,
    pub message: Option<String>,
    pub action_url: Option<String>,
}

/// A row from the `todos` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbTodo {
    pub id: String,
    pub connection_id: Option<String>,
    pub text: String,
    pub is_completed: bool,
    pub created_at: String,
}

/// Partial update for a connection's schedule fields.
///
/// The outer `Option` distinguishes "leave untouched" from "set to this
/// value"; the inner `Option` carries the nullable column value.
#[derive(Debug, Clone, Default)]
pub struct ScheduleUpdate {
    pub last_interaction_at: Option<Option<String>>,
    pub next_follow_up_at: Option<Option<String>>,
}

/// Decode a JSON-array TEXT column, degrading to empty on NULL or bad data.
pub(crate) fn decode_string_list(raw: Option<String>) -> Vec<String> {
    match raw {
        Some(s) if !s.is_empty() => serde_json::from_str(&s).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Encode a string list as a JSON-array TEXT column value.
pub(crate) fn encode_string_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
