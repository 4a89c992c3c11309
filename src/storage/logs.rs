// src/storage/logs.rs

use super::{StorageError, StorageResult};
use crate::models::{LogAction, LogEntry, LogLevel};
use chrono::Utc;
use rusqlite::{Connection, Row, params, types::Type};

fn from_row(row: &Row<'_>) -> rusqlite::Result<LogEntry> {
    let level_raw: String = row.get(3)?;
    let level = level_raw.parse::<LogLevel>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into())
    })?;
    let details_raw: String = row.get(4)?;
    let details = serde_json::from_str(&details_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    Ok(LogEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        action: row.get(2)?,
        level,
        details,
        created_at: row.get(5)?,
    })
}

/// Appends one entry to the audit trail.
pub fn insert(
    conn: &Connection,
    user_id: i64,
    action: LogAction,
    level: LogLevel,
    details: &serde_json::Value,
) -> StorageResult<i64> {
    let details_json = serde_json::to_string(details)?;
    conn.execute(
        "INSERT INTO logs (user_id, action, level, details, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, action.as_str(), level.as_str(), details_json, Utc::now()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent entries of a user, newest first.
pub fn recent_for_user(
    conn: &Connection,
    user_id: i64,
    limit: usize,
    level: Option<LogLevel>,
) -> StorageResult<Vec<LogEntry>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(
        "SELECT id, user_id, action, level, details, created_at FROM logs
         WHERE user_id = ?1 AND (?2 IS NULL OR level = ?2)
         ORDER BY id DESC LIMIT ?3",
    )?;
    let entries = stmt
        .query_map(params![user_id, level.map(LogLevel::as_str), limit], from_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from)?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, users};
    use serde_json::json;

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let user = users::insert(conn, "Ada", "ada@example.com", "hash").unwrap();

        for i in 0..5 {
            insert(conn, user.id, LogAction::FlashcardCreated, LogLevel::Info, &json!({ "n": i })).unwrap();
        }

        let entries = recent_for_user(conn, user.id, 3, None).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].details["n"], 4);
        assert_eq!(entries[2].details["n"], 2);
        assert_eq!(entries[0].action, "flashcard_created");
    }

    #[test]
    fn test_level_filter() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let user = users::insert(conn, "Ada", "ada@example.com", "hash").unwrap();
        insert(conn, user.id, LogAction::PracticeAnswered, LogLevel::Info, &json!({})).unwrap();
        insert(conn, user.id, LogAction::PracticeAnswered, LogLevel::Warning, &json!({})).unwrap();

        let warnings = recent_for_user(conn, user.id, 10, Some(LogLevel::Warning)).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, LogLevel::Warning);
    }

    #[test]
    fn test_logs_are_scoped_to_user() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let ada = users::insert(conn, "Ada", "ada@example.com", "hash").unwrap();
        let bob = users::insert(conn, "Bob", "bob@example.com", "hash").unwrap();
        insert(conn, ada.id, LogAction::UserRegistered, LogLevel::Info, &json!({})).unwrap();

        assert!(recent_for_user(conn, bob.id, 10, None).unwrap().is_empty());
    }
}
