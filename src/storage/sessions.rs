// src/storage/sessions.rs

use super::StorageResult;
use crate::models::StudySession;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "id, user_id, started_at, ended_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<StudySession> {
    Ok(StudySession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        started_at: row.get(2)?,
        ended_at: row.get(3)?,
    })
}

pub fn insert(conn: &Connection, user_id: i64, started_at: DateTime<Utc>) -> StorageResult<StudySession> {
    conn.execute(
        "INSERT INTO study_sessions (user_id, started_at) VALUES (?1, ?2)",
        params![user_id, started_at],
    )?;
    Ok(StudySession {
        id: conn.last_insert_rowid(),
        user_id,
        started_at,
        ended_at: None,
    })
}

pub fn find(conn: &Connection, id: i64) -> StorageResult<Option<StudySession>> {
    let sql = format!("SELECT {COLUMNS} FROM study_sessions WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], from_row).optional()?)
}

/// The most recent open session of a user, if any.
pub fn find_active_for_user(conn: &Connection, user_id: i64) -> StorageResult<Option<StudySession>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM study_sessions WHERE user_id = ?1 AND ended_at IS NULL ORDER BY id DESC LIMIT 1"
    );
    Ok(conn.query_row(&sql, [user_id], from_row).optional()?)
}

pub fn mark_ended(conn: &Connection, id: i64, ended_at: DateTime<Utc>) -> StorageResult<()> {
    conn.execute(
        "UPDATE study_sessions SET ended_at = ?2 WHERE id = ?1 AND ended_at IS NULL",
        params![id, ended_at],
    )?;
    Ok(())
}

pub fn count_for_user(conn: &Connection, user_id: i64) -> StorageResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM study_sessions WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, users};
    use chrono::TimeZone;

    #[test]
    fn test_session_lifecycle() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let user = users::insert(conn, "Ada", "ada@example.com", "hash").unwrap();

        let start = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let session = insert(conn, user.id, start).unwrap();
        assert_eq!(find_active_for_user(conn, user.id).unwrap().unwrap().id, session.id);

        let end = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        mark_ended(conn, session.id, end).unwrap();

        assert!(find_active_for_user(conn, user.id).unwrap().is_none());
        let stored = find(conn, session.id).unwrap().unwrap();
        assert_eq!(stored.started_at, start);
        assert_eq!(stored.ended_at, Some(end));
        assert_eq!(stored.duration_minutes(), Some(30));
        assert_eq!(count_for_user(conn, user.id).unwrap(), 1);
    }

    #[test]
    fn test_ending_twice_keeps_first_end() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let user = users::insert(conn, "Ada", "ada@example.com", "hash").unwrap();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let session = insert(conn, user.id, start).unwrap();

        let first_end = Utc.with_ymd_and_hms(2024, 5, 1, 10, 5, 0).unwrap();
        mark_ended(conn, session.id, first_end).unwrap();
        mark_ended(conn, session.id, Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap()).unwrap();

        assert_eq!(find(conn, session.id).unwrap().unwrap().ended_at, Some(first_end));
    }
}
