// src/storage/practice_results.rs

use super::StorageResult;
use crate::models::PracticeResult;
use chrono::Utc;
use rusqlite::{Connection, Row, params};
use std::collections::HashMap;

fn from_row(row: &Row<'_>) -> rusqlite::Result<PracticeResult> {
    Ok(PracticeResult {
        id: row.get(0)?,
        user_id: row.get(1)?,
        flashcard_id: row.get(2)?,
        study_session_id: row.get(3)?,
        is_correct: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn insert(
    conn: &Connection,
    user_id: i64,
    flashcard_id: i64,
    study_session_id: i64,
    is_correct: bool,
) -> StorageResult<PracticeResult> {
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO practice_results (user_id, flashcard_id, study_session_id, is_correct, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, flashcard_id, study_session_id, is_correct, created_at],
    )?;
    Ok(PracticeResult {
        id: conn.last_insert_rowid(),
        user_id,
        flashcard_id,
        study_session_id,
        is_correct,
        created_at,
    })
}

/// The outcome of the most recent attempt on each card the user has practiced.
pub fn latest_outcomes_for_user(conn: &Connection, user_id: i64) -> StorageResult<HashMap<i64, bool>> {
    let mut stmt = conn.prepare(
        "SELECT flashcard_id, is_correct FROM practice_results
         WHERE id IN (SELECT MAX(id) FROM practice_results WHERE user_id = ?1 GROUP BY flashcard_id)",
    )?;
    let outcomes = stmt
        .query_map([user_id], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, bool>(1)?)))?
        .collect::<Result<HashMap<_, _>, _>>()?;
    Ok(outcomes)
}

pub fn list_for_session(conn: &Connection, study_session_id: i64) -> StorageResult<Vec<PracticeResult>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, flashcard_id, study_session_id, is_correct, created_at
         FROM practice_results WHERE study_session_id = ?1 ORDER BY id",
    )?;
    let results = stmt
        .query_map([study_session_id], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(results)
}

pub fn has_correct_answer(conn: &Connection, user_id: i64, flashcard_id: i64) -> StorageResult<bool> {
    Ok(conn.query_row(
        "SELECT COALESCE((SELECT is_correct FROM practice_results
                          WHERE user_id = ?1 AND flashcard_id = ?2 ORDER BY id DESC LIMIT 1), 0)",
        params![user_id, flashcard_id],
        |row| row.get(0),
    )?)
}

pub fn count_for_user(conn: &Connection, user_id: i64, is_correct: bool) -> StorageResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM practice_results WHERE user_id = ?1 AND is_correct = ?2",
        params![user_id, is_correct],
        |row| row.get(0),
    )?)
}

pub fn delete_for_user(conn: &Connection, user_id: i64) -> StorageResult<usize> {
    Ok(conn.execute("DELETE FROM practice_results WHERE user_id = ?1", [user_id])?)
}
