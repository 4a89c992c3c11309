// src/storage/statistics.rs

use super::StorageResult;
use crate::models::{Counter, Statistic};
use rusqlite::{Connection, Row, params};

const COLUMNS: &str = "id, user_id, total_flashcards, total_study_sessions, total_correct_answers, total_incorrect_answers";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Statistic> {
    Ok(Statistic {
        id: row.get(0)?,
        user_id: row.get(1)?,
        total_flashcards: row.get(2)?,
        total_study_sessions: row.get(3)?,
        total_correct_answers: row.get(4)?,
        total_incorrect_answers: row.get(5)?,
    })
}

/// Returns the user's counters, creating a zeroed row on first use.
pub fn ensure_for_user(conn: &Connection, user_id: i64) -> StorageResult<Statistic> {
    conn.execute(
        "INSERT OR IGNORE INTO statistics (user_id) VALUES (?1)",
        [user_id],
    )?;
    let sql = format!("SELECT {COLUMNS} FROM statistics WHERE user_id = ?1");
    Ok(conn.query_row(&sql, [user_id], from_row)?)
}

/// Adds `delta` to one counter in a single statement. Counters never go below zero.
pub fn adjust(conn: &Connection, user_id: i64, counter: Counter, delta: i64) -> StorageResult<()> {
    ensure_for_user(conn, user_id)?;
    let column = counter.column();
    let sql = format!("UPDATE statistics SET {column} = MAX(0, {column} + ?2) WHERE user_id = ?1");
    conn.execute(&sql, params![user_id, delta])?;
    Ok(())
}

pub fn increment(conn: &Connection, user_id: i64, counter: Counter) -> StorageResult<()> {
    adjust(conn, user_id, counter, 1)
}

pub fn decrement(conn: &Connection, user_id: i64, counter: Counter) -> StorageResult<()> {
    adjust(conn, user_id, counter, -1)
}

pub fn reset_answers(conn: &Connection, user_id: i64) -> StorageResult<()> {
    ensure_for_user(conn, user_id)?;
    conn.execute(
        "UPDATE statistics SET total_correct_answers = 0, total_incorrect_answers = 0 WHERE user_id = ?1",
        [user_id],
    )?;
    Ok(())
}

/// Replaces every counter of the user's row with the given values.
pub fn overwrite(conn: &Connection, stat: &Statistic) -> StorageResult<Statistic> {
    ensure_for_user(conn, stat.user_id)?;
    conn.execute(
        "UPDATE statistics SET total_flashcards = ?2, total_study_sessions = ?3,
             total_correct_answers = ?4, total_incorrect_answers = ?5
         WHERE user_id = ?1",
        params![
            stat.user_id,
            stat.total_flashcards,
            stat.total_study_sessions,
            stat.total_correct_answers,
            stat.total_incorrect_answers
        ],
    )?;
    ensure_for_user(conn, stat.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, users};

    #[test]
    fn test_counters_start_at_zero_and_move() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let user = users::insert(conn, "Ada", "ada@example.com", "hash").unwrap();

        let initial = ensure_for_user(conn, user.id).unwrap();
        assert_eq!(initial.total_flashcards, 0);

        increment(conn, user.id, Counter::Flashcards).unwrap();
        increment(conn, user.id, Counter::Flashcards).unwrap();
        increment(conn, user.id, Counter::CorrectAnswers).unwrap();
        decrement(conn, user.id, Counter::Flashcards).unwrap();

        let stat = ensure_for_user(conn, user.id).unwrap();
        assert_eq!(stat.id, initial.id);
        assert_eq!(stat.total_flashcards, 1);
        assert_eq!(stat.total_correct_answers, 1);
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let user = users::insert(conn, "Ada", "ada@example.com", "hash").unwrap();

        decrement(conn, user.id, Counter::StudySessions).unwrap();
        assert_eq!(ensure_for_user(conn, user.id).unwrap().total_study_sessions, 0);
    }

    #[test]
    fn test_reset_answers_keeps_other_counters() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let user = users::insert(conn, "Ada", "ada@example.com", "hash").unwrap();
        increment(conn, user.id, Counter::Flashcards).unwrap();
        increment(conn, user.id, Counter::CorrectAnswers).unwrap();
        increment(conn, user.id, Counter::IncorrectAnswers).unwrap();

        reset_answers(conn, user.id).unwrap();
        let stat = ensure_for_user(conn, user.id).unwrap();
        assert_eq!(stat.total_flashcards, 1);
        assert_eq!(stat.total_answers(), 0);
    }
}
