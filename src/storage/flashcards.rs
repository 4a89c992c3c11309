// src/storage/flashcards.rs

use super::StorageResult;
use crate::models::Flashcard;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "id, user_id, question, answer, created_at, updated_at, deleted_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Flashcard> {
    Ok(Flashcard {
        id: row.get(0)?,
        user_id: row.get(1)?,
        question: row.get(2)?,
        answer: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
        deleted_at: row.get(6)?,
    })
}

fn query_list(conn: &Connection, sql: &str, user_id: i64) -> StorageResult<Vec<Flashcard>> {
    let mut stmt = conn.prepare(sql)?;
    let cards = stmt
        .query_map([user_id], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(cards)
}

pub fn insert(conn: &Connection, user_id: i64, question: &str, answer: &str) -> StorageResult<Flashcard> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO flashcards (user_id, question, answer, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
        params![user_id, question, answer, now],
    )?;
    Ok(Flashcard {
        id: conn.last_insert_rowid(),
        user_id,
        question: question.to_string(),
        answer: answer.to_string(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

/// Finds a card by id regardless of owner or trash state.
pub fn find(conn: &Connection, id: i64) -> StorageResult<Option<Flashcard>> {
    let sql = format!("SELECT {COLUMNS} FROM flashcards WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], from_row).optional()?)
}

/// Active cards of a user, oldest first.
pub fn list_active_for_user(conn: &Connection, user_id: i64) -> StorageResult<Vec<Flashcard>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM flashcards WHERE user_id = ?1 AND deleted_at IS NULL ORDER BY id"
    );
    query_list(conn, &sql, user_id)
}

/// Trashed cards of a user, most recently deleted first.
pub fn list_trashed_for_user(conn: &Connection, user_id: i64) -> StorageResult<Vec<Flashcard>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM flashcards WHERE user_id = ?1 AND deleted_at IS NOT NULL ORDER BY deleted_at DESC, id DESC"
    );
    query_list(conn, &sql, user_id)
}

pub fn count_active_for_user(conn: &Connection, user_id: i64) -> StorageResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM flashcards WHERE user_id = ?1 AND deleted_at IS NULL",
        [user_id],
        |row| row.get(0),
    )?)
}

pub fn update_content(conn: &Connection, id: i64, question: &str, answer: &str) -> StorageResult<DateTime<Utc>> {
    let now = Utc::now();
    conn.execute(
        "UPDATE flashcards SET question = ?2, answer = ?3, updated_at = ?4 WHERE id = ?1",
        params![id, question, answer, now],
    )?;
    Ok(now)
}

pub fn mark_trashed(conn: &Connection, id: i64) -> StorageResult<DateTime<Utc>> {
    let now = Utc::now();
    conn.execute(
        "UPDATE flashcards SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
        params![id, now],
    )?;
    Ok(now)
}

pub fn clear_trashed(conn: &Connection, id: i64) -> StorageResult<()> {
    conn.execute(
        "UPDATE flashcards SET deleted_at = NULL WHERE id = ?1",
        [id],
    )?;
    Ok(())
}

/// Removes the row. Practice results go with it through `ON DELETE CASCADE`.
pub fn purge(conn: &Connection, id: i64) -> StorageResult<bool> {
    Ok(conn.execute("DELETE FROM flashcards WHERE id = ?1", [id])? > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, users};

    fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let user = users::insert(db.connection(), "Ada", "ada@example.com", "hash").unwrap();
        (db, user.id)
    }

    #[test]
    fn test_insert_and_list() {
        let (db, user_id) = setup();
        let conn = db.connection();
        insert(conn, user_id, "First?", "one").unwrap();
        insert(conn, user_id, "Second?", "two").unwrap();

        let cards = list_active_for_user(conn, user_id).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "First?");
        assert_eq!(count_active_for_user(conn, user_id).unwrap(), 2);
    }

    #[test]
    fn test_trash_and_untrash() {
        let (db, user_id) = setup();
        let conn = db.connection();
        let card = insert(conn, user_id, "Capital of France?", "Paris").unwrap();

        mark_trashed(conn, card.id).unwrap();
        assert!(list_active_for_user(conn, user_id).unwrap().is_empty());
        let trashed = list_trashed_for_user(conn, user_id).unwrap();
        assert_eq!(trashed.len(), 1);
        assert!(trashed[0].deleted_at.is_some());

        clear_trashed(conn, card.id).unwrap();
        let active = list_active_for_user(conn, user_id).unwrap();
        assert_eq!(active[0].id, card.id);
        assert_eq!(active[0].answer, "Paris");
    }

    #[test]
    fn test_purge_removes_row() {
        let (db, user_id) = setup();
        let conn = db.connection();
        let card = insert(conn, user_id, "Gone?", "yes").unwrap();

        assert!(purge(conn, card.id).unwrap());
        assert!(find(conn, card.id).unwrap().is_none());
        assert!(!purge(conn, card.id).unwrap());
    }

    #[test]
    fn test_update_content() {
        let (db, user_id) = setup();
        let conn = db.connection();
        let card = insert(conn, user_id, "Old question?", "old").unwrap();

        update_content(conn, card.id, "New question?", "new").unwrap();
        let updated = find(conn, card.id).unwrap().unwrap();
        assert_eq!(updated.question, "New question?");
        assert_eq!(updated.answer, "new");
    }
}
