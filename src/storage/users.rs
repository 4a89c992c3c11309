// src/storage/users.rs

use super::StorageResult;
use crate::models::User;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "id, name, email, password_hash, created_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn insert(conn: &Connection, name: &str, email: &str, password_hash: &str) -> StorageResult<User> {
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO users (name, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![name, email, password_hash, created_at],
    )?;
    Ok(User {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        created_at,
    })
}

/// Emails are stored lowercased; callers pass the normalized form.
pub fn find_by_email(conn: &Connection, email: &str) -> StorageResult<Option<User>> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE email = ?1");
    Ok(conn.query_row(&sql, [email], from_row).optional()?)
}

pub fn email_exists(conn: &Connection, email: &str) -> StorageResult<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
        [email],
        |row| row.get(0),
    )?)
}
