// src/storage/migrations.rs

use super::{StorageError, StorageResult};
use rusqlite::Connection;

/// A single forward-only schema step.
struct Migration {
    version: i64,
    description: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create users and flashcards",
        sql: r#"
            CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE flashcards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            );

            CREATE INDEX idx_flashcards_user ON flashcards(user_id, deleted_at);
        "#,
    },
    Migration {
        version: 2,
        description: "create study sessions and practice results",
        sql: r#"
            CREATE TABLE study_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                started_at TEXT NOT NULL,
                ended_at TEXT
            );

            CREATE TABLE practice_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                flashcard_id INTEGER NOT NULL REFERENCES flashcards(id) ON DELETE CASCADE,
                study_session_id INTEGER NOT NULL REFERENCES study_sessions(id) ON DELETE CASCADE,
                is_correct INTEGER NOT NULL CHECK (is_correct IN (0, 1)),
                created_at TEXT NOT NULL
            );

            CREATE INDEX idx_study_sessions_user ON study_sessions(user_id, ended_at);
            CREATE INDEX idx_practice_results_user_card ON practice_results(user_id, flashcard_id);
        "#,
    },
    Migration {
        version: 3,
        description: "create statistics and logs",
        sql: r#"
            CREATE TABLE statistics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
                total_flashcards INTEGER NOT NULL DEFAULT 0,
                total_study_sessions INTEGER NOT NULL DEFAULT 0,
                total_correct_answers INTEGER NOT NULL DEFAULT 0,
                total_incorrect_answers INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                action TEXT NOT NULL,
                level TEXT NOT NULL CHECK (level IN ('info', 'warning', 'error')),
                details TEXT NOT NULL DEFAULT '{}',
                created_at TEXT NOT NULL
            );

            CREATE INDEX idx_logs_user_created ON logs(user_id, id DESC);
        "#,
    },
];

/// The schema version this build writes.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or_default()
}

pub fn current_version(conn: &Connection) -> StorageResult<i64> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Applies every migration newer than the database's `user_version`, each in its own transaction.
pub fn migrate(conn: &mut Connection) -> StorageResult<()> {
    let current = current_version(conn)?;
    let supported = latest_version();
    if current > supported {
        return Err(StorageError::UnsupportedSchema {
            found: current,
            supported,
        });
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        log::info!(
            "Applying migration {}: {}",
            migration.version,
            migration.description
        );
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        tx.commit()?;
    }
    Ok(())
}
