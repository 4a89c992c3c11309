// src/services/logs.rs

use super::ServiceResult;
use crate::{
    constants::MAX_LOG_LIMIT,
    models::{LogAction, LogEntry, LogLevel, User},
    storage::{self, Database, StorageResult},
};
use rusqlite::Connection;

/// Writes an audit entry. Called from inside the caller's transaction.
pub fn record(
    conn: &Connection,
    user_id: i64,
    action: LogAction,
    level: LogLevel,
    details: serde_json::Value,
) -> StorageResult<()> {
    log::debug!("audit user={} action={} level={}", user_id, action.as_str(), level);
    storage::logs::insert(conn, user_id, action, level, &details)?;
    Ok(())
}

/// The user's most recent entries, newest first. `limit` is clamped to `1..=MAX_LOG_LIMIT`.
pub fn recent(
    db: &Database,
    user: &User,
    limit: usize,
    level: Option<LogLevel>,
) -> ServiceResult<Vec<LogEntry>> {
    let limit = limit.clamp(1, MAX_LOG_LIMIT);
    Ok(storage::logs::recent_for_user(db.connection(), user.id, limit, level)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::users;
    use serde_json::json;

    #[test]
    fn test_recent_clamps_limit() {
        let mut db = Database::open_in_memory().unwrap();
        let user = users::register(&mut db, "Ada", "ada@example.com", "secret-password").unwrap();
        for _ in 0..3 {
            record(db.connection(), user.id, LogAction::FlashcardCreated, LogLevel::Info, json!({})).unwrap();
        }

        // Zero is raised to one.
        assert_eq!(recent(&db, &user, 0, None).unwrap().len(), 1);
        // Registration wrote one entry too.
        assert_eq!(recent(&db, &user, 100, None).unwrap().len(), 4);
    }
}
