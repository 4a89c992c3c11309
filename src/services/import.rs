// src/services/import.rs

use super::{ServiceResult, logs};
use crate::{
    core::{
        csv_import::{self, SkippedRow},
        validation::{self, FlashcardInput, ValidationRules},
    },
    models::{Counter, Flashcard, LogAction, LogLevel, User},
    storage::{self, Database},
};
use serde::Serialize;
use serde_json::json;
use std::io::Read;

#[derive(Serialize, Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<Flashcard>,
    pub skipped: Vec<SkippedRow>,
}

/// Creates one flashcard per valid CSV row. Invalid rows are reported, not fatal.
/// A missing `question`/`answer` header fails the whole import.
pub fn import_csv<R: Read>(
    db: &mut Database,
    rules: &ValidationRules,
    user: &User,
    reader: R,
) -> ServiceResult<ImportReport> {
    let parsed = csv_import::parse_flashcards_csv(reader)?;
    let mut skipped = parsed.skipped;

    let mut valid: Vec<FlashcardInput> = Vec::with_capacity(parsed.rows.len());
    for row in parsed.rows {
        match validation::validate_flashcard(rules, &row.question, &row.answer) {
            Ok(input) => valid.push(input),
            Err(e) => skipped.push(SkippedRow {
                line: row.line,
                reason: e.to_string(),
            }),
        }
    }
    skipped.sort_by_key(|s| s.line);

    let imported = db.transaction(|tx| -> ServiceResult<Vec<Flashcard>> {
        let mut imported = Vec::with_capacity(valid.len());
        for input in &valid {
            imported.push(storage::flashcards::insert(tx, user.id, &input.question, &input.answer)?);
        }
        let count = i64::try_from(imported.len()).unwrap_or(i64::MAX);
        storage::statistics::adjust(tx, user.id, Counter::Flashcards, count)?;
        logs::record(
            tx,
            user.id,
            LogAction::FlashcardsImported,
            LogLevel::Info,
            json!({
                "imported": imported.len(),
                "skipped": skipped.len(),
                "skipped_lines": skipped.iter().map(|s| s.line).collect::<Vec<_>>(),
            }),
        )?;
        Ok(imported)
    })?;

    log::info!(
        "User {} imported {} flashcards ({} rows skipped)",
        user.id,
        imported.len(),
        skipped.len()
    );
    Ok(ImportReport { imported, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ServiceError, flashcards, users};

    fn setup() -> (Database, User) {
        let mut db = Database::open_in_memory().unwrap();
        let user = users::register(&mut db, "Ada", "ada@example.com", "secret-password").unwrap();
        (db, user)
    }

    #[test]
    fn test_import_valid_and_invalid_rows() {
        let (mut db, user) = setup();
        let data = "Answer,Topic,QUESTION\n\
                    Paris,geo,Capital of France?\n\
                    x,geo,Too short answer?\n\
                    Rome,geo,Capital of Italy?\n";

        let report = import_csv(&mut db, &ValidationRules::default(), &user, data.as_bytes()).unwrap();
        assert_eq!(report.imported.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 3);

        let cards = flashcards::list(&db, &user).unwrap();
        assert_eq!(cards[0].question, "Capital of France?");
        assert_eq!(cards[1].answer, "Rome");

        let stat = storage::statistics::ensure_for_user(db.connection(), user.id).unwrap();
        assert_eq!(stat.total_flashcards, 2);
    }

    #[test]
    fn test_missing_header_fails_without_writes() {
        let (mut db, user) = setup();
        let data = "front,back\nCapital of France?,Paris\n";

        let err = import_csv(&mut db, &ValidationRules::default(), &user, data.as_bytes()).unwrap_err();
        assert!(matches!(err, ServiceError::Import(_)));
        assert!(flashcards::list(&db, &user).unwrap().is_empty());
    }

    #[test]
    fn test_import_writes_one_summary_log() {
        let (mut db, user) = setup();
        let data = "question,answer\nOne?,yes\nTwo?,yes\n";
        import_csv(&mut db, &ValidationRules::default(), &user, data.as_bytes()).unwrap();

        let entries = logs::recent(&db, &user, 10, None).unwrap();
        assert_eq!(entries[0].action, "flashcards_imported");
        assert_eq!(entries[0].details["imported"], 2);
        // Registration is the only other entry.
        assert_eq!(entries.len(), 2);
    }
}
