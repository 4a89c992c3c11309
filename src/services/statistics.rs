// src/services/statistics.rs

use super::{ServiceResult, logs, practice};
use crate::{
    models::{LogAction, LogLevel, Statistic, StatisticsReport, User},
    storage::{self, Database},
};
use serde_json::json;

/// Stored counters plus the percentages derived from them and from the live board.
pub fn report(db: &Database, user: &User) -> ServiceResult<StatisticsReport> {
    let counters = storage::statistics::ensure_for_user(db.connection(), user.id)?;
    let board = practice::board(db, user)?;

    Ok(StatisticsReport {
        correct_percentage: counters.correct_percentage(),
        incorrect_percentage: counters.incorrect_percentage(),
        active_flashcards: board.total(),
        answered_percentage: board.answered_percentage(),
        completion_percentage: board.completion_percentage(),
        counters,
    })
}

/// Recomputes every counter from the underlying rows and stores the result.
pub fn reconcile(db: &mut Database, user: &User) -> ServiceResult<Statistic> {
    let (before, after) = db.transaction(|tx| -> ServiceResult<(Statistic, Statistic)> {
        let before = storage::statistics::ensure_for_user(tx, user.id)?;
        let recomputed = Statistic {
            total_flashcards: storage::flashcards::count_active_for_user(tx, user.id)?,
            total_study_sessions: storage::sessions::count_for_user(tx, user.id)?,
            total_correct_answers: storage::practice_results::count_for_user(tx, user.id, true)?,
            total_incorrect_answers: storage::practice_results::count_for_user(tx, user.id, false)?,
            ..before.clone()
        };
        let after = storage::statistics::overwrite(tx, &recomputed)?;
        logs::record(
            tx,
            user.id,
            LogAction::StatisticsReconciled,
            LogLevel::Info,
            json!({ "before": before, "after": after }),
        )?;
        Ok((before, after))
    })?;

    if before != after {
        log::warn!("Statistics of user {} drifted and were corrected", user.id);
    }
    Ok(after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::validation::ValidationRules,
        models::Counter,
        services::{flashcards, users},
    };

    #[test]
    fn test_report_percentages() {
        let mut db = Database::open_in_memory().unwrap();
        let user = users::register(&mut db, "Ada", "ada@example.com", "secret-password").unwrap();
        let rules = ValidationRules::default();
        let paris = flashcards::create(&mut db, &rules, &user, "Capital of France?", "Paris").unwrap();
        flashcards::create(&mut db, &rules, &user, "Capital of Italy?", "Rome").unwrap();

        let empty = report(&db, &user).unwrap();
        assert_eq!(empty.correct_percentage, 0.0);
        assert_eq!(empty.active_flashcards, 2);

        let session = practice::start_session(&mut db, &user).unwrap();
        practice::answer(&mut db, &user, session.id, paris.id, "Lyon").unwrap();
        practice::answer(&mut db, &user, session.id, paris.id, "Paris").unwrap();

        let r = report(&db, &user).unwrap();
        assert_eq!(r.counters.total_correct_answers, 1);
        assert_eq!(r.counters.total_incorrect_answers, 1);
        assert_eq!(r.correct_percentage, 50.0);
        assert_eq!(r.answered_percentage, 50.0);
        assert_eq!(r.completion_percentage, 50.0);
    }

    #[test]
    fn test_reconcile_repairs_drift() {
        let mut db = Database::open_in_memory().unwrap();
        let user = users::register(&mut db, "Ada", "ada@example.com", "secret-password").unwrap();
        let rules = ValidationRules::default();
        flashcards::create(&mut db, &rules, &user, "Capital of France?", "Paris").unwrap();

        storage::statistics::adjust(db.connection(), user.id, Counter::Flashcards, 41).unwrap();
        storage::statistics::adjust(db.connection(), user.id, Counter::CorrectAnswers, 7).unwrap();

        let fixed = reconcile(&mut db, &user).unwrap();
        assert_eq!(fixed.total_flashcards, 1);
        assert_eq!(fixed.total_correct_answers, 0);
        assert_eq!(fixed.total_study_sessions, 0);
        assert_eq!(report(&db, &user).unwrap().counters, fixed);
    }
}
