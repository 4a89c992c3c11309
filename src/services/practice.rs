// src/services/practice.rs

use super::{ServiceError, ServiceResult, logs};
use crate::{
    core::{
        lifecycle::{self, LifecycleAction},
        policy::{self, Ability},
        scoring,
    },
    models::{
        BoardEntry, Counter, LogAction, LogLevel, PracticeBoard, PracticeResult, PracticeStatus,
        StudySession, User,
    },
    storage::{self, Database},
};
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;

/// What the caller needs to tell the user after one answer.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub result: PracticeResult,
    pub correct: bool,
    pub expected: String,
}

/// A closed session and what happened during it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub session: StudySession,
    pub answered: usize,
    pub correct: usize,
    pub duration_minutes: i64,
}

fn load_session(conn: &Connection, user: &User, id: i64) -> ServiceResult<StudySession> {
    let session = storage::sessions::find(conn, id)?.ok_or(ServiceError::NotFound {
        resource: "study session",
        id,
    })?;
    policy::authorize(user, Ability::Practice, &session)?;
    Ok(session)
}

/// Opens a study session, or returns the one already open.
pub fn start_session(db: &mut Database, user: &User) -> ServiceResult<StudySession> {
    db.transaction(|tx| -> ServiceResult<StudySession> {
        if let Some(open) = storage::sessions::find_active_for_user(tx, user.id)? {
            log::debug!("User {} resumes open session {}", user.id, open.id);
            return Ok(open);
        }
        let session = storage::sessions::insert(tx, user.id, Utc::now())?;
        storage::statistics::increment(tx, user.id, Counter::StudySessions)?;
        logs::record(
            tx,
            user.id,
            LogAction::StudySessionStarted,
            LogLevel::Info,
            json!({ "study_session_id": session.id }),
        )?;
        Ok(session)
    })
}

/// Closes a session. Ending a session that is already closed returns it unchanged.
pub fn end_session(db: &mut Database, user: &User, session_id: i64) -> ServiceResult<SessionSummary> {
    db.transaction(|tx| -> ServiceResult<SessionSummary> {
        let mut session = load_session(tx, user, session_id)?;
        let ended_now = session.is_active();

        let results = storage::practice_results::list_for_session(tx, session.id)?;
        let correct = results.iter().filter(|r| r.is_correct).count();

        if ended_now {
            let ended_at = Utc::now();
            storage::sessions::mark_ended(tx, session.id, ended_at)?;
            session.ended_at = Some(ended_at);
        }
        let duration_minutes = session.duration_minutes().unwrap_or_default();

        if ended_now {
            logs::record(
                tx,
                user.id,
                LogAction::StudySessionEnded,
                LogLevel::Info,
                json!({
                    "study_session_id": session.id,
                    "answered": results.len(),
                    "correct": correct,
                    "duration_minutes": duration_minutes,
                }),
            )?;
        }

        Ok(SessionSummary {
            session,
            answered: results.len(),
            correct,
            duration_minutes,
        })
    })
}

/// Every active card of the user with the status of its latest attempt.
pub fn board(db: &Database, user: &User) -> ServiceResult<PracticeBoard> {
    let conn = db.connection();
    let cards = storage::flashcards::list_active_for_user(conn, user.id)?;
    let outcomes = storage::practice_results::latest_outcomes_for_user(conn, user.id)?;

    let entries = cards
        .into_iter()
        .map(|flashcard| {
            let status = PracticeStatus::from_latest(outcomes.get(&flashcard.id).copied());
            BoardEntry { flashcard, status }
        })
        .collect();
    Ok(PracticeBoard { entries })
}

/// Checks `given` against the card and records the attempt in the open session.
///
/// # Errors
/// `Conflict` when the session is closed or the card was already answered
/// correctly; `Lifecycle` for a trashed card.
pub fn answer(
    db: &mut Database,
    user: &User,
    session_id: i64,
    flashcard_id: i64,
    given: &str,
) -> ServiceResult<AnswerOutcome> {
    db.transaction(|tx| -> ServiceResult<AnswerOutcome> {
        // 1. The session must be ours and still open
        let session = load_session(tx, user, session_id)?;
        if !session.is_active() {
            return Err(ServiceError::Conflict(format!(
                "Study session #{} has already ended.",
                session.id
            )));
        }

        // 2. The card must be ours and active
        let card = storage::flashcards::find(tx, flashcard_id)?.ok_or(ServiceError::NotFound {
            resource: "flashcard",
            id: flashcard_id,
        })?;
        policy::authorize(user, Ability::Practice, &card)?;
        lifecycle::transition(card.state(), LifecycleAction::Edit)?;

        // 3. Correct cards are done
        if storage::practice_results::has_correct_answer(tx, user.id, card.id)? {
            return Err(ServiceError::Conflict(format!(
                "Flashcard #{} was already answered correctly.",
                card.id
            )));
        }

        // 4. Record
        let correct = scoring::answers_match(&card.answer, given);
        let result = storage::practice_results::insert(tx, user.id, card.id, session.id, correct)?;
        let (counter, level) = if correct {
            (Counter::CorrectAnswers, LogLevel::Info)
        } else {
            (Counter::IncorrectAnswers, LogLevel::Warning)
        };
        storage::statistics::increment(tx, user.id, counter)?;
        logs::record(
            tx,
            user.id,
            LogAction::PracticeAnswered,
            level,
            json!({
                "flashcard_id": card.id,
                "study_session_id": session.id,
                "is_correct": correct,
            }),
        )?;

        Ok(AnswerOutcome {
            result,
            correct,
            expected: card.answer,
        })
    })
}

/// Deletes every practice result of the user and zeroes the answer counters.
pub fn reset(db: &mut Database, user: &User) -> ServiceResult<usize> {
    let removed = db.transaction(|tx| -> ServiceResult<usize> {
        let removed = storage::practice_results::delete_for_user(tx, user.id)?;
        storage::statistics::reset_answers(tx, user.id)?;
        logs::record(
            tx,
            user.id,
            LogAction::ProgressReset,
            LogLevel::Warning,
            json!({ "removed_results": removed }),
        )?;
        Ok(removed)
    })?;
    log::info!("User {} reset practice progress ({} results removed)", user.id, removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::validation::ValidationRules,
        services::{flashcards, users},
    };

    fn setup() -> (Database, User) {
        let mut db = Database::open_in_memory().unwrap();
        let user = users::register(&mut db, "Ada", "ada@example.com", "secret-password").unwrap();
        (db, user)
    }

    fn add_card(db: &mut Database, user: &User, question: &str, answer: &str) -> i64 {
        flashcards::create(db, &ValidationRules::default(), user, question, answer)
            .unwrap()
            .id
    }

    #[test]
    fn test_start_session_reuses_open_session() {
        let (mut db, user) = setup();
        let first = start_session(&mut db, &user).unwrap();
        let again = start_session(&mut db, &user).unwrap();
        assert_eq!(first.id, again.id);

        let stat = storage::statistics::ensure_for_user(db.connection(), user.id).unwrap();
        assert_eq!(stat.total_study_sessions, 1);

        end_session(&mut db, &user, first.id).unwrap();
        let next = start_session(&mut db, &user).unwrap();
        assert_ne!(next.id, first.id);
    }

    #[test]
    fn test_answer_is_case_and_space_insensitive() {
        let (mut db, user) = setup();
        let card = add_card(&mut db, &user, "Capital of France?", "Paris");
        let session = start_session(&mut db, &user).unwrap();

        let outcome = answer(&mut db, &user, session.id, card, "  PARIS ").unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.expected, "Paris");

        let stat = storage::statistics::ensure_for_user(db.connection(), user.id).unwrap();
        assert_eq!(stat.total_correct_answers, 1);
        assert_eq!(stat.total_incorrect_answers, 0);
    }

    #[test]
    fn test_board_tracks_latest_outcome() {
        let (mut db, user) = setup();
        let paris = add_card(&mut db, &user, "Capital of France?", "Paris");
        let rome = add_card(&mut db, &user, "Capital of Italy?", "Rome");
        let _berlin = add_card(&mut db, &user, "Capital of Germany?", "Berlin");
        let session = start_session(&mut db, &user).unwrap();

        answer(&mut db, &user, session.id, paris, "Paris").unwrap();
        answer(&mut db, &user, session.id, rome, "Milan").unwrap();

        let b = board(&db, &user).unwrap();
        assert_eq!(b.total(), 3);
        assert_eq!(b.find(paris).unwrap().status, PracticeStatus::Correct);
        assert_eq!(b.find(rome).unwrap().status, PracticeStatus::Incorrect);
        assert_eq!(b.count(PracticeStatus::NotAnswered), 1);
        assert_eq!(b.pending().count(), 2);
        assert_eq!(b.completion_percentage(), 33.33);
        assert!(!b.is_complete());

        answer(&mut db, &user, session.id, rome, "rome").unwrap();
        assert_eq!(board(&db, &user).unwrap().find(rome).unwrap().status, PracticeStatus::Correct);
    }

    #[test]
    fn test_correct_card_cannot_be_answered_again() {
        let (mut db, user) = setup();
        let card = add_card(&mut db, &user, "Capital of France?", "Paris");
        let session = start_session(&mut db, &user).unwrap();

        answer(&mut db, &user, session.id, card, "Paris").unwrap();
        let err = answer(&mut db, &user, session.id, card, "Paris").unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn test_answer_requires_open_session() {
        let (mut db, user) = setup();
        let card = add_card(&mut db, &user, "Capital of France?", "Paris");
        let session = start_session(&mut db, &user).unwrap();
        end_session(&mut db, &user, session.id).unwrap();

        let err = answer(&mut db, &user, session.id, card, "Paris").unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn test_trashed_card_cannot_be_practiced() {
        let (mut db, user) = setup();
        let card = add_card(&mut db, &user, "Capital of France?", "Paris");
        flashcards::delete(&mut db, &user, card).unwrap();
        let session = start_session(&mut db, &user).unwrap();

        let err = answer(&mut db, &user, session.id, card, "Paris").unwrap_err();
        assert!(matches!(err, ServiceError::Lifecycle(_)));
    }

    #[test]
    fn test_other_users_session_and_card_are_forbidden() {
        let (mut db, ada) = setup();
        let bob = users::register(&mut db, "Bob", "bob@example.com", "secret-password").unwrap();
        let ada_card = add_card(&mut db, &ada, "Capital of France?", "Paris");
        let ada_session = start_session(&mut db, &ada).unwrap();
        let bob_session = start_session(&mut db, &bob).unwrap();

        assert!(matches!(
            answer(&mut db, &bob, ada_session.id, ada_card, "Paris"),
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            answer(&mut db, &bob, bob_session.id, ada_card, "Paris"),
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            end_session(&mut db, &bob, ada_session.id),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn test_end_session_summarizes() {
        let (mut db, user) = setup();
        let a = add_card(&mut db, &user, "Capital of France?", "Paris");
        let b = add_card(&mut db, &user, "Capital of Italy?", "Rome");
        let session = start_session(&mut db, &user).unwrap();
        answer(&mut db, &user, session.id, a, "Paris").unwrap();
        answer(&mut db, &user, session.id, b, "Naples").unwrap();

        let summary = end_session(&mut db, &user, session.id).unwrap();
        assert_eq!(summary.answered, 2);
        assert_eq!(summary.correct, 1);
        assert!(!summary.session.is_active());
        assert!(summary.duration_minutes >= 0);
    }

    #[test]
    fn test_ending_twice_logs_once() {
        let (mut db, user) = setup();
        let session = start_session(&mut db, &user).unwrap();

        let first = end_session(&mut db, &user, session.id).unwrap();
        let second = end_session(&mut db, &user, session.id).unwrap();
        end_session(&mut db, &user, session.id).unwrap();
        assert_eq!(first.session.ended_at, second.session.ended_at);

        let ended = logs::recent(&db, &user, 50, None)
            .unwrap()
            .into_iter()
            .filter(|e| e.action == LogAction::StudySessionEnded.as_str())
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_reset_clears_progress() {
        let (mut db, user) = setup();
        let card = add_card(&mut db, &user, "Capital of France?", "Paris");
        let session = start_session(&mut db, &user).unwrap();
        answer(&mut db, &user, session.id, card, "Paris").unwrap();

        assert_eq!(reset(&mut db, &user).unwrap(), 1);
        let b = board(&db, &user).unwrap();
        assert_eq!(b.find(card).unwrap().status, PracticeStatus::NotAnswered);

        let stat = storage::statistics::ensure_for_user(db.connection(), user.id).unwrap();
        assert_eq!(stat.total_correct_answers, 0);
        assert_eq!(stat.total_study_sessions, 1);
    }
}
