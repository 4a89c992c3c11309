// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- ACCOUNTS ---

/// A registered account. Owns flashcards, sessions, results, statistics and logs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string. Never leaves the process.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// --- FLASHCARDS ---

/// A question/answer pair owned by a user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub id: i64,
    pub user_id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set while the card sits in the trash bin.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Flashcard {
    /// The lifecycle state of a card that still exists in storage.
    pub fn state(&self) -> FlashcardState {
        if self.deleted_at.is_some() {
            FlashcardState::Trashed
        } else {
            FlashcardState::Active
        }
    }
}

/// Lifecycle of a flashcard. `Purged` is terminal: the row no longer exists.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FlashcardState {
    Active,
    Trashed,
    Purged,
}

impl fmt::Display for FlashcardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "active",
            Self::Trashed => "trashed",
            Self::Purged => "purged",
        };
        f.write_str(label)
    }
}

// --- PRACTICE ---

/// A bounded time window during which practice results are recorded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StudySession {
    pub id: i64,
    pub user_id: i64,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl StudySession {
    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Whole minutes between start and end, `None` while the session is open.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.ended_at
            .map(|ended| crate::core::scoring::duration_minutes(self.started_at, ended))
    }
}

/// One recorded attempt against a flashcard. Append-only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PracticeResult {
    pub id: i64,
    pub user_id: i64,
    pub flashcard_id: i64,
    pub study_session_id: i64,
    pub is_correct: bool,
    pub created_at: DateTime<Utc>,
}

/// Where a card stands for its owner, derived from its most recent result.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PracticeStatus {
    NotAnswered,
    Correct,
    Incorrect,
}

impl PracticeStatus {
    pub fn from_latest(latest: Option<bool>) -> Self {
        match latest {
            None => Self::NotAnswered,
            Some(true) => Self::Correct,
            Some(false) => Self::Incorrect,
        }
    }
}

impl fmt::Display for PracticeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotAnswered => "Not answered",
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
        };
        f.write_str(label)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub flashcard: Flashcard,
    pub status: PracticeStatus,
}

/// The practice progress of one user across all of their active cards.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeBoard {
    pub entries: Vec<BoardEntry>,
}

impl PracticeBoard {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn count(&self, status: PracticeStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Share of cards answered correctly, in percent.
    pub fn completion_percentage(&self) -> f64 {
        crate::core::scoring::percentage(self.count(PracticeStatus::Correct), self.total())
    }

    /// Share of cards with at least one answer, in percent.
    pub fn answered_percentage(&self) -> f64 {
        let answered = self.total() - self.count(PracticeStatus::NotAnswered);
        crate::core::scoring::percentage(answered, self.total())
    }

    pub fn is_complete(&self) -> bool {
        !self.entries.is_empty() && self.count(PracticeStatus::Correct) == self.total()
    }

    /// Cards that can still be practiced.
    pub fn pending(&self) -> impl Iterator<Item = &BoardEntry> {
        self.entries
            .iter()
            .filter(|e| e.status != PracticeStatus::Correct)
    }

    pub fn find(&self, flashcard_id: i64) -> Option<&BoardEntry> {
        self.entries.iter().find(|e| e.flashcard.id == flashcard_id)
    }
}

// --- STATISTICS ---

/// Per-user denormalized counters.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistic {
    pub id: i64,
    pub user_id: i64,
    pub total_flashcards: i64,
    pub total_study_sessions: i64,
    pub total_correct_answers: i64,
    pub total_incorrect_answers: i64,
}

impl Statistic {
    pub fn total_answers(&self) -> i64 {
        self.total_correct_answers + self.total_incorrect_answers
    }

    pub fn correct_percentage(&self) -> f64 {
        crate::core::scoring::ratio_percentage(self.total_correct_answers, self.total_answers())
    }

    pub fn incorrect_percentage(&self) -> f64 {
        crate::core::scoring::ratio_percentage(self.total_incorrect_answers, self.total_answers())
    }
}

/// Which counter of a `Statistic` row an event touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Flashcards,
    StudySessions,
    CorrectAnswers,
    IncorrectAnswers,
}

impl Counter {
    pub fn column(self) -> &'static str {
        match self {
            Self::Flashcards => "total_flashcards",
            Self::StudySessions => "total_study_sessions",
            Self::CorrectAnswers => "total_correct_answers",
            Self::IncorrectAnswers => "total_incorrect_answers",
        }
    }
}

/// Everything the statistics screens and endpoint show.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub counters: Statistic,
    pub correct_percentage: f64,
    pub incorrect_percentage: f64,
    pub active_flashcards: usize,
    pub answered_percentage: f64,
    pub completion_percentage: f64,
}

// --- AUDIT LOG ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("Unknown log level '{}'", other)),
        }
    }
}

/// Action names written to the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAction {
    UserRegistered,
    FlashcardCreated,
    FlashcardUpdated,
    FlashcardDeleted,
    FlashcardRestored,
    FlashcardForceDeleted,
    FlashcardsImported,
    StudySessionStarted,
    StudySessionEnded,
    PracticeAnswered,
    ProgressReset,
    StatisticsReconciled,
}

impl LogAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserRegistered => "user_registered",
            Self::FlashcardCreated => "flashcard_created",
            Self::FlashcardUpdated => "flashcard_updated",
            Self::FlashcardDeleted => "flashcard_deleted",
            Self::FlashcardRestored => "flashcard_restored",
            Self::FlashcardForceDeleted => "flashcard_force_deleted",
            Self::FlashcardsImported => "flashcards_imported",
            Self::StudySessionStarted => "study_session_started",
            Self::StudySessionEnded => "study_session_ended",
            Self::PracticeAnswered => "practice_answered",
            Self::ProgressReset => "progress_reset",
            Self::StatisticsReconciled => "statistics_reconciled",
        }
    }
}

/// One row of the audit trail.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub level: LogLevel,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
