// src/core/validation.rs

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|_| unreachable!());
}

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_TEXT_LEN: usize = 1000;

/// Length thresholds for flashcard text, configurable through `[validation]`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationRules {
    pub min_question_len: usize,
    pub min_answer_len: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_question_len: 3,
            min_answer_len: 2,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The {field} must be at least {min} characters long.")]
    TooShort { field: &'static str, min: usize },
    #[error("The {field} must be at most {max} characters long.")]
    TooLong { field: &'static str, max: usize },
    #[error("'{0}' is not a valid email address.")]
    InvalidEmail(String),
}

/// A question/answer pair that passed validation, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardInput {
    pub question: String,
    pub answer: String,
}

fn check_length(field: &'static str, value: &str, min: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(trimmed.to_string())
}

pub fn validate_question(rules: &ValidationRules, question: &str) -> Result<String, ValidationError> {
    check_length("question", question, rules.min_question_len)
}

pub fn validate_answer(rules: &ValidationRules, answer: &str) -> Result<String, ValidationError> {
    check_length("answer", answer, rules.min_answer_len)
}

pub fn validate_flashcard(
    rules: &ValidationRules,
    question: &str,
    answer: &str,
) -> Result<FlashcardInput, ValidationError> {
    Ok(FlashcardInput {
        question: validate_question(rules, question)?,
        answer: validate_answer(rules, answer)?,
    })
}

pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    check_length("name", name, MIN_NAME_LEN)
}

/// Returns the email trimmed and lowercased.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let normalized = email.trim().to_lowercase();
    if !EMAIL_RE.is_match(&normalized) {
        return Err(ValidationError::InvalidEmail(email.trim().to_string()));
    }
    Ok(normalized)
}

/// Passwords are never trimmed.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password",
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}
