// src/core/policy.rs

//! Owner-only authorization for user-scoped records.

use crate::models::{Flashcard, StudySession, User};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    View,
    Update,
    Delete,
    Restore,
    ForceDelete,
    Practice,
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::View => "view",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Restore => "restore",
            Self::ForceDelete => "permanently delete",
            Self::Practice => "practice with",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("You are not allowed to {ability} {resource} #{id}.")]
pub struct PolicyError {
    pub ability: Ability,
    pub resource: &'static str,
    pub id: i64,
}

/// A record that belongs to exactly one user.
pub trait Owned {
    const RESOURCE: &'static str;

    fn owner_id(&self) -> i64;
    fn record_id(&self) -> i64;
}

impl Owned for Flashcard {
    const RESOURCE: &'static str = "flashcard";
    fn owner_id(&self) -> i64 {
        self.user_id
    }
    fn record_id(&self) -> i64 {
        self.id
    }
}

impl Owned for StudySession {
    const RESOURCE: &'static str = "study session";
    fn owner_id(&self) -> i64 {
        self.user_id
    }
    fn record_id(&self) -> i64 {
        self.id
    }
}

/// Every ability is granted to the owner and to nobody else.
pub fn authorize<T: Owned>(user: &User, ability: Ability, record: &T) -> Result<(), PolicyError> {
    if record.owner_id() == user.id {
        Ok(())
    } else {
        log::warn!(
            "User {} denied '{}' on {} #{} owned by {}",
            user.id,
            ability,
            T::RESOURCE,
            record.record_id(),
            record.owner_id()
        );
        Err(PolicyError {
            ability,
            resource: T::RESOURCE,
            id: record.record_id(),
        })
    }
}
