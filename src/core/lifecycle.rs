// src/core/lifecycle.rs

//! Transition rules for the flashcard lifecycle.
//!
//! ```text
//!            trash             purge
//!   Active ---------> Trashed ---------> Purged
//!     ^                  |
//!     +----- restore ----+
//!     |
//!     +------------------ purge ---------> Purged
//! ```
//!
//! `Purged` is terminal. Every other move is rejected with a `LifecycleError`.

use crate::models::FlashcardState;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Trash,
    Restore,
    Purge,
    Edit,
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Trash => "move to the trash",
            Self::Restore => "restore",
            Self::Purge => "permanently delete",
            Self::Edit => "edit",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Cannot {action} a flashcard that is {state}.")]
pub struct LifecycleError {
    pub state: FlashcardState,
    pub action: LifecycleAction,
}

/// Returns the state reached by applying `action` to `state`.
pub fn transition(
    state: FlashcardState,
    action: LifecycleAction,
) -> Result<FlashcardState, LifecycleError> {
    use FlashcardState::*;
    use LifecycleAction::*;

    match (state, action) {
        (Active, Trash) => Ok(Trashed),
        (Trashed, Restore) => Ok(Active),
        (Active | Trashed, Purge) => Ok(Purged),
        (Active, Edit) => Ok(Active),
        (state, action) => Err(LifecycleError { state, action }),
    }
}
