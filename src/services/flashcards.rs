// src/services/flashcards.rs

use super::{ServiceError, ServiceResult, logs};
use crate::{
    core::{
        lifecycle::{self, LifecycleAction},
        policy::{self, Ability},
        validation::{self, ValidationRules},
    },
    models::{Counter, Flashcard, FlashcardState, LogAction, LogLevel, User},
    storage::{self, Database},
};
use rusqlite::Connection;
use serde_json::json;

/// Loads a card by id and checks that `user` may perform `ability` on it.
fn load_authorized(conn: &Connection, user: &User, id: i64, ability: Ability) -> ServiceResult<Flashcard> {
    let card = storage::flashcards::find(conn, id)?.ok_or(ServiceError::NotFound {
        resource: "flashcard",
        id,
    })?;
    policy::authorize(user, ability, &card)?;
    Ok(card)
}

pub fn create(
    db: &mut Database,
    rules: &ValidationRules,
    user: &User,
    question: &str,
    answer: &str,
) -> ServiceResult<Flashcard> {
    let input = validation::validate_flashcard(rules, question, answer)?;
    let card = db.transaction(|tx| -> ServiceResult<Flashcard> {
        let card = storage::flashcards::insert(tx, user.id, &input.question, &input.answer)?;
        storage::statistics::increment(tx, user.id, Counter::Flashcards)?;
        logs::record(
            tx,
            user.id,
            LogAction::FlashcardCreated,
            LogLevel::Info,
            json!({ "flashcard_id": card.id, "question": card.question }),
        )?;
        Ok(card)
    })?;
    log::info!("User {} created flashcard {}", user.id, card.id);
    Ok(card)
}

/// Changes the question and/or the answer of an active card.
pub fn update(
    db: &mut Database,
    rules: &ValidationRules,
    user: &User,
    id: i64,
    question: Option<&str>,
    answer: Option<&str>,
) -> ServiceResult<Flashcard> {
    let card = db.transaction(|tx| -> ServiceResult<Flashcard> {
        let mut card = load_authorized(tx, user, id, Ability::Update)?;
        lifecycle::transition(card.state(), LifecycleAction::Edit)?;

        let input = validation::validate_flashcard(
            rules,
            question.unwrap_or(&card.question),
            answer.unwrap_or(&card.answer),
        )?;
        card.updated_at = storage::flashcards::update_content(tx, id, &input.question, &input.answer)?;
        card.question = input.question;
        card.answer = input.answer;

        logs::record(
            tx,
            user.id,
            LogAction::FlashcardUpdated,
            LogLevel::Info,
            json!({ "flashcard_id": id }),
        )?;
        Ok(card)
    })?;
    log::info!("User {} updated flashcard {}", user.id, id);
    Ok(card)
}

/// All active cards of the user, oldest first.
pub fn list(db: &Database, user: &User) -> ServiceResult<Vec<Flashcard>> {
    Ok(storage::flashcards::list_active_for_user(db.connection(), user.id)?)
}

/// The user's trash bin, most recently deleted first.
pub fn list_trashed(db: &Database, user: &User) -> ServiceResult<Vec<Flashcard>> {
    Ok(storage::flashcards::list_trashed_for_user(db.connection(), user.id)?)
}

pub fn get(db: &Database, user: &User, id: i64) -> ServiceResult<Flashcard> {
    load_authorized(db.connection(), user, id, Ability::View)
}

/// Moves a card to the trash bin.
pub fn delete(db: &mut Database, user: &User, id: i64) -> ServiceResult<Flashcard> {
    let card = db.transaction(|tx| -> ServiceResult<Flashcard> {
        let mut card = load_authorized(tx, user, id, Ability::Delete)?;
        lifecycle::transition(card.state(), LifecycleAction::Trash)?;

        card.deleted_at = Some(storage::flashcards::mark_trashed(tx, id)?);
        storage::statistics::decrement(tx, user.id, Counter::Flashcards)?;
        logs::record(
            tx,
            user.id,
            LogAction::FlashcardDeleted,
            LogLevel::Info,
            json!({ "flashcard_id": id, "question": card.question }),
        )?;
        Ok(card)
    })?;
    log::info!("User {} moved flashcard {} to the trash", user.id, id);
    Ok(card)
}

/// Brings a trashed card back with its original id and content.
pub fn restore(db: &mut Database, user: &User, id: i64) -> ServiceResult<Flashcard> {
    let card = db.transaction(|tx| -> ServiceResult<Flashcard> { restore_in(tx, user, id) })?;
    log::info!("User {} restored flashcard {}", user.id, id);
    Ok(card)
}

fn restore_in(conn: &Connection, user: &User, id: i64) -> ServiceResult<Flashcard> {
    let mut card = load_authorized(conn, user, id, Ability::Restore)?;
    lifecycle::transition(card.state(), LifecycleAction::Restore)?;

    storage::flashcards::clear_trashed(conn, id)?;
    card.deleted_at = None;
    storage::statistics::increment(conn, user.id, Counter::Flashcards)?;
    logs::record(
        conn,
        user.id,
        LogAction::FlashcardRestored,
        LogLevel::Info,
        json!({ "flashcard_id": id }),
    )?;
    Ok(card)
}

/// Permanently removes a card, active or trashed, with its practice results.
pub fn force_delete(db: &mut Database, user: &User, id: i64) -> ServiceResult<Flashcard> {
    let card = db.transaction(|tx| -> ServiceResult<Flashcard> { force_delete_in(tx, user, id) })?;
    log::info!("User {} permanently deleted flashcard {}", user.id, id);
    Ok(card)
}

fn force_delete_in(conn: &Connection, user: &User, id: i64) -> ServiceResult<Flashcard> {
    let card = load_authorized(conn, user, id, Ability::ForceDelete)?;
    let previous = card.state();
    lifecycle::transition(previous, LifecycleAction::Purge)?;

    storage::flashcards::purge(conn, id)?;
    if previous == FlashcardState::Active {
        storage::statistics::decrement(conn, user.id, Counter::Flashcards)?;
    }
    logs::record(
        conn,
        user.id,
        LogAction::FlashcardForceDeleted,
        LogLevel::Warning,
        json!({ "flashcard_id": id, "question": card.question, "was": previous }),
    )?;
    Ok(card)
}

/// Restores every card in the user's trash bin. Returns how many were restored.
pub fn restore_all(db: &mut Database, user: &User) -> ServiceResult<usize> {
    let restored = db.transaction(|tx| -> ServiceResult<usize> {
        let trashed = storage::flashcards::list_trashed_for_user(tx, user.id)?;
        for card in &trashed {
            restore_in(tx, user, card.id)?;
        }
        Ok(trashed.len())
    })?;
    log::info!("User {} restored the trash ({} cards)", user.id, restored);
    Ok(restored)
}

/// Permanently deletes every card in the user's trash bin.
pub fn empty_trash(db: &mut Database, user: &User) -> ServiceResult<usize> {
    let purged = db.transaction(|tx| -> ServiceResult<usize> {
        let trashed = storage::flashcards::list_trashed_for_user(tx, user.id)?;
        for card in &trashed {
            force_delete_in(tx, user, card.id)?;
        }
        Ok(trashed.len())
    })?;
    log::info!("User {} emptied the trash ({} cards)", user.id, purged);
    Ok(purged)
}
