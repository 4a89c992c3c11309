// src/services/users.rs

use super::{ServiceError, ServiceResult, logs};
use crate::{
    core::{credentials, validation},
    models::{LogAction, LogLevel, User},
    storage::{self, Database},
};
use serde_json::json;

/// Creates an account and its statistics row.
///
/// # Errors
/// `Validation` for a bad name, email or password; `Conflict` when the email is taken.
pub fn register(db: &mut Database, name: &str, email: &str, password: &str) -> ServiceResult<User> {
    let name = validation::validate_name(name)?;
    let email = validation::validate_email(email)?;
    validation::validate_password(password)?;

    if storage::users::email_exists(db.connection(), &email)? {
        return Err(ServiceError::Conflict(format!(
            "An account with email '{}' already exists.",
            email
        )));
    }

    let password_hash = credentials::hash_password(password)?;

    let user = db.transaction(|tx| -> ServiceResult<User> {
        let user = storage::users::insert(tx, &name, &email, &password_hash)?;
        storage::statistics::ensure_for_user(tx, user.id)?;
        logs::record(
            tx,
            user.id,
            LogAction::UserRegistered,
            LogLevel::Info,
            json!({ "email": user.email }),
        )?;
        Ok(user)
    })?;

    log::info!("Registered user {} <{}>", user.id, user.email);
    Ok(user)
}

/// Returns the user when the password matches. Every failure reads the same.
pub fn authenticate(db: &Database, email: &str, password: &str) -> ServiceResult<User> {
    let user = find_login(db, email)?;
    check_password(user, password)
}

/// The account a login names, or `InvalidCredentials`. Cheap; no hashing.
pub fn find_login(db: &Database, email: &str) -> ServiceResult<User> {
    let Ok(email) = validation::validate_email(email) else {
        return Err(ServiceError::InvalidCredentials);
    };
    storage::users::find_by_email(db.connection(), &email)?.ok_or_else(|| {
        log::debug!("Login attempt for unknown email '{}'", email);
        ServiceError::InvalidCredentials
    })
}

/// Verifies `password` against the account's hash. Slow; needs no database.
pub fn check_password(user: User, password: &str) -> ServiceResult<User> {
    if !credentials::verify_password(password, &user.password_hash)? {
        log::debug!("Wrong password for user {}", user.id);
        return Err(ServiceError::InvalidCredentials);
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_authenticate() {
        let mut db = Database::open_in_memory().unwrap();
        let user = register(&mut db, " Ada ", "Ada@Example.com", "secret-password").unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");

        let logged_in = authenticate(&db, "ADA@example.com ", "secret-password").unwrap();
        assert_eq!(logged_in.id, user.id);

        let stat = storage::statistics::ensure_for_user(db.connection(), user.id).unwrap();
        assert_eq!(stat.total_flashcards, 0);
    }

    #[test]
    fn test_duplicate_email_is_a_conflict() {
        let mut db = Database::open_in_memory().unwrap();
        register(&mut db, "Ada", "ada@example.com", "secret-password").unwrap();
        let err = register(&mut db, "Other Ada", "ADA@example.com", "another-password").unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn test_bad_input_is_rejected() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(matches!(
            register(&mut db, "Ada", "not-an-email", "secret-password"),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            register(&mut db, "Ada", "ada@example.com", "short"),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_authentication_failures_look_alike() {
        let mut db = Database::open_in_memory().unwrap();
        register(&mut db, "Ada", "ada@example.com", "secret-password").unwrap();

        let wrong_password = authenticate(&db, "ada@example.com", "nope-nope").unwrap_err();
        let unknown_email = authenticate(&db, "bob@example.com", "secret-password").unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
    }

    #[test]
    fn test_login_lookup_and_check_are_separate_steps() {
        let mut db = Database::open_in_memory().unwrap();
        register(&mut db, "Ada", "ada@example.com", "secret-password").unwrap();

        let found = find_login(&db, "Ada@Example.com").unwrap();
        assert!(matches!(
            check_password(found.clone(), "nope-nope"),
            Err(ServiceError::InvalidCredentials)
        ));
        assert_eq!(check_password(found, "secret-password").unwrap().name, "Ada");
        assert!(matches!(
            find_login(&db, "bob@example.com"),
            Err(ServiceError::InvalidCredentials)
        ));
    }
}
