//! # Service Layer
//!
//! One module per user-facing operation group. Every public function takes the
//! authenticated `User`, applies `core::policy`, and performs its primary write,
//! counter update and audit-log entry inside one `Database::transaction`, so
//! either all of them land or none does.

pub mod flashcards;
pub mod import;
pub mod logs;
pub mod practice;
pub mod statistics;
pub mod users;

use crate::core::{
    credentials::CredentialError, csv_import::CsvImportError, lifecycle::LifecycleError,
    policy::PolicyError, validation::ValidationError,
};
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Forbidden(#[from] PolicyError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("{resource} #{id} was not found.")]
    NotFound { resource: &'static str, id: i64 },
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error(transparent)]
    Import(#[from] CsvImportError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<rusqlite::Error> for ServiceError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Sqlite(e))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
