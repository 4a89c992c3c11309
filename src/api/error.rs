// src/api/error.rs

use crate::services::ServiceError;
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Authentication required.")]
    MissingCredentials,
    #[error("{0}")]
    BadRequest(String),
    #[error("The database is unavailable.")]
    LockPoisoned,
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(e) => match e {
                ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
                ServiceError::Conflict(_) | ServiceError::Lifecycle(_) => StatusCode::CONFLICT,
                ServiceError::Import(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ServiceError::Credentials(_) | ServiceError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::MissingCredentials => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::LockPoisoned | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal details stay in the server log.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("Request failed: {}", self);
            "Internal server error.".to_string()
        } else {
            log::debug!("Request rejected with {}: {}", status, self);
            self.to_string()
        };

        let body = Json(json!({ "error": message }));
        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, r#"Basic realm="recall""#)], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
