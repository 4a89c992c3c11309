//! # HTTP JSON API
//!
//! A thin `axum` layer over `services`. Every route except registration
//! authenticates with HTTP Basic credentials (email and password). The database
//! sits behind one `Mutex`; a handler holds it for a single service call.

pub mod auth;
pub mod error;
pub mod routes;

use crate::{core::validation::ValidationRules, storage::Database};
use error::ApiError;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct ApiState {
    db: Mutex<Database>,
    pub rules: ValidationRules,
    pub default_log_limit: usize,
}

pub type SharedState = Arc<ApiState>;

impl ApiState {
    pub fn new(db: Database, rules: ValidationRules, default_log_limit: usize) -> SharedState {
        Arc::new(Self {
            db: Mutex::new(db),
            rules,
            default_log_limit,
        })
    }

    pub fn db(&self) -> Result<MutexGuard<'_, Database>, ApiError> {
        self.db.lock().map_err(|_| ApiError::LockPoisoned)
    }
}

pub use routes::router;

/// Binds `addr` and serves until Ctrl+C.
pub async fn serve(state: SharedState, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                log::warn!("Could not install the Ctrl+C handler");
                std::future::pending::<()>().await;
            }
            log::info!("Shutting down");
        })
        .await
}
