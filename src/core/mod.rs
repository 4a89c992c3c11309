// src/core/mod.rs

pub mod config;
pub mod credentials;
pub mod csv_import;
pub mod lifecycle;
pub mod paths;
pub mod policy;
pub mod scoring;
pub mod session_cache;
pub mod validation;
