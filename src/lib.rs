include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod api;
pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
