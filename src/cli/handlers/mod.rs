// src/cli/handlers/mod.rs

// One module per top-level command.

pub mod commons;
pub mod create;
pub mod delete;
pub mod help;
pub mod import;
pub mod list;
pub mod logs;
pub mod menu;
pub mod practice;
pub mod register;
pub mod reset;
pub mod restore;
pub mod serve;
pub mod stats;
pub mod trash;
