// Declare all modules
pub mod auth;
pub mod cards;
pub mod config;
pub mod session;
pub mod storage;
pub mod utils;

// No re-exports here as they're handled in lib.rs
