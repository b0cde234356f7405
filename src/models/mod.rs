//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod chat;
pub mod user;
pub mod blocked;

// Re-export commonly used models
pub use chat::{ChatRecord, ChatType, NewChat};
pub use user::UserRecord;
pub use blocked::{BlockedRecord, ChatStats};
