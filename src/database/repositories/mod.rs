//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod chat;
pub mod user;
pub mod blocked;

// Re-export repositories
pub use chat::ChatRepository;
pub use user::UserRepository;
pub use blocked::BlockedRepository;
