//! Middleware module
//!
//! Request gates applied by handlers before privileged work

pub mod auth;

pub use auth::AuthMiddleware;
