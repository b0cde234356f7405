//! Test helpers module
//!
//! Mock Telegram API server and test data builders shared by the integration tests.

#![allow(dead_code)]

pub mod telegram_mock;
pub mod test_data;

pub use telegram_mock::*;
pub use test_data::*;
