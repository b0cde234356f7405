//! Owner authorization
//!
//! /stats and /broadcast are restricted to the ids listed in `bot.admin_ids`.

use std::collections::HashSet;
use teloxide::types::{Message, User};
use tracing::{debug, warn};
use crate::config::Settings;
use crate::utils::errors::{HeraldError, Result};

/// Owner-only gate for privileged commands
#[derive(Clone, Debug)]
pub struct AuthMiddleware {
    admin_ids: HashSet<i64>,
}

impl AuthMiddleware {
    pub fn new(admin_ids: &[i64]) -> Self {
        Self {
            admin_ids: admin_ids.iter().copied().collect(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.bot.admin_ids)
    }

    /// Check if user is an owner
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// Check if user is authorized for owner commands
    pub fn check_admin_auth(&self, user: &User) -> Result<()> {
        let user_id = user.id.0 as i64;

        if self.is_admin(user_id) {
            debug!(user_id = user_id, "Admin authentication successful");
            Ok(())
        } else {
            warn!(user_id = user_id, "Unauthorized admin access attempt");
            Err(HeraldError::PermissionDenied(
                "Admin privileges required".to_string()
            ))
        }
    }

    /// Same as [`check_admin_auth`](Self::check_admin_auth) for the sender of a message.
    /// Messages without a sender (channel posts, anonymous admins) are rejected.
    pub fn check_message(&self, msg: &Message) -> Result<()> {
        match msg.from.as_ref() {
            Some(user) => self.check_admin_auth(user),
            None => Err(HeraldError::PermissionDenied("Message has no sender".to_string())),
        }
    }

    /// Get list of admin IDs
    pub fn get_admin_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.admin_ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
