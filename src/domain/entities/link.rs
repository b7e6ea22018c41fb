//! Link entity representing a short code mapping.

use serde::{Deserialize, Serialize};

/// A short code mapped to its target URL, together with its owner.
///
/// `user_id` is the subject of the token that created (or last overwrote) the
/// link and drives ownership checks. `user_name` is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Link {
    pub short: String,
    pub long: String,
    #[serde(rename = "user")]
    pub user_id: String,
    pub user_name: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        short: impl Into<String>,
        long: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            short: short.into(),
            long: long.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }

    /// Returns true if `user_id` owns this link.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// A link as requested by a client, before code generation and validation.
#[derive(Debug, Clone, Default)]
pub struct LinkRequest {
    /// Requested short code. Empty means "generate one".
    pub short: String,
    pub long: String,
}
