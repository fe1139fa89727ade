//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use artify_core::profile::UserProfile;
use artify_core::{Email, UserId};

/// An account together with its profile document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Normalized login email.
    pub email: Email,
    /// Profile document.
    pub profile: UserProfile,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Where this user lands after signing in.
    #[must_use]
    pub const fn landing_route(&self) -> &'static str {
        self.profile.landing_route()
    }
}
