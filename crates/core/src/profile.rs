//! Artisan profile document.
//!
//! The profile is stored as one JSON document per user. Setup fills in the
//! artisan details and flips `completedProfile`; settings and later edits
//! merge individual fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a signed-out visitor is sent.
pub const LOGIN_ROUTE: &str = "/login";
/// Where a user without a completed profile is sent.
pub const PROFILE_SETUP_ROUTE: &str = "/profile/setup";
/// Where a user with a completed profile is sent.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Shortest accepted new password.
pub const MIN_PASSWORD_CHARS: usize = 8;
/// Longest accepted new password.
pub const MAX_PASSWORD_CHARS: usize = 15;

/// Tone used when generating stories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryTone {
    #[default]
    Casual,
    Formal,
    Playful,
}

/// Visual style preferred for ad creatives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdStyle {
    #[default]
    Minimalist,
    Colorful,
    Trendy,
}

/// Generation preferences chosen on the settings page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub story_tone: StoryTone,
    pub ad_style: AdStyle,
}

/// The stored profile document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
    pub bio: String,
    pub category: String,
    #[serde(rename = "portfolioURL")]
    pub portfolio_url: String,
    pub studio_location: String,
    pub years_of_practice: String,
    pub achievements: String,
    pub social_links: String,
    pub completed_profile: bool,
    pub preferences: Preferences,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// The document written at sign-up.
    #[must_use]
    pub fn new_signup(name: &str, email: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: name.trim().to_owned(),
            email: email.to_owned(),
            created_at: Some(now),
            ..Self::default()
        }
    }

    /// Apply the setup form and mark the profile complete.
    pub fn complete_setup(&mut self, setup: ProfileSetup, now: DateTime<Utc>) {
        self.name = setup.name;
        self.bio = setup.bio;
        self.category = setup.category;
        self.portfolio_url = setup.portfolio_url;
        self.studio_location = setup.studio_location;
        self.years_of_practice = setup.years_of_practice;
        self.achievements = setup.achievements;
        self.social_links = setup.social_links;
        if let Some(photo) = setup.photo_url {
            self.photo_url = photo;
        }
        self.completed_profile = true;
        self.updated_at = Some(now);
    }

    /// Merge the fields present in `update`.
    pub fn apply(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        let ProfileUpdate {
            name,
            photo_url,
            bio,
            category,
            portfolio_url,
            studio_location,
            years_of_practice,
            achievements,
            social_links,
        } = update;
        let fields = [
            (&mut self.name, name),
            (&mut self.photo_url, photo_url),
            (&mut self.bio, bio),
            (&mut self.category, category),
            (&mut self.portfolio_url, portfolio_url),
            (&mut self.studio_location, studio_location),
            (&mut self.years_of_practice, years_of_practice),
            (&mut self.achievements, achievements),
            (&mut self.social_links, social_links),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        self.updated_at = Some(now);
    }

    /// Where this user lands after signing in.
    #[must_use]
    pub const fn landing_route(&self) -> &'static str {
        if self.completed_profile {
            DASHBOARD_ROUTE
        } else {
            PROFILE_SETUP_ROUTE
        }
    }
}

/// Landing route for an optional profile (`None` means signed out).
#[must_use]
pub const fn landing_route(profile: Option<&UserProfile>) -> &'static str {
    match profile {
        Some(profile) => profile.landing_route(),
        None => LOGIN_ROUTE,
    }
}

/// Profile setup form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSetup {
    pub name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub bio: String,
    pub category: String,
    #[serde(rename = "portfolioURL")]
    pub portfolio_url: String,
    pub studio_location: String,
    pub years_of_practice: String,
    pub achievements: String,
    pub social_links: String,
}

/// Partial profile edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "portfolioURL")]
    pub portfolio_url: Option<String>,
    pub studio_location: Option<String>,
    pub years_of_practice: Option<String>,
    pub achievements: Option<String>,
    pub social_links: Option<String>,
}

/// Password change form.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordChange")
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

/// Problems with a password change request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordChangeError {
    #[error("Please fill in all password fields.")]
    MissingField,
    #[error("New passwords do not match.")]
    Mismatch,
    #[error("Password must be 8-15 characters and contain only letters and numbers.")]
    Format,
}

impl PasswordChange {
    /// Check the form before re-authenticating.
    ///
    /// # Errors
    ///
    /// Missing fields first, then mismatch, then format.
    pub fn validate(&self) -> Result<(), PasswordChangeError> {
        if self.current_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(PasswordChangeError::MissingField);
        }
        if self.new_password != self.confirm_password {
            return Err(PasswordChangeError::Mismatch);
        }
        let len = self.new_password.chars().count();
        if !(MIN_PASSWORD_CHARS..=MAX_PASSWORD_CHARS).contains(&len)
            || !self.new_password.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(PasswordChangeError::Format);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_signup_document() {
        let now = Utc::now();
        let profile = UserProfile::new_signup(" Meera ", "meera@example.com", now);
        assert_eq!(profile.name, "Meera");
        assert!(!profile.completed_profile);
        assert_eq!(profile.landing_route(), PROFILE_SETUP_ROUTE);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["photoURL"], "");
        assert_eq!(json["completedProfile"], false);
        assert_eq!(json["preferences"]["storyTone"], "Casual");
        assert_eq!(json["preferences"]["adStyle"], "Minimalist");
    }

    #[test]
    fn test_setup_completes_profile() {
        let mut profile = UserProfile::new_signup("Ravi", "ravi@example.com", Utc::now());
        let setup: ProfileSetup = serde_json::from_value(json!({
            "name": "Ravi Kumar",
            "category": "Woodwork",
            "studioLocation": "Channapatna",
            "yearsOfPractice": "12"
        }))
        .unwrap();
        profile.complete_setup(setup, Utc::now());

        assert!(profile.completed_profile);
        assert_eq!(profile.category, "Woodwork");
        assert_eq!(profile.landing_route(), DASHBOARD_ROUTE);
        assert!(profile.updated_at.is_some());
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut profile = UserProfile {
            bio: "Potter".to_owned(),
            category: "Ceramics".to_owned(),
            ..UserProfile::default()
        };
        let update: ProfileUpdate = serde_json::from_value(json!({"bio": "Potter and teacher"})).unwrap();
        profile.apply(update, Utc::now());
        assert_eq!(profile.bio, "Potter and teacher");
        assert_eq!(profile.category, "Ceramics");
    }

    #[test]
    fn test_landing_routes() {
        assert_eq!(landing_route(None), LOGIN_ROUTE);
        let done = UserProfile {
            completed_profile: true,
            ..UserProfile::default()
        };
        assert_eq!(landing_route(Some(&done)), DASHBOARD_ROUTE);
    }

    #[test]
    fn test_missing_document_fields_default() {
        let profile: UserProfile = serde_json::from_value(json!({"name": "Old"})).unwrap();
        assert_eq!(profile.preferences, Preferences::default());
        assert!(profile.created_at.is_none());
    }

    #[test]
    fn test_password_change_rules() {
        let form = |current: &str, new: &str, confirm: &str| PasswordChange {
            current_password: current.to_owned(),
            new_password: new.to_owned(),
            confirm_password: confirm.to_owned(),
        };
        assert_eq!(
            form("", "abc12345", "abc12345").validate(),
            Err(PasswordChangeError::MissingField)
        );
        assert_eq!(
            form("old", "abc12345", "abc12346").validate(),
            Err(PasswordChangeError::Mismatch)
        );
        assert_eq!(
            form("old", "short1", "short1").validate(),
            Err(PasswordChangeError::Format)
        );
        assert_eq!(
            form("old", "has space 123", "has space 123").validate(),
            Err(PasswordChangeError::Format)
        );
        assert_eq!(
            form("old", "abcdefgh12345678", "abcdefgh12345678").validate(),
            Err(PasswordChangeError::Format)
        );
        assert!(form("old", "Clay2024pots", "Clay2024pots").validate().is_ok());
    }
}
