//! Account and profile records.

use serde::{Deserialize, Serialize};

/// The signed-in account as returned by the auth endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Result of a successful login or OTP verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Extended user attributes shown on the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl Profile {
    /// Display name, falling back to the username and then the email.
    pub fn display_name(&self) -> &str {
        [&self.name, &self.username, &self.email]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("Reader")
    }
}

/// Body of a profile update request. Produced by `ProfileForm::validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub username: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_api_payload() {
        let json = r#"{
            "_id": "u1",
            "name": "Ada",
            "username": "ada_l",
            "email": "ada@example.com",
            "plan": "Premium",
            "isVerified": true,
            "profileImage": "https://cdn.example.com/ada.png"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "u1");
        assert!(profile.is_verified);
        assert_eq!(profile.plan.as_deref(), Some("Premium"));
        assert_eq!(
            profile.profile_image.as_deref(),
            Some("https://cdn.example.com/ada.png")
        );
    }

    #[test]
    fn test_profile_defaults_for_missing_fields() {
        let profile: Profile = serde_json::from_str(r#"{"id": "u2"}"#).unwrap();
        assert_eq!(profile.id, "u2");
        assert!(!profile.is_verified);
        assert!(profile.plan.is_none());
        assert_eq!(profile.display_name(), "Reader");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut profile = Profile {
            email: "x@example.com".to_string(),
            ..Profile::default()
        };
        assert_eq!(profile.display_name(), "x@example.com");
        profile.username = "xy".to_string();
        assert_eq!(profile.display_name(), "xy");
        profile.name = "  ".to_string();
        assert_eq!(profile.display_name(), "xy");
    }

    #[test]
    fn test_session_user_accepts_underscore_id() {
        let session: Session = serde_json::from_str(
            r#"{"token":"t","user":{"_id":"u3","email":"a@b.co"}}"#,
        )
        .unwrap();
        assert_eq!(session.user.id, "u3");
        assert!(session.user.name.is_none());
    }
}
