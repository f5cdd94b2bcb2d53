//! Configuration handed to every form at construction
//!
//! Theme and the signed-in user are read from device storage once when the
//! application starts and passed down explicitly from there.

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unknown values fall back to the light theme
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Signed-in back-office user as stored by the login screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormContext {
    pub theme: Theme,
    #[serde(rename = "currentUser", default)]
    pub current_user: Option<CurrentUser>,
}

impl FormContext {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid form context")
    }

    /// Build from the raw `theme` and `authData` storage entries.
    /// Unreadable auth data leaves the context without a user.
    pub fn from_storage_values(theme: Option<&str>, auth_data: Option<&str>) -> Self {
        let current_user = auth_data.and_then(|raw| {
            match serde_json::from_str::<CurrentUser>(raw).context("invalid authData") {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("{:#}", e);
                    None
                }
            }
        });

        Self {
            theme: theme.map(Theme::parse).unwrap_or_default(),
            current_user,
        }
    }

    /// Email recorded as the actor of a save, empty when nobody is signed in
    pub fn actor_email(&self) -> String {
        self.current_user
            .as_ref()
            .map(|u| u.email.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_values() {
        let ctx = FormContext::from_storage_values(
            Some("dark"),
            Some(r#"{"id": 3, "email": "agent@isp.ph", "fullName": "Field Agent"}"#),
        );
        assert_eq!(ctx.theme, Theme::Dark);
        assert_eq!(ctx.actor_email(), "agent@isp.ph");
        assert_eq!(ctx.current_user.unwrap().role, "");
    }

    #[test]
    fn test_bad_storage_values_degrade() {
        let ctx = FormContext::from_storage_values(Some("sepia"), Some("{not json"));
        assert_eq!(ctx, FormContext::default());
        assert_eq!(ctx.actor_email(), "");
    }

    #[test]
    fn test_from_json() {
        let ctx = FormContext::from_json(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(ctx.theme, Theme::Dark);
        assert!(ctx.current_user.is_none());
        assert!(FormContext::from_json("[]").is_err());
    }
}
