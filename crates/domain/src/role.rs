use std::str::FromStr;

use league_core::AppError;
use serde::{Deserialize, Serialize};

/// Roles a dashboard user can hold.
///
/// The set is closed: raw role names coming from the authentication
/// payload are mapped onto these variants once, when the session is
/// established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full control over the league.
    Admin,
    /// Runs day-to-day league operations.
    Manager,
    /// Manages squads and match-day rosters.
    Coach,
    /// Registered player.
    Player,
    /// Maintains news and uploaded media.
    ContentEditor,
    /// Read-mostly access to reports and analytics.
    Analyst,
}

impl Role {
    /// Returns the stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Coach => "COACH",
            Self::Player => "PLAYER",
            Self::ContentEditor => "CONTENT_EDITOR",
            Self::Analyst => "ANALYST",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::Admin,
            Role::Manager,
            Role::Coach,
            Role::Player,
            Role::ContentEditor,
            Role::Analyst,
        ];

        ALL
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    /// Parses a role name, ignoring case and surrounding whitespace.
    ///
    /// `content-editor` and `content editor` are accepted as spellings of
    /// `CONTENT_EDITOR`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let canonical = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");

        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == canonical)
            .ok_or_else(|| AppError::Validation(format!("unknown role value '{value}'")))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Role;

    #[test]
    fn role_roundtrip_transport_value() {
        for role in Role::all() {
            let restored = Role::from_str(role.as_str());
            assert!(matches!(restored, Ok(value) if value == *role));
        }
    }

    #[test]
    fn role_parsing_is_lenient_about_spelling() {
        assert!(matches!(Role::from_str(" coach "), Ok(Role::Coach)));
        assert!(matches!(
            Role::from_str("content-editor"),
            Ok(Role::ContentEditor)
        ));
        assert!(matches!(
            Role::from_str("Content Editor"),
            Ok(Role::ContentEditor)
        ));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("REFEREE").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn role_serializes_as_screaming_snake_case() {
        let encoded = serde_json::to_string(&Role::ContentEditor).unwrap_or_default();
        assert_eq!(encoded, "\"CONTENT_EDITOR\"");
    }
}
