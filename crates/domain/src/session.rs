use league_core::UserIdentity;
use serde::{Deserialize, Serialize};

use crate::Role;

/// Role claim exactly as the authentication backend sends it.
///
/// Depending on the endpoint the claim is a single (possibly
/// comma-separated) role name, a list of names or a list of role objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    /// `"ADMIN"` or `"ADMIN,COACH"`.
    Single(String),
    /// `["ADMIN", "COACH"]`.
    Names(Vec<String>),
    /// `[{"name": "ADMIN"}, {"role": "COACH"}]`.
    Objects(Vec<RoleObject>),
}

/// Role object shape used by some authentication payloads.
///
/// Backends disagree on where the role lives: some send a display `name`
/// next to a machine `code`, others only one of `name`, `role` or `code`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleObject {
    /// Role name, sometimes a display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Role name under the `role` key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Machine role code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl RoleObject {
    /// Picks the role name carried by the object.
    ///
    /// The first of `name`, `role` and `code` naming a known role wins. When
    /// none does, the first non-blank candidate is returned so the caller
    /// can report it.
    #[must_use]
    pub fn role_name(&self) -> Option<&str> {
        let candidates = || {
            [&self.name, &self.role, &self.code]
                .into_iter()
                .filter_map(|candidate| candidate.as_deref())
                .map(str::trim)
                .filter(|candidate| !candidate.is_empty())
        };

        candidates()
            .find(|candidate| candidate.parse::<Role>().is_ok())
            .or_else(|| candidates().next())
    }
}

/// Canonical role list produced from a raw claim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRoles {
    /// Recognized roles, de-duplicated in first-seen order.
    pub roles: Vec<Role>,
    /// Raw names that did not match any known role.
    pub unrecognized: Vec<String>,
}

impl RoleClaim {
    /// Maps the raw claim onto the closed role set.
    #[must_use]
    pub fn normalize(&self) -> NormalizedRoles {
        let names: Vec<&str> = match self {
            Self::Single(value) => value.split(',').collect(),
            Self::Names(values) => values.iter().map(String::as_str).collect(),
            Self::Objects(values) => values.iter().filter_map(RoleObject::role_name).collect(),
        };

        let mut normalized = NormalizedRoles::default();
        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            match name.parse::<Role>() {
                Ok(role) => {
                    if !normalized.roles.contains(&role) {
                        normalized.roles.push(role);
                    }
                }
                Err(_) => normalized.unrecognized.push(name.to_owned()),
            }
        }

        normalized
    }
}

/// Dashboard session: who is signed in and which roles they hold.
///
/// Roles are fixed for the lifetime of the session. Signing in again
/// replaces the session wholesale, signing out yields an anonymous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<UserIdentity>,
    roles: Vec<Role>,
}

impl Session {
    /// Creates a session with no identity and no roles.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates an authenticated session.
    #[must_use]
    pub fn authenticated(identity: UserIdentity, roles: Vec<Role>) -> Self {
        let mut unique_roles = Vec::with_capacity(roles.len());
        for role in roles {
            if !unique_roles.contains(&role) {
                unique_roles.push(role);
            }
        }

        Self {
            identity: Some(identity),
            roles: unique_roles,
        }
    }

    /// Returns whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns the signed-in identity.
    #[must_use]
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    /// Returns the session roles. Anonymous sessions hold none.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}

#[cfg(test)]
mod tests {
    use league_core::UserIdentity;

    use super::{RoleClaim, Session};
    use crate::Role;

    fn parse_claim(raw: &str) -> RoleClaim {
        serde_json::from_str(raw).unwrap_or_else(|error| panic!("invalid claim {raw}: {error}"))
    }

    #[test]
    fn single_string_claim_is_normalized() {
        let normalized = parse_claim("\"coach\"").normalize();
        assert_eq!(normalized.roles, vec![Role::Coach]);
        assert!(normalized.unrecognized.is_empty());
    }

    #[test]
    fn comma_separated_claim_is_split() {
        let normalized = parse_claim("\"ADMIN, ANALYST,,\"").normalize();
        assert_eq!(normalized.roles, vec![Role::Admin, Role::Analyst]);
    }

    #[test]
    fn name_list_claim_is_deduplicated() {
        let normalized = parse_claim(r#"["MANAGER", "manager", "PLAYER"]"#).normalize();
        assert_eq!(normalized.roles, vec![Role::Manager, Role::Player]);
    }

    #[test]
    fn object_list_claim_accepts_aliases() {
        let normalized = parse_claim(
            r#"[{"id": 1, "name": "ADMIN"}, {"role": "CONTENT_EDITOR"}, {"code": "REFEREE"}]"#,
        )
        .normalize();
        assert_eq!(normalized.roles, vec![Role::Admin, Role::ContentEditor]);
        assert_eq!(normalized.unrecognized, vec!["REFEREE".to_owned()]);
    }

    #[test]
    fn object_with_display_name_and_code_uses_the_known_role() {
        let normalized = parse_claim(
            r#"[{"id": 1, "name": "Administrator", "code": "ADMIN"},
                {"id": 2, "name": "COACH", "code": "coach"}]"#,
        )
        .normalize();
        assert_eq!(normalized.roles, vec![Role::Admin, Role::Coach]);
        assert!(normalized.unrecognized.is_empty());
    }

    #[test]
    fn object_without_known_role_reports_first_candidate() {
        let normalized =
            parse_claim(r#"[{"name": "Referee", "code": "REF"}, {"id": 3}]"#).normalize();
        assert!(normalized.roles.is_empty());
        assert_eq!(normalized.unrecognized, vec!["Referee".to_owned()]);
    }

    #[test]
    fn empty_claims_yield_no_roles() {
        assert!(parse_claim("\"\"").normalize().roles.is_empty());
        assert!(parse_claim("[]").normalize().roles.is_empty());
    }

    #[test]
    fn anonymous_session_has_no_roles() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.roles().is_empty());
        assert!(session.identity().is_none());
    }

    #[test]
    fn authenticated_session_keeps_unique_roles() {
        let session = Session::authenticated(
            UserIdentity::new("user-1", "Dana", None),
            vec![Role::Coach, Role::Coach, Role::Player],
        );
        assert!(session.is_authenticated());
        assert_eq!(session.roles(), &[Role::Coach, Role::Player]);
    }
}
