use league_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use league_domain::{RoleClaim, Session};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// Identity payload returned by the authentication backend at sign-in.
///
/// Backends name the same claim differently (`subject` or `sub`, `name` or
/// `display_name`, `roles` or `role`) and some send both spellings. Every
/// spelling is kept as its own field and the canonical one wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    roles: Option<RoleClaim>,
    #[serde(default)]
    role: Option<RoleClaim>,
}

impl AuthPayload {
    /// Creates a payload for a subject with no other claims.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the raw role claim.
    #[must_use]
    pub fn with_roles(mut self, roles: RoleClaim) -> Self {
        self.roles = Some(roles);
        self
    }

    /// Returns the subject, preferring `subject` over `sub`.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref().or(self.sub.as_deref())
    }

    /// Returns the display name, preferring `display_name` over `name`.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.name.as_deref())
    }

    /// Returns the email address, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the role claim, preferring `roles` over `role`.
    #[must_use]
    pub fn role_claim(&self) -> Option<&RoleClaim> {
        self.roles.as_ref().or(self.role.as_ref())
    }
}

/// Establishes and clears dashboard sessions.
///
/// Role claims are normalized exactly once here, so every later access
/// check works on the closed role set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionService;

impl SessionService {
    /// Creates a session service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Establishes a session from a raw JSON authentication payload.
    pub fn establish(&self, payload: &Value) -> AppResult<Session> {
        let payload = AuthPayload::deserialize(payload).map_err(|error| {
            AppError::Validation(format!("invalid authentication payload: {error}"))
        })?;

        self.establish_from(payload)
    }

    /// Establishes a session from a decoded authentication payload.
    pub fn establish_from(&self, payload: AuthPayload) -> AppResult<Session> {
        let subject = NonEmptyString::new(payload.subject().unwrap_or_default())
            .map_err(|_| AppError::Validation("authentication subject is required".to_owned()))?;
        let display_name = payload
            .display_name()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(subject.as_str())
            .to_owned();

        let normalized = payload
            .role_claim()
            .map(RoleClaim::normalize)
            .unwrap_or_default();
        for unrecognized in &normalized.unrecognized {
            warn!(
                subject = %subject,
                role = %unrecognized,
                "dropping unrecognized role from authentication payload"
            );
        }

        let identity = UserIdentity::new(String::from(subject), display_name, payload.email);
        let session = Session::authenticated(identity, normalized.roles);

        info!(
            subject = %session.identity().map(UserIdentity::subject).unwrap_or_default(),
            role_count = session.roles().len(),
            "dashboard session established"
        );

        Ok(session)
    }

    /// Ends a session. The returned session holds no identity and no roles.
    #[must_use]
    pub fn sign_out(&self, session: Session) -> Session {
        if let Some(identity) = session.identity() {
            info!(subject = %identity.subject(), "dashboard session cleared");
        }

        Session::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use league_core::AppError;
    use league_domain::{Role, RoleClaim};
    use serde_json::json;

    use super::{AuthPayload, SessionService};

    #[test]
    fn establishes_session_from_string_claim() {
        let session = SessionService::new()
            .establish(&json!({"sub": "u-1", "name": "Alex", "role": "COACH"}))
            .unwrap_or_else(|error| panic!("{error}"));

        assert!(session.is_authenticated());
        assert_eq!(session.roles(), &[Role::Coach]);
        assert_eq!(
            session.identity().map(|identity| identity.display_name()),
            Some("Alex")
        );
    }

    #[test]
    fn establishes_session_from_object_claim() {
        let session = SessionService::new()
            .establish(&json!({
                "subject": "u-2",
                "email": "lee@league.org",
                "roles": [{"name": "MANAGER"}, {"name": "GROUNDSKEEPER"}]
            }))
            .unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(session.roles(), &[Role::Manager]);
        assert_eq!(
            session.identity().map(|identity| identity.display_name()),
            Some("u-2")
        );
        assert_eq!(
            session.identity().and_then(|identity| identity.email()),
            Some("lee@league.org")
        );
    }

    #[test]
    fn missing_roles_yield_authenticated_session_without_roles() {
        let session = SessionService::new()
            .establish(&json!({"sub": "u-3"}))
            .unwrap_or_else(|error| panic!("{error}"));

        assert!(session.is_authenticated());
        assert!(session.roles().is_empty());
    }

    #[test]
    fn duplicate_claim_spellings_prefer_canonical_keys() {
        let session = SessionService::new()
            .establish(&json!({
                "sub": "u-5",
                "subject": "u-5",
                "name": "Sam",
                "display_name": "Samira",
                "role": "PLAYER",
                "roles": ["ADMIN"]
            }))
            .unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(session.roles(), &[Role::Admin]);
        assert_eq!(
            session.identity().map(|identity| identity.subject()),
            Some("u-5")
        );
        assert_eq!(
            session.identity().map(|identity| identity.display_name()),
            Some("Samira")
        );
    }

    #[test]
    fn built_payload_establishes_session() {
        let payload = AuthPayload::new("console")
            .with_email("ops@league.org")
            .with_roles(RoleClaim::Single("analyst".to_owned()));
        let session = SessionService::new()
            .establish_from(payload)
            .unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(session.roles(), &[Role::Analyst]);
        assert_eq!(
            session.identity().map(|identity| identity.display_name()),
            Some("console")
        );
    }

    #[test]
    fn missing_subject_is_rejected() {
        let result = SessionService::new().establish(&json!({"roles": ["ADMIN"]}));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn blank_subject_is_rejected() {
        let result = SessionService::new().establish(&json!({"sub": "  ", "roles": ["ADMIN"]}));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let result = SessionService::new().establish(&json!({"roles": 42}));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn sign_out_clears_roles() {
        let service = SessionService::new();
        let session = service
            .establish(&json!({"sub": "u-4", "roles": ["ADMIN"]}))
            .unwrap_or_else(|error| panic!("{error}"));

        let cleared = service.sign_out(session);
        assert!(!cleared.is_authenticated());
        assert!(cleared.roles().is_empty());
    }
}
