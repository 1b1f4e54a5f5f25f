use std::str::FromStr;

use league_core::{AppError, AppResult, UserIdentity};
use league_domain::{AccessRequirement, Permission, Role, Session};
use tracing::{debug, warn};


/// How unknown permission and sidebar keys are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupMode {
    /// Unknown keys are silently denied.
    #[default]
    FailClosed,
    /// Unknown keys are reported as validation errors. Meant for
    /// development builds, to surface typos in gating configuration.
    Strict,
}

impl LookupMode {
    /// Returns the stable configuration value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailClosed => "fail_closed",
            Self::Strict => "strict",
        }
    }
}

impl FromStr for LookupMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "fail_closed" => Ok(Self::FailClosed),
            "strict" => Ok(Self::Strict),
            other => Err(AppError::Validation(format!(
                "lookup mode must be either 'fail_closed' or 'strict', got '{other}'"
            ))),
        }
    }
}

/// Session-scoped access checks for the dashboard.
///
/// Decides what the dashboard renders. The REST backend stays the
/// authority and re-checks every request on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessService {
    lookup_mode: LookupMode,
}

impl AccessService {
    /// Creates an access service using the given lookup mode.
    #[must_use]
    pub fn new(lookup_mode: LookupMode) -> Self {
        Self { lookup_mode }
    }

    /// Returns the configured lookup mode.
    #[must_use]
    pub fn lookup_mode(&self) -> LookupMode {
        self.lookup_mode
    }

    /// Returns whether the session holds the permission.
    #[must_use]
    pub fn has_permission(&self, session: &Session, permission: Permission) -> bool {
        let granted = league_domain::has_permission(session.roles(), permission);
        if !granted {
            debug!(
                subject = %subject_of(session),
                permission = %permission,
                "permission check denied"
            );
        }

        granted
    }

    /// Returns whether the session holds a permission given by its
    /// `resource.action` value.
    pub fn has_permission_key(&self, session: &Session, permission_key: &str) -> AppResult<bool> {
        match Permission::from_str(permission_key) {
            Ok(permission) => Ok(self.has_permission(session, permission)),
            Err(_) => self.unknown_key("permission", permission_key),
        }
    }

    /// Returns whether the session can see a sidebar item.
    pub fn can_access_sidebar_item(
        &self,
        session: &Session,
        sidebar_item_id: &str,
    ) -> AppResult<bool> {
        if league_domain::sidebar_permission(sidebar_item_id).is_none() {
            return self.unknown_key("sidebar item", sidebar_item_id);
        }

        Ok(league_domain::can_access_sidebar_item(
            session.roles(),
            sidebar_item_id,
        ))
    }

    /// Returns every permission held by the session.
    #[must_use]
    pub fn permissions(&self, session: &Session) -> Vec<Permission> {
        league_domain::user_permissions(session.roles())
    }

    /// Returns the sidebar items visible to the session.
    #[must_use]
    pub fn sidebar_items(&self, session: &Session) -> Vec<&'static str> {
        league_domain::accessible_sidebar_items(session.roles())
    }

    /// Returns whether the session holds at least one of the roles.
    #[must_use]
    pub fn has_any_role(&self, session: &Session, required: &[Role]) -> bool {
        league_domain::has_any_role(session.roles(), required)
    }

    /// Returns whether the session holds every one of the roles.
    #[must_use]
    pub fn has_all_roles(&self, session: &Session, required: &[Role]) -> bool {
        league_domain::has_all_roles(session.roles(), required)
    }

    /// Evaluates a route or block requirement.
    pub fn check(&self, session: &Session, requirement: &AccessRequirement) -> AppResult<bool> {
        if self.lookup_mode == LookupMode::Strict {
            ensure_known_sidebar_items(requirement)?;
        }

        let satisfied = requirement.is_satisfied_by(session);
        if !satisfied {
            debug!(
                subject = %subject_of(session),
                requirement = ?requirement,
                "access requirement not met"
            );
        }

        Ok(satisfied)
    }

    /// Ensures the session holds the permission.
    pub fn require_permission(&self, session: &Session, permission: Permission) -> AppResult<()> {
        if !session.is_authenticated() {
            return Err(AppError::Unauthorized(format!(
                "sign in required for permission '{permission}'"
            )));
        }

        if self.has_permission(session, permission) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{}' is missing permission '{permission}'",
            subject_of(session)
        )))
    }

    /// Ensures the session meets a requirement.
    pub fn require(&self, session: &Session, requirement: &AccessRequirement) -> AppResult<()> {
        if !session.is_authenticated() {
            return Err(AppError::Unauthorized("sign in required".to_owned()));
        }

        if self.check(session, requirement)? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{}' does not meet access requirement {requirement:?}",
            subject_of(session)
        )))
    }

    fn unknown_key(&self, kind: &str, key: &str) -> AppResult<bool> {
        match self.lookup_mode {
            LookupMode::FailClosed => Ok(false),
            LookupMode::Strict => {
                warn!(kind, key, "unknown access key");
                Err(AppError::Validation(format!("unknown {kind} key '{key}'")))
            }
        }
    }
}

fn ensure_known_sidebar_items(requirement: &AccessRequirement) -> AppResult<()> {
    match requirement {
        AccessRequirement::SidebarItem(item_id)
            if league_domain::sidebar_permission(item_id).is_none() =>
        {
            warn!(key = %item_id, "unknown sidebar item in access requirement");
            Err(AppError::Validation(format!(
                "unknown sidebar item key '{item_id}'"
            )))
        }
        AccessRequirement::All(requirements) => requirements
            .iter()
            .try_for_each(ensure_known_sidebar_items),
        _ => Ok(()),
    }
}

fn subject_of(session: &Session) -> &str {
    session
        .identity()
        .map(UserIdentity::subject)
        .unwrap_or("anonymous")
}
