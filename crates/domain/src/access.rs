//! Role-based gating of dashboard features.
//!
//! Every check here is a pure lookup against the static role table. The
//! answers drive what the dashboard renders; they are not an authorization
//! boundary and the REST backend must re-check every request.

use serde::{Deserialize, Serialize};

use crate::{Permission, Role, Session, sidebar_items, sidebar_permission};

/// Returns whether any of the roles is granted the permission.
#[must_use]
pub fn has_permission(user_roles: &[Role], permission: Permission) -> bool {
    permission
        .granted_roles()
        .iter()
        .any(|role| user_roles.contains(role))
}

/// Returns whether the roles are granted a permission given by its
/// `resource.action` value. Unknown values are never granted.
#[must_use]
pub fn has_permission_key(user_roles: &[Role], permission_key: &str) -> bool {
    permission_key
        .parse::<Permission>()
        .is_ok_and(|permission| has_permission(user_roles, permission))
}

/// Returns every permission granted to the roles, in declaration order.
#[must_use]
pub fn user_permissions(user_roles: &[Role]) -> Vec<Permission> {
    Permission::all()
        .iter()
        .copied()
        .filter(|permission| has_permission(user_roles, *permission))
        .collect()
}

/// Returns whether a sidebar item is visible for the roles.
///
/// Items missing from the sidebar table are hidden.
#[must_use]
pub fn can_access_sidebar_item(user_roles: &[Role], sidebar_item_id: &str) -> bool {
    sidebar_permission(sidebar_item_id)
        .is_some_and(|permission| has_permission(user_roles, permission))
}

/// Returns the sidebar items visible for the roles, in display order.
#[must_use]
pub fn accessible_sidebar_items(user_roles: &[Role]) -> Vec<&'static str> {
    sidebar_items()
        .filter(|item_id| can_access_sidebar_item(user_roles, item_id))
        .collect()
}

/// Returns whether the user holds at least one of the required roles.
///
/// An empty requirement matches nothing.
#[must_use]
pub fn has_any_role(user_roles: &[Role], required: &[Role]) -> bool {
    required.iter().any(|role| user_roles.contains(role))
}

/// Returns whether the user holds every required role.
///
/// An empty requirement is always satisfied.
#[must_use]
pub fn has_all_roles(user_roles: &[Role], required: &[Role]) -> bool {
    required.iter().all(|role| user_roles.contains(role))
}

/// Declarative access rule attached to a route or a UI block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AccessRequirement {
    /// Any signed-in user.
    Authenticated,
    /// A signed-in user holding the permission.
    Permission(Permission),
    /// A signed-in user holding at least one of the roles.
    AnyRole(Vec<Role>),
    /// A signed-in user holding every one of the roles.
    AllRoles(Vec<Role>),
    /// A signed-in user who can see the sidebar item.
    SidebarItem(String),
    /// Every nested requirement.
    All(Vec<AccessRequirement>),
}

impl AccessRequirement {
    /// Evaluates the requirement against a session.
    #[must_use]
    pub fn is_satisfied_by(&self, session: &Session) -> bool {
        if !session.is_authenticated() {
            return false;
        }

        let roles = session.roles();
        match self {
            Self::Authenticated => true,
            Self::Permission(permission) => has_permission(roles, *permission),
            Self::AnyRole(required) => has_any_role(roles, required),
            Self::AllRoles(required) => has_all_roles(roles, required),
            Self::SidebarItem(item_id) => can_access_sidebar_item(roles, item_id),
            Self::All(requirements) => requirements
                .iter()
                .all(|requirement| requirement.is_satisfied_by(session)),
        }
    }
}
