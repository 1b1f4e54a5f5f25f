//! Roles, permissions and form validation for the league dashboard.

#![forbid(unsafe_code)]

pub mod access;
mod permission;
mod role;
mod session;
mod sidebar;
pub mod validation;

pub use access::{
    AccessRequirement, accessible_sidebar_items, can_access_sidebar_item, has_all_roles,
    has_any_role, has_permission, has_permission_key, user_permissions,
};
pub use permission::Permission;
pub use role::Role;
pub use session::{NormalizedRoles, RoleClaim, RoleObject, Session};
pub use sidebar::{sidebar_items, sidebar_permission};
pub use validation::{
    DateReference, FormData, FormRecord, Rule, ValidationResult, Validator, parse_date, rules,
};
