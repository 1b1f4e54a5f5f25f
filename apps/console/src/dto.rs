use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

/// Permissions resolved for a role claim.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/permissions-response.ts"
)]
pub struct PermissionsResponse {
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

/// Outcome of a single permission check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/permission-check-response.ts"
)]
pub struct PermissionCheckResponse {
    pub permission: String,
    pub granted: bool,
}

/// Sidebar items visible for a role claim.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/sidebar-response.ts"
)]
pub struct SidebarResponse {
    pub items: Vec<String>,
}

/// Visibility of one sidebar item.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/sidebar-item-check-response.ts"
)]
pub struct SidebarItemCheckResponse {
    pub item: String,
    pub visible: bool,
}

/// Whole-form validation outcome.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/form-validation-response.ts"
)]
pub struct FormValidationResponse {
    pub form: String,
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

/// Single-field validation outcome.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/field-validation-response.ts"
)]
pub struct FieldValidationResponse {
    pub form: String,
    pub field: String,
    pub error: Option<String>,
}
