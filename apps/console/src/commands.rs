use std::convert::Infallible;

use clap::{Parser, Subcommand};
use league_application::{
    AccessService, AuthPayload, FormValidationService, LeagueForm, SessionService,
};
use league_core::{AppError, AppResult};
use league_domain::{RoleClaim, Session};
use serde::Serialize;
use serde_json::Value;

use crate::console_config::ConsoleConfig;
use crate::dto::{
    FieldValidationResponse, FormValidationResponse, PermissionCheckResponse, PermissionsResponse,
    SidebarItemCheckResponse, SidebarResponse,
};

#[derive(Debug, Parser)]
#[command(
    name = "league-console",
    about = "Answers league dashboard access and form validation questions"
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConsoleConfig,

    #[command(subcommand)]
    pub command: Command,
}

/// Role arguments accept a JSON claim (`'["ADMIN"]'`) or a plain,
/// possibly comma-separated, role string.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List the roles and permissions a role claim grants.
    Permissions {
        #[arg(value_parser = parse_role_claim)]
        roles: RoleClaim,
    },
    /// Check a single permission key, e.g. "teams.create".
    Check {
        #[arg(value_parser = parse_role_claim)]
        roles: RoleClaim,
        permission: String,
    },
    /// List visible sidebar items, or check one item.
    Sidebar {
        #[arg(value_parser = parse_role_claim)]
        roles: RoleClaim,
        item: Option<String>,
    },
    /// Validate a whole form submission.
    Validate {
        form: LeagueForm,
        #[arg(value_parser = parse_payload)]
        payload: Value,
    },
    /// Validate one field of a form submission.
    ValidateField {
        form: LeagueForm,
        field: String,
        #[arg(value_parser = parse_payload)]
        payload: Value,
    },
}

pub struct Services {
    pub sessions: SessionService,
    pub access: AccessService,
    pub forms: FormValidationService,
}

pub fn execute(command: Command, services: &Services) -> AppResult<Value> {
    match command {
        Command::Permissions { roles } => {
            let session = console_session(services, roles)?;
            to_json(PermissionsResponse {
                roles: session
                    .roles()
                    .iter()
                    .map(|role| role.as_str().to_owned())
                    .collect(),
                permissions: services
                    .access
                    .permissions(&session)
                    .into_iter()
                    .map(|permission| permission.as_str().to_owned())
                    .collect(),
            })
        }
        Command::Check { roles, permission } => {
            let session = console_session(services, roles)?;
            let granted = services.access.has_permission_key(&session, &permission)?;
            to_json(PermissionCheckResponse {
                permission,
                granted,
            })
        }
        Command::Sidebar { roles, item } => {
            let session = console_session(services, roles)?;
            match item {
                Some(item) => {
                    let visible = services.access.can_access_sidebar_item(&session, &item)?;
                    to_json(SidebarItemCheckResponse { item, visible })
                }
                None => to_json(SidebarResponse {
                    items: services
                        .access
                        .sidebar_items(&session)
                        .into_iter()
                        .map(str::to_owned)
                        .collect(),
                }),
            }
        }
        Command::Validate { form, payload } => {
            let result = services.forms.validate(form, &payload);
            to_json(FormValidationResponse {
                form: form.as_str().to_owned(),
                is_valid: result.is_valid(),
                errors: result.into_errors(),
            })
        }
        Command::ValidateField {
            form,
            field,
            payload,
        } => {
            let error = services
                .forms
                .validate_field(form, &field, payload.get(&field), &payload);
            to_json(FieldValidationResponse {
                form: form.as_str().to_owned(),
                field,
                error,
            })
        }
    }
}

/// Accepts any JSON role claim; anything else is taken as a plain role string.
fn parse_role_claim(raw: &str) -> Result<RoleClaim, Infallible> {
    Ok(serde_json::from_str::<RoleClaim>(raw).unwrap_or_else(|_| RoleClaim::Single(raw.to_owned())))
}

fn parse_payload(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|error| format!("invalid JSON payload: {error}"))
}

fn console_session(services: &Services, roles: RoleClaim) -> AppResult<Session> {
    services
        .sessions
        .establish_from(AuthPayload::new("console").with_roles(roles))
}

fn to_json(response: impl Serialize) -> AppResult<Value> {
    serde_json::to_value(response)
        .map_err(|error| AppError::Internal(format!("failed to encode response: {error}")))
}
