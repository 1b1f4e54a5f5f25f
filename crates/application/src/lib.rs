//! Application services for the league dashboard.

#![forbid(unsafe_code)]

mod access_service;
mod form_catalog;
mod form_validation_service;
mod session_service;

pub use access_service::{AccessService, LookupMode};
pub use form_catalog::{FormCatalog, LeagueForm};
pub use form_validation_service::FormValidationService;
pub use session_service::{AuthPayload, SessionService};
