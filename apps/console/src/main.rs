//! League dashboard console: answers access and form validation questions.

#![forbid(unsafe_code)]

mod commands;
mod console_config;
mod dto;

use clap::Parser;
use league_application::{AccessService, FormValidationService, SessionService};
use league_core::AppError;
use tracing::{error, info};

use crate::commands::{Cli, Services, execute};
use crate::console_config::init_tracing;

fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    if let Err(error) = run(cli) {
        error!(error = %error, "league-console failed");
        return Err(error);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let Cli { config, command } = cli;

    let services = Services {
        sessions: SessionService::new(),
        access: AccessService::new(config.lookup_mode),
        forms: FormValidationService::with_default_catalog()?,
    };

    info!(
        lookup_mode = config.lookup_mode.as_str(),
        "league-console started"
    );

    let output = execute(command, &services)?;
    let rendered = if config.pretty_output {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(|error| AppError::Internal(format!("failed to render output: {error}")))?;

    println!("{rendered}");
    Ok(())
}
