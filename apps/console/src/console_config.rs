use clap::{ArgAction, Args};
use league_application::LookupMode;
use tracing_subscriber::EnvFilter;

/// Options shared by every console command.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ConsoleConfig {
    /// How unknown permission and sidebar keys are treated (fail_closed or strict)
    #[arg(
        long,
        env = "LEAGUE_LOOKUP_MODE",
        default_value = "fail_closed",
        global = true
    )]
    pub lookup_mode: LookupMode,

    /// Pretty-print JSON output
    #[arg(
        long,
        env = "LEAGUE_PRETTY_OUTPUT",
        default_value_t = true,
        action = ArgAction::Set,
        global = true
    )]
    pub pretty_output: bool,
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use league_application::LookupMode;

    use super::ConsoleConfig;

    #[derive(Debug, Parser)]
    struct ConfigOnly {
        #[command(flatten)]
        config: ConsoleConfig,
    }

    fn parse(args: &[&str]) -> Result<ConsoleConfig, clap::Error> {
        ConfigOnly::try_parse_from(std::iter::once("league-console").chain(args.iter().copied()))
            .map(|parsed| parsed.config)
    }

    #[test]
    fn explicit_values_are_parsed() {
        let config = parse(&["--lookup-mode", "strict", "--pretty-output", "false"])
            .unwrap_or_else(|error| panic!("{error}"));
        assert_eq!(config.lookup_mode, LookupMode::Strict);
        assert!(!config.pretty_output);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse(&["--lookup-mode", "loose"]).is_err());
        assert!(parse(&["--pretty-output", "yes"]).is_err());
    }
}
