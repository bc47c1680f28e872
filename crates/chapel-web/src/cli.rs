//! Command-line interface definition.

use std::path::PathBuf;

use chapel_core::TracingOutputFormat;
use clap::{Parser, Subcommand};

/// chapel - church website server
#[derive(Debug, Parser)]
#[command(name = "chapel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CHAPEL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log format: pretty, compact or json
    #[arg(long, global = true)]
    pub log_format: Option<TracingOutputFormat>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web server (the default)
    Serve {
        /// Address to listen on, overriding the configuration
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print events from the CMS, grouped by month
    Events {
        /// Fuzzy search on event titles
        #[arg(long, short, default_value = "")]
        search: String,

        /// Fuzzy filter on event tags
        #[arg(long, short, default_value = "")]
        ministry: String,

        /// Print the groups as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["chapel"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn events_flags() {
        let cli = Cli::try_parse_from(["chapel", "events", "-s", "easter", "--ministry", "youth"])
            .unwrap();
        match cli.command {
            Some(Command::Events {
                search,
                ministry,
                json,
            }) => {
                assert_eq!(search, "easter");
                assert_eq!(ministry, "youth");
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "chapel",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--debug",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.log_format, Some(TracingOutputFormat::Json));
        assert!(matches!(
            cli.command,
            Some(Command::Serve { bind: Some(ref b) }) if b == "0.0.0.0:8080"
        ));
    }

    #[test]
    fn config_actions() {
        let cli = Cli::try_parse_from(["chapel", "config", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Validate
            })
        ));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(Cli::try_parse_from(["chapel", "--log-format", "xml"]).is_err());
    }
}
