//! Web server, contact relay and CLI for the chapel site.
//!
//! The binary (`chapel`) wires [`config::SiteConfig`] into an
//! [`state::AppState`] and either serves [`routes::router`] or runs a one-shot
//! command.

pub mod cli;
pub mod commands;
pub mod config;
pub mod contact;
pub mod error;
pub mod mail;
pub mod render;
pub mod routes;
pub mod secret;
pub mod shutdown;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use chapel_core::{EventFilter, TracingConfig};
use tracing::Level;

pub use cli::Cli;
pub use config::SiteConfig;
pub use error::{WebError, WebResult};
pub use state::AppState;

use cli::{Command, ConfigAction};

/// Picks the logging setup for a command line.
pub fn tracing_config(cli: &Cli) -> TracingConfig {
    let config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        match cli.command {
            None | Some(Command::Serve { .. }) => TracingConfig::server(),
            Some(_) => TracingConfig::default().with_level(Level::WARN),
        }
    };
    match cli.log_format {
        Some(format) => config.with_format(format),
        None => config,
    }
}

/// Loads the configuration named on the command line (or the default file)
/// and applies environment overrides.
pub fn load_config(cli: &Cli) -> WebResult<(SiteConfig, PathBuf)> {
    let (mut config, path) = match cli.config {
        Some(ref path) => (SiteConfig::load_from(path)?, path.clone()),
        None => (SiteConfig::load()?, SiteConfig::default_path()),
    };
    config.apply_env();
    Ok((config, path))
}

/// Runs the command selected by `cli`.
pub async fn run(cli: Cli) -> WebResult<()> {
    let (mut config, path) = load_config(&cli)?;

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&path),
        },
        Some(Command::Events {
            search,
            ministry,
            json,
        }) => {
            let state = Arc::new(AppState::from_config(&config)?);
            commands::events::run(state, EventFilter::new(search, ministry), json).await
        }
        Some(Command::Serve { bind }) => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            serve(&config).await
        }
        None => serve(&config).await,
    }
}

async fn serve(config: &SiteConfig) -> WebResult<()> {
    config.validate()?;
    let addr = config.bind_addr()?;
    let state = Arc::new(AppState::from_config(config)?);
    commands::serve::run(state, addr).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chapel_core::TracingOutputFormat;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn serve_logs_at_info() {
        let cli = Cli::try_parse_from(["chapel"]).unwrap();
        let config = tracing_config(&cli);
        assert_eq!(config.default_level, Level::INFO);
        assert!(config.log_requests);
    }

    #[test]
    fn one_shot_commands_log_warnings_only() {
        let cli = Cli::try_parse_from(["chapel", "events"]).unwrap();
        assert_eq!(tracing_config(&cli).default_level, Level::WARN);
    }

    #[test]
    fn debug_and_format_flags() {
        let cli = Cli::try_parse_from(["chapel", "--debug", "--log-format", "json", "events"])
            .unwrap();
        let config = tracing_config(&cli);
        assert_eq!(config.default_level, Level::DEBUG);
        assert_eq!(config.output_format, TracingOutputFormat::Json);
    }

    #[test]
    fn explicit_config_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[site]\nname = \"Grace Chapel\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["chapel", "--config", &path, "config", "path"]).unwrap();
        let (config, loaded_from) = load_config(&cli).unwrap();
        assert_eq!(config.site.name, "Grace Chapel");
        assert_eq!(loaded_from, file.path());
    }

    #[test]
    fn missing_explicit_config_fails() {
        let cli =
            Cli::try_parse_from(["chapel", "--config", "/nonexistent/chapel.toml", "config", "path"])
                .unwrap();
        assert!(load_config(&cli).is_err());
    }
}
