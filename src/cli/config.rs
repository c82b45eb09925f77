use std::io::{self, Write};

use clap::{Args, Subcommand};
use petshop::{
    config::{AppConfig, ConfigError},
    observability::LEVEL_FILES,
};

use super::write_failed;

#[derive(Debug, Args)]
pub(crate) struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Report configuration gaps; fails in production when any exist
    Check,
}

pub(crate) fn run(command: &ConfigCommand, config: &AppConfig) -> Result<(), String> {
    match command.command {
        ConfigSubcommand::Check => check(config),
    }
}

fn check(config: &AppConfig) -> Result<(), String> {
    let mut out = io::stdout().lock();

    writeln!(out, "environment: {}", config.environment).map_err(write_failed)?;
    writeln!(out, "server: {}", config.server.socket_addr()).map_err(write_failed)?;
    writeln!(out, "api: {}", config.api.api_base_url).map_err(write_failed)?;

    if config.logging.log_files {
        for (_, stem) in LEVEL_FILES {
            let path = config.logging.log_dir.join(format!("{stem}.log"));

            writeln!(out, "log file: {}", path.display()).map_err(write_failed)?;
        }
    }

    for issue in config.issues() {
        writeln!(out, "gap: {issue}").map_err(write_failed)?;
    }

    match config.validate() {
        Ok(()) => writeln!(out, "configuration ok").map_err(write_failed),
        Err(ConfigError::Insecure(issues)) => Err(format!(
            "configuration not fit for production: {} gap(s)",
            issues.len()
        )),
        Err(error) => Err(error.to_string()),
    }
}
