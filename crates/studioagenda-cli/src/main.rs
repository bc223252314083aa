//! studioagenda CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use studioagenda_cli::cli::{Cli, Command, ConfigAction, WindowInput};
use studioagenda_cli::commands;
use studioagenda_cli::config::AppConfig;
use studioagenda_cli::error::{CliError, CliResult};
use studioagenda_core::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let config = match cli.config {
        Some(ref path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let config = match config {
        Ok(config) => config.with_overrides(cli.timezone.as_deref(), cli.time_format),
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    if let Err(e) = init_tracing(config.tracing_config(cli.debug)).map_err(CliError::from) {
        eprintln!("warning: {}", e);
    }
    tracing::debug!(
        path = %config_path.display(),
        found = config_path.exists(),
        "loaded configuration"
    );

    match run(cli.command, &config, &config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Option<Command>, config: &AppConfig, config_path: &Path) -> CliResult<()> {
    tracing::debug!(
        timezone = config.organization.timezone.as_deref().unwrap_or("<system>"),
        time_format = %config.organization.time_format,
        "running command"
    );

    match command {
        Some(Command::Window { input, json }) => commands::window::run(&input, json, config),
        Some(Command::Resolve { time, input }) => commands::window::resolve(&time, &input, config),
        Some(Command::Now { instant }) => commands::now::run(instant, config),
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(config, config_path),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => commands::config::path(config_path),
        },
        None => commands::window::run(&WindowInput::default(), false, config),
    }
}
