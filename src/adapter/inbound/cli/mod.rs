//! CLI module graph and dispatch.

pub mod analyze;
pub mod business;
pub mod command;
pub mod config;
pub mod grid;
pub mod history;
pub mod output;
pub mod paths;
pub mod render;

use std::path::{Path, PathBuf};

use crate::domain::id::TenantId;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use command::{BusinessCommand, Cli, Commands, ConfigCommand, GridCommand};
use output::OutputConfig;

/// Execute a parsed command line.
///
/// # Errors
///
/// Returns the first error a handler hits; the caller reports it.
pub async fn run(cli: Cli) -> Result<()> {
    let output_config = OutputConfig::new(cli.json, cli.quiet, cli.verbose);
    output::configure(output_config);
    let path = cli.config.as_deref();

    match cli.command {
        Commands::Config(ConfigCommand::Init { force }) => {
            config::execute_init(&resolve_config_path(path), force)
        }
        Commands::Config(ConfigCommand::Validate) => {
            config::execute_validate(&resolve_config_path(path))
        }
        Commands::Config(ConfigCommand::Show) => config::execute_show(&prepare(path, output_config)?),
        Commands::Grid(GridCommand::Preview(args)) => {
            grid::execute_preview(&prepare(path, output_config)?, &args)
        }
        Commands::Business(BusinessCommand::Add(args)) => {
            business::execute_add(&prepare(path, output_config)?, args).await
        }
        Commands::Business(BusinessCommand::List(args)) => {
            business::execute_list(&prepare(path, output_config)?, args).await
        }
        Commands::Business(BusinessCommand::Remove(args)) => {
            business::execute_remove(&prepare(path, output_config)?, args).await
        }
        Commands::Analyze(args) => analyze::execute(&prepare(path, output_config)?, args).await,
        Commands::History(args) => history::execute(&prepare(path, output_config)?, args).await,
    }
}

/// Load configuration and install the log subscriber.
fn prepare(path: Option<&Path>, output_config: OutputConfig) -> Result<Config> {
    let config = load_config(path)?;
    init_logging(&config, output_config);
    Ok(config)
}

/// The explicit config path, or the default location.
fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(paths::default_config, Path::to_path_buf)
}

/// Load the explicit config file, the default file if it exists, or
/// built-in defaults.
///
/// # Errors
///
/// Fails when an explicit or existing default file cannot be loaded.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }
    let default = paths::default_config();
    if default.exists() {
        Config::load(default)
    } else {
        Ok(Config::from_env())
    }
}

fn init_logging(config: &Config, output_config: OutputConfig) {
    let logging = match output_config.log_level_override() {
        Some(level) => config.logging.clone().with_level(level),
        None => config.logging.clone(),
    };
    logging.init();
}

pub(crate) fn tenant(value: Option<String>) -> Option<TenantId> {
    value.map(TenantId::new)
}
