//! Configuration management CLI commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the configuration file location
    Path,
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default step catalog
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Directory for session files
    #[arg(long, value_name = "DIR")]
    session_dir: Option<PathBuf>,

    /// Enable or disable autosave
    #[arg(long, value_name = "BOOL")]
    autosave: Option<bool>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Machine type/model offered in the identifier form (repeatable)
    #[arg(long = "mtm", value_name = "MTM")]
    mtm_options: Vec<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    paths: PathsOutput,
    autosave: AutosaveOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    catalog: String,
    session_dir: String,
}

#[derive(Serialize, Debug)]
struct AutosaveOutput {
    enabled: bool,
    file: String,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    mtm_options: Vec<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("Failed to locate config file: {e}")))?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        if self.json {
            print_json(&to_output(&config))
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.catalog.is_none()
            && self.session_dir.is_none()
            && self.autosave.is_none()
            && self.theme.is_none()
            && self.mtm_options.is_empty()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --catalog, --session-dir, --autosave, --theme or --mtm",
            ));
        }

        let mut config = load_config()?;

        if let Some(path) = &self.catalog {
            if !path.exists() {
                return Err(CliError::validation(format!(
                    "Catalog file does not exist: {}",
                    path.display()
                )));
            }
            config.paths.catalog = Some(path.clone());
        }

        if let Some(path) = &self.session_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create session directory {}: {e}",
                    path.display()
                ))
            })?;
            config.paths.session_dir = Some(path.clone());
        }

        if let Some(enabled) = self.autosave {
            config.autosave.enabled = enabled;
        }

        if let Some(theme_str) = &self.theme {
            config.ui.theme_mode = parse_theme_mode(theme_str)?;
        }

        if !self.mtm_options.is_empty() {
            config.ui.mtm_options.clone_from(&self.mtm_options);
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn parse_theme_mode(value: &str) -> CliResult<ThemeMode> {
    match value.to_lowercase().as_str() {
        "auto" => Ok(ThemeMode::Auto),
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        _ => Err(CliError::validation(
            "Invalid theme mode. Must be 'auto', 'light', or 'dark'",
        )),
    }
}

fn to_output(config: &Config) -> ConfigOutput {
    ConfigOutput {
        paths: PathsOutput {
            catalog: config.resolve_catalog(None).to_string_lossy().to_string(),
            session_dir: config.session_dir().to_string_lossy().to_string(),
        },
        autosave: AutosaveOutput {
            enabled: config.autosave.enabled,
            file: config.autosave_path().to_string_lossy().to_string(),
        },
        ui: UiOutput {
            theme: format!("{:?}", config.ui.theme_mode).to_lowercase(),
            mtm_options: config.ui.mtm_options.clone(),
        },
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Rack Checklist Configuration");
    println!("============================");
    println!();

    println!("Paths:");
    println!("  Catalog:           {}", config.resolve_catalog(None).display());
    println!("  Session Directory: {}", config.session_dir().display());
    println!();

    println!("Autosave:");
    println!(
        "  Enabled: {}",
        if config.autosave.enabled { "yes" } else { "no" }
    );
    println!("  File:    {}", config.autosave_path().display());
    println!();

    println!("UI:");
    println!(
        "  Theme Mode:  {}",
        format!("{:?}", config.ui.theme_mode).to_lowercase()
    );
    if config.ui.mtm_options.is_empty() {
        println!("  MTM Options: (none)");
    } else {
        println!("  MTM Options: {}", config.ui.mtm_options.join(", "));
    }
    println!();
}
