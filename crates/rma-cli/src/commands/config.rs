//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use rma_core::error::AppError;
use rma_entity::notification::Role;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
    /// Write the default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => {
                    output::print_kv("Store", &config.store.base_url);
                    output::print_kv(
                        "Polling interval",
                        &format!("{}s", config.polling.interval().as_secs()),
                    );
                    output::print_kv("Notification role", &config.notifications.default_role);
                    output::print_kv(
                        "Warranty",
                        &format!("{} years", config.eligibility.warranty_years),
                    );
                    output::print_kv(
                        "Return window",
                        &format!("{} days", config.eligibility.return_window_days),
                    );
                    output::print_kv(
                        "RMA attempts",
                        &config.submission.rma_max_attempts.to_string(),
                    );
                    output::print_kv(
                        "Logging",
                        &format!("{} ({})", config.logging.level, config.logging.format),
                    );
                }
            }
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                println!("  Store: {}", config.store.base_url);
                if config.polling.interval().as_secs() != config.polling.interval_seconds {
                    output::print_warning(&format!(
                        "Polling interval {}s is clamped to {}s",
                        config.polling.interval_seconds,
                        config.polling.interval().as_secs()
                    ));
                }
                if config.notifications.default_role.parse::<Role>().is_err() {
                    output::print_warning(&format!(
                        "Unknown notification role '{}', employee will be used",
                        config.notifications.default_role
                    ));
                }
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e.message));
                return Err(e);
            }
        },
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to create dir: {}", e)))?;
            }

            tokio::fs::write(out_path, default_config)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write config: {}", e)))?;

            output::print_success(&format!("Default config written to '{}'", out_path));
        }
    }

    Ok(())
}
