//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a serde default so that an empty
//! configuration is valid.

pub mod eligibility;
pub mod logging;
pub mod polling;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::eligibility::EligibilityConfig;
pub use self::logging::LoggingConfig;
pub use self::polling::PollingConfig;
pub use self::store::StoreConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ticket and notification store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Refresh polling settings.
    #[serde(default)]
    pub polling: PollingConfig,
    /// Notification engine settings.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Warranty and return window settings.
    #[serde(default)]
    pub eligibility: EligibilityConfig,
    /// Ticket submission settings.
    #[serde(default)]
    pub submission: SubmissionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Notification engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Role that receives lifecycle notifications when the caller does not say.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Maximum characters of a technical note quoted in the notification message.
    #[serde(default = "default_note_preview")]
    pub note_preview_chars: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            note_preview_chars: default_note_preview(),
        }
    }
}

/// Ticket submission configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// How many RMA codes to try before giving up on a uniqueness conflict.
    #[serde(default = "default_rma_attempts")]
    pub rma_max_attempts: u32,
    /// Base path of the public tracking page.
    #[serde(default = "default_tracking_path")]
    pub tracking_path: String,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            rma_max_attempts: default_rma_attempts(),
            tracking_path: default_tracking_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `RMA__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("RMA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from a single explicit file plus the environment.
    pub fn load_file(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("RMA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

fn default_role() -> String {
    "employee".to_string()
}

fn default_note_preview() -> usize {
    50
}

fn default_rma_attempts() -> u32 {
    3
}

fn default_tracking_path() -> String {
    "/track".to_string()
}
