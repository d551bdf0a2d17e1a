//! CLI command definitions and dispatch.

pub mod board;
pub mod config;
pub mod dashboard;
pub mod notifications;
pub mod submit;
pub mod tech;
pub mod ticket;
pub mod track;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use rma_core::config::AppConfig;
use rma_core::error::AppError;
use rma_core::traits::{Clock, SystemClock};
use rma_store::{
    HttpNotificationRepository, HttpTicketRepository, NotificationStore, StoreClient, TicketStore,
};
use rma_service::{
    DashboardService, EligibilityEvaluator, KanbanController, LogMailer, NotificationEngine,
    RmaCodeGenerator, SimulatedUploader, TicketService,
};

/// RMA portal: repair and return request lifecycle
#[derive(Debug, Parser)]
#[command(name = "rma", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// File a new repair or return request
    Submit(submit::SubmitArgs),
    /// Look up a request by RMA code, or list a customer's requests
    Track(track::TrackArgs),
    /// Kanban board: show columns and move cards
    Board(board::BoardArgs),
    /// Technician queue and updates
    Tech(tech::TechArgs),
    /// Employee edits and deletion
    Ticket(ticket::TicketArgs),
    /// Notification feeds
    Notifications(notifications::NotificationArgs),
    /// Manager dashboard
    Dashboard,
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Submit(args) => submit::execute(args, &self.config, self.format).await,
            Commands::Track(args) => track::execute(args, &self.config, self.format).await,
            Commands::Board(args) => board::execute(args, &self.config, self.format).await,
            Commands::Tech(args) => tech::execute(args, &self.config, self.format).await,
            Commands::Ticket(args) => ticket::execute(args, &self.config).await,
            Commands::Notifications(args) => {
                notifications::execute(args, &self.config, self.format).await
            }
            Commands::Dashboard => dashboard::execute(&self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Services wired against the REST store.
#[derive(Debug, Clone)]
pub struct Portal {
    /// Submission, tracking and edits.
    pub tickets: TicketService,
    /// Kanban moves.
    pub kanban: KanbanController,
    /// Notification feeds.
    pub notifications: NotificationEngine,
    /// Dashboard aggregation.
    pub dashboard: DashboardService,
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_file(config_path)
        .map_err(|e| AppError::configuration(format!("Failed to load config: {}", e.message)))
}

/// Helper: load configuration and wire the services
pub fn connect(config_path: &str) -> Result<Portal, AppError> {
    let config = load_config(config_path)?;

    let client = StoreClient::connect(&config.store)?;
    let ticket_store: Arc<dyn TicketStore> = Arc::new(HttpTicketRepository::new(client.clone()));
    let notification_store: Arc<dyn NotificationStore> =
        Arc::new(HttpNotificationRepository::new(client));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let notifications =
        NotificationEngine::new(notification_store, clock.clone(), &config.notifications);
    let tickets = TicketService::new(
        ticket_store.clone(),
        notifications.clone(),
        EligibilityEvaluator::new(config.eligibility, clock.clone()),
        RmaCodeGenerator::default(),
        Arc::new(SimulatedUploader::default()),
        Arc::new(LogMailer),
        clock.clone(),
        config.submission.clone(),
    );
    let kanban = KanbanController::new(ticket_store.clone(), notifications.clone(), clock);
    let dashboard = DashboardService::new(ticket_store);

    Ok(Portal {
        tickets,
        kanban,
        notifications,
        dashboard,
    })
}

/// Helper: ask before a destructive action unless `force` is set.
pub fn confirm(prompt: &str, force: bool) -> Result<bool, AppError> {
    if force {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
    if !confirmed {
        println!("Cancelled.");
    }
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rma_entity::notification::Role;
    use rma_entity::ticket::{RecordType, TechnicalStatus};

    #[test]
    fn test_board_move_parses_record_type() {
        let cli = Cli::try_parse_from([
            "rma", "board", "move", "RMA-2025-ABCD1234", "in-repair", "--type", "Return",
        ])
        .expect("parse");
        match cli.command {
            Commands::Board(board::BoardArgs {
                command: board::BoardCommand::Move { record_type, to, .. },
            }) => {
                assert_eq!(record_type, RecordType::Return);
                assert_eq!(to, "in-repair");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_tech_update_accepts_display_form() {
        let cli = Cli::try_parse_from([
            "rma", "-f", "json", "tech", "update", "RMA-2025-ABCD1234", "--status", "in repair",
        ])
        .expect("parse");
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Tech(tech::TechArgs {
                command: tech::TechCommand::Update { status, notes, .. },
            }) => {
                assert_eq!(status, Some(TechnicalStatus::InRepair));
                assert_eq!(notes, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(Cli::try_parse_from(["rma", "notifications", "read-all", "--role", "admin"]).is_err());
        let cli = Cli::try_parse_from(["rma", "notifications", "read-all", "--role", "technician"])
            .expect("parse");
        match cli.command {
            Commands::Notifications(notifications::NotificationArgs {
                command: notifications::NotificationCommand::ReadAll { role, force },
            }) => {
                assert_eq!(role, Some(Role::Technician));
                assert!(!force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_track_needs_rma_or_email() {
        assert!(Cli::try_parse_from(["rma", "track"]).is_err());
        assert!(Cli::try_parse_from(["rma", "track", "RMA-1", "--email", "a@b.gr"]).is_err());
        assert!(Cli::try_parse_from(["rma", "track", "--email", "a@b.gr"]).is_ok());
    }
}
