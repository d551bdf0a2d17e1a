//! Notification feed commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use rma_core::error::AppError;
use rma_core::types::NotificationId;
use rma_entity::notification::{Notification, Role};

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// List notifications, newest first
    List {
        /// Only unread ones
        #[arg(long)]
        unread: bool,
        /// Only unread ones addressed to this role
        #[arg(long)]
        role: Option<Role>,
    },
    /// Mark one notification as read
    Read {
        /// Notification ID
        id: String,
    },
    /// Mark every unread notification as read
    ReadAll {
        /// Only this role's feed
        #[arg(long)]
        role: Option<Role>,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Delete a notification
    Delete {
        /// Notification ID
        id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Notification display row
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// RMA code
    rma: String,
    /// Message
    message: String,
    /// Role
    role: String,
    /// Read
    read: String,
    /// Created
    created: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            rma: n.rma.clone(),
            message: n.message.clone(),
            role: n.for_role.to_string(),
            read: if n.read { "✓" } else { "✗" }.to_string(),
            created: n.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute notification commands
pub async fn execute(
    args: &NotificationArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let portal = super::connect(config_path)?;
    let engine = &portal.notifications;

    match &args.command {
        NotificationCommand::List { unread, role } => {
            let notifications = match (role, unread) {
                (Some(role), _) => engine.unread_for(*role).await?,
                (None, true) => engine.unread().await?,
                (None, false) => engine.all().await?,
            };
            let rows: Vec<NotificationRow> =
                notifications.iter().map(NotificationRow::from).collect();
            output::print_list(&rows, format);
        }
        NotificationCommand::Read { id } => {
            let notification = engine.mark_read(&NotificationId::from(id.as_str())).await?;
            output::print_success(&format!("Notification {} marked as read", notification.id));
        }
        NotificationCommand::ReadAll { role, force } => {
            let prompt = match role {
                Some(role) => format!("Mark all unread {} notifications as read?", role),
                None => "Mark ALL unread notifications as read?".to_string(),
            };
            if !super::confirm(&prompt, *force)? {
                return Ok(());
            }

            match engine.mark_all_read(*role).await {
                Ok(count) => output::print_success(&format!("Marked {} notifications as read", count)),
                Err(e) if !e.fields.is_empty() => {
                    output::print_warning(&e.message);
                    for (id, reason) in &e.fields {
                        output::print_kv(id, reason);
                    }
                    output::print_warning("Run the command again to retry the remaining ones.");
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }
        NotificationCommand::Delete { id, force } => {
            if !super::confirm(&format!("Delete notification {}?", id), *force)? {
                return Ok(());
            }
            engine.delete(&NotificationId::from(id.as_str())).await?;
            output::print_success(&format!("Notification {} deleted", id));
        }
    }

    Ok(())
}
