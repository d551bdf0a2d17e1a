//! Employee ticket administration commands.

use clap::{Args, Subcommand};

use crate::output;
use rma_core::error::AppError;
use rma_service::ActorContext;
use rma_service::ticket::EmployeeEdit;

/// Arguments for ticket commands
#[derive(Debug, Args)]
pub struct TicketArgs {
    /// Ticket subcommand
    #[command(subcommand)]
    pub command: TicketCommand,
}

/// Ticket subcommands
#[derive(Debug, Subcommand)]
pub enum TicketCommand {
    /// Assign a technician or override the warranty flag
    Edit {
        /// RMA code
        rma: String,
        /// Technician name, or `Unassigned`
        #[arg(long)]
        assign: Option<String>,
        /// Warranty flag
        #[arg(long)]
        warranty: Option<bool>,
    },
    /// Delete a ticket
    Delete {
        /// RMA code
        rma: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Execute ticket commands
pub async fn execute(args: &TicketArgs, config_path: &str) -> Result<(), AppError> {
    let portal = super::connect(config_path)?;
    let actor = ActorContext::employee();

    match &args.command {
        TicketCommand::Edit {
            rma,
            assign,
            warranty,
        } => {
            let ticket = portal.tickets.track(rma).await?.ticket;
            let edit = EmployeeEdit {
                assigned_to: assign.clone(),
                warranty: *warranty,
            };
            let updated = portal.tickets.employee_edit(&ticket.id, &edit, &actor).await?;

            output::print_success(&format!("{} updated", updated.rma));
            output::print_kv("Assigned to", updated.assignee().unwrap_or("Unassigned"));
            output::print_kv("Warranty", if updated.warranty { "yes" } else { "no" });
        }
        TicketCommand::Delete { rma, force } => {
            let ticket = portal.tickets.track(rma).await?.ticket;
            if !super::confirm(&format!("Delete ticket {}?", ticket.rma), *force)? {
                return Ok(());
            }
            portal.tickets.delete(&ticket.id, &actor).await?;
            output::print_success(&format!("Ticket {} deleted", ticket.rma));
        }
    }

    Ok(())
}
