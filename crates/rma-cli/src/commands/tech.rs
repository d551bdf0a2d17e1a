//! Technician commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use rma_core::error::AppError;
use rma_entity::ticket::TechnicalStatus;
use rma_service::ActorContext;
use rma_service::status::StatusView;
use rma_service::ticket::TechnicianUpdate;

/// Arguments for technician commands
#[derive(Debug, Args)]
pub struct TechArgs {
    /// Technician subcommand
    #[command(subcommand)]
    pub command: TechCommand,
}

/// Technician subcommands
#[derive(Debug, Subcommand)]
pub enum TechCommand {
    /// List tickets with a technical status
    Queue {
        /// Only this technical status (e.g. `"In Repair"`)
        #[arg(long)]
        status: Option<TechnicalStatus>,
        /// Filter by RMA, customer or product
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Update technical status and notes
    Update {
        /// RMA code
        rma: String,
        /// New technical status
        #[arg(long)]
        status: Option<TechnicalStatus>,
        /// Replace the technician notes
        #[arg(long)]
        notes: Option<String>,
        /// Technician name, for the log
        #[arg(long)]
        by: Option<String>,
    },
}

/// Queue row
#[derive(Debug, Serialize, Tabled)]
struct QueueRow {
    /// RMA code
    rma: String,
    /// Product
    product: String,
    /// Customer status
    status: String,
    /// Technical status
    technical: String,
    /// Notes
    notes: String,
}

/// Execute technician commands
pub async fn execute(
    args: &TechArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let portal = super::connect(config_path)?;

    match &args.command {
        TechCommand::Queue { status, search } => {
            let tickets = portal.tickets.technician_queue(*status, search).await?;
            let rows: Vec<QueueRow> = tickets
                .iter()
                .map(|t| {
                    let view = StatusView::of(t);
                    QueueRow {
                        rma: t.rma.clone(),
                        product: t.product.name.clone(),
                        status: view.status_label,
                        technical: format!(
                            "{} {}",
                            output::theme_marker(view.technical_theme),
                            output::or_dash(t.technical_status.as_deref())
                        ),
                        notes: output::or_dash(t.technical_notes.as_deref()),
                    }
                })
                .collect();
            output::print_list(&rows, format);
        }
        TechCommand::Update {
            rma,
            status,
            notes,
            by,
        } => {
            let ticket = portal.tickets.track(rma).await?.ticket;
            let update = TechnicianUpdate {
                technical_status: *status,
                technical_notes: notes.clone(),
            };
            let actor = match by {
                Some(name) => ActorContext::technician().named(name.clone()),
                None => ActorContext::technician(),
            };

            let updated = portal
                .tickets
                .technician_update(&ticket.id, &update, &actor)
                .await?;
            if format == OutputFormat::Json {
                output::print_json(&updated);
            } else {
                output::print_success(&format!("{} updated", updated.rma));
                output::print_kv(
                    "Technical status",
                    &output::or_dash(updated.technical_status.as_deref()),
                );
                output::print_kv("Notes", &output::or_dash(updated.technical_notes.as_deref()));
            }
        }
    }

    Ok(())
}
