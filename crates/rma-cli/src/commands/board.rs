//! Kanban board commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use rma_core::error::AppError;
use rma_entity::ticket::RecordType;
use rma_service::ActorContext;

/// Arguments for board commands
#[derive(Debug, Args)]
pub struct BoardArgs {
    /// Board subcommand
    #[command(subcommand)]
    pub command: BoardCommand,
}

/// Board subcommands
#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// Show the board
    Show {
        /// `repair` or `return`
        #[arg(long = "type", default_value = "repair")]
        record_type: RecordType,
        /// Filter by RMA, customer or product
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Move a card to another column
    Move {
        /// RMA code or ticket id
        rma: String,
        /// Destination column (status token, e.g. `in-repair`)
        to: String,
        /// `repair` or `return`
        #[arg(long = "type", default_value = "repair")]
        record_type: RecordType,
    },
}

/// Board card row
#[derive(Debug, Serialize, Tabled)]
struct CardRow {
    /// Column
    column: String,
    /// RMA code
    rma: String,
    /// Customer
    customer: String,
    /// Product
    product: String,
    /// Technical status
    technical: String,
    /// Assignee
    assigned: String,
}

/// Execute board commands
pub async fn execute(
    args: &BoardArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let portal = super::connect(config_path)?;

    match &args.command {
        BoardCommand::Show {
            record_type,
            search,
        } => {
            let board = portal.kanban.load(*record_type, search).await?;
            if format == OutputFormat::Json {
                output::print_json(&board);
                return Ok(());
            }

            let rows: Vec<CardRow> = board
                .columns
                .iter()
                .flat_map(|column| {
                    column.tickets.iter().map(move |t| CardRow {
                        column: column.title.to_string(),
                        rma: t.rma.clone(),
                        customer: t.customer.name.clone(),
                        product: t.product.name.clone(),
                        technical: output::or_dash(t.technical_status.as_deref()),
                        assigned: output::or_dash(t.assignee()),
                    })
                })
                .collect();
            output::print_list(&rows, format);

            let counts: Vec<String> = board
                .columns
                .iter()
                .map(|c| format!("{} {}", c.title, c.tickets.len()))
                .collect();
            println!("{}", counts.join(" | "));
        }
        BoardCommand::Move {
            rma,
            to,
            record_type,
        } => {
            let ticket = portal
                .kanban
                .move_to(*record_type, rma, to, &ActorContext::employee())
                .await?;
            if format == OutputFormat::Json {
                output::print_json(&ticket);
            } else {
                output::print_success(&format!("{} moved to {}", ticket.rma, ticket.status));
                output::print_kv("Technical status", &output::or_dash(ticket.technical_status.as_deref()));
            }
        }
    }

    Ok(())
}
