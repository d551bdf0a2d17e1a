//! Tracking commands for customers.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use rma_core::error::AppError;
use rma_service::ticket::TrackedTicket;

/// Arguments for the track command
#[derive(Debug, Args)]
pub struct TrackArgs {
    /// RMA code of the request
    #[arg(required_unless_present = "email", conflicts_with = "email")]
    pub rma: Option<String>,
    /// List every request filed with this email instead
    #[arg(long)]
    pub email: Option<String>,
}

/// One of a customer's requests
#[derive(Debug, Serialize, Tabled)]
struct TrackedRow {
    /// RMA code
    rma: String,
    /// Product
    product: String,
    /// Status badge
    status: String,
    /// Progress
    progress: String,
    /// Last update
    updated: String,
}

impl From<&TrackedTicket> for TrackedRow {
    fn from(tracked: &TrackedTicket) -> Self {
        Self {
            rma: tracked.ticket.rma.clone(),
            product: tracked.ticket.product.name.clone(),
            status: format!(
                "{} {}",
                output::theme_marker(tracked.view.theme),
                tracked.view.badge
            ),
            progress: output::progress(&tracked.view),
            updated: format_time(tracked),
        }
    }
}

/// Execute the track command
pub async fn execute(
    args: &TrackArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let portal = super::connect(config_path)?;

    if let Some(email) = &args.email {
        let tickets = portal.tickets.my_tickets(email).await?;
        match format {
            OutputFormat::Json => output::print_json(&tickets),
            OutputFormat::Table => {
                let rows: Vec<TrackedRow> = tickets.iter().map(TrackedRow::from).collect();
                output::print_list(&rows, format);
            }
        }
        return Ok(());
    }

    let rma = args.rma.as_deref().unwrap_or_default();
    let tracked = portal.tickets.track(rma).await?;
    if format == OutputFormat::Json {
        output::print_json(&tracked);
        return Ok(());
    }

    let ticket = &tracked.ticket;
    let view = &tracked.view;
    println!("Request {}", ticket.rma);
    output::print_kv("Customer", &output::or_dash(Some(ticket.customer.name.as_str())));
    output::print_kv("Product", &output::or_dash(Some(ticket.product.name.as_str())));
    output::print_kv("Type", ticket.record_type.as_str());
    output::print_kv("Progress", &output::progress(view));
    output::print_kv(
        "Status",
        &format!("{} {}", output::theme_marker(view.theme), view.status_label),
    );
    if let Some(technical) = &view.technical_label {
        output::print_kv(
            "Technical status",
            &format!("{} {}", output::theme_marker(view.technical_theme), technical),
        );
    }
    output::print_kv("Assigned to", &output::or_dash(ticket.assignee()));
    output::print_kv("Technician notes", &output::or_dash(ticket.technical_notes.as_deref()));
    output::print_kv("Purchase date", &output::or_dash(ticket.purchase_date.as_deref()));
    output::print_kv("Warranty", if ticket.warranty { "yes" } else { "no" });
    output::print_kv("Last update", &format_time(&tracked));

    Ok(())
}

fn format_time(tracked: &TrackedTicket) -> String {
    tracked
        .ticket
        .updated_timestamp()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
