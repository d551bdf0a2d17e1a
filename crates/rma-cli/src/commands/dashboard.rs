//! Manager dashboard command.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use rma_core::error::AppError;

/// Monthly trend row
#[derive(Debug, Serialize, Tabled)]
struct MonthRow {
    /// Month
    month: String,
    /// Tickets
    total: usize,
    /// Completed
    completed: usize,
}

/// Count row
#[derive(Debug, Serialize, Tabled)]
struct CountRow {
    /// Name
    name: String,
    /// Tickets
    tickets: usize,
}

/// Recent ticket row
#[derive(Debug, Serialize, Tabled)]
struct RecentRow {
    /// RMA code
    id: String,
    /// Customer
    customer: String,
    /// Product
    product: String,
    /// Status
    status: String,
}

/// Execute the dashboard command
pub async fn execute(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let portal = super::connect(config_path)?;
    let data = portal.dashboard.load().await?;

    if format == OutputFormat::Json {
        output::print_json(&data);
        return Ok(());
    }

    println!("Overview");
    output::print_kv("Total tickets", &data.stats.total.to_string());
    output::print_kv("Pending", &data.stats.pending.to_string());
    output::print_kv("Completed", &data.stats.completed.to_string());
    output::print_kv("Avg resolution (days)", &data.stats.avg_resolution_display());

    println!("\nMonthly trend");
    let months: Vec<MonthRow> = data
        .monthly_trend
        .iter()
        .map(|m| MonthRow {
            month: m.month.to_string(),
            total: m.total,
            completed: m.completed,
        })
        .collect();
    output::print_list(&months, format);

    println!("\nBy status");
    let statuses: Vec<CountRow> = data
        .status_distribution
        .iter()
        .map(|s| CountRow {
            name: s.name.clone(),
            tickets: s.value,
        })
        .collect();
    output::print_list(&statuses, format);

    println!("\nTop products");
    let products: Vec<CountRow> = data
        .category_stats
        .iter()
        .map(|c| CountRow {
            name: c.category.clone(),
            tickets: c.value,
        })
        .collect();
    output::print_list(&products, format);

    println!("\nRecent tickets");
    let recent: Vec<RecentRow> = data
        .recent
        .iter()
        .map(|r| RecentRow {
            id: r.id.clone(),
            customer: r.customer.clone(),
            product: r.product.clone(),
            status: r.status.clone(),
        })
        .collect();
    output::print_list(&recent, format);

    Ok(())
}
