//! Pure dashboard fold.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use rma_entity::ticket::Ticket;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How many categories and recent rows are shown.
pub const TOP_N: usize = 6;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    /// All tickets.
    pub total: usize,
    /// Tickets with status `pending`.
    pub pending: usize,
    /// Tickets with status `completed`.
    pub completed: usize,
    /// Mean days from creation to last update over completed tickets.
    pub avg_resolution_days: Option<f64>,
}

impl Kpis {
    /// Average resolution for display: one decimal, or `N/A`.
    pub fn avg_resolution_display(&self) -> String {
        match self.avg_resolution_days {
            Some(days) => format!("{days:.1}"),
            None => "N/A".to_string(),
        }
    }
}

/// Tickets per calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// Short month name.
    pub month: &'static str,
    /// Tickets in the month.
    pub total: usize,
    /// Completed tickets in the month.
    pub completed: usize,
}

/// Tickets per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    /// Lowercased status, `unknown` when absent.
    pub name: String,
    /// Count.
    pub value: usize,
}

/// Tickets per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Product name, `Unknown` when absent.
    pub category: String,
    /// Count.
    pub value: usize,
}

/// A row of the recent tickets table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentRow {
    /// RMA code, or the store id when the code is missing.
    pub id: String,
    /// Customer name.
    pub customer: String,
    /// Product name.
    pub product: String,
    /// Raw status.
    pub status: String,
}

/// Everything the manager dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    /// Headline numbers.
    pub stats: Kpis,
    /// Months with at least one ticket, in calendar order.
    pub monthly_trend: Vec<MonthBucket>,
    /// Count per status, in first-seen order.
    pub status_distribution: Vec<StatusCount>,
    /// The [`TOP_N`] most common products.
    pub category_stats: Vec<CategoryCount>,
    /// The [`TOP_N`] most recent tickets.
    pub recent: Vec<RecentRow>,
}

fn status_key(ticket: &Ticket) -> String {
    let status = ticket.status.trim().to_lowercase();
    if status.is_empty() {
        "unknown".to_string()
    } else {
        status
    }
}

fn or_unknown(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        "Unknown".to_string()
    } else {
        value.to_string()
    }
}

/// Count occurrences of each key, keeping first-seen order.
fn count_in_order(keys: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

fn resolution_days(ticket: &Ticket) -> Option<f64> {
    let created: DateTime<Utc> = ticket.created_at?;
    let updated: DateTime<Utc> = ticket.last_updated?;
    let millis = (updated - created).num_milliseconds();
    (millis >= 0).then(|| millis as f64 / MILLIS_PER_DAY)
}

/// Fold the ticket collection into dashboard data.
pub fn aggregate(tickets: &[Ticket]) -> DashboardData {
    let is_status = |t: &Ticket, s: &str| t.status.trim().eq_ignore_ascii_case(s);

    let durations: Vec<f64> = tickets
        .iter()
        .filter(|t| is_status(t, "completed"))
        .filter_map(resolution_days)
        .collect();
    let avg_resolution_days =
        (!durations.is_empty()).then(|| durations.iter().sum::<f64>() / durations.len() as f64);

    let stats = Kpis {
        total: tickets.len(),
        pending: tickets.iter().filter(|t| is_status(t, "pending")).count(),
        completed: tickets.iter().filter(|t| is_status(t, "completed")).count(),
        avg_resolution_days,
    };

    let mut months = [(0usize, 0usize); 12];
    for ticket in tickets {
        if let Some(ts) = ticket.best_timestamp() {
            let bucket = &mut months[ts.month0() as usize];
            bucket.0 += 1;
            if is_status(ticket, "completed") {
                bucket.1 += 1;
            }
        }
    }
    let monthly_trend = MONTHS
        .iter()
        .zip(months)
        .filter(|(_, (total, _))| *total > 0)
        .map(|(month, (total, completed))| MonthBucket {
            month: *month,
            total,
            completed,
        })
        .collect();

    let status_distribution = count_in_order(tickets.iter().map(status_key))
        .into_iter()
        .map(|(name, value)| StatusCount { name, value })
        .collect();

    let mut categories = count_in_order(tickets.iter().map(|t| or_unknown(&t.product.name)));
    // Stable: ties keep first-seen order.
    categories.sort_by(|a, b| b.1.cmp(&a.1));
    let category_stats = categories
        .into_iter()
        .take(TOP_N)
        .map(|(category, value)| CategoryCount { category, value })
        .collect();

    let mut by_recency: Vec<&Ticket> = tickets.iter().collect();
    by_recency.sort_by(|a, b| b.best_timestamp().cmp(&a.best_timestamp()));
    let recent = by_recency
        .into_iter()
        .take(TOP_N)
        .map(|t| RecentRow {
            id: if t.rma.trim().is_empty() {
                t.id.to_string()
            } else {
                t.rma.clone()
            },
            customer: or_unknown(&t.customer.name),
            product: or_unknown(&t.product.name),
            status: t.status.clone(),
        })
        .collect();

    DashboardData {
        stats,
        monthly_trend,
        status_distribution,
        category_stats,
        recent,
    }
}
