//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use rma_service::status::{StatusView, Theme};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(items),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    println!("{}", json);
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}

/// Marker shown before a badge, by theme.
pub fn theme_marker(theme: Theme) -> &'static str {
    match theme {
        Theme::Success => "●",
        Theme::Danger => "✗",
        Theme::Info => "◐",
        Theme::Warning => "○",
        Theme::Neutral => "·",
    }
}

/// Four-step progress bar, e.g. `[■■□□] Approved`.
pub fn progress(view: &StatusView) -> String {
    let steps = rma_service::status::STAGES.len();
    let filled = view.stage_index + 1;
    format!(
        "[{}{}] {}",
        "■".repeat(filled),
        "□".repeat(steps.saturating_sub(filled)),
        view.stage_label
    )
}

/// Optional text, or a dash.
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rma_entity::ticket::RecordType;

    #[test]
    fn test_progress_fills_up_to_current_stage() {
        let view = StatusView::derive(RecordType::Repair, Some("in-repair"), None);
        assert_eq!(progress(&view), "[■■■□] In Repair");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(Some(" Nikos ")), "Nikos");
    }
}
