//! Manager dashboard: KPIs, trends and distributions recomputed from the
//! full ticket collection on every load.

pub mod aggregate;
pub mod service;

pub use aggregate::{
    CategoryCount, DashboardData, Kpis, MonthBucket, RecentRow, StatusCount, aggregate,
};
pub use service::DashboardService;
