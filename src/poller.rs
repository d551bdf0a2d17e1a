//! Polling refresh loop.
//!
//! Polling is the only way clients converge: every interval the poller
//! re-reads the unread notification feed and the dashboard figures and
//! reports what changed since the previous refresh.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinSet;
use tokio::time::{self, MissedTickBehavior};

use rma_core::error::AppError;
use rma_core::types::NotificationId;
use rma_entity::notification::Notification;
use rma_service::dashboard::Kpis;
use rma_service::{DashboardService, NotificationEngine, ViewGuard};

/// What one refresh found.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PollReport {
    /// Unread notifications not seen in an earlier refresh, newest first.
    pub new_notifications: Vec<Notification>,
    /// Unread count per role.
    pub unread_by_role: BTreeMap<String, usize>,
    /// Dashboard figures, when they changed.
    pub kpis: Option<Kpis>,
}

/// What earlier accepted refreshes have already reported.
#[derive(Debug, Default)]
struct PollState {
    seen: HashSet<NotificationId>,
    last_kpis: Option<Kpis>,
}

/// Periodically refreshes the notification feed and dashboard figures.
///
/// Each tick starts its own refresh, so a slow one can still be in flight
/// when the next begins. Only the latest refresh is applied; an older one
/// that lands afterwards, or any that lands after [`Poller::close`], is
/// discarded.
#[derive(Debug)]
pub struct Poller {
    notifications: NotificationEngine,
    dashboard: DashboardService,
    interval: Duration,
    guard: ViewGuard,
    state: Mutex<PollState>,
}

impl Poller {
    /// Creates a poller refreshing every `interval`.
    pub fn new(
        notifications: NotificationEngine,
        dashboard: DashboardService,
        interval: Duration,
    ) -> Self {
        Self {
            notifications,
            dashboard,
            interval,
            guard: ViewGuard::new(),
            state: Mutex::new(PollState::default()),
        }
    }

    /// Run until the cancel signal is received. A failed refresh is logged
    /// and the next tick tries again.
    pub async fn run(self: Arc<Self>, mut cancel: watch::Receiver<bool>) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Poller started");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let poller = Arc::clone(&self);
                    in_flight.spawn(async move { poller.refresh().await });
                }
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }

        self.close();
        in_flight.shutdown().await;
        tracing::info!("Poller stopped");
    }

    /// Stop accepting responses. Refreshes still in flight are discarded.
    pub fn close(&self) {
        self.guard.invalidate();
    }

    async fn refresh(&self) {
        match self.poll_once().await {
            Ok(Some(report)) => log_report(&report),
            Ok(None) => tracing::debug!("Discarded a stale refresh"),
            Err(e) => tracing::warn!(error = %e, "Refresh failed, keeping previous state"),
        }
    }

    /// Refresh once. Returns `None` when a newer refresh started, or the
    /// poller was closed, before this one's responses arrived.
    pub async fn poll_once(&self) -> Result<Option<PollReport>, AppError> {
        let token = self.guard.begin();
        let (unread, dashboard) =
            tokio::join!(self.notifications.unread(), self.dashboard.load());
        let (unread, dashboard) = (unread?, dashboard?);

        // Checked under the lock so a superseded refresh cannot interleave
        // with the one that replaced it.
        let mut state = self.state.lock().await;
        let Some((unread, dashboard)) = self.guard.accept(token, (unread, dashboard)) else {
            return Ok(None);
        };

        let mut report = PollReport::default();
        for notification in &unread {
            *report
                .unread_by_role
                .entry(notification.for_role.to_string())
                .or_default() += 1;
        }

        // Forget read ones so they are reported again if they come back unread.
        let current: HashSet<NotificationId> = unread.iter().map(|n| n.id.clone()).collect();
        state.seen.retain(|id| current.contains(id));
        report.new_notifications = unread
            .into_iter()
            .filter(|n| state.seen.insert(n.id.clone()))
            .collect();

        if state.last_kpis.as_ref() != Some(&dashboard.stats) {
            state.last_kpis = Some(dashboard.stats.clone());
            report.kpis = Some(dashboard.stats);
        }

        Ok(Some(report))
    }
}

fn log_report(report: &PollReport) {
    for n in &report.new_notifications {
        tracing::info!(
            role = %n.for_role,
            rma = %n.rma,
            kind = %n.kind,
            created_at = %n.created_at,
            "{}",
            n.message
        );
    }
    if !report.new_notifications.is_empty() {
        tracing::info!(unread = ?report.unread_by_role, "Unread notifications");
    }
    if let Some(kpis) = &report.kpis {
        tracing::info!(
            total = kpis.total,
            pending = kpis.pending,
            completed = kpis.completed,
            avg_resolution_days = %kpis.avg_resolution_display(),
            "Dashboard figures changed"
        );
    }
}
