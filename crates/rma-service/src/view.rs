//! Stale-response guard for polled views.
//!
//! Each refresh takes a token. A response is applied only while its token
//! is still the latest one issued, so a slow response that lands after a
//! newer refresh (or after the view was closed) is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Proof of which refresh a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewToken(u64);

/// Hands out refresh tokens for one view.
#[derive(Debug, Clone, Default)]
pub struct ViewGuard {
    generation: Arc<AtomicU64>,
}

impl ViewGuard {
    /// Creates a new guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh. Any earlier token becomes stale.
    pub fn begin(&self) -> ViewToken {
        ViewToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Invalidate every outstanding token, e.g. when the view closes.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Whether a token is the latest one.
    pub fn is_current(&self, token: ViewToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Pass a response through only if its token is still current.
    pub fn accept<T>(&self, token: ViewToken, value: T) -> Option<T> {
        self.is_current(token).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_late_response_is_dropped() {
        let guard = ViewGuard::new();
        let first = guard.begin();
        let second = guard.begin();

        assert_eq!(guard.accept(first, "old"), None);
        assert_eq!(guard.accept(second, "new"), Some("new"));
    }

    #[test]
    fn test_invalidate_drops_everything() {
        let guard = ViewGuard::new();
        let token = guard.begin();
        guard.clone().invalidate();
        assert!(!guard.is_current(token));
    }
}
