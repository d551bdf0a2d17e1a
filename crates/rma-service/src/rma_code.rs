//! RMA code generation.
//!
//! Codes look like `RMA-2025-0A1B2C3D`. The generator only makes collisions
//! improbable; uniqueness is enforced by the store and the submission flow
//! retries on a conflict.

use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use tracing::warn;
use uuid::Uuid;

/// Length of the random suffix.
pub const SUFFIX_LEN: usize = 8;

/// Source of random suffix characters.
pub trait RandomSource: Send + Sync + Debug + 'static {
    /// At least [`SUFFIX_LEN`] random hex or alphanumeric characters.
    fn token(&self) -> String;

    /// Whether this source is weaker than a v4 UUID.
    fn is_degraded(&self) -> bool {
        false
    }
}

/// Suffixes cut from a random v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl RandomSource for UuidSource {
    fn token(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Suffixes from the thread-local generator. Marked degraded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSource;

impl RandomSource for FallbackSource {
    fn token(&self) -> String {
        format!("{:08x}", rand::random::<u32>())
    }

    fn is_degraded(&self) -> bool {
        true
    }
}

/// Generates RMA codes.
#[derive(Debug, Clone)]
pub struct RmaCodeGenerator {
    source: Arc<dyn RandomSource>,
}

impl Default for RmaCodeGenerator {
    fn default() -> Self {
        Self::new(Arc::new(UuidSource))
    }
}

impl RmaCodeGenerator {
    /// Creates a generator over the given random source.
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        if source.is_degraded() {
            warn!("RMA codes will use a degraded random source");
        }
        Self { source }
    }

    /// Whether generated codes come from a degraded source.
    pub fn is_degraded(&self) -> bool {
        self.source.is_degraded()
    }

    /// Produce a code stamped with the year of `now`.
    pub fn generate(&self, now: DateTime<Utc>) -> String {
        let mut suffix: String = self
            .source
            .token()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .take(SUFFIX_LEN)
            .collect::<String>()
            .to_ascii_uppercase();

        // Top a short token up from a v4 UUID rather than emit a malformed code.
        if suffix.len() < SUFFIX_LEN {
            warn!(
                got = suffix.len(),
                want = SUFFIX_LEN,
                "Random source returned a short token, padding from a UUID"
            );
            let missing = SUFFIX_LEN - suffix.len();
            suffix.extend(
                Uuid::new_v4()
                    .simple()
                    .to_string()
                    .to_ascii_uppercase()
                    .chars()
                    .take(missing),
            );
        }

        format!("RMA-{:04}-{suffix}", now.year())
    }
}

/// Whether `code` has the `RMA-<year>-<8 uppercase alphanumerics>` shape.
pub fn is_well_formed(code: &str) -> bool {
    let mut parts = code.splitn(3, '-');
    let (Some(prefix), Some(year), Some(suffix)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == "RMA"
        && year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && suffix.len() == SUFFIX_LEN
        && suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}
