//! Email collaborator.

use std::fmt::Debug;

use async_trait::async_trait;
use tracing::info;

use rma_core::result::AppResult;

/// Sends email.
#[async_trait]
pub trait Mailer: Send + Sync + Debug + 'static {
    /// Send one message.
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Mailer that only logs what it would send.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        info!(to, subject, body_len = body.len(), "Email sent");
        Ok(())
    }
}
