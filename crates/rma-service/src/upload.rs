//! Attachment upload collaborator.
//!
//! The core only needs "attempt upload, receive a URL or a failure". The
//! simulated uploader stands in for real file storage.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use rma_core::error::AppError;
use rma_core::result::AppResult;

/// Characters left unescaped in a URL path component, matching what
/// browsers leave alone when encoding a component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Largest accepted attachment.
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// A file the customer attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name.
    pub file_name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// MIME type, when known.
    #[serde(default)]
    pub content_type: Option<String>,
}

impl Attachment {
    /// Creates an attachment descriptor.
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
            content_type: None,
        }
    }

    /// Reject files over [`MAX_ATTACHMENT_BYTES`].
    pub fn check_size(&self) -> AppResult<()> {
        if self.size_bytes > MAX_ATTACHMENT_BYTES {
            return Err(AppError::validation("File is too big (max 5MB)."));
        }
        Ok(())
    }
}

/// Where an attachment ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Original file name.
    pub name: String,
    /// Public URL.
    pub url: String,
}

/// Uploads attachments.
#[async_trait]
pub trait Uploader: Send + Sync + Debug + 'static {
    /// Upload a file and return its URL.
    async fn upload(&self, attachment: &Attachment) -> AppResult<UploadedFile>;
}

/// Pretends to upload: fails for names containing `fail`, otherwise
/// returns a URL under a fixed base.
#[derive(Debug, Clone)]
pub struct SimulatedUploader {
    base_url: String,
    latency: Duration,
}

impl Default for SimulatedUploader {
    fn default() -> Self {
        Self::new("https://myserver.local/uploads")
    }
}

impl SimulatedUploader {
    /// Creates an uploader returning URLs under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            latency: Duration::ZERO,
        }
    }

    /// Wait this long before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// URL a file name would be served from.
    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url, utf8_percent_encode(file_name, COMPONENT))
    }
}

#[async_trait]
impl Uploader for SimulatedUploader {
    async fn upload(&self, attachment: &Attachment) -> AppResult<UploadedFile> {
        attachment.check_size()?;
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if attachment.file_name.to_lowercase().contains("fail") {
            warn!(file = %attachment.file_name, "Simulated upload failure");
            return Err(AppError::upload("Something went wrong during uploading"));
        }

        let url = self.url_for(&attachment.file_name);
        debug!(file = %attachment.file_name, %url, "Attachment uploaded");
        Ok(UploadedFile {
            name: attachment.file_name.clone(),
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rma_core::error::ErrorKind;

    #[tokio::test]
    async fn test_url_is_component_encoded() {
        let uploader = SimulatedUploader::default();
        let file = uploader
            .upload(&Attachment::new("broken screen (1).jpg", 1024))
            .await
            .expect("upload");
        assert_eq!(file.url, "https://myserver.local/uploads/broken%20screen%20(1).jpg");
        assert_eq!(file.name, "broken screen (1).jpg");
    }

    #[tokio::test]
    async fn test_fail_in_name_fails() {
        let err = SimulatedUploader::default()
            .upload(&Attachment::new("Please-FAIL.png", 10))
            .await
            .expect_err("simulated failure");
        assert_eq!(err.kind, ErrorKind::Upload);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected() {
        let err = SimulatedUploader::default()
            .upload(&Attachment::new("big.png", MAX_ATTACHMENT_BYTES + 1))
            .await
            .expect_err("too big");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let uploader = SimulatedUploader::default().with_latency(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();
        uploader
            .upload(&Attachment::new("photo.jpg", 1))
            .await
            .expect("upload");
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }
}
