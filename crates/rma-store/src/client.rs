//! HTTP client for the REST store.

use reqwest::{Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use rma_core::config::StoreConfig;
use rma_core::error::{AppError, ErrorKind};
use rma_core::result::AppResult;

/// Wrapper around a shared `reqwest::Client` bound to the store base URL.
#[derive(Debug, Clone)]
pub struct StoreClient {
    /// The underlying HTTP client (connection pooled).
    http: reqwest::Client,
    /// Base URL without a trailing slash.
    base: String,
}

impl StoreClient {
    /// Build a client from configuration.
    pub fn connect(config: &StoreConfig) -> AppResult<Self> {
        info!(base_url = %config.base(), "Configuring REST store client");

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            base: config.base().to_string(),
        })
    }

    /// Base URL of the store.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Absolute URL for a collection path plus query parameters.
    pub fn url(&self, path: &str, params: &[(&str, String)]) -> AppResult<Url> {
        let raw = format!("{}/{}", self.base, path.trim_start_matches('/'));
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params.iter().map(|(k, v)| (*k, v.as_str())))
        };
        parsed.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid store URL '{raw}': {e}"),
                e,
            )
        })
    }

    /// `GET` and decode a JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        Ok(ensure_success(response).await?.json::<T>().await?)
    }

    /// `GET` a single record, mapping 404 to `None`.
    pub async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> AppResult<Option<T>> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(ensure_success(response).await?.json::<T>().await?))
    }

    /// `POST` a JSON body and decode the created record.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> AppResult<T> {
        debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        Ok(ensure_success(response).await?.json::<T>().await?)
    }

    /// `PATCH` a JSON body and decode the updated record.
    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> AppResult<T> {
        debug!(%url, "PATCH");
        let response = self.http.patch(url).json(body).send().await?;
        Ok(ensure_success(response).await?.json::<T>().await?)
    }

    /// `DELETE` a record. The body, if any, is ignored.
    pub async fn delete(&self, url: Url) -> AppResult<()> {
        debug!(%url, "DELETE");
        let response = self.http.delete(url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Check store connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        let url = self.url("tickets", &[("_limit", "1".to_string())])?;
        let response = self.http.get(url).send().await?;
        Ok(response.status().is_success())
    }
}

/// Turn a non-2xx response into an [`AppError`], preferring the store's
/// own `message` field when it sends one.
async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("Store responded with {status}"));

    let kind = match status {
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::CONFLICT => ErrorKind::Conflict,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::Validation,
        _ => ErrorKind::Store,
    };
    Err(AppError::new(kind, message))
}
