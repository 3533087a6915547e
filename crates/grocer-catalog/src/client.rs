//! # Catalog Client
//!
//! Thin async wrapper over the catalog server's REST endpoints.
//!
//! ## Response Envelope
//! Every endpoint answers with the same JSON shape:
//! ```json
//! { "status": 200, "message": "Products fetched", "data": [ ... ] }
//! ```
//! `status` mirrors the outcome and is what create/delete success is judged
//! on. `data` is absent for create and delete.
//!
//! ## Request Tracing
//! Each call carries a fresh `X-Request-Id` (UUID v4) so a catalog log line
//! can be matched with the shell's `info!` line for the same request.

use std::time::{Duration, Instant};

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use grocer_core::validation::validate_search_term;
use grocer_core::{CatalogItem, CatalogItemDraft};

use crate::config::CatalogSettings;
use crate::error::{CatalogError, CatalogResult};

/// Header used to correlate requests with server logs.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Envelope status the server uses for a successful create.
const CREATED: u16 = 201;

/// Envelope status the server uses for a successful delete.
const DELETED: u16 = 200;

/// `{status, message, data}`. Missing fields decode as `None`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: Option<u16>,
    message: Option<String>,
    data: Option<T>,
}

/// An image attached to a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Async client for the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl CatalogClient {
    /// Builds a client from validated settings.
    pub fn new(settings: &CatalogSettings) -> CatalogResult<Self> {
        settings.validate()?;

        let base_url = Url::parse(settings.server_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl(settings.server_url.clone()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| CatalogError::ClientBuild(e.to_string()))?;

        Ok(CatalogClient {
            http,
            base_url,
            timeout_secs: settings.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lists every catalog item.
    pub async fn fetch_all(&self) -> CatalogResult<Vec<CatalogItem>> {
        let url = self.endpoint(&["api", "products"])?;
        let envelope: Envelope<Vec<CatalogItem>> =
            self.send("fetch_all", self.http.get(url)).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Lists items matching `term`. A blank term is the same as [`fetch_all`].
    ///
    /// [`fetch_all`]: CatalogClient::fetch_all
    pub async fn search(&self, term: &str) -> CatalogResult<Vec<CatalogItem>> {
        let term = validate_search_term(term)?;
        if term.is_empty() {
            return self.fetch_all().await;
        }

        let mut url = self.endpoint(&["api", "searchProducts"])?;
        url.query_pairs_mut().append_pair("search", &term);
        let envelope: Envelope<Vec<CatalogItem>> =
            self.send("search", self.http.get(url)).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Creates a catalog item, uploading `image` as multipart when present.
    ///
    /// ## Returns
    /// The server's confirmation message.
    pub async fn create(
        &self,
        draft: &CatalogItemDraft,
        image: Option<ImagePayload>,
    ) -> CatalogResult<String> {
        let url = self.endpoint(&["api", "products"])?;
        let request = match image {
            Some(image) => {
                let form = Form::new()
                    .text("name", draft.name.clone())
                    .text("measureUnit", draft.measure_unit.clone())
                    .text("category", draft.category.clone())
                    .part("image", Part::bytes(image.bytes).file_name(image.file_name));
                self.http.post(url).multipart(form)
            }
            None => self.http.post(url).json(draft),
        };

        let envelope: Envelope<serde_json::Value> = self.send("create", request).await?;
        expect_status(envelope, CREATED, "Product created")
    }

    /// Deletes the catalog item `id`.
    ///
    /// ## Returns
    /// The server's confirmation message.
    pub async fn delete(&self, id: &str) -> CatalogResult<String> {
        let url = self.endpoint(&["api", "product", id])?;
        let envelope: Envelope<serde_json::Value> =
            self.send("delete", self.http.delete(url)).await?;
        expect_status(envelope, DELETED, "Product deleted")
    }

    fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> CatalogResult<Envelope<T>> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        debug!(operation, %request_id, "Sending catalog request");

        let response = request
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            warn!(operation, %request_id, status = status.as_u16(), elapsed_ms, "Catalog request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message: failure_message(status, &body),
            });
        }

        let mut envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| CatalogError::Decode(e.to_string()))?;
        if envelope.status.is_none() {
            envelope.status = Some(status.as_u16());
        }

        info!(
            operation,
            %request_id,
            status = status.as_u16(),
            elapsed_ms,
            "Catalog request complete"
        );
        Ok(envelope)
    }

    fn transport_error(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout(self.timeout_secs)
        } else if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

fn expect_status(
    envelope: Envelope<serde_json::Value>,
    expected: u16,
    fallback: &str,
) -> CatalogResult<String> {
    let status = envelope.status.unwrap_or(expected);
    let message = envelope.message.unwrap_or_else(|| fallback.to_string());
    if status == expected {
        Ok(message)
    } else {
        Err(CatalogError::Rejected { status, message })
    }
}

/// Prefers the envelope's message, then the HTTP reason phrase.
fn failure_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string())
}

// =============================================================================
// Tests
// =============================================================================
