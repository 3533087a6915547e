//! # Catalog Feed
//!
//! The listing the user is looking at, kept consistent with the most recent
//! fetch or search.
//!
//! Each refresh takes a [`RequestTicket`] before any I/O. When the response
//! arrives the listing lock is taken and the ticket is compared against the
//! sequencer; only the latest ticket may write. Older responses, successful
//! or not, are dropped and reported as [`RefreshOutcome::Stale`].

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use grocer_core::{CatalogItem, CatalogItemDraft};

use crate::client::{CatalogClient, ImagePayload};
use crate::error::CatalogResult;
use crate::sequencer::{RequestSequencer, RequestTicket};

/// What happened to a refresh response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The listing now holds this response's items.
    Applied { count: usize },
    /// A newer request was issued first; the response was discarded.
    Stale,
}

#[derive(Debug, Default)]
struct Listing {
    items: Vec<CatalogItem>,
    term: String,
    applied: Option<RequestTicket>,
}

/// Catalog listing guarded against out-of-order responses.
#[derive(Debug, Clone)]
pub struct CatalogFeed {
    client: CatalogClient,
    sequencer: Arc<RequestSequencer>,
    listing: Arc<Mutex<Listing>>,
}

impl CatalogFeed {
    pub fn new(client: CatalogClient) -> Self {
        CatalogFeed {
            client,
            sequencer: Arc::new(RequestSequencer::new()),
            listing: Arc::new(Mutex::new(Listing::default())),
        }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Fetches everything (blank term) or searches, then applies the result
    /// if no newer refresh was started meanwhile.
    pub async fn refresh(&self, term: &str) -> CatalogResult<RefreshOutcome> {
        let ticket = self.sequencer.issue();
        debug!(ticket = ticket.value(), term, "Catalog refresh issued");

        let result = self.client.search(term).await;

        let mut listing = self.listing.lock().await;
        if !self.sequencer.is_latest(ticket) {
            debug!(
                ticket = ticket.value(),
                ok = result.is_ok(),
                "Discarding stale catalog response"
            );
            return Ok(RefreshOutcome::Stale);
        }

        let items = result.inspect_err(|err| {
            warn!(
                ticket = ticket.value(),
                retryable = err.is_retryable(),
                error = %err,
                "Catalog refresh failed; keeping previous listing"
            );
        })?;
        let count = items.len();
        listing.items = items;
        listing.term = term.trim().to_string();
        listing.applied = Some(ticket);
        info!(ticket = ticket.value(), count, "Catalog listing updated");
        Ok(RefreshOutcome::Applied { count })
    }

    /// Items from the last applied response.
    pub async fn items(&self) -> Vec<CatalogItem> {
        self.listing.lock().await.items.clone()
    }

    /// Looks up an item in the last applied response.
    pub async fn find(&self, id: &str) -> Option<CatalogItem> {
        self.listing
            .lock()
            .await
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Term of the last applied response ("" for the full listing).
    pub async fn current_term(&self) -> String {
        self.listing.lock().await.term.clone()
    }

    /// Ticket of the last applied response.
    pub async fn applied_ticket(&self) -> Option<RequestTicket> {
        self.listing.lock().await.applied
    }

    /// Creates an item, then reloads the full listing.
    ///
    /// Once the server accepts the item the call succeeds; a failed reload
    /// only leaves the previous listing in place.
    pub async fn create(
        &self,
        draft: &CatalogItemDraft,
        image: Option<ImagePayload>,
    ) -> CatalogResult<String> {
        let message = self.client.create(draft, image).await?;
        self.reload_after("create").await;
        Ok(message)
    }

    /// Deletes an item, then reloads the full listing.
    ///
    /// Succeeds as soon as the server confirms the delete, even if the
    /// reload fails.
    pub async fn delete(&self, id: &str) -> CatalogResult<String> {
        let message = self.client.delete(id).await?;
        self.reload_after("delete").await;
        Ok(message)
    }

    async fn reload_after(&self, operation: &str) {
        if let Err(err) = self.refresh("").await {
            warn!(operation, error = %err, "Listing reload failed after catalog change");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogSettings;
    use axum::extract::Query;
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    fn item(id: &str, name: &str) -> Value {
        json!({ "id": id, "name": name, "category": "Grocery", "measureUnit": "kg" })
    }

    async fn spawn_catalog() -> String {
        let deleted = Arc::new(AtomicBool::new(false));
        let after_delete = deleted.clone();

        let app = Router::new()
            .route(
                "/api/products",
                get(move || {
                    let deleted = after_delete.clone();
                    async move {
                        let mut data = vec![item("1", "Rice"), item("2", "Milk")];
                        if deleted.load(Ordering::SeqCst) {
                            data.remove(0);
                        }
                        Json(json!({ "status": 200, "data": data }))
                    }
                }),
            )
            .route(
                "/api/searchProducts",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let term = q.get("search").cloned().unwrap_or_default();
                    if term == "slow" {
                        tokio::time::sleep(Duration::from_millis(300)).await;
                        return Json(json!({ "status": 200, "data": [item("9", "Slow Salt")] }));
                    }
                    if term == "broken" {
                        tokio::time::sleep(Duration::from_millis(300)).await;
                        return Json(json!({ "status": 200, "data": "not a list" }));
                    }
                    Json(json!({ "status": 200, "data": [item("2", "Milk")] }))
                }),
            )
            .route(
                "/api/product/{id}",
                delete(move || {
                    let deleted = deleted.clone();
                    async move {
                        deleted.store(true, Ordering::SeqCst);
                        Json(json!({ "status": 200, "message": "Product deleted" }))
                    }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn feed() -> CatalogFeed {
        let client = CatalogClient::new(&CatalogSettings {
            server_url: spawn_catalog().await,
            timeout_secs: 5,
        })
        .unwrap();
        CatalogFeed::new(client)
    }

    #[tokio::test]
    async fn test_refresh_applies_listing() {
        let feed = feed().await;
        assert!(feed.items().await.is_empty());

        let outcome = feed.refresh("").await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Applied { count: 2 });
        assert_eq!(feed.find("1").await.unwrap().name, "Rice");
        assert_eq!(feed.current_term().await, "");
    }

    #[tokio::test]
    async fn test_slow_older_response_is_discarded() {
        let feed = feed().await;

        // "slow" is issued first but answers last.
        let (slow, fast) = tokio::join!(feed.refresh("slow"), feed.refresh("milk"));

        assert_eq!(slow.unwrap(), RefreshOutcome::Stale);
        assert_eq!(fast.unwrap(), RefreshOutcome::Applied { count: 1 });

        let items = feed.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Milk");
        assert_eq!(feed.current_term().await, "milk");
        assert_eq!(feed.applied_ticket().await.map(|t| t.value()), Some(2));
    }

    #[tokio::test]
    async fn test_stale_failure_is_not_reported() {
        let feed = feed().await;
        let (broken, fast) = tokio::join!(feed.refresh("broken"), feed.refresh("milk"));

        assert_eq!(broken.unwrap(), RefreshOutcome::Stale);
        assert!(fast.is_ok());
        assert_eq!(feed.items().await.len(), 1);
    }

    #[tokio::test]
    async fn test_latest_failure_keeps_previous_listing() {
        let feed = feed().await;
        feed.refresh("").await.unwrap();

        assert!(feed.refresh("broken").await.is_err());
        assert_eq!(feed.items().await.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_reloads_listing() {
        let feed = feed().await;
        feed.refresh("").await.unwrap();

        let message = feed.delete("1").await.unwrap();
        assert_eq!(message, "Product deleted");
        assert!(feed.find("1").await.is_none());
        assert_eq!(feed.items().await.len(), 1);
    }
}
