//! # Catalog Commands
//!
//! `list`, `search`, `create` and `delete`.
//!
//! ## Failure Handling
//! Catalog failures come back as [`CommandError`] notices. The listing keeps
//! its previous contents and the cart is never touched, except that a
//! successful `delete` also drops the item from the cart.

use std::path::Path;

use tracing::{info, warn};

use grocer_catalog::{ImagePayload, RefreshOutcome};
use grocer_core::validation::{parse_category, validate_new_item};
use grocer_core::{CatalogItem, NewCatalogItem};

use crate::error::CommandError;
use crate::state::Session;

/// Arguments of `create`, already split by the command parser.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    pub name: String,
    pub unit: String,
    pub category: String,
    pub custom: Option<String>,
    pub image: Option<std::path::PathBuf>,
}

/// `list`
pub async fn list(session: &Session) -> Result<String, CommandError> {
    refresh(session, "").await
}

/// `search [term…]`. A blank term lists everything.
pub async fn search(session: &Session, term: &str) -> Result<String, CommandError> {
    refresh(session, term).await
}

async fn refresh(session: &Session, term: &str) -> Result<String, CommandError> {
    match session.catalog.refresh(term).await? {
        RefreshOutcome::Applied { .. } => Ok(format_listing(&session.catalog.items().await)),
        RefreshOutcome::Stale => Ok("A newer catalog request is pending".to_string()),
    }
}

/// `create --unit <u> --category <c> [--custom <name>] [--image <path>] <name…>`
pub async fn create(session: &Session, request: CreateRequest) -> Result<String, CommandError> {
    let category = parse_category(&request.category, request.custom.as_deref())?;

    let draft = validate_new_item(&NewCatalogItem {
        name: request.name,
        measure_unit: request.unit,
        category: Some(category),
    })?;

    let image = match request.image.as_deref() {
        Some(path) => Some(read_image(path)?),
        None => None,
    };

    let message = session.catalog.create(&draft, image).await?;
    info!(name = %draft.name, category = %draft.category, "Catalog item created");
    Ok(message)
}

/// `delete <id>`. Also removes the item from the cart.
pub async fn delete(session: &mut Session, id: &str) -> Result<String, CommandError> {
    let message = session.catalog.delete(id).await?;
    if session.cart.remove(id) {
        info!(id, "Deleted item also removed from cart");
        return Ok(format!("{} (also removed from cart)", message));
    }
    Ok(message)
}

fn read_image(path: &Path) -> Result<ImagePayload, CommandError> {
    let bytes = std::fs::read(path).map_err(|e| {
        warn!(?path, error = %e, "Cannot read image");
        CommandError::validation(format!("Cannot read image {}: {}", path.display(), e))
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImagePayload { file_name, bytes })
}

/// One line per item: id, name, unit, category.
pub fn format_listing(items: &[CatalogItem]) -> String {
    if items.is_empty() {
        return "No items found".to_string();
    }
    items
        .iter()
        .map(|item| {
            format!(
                "{:<12} {:<30} {:<8} {}",
                item.id, item.name, item.measure_unit, item.category
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
