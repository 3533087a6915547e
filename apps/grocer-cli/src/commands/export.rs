//! # Export Commands
//!
//! `export [--json]` and `date <dd-mm-yyyy>`.
//!
//! ```text
//! cart snapshot ──► ExportRenderer::render(entries, reference date)
//!                        │
//!                        ▼
//!               ExportDocument::encode(format)
//!                        │
//!                        ▼
//!        {output_dir}/groceries_list_5Oct2026.txt
//! ```

use std::path::PathBuf;

use tracing::info;

use grocer_core::{ExportFormat, ExportRenderer};

use crate::error::CommandError;
use crate::state::Session;

/// `export [--json]`. Returns the written path.
pub fn export(session: &Session, json: bool) -> Result<PathBuf, CommandError> {
    let cart = session.cart.cart();
    if cart.is_empty() {
        return Err(CommandError::export("Cart is empty; add items before exporting"));
    }

    let format = if json {
        ExportFormat::Json
    } else {
        session.config.export_format()
    };

    let document = ExportRenderer::new().render(cart.entries(), session.config.reference_date());
    let contents = document.encode(format)?;

    let dir = session.config.output_dir();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(document.file_name(format));
    std::fs::write(&path, contents)?;

    info!(
        ?path,
        rows = document.row_count(),
        pages = document.page_count(),
        "Shopping list exported"
    );
    Ok(path)
}

/// `date <dd-mm-yyyy>`
pub fn set_date(session: &mut Session, input: &str) -> Result<String, CommandError> {
    let date = session.config.set_reference_date(input)?;
    Ok(format!("Reference date set to {}", date.format("%d-%m-%Y")))
}
