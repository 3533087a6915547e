//! # Session State
//!
//! One focused state type per concern, bundled into a [`Session`] that the
//! command layer borrows:
//!
//! - [`CartState`] - the cart ledger
//! - [`ConfigState`] - configuration and export reference date
//! - [`CatalogFeed`] - the last applied catalog listing

mod cart;
mod config;

pub use cart::CartState;
pub use config::ConfigState;

use chrono::NaiveDate;

use grocer_catalog::{CatalogClient, CatalogFeed, CatalogResult};

use crate::config::AppConfig;

/// Everything a shell command may read or change.
#[derive(Debug)]
pub struct Session {
    pub cart: CartState,
    pub catalog: CatalogFeed,
    pub config: ConfigState,
}

impl Session {
    /// Builds the session from a validated config.
    pub fn new(config: AppConfig, reference_date: NaiveDate) -> CatalogResult<Self> {
        let client = CatalogClient::new(&config.catalog)?;
        Ok(Session {
            cart: CartState::new(config.quantity.clone()),
            catalog: CatalogFeed::new(client),
            config: ConfigState::new(config, reference_date),
        })
    }
}
