//! # grocer-catalog: Product Catalog Access
//!
//! Async client for the catalog server plus the listing the shell shows.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  shell ──► CatalogFeed::refresh(term)                                   │
//! │               │  ticket = sequencer.issue()                             │
//! │               ▼                                                         │
//! │            CatalogClient::search ──► HTTP ──► catalog server            │
//! │               │                                                         │
//! │               ▼                                                         │
//! │            ticket still latest? ── yes ──► listing replaced             │
//! │                                  └─ no ──► response dropped             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog failures never touch the cart. The shell turns them into notices.

pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod sequencer;

pub use client::{CatalogClient, ImagePayload, REQUEST_ID_HEADER};
pub use config::CatalogSettings;
pub use error::{CatalogError, CatalogResult};
pub use feed::{CatalogFeed, RefreshOutcome};
pub use sequencer::{RequestSequencer, RequestTicket};
