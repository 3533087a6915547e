//! # Grocer Shell Library
//!
//! Interactive shell for building a grocery list against the product
//! catalog and exporting it as a paginated document.
//!
//! ## Module Organization
//! ```text
//! grocer_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── AppConfig: file, environment, flags
//! ├── error.rs        ◄─── CommandError for failed commands
//! ├── repl.rs         ◄─── Line loop, notices
//! ├── state/
//! │   ├── mod.rs      ◄─── Session bundle
//! │   ├── cart.rs     ◄─── Cart ledger wrapper
//! │   └── config.rs   ◄─── Config + reference date
//! └── commands/
//!     ├── mod.rs      ◄─── Line parser & dispatch
//!     ├── catalog.rs  ◄─── list, search, create, delete
//!     ├── cart.rs     ◄─── add, inc, dec, rm, cart, clear
//!     └── export.rs   ◄─── export, date
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod repl;
pub mod state;

use std::path::PathBuf;

use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use grocer_core::export::parse_reference_date;

use config::{AppConfig, CliOverrides, ConfigError};
use repl::NoticeStyle;
use state::Session;

/// Build a grocery list from the product catalog
#[derive(Debug, Parser)]
#[command(name = "grocer", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Catalog server base URL
    #[arg(long)]
    pub server_url: Option<String>,

    /// Directory exports are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Export reference date (dd-mm-yyyy), default today
    #[arg(long)]
    pub date: Option<String>,

    /// Print command failures as JSON
    #[arg(long)]
    pub json_notices: bool,
}

/// Runs the shell on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Shell Startup                                     │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • stderr, env filter, default info,grocer=debug                     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • file → environment → flags → validate                             │
/// │                                                                         │
/// │  3. Build Session ────────────────────────────────────────────────────► │
/// │     • CartState, CatalogFeed, ConfigState                               │
/// │                                                                         │
/// │  4. Read commands until quit / EOF ───────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), ConfigError> {
    init_tracing();

    info!("Starting Grocer shell");

    let overrides = CliOverrides {
        server_url: cli.server_url,
        output_dir: cli.output_dir,
    };
    let config = AppConfig::load(cli.config, &overrides)?;

    let reference_date = match cli.date.as_deref() {
        Some(input) => parse_reference_date(input)?,
        None => chrono::Local::now().date_naive(),
    };

    info!(
        server_url = %config.catalog.server_url,
        output_dir = ?config.export.output_dir,
        %reference_date,
        "Session configured"
    );

    let mut session = Session::new(config, reference_date)?;
    let notices = if cli.json_notices {
        NoticeStyle::Json
    } else {
        NoticeStyle::Plain
    };

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl::run_repl(&mut session, stdin, &mut stdout, notices).await?;

    info!("Shell closed");
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=grocer_catalog=trace` - Trace one crate only
/// - Default: `info,grocer=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,grocer=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-process catalog server and session helpers shared by command tests.

    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path as UrlPath, Query};
    use axum::http::StatusCode;
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    use crate::config::AppConfig;
    use crate::state::Session;

    fn seed() -> Vec<Value> {
        vec![
            json!({ "id": "1", "name": "Apple", "category": "Grocery", "measureUnit": "pcs" }),
            json!({ "id": "2", "name": "Rice", "category": "Grocery", "measureUnit": "kg" }),
            json!({ "id": "3", "name": "Soap", "category": "Bathroom", "measureUnit": "pcs" }),
        ]
    }

    pub async fn spawn_catalog() -> String {
        let products = Arc::new(Mutex::new(seed()));
        let for_list = products.clone();
        let for_search = products.clone();
        let for_create = products.clone();

        let app = Router::new()
            .route(
                "/api/products",
                get(move || {
                    let products = for_list.clone();
                    async move {
                        let data = products.lock().unwrap().clone();
                        Json(json!({ "status": 200, "data": data }))
                    }
                })
                .post(move |Json(body): Json<Value>| {
                    let products = for_create.clone();
                    async move {
                        let mut products = products.lock().unwrap();
                        let id = (products.len() + 10).to_string();
                        products.push(json!({
                            "id": id,
                            "name": body["name"],
                            "category": body["category"],
                            "measureUnit": body["measureUnit"],
                        }));
                        (
                            StatusCode::CREATED,
                            Json(json!({ "status": 201, "message": "Product created" })),
                        )
                    }
                }),
            )
            .route(
                "/api/searchProducts",
                get(move |Query(q): Query<HashMap<String, String>>| {
                    let products = for_search.clone();
                    async move {
                        let term = q.get("search").cloned().unwrap_or_default().to_lowercase();
                        let data: Vec<Value> = products
                            .lock()
                            .unwrap()
                            .iter()
                            .filter(|p| {
                                p["name"]
                                    .as_str()
                                    .map(|n| n.to_lowercase().contains(&term))
                                    .unwrap_or(false)
                            })
                            .cloned()
                            .collect();
                        Json(json!({ "status": 200, "data": data }))
                    }
                }),
            )
            .route(
                "/api/product/{id}",
                delete(move |UrlPath(id): UrlPath<String>| {
                    let products = products.clone();
                    async move {
                        let mut products = products.lock().unwrap();
                        let before = products.len();
                        products.retain(|p| p["id"] != id.as_str());
                        if products.len() == before {
                            return (
                                StatusCode::NOT_FOUND,
                                Json(json!({ "status": 404, "message": "Product not found" })),
                            );
                        }
                        (
                            StatusCode::OK,
                            Json(json!({ "status": 200, "message": "Product deleted" })),
                        )
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

    pub fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("grocer-export-{}", uuid::Uuid::new_v4()))
    }

    pub fn session_for(server_url: &str, output_dir: &Path) -> Session {
        let mut config = AppConfig::default();
        config.catalog.server_url = server_url.to_string();
        config.catalog.timeout_secs = 5;
        config.export.output_dir = output_dir.to_path_buf();
        Session::new(config, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()).unwrap()
    }
}
