//! # Grocer Shell Entry Point
//!
//! ## Startup Sequence
//! 1. Parse process arguments
//! 2. Initialize tracing (stderr)
//! 3. Load configuration
//! 4. Build session state
//! 5. Read commands until `quit` or end of input

use clap::Parser;

use grocer_cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = grocer_cli::run(cli).await {
        eprintln!("grocer: {}", e);
        std::process::exit(1);
    }
}
