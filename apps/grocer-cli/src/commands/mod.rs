//! # Shell Commands
//!
//! Each input line is parsed by clap into a [`ShellCommand`] and dispatched
//! to one of the submodules:
//!
//! - [`catalog`] - list, search, create, delete
//! - [`cart`] - add, inc, dec, rm, cart, clear
//! - [`export`] - export, date

pub mod cart;
pub mod catalog;
pub mod export;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::CommandError;
use crate::state::Session;

/// One line of shell input.
#[derive(Debug, Parser)]
#[command(
    name = "grocer",
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_required = true
)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ShellCommand {
    /// List the whole catalog
    List,

    /// Search the catalog by name
    Search { terms: Vec<String> },

    /// Add an item from the last listing to the cart
    Add {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: Option<f64>,
    },

    /// Increase a cart entry by one step
    Inc { id: String },

    /// Decrease a cart entry by one step (stops at its minimum)
    Dec { id: String },

    /// Remove an entry from the cart
    Rm { id: String },

    /// Show the cart
    Cart,

    /// Empty the cart
    Clear,

    /// Set the export reference date (dd-mm-yyyy)
    Date { date: String },

    /// Write the shopping list to the output directory
    Export {
        /// Write JSON instead of the configured format
        #[arg(long)]
        json: bool,
    },

    /// Add a new item to the catalog
    Create {
        #[arg(long)]
        unit: String,
        /// Grocery, Bathroom or Other
        #[arg(long)]
        category: String,
        /// Category name when --category is Other
        #[arg(long)]
        custom: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete an item from the catalog (and the cart)
    Delete { id: String },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Reply(String),
    Quit,
}

/// Splits and parses one input line. Blank lines give `None`.
pub fn parse_line(line: &str) -> Option<Result<ShellCommand, clap::Error>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }
    Some(CommandLine::try_parse_from(words).map(|parsed| parsed.command))
}

/// Runs one command against the session.
pub async fn execute(session: &mut Session, command: ShellCommand) -> Result<Outcome, CommandError> {
    let reply = match command {
        ShellCommand::List => catalog::list(session).await?,
        ShellCommand::Search { terms } => catalog::search(session, &terms.join(" ")).await?,
        ShellCommand::Add { id, quantity } => cart::add(session, &id, quantity).await?,
        ShellCommand::Inc { id } => cart::increase(session, &id)?,
        ShellCommand::Dec { id } => cart::decrease(session, &id)?,
        ShellCommand::Rm { id } => cart::remove(session, &id),
        ShellCommand::Cart => cart::show(session),
        ShellCommand::Clear => cart::clear(session),
        ShellCommand::Date { date } => export::set_date(session, &date)?,
        ShellCommand::Export { json } => {
            let path = export::export(session, json)?;
            format!("Exported to {}", path.display())
        }
        ShellCommand::Create {
            unit,
            category,
            custom,
            image,
            name,
        } => {
            let request = catalog::CreateRequest {
                name: name.join(" "),
                unit,
                category,
                custom,
                image,
            };
            catalog::create(session, request).await?
        }
        ShellCommand::Delete { id } => catalog::delete(session, &id).await?,
        ShellCommand::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Reply(reply))
}
