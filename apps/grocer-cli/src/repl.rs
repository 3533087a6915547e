//! # Read-Eval-Print Loop
//!
//! Reads commands line by line until `quit` or end of input. `help` is
//! clap's own help subcommand and prints like a usage error. A failed
//! command prints a notice and the loop carries on.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::commands::{execute, parse_line, Outcome};
use crate::error::CommandError;
use crate::state::Session;

pub const PROMPT: &str = "grocer> ";

/// How failures are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeStyle {
    /// `! [NOT_FOUND] Catalog item not found: 9`
    #[default]
    Plain,
    /// `{"code":"NOT_FOUND","message":"Catalog item not found: 9"}`
    Json,
}

pub async fn run_repl<R, W>(
    session: &mut Session,
    input: R,
    output: &mut W,
    notices: NoticeStyle,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    write!(output, "{}", PROMPT)?;
    output.flush()?;

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            None => {}
            Some(Err(usage)) => {
                writeln!(output, "{}", usage.to_string().trim_end())?;
            }
            Some(Ok(command)) => match execute(session, command).await {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Reply(text)) => writeln!(output, "{}", text)?,
                Err(err) => {
                    warn!(code = err.code.as_str(), message = %err.message, "Command failed");
                    writeln!(output, "{}", notice(&err, notices))?;
                }
            },
        }

        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    Ok(())
}

fn notice(err: &CommandError, style: NoticeStyle) -> String {
    match style {
        NoticeStyle::Plain => format!("! {}", err),
        NoticeStyle::Json => serde_json::to_string(err).unwrap_or_else(|_| format!("! {}", err)),
    }
}
