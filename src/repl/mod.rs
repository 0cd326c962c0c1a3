//! REPL Module
//!
//! Line-oriented command loop over the PokeAPI client.
//!
//! # Commands
//! - `help`, `exit`
//! - `map`, `mapb` - Page forward and back through location areas
//! - `explore <area>` - List Pokemon in an area
//! - `catch <pokemon>`, `inspect <pokemon>`, `pokedex`
//! - `cache` - Response cache statistics

mod command;
mod pokedex;
mod session;

use std::io::Write;
use std::ops::ControlFlow;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::error::{PokedexError, Result};

pub use command::{Command, CommandInfo, COMMANDS};
pub use pokedex::{CaughtPokemon, Pokedex};
pub use session::{is_caught, roll_pokeball, Session};

pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `text` and splits it into words.
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

// == Run ==
/// Reads commands from `input` until EOF or `exit`, writing prompts and
/// command output to `out`.
///
/// Command failures are reported on `out` and the loop carries on; only
/// I/O failures on `input` or `out` end it with an error.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let words = clean_input(&line);
        if words.is_empty() {
            continue;
        }

        let command = match Command::parse(&words) {
            Ok(command) => command,
            Err(PokedexError::UnknownCommand(_)) => {
                writeln!(out, "Unknown command")?;
                continue;
            }
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        match session.execute(command, out).await {
            Ok(ControlFlow::Break(())) => break,
            Ok(ControlFlow::Continue(())) => {}
            Err(err @ PokedexError::Io(_)) => return Err(err),
            Err(err) => {
                warn!("Command failed: {}", err);
                writeln!(out, "{}", err)?;
            }
        }
    }

    Ok(())
}
