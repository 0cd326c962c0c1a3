//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror.

use reqwest::StatusCode;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the cache, the PokeAPI client and the REPL.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Cache interval must be strictly positive
    #[error("Invalid cache interval: must be greater than zero")]
    InvalidInterval,

    /// The reaper needs a tokio runtime to be spawned on
    #[error("No tokio runtime available to run the cache reaper")]
    NoRuntime,

    /// Base URL or resource name does not form a usable request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// PokeAPI answered with a non-success status
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input line did not name a known command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command invoked without its required argument
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// Inspecting a Pokemon that is not in the Pokedex
    #[error("you have not caught that pokemon: {0}")]
    NotCaught(String),

    /// Terminal read or write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
