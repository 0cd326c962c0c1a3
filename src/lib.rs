//! Pokedex - An interactive PokeAPI explorer
//!
//! Provides a REPL over the PokeAPI with every response held in a
//! self-expiring in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::TimedCache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;
