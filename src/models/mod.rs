//! PokeAPI response models
//!
//! Deserialization targets for the PokeAPI resources the REPL uses. Only the
//! fields the commands read are declared; serde ignores the rest.

pub mod location;
pub mod pokemon;

use serde::Deserialize;

// Re-export commonly used types
pub use location::{LocationArea, LocationPage, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};

/// `{ name, url }` reference used throughout PokeAPI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}
