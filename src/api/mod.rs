//! API Module
//!
//! Client for the remote PokeAPI.
//!
//! # Resources
//! - `GET /location-area` - Paginated location area list
//! - `GET /location-area/{name}` - Pokemon encounters in an area
//! - `GET /pokemon/{name}` - Pokemon details

pub mod client;

pub use client::PokeApiClient;
