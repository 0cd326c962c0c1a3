//! Location area models
//!
//! Shapes of `GET /location-area` (paginated list) and
//! `GET /location-area/{name}`.

use serde::Deserialize;

use super::NamedResource;

/// One page of the location area list.
///
/// `next` and `previous` are absolute URLs, `None` at either end of the list.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationPage {
    #[serde(default)]
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// A single location area with the Pokemon that can be encountered there.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationArea {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

impl LocationArea {
    /// Names of the Pokemon encountered in this area, in API order.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_page_first_page() {
        let json = r#"{
            "count": 1089,
            "next": "https://pokeapi.co/api/v2/location-area?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/"},
                {"name": "eterna-city-area", "url": "https://pokeapi.co/api/v2/location-area/2/"}
            ]
        }"#;
        let page: LocationPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.count, 1089);
        assert!(page.previous.is_none());
        assert_eq!(
            page.next.as_deref(),
            Some("https://pokeapi.co/api/v2/location-area?offset=20&limit=20")
        );
        assert_eq!(page.results[1].name, "eterna-city-area");
    }

    #[test]
    fn test_location_area_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "name": "canalave-city-area",
            "game_index": 1,
            "encounter_method_rates": [],
            "pokemon_encounters": [
                {
                    "pokemon": {
                        "name": "tentacool",
                        "url": "https://pokeapi.co/api/v2/pokemon/72/"
                    },
                    "version_details": []
                },
                {
                    "pokemon": {
                        "name": "tentacruel",
                        "url": "https://pokeapi.co/api/v2/pokemon/73/"
                    },
                    "version_details": []
                }
            ]
        }"#;
        let area: LocationArea = serde_json::from_str(json).unwrap();

        assert_eq!(area.name, "canalave-city-area");
        assert_eq!(
            area.pokemon_names().collect::<Vec<_>>(),
            vec!["tentacool", "tentacruel"]
        );
    }
}
