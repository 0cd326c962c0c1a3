//! REPL session state and command execution

use std::io::Write;
use std::ops::ControlFlow;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::api::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::models::LocationPage;
use crate::repl::command::{Command, COMMANDS};
use crate::repl::pokedex::Pokedex;

// == Session ==
/// Everything a command can read or change: the API client, the pagination
/// cursor over location areas and the caught Pokemon.
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    pokedex: Pokedex,
    /// Page `map` shows next; `None` once the last page has been shown
    next: Option<String>,
    /// Page `mapb` shows; `None` while on the first page
    previous: Option<String>,
    catch_threshold: u32,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient, catch_threshold: u32) -> Self {
        Self::with_rng(client, catch_threshold, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied random source for catch rolls.
    pub fn with_rng(client: PokeApiClient, catch_threshold: u32, rng: StdRng) -> Self {
        let next = Some(client.location_areas_url().to_string());
        Self {
            client,
            pokedex: Pokedex::new(),
            next,
            previous: None,
            catch_threshold,
            rng,
        }
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    // == Execute ==
    /// Runs `command`, writing its output to `out`.
    ///
    /// Returns `ControlFlow::Break` when the REPL should stop.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<ControlFlow<()>> {
        debug!(?command, "executing command");

        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(ControlFlow::Break(()));
            }
            Command::Map => self.map_forward(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
            Command::CacheStats => self.cache_stats(out)?,
        }

        Ok(ControlFlow::Continue(()))
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for info in COMMANDS {
            writeln!(out, "{}: {}", info.usage, info.description)?;
        }
        Ok(())
    }

    async fn map_forward<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.next.clone() else {
            writeln!(out, "you're on the last page")?;
            return Ok(());
        };
        let page = self.client.location_areas(Some(url.as_str())).await?;
        self.show_page(page, out)
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.previous.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };
        let page = self.client.location_areas(Some(url.as_str())).await?;
        self.show_page(page, out)
    }

    fn show_page<W: Write>(&mut self, page: LocationPage, out: &mut W) -> Result<()> {
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        self.next = page.next;
        self.previous = page.previous;
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        let location = self.client.location_area(area).await?;

        writeln!(out, "Exploring {}...", area)?;
        writeln!(out, "Found Pokemon:")?;
        for name in location.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        let pokemon = self.client.pokemon(name).await?;

        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        let roll = roll_pokeball(&mut self.rng, pokemon.base_experience.unwrap_or(0));
        if is_caught(roll, self.catch_threshold) {
            writeln!(out, "{} was caught!", name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.register(name, pokemon);
        } else {
            writeln!(out, "{} escaped!", name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let caught = self
            .pokedex
            .get(name)
            .ok_or_else(|| PokedexError::NotCaught(name.to_string()))?;
        let pokemon = &caught.pokemon;

        writeln!(out, "Name: {}", name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        writeln!(out, "Caught: {}", caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty")?;
            return Ok(());
        }
        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.names() {
            writeln!(out, "  - {}", name)?;
        }
        Ok(())
    }

    fn cache_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let cache = self.client.cache();
        let stats = cache.stats();

        writeln!(out, "Entries: {}", stats.total_entries)?;
        writeln!(out, "Hits: {}", stats.hits)?;
        writeln!(out, "Misses: {}", stats.misses)?;
        writeln!(out, "Reaped: {}", stats.reaped)?;
        writeln!(out, "Hit rate: {:.1}%", stats.hit_rate() * 100.0)?;
        writeln!(out, "Interval: {}s", cache.interval().as_secs())?;
        Ok(())
    }
}

// == Catch Roll ==
/// Rolls in `0..base_experience`; rarer Pokemon have higher base experience
/// and so lower odds. A missing or zero base experience rolls `0`.
pub fn roll_pokeball<R: Rng>(rng: &mut R, base_experience: u32) -> u32 {
    rng.gen_range(0..base_experience.max(1))
}

pub fn is_caught(roll: u32, threshold: u32) -> bool {
    roll <= threshold
}
