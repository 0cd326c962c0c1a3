//! Command table and parsing

use crate::error::{PokedexError, Result};

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
    CacheStats,
}

/// Name and help text of a command, in the order `help` lists them.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "help",
        usage: "help",
        description: "Displays a help message",
    },
    CommandInfo {
        name: "map",
        usage: "map",
        description: "Displays the next 20 location areas",
    },
    CommandInfo {
        name: "mapb",
        usage: "mapb",
        description: "Displays the previous 20 location areas",
    },
    CommandInfo {
        name: "explore",
        usage: "explore <area>",
        description: "Lists the Pokemon found in a location area",
    },
    CommandInfo {
        name: "catch",
        usage: "catch <pokemon>",
        description: "Throws a Pokeball at a Pokemon",
    },
    CommandInfo {
        name: "inspect",
        usage: "inspect <pokemon>",
        description: "Shows name, height, weight, stats and types of a caught Pokemon",
    },
    CommandInfo {
        name: "pokedex",
        usage: "pokedex",
        description: "Lists the Pokemon you have caught",
    },
    CommandInfo {
        name: "cache",
        usage: "cache",
        description: "Shows response cache statistics",
    },
    CommandInfo {
        name: "exit",
        usage: "exit",
        description: "Exits the Pokedex",
    },
];

impl Command {
    /// Parses cleaned input words into a command.
    ///
    /// Words past the first argument are ignored.
    pub fn parse(words: &[String]) -> Result<Self> {
        let Some((name, args)) = words.split_first() else {
            return Err(PokedexError::UnknownCommand(String::new()));
        };
        let arg = args.first().cloned();

        match name.as_str() {
            "help" => Ok(Command::Help),
            "exit" => Ok(Command::Exit),
            "map" => Ok(Command::Map),
            "mapb" => Ok(Command::MapBack),
            "pokedex" => Ok(Command::Pokedex),
            "cache" => Ok(Command::CacheStats),
            "explore" => arg.map(Command::Explore).ok_or(PokedexError::MissingArgument {
                command: "explore",
                argument: "area",
            }),
            "catch" => arg.map(Command::Catch).ok_or(PokedexError::MissingArgument {
                command: "catch",
                argument: "pokemon",
            }),
            "inspect" => arg.map(Command::Inspect).ok_or(PokedexError::MissingArgument {
                command: "inspect",
                argument: "pokemon",
            }),
            other => Err(PokedexError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse(&words("help")).unwrap(), Command::Help);
        assert_eq!(Command::parse(&words("map")).unwrap(), Command::Map);
        assert_eq!(Command::parse(&words("mapb")).unwrap(), Command::MapBack);
        assert_eq!(Command::parse(&words("pokedex")).unwrap(), Command::Pokedex);
        assert_eq!(Command::parse(&words("cache")).unwrap(), Command::CacheStats);
        assert_eq!(Command::parse(&words("exit")).unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_with_argument() {
        assert_eq!(
            Command::parse(&words("catch pikachu extra")).unwrap(),
            Command::Catch("pikachu".to_string())
        );
        assert_eq!(
            Command::parse(&words("explore pastoria-city-area")).unwrap(),
            Command::Explore("pastoria-city-area".to_string())
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        let result = Command::parse(&words("inspect"));
        assert!(matches!(
            result,
            Err(PokedexError::MissingArgument {
                command: "inspect",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_unknown() {
        let result = Command::parse(&words("fly"));
        assert!(matches!(result, Err(PokedexError::UnknownCommand(name)) if name == "fly"));
    }

    #[test]
    fn test_every_command_listed_once() {
        for info in COMMANDS {
            let count = COMMANDS.iter().filter(|c| c.name == info.name).count();
            assert_eq!(count, 1, "{} listed more than once", info.name);
            assert!(info.usage.starts_with(info.name));
        }
    }
}
