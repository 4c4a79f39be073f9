use blackjack_engine::TableRules;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Default,
    SingleDeck,
}

#[derive(Parser, Debug)]
#[command(name = "blackjack", about = "Single-player blackjack at the terminal")]
pub struct Cli {
    /// Starting rule set, before any overrides below
    #[arg(long, value_enum, env = "BLACKJACK_PRESET", default_value = "default")]
    pub preset: Preset,

    /// JSON file holding a complete rule set (replaces the preset)
    #[arg(long, env = "BLACKJACK_RULES")]
    pub rules: Option<PathBuf>,

    /// Number of decks in the shoe
    #[arg(long, env = "BLACKJACK_DECKS")]
    pub decks: Option<u8>,

    /// Fraction of the shoe dealt before it is replaced
    #[arg(long, env = "BLACKJACK_PENETRATION")]
    pub penetration: Option<f64>,

    /// Most hands a player can hold after splitting
    #[arg(long, env = "BLACKJACK_MAX_HANDS")]
    pub max_hands: Option<usize>,

    /// Allow splitting a pair of aces
    #[arg(long, env = "BLACKJACK_RESPLIT_ACES", action = clap::ArgAction::Set)]
    pub resplit_aces: Option<bool>,

    /// Shuffle seed, for replaying a session
    #[arg(long, env = "BLACKJACK_SEED")]
    pub seed: Option<u64>,

    /// Pause between dealer cards in milliseconds
    #[arg(long, env = "BLACKJACK_DEALER_DELAY_MS", default_value_t = 600)]
    pub dealer_delay_ms: u64,

    /// Print events as JSON lines
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read rules file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse rules file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Rules(#[from] blackjack_engine::Error),
}

impl Cli {
    pub fn dealer_delay(&self) -> Duration {
        Duration::from_millis(self.dealer_delay_ms)
    }

    /// Rules file or preset first, then individual overrides.
    pub fn table_rules(&self) -> Result<TableRules, ConfigError> {
        let mut rules = match &self.rules {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                parse_rules(&text).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            None => match self.preset {
                Preset::Default => TableRules::default(),
                Preset::SingleDeck => TableRules::single_deck(),
            },
        };

        if let Some(decks) = self.decks {
            rules.num_decks = decks;
        }
        if let Some(penetration) = self.penetration {
            rules.penetration = penetration;
        }
        if let Some(max_hands) = self.max_hands {
            rules.max_hands = max_hands;
        }
        if let Some(resplit) = self.resplit_aces {
            rules.resplit_aces = resplit;
        }

        rules.validate()?;
        Ok(rules)
    }
}

fn parse_rules(text: &str) -> Result<TableRules, serde_json::Error> {
    serde_json::from_str(text)
}
