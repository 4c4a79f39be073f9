use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configurable table rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRules {
    /// Number of 52-card decks in the shoe
    pub num_decks: u8,

    /// Fraction of the shoe dealt before a reshuffle is scheduled
    pub penetration: f64,

    /// Maximum number of player hands a round can grow to through splits
    pub max_hands: usize,

    /// A pair of aces may be split
    pub resplit_aces: bool,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            num_decks: 6,
            penetration: 0.75,
            max_hands: 4,
            resplit_aces: false,
        }
    }
}

impl TableRules {
    /// Single deck, one split at most
    pub fn single_deck() -> Self {
        Self {
            num_decks: 1,
            max_hands: 2,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_decks == 0 {
            return Err(Error::InvalidRules("shoe needs at least one deck".into()));
        }
        if !(self.penetration > 0.0 && self.penetration <= 1.0) {
            return Err(Error::InvalidRules(format!(
                "penetration must be in (0, 1], got {}",
                self.penetration
            )));
        }
        if self.max_hands == 0 {
            return Err(Error::InvalidRules("max_hands must be at least 1".into()));
        }
        Ok(())
    }
}
