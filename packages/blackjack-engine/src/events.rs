//! Notifications a round emits for the presentation layer.
//!
//! Events queue up inside the round in the order things happened at the
//! table. A front end drains them after each action (or on each timer tick
//! during the dealer's turn) and renders them; they are the whole contract
//! between the controller and whatever draws the table.

use crate::Card;
use serde::{Deserialize, Serialize};

/// Where a card was dealt to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Player(usize),
    Dealer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOverReason {
    Bust,
    Stand,
    SplitAces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandOutcome {
    Win,
    Loss,
    /// Draw; the bet would be returned
    Push,
}

/// Result of one player hand against the dealer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub index: usize,
    pub outcome: HandOutcome,
    pub player_total: u8,
    pub dealer_total: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    ShoeReplaced { num_decks: u8 },
    /// A face-up card
    CardDealt { seat: Seat, card: Card },
    /// The dealer's face-down card; its rank and suit arrive with `DealerRevealed`
    HoleCardDealt,
    HandSplit { from: usize, into: usize },
    TurnOver { hand: usize, reason: TurnOverReason },
    DealerRevealed { hole_card: Card },
    DealerStands { total: u8 },
    DealerBusts { total: u8 },
    RoundOver,
    Outcome(HandResult),
}
