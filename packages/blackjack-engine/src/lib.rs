mod card;
mod error;
pub mod events;
mod hand;
mod round;
mod rules;
mod session;
mod shoe;

pub use card::{Card, Rank, Suit};
pub use error::{Error, Result};
pub use events::{HandOutcome, HandResult, RoundEvent, Seat, TurnOverReason};
pub use hand::{hard_total, soft_total, Hand};
pub use round::{DealerAction, DealerPlay, PlayerHand, Round, RoundPhase};
pub use rules::TableRules;
pub use session::Session;
pub use shoe::Shoe;
