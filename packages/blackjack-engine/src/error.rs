use crate::RoundPhase;
use thiserror::Error;

/// Sequencing errors. Each one means the caller asked for something the
/// current state forbids; none of them are retried internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("shoe is empty")]
    EmptyShoe,
    #[error("operation requires phase {expected:?}, round is in {actual:?}")]
    InvalidState {
        expected: RoundPhase,
        actual: RoundPhase,
    },
    #[error("hand index {index} out of range ({count} hands)")]
    InvalidHandIndex { index: usize, count: usize },
    #[error("hand {0} has already finished its turn")]
    HandAlreadyDone(usize),
    #[error("hand {0} cannot be split")]
    CannotSplit(usize),
    #[error("no round in progress")]
    NoRound,
    #[error("invalid table rules: {0}")]
    InvalidRules(String),
}

pub type Result<T> = std::result::Result<T, Error>;
