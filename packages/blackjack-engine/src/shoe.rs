use crate::{Card, Error, Rank, Result, Suit};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

/// The shuffled multi-deck pool cards are dealt from.
///
/// The shoe only reports when it has been dealt past its penetration; it
/// never reshuffles itself, so cards already on the table stay valid. The
/// owner replaces the whole shoe between rounds.
#[derive(Debug, Clone)]
pub struct Shoe {
    /// Undealt cards, top of the shoe at the end.
    cards: Vec<Card>,
    size: usize,
    dealt: usize,
    penetration: f64,
    needs_reshuffle: bool,
}

impl Shoe {
    /// Builds `num_decks` full decks and permutes them with `rng`.
    pub fn new<R: Rng + ?Sized>(num_decks: u8, penetration: f64, rng: &mut R) -> Self {
        let mut cards = Vec::with_capacity(num_decks as usize * 52);
        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        cards.shuffle(rng);
        debug!("new shoe: {num_decks} decks, {} cards", cards.len());
        Self::from_stack(cards, penetration)
    }

    pub fn from_seed(num_decks: u8, penetration: f64, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::new(num_decks, penetration, &mut rng)
    }

    /// A shoe that deals exactly `cards`, first element first.
    pub fn stacked(mut cards: Vec<Card>, penetration: f64) -> Self {
        cards.reverse();
        Self::from_stack(cards, penetration)
    }

    fn from_stack(cards: Vec<Card>, penetration: f64) -> Self {
        Self {
            size: cards.len(),
            cards,
            dealt: 0,
            penetration,
            needs_reshuffle: false,
        }
    }

    /// Removes and returns the top card.
    pub fn deal(&mut self) -> Result<Card> {
        let card = self.cards.pop().ok_or(Error::EmptyShoe)?;
        self.dealt += 1;
        if !self.needs_reshuffle && self.dealt as f64 >= self.penetration * self.size as f64 {
            debug!("shoe penetration reached after {} cards", self.dealt);
            self.needs_reshuffle = true;
        }
        Ok(card)
    }

    pub fn should_reshuffle(&self) -> bool {
        self.needs_reshuffle
    }

    pub fn dealt_count(&self) -> usize {
        self.dealt
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Number of cards the shoe was built with.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn penetration(&self) -> f64 {
        self.penetration
    }
}
