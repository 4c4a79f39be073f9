use crate::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard total of a run of cards: every Ace counts 1. Saturates at
/// `u8::MAX`, which is bust either way.
pub fn hard_total(cards: &[Card]) -> u8 {
    cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() })
        .fold(0u8, u8::saturating_add)
}

/// Soft total: the first Ace counts 11, later ones 1. Falls back to the
/// hard total when counting the Ace high would bust.
pub fn soft_total(cards: &[Card]) -> u8 {
    let hard = hard_total(cards);
    if cards.iter().any(Card::is_ace) && hard <= 11 {
        hard + 10
    } else {
        hard
    }
}

/// Cards held by the dealer or by one player hand. All totals are derived
/// on demand from the card list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn hard_total(&self) -> u8 {
        hard_total(&self.cards)
    }

    pub fn soft_total(&self) -> u8 {
        soft_total(&self.cards)
    }

    /// Best total: the soft total if it stands at 21 or less, else the hard total.
    pub fn total(&self) -> u8 {
        let soft = self.soft_total();
        if soft <= 21 {
            soft
        } else {
            self.hard_total()
        }
    }

    pub fn is_soft(&self) -> bool {
        let soft = self.soft_total();
        soft != self.hard_total() && soft <= 21
    }

    pub fn is_bust(&self) -> bool {
        self.hard_total() > 21
    }

    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.total() == 21
    }

    /// Total of the face-up cards only, i.e. what the table can see.
    pub fn visible_total(&self) -> u8 {
        let visible: Vec<Card> = self
            .cards
            .iter()
            .copied()
            .filter(Card::is_revealed)
            .collect();
        soft_total(&visible)
    }

    pub fn reveal_all(&mut self) {
        self.cards.iter_mut().for_each(Card::reveal);
    }

    /// Empties the hand, handing back the discards face-up so no hidden
    /// state carries into the next round.
    pub fn reset(&mut self) -> Vec<Card> {
        self.reveal_all();
        std::mem::take(&mut self.cards)
    }

    /// Removes and returns the second card of a pair.
    pub(crate) fn take_split_card(&mut self) -> Option<Card> {
        if self.is_pair() {
            self.cards.pop()
        } else {
            None
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    fn hand(ranks: &[Rank]) -> Hand {
        Hand::from_cards(ranks.iter().map(|&r| Card::new(r, Suit::Spades)).collect())
    }

    #[test]
    fn test_simple_totals() {
        let h = hand(&[Rank::Two, Rank::Three]);
        assert_eq!(h.hard_total(), 5);
        assert_eq!(h.soft_total(), 5);
        assert_eq!(h.total(), 5);
        assert!(!h.is_soft());
    }

    #[test]
    fn test_face_cards() {
        let h = hand(&[Rank::King, Rank::Queen]);
        assert_eq!(h.total(), 20);
        assert!(!h.is_bust());
    }

    #[test]
    fn test_pair_of_aces() {
        let h = hand(&[Rank::Ace, Rank::Ace]);
        assert_eq!(h.hard_total(), 2);
        assert_eq!(h.soft_total(), 12);
        assert!(h.is_soft());
        assert_eq!(h.total(), 12);
    }

    #[test]
    fn test_king_ace_is_blackjack() {
        let h = hand(&[Rank::King, Rank::Ace]);
        assert_eq!(h.hard_total(), 11);
        assert_eq!(h.soft_total(), 21);
        assert_eq!(h.total(), 21);
        assert!(h.is_soft());
        assert!(h.is_blackjack());
    }

    #[test]
    fn test_bust_hand() {
        let h = hand(&[Rank::Ten, Rank::Nine, Rank::Five]);
        assert_eq!(h.hard_total(), 24);
        assert!(h.is_bust());
        assert_eq!(h.total(), 24);
    }

    #[test]
    fn test_soft_hand_turns_hard() {
        let h = hand(&[Rank::Ace, Rank::Six, Rank::Nine]);
        assert_eq!(h.hard_total(), 16);
        assert_eq!(h.soft_total(), 16);
        assert_eq!(h.total(), 16);
        assert!(!h.is_soft());
    }

    #[test]
    fn test_two_aces_and_nine() {
        let h = hand(&[Rank::Ace, Rank::Ace, Rank::Nine]);
        assert_eq!(h.total(), 21);
        assert!(h.is_soft());
        assert!(!h.is_blackjack());
    }

    #[test]
    fn test_total_invariants_over_many_hands() {
        for a in Rank::ALL {
            for b in Rank::ALL {
                for c in Rank::ALL {
                    let h = hand(&[a, b, c]);
                    if h.is_bust() {
                        assert_eq!(h.total(), h.hard_total());
                    } else {
                        assert!(h.total() <= 21);
                    }
                }
            }
        }
    }

    #[test]
    fn test_is_pair() {
        assert!(hand(&[Rank::Eight, Rank::Eight]).is_pair());
        // Same value is not enough
        assert!(!hand(&[Rank::King, Rank::Queen]).is_pair());
        assert!(!hand(&[Rank::Eight, Rank::Eight, Rank::Two]).is_pair());
        assert!(!hand(&[Rank::Eight]).is_pair());
    }

    #[test]
    fn test_visible_total_skips_hole_card() {
        let mut h = Hand::new();
        h.add_card(Card::new(Rank::Ace, Suit::Hearts));
        h.add_card(Card::new(Rank::King, Suit::Clubs).face_down());
        assert_eq!(h.visible_total(), 11);
        assert_eq!(h.total(), 21);

        h.reveal_all();
        assert_eq!(h.visible_total(), 21);
    }

    #[test]
    fn test_reset_returns_revealed_cards() {
        let mut h = Hand::new();
        h.add_card(Card::new(Rank::Five, Suit::Hearts));
        h.add_card(Card::new(Rank::Nine, Suit::Clubs).face_down());

        let discards = h.reset();
        assert!(h.is_empty());
        assert_eq!(discards.len(), 2);
        assert!(discards.iter().all(Card::is_revealed));
    }

    #[test]
    fn test_display_lists_cards() {
        let mut h = Hand::new();
        h.add_card(Card::new(Rank::Eight, Suit::Hearts));
        h.add_card(Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(h.to_string(), "8 of Hearts, Ace of Clubs");
    }

    #[test]
    fn test_oversized_hand_saturates() {
        let cards: Vec<Card> = std::iter::repeat(Card::new(Rank::King, Suit::Spades))
            .take(30)
            .chain(std::iter::once(Card::new(Rank::Ace, Suit::Spades)))
            .collect();
        let h = Hand::from_cards(cards);
        assert_eq!(h.hard_total(), u8::MAX);
        assert_eq!(h.soft_total(), u8::MAX);
        assert_eq!(h.total(), u8::MAX);
        assert!(h.is_bust());
        assert!(!h.is_soft());
    }
}
