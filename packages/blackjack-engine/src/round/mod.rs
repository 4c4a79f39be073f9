use crate::events::{HandOutcome, HandResult, RoundEvent, Seat, TurnOverReason};
use crate::{Card, Error, Hand, Result, Shoe, TableRules};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    DealingInitial,
    PlayerTurn,
    DealerTurn,
    RoundOver,
}

/// One step of the dealer's fixed policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealerAction {
    Hit(Card),
    Stand(u8),
    Bust(u8),
}

/// A player hand together with its turn state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHand {
    hand: Hand,
    turn_over: bool,
}

impl PlayerHand {
    fn new(hand: Hand) -> Self {
        Self {
            hand,
            turn_over: false,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn is_turn_over(&self) -> bool {
        self.turn_over
    }
}

/// One round of play: the dealer against one or more player hands.
///
/// A round is used once. It starts in `DealingInitial`, lets the player act
/// on each hand until every hand's turn is over, plays the dealer one step
/// at a time, and ends in `RoundOver` where nothing can change any more.
/// Cards always come from the `Shoe` passed into each call.
#[derive(Debug, Clone)]
pub struct Round {
    rules: TableRules,
    dealer: Hand,
    hands: Vec<PlayerHand>,
    phase: RoundPhase,
    events: VecDeque<RoundEvent>,
}

impl Round {
    pub fn new(rules: TableRules) -> Self {
        Self {
            rules,
            dealer: Hand::new(),
            hands: vec![PlayerHand::new(Hand::new())],
            phase: RoundPhase::DealingInitial,
            events: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::RoundOver
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn player_hands(&self) -> &[PlayerHand] {
        &self.hands
    }

    pub fn player_hand(&self, index: usize) -> Option<&PlayerHand> {
        self.hands.get(index)
    }

    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }

    /// Hand `index` can take hit, stand or split right now.
    pub fn is_playable(&self, index: usize) -> bool {
        self.phase == RoundPhase::PlayerTurn
            && self.hands.get(index).is_some_and(|h| !h.turn_over)
    }

    /// First hand still waiting for the player, if any.
    pub fn active_hand_index(&self) -> Option<usize> {
        if self.phase != RoundPhase::PlayerTurn {
            return None;
        }
        self.hands.iter().position(|h| !h.turn_over)
    }

    /// Takes every notification emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = RoundEvent> + '_ {
        self.events.drain(..)
    }

    pub(crate) fn push_event(&mut self, event: RoundEvent) {
        self.events.push_back(event);
    }

    /// Deals player, dealer, player, dealer; the dealer's second card face-down.
    pub fn deal_initial_hands(&mut self, shoe: &mut Shoe) -> Result<()> {
        self.expect_phase(RoundPhase::DealingInitial)?;

        for i in 0..2 {
            self.deal_to_player(shoe, 0)?;
            let card = shoe.deal()?;
            let card = if i == 1 { card.face_down() } else { card };
            self.add_dealer_card(card);
        }

        self.phase = RoundPhase::PlayerTurn;
        debug!("initial hands dealt, player turn");
        Ok(())
    }

    pub fn hit(&mut self, shoe: &mut Shoe, index: usize) -> Result<Card> {
        self.ensure_playable(index)?;
        let card = self.deal_to_player(shoe, index)?;
        self.check_bust(index)?;
        Ok(card)
    }

    /// Ends the hand's turn if it is bust. Returns whether the hand is bust.
    /// Calling it on a hand whose turn is already over changes nothing.
    pub fn check_bust(&mut self, index: usize) -> Result<bool> {
        self.expect_phase(RoundPhase::PlayerTurn)?;
        self.check_index(index)?;

        let slot = &self.hands[index];
        let bust = slot.hand.is_bust();
        if bust && !slot.turn_over {
            debug!("hand {index} bust on {}", slot.hand.hard_total());
            self.finish_hand(index, TurnOverReason::Bust);
        }
        Ok(bust)
    }

    pub fn stand(&mut self, index: usize) -> Result<()> {
        self.ensure_playable(index)?;
        self.finish_hand(index, TurnOverReason::Stand);
        Ok(())
    }

    pub fn can_split(&self, index: usize) -> bool {
        if !self.is_playable(index) {
            return false;
        }
        let slot = &self.hands[index];
        if !slot.hand.is_pair() || self.hands.len() >= self.rules.max_hands {
            return false;
        }
        !slot.hand.cards()[0].is_ace() || self.rules.resplit_aces
    }

    /// Splits the pair in hand `index`. The second card starts a new hand
    /// placed right after it, and each of the two hands gets one new card.
    /// Split aces take no further cards, so both hands are done at once.
    ///
    /// Fails with `EmptyShoe` before touching any hand when the shoe cannot
    /// cover both cards.
    pub fn split(&mut self, shoe: &mut Shoe, index: usize) -> Result<()> {
        self.ensure_playable(index)?;
        if !self.can_split(index) {
            return Err(Error::CannotSplit(index));
        }
        if shoe.remaining() < 2 {
            return Err(Error::EmptyShoe);
        }

        let card = self.hands[index]
            .hand
            .take_split_card()
            .ok_or(Error::CannotSplit(index))?;
        let new_index = index + 1;
        self.hands
            .insert(new_index, PlayerHand::new(Hand::from_cards(vec![card])));
        self.push_event(RoundEvent::HandSplit {
            from: index,
            into: new_index,
        });
        debug!("hand {index} split into {index} and {new_index}");

        self.deal_to_player(shoe, index)?;
        self.deal_to_player(shoe, new_index)?;

        if card.is_ace() {
            self.finish_hand(index, TurnOverReason::SplitAces);
            self.finish_hand(new_index, TurnOverReason::SplitAces);
        }
        Ok(())
    }

    /// Dealer policy: draw below 17 and on soft 17, stand on everything else.
    pub fn dealer_should_hit(&self) -> bool {
        if self.dealer.is_bust() {
            return false;
        }
        let total = self.dealer.total();
        total < 17 || (total == 17 && self.dealer.is_soft())
    }

    /// Advances the dealer's turn by one action. The round is over once
    /// this returns `Stand` or `Bust`.
    pub fn dealer_step(&mut self, shoe: &mut Shoe) -> Result<DealerAction> {
        self.expect_phase(RoundPhase::DealerTurn)?;

        if self.dealer.is_bust() {
            let total = self.dealer.total();
            self.finish_round(RoundEvent::DealerBusts { total });
            return Ok(DealerAction::Bust(total));
        }
        if !self.dealer_should_hit() {
            let total = self.dealer.total();
            self.finish_round(RoundEvent::DealerStands { total });
            return Ok(DealerAction::Stand(total));
        }

        let card = shoe.deal()?;
        self.add_dealer_card(card);
        Ok(DealerAction::Hit(card))
    }

    /// Runs the dealer's remaining steps as an iterator. Yields nothing
    /// outside `DealerTurn`, and stops after the first error.
    pub fn play_dealer<'a>(&'a mut self, shoe: &'a mut Shoe) -> DealerPlay<'a> {
        DealerPlay {
            round: self,
            shoe,
            failed: false,
        }
    }

    /// Compares every player hand against the final dealer hand, in hand order.
    pub fn determine_winner(&self) -> Result<Vec<HandResult>> {
        self.expect_phase(RoundPhase::RoundOver)?;

        let dealer_total = self.dealer.total();
        Ok(self
            .hands
            .iter()
            .enumerate()
            .map(|(index, slot)| HandResult {
                index,
                outcome: compare_hands(&slot.hand, &self.dealer),
                player_total: slot.hand.total(),
                dealer_total,
            })
            .collect())
    }

    fn expect_phase(&self, expected: RoundPhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                expected,
                actual: self.phase,
            })
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.hands.len() {
            Ok(())
        } else {
            Err(Error::InvalidHandIndex {
                index,
                count: self.hands.len(),
            })
        }
    }

    fn ensure_playable(&self, index: usize) -> Result<()> {
        self.expect_phase(RoundPhase::PlayerTurn)?;
        self.check_index(index)?;
        if self.hands[index].turn_over {
            return Err(Error::HandAlreadyDone(index));
        }
        Ok(())
    }

    fn deal_to_player(&mut self, shoe: &mut Shoe, index: usize) -> Result<Card> {
        let card = shoe.deal()?;
        self.hands[index].hand.add_card(card);
        debug!("hand {index} dealt {card}");
        self.push_event(RoundEvent::CardDealt {
            seat: Seat::Player(index),
            card,
        });
        Ok(card)
    }

    fn add_dealer_card(&mut self, card: Card) {
        self.dealer.add_card(card);
        if card.is_revealed() {
            debug!("dealer dealt {card}");
            self.push_event(RoundEvent::CardDealt {
                seat: Seat::Dealer,
                card,
            });
        } else {
            debug!("dealer dealt a face-down card");
            self.push_event(RoundEvent::HoleCardDealt);
        }
    }

    fn finish_hand(&mut self, index: usize, reason: TurnOverReason) {
        self.hands[index].turn_over = true;
        self.push_event(RoundEvent::TurnOver {
            hand: index,
            reason,
        });

        if self.hands.iter().all(|h| h.turn_over) {
            self.begin_dealer_turn();
        }
    }

    fn begin_dealer_turn(&mut self) {
        self.phase = RoundPhase::DealerTurn;

        let hole_card = self.dealer.cards().iter().find(|c| !c.is_revealed()).copied();
        self.dealer.reveal_all();
        if let Some(mut hole_card) = hole_card {
            hole_card.reveal();
            self.push_event(RoundEvent::DealerRevealed { hole_card });
        }
        debug!("dealer turn, dealer shows {}", self.dealer.total());
    }

    fn finish_round(&mut self, dealer_event: RoundEvent) {
        self.phase = RoundPhase::RoundOver;
        self.push_event(dealer_event);
        self.push_event(RoundEvent::RoundOver);

        let results = self.determine_winner().unwrap_or_default();
        for result in results {
            info!(
                "hand {}: {:?} ({} vs dealer {})",
                result.index, result.outcome, result.player_total, result.dealer_total
            );
            self.push_event(RoundEvent::Outcome(result));
        }
    }
}

fn compare_hands(player: &Hand, dealer: &Hand) -> HandOutcome {
    match (player.is_bust(), dealer.is_bust()) {
        (true, true) => HandOutcome::Push,
        (true, false) => HandOutcome::Loss,
        (false, true) => HandOutcome::Win,
        (false, false) => match player.total().cmp(&dealer.total()) {
            Ordering::Greater => HandOutcome::Win,
            Ordering::Less => HandOutcome::Loss,
            Ordering::Equal => HandOutcome::Push,
        },
    }
}

/// Iterator over the dealer's remaining actions, see [`Round::play_dealer`].
pub struct DealerPlay<'a> {
    round: &'a mut Round,
    shoe: &'a mut Shoe,
    failed: bool,
}

impl Iterator for DealerPlay<'_> {
    type Item = Result<DealerAction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.round.phase != RoundPhase::DealerTurn {
            return None;
        }
        let step = self.round.dealer_step(self.shoe);
        self.failed = step.is_err();
        Some(step)
    }
}
