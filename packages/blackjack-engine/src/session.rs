use crate::events::{HandResult, RoundEvent};
use crate::round::{DealerAction, Round, RoundPhase};
use crate::{Card, Error, Result, Shoe, TableRules};
use log::info;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

/// A player's seat at the table across many rounds.
///
/// The session owns the shoe and the round in progress. A front end holds
/// one session and routes every player action through it.
#[derive(Debug)]
pub struct Session {
    rules: TableRules,
    shoe: Shoe,
    rng: ChaCha8Rng,
    round: Option<Round>,
    rounds_played: u64,
}

impl Session {
    pub fn new(rules: TableRules) -> Result<Self> {
        Self::with_rng(rules, ChaCha8Rng::seed_from_u64(rand::random()))
    }

    pub fn with_seed(rules: TableRules, seed: u64) -> Result<Self> {
        Self::with_rng(rules, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Starts from a prepared shoe. Later shoes come from `seed`.
    pub fn with_shoe(rules: TableRules, shoe: Shoe, seed: u64) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            rules,
            shoe,
            rng: ChaCha8Rng::seed_from_u64(seed),
            round: None,
            rounds_played: 0,
        })
    }

    fn with_rng(rules: TableRules, mut rng: ChaCha8Rng) -> Result<Self> {
        rules.validate()?;
        let shoe = Shoe::new(rules.num_decks, rules.penetration, &mut rng);
        Ok(Self {
            rules,
            shoe,
            rng,
            round: None,
            rounds_played: 0,
        })
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// Discards the finished round, replaces the shoe if it was dealt past
    /// its penetration, and deals a fresh round. A round whose initial deal
    /// failed may also be replaced.
    pub fn start_round(&mut self) -> Result<&Round> {
        if let Some(round) = &self.round {
            match round.phase() {
                RoundPhase::RoundOver => self.rounds_played += 1,
                RoundPhase::DealingInitial => {}
                actual => {
                    return Err(Error::InvalidState {
                        expected: RoundPhase::RoundOver,
                        actual,
                    })
                }
            }
        }

        let mut round = Round::new(self.rules);
        if self.shoe.should_reshuffle() {
            info!(
                "shoe dealt {} of {} cards, replacing",
                self.shoe.dealt_count(),
                self.shoe.len()
            );
            self.shoe = Shoe::new(self.rules.num_decks, self.rules.penetration, &mut self.rng);
            round.push_event(RoundEvent::ShoeReplaced {
                num_decks: self.rules.num_decks,
            });
        }

        // Keep the round even if the deal fails so its phase stays inspectable
        let dealt = round.deal_initial_hands(&mut self.shoe);
        let round = self.round.insert(round);
        dealt?;
        Ok(round)
    }

    fn current(&mut self) -> Result<(&mut Round, &mut Shoe)> {
        match self.round.as_mut() {
            Some(round) => Ok((round, &mut self.shoe)),
            None => Err(Error::NoRound),
        }
    }

    pub fn hit(&mut self, index: usize) -> Result<Card> {
        let (round, shoe) = self.current()?;
        round.hit(shoe, index)
    }

    pub fn stand(&mut self, index: usize) -> Result<()> {
        self.current()?.0.stand(index)
    }

    pub fn split(&mut self, index: usize) -> Result<()> {
        let (round, shoe) = self.current()?;
        round.split(shoe, index)
    }

    pub fn check_bust(&mut self, index: usize) -> Result<bool> {
        self.current()?.0.check_bust(index)
    }

    pub fn can_split(&self, index: usize) -> bool {
        self.round.as_ref().is_some_and(|r| r.can_split(index))
    }

    pub fn dealer_step(&mut self) -> Result<DealerAction> {
        let (round, shoe) = self.current()?;
        round.dealer_step(shoe)
    }

    pub fn determine_winner(&self) -> Result<Vec<HandResult>> {
        self.round.as_ref().ok_or(Error::NoRound)?.determine_winner()
    }

    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        self.round
            .as_mut()
            .map(|r| r.drain_events().collect())
            .unwrap_or_default()
    }
}
