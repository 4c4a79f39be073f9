use blackjack_engine::{
    Card, DealerAction, Hand, HandOutcome, Rank, RoundEvent, RoundPhase, Seat, Session, Shoe,
    Suit, TableRules,
};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Scenario {
    PlayerBust,
    DealerBust,
    BothBust,
    PlayerHigher,
    PlayerLower,
    Tie,
}

fn expected_outcome(player: &Hand, dealer: &Hand) -> (Scenario, HandOutcome) {
    match (player.is_bust(), dealer.is_bust()) {
        (true, true) => (Scenario::BothBust, HandOutcome::Push),
        (true, false) => (Scenario::PlayerBust, HandOutcome::Loss),
        (false, true) => (Scenario::DealerBust, HandOutcome::Win),
        (false, false) if player.total() > dealer.total() => {
            (Scenario::PlayerHigher, HandOutcome::Win)
        }
        (false, false) if player.total() < dealer.total() => {
            (Scenario::PlayerLower, HandOutcome::Loss)
        }
        (false, false) => (Scenario::Tie, HandOutcome::Push),
    }
}

#[test]
fn test_seeded_rounds_match_manual_comparison() {
    let mut seen = HashSet::new();

    for seed in 0..400u64 {
        let mut session = Session::with_seed(TableRules::single_deck(), seed).unwrap();
        session.start_round().unwrap();

        // Vary how far the player draws so every kind of finish shows up
        let stop_at = 12 + (seed % 7) as u8;
        while session
            .round()
            .is_some_and(|r| r.is_playable(0) && r.player_hands()[0].hand().total() < stop_at)
        {
            session.hit(0).unwrap();
        }
        if session.round().unwrap().is_playable(0) {
            session.stand(0).unwrap();
        }
        assert_eq!(session.round().unwrap().phase(), RoundPhase::DealerTurn);

        let mut steps = 0;
        loop {
            match session.dealer_step().unwrap() {
                DealerAction::Hit(_) => steps += 1,
                DealerAction::Stand(total) => {
                    assert!(total >= 17);
                    break;
                }
                DealerAction::Bust(total) => {
                    assert!(total > 21);
                    break;
                }
            }
            assert!(steps < 12, "dealer drew too many cards");
        }

        let round = session.round().unwrap();
        let dealer = round.dealer_hand();
        assert!(dealer.is_bust() || dealer.total() > 17 || !dealer.is_soft());
        assert!(dealer.cards().iter().all(Card::is_revealed));

        let results = session.determine_winner().unwrap();
        assert_eq!(results.len(), 1);
        let player = round.player_hands()[0].hand();
        let (scenario, expected) = expected_outcome(player, dealer);
        assert_eq!(results[0].outcome, expected, "seed {seed}");
        assert_eq!(results[0].player_total, player.total());
        assert_eq!(results[0].dealer_total, dealer.total());
        seen.insert(scenario);
    }

    assert_eq!(seen.len(), 6, "only saw {seen:?}");
}

/// Rebuilds the table from notifications alone, the way a front end would.
#[derive(Default)]
struct Table {
    /// `None` until the hole card is revealed
    dealer: Vec<Option<Card>>,
    hands: Vec<Vec<Card>>,
    outcomes: Vec<HandOutcome>,
}

impl Table {
    fn apply(&mut self, event: RoundEvent) {
        match event {
            RoundEvent::CardDealt {
                seat: Seat::Dealer,
                card,
            } => self.dealer.push(Some(card)),
            RoundEvent::HoleCardDealt => self.dealer.push(None),
            RoundEvent::CardDealt {
                seat: Seat::Player(i),
                card,
            } => {
                if self.hands.len() <= i {
                    self.hands.resize(i + 1, Vec::new());
                }
                self.hands[i].push(card);
            }
            RoundEvent::HandSplit { from, into } => {
                let moved = self.hands[from].pop().unwrap();
                self.hands.insert(into, vec![moved]);
            }
            RoundEvent::DealerRevealed { hole_card } => {
                let hidden = self.dealer.iter_mut().find(|c| c.is_none()).unwrap();
                *hidden = Some(hole_card);
            }
            RoundEvent::Outcome(result) => self.outcomes.push(result.outcome),
            _ => {}
        }
    }
}

#[test]
fn test_events_reconstruct_the_table() {
    let cards = vec![
        Card::new(Rank::Eight, Suit::Hearts),
        Card::new(Rank::Six, Suit::Spades),
        Card::new(Rank::Eight, Suit::Clubs),
        Card::new(Rank::Ten, Suit::Diamonds),
        Card::new(Rank::Eight, Suit::Spades),
        Card::new(Rank::Two, Suit::Hearts),
        Card::new(Rank::Three, Suit::Clubs),
        Card::new(Rank::Ace, Suit::Diamonds),
        Card::new(Rank::King, Suit::Hearts),
        Card::new(Rank::Nine, Suit::Clubs),
    ];
    let shoe = Shoe::stacked(cards, 0.75);
    let mut session = Session::with_shoe(TableRules::default(), shoe, 11).unwrap();
    let mut table = Table::default();

    session.start_round().unwrap();
    session.split(0).unwrap();
    session.split(0).unwrap();
    for event in session.drain_events() {
        table.apply(event);
    }
    assert_eq!(table.hands.len(), 3);
    assert_eq!(table.dealer[1], None);

    session.hit(0).unwrap();
    session.stand(0).unwrap();
    session.stand(1).unwrap();
    session.stand(2).unwrap();
    while session.round().unwrap().phase() == RoundPhase::DealerTurn {
        session.dealer_step().unwrap();
    }
    for event in session.drain_events() {
        table.apply(event);
    }

    let round = session.round().unwrap();
    let dealer: Vec<Card> = table.dealer.iter().flatten().copied().collect();
    assert_eq!(table.dealer.len(), dealer.len());
    assert_eq!(dealer, round.dealer_hand().cards());
    for (rebuilt, actual) in table.hands.iter().zip(round.player_hands()) {
        assert_eq!(rebuilt.as_slice(), actual.hand().cards());
    }

    // Hands: [8, 3, K] = 21, [8, A] = 19, [8, 2] = 10 against a dealer bust on 25
    assert_eq!(
        table.outcomes,
        vec![HandOutcome::Win, HandOutcome::Win, HandOutcome::Win]
    );
}

#[test]
fn test_shoe_is_replaced_only_between_rounds() {
    let rules = TableRules {
        num_decks: 2,
        ..TableRules::default()
    };
    let mut session = Session::with_seed(rules, 2024).unwrap();
    let mut replacements = 0;

    for _ in 0..60 {
        let reshuffle_due = session.shoe().should_reshuffle();
        session.start_round().unwrap();
        let replaced = session
            .drain_events()
            .iter()
            .any(|e| matches!(e, RoundEvent::ShoeReplaced { .. }));
        assert_eq!(replaced, reshuffle_due);
        if replaced {
            replacements += 1;
            assert_eq!(session.shoe().dealt_count(), 4);
        }

        let dealt_at_start = session.shoe().dealt_count();
        session.stand(0).unwrap();
        while !session.round().unwrap().is_over() {
            session.dealer_step().unwrap();
        }
        // Crossing the penetration mid-round never touches the shoe in play
        assert!(session.shoe().dealt_count() >= dealt_at_start);
    }

    assert!(replacements >= 2);
    assert_eq!(session.rounds_played(), 59);
}
