use blackjack_engine::{
    Hand, HandOutcome, Round, RoundEvent, RoundPhase, Seat, TurnOverReason,
};

/// Score line shown under a hand
pub fn score_text(hand: &Hand) -> String {
    if hand.is_bust() {
        format!("Bust! Score: {}", hand.hard_total())
    } else if hand.is_soft() {
        format!("Score: {} (Soft)", hand.soft_total())
    } else {
        format!("Score: {}", hand.hard_total())
    }
}

fn cards_text(hand: &Hand) -> String {
    hand.cards()
        .iter()
        .map(|c| {
            if c.is_revealed() {
                c.short_name()
            } else {
                "??".to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn describe(event: &RoundEvent) -> String {
    match event {
        RoundEvent::ShoeReplaced { num_decks } => {
            format!("Shuffling a fresh shoe of {num_decks} decks.")
        }
        RoundEvent::CardDealt {
            seat: Seat::Player(i),
            card,
        } => format!("Hand {} draws {card}.", i + 1),
        RoundEvent::CardDealt {
            seat: Seat::Dealer,
            card,
        } => format!("Dealer draws {card}."),
        RoundEvent::HoleCardDealt => "Dealer draws a card face down.".to_string(),
        RoundEvent::HandSplit { from, into } => {
            format!("Hand {} splits into hands {} and {}.", from + 1, from + 1, into + 1)
        }
        RoundEvent::TurnOver { hand, reason } => match reason {
            TurnOverReason::Bust => format!("Hand {} busts!", hand + 1),
            TurnOverReason::Stand => format!("Hand {} stands.", hand + 1),
            TurnOverReason::SplitAces => format!("Hand {} is done (split aces).", hand + 1),
        },
        RoundEvent::DealerRevealed { hole_card } => format!("Dealer turns over {hole_card}."),
        RoundEvent::DealerStands { total } => format!("Dealer stands on {total}."),
        RoundEvent::DealerBusts { total } => format!("Dealer busts with {total}!"),
        RoundEvent::RoundOver => "Round over.".to_string(),
        RoundEvent::Outcome(result) => {
            let verdict = match result.outcome {
                HandOutcome::Win => "wins",
                HandOutcome::Loss => "loses",
                HandOutcome::Push => "pushes",
            };
            format!(
                "Hand {} {verdict} ({} against dealer {}).",
                result.index + 1,
                result.player_total,
                result.dealer_total
            )
        }
    }
}

/// The dealer's row and one row per player hand.
pub fn table_lines(round: &Round) -> Vec<String> {
    let dealer = round.dealer_hand();
    let dealer_score = if dealer.cards().iter().all(|c| c.is_revealed()) {
        score_text(dealer)
    } else {
        format!("Showing: {}", dealer.visible_total())
    };

    let mut lines = vec![format!("Dealer  {:<24} {dealer_score}", cards_text(dealer))];
    let active = round.active_hand_index();
    for (i, slot) in round.player_hands().iter().enumerate() {
        let marker = if active == Some(i) { ">" } else { " " };
        lines.push(format!(
            "{marker}Hand {:<2} {:<24} {}",
            i + 1,
            cards_text(slot.hand()),
            score_text(slot.hand())
        ));
    }
    lines
}

/// Actions on offer; split only appears when the active hand can split.
pub fn prompt_text(round: &Round) -> String {
    match round.phase() {
        RoundPhase::PlayerTurn => {
            let Some(active) = round.active_hand_index() else {
                return "> ".to_string();
            };
            let mut actions = vec!["[h]it", "[s]tand"];
            if round.can_split(active) {
                actions.push("s[p]lit");
            }
            format!("Hand {}: {} > ", active + 1, actions.join(" "))
        }
        RoundPhase::RoundOver => "[n]ew round [q]uit > ".to_string(),
        RoundPhase::DealingInitial | RoundPhase::DealerTurn => "> ".to_string(),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    json: bool,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn events(&self, events: impl IntoIterator<Item = RoundEvent>) {
        for event in events {
            if self.json {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{line}"),
                    Err(e) => log::error!("cannot encode {event:?}: {e}"),
                }
            } else {
                println!("{}", describe(&event));
            }
        }
    }

    pub fn table(&self, round: &Round) {
        if self.json {
            return;
        }
        println!();
        for line in table_lines(round) {
            println!("{line}");
        }
    }

    pub fn prompt(&self, round: Option<&Round>) {
        if self.json {
            return;
        }
        use std::io::Write;
        let text = round.map(prompt_text).unwrap_or_else(|| "> ".to_string());
        print!("{text}");
        let _ = std::io::stdout().flush();
    }

    pub fn message(&self, text: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "message": text }));
        } else {
            println!("{text}");
        }
    }

    pub fn error(&self, error: &dyn std::error::Error) {
        if self.json {
            println!("{}", serde_json::json!({ "error": error.to_string() }));
        } else {
            println!("Cannot do that: {error}");
        }
    }
}
