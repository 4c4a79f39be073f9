mod command;
mod config;
mod render;

use blackjack_engine::{Error, RoundPhase, Session};
use clap::Parser;
use command::Command;
use config::Cli;
use render::Renderer;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), BoxErr> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let rules = cli.table_rules()?;
    let mut session = match cli.seed {
        Some(seed) => Session::with_seed(rules, seed)?,
        None => Session::new(rules)?,
    };
    log::info!(
        "table: {} decks, penetration {}, up to {} hands",
        rules.num_decks,
        rules.penetration,
        rules.max_hands
    );

    let renderer = Renderer::new(cli.json);
    let delay = cli.dealer_delay();

    new_round(&mut session, renderer, delay).await;
    renderer.prompt(session.round());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            renderer.prompt(session.round());
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => renderer.message(command::HELP),
            Ok(Command::NewRound) => new_round(&mut session, renderer, delay).await,
            Ok(action) => match apply(&mut session, action) {
                Ok(()) => settle(&mut session, renderer, delay).await,
                Err(e) => renderer.error(&e),
            },
            Err(e) => renderer.error(&e),
        }
        renderer.prompt(session.round());
    }

    log::info!("{} rounds played", session.rounds_played());
    Ok(())
}

async fn new_round(session: &mut Session, renderer: Renderer, delay: Duration) {
    if let Err(e) = session.start_round() {
        renderer.error(&e);
    }
    settle(session, renderer, delay).await;
}

/// Hand the command targets: the one named, else the hand being played.
fn target_hand(session: &Session, command: Command) -> Result<usize, Error> {
    if let Some(index) = command.hand() {
        return Ok(index);
    }
    let round = session.round().ok_or(Error::NoRound)?;
    round.active_hand_index().ok_or(Error::InvalidState {
        expected: RoundPhase::PlayerTurn,
        actual: round.phase(),
    })
}

fn apply(session: &mut Session, command: Command) -> Result<(), Error> {
    let index = target_hand(session, command)?;
    match command {
        Command::Hit(_) => session.hit(index).map(|_| ()),
        Command::Stand(_) => session.stand(index),
        Command::Split(_) => session.split(index),
        Command::NewRound | Command::Help | Command::Quit => Ok(()),
    }
}

/// Shows what the last action did and, once every hand is done, plays the
/// dealer out one card per tick.
async fn settle(session: &mut Session, renderer: Renderer, delay: Duration) {
    renderer.events(session.drain_events());

    while session
        .round()
        .is_some_and(|r| r.phase() == RoundPhase::DealerTurn)
    {
        tokio::time::sleep(delay).await;
        let step = session.dealer_step();
        renderer.events(session.drain_events());
        if let Err(e) = step {
            log::error!("dealer turn stopped: {e}");
            renderer.error(&e);
            break;
        }
    }

    if let Some(round) = session.round() {
        renderer.table(round);
    }
}
