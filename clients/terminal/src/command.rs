use std::str::FromStr;
use thiserror::Error;

/// A line typed at the prompt. Hand numbers are 1-based on screen and
/// 0-based here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hit(Option<usize>),
    Stand(Option<usize>),
    Split(Option<usize>),
    NewRound,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'help' for the list")]
    Unknown(String),
    #[error("'{0}' is not a hand number")]
    BadHand(String),
    #[error("'{0}' takes no hand number")]
    UnexpectedArgument(String),
}

impl Command {
    pub fn hand(&self) -> Option<usize> {
        match self {
            Command::Hit(hand) | Command::Stand(hand) | Command::Split(hand) => *hand,
            _ => None,
        }
    }
}

fn parse_hand(arg: Option<&str>) -> Result<Option<usize>, ParseCommandError> {
    let Some(arg) = arg else {
        return Ok(None);
    };
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Some(n - 1)),
        _ => Err(ParseCommandError::BadHand(arg.to_string())),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().ok_or(ParseCommandError::Empty)?.to_lowercase();
        let arg = words.next();

        let command = match word.as_str() {
            "h" | "hit" => return Ok(Command::Hit(parse_hand(arg)?)),
            "s" | "stand" | "stick" => return Ok(Command::Stand(parse_hand(arg)?)),
            "p" | "split" => return Ok(Command::Split(parse_hand(arg)?)),
            "n" | "new" | "deal" => Command::NewRound,
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(word.clone())),
        };

        if arg.is_some() {
            return Err(ParseCommandError::UnexpectedArgument(word));
        }
        Ok(command)
    }
}

pub const HELP: &str = "\
commands:
  h [n]   hit hand n (default: the hand being played)
  s [n]   stand on hand n
  p [n]   split the pair in hand n
  n       deal a new round
  q       quit";
