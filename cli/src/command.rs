use core::str::FromStr;
use pairmatch_core::{CardId, Millis};
use thiserror::Error;

pub const USAGE: &str = "\
commands:
  <id> | flip <id>          flip the card with that id
  hint                      briefly show a matching pair
  reset                     deal again with the same settings
  new <difficulty> <theme>  start over with other settings
  wait <secs>               let game time pass
  show                      print the board
  themes                    list available themes
  help                      show this text
  quit                      leave the game";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Flip(CardId),
    Hint,
    Reset,
    New { difficulty: String, theme: String },
    Wait(Millis),
    Show,
    Themes,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}")]
    Unknown(String),
    #[error("Missing {0}")]
    MissingArgument(&'static str),
    #[error("Invalid card id {0:?}")]
    InvalidCardId(String),
    #[error("Invalid duration {0:?}")]
    InvalidDuration(String),
}

fn parse_card_id(value: &str) -> Result<CardId, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::InvalidCardId(value.to_string()))
}

fn parse_seconds(value: &str) -> Result<Millis, CommandError> {
    let invalid = || CommandError::InvalidDuration(value.to_string());
    let secs: f64 = value.parse().map_err(|_| invalid())?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(invalid());
    }
    Ok((secs * 1000.0).round() as Millis)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        if head.bytes().all(|b| b.is_ascii_digit()) {
            return parse_card_id(head).map(Command::Flip);
        }

        let mut arg = |name| words.next().ok_or(CommandError::MissingArgument(name));
        Ok(match head.to_ascii_lowercase().as_str() {
            "flip" | "f" => Command::Flip(parse_card_id(arg("card id")?)?),
            "hint" | "h" => Command::Hint,
            "reset" | "r" => Command::Reset,
            "new" | "n" => Command::New {
                difficulty: arg("difficulty")?.to_string(),
                theme: arg("theme")?.to_string(),
            },
            "wait" | "w" => Command::Wait(parse_seconds(arg("seconds")?)?),
            "show" | "s" => Command::Show,
            "themes" => Command::Themes,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(head.to_string())),
        })
    }
}
