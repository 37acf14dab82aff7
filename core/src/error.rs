use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid difficulty")]
    InvalidDifficulty,
    #[error("Invalid theme")]
    InvalidTheme,
    #[error("Theme does not have enough symbols for every difficulty")]
    ThemeTooSmall,
    #[error("Theme with the same name is already registered")]
    DuplicateTheme,
    #[error("Theme contains the same symbol more than once")]
    DuplicateSymbol,
    #[error("Invalid card id")]
    InvalidCardId,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
