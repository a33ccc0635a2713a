use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid rank: {0:?}")]
    InvalidRank(String),
    #[error("Invalid suit: {0:?}")]
    InvalidSuit(String),
    #[error("Invalid card index: {0}")]
    InvalidCardIndex(usize),
    #[error("Invalid deck count: {0} (must be at least 1)")]
    InvalidDeckCount(u8),
    #[error("Shoe is empty")]
    EmptyShoe,
    #[error("Action not allowed in phase {0}")]
    InvalidPhase(String),
}
