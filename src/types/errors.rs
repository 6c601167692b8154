use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Money error: {0}")]
    InvalidFormat(String),
    #[error("Money error: Overflow")]
    Overflow
}
