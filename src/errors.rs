use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AggError {
    #[error("Type error: {0}")]
    TypeError(String),
    #[error("Overflow")]
    Overflow,
}

pub type AggResult<T> = Result<T, AggError>;
