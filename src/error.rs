use crate::domain::account::to_cents;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KioskError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error(
        "Insufficient balance. Current: ${:.2}, Requested: ${:.2}",
        to_cents(*.balance),
        to_cents(*.requested)
    )]
    InsufficientFunds { balance: Decimal, requested: Decimal },
    #[error("Amount must be positive")]
    AmountNotPositive,
    #[error("Amount too large")]
    AmountTooLarge,
    #[error("Base and target currencies cannot be the same")]
    SameCurrency,
    #[error("Exchange rate for {0} not found")]
    RateUnavailable(String),
    #[error("Failed to fetch exchange rates: {0}")]
    RateFetchError(String),
    #[error("Round is already over")]
    RoundOver,
    #[error("End of input")]
    EndOfInput,
}

pub type Result<T> = std::result::Result<T, KioskError>;
