use std::io;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("At least one category must be configured")]
    NoCategories,
    #[error("Category `{0}` is configured more than once")]
    DuplicateCategory(String),
    #[error("Category `{0}` has no merchants")]
    EmptyMerchants(String),
    #[error("Category `{name}` has an invalid amount range ({min} to {max})")]
    InvalidAmountRange {
        name: String,
        min: Decimal,
        max: Decimal,
    },
    #[error("Frequency weights must be finite and non-negative")]
    InvalidWeight,
    #[error("Frequency weights must not all be zero")]
    ZeroTotalWeight,
    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("Transaction count exceeds the largest fixed-width id")]
    TooManyTransactions,
    #[error("Posted probability must be between 0 and 1, got {0}")]
    InvalidProbability(f64),
}
