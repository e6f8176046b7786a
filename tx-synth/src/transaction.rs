use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

pub const NUM_DECIMAL_PLACES: u32 = 2;
pub const ID_PREFIX: &str = "TXN";
pub const ID_WIDTH: usize = 6;
/// Largest id that still renders in `ID_WIDTH` digits
pub const MAX_TRANSACTION_ID: u32 = 999_999;

/// Column order of the CSV output, matching the field order of [`Transaction`]
pub const CSV_HEADER: [&str; 8] = [
    "transaction_id",
    "date",
    "time",
    "merchant",
    "category",
    "amount",
    "payment_method",
    "status",
];

/// Sequential identifier, rendered as `TXN000001`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(pub u32);

/// Wall clock time of a transaction, minute resolution
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    Cash,
    #[serde(rename = "Digital Wallet")]
    DigitalWallet,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Posted,
    Pending,
}

/// A single synthesized transaction. Field order is the CSV column order.
#[allow(clippy::module_name_repetitions)]
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    #[serde(rename = "transaction_id")]
    pub id: TransactionId,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub merchant: String,
    pub category: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub status: Status,
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", ID_PREFIX, self.0, width = ID_WIDTH)
    }
}

impl Serialize for TransactionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl ClockTime {
    /// Returns `None` unless `hour < 24` and `minute < 60`
    #[must_use]
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| ClockTime { hour, minute })
    }

    #[must_use]
    pub fn hour(self) -> u8 {
        self.hour
    }

    #[must_use]
    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Cash,
        PaymentMethod::DigitalWallet,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::DigitalWallet => "Digital Wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Status {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Posted => "Posted",
            Status::Pending => "Pending",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
