use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::prelude::*;

use crate::transaction::{Transaction, NUM_DECIMAL_PLACES};

/// Count and amount of transactions falling in one category
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotals {
    pub count: usize,
    pub amount: Decimal,
}

/// Aggregate statistics for a batch of transactions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total: Decimal,
    /// Keyed by category name, so iteration is alphabetical
    pub by_category: BTreeMap<String, CategoryTotals>,
}

impl Summary {
    #[must_use]
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Summary::default();
        for tx in transactions {
            summary.count += 1;
            summary.total += tx.amount;
            let totals = summary.by_category.entry(tx.category.clone()).or_default();
            totals.count += 1;
            totals.amount += tx.amount;
        }
        summary
    }

    /// Mean transaction amount, zero for an empty batch
    #[must_use]
    pub fn average(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        (self.total / Decimal::from(self.count))
            .round_dp_with_strategy(NUM_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Renders `amount` to 2 decimals with comma thousands separators, e.g. `1,234.50`
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(NUM_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (whole, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total transactions: {}", self.count)?;
        writeln!(f, "Total amount: ${}", format_amount(self.total))?;
        writeln!(f, "Average transaction: ${:.2}", self.average())?;
        writeln!(f)?;
        writeln!(f, "Transactions by Category:")?;
        for (category, totals) in &self.by_category {
            let amount = format!("${:>10}", format_amount(totals.amount));
            writeln!(
                f,
                "  {:20}: {:4} transactions | {}",
                category, totals.count, amount
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{ClockTime, PaymentMethod, Status, TransactionId};
    use chrono::NaiveDate;

    fn make_tx(id: u32, category: &str, cents: i64) -> Transaction {
        Transaction {
            id: TransactionId(id),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            time: ClockTime::new(12, 0).unwrap(),
            merchant: "Somewhere".to_owned(),
            category: category.to_owned(),
            amount: Decimal::new(cents, NUM_DECIMAL_PLACES),
            payment_method: PaymentMethod::DebitCard,
            status: Status::Posted,
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(Decimal::new(999, 2)), "9.99");
        assert_eq!(format_amount(Decimal::new(123_456, 2)), "1,234.56");
        assert_eq!(format_amount(Decimal::new(100_000_000, 2)), "1,000,000.00");
        assert_eq!(format_amount(Decimal::new(-123_456, 2)), "-1,234.56");
        assert_eq!(format_amount(Decimal::new(12_345, 3)), "12.35");
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_transactions(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.average(), Decimal::ZERO);
        assert!(summary.by_category.is_empty());

        let report = summary.to_string();
        assert!(report.contains("Total transactions: 0"));
        assert!(report.contains("Total amount: $0.00"));
        assert!(report.contains("Average transaction: $0.00"));
    }

    #[test]
    fn test_summary_totals() {
        let txs = vec![
            make_tx(1, "Rent", 150_000),
            make_tx(2, "Gas", 4_250),
            make_tx(3, "Rent", 120_000),
            make_tx(4, "Entertainment", 1_099),
        ];
        let summary = Summary::from_transactions(&txs);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.total, Decimal::new(275_349, 2));
        assert_eq!(summary.average(), Decimal::new(68_837, 2));

        let rent = summary.by_category["Rent"];
        assert_eq!(rent.count, 2);
        assert_eq!(rent.amount, Decimal::new(270_000, 2));

        let categories: Vec<&str> = summary.by_category.keys().map(String::as_str).collect();
        assert_eq!(categories, vec!["Entertainment", "Gas", "Rent"]);

        let sum: Decimal = summary.by_category.values().map(|t| t.amount).sum();
        assert_eq!(sum, summary.total);
        let count: usize = summary.by_category.values().map(|t| t.count).sum();
        assert_eq!(count, summary.count);
    }

    #[test]
    fn test_report_is_alphabetical() {
        let txs = vec![make_tx(1, "Utilities", 5_000), make_tx(2, "Groceries", 2_000)];
        let report = Summary::from_transactions(&txs).to_string();
        let groceries = report.find("Groceries").unwrap();
        let utilities = report.find("Utilities").unwrap();
        assert!(groceries < utilities);
        assert!(report.contains("Total amount: $70.00"));
        assert!(report.contains("Average transaction: $35.00"));
    }
}
