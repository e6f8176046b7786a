use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::prelude::*;

use crate::error::SynthError;
use crate::transaction::MAX_TRANSACTION_ID;

pub const DEFAULT_TRANSACTION_COUNT: usize = 1000;
pub const DEFAULT_POSTED_PROBABILITY: f64 = 0.95;

/// A spending bucket with its own amount range, selection weight and merchants
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub min: Decimal,
    pub max: Decimal,
    /// Relative likelihood of this category being picked, not normalized
    pub frequency: f64,
    pub merchants: Vec<String>,
}

/// Everything the synthesizer needs for one run. Built once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    pub count: usize,
    /// Inclusive
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    pub categories: Vec<Category>,
    pub posted_probability: f64,
    /// `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Category {
    #[must_use]
    pub fn new(name: &str, min: Decimal, max: Decimal, frequency: f64, merchants: &[&str]) -> Self {
        Category {
            name: name.to_owned(),
            min,
            max,
            frequency,
            merchants: merchants.iter().map(|&m| m.to_owned()).collect(),
        }
    }

    /// The amount range in whole cents, narrowed to the cents that lie inside `[min, max]`.
    ///
    /// # Errors
    /// Errors when the range is inverted, negative, too large, or holds no whole cent
    pub fn cent_range(&self) -> Result<(i64, i64), SynthError> {
        let invalid = || SynthError::InvalidAmountRange {
            name: self.name.clone(),
            min: self.min,
            max: self.max,
        };
        if self.min.is_sign_negative() || self.min > self.max {
            return Err(invalid());
        }

        let hundred = Decimal::ONE_HUNDRED;
        let low = self
            .min
            .checked_mul(hundred)
            .and_then(|d| d.ceil().to_i64())
            .ok_or_else(invalid)?;
        let high = self
            .max
            .checked_mul(hundred)
            .and_then(|d| d.floor().to_i64())
            .ok_or_else(invalid)?;
        if low > high {
            return Err(invalid());
        }
        Ok((low, high))
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            count: DEFAULT_TRANSACTION_COUNT,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 13).unwrap_or(NaiveDate::MIN),
            categories: default_categories(),
            posted_probability: DEFAULT_POSTED_PROBABILITY,
            seed: None,
        }
    }
}

impl SynthConfig {
    /// # Errors
    /// Errors on the first problem found with the count, categories, weights, date range
    /// or status probability
    pub fn validate(&self) -> Result<(), SynthError> {
        if u32::try_from(self.count).map_or(true, |count| count > MAX_TRANSACTION_ID) {
            return Err(SynthError::TooManyTransactions);
        }
        if self.categories.is_empty() {
            return Err(SynthError::NoCategories);
        }

        let mut seen = HashSet::with_capacity(self.categories.len());
        for category in &self.categories {
            if !seen.insert(category.name.as_str()) {
                return Err(SynthError::DuplicateCategory(category.name.clone()));
            }
            if category.merchants.is_empty() {
                return Err(SynthError::EmptyMerchants(category.name.clone()));
            }
            if !category.frequency.is_finite() || category.frequency < 0.0 {
                return Err(SynthError::InvalidWeight);
            }
            category.cent_range()?;
        }
        if self.categories.iter().all(|c| c.frequency <= 0.0) {
            return Err(SynthError::ZeroTotalWeight);
        }

        if self.start_date > self.end_date {
            return Err(SynthError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if !(0.0..=1.0).contains(&self.posted_probability) {
            return Err(SynthError::InvalidProbability(self.posted_probability));
        }

        Ok(())
    }

    #[must_use]
    pub fn frequencies(&self) -> Vec<f64> {
        self.categories.iter().map(|c| c.frequency).collect()
    }
}

fn default_categories() -> Vec<Category> {
    let d = |whole: u32| Decimal::from(whole);
    vec![
        Category::new(
            "Groceries",
            d(20),
            d(150),
            0.20,
            &["Walmart", "Kroger", "Whole Foods", "Trader Joes", "Costco"],
        ),
        Category::new(
            "Restaurants",
            d(15),
            d(80),
            0.15,
            &["Chipotle", "Starbucks", "McDonalds", "Subway", "Panera"],
        ),
        Category::new(
            "Gas",
            d(30),
            d(70),
            0.10,
            &["Shell", "BP", "Exxon", "Chevron", "Marathon"],
        ),
        Category::new(
            "Utilities",
            d(50),
            d(200),
            0.05,
            &["Electric Company", "Water Dept", "Internet Provider", "Gas Company"],
        ),
        Category::new(
            "Rent",
            d(800),
            d(2000),
            0.05,
            &["Property Management", "Landlord"],
        ),
        Category::new(
            "Entertainment",
            d(10),
            d(100),
            0.10,
            &["Netflix", "Spotify", "AMC Theaters", "Amazon Prime"],
        ),
        Category::new(
            "Shopping",
            d(25),
            d(300),
            0.15,
            &["Amazon", "Target", "Best Buy", "Macys", "Nike"],
        ),
        Category::new(
            "Healthcare",
            d(30),
            d(500),
            0.05,
            &["CVS Pharmacy", "Walgreens", "Medical Center", "Dentist Office"],
        ),
        Category::new(
            "Transportation",
            d(5),
            d(50),
            0.08,
            &["Uber", "Lyft", "Public Transit", "Parking"],
        ),
        Category::new(
            "Subscriptions",
            d(5),
            d(30),
            0.07,
            &["Netflix", "Spotify", "Gym Membership", "Adobe", "Microsoft 365"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_category(min: Decimal, max: Decimal) -> SynthConfig {
        SynthConfig {
            categories: vec![Category::new("A", min, max, 1.0, &["Shop"])],
            ..SynthConfig::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SynthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.count, 1000);
        assert_eq!(config.categories.len(), 10);
        assert_eq!(
            config.start_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(
            config.end_date,
            NaiveDate::from_ymd_opt(2024, 12, 13).unwrap()
        );
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_cent_range() {
        let config = single_category(Decimal::from(10), Decimal::from(10));
        assert_eq!(config.categories[0].cent_range().unwrap(), (1000, 1000));

        let config = single_category(Decimal::new(1_005, 3), Decimal::new(2_999, 3));
        assert_eq!(config.categories[0].cent_range().unwrap(), (101, 299));

        let config = single_category(Decimal::new(10_001, 3), Decimal::new(10_004, 3));
        assert!(config.categories[0].cent_range().is_err());

        let config = single_category(Decimal::from(-1), Decimal::from(10));
        assert!(config.categories[0].cent_range().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_categories() {
        let config = SynthConfig {
            categories: vec![],
            ..SynthConfig::default()
        };
        assert!(matches!(config.validate(), Err(SynthError::NoCategories)));

        let config = single_category(Decimal::from(20), Decimal::from(10));
        assert!(matches!(
            config.validate(),
            Err(SynthError::InvalidAmountRange { .. })
        ));

        let mut config = single_category(Decimal::from(1), Decimal::from(10));
        config.categories[0].merchants.clear();
        assert!(matches!(
            config.validate(),
            Err(SynthError::EmptyMerchants(name)) if name == "A"
        ));

        let mut config = single_category(Decimal::from(1), Decimal::from(10));
        config.categories.push(config.categories[0].clone());
        assert!(matches!(
            config.validate(),
            Err(SynthError::DuplicateCategory(name)) if name == "A"
        ));

        let mut config = single_category(Decimal::from(1), Decimal::from(10));
        config.categories[0].frequency = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SynthError::ZeroTotalWeight)
        ));

        config.categories[0].frequency = f64::NAN;
        assert!(matches!(config.validate(), Err(SynthError::InvalidWeight)));
    }

    #[test]
    fn test_validate_bounds_count_to_id_width() {
        let config = SynthConfig {
            count: 999_999,
            ..SynthConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = SynthConfig {
            count: 1_000_000,
            ..SynthConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SynthError::TooManyTransactions)
        ));
    }

    #[test]
    fn test_validate_rejects_bad_dates_and_probability() {
        let config = SynthConfig {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ..SynthConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SynthError::InvalidDateRange { .. })
        ));

        let config = SynthConfig {
            posted_probability: 1.5,
            ..SynthConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SynthError::InvalidProbability(_))
        ));

        let config = SynthConfig {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ..SynthConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
