use chrono::Duration;
use log::{debug, info};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::config::SynthConfig;
use crate::error::SynthError;
use crate::sampler::WeightedSampler;
use crate::transaction::{
    ClockTime, PaymentMethod, Status, Transaction, TransactionId, MAX_TRANSACTION_ID,
    NUM_DECIMAL_PLACES,
};

/// How often `generate_batch` reports progress
pub const PROGRESS_INTERVAL: u32 = 100;

/// Produces randomized [`Transaction`]s from a validated [`SynthConfig`].
///
/// All randomness comes from one `StdRng`, so a fixed seed reproduces the
/// same records in the same order.
#[derive(Debug)]
pub struct Synthesizer {
    config: SynthConfig,
    category_sampler: WeightedSampler,
    /// `(min, max)` in cents, parallel to `config.categories`
    cent_ranges: Vec<(i64, i64)>,
    /// Number of days between start and end date
    day_span: i64,
    rng: StdRng,
}

impl Synthesizer {
    /// # Errors
    /// Errors when `config` fails [`SynthConfig::validate`]
    pub fn new(config: SynthConfig) -> Result<Self, SynthError> {
        config.validate()?;

        let category_sampler = WeightedSampler::new(&config.frequencies())?;
        let cent_ranges = config
            .categories
            .iter()
            .map(crate::config::Category::cent_range)
            .collect::<Result<Vec<_>, _>>()?;
        let day_span = (config.end_date - config.start_date).num_days();

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        debug!(
            "Synthesizer seeded with {} over {} categories",
            seed,
            category_sampler.len()
        );

        Ok(Synthesizer {
            config,
            category_sampler,
            cent_ranges,
            day_span,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Builds one fully populated record with the given identifier
    pub fn generate_one(&mut self, id: u32) -> Transaction {
        let idx = self.category_sampler.sample(&mut self.rng);
        let category = &self.config.categories[idx];

        debug_assert!(!category.merchants.is_empty(), "validated non-empty");
        let merchant = category
            .merchants
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();

        let (low, high) = self.cent_ranges[idx];
        let amount = Decimal::new(self.rng.gen_range(low..=high), NUM_DECIMAL_PLACES);

        let offset = self.rng.gen_range(0..=self.day_span);
        let date = self.config.start_date + Duration::days(offset);

        let hour = self.rng.gen_range(0..24);
        let minute = self.rng.gen_range(0..60);
        // Both draws are in range, so `new` never returns `None` here
        let time = ClockTime::new(hour, minute).unwrap_or_default();

        let payment_method = *PaymentMethod::ALL
            .choose(&mut self.rng)
            .unwrap_or(&PaymentMethod::CreditCard);

        let status = if self.rng.gen_bool(self.config.posted_probability) {
            Status::Posted
        } else {
            Status::Pending
        };

        Transaction {
            id: TransactionId(id),
            date,
            time,
            merchant,
            category: category.name.clone(),
            amount,
            payment_method,
            status,
        }
    }

    /// Generates `count` records numbered `1..=count`, then sorts them by date.
    ///
    /// The sort is stable, so records sharing a date keep their generation order.
    /// Ids above [`MAX_TRANSACTION_ID`] widen past the fixed id width; [`Synthesizer::generate`]
    /// refuses such counts.
    pub fn generate_batch(&mut self, count: u32) -> Vec<Transaction> {
        let mut transactions = Vec::with_capacity(count as usize);
        for id in 1..=count {
            transactions.push(self.generate_one(id));
            if id % PROGRESS_INTERVAL == 0 {
                info!("Generated {}/{} transactions...", id, count);
            }
        }
        transactions.sort_by(|a, b| a.date.cmp(&b.date));
        transactions
    }

    /// Generates the configured number of records.
    ///
    /// # Errors
    /// Errors when the configured count does not fit in a fixed-width transaction id
    pub fn generate(&mut self) -> Result<Vec<Transaction>, SynthError> {
        let count = u32::try_from(self.config.count)
            .ok()
            .filter(|&count| count <= MAX_TRANSACTION_ID)
            .ok_or(SynthError::TooManyTransactions)?;
        Ok(self.generate_batch(count))
    }
}
