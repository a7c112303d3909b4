//! Synthetic transaction generator.
//!
//! Every draw comes from one seeded ChaCha stream, so a given seed always
//! yields the same table. Records are sampled in a fixed field order,
//! numbered in generation order, and finally sorted by date.

pub mod catalog;

use crate::config::GeneratorConfig;
use crate::models::{round2, CustomerSegment, PaymentMethod, Pricing, TransactionRecord};
use anyhow::{ensure, Context, Result};
use catalog::{CATEGORIES, MAX_QUANTITY, REGIONS};
use chrono::{Datelike, Duration, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Customer ids start here; the pool extends one third of the row count above it.
const CUSTOMER_ID_BASE: u64 = 1001;

/// Scale of the exponential quantity draw.
const QUANTITY_SCALE: f64 = 2.0;

/// Options controlling a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub seed: u64,
    pub min_transactions: usize,
    pub max_transactions: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub first_order_id: u64,
    /// Whether to draw a progress bar while sampling.
    pub show_progress: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

impl From<&GeneratorConfig> for GeneratorOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            seed: config.seed,
            min_transactions: config.min_transactions,
            max_transactions: config.max_transactions,
            start_date: config.start_date,
            end_date: config.end_date,
            first_order_id: config.first_order_id,
            show_progress: false,
        }
    }
}

/// Seeded sampler producing transaction records.
pub struct SalesGenerator {
    options: GeneratorOptions,
    rng: ChaCha8Rng,
    segments: WeightedIndex<u32>,
    payments: WeightedIndex<u32>,
    window_days: i64,
}

impl SalesGenerator {
    /// Create a generator, validating the configured bounds.
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        ensure!(
            options.min_transactions <= options.max_transactions,
            "min_transactions ({}) exceeds max_transactions ({})",
            options.min_transactions,
            options.max_transactions
        );
        ensure!(
            options.start_date <= options.end_date,
            "start_date {} is after end_date {}",
            options.start_date,
            options.end_date
        );

        let segments = WeightedIndex::new(CustomerSegment::ALL.iter().map(|s| s.weight()))
            .context("Invalid customer segment weights")?;
        let payments = WeightedIndex::new(PaymentMethod::ALL.iter().map(|p| p.weight()))
            .context("Invalid payment method weights")?;
        let window_days = (options.end_date - options.start_date).num_days();

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(options.seed),
            options,
            segments,
            payments,
            window_days,
        })
    }

    /// Draw the row count, then generate that many records sorted by date.
    pub fn generate(&mut self) -> Vec<TransactionRecord> {
        let count = self
            .rng
            .gen_range(self.options.min_transactions..=self.options.max_transactions);
        info!(seed = self.options.seed, count, "Generating transactions");
        self.generate_n(count)
    }

    /// Generate exactly `count` records sorted by date.
    pub fn generate_n(&mut self, count: usize) -> Vec<TransactionRecord> {
        let progress = if self.options.show_progress {
            let pb = ProgressBar::new(count as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let customer_max = CUSTOMER_ID_BASE + (count / 3) as u64;
        let mut records = Vec::with_capacity(count);

        for offset in 0..count as u64 {
            let order_seq = self.options.first_order_id + offset;
            records.push(self.sample_record(order_seq, customer_max));
            progress.inc(1);
        }
        progress.finish_and_clear();

        // Stable: same-day orders keep generation order.
        records.sort_by_key(|r| r.date);
        debug!(count = records.len(), "Generated and sorted transactions");

        records
    }

    fn sample_record(&mut self, order_seq: u64, customer_max: u64) -> TransactionRecord {
        let date = self.sample_date();

        let entry = &CATEGORIES[self.rng.gen_range(0..CATEGORIES.len())];
        let product = entry.products[self.rng.gen_range(0..entry.products.len())];
        let (min_price, max_price) = entry.price_range;
        let unit_price = round2(self.rng.gen_range(min_price..=max_price));

        let quantity = self.sample_quantity(date.month());
        let region = REGIONS[self.rng.gen_range(0..REGIONS.len())];

        let segment = CustomerSegment::ALL[self.segments.sample(&mut self.rng)];
        let discount_percent = match segment.discount_options() {
            [only] => *only,
            options => options[self.rng.gen_range(0..options.len())],
        };

        let payment_method = PaymentMethod::ALL[self.payments.sample(&mut self.rng)];
        let customer = self.rng.gen_range(CUSTOMER_ID_BASE..=customer_max);

        let pricing = Pricing::compute(unit_price, quantity, discount_percent);

        TransactionRecord {
            order_id: format!("ORD{order_seq}"),
            date,
            customer_id: format!("CUST{customer}"),
            segment,
            region: region.to_string(),
            category: entry.name.to_string(),
            product: product.to_string(),
            quantity,
            unit_price,
            total_sales: pricing.total_sales,
            discount_percent,
            discount_amount: pricing.discount_amount,
            final_price: pricing.final_price,
            payment_method,
        }
    }

    fn sample_date(&mut self) -> NaiveDate {
        let offset = self.rng.gen_range(0..=self.window_days);
        self.options.start_date + Duration::days(offset)
    }

    fn sample_quantity(&mut self, month: u32) -> u32 {
        seasonal_quantity(self.sample_exponential(QUANTITY_SCALE), month)
    }

    /// Inverse-transform exponential draw.
    fn sample_exponential(&mut self, scale: f64) -> f64 {
        let u: f64 = self.rng.gen();
        -scale * (1.0 - u).ln()
    }
}

/// Quantity for an exponential draw: capped base, scaled by season and
/// truncated, kept in `1..=MAX_QUANTITY`.
fn seasonal_quantity(draw: f64, month: u32) -> u32 {
    let base = (draw.floor() as u32 + 1).min(MAX_QUANTITY);
    let scaled = (f64::from(base) * catalog::seasonal_multiplier(month)) as u32;
    scaled.clamp(1, MAX_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_options(seed: u64) -> GeneratorOptions {
        GeneratorOptions {
            seed,
            ..GeneratorOptions::default()
        }
    }

    #[test]
    fn test_seasonal_quantity() {
        // Off season: floor(draw) + 1, unscaled.
        assert_eq!(seasonal_quantity(0.2, 3), 1);
        assert_eq!(seasonal_quantity(2.7, 3), 3);

        // June and November scale by 1.5 and truncate.
        assert_eq!(seasonal_quantity(0.2, 6), 1);
        assert_eq!(seasonal_quantity(1.0, 6), 3);
        assert_eq!(seasonal_quantity(2.7, 11), 4);

        // A base of 7 or more scales past the cap and is clamped.
        assert_eq!(seasonal_quantity(6.0, 6), 10);
        assert_eq!(seasonal_quantity(6.0, 4), 7);
        assert_eq!(seasonal_quantity(30.0, 12), 10);
        assert_eq!(seasonal_quantity(30.0, 1), 10);
    }

    #[test]
    fn test_row_count_within_bounds() {
        let mut generator = SalesGenerator::new(small_options(42)).unwrap();
        let records = generator.generate();
        assert!((3000..=5000).contains(&records.len()));
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let a = SalesGenerator::new(small_options(42)).unwrap().generate();
        let b = SalesGenerator::new(small_options(42)).unwrap().generate();
        assert_eq!(a, b);

        let c = SalesGenerator::new(small_options(43)).unwrap().generate();
        assert_ne!(a, c);
    }

    #[test]
    fn test_record_invariants() {
        let mut generator = SalesGenerator::new(small_options(7)).unwrap();
        let records = generator.generate_n(2000);

        for r in &records {
            assert!((1..=10).contains(&r.quantity), "quantity {}", r.quantity);
            assert_eq!(r.total_sales, round2(r.unit_price * f64::from(r.quantity)));
            assert_eq!(r.final_price, round2(r.total_sales - r.discount_amount));
            assert!(r.segment.discount_options().contains(&r.discount_percent));
            if r.segment == CustomerSegment::Regular {
                assert_eq!(r.discount_percent, 0);
            }

            let entry = catalog::category(&r.category).expect("known category");
            assert!(entry.products.contains(&r.product.as_str()));
            assert!(r.unit_price >= entry.price_range.0 && r.unit_price <= entry.price_range.1);
            assert!(REGIONS.contains(&r.region.as_str()));
            assert!(r.date >= generator.options.start_date && r.date <= generator.options.end_date);
        }
    }

    #[test]
    fn test_sorted_by_date_with_sequential_ids() {
        let mut generator = SalesGenerator::new(small_options(1)).unwrap();
        let records = generator.generate_n(500);

        assert!(records.windows(2).all(|w| w[0].date <= w[1].date));

        let mut ids: Vec<u64> = records
            .iter()
            .map(|r| r.order_id.trim_start_matches("ORD").parse().unwrap())
            .collect();
        ids.sort_unstable();
        let expected: Vec<u64> = (1000..1500).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_customer_pool_allows_repeats() {
        let mut generator = SalesGenerator::new(small_options(3)).unwrap();
        let records = generator.generate_n(900);

        let customers: HashSet<&str> = records.iter().map(|r| r.customer_id.as_str()).collect();
        assert!(customers.len() < records.len());
        for id in &customers {
            let n: u64 = id.trim_start_matches("CUST").parse().unwrap();
            assert!((1001..=1301).contains(&n));
        }
    }

    #[test]
    fn test_segment_mix_roughly_weighted() {
        let mut generator = SalesGenerator::new(small_options(11)).unwrap();
        let records = generator.generate_n(5000);
        let regular = records
            .iter()
            .filter(|r| r.segment == CustomerSegment::Regular)
            .count() as f64;
        let share = regular / records.len() as f64;
        assert!((0.55..0.65).contains(&share), "regular share {share}");
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let options = GeneratorOptions {
            min_transactions: 10,
            max_transactions: 5,
            ..GeneratorOptions::default()
        };
        assert!(SalesGenerator::new(options).is_err());
    }
}
