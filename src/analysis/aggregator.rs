//! Group-by aggregation over transaction records.
//!
//! Revenue is accumulated in whole cents so that partitions (categories,
//! regions, segments) sum exactly to the grand total and repeated runs
//! print identical figures.

use crate::error::AnalysisError;
use crate::models::{CustomerSegment, PaymentMethod, TransactionRecord, WEEKDAYS};
use chrono::Weekday;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Revenue, order, and unit totals for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupTotals {
    pub revenue_cents: i64,
    pub orders: usize,
    pub units: u64,
}

impl GroupTotals {
    pub fn add(&mut self, record: &TransactionRecord) {
        self.revenue_cents += record.revenue_cents();
        self.orders += 1;
        self.units += u64::from(record.quantity);
    }

    pub fn revenue(&self) -> f64 {
        self.revenue_cents as f64 / 100.0
    }

    /// Mean revenue per order, or `None` for an empty group.
    pub fn average_order_value(&self) -> Option<f64> {
        (self.orders > 0).then(|| self.revenue() / self.orders as f64)
    }
}

/// A group key with its totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedTotals<K> {
    pub key: K,
    #[serde(flatten)]
    pub totals: GroupTotals,
}

/// Revenue for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    #[serde(flatten)]
    pub totals: GroupTotals,
}

/// Aggregate records by an ordered key.
pub fn group_totals<K, F>(records: &[TransactionRecord], key: F) -> BTreeMap<K, GroupTotals>
where
    K: Ord,
    F: Fn(&TransactionRecord) -> K,
{
    let mut grouped: BTreeMap<K, GroupTotals> = BTreeMap::new();

    for record in records {
        grouped.entry(key(record)).or_default().add(record);
    }

    grouped
}

/// Flatten a grouping, sorted by revenue (highest first). Ties keep key order.
pub fn rank_by_revenue<K>(grouped: BTreeMap<K, GroupTotals>) -> Vec<KeyedTotals<K>> {
    let mut ranked: Vec<KeyedTotals<K>> = grouped
        .into_iter()
        .map(|(key, totals)| KeyedTotals { key, totals })
        .collect();

    ranked.sort_by_key(|k| std::cmp::Reverse(k.totals.revenue_cents));
    ranked
}

/// Flatten a grouping, sorted by order count (highest first). Ties keep key order.
pub fn rank_by_orders<K>(grouped: BTreeMap<K, GroupTotals>) -> Vec<KeyedTotals<K>> {
    let mut ranked: Vec<KeyedTotals<K>> = grouped
        .into_iter()
        .map(|(key, totals)| KeyedTotals { key, totals })
        .collect();

    ranked.sort_by_key(|k| std::cmp::Reverse(k.totals.orders));
    ranked
}

/// Totals across every record.
pub fn overall_totals(records: &[TransactionRecord]) -> GroupTotals {
    let mut totals = GroupTotals::default();
    for record in records {
        totals.add(record);
    }
    totals
}

pub fn products_by_revenue(records: &[TransactionRecord]) -> Vec<KeyedTotals<String>> {
    rank_by_revenue(group_totals(records, |r| r.product.clone()))
}

pub fn categories_by_revenue(records: &[TransactionRecord]) -> Vec<KeyedTotals<String>> {
    rank_by_revenue(group_totals(records, |r| r.category.clone()))
}

pub fn regions_by_revenue(records: &[TransactionRecord]) -> Vec<KeyedTotals<String>> {
    rank_by_revenue(group_totals(records, |r| r.region.clone()))
}

pub fn payments_by_orders(records: &[TransactionRecord]) -> Vec<KeyedTotals<PaymentMethod>> {
    rank_by_orders(group_totals(records, |r| r.payment_method))
}

/// Totals per segment in tier order, with distinct customer counts.
pub fn segment_totals(records: &[TransactionRecord]) -> Vec<(CustomerSegment, GroupTotals, usize)> {
    let mut grouped: BTreeMap<CustomerSegment, (GroupTotals, BTreeSet<&str>)> = BTreeMap::new();

    for record in records {
        let (totals, customers) = grouped.entry(record.segment).or_default();
        totals.add(record);
        customers.insert(record.customer_id.as_str());
    }

    grouped
        .into_iter()
        .map(|(segment, (totals, customers))| (segment, totals, customers.len()))
        .collect()
}

/// Revenue per (year, month), ascending.
pub fn monthly_revenue(records: &[TransactionRecord]) -> Vec<MonthlyRevenue> {
    group_totals(records, |r| (r.year(), r.month()))
        .into_iter()
        .map(|((year, month), totals)| MonthlyRevenue {
            year,
            month,
            totals,
        })
        .collect()
}

/// The `n` highest-revenue months. Ties keep chronological order.
pub fn top_months(monthly: &[MonthlyRevenue], n: usize) -> Vec<MonthlyRevenue> {
    let mut ranked = monthly.to_vec();
    ranked.sort_by_key(|m| std::cmp::Reverse(m.totals.revenue_cents));
    ranked.truncate(n);
    ranked
}

/// Index of the highest-revenue month in a chronological series.
pub fn peak_month(monthly: &[MonthlyRevenue]) -> Option<usize> {
    monthly
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, i64)>, (i, m)| match best {
            Some((_, cents)) if cents >= m.totals.revenue_cents => best,
            _ => Some((i, m.totals.revenue_cents)),
        })
        .map(|(i, _)| i)
}

/// Totals per weekday, always seven entries from Monday to Sunday.
pub fn weekday_totals(records: &[TransactionRecord]) -> [(Weekday, GroupTotals); 7] {
    let mut totals = WEEKDAYS.map(|day| (day, GroupTotals::default()));

    for record in records {
        let index = record.weekday().num_days_from_monday() as usize;
        totals[index].1.add(record);
    }

    totals
}

/// Weekday with the highest revenue; the earliest day wins a tie.
pub fn peak_weekday(weekdays: &[(Weekday, GroupTotals)]) -> Result<Weekday, AnalysisError> {
    let mut best: Option<(Weekday, i64)> = None;

    for (day, totals) in weekdays {
        if totals.orders == 0 {
            continue;
        }
        if best.map_or(true, |(_, cents)| totals.revenue_cents > cents) {
            best = Some((*day, totals.revenue_cents));
        }
    }

    best.map(|(day, _)| day).ok_or(AnalysisError::EmptyDataset)
}

/// Revenue per (year, quarter), ascending.
pub fn quarterly_revenue(records: &[TransactionRecord]) -> BTreeMap<(i32, u32), GroupTotals> {
    group_totals(records, |r| (r.year(), r.quarter()))
}

pub fn yearly_totals(records: &[TransactionRecord]) -> BTreeMap<i32, GroupTotals> {
    group_totals(records, |r| r.year())
}

/// Revenue in cents by weekday row (Monday first) and month column (January first).
pub fn weekday_month_matrix(records: &[TransactionRecord]) -> [[i64; 12]; 7] {
    let mut matrix = [[0i64; 12]; 7];

    for record in records {
        let row = record.weekday().num_days_from_monday() as usize;
        let col = (record.month() - 1) as usize;
        matrix[row][col] += record.revenue_cents();
    }

    matrix
}

/// Percentage change of revenue from `base_year` to `compare_year`.
pub fn yoy_growth(
    yearly: &BTreeMap<i32, GroupTotals>,
    base_year: i32,
    compare_year: i32,
) -> Result<f64, AnalysisError> {
    let base = yearly.get(&base_year).map_or(0, |t| t.revenue_cents);
    let compare = yearly.get(&compare_year).map_or(0, |t| t.revenue_cents);

    if base == 0 {
        return Err(AnalysisError::ZeroBaseRevenue { year: base_year });
    }

    Ok((compare - base) as f64 / base as f64 * 100.0)
}

/// Repeat-purchase behavior across distinct customers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CustomerStats {
    pub unique_customers: usize,
    pub repeat_customers: usize,
    pub repeat_rate_percent: f64,
    pub average_orders_per_customer: f64,
}

pub fn customer_stats(records: &[TransactionRecord]) -> Result<CustomerStats, AnalysisError> {
    let mut orders: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *orders.entry(record.customer_id.as_str()).or_default() += 1;
    }

    let unique = orders.len();
    if unique == 0 {
        return Err(AnalysisError::EmptyDataset);
    }

    let repeat = orders.values().filter(|&&n| n > 1).count();
    let total_orders: usize = orders.values().sum();

    Ok(CustomerStats {
        unique_customers: unique,
        repeat_customers: repeat,
        repeat_rate_percent: repeat as f64 / unique as f64 * 100.0,
        average_orders_per_customer: total_orders as f64 / unique as f64,
    })
}

/// Share of `part` in `whole` as a percentage; zero when `whole` is zero.
pub fn share_percent(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
