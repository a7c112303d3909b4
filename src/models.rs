//! Data models for the sales pipeline.
//!
//! This module contains the transaction record written by the generator
//! and read back by the reporter and chart renderer, plus the small
//! enumerations and calendar helpers shared by every stage.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer tier, controlling discount eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CustomerSegment {
    /// Default tier, never discounted.
    Regular,
    /// Occasional small discounts.
    Premium,
    /// Always discounted.
    #[serde(rename = "VIP")]
    Vip,
}

impl CustomerSegment {
    /// All segments in tier order.
    pub const ALL: [CustomerSegment; 3] = [
        CustomerSegment::Regular,
        CustomerSegment::Premium,
        CustomerSegment::Vip,
    ];

    /// Relative sampling weight of the segment.
    pub fn weight(&self) -> u32 {
        match self {
            CustomerSegment::Regular => 60,
            CustomerSegment::Premium => 30,
            CustomerSegment::Vip => 10,
        }
    }

    /// Discount percentages a customer of this segment may receive.
    pub fn discount_options(&self) -> &'static [u32] {
        match self {
            CustomerSegment::Regular => &[0],
            CustomerSegment::Premium => &[0, 5, 10],
            CustomerSegment::Vip => &[10, 15, 20],
        }
    }
}

impl fmt::Display for CustomerSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerSegment::Regular => write!(f, "Regular"),
            CustomerSegment::Premium => write!(f, "Premium"),
            CustomerSegment::Vip => write!(f, "VIP"),
        }
    }
}

/// How an order was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "E-Wallet")]
    EWallet,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::EWallet,
        PaymentMethod::BankTransfer,
        PaymentMethod::Cash,
    ];

    /// Relative sampling weight of the method.
    pub fn weight(&self) -> u32 {
        match self {
            PaymentMethod::CreditCard => 30,
            PaymentMethod::DebitCard => 25,
            PaymentMethod::EWallet => 25,
            PaymentMethod::BankTransfer => 15,
            PaymentMethod::Cash => 5,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::CreditCard => write!(f, "Credit Card"),
            PaymentMethod::DebitCard => write!(f, "Debit Card"),
            PaymentMethod::EWallet => write!(f, "E-Wallet"),
            PaymentMethod::BankTransfer => write!(f, "Bank Transfer"),
            PaymentMethod::Cash => write!(f, "Cash"),
        }
    }
}

/// One generated sale. Field names on disk match the CSV header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Order_ID")]
    pub order_id: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Customer_ID")]
    pub customer_id: String,
    #[serde(rename = "Customer_Segment")]
    pub segment: CustomerSegment,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Unit_Price")]
    pub unit_price: f64,
    #[serde(rename = "Total_Sales")]
    pub total_sales: f64,
    #[serde(rename = "Discount_Percent")]
    pub discount_percent: u32,
    #[serde(rename = "Discount_Amount")]
    pub discount_amount: f64,
    #[serde(rename = "Final_Price")]
    pub final_price: f64,
    #[serde(rename = "Payment_Method")]
    pub payment_method: PaymentMethod,
}

impl TransactionRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Calendar quarter (1-4).
    pub fn quarter(&self) -> u32 {
        (self.date.month() - 1) / 3 + 1
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Realized revenue in whole cents.
    pub fn revenue_cents(&self) -> i64 {
        to_cents(self.final_price)
    }
}

/// Derived monetary fields of a sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub total_sales: f64,
    pub discount_amount: f64,
    pub final_price: f64,
}

impl Pricing {
    /// Price a line: total, discount, and final amount, each rounded to cents.
    pub fn compute(unit_price: f64, quantity: u32, discount_percent: u32) -> Self {
        let total_sales = round2(unit_price * f64::from(quantity));
        let discount_amount = round2(total_sales * (f64::from(discount_percent) / 100.0));
        let final_price = round2(total_sales - discount_amount);

        Self {
            total_sales,
            discount_amount,
            final_price,
        }
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a two-decimal amount to whole cents.
pub fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Weekdays in report order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English name of a month (1-12).
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Three-letter month abbreviation (1-12).
pub fn month_abbr(month: u32) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or(name)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A Regular-segment, undiscounted sale paid by credit card in Jakarta.
    pub fn record(
        date: &str,
        customer: &str,
        category: &str,
        product: &str,
        quantity: u32,
        unit_price: f64,
    ) -> TransactionRecord {
        let pricing = Pricing::compute(unit_price, quantity, 0);
        TransactionRecord {
            order_id: format!("ORD-{date}-{product}"),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date"),
            customer_id: customer.to_string(),
            segment: CustomerSegment::Regular,
            region: "Jakarta".to_string(),
            category: category.to_string(),
            product: product.to_string(),
            quantity,
            unit_price,
            total_sales: pricing.total_sales,
            discount_percent: 0,
            discount_amount: pricing.discount_amount,
            final_price: pricing.final_price,
            payment_method: PaymentMethod::CreditCard,
        }
    }

    /// Re-price a test record for a different segment and discount.
    pub fn discounted(
        record: TransactionRecord,
        segment: CustomerSegment,
        discount_percent: u32,
    ) -> TransactionRecord {
        let pricing = Pricing::compute(record.unit_price, record.quantity, discount_percent);
        TransactionRecord {
            segment,
            discount_percent,
            total_sales: pricing.total_sales,
            discount_amount: pricing.discount_amount,
            final_price: pricing.final_price,
            ..record
        }
    }
}
