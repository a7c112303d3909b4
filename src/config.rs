//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.salesight.toml` files. Every field has a default, so an absent or
//! partial file reproduces the fixed pipeline paths.

use anyhow::{ensure, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".salesight.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Data generator settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Aggregation report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Chart renderer settings.
    #[serde(default)]
    pub charts: ChartsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding the data file and every derived artifact.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Transaction table file name.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Draw a progress bar while generating.
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            data_file: default_data_file(),
            progress: default_progress(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_progress() -> bool {
    true
}

fn default_data_file() -> String {
    "sales_data.csv".to_string()
}

/// Synthetic data generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed for the random stream.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Lower bound (inclusive) on the number of transactions.
    #[serde(default = "default_min_transactions")]
    pub min_transactions: usize,

    /// Upper bound (inclusive) on the number of transactions.
    #[serde(default = "default_max_transactions")]
    pub max_transactions: usize,

    /// First day of the sampling window.
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Last day of the sampling window (inclusive).
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,

    /// Sequence number of the first order.
    #[serde(default = "default_first_order_id")]
    pub first_order_id: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            min_transactions: default_min_transactions(),
            max_transactions: default_max_transactions(),
            start_date: default_start_date(),
            end_date: default_end_date(),
            first_order_id: default_first_order_id(),
        }
    }
}

fn default_seed() -> u64 {
    42
}

fn default_min_transactions() -> usize {
    3000
}

fn default_max_transactions() -> usize {
    5000
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default()
}

fn default_first_order_id() -> u64 {
    1000
}

/// Aggregation report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Currency label printed before amounts.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Number of products listed in the top products section.
    #[serde(default = "default_top_products")]
    pub top_products: usize,

    /// Number of months listed in the top months section.
    #[serde(default = "default_top_months")]
    pub top_months: usize,

    /// Base year of the growth comparison.
    #[serde(default = "default_base_year")]
    pub base_year: i32,

    /// Year compared against the base year.
    #[serde(default = "default_compare_year")]
    pub compare_year: i32,

    /// Monthly summary table file name.
    #[serde(default = "default_monthly_summary")]
    pub monthly_summary: String,

    /// Product performance table file name.
    #[serde(default = "default_product_performance")]
    pub product_performance: String,

    /// Category performance table file name.
    #[serde(default = "default_category_performance")]
    pub category_performance: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            top_products: default_top_products(),
            top_months: default_top_months(),
            base_year: default_base_year(),
            compare_year: default_compare_year(),
            monthly_summary: default_monthly_summary(),
            product_performance: default_product_performance(),
            category_performance: default_category_performance(),
        }
    }
}

fn default_currency() -> String {
    "Rp".to_string()
}

fn default_top_products() -> usize {
    10
}

fn default_top_months() -> usize {
    5
}

fn default_base_year() -> i32 {
    2023
}

fn default_compare_year() -> i32 {
    2024
}

fn default_monthly_summary() -> String {
    "monthly_sales_summary.csv".to_string()
}

fn default_product_performance() -> String {
    "product_performance.csv".to_string()
}

fn default_category_performance() -> String {
    "category_performance.csv".to_string()
}

/// Chart renderer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Image width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Number of products in the dashboard bar chart.
    #[serde(default = "default_top_products")]
    pub top_products: usize,

    /// Currency label used in axis descriptions and value labels.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_dashboard")]
    pub dashboard: String,

    #[serde(default = "default_customer_analysis")]
    pub customer_analysis: String,

    #[serde(default = "default_heatmap")]
    pub heatmap: String,

    #[serde(default = "default_performance")]
    pub performance: String,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            top_products: default_top_products(),
            currency: default_currency(),
            dashboard: default_dashboard(),
            customer_analysis: default_customer_analysis(),
            heatmap: default_heatmap(),
            performance: default_performance(),
        }
    }
}

/// Smallest image the chart layouts fit into.
pub const MIN_CHART_WIDTH: u32 = 320;
pub const MIN_CHART_HEIGHT: u32 = 240;

impl ChartsConfig {
    /// Reject image sizes the chart layouts cannot be split into.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width >= MIN_CHART_WIDTH && self.height >= MIN_CHART_HEIGHT,
            "Chart size {}x{} is below the minimum of {}x{} pixels",
            self.width,
            self.height,
            MIN_CHART_WIDTH,
            MIN_CHART_HEIGHT
        );
        Ok(())
    }
}

fn default_width() -> u32 {
    1600
}

fn default_height() -> u32 {
    1000
}

fn default_dashboard() -> String {
    "dashboard_overview.png".to_string()
}

fn default_customer_analysis() -> String {
    "customer_analysis.png".to_string()
}

fn default_heatmap() -> String {
    "sales_heatmap.png".to_string()
}

fn default_performance() -> String {
    "performance_trends.png".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, and only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data_dir) = args.data_dir {
            self.general.data_dir = data_dir.clone();
        }

        if let Some(seed) = args.seed_override() {
            self.generator.seed = seed;
        }

        if args.quiet {
            self.general.progress = false;
        }
    }

    /// Path of the transaction table.
    pub fn data_path(&self) -> PathBuf {
        self.general.data_dir.join(&self.general.data_file)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
