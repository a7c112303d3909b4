//! Salesight - synthetic retail sales pipeline
//!
//! Generates a reproducible transaction dataset, analyzes it into a
//! console report plus summary tables, and renders chart images.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (I/O, malformed data, empty dataset, chart failure)

mod analysis;
mod charts;
mod cli;
mod config;
mod dataset;
mod error;
mod format;
mod generator;
mod models;
mod report;

use analysis::SalesSummary;
use anyhow::{Context, Result};
use charts::ChartRenderer;
use cli::{Args, Command, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use generator::{GeneratorOptions, SalesGenerator};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let command = args.command();

    // No logging needed to write a config file
    if command == Command::InitConfig {
        return handle_init_config();
    }

    init_logging(&args)?;

    info!("Salesight v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args, command) {
        error!("Pipeline failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle `init-config`: write a default .salesight.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the seed, date window, file names, and chart size.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Log lines go to stderr so that report output on stdout stays parseable.
fn init_logging(args: &Args) -> Result<()> {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Dispatch the selected pipeline stage.
fn run(args: &Args, command: Command) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(args)?;
    config.merge_with_args(args);
    debug!("Effective configuration: {:?}", config);

    match command {
        Command::Generate { .. } => run_generate(&config)?,
        Command::Analyze { format } => run_analyze(&config, format)?,
        Command::Visualize => run_visualize(&config)?,
        Command::Run => {
            run_generate(&config)?;
            run_analyze(&config, OutputFormat::Text)?;
            run_visualize(&config)?;
        }
        Command::InitConfig => handle_init_config()?,
    }

    info!("Finished in {:.1}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Generate the transaction table, save it, and print an overview.
fn run_generate(config: &Config) -> Result<()> {
    println!(
        "🎲 Generating sales data (seed {})...",
        config.generator.seed
    );

    let data_dir = &config.general.data_dir;
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let mut options = GeneratorOptions::from(&config.generator);
    options.show_progress = config.general.progress;

    let records = SalesGenerator::new(options)?.generate();
    let path = config.data_path();
    dataset::write_transactions(&path, &records)?;

    println!("\n{}", report::generate_overview(&records)?);
    println!("✅ Data saved to: {}\n", path.display());
    Ok(())
}

/// Print the aggregate report and write the summary tables.
fn run_analyze(config: &Config, format: OutputFormat) -> Result<()> {
    let records = dataset::load_transactions(&config.data_path())?;
    let summary = SalesSummary::from_records(&records, &config.report)?;

    match format {
        OutputFormat::Text => {
            println!("{}", report::generate_text_report(&summary, &config.report));
        }
        OutputFormat::Json => {
            println!("{}", report::generate_json_report(&summary)?);
        }
    }

    let written =
        report::write_summary_tables(&summary, &config.report, &config.general.data_dir)?;

    // JSON consumers get only the document on stdout.
    if format == OutputFormat::Text {
        println!("\n💾 Files saved:");
        for path in &written {
            println!("  • {}", path.display());
        }
        println!();
    }

    Ok(())
}

/// Render every chart image from the saved transaction table.
fn run_visualize(config: &Config) -> Result<()> {
    let records = dataset::load_transactions(&config.data_path())?;

    println!("🎨 Rendering charts...");
    let renderer = ChartRenderer::new(&config.charts, &config.general.data_dir);
    let written = renderer.render_all(&records)?;

    println!("✅ Charts saved:");
    for path in &written {
        println!("  • {}", path.display());
    }
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
