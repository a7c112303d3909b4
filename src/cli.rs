//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values. No flag is required:
//! running the binary bare executes the whole pipeline against the
//! fixed default paths.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Salesight - synthetic retail sales pipeline
///
/// Generates a reproducible transaction dataset, prints an aggregate
/// sales report, and renders chart images from it.
///
/// Examples:
///   salesight
///   salesight generate --seed 7
///   salesight analyze --format json
///   salesight visualize --data-dir ./out
///   salesight init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Pipeline stage to run (defaults to `run`, all stages in order)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .salesight.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for the data file and all generated artifacts
    #[arg(short, long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Pipeline stages.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate the synthetic transaction table
    Generate {
        /// Override the configured random seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the aggregate report and write the summary tables
    Analyze {
        /// Report format (text, json)
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,
    },
    /// Render the chart images
    Visualize,
    /// Run generate, analyze, and visualize in order
    Run,
    /// Write a default .salesight.toml configuration file
    InitConfig,
}

/// Output format for the aggregate report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sections (default)
    #[default]
    Text,
    /// JSON document of the computed summary
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The selected stage, falling back to the full pipeline.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }

    /// Seed given on the `generate` subcommand, if any.
    pub fn seed_override(&self) -> Option<u64> {
        match self.command {
            Some(Command::Generate { seed }) => seed,
            _ => None,
        }
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref config_path) = self.config {
            if !config_path.is_file() {
                return Err(format!(
                    "Config file does not exist: {}",
                    config_path.display()
                ));
            }
        }

        // The directory may be created by `generate`, but must not be a file.
        if let Some(ref dir) = self.data_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(format!("Data path is not a directory: {}", dir.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            command: None,
            config: None,
            data_dir: None,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_bare_invocation_runs_pipeline() {
        let args = Args::try_parse_from(["salesight"]).unwrap();
        assert_eq!(args.command(), Command::Run);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_parse_subcommands() {
        let args = Args::try_parse_from(["salesight", "analyze", "--format", "json"]).unwrap();
        assert_eq!(
            args.command(),
            Command::Analyze {
                format: OutputFormat::Json
            }
        );

        let args = Args::try_parse_from(["salesight", "generate", "--seed", "9", "-v"]).unwrap();
        assert_eq!(args.seed_override(), Some(9));
        assert!(args.verbose);
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_config() {
        let mut args = make_args();
        args.config = Some(PathBuf::from("/definitely/not/here.toml"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
