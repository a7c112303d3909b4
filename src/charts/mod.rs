//! Chart rendering.
//!
//! Each image is computed independently from the raw transactions and
//! written as a PNG. An image is drawn into a staging file next to its
//! target and only renamed into place once every panel drew, so a failed
//! image leaves no file behind. The remaining images are still attempted.

pub mod customer;
pub mod dashboard;
pub mod heatmap;
pub mod palette;
pub mod performance;
pub mod widgets;

use crate::config::ChartsConfig;
use crate::error::AnalysisError;
use crate::models::TransactionRecord;
use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// The images the renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Dashboard,
    CustomerAnalysis,
    Heatmap,
    PerformanceTrends,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Dashboard,
        ChartKind::CustomerAnalysis,
        ChartKind::Heatmap,
        ChartKind::PerformanceTrends,
    ];

    /// Output file name for this chart.
    pub fn file_name<'a>(&self, config: &'a ChartsConfig) -> &'a str {
        match self {
            ChartKind::Dashboard => &config.dashboard,
            ChartKind::CustomerAnalysis => &config.customer_analysis,
            ChartKind::Heatmap => &config.heatmap,
            ChartKind::PerformanceTrends => &config.performance,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Dashboard => write!(f, "dashboard overview"),
            ChartKind::CustomerAnalysis => write!(f, "customer analysis"),
            ChartKind::Heatmap => write!(f, "sales heatmap"),
            ChartKind::PerformanceTrends => write!(f, "performance trends"),
        }
    }
}

/// Writes chart images into an output directory.
pub struct ChartRenderer<'a> {
    config: &'a ChartsConfig,
    output_dir: PathBuf,
}

impl<'a> ChartRenderer<'a> {
    pub fn new(config: &'a ChartsConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            output_dir: output_dir.into(),
        }
    }

    /// Render one chart, returning the written path.
    pub fn render(&self, kind: ChartKind, records: &[TransactionRecord]) -> Result<PathBuf> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyDataset.into());
        }
        self.config.validate()?;

        let path = self.output_dir.join(kind.file_name(self.config));
        debug!("Rendering {} to {}", kind, path.display());

        self.draw(kind, records, &path)
            .with_context(|| format!("Failed to render {} chart", kind))?;

        info!("Saved {}", path.display());
        Ok(path)
    }

    /// Render every chart. Fails if any image failed, after attempting all of them.
    pub fn render_all(&self, records: &[TransactionRecord]) -> Result<Vec<PathBuf>> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyDataset.into());
        }
        self.config.validate()?;

        let mut written = Vec::new();
        let mut failed = Vec::new();

        for kind in ChartKind::ALL {
            match self.render(kind, records) {
                Ok(path) => written.push(path),
                Err(e) => {
                    error!("{:#}", e);
                    failed.push(kind.to_string());
                }
            }
        }

        if !failed.is_empty() {
            bail!(
                "{} of {} charts failed: {}",
                failed.len(),
                ChartKind::ALL.len(),
                failed.join(", ")
            );
        }

        Ok(written)
    }

    fn draw(&self, kind: ChartKind, records: &[TransactionRecord], path: &Path) -> Result<()> {
        // Dropping the backend flushes whatever was drawn, so it must target
        // the staging file, which is deleted unless persisted.
        let staging = tempfile::Builder::new()
            .prefix(".salesight-")
            .suffix(".png")
            .tempfile_in(&self.output_dir)
            .with_context(|| {
                format!("Failed to create staging file in {}", self.output_dir.display())
            })?;

        {
            let root = BitMapBackend::new(staging.path(), (self.config.width, self.config.height))
                .into_drawing_area();
            root.fill(&WHITE)?;

            match kind {
                ChartKind::Dashboard => dashboard::draw(&root, records, self.config)?,
                ChartKind::CustomerAnalysis => customer::draw(&root, records, self.config)?,
                ChartKind::Heatmap => heatmap::draw(&root, records, self.config)?,
                ChartKind::PerformanceTrends => performance::draw(&root, records, self.config)?,
            }

            root.present()
                .with_context(|| format!("Failed to encode {}", path.display()))?;
        }

        staging
            .persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::record;

    fn small_config() -> ChartsConfig {
        ChartsConfig {
            width: 640,
            height: 400,
            ..ChartsConfig::default()
        }
    }

    #[test]
    fn test_file_names_follow_config() {
        let config = ChartsConfig::default();
        let names: Vec<&str> = ChartKind::ALL.iter().map(|k| k.file_name(&config)).collect();
        assert_eq!(
            names,
            vec![
                "dashboard_overview.png",
                "customer_analysis.png",
                "sales_heatmap.png",
                "performance_trends.png"
            ]
        );
    }

    #[test]
    fn test_empty_records_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config();
        let renderer = ChartRenderer::new(&config, dir.path());

        let err = renderer.render_all(&[]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::EmptyDataset)
        );
    }

    #[test]
    fn test_single_category_renders_every_chart() {
        // Every other category is absent, so its pie slice is zero.
        let records = vec![
            record("2023-01-02", "CUST1", "Books", "Novel", 1, 10.0),
            record("2023-01-03", "CUST2", "Books", "Comic", 2, 4.0),
        ];
        let dir = tempfile::tempdir().unwrap();
        let config = small_config();
        let renderer = ChartRenderer::new(&config, dir.path());

        let paths = renderer.render_all(&records).unwrap();
        assert_eq!(paths.len(), 4);
        for (path, kind) in paths.iter().zip(ChartKind::ALL) {
            assert_eq!(path, &dir.path().join(kind.file_name(&config)));
            assert!(path.exists());
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
    }

    #[test]
    fn test_undersized_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChartsConfig {
            width: 40,
            height: 30,
            ..ChartsConfig::default()
        };
        let renderer = ChartRenderer::new(&config, dir.path());
        let records = vec![record("2023-01-02", "CUST1", "Books", "Novel", 1, 10.0)];

        for kind in ChartKind::ALL {
            assert!(renderer.render(kind, &records).is_err());
        }
        assert!(renderer.render_all(&records).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_image_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config();
        let renderer = ChartRenderer::new(&config, dir.path());
        let records = vec![record("2023-01-02", "CUST1", "Books", "Novel", 1, 10.0)];

        // A directory at the target path makes the final rename fail.
        let blocked = dir.path().join(ChartKind::Heatmap.file_name(&config));
        std::fs::create_dir(&blocked).unwrap();

        let err = renderer.render_all(&records).unwrap_err();
        assert!(err.to_string().contains("sales heatmap"));

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "customer_analysis.png",
                "dashboard_overview.png",
                "performance_trends.png",
                "sales_heatmap.png",
            ]
        );
        assert!(blocked.is_dir());
    }

    #[test]
    fn test_missing_output_dir_fails_every_chart() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config();
        let renderer = ChartRenderer::new(&config, dir.path().join("absent"));
        let records = vec![record("2023-01-02", "CUST1", "Books", "Novel", 1, 10.0)];

        assert!(renderer.render_all(&records).is_err());
    }
}
