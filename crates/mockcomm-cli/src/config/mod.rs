//! Configuration loading for mockcomm.
//! Reads mockcomm.toml from the current directory or path in MOCKCOMM_CONFIG env var.
//! Every field has a default, so a missing file runs against the standard D6322 exports.

use anyhow::Context;
use mockcomm_profile::loader::MEASURED_SKIP_ROWS;
use mockcomm_profile::ColumnOverrides;
use mockcomm_report::chart::{DEFAULT_HEIGHT, DEFAULT_LABEL_THRESHOLD_PCT, DEFAULT_WIDTH};
use mockcomm_report::ChartOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inputs: InputConfig,
    #[serde(default)]
    pub columns: ColumnOverrides,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_expected_file")]
    pub expected: PathBuf,
    #[serde(default = "default_measured_file")]
    pub measured: PathBuf,
    #[serde(default = "default_measured_skip_rows")]
    pub measured_skip_rows: usize,
}

fn default_expected_file()      -> PathBuf { PathBuf::from("ZymoD6322_expected_profile.csv") }
fn default_measured_file()      -> PathBuf { PathBuf::from("ZymoD6322_3296B_classification_rates.csv") }
fn default_measured_skip_rows() -> usize   { MEASURED_SKIP_ROWS }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            expected: default_expected_file(),
            measured: default_measured_file(),
            measured_skip_rows: default_measured_skip_rows(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_species_chart")]
    pub species_chart: PathBuf,
    #[serde(default = "default_phylum_chart")]
    pub phylum_chart: PathBuf,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_label_threshold")]
    pub label_threshold_pct: f64,
    /// Open each chart in the system image viewer after writing it.
    #[serde(default = "default_show")]
    pub show: bool,
}

fn default_species_chart()   -> PathBuf { PathBuf::from("zymo_species_comparison.png") }
fn default_phylum_chart()    -> PathBuf { PathBuf::from("zymo_phylum_comparison.png") }
fn default_width()           -> u32     { DEFAULT_WIDTH }
fn default_height()          -> u32     { DEFAULT_HEIGHT }
fn default_label_threshold() -> f64     { DEFAULT_LABEL_THRESHOLD_PCT }
fn default_show()            -> bool    { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            species_chart: default_species_chart(),
            phylum_chart: default_phylum_chart(),
            width: default_width(),
            height: default_height(),
            label_threshold_pct: default_label_threshold(),
            show: default_show(),
        }
    }
}

impl OutputConfig {
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            width: self.width,
            height: self.height,
            label_threshold_pct: self.label_threshold_pct,
        }
    }
}


impl Config {
    /// Load configuration from mockcomm.toml.
    /// Checks MOCKCOMM_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("MOCKCOMM_CONFIG")
            .unwrap_or_else(|_| "mockcomm.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        tracing::info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.output.width == 0 || self.output.height == 0 {
            anyhow::bail!(
                "Chart size must be non-zero (got {}x{})",
                self.output.width,
                self.output.height
            );
        }
        if !self.output.label_threshold_pct.is_finite() || self.output.label_threshold_pct < 0.0 {
            anyhow::bail!(
                "label_threshold_pct must be a non-negative number (got {})",
                self.output.label_threshold_pct
            );
        }
        Ok(())
    }
}
