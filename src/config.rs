//! Runtime configuration.
//!
//! Read once at startup, then passed down explicitly. The cleaning stages
//! only ever see this struct; they never touch the environment, which keeps
//! them deterministic and testable in isolation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the raw workbooks.
    pub raw_data_dir: PathBuf,
    /// Directory the cleaned CSVs are written to.
    pub interim_data_dir: PathBuf,
    /// Cost-of-living workbook filename, relative to `raw_data_dir`.
    pub cpih_file: String,
    /// Passenger journeys workbook filename, relative to `raw_data_dir`.
    pub journeys_file: String,
    /// Earliest period retained in either series.
    pub series_start: NaiveDate,
    pub category_filter: CategoryFilter,
}

/// Row-selection rules for the cost-of-living sheet.
///
/// A row is retained when its category label contains any of `phrases`, or
/// contains `code_fragment`. The fragment rule ("07") catches every
/// transport subcategory across releases that reworded their labels.
/// Retained labels are logged at debug level for auditing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CategoryFilter {
    pub phrases: Vec<String>,
    pub code_fragment: String,
}

impl CategoryFilter {
    pub fn matches(&self, label: &str) -> bool {
        self.phrases.iter().any(|p| label.contains(p.as_str()))
            || label.contains(&self.code_fragment)
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter {
            phrases: [
                "Overall Index",
                "Gas",
                "Electricity",
                "Liquid fuels",
                "Transport",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            code_fragment: "07".to_string(),
        }
    }
}

impl Config {
    /// Load from `config.toml` in the working directory when present,
    /// otherwise fall back to defaults rooted at `PROJECT_ROOT`.
    pub fn load() -> Result<Self> {
        let path = Path::new("config.toml");
        if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config = toml::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            return Ok(config);
        }
        Ok(Self::default())
    }

    pub fn cpih_path(&self) -> PathBuf {
        self.raw_data_dir.join(&self.cpih_file)
    }

    pub fn journeys_path(&self) -> PathBuf {
        self.raw_data_dir.join(&self.journeys_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        let root = std::env::var("PROJECT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        Config {
            raw_data_dir: root.join("data").join("raw"),
            interim_data_dir: root.join("data").join("interim"),
            cpih_file: "cpih.xlsx".to_string(),
            journeys_file: "passenger_journeys_by_ticket_type.ods".to_string(),
            series_start: default_series_start(),
            category_filter: CategoryFilter::default(),
        }
    }
}

/// Both series are truncated to periods from 2010 onwards.
fn default_series_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()
}
