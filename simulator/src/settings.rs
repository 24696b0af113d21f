//! Simulator settings loaded from a TOML file.
//!
//! ```toml
//! metrics = ["GRADE_GPS", "LEAD_TTC", "HVB_WATTVOLT", "COOLANT_TEMP"]
//! max_rows = 5
//! max_columns = 2
//! units = "imperial"
//! neighbor_widths = [140]
//!
//! [[taps]]
//! frame = 120
//! x = 1180
//! y = 200
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use panel_common::config::{DEFAULT_MAX_ROWS, MAX_COLUMNS};
use panel_common::{PanelConfig, TelemetryPanel};
use serde::Deserialize;

const DEFAULT_METRICS: [&str; 7] = [
    "GRADE_GPS",
    "LEAD_TTC",
    "LEAD_DISTANCE_LENGTH",
    "STEERING_ANGLE",
    "HVB_WATTVOLT",
    "EV_EFF_NOW",
    "ENGINE_RPM_TEMP",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

/// A scripted touch at a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Tap {
    pub frame: u32,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimSettings {
    pub metrics: Vec<String>,
    pub max_rows: usize,
    pub max_columns: usize,
    pub units: Units,
    /// Widths of widgets placed between the anchor and the panel.
    pub neighbor_widths: Vec<u32>,
    pub taps: Vec<Tap>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            metrics: DEFAULT_METRICS.iter().map(|s| (*s).to_owned()).collect(),
            max_rows: DEFAULT_MAX_ROWS,
            max_columns: MAX_COLUMNS,
            units: Units::Metric,
            neighbor_widths: Vec::new(),
            taps: Vec::new(),
        }
    }
}

impl SimSettings {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> { toml::from_str(s) }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn panel_config(&self) -> Result<PanelConfig> {
        let config = PanelConfig::from_keys(
            self.metrics.iter().map(String::as_str),
            self.max_rows,
            self.max_columns,
            self.units == Units::Metric,
        )?;
        Ok(config)
    }

    pub fn build_panel(&self) -> Result<TelemetryPanel> { Ok(TelemetryPanel::new(self.panel_config()?)) }

    /// Taps scheduled for `frame`.
    pub fn taps_at(
        &self,
        frame: u32,
    ) -> impl Iterator<Item = &Tap> + '_ {
        self.taps.iter().filter(move |tap| tap.frame == frame)
    }
}
