//! Grid configuration loading for orthotree.
//!
//! A [`GridConfig`] describes the shape of a grid and the value its cells
//! start with. It can be read from JSON or YAML and turned into a
//! [`SegmentTree`] once the caller picks the number of axes.

use anyhow::Context;
use orthotree::{SegmentTree, TreeError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Configuration format types supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    #[default]
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from a file extension, falling back to YAML.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Shape and initial contents of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Per-axis extents; one entry per axis
    pub extents: Vec<i64>,

    /// Value every cell starts with
    #[serde(default)]
    pub fill: i64,
}

impl GridConfig {
    pub fn new(extents: impl Into<Vec<i64>>) -> Self {
        Self {
            extents: extents.into(),
            fill: 0,
        }
    }

    /// Set the initial cell value
    pub fn with_fill(mut self, fill: i64) -> Self {
        self.fill = fill;
        self
    }

    /// Number of axes described.
    pub fn dimensions(&self) -> usize {
        self.extents.len()
    }

    /// Check that every extent is positive and the grid is addressable.
    pub fn validate(&self) -> Result<(), TreeError> {
        if let Some(axis) = self.extents.iter().position(|&extent| extent <= 0) {
            return Err(TreeError::InvalidExtent {
                axis,
                extent: self.extents[axis],
            });
        }
        self.extents
            .iter()
            .try_fold(1i64, |acc, &extent| acc.checked_mul(extent))
            .ok_or(TreeError::CapacityOverflow)?;
        Ok(())
    }

    /// The extents as a fixed-size array for a `D`-axis tree.
    pub fn extents_array<const D: usize>(&self) -> Result<[i64; D], TreeError> {
        <[i64; D]>::try_from(self.extents.as_slice()).map_err(|_| TreeError::AxisCountMismatch {
            expected: D,
            actual: self.extents.len(),
        })
    }

    /// Build a tree with every cell set to `fill`.
    pub fn build<const D: usize>(&self) -> Result<SegmentTree<D>, TreeError> {
        self.validate()?;
        let extents = self.extents_array::<D>()?;
        SegmentTree::filled(extents, self.fill)
    }

    pub fn from_json_str(input: &str) -> anyhow::Result<Self> {
        serde_json::from_str(input).context("Failed to parse JSON grid config")
    }

    pub fn from_yaml_str(input: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(input).context("Failed to parse YAML grid config")
    }
}

/// Load and validate a grid configuration from a file
pub fn load_config<P: Into<PathBuf>>(path: P) -> anyhow::Result<GridConfig> {
    let path = path.into();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid config {}", path.display()))?;

    let config = match ConfigFormat::from_path(&path) {
        ConfigFormat::Json => GridConfig::from_json_str(&contents)?,
        ConfigFormat::Yaml => GridConfig::from_yaml_str(&contents)?,
    };
    config
        .validate()
        .with_context(|| format!("Invalid grid config {}", path.display()))?;

    debug!(path = %path.display(), extents = ?config.extents, "loaded grid config");
    Ok(config)
}

/// Save a grid configuration to a file
pub fn save_config<P: Into<PathBuf>>(config: &GridConfig, path: P) -> anyhow::Result<()> {
    let path = path.into();
    let contents = match ConfigFormat::from_path(&path) {
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .context("Failed to serialize JSON grid config")?,
        ConfigFormat::Yaml => {
            serde_yaml::to_string(config).context("Failed to serialize YAML grid config")?
        }
    };

    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write grid config {}", path.display()))?;
    Ok(())
}
