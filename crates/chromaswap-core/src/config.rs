// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChromaError, Result};
use crate::types::ProfileMode;

/// Smallest chart edge we can draw a frame and grid into.
pub const MIN_CHART_EDGE: u32 = 64;

/// Chart canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

/// Application settings, stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding uploaded originals and derived artifacts.
    pub upload_dir: PathBuf,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: u64,
    /// Lowercase file extensions accepted for upload.
    pub allowed_extensions: Vec<String>,
    /// Quality (1-100) used when the processed image is re-encoded as JPEG.
    pub jpeg_quality: u8,
    /// Which row/column profile charts to render.
    pub profile_mode: ProfileMode,
    pub chart: ChartConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("static/uploads"),
            max_upload_bytes: 16 * 1024 * 1024,
            allowed_extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            jpeg_quality: 90,
            profile_mode: ProfileMode::Collapsed,
            chart: ChartConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        let config: Self = serde_json::from_str(&data).map_err(|err| {
            ChromaError::Config(format!("failed to parse {}: {}", path.display(), err))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write settings as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject settings the pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ChromaError::Config(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        if self.allowed_extensions.is_empty() {
            return Err(ChromaError::Config(
                "allowed_extensions must not be empty".into(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(ChromaError::Config(
                "max_upload_bytes must be greater than zero".into(),
            ));
        }
        if self.chart.width < MIN_CHART_EDGE || self.chart.height < MIN_CHART_EDGE {
            return Err(ChromaError::Config(format!(
                "chart must be at least {MIN_CHART_EDGE}x{MIN_CHART_EDGE} pixels, got {}x{}",
                self.chart.width, self.chart.height
            )));
        }
        Ok(())
    }

    /// Whether `ext` (without the dot) is on the upload allow-list.
    pub fn allows_extension(&self, ext: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}
