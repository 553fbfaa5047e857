// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON reports written next to the processed image, or printed by `stats`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chromaswap_core::error::Result;
use chromaswap_core::types::{ChannelOrder, ProfileMode};
use chromaswap_image::{
    ChannelHistogram, ChannelProfiles, ImageProcessor, column_channel_profiles, row_channel_profiles,
};
use chromaswap_storage::StoredUpload;

/// A row or column profile in whichever contract was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "values", rename_all = "kebab-case")]
pub enum Profile {
    Collapsed(Vec<f64>),
    PerChannel(ChannelProfiles),
}

impl Profile {
    /// Number of positions along the profiled axis.
    pub fn len(&self) -> usize {
        match self {
            Self::Collapsed(values) => values.len(),
            Self::PerChannel(profiles) => profiles.red.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Row and column profiles of one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profiles {
    pub rows: Profile,
    pub columns: Profile,
}

impl Profiles {
    pub fn compute(image: &ImageProcessor, mode: ProfileMode) -> Result<Self> {
        Ok(match mode {
            ProfileMode::Collapsed => Self {
                rows: Profile::Collapsed(image.row_profile()?),
                columns: Profile::Collapsed(image.column_profile()?),
            },
            ProfileMode::PerChannel => Self {
                rows: Profile::PerChannel(row_channel_profiles(image.as_rgb())?),
                columns: Profile::PerChannel(column_channel_profiles(image.as_rgb())?),
            },
        })
    }
}

/// File names (inside the upload directory) of every rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartFiles {
    pub histogram_original: String,
    pub histogram_processed: String,
    pub row_profile: String,
    pub column_profile: String,
}

/// Everything produced for one processed upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessReport {
    pub generated_at: DateTime<Utc>,
    pub order: ChannelOrder,
    pub upload: StoredUpload,
    pub processed_image: String,
    pub width: u32,
    pub height: u32,
    pub charts: ChartFiles,
    pub histogram_original: ChannelHistogram,
    pub histogram_processed: ChannelHistogram,
    /// Profiles of the original image.
    pub profiles: Profiles,
}

/// Statistics of a single image, printed by `chromaswap stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub width: u32,
    pub height: u32,
    pub histogram: ChannelHistogram,
    pub profiles: Profiles,
}

impl StatsReport {
    pub fn compute(image: &ImageProcessor, mode: ProfileMode) -> Result<Self> {
        Ok(Self {
            width: image.width(),
            height: image.height(),
            histogram: image.histogram()?,
            profiles: Profiles::compute(image, mode)?,
        })
    }
}
