// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-channel intensity histograms over fixed unit-width bins [0, 256).

use chromaswap_core::error::Result;
use chromaswap_core::types::Channel;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{CHANNELS, ensure_non_empty};

/// Number of bins per channel, one per 8-bit intensity.
pub const BINS: usize = 256;

/// Bin counts for the red, green and blue channels. Each `Vec` has 256 entries.
///
/// Bin edges never depend on the data, so histograms of different images are
/// directly comparable bin by bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelHistogram {
    pub red: Vec<u32>,
    pub green: Vec<u32>,
    pub blue: Vec<u32>,
}

impl ChannelHistogram {
    pub fn channel(&self, channel: Channel) -> &[u32] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Sum of all bins for one channel; equals width x height.
    pub fn total(&self, channel: Channel) -> u64 {
        self.channel(channel).iter().map(|&c| u64::from(c)).sum()
    }

    /// Largest single bin across all channels.
    pub fn peak(&self) -> u32 {
        Channel::ALL
            .iter()
            .flat_map(|&c| self.channel(c).iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// The `(hist_r, hist_g, hist_b)` form.
    pub fn into_tuple(self) -> (Vec<u32>, Vec<u32>, Vec<u32>) {
        (self.red, self.green, self.blue)
    }
}

/// Count every pixel of every channel into its intensity bin.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn histogram(image: &RgbImage) -> Result<ChannelHistogram> {
    ensure_non_empty(image)?;

    let mut bins = [[0u32; BINS]; CHANNELS];
    for pixel in image.pixels() {
        for (channel_bins, &value) in bins.iter_mut().zip(pixel.0.iter()) {
            channel_bins[usize::from(value)] += 1;
        }
    }

    let [red, green, blue] = bins;
    let hist = ChannelHistogram {
        red: red.to_vec(),
        green: green.to_vec(),
        blue: blue.to_vec(),
    };
    debug!(peak = hist.peak(), "Histogram computed");
    Ok(hist)
}
