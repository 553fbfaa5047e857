// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// chromaswap-image: Pixel-level work for Chromaswap.
//
// Provides image normalisation to 3-channel RGB, channel reordering, per-channel
// histograms, row/column intensity profiles, and stateless chart rendering that
// turns those statistics into titled, labelled PNG buffers.

pub mod channels;
pub mod chart;
pub mod image;
pub mod stats;

// Re-export the primary entry points so callers can use `chromaswap_image::reorder` etc.
pub use crate::channels::reorder::{reorder, reorder_with_spec};
pub use crate::chart::render::{
    ChartLabels, Series, channel_profile_chart, histogram_chart, profile_chart,
    render_line_chart,
};
pub use crate::image::normalize::{from_raw_samples, normalize};
pub use crate::image::processor::ImageProcessor;
pub use crate::stats::histogram::{ChannelHistogram, histogram};
pub use crate::stats::profile::{
    ChannelProfiles, column_channel_profiles, column_profile, row_channel_profiles, row_profile,
    to_unit_scale,
};
