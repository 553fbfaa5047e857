// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Statistics module: Histograms and axis-wise mean profiles.

use chromaswap_core::error::{ChromaError, Result};
use image::RgbImage;

pub mod histogram;
pub mod profile;

/// Number of channels every statistic is computed over.
pub(crate) const CHANNELS: usize = 3;

/// Fail with `EmptyImage` when there is nothing to measure.
pub(crate) fn ensure_non_empty(image: &RgbImage) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ChromaError::EmptyImage);
    }
    Ok(())
}
