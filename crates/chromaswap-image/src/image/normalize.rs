// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Normalisation to exactly three 8-bit channels.
//
//   1 channel  (gray)        -> value broadcast to R, G and B
//   3 channels (RGB)         -> unchanged
//   4 channels (RGBA)        -> alpha dropped, never composited
//   2 channels (gray+alpha)  -> UnsupportedChannelCount(2)

use chromaswap_core::error::{ChromaError, Result};
use image::{DynamicImage, RgbImage};
use tracing::debug;

/// Reduce a decoded image to 8-bit RGB.
///
/// 16-bit and floating point sources are scaled down to 8 bits first.
pub fn normalize(image: &DynamicImage) -> Result<RgbImage> {
    let rgb = match image {
        DynamicImage::ImageRgb8(rgb) => rgb.clone(),
        DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => {
            return Err(ChromaError::UnsupportedChannelCount(2));
        }
        other => other.to_rgb8(),
    };
    debug!(
        width = rgb.width(),
        height = rgb.height(),
        source_channels = image.color().channel_count(),
        "Image normalised to RGB"
    );
    Ok(rgb)
}

/// Build an RGB image from interleaved 8-bit samples with 1, 3 or 4 channels.
pub fn from_raw_samples(
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<u8>,
) -> Result<RgbImage> {
    if !matches!(channels, 1 | 3 | 4) {
        return Err(ChromaError::UnsupportedChannelCount(channels));
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(channels as usize))
        .ok_or_else(|| ChromaError::ImageError(format!("{width}x{height} image is too large")))?;
    if samples.len() != expected {
        return Err(ChromaError::ImageError(format!(
            "expected {expected} samples for {width}x{height}x{channels}, got {}",
            samples.len()
        )));
    }

    let rgb_samples = match channels {
        3 => samples,
        1 => samples.iter().flat_map(|&v| [v, v, v]).collect(),
        _ => samples
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
    };

    RgbImage::from_raw(width, height, rgb_samples)
        .ok_or_else(|| ChromaError::ImageError("sample buffer does not match dimensions".into()))
}
