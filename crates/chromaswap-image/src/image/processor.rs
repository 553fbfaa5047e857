// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: Decode, normalise, reorder, measure, encode. Operates on
// in-memory RGB images using the `image` crate.

use chromaswap_core::error::{ChromaError, Result};
use chromaswap_core::types::{ChannelOrder, ImageKind};
use image::{DynamicImage, ImageFormat, RgbImage};
use tracing::{debug, info, instrument};

use crate::channels::reorder::reorder;
use crate::image::normalize::normalize;
use crate::stats::histogram::{ChannelHistogram, histogram};
use crate::stats::profile::{column_profile, row_profile};

/// Processing pipeline operating on a single normalised RGB image.
///
/// Transformations consume `self` and return a new `ImageProcessor`, enabling
/// method chaining:
///
/// ```ignore
/// let png = ImageProcessor::open("photo.jpg")?
///     .reorder("BGR".parse()?)
///     .to_png_bytes()?;
/// ```
pub struct ImageProcessor {
    /// The current working image, always three 8-bit channels.
    image: RgbImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load and normalise an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            ChromaError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Self::from_dynamic(&img)
    }

    /// Decode and normalise raw encoded bytes (JPEG, PNG, GIF).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| ChromaError::ImageError(format!("failed to decode image: {}", err)))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Self::from_dynamic(&img)
    }

    /// Normalise an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        Ok(Self {
            image: normalize(image)?,
        })
    }

    /// Wrap an RGB image as-is.
    pub fn from_rgb(image: RgbImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_rgb(self) -> RgbImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Rearrange the colour channels.
    pub fn reorder(self, order: ChannelOrder) -> Self {
        Self {
            image: reorder(&self.image, order),
        }
    }

    // -- Statistics -----------------------------------------------------------

    pub fn histogram(&self) -> Result<ChannelHistogram> {
        histogram(&self.image)
    }

    pub fn row_profile(&self) -> Result<Vec<f64>> {
        row_profile(&self.image)
    }

    pub fn column_profile(&self) -> Result<Vec<f64>> {
        column_profile(&self.image)
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        encode_png(&self.image)
    }

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        self.image
            .write_with_encoder(encoder)
            .map_err(|err| ChromaError::ImageError(format!("JPEG encoding failed: {}", err)))?;
        Ok(buffer)
    }

    /// Encode in the given upload format. `quality` only applies to JPEG.
    #[instrument(skip(self), fields(kind = kind.mime_type()))]
    pub fn encode(&self, kind: ImageKind, quality: u8) -> Result<Vec<u8>> {
        match kind {
            ImageKind::Jpeg => self.to_jpeg_bytes(quality),
            ImageKind::Png => self.to_png_bytes(),
            ImageKind::Gif => {
                // The GIF encoder works on RGBA frames.
                let rgba = DynamicImage::ImageRgb8(self.image.clone()).into_rgba8();
                encode_to_format(&DynamicImage::ImageRgba8(rgba), ImageFormat::Gif)
            }
        }
    }

    /// Write the image to a file. The format is inferred from the file extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.image.save(path.as_ref()).map_err(|err| {
            ChromaError::ImageError(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}

/// Encode an RGB canvas as PNG.
pub(crate) fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    encode_to_format(&DynamicImage::ImageRgb8(image.clone()), ImageFormat::Png)
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| ChromaError::ImageError(format!("image encoding failed: {}", err)))?;
    Ok(buffer)
}
