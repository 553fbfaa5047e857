// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Row and column intensity profiles.
//
// `row_profile` / `column_profile` collapse both the orthogonal spatial axis
// and the channel axis into one mean per position. The `*_channel_profiles`
// variants keep the channels apart and return one series per channel.
// Sums are accumulated in u64 and divided as f64.

use chromaswap_core::error::Result;
use chromaswap_core::types::Channel;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{CHANNELS, ensure_non_empty};

/// One mean series per channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelProfiles {
    pub red: Vec<f64>,
    pub green: Vec<f64>,
    pub blue: Vec<f64>,
}

impl ChannelProfiles {
    pub fn channel(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    fn from_sums(sums: Vec<[u64; CHANNELS]>, count: u64) -> Self {
        let divisor = count as f64;
        let series = |c: usize| -> Vec<f64> {
            sums.iter().map(|s| s[c] as f64 / divisor).collect()
        };
        Self {
            red: series(0),
            green: series(1),
            blue: series(2),
        }
    }
}

/// Mean of all samples in each row (over every column and channel).
/// Length equals the image height.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn row_profile(image: &RgbImage) -> Result<Vec<f64>> {
    ensure_non_empty(image)?;
    let per_row = f64::from(image.width()) * CHANNELS as f64;
    Ok(image
        .rows()
        .map(|row| row.map(pixel_sum).sum::<u64>() as f64 / per_row)
        .collect())
}

/// Mean of all samples in each column (over every row and channel).
/// Length equals the image width.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn column_profile(image: &RgbImage) -> Result<Vec<f64>> {
    ensure_non_empty(image)?;
    let mut sums = vec![0u64; image.width() as usize];
    for (x, _, pixel) in image.enumerate_pixels() {
        sums[x as usize] += pixel_sum(pixel);
    }
    let per_column = f64::from(image.height()) * CHANNELS as f64;
    Ok(sums.into_iter().map(|s| s as f64 / per_column).collect())
}

/// Per-channel mean over the columns of each row.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn row_channel_profiles(image: &RgbImage) -> Result<ChannelProfiles> {
    ensure_non_empty(image)?;
    let sums = image
        .rows()
        .map(|row| {
            row.fold([0u64; CHANNELS], |mut acc, pixel| {
                accumulate(&mut acc, pixel);
                acc
            })
        })
        .collect();
    Ok(ChannelProfiles::from_sums(sums, u64::from(image.width())))
}

/// Per-channel mean over the rows of each column.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn column_channel_profiles(image: &RgbImage) -> Result<ChannelProfiles> {
    ensure_non_empty(image)?;
    let mut sums = vec![[0u64; CHANNELS]; image.width() as usize];
    for (x, _, pixel) in image.enumerate_pixels() {
        accumulate(&mut sums[x as usize], pixel);
    }
    Ok(ChannelProfiles::from_sums(sums, u64::from(image.height())))
}

/// Rescale a byte-range profile to [0.0, 1.0].
pub fn to_unit_scale(profile: &[f64]) -> Vec<f64> {
    profile.iter().map(|v| v / 255.0).collect()
}

fn pixel_sum(pixel: &image::Rgb<u8>) -> u64 {
    pixel.0.iter().map(|&v| u64::from(v)).sum()
}

fn accumulate(acc: &mut [u64; CHANNELS], pixel: &image::Rgb<u8>) {
    for (sum, &value) in acc.iter_mut().zip(pixel.0.iter()) {
        *sum += u64::from(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromaswap_core::error::ChromaError;
    use image::Rgb;

    fn fixture() -> RgbImage {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        img.put_pixel(1, 0, Rgb([40, 50, 60]));
        img.put_pixel(0, 1, Rgb([70, 80, 90]));
        img.put_pixel(1, 1, Rgb([100, 110, 120]));
        img
    }

    #[test]
    fn black_pixel_profiles_are_zero() {
        let img = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
        assert_eq!(row_profile(&img).unwrap(), vec![0.0]);
        assert_eq!(column_profile(&img).unwrap(), vec![0.0]);
    }

    #[test]
    fn uniform_image_gives_constant_profiles() {
        let img = RgbImage::from_pixel(6, 4, Rgb([37, 37, 37]));
        let rows = row_profile(&img).unwrap();
        let cols = column_profile(&img).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(cols.len(), 6);
        assert!(rows.iter().chain(cols.iter()).all(|&v| v == 37.0));
    }

    #[test]
    fn collapsed_profiles_average_channels_too() {
        let img = fixture();
        // Row 0: (10+20+30+40+50+60) / 6 = 35, row 1: (70..120) / 6 = 95.
        assert_eq!(row_profile(&img).unwrap(), vec![35.0, 95.0]);
        // Column 0: (10+20+30+70+80+90) / 6 = 50, column 1: 80.
        assert_eq!(column_profile(&img).unwrap(), vec![50.0, 80.0]);
    }

    #[test]
    fn means_are_not_truncated() {
        let mut img = RgbImage::from_pixel(2, 1, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([1, 0, 0]));
        let rows = row_profile(&img).unwrap();
        assert!((rows[0] - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn channel_profiles_keep_channels_apart() {
        let img = fixture();
        let rows = row_channel_profiles(&img).unwrap();
        assert_eq!(rows.red, vec![25.0, 85.0]);
        assert_eq!(rows.green, vec![35.0, 95.0]);
        assert_eq!(rows.blue, vec![45.0, 105.0]);

        let cols = column_channel_profiles(&img).unwrap();
        assert_eq!(cols.channel(Channel::Red), &[40.0, 70.0]);
        assert_eq!(cols.channel(Channel::Blue), &[60.0, 90.0]);
    }

    #[test]
    fn unit_scale_divides_by_255() {
        assert_eq!(to_unit_scale(&[0.0, 255.0, 51.0]), vec![0.0, 1.0, 0.2]);
    }

    #[test]
    fn empty_image_is_rejected() {
        let img = RgbImage::new(3, 0);
        assert!(matches!(row_profile(&img), Err(ChromaError::EmptyImage)));
        assert!(matches!(column_profile(&img), Err(ChromaError::EmptyImage)));
        assert!(matches!(row_channel_profiles(&img), Err(ChromaError::EmptyImage)));
        assert!(matches!(column_channel_profiles(&img), Err(ChromaError::EmptyImage)));
    }
}
