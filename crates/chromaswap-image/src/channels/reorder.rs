// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Channel reordering. Output slot `i` receives the input channel named by
// position `i` of the order, so `BGR` swaps the red and blue planes.

use chromaswap_core::error::Result;
use chromaswap_core::types::ChannelOrder;
use image::{DynamicImage, RgbImage};
use tracing::{debug, instrument};

use crate::image::normalize::normalize;

/// Permute the channels of an RGB image.
///
/// Width and height are preserved. The identity order returns an equal copy.
#[instrument(skip_all, fields(width = image.width(), height = image.height(), order = %order))]
pub fn reorder(image: &RgbImage, order: ChannelOrder) -> RgbImage {
    let mut out = image.clone();
    if order.is_identity() {
        return out;
    }

    let [r, g, b] = order.indices();
    for pixel in out.pixels_mut() {
        let source = pixel.0;
        pixel.0 = [source[r], source[g], source[b]];
    }
    debug!("Channels reordered");
    out
}

/// Parse `spec`, normalise `image` to RGB, then reorder.
///
/// The order is validated before any pixel is touched, so a malformed spec
/// fails with `InvalidOrderSpec` regardless of the image.
pub fn reorder_with_spec(image: &DynamicImage, spec: &str) -> Result<RgbImage> {
    let order = ChannelOrder::parse(spec)?;
    let rgb = normalize(image)?;
    Ok(reorder(&rgb, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromaswap_core::error::ChromaError;
    use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};

    /// The 2x2 fixture `[[(10,20,30), (40,50,60)], [(70,80,90), (100,110,120)]]`.
    fn fixture() -> RgbImage {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        img.put_pixel(1, 0, Rgb([40, 50, 60]));
        img.put_pixel(0, 1, Rgb([70, 80, 90]));
        img.put_pixel(1, 1, Rgb([100, 110, 120]));
        img
    }

    fn noise(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let seed = x.wrapping_mul(73).wrapping_add(y.wrapping_mul(151));
            Rgb([seed as u8, (seed >> 3) as u8, (seed ^ 0x5a) as u8])
        })
    }

    #[test]
    fn bgr_swaps_red_and_blue() {
        let out = reorder(&fixture(), ChannelOrder::parse("BGR").unwrap());
        assert_eq!(out.get_pixel(0, 0), &Rgb([30, 20, 10]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([60, 50, 40]));
        assert_eq!(out.get_pixel(0, 1), &Rgb([90, 80, 70]));
        assert_eq!(out.get_pixel(1, 1), &Rgb([120, 110, 100]));
    }

    #[test]
    fn gbr_reads_sources_by_position() {
        let out = reorder(&fixture(), ChannelOrder::parse("GBR").unwrap());
        assert_eq!(out.get_pixel(0, 0), &Rgb([20, 30, 10]));
    }

    #[test]
    fn identity_preserves_content() {
        let img = noise(7, 5);
        assert_eq!(reorder(&img, ChannelOrder::IDENTITY), img);
    }

    #[test]
    fn every_order_is_undone_by_its_inverse() {
        let img = noise(9, 4);
        for order in ChannelOrder::ALL {
            let there = reorder(&img, order);
            let back = reorder(&there, order.inverse());
            assert_eq!(back, img, "order {order}");
            assert_eq!(there.dimensions(), img.dimensions());
        }
    }

    #[test]
    fn grayscale_is_unchanged_by_any_order() {
        let gray = GrayImage::from_fn(4, 3, |x, y| Luma([(x * 40 + y) as u8]));
        let gray = DynamicImage::ImageLuma8(gray);
        let expanded = normalize(&gray).unwrap();
        for order in ChannelOrder::ALL {
            let out = reorder_with_spec(&gray, &order.to_string()).expect("reorder gray");
            assert_eq!(out, expanded);
        }
    }

    #[test]
    fn alpha_never_survives() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 4])));
        let out = reorder_with_spec(&rgba, "BRG").expect("reorder rgba");
        assert_eq!(out.get_pixel(0, 0), &Rgb([3, 1, 2]));
    }

    #[test]
    fn malformed_spec_is_rejected_before_processing() {
        let img = DynamicImage::ImageRgb8(fixture());
        match reorder_with_spec(&img, "RRB") {
            Err(ChromaError::InvalidOrderSpec(spec)) => assert_eq!(spec, "RRB"),
            other => panic!("expected InvalidOrderSpec, got {other:?}"),
        }
    }

    #[test]
    fn empty_image_reorders_to_empty_image() {
        let out = reorder(&RgbImage::new(0, 0), ChannelOrder::parse("BGR").unwrap());
        assert_eq!(out.dimensions(), (0, 0));
    }
}
