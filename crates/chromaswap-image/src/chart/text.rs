// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text for chart titles, axis labels, ticks and legends.
//
// The font is compiled into the binary (DejaVu Sans, see
// assets/DejaVuSans-LICENSE.txt) so rendering never depends on what is
// installed on the host.

use ab_glyph::{FontRef, PxScale};
use chromaswap_core::error::{ChromaError, Result};
use image::{Rgb, RgbImage, imageops};
use imageproc::drawing::{draw_text_mut, text_size};

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// A font at one size.
pub(crate) struct Pen {
    font: FontRef<'static>,
    scale: PxScale,
}

impl Pen {
    /// Text size for a canvas `height` pixels tall.
    pub(crate) fn for_canvas(height: u32) -> Result<Self> {
        let font = FontRef::try_from_slice(DEJAVU_SANS)
            .map_err(|err| ChromaError::Chart(format!("embedded font is unreadable: {err}")))?;
        let px = (height as f32 / 30.0).clamp(10.0, 24.0);
        Ok(Self {
            font,
            scale: PxScale::from(px),
        })
    }

    /// Vertical space reserved for one line of text.
    pub(crate) fn line_height(&self) -> u32 {
        (self.scale.y * 1.4).ceil() as u32
    }

    pub(crate) fn width(&self, text: &str) -> u32 {
        text_size(self.scale, &self.font, text).0
    }

    pub(crate) fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }

    /// Draw `text` horizontally centred on `center_x`.
    pub(crate) fn draw_centered(
        &self,
        canvas: &mut RgbImage,
        color: Rgb<u8>,
        center_x: i32,
        y: i32,
        text: &str,
    ) {
        let x = center_x - self.width(text) as i32 / 2;
        self.draw(canvas, color, x, y, text);
    }

    /// Draw `text` reading bottom to top, centred on `center_y`.
    ///
    /// The text is laid out on a strip of `background` and rotated into
    /// place, so the strip must match what is underneath.
    pub(crate) fn draw_vertical(
        &self,
        canvas: &mut RgbImage,
        color: Rgb<u8>,
        background: Rgb<u8>,
        x: i32,
        center_y: i32,
        text: &str,
    ) {
        let width = self.width(text);
        if width == 0 {
            return;
        }
        let mut strip = RgbImage::from_pixel(width + 2, self.line_height(), background);
        self.draw(&mut strip, color, 1, 0, text);

        let rotated = imageops::rotate270(&strip);
        let y = center_y - rotated.height() as i32 / 2;
        imageops::replace(canvas, &rotated, i64::from(x), i64::from(y));
    }
}
