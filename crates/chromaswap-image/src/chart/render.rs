// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line chart rasteriser. Data in, PNG bytes out.
//
// Layout (not to scale):
//
//                      title
//   +--------------------------------------+
//   | y |  +------------------------[legend]|
//   |   |  |  grid: 4x4 cells, light gray |   |
//   | l |  |  one polyline per series     |   |
//   |   |  +------------------------------+   |
//   |   |  0        x ticks          n-1      |
//   |                 x label                 |
//   +--------------------------------------+
//
// All series share the y-axis: 0 at the bottom edge, the largest value
// across every series at the top edge. When the canvas is too small for
// the text, the chart is drawn bare.

use chromaswap_core::config::{ChartConfig, MIN_CHART_EDGE};
use chromaswap_core::error::{ChromaError, Result};
use chromaswap_core::types::Channel;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use tracing::{debug, instrument};

use super::text::Pen;
use crate::image::processor::encode_png;
use crate::stats::histogram::ChannelHistogram;
use crate::stats::profile::ChannelProfiles;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const FRAME: Rgb<u8> = Rgb([90, 90, 90]);
const TEXT: Rgb<u8> = Rgb([30, 30, 30]);
const PROFILE: Rgb<u8> = Rgb([128, 0, 128]);
const GRID_DIVISIONS: u32 = 4;
/// Smallest plot area, per side, that still gets text around it.
const MIN_DECORATED_PLOT: u32 = 16;

/// One polyline on a chart. Series with a non-empty label get a legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub values: Vec<f64>,
    pub color: Rgb<u8>,
    pub label: String,
}

impl Series {
    pub fn new(values: Vec<f64>, color: Rgb<u8>) -> Self {
        Self {
            values,
            color,
            label: String::new(),
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Title and axis captions. Empty strings are not drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
}

impl ChartLabels {
    pub fn new(
        title: impl Into<String>,
        x_axis: impl Into<String>,
        y_axis: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_axis: x_axis.into(),
            y_axis: y_axis.into(),
        }
    }

    /// Axes of an intensity histogram.
    pub fn histogram(title: impl Into<String>) -> Self {
        Self::new(title, "Intensity", "Pixel count")
    }

    /// Mean intensity of each row, from top to bottom.
    pub fn row_profile() -> Self {
        Self::new("Mean intensity by row", "Row", "Mean intensity")
    }

    /// Mean intensity of each column, from left to right.
    pub fn column_profile() -> Self {
        Self::new("Mean intensity by column", "Column", "Mean intensity")
    }
}

/// Plot colour for a channel's series.
pub fn channel_color(channel: Channel) -> Rgb<u8> {
    match channel {
        Channel::Red => Rgb([220, 40, 40]),
        Channel::Green => Rgb([40, 160, 40]),
        Channel::Blue => Rgb([40, 40, 220]),
    }
}

fn legend_name(channel: Channel) -> &'static str {
    match channel {
        Channel::Red => "Red",
        Channel::Green => "Green",
        Channel::Blue => "Blue",
    }
}

/// Pixel bounds of the plot area, inclusive.
struct PlotArea {
    left: u32,
    right: u32,
    top: u32,
    bottom: u32,
}

impl PlotArea {
    fn bare(width: u32, height: u32) -> Self {
        Self {
            left: width / 16,
            right: width - width / 32 - 1,
            top: height / 32,
            bottom: height - height / 16 - 1,
        }
    }

    /// Room for the title above, tick and axis labels below and to the left.
    /// `None` when what is left would be too small to read.
    fn decorated(
        style: &ChartConfig,
        labels: &ChartLabels,
        pen: &Pen,
        y_tick: u32,
    ) -> Option<Self> {
        let line = pen.line_height();
        let (width, height) = (style.width, style.height);

        let mut top = height / 32;
        if !labels.title.is_empty() {
            top += line;
        }
        let mut bottom_margin = height / 32 + line;
        if !labels.x_axis.is_empty() {
            bottom_margin += line;
        }
        let mut left = width / 64 + y_tick + 4;
        if !labels.y_axis.is_empty() {
            left += line;
        }
        let right = width - width / 32 - 1;
        let bottom = height.checked_sub(bottom_margin + 1)?;

        let roomy = right >= left + MIN_DECORATED_PLOT && bottom >= top + MIN_DECORATED_PLOT;
        roomy.then_some(Self {
            left,
            right,
            top,
            bottom,
        })
    }

    fn width(&self) -> f32 {
        (self.right - self.left) as f32
    }

    fn height(&self) -> f32 {
        (self.bottom - self.top) as f32
    }

    fn center_x(&self) -> i32 {
        ((self.left + self.right) / 2) as i32
    }

    fn center_y(&self) -> i32 {
        ((self.top + self.bottom) / 2) as i32
    }
}

/// Draw every series onto a fresh canvas and encode it as PNG.
#[instrument(
    skip_all,
    fields(series = series.len(), title = %labels.title, width = style.width, height = style.height)
)]
pub fn render_line_chart(
    series: &[Series],
    labels: &ChartLabels,
    style: &ChartConfig,
) -> Result<Vec<u8>> {
    if style.width < MIN_CHART_EDGE || style.height < MIN_CHART_EDGE {
        return Err(ChromaError::Chart(format!(
            "canvas {}x{} is smaller than {MIN_CHART_EDGE}x{MIN_CHART_EDGE}",
            style.width, style.height
        )));
    }
    if series.is_empty() || series.iter().any(|s| s.values.is_empty()) {
        return Err(ChromaError::Chart("nothing to plot".into()));
    }
    if series
        .iter()
        .flat_map(|s| s.values.iter())
        .any(|v| !v.is_finite() || *v < 0.0)
    {
        return Err(ChromaError::Chart(
            "values must be finite and non-negative".into(),
        ));
    }

    let max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };
    let samples = series.iter().map(|s| s.values.len()).max().unwrap_or(1);

    let pen = Pen::for_canvas(style.height)?;
    let y_top_tick = tick_label(max);
    let y_tick = pen.width(&y_top_tick).max(pen.width("0"));
    let decorated = PlotArea::decorated(style, labels, &pen, y_tick);
    let has_text = decorated.is_some();
    let area = decorated.unwrap_or_else(|| PlotArea::bare(style.width, style.height));

    let mut canvas = RgbImage::from_pixel(style.width, style.height, BACKGROUND);

    draw_grid(&mut canvas, &area);
    draw_hollow_rect_mut(
        &mut canvas,
        Rect::at(area.left as i32, area.top as i32)
            .of_size(area.right - area.left + 1, area.bottom - area.top + 1),
        FRAME,
    );
    for s in series {
        draw_series(&mut canvas, &area, s, max);
    }

    if has_text {
        draw_legend(&mut canvas, &area, &pen, series);
        draw_labels(&mut canvas, &area, &pen, labels, style);
        draw_ticks(&mut canvas, &area, &pen, &y_top_tick, samples);
    }

    debug!(max, has_text, "Chart drawn");
    encode_png(&canvas)
}

/// Red, green and blue histogram curves on one chart.
pub fn histogram_chart(
    hist: &ChannelHistogram,
    labels: &ChartLabels,
    style: &ChartConfig,
) -> Result<Vec<u8>> {
    let series: Vec<Series> = Channel::ALL
        .iter()
        .map(|&c| {
            let values = hist.channel(c).iter().map(|&n| f64::from(n)).collect();
            Series::new(values, channel_color(c)).labelled(legend_name(c))
        })
        .collect();
    render_line_chart(&series, labels, style)
}

/// A single collapsed row or column profile.
pub fn profile_chart(
    profile: &[f64],
    labels: &ChartLabels,
    style: &ChartConfig,
) -> Result<Vec<u8>> {
    render_line_chart(&[Series::new(profile.to_vec(), PROFILE)], labels, style)
}

/// One curve per channel for a per-channel profile.
pub fn channel_profile_chart(
    profiles: &ChannelProfiles,
    labels: &ChartLabels,
    style: &ChartConfig,
) -> Result<Vec<u8>> {
    let series: Vec<Series> = Channel::ALL
        .iter()
        .map(|&c| {
            Series::new(profiles.channel(c).to_vec(), channel_color(c)).labelled(legend_name(c))
        })
        .collect();
    render_line_chart(&series, labels, style)
}

/// Whole numbers print without decimals, means with one.
fn tick_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn draw_grid(canvas: &mut RgbImage, area: &PlotArea) {
    for i in 1..GRID_DIVISIONS {
        let fraction = i as f32 / GRID_DIVISIONS as f32;
        let x = area.left as f32 + area.width() * fraction;
        let y = area.top as f32 + area.height() * fraction;
        draw_line_segment_mut(canvas, (x, area.top as f32), (x, area.bottom as f32), GRID);
        draw_line_segment_mut(canvas, (area.left as f32, y), (area.right as f32, y), GRID);
    }
}

fn draw_series(canvas: &mut RgbImage, area: &PlotArea, series: &Series, max: f64) {
    let y_of = |v: f64| area.bottom as f32 - area.height() * (v / max) as f32;

    // A single sample spans the whole width.
    if let [only] = series.values.as_slice() {
        let y = y_of(*only);
        draw_line_segment_mut(
            canvas,
            (area.left as f32, y),
            (area.right as f32, y),
            series.color,
        );
        return;
    }

    let step = area.width() / (series.values.len() - 1) as f32;
    for (i, pair) in series.values.windows(2).enumerate() {
        let x0 = area.left as f32 + step * i as f32;
        draw_line_segment_mut(
            canvas,
            (x0, y_of(pair[0])),
            (x0 + step, y_of(pair[1])),
            series.color,
        );
    }
}

/// Boxed legend in the top-right corner of the plot area. Skipped when no
/// series is labelled or the box would not fit.
fn draw_legend(canvas: &mut RgbImage, area: &PlotArea, pen: &Pen, series: &[Series]) {
    let entries: Vec<&Series> = series.iter().filter(|s| !s.label.is_empty()).collect();
    if entries.is_empty() {
        return;
    }

    let line = pen.line_height();
    let swatch = line;
    let padding = line / 3 + 1;
    let text_width = entries.iter().map(|s| pen.width(&s.label)).max().unwrap_or(0);
    let box_width = padding * 3 + swatch + text_width;
    let box_height = padding * 2 + line * entries.len() as u32;
    let fits = box_width + 2 * padding <= area.right - area.left
        && box_height + 2 * padding <= area.bottom - area.top;
    if !fits {
        return;
    }

    let x = area.right - padding - box_width;
    let y = area.top + padding;
    let frame = Rect::at(x as i32, y as i32).of_size(box_width, box_height);
    draw_filled_rect_mut(canvas, frame, BACKGROUND);
    draw_hollow_rect_mut(canvas, frame, FRAME);

    for (i, entry) in entries.iter().enumerate() {
        let row = y + padding + line * i as u32;
        let swatch_rect = Rect::at((x + padding) as i32, (row + line / 4) as i32)
            .of_size(swatch, (line / 2).max(1));
        draw_filled_rect_mut(canvas, swatch_rect, entry.color);
        let text_x = (x + padding * 2 + swatch) as i32;
        pen.draw(canvas, TEXT, text_x, row as i32, &entry.label);
    }
}

fn draw_labels(
    canvas: &mut RgbImage,
    area: &PlotArea,
    pen: &Pen,
    labels: &ChartLabels,
    style: &ChartConfig,
) {
    let line = pen.line_height() as i32;
    if !labels.title.is_empty() {
        let y = (style.height / 32) as i32;
        pen.draw_centered(canvas, TEXT, area.center_x(), y, &labels.title);
    }
    if !labels.x_axis.is_empty() {
        let y = area.bottom as i32 + 1 + line;
        pen.draw_centered(canvas, TEXT, area.center_x(), y, &labels.x_axis);
    }
    if !labels.y_axis.is_empty() {
        let x = (style.width / 64) as i32;
        pen.draw_vertical(canvas, TEXT, BACKGROUND, x, area.center_y(), &labels.y_axis);
    }
}

/// Value at the bottom and top of the y-axis, first and last index on the x-axis.
fn draw_ticks(canvas: &mut RgbImage, area: &PlotArea, pen: &Pen, y_top: &str, samples: usize) {
    let line = pen.line_height() as i32;
    let gap = 4;

    for (text, y) in [
        ("0", area.bottom as i32 - line / 2),
        (y_top, area.top as i32 - line / 4),
    ] {
        let x = area.left as i32 - gap - pen.width(text) as i32;
        pen.draw(canvas, TEXT, x, y, text);
    }

    let y = area.bottom as i32 + 2;
    pen.draw(canvas, TEXT, area.left as i32, y, "0");
    if samples > 1 {
        let last = (samples - 1).to_string();
        let x = area.right as i32 - pen.width(&last) as i32;
        pen.draw(canvas, TEXT, x, y, &last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::histogram::histogram;
    use crate::stats::profile::row_channel_profiles;

    fn style() -> ChartConfig {
        ChartConfig {
            width: 200,
            height: 120,
        }
    }

    fn decode(png: &[u8]) -> RgbImage {
        image::load_from_memory(png).expect("decode chart").to_rgb8()
    }

    /// Glyph pixels: text is blended from white towards `TEXT`, so it is the
    /// only gray darker than the grid apart from the frame itself.
    fn text_pixels(chart: &RgbImage) -> usize {
        chart
            .pixels()
            .filter(|p| {
                let [r, g, b] = p.0;
                r == g && g == b && r < 200 && **p != FRAME
            })
            .count()
    }

    #[test]
    fn renders_png_of_requested_size() {
        let png = profile_chart(&[1.0, 4.0, 2.0, 8.0], &ChartLabels::row_profile(), &style())
            .expect("render");
        assert_eq!(&png[..4], b"\x89PNG");
        assert_eq!(decode(&png).dimensions(), (200, 120));
    }

    #[test]
    fn series_colour_is_drawn() {
        let png = profile_chart(&[0.0, 10.0], &ChartLabels::default(), &style()).expect("render");
        let chart = decode(&png);
        assert!(chart.pixels().any(|p| *p == PROFILE));
    }

    #[test]
    fn histogram_chart_draws_all_channels() {
        let img = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 8) as u8, 90]));
        let hist = histogram(&img).unwrap();
        let chart = decode(
            &histogram_chart(&hist, &ChartLabels::histogram("RGB histogram"), &style())
                .expect("render"),
        );
        for c in Channel::ALL {
            assert!(chart.pixels().any(|p| *p == channel_color(c)), "channel {c}");
        }
    }

    #[test]
    fn titled_chart_differs_from_untitled() {
        let values = [3.0, 1.0, 2.0];
        let big = ChartConfig::default();
        let bare = decode(&profile_chart(&values, &ChartLabels::default(), &big).unwrap());
        let titled = decode(
            &profile_chart(&values, &ChartLabels::new("Mean intensity by row", "", ""), &big)
                .unwrap(),
        );

        assert_ne!(bare, titled);
        // Both carry the same tick labels; only one has a title on top.
        assert!(text_pixels(&titled) > text_pixels(&bare) + 50);
    }

    #[test]
    fn axis_labels_and_order_title_change_the_chart() {
        let img = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let hist = histogram(&img).unwrap();
        let style = ChartConfig::default();

        let chart = |labels: ChartLabels| histogram_chart(&hist, &labels, &style).unwrap();

        let original = chart(ChartLabels::histogram("RGB histogram, original image"));
        let reordered = chart(ChartLabels::histogram("RGB histogram, order BGR"));
        let unlabelled = chart(ChartLabels::default());

        assert_ne!(original, reordered);
        assert_ne!(original, unlabelled);
    }

    #[test]
    fn legend_is_drawn_only_for_labelled_series() {
        let style = ChartConfig::default();
        let flat = vec![0.0; 8];
        let chart = |series: Series| {
            decode(&render_line_chart(&[series], &ChartLabels::default(), &style).unwrap())
        };
        let plain = chart(Series::new(flat.clone(), PROFILE));
        let labelled = chart(Series::new(flat, PROFILE).labelled("Mean"));

        // A zero series hugs the bottom edge; only a legend swatch puts its
        // colour in the upper half.
        let upper = 0..style.height / 2;
        let purple_above = |chart: &RgbImage| {
            upper
                .clone()
                .flat_map(|y| (0..style.width).map(move |x| (x, y)))
                .any(|(x, y)| *chart.get_pixel(x, y) == PROFILE)
        };
        assert!(!purple_above(&plain));
        assert!(purple_above(&labelled));
    }

    #[test]
    fn oversized_labels_fall_back_to_a_bare_chart() {
        let tiny = ChartConfig {
            width: MIN_CHART_EDGE,
            height: MIN_CHART_EDGE,
        };
        let labels = ChartLabels::histogram("A title far too long for a tiny canvas");
        let png = profile_chart(&[1.0e12, 5.0], &labels, &tiny).expect("render");
        assert_eq!(decode(&png).dimensions(), (MIN_CHART_EDGE, MIN_CHART_EDGE));
    }

    #[test]
    fn tick_labels_round_whole_numbers() {
        assert_eq!(tick_label(256.0), "256");
        assert_eq!(tick_label(95.25), "95.2");
    }

    #[test]
    fn single_sample_profile_is_drawable() {
        let img = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
        let profiles = row_channel_profiles(&img).unwrap();
        assert!(channel_profile_chart(&profiles, &ChartLabels::row_profile(), &style()).is_ok());
        assert!(profile_chart(&[0.0], &ChartLabels::column_profile(), &style()).is_ok());
    }

    #[test]
    fn rendering_is_stateless() {
        let labels = ChartLabels::row_profile();
        let a = profile_chart(&[3.0, 1.0, 2.0], &labels, &style()).unwrap();
        let _ = profile_chart(&[9.0, 9.0, 0.0, 5.0], &ChartLabels::default(), &style()).unwrap();
        let b = profile_chart(&[3.0, 1.0, 2.0], &labels, &style()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_unusable_input() {
        let tiny = ChartConfig {
            width: 10,
            height: 10,
        };
        let labels = ChartLabels::default();
        assert!(matches!(profile_chart(&[1.0], &labels, &tiny), Err(ChromaError::Chart(_))));
        assert!(matches!(profile_chart(&[], &labels, &style()), Err(ChromaError::Chart(_))));
        assert!(matches!(
            render_line_chart(&[], &labels, &style()),
            Err(ChromaError::Chart(_))
        ));
        assert!(matches!(
            profile_chart(&[1.0, f64::NAN], &labels, &style()),
            Err(ChromaError::Chart(_))
        ));
    }
}
