use std::path::PathBuf;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::prelude::*;
use plotters::style::FontTransform;
use serde::{Deserialize, Serialize};
use tracing::debug;

use traineval_core::models::scores::{SCORE_AXIS_MAX, SCORE_AXIS_MIN, ScoreSeries};

use crate::error::ChartError;
use crate::fonts::{CHART_FONT_FAMILY, ensure_registered};

/// Chart appearance. Defaults give an 8x4 inch figure at 100 dpi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width_px: u32,
    pub height_px: u32,
    pub title: String,
    pub y_label: String,
    /// Bar fill as RGB.
    pub bar_color: [u8; 3],
    /// Column names longer than this are shortened on the x axis.
    pub max_label_chars: usize,
    /// Height reserved under the plot for the rotated column names.
    pub x_label_area_px: u32,
    /// TrueType font for chart text. Falls back to well-known system fonts.
    pub font_path: Option<PathBuf>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width_px: 800,
            height_px: 400,
            title: "Average Ratings per Question".to_string(),
            y_label: "Average Score".to_string(),
            bar_color: [135, 206, 235],
            max_label_chars: 18,
            x_label_area_px: 120,
            font_path: None,
        }
    }
}

/// An encoded chart ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

/// Rendering context for the ratings chart. Each caller owns its renderer;
/// nothing is shared between renders except the registered font.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    settings: ChartSettings,
    draw_text: bool,
}

impl ChartRenderer {
    pub fn new(settings: ChartSettings) -> Self {
        let draw_text = ensure_registered(settings.font_path.as_deref());
        Self {
            settings,
            draw_text,
        }
    }

    /// A renderer that draws bars only. Output does not depend on which
    /// fonts the host has installed.
    pub fn without_text(settings: ChartSettings) -> Self {
        Self {
            settings,
            draw_text: false,
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Draw one bar per score entry on a fixed 0-5 axis.
    ///
    /// Means above the axis are clipped to its top; entries without a mean
    /// keep their slot but draw no bar.
    pub fn render(&self, series: &ScoreSeries) -> Result<ChartImage, ChartError> {
        let (width, height) = (self.settings.width_px, self.settings.height_px);
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidSize { width, height });
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        self.draw(series, &mut buffer).map_err(ChartError::Backend)?;

        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&buffer, width, height, ColorType::Rgb8)
            .map_err(|e| ChartError::Encode(e.to_string()))?;

        debug!(
            bars = series.len(),
            bytes = png.len(),
            labelled = self.draw_text,
            "rendered ratings chart"
        );

        Ok(ChartImage {
            png,
            width_px: width,
            height_px: height,
        })
    }

    fn draw(&self, series: &ScoreSeries, buffer: &mut [u8]) -> Result<(), String> {
        let settings = &self.settings;
        let slots = (series.len() as u32).max(1);

        let root = BitMapBackend::with_buffer(buffer, (settings.width_px, settings.height_px))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if self.draw_text {
            builder
                .caption(&settings.title, (CHART_FONT_FAMILY, 20))
                .x_label_area_size(settings.x_label_area_px)
                .y_label_area_size(50);
        }

        let mut chart = builder
            .build_cartesian_2d((0u32..slots).into_segmented(), SCORE_AXIS_MIN..SCORE_AXIS_MAX)
            .map_err(|e| e.to_string())?;

        if self.draw_text {
            let labels: Vec<String> = series
                .iter()
                .map(|e| shorten(&e.column, settings.max_label_chars))
                .collect();
            let formatter = |value: &SegmentValue<u32>| match value {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                    labels.get(*i as usize).cloned().unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            };

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(labels.len().max(1))
                .x_label_formatter(&formatter)
                // plotters only rotates in quarter turns, so labels stand upright
                .x_label_style(
                    (CHART_FONT_FAMILY, 12)
                        .into_font()
                        .transform(FontTransform::Rotate90),
                )
                .y_desc(&settings.y_label)
                .draw()
                .map_err(|e| e.to_string())?;
        }

        let [r, g, b] = settings.bar_color;
        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(RGBColor(r, g, b).filled())
                    .margin(10)
                    .data(series.iter().enumerate().filter_map(|(i, entry)| {
                        entry
                            .mean
                            .map(|m| (i as u32, m.clamp(SCORE_AXIS_MIN, SCORE_AXIS_MAX)))
                    })),
            )
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
        Ok(())
    }
}

fn shorten(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}
