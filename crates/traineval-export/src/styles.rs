use serde::{Deserialize, Serialize};

/// Page geometry and typography of the generated report.
///
/// Lengths are millimetres, font sizes are points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyles {
    /// Page width (A4 by default).
    pub page_width_mm: f32,

    /// Page height.
    pub page_height_mm: f32,

    /// Left, top and right margin.
    pub margin_mm: f32,

    /// Content never extends below this distance from the bottom edge.
    pub bottom_margin_mm: f32,

    /// Title page header size.
    pub title_size: f32,

    /// Vertical space between the title header and the chart.
    pub title_gap_mm: f32,

    /// Response page header size.
    pub heading_size: f32,

    /// Height of a header line.
    pub heading_line_mm: f32,

    /// Response text size.
    pub body_size: f32,

    /// Height of one response text line.
    pub body_line_mm: f32,

    /// Prefix of every response.
    pub bullet: String,

    /// Rendered width of the chart image; height follows its aspect ratio.
    pub chart_width_mm: f32,

    /// Template overlay text size.
    pub overlay_size: f32,

    /// Height of one overlay text line.
    pub overlay_line_mm: f32,

    /// Template overlay text colour as RGB.
    pub overlay_color: [u8; 3],
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            bottom_margin_mm: 15.0,
            title_size: 16.0,
            title_gap_mm: 10.0,
            heading_size: 14.0,
            heading_line_mm: 10.0,
            body_size: 11.0,
            body_line_mm: 8.0,
            bullet: "\u{2022}".to_string(),
            chart_width_mm: 180.0,
            overlay_size: 9.0,
            overlay_line_mm: 4.5,
            overlay_color: [200, 200, 200],
        }
    }
}

impl DocumentStyles {
    pub fn printable_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Lowest y (measured from the top edge) a line may end at.
    pub fn content_bottom_mm(&self) -> f32 {
        self.page_height_mm - self.bottom_margin_mm
    }
}
