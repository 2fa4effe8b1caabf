//! Page layout of the report.
//!
//! [`assemble`] turns the report content into a fully positioned
//! [`ReportLayout`]: every text line and the chart image carry their page
//! and coordinates, so the PDF writer only has to draw. Coordinates are
//! millimetres measured from the top-left corner of the page.

use std::num::NonZeroUsize;

use tracing::debug;

use crate::encoding::{EncodingPolicy, prepare_text};
use crate::error::ExportError;
use crate::paginate::paginate;
use crate::styles::DocumentStyles;
use crate::template::TemplateText;

/// Responses per page unless configured otherwise.
pub const DEFAULT_PAGE_CAPACITY: NonZeroUsize = NonZeroUsize::new(16).unwrap();

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Mean Helvetica advance width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

const BLACK: [u8; 3] = [0, 0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    pub x_mm: f32,
    pub baseline_mm: f32,
    pub size: f32,
    pub weight: FontWeight,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub x_mm: f32,
    pub top_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextElement),
    Chart(ImageElement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Title,
    /// First page of a response chunk; `chunk` is 1-based.
    Responses { question_id: String, chunk: usize },
    /// Overflow of a chunk whose lines did not fit on one page.
    Continuation { question_id: String, chunk: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub kind: PageKind,
    /// Template text drawn underneath the content.
    pub overlay: Vec<TextElement>,
    pub content: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub pages: Vec<Page>,
}

impl ReportLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of response chunks laid out for one question.
    pub fn chunk_count(&self, question_id: &str) -> usize {
        self.pages
            .iter()
            .filter(|p| matches!(&p.kind, PageKind::Responses { question_id: q, .. } if q == question_id))
            .count()
    }
}

/// Answers to one open-text question, in spreadsheet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSection {
    pub question_id: String,
    pub responses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContent {
    /// Header line of the title page.
    pub title: String,
    /// Pixel size of the chart image, used for its aspect ratio.
    pub chart_px: (u32, u32),
    pub sections: Vec<ResponseSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub page_capacity: NonZeroUsize,
    pub encoding: EncodingPolicy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_capacity: DEFAULT_PAGE_CAPACITY,
            encoding: EncodingPolicy::default(),
        }
    }
}

/// Lay out the title page followed by one page per response chunk of every
/// section, in section order.
///
/// With a template, generated page `k` gets the text of template page `k`
/// as overlay. The overlay never moves content or changes the page count.
pub fn assemble(
    content: &ReportContent,
    styles: &DocumentStyles,
    options: &LayoutOptions,
    template: Option<&TemplateText>,
) -> Result<ReportLayout, ExportError> {
    let mut writer = PageWriter::new(styles, PageKind::Title);

    let title = prepare_text(&content.title, options.encoding)?;
    writer.line(title, styles.margin_mm, styles.title_size, FontWeight::Bold, styles.heading_line_mm);
    writer.gap(styles.title_gap_mm);
    writer.chart(content.chart_px);

    let indent_mm = 2.0 * glyph_width_mm(styles.body_size);
    let max_chars = chars_per_line(styles.printable_width_mm() - indent_mm, styles.body_size);

    for section in &content.sections {
        let chunks = paginate(&section.responses, options.page_capacity);
        for (i, chunk) in chunks.iter().enumerate() {
            writer.start_page(PageKind::Responses {
                question_id: section.question_id.clone(),
                chunk: i + 1,
            });

            let heading = prepare_text(
                &format!("{} Responses (Page {})", section.question_id, i + 1),
                options.encoding,
            )?;
            writer.line(heading, styles.margin_mm, styles.heading_size, FontWeight::Bold, styles.heading_line_mm);

            for response in chunk.iter() {
                let text = prepare_text(response, options.encoding)?;
                for (n, line) in wrap(&text, max_chars).into_iter().enumerate() {
                    let (text, x_mm) = if n == 0 {
                        (format!("{} {line}", styles.bullet), styles.margin_mm)
                    } else {
                        (line, styles.margin_mm + indent_mm)
                    };
                    writer.line(text, x_mm, styles.body_size, FontWeight::Regular, styles.body_line_mm);
                }
            }
        }

        debug!(
            question = %section.question_id,
            responses = section.responses.len(),
            chunks = chunks.len(),
            "laid out response section"
        );
    }

    let mut pages = writer.finish();

    if let Some(template) = template {
        for (index, page) in pages.iter_mut().enumerate() {
            if let Some(text) = template.page(index) {
                page.overlay = overlay_lines(text, styles);
            }
        }
    }

    Ok(ReportLayout {
        page_width_mm: styles.page_width_mm,
        page_height_mm: styles.page_height_mm,
        pages,
    })
}

/// Sequential writer with an automatic page break at the bottom margin.
struct PageWriter<'a> {
    styles: &'a DocumentStyles,
    done: Vec<Page>,
    page: Page,
    y_mm: f32,
}

impl<'a> PageWriter<'a> {
    fn new(styles: &'a DocumentStyles, kind: PageKind) -> Self {
        Self {
            styles,
            done: Vec::new(),
            page: empty_page(kind),
            y_mm: styles.margin_mm,
        }
    }

    fn start_page(&mut self, kind: PageKind) {
        let previous = std::mem::replace(&mut self.page, empty_page(kind));
        self.done.push(previous);
        self.y_mm = self.styles.margin_mm;
    }

    fn break_page(&mut self) {
        let kind = match &self.page.kind {
            PageKind::Title => PageKind::Title,
            PageKind::Responses { question_id, chunk }
            | PageKind::Continuation { question_id, chunk } => PageKind::Continuation {
                question_id: question_id.clone(),
                chunk: *chunk,
            },
        };
        self.start_page(kind);
    }

    fn line(&mut self, text: String, x_mm: f32, size: f32, weight: FontWeight, height_mm: f32) {
        if self.y_mm + height_mm > self.styles.content_bottom_mm() {
            self.break_page();
        }
        self.page.content.push(Element::Text(TextElement {
            text,
            x_mm,
            baseline_mm: baseline(self.y_mm, height_mm, size),
            size,
            weight,
            color: BLACK,
        }));
        self.y_mm += height_mm;
    }

    fn gap(&mut self, height_mm: f32) {
        self.y_mm += height_mm;
    }

    fn chart(&mut self, (width_px, height_px): (u32, u32)) {
        let width_mm = self.styles.chart_width_mm;
        let height_mm = if width_px == 0 {
            0.0
        } else {
            width_mm * height_px as f32 / width_px as f32
        };
        self.page.content.push(Element::Chart(ImageElement {
            x_mm: self.styles.margin_mm,
            top_mm: self.y_mm,
            width_mm,
            height_mm,
        }));
        self.y_mm += height_mm;
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.page);
        self.done
    }
}

fn empty_page(kind: PageKind) -> Page {
    Page {
        kind,
        overlay: Vec::new(),
        content: Vec::new(),
    }
}

fn overlay_lines(text: &str, styles: &DocumentStyles) -> Vec<TextElement> {
    // Template text is decoration; never fail the report over it.
    let Ok(text) = prepare_text(text, EncodingPolicy::Replace) else {
        return Vec::new();
    };
    let max_chars = chars_per_line(styles.printable_width_mm(), styles.overlay_size);

    let mut lines = Vec::new();
    let mut y_mm = styles.margin_mm;
    for line in wrap(&text, max_chars) {
        if y_mm + styles.overlay_line_mm > styles.content_bottom_mm() {
            break;
        }
        lines.push(TextElement {
            text: line,
            x_mm: styles.margin_mm,
            baseline_mm: baseline(y_mm, styles.overlay_line_mm, styles.overlay_size),
            size: styles.overlay_size,
            weight: FontWeight::Regular,
            color: styles.overlay_color,
        });
        y_mm += styles.overlay_line_mm;
    }
    lines
}

/// Baseline of text vertically centred in a line box starting at `top_mm`.
fn baseline(top_mm: f32, height_mm: f32, size: f32) -> f32 {
    top_mm + height_mm / 2.0 + 0.3 * size * PT_TO_MM
}

fn glyph_width_mm(size: f32) -> f32 {
    size * PT_TO_MM * AVG_GLYPH_EM
}

fn chars_per_line(width_mm: f32, size: f32) -> usize {
    ((width_mm / glyph_width_mm(size)).floor() as usize).max(1)
}

/// Greedy word wrap to at most `max_chars` characters per line. Words longer
/// than a line are split; blank lines are dropped.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word = word;
            loop {
                let word_len = word.chars().count();
                let needed = if line_len == 0 {
                    word_len
                } else {
                    line_len + 1 + word_len
                };

                if needed <= max_chars {
                    if line_len > 0 {
                        line.push(' ');
                    }
                    line.push_str(word);
                    line_len = needed;
                    break;
                }

                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                    continue;
                }

                let split = word
                    .char_indices()
                    .nth(max_chars)
                    .map_or(word.len(), |(i, _)| i);
                lines.push(word[..split].to_string());
                word = &word[split..];
                if word.is_empty() {
                    break;
                }
            }
        }

        if line_len > 0 {
            lines.push(line);
        }
    }

    lines
}
