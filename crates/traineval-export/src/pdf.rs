use printpdf::image_crate::{self, DynamicImage, GenericImageView, ImageFormat};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfLayerReference, Rgb,
};
use tracing::debug;

use crate::error::ExportError;
use crate::layout::{Element, FontWeight, ImageElement, ReportLayout, TextElement};

/// Bottom layer of every page; holds the template overlay.
pub const TEMPLATE_LAYER: &str = "Template";

/// Layer with the report's own content, drawn over the template layer.
pub const CONTENT_LAYER: &str = "Content";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Serialise a laid-out report to PDF bytes.
///
/// `chart_png` is embedded wherever the layout places the chart.
pub fn render_pdf(
    layout: &ReportLayout,
    chart_png: &[u8],
    document_title: &str,
) -> Result<Vec<u8>, ExportError> {
    let chart = image_crate::load_from_memory_with_format(chart_png, ImageFormat::Png)
        .map_err(|e| ExportError::Image(e.to_string()))?;

    let width = Mm(layout.page_width_mm);
    let height = Mm(layout.page_height_mm);
    let (doc, first_page, first_layer) =
        PdfDocument::new(document_title, width, height, TEMPLATE_LAYER);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
    };

    for (index, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, TEMPLATE_LAYER)
        };
        let page_ref = doc.get_page(page_index);

        let background = page_ref.get_layer(layer_index);
        for text in &page.overlay {
            draw_text(&background, text, &fonts, layout.page_height_mm);
        }

        let foreground = page_ref.add_layer(CONTENT_LAYER);
        for element in &page.content {
            match element {
                Element::Text(text) => draw_text(&foreground, text, &fonts, layout.page_height_mm),
                Element::Chart(placement) => {
                    draw_chart(&foreground, &chart, placement, layout.page_height_mm)
                }
            }
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    debug!(pages = layout.page_count(), bytes = bytes.len(), "serialised report PDF");
    Ok(bytes)
}

fn draw_text(layer: &PdfLayerReference, text: &TextElement, fonts: &Fonts, page_height_mm: f32) {
    let font = match text.weight {
        FontWeight::Regular => &fonts.regular,
        FontWeight::Bold => &fonts.bold,
    };
    let [r, g, b] = text.color;
    layer.set_fill_color(Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    )));
    layer.use_text(
        text.text.as_str(),
        text.size,
        Mm(text.x_mm),
        Mm(page_height_mm - text.baseline_mm),
        font,
    );
}

fn draw_chart(
    layer: &PdfLayerReference,
    chart: &DynamicImage,
    placement: &ImageElement,
    page_height_mm: f32,
) {
    if placement.width_mm <= 0.0 || chart.width() == 0 {
        return;
    }
    // Embedded size is pixels / dpi, so pick the dpi that yields the width.
    let dpi = chart.width() as f32 * 25.4 / placement.width_mm;
    Image::from_dynamic_image(chart).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(placement.x_mm)),
            translate_y: Some(Mm(page_height_mm - placement.top_mm - placement.height_mm)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}
