//! PDF backend built on `printpdf`.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, CustomPdfConformance, IndirectFontRef, Mm, PdfConformance, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Polygon, Pt,
};
use time::OffsetDateTime;

use super::DocumentBackend;
use crate::reports::error::ReportError;
use crate::reports::layout::{
    Block, DocumentLayout, Font, HAlign, PageSetup, Paragraph, Run, Table, VAlign,
};
use crate::reports::style::Rgb;
use crate::reports::types::ReportFormat;

/// Written into the trailer in place of random identifiers.
const DOCUMENT_ID: &str = "cashflow-expense-report";
const LAYER_NAME: &str = "Report";
/// Horizontal padding inside cells, in points.
const CELL_PADDING: u32 = 4;

/// Renders layouts as PDF using the standard Helvetica faces.
///
/// Output is byte-for-byte reproducible: identifiers and dates are pinned and
/// no XMP metadata is embedded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfBackend;

impl PdfBackend {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentBackend for PdfBackend {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    fn render(&self, layout: &DocumentLayout) -> Result<Vec<u8>, ReportError> {
        let page = layout.page;
        let (doc, page_index, layer_index) = PdfDocument::new(
            &layout.metadata.title,
            mm(page.width.into()),
            mm(page.height.into()),
            LAYER_NAME,
        );
        let epoch = OffsetDateTime::UNIX_EPOCH;
        let doc = doc
            .with_document_id(DOCUMENT_ID.to_string())
            .with_creation_date(epoch)
            .with_mod_date(epoch)
            .with_metadata_date(epoch)
            .with_conformance(PdfConformance::Custom(CustomPdfConformance {
                requires_icc_profile: false,
                requires_xmp_metadata: false,
                ..Default::default()
            }));

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(rendering)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(rendering)?;

        {
            let mut writer = PageWriter {
                doc: &doc,
                page,
                layer: doc.get_page(page_index).get_layer(layer_index),
                cursor: u32::from(page.margin_top),
                regular,
                bold,
            };

            for block in &layout.blocks {
                match block {
                    Block::Table(table) => writer.table(table),
                    Block::Paragraph(paragraph) => writer.paragraph(paragraph),
                }
            }
        }

        let bytes = doc.save_to_bytes().map_err(rendering)?;
        finish(&bytes, &layout.metadata.author)
    }
}

/// Draws blocks top to bottom, starting new pages as needed.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    page: PageSetup,
    layer: PdfLayerReference,
    /// Distance from the top edge of the page, in points.
    cursor: u32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PageWriter<'_> {
    fn bottom_limit(&self) -> u32 {
        u32::from(self.page.height) - u32::from(self.page.margin_bottom)
    }

    fn at_page_top(&self) -> bool {
        self.cursor <= u32::from(self.page.margin_top)
    }

    fn ensure_room(&mut self, height: u32) {
        if self.cursor + height > self.bottom_limit() && !self.at_page_top() {
            let (page_index, layer_index) = self.doc.add_page(
                mm(self.page.width.into()),
                mm(self.page.height.into()),
                LAYER_NAME,
            );
            self.layer = self.doc.get_page(page_index).get_layer(layer_index);
            self.cursor = u32::from(self.page.margin_top);
        }
    }

    fn table(&mut self, table: &Table) {
        self.ensure_room(table.height().into());

        let left = u32::from(self.page.margin_left);
        let column_lefts: Vec<u32> = table
            .widths
            .iter()
            .scan(left, |x, width| {
                let start = *x;
                *x += u32::from(*width);
                Some(start)
            })
            .collect();
        let row_tops: Vec<u32> = table
            .rows
            .iter()
            .scan(self.cursor, |y, row| {
                let start = *y;
                *y += u32::from(row.height);
                Some(start)
            })
            .collect();

        for (row_index, row) in table.rows.iter().enumerate() {
            for cell in &row.cells {
                let column = usize::from(cell.column);
                let Some(&x) = column_lefts.get(column) else {
                    continue;
                };
                let last_column = column + usize::from(cell.merge_right);
                let width: u32 = table
                    .widths
                    .iter()
                    .take(last_column + 1)
                    .skip(column)
                    .map(|w| u32::from(*w))
                    .sum();
                let last_row = row_index + usize::from(cell.merge_down);
                let height: u32 = table
                    .rows
                    .iter()
                    .take(last_row + 1)
                    .skip(row_index)
                    .map(|r| u32::from(r.height))
                    .sum();
                let top = row_tops[row_index];

                if let Some(shading) = cell.style.shading {
                    self.fill_rect(x, top, width, height, shading);
                }

                let size = u32::from(cell.style.font.size);
                let text_width = estimate_width(&cell.text, size);
                let text_x = match cell.style.align {
                    HAlign::Left => x + CELL_PADDING + u32::from(cell.style.left_indent),
                    HAlign::Center => x + width.saturating_sub(text_width) / 2,
                    HAlign::Right => (x + width).saturating_sub(CELL_PADDING + text_width),
                };
                let baseline = match cell.style.valign {
                    VAlign::Top => top + size,
                    VAlign::Center => top + height / 2 + size / 3,
                };
                self.text(&cell.text, cell.style.font, text_x, baseline);
            }
        }

        self.cursor += u32::from(table.height());
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        self.cursor += u32::from(paragraph.space_before);

        for line in paragraph.runs.split(|run| matches!(run, Run::LineBreak)) {
            let tallest = line
                .iter()
                .filter_map(|run| match run {
                    Run::Text { font, .. } => Some(u32::from(font.size)),
                    Run::LineBreak => None,
                })
                .max()
                .unwrap_or(0);
            let line_height = tallest * 6 / 5;
            self.ensure_room(line_height);

            let baseline = self.cursor + tallest;
            let mut x = u32::from(self.page.margin_left);
            for run in line {
                if let Run::Text { text, font } = run {
                    self.text(text, *font, x, baseline);
                    x += estimate_width(text, font.size.into());
                }
            }
            self.cursor += line_height;
        }

        self.cursor += u32::from(paragraph.space_after);
    }

    fn fill_rect(&self, x: u32, top: u32, width: u32, height: u32, color: Rgb) {
        let page_height = u32::from(self.page.height);
        let upper = page_height.saturating_sub(top);
        let lower = page_height.saturating_sub(top + height);
        let corners = [(x, lower), (x + width, lower), (x + width, upper), (x, upper)];

        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_polygon(Polygon {
            rings: vec![corners
                .iter()
                .map(|&(px, py)| (Point::new(mm(px), mm(py)), false))
                .collect()],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn text(&self, text: &str, font: Font, x: u32, baseline: u32) {
        if text.is_empty() {
            return;
        }
        let face = if font.face.is_bold() {
            &self.bold
        } else {
            &self.regular
        };
        let y = u32::from(self.page.height).saturating_sub(baseline);

        self.layer.set_fill_color(pdf_color(font.color));
        self.layer
            .use_text(text, f32::from(font.size), mm(x), mm(y), face);
    }
}

/// Rough Helvetica advance: half an em per character.
fn estimate_width(text: &str, size: u32) -> u32 {
    let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    chars.saturating_mul(size) / 2
}

fn mm(points: u32) -> Mm {
    Mm::from(Pt(f32::from(u16::try_from(points).unwrap_or(u16::MAX))))
}

#[allow(clippy::float_arithmetic)]
fn pdf_color(color: Rgb) -> Color {
    let channel = |c: u8| f32::from(c) / 255.0;
    Color::Rgb(printpdf::Rgb::new(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        None,
    ))
}

/// Pins the trailer `/ID` pair, whose second half is random per save, and
/// writes `/Author`, which printpdf leaves empty.
fn finish(bytes: &[u8], author: &str) -> Result<Vec<u8>, ReportError> {
    let mut document = lopdf::Document::load_mem(bytes).map_err(rendering)?;
    let id = lopdf::Object::string_literal(DOCUMENT_ID);
    document
        .trailer
        .set("ID", lopdf::Object::Array(vec![id.clone(), id]));

    let info = document
        .trailer
        .get(b"Info")
        .and_then(lopdf::Object::as_reference)
        .map_err(rendering)?;
    document
        .get_object_mut(info)
        .and_then(lopdf::Object::as_dict_mut)
        .map_err(rendering)?
        .set("Author", lopdf::Object::string_literal(author));

    let mut out = Vec::with_capacity(bytes.len());
    document.save_to(&mut out).map_err(rendering)?;
    Ok(out)
}

fn rendering(err: impl std::fmt::Display) -> ReportError {
    ReportError::Rendering(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::RoundingMode;
    use crate::reports::layout;
    use crate::reports::style::StyleConfig;
    use crate::reports::types::{ExpenseReportLine, ReportModel, ReportMonth};
    use rust_decimal_macros::dec;

    fn model(count: usize) -> ReportModel {
        let lines = (0..count)
            .map(|i| ExpenseReportLine {
                title: format!("Expense {i}"),
                date: "Friday, March 1, 2024".to_string(),
                time: "09:00".to_string(),
                payment_label: "Debit Card".to_string(),
                amount: dec!(54.60),
                description: (i % 2 == 0).then(|| "groceries".to_string()),
                has_description: i % 2 == 0,
            })
            .collect();

        ReportModel {
            month: ReportMonth::new(2024, 3).unwrap(),
            currency_symbol: "R$".to_string(),
            total: dec!(163.83),
            rounding: RoundingMode::default(),
            lines,
        }
    }

    fn render(count: usize) -> Vec<u8> {
        let layout = layout::build(&model(count), &StyleConfig::default());
        PdfBackend::new().render(&layout).unwrap()
    }

    #[test]
    fn test_produces_pdf() {
        let bytes = render(2);
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_output_is_reproducible() {
        assert_eq!(render(3), render(3));
    }

    #[test]
    fn test_long_reports_span_pages() {
        let single = lopdf::Document::load_mem(&render(1)).unwrap();
        let many = lopdf::Document::load_mem(&render(20)).unwrap();
        assert_eq!(single.get_pages().len(), 1);
        assert!(many.get_pages().len() > 1);
    }

    #[test]
    fn test_author_is_written() {
        let style = StyleConfig {
            author: "Ana".to_string(),
            ..StyleConfig::default()
        };
        let layout = layout::build(&model(1), &style);
        let bytes = PdfBackend::new().render(&layout).unwrap();

        let document = lopdf::Document::load_mem(&bytes).unwrap();
        let info = document
            .trailer
            .get(b"Info")
            .and_then(lopdf::Object::as_reference)
            .unwrap();
        let author = document
            .get_dictionary(info)
            .unwrap()
            .get(b"Author")
            .and_then(lopdf::Object::as_str)
            .unwrap();
        assert_eq!(author, b"Ana");
    }

    #[test]
    fn test_estimate_width() {
        assert_eq!(estimate_width("abcd", 12), 24);
        assert_eq!(estimate_width("", 50), 0);
    }
}
