//! Excel backend built on `rust_xlsxwriter`.

use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, FormatAlign, FormatPattern, Workbook, Worksheet,
    XlsxError,
};

use super::DocumentBackend;
use crate::reports::error::ReportError;
use crate::reports::layout::{
    Block, CellStyle, DocumentLayout, Font, HAlign, Paragraph, Run, Table, VAlign, CELL_INDENT,
};
use crate::reports::style::FontFamilies;
use crate::reports::types::ReportFormat;

const SHEET_NAME: &str = "Expenses";

/// Renders layouts as a single-sheet workbook.
///
/// Tables map onto cells with the same column structure; paragraphs become
/// one row per line.
#[derive(Debug, Clone, Default)]
pub struct XlsxBackend {
    fonts: FontFamilies,
}

impl XlsxBackend {
    /// Creates the backend with the given font families.
    #[must_use]
    pub const fn new(fonts: FontFamilies) -> Self {
        Self { fonts }
    }

    fn build(&self, layout: &DocumentLayout) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let properties = DocProperties::new()
            .set_title(&layout.metadata.title)
            .set_author(&layout.metadata.author)
            .set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
        workbook.set_properties(&properties);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let widest = layout
            .blocks
            .iter()
            .filter_map(|block| match block {
                Block::Table(table) => Some(table),
                Block::Paragraph(_) => None,
            })
            .max_by_key(|table| table.widths.len());
        if let Some(table) = widest {
            for (column, width) in (0u16..).zip(&table.widths) {
                worksheet.set_column_width_pixels(column, points_to_pixels(*width))?;
            }
        }

        let mut row = 0u32;
        for block in &layout.blocks {
            row = match block {
                Block::Table(table) => self.table(worksheet, table, row)?,
                Block::Paragraph(paragraph) => self.paragraph(worksheet, paragraph, row)?,
            };
        }

        workbook.save_to_buffer()
    }

    fn table(&self, sheet: &mut Worksheet, table: &Table, first_row: u32) -> Result<u32, XlsxError> {
        let mut row = first_row;
        for table_row in &table.rows {
            sheet.set_row_height(row, table_row.height)?;

            for cell in &table_row.cells {
                let format = self.cell_format(&cell.style);
                if cell.merge_right > 0 || cell.merge_down > 0 {
                    sheet.merge_range(
                        row,
                        cell.column,
                        row + u32::from(cell.merge_down),
                        cell.column + cell.merge_right,
                        &cell.text,
                        &format,
                    )?;
                } else {
                    sheet.write_string_with_format(row, cell.column, &cell.text, &format)?;
                }
            }
            row += 1;
        }
        Ok(row)
    }

    fn paragraph(
        &self,
        sheet: &mut Worksheet,
        paragraph: &Paragraph,
        first_row: u32,
    ) -> Result<u32, XlsxError> {
        let mut row = first_row;
        sheet.set_row_height(row, paragraph.space_before)?;
        row += 1;

        for line in paragraph.runs.split(|run| matches!(run, Run::LineBreak)) {
            let mut tallest = 0u16;
            for (column, run) in (0u16..).zip(line) {
                if let Run::Text { text, font } = run {
                    tallest = tallest.max(font.size);
                    sheet.write_string_with_format(row, column, text, &self.font_format(*font))?;
                }
            }
            sheet.set_row_height(row, tallest.saturating_mul(6) / 5)?;
            row += 1;
        }

        sheet.set_row_height(row, paragraph.space_after)?;
        Ok(row + 1)
    }

    fn font_format(&self, font: Font) -> Format {
        let format = Format::new()
            .set_font_name(self.fonts.name(font.face))
            .set_font_size(font.size)
            .set_font_color(Color::RGB(font.color.hex()));
        if font.face.is_bold() {
            format.set_bold()
        } else {
            format
        }
    }

    fn cell_format(&self, style: &CellStyle) -> Format {
        let mut format = self
            .font_format(style.font)
            .set_align(match style.align {
                HAlign::Left => FormatAlign::Left,
                HAlign::Center => FormatAlign::Center,
                HAlign::Right => FormatAlign::Right,
            })
            .set_align(match style.valign {
                VAlign::Top => FormatAlign::Top,
                VAlign::Center => FormatAlign::VerticalCenter,
            });

        let indent = style.left_indent / CELL_INDENT;
        if indent > 0 {
            format = format.set_indent(u8::try_from(indent).unwrap_or(u8::MAX));
        }
        if let Some(shading) = style.shading {
            format = format
                .set_pattern(FormatPattern::Solid)
                .set_background_color(Color::RGB(shading.hex()));
        }
        format
    }
}

impl DocumentBackend for XlsxBackend {
    fn format(&self) -> ReportFormat {
        ReportFormat::Excel
    }

    fn render(&self, layout: &DocumentLayout) -> Result<Vec<u8>, ReportError> {
        self.build(layout)
            .map_err(|e| ReportError::Rendering(e.to_string()))
    }
}

/// Points to screen pixels at 96 dpi.
fn points_to_pixels(points: u16) -> u16 {
    points.saturating_mul(4) / 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::RoundingMode;
    use crate::reports::layout;
    use crate::reports::style::StyleConfig;
    use crate::reports::types::{ExpenseReportLine, ReportModel, ReportMonth};
    use rust_decimal_macros::dec;
    use std::io::{Cursor, Read};

    fn layout(described: bool) -> DocumentLayout {
        let model = ReportModel {
            month: ReportMonth::new(2024, 3).unwrap(),
            currency_symbol: "€".to_string(),
            total: dec!(9.20),
            rounding: RoundingMode::default(),
            lines: vec![ExpenseReportLine {
                title: "Books".to_string(),
                date: "Sunday, March 10, 2024".to_string(),
                time: "18:45".to_string(),
                payment_label: "Electronic Transfer".to_string(),
                amount: dec!(9.20),
                description: described.then(|| "two paperbacks".to_string()),
                has_description: described,
            }],
        };
        layout::build(&model, &StyleConfig::default())
    }

    #[test]
    fn test_produces_zip_container() {
        let bytes = XlsxBackend::default().render(&layout(true)).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_renders_without_description() {
        let bytes = XlsxBackend::default().render(&layout(false)).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_output_is_reproducible() {
        let backend = XlsxBackend::default();
        assert_eq!(
            backend.render(&layout(true)).unwrap(),
            backend.render(&layout(true)).unwrap()
        );
    }

    fn sheet_xml(bytes: Vec<u8>) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_merges_reach_the_sheet() {
        let xml = sheet_xml(XlsxBackend::default().render(&layout(true)).unwrap());

        // Greeting, totals paragraph (four rows), then the expense from row 6.
        assert!(xml.contains(r#"<mergeCell ref="A6:C6"/>"#));
        assert!(xml.contains(r#"<mergeCell ref="D7:D8"/>"#));
        assert!(xml.contains(r#"<mergeCell ref="A8:C8"/>"#));
        assert!(xml.contains(r#"<mergeCells count="3">"#));
    }

    #[test]
    fn test_no_merge_down_without_description() {
        let xml = sheet_xml(XlsxBackend::default().render(&layout(false)).unwrap());

        assert!(xml.contains(r#"<mergeCell ref="A6:C6"/>"#));
        assert!(xml.contains(r#"<mergeCells count="1">"#));
    }

    #[test]
    fn test_points_to_pixels() {
        assert_eq!(points_to_pixels(195), 260);
        assert_eq!(points_to_pixels(120), 160);
    }
}
