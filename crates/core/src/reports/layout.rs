//! Report layout as plain data.
//!
//! [`build`] turns a [`ReportModel`] into a [`DocumentLayout`]: an immutable
//! list of blocks that a [`DocumentBackend`](super::render::DocumentBackend)
//! draws. Nothing here touches a document library.

use super::style::{FontFace, Rgb, StyleConfig};
use super::types::{ExpenseReportLine, ReportModel};
use crate::currency::format_amount;

/// Height of every expense table row, in points.
pub const ROW_HEIGHT: u16 = 25;
/// Height of the spacer row closing each expense table, in points.
pub const SPACER_HEIGHT: u16 = 30;
/// Column widths of an expense table, in points.
pub const EXPENSE_COLUMN_WIDTHS: [u16; 4] = [195, 80, 120, 120];
/// Width of the greeting table, in points.
pub const HEADER_WIDTH: u16 = 300;
/// Left indent of title, date and description cells, in points.
pub const CELL_INDENT: u16 = 20;
/// Space before and after the totals paragraph, in points.
pub const TOTALS_SPACING: u16 = 40;

const HEADER_FONT_SIZE: u16 = 16;
const TOTAL_LABEL_FONT_SIZE: u16 = 15;
const TOTAL_FONT_SIZE: u16 = 50;
const TITLE_FONT_SIZE: u16 = 14;
const INFO_FONT_SIZE: u16 = 12;
const DESCRIPTION_FONT_SIZE: u16 = 10;

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    /// Page width.
    pub width: u16,
    /// Page height.
    pub height: u16,
    /// Left margin.
    pub margin_left: u16,
    /// Right margin.
    pub margin_right: u16,
    /// Top margin.
    pub margin_top: u16,
    /// Bottom margin.
    pub margin_bottom: u16,
}

impl PageSetup {
    /// A4 portrait with report margins.
    pub const A4: Self = Self {
        width: 595,
        height: 842,
        margin_left: 40,
        margin_right: 40,
        margin_top: 80,
        margin_bottom: 80,
    };

    /// Width available between the side margins.
    #[must_use]
    pub const fn content_width(&self) -> u16 {
        self.width - self.margin_left - self.margin_right
    }
}

/// Document properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    /// Document title.
    pub title: String,
    /// Document author.
    pub author: String,
}

/// A complete report layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    /// Document properties.
    pub metadata: DocumentMetadata,
    /// Page geometry.
    pub page: PageSetup,
    /// Blocks in drawing order.
    pub blocks: Vec<Block>,
}

impl DocumentLayout {
    /// Returns the expense tables in drawing order.
    #[must_use]
    pub fn expense_tables(&self) -> Vec<&Table> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Table(table) if table.kind == TableKind::Expense => Some(table),
                Block::Table(_) | Block::Paragraph(_) => None,
            })
            .collect()
    }
}

/// A top-level layout element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A grid of cells.
    Table(Table),
    /// Flowing text.
    Paragraph(Paragraph),
}

/// What a table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// The greeting above the totals.
    Greeting,
    /// One expense.
    Expense,
}

/// A table with fixed column widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// What the table shows.
    pub kind: TableKind,
    /// Column widths, in points.
    pub widths: Vec<u16>,
    /// Rows, top to bottom.
    pub rows: Vec<Row>,
}

impl Table {
    /// Total table width.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.widths.iter().sum()
    }

    /// Total table height.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.rows.iter().map(|row| row.height).sum()
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Row height, in points.
    pub height: u16,
    /// Cells that start in this row. Columns covered by merges have no cell.
    pub cells: Vec<Cell>,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Zero-based column where the cell starts.
    pub column: u16,
    /// Cell text.
    pub text: String,
    /// Cell formatting.
    pub style: CellStyle,
    /// Number of extra columns covered to the right.
    pub merge_right: u16,
    /// Number of extra rows covered below.
    pub merge_down: u16,
}

impl Cell {
    fn new(column: u16, text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            column,
            text: text.into(),
            style,
            merge_right: 0,
            merge_down: 0,
        }
    }

    fn merged_right(mut self, columns: u16) -> Self {
        self.merge_right = columns;
        self
    }

    fn merged_down(mut self, rows: u16) -> Self {
        self.merge_down = rows;
        self
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    /// Left.
    Left,
    /// Center.
    Center,
    /// Right.
    Right,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    /// Top.
    Top,
    /// Center.
    Center,
}

/// A sized, colored font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    /// Logical face.
    pub face: FontFace,
    /// Size in points.
    pub size: u16,
    /// Text color.
    pub color: Rgb,
}

/// Cell formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    /// Text font.
    pub font: Font,
    /// Background color, if any.
    pub shading: Option<Rgb>,
    /// Horizontal alignment.
    pub align: HAlign,
    /// Vertical alignment.
    pub valign: VAlign,
    /// Left indent, in points.
    pub left_indent: u16,
}

/// A paragraph of text runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Space above, in points.
    pub space_before: u16,
    /// Space below, in points.
    pub space_after: u16,
    /// Content.
    pub runs: Vec<Run>,
}

/// Paragraph content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    /// Text in one font.
    Text {
        /// The text.
        text: String,
        /// Its font.
        font: Font,
    },
    /// Forced line break.
    LineBreak,
}

/// Builds the layout for a report.
#[must_use]
pub fn build(model: &ReportModel, style: &StyleConfig) -> DocumentLayout {
    let month_label = model.month.label();

    let mut blocks = Vec::with_capacity(model.lines.len() + 2);
    blocks.push(Block::Table(header_table(style)));
    blocks.push(Block::Paragraph(totals_paragraph(model, style, &month_label)));
    blocks.extend(
        model
            .lines
            .iter()
            .map(|line| Block::Table(expense_table(line, model, style))),
    );

    DocumentLayout {
        metadata: DocumentMetadata {
            title: format!("{} {month_label}", style.labels.expenses_for),
            author: style.author.clone(),
        },
        page: PageSetup::A4,
        blocks,
    }
}

fn header_table(style: &StyleConfig) -> Table {
    let cell_style = CellStyle {
        font: Font {
            face: FontFace::Heading,
            size: HEADER_FONT_SIZE,
            color: style.palette.black,
        },
        shading: None,
        align: HAlign::Left,
        valign: VAlign::Center,
        left_indent: 0,
    };

    Table {
        kind: TableKind::Greeting,
        widths: vec![HEADER_WIDTH],
        rows: vec![Row {
            height: ROW_HEIGHT,
            cells: vec![Cell::new(0, style.greeting.clone(), cell_style)],
        }],
    }
}

fn totals_paragraph(model: &ReportModel, style: &StyleConfig, month_label: &str) -> Paragraph {
    let black = style.palette.black;
    Paragraph {
        space_before: TOTALS_SPACING,
        space_after: TOTALS_SPACING,
        runs: vec![
            Run::Text {
                text: format!("{} {month_label}", style.labels.total_spent_in),
                font: Font {
                    face: FontFace::Body,
                    size: TOTAL_LABEL_FONT_SIZE,
                    color: black,
                },
            },
            Run::LineBreak,
            Run::Text {
                text: format!(
                    "{} {}",
                    model.currency_symbol,
                    format_amount(model.total, model.rounding)
                ),
                font: Font {
                    face: FontFace::Display,
                    size: TOTAL_FONT_SIZE,
                    color: black,
                },
            },
        ],
    }
}

fn expense_table(line: &ExpenseReportLine, model: &ReportModel, style: &StyleConfig) -> Table {
    let palette = &style.palette;
    let font = |face, size, color| Font { face, size, color };
    let cell = |font, shading, align, left_indent| CellStyle {
        font,
        shading: Some(shading),
        align,
        valign: VAlign::Center,
        left_indent,
    };

    let heading = |color| font(FontFace::Heading, TITLE_FONT_SIZE, color);
    let detail = font(FontFace::Detail, INFO_FONT_SIZE, palette.black);

    let title_row = Row {
        height: ROW_HEIGHT,
        cells: vec![
            Cell::new(
                0,
                line.title.clone(),
                cell(heading(palette.black), palette.red_light, HAlign::Left, CELL_INDENT),
            )
            .merged_right(2),
            Cell::new(
                3,
                style.labels.amount.clone(),
                cell(heading(palette.white), palette.red_dark, HAlign::Right, 0),
            ),
        ],
    };

    let amount = Cell::new(
        3,
        format!(
            "- {}{}",
            model.currency_symbol,
            format_amount(line.amount, model.rounding)
        ),
        cell(detail, palette.white, HAlign::Right, 0),
    );
    let info_row = Row {
        height: ROW_HEIGHT,
        cells: vec![
            Cell::new(
                0,
                line.date.clone(),
                cell(detail, palette.green_dark, HAlign::Left, CELL_INDENT),
            ),
            Cell::new(
                1,
                line.time.clone(),
                cell(detail, palette.green_dark, HAlign::Center, 0),
            ),
            Cell::new(
                2,
                line.payment_label.clone(),
                cell(detail, palette.green_dark, HAlign::Center, 0),
            ),
            if line.has_description {
                amount.merged_down(1)
            } else {
                amount
            },
        ],
    };

    let mut rows = vec![title_row, info_row];

    if line.has_description {
        let description = line.description.clone().unwrap_or_default();
        rows.push(Row {
            height: ROW_HEIGHT,
            cells: vec![Cell::new(
                0,
                description,
                cell(
                    font(FontFace::Detail, DESCRIPTION_FONT_SIZE, palette.black),
                    palette.green_light,
                    HAlign::Left,
                    CELL_INDENT,
                ),
            )
            .merged_right(2)],
        });
    }

    rows.push(Row {
        height: SPACER_HEIGHT,
        cells: Vec::new(),
    });

    Table {
        kind: TableKind::Expense,
        widths: EXPENSE_COLUMN_WIDTHS.to_vec(),
        rows,
    }
}
