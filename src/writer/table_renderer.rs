//! Table rendering for PDF generation.
//!
//! Tables are laid out once (column widths, wrapped lines, row heights) and
//! then rendered a slice of rows at a time, so a caller can split a long
//! table across pages and repeat its header row.
//!
//! # Example
//!
//! ```ignore
//! use bpe_listing::writer::{Table, TableCell, ColumnWidth, FontManager};
//!
//! let table = Table::new(vec![
//!     vec![TableCell::text("N°"), TableCell::text("Document")],
//!     vec![TableCell::text("10"), TableCell::text("AlimBT")],
//! ])
//! .with_header_row()
//! .with_column_widths(vec![ColumnWidth::Weight(1.0), ColumnWidth::Weight(7.0)]);
//!
//! let layout = table.calculate_layout(538.6, &FontManager::new());
//! ```

use std::ops::Range;

use super::content_stream::{Color, ContentStreamBuilder};
use super::font_manager::{FontManager, FontStyle};

/// Horizontal alignment for cell content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellAlign {
    /// Align to the left
    #[default]
    Left,
    /// Center horizontally
    Center,
    /// Align to the right
    Right,
}

/// Column width specification.
#[derive(Debug, Clone, Copy)]
pub enum ColumnWidth {
    /// Fixed width in points
    Fixed(f32),
    /// Proportional share of the width left after fixed columns
    Weight(f32),
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Weight(1.0)
    }
}

/// Border line style.
#[derive(Debug, Clone, Copy)]
pub struct TableBorderStyle {
    /// Line width in points
    pub width: f32,
    /// Line colour
    pub color: Color,
}

impl TableBorderStyle {
    /// Create a border of the given width in black.
    pub fn new(width: f32) -> Self {
        Self {
            width,
            color: Color::black(),
        }
    }

    /// Set the border colour.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Horizontal cell padding in points.
#[derive(Debug, Clone, Copy)]
pub struct CellPadding {
    /// Left padding
    pub left: f32,
    /// Right padding
    pub right: f32,
}

impl CellPadding {
    /// Same padding on both sides.
    pub fn uniform(padding: f32) -> Self {
        Self {
            left: padding,
            right: padding,
        }
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }
}

impl Default for CellPadding {
    fn default() -> Self {
        // 1 mm, the usual cell margin
        Self::uniform(2.835)
    }
}

/// A table cell.
#[derive(Debug, Clone, Default)]
pub struct TableCell {
    /// Cell text
    pub content: String,
}

impl TableCell {
    /// Create a text cell.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A table row.
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    /// Cells
    pub cells: Vec<TableCell>,
    /// Header rows use the header font and are repeated on each page
    pub is_header: bool,
}

impl TableRow {
    /// Create a body row.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }
}

/// Table-wide style.
#[derive(Debug, Clone)]
pub struct TableStyle {
    /// Font size in points
    pub font_size: f32,
    /// Line height as a multiple of the font size
    pub line_spacing: f32,
    /// Horizontal padding
    pub cell_padding: CellPadding,
    /// Line drawn above every cell
    pub top_border: Option<TableBorderStyle>,
    /// Font for body rows
    pub body_font: FontStyle,
    /// Font for header rows
    pub header_font: FontStyle,
    /// Text colour
    pub text_color: Color,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_size: 11.0,
            line_spacing: 2.0,
            cell_padding: CellPadding::default(),
            top_border: Some(TableBorderStyle::new(0.567)),
            body_font: FontStyle::Regular,
            header_font: FontStyle::Bold,
            text_color: Color::black(),
        }
    }
}

impl TableStyle {
    /// Create the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size.
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the top border.
    pub fn top_border(mut self, border: Option<TableBorderStyle>) -> Self {
        self.top_border = border;
        self
    }

    /// Height of one text line.
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }
}

/// A complete table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
    /// Column widths
    pub column_widths: Vec<ColumnWidth>,
    /// Column alignments
    pub column_aligns: Vec<CellAlign>,
    /// Table style
    pub style: TableStyle,
}

/// Calculated layout for a table.
#[derive(Debug, Clone, Default)]
pub struct TableLayout {
    /// Column widths in points
    pub column_widths: Vec<f32>,
    /// Row heights in points
    pub row_heights: Vec<f32>,
    /// Wrapped lines per row and cell
    pub lines: Vec<Vec<Vec<String>>>,
    /// Total table width
    pub total_width: f32,
}

impl TableLayout {
    /// Total height of a range of rows.
    pub fn height_of(&self, rows: Range<usize>) -> f32 {
        self.row_heights[rows].iter().sum()
    }

    /// Total height of the whole table.
    pub fn total_height(&self) -> f32 {
        self.row_heights.iter().sum()
    }
}

impl Table {
    /// Create a new table from rows of cells.
    pub fn new(rows: Vec<Vec<TableCell>>) -> Self {
        let rows: Vec<TableRow> = rows.into_iter().map(TableRow::new).collect();
        Self::from_rows(rows)
    }

    /// Create a table from TableRow objects.
    pub fn from_rows(rows: Vec<TableRow>) -> Self {
        let num_cols = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);

        Self {
            rows,
            column_widths: vec![ColumnWidth::default(); num_cols],
            column_aligns: vec![CellAlign::Left; num_cols],
            style: TableStyle::default(),
        }
    }

    /// Set the first row as header.
    pub fn with_header_row(mut self) -> Self {
        if let Some(row) = self.rows.first_mut() {
            row.is_header = true;
        }
        self
    }

    /// Set table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Set column widths.
    pub fn with_column_widths(mut self, widths: Vec<ColumnWidth>) -> Self {
        self.column_widths = widths;
        self
    }

    /// Set column alignments.
    pub fn with_column_aligns(mut self, aligns: Vec<CellAlign>) -> Self {
        self.column_aligns = aligns;
        self
    }

    /// Get the number of columns.
    pub fn num_columns(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Get the number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of leading header rows.
    pub fn header_rows(&self) -> usize {
        self.rows.iter().take_while(|r| r.is_header).count()
    }

    fn row_font(&self, row: &TableRow) -> FontStyle {
        if row.is_header {
            self.style.header_font
        } else {
            self.style.body_font
        }
    }

    fn column_align(&self, col: usize) -> CellAlign {
        self.column_aligns.get(col).copied().unwrap_or_default()
    }

    /// Calculate the layout for this table.
    pub fn calculate_layout(&self, available_width: f32, fonts: &FontManager) -> TableLayout {
        let num_cols = self.num_columns();
        if num_cols == 0 {
            return TableLayout::default();
        }

        let column_widths = self.calculate_column_widths(available_width, num_cols);
        let line_height = self.style.line_height();

        let mut lines = Vec::with_capacity(self.rows.len());
        let mut row_heights = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let mut row_lines = Vec::with_capacity(row.cells.len());
            let mut max_lines = 1;
            for (col, cell) in row.cells.iter().enumerate() {
                let content_width = column_widths[col] - self.style.cell_padding.horizontal();
                let wrapped = wrap_text(
                    &cell.content,
                    content_width,
                    self.style.font_size,
                    self.row_font(row),
                    fonts,
                );
                max_lines = max_lines.max(wrapped.len());
                row_lines.push(wrapped);
            }
            row_heights.push(max_lines as f32 * line_height);
            lines.push(row_lines);
        }

        TableLayout {
            total_width: column_widths.iter().sum(),
            column_widths,
            row_heights,
            lines,
        }
    }

    fn calculate_column_widths(&self, table_width: f32, num_cols: usize) -> Vec<f32> {
        let specs: Vec<ColumnWidth> = (0..num_cols)
            .map(|col| self.column_widths.get(col).copied().unwrap_or_default())
            .collect();

        let fixed: f32 = specs
            .iter()
            .map(|s| match s {
                ColumnWidth::Fixed(w) => *w,
                ColumnWidth::Weight(_) => 0.0,
            })
            .sum();
        let weight_total: f32 = specs
            .iter()
            .map(|s| match s {
                ColumnWidth::Weight(w) => *w,
                ColumnWidth::Fixed(_) => 0.0,
            })
            .sum();
        let remaining = (table_width - fixed).max(0.0);

        let mut widths: Vec<f32> = specs
            .iter()
            .map(|s| match s {
                ColumnWidth::Fixed(w) => *w,
                ColumnWidth::Weight(w) if weight_total > 0.0 => remaining * *w / weight_total,
                ColumnWidth::Weight(_) => 0.0,
            })
            .collect();

        // Scale down if fixed columns overflow the available width
        let total: f32 = widths.iter().sum();
        if total > table_width && total > 0.0 {
            let scale = table_width / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    /// Render `rows` of the table with the top edge at `top` (PDF user
    /// space, bottom-up). Returns the height drawn.
    pub fn render_rows(
        &self,
        builder: &mut ContentStreamBuilder,
        layout: &TableLayout,
        rows: Range<usize>,
        x: f32,
        top: f32,
    ) -> f32 {
        let font_size = self.style.font_size;
        let line_height = self.style.line_height();
        let mut row_top = top;

        for row_idx in rows {
            let row = &self.rows[row_idx];
            let row_height = layout.row_heights[row_idx];
            let mut cell_x = x;
            let font = self.row_font(row);

            for col in 0..row.cells.len() {
                let width = layout.column_widths[col];

                if let Some(border) = &self.style.top_border {
                    if border.width > 0.0 {
                        builder
                            .stroke_color(border.color)
                            .set_line_width(border.width)
                            .line(cell_x, row_top, cell_x + width, row_top);
                    }
                }

                let align = self.column_align(col);
                let padding = &self.style.cell_padding;
                let content_width = width - padding.horizontal();
                let fonts = FontManager::new();

                for (line_idx, line) in layout.lines[row_idx][col].iter().enumerate() {
                    if line.is_empty() {
                        continue;
                    }
                    let line_width = fonts.text_width(line, font, font_size);
                    let text_x = match align {
                        CellAlign::Left => cell_x + padding.left,
                        CellAlign::Center => cell_x + padding.left + (content_width - line_width) / 2.0,
                        CellAlign::Right => cell_x + width - padding.right - line_width,
                    };
                    // Baseline sits slightly below the middle of the line box
                    let line_top = row_top - line_idx as f32 * line_height;
                    let baseline = line_top - line_height / 2.0 - 0.3 * font_size;

                    builder
                        .begin_text()
                        .set_font(font.resource_name(), font_size)
                        .fill_color(self.style.text_color)
                        .text(line, text_x, baseline);
                }
                builder.end_text();

                cell_x += width;
            }

            row_top -= row_height;
        }

        top - row_top
    }
}

/// Wrap text on word boundaries to fit `max_width`; words wider than the
/// column are broken between characters.
pub fn wrap_text(
    text: &str,
    max_width: f32,
    font_size: f32,
    style: FontStyle,
    fonts: &FontManager,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let candidate = if current_line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current_line, word)
        };

        if fonts.text_width(&candidate, style, font_size) <= max_width {
            current_line = candidate;
            continue;
        }

        if !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
        }

        // Hard-break a word that cannot fit on a line of its own
        for ch in word.chars() {
            current_line.push(ch);
            if fonts.text_width(&current_line, style, font_size) > max_width
                && current_line.chars().count() > 1
            {
                current_line.pop();
                lines.push(std::mem::take(&mut current_line));
                current_line.push(ch);
            }
        }
    }

    if !current_line.is_empty() || lines.is_empty() {
        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(vec![
            vec![
                TableCell::text("N°"),
                TableCell::text("Ind."),
                TableCell::text("Document"),
                TableCell::text("Envoi"),
            ],
            vec![
                TableCell::text("10"),
                TableCell::text("A"),
                TableCell::text("AlimBT"),
                TableCell::text("1"),
            ],
        ])
        .with_header_row()
        .with_column_widths(vec![
            ColumnWidth::Weight(1.0),
            ColumnWidth::Weight(1.0),
            ColumnWidth::Weight(7.0),
            ColumnWidth::Weight(1.0),
        ])
    }

    #[test]
    fn test_table_creation() {
        let table = sample_table();
        assert_eq!(table.num_columns(), 4);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.header_rows(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_weighted_column_widths() {
        let layout = sample_table().calculate_layout(500.0, &FontManager::new());
        assert_eq!(layout.column_widths, vec![50.0, 50.0, 350.0, 50.0]);
        assert_eq!(layout.total_width, 500.0);
    }

    #[test]
    fn test_fixed_and_weighted_columns() {
        let table = Table::new(vec![vec![TableCell::text("a"), TableCell::text("b")]])
            .with_column_widths(vec![ColumnWidth::Fixed(100.0), ColumnWidth::Weight(1.0)]);
        let layout = table.calculate_layout(300.0, &FontManager::new());
        assert_eq!(layout.column_widths, vec![100.0, 200.0]);
    }

    #[test]
    fn test_single_line_row_height() {
        let layout = sample_table().calculate_layout(500.0, &FontManager::new());
        assert_eq!(layout.row_heights, vec![22.0, 22.0]);
        assert_eq!(layout.total_height(), 44.0);
        assert_eq!(layout.height_of(1..2), 22.0);
    }

    #[test]
    fn test_long_text_grows_row() {
        let long = "Schéma unifilaire de distribution basse tension ".repeat(6);
        let table = Table::new(vec![vec![TableCell::text("1"), TableCell::text(long)]])
            .with_column_widths(vec![ColumnWidth::Weight(1.0), ColumnWidth::Weight(3.0)]);
        let layout = table.calculate_layout(400.0, &FontManager::new());
        assert!(layout.lines[0][1].len() > 1);
        assert_eq!(layout.row_heights[0], layout.lines[0][1].len() as f32 * 22.0);
    }

    #[test]
    fn test_wrap_text_breaks_long_word() {
        let fonts = FontManager::new();
        let lines = wrap_text("WWWWWWWWWW", 30.0, 10.0, FontStyle::Regular, &fonts);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(fonts.text_width(line, FontStyle::Regular, 10.0) <= 30.0 || line.chars().count() == 1);
        }
        assert_eq!(lines.concat(), "WWWWWWWWWW");
    }

    #[test]
    fn test_wrap_empty_text() {
        let lines = wrap_text("", 100.0, 10.0, FontStyle::Regular, &FontManager::new());
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn test_render_rows() {
        let table = sample_table();
        let layout = table.calculate_layout(500.0, &FontManager::new());
        let mut builder = ContentStreamBuilder::new();
        let drawn = table.render_rows(&mut builder, &layout, 0..2, 28.0, 700.0);
        assert_eq!(drawn, 44.0);

        let content = String::from_utf8_lossy(&builder.build().unwrap()).to_string();
        assert!(content.contains("/F2 11 Tf"));
        assert!(content.contains("(Document) Tj"));
        assert!(content.contains("/F1 11 Tf"));
        assert!(content.contains("(AlimBT) Tj"));
        // Top border of the first cell
        assert!(content.contains("28 700 m\n78 700 l\nS"));
    }

    #[test]
    fn test_empty_table_layout() {
        let layout = Table::default().calculate_layout(500.0, &FontManager::new());
        assert!(layout.column_widths.is_empty());
        assert_eq!(layout.total_height(), 0.0);
    }
}
