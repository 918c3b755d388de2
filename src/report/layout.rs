//! Page geometry and top-down flow over a [`PdfWriter`].
//!
//! Layout code works with `y` measured in points from the top edge of the
//! page, the way the listing is designed on paper; conversion to PDF user
//! space happens at draw time.

use crate::error::{Error, Result};
use crate::writer::{
    CellAlign, Color, ContentStreamBuilder, FontManager, FontStyle, PdfWriter, A4_HEIGHT, A4_WIDTH,
};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimetres to points.
pub fn mm(value: f32) -> f32 {
    value * PT_PER_MM
}

/// Horizontal padding inside text cells.
pub const CELL_MARGIN: f32 = 1.0 * PT_PER_MM;

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Left margin
    pub margin_left: f32,
    /// Right margin
    pub margin_right: f32,
    /// Top margin, where flow starts on a new page
    pub margin_top: f32,
    /// Distance from the bottom edge below which content breaks to a new page
    pub break_margin: f32,
}

impl PageGeometry {
    /// A4 portrait with 10 mm margins and a 20 mm bottom break zone.
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin_left: mm(10.0),
            margin_right: mm(10.0),
            margin_top: mm(10.0),
            break_margin: mm(20.0),
        }
    }

    /// Width between the side margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest `y` (from the top) content may reach.
    pub fn break_limit(&self) -> f32 {
        self.height - self.break_margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// A line of text placed in a box, the way a form cell is filled.
#[derive(Debug, Clone, Copy)]
pub struct TextCell<'t> {
    /// Text
    pub text: &'t str,
    /// Face
    pub style: FontStyle,
    /// Size in points
    pub size: f32,
    /// Colour
    pub color: Color,
    /// Alignment in the box
    pub align: CellAlign,
}

impl<'t> TextCell<'t> {
    /// Black, left-aligned text.
    pub fn new(text: &'t str, style: FontStyle, size: f32) -> Self {
        Self {
            text,
            style,
            size,
            color: Color::black(),
            align: CellAlign::Left,
        }
    }

    /// Set the colour.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the alignment.
    pub fn align(mut self, align: CellAlign) -> Self {
        self.align = align;
        self
    }
}

/// Top-down flow of content over the pages of a writer.
pub struct PageFlow {
    writer: PdfWriter,
    geometry: PageGeometry,
    fonts: FontManager,
    y: f32,
}

impl PageFlow {
    /// Start a flow on a fresh first page.
    pub fn new(writer: PdfWriter, geometry: PageGeometry) -> Self {
        let mut flow = Self {
            writer,
            geometry,
            fonts: FontManager::new(),
            y: 0.0,
        };
        flow.new_page();
        flow
    }

    /// Page geometry.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Current position from the top of the page.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move down by `dy`.
    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Number of pages so far.
    pub fn page_count(&self) -> usize {
        self.writer.page_count()
    }

    /// Start a new page and move to its top margin.
    pub fn new_page(&mut self) {
        self.writer.add_page(self.geometry.width, self.geometry.height);
        self.y = self.geometry.margin_top;
        log::trace!("Page {} started", self.writer.page_count());
    }

    /// Whether `height` more points fit above the break limit.
    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.geometry.break_limit()
    }

    /// Break to a new page unless `height` fits. Returns whether it broke.
    pub fn ensure(&mut self, height: f32) -> bool {
        if self.fits(height) {
            return false;
        }
        self.new_page();
        true
    }

    /// PDF user-space `y` for a distance from the top edge.
    pub fn pdf_y(&self, top: f32) -> f32 {
        self.geometry.height - top
    }

    /// Content stream of the current page.
    pub fn content(&mut self) -> Result<&mut ContentStreamBuilder> {
        let index = self.writer.page_count().saturating_sub(1);
        self.page_content(index)
    }

    /// Content stream of any page (0-indexed).
    pub fn page_content(&mut self, index: usize) -> Result<&mut ContentStreamBuilder> {
        self.writer
            .page(index)
            .map(|page| page.into_content())
            .ok_or_else(|| Error::Rendering(format!("page {} does not exist", index + 1)))
    }

    /// Draw text in the box `(x, top, width, height)`, vertically centred.
    /// A zero height puts the text just under `top`.
    pub fn text_cell(&mut self, cell: TextCell<'_>, x: f32, top: f32, width: f32, height: f32) -> Result<()> {
        let text_width = self.fonts.text_width(cell.text, cell.style, cell.size);
        let text_x = match cell.align {
            CellAlign::Left => x + CELL_MARGIN,
            CellAlign::Center => x + (width - text_width) / 2.0,
            CellAlign::Right => x + width - CELL_MARGIN - text_width,
        };
        let baseline = self.pdf_y(top + height / 2.0 + 0.3 * cell.size);

        self.content()?
            .begin_text()
            .set_font(cell.style.resource_name(), cell.size)
            .fill_color(cell.color)
            .text(cell.text, text_x, baseline)
            .end_text();
        Ok(())
    }

    /// Horizontal rule across `[x1, x2]` at `top`.
    pub fn rule(&mut self, x1: f32, x2: f32, top: f32, width: f32, color: Color) -> Result<()> {
        let y = self.pdf_y(top);
        self.content()?
            .stroke_color(color)
            .set_line_width(width)
            .line(x1, y, x2, y);
        Ok(())
    }

    /// Filled rectangle with its top-left corner at `(x, top)`.
    pub fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Color) -> Result<()> {
        let y = self.pdf_y(top + height);
        self.content()?.fill_color(color).fill_rect(x, y, width, height);
        Ok(())
    }

    /// Give the writer back once layout is done.
    pub fn into_writer(self) -> PdfWriter {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::PdfWriterConfig;

    fn flow() -> PageFlow {
        PageFlow::new(
            PdfWriter::with_config(PdfWriterConfig::default().with_compress(false)),
            PageGeometry::a4(),
        )
    }

    #[test]
    fn test_mm_conversion() {
        assert!((mm(25.4) - 72.0).abs() < 0.001);
        assert!((mm(210.0) - A4_WIDTH).abs() < 0.01);
        assert!((mm(297.0) - A4_HEIGHT).abs() < 0.01);
    }

    #[test]
    fn test_geometry() {
        let geometry = PageGeometry::a4();
        assert!((geometry.content_width() - mm(190.0)).abs() < 0.01);
        assert!((geometry.break_limit() - mm(277.0)).abs() < 0.01);
    }

    #[test]
    fn test_flow_starts_at_top_margin() {
        let flow = flow();
        assert_eq!(flow.page_count(), 1);
        assert!((flow.y() - mm(10.0)).abs() < 0.001);
    }

    #[test]
    fn test_ensure_breaks_page() {
        let mut flow = flow();
        assert!(!flow.ensure(mm(100.0)));
        flow.advance(mm(250.0));
        assert!(flow.ensure(mm(20.0)));
        assert_eq!(flow.page_count(), 2);
        assert!((flow.y() - mm(10.0)).abs() < 0.001);
    }

    #[test]
    fn test_text_cell_centered() {
        let mut flow = flow();
        let width = 200.0;
        flow.text_cell(
            TextCell::new("W", FontStyle::Regular, 10.0).align(CellAlign::Center),
            0.0,
            100.0,
            width,
            0.0,
        )
        .unwrap();

        let bytes = flow.into_writer().finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        // "W" is 9.44pt wide; baseline 3pt under the top
        assert!(content.contains("1 0 0 1 95.28 738.89 Tm"));
    }

    #[test]
    fn test_missing_page_is_rendering_error() {
        let mut flow = flow();
        assert!(matches!(flow.page_content(5), Err(Error::Rendering(_))));
    }
}
