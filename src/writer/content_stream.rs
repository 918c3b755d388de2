//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! according to PDF specification ISO 32000-1:2008 Section 8-9.

use super::font_manager::encode_win_ansi;
use crate::error::Result;
use std::io::Write;

/// RGB colour with components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
}

impl Color {
    /// Create a colour from 0.0-1.0 components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from 0-255 components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Black.
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Operations that can be added to a content stream.
#[derive(Debug, Clone)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show text (Tj), WinAnsi-encoded on output
    ShowText(String),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f32, f32, f32),
    /// Set stroke color RGB (RG)
    SetStrokeColorRGB(f32, f32, f32),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Stroke (S)
    Stroke,
    /// Fill (f)
    Fill,
    /// Paint XObject (Do)
    PaintXObject(String),
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font resource name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations recorded so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
            // Tf does not survive ET, so the next set_font must be emitted.
            self.current_font = None;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    pub fn set_font(&mut self, resource: &str, size: f32) -> &mut Self {
        if self.current_font.as_deref() != Some(resource) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(resource.to_string(), size));
            self.current_font = Some(resource.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Add text with its baseline starting at (x, y).
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(text.to_string()))
    }

    /// Set fill color.
    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorRGB(color.r, color.g, color.b))
    }

    /// Set stroke color.
    pub fn stroke_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeColorRGB(color.r, color.g, color.b))
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Stroke a straight line between two points.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::MoveTo(x1, y1))
            .op(ContentStreamOp::LineTo(x2, y2))
            .op(ContentStreamOp::Stroke)
    }

    /// Fill a rectangle with the current fill colour.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
            .op(ContentStreamOp::Fill)
    }

    /// Save the current graphics state.
    pub fn save_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::SaveState)
    }

    /// Restore the previous graphics state.
    pub fn restore_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::RestoreState)
    }

    /// Draw an image XObject at the specified position and size.
    ///
    /// `x`, `y` is the lower-left corner in PDF user space.
    pub fn draw_image(
        &mut self,
        resource_id: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> &mut Self {
        self.end_text();
        self.save_state()
            .op(ContentStreamOp::Transform(width, 0.0, 0.0, height, x, y))
            .op(ContentStreamOp::PaintXObject(resource_id.to_string()))
            .restore_state()
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }
}

/// Format a number without trailing zeros.
fn num(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.3}", value);
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::Transform(a, b, c, d, e, f) => write!(
            w,
            "{} {} {} {} {} {} cm",
            num(*a),
            num(*b),
            num(*c),
            num(*d),
            num(*e),
            num(*f)
        ),
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, num(*size)),
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => write!(
            w,
            "{} {} {} {} {} {} Tm",
            num(*a),
            num(*b),
            num(*c),
            num(*d),
            num(*e),
            num(*f)
        ),
        ContentStreamOp::ShowText(text) => {
            write!(w, "(")?;
            write_escaped(w, &encode_win_ansi(text))?;
            write!(w, ") Tj")
        },
        ContentStreamOp::SetFillColorRGB(r, g, b) => {
            write!(w, "{} {} {} rg", num(*r), num(*g), num(*b))
        },
        ContentStreamOp::SetStrokeColorRGB(r, g, b) => {
            write!(w, "{} {} {} RG", num(*r), num(*g), num(*b))
        },
        ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", num(*width)),
        ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", num(*x), num(*y)),
        ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", num(*x), num(*y)),
        ContentStreamOp::Rectangle(x, y, width, height) => {
            write!(w, "{} {} {} {} re", num(*x), num(*y), num(*width), num(*height))
        },
        ContentStreamOp::Stroke => write!(w, "S"),
        ContentStreamOp::Fill => write!(w, "f"),
        ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
    }
}

/// Write string bytes escaped for a literal string; bytes above 0x7E as octal.
fn write_escaped<W: Write>(w: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    for &byte in bytes {
        match byte {
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            b'\\' => write!(w, "\\\\")?,
            0x20..=0x7E => w.write_all(&[byte])?,
            _ => write!(w, "\\{:03o}", byte)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(builder: &ContentStreamBuilder) -> String {
        String::from_utf8_lossy(&builder.build().unwrap()).to_string()
    }

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("F1", 12.0)
            .text("Liste des Plans BPE", 72.0, 720.5)
            .end_text();

        let content = render(&builder);
        assert!(content.contains("BT"));
        assert!(content.contains("/F1 12 Tf"));
        assert!(content.contains("1 0 0 1 72 720.5 Tm"));
        assert!(content.contains("(Liste des Plans BPE) Tj"));
        assert!(content.contains("ET"));
    }

    #[test]
    fn test_win_ansi_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("F1", 11.0)
            .text("N° é", 0.0, 0.0)
            .end_text();

        let content = render(&builder);
        assert!(content.contains("(N\\260 \\351) Tj"));
    }

    #[test]
    fn test_escaped_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("Plan (v2) \\ fin", 0.0, 0.0).end_text();
        assert!(render(&builder).contains("(Plan \\(v2\\) \\\\ fin) Tj"));
    }

    #[test]
    fn test_font_reset_after_text_object() {
        let mut builder = ContentStreamBuilder::new();
        builder.begin_text().set_font("F1", 11.0).end_text();
        builder.begin_text().set_font("F1", 11.0).end_text();

        let count = builder
            .operations()
            .iter()
            .filter(|op| matches!(op, ContentStreamOp::SetFont(..)))
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_line_and_fill() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .stroke_color(Color::from_rgb8(43, 113, 184))
            .set_line_width(2.5)
            .line(0.0, 10.0, 100.0, 10.0)
            .fill_color(Color::black())
            .fill_rect(1.0, 2.0, 3.0, 4.0);

        let content = render(&builder);
        assert!(content.contains("0.169 0.443 0.722 RG"));
        assert!(content.contains("2.5 w"));
        assert!(content.contains("0 10 m\n100 10 l\nS"));
        assert!(content.contains("0 0 0 rg"));
        assert!(content.contains("1 2 3 4 re\nf"));
    }

    #[test]
    fn test_draw_image_closes_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("a", 0.0, 0.0).draw_image("Im1", 10.0, 20.0, 170.0, 40.0);

        let content = render(&builder);
        assert!(content.contains("ET\nq\n170 0 0 40 10 20 cm\n/Im1 Do\nQ"));
    }
}
