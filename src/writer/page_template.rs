//! Page footers with placeholder support.
//!
//! A footer is drawn on every page once the total page count is known, so
//! `{pages}` can be resolved. Positions are in points measured from the top
//! edge of the page.
//!
//! # Example
//!
//! ```ignore
//! use bpe_listing::writer::{PageFooter, PlaceholderContext, HFElement};
//!
//! let footer = PageFooter::new(HFElement::center("Page {page} sur {pages}"));
//! let text = footer.text.resolve(&PlaceholderContext::new(2, 5));
//! assert_eq!(text, "Page 2 sur 5");
//! ```

use super::content_stream::{Color, ContentStreamBuilder};
use super::font_manager::{FontManager, FontStyle};

/// Placeholder tokens that can be used in footers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Current page number (1-indexed)
    PageNumber,
    /// Total number of pages
    TotalPages,
}

impl Placeholder {
    /// Get the placeholder token string.
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::PageNumber => "{page}",
            Placeholder::TotalPages => "{pages}",
        }
    }

    /// Find every placeholder in a string, by position.
    pub fn parse_all(text: &str) -> Vec<(usize, Placeholder)> {
        let mut placeholders = Vec::new();

        for ph in [Placeholder::PageNumber, Placeholder::TotalPages] {
            let token = ph.token();
            let mut start = 0;
            while let Some(pos) = text[start..].find(token) {
                placeholders.push((start + pos, ph));
                start += pos + token.len();
            }
        }

        placeholders.sort_by_key(|(pos, _)| *pos);
        placeholders
    }
}

/// Text alignment for footer content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HFAlignment {
    /// Align to the left margin
    Left,
    /// Center horizontally
    #[default]
    Center,
    /// Align to the right margin
    Right,
}

/// Style for footer text.
#[derive(Debug, Clone)]
pub struct HFStyle {
    /// Font face
    pub font: FontStyle,
    /// Font size in points
    pub font_size: f32,
    /// Text colour
    pub color: Color,
}

impl Default for HFStyle {
    fn default() -> Self {
        Self {
            font: FontStyle::Italic,
            font_size: 11.0,
            color: Color::black(),
        }
    }
}

impl HFStyle {
    /// Create a new default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font.
    pub fn font(mut self, font: FontStyle, size: f32) -> Self {
        self.font = font;
        self.font_size = size;
        self
    }

    /// Set text color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// A single positioned text element in a footer.
#[derive(Debug, Clone)]
pub struct HFElement {
    /// The text content (may include placeholders)
    pub text: String,
    /// Horizontal alignment
    pub alignment: HFAlignment,
}

impl HFElement {
    /// Create a left-aligned element.
    pub fn left(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: HFAlignment::Left,
        }
    }

    /// Create a center-aligned element.
    pub fn center(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: HFAlignment::Center,
        }
    }

    /// Create a right-aligned element.
    pub fn right(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: HFAlignment::Right,
        }
    }

    /// Resolve placeholders in the text.
    pub fn resolve(&self, context: &PlaceholderContext) -> String {
        self.text
            .replace(Placeholder::PageNumber.token(), &context.page_number.to_string())
            .replace(Placeholder::TotalPages.token(), &context.total_pages.to_string())
    }
}

/// Context for resolving placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderContext {
    /// Current page number (1-indexed)
    pub page_number: usize,
    /// Total number of pages
    pub total_pages: usize,
}

impl PlaceholderContext {
    /// Create a context for one page.
    pub fn new(page_number: usize, total_pages: usize) -> Self {
        Self {
            page_number,
            total_pages,
        }
    }
}

/// One coloured segment of the footer rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleSegment {
    /// Start, from the left page edge
    pub x_start: f32,
    /// End, from the left page edge
    pub x_end: f32,
    /// Segment colour
    pub color: Color,
}

impl RuleSegment {
    /// Create a segment.
    pub fn new(x_start: f32, x_end: f32, color: Color) -> Self {
        Self {
            x_start,
            x_end,
            color,
        }
    }
}

/// A footer: a multi-coloured horizontal rule and one line of text.
#[derive(Debug, Clone)]
pub struct PageFooter {
    /// Rule segments, drawn left to right
    pub segments: Vec<RuleSegment>,
    /// Rule position from the top edge
    pub rule_top: f32,
    /// Rule thickness
    pub rule_width: f32,
    /// Footer text
    pub text: HFElement,
    /// Top of the text cell from the top edge
    pub text_top: f32,
    /// Height of the text cell; the text is centred vertically in it
    pub text_height: f32,
    /// Left margin
    pub margin_left: f32,
    /// Right margin
    pub margin_right: f32,
    /// Text style
    pub style: HFStyle,
}

impl PageFooter {
    /// Create a footer with the given text and no rule.
    pub fn new(text: HFElement) -> Self {
        Self {
            segments: Vec::new(),
            rule_top: 0.0,
            rule_width: 1.0,
            text,
            text_top: 0.0,
            text_height: 0.0,
            margin_left: 0.0,
            margin_right: 0.0,
            style: HFStyle::default(),
        }
    }

    /// Add a rule segment.
    pub fn with_segment(mut self, segment: RuleSegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Set the rule position and thickness.
    pub fn with_rule(mut self, top: f32, width: f32) -> Self {
        self.rule_top = top;
        self.rule_width = width;
        self
    }

    /// Set the text cell.
    pub fn with_text_cell(mut self, top: f32, height: f32) -> Self {
        self.text_top = top;
        self.text_height = height;
        self
    }

    /// Set margins.
    pub fn with_margins(mut self, left: f32, right: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Set the text style.
    pub fn with_style(mut self, style: HFStyle) -> Self {
        self.style = style;
        self
    }

    /// Draw the footer for one page.
    pub fn render(
        &self,
        builder: &mut ContentStreamBuilder,
        context: &PlaceholderContext,
        page_width: f32,
        page_height: f32,
    ) {
        let rule_y = page_height - self.rule_top;
        if !self.segments.is_empty() {
            builder.set_line_width(self.rule_width);
            for segment in &self.segments {
                builder
                    .stroke_color(segment.color)
                    .line(segment.x_start, rule_y, segment.x_end, rule_y);
            }
        }

        let text = self.text.resolve(context);
        if text.is_empty() {
            return;
        }

        let style = &self.style;
        let text_width = FontManager::new().text_width(&text, style.font, style.font_size);
        let left = self.margin_left;
        let right = page_width - self.margin_right;
        let x = match self.text.alignment {
            HFAlignment::Left => left,
            HFAlignment::Center => left + (right - left - text_width) / 2.0,
            HFAlignment::Right => right - text_width,
        };
        let baseline = page_height - (self.text_top + self.text_height / 2.0 + 0.3 * style.font_size);

        builder
            .begin_text()
            .set_font(style.font.resource_name(), style.font_size)
            .fill_color(style.color)
            .text(&text, x, baseline)
            .end_text();
    }
}
