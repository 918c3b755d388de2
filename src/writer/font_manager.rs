//! Font management for PDF generation.
//!
//! The listing uses the Helvetica family of the PDF Base-14 fonts with
//! WinAnsiEncoding, which covers French text (accents, `°`, `œ`, `€`)
//! without embedding a font file. Widths come from the Adobe AFM files and
//! are expressed in 1/1000 of the font size.

/// Helvetica widths for code points 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold widths for code points 32..=126.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for characters the tables do not know.
const DEFAULT_WIDTH: f32 = 556.0;

/// Helvetica ascender, in font units.
pub const ASCENDER: f32 = 718.0;

/// Helvetica descender, in font units (negative).
pub const DESCENDER: f32 = -207.0;

/// Style of a Helvetica face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    /// Helvetica
    #[default]
    Regular,
    /// Helvetica-Bold
    Bold,
    /// Helvetica-Oblique
    Italic,
    /// Helvetica-BoldOblique
    BoldItalic,
}

impl FontStyle {
    /// All faces, in resource order.
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Regular,
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
    ];

    /// PostScript name used as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Italic => "Helvetica-Oblique",
            FontStyle::BoldItalic => "Helvetica-BoldOblique",
        }
    }

    /// Name of the font in page resource dictionaries.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
            FontStyle::BoldItalic => "F4",
        }
    }

    /// Whether this face uses the bold metrics.
    pub fn is_bold(&self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }
}

/// Font metrics for the Helvetica family.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontManager;

impl FontManager {
    /// Create a font manager.
    pub fn new() -> Self {
        Self
    }

    /// Width of a character in font units.
    pub fn char_width(&self, ch: char, style: FontStyle) -> f32 {
        let table = if style.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };

        let ch = fold_accent(ch);
        if (' '..='~').contains(&ch) {
            return table[ch as usize - 32] as f32;
        }

        match ch {
            '\u{a0}' => 278.0,
            '°' => 400.0,
            '«' | '»' | '€' | '–' => 556.0,
            '’' | '‘' => if style.is_bold() { 278.0 } else { 222.0 },
            'œ' => 944.0,
            'Œ' | '—' | '…' => 1000.0,
            _ => DEFAULT_WIDTH,
        }
    }

    /// Width of a string in points at the given size.
    pub fn text_width(&self, text: &str, style: FontStyle, font_size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| self.char_width(c, style)).sum();
        units * font_size / 1000.0
    }

    /// Distance from the top of a line box to the baseline, in points.
    pub fn ascent(&self, font_size: f32) -> f32 {
        ASCENDER * font_size / 1000.0
    }

    /// Natural line height in points.
    pub fn line_height(&self, font_size: f32) -> f32 {
        (ASCENDER - DESCENDER) * font_size / 1000.0
    }
}

/// Map accented Latin letters to the unaccented letter with the same width.
fn fold_accent(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'ç' => 'c',
        'Ç' => 'C',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        '\t' => ' ',
        other => other,
    }
}

/// Encode text as WinAnsiEncoding (Windows-1252) bytes.
///
/// Characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\t' => b' ',
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        })
        .collect()
}
