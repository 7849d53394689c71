//! Advance widths for the built-in PDF fonts used by the generators.
//!
//! Widths are taken from the Adobe core-font AFM files, in 1/1000 em, for
//! the printable ASCII range. Text width is the plain sum of advances, no
//! kerning, so a longer string is never narrower than its prefix.

use printpdf::BuiltinFont;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    TimesItalic,
}

/// Helvetica, chars 32..=126
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica-Bold, chars 32..=126
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, //
];

/// Times-Italic, chars 32..=126
const TIMES_ITALIC: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278, //
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500, //
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722, //
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500, //
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500, //
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541, //
];

impl Font {
    pub fn builtin(self) -> BuiltinFont {
        match self {
            Font::Helvetica => BuiltinFont::Helvetica,
            Font::HelveticaBold => BuiltinFont::HelveticaBold,
            Font::TimesItalic => BuiltinFont::TimesItalic,
        }
    }

    fn table(self) -> &'static [u16; 95] {
        match self {
            Font::Helvetica => &HELVETICA,
            Font::HelveticaBold => &HELVETICA_BOLD,
            Font::TimesItalic => &TIMES_ITALIC,
        }
    }

    /// Advance of a single character in 1/1000 em.
    pub fn char_width(self, c: char) -> u16 {
        let code = c as u32;
        if (32..=126).contains(&code) {
            return self.table()[(code - 32) as usize];
        }
        // Bullet, then an average-glyph fallback for anything outside the table.
        match (self, c) {
            (_, '\u{2022}') => 350,
            (Font::TimesItalic, _) => 500,
            _ => 556,
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(Font::Helvetica.char_width(' '), 278);
        assert_eq!(Font::Helvetica.char_width('W'), 944);
        assert_eq!(Font::HelveticaBold.char_width('b'), 611);
        assert_eq!(Font::TimesItalic.char_width('~'), 541);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let w12 = Font::Helvetica.text_width("Samosa", 12.0);
        let w24 = Font::Helvetica.text_width("Samosa", 24.0);
        assert!((w24 - 2.0 * w12).abs() < 0.001);
    }

    #[test]
    fn test_width_is_monotonic() {
        let text = "Jollof rice with plantains";
        let mut last = 0.0;
        for end in 1..=text.len() {
            let w = Font::HelveticaBold.text_width(&text[..end], 14.0);
            assert!(w >= last);
            last = w;
        }
    }

    #[test]
    fn test_non_ascii_has_width() {
        assert!(Font::Helvetica.text_width("Crème brûlée", 12.0) > 0.0);
    }
}
