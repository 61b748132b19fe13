//! Glyph widths of the standard fonts, in 1/1000 em, from the Adobe Core 14 AFM files.

use crate::canvas::FontFace;
use crate::encoding::win_ansi_byte;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.2;

/// Baseline offset from the top of a line, as a multiple of the font size.
pub const BASELINE: f32 = 0.8;

const FALLBACK_WIDTH: u16 = 556;
const COURIER_WIDTH: u16 = 600;

/// Helvetica, characters 32 to 126.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space to /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 to 9
    278, 278, 584, 584, 584, 556, 1015, // : to @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667,
    611, 722, 667, 944, 667, 667, 611, // A to Z
    278, 278, 278, 469, 556, 333, // [ to `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, // a to z
    334, 260, 334, 584, // { to ~
];

/// Helvetica-Bold, characters 32 to 126.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // space to /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 to 9
    333, 333, 584, 584, 584, 611, 975, // : to @
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722, 667,
    611, 722, 667, 944, 667, 667, 611, // A to Z
    333, 278, 333, 584, 556, 333, // [ to `
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, // a to z
    389, 280, 389, 584, // { to ~
];

/// Helvetica, WinAnsi codes 0x80 to 0x9F (quotes, dashes, the euro sign, ...). 0 is unassigned.
const HELVETICA_HIGH: [u16; 32] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 0x80
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667, // 0x90
];

/// Helvetica-Bold, WinAnsi codes 0x80 to 0x9F.
const HELVETICA_BOLD_HIGH: [u16; 32] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 0x80
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667, // 0x90
];

/// Width of the glyph `c` is drawn with, after WinAnsi encoding. Unencodable characters are
/// drawn as `?`.
fn glyph_width(c: char, font: FontFace) -> u16 {
    if font.is_monospace() {
        return COURIER_WIDTH;
    }
    let (table, high) = if font.is_bold() {
        (&HELVETICA_BOLD, &HELVETICA_BOLD_HIGH)
    } else {
        (&HELVETICA, &HELVETICA_HIGH)
    };
    match win_ansi_byte(c).unwrap_or(b'?') {
        code @ 32..=126 => table[usize::from(code - 32)],
        code @ 0x80..=0x9F => match high[usize::from(code - 0x80)] {
            0 => FALLBACK_WIDTH,
            width => width,
        },
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points. Oblique faces share the upright widths.
pub fn text_width(text: &str, font: FontFace, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c, font))).sum();
    units as f32 * size / 1000.0
}

pub fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_widths() {
        // "Hi" = H 722 + i 222
        assert!((text_width("Hi", FontFace::Helvetica, 10.0) - 9.44).abs() < 1e-4);
        assert_eq!(text_width("", FontFace::Helvetica, 10.0), 0.0);
        assert!(
            text_width("GET", FontFace::HelveticaBold, 10.0)
                > text_width("GET", FontFace::Helvetica, 10.0)
        );
        assert_eq!(
            text_width("abc", FontFace::HelveticaOblique, 12.0),
            text_width("abc", FontFace::Helvetica, 12.0)
        );
    }

    #[test]
    fn test_courier_is_fixed_width() {
        assert_eq!(text_width("iiii", FontFace::Courier, 10.0), 24.0);
        assert_eq!(text_width("WWWW", FontFace::CourierBold, 10.0), 24.0);
    }

    #[test]
    fn test_tables_cover_printable_ascii() {
        assert_eq!(glyph_width('~', FontFace::Helvetica), 584);
        assert_eq!(glyph_width('z', FontFace::HelveticaBold), 500);
        assert_eq!(glyph_width('é', FontFace::Helvetica), FALLBACK_WIDTH);
    }

    #[test]
    fn test_typographic_punctuation_widths() {
        assert_eq!(glyph_width('—', FontFace::Helvetica), 1000);
        assert_eq!(glyph_width('’', FontFace::Helvetica), 222);
        assert_eq!(glyph_width('“', FontFace::HelveticaBold), 500);
        assert_eq!(glyph_width('…', FontFace::HelveticaBoldOblique), 1000);
        // Drawn as `?`
        assert_eq!(glyph_width('→', FontFace::Helvetica), 556);
    }
}
