//! Advance widths for the built-in Helvetica faces, in 1/1000 em.
//!
//! Values come from the Adobe Core 14 AFM files. The oblique faces share the
//! widths of their upright counterparts.

use crate::font::BuiltinFont;

/// Printable ASCII, `' '` (32) through `'~'` (126).
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32..47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48..63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64..79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80..95
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96..111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 112..126
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32..47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 48..63
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 64..79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 80..95
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 96..111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 112..126
];

fn char_width(font: BuiltinFont, c: char) -> u16 {
    let table = if font.is_bold() {
        &HELVETICA_BOLD
    } else {
        &HELVETICA
    };
    match c {
        ' '..='~' => table[c as usize - 32],
        '\u{2022}' => 350,
        '\u{00A9}' | '\u{00AE}' => 737,
        '\u{2014}' => 1000,
        '\u{2013}' => 556,
        _ if font.is_bold() => 611,
        _ => 556,
    }
}

/// Width in points of `text` set in `font` at `font_size`.
pub fn text_width(text: &str, font: BuiltinFont, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(font, c) as u32).sum();
    units as f32 * font_size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_tabular() {
        let a = text_width("$150.00", BuiltinFont::Helvetica, 10.0);
        let b = text_width("$999.99", BuiltinFont::Helvetica, 10.0);
        assert!((a - b).abs() < f32::EPSILON);
    }

    #[test]
    fn bold_is_wider_than_regular() {
        let regular = text_width("Total Amount:", BuiltinFont::Helvetica, 16.0);
        let bold = text_width("Total Amount:", BuiltinFont::HelveticaBold, 16.0);
        assert!(bold > regular);
    }

    #[test]
    fn known_width() {
        // H(722) + i(222) = 944 units
        assert!((text_width("Hi", BuiltinFont::Helvetica, 1000.0) - 944.0).abs() < 0.01);
        assert_eq!(text_width("", BuiltinFont::HelveticaBold, 12.0), 0.0);
    }
}
