//! Font metrics and text encoding for the base-14 Helvetica family.
//!
//! The serializer uses Type1 Helvetica with WinAnsiEncoding, so it needs its
//! own advance widths for wrapping and centering. ASCII widths come from the
//! Adobe AFM tables; Latin-1 accented letters reuse the width of their base
//! letter, which is exact for Helvetica's composite glyphs.

/// The two fonts registered in every page's resource dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// Resource name used in content streams (`/F1 12 Tf`).
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    pub fn postscript_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// Helvetica advance widths for 0x20..=0x7E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Helvetica-Bold advance widths for 0x20..=0x7E, in 1/1000 em.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

/// Fold a Latin-1 letter onto the base letter whose glyph it composes.
fn fold_latin1(c: char) -> char {
    match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Advance width of one char in 1/1000 em.
fn unit_width(font: Font, c: char) -> u16 {
    let table = match font {
        Font::Helvetica => &HELVETICA_WIDTHS,
        Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
    };
    let folded = fold_latin1(c);
    match folded {
        ' '..='~' => table[folded as usize - 0x20],
        'Æ' => 1000,
        'æ' => 889,
        'ß' => 611,
        // Anything else renders as '?' (see `to_winansi_hex`).
        _ => table['?' as usize - 0x20],
    }
}

/// Width of a string at the given font size, in points.
pub fn string_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| unit_width(font, c) as u32).sum();
    units as f32 * size / 1000.0
}

/// Encode text as a PDF hex string of WinAnsi bytes (`<...> Tj`).
///
/// WinAnsi matches Latin-1 in 0xA0..=0xFF, which covers the Portuguese
/// labels; a handful of CP-1252 specials are mapped explicitly and anything
/// else becomes '?'.
pub fn to_winansi_hex(text: &str) -> String {
    let mut hex = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        let byte = match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        };
        hex.push_str(&format!("{:02X}", byte));
    }
    hex
}

/// Greedy word wrap against a maximum line width. Words that alone exceed
/// the limit are placed on their own line rather than split.
pub fn word_wrap(text: &str, max_width: f32, font: Font, size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if string_width(&candidate, font, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ascii_widths_match_afm() {
        // 'H' is 722, 'i' is 222 in the Helvetica AFM.
        assert_eq!(string_width("Hi", Font::Helvetica, 1000.0), 944.0);
    }

    #[test]
    fn test_accented_letters_use_base_width() {
        assert_eq!(
            string_width("ó", Font::Helvetica, 12.0),
            string_width("o", Font::Helvetica, 12.0)
        );
        assert_eq!(
            string_width("Título", Font::HelveticaBold, 14.0),
            string_width("Titulo", Font::HelveticaBold, 14.0)
        );
    }

    #[test]
    fn test_winansi_hex_encodes_latin1() {
        // 'í' is 0xED in Latin-1/WinAnsi.
        assert_eq!(to_winansi_hex("í"), "ED");
        assert_eq!(to_winansi_hex("A b"), "412062");
    }

    #[test]
    fn test_winansi_hex_replaces_unmapped_chars() {
        assert_eq!(to_winansi_hex("漢"), "3F");
    }

    #[test]
    fn test_word_wrap_respects_max_width() {
        let max = string_width("one two three", Font::Helvetica, 10.0);
        let lines = word_wrap("one two three four five six", max, Font::Helvetica, 10.0);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(string_width(line, Font::Helvetica, 10.0) <= max);
        }
    }

    #[test]
    fn test_word_wrap_keeps_oversized_word_whole() {
        let lines = word_wrap("supercalifragilistic", 10.0, Font::Helvetica, 10.0);
        assert_eq!(lines, vec!["supercalifragilistic"]);
    }

    #[test]
    fn test_word_wrap_empty_text() {
        assert!(word_wrap("   ", 100.0, Font::Helvetica, 10.0).is_empty());
    }
}
