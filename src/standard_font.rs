//! The Helvetica faces of the PDF standard 14 fonts.
//!
//! Every conforming PDF reader ships these faces, so they are referenced by name and
//! never embedded. Text is encoded with WinAnsiEncoding; characters outside of
//! Latin-1 are replaced with `?`.

use crate::canvas::FontStyle;

/// Advance widths (thousandths of an em) of ASCII 32..=126 in Helvetica
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Advance widths (thousandths of an em) of ASCII 32..=126 in Helvetica-Bold
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Width used for Latin-1 characters beyond ASCII
const FALLBACK_WIDTH: u16 = 556;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl StandardFont {
    /// The Helvetica face for a style
    pub fn helvetica(style: FontStyle) -> StandardFont {
        match style {
            FontStyle::Regular => StandardFont::Helvetica,
            FontStyle::Bold => StandardFont::HelveticaBold,
            FontStyle::Oblique => StandardFont::HelveticaOblique,
            FontStyle::BoldOblique => StandardFont::HelveticaBoldOblique,
        }
    }

    /// The PostScript name readers use to look the face up
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique
        )
    }

    /// Advance width of `ch` in thousandths of an em
    pub fn char_width(&self, ch: char) -> u16 {
        let table = if self.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };
        match ch {
            ' '..='~' => table[ch as usize - 32],
            '\u{a0}' => table[0],
            _ if self.can_encode(ch) => FALLBACK_WIDTH,
            _ => table['?' as usize - 32],
        }
    }

    /// Whether `ch` has a code in WinAnsiEncoding that this crate emits
    pub fn can_encode(&self, ch: char) -> bool {
        matches!(ch, ' '..='~' | '\u{a0}'..='\u{ff}')
    }

    /// The WinAnsi byte for `ch`, or `?` if the character can't be shown
    pub fn encode(&self, ch: char) -> u8 {
        if self.can_encode(ch) {
            ch as u8
        } else {
            b'?'
        }
    }
}
