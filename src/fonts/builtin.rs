//! The PDF base fonts this crate relies on when no font files are available.
//!
//! Base fonts are never embedded: every conforming viewer ships them. Their
//! advance widths are fixed by the Adobe Core14 metrics, reproduced here for
//! the printable ASCII range so that text can be measured without touching
//! the filesystem. Text is written with `WinAnsiEncoding`.

use crate::units::Pt;

/// One of the standard base fonts
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    TimesRoman,
    TimesBold,
}

/// Glyph space units per em for every base font
const UNITS_PER_EM: f32 = 1000.0;

// advance widths for 0x20..=0x7E
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

impl BuiltinFont {
    pub const ALL: [BuiltinFont; 5] = [
        BuiltinFont::Helvetica,
        BuiltinFont::HelveticaBold,
        BuiltinFont::HelveticaOblique,
        BuiltinFont::TimesRoman,
        BuiltinFont::TimesBold,
    ];

    /// The PostScript name the font is referred to by in the PDF
    pub fn base_font(self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::TimesRoman => "Times-Roman",
            BuiltinFont::TimesBold => "Times-Bold",
        }
    }

    pub fn from_name(name: &str) -> Option<BuiltinFont> {
        BuiltinFont::ALL
            .into_iter()
            .find(|font| font.base_font() == name)
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            // the oblique cut shares the upright metrics
            BuiltinFont::Helvetica | BuiltinFont::HelveticaOblique => &HELVETICA,
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD,
            BuiltinFont::TimesRoman => &TIMES_ROMAN,
            BuiltinFont::TimesBold => &TIMES_BOLD,
        }
    }

    /// Advance width of a character in glyph space (1/1000 em). Characters
    /// that can't be encoded measure as the `?` they will be drawn as.
    pub fn advance(self, ch: char) -> u16 {
        let ch = if encode_char(ch) == b'?' { '?' } else { ch };
        match ch {
            ' '..='~' => self.widths()[ch as usize - 0x20],
            '\u{a0}' => self.advance(' '),
            '¡' => self.advance('!'),
            '¿' => self.advance('?'),
            '°' => 400,
            'ª' => match self {
                BuiltinFont::TimesRoman => 276,
                BuiltinFont::TimesBold => 300,
                _ => 370,
            },
            'º' => match self {
                BuiltinFont::TimesRoman => 310,
                BuiltinFont::TimesBold => 330,
                _ => 365,
            },
            // accented lowercase i is built on the dotless i, which is wider
            // than `i` in the Helvetica cuts
            'ì' | 'í' | 'î' | 'ï' => 278,
            other => fold_accent(other)
                .map(|base| self.advance(base))
                .unwrap_or_else(|| self.advance('?')),
        }
    }

    /// Width of a run of text at the given size
    pub fn width_of_text(self, text: &str, size: Pt) -> Pt {
        let units: u32 = text.chars().map(|ch| self.advance(ch) as u32).sum();
        size * (units as f32 / UNITS_PER_EM)
    }

    /// Encode text as `WinAnsiEncoding` bytes
    pub fn encode(self, text: &str) -> Vec<u8> {
        text.chars().map(encode_char).collect()
    }
}

/// Map a character to its `WinAnsiEncoding` code, substituting `?` for
/// anything the encoding can't represent. Only the printable ASCII range and
/// the characters [BuiltinFont::advance] knows metrics for are passed through.
fn encode_char(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\u{a0}' | '¡' | '¿' | '°' | 'ª' | 'º' | 'ì' | 'í' | 'î' | 'ï' => ch as u32 as u8,
        other if fold_accent(other).is_some() => other as u32 as u8,
        _ => b'?',
    }
}

/// The unaccented letter a Latin-1 accented letter is built on. Accented
/// glyphs in the base fonts share the advance of their base letter.
fn fold_accent(ch: char) -> Option<char> {
    let base = match ch {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'Ç' => 'C',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ñ' => 'N',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'Ý' => 'Y',
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}
