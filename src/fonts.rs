use pdf_writer::{Name, Pdf, Ref};

/// A registered base-14 font: its PDF resource name plus the WinAnsi width
/// table used for all measurement.
pub(crate) struct FontEntry {
    pub(crate) pdf_name: &'static str,
    pub(crate) font_ref: Ref,
    widths_1000: Vec<f32>,
}

impl FontEntry {
    /// Width of a single character in 1000-units, via WinAnsi lookup.
    fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    /// Rendered width of `text` at `font_size` points.
    pub(crate) fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }
}

/// The two faces every document uses. Base-14 Type1 fonts need no embedded
/// data; viewers supply the glyphs and layout uses the approximate width
/// tables below.
pub(crate) struct Fonts {
    pub(crate) regular: FontEntry,
    pub(crate) bold: FontEntry,
}

impl Fonts {
    pub(crate) fn register(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> Fonts {
        let regular = register_base14(pdf, alloc, "F1", b"Helvetica", helvetica_widths());
        let bold = register_base14(pdf, alloc, "F2", b"Helvetica-Bold", helvetica_bold_widths());
        Fonts { regular, bold }
    }

    pub(crate) fn face(&self, bold: bool) -> &FontEntry {
        if bold { &self.bold } else { &self.regular }
    }
}

fn register_base14(
    pdf: &mut Pdf,
    alloc: &mut impl FnMut() -> Ref,
    pdf_name: &'static str,
    base_font: &[u8],
    widths_1000: Vec<f32>,
) -> FontEntry {
    let font_ref = alloc();
    pdf.type1_font(font_ref)
        .base_font(Name(base_font))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    FontEntry {
        pdf_name,
        font_ref,
        widths_1000,
    }
}

/// Map a single Unicode char to its WinAnsi (Windows-1252) byte, or 0 if
/// unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi bytes for PDF Str encoding. Unmappable
/// characters are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            _ => 556.0,
        })
        .collect()
}

/// Approximate Helvetica-Bold widths, same scheme as the regular table.
fn helvetica_bold_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,
            33..=47 => 333.0,
            48..=57 => 556.0,
            58..=64 => 333.0,
            73 | 74 => 278.0,
            77 => 889.0,
            65..=90 => 722.0,
            91..=96 => 333.0,
            102 | 105 | 106 | 108 | 116 => 333.0,
            109 | 119 => 889.0,
            97..=122 => 611.0,
            _ => 611.0,
        })
        .collect()
}
