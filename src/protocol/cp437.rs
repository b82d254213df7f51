//! # Base Code Page (CP437)
//!
//! The A2 firmware powers on with code table 0, an IBM Code Page 437
//! layout: bytes 0x00-0x7F are plain ASCII, bytes 0x80-0xFF are the CP437
//! upper half (accented Latin, box drawing, Greek, math symbols).
//!
//! This module holds the upper half as an indexable table. The text
//! encoder searches it by character and emits `128 + position`; the
//! reverse direction ([`to_char`]) exists for decoding and round-trip
//! tests.

/// Upper half of the device's 256-entry code page, in byte order.
///
/// `UPPER_HALF[p]` is the glyph printed for byte `128 + p`.
pub const UPPER_HALF: [char; 128] = [
    // 0x80-0x8F: accented uppercase/lowercase
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    // 0x90-0x9F: more accented, currency, ƒ
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    // 0xA0-0xAF: Spanish, fractions, punctuation
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0-0xBF: shade blocks, box drawing
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0-0xCF: box drawing
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0-0xDF: box drawing, block elements
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0-0xEF: Greek letters and math
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    // 0xF0-0xFF: math symbols, degree, NBSP
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];

/// Find a character's position in the upper half of the code page.
///
/// Returns `Some(p)` with `0 <= p < 128` when the glyph is on the page;
/// the wire byte for it is `128 + p`.
pub fn position(ch: char) -> Option<u8> {
    UPPER_HALF.iter().position(|&c| c == ch).map(|p| p as u8)
}

/// The glyph the device prints for a byte of the 256-entry page.
///
/// Bytes below 128 are ASCII; bytes 128-255 index [`UPPER_HALF`].
pub fn to_char(byte: u8) -> char {
    if byte < 0x80 {
        byte as char
    } else {
        UPPER_HALF[(byte - 0x80) as usize]
    }
}
