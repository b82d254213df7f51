//! # Text Encoding
//!
//! Converts Unicode strings into the byte stream the firmware prints.
//!
//! Two modes exist, selected by printer configuration:
//!
//! - **Code-page mode** ([`encode_page`]): each character is looked up in
//!   the upper half of the base code page and emitted as `128 + position`.
//!   This never switches device state.
//! - **Extended mode** ([`encode_extended`]): each character is looked up
//!   in the national special-character table; characters living in a
//!   different charset are wrapped in a switch/restore pair of `ESC R`
//!   commands. This reaches glyphs the base page doesn't carry, at the
//!   cost of three extra bytes per foreign character.
//!
//! In both modes, characters absent from the tables pass through as their
//! UTF-8 bytes verbatim, kept contiguous per character. The firmware will
//! print each byte under its current tables, so passthrough of non-ASCII
//! text is best-effort by design.

use super::commands;
use super::cp437;
use super::special_chars;

/// Encode text against the base code page.
///
/// - Characters on the page's upper half: single byte `128 + position`
/// - Everything else (including ASCII): raw UTF-8 bytes verbatim
pub fn encode_page(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match cp437::position(ch) {
            Some(p) => out.push(0x80 + p),
            None => push_raw(&mut out, ch),
        }
    }
    out
}

/// Encode text using national charset switching.
///
/// `active_charset` is the charset currently selected on the device.
/// Characters that need a different charset are emitted as a compound,
/// self-reverting sequence
/// `[ESC R required] code [ESC R active]`, so the device is back on
/// `active_charset` after every character; the caller's charset state
/// never changes.
pub fn encode_extended(text: &str, active_charset: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match special_chars::lookup(ch) {
            Some((code, charset)) if charset == active_charset => out.push(code),
            Some((code, charset)) => {
                out.extend(commands::select_charset(charset));
                out.push(code);
                out.extend(commands::select_charset(active_charset));
            }
            None => push_raw(&mut out, ch),
        }
    }
    out
}

/// Decode a code-page byte stream back into text.
///
/// The inverse of [`encode_page`] for bytes that came from the page
/// (passthrough bytes decode as their code-page glyphs instead). Used by
/// diagnostics and the round-trip tests.
pub fn decode_page(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| cp437::to_char(b)).collect()
}

/// Append a character's UTF-8 bytes unchanged, as one contiguous unit.
fn push_raw(out: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(encode_page("Hello, world!"), b"Hello, world!");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(encode_page(""), b"");
        assert_eq!(encode_extended("", 0), b"");
    }

    #[test]
    fn test_page_glyphs_map_to_upper_half() {
        // é sits at position 2 on the upper half
        assert_eq!(encode_page("é"), vec![0x82]);
        // "Año" → A passthrough, ñ mapped, o passthrough
        assert_eq!(encode_page("Año"), vec![0x41, 0xA4, 0x6F]);
    }

    #[test]
    fn test_page_unmapped_char_is_raw_utf8() {
        // '★' is not on the page; its UTF-8 bytes go out verbatim
        assert_eq!(encode_page("★"), "★".as_bytes());
    }

    #[test]
    fn test_page_round_trip_full_table() {
        // Every byte of the 256-entry page decodes to a glyph that
        // encodes back to the same byte
        for byte in 0u8..=255 {
            let ch = cp437::to_char(byte);
            let encoded = encode_page(&ch.to_string());
            assert_eq!(encoded, vec![byte], "byte 0x{byte:02X} ({ch:?})");
        }
    }

    #[test]
    fn test_decode_page_inverts_encode() {
        let text = "Café ── 100%";
        assert_eq!(decode_page(&encode_page(text)), text);
    }

    #[test]
    fn test_extended_same_charset_is_bare_code() {
        // '{' lives in charset 0; no switch when charset 0 is active
        assert_eq!(encode_extended("{", 0), vec![0x7B]);
    }

    #[test]
    fn test_extended_switches_and_restores() {
        // 'é' needs charset 1; active charset is 0
        assert_eq!(
            encode_extended("é", 0),
            vec![27, 82, 1, 0x7B, 27, 82, 0]
        );
    }

    #[test]
    fn test_extended_restores_non_default_charset() {
        // active charset 2: the restore targets 2, not the default
        assert_eq!(
            encode_extended("é", 2),
            vec![27, 82, 1, 0x7B, 27, 82, 2]
        );
    }

    #[test]
    fn test_extended_each_char_is_self_contained() {
        // Two foreign characters produce two independent switch pairs
        let bytes = encode_extended("éä", 0);
        assert_eq!(
            bytes,
            vec![27, 82, 1, 0x7B, 27, 82, 0, 27, 82, 2, 0x7B, 27, 82, 0]
        );
    }

    #[test]
    fn test_extended_unmapped_char_is_raw_utf8() {
        // 'ñ' is not in the special table; raw UTF-8 passthrough
        assert_eq!(encode_extended("ñ", 0), "ñ".as_bytes());
    }

    #[test]
    fn test_extended_ascii_passes_through() {
        assert_eq!(encode_extended("total: 12", 0), b"total: 12");
    }
}
