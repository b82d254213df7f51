//! # Barcode Commands
//!
//! The A2 firmware renders 1D barcodes itself: the host sends a symbology
//! code, a length byte and the payload, and the printer draws the bars.
//! The firmware does **not** report validation errors back, it silently
//! prints garbage (or nothing) for payloads it can't encode — so this
//! module validates every payload against the symbology's length and
//! character constraints before a single byte is queued.
//!
//! ## Supported Symbologies
//!
//! | Symbology | Device code | Length   | Characters |
//! |-----------|-------------|----------|------------|
//! | UPC-A     | 0           | 11-12    | digits |
//! | UPC-E     | 1           | 11-12    | digits |
//! | EAN13     | 2           | 12-13    | digits |
//! | EAN8      | 3           | 7-8      | digits |
//! | CODE39    | 4           | > 1      | space $ % + - . / digits A-Z |
//! | I25       | 5           | > 1, even| digits |
//! | CODEBAR   | 6           | > 1      | $ + - . / : digits A-D |
//! | CODE93    | 7           | > 1      | ASCII 0-127 |
//! | CODE128   | 8           | > 1      | ASCII 0-127 |
//! | CODE11    | 9           | > 1      | digits |
//! | MSI       | 10          | > 1      | digits |
//!
//! Open-ended lengths are additionally capped at 255: the wire command
//! carries the payload length in one byte.

use super::commands::GS;
use crate::error::CandelaError;

/// Longest payload the single length byte of the wire command can carry.
const MAX_PAYLOAD: usize = 255;

/// 1D barcode symbologies the firmware can render.
///
/// The discriminant is the device code sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Symbology {
    /// UPC-A (11-12 digits)
    UpcA = 0,
    /// UPC-E (11-12 digits, zero-suppressed UPC-A)
    UpcE = 1,
    /// EAN-13 / JAN-13 (12-13 digits)
    Ean13 = 2,
    /// EAN-8 / JAN-8 (7-8 digits)
    Ean8 = 3,
    /// Code39 (alphanumeric, self-checking)
    Code39 = 4,
    /// Interleaved 2 of 5 (digit pairs)
    I25 = 5,
    /// Codabar / NW-7
    Codebar = 6,
    /// Code93 (full ASCII, denser than Code39)
    Code93 = 7,
    /// Code128 (full ASCII)
    Code128 = 8,
    /// Code11 (digits, telecom labeling)
    Code11 = 9,
    /// MSI / modified Plessey (digits)
    Msi = 10,
}

impl Symbology {
    /// The code byte identifying this symbology on the wire.
    #[inline]
    pub const fn device_code(self) -> u8 {
        self as u8
    }

    /// Whether a payload of `len` characters is printable in this
    /// symbology.
    pub fn length_allowed(self, len: usize) -> bool {
        match self {
            Self::UpcA | Self::UpcE => (11..=12).contains(&len),
            Self::Ean13 => (12..=13).contains(&len),
            Self::Ean8 => (7..=8).contains(&len),
            Self::I25 => len > 1 && len <= MAX_PAYLOAD && len % 2 == 0,
            Self::Code39
            | Self::Codebar
            | Self::Code93
            | Self::Code128
            | Self::Code11
            | Self::Msi => len > 1 && len <= MAX_PAYLOAD,
        }
    }

    /// Whether this symbology can encode the character.
    pub fn char_allowed(self, ch: char) -> bool {
        match self {
            Self::UpcA
            | Self::UpcE
            | Self::Ean13
            | Self::Ean8
            | Self::I25
            | Self::Code11
            | Self::Msi => ch.is_ascii_digit(),
            Self::Code39 => {
                matches!(ch, ' ' | '$' | '%' | '+' | '-' | '.' | '/')
                    || ch.is_ascii_digit()
                    || ch.is_ascii_uppercase()
            }
            Self::Codebar => {
                matches!(ch, '$' | '+' | '-' | '.' | '/' | ':')
                    || ch.is_ascii_digit()
                    || ('A'..='D').contains(&ch)
            }
            Self::Code93 | Self::Code128 => (ch as u32) <= 0x7F,
        }
    }
}

/// # Print Barcode (GS k n1 n2 data)
///
/// Validates `payload` against the symbology and builds the wire command
/// `[29, 107, device_code, len] + payload bytes`.
///
/// Validation is all-or-nothing and runs before any byte is produced:
/// the length predicate first, then every character in order.
///
/// ## Errors
///
/// - [`CandelaError::InvalidBarcodeLength`] when the payload length is
///   outside the symbology's range
/// - [`CandelaError::InvalidBarcodeCharacter`] citing the first character
///   the symbology can't encode
pub fn encode(symbology: Symbology, payload: &str) -> Result<Vec<u8>, CandelaError> {
    let len = payload.chars().count();
    if !symbology.length_allowed(len) {
        return Err(CandelaError::InvalidBarcodeLength {
            symbology,
            length: len,
        });
    }
    for ch in payload.chars() {
        if !symbology.char_allowed(ch) {
            return Err(CandelaError::InvalidBarcodeCharacter {
                symbology,
                character: ch,
            });
        }
    }

    // Every allowed character is ASCII, so char == wire byte
    let mut cmd = Vec::with_capacity(4 + len);
    cmd.push(GS);
    cmd.push(b'k');
    cmd.push(symbology.device_code());
    cmd.push(len as u8);
    cmd.extend(payload.chars().map(|ch| ch as u8));
    Ok(cmd)
}

/// # Barcode Text Position (GS H n)
///
/// Where the human-readable digits print relative to the bars:
/// 0 none, 1 above, 2 below, 3 both. Decimal: `29 72 n`
///
/// Fails with [`CandelaError::InvalidRange`] when `pos > 3`.
pub fn text_position(pos: u8) -> Result<Vec<u8>, CandelaError> {
    if pos > 3 {
        return Err(CandelaError::InvalidRange {
            what: "barcode text position",
            value: pos as i64,
            min: 0,
            max: 3,
        });
    }
    Ok(vec![GS, b'H', pos])
}

/// # Barcode Height (GS h n)
///
/// Bar height in dots. The full 0-255 device range is valid.
/// Decimal: `29 104 n`
#[inline]
pub fn height(h: u8) -> Vec<u8> {
    vec![GS, b'h', h]
}

// ============================================================================
// TESTS
// ============================================================================
