//! # Error Types
//!
//! This module defines error types used throughout the candela library.

use thiserror::Error;

use crate::protocol::barcode::Symbology;

/// Main error type for candela operations
#[derive(Debug, Error)]
pub enum CandelaError {
    /// The serial device could not be opened or configured.
    ///
    /// Raised at construction time only; no printer instance is produced.
    #[error("Invalid transport: {0}")]
    InvalidTransport(String),

    /// A numeric argument was outside the range the firmware accepts.
    #[error("{what} must be between {min} and {max}, got {value}")]
    InvalidRange {
        /// Which parameter was out of range
        what: &'static str,
        /// The rejected value
        value: i64,
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },

    /// Image dimensions don't fit the print head.
    ///
    /// The head is exactly 384 dots wide; height is limited to 65535 rows
    /// by the 16-bit height field of the raster command.
    #[error("Image must be 384 dots wide and 1-65535 dots tall, got {width}x{height}")]
    InvalidImageDimensions {
        /// Actual image width in pixels
        width: u32,
        /// Actual image height in pixels
        height: u32,
    },

    /// Barcode payload length outside the symbology's allowed range.
    #[error("{symbology:?} does not accept a payload of length {length}")]
    InvalidBarcodeLength {
        /// The symbology that rejected the payload
        symbology: Symbology,
        /// The rejected payload length
        length: usize,
    },

    /// Barcode payload contains a character the symbology can't encode.
    #[error("{symbology:?} cannot encode {character:?} (U+{code:04X})", code = *.character as u32)]
    InvalidBarcodeCharacter {
        /// The symbology that rejected the character
        symbology: Symbology,
        /// The offending character
        character: char,
    },

    /// The transport reported a write or drain error mid-flush.
    ///
    /// Reported through the flush completion path; the command buffer is
    /// cleared regardless, so the printer stays usable for a new session.
    #[error("Transmission failed: {0}")]
    Transmission(#[source] std::io::Error),

    /// I/O error wrapper (image files, CLI edges)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
