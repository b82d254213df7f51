//! # A2 Printer Protocol Implementation
//!
//! Low-level command builders for the ESC/POS-like protocol spoken by
//! A2-class micro panel thermal printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: control commands (init, heat params, feeds, attributes)
//! - [`text`]: Unicode → device byte stream encoding
//! - [`cp437`]: the base code page table
//! - [`special_chars`]: national-charset character table
//! - [`barcode`]: symbology validation and barcode commands
//! - [`raster`]: RGB pixels → bit-packed bitmap command
//!
//! Everything in this module is pure: builders take values and return the
//! exact wire bytes, without touching printer or transport state. That
//! split keeps encoding testable without a device; the stateful side
//! lives in [`crate::printer`].
//!
//! ## Usage Example
//!
//! ```
//! use candela::protocol::{barcode, commands};
//!
//! // Build a print sequence by hand
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(commands::align_center());
//! data.extend(b"RECEIPT\n");
//! data.extend(barcode::encode(barcode::Symbology::Ean13, "012345678901")?);
//! data.extend(commands::feed_lines(2));
//! # Ok::<(), candela::CandelaError>(())
//! ```

pub mod barcode;
pub mod commands;
pub mod cp437;
pub mod raster;
pub mod special_chars;
pub mod text;
