//! # Candela - A2 Thermal Printer Driver
//!
//! Candela is a Rust driver for A2-class micro panel thermal receipt
//! printers — the 58mm/384-dot serial modules found in kiosks and
//! hobbyist kits. It provides:
//!
//! - **Protocol implementation**: byte-exact command builders for the
//!   ESC/POS-like A2 command set
//! - **Text encoding**: base code page mapping plus national-charset
//!   switching for accented characters
//! - **Raster images**: RGB pixels → bit-packed head-width bitmaps
//! - **Barcodes**: eleven 1D symbologies with host-side validation
//! - **Transport**: raw-mode serial TTY communication
//!
//! ## Quick Start
//!
//! ```no_run
//! use candela::{Printer, PrinterConfig, SerialTransport};
//! use candela::protocol::barcode::Symbology;
//!
//! // Open the serial port and run the device handshake
//! let transport = SerialTransport::open("/dev/ttyUSB0")?;
//! let mut printer = Printer::new(transport, PrinterConfig::default())?;
//!
//! // Compose a receipt, then flush it to the device
//! printer
//!     .align_center()
//!     .big(true)
//!     .print_line("CANDELA")
//!     .big(false)
//!     .horizontal_line(32)
//!     .align_left()
//!     .print_line("1x coffee          3.50")
//!     .barcode(Symbology::Ean13, "012345678901")?
//!     .line_feed(3);
//! printer.flush()?;
//!
//! # Ok::<(), candela::CandelaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Pure command builders and encoders |
//! | [`printer`] | Stateful driver: composition, queue, transmission |
//! | [`transport`] | Communication backends |
//! | [`error`] | Error types |
//!
//! ## Composition and Transmission
//!
//! Print operations append encoded chunks to an in-memory queue; nothing
//! touches the wire until [`Printer::flush`]. Transmission is strictly
//! sequential — each chunk is written and drained before the next —
//! because the firmware cannot accept overlapping commands.

pub mod error;
pub mod printer;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use error::CandelaError;
pub use printer::{Printer, PrinterConfig};
pub use transport::{SerialTransport, Transport};
