//! # Printer Driver
//!
//! The stateful side of the crate: a [`Printer`] owns a transport, a
//! command queue and the encoder state the protocol requires (print-mode
//! bitmask, active charset, heat profile).
//!
//! ## Composition Model
//!
//! Operations are fluent and cheap: each one encodes its bytes and
//! appends them to the command queue without touching the wire. An
//! explicit [`Printer::flush`] drains the queue to the device, one chunk
//! at a time, waiting for the transport to drain between chunks. This
//! mirrors how the firmware wants to be fed: strictly sequential
//! commands, optionally paced by a per-command delay.
//!
//! ```no_run
//! use candela::printer::{Printer, PrinterConfig};
//! use candela::transport::SerialTransport;
//!
//! let transport = SerialTransport::open("/dev/ttyUSB0")?;
//! let mut printer = Printer::new(transport, PrinterConfig::default())?;
//!
//! printer
//!     .align_center()
//!     .bold(true)
//!     .print_line("CANDELA")
//!     .bold(false)
//!     .horizontal_line(16)
//!     .print_line("hello from rust")
//!     .line_feed(3);
//! printer.flush()?;
//! # Ok::<(), candela::CandelaError>(())
//! ```
//!
//! ## Validation
//!
//! Fallible operations (barcodes, images, barcode text position) validate
//! before queueing anything: on error the queue is exactly as it was, so
//! a failed operation never leaves half a command pending.
//!
//! ## Concurrency
//!
//! One logical writer owns the printer for the duration of a session;
//! composition and flushing are `&mut self` and never overlap. The device
//! cannot accept interleaved commands, so there is deliberately no
//! parallel write path.

pub mod config;
pub mod queue;

pub use config::PrinterConfig;
pub use queue::CommandQueue;

use std::path::Path;
use std::thread;
use std::time::Duration;

use image::RgbImage;

use crate::error::CandelaError;
use crate::protocol::{barcode, commands, raster, text};
use crate::transport::Transport;

/// Driver for one A2 micro panel thermal printer.
///
/// Construction performs the device handshake (reset, heat parameters,
/// charset) and flushes it; the returned instance is ready to print.
#[derive(Debug)]
pub struct Printer<T: Transport> {
    transport: T,
    config: PrinterConfig,
    queue: CommandQueue,
    print_mode: u8,
    active_charset: u8,
}

impl<T: Transport> Printer<T> {
    /// Build a printer on `transport` and synchronize the device.
    ///
    /// Queues reset (`ESC @`), printing parameters (`ESC 7`) and charset
    /// selection (`ESC R`), then flushes. Any transport failure during
    /// the handshake surfaces here and no usable instance is produced.
    pub fn new(transport: T, config: PrinterConfig) -> Result<Self, CandelaError> {
        let mut printer = Self {
            transport,
            active_charset: config.charset,
            config,
            queue: CommandQueue::new(),
            print_mode: 0,
        };
        printer.reset().send_printing_params();
        let charset = printer.config.charset;
        printer.set_charset(charset);
        printer.flush()?;
        Ok(printer)
    }

    // ------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------

    /// The current print-mode bitmask (see `commands::MODE_*`).
    pub fn print_mode(&self) -> u8 {
        self.print_mode
    }

    /// The charset currently selected on the device.
    pub fn active_charset(&self) -> u8 {
        self.active_charset
    }

    /// Chunks composed but not yet flushed, in transmission order.
    pub fn pending(&self) -> &[Vec<u8>] {
        self.queue.chunks()
    }

    // ------------------------------------------------------------------
    // Device management
    // ------------------------------------------------------------------

    /// Queue a firmware reset (`ESC @`).
    pub fn reset(&mut self) -> &mut Self {
        self.queue.push(commands::init());
        self
    }

    /// Queue the configured heat profile (`ESC 7`).
    pub fn send_printing_params(&mut self) -> &mut Self {
        self.queue.push(commands::printing_params(
            self.config.max_printing_dots,
            self.config.heating_time,
            self.config.heating_interval,
        ));
        self
    }

    /// Queue an international charset switch (`ESC R`) and track it.
    pub fn set_charset(&mut self, code: u8) -> &mut Self {
        self.active_charset = code;
        self.queue.push(commands::select_charset(code));
        self
    }

    /// Queue a character code table switch (`ESC t`).
    pub fn set_code_table(&mut self, code: u8) -> &mut Self {
        self.queue.push(commands::code_table(code));
        self
    }

    /// Queue the firmware self-test page (`DC2 T`).
    pub fn test_page(&mut self) -> &mut Self {
        self.queue.push(commands::test_page());
        self
    }

    /// Queue raw bytes verbatim.
    ///
    /// Escape hatch for firmware commands the driver doesn't model; the
    /// bytes go out as one chunk, unvalidated.
    pub fn write_command(&mut self, bytes: Vec<u8>) -> &mut Self {
        self.queue.push(bytes);
        self
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Queue encoded text without a trailing line feed.
    ///
    /// Encoding follows the configured mode: base code page, or national
    /// charset switching when `extended_charset` is set. Characters
    /// neither table covers pass through as raw UTF-8 bytes.
    pub fn print_text(&mut self, text: &str) -> &mut Self {
        let encoded = if self.config.extended_charset {
            text::encode_extended(text, self.active_charset)
        } else {
            text::encode_page(text)
        };
        self.queue.push(encoded);
        self
    }

    /// Queue encoded text followed by a line feed.
    pub fn print_line(&mut self, text: &str) -> &mut Self {
        self.print_text(text);
        self.queue.push_byte(commands::LF);
        self
    }

    /// Queue a line feed, or a multi-line feed (`ESC d n`) when `lines > 0`.
    pub fn line_feed(&mut self, lines: u8) -> &mut Self {
        if lines == 0 {
            self.queue.push_byte(commands::LF);
        } else {
            self.queue.push(commands::feed_lines(lines));
        }
        self
    }

    // ------------------------------------------------------------------
    // Print mode (stateful bitmask)
    // ------------------------------------------------------------------

    /// OR bits into the print mode and retransmit the whole mask.
    pub fn add_print_mode(&mut self, bits: u8) -> &mut Self {
        self.print_mode |= bits;
        self.queue.push(commands::print_mode(self.print_mode));
        self
    }

    /// Clear bits from the print mode and retransmit the whole mask.
    pub fn remove_print_mode(&mut self, bits: u8) -> &mut Self {
        self.print_mode &= !bits;
        self.queue.push(commands::print_mode(self.print_mode));
        self
    }

    /// Emphasized text (mode bit 3).
    pub fn bold(&mut self, on: bool) -> &mut Self {
        if on {
            self.add_print_mode(commands::MODE_BOLD)
        } else {
            self.remove_print_mode(commands::MODE_BOLD)
        }
    }

    /// Bold + double width + double height in one switch.
    pub fn big(&mut self, on: bool) -> &mut Self {
        if on {
            self.add_print_mode(commands::MODE_BIG)
        } else {
            self.remove_print_mode(commands::MODE_BIG)
        }
    }

    /// Condensed font (mode bit 0).
    pub fn small(&mut self, on: bool) -> &mut Self {
        if on {
            self.add_print_mode(commands::MODE_SMALL)
        } else {
            self.remove_print_mode(commands::MODE_SMALL)
        }
    }

    // ------------------------------------------------------------------
    // Stateless attributes and positioning
    // ------------------------------------------------------------------

    /// White-on-black printing (`GS B`).
    pub fn inverse(&mut self, on: bool) -> &mut Self {
        self.queue.push(commands::inverse(on));
        self
    }

    /// Underline weight in dot rows, 0 to disable (`ESC -`).
    pub fn underline(&mut self, dots: u8) -> &mut Self {
        self.queue.push(commands::underline(dots));
        self
    }

    /// Rotate each line 180 degrees (`ESC {`).
    pub fn upside_down(&mut self, on: bool) -> &mut Self {
        self.queue.push(commands::upside_down(on));
        self
    }

    /// Left-align subsequent lines.
    pub fn align_left(&mut self) -> &mut Self {
        self.queue.push(commands::align_left());
        self
    }

    /// Center subsequent lines.
    pub fn align_center(&mut self) -> &mut Self {
        self.queue.push(commands::align_center());
        self
    }

    /// Right-align subsequent lines.
    pub fn align_right(&mut self) -> &mut Self {
        self.queue.push(commands::align_right());
        self
    }

    /// Indent subsequent lines by `columns` cells (0-31; out-of-range
    /// values fall back to no indent).
    pub fn indent(&mut self, columns: i32) -> &mut Self {
        self.queue.push(commands::indent(columns));
        self
    }

    /// Vertical advance per line feed, in dot rows (`ESC 3`).
    pub fn set_line_spacing(&mut self, spacing: u8) -> &mut Self {
        self.queue.push(commands::line_spacing(spacing));
        self
    }

    /// A rule of box-drawing dashes, capped at 32 columns; `length <= 0`
    /// queues nothing.
    pub fn horizontal_line(&mut self, length: i32) -> &mut Self {
        self.queue.push(commands::horizontal_rule(length));
        self
    }

    // ------------------------------------------------------------------
    // Barcodes
    // ------------------------------------------------------------------

    /// Queue a barcode after validating the payload.
    ///
    /// On validation failure nothing is queued; see
    /// [`barcode::encode`] for the error contract.
    pub fn barcode(
        &mut self,
        symbology: barcode::Symbology,
        payload: &str,
    ) -> Result<&mut Self, CandelaError> {
        let cmd = barcode::encode(symbology, payload)?;
        self.queue.push(cmd);
        Ok(self)
    }

    /// Where the human-readable digits print (0 none, 1 above, 2 below,
    /// 3 both).
    pub fn barcode_text_position(&mut self, pos: u8) -> Result<&mut Self, CandelaError> {
        let cmd = barcode::text_position(pos)?;
        self.queue.push(cmd);
        Ok(self)
    }

    /// Bar height in dots.
    pub fn barcode_height(&mut self, height: u8) -> &mut Self {
        self.queue.push(barcode::height(height));
        self
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Rasterize decoded pixels and queue the bitmap command.
    ///
    /// The image must be exactly 384 pixels wide and at most 65535 tall;
    /// see [`raster::rasterize`]. The header goes out as one chunk and
    /// each scanline as its own chunk, keeping serial writes within the
    /// firmware's line buffer.
    pub fn print_image(&mut self, image: &RgbImage) -> Result<&mut Self, CandelaError> {
        let raster = raster::rasterize(image)?;
        self.queue.push(raster.header().to_vec());
        for row in raster.rows() {
            self.queue.push(row.to_vec());
        }
        Ok(self)
    }

    /// Decode an image file and queue it as a bitmap.
    ///
    /// Convenience edge over [`Printer::print_image`]; decoding failures
    /// surface as I/O errors.
    pub fn print_image_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self, CandelaError> {
        let image = image::open(path.as_ref())
            .map_err(|e| CandelaError::Io(std::io::Error::other(e)))?
            .to_rgb8();
        self.print_image(&image)
    }

    // ------------------------------------------------------------------
    // Transmission
    // ------------------------------------------------------------------

    /// Drain the command queue to the device.
    ///
    /// The queue is cleared up front; chunks then go out strictly in
    /// insertion order, each write followed by the transport's drain
    /// acknowledgment before the next begins, with the configured
    /// per-command delay honored before each write. On a transport error
    /// the remaining chunks are abandoned — the queue stays empty and
    /// the printer is immediately usable for a new session — and the
    /// failure is reported as [`CandelaError::Transmission`].
    pub fn flush(&mut self) -> Result<(), CandelaError> {
        let chunks = self.queue.take();
        for chunk in &chunks {
            if self.config.command_delay_us > 0 {
                thread::sleep(Duration::from_micros(self.config.command_delay_us));
            }
            self.transport
                .write_chunk(chunk)
                .map_err(CandelaError::Transmission)?;
            self.transport.drain().map_err(CandelaError::Transmission)?;
        }
        Ok(())
    }

    /// Ask the paper sensor whether a roll is loaded.
    ///
    /// Sends `ESC v 0` immediately (bypassing the queue) and waits for
    /// the single response byte: `'$'` means no paper, anything else
    /// means paper is present. Only one query may be outstanding at a
    /// time; a read timeout surfaces as [`CandelaError::Transmission`].
    pub fn has_paper(&mut self) -> Result<bool, CandelaError> {
        self.transport
            .write_chunk(&commands::paper_status())
            .map_err(CandelaError::Transmission)?;
        self.transport.drain().map_err(CandelaError::Transmission)?;
        match self.transport.read_byte().map_err(CandelaError::Transmission)? {
            Some(b'$') => Ok(false),
            Some(_) => Ok(true),
            None => Err(CandelaError::Transmission(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "no response to paper status query",
            ))),
        }
    }

    /// Consume the printer and give the transport back.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
