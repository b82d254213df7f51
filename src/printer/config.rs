//! # Printer Configuration
//!
//! Construction-time settings for an A2 micro panel printer.
//!
//! ## Heat Profile
//!
//! The three heating parameters trade print quality against speed and
//! peak current draw:
//!
//! | Parameter | Unit | Range | Default | More means |
//! |-----------|------|-------|---------|------------|
//! | `max_printing_dots` | 8 dots | 0-255 | 7 (64 dots) | faster, higher peak current |
//! | `heating_time` | 10µs | 3-255 | 80 (800µs) | darker, slower |
//! | `heating_interval` | 10µs | 0-255 | 2 (20µs) | crisper, slower |
//!
//! Heating time below 3 produces blank output on real hardware, so the
//! setter floors it there.
//!
//! ## Usage
//!
//! ```
//! use candela::printer::PrinterConfig;
//!
//! let config = PrinterConfig::default()
//!     .with_heating_time(150)
//!     .with_command_delay_us(5);
//! assert_eq!(config.heating_time, 150);
//! ```

/// Configuration handed to [`Printer::new`](crate::printer::Printer::new).
///
/// All fields have documented defaults; `PrinterConfig::default()` matches
/// the firmware's own power-on behavior.
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    /// Max simultaneous heat dots, unit 8 dots (default 7 = 64 dots).
    pub max_printing_dots: u8,

    /// Heating time, unit 10µs (3-255, default 80 = 800µs).
    pub heating_time: u8,

    /// Heating interval, unit 10µs (default 2 = 20µs).
    pub heating_interval: u8,

    /// Pause before each transmitted chunk, in microseconds (default 0).
    ///
    /// Some firmware revisions drop bytes when commands arrive
    /// back-to-back; a few microseconds of pacing papers over that.
    pub command_delay_us: u64,

    /// Encode text with national charset switching instead of the base
    /// code page (default false). See [`crate::protocol::text`].
    pub extended_charset: bool,

    /// International charset selected during the handshake (default 0, USA).
    pub charset: u8,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            max_printing_dots: 7,
            heating_time: 80,
            heating_interval: 2,
            command_delay_us: 0,
            extended_charset: false,
            charset: 0,
        }
    }
}

impl PrinterConfig {
    /// Set the max simultaneous heat dots (unit 8 dots).
    pub fn with_max_printing_dots(mut self, dots: u8) -> Self {
        self.max_printing_dots = dots;
        self
    }

    /// Set the heating time (unit 10µs). Values below 3 are floored to 3.
    pub fn with_heating_time(mut self, time: u8) -> Self {
        self.heating_time = time.max(3);
        self
    }

    /// Set the heating interval (unit 10µs).
    pub fn with_heating_interval(mut self, interval: u8) -> Self {
        self.heating_interval = interval;
        self
    }

    /// Set the pause before each transmitted chunk, in microseconds.
    pub fn with_command_delay_us(mut self, micros: u64) -> Self {
        self.command_delay_us = micros;
        self
    }

    /// Enable or disable extended charset encoding.
    pub fn with_extended_charset(mut self, enabled: bool) -> Self {
        self.extended_charset = enabled;
        self
    }

    /// Set the charset selected during the construction handshake.
    pub fn with_charset(mut self, charset: u8) -> Self {
        self.charset = charset;
        self
    }
}
