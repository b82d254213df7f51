//! # Serial TTY Transport
//!
//! Talks to the printer over a serial device file — a USB-serial adapter
//! (`/dev/ttyUSB0`) or a board UART (`/dev/serial0`, `/dev/ttyAMA0`).
//!
//! ## TTY Configuration
//!
//! The device is opened read/write and switched to raw mode so binary
//! command data passes through unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR,
//!   IGNCR, ICRNL disabled
//! - **No software flow control**: IXON/IXOFF/IXANY disabled — 0x11
//!   (XON) and 0x13 (XOFF) legitimately appear in raster data
//! - **No output processing**: OPOST disabled (no CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **No echo, non-canonical**: ECHO, ECHONL, ICANON, ISIG, IEXTEN
//!   disabled
//!
//! Reads are bounded, not blocking: VMIN=0/VTIME gives the paper-sensor
//! query a one-second window for its single response byte.
//!
//! ## Baud Rate
//!
//! These printers ship configured for 19200 baud (a few older units run
//! 9600; the self-test page prints the configured rate).

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;
use std::path::Path;

use crate::error::CandelaError;
use crate::transport::Transport;

/// Default serial device path
pub const DEFAULT_DEVICE: &str = "/dev/ttyUSB0";

/// Factory baud rate for A2 micro panel printers
pub const DEFAULT_BAUD: u32 = 19200;

/// Response read window in tenths of a second (termios VTIME unit)
const READ_TIMEOUT_DECISECONDS: u8 = 10;

/// # Serial Printer Transport
///
/// Owns the TTY file handle for one printer.
///
/// ## Example
///
/// ```no_run
/// use candela::transport::SerialTransport;
///
/// let transport = SerialTransport::open("/dev/ttyUSB0")?;
/// # Ok::<(), candela::CandelaError>(())
/// ```
pub struct SerialTransport {
    file: File,
}

impl SerialTransport {
    /// Open a serial connection to the printer at the factory baud rate.
    ///
    /// ## Errors
    ///
    /// Returns [`CandelaError::InvalidTransport`] when the device doesn't
    /// exist, permission is denied (dialout group), or the TTY can't be
    /// configured.
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, CandelaError> {
        Self::open_with_baud(device, DEFAULT_BAUD)
    }

    /// Open with an explicit baud rate (9600 or 19200 on this hardware).
    pub fn open_with_baud<P: AsRef<Path>>(device: P, baud: u32) -> Result<Self, CandelaError> {
        let path = device.as_ref();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                CandelaError::InvalidTransport(format!(
                    "Failed to open {}: {}",
                    path.display(),
                    e
                ))
            })?;

        configure_tty_raw(file.as_raw_fd(), baud)?;

        Ok(Self { file })
    }

    /// Open with default device path (/dev/ttyUSB0)
    pub fn open_default() -> Result<Self, CandelaError> {
        Self::open(DEFAULT_DEVICE)
    }
}

impl Transport for SerialTransport {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk)
    }

    fn drain(&mut self) -> io::Result<()> {
        self.file.flush()?;
        tcdrain(self.file.as_raw_fd())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        // VMIN=0/VTIME bounds this read; 0 bytes means the window expired
        match self.file.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

/// Block until the kernel has pushed all queued output to the device.
#[cfg(unix)]
fn tcdrain(fd: i32) -> io::Result<()> {
    if unsafe { libc::tcdrain(fd) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Map a numeric baud rate to its termios speed constant.
fn baud_constant(baud: u32) -> Option<libc::speed_t> {
    match baud {
        9600 => Some(libc::B9600),
        19200 => Some(libc::B19200),
        38400 => Some(libc::B38400),
        57600 => Some(libc::B57600),
        115200 => Some(libc::B115200),
        _ => None,
    }
}

/// Configure a file descriptor for raw TTY mode at the given baud rate.
///
/// Disables all input/output processing so binary data passes through
/// unmodified, and bounds reads with VMIN=0/VTIME so a status query that
/// gets no answer times out instead of hanging.
#[cfg(unix)]
fn configure_tty_raw(fd: i32, baud: u32) -> Result<(), CandelaError> {
    use std::mem::MaybeUninit;

    let speed = baud_constant(baud).ok_or_else(|| {
        CandelaError::InvalidTransport(format!("Unsupported baud rate: {}", baud))
    })?;

    // Get current terminal attributes
    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(CandelaError::InvalidTransport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    // Input flags: disable all processing
    // IXON/IXOFF/IXANY: disable XON/XOFF flow control (0x11/0x13 appear in raster data)
    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    // Output flags: disable post-processing
    termios.c_oflag &= !libc::OPOST;

    // Local flags: disable echo, canonical mode, signals
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    // Control flags: 8-bit characters, no parity, receiver on
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8 | libc::CREAD | libc::CLOCAL;

    // Bounded reads for the status query
    termios.c_cc[libc::VMIN] = 0;
    termios.c_cc[libc::VTIME] = READ_TIMEOUT_DECISECONDS;

    let result = unsafe {
        libc::cfsetispeed(&mut termios, speed) | libc::cfsetospeed(&mut termios, speed)
    };
    if result != 0 {
        return Err(CandelaError::InvalidTransport(format!(
            "cfsetspeed failed: {}",
            io::Error::last_os_error()
        )));
    }

    // Apply settings immediately
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(CandelaError::InvalidTransport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn tcdrain(_fd: i32) -> io::Result<()> {
    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_fd: i32, _baud: u32) -> Result<(), CandelaError> {
    Err(CandelaError::InvalidTransport(
        "serial transport is only supported on Unix".to_string(),
    ))
}
