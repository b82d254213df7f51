//! # Raster Image Conversion
//!
//! Converts decoded RGB pixel data into the firmware's bitmap command.
//!
//! ## Hardware Constraints
//!
//! The print head is exactly 384 dots wide, so input images must be
//! exactly 384 pixels wide — no scaling happens here (resize before
//! decoding, or at the CLI edge). Height is limited to 65535 rows by the
//! command's 16-bit height field.
//!
//! ## Thresholding
//!
//! Each pixel is converted to HSL and judged on the lightness channel: a
//! pixel prints (bit set) when its lightness is below 0.6. The threshold
//! is a fixed design constant tuned for the head's dot gain; dithering is
//! a preprocessing concern, not this module's.
//!
//! ## Bit Packing
//!
//! Eight horizontally consecutive pixels pack into one byte with the
//! **least significant bit leftmost**: bit `n` of a byte is the pixel at
//! column `8 * byte_index + n`.
//!
//! ```text
//! Byte value 0x0F = 00001111 = ████░░░░  (pixels 0-3 dark)
//! Byte value 0xF0 = 11110000 = ░░░░████  (pixels 4-7 dark)
//! ```
//!
//! Note this is the opposite bit order from most ESC/POS rasters.
//!
//! ## Wire Format
//!
//! `[DC2, 'v', height & 0xFF, height >> 8]` followed by `height` rows of
//! 48 packed bytes, top to bottom. The transmission layer sends the
//! header as one chunk and each scanline as its own chunk, which keeps
//! individual serial writes small enough for the firmware's line buffer.

use image::RgbImage;
use rayon::prelude::*;

use super::commands::DC2;
use crate::error::CandelaError;

/// Print head width in dots. Images must match exactly.
pub const PRINT_WIDTH: u32 = 384;

/// Bytes per packed scanline (`PRINT_WIDTH / 8`).
pub const ROW_BYTES: usize = (PRINT_WIDTH / 8) as usize;

/// Tallest image the 16-bit height field can describe.
pub const MAX_HEIGHT: u32 = 65535;

/// A pixel prints when its HSL lightness is below this.
pub const LIGHTNESS_THRESHOLD: f32 = 0.6;

/// A bit-packed monochrome image matching the print head width.
///
/// Produced by [`rasterize`]; consumed by the printer's command buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    height: u16,
    data: Vec<u8>,
}

impl Raster {
    /// Image height in dot rows.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The bitmap command header: `[18, 118, h_lo, h_hi]`.
    #[inline]
    pub fn header(&self) -> [u8; 4] {
        [DC2, b'v', (self.height & 0xFF) as u8, (self.height >> 8) as u8]
    }

    /// Packed scanlines, top to bottom, 48 bytes each.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(ROW_BYTES)
    }

    /// The complete wire command (header plus all rows).
    pub fn to_command(&self) -> Vec<u8> {
        let mut cmd = Vec::with_capacity(4 + self.data.len());
        cmd.extend_from_slice(&self.header());
        cmd.extend_from_slice(&self.data);
        cmd
    }
}

/// Convert decoded RGB pixels into a print-ready [`Raster`].
///
/// Pure function: no device state is read or written, so callers may run
/// it on a worker thread and append the materialized result afterwards.
/// Row packing itself is spread over the rayon pool, one task per
/// scanline.
///
/// ## Errors
///
/// [`CandelaError::InvalidImageDimensions`] when the width is not exactly
/// [`PRINT_WIDTH`] or the height is zero or above [`MAX_HEIGHT`].
pub fn rasterize(image: &RgbImage) -> Result<Raster, CandelaError> {
    let (width, height) = image.dimensions();
    if width != PRINT_WIDTH || height == 0 || height > MAX_HEIGHT {
        return Err(CandelaError::InvalidImageDimensions { width, height });
    }

    let data: Vec<u8> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| pack_row(image, y))
        .collect();

    Ok(Raster {
        height: height as u16,
        data,
    })
}

/// Pack one scanline: 384 pixels into 48 bytes, LSB leftmost.
fn pack_row(image: &RgbImage, y: u32) -> [u8; ROW_BYTES] {
    let mut row = [0u8; ROW_BYTES];
    for (i, byte) in row.iter_mut().enumerate() {
        let base = (i * 8) as u32;
        for n in 0..8 {
            let px = image.get_pixel(base + n, y).0;
            if lightness(px[0], px[1], px[2]) < LIGHTNESS_THRESHOLD {
                *byte |= 1 << n;
            }
        }
    }
    row
}

/// The L channel of the RGB → HSL conversion, in 0.0-1.0.
///
/// `L = (max + min) / 2` over the normalized channels; hue and
/// saturation don't influence whether a dot prints.
fn lightness(r: u8, g: u8, b: u8) -> f32 {
    let max = r.max(g).max(b) as f32 / 255.0;
    let min = r.min(g).min(b) as f32 / 255.0;
    (max + min) / 2.0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    /// A 384-wide image colored per pixel by the closure.
    fn image_from_fn(height: u32, f: impl Fn(u32, u32) -> Rgb<u8>) -> RgbImage {
        RgbImage::from_fn(PRINT_WIDTH, height, f)
    }

    #[test]
    fn test_rejects_wrong_width() {
        let img = RgbImage::new(200, 10);
        assert!(matches!(
            rasterize(&img),
            Err(CandelaError::InvalidImageDimensions {
                width: 200,
                height: 10
            })
        ));
    }

    #[test]
    fn test_rejects_zero_height() {
        let img = RgbImage::new(PRINT_WIDTH, 0);
        assert!(matches!(
            rasterize(&img),
            Err(CandelaError::InvalidImageDimensions { height: 0, .. })
        ));
    }

    #[test]
    fn test_header_encodes_height_little_endian() {
        let img = image_from_fn(300, |_, _| WHITE);
        let raster = rasterize(&img).unwrap();
        assert_eq!(raster.header(), [18, 118, 44, 1]); // 300 = 0x012C
    }

    #[test]
    fn test_single_row_header() {
        let img = image_from_fn(1, |_, _| BLACK);
        let raster = rasterize(&img).unwrap();
        assert_eq!(raster.header(), [18, 118, 1, 0]);
    }

    #[test]
    fn test_half_dark_row() {
        // Left half black, right half white
        let img = image_from_fn(1, |x, _| if x < 192 { BLACK } else { WHITE });
        let raster = rasterize(&img).unwrap();
        let row: Vec<&[u8]> = raster.rows().collect();
        assert_eq!(row.len(), 1);
        assert_eq!(row[0].len(), ROW_BYTES);
        assert!(row[0][..24].iter().all(|&b| b == 0xFF));
        assert!(row[0][24..].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_bit_zero_is_leftmost_pixel() {
        // Only pixel 0 dark: byte 0 must be 0b0000_0001
        let img = image_from_fn(1, |x, _| if x == 0 { BLACK } else { WHITE });
        let raster = rasterize(&img).unwrap();
        let row = raster.rows().next().unwrap();
        assert_eq!(row[0], 0x01);
        assert!(row[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_alternating_pixels_pack_lsb_first() {
        // Pixels 0, 2, 4, 6 dark within each byte → 0b0101_0101
        let img = image_from_fn(1, |x, _| if x % 2 == 0 { BLACK } else { WHITE });
        let raster = rasterize(&img).unwrap();
        let row = raster.rows().next().unwrap();
        assert!(row.iter().all(|&b| b == 0x55));
    }

    #[test]
    fn test_lightness_threshold_boundary() {
        // Gray value 152 → L ≈ 0.596 (dark); 153 → L = 0.6 exactly (light)
        let img = image_from_fn(1, |x, _| {
            if x < 8 {
                Rgb([152, 152, 152])
            } else {
                Rgb([153, 153, 153])
            }
        });
        let raster = rasterize(&img).unwrap();
        let row = raster.rows().next().unwrap();
        assert_eq!(row[0], 0xFF);
        assert!(row[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_lightness_uses_max_min_not_average() {
        // Saturated red: max 1.0, min 0.0 → L = 0.5 → dark
        let img = image_from_fn(1, |_, _| Rgb([255, 0, 0]));
        let raster = rasterize(&img).unwrap();
        assert!(raster.rows().next().unwrap().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_rows_are_top_to_bottom() {
        // Row 0 black, row 1 white
        let img = image_from_fn(2, |_, y| if y == 0 { BLACK } else { WHITE });
        let raster = rasterize(&img).unwrap();
        let rows: Vec<&[u8]> = raster.rows().collect();
        assert!(rows[0].iter().all(|&b| b == 0xFF));
        assert!(rows[1].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_to_command_layout() {
        let img = image_from_fn(2, |_, _| BLACK);
        let cmd = rasterize(&img).unwrap().to_command();
        assert_eq!(cmd.len(), 4 + 2 * ROW_BYTES);
        assert_eq!(&cmd[..4], &[18, 118, 2, 0]);
        assert!(cmd[4..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_max_height_accepted() {
        // Height field boundary: 65535 is the largest encodable value
        let raster = Raster {
            height: u16::MAX,
            data: Vec::new(),
        };
        assert_eq!(raster.header(), [18, 118, 0xFF, 0xFF]);
    }
}
