//! # Raster Bit Packing
//!
//! Converts a monochrome image into the printer's raster bit format.
//!
//! ## Bit Packing
//!
//! - Bit 7 (MSB) = leftmost pixel
//! - Bit 0 (LSB) = rightmost pixel
//! - 1 = ink (print dot), 0 = paper (no dot)
//!
//! Rows are emitted top to bottom with no padding between them, so the
//! output length is exactly `(width / 8) * height`.
//!
//! ## Polarity
//!
//! A pixel is ink when its red channel is at or below [`INK_THRESHOLD`]. For a
//! dithered image every channel is already 0 or 255, so this only matters for
//! undithered input, which is thresholded on the fly.

use image::{GrayImage, Luma, RgbaImage};

use crate::error::PrintError;

/// Red channel values strictly above this are paper; the rest are ink.
pub const INK_THRESHOLD: u8 = 128;

/// Whether a pixel's reference (red) channel counts as ink.
#[inline]
pub fn is_ink(red: u8) -> bool {
    red <= INK_THRESHOLD
}

/// Pack one raster line of ink flags, MSB first.
///
/// A trailing group shorter than 8 leaves its low bits as paper; [`pack`]
/// only passes whole bytes.
///
/// ## Example
///
/// ```
/// use t02print::render::pack::pack_row;
///
/// let row = [true, true, true, true, false, false, false, false];
/// assert_eq!(pack_row(&row), vec![0xF0]); // 11110000
/// ```
pub fn pack_row(ink: &[bool]) -> Vec<u8> {
    ink.chunks(8)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .filter(|&(_, &dot)| dot)
                .fold(0u8, |byte, (bit, _)| byte | (0x80 >> bit))
        })
        .collect()
}

/// Pack a monochrome image into a raster bit buffer.
///
/// ## Errors
///
/// Returns [`PrintError::WidthNotByteAligned`] if the width is not a multiple
/// of 8. Rows are never truncated or padded.
///
/// ## Example
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use t02print::render::pack;
///
/// let white = RgbaImage::from_pixel(384, 2, Rgba([255, 255, 255, 255]));
/// let bits = pack::pack(&white)?;
///
/// assert_eq!(bits.len(), 48 * 2);
/// assert!(bits.iter().all(|&b| b == 0x00));
/// # Ok::<(), t02print::PrintError>(())
/// ```
pub fn pack(image: &RgbaImage) -> Result<Vec<u8>, PrintError> {
    let (width, height) = image.dimensions();
    if width % 8 != 0 {
        return Err(PrintError::WidthNotByteAligned { width });
    }

    let width_bytes = width as usize / 8;
    let mut data = Vec::with_capacity(width_bytes * height as usize);

    let mut ink = Vec::with_capacity(width as usize);
    for row in image.rows() {
        ink.clear();
        ink.extend(row.map(|px| is_ink(px.0[0])));
        data.extend(pack_row(&ink));
    }

    debug_assert_eq!(data.len(), width_bytes * height as usize);
    Ok(data)
}

/// Expand a raster bit buffer back into a grayscale image (ink = black).
///
/// Used for previews. `width_dots` must be a multiple of 8 and the buffer must
/// hold a whole number of rows.
pub fn unpack(data: &[u8], width_dots: u32) -> Result<GrayImage, PrintError> {
    if width_dots % 8 != 0 {
        return Err(PrintError::WidthNotByteAligned { width: width_dots });
    }
    let width_bytes = width_dots as usize / 8;
    if width_bytes == 0 || data.len() % width_bytes != 0 {
        return Err(PrintError::RasterLength {
            len: data.len(),
            width_bytes,
        });
    }

    let height = (data.len() / width_bytes) as u32;
    let mut img = GrayImage::new(width_dots, height);

    for (x, y, px) in img.enumerate_pixels_mut() {
        let byte_idx = y as usize * width_bytes + x as usize / 8;
        let bit_idx = 7 - (x % 8);
        let is_black = (data[byte_idx] >> bit_idx) & 1 == 1;
        *px = Luma([if is_black { 0 } else { 255 }]);
    }

    Ok(img)
}

// ============================================================================
// TESTS
// ============================================================================
