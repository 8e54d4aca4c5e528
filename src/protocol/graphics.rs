//! # Raster Graphics Command
//!
//! This module implements the `GS v 0` raster bit-image command used by the
//! T02 to print image data.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (horizontal, 384 dots max)
//!   │
//!   │   ████████  ← Each dot is ~0.125mm (203 DPI)
//!   │   ████████
//!   ▼
//!   Y (vertical, paper feed direction)
//! ```
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```

use super::commands::{GS, u16_le};

/// Length of a `GS v 0` header before its image data.
pub const BLOCK_HEADER_LEN: usize = 8;

/// Normal size: no horizontal or vertical doubling.
pub const MODE_NORMAL: u8 = 0;

/// # Print Raster Bit Image Header (GS v 0 m xL xH yL yH)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Mode (0 = normal, 1 = double width, 2 = double height, 3 = quadruple)
/// - `xL, xH`: Bytes per line, little-endian
/// - `yL, yH`: Number of lines, little-endian
/// - `d1...dk`: Image data, k = width_bytes × lines
///
/// ## Example
///
/// ```
/// use t02print::protocol::graphics;
///
/// let header = graphics::raster_block_header(48, 250);
/// assert_eq!(header, [0x1D, 0x76, 0x30, 0x00, 0x30, 0x00, 0xFA, 0x00]);
/// ```
pub fn raster_block_header(width_bytes: u16, lines: u16) -> [u8; BLOCK_HEADER_LEN] {
    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(lines);
    [GS, b'v', b'0', MODE_NORMAL, xl, xh, yl, yh]
}

/// Build a complete raster block: header followed by its lines.
///
/// `data` must hold exactly `width_bytes * lines` bytes.
pub fn raster_block(width_bytes: u16, lines: u16, data: &[u8]) -> Vec<u8> {
    debug_assert!(
        data.len() == width_bytes as usize * lines as usize,
        "Raster block data length mismatch. Expected {} ({} bytes × {} lines), got {}",
        width_bytes as usize * lines as usize,
        width_bytes,
        lines,
        data.len()
    );

    let mut cmd = Vec::with_capacity(BLOCK_HEADER_LEN + data.len());
    cmd.extend_from_slice(&raster_block_header(width_bytes, lines));
    cmd.extend_from_slice(data);
    cmd
}

/// Decode a block header, returning `(width_bytes, lines)`.
///
/// Returns `None` if `bytes` does not start with a normal-mode `GS v 0`.
pub fn parse_raster_block_header(bytes: &[u8]) -> Option<(u16, u16)> {
    match bytes {
        [GS, b'v', b'0', MODE_NORMAL, xl, xh, yl, yh, ..] => Some((
            u16::from_le_bytes([*xl, *xh]),
            u16::from_le_bytes([*yl, *yh]),
        )),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================
