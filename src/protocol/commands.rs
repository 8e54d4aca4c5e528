//! # T02 Protocol Commands
//!
//! This module holds the fixed command sequences the T02 expects around every
//! print job.
//!
//! ## Protocol Overview
//!
//! The T02 speaks an ESC/POS-like protocol where commands are byte sequences
//! starting with escape characters. Besides standard `ESC` and `GS` commands,
//! the device uses a vendor `US 0x11 n` family whose meaning is undocumented.
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`
//!
//! ## Opaque Sequences
//!
//! [`HEADER`] and [`FOOTER`] were captured from the vendor's own print stream.
//! Several `US 0x11 n` bytes in them have no known purpose, so both are kept
//! byte-for-byte and never assembled from smaller builders.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for graphics: `GS v 0` prints a raster bit image.
pub const GS: u8 = 0x1D;

/// US (Unit Separator) - Vendor command prefix on the T02
pub const US: u8 = 0x1F;

// ============================================================================
// JOB FRAMING
// ============================================================================

/// # Job Header
///
/// Sent once before the first raster block.
///
/// | Bytes | Meaning |
/// |-------|---------|
/// | `1B 40` | ESC @: initialize printer |
/// | `1B 61 01` | ESC a 1: centre justification |
/// | `1F 11 02 04` | vendor command, purpose unknown |
pub const HEADER: [u8; 9] = [
    ESC, b'@', //
    ESC, b'a', 0x01, //
    US, 0x11, 0x02, 0x04,
];

/// # Job Footer
///
/// Sent once after the last raster block.
///
/// | Bytes | Meaning |
/// |-------|---------|
/// | `1B 64 02` | ESC d 2: print and feed 2 lines |
/// | `1B 64 02` | ESC d 2: print and feed 2 lines |
/// | `1F 11 08` | vendor command, purpose unknown |
/// | `1F 11 0E` | vendor command, purpose unknown |
/// | `1F 11 07` | vendor command, purpose unknown |
/// | `1F 11 09` | vendor command, purpose unknown |
pub const FOOTER: [u8; 18] = [
    ESC, b'd', 0x02, //
    ESC, b'd', 0x02, //
    US, 0x11, 0x08, //
    US, 0x11, 0x0E, //
    US, 0x11, 0x07, //
    US, 0x11, 0x09,
];

/// Encode a 16-bit value as little-endian bytes.
///
/// ## Example
///
/// ```
/// use t02print::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(250), [0xFA, 0x00]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
