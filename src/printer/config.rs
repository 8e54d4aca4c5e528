//! # Printer Configuration
//!
//! This module defines hardware specifications for supported thermal printers.
//!
//! ## Supported Printers
//!
//! | Model | Width (dots) | Max lines / block | Max packet |
//! |-------|--------------|-------------------|------------|
//! | T02 | 384 | 250 | 512 bytes |
//!
//! ## Usage
//!
//! ```
//! use t02print::printer::PrinterConfig;
//!
//! let config = PrinterConfig::T02;
//! println!("Print width: {} dots ({} bytes)",
//!          config.width_dots,
//!          config.width_bytes);
//! ```

use crate::error::PrintError;

/// Raster width of the T02 in bytes (one byte = 8 dots).
pub const PRINT_WIDTH_BYTES: usize = 48;

/// Maximum lines the T02 accepts in a single `GS v 0` raster command.
pub const MAX_BLOCK_LINES: usize = 250;

/// Maximum payload of one Bluetooth LE write to the T02.
pub const BLE_MAX_PACKET_SIZE: usize = 512;

/// # Printer Configuration
///
/// Defines the hardware characteristics of a thermal printer.
///
/// ## Physical Properties
///
/// - **width_dots**: Maximum printable width in dots (pixels)
/// - **width_bytes**: Width in bytes (width_dots / 8)
/// - **dpi**: Resolution in dots per inch
///
/// ## Link Tuning
///
/// - **max_block_lines**: Maximum rows per raster command
/// - **max_packet_size**: Maximum bytes per link write
///
/// ## Bluetooth Identity
///
/// The T02 advertises itself under `device_name` and accepts print data on a
/// write-without-response characteristic. These are informational; pairing is
/// done outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Print width in bytes (width_dots / 8)
    pub width_bytes: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Maximum rows per raster command
    pub max_block_lines: u16,

    /// Maximum bytes per link write
    pub max_packet_size: usize,

    /// Advertised Bluetooth device name
    pub device_name: &'static str,

    /// GATT service carrying the print characteristic
    pub service_uuid: u16,

    /// GATT characteristic that accepts print data
    pub characteristic_uuid: u16,
}

impl PrinterConfig {
    /// # T02 Configuration
    ///
    /// 58mm paper pocket thermal printer with a Bluetooth LE interface.
    ///
    /// ## Specifications
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Print width | 48mm (384 dots) |
    /// | Resolution | 203 DPI |
    /// | Interface | Bluetooth LE (service FF00, characteristic FF02) |
    pub const T02: Self = Self {
        name: "T02",
        width_dots: (PRINT_WIDTH_BYTES * 8) as u16,
        width_bytes: PRINT_WIDTH_BYTES as u16,
        dpi: 203,
        max_block_lines: MAX_BLOCK_LINES as u16,
        max_packet_size: BLE_MAX_PACKET_SIZE,
        device_name: "T02",
        service_uuid: 0xFF00,
        characteristic_uuid: 0xFF02,
    };

    /// Calculate dots per millimeter
    ///
    /// ## Example
    ///
    /// ```
    /// use t02print::printer::PrinterConfig;
    ///
    /// let config = PrinterConfig::T02;
    /// assert!((config.dots_per_mm() - 8.0).abs() < 0.1);
    /// ```
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }

    /// Check that the limits describe a printable raster.
    ///
    /// ## Errors
    ///
    /// [`PrintError::InvalidConfig`] if the width is zero, `width_dots` is not
    /// `width_bytes * 8`, or either the block or packet limit is zero.
    pub fn validate(&self) -> Result<(), PrintError> {
        if self.width_bytes == 0 {
            return Err(PrintError::InvalidConfig("width_bytes is 0".to_string()));
        }
        if self.width_dots as u32 != self.width_bytes as u32 * 8 {
            return Err(PrintError::InvalidConfig(format!(
                "width_dots {} does not match width_bytes {} (expected {})",
                self.width_dots,
                self.width_bytes,
                self.width_bytes as u32 * 8
            )));
        }
        if self.max_block_lines == 0 {
            return Err(PrintError::InvalidConfig(
                "max_block_lines is 0".to_string(),
            ));
        }
        if self.max_packet_size == 0 {
            return Err(PrintError::InvalidConfig(
                "max_packet_size is 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Convert a raster line count to paper length in millimeters
    #[inline]
    pub fn lines_to_mm(&self, lines: usize) -> f32 {
        lines as f32 / self.dots_per_mm()
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::T02
    }
}

// ============================================================================
// TESTS
// ============================================================================
