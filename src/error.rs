//! # Error Types
//!
//! This module defines error types used throughout the t02print library.
//!
//! Precondition violations (wrong image width, misaligned raster buffers) are
//! reported as errors instead of producing malformed printer output. Transport
//! failures abort the whole job; nothing is retried here.

use thiserror::Error;

/// Main error type for t02print operations
#[derive(Debug, Error)]
pub enum PrintError {
    /// Image width cannot be packed into whole bytes
    #[error("Image width {width} is not a multiple of 8 pixels")]
    WidthNotByteAligned { width: u32 },

    /// Image width differs from the printer's raster width
    #[error("Image width mismatch: printer expects {expected} px, got {actual} px")]
    WidthMismatch { expected: u32, actual: u32 },

    /// Raster buffer does not divide into whole lines
    #[error("Raster buffer of {len} bytes is not a multiple of {width_bytes} bytes per line")]
    RasterLength { len: usize, width_bytes: usize },

    /// Printer configuration that cannot produce a valid job
    #[error("Invalid printer configuration: {0}")]
    InvalidConfig(String),

    /// Transport-level errors (write rejected, link dropped)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Caller-imposed deadline elapsed mid-send
    #[error("Send timed out after {sent} of {total} bytes")]
    Timeout { sent: usize, total: usize },

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
