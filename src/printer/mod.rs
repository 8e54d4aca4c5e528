//! # Printer Module
//!
//! This module provides printer-specific configurations.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware specifications and link limits

pub mod config;

pub use config::{BLE_MAX_PACKET_SIZE, MAX_BLOCK_LINES, PRINT_WIDTH_BYTES, PrinterConfig};
