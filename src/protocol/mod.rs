//! # T02 Protocol Implementation
//!
//! This module provides the command builders for the T02 thermal printer's
//! ESC/POS-like protocol.
//!
//! ## Module Structure
//!
//! - [`commands`]: Fixed job header and footer, byte constants
//! - [`graphics`]: `GS v 0` raster bit-image blocks
//! - [`frame`]: Splitting a raster buffer into blocks and framing a job
//!
//! ## Usage Example
//!
//! ```
//! use t02print::protocol::{commands, frame};
//!
//! // Two blank lines, 48 bytes each
//! let bits = vec![0u8; 96];
//! let data = frame::frame(&bits)?;
//!
//! assert!(data.starts_with(&commands::HEADER));
//! assert!(data.ends_with(&commands::FOOTER));
//! # Ok::<(), t02print::PrintError>(())
//! ```

pub mod commands;
pub mod frame;
pub mod graphics;
