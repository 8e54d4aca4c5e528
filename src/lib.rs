//! # t02print - T02 Thermal Printer Pipeline
//!
//! t02print turns a rendered page into the byte stream a T02 pocket thermal
//! printer understands and streams it over a Bluetooth link. It provides:
//!
//! - **Dithering**: Floyd–Steinberg error diffusion to pure black and white
//! - **Raster packing**: 1 bit per dot, MSB-first, 48 bytes per line
//! - **Protocol framing**: `GS v 0` blocks of at most 250 lines between a fixed
//!   header and footer
//! - **Transport**: ordered, acknowledged packets of at most 512 bytes
//!
//! ## Quick Start
//!
//! ```no_run
//! use t02print::{job::PrintJob, transport::DeviceChannel};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), t02print::PrintError> {
//! // A 384-dot wide page rendered elsewhere
//! let page = image::open("page.png")
//!     .map_err(|e| t02print::PrintError::Image(e.to_string()))?
//!     .to_rgba8();
//!
//! // Open connection to printer
//! let mut channel = DeviceChannel::open("/dev/rfcomm0")?;
//!
//! // Dither, pack, frame and send
//! PrintJob::new().print(&mut channel, &page).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Dithering, bit packing, resizing |
//! | [`protocol`] | T02 command sequences and job framing |
//! | [`transport`] | Packetised, in-order delivery to a channel |
//! | [`job`] | The end-to-end pipeline |
//! | [`printer`] | Printer configurations |
//! | [`error`] | Error types |
//!
//! ## Concurrency
//!
//! Each job owns its buffers and the library keeps no global state. Only one
//! job may write to a physical printer at a time; serialising jobs per
//! printer is up to the caller.

pub mod error;
pub mod job;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use error::PrintError;
pub use job::PrintJob;
pub use printer::PrinterConfig;
pub use transport::{Channel, DeviceChannel, MemoryChannel};
