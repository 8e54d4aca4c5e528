//! # Rendering Module
//!
//! This module turns source images into printer raster data.
//!
//! ## Modules
//!
//! - [`dither`]: Floyd–Steinberg error diffusion to black and white
//! - [`pack`]: 1-bit MSB-first raster packing
//! - [`resize`]: Scaling and flattening source images for the paper
//!
//! ## Usage Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use t02print::render::{dither, pack};
//!
//! let page = RgbaImage::from_pixel(384, 100, Rgba([200, 200, 200, 255]));
//!
//! let mono = dither::dither(&page);
//! let raster_data = pack::pack(&mono)?;
//!
//! // raster_data is ready for protocol::frame::frame()
//! assert_eq!(raster_data.len(), 48 * 100);
//! # Ok::<(), t02print::PrintError>(())
//! ```

pub mod dither;
pub mod pack;
pub mod resize;

pub use resize::{fit_to_width, flatten_onto_white};
