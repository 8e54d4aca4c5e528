//! # Fitting Images to the Paper
//!
//! Scales arbitrary images to the printer's raster width before dithering.
//! Height follows the aspect ratio, so tall pages stay tall.

use image::{DynamicImage, RgbaImage, imageops::FilterType};

/// Scale `image` to exactly `width_dots` wide, keeping its aspect ratio.
///
/// Images already at the target width are returned unscaled. A zero-width
/// source yields an empty image.
pub fn fit_to_width(image: &DynamicImage, width_dots: u32) -> RgbaImage {
    let (w, h) = (image.width(), image.height());
    if w == width_dots {
        return image.to_rgba8();
    }
    if w == 0 || h == 0 {
        return RgbaImage::new(width_dots, 0);
    }

    let height = ((h as u64 * width_dots as u64 + w as u64 / 2) / w as u64).max(1) as u32;
    image
        .resize_exact(width_dots, height, FilterType::Lanczos3)
        .to_rgba8()
}

/// Composite translucent pixels onto white paper.
///
/// Fully transparent areas would otherwise dither by their hidden RGB values.
pub fn flatten_onto_white(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        if a == 255 {
            continue;
        }
        let alpha = a as u16;
        let blend = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        pixel.0 = [blend(r), blend(g), blend(b), 255];
    }
}
