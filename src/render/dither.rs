//! # Floyd–Steinberg Error Diffusion
//!
//! This module converts a true-color image to pure black and white using
//! Floyd–Steinberg error diffusion over grayscale luminance.
//!
//! ## What is Dithering?
//!
//! Dithering simulates grayscale on a device that can only print black or white.
//! By varying the density of black dots, we create the illusion of different
//! gray levels.
//!
//! ```text
//! Grayscale:    White    Light    Medium    Dark    Black
//!               ░░░░░░   ░░▒░░░   ░▒░▒░▒   ▒▓▒▓▒▓   ██████
//! ```
//!
//! ## Error Diffusion
//!
//! Pixels are visited in row-major order, top-to-bottom, left-to-right. Each
//! channel is thresholded (`> 128` becomes 255, anything else 0) and the
//! difference between the old and new value is pushed onto neighbours that have
//! not been quantized yet:
//!
//! ```text
//!              X   7/16
//!     3/16   5/16  1/16
//! ```
//!
//! Neighbours outside the image are skipped. The working buffer is the image
//! itself (8 bits per channel), so accumulated values saturate at 0 and 255 and
//! are rounded to the nearest integer with ties to even, exactly like writing
//! into a clamped RGBA pixel array.
//!
//! ## Usage Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use t02print::render::dither;
//!
//! let gray = RgbaImage::from_pixel(16, 16, Rgba([128, 128, 128, 255]));
//! let mono = dither::dither(&gray);
//!
//! assert!(dither::is_monochrome(&mono));
//! assert_eq!(mono.dimensions(), (16, 16));
//! ```

use image::RgbaImage;

/// Channel values strictly above this become white.
pub const THRESHOLD: u8 = 128;

/// Diffusion kernel as `(dx, dy, weight / 16)`.
const FLOYD_STEINBERG: [(i64, i64, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Rec. 709 luma weights.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Luminance of an RGB triple, rounded to the nearest 8-bit value.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let l = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    to_channel(l)
}

/// Store a working value in an 8-bit channel: round half to even, saturate.
#[inline]
fn to_channel(v: f32) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Replace each pixel's RGB with its luminance. Alpha is left untouched.
pub fn to_grayscale(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let l = luminance(r, g, b);
        pixel.0[0] = l;
        pixel.0[1] = l;
        pixel.0[2] = l;
    }
}

/// Quantize one channel value to black or white.
#[inline]
fn quantize(value: u8) -> u8 {
    if value > THRESHOLD { 255 } else { 0 }
}

/// Floyd–Steinberg error diffusion, in place.
///
/// Every RGB channel is quantized independently with the same kernel; for a
/// grayscale input the three channels stay identical. Alpha is preserved.
pub fn floyd_steinberg(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    let (w, h) = (width as i64, height as i64);
    let buf: &mut [u8] = image;

    for y in 0..h {
        for x in 0..w {
            let idx = ((y * w + x) * 4) as usize;

            let mut error = [0i16; 3];
            for c in 0..3 {
                let old = buf[idx + c];
                let new = quantize(old);
                buf[idx + c] = new;
                error[c] = old as i16 - new as i16;
            }

            if error == [0; 3] {
                continue;
            }

            for &(dx, dy, weight) in &FLOYD_STEINBERG {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || nx >= w || ny >= h {
                    continue;
                }
                let nidx = ((ny * w + nx) * 4) as usize;
                for c in 0..3 {
                    let v = buf[nidx + c] as f32 + error[c] as f32 * weight;
                    buf[nidx + c] = to_channel(v);
                }
            }
        }
    }
}

/// Dither a true-color image to a new monochrome image of the same size.
///
/// The source is converted to grayscale first, then error-diffused. This never
/// fails; any image, including an empty one, produces a result.
pub fn dither(image: &RgbaImage) -> RgbaImage {
    let mut mono = image.clone();
    to_grayscale(&mut mono);
    floyd_steinberg(&mut mono);
    mono
}

/// Threshold without diffusion. Each pixel's luminance maps straight to
/// black or white.
pub fn threshold(image: &RgbaImage) -> RgbaImage {
    let mut mono = image.clone();
    for pixel in mono.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let v = quantize(luminance(r, g, b));
        pixel.0[0] = v;
        pixel.0[1] = v;
        pixel.0[2] = v;
    }
    mono
}

/// True if every RGB channel of every pixel is 0 or 255.
pub fn is_monochrome(image: &RgbaImage) -> bool {
    image
        .pixels()
        .all(|p| p.0[..3].iter().all(|&c| c == 0 || c == 255))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, v: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([v, v, v, 255]))
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(100, 100, 100), 100);
    }

    #[test]
    fn test_luminance_weights_green_most() {
        assert!(luminance(0, 255, 0) > luminance(255, 0, 0));
        assert!(luminance(255, 0, 0) > luminance(0, 0, 255));
    }

    #[test]
    fn test_to_grayscale_keeps_alpha() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([200, 10, 30, 77]));
        to_grayscale(&mut img);
        for p in img.pixels() {
            assert_eq!(p.0[0], p.0[1]);
            assert_eq!(p.0[1], p.0[2]);
            assert_eq!(p.0[3], 77);
        }
    }

    #[test]
    fn test_solid_white_stays_white() {
        let mono = dither(&solid(384, 8, 255));
        assert!(mono.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_solid_black_stays_black() {
        let mono = dither(&solid(384, 8, 0));
        assert!(mono.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_threshold_is_strictly_greater() {
        // 128 is not above the threshold, 129 is
        assert!(dither(&solid(1, 1, 128)).pixels().all(|p| p.0[0] == 0));
        assert!(dither(&solid(1, 1, 129)).pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_error_diffuses_right() {
        // (0,0): 100 -> 0, error 100; (1,0): 100 + 43.75 -> 144 -> 255
        let mono = dither(&solid(2, 1, 100));
        assert_eq!(mono.get_pixel(0, 0).0[0], 0);
        assert_eq!(mono.get_pixel(1, 0).0[0], 255);
    }

    #[test]
    fn test_error_diffuses_down_without_wraparound() {
        // (0,0): 100 -> 0; (0,1): 100 + 31.25 -> 131 -> 255.
        // The bottom-left neighbour is out of bounds and skipped.
        let mono = dither(&solid(1, 2, 100));
        assert_eq!(mono.get_pixel(0, 0).0[0], 0);
        assert_eq!(mono.get_pixel(0, 1).0[0], 255);
    }

    #[test]
    fn test_diagonal_weights() {
        // Row 0: 0, 112, 255   Row 1: 110, 255, 122
        //
        // (1,0) 112 -> 0, error 112: (0,1) += 21 -> 131, (2,1) += 7 -> 129.
        // (0,1) 131 -> 255, error -124: (1,1) 255 - 54.25 -> 201.
        // (1,1) 201 -> 255, error -54: (2,1) 129 - 23.625 -> 105 -> 0.
        //
        // Swapping the 3/16 and 1/16 weights turns the bottom row into
        // 0, 255, 255.
        let mut img = RgbaImage::new(3, 2);
        for (y, row) in [[0, 112, 255], [110, 255, 122]].into_iter().enumerate() {
            for (x, v) in row.into_iter().enumerate() {
                img.put_pixel(x as u32, y as u32, Rgba([v, v, v, 255]));
            }
        }
        floyd_steinberg(&mut img);

        let row = |y| (0..3).map(|x| img.get_pixel(x, y).0[0]).collect::<Vec<_>>();
        assert_eq!(row(0), vec![0, 0, 255]);
        assert_eq!(row(1), vec![255, 255, 0]);
    }

    #[test]
    fn test_half_values_round_to_even() {
        // (0,0): 8 -> 0, error 8; (0,1): 126 + 2.5 = 128.5 -> 128, not above
        // the threshold. Rounding half away from zero would give 129 (white).
        let mut img = RgbaImage::new(1, 2);
        img.put_pixel(0, 0, Rgba([8, 8, 8, 255]));
        img.put_pixel(0, 1, Rgba([126, 126, 126, 255]));
        floyd_steinberg(&mut img);

        assert_eq!(img.get_pixel(0, 0).0[0], 0);
        assert_eq!(img.get_pixel(0, 1).0[0], 0);
    }

    #[test]
    fn test_gray_distribution() {
        // 50% gray should come out roughly half ink
        let mono = dither(&solid(64, 64, 127));
        let black = mono.pixels().filter(|p| p.0[0] == 0).count();
        let total = 64 * 64;
        assert!(
            black > total * 2 / 5 && black < total * 3 / 5,
            "expected ~50% black, got {}/{}",
            black,
            total
        );
    }

    #[test]
    fn test_output_is_monochrome() {
        let mut img = RgbaImage::new(48, 20);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgba([(x * 5) as u8, (y * 12) as u8, ((x + y) * 3) as u8, 255]);
        }
        let mono = dither(&img);
        assert_eq!(mono.dimensions(), img.dimensions());
        assert!(is_monochrome(&mono));
    }

    #[test]
    fn test_dither_is_idempotent_on_monochrome() {
        let mut img = RgbaImage::new(16, 16);
        for (x, y, p) in img.enumerate_pixels_mut() {
            let v = if (x ^ y) & 1 == 0 { 0 } else { 255 };
            *p = Rgba([v, v, v, 255]);
        }
        let once = dither(&img);
        assert_eq!(once, img);
        assert_eq!(dither(&once), once);
    }

    #[test]
    fn test_alpha_preserved() {
        let mono = dither(&RgbaImage::from_pixel(8, 4, Rgba([90, 90, 90, 12])));
        assert!(mono.pixels().all(|p| p.0[3] == 12));
    }

    #[test]
    fn test_empty_image() {
        let mono = dither(&RgbaImage::new(0, 0));
        assert_eq!(mono.dimensions(), (0, 0));
    }

    #[test]
    fn test_threshold_has_no_diffusion() {
        let mono = threshold(&solid(8, 8, 100));
        assert!(mono.pixels().all(|p| p.0[0] == 0));
    }
}
