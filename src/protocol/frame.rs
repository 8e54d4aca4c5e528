//! # Job Framing
//!
//! Wraps a packed raster buffer into the complete command stream for one print
//! job:
//!
//! ```text
//! HEADER | GS v 0 (≤250 lines) | GS v 0 (≤250 lines) | ... | FOOTER
//! ```
//!
//! The T02 rejects raster commands taller than [`MAX_BLOCK_LINES`], so long
//! images are split into consecutive blocks. Every line lands in exactly one
//! block, in order, with no gaps.
//!
//! ## Example
//!
//! ```
//! use t02print::protocol::frame;
//!
//! // 600 lines of 48 bytes
//! let bits = vec![0u8; 48 * 600];
//! let framed = frame::frame(&bits)?;
//!
//! let blocks = frame::parse_blocks(&framed).unwrap();
//! let lines: Vec<u16> = blocks.iter().map(|(lines, _)| *lines).collect();
//! assert_eq!(lines, vec![250, 250, 100]);
//! # Ok::<(), t02print::PrintError>(())
//! ```
//!
//! [`MAX_BLOCK_LINES`]: crate::printer::MAX_BLOCK_LINES

use super::commands::{FOOTER, HEADER};
use super::graphics::{self, BLOCK_HEADER_LEN};
use crate::error::PrintError;
use crate::printer::PrinterConfig;

/// Line counts of the blocks covering `total_lines`.
///
/// All blocks but the last hold `max_block_lines`; zero lines means zero
/// blocks.
///
/// ```
/// use t02print::protocol::frame::block_line_counts;
///
/// assert_eq!(block_line_counts(251, 250)?, vec![250, 1]);
/// assert!(block_line_counts(0, 250)?.is_empty());
/// # Ok::<(), t02print::PrintError>(())
/// ```
///
/// ## Errors
///
/// [`PrintError::InvalidConfig`] if `max_block_lines` is zero.
pub fn block_line_counts(
    total_lines: usize,
    max_block_lines: usize,
) -> Result<Vec<usize>, PrintError> {
    if max_block_lines == 0 {
        return Err(PrintError::InvalidConfig(
            "max_block_lines is 0".to_string(),
        ));
    }

    let mut counts = Vec::with_capacity(total_lines.div_ceil(max_block_lines));
    let mut offset = 0;
    while offset < total_lines {
        let lines = max_block_lines.min(total_lines - offset);
        counts.push(lines);
        offset += lines;
    }
    Ok(counts)
}

/// Frame a raster buffer for the T02.
///
/// ## Errors
///
/// [`PrintError::RasterLength`] if `bits` is not a whole number of 48-byte
/// lines.
pub fn frame(bits: &[u8]) -> Result<Vec<u8>, PrintError> {
    frame_with_config(bits, &PrinterConfig::T02)
}

/// Frame a raster buffer using the width and block limit from `config`.
///
/// ## Errors
///
/// [`PrintError::InvalidConfig`] if `config` fails
/// [`PrinterConfig::validate`], [`PrintError::RasterLength`] if `bits` is not
/// a whole number of lines.
pub fn frame_with_config(bits: &[u8], config: &PrinterConfig) -> Result<Vec<u8>, PrintError> {
    config.validate()?;

    let width_bytes = config.width_bytes as usize;
    if bits.len() % width_bytes != 0 {
        return Err(PrintError::RasterLength {
            len: bits.len(),
            width_bytes,
        });
    }

    let total_lines = bits.len() / width_bytes;
    let counts = block_line_counts(total_lines, config.max_block_lines as usize)?;

    let mut out = Vec::with_capacity(
        HEADER.len() + counts.len() * BLOCK_HEADER_LEN + bits.len() + FOOTER.len(),
    );
    out.extend_from_slice(&HEADER);

    let mut offset = 0;
    for lines in counts {
        let start = offset * width_bytes;
        let end = (offset + lines) * width_bytes;
        out.extend(graphics::raster_block(
            config.width_bytes,
            lines as u16,
            &bits[start..end],
        ));
        offset += lines;
    }
    debug_assert_eq!(offset, total_lines);

    out.extend_from_slice(&FOOTER);
    Ok(out)
}

/// Split a framed buffer back into `(line_count, payload)` blocks.
///
/// Returns `None` if the buffer does not start with [`HEADER`], end with
/// [`FOOTER`], or contain a well-formed block sequence in between.
pub fn parse_blocks(framed: &[u8]) -> Option<Vec<(u16, &[u8])>> {
    let body = framed
        .strip_prefix(&HEADER[..])?
        .strip_suffix(&FOOTER[..])?;

    let mut blocks = Vec::new();
    let mut rest = body;
    while !rest.is_empty() {
        let (width_bytes, lines) = graphics::parse_raster_block_header(rest)?;
        let len = width_bytes as usize * lines as usize;
        let payload = rest.get(BLOCK_HEADER_LEN..BLOCK_HEADER_LEN + len)?;
        blocks.push((lines, payload));
        rest = &rest[BLOCK_HEADER_LEN + len..];
    }
    Some(blocks)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::{MAX_BLOCK_LINES, PRINT_WIDTH_BYTES};

    fn lines_of(n: usize) -> Vec<u8> {
        (0..n * PRINT_WIDTH_BYTES).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_block_counts_boundaries() {
        let counts = |n| block_line_counts(n, MAX_BLOCK_LINES).unwrap();
        assert_eq!(counts(0), Vec::<usize>::new());
        assert_eq!(counts(1), vec![1]);
        assert_eq!(counts(250), vec![250]);
        assert_eq!(counts(251), vec![250, 1]);
        assert_eq!(counts(500), vec![250, 250]);
        assert_eq!(counts(600), vec![250, 250, 100]);
    }

    #[test]
    fn test_block_counts_zero_limit_is_an_error() {
        assert!(matches!(
            block_line_counts(10, 0),
            Err(PrintError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_frame_rejects_zero_block_limit() {
        let config = PrinterConfig {
            max_block_lines: 0,
            ..PrinterConfig::T02
        };
        assert!(matches!(
            frame_with_config(&[0u8; 48], &config),
            Err(PrintError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_frame_rejects_mismatched_width() {
        let config = PrinterConfig {
            width_bytes: 40,
            ..PrinterConfig::T02
        };
        assert!(matches!(
            frame_with_config(&[0u8; 240], &config),
            Err(PrintError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_frame_starts_and_ends_with_fixed_sequences() {
        let framed = frame(&lines_of(3)).unwrap();
        assert_eq!(&framed[..HEADER.len()], &HEADER);
        assert_eq!(&framed[framed.len() - FOOTER.len()..], &FOOTER);
    }

    #[test]
    fn test_frame_zero_lines() {
        let framed = frame(&[]).unwrap();
        let mut expected = HEADER.to_vec();
        expected.extend_from_slice(&FOOTER);
        assert_eq!(framed, expected);
        assert!(parse_blocks(&framed).unwrap().is_empty());
    }

    #[test]
    fn test_frame_block_line_fields() {
        for (total, expected) in [
            (1, vec![1u16]),
            (250, vec![250]),
            (251, vec![250, 1]),
            (500, vec![250, 250]),
        ] {
            let framed = frame(&lines_of(total)).unwrap();
            let counts: Vec<u16> = parse_blocks(&framed)
                .unwrap()
                .iter()
                .map(|(l, _)| *l)
                .collect();
            assert_eq!(counts, expected, "total_lines = {}", total);
        }
    }

    #[test]
    fn test_frame_payloads_reconstruct_input() {
        let bits = lines_of(777);
        let framed = frame(&bits).unwrap();
        let rebuilt: Vec<u8> = parse_blocks(&framed)
            .unwrap()
            .into_iter()
            .flat_map(|(_, payload)| payload.iter().copied())
            .collect();
        assert_eq!(rebuilt, bits);
    }

    #[test]
    fn test_frame_length() {
        let bits = lines_of(600);
        let framed = frame(&bits).unwrap();
        assert_eq!(
            framed.len(),
            HEADER.len() + 3 * BLOCK_HEADER_LEN + bits.len() + FOOTER.len()
        );
    }

    #[test]
    fn test_frame_rejects_partial_line() {
        let err = frame(&[0u8; 49]).unwrap_err();
        assert!(matches!(
            err,
            PrintError::RasterLength { len: 49, width_bytes: 48 }
        ));
    }

    #[test]
    fn test_frame_with_custom_config() {
        let config = PrinterConfig {
            width_bytes: 2,
            width_dots: 16,
            max_block_lines: 3,
            ..PrinterConfig::T02
        };
        let framed = frame_with_config(&[0xAB; 2 * 7], &config).unwrap();
        let blocks = parse_blocks(&framed).unwrap();
        let counts: Vec<u16> = blocks.iter().map(|(l, _)| *l).collect();
        assert_eq!(counts, vec![3, 3, 1]);
        assert_eq!(
            &framed[HEADER.len()..HEADER.len() + BLOCK_HEADER_LEN],
            &[0x1D, 0x76, 0x30, 0x00, 0x02, 0x00, 0x03, 0x00]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_blocks(&[0x00, 0x01]).is_none());
        let mut truncated = frame(&lines_of(2)).unwrap();
        truncated.remove(HEADER.len() + BLOCK_HEADER_LEN);
        assert!(parse_blocks(&truncated).is_none());
    }
}
