//! # Print Jobs
//!
//! Ties the pipeline together:
//!
//! ```text
//! RgbaImage → dither → pack → frame → send → Channel
//! ```
//!
//! Rendering is synchronous and pure. Sending is the only stage that
//! suspends, once per packet. Every job builds its buffers from scratch and
//! nothing is shared between jobs.
//!
//! ## Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use t02print::job::PrintJob;
//! use t02print::transport::MemoryChannel;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), t02print::PrintError> {
//! let page = RgbaImage::from_pixel(384, 8, Rgba([255, 255, 255, 255]));
//! let mut channel = MemoryChannel::new();
//!
//! let job = PrintJob::new();
//! let rendered = job.print(&mut channel, &page).await?;
//!
//! assert_eq!(rendered.lines(), 8);
//! assert_eq!(channel.packets().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use image::RgbaImage;
use log::{info, warn};

use crate::error::PrintError;
use crate::printer::PrinterConfig;
use crate::protocol::frame;
use crate::render::{dither, pack};
use crate::transport::{self, Channel};

/// How source images are reduced to black and white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherMode {
    /// Floyd–Steinberg error diffusion
    #[default]
    FloydSteinberg,
    /// Plain luminance threshold, no diffusion
    Threshold,
}

/// A framed job, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedJob {
    /// Packed raster lines, `width_bytes` per line
    pub raster: Vec<u8>,
    /// Complete command stream: header, raster blocks, footer
    pub framed: Vec<u8>,
    width_bytes: usize,
    max_block_lines: usize,
    max_packet_size: usize,
}

impl RenderedJob {
    /// Number of raster lines in the job.
    pub fn lines(&self) -> usize {
        self.raster.len() / self.width_bytes
    }

    /// Number of `GS v 0` blocks in the framed stream.
    pub fn blocks(&self) -> usize {
        self.lines().div_ceil(self.max_block_lines)
    }

    /// Number of link packets the framed stream is sent as.
    pub fn packets(&self) -> usize {
        self.framed.len().div_ceil(self.max_packet_size)
    }
}

/// A print pipeline for one printer model.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintJob {
    config: PrinterConfig,
    mode: DitherMode,
}

impl PrintJob {
    /// A job for the T02 with Floyd–Steinberg dithering.
    pub fn new() -> Self {
        Self::default()
    }

    /// A job for another printer configuration.
    ///
    /// ## Errors
    ///
    /// [`PrintError::InvalidConfig`] if `config` fails
    /// [`PrinterConfig::validate`].
    pub fn with_config(config: PrinterConfig) -> Result<Self, PrintError> {
        config.validate()?;
        Ok(Self {
            config,
            mode: DitherMode::default(),
        })
    }

    pub fn dither_mode(mut self, mode: DitherMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    /// Dither, pack and frame `image`.
    ///
    /// ## Errors
    ///
    /// [`PrintError::WidthMismatch`] if the image is not exactly the printer's
    /// width in dots. Images are never cropped or padded here; see
    /// [`crate::render::fit_to_width`].
    pub fn render(&self, image: &RgbaImage) -> Result<RenderedJob, PrintError> {
        self.config.validate()?;

        let expected = self.config.width_dots as u32;
        if image.width() != expected {
            return Err(PrintError::WidthMismatch {
                expected,
                actual: image.width(),
            });
        }

        let mono = match self.mode {
            DitherMode::FloydSteinberg => dither::dither(image),
            DitherMode::Threshold => dither::threshold(image),
        };
        let raster = pack::pack(&mono)?;
        let framed = frame::frame_with_config(&raster, &self.config)?;

        Ok(RenderedJob {
            raster,
            framed,
            width_bytes: self.config.width_bytes as usize,
            max_block_lines: self.config.max_block_lines as usize,
            max_packet_size: self.config.max_packet_size,
        })
    }

    /// Stream a framed job to `channel`.
    ///
    /// Waits for each packet to be accepted before issuing the next. No
    /// deadline is applied.
    pub async fn send<C>(&self, channel: &mut C, framed: &[u8]) -> Result<(), PrintError>
    where
        C: Channel + ?Sized,
    {
        transport::send_with_packet_size(channel, framed, self.config.max_packet_size).await
    }

    /// Stream a framed job, giving up once `deadline` has elapsed.
    ///
    /// On expiry no further packets are issued and [`PrintError::Timeout`]
    /// reports how many bytes had already been accepted. Those bytes have
    /// reached the printer; restart the whole job to recover.
    pub async fn send_with_timeout<C>(
        &self,
        channel: &mut C,
        framed: &[u8],
        deadline: Duration,
    ) -> Result<(), PrintError>
    where
        C: Channel + ?Sized,
    {
        let mut sent = 0;
        let result = tokio::time::timeout(
            deadline,
            transport::send_counted(channel, framed, self.config.max_packet_size, &mut sent),
        )
        .await;

        match result {
            Ok(inner) => inner,
            Err(_) => {
                warn!(
                    "send timed out after {:?}: {} of {} bytes accepted",
                    deadline,
                    sent,
                    framed.len()
                );
                Err(PrintError::Timeout {
                    sent,
                    total: framed.len(),
                })
            }
        }
    }

    /// Render `image` and send it to `channel`.
    pub async fn print<C>(&self, channel: &mut C, image: &RgbaImage) -> Result<RenderedJob, PrintError>
    where
        C: Channel + ?Sized,
    {
        let rendered = self.render(image)?;
        info!(
            "printing {} lines in {} blocks ({} bytes, {} packets)",
            rendered.lines(),
            rendered.blocks(),
            rendered.framed.len(),
            rendered.packets()
        );

        self.send(channel, &rendered.framed).await?;
        info!("sent {} bytes", rendered.framed.len());
        Ok(rendered)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryChannel;
    use async_trait::async_trait;
    use image::Rgba;

    fn page(height: u32, v: u8) -> RgbaImage {
        RgbaImage::from_pixel(384, height, Rgba([v, v, v, 255]))
    }

    /// Accepts the first `accept` packets, then never completes.
    struct StallingChannel {
        accepted: usize,
        accept: usize,
    }

    #[async_trait]
    impl Channel for StallingChannel {
        async fn write(&mut self, _packet: &[u8]) -> Result<(), PrintError> {
            if self.accepted == self.accept {
                std::future::pending::<()>().await;
            }
            self.accepted += 1;
            Ok(())
        }
    }

    #[test]
    fn test_render_rejects_wrong_width() {
        let img = RgbaImage::new(576, 10);
        assert!(matches!(
            PrintJob::new().render(&img),
            Err(PrintError::WidthMismatch { expected: 384, actual: 576 })
        ));
    }

    #[test]
    fn test_with_config_rejects_zero_limits() {
        for config in [
            PrinterConfig {
                max_block_lines: 0,
                ..PrinterConfig::T02
            },
            PrinterConfig {
                max_packet_size: 0,
                ..PrinterConfig::T02
            },
        ] {
            assert!(matches!(
                PrintJob::with_config(config),
                Err(PrintError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_with_config_rejects_width_bytes_mismatch() {
        // 40 bytes per line would re-slice a 384-dot raster into 6 short lines
        let config = PrinterConfig {
            width_bytes: 40,
            ..PrinterConfig::T02
        };
        assert!(matches!(
            PrintJob::with_config(config),
            Err(PrintError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_with_config_accepts_consistent_config() {
        let config = PrinterConfig {
            max_block_lines: 2,
            max_packet_size: 64,
            ..PrinterConfig::T02
        };
        let rendered = PrintJob::with_config(config)
            .unwrap()
            .render(&page(5, 255))
            .unwrap();
        assert_eq!(rendered.lines(), 5);
        assert_eq!(rendered.blocks(), 3);
        assert_eq!(rendered.packets(), rendered.framed.len().div_ceil(64));
    }

    #[test]
    fn test_render_counts() {
        let rendered = PrintJob::new().render(&page(600, 255)).unwrap();
        assert_eq!(rendered.lines(), 600);
        assert_eq!(rendered.blocks(), 3);
        assert_eq!(rendered.raster.len(), 48 * 600);
        assert_eq!(rendered.packets(), rendered.framed.len().div_ceil(512));
    }

    #[test]
    fn test_threshold_mode_skips_diffusion() {
        let job = PrintJob::new().dither_mode(DitherMode::Threshold);
        let rendered = job.render(&page(4, 100)).unwrap();
        assert!(rendered.raster.iter().all(|&b| b == 0xFF));

        let diffused = PrintJob::new().render(&page(4, 100)).unwrap();
        assert!(diffused.raster.iter().any(|&b| b != 0xFF));
    }

    #[tokio::test]
    async fn test_print_sends_framed_bytes() {
        let mut channel = MemoryChannel::new();
        let rendered = PrintJob::new().print(&mut channel, &page(20, 0)).await.unwrap();
        assert_eq!(channel.bytes(), rendered.framed);
        assert_eq!(channel.packets().len(), rendered.packets());
    }

    #[tokio::test]
    async fn test_print_propagates_transport_failure() {
        let mut channel = MemoryChannel::failing_at(0);
        let result = PrintJob::new().print(&mut channel, &page(20, 0)).await;
        assert!(matches!(result, Err(PrintError::Transport(_))));
    }

    #[tokio::test]
    async fn test_send_with_timeout_reports_progress() {
        let framed = vec![0u8; 2000];
        let mut channel = StallingChannel {
            accepted: 0,
            accept: 2,
        };

        let err = PrintJob::new()
            .send_with_timeout(&mut channel, &framed, Duration::from_millis(50))
            .await
            .unwrap_err();

        assert!(matches!(err, PrintError::Timeout { sent: 1024, total: 2000 }));
        assert_eq!(channel.accepted, 2);
    }

    #[tokio::test]
    async fn test_send_with_timeout_completes_in_time() {
        let mut channel = MemoryChannel::new();
        PrintJob::new()
            .send_with_timeout(&mut channel, &[1, 2, 3], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(channel.bytes(), vec![1, 2, 3]);
    }
}
