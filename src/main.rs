//! # t02print CLI
//!
//! Command-line interface for printing images on a T02 thermal printer.
//!
//! ## Usage
//!
//! ```bash
//! # Print an image (scaled to 384 dots wide)
//! t02print print lyrics.png
//!
//! # Print to a specific device with a 30 second deadline
//! t02print print --device /dev/rfcomm1 --timeout-secs 30 lyrics.png
//!
//! # Write the printer byte stream to a file instead
//! t02print render lyrics.png job.bin
//!
//! # Save what would be printed as a PNG
//! t02print preview lyrics.png preview.png
//! ```
//!
//! Set `RUST_LOG=debug` to log every packet.

use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;

use t02print::{
    PrintError, PrinterConfig,
    job::{DitherMode, PrintJob},
    render::{self, pack},
    transport::DeviceChannel,
    transport::device::DEFAULT_DEVICE,
};

/// t02print - T02 thermal printer utility
#[derive(Parser, Debug)]
#[command(name = "t02print")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print an image to the thermal printer
    Print {
        #[command(flatten)]
        source: Source,

        /// Printer device path
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: PathBuf,

        /// Abort if sending takes longer than this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Pause after each packet (milliseconds)
        #[arg(long, default_value = "0")]
        packet_delay_ms: u64,
    },

    /// Write the framed printer byte stream to a file
    Render {
        #[command(flatten)]
        source: Source,

        /// Output file
        output: PathBuf,
    },

    /// Save the dithered raster as a PNG
    Preview {
        #[command(flatten)]
        source: Source,

        /// Output PNG file
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct Source {
    /// Input image
    image: PathBuf,

    /// Require the image to already be 384 dots wide instead of scaling it
    #[arg(long)]
    no_resize: bool,

    /// Threshold to black and white without error diffusion
    #[arg(long)]
    threshold_only: bool,
}

impl Source {
    fn job(&self) -> Result<PrintJob, PrintError> {
        let mode = if self.threshold_only {
            DitherMode::Threshold
        } else {
            DitherMode::FloydSteinberg
        };
        Ok(PrintJob::with_config(PrinterConfig::T02)?.dither_mode(mode))
    }

    fn load(&self, config: &PrinterConfig) -> Result<RgbaImage, PrintError> {
        let source = image::open(&self.image).map_err(|e| {
            PrintError::Image(format!("Failed to open {}: {}", self.image.display(), e))
        })?;

        let mut page = if self.no_resize {
            source.to_rgba8()
        } else {
            render::fit_to_width(&source, config.width_dots as u32)
        };
        render::flatten_onto_white(&mut page);

        info!(
            "loaded {} ({}x{} -> {}x{})",
            self.image.display(),
            source.width(),
            source.height(),
            page.width(),
            page.height()
        );
        Ok(page)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), PrintError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Print {
            source,
            device,
            timeout_secs,
            packet_delay_ms,
        } => {
            let job = source.job()?;
            let page = source.load(job.config())?;
            let rendered = job.render(&page)?;

            println!(
                "Printing {} lines ({:.0}mm)...",
                rendered.lines(),
                job.config().lines_to_mm(rendered.lines())
            );

            let mut channel = DeviceChannel::open(&device)?;
            channel.set_packet_delay(Duration::from_millis(packet_delay_ms));
            info!("writing to {}", channel.path().display());

            match timeout_secs {
                Some(secs) => {
                    job.send_with_timeout(&mut channel, &rendered.framed, Duration::from_secs(secs))
                        .await?
                }
                None => job.send(&mut channel, &rendered.framed).await?,
            }
            println!("Printed successfully!");
        }

        Commands::Render { source, output } => {
            let job = source.job()?;
            let page = source.load(job.config())?;
            let rendered = job.render(&page)?;

            std::fs::write(&output, &rendered.framed)?;
            println!(
                "Wrote {} bytes ({} blocks, {} packets) to {}",
                rendered.framed.len(),
                rendered.blocks(),
                rendered.packets(),
                output.display()
            );
        }

        Commands::Preview { source, output } => {
            let job = source.job()?;
            let page = source.load(job.config())?;
            let rendered = job.render(&page)?;

            save_png(&output, &rendered.raster, job.config().width_dots as u32)?;
            println!("Saved to {}", output.display());
        }
    }

    Ok(())
}

/// Save raster data as a PNG image
fn save_png(path: &Path, raster: &[u8], width_dots: u32) -> Result<(), PrintError> {
    let img = pack::unpack(raster, width_dots)?;
    img.save(path)
        .map_err(|e| PrintError::Image(format!("Failed to save PNG: {}", e)))?;
    Ok(())
}
