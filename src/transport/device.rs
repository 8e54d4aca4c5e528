//! # Device Node Channel
//!
//! Writes print data to an already-connected device node: a Bluetooth RFCOMM
//! binding (`/dev/rfcomm0`), a USB serial port, or a plain file for capturing
//! the byte stream.
//!
//! ## TTY Configuration
//!
//! If the node is a terminal it is switched to raw mode so binary data is
//! transmitted without modification:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//!
//! ## Acknowledgement
//!
//! A packet counts as delivered once it has been written and flushed to the
//! node. The T02 never answers print data, so there is nothing to read back.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::info;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::Channel;
use crate::error::PrintError;

/// Default RFCOMM device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// # Device Channel
///
/// ## Example
///
/// ```no_run
/// use t02print::transport::{self, DeviceChannel};
///
/// # async fn run(job: &[u8]) -> Result<(), t02print::PrintError> {
/// let mut channel = DeviceChannel::open("/dev/rfcomm0")?;
/// transport::send(&mut channel, job).await?;
/// # Ok(())
/// # }
/// ```
pub struct DeviceChannel {
    file: File,
    path: PathBuf,
    packet_delay: Duration,
}

impl DeviceChannel {
    /// Open a device node for writing.
    ///
    /// Regular files are created or truncated, which makes this usable for
    /// capturing a job to disk.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (may need root or dialout group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, PrintError> {
        let path = device.as_ref();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| {
                PrintError::Transport(format!("Failed to open {}: {}", path.display(), e))
            })?;

        if is_tty(&file) {
            configure_tty_raw(&file)?;
        }

        info!("opened {}", path.display());

        Ok(Self {
            file: File::from_std(file),
            path: path.to_path_buf(),
            packet_delay: Duration::ZERO,
        })
    }

    /// Pause after every packet.
    ///
    /// Links that drop data when flooded can be paced with a few
    /// milliseconds here. Default is no delay.
    pub fn set_packet_delay(&mut self, delay: Duration) {
        self.packet_delay = delay;
    }

    /// Path the channel was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Channel for DeviceChannel {
    async fn write(&mut self, packet: &[u8]) -> Result<(), PrintError> {
        self.file
            .write_all(packet)
            .await
            .map_err(|e| PrintError::Transport(format!("Write failed: {}", e)))?;
        self.file
            .flush()
            .await
            .map_err(|e| PrintError::Transport(format!("Flush failed: {}", e)))?;

        if !self.packet_delay.is_zero() {
            tokio::time::sleep(self.packet_delay).await;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn is_tty(file: &std::fs::File) -> bool {
    use std::os::unix::io::AsRawFd;
    unsafe { libc::isatty(file.as_raw_fd()) == 1 }
}

#[cfg(not(unix))]
fn is_tty(_file: &std::fs::File) -> bool {
    false
}

/// Configure a terminal for raw binary transfer.
///
/// IXON/IXOFF/IXANY are cleared as well: 0x11 (XON/DC1) and 0x13 (XOFF/DC3)
/// appear in raster data and in the T02's own `US 0x11 n` commands.
#[cfg(unix)]
fn configure_tty_raw(file: &std::fs::File) -> Result<(), PrintError> {
    use std::io;
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(PrintError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(PrintError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &std::fs::File) -> Result<(), PrintError> {
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
