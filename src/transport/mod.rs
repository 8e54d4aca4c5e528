//! # Printer Transport Layer
//!
//! This module streams a framed print job to the printer in packets no larger
//! than the link's maximum write size.
//!
//! ## Flow Control
//!
//! Packets are written strictly in order and each write is awaited before the
//! next one is issued. [`Channel::write`] takes `&mut self`, so a single job
//! can never have two writes outstanding on the same channel. Two jobs sharing
//! one physical link must still be serialised by the caller; interleaved
//! packets would corrupt both prints.
//!
//! No deadline is applied here. A hung write blocks the send until the caller
//! gives up (see [`crate::job::PrintJob::send_with_timeout`]). A failed write
//! fails the whole send; nothing is retried and already-sent packets cannot be
//! recalled.
//!
//! ## Available Channels
//!
//! - [`memory`]: In-memory recorder for tests and dry runs
//! - [`device`]: Serial / RFCOMM device node

pub mod device;
pub mod memory;

use async_trait::async_trait;
use log::{debug, warn};

use crate::error::PrintError;
use crate::printer::BLE_MAX_PACKET_SIZE;

pub use device::DeviceChannel;
pub use memory::MemoryChannel;

/// A writable link to the printer.
///
/// `write` resolves once the packet has been accepted by the link, or fails if
/// it was rejected or the link dropped.
#[async_trait]
pub trait Channel: Send {
    async fn write(&mut self, packet: &[u8]) -> Result<(), PrintError>;
}

#[async_trait]
impl<C: Channel + ?Sized> Channel for Box<C> {
    async fn write(&mut self, packet: &[u8]) -> Result<(), PrintError> {
        (**self).write(packet).await
    }
}

/// Iterate over the packets `data` is sent as.
///
/// Yields `ceil(len / max_packet_size)` slices in offset order; an empty
/// buffer yields nothing.
///
/// ## Errors
///
/// [`PrintError::InvalidConfig`] if `max_packet_size` is zero.
pub fn packets(
    data: &[u8],
    max_packet_size: usize,
) -> Result<std::slice::Chunks<'_, u8>, PrintError> {
    if max_packet_size == 0 {
        return Err(PrintError::InvalidConfig(
            "max_packet_size is 0".to_string(),
        ));
    }
    Ok(data.chunks(max_packet_size))
}

/// Send `data` in packets of at most [`BLE_MAX_PACKET_SIZE`] bytes.
pub async fn send<C>(channel: &mut C, data: &[u8]) -> Result<(), PrintError>
where
    C: Channel + ?Sized,
{
    send_with_packet_size(channel, data, BLE_MAX_PACKET_SIZE).await
}

/// Send `data` in packets of at most `max_packet_size` bytes.
pub async fn send_with_packet_size<C>(
    channel: &mut C,
    data: &[u8],
    max_packet_size: usize,
) -> Result<(), PrintError>
where
    C: Channel + ?Sized,
{
    let mut sent = 0;
    send_counted(channel, data, max_packet_size, &mut sent).await
}

/// Like [`send_with_packet_size`], recording acknowledged bytes in `sent`.
///
/// `sent` is updated after every completed write, so it stays meaningful if
/// the future is dropped mid-send.
pub async fn send_counted<C>(
    channel: &mut C,
    data: &[u8],
    max_packet_size: usize,
    sent: &mut usize,
) -> Result<(), PrintError>
where
    C: Channel + ?Sized,
{
    *sent = 0;
    for (i, packet) in packets(data, max_packet_size)?.enumerate() {
        let start = *sent;
        let end = start + packet.len();
        debug!("packet {}: bytes {}..{}", i, start, end);

        if let Err(e) = channel.write(packet).await {
            warn!("write of packet {} (bytes {}..{}) failed: {}", i, start, end, e);
            return Err(e);
        }
        *sent = end;
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
