//! # In-Memory Channel
//!
//! Records every packet it receives. Useful for tests, dry runs, and for
//! inspecting how a job would be split on the wire.

use async_trait::async_trait;

use super::Channel;
use crate::error::PrintError;

/// A [`Channel`] that stores packets instead of sending them.
///
/// ## Example
///
/// ```
/// use t02print::transport::{self, MemoryChannel};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), t02print::PrintError> {
/// let mut channel = MemoryChannel::new();
/// transport::send(&mut channel, &[0u8; 1000]).await?;
///
/// assert_eq!(channel.packets().len(), 2);
/// assert_eq!(channel.bytes().len(), 1000);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryChannel {
    packets: Vec<Vec<u8>>,
    fail_at: Option<usize>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel whose write of packet `index` (0-based) is rejected.
    pub fn failing_at(index: usize) -> Self {
        Self {
            packets: Vec::new(),
            fail_at: Some(index),
        }
    }

    /// Packets received so far, in arrival order.
    pub fn packets(&self) -> &[Vec<u8>] {
        &self.packets
    }

    /// All received bytes concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.packets.concat()
    }

    pub fn clear(&mut self) {
        self.packets.clear();
    }
}

#[async_trait]
impl Channel for MemoryChannel {
    async fn write(&mut self, packet: &[u8]) -> Result<(), PrintError> {
        // Suspend like a real link would before acknowledging
        tokio::task::yield_now().await;

        if self.fail_at == Some(self.packets.len()) {
            return Err(PrintError::Transport(format!(
                "write of packet {} rejected",
                self.packets.len()
            )));
        }
        self.packets.push(packet.to_vec());
        Ok(())
    }
}
