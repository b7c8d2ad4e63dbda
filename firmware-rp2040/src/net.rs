//! Network stack stand-in: received frames are queued for the net task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Sender, TrySendError};
use fsci_proto::MAX_FRAME_LEN;
use fsci_radio::RadioRx;

/// Frames buffered between the rx task and the net task.
pub const RX_QUEUE_DEPTH: usize = 4;

/// A received MAC frame (no FCS).
#[derive(Clone)]
pub struct RxFrame {
    data: [u8; MAX_FRAME_LEN],
    len: usize,
    pub lqi: u8,
}

impl RxFrame {
    #[inline]
    #[must_use]
    pub fn frame(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

/// [`RadioRx`] that forwards frames into a channel.
///
/// Frames are dropped when the queue is full. ACK frames never reach the
/// host: the co-processor MAC consumes them.
pub struct ChannelRx {
    sender: Sender<'static, CriticalSectionRawMutex, RxFrame, RX_QUEUE_DEPTH>,
}

impl ChannelRx {
    #[must_use]
    pub fn new(sender: Sender<'static, CriticalSectionRawMutex, RxFrame, RX_QUEUE_DEPTH>) -> Self {
        Self { sender }
    }
}

impl RadioRx for ChannelRx {
    type Packet = [u8; MAX_FRAME_LEN];

    fn alloc_rx(&mut self) -> Option<Self::Packet> {
        Some([0u8; MAX_FRAME_LEN])
    }

    fn handle_ack(&mut self, _frame: &[u8], _lqi: u8) -> bool {
        false
    }

    fn receive(&mut self, packet: Self::Packet, len: usize, lqi: u8) -> Result<(), Self::Packet> {
        let frame = RxFrame {
            data: packet,
            len: len.min(MAX_FRAME_LEN),
            lqi,
        };
        self.sender.try_send(frame).map_err(|e| match e {
            TrySendError::Full(frame) => frame.data,
        })
    }
}
