//! Network stack receive seam.

/// Receive side of the network stack the radio delivers frames to.
///
/// Implementations own packet buffers; the driver borrows one per received
/// frame, fills it with the MAC frame (no FCS) and hands it back.
pub trait RadioRx {
    /// A network packet buffer.
    type Packet: AsMut<[u8]>;

    /// Take a free buffer of at least [`fsci_proto::MAX_FRAME_LEN`] bytes.
    ///
    /// `None` drops the frame.
    fn alloc_rx(&mut self) -> Option<Self::Packet>;

    /// Offer the frame to the acknowledgment handler first.
    ///
    /// Return `true` if it was consumed as an ACK; the packet is then not
    /// passed to [`RadioRx::receive`].
    fn handle_ack(&mut self, frame: &[u8], lqi: u8) -> bool;

    /// Deliver a frame occupying the first `len` bytes of `packet`.
    ///
    /// Rejected packets come back in `Err` and are released by the driver.
    fn receive(&mut self, packet: Self::Packet, len: usize, lqi: u8) -> Result<(), Self::Packet>;
}
