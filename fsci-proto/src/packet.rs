//! FSCI wire packet.
//!
//! ```text
//! +------+----------+---------+-----+-----------+----------+
//! | 0x02 | op group | op code | len | payload.. | checksum |
//! +------+----------+---------+-----+-----------+----------+
//! ```
//!
//! The checksum is the XOR of op group, op code, len and every payload byte.

use crate::cursor::{ByteWriter, CursorError};

/// Sentinel byte that starts every packet.
pub const FSCI_START_MARKER: u8 = 0x02;

/// Start marker, op group, op code and length.
pub const FSCI_HEADER_LEN: usize = 4;

/// Payload capacity of a packet buffer.
///
/// Large enough for an MCPS data indication carrying a full 118 byte MSDU.
pub const FSCI_MAX_PAYLOAD: usize = 160;

/// Largest encoded packet (header, payload and checksum).
pub const FSCI_MAX_FRAME_LEN: usize = FSCI_HEADER_LEN + FSCI_MAX_PAYLOAD + 1;

/// Error building or encoding a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// The payload does not fit in [`FSCI_MAX_PAYLOAD`] bytes.
    PayloadTooLarge,
    /// The output buffer is too small to hold the encoded packet.
    BufferTooSmall,
}

impl core::fmt::Display for PacketError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PayloadTooLarge => write!(f, "payload too large"),
            Self::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

/// One FSCI packet, either built for transmission or reassembled by the parser.
#[derive(Clone)]
pub struct FsciPacket {
    pub(crate) op_group: u8,
    pub(crate) op_code: u8,
    pub(crate) len: u8,
    pub(crate) payload: [u8; FSCI_MAX_PAYLOAD],
    pub(crate) checksum: u8,
}

impl FsciPacket {
    /// Create a packet with an empty payload.
    #[must_use]
    pub const fn new(op_group: u8, op_code: u8) -> Self {
        Self {
            op_group,
            op_code,
            len: 0,
            payload: [0u8; FSCI_MAX_PAYLOAD],
            checksum: 0,
        }
    }

    /// Create a packet carrying a copy of `payload`.
    pub fn with_payload(op_group: u8, op_code: u8, payload: &[u8]) -> Result<Self, PacketError> {
        Self::build(op_group, op_code, |w| w.write_slice(payload))
    }

    /// Create a packet whose payload is serialized by `f`.
    ///
    /// The declared length is whatever `f` wrote.
    pub fn build<F>(op_group: u8, op_code: u8, f: F) -> Result<Self, PacketError>
    where
        F: FnOnce(&mut ByteWriter<'_>) -> Result<(), CursorError>,
    {
        let mut packet = Self::new(op_group, op_code);
        let mut writer = ByteWriter::new(&mut packet.payload);
        f(&mut writer).map_err(|_| PacketError::PayloadTooLarge)?;
        // FSCI_MAX_PAYLOAD fits in the length byte
        packet.len = writer.position() as u8;
        packet.checksum = packet.compute_checksum();
        Ok(packet)
    }

    #[inline]
    #[must_use]
    pub fn op_group(&self) -> u8 {
        self.op_group
    }

    #[inline]
    #[must_use]
    pub fn op_code(&self) -> u8 {
        self.op_code
    }

    /// True if this packet carries the given command.
    #[inline]
    #[must_use]
    pub fn is(&self, op_group: u8, op_code: u8) -> bool {
        self.op_group == op_group && self.op_code == op_code
    }

    /// Length byte as sent on the wire.
    #[inline]
    #[must_use]
    pub fn declared_len(&self) -> u8 {
        self.len
    }

    /// True if the declared length exceeded [`FSCI_MAX_PAYLOAD`] and bytes were dropped.
    #[inline]
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.len as usize > FSCI_MAX_PAYLOAD
    }

    /// Payload bytes held in the buffer.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        let len = (self.len as usize).min(FSCI_MAX_PAYLOAD);
        &self.payload[..len]
    }

    /// Checksum byte carried by the packet (received value for parsed packets).
    #[inline]
    #[must_use]
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// XOR of op group, op code, length and the held payload.
    #[must_use]
    pub fn compute_checksum(&self) -> u8 {
        self.payload()
            .iter()
            .fold(self.op_group ^ self.op_code ^ self.len, |acc, &b| acc ^ b)
    }

    #[inline]
    #[must_use]
    pub fn checksum_valid(&self) -> bool {
        self.checksum == self.compute_checksum()
    }

    /// Header bytes with the start marker stamped.
    #[inline]
    #[must_use]
    pub fn header(&self) -> [u8; FSCI_HEADER_LEN] {
        [FSCI_START_MARKER, self.op_group, self.op_code, self.len]
    }

    /// Total encoded size.
    #[inline]
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        FSCI_HEADER_LEN + self.payload().len() + 1
    }

    /// Encode header, payload and a freshly computed checksum into `buf`.
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, PacketError> {
        let mut w = ByteWriter::new(buf);
        w.write_slice(&self.header())
            .and_then(|()| w.write_slice(self.payload()))
            .and_then(|()| w.write_u8(self.compute_checksum()))
            .map_err(|_| PacketError::BufferTooSmall)?;
        Ok(w.position())
    }

    /// Encode into a `heapless::Vec`.
    #[must_use]
    pub fn to_bytes(&self) -> heapless::Vec<u8, FSCI_MAX_FRAME_LEN> {
        let mut vec = heapless::Vec::new();
        // Capacity covers the largest packet, so these cannot fail
        let _ = vec.extend_from_slice(&self.header());
        let _ = vec.extend_from_slice(self.payload());
        let _ = vec.push(self.compute_checksum());
        vec
    }
}

// Bytes past the held payload are left over from earlier frames
impl PartialEq for FsciPacket {
    fn eq(&self, other: &Self) -> bool {
        self.op_group == other.op_group
            && self.op_code == other.op_code
            && self.len == other.len
            && self.payload() == other.payload()
            && self.checksum == other.checksum
    }
}

impl Eq for FsciPacket {}

impl core::fmt::Debug for FsciPacket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FsciPacket")
            .field("op_group", &format_args!("{:#04x}", self.op_group))
            .field("op_code", &format_args!("{:#04x}", self.op_code))
            .field("len", &self.len)
            .field("payload", &self.payload())
            .field("checksum", &format_args!("{:#04x}", self.checksum))
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FsciPacket {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "FsciPacket {{ op_group: {=u8:#x}, op_code: {=u8:#x}, len: {=u8}, payload: {=[u8]:x} }}",
            self.op_group,
            self.op_code,
            self.len,
            self.payload()
        )
    }
}
