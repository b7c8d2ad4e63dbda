//! IEEE 802.15.4 MAC frame header codec.
//!
//! A [`LinkFrame`] is the network stack's view of a MAC frame: frame control,
//! sequence number, addressing fields and the MSDU. Parsing borrows the MSDU
//! from the caller's buffer. Frames handled here never carry the FCS.

use crate::cursor::{ByteReader, ByteWriter, CursorError};

/// Largest PHY payload (aMaxPHYPacketSize).
pub const MAX_FRAME_LEN: usize = 127;

/// Broadcast PAN identifier.
pub const BROADCAST_PAN_ID: u16 = 0xFFFF;

/// Broadcast short address.
pub const BROADCAST_ADDRESS: u16 = 0xFFFF;

/// Error parsing or writing a MAC frame or a MAC primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Input ended inside a header field or the MSDU.
    Truncated,
    /// Output buffer too small for the frame.
    BufferTooSmall,
    /// Addressing mode 0b01 is reserved.
    ReservedAddressMode,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Truncated => write!(f, "frame truncated"),
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::ReservedAddressMode => write!(f, "reserved addressing mode"),
        }
    }
}

impl From<CursorError> for FrameError {
    fn from(err: CursorError) -> Self {
        match err {
            CursorError::BufferTooSmall => FrameError::BufferTooSmall,
            CursorError::UnexpectedEnd => FrameError::Truncated,
        }
    }
}

/// Frame type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameType {
    Beacon,
    Data,
    Ack,
    MacCommand,
    Reserved(u8),
}

impl FrameType {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0b000 => Self::Beacon,
            0b001 => Self::Data,
            0b010 => Self::Ack,
            0b011 => Self::MacCommand,
            other => Self::Reserved(other),
        }
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Beacon => 0b000,
            Self::Data => 0b001,
            Self::Ack => 0b010,
            Self::MacCommand => 0b011,
            Self::Reserved(bits) => bits & 0x07,
        }
    }
}

/// Frame version field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameVersion {
    /// IEEE 802.15.4-2003.
    Ieee802154_2003,
    /// IEEE 802.15.4-2006.
    Ieee802154_2006,
    /// IEEE 802.15.4-2015 and later.
    Ieee802154,
    Reserved,
}

impl FrameVersion {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b00 => Self::Ieee802154_2003,
            0b01 => Self::Ieee802154_2006,
            0b10 => Self::Ieee802154,
            _ => Self::Reserved,
        }
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Ieee802154_2003 => 0b00,
            Self::Ieee802154_2006 => 0b01,
            Self::Ieee802154 => 0b10,
            Self::Reserved => 0b11,
        }
    }
}

/// Addressing mode field, shared by the MAC header and the MCPS primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AddressMode {
    None = 0b00,
    Reserved = 0b01,
    Short = 0b10,
    Extended = 0b11,
}

impl AddressMode {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b00 => Self::None,
            0b01 => Self::Reserved,
            0b10 => Self::Short,
            _ => Self::Extended,
        }
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// A device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Address {
    None,
    Short(u16),
    Extended(u64),
}

impl Address {
    #[must_use]
    pub const fn mode(&self) -> AddressMode {
        match self {
            Self::None => AddressMode::None,
            Self::Short(_) => AddressMode::Short,
            Self::Extended(_) => AddressMode::Extended,
        }
    }

    /// Address widened to the 8 byte field used by the MCPS primitives.
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        match *self {
            Self::None => 0,
            Self::Short(addr) => addr as u64,
            Self::Extended(addr) => addr,
        }
    }

    /// Rebuild an address from a mode and an 8 byte primitive field.
    pub const fn from_raw(mode: AddressMode, raw: u64) -> Result<Self, FrameError> {
        match mode {
            AddressMode::None => Ok(Self::None),
            AddressMode::Short => Ok(Self::Short(raw as u16)),
            AddressMode::Extended => Ok(Self::Extended(raw)),
            AddressMode::Reserved => Err(FrameError::ReservedAddressMode),
        }
    }

    fn read(reader: &mut ByteReader<'_>, mode: AddressMode) -> Result<Self, FrameError> {
        match mode {
            AddressMode::None => Ok(Self::None),
            AddressMode::Short => Ok(Self::Short(reader.read_u16_le()?)),
            AddressMode::Extended => Ok(Self::Extended(reader.read_u64_le()?)),
            AddressMode::Reserved => Err(FrameError::ReservedAddressMode),
        }
    }

    fn write(&self, writer: &mut ByteWriter<'_>) -> Result<(), CursorError> {
        match *self {
            Self::None => Ok(()),
            Self::Short(addr) => writer.write_u16_le(addr),
            Self::Extended(addr) => writer.write_u64_le(addr),
        }
    }
}

/// Decoded frame control field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameControl {
    pub frame_type: FrameType,
    pub security_enabled: bool,
    pub frame_pending: bool,
    pub ack_request: bool,
    pub pan_id_compression: bool,
    pub dst_addr_mode: AddressMode,
    pub frame_version: FrameVersion,
    pub src_addr_mode: AddressMode,
}

impl FrameControl {
    /// Data frame, version 2006, PAN ID compressed, no addressing.
    #[must_use]
    pub const fn data() -> Self {
        Self {
            frame_type: FrameType::Data,
            security_enabled: false,
            frame_pending: false,
            ack_request: false,
            pan_id_compression: true,
            dst_addr_mode: AddressMode::None,
            frame_version: FrameVersion::Ieee802154_2006,
            src_addr_mode: AddressMode::None,
        }
    }

    /// Decode the little-endian 16 bit field.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self {
            frame_type: FrameType::from_bits(bits as u8),
            security_enabled: bits & (1 << 3) != 0,
            frame_pending: bits & (1 << 4) != 0,
            ack_request: bits & (1 << 5) != 0,
            pan_id_compression: bits & (1 << 6) != 0,
            dst_addr_mode: AddressMode::from_bits((bits >> 10) as u8),
            frame_version: FrameVersion::from_bits((bits >> 12) as u8),
            src_addr_mode: AddressMode::from_bits((bits >> 14) as u8),
        }
    }

    #[must_use]
    pub const fn bits(&self) -> u16 {
        (self.frame_type.bits() as u16)
            | (self.security_enabled as u16) << 3
            | (self.frame_pending as u16) << 4
            | (self.ack_request as u16) << 5
            | (self.pan_id_compression as u16) << 6
            | (self.dst_addr_mode.bits() as u16) << 10
            | (self.frame_version.bits() as u16) << 12
            | (self.src_addr_mode.bits() as u16) << 14
    }

    /// Read just the frame control field from the start of a frame.
    pub fn peek(frame: &[u8]) -> Result<Self, FrameError> {
        Ok(Self::from_bits(ByteReader::new(frame).read_u16_le()?))
    }
}

/// A MAC frame laid out over a caller-owned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkFrame<'a> {
    pub frame_control: FrameControl,
    pub sequence: u8,
    pub dst_pan_id: Option<u16>,
    pub dst_addr: Address,
    /// Source PAN; resolves to the destination PAN when compression is set.
    pub src_pan_id: Option<u16>,
    pub src_addr: Address,
    pub payload: &'a [u8],
}

impl<'a> LinkFrame<'a> {
    /// Parse a frame, walking the addressing fields in header order.
    ///
    /// Everything after the addressing fields is taken as the MSDU.
    pub fn parse(frame: &'a [u8]) -> Result<Self, FrameError> {
        let mut reader = ByteReader::new(frame);
        let frame_control = FrameControl::from_bits(reader.read_u16_le()?);
        let sequence = reader.read_u8()?;

        let (dst_pan_id, dst_addr) = match frame_control.dst_addr_mode {
            AddressMode::None => (None, Address::None),
            mode => {
                let pan = reader.read_u16_le()?;
                (Some(pan), Address::read(&mut reader, mode)?)
            }
        };

        let (src_pan_id, src_addr) = match frame_control.src_addr_mode {
            AddressMode::None => (None, Address::None),
            mode => {
                let pan = if frame_control.pan_id_compression {
                    dst_pan_id
                } else {
                    Some(reader.read_u16_le()?)
                };
                (pan, Address::read(&mut reader, mode)?)
            }
        };

        Ok(Self {
            frame_control,
            sequence,
            dst_pan_id,
            dst_addr,
            src_pan_id,
            src_addr,
            payload: reader.remaining(),
        })
    }

    /// Size of the MAC header this frame writes.
    #[must_use]
    pub fn header_len(&self) -> usize {
        let addr_len = |addr: &Address| match addr {
            Address::None => 0,
            Address::Short(_) => 2,
            Address::Extended(_) => 8,
        };
        let mut len = 3;
        if self.dst_addr != Address::None {
            len += 2 + addr_len(&self.dst_addr);
        }
        if self.src_addr != Address::None {
            if !self.frame_control.pan_id_compression {
                len += 2;
            }
            len += addr_len(&self.src_addr);
        }
        len
    }

    /// Write the frame into `buf`, returning its length.
    ///
    /// Addressing modes in the frame control field follow the addresses.
    /// With PAN ID compression set the source PAN is omitted; whether it
    /// equals the destination PAN is not checked.
    pub fn write(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let frame_control = FrameControl {
            dst_addr_mode: self.dst_addr.mode(),
            src_addr_mode: self.src_addr.mode(),
            ..self.frame_control
        };

        let mut writer = ByteWriter::new(buf);
        writer.write_u16_le(frame_control.bits())?;
        writer.write_u8(self.sequence)?;

        if self.dst_addr != Address::None {
            writer.write_u16_le(self.dst_pan_id.unwrap_or(BROADCAST_PAN_ID))?;
            self.dst_addr.write(&mut writer)?;
        }
        if self.src_addr != Address::None {
            if !frame_control.pan_id_compression {
                writer.write_u16_le(self.src_pan_id.unwrap_or(BROADCAST_PAN_ID))?;
            }
            self.src_addr.write(&mut writer)?;
        }

        writer.write_slice(self.payload)?;
        Ok(writer.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Data, ack request, PAN ID compressed, short dst 0xFFFF, short src 0x0001,
    // PAN 0xABCD, version 2006, sequence 0x2A, payload "hi".
    const SHORT_COMPRESSED: [u8; 11] = [
        0x61, 0x98, 0x2A, 0xCD, 0xAB, 0xFF, 0xFF, 0x01, 0x00, b'h', b'i',
    ];

    #[test]
    fn test_frame_control_bits() {
        let fc = FrameControl::from_bits(0x9861);
        assert_eq!(fc.frame_type, FrameType::Data);
        assert!(fc.ack_request);
        assert!(fc.pan_id_compression);
        assert!(!fc.security_enabled);
        assert!(!fc.frame_pending);
        assert_eq!(fc.dst_addr_mode, AddressMode::Short);
        assert_eq!(fc.src_addr_mode, AddressMode::Short);
        assert_eq!(fc.frame_version, FrameVersion::Ieee802154_2006);
        assert_eq!(fc.bits(), 0x9861);
    }

    #[test]
    fn test_parse_short_compressed() {
        let frame = LinkFrame::parse(&SHORT_COMPRESSED).unwrap();
        assert_eq!(frame.sequence, 0x2A);
        assert_eq!(frame.dst_pan_id, Some(0xABCD));
        assert_eq!(frame.dst_addr, Address::Short(0xFFFF));
        assert_eq!(frame.src_pan_id, Some(0xABCD));
        assert_eq!(frame.src_addr, Address::Short(0x0001));
        assert_eq!(frame.payload, b"hi");
        assert_eq!(frame.header_len(), 9);
    }

    #[test]
    fn test_write_matches_parsed_bytes() {
        let frame = LinkFrame::parse(&SHORT_COMPRESSED).unwrap();
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = frame.write(&mut buf).unwrap();
        assert_eq!(&buf[..len], &SHORT_COMPRESSED);
    }

    #[test]
    fn test_extended_uncompressed_carries_source_pan() {
        let frame = LinkFrame {
            frame_control: FrameControl {
                pan_id_compression: false,
                dst_addr_mode: AddressMode::Extended,
                src_addr_mode: AddressMode::Extended,
                ..FrameControl::data()
            },
            sequence: 7,
            dst_pan_id: Some(0x1234),
            dst_addr: Address::Extended(0x0011_2233_4455_6677),
            src_pan_id: Some(0x5678),
            src_addr: Address::Extended(0x8899_AABB_CCDD_EEFF),
            payload: &[0xC0, 0xDE],
        };
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = frame.write(&mut buf).unwrap();
        assert_eq!(len, frame.header_len() + 2);
        assert_eq!(len, 3 + 2 + 8 + 2 + 8 + 2);
        // Source PAN sits between the two extended addresses.
        assert_eq!(&buf[13..15], &[0x78, 0x56]);

        let parsed = LinkFrame::parse(&buf[..len]).unwrap();
        assert_eq!(parsed.frame_control.dst_addr_mode, AddressMode::Extended);
        assert_eq!(parsed.src_pan_id, Some(0x5678));
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_no_destination() {
        let frame = LinkFrame {
            frame_control: FrameControl {
                pan_id_compression: false,
                ..FrameControl::data()
            },
            sequence: 1,
            dst_pan_id: None,
            dst_addr: Address::None,
            src_pan_id: Some(0x0022),
            src_addr: Address::Short(0x0102),
            payload: &[],
        };
        let mut buf = [0u8; 16];
        let len = frame.write(&mut buf).unwrap();
        assert_eq!(len, 7);
        let parsed = LinkFrame::parse(&buf[..len]).unwrap();
        assert_eq!(parsed.dst_pan_id, None);
        assert_eq!(parsed.src_pan_id, Some(0x0022));
        assert!(parsed.payload.is_empty());
    }

    #[test]
    fn test_reserved_mode_rejected() {
        // dst mode 0b01
        let frame = [0x41, 0x04, 0x00, 0xCD, 0xAB];
        assert_eq!(LinkFrame::parse(&frame), Err(FrameError::ReservedAddressMode));
    }

    #[test]
    fn test_truncated_header() {
        assert_eq!(
            LinkFrame::parse(&SHORT_COMPRESSED[..6]),
            Err(FrameError::Truncated)
        );
        assert_eq!(FrameControl::peek(&[0x41]), Err(FrameError::Truncated));
    }

    #[test]
    fn test_write_buffer_too_small() {
        let frame = LinkFrame::parse(&SHORT_COMPRESSED).unwrap();
        let mut buf = [0u8; 10];
        assert_eq!(frame.write(&mut buf), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_address_raw_round_trip() {
        assert_eq!(Address::Short(0xBEEF).to_raw(), 0xBEEF);
        assert_eq!(
            Address::from_raw(AddressMode::Short, 0xFFFF_0000_0000_BEEF),
            Ok(Address::Short(0xBEEF))
        );
        assert_eq!(
            Address::from_raw(AddressMode::Reserved, 0),
            Err(FrameError::ReservedAddressMode)
        );
    }
}
