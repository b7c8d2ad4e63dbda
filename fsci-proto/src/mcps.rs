//! MCPS data primitives as serialized by the co-processor.
//!
//! Addresses travel as a fixed 8 byte little-endian field next to their
//! addressing mode; short addresses use the low two bytes. Security fields
//! are always present on the wire and always zero from this side.

use core::ops::{BitOr, BitOrAssign};

use crate::cursor::{ByteReader, ByteWriter, CursorError};
use crate::frame::{Address, AddressMode, FrameError};
use crate::opcodes::{mcps, OG_MCPS_NWK, OG_NWK_MCPS};
use crate::packet::{FsciPacket, PacketError};
use crate::status::Status;

/// Fixed part of an MCPS-DATA.request, before the MSDU.
pub const DATA_REQUEST_FIXED_LEN: usize = 36;

/// Fixed part of an MCPS-DATA.indication, before the MSDU.
pub const DATA_INDICATION_FIXED_LEN: usize = 40;

/// Encoded MCPS-DATA.confirm.
pub const DATA_CONFIRM_LEN: usize = 6;

/// Transmit option flags of an MCPS-DATA.request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxOptions(pub u8);

impl TxOptions {
    pub const NONE: Self = Self(0x00);
    /// Request an acknowledgment.
    pub const ACK: Self = Self(0x01);
    /// Send in a guaranteed time slot.
    pub const GTS: Self = Self(0x02);
    /// Queue for indirect transmission.
    pub const INDIRECT: Self = Self(0x04);
    /// Set the frame pending bit.
    pub const FRAME_PENDING: Self = Self(0x10);

    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TxOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TxOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

fn write_address(w: &mut ByteWriter<'_>, addr: Address, pan_id: u16) -> Result<(), CursorError> {
    w.write_u64_le(addr.to_raw())?;
    w.write_u16_le(pan_id)?;
    w.write_u8(addr.mode().bits())
}

fn read_address(r: &mut ByteReader<'_>) -> Result<(Address, u16), FrameError> {
    let raw = r.read_u64_le()?;
    let pan_id = r.read_u16_le()?;
    let mode = AddressMode::from_bits(r.read_u8()?);
    Ok((Address::from_raw(mode, raw)?, pan_id))
}

fn msdu_len(msdu: &[u8]) -> Result<u8, CursorError> {
    u8::try_from(msdu.len()).map_err(|_| CursorError::BufferTooSmall)
}

/// Skip security level, key id mode, key source and key index.
fn write_no_security(w: &mut ByteWriter<'_>) -> Result<(), CursorError> {
    w.write_u8(0)?;
    w.write_u8(0)?;
    w.write_u64_le(0)?;
    w.write_u8(0)
}

/// MCPS-DATA.request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataRequest<'a> {
    pub dst_addr: Address,
    pub dst_pan_id: u16,
    pub src_addr: Address,
    pub src_pan_id: u16,
    pub msdu_handle: u8,
    pub tx_options: TxOptions,
    pub msdu: &'a [u8],
}

impl<'a> DataRequest<'a> {
    /// Serialize into an NWK to MCPS packet.
    pub fn to_packet(&self) -> Result<FsciPacket, PacketError> {
        FsciPacket::build(OG_NWK_MCPS, mcps::DATA_REQUEST, |w| {
            write_address(w, self.dst_addr, self.dst_pan_id)?;
            write_address(w, self.src_addr, self.src_pan_id)?;
            w.write_u8(msdu_len(self.msdu)?)?;
            w.write_u8(self.msdu_handle)?;
            w.write_u8(self.tx_options.0)?;
            write_no_security(w)?;
            w.write_slice(self.msdu)
        })
    }

    /// Decode a request payload.
    pub fn decode(payload: &'a [u8]) -> Result<Self, FrameError> {
        let mut r = ByteReader::new(payload);
        let (dst_addr, dst_pan_id) = read_address(&mut r)?;
        let (src_addr, src_pan_id) = read_address(&mut r)?;
        let len = r.read_u8()? as usize;
        let msdu_handle = r.read_u8()?;
        let tx_options = TxOptions(r.read_u8()?);
        r.read_slice(11)?;
        Ok(Self {
            dst_addr,
            dst_pan_id,
            src_addr,
            src_pan_id,
            msdu_handle,
            tx_options,
            msdu: r.read_slice(len)?,
        })
    }
}

/// MCPS-DATA.confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataConfirm {
    pub msdu_handle: u8,
    pub status: Status,
    pub timestamp: u32,
}

impl DataConfirm {
    pub fn decode(payload: &[u8]) -> Result<Self, FrameError> {
        let mut r = ByteReader::new(payload);
        Ok(Self {
            msdu_handle: r.read_u8()?,
            status: Status::from_u8(r.read_u8()?),
            timestamp: r.read_u32_le()?,
        })
    }

    /// Serialize into an MCPS to NWK packet.
    pub fn to_packet(&self) -> Result<FsciPacket, PacketError> {
        FsciPacket::build(OG_MCPS_NWK, mcps::DATA_CONFIRM, |w| {
            w.write_u8(self.msdu_handle)?;
            w.write_u8(self.status.to_u8())?;
            w.write_u32_le(self.timestamp)
        })
    }
}

/// MCPS-DATA.indication, pushed by the co-processor for each received frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataIndication<'a> {
    pub src_addr: Address,
    pub src_pan_id: u16,
    pub dst_addr: Address,
    pub dst_pan_id: u16,
    pub link_quality: u8,
    pub dsn: u8,
    pub timestamp: u32,
    pub security_level: u8,
    pub msdu: &'a [u8],
}

impl<'a> DataIndication<'a> {
    pub fn decode(payload: &'a [u8]) -> Result<Self, FrameError> {
        let mut r = ByteReader::new(payload);
        let (src_addr, src_pan_id) = read_address(&mut r)?;
        let (dst_addr, dst_pan_id) = read_address(&mut r)?;
        let len = r.read_u8()? as usize;
        let link_quality = r.read_u8()?;
        let dsn = r.read_u8()?;
        let timestamp = r.read_u32_le()?;
        let security_level = r.read_u8()?;
        // key id mode, key source, key index
        r.read_slice(10)?;
        Ok(Self {
            src_addr,
            src_pan_id,
            dst_addr,
            dst_pan_id,
            link_quality,
            dsn,
            timestamp,
            security_level,
            msdu: r.read_slice(len)?,
        })
    }

    /// Serialize into an MCPS to NWK packet.
    pub fn to_packet(&self) -> Result<FsciPacket, PacketError> {
        FsciPacket::build(OG_MCPS_NWK, mcps::DATA_INDICATION, |w| {
            write_address(w, self.src_addr, self.src_pan_id)?;
            write_address(w, self.dst_addr, self.dst_pan_id)?;
            w.write_u8(msdu_len(self.msdu)?)?;
            w.write_u8(self.link_quality)?;
            w.write_u8(self.dsn)?;
            w.write_u32_le(self.timestamp)?;
            w.write_u8(self.security_level)?;
            // key id mode, key source, key index
            w.write_u8(0)?;
            w.write_u64_le(0)?;
            w.write_u8(0)?;
            w.write_slice(self.msdu)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::FSCI_MAX_PAYLOAD;

    fn request(msdu: &[u8]) -> DataRequest<'_> {
        DataRequest {
            dst_addr: Address::Short(0x1234),
            dst_pan_id: 0xABCD,
            src_addr: Address::Extended(0x0102_0304_0506_0708),
            src_pan_id: 0xABCD,
            msdu_handle: 9,
            tx_options: TxOptions::ACK | TxOptions::FRAME_PENDING,
            msdu,
        }
    }

    #[test]
    fn test_data_request_layout() {
        let packet = request(b"abc").to_packet().unwrap();
        assert!(packet.is(OG_NWK_MCPS, mcps::DATA_REQUEST));
        let p = packet.payload();
        assert_eq!(p.len(), DATA_REQUEST_FIXED_LEN + 3);
        assert_eq!(&p[0..8], &[0x34, 0x12, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&p[8..10], &[0xCD, 0xAB]);
        assert_eq!(p[10], AddressMode::Short.bits());
        assert_eq!(&p[11..19], &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(p[21], AddressMode::Extended.bits());
        assert_eq!(p[22], 3);
        assert_eq!(p[23], 9);
        assert_eq!(p[24], 0x11);
        assert!(p[25..36].iter().all(|&b| b == 0));
        assert_eq!(&p[36..], b"abc");
    }

    #[test]
    fn test_data_request_decode() {
        let packet = request(b"xyz").to_packet().unwrap();
        assert_eq!(DataRequest::decode(packet.payload()), Ok(request(b"xyz")));
    }

    #[test]
    fn test_data_request_msdu_too_large() {
        let msdu = [0u8; FSCI_MAX_PAYLOAD - DATA_REQUEST_FIXED_LEN + 1];
        assert_eq!(request(&msdu).to_packet(), Err(PacketError::PayloadTooLarge));
    }

    #[test]
    fn test_data_confirm_decode() {
        let confirm = DataConfirm::decode(&[0x09, 0xE9, 0x78, 0x56, 0x34, 0x12]).unwrap();
        assert_eq!(confirm.msdu_handle, 9);
        assert_eq!(confirm.status, Status::NoAck);
        assert_eq!(confirm.timestamp, 0x1234_5678);
        assert_eq!(DataConfirm::decode(&[0x09]), Err(FrameError::Truncated));
    }

    #[test]
    fn test_data_indication_decode() {
        let indication = DataIndication {
            src_addr: Address::Short(0x0001),
            src_pan_id: 0x0F0F,
            dst_addr: Address::Extended(0xAABB_CCDD_EEFF_0011),
            dst_pan_id: 0x0F0F,
            link_quality: 200,
            dsn: 0x42,
            timestamp: 1000,
            security_level: 0,
            msdu: &[1, 2, 3, 4],
        };
        let packet = indication.to_packet().unwrap();
        assert!(packet.is(OG_MCPS_NWK, mcps::DATA_INDICATION));
        assert_eq!(packet.payload().len(), DATA_INDICATION_FIXED_LEN + 4);
        assert_eq!(DataIndication::decode(packet.payload()), Ok(indication));
    }

    #[test]
    fn test_data_indication_short_msdu() {
        let mut payload = [0u8; DATA_INDICATION_FIXED_LEN + 2];
        // msdu length claims more than is present
        payload[22] = 10;
        assert_eq!(DataIndication::decode(&payload), Err(FrameError::Truncated));
    }

    #[test]
    fn test_data_indication_reserved_mode() {
        let mut payload = [0u8; DATA_INDICATION_FIXED_LEN];
        payload[10] = AddressMode::Reserved.bits();
        assert_eq!(
            DataIndication::decode(&payload),
            Err(FrameError::ReservedAddressMode)
        );
    }

    #[test]
    fn test_tx_options() {
        let mut opts = TxOptions::NONE;
        opts |= TxOptions::ACK;
        assert!(opts.contains(TxOptions::ACK));
        assert!(!opts.contains(TxOptions::INDIRECT));
    }
}
