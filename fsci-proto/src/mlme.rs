//! MLME management primitives used to configure the co-processor MAC.

use crate::opcodes::{mlme, OG_NWK_MLME};
use crate::packet::{FsciPacket, PacketError};
use crate::status::Status;

/// MAC PIB attributes exposed by the co-processor firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PibAttribute {
    LogicalChannel = 0x21,
    TxPower = 0x22,
    PanId = 0x50,
    PromiscuousMode = 0x51,
    RxOnWhenIdle = 0x52,
    ShortAddress = 0x53,
    ExtendedAddress = 0x62,
}

/// MLME-RESET.request.
///
/// With `set_default_pib` the co-processor also restores every PIB attribute.
#[must_use]
pub fn reset_request(set_default_pib: bool) -> FsciPacket {
    let mut packet = FsciPacket::new(OG_NWK_MLME, mlme::RESET);
    packet.payload[0] = set_default_pib as u8;
    packet.len = 1;
    packet.checksum = packet.compute_checksum();
    packet
}

/// MLME-SET.request: attribute id, attribute index, then the raw value.
pub fn set_request(attribute: PibAttribute, value: &[u8]) -> Result<FsciPacket, PacketError> {
    FsciPacket::build(OG_NWK_MLME, mlme::SET, |w| {
        w.write_u8(attribute as u8)?;
        w.write_u8(0)?;
        w.write_slice(value)
    })
}

/// Status carried as the first payload byte of an MLME confirm.
///
/// `None` for an empty payload.
#[must_use]
pub fn confirm_status(response: &FsciPacket) -> Option<Status> {
    response.payload().first().copied().map(Status::from_u8)
}
