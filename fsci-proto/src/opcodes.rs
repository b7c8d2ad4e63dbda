//! FSCI operation groups and codes understood by the MAC co-processor.

/// Host to MLME requests.
pub const OG_NWK_MLME: u8 = 0x85;

/// MLME confirms and indications to the host.
pub const OG_MLME_NWK: u8 = 0x84;

/// Host to MCPS requests.
pub const OG_NWK_MCPS: u8 = 0x87;

/// MCPS confirms and indications to the host.
pub const OG_MCPS_NWK: u8 = 0x86;

/// MLME operation codes (requests and their confirms share a code).
pub mod mlme {
    pub const ASSOCIATE: u8 = 0x00;
    pub const ASSOCIATE_RESPONSE: u8 = 0x01;
    pub const DISASSOCIATE: u8 = 0x02;
    pub const GET: u8 = 0x03;
    pub const GTS: u8 = 0x04;
    pub const ORPHAN_RESPONSE: u8 = 0x05;
    pub const RESET: u8 = 0x06;
    pub const RX_ENABLE: u8 = 0x07;
    pub const SCAN: u8 = 0x08;
    pub const SET: u8 = 0x09;
    pub const START: u8 = 0x0A;
    pub const SYNC: u8 = 0x0B;
    pub const POLL: u8 = 0x0C;
}

/// MCPS operation codes.
pub mod mcps {
    /// NWK to MCPS data request.
    pub const DATA_REQUEST: u8 = 0x00;
    /// NWK to MCPS purge request.
    pub const PURGE_REQUEST: u8 = 0x01;

    /// MCPS to NWK data confirm.
    pub const DATA_CONFIRM: u8 = 0x00;
    /// MCPS to NWK data indication, sent unsolicited for every received frame.
    pub const DATA_INDICATION: u8 = 0x01;
    /// MCPS to NWK purge confirm.
    pub const PURGE_CONFIRM: u8 = 0x02;
}
