//! FSCI framing and IEEE 802.15.4 MAC primitive codecs.
//!
//! This crate provides the chip-agnostic half of an IEEE 802.15.4 radio driver
//! that proxies MAC commands over a UART to a co-processor speaking FSCI, the
//! Freescale/NXP Serial Communication Interface.
//!
//! # Features
//!
//! - Byte-at-a-time FSCI receive state machine ([`FsciParser`])
//! - FSCI packet construction and encoding ([`FsciPacket`])
//! - Zero-copy 802.15.4 MAC header parsing and writing ([`LinkFrame`])
//! - MCPS data and MLME management primitive codecs
//! - No chip-specific dependencies - works on any platform
//! - Fully testable on host
//!
//! # Example
//!
//! ```
//! use fsci_proto::{mlme, FsciParser};
//!
//! let request = mlme::reset_request(true);
//! assert_eq!(request.to_bytes().as_slice(), &[0x02, 0x85, 0x06, 0x01, 0x01, 0x83]);
//!
//! // Feed bytes from UART
//! let mut parser = FsciParser::new();
//! let mut completed = 0;
//! for byte in request.to_bytes() {
//!     if let Ok(Some(packet)) = parser.push_byte(byte) {
//!         assert!(packet.is(0x85, 0x06));
//!         completed += 1;
//!     }
//! }
//! assert_eq!(completed, 1);
//! ```
//!
//! # UART Configuration
//!
//! The co-processor FSCI interface commonly runs at 115200 baud, 8N1.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod cursor;
pub mod frame;
pub mod mcps;
pub mod mlme;
pub mod opcodes;
pub mod packet;
pub mod parser;
pub mod status;
pub mod tx_power;

pub use cursor::{ByteReader, ByteWriter, CursorError};
pub use frame::{
    Address, AddressMode, FrameControl, FrameError, FrameType, FrameVersion, LinkFrame,
    BROADCAST_ADDRESS, BROADCAST_PAN_ID, MAX_FRAME_LEN,
};
pub use mcps::{DataConfirm, DataIndication, DataRequest, TxOptions};
pub use mlme::PibAttribute;
pub use opcodes::{OG_MCPS_NWK, OG_MLME_NWK, OG_NWK_MCPS, OG_NWK_MLME};
pub use packet::{
    FsciPacket, PacketError, FSCI_HEADER_LEN, FSCI_MAX_FRAME_LEN, FSCI_MAX_PAYLOAD,
    FSCI_START_MARKER,
};
pub use parser::{FsciParser, ParseError};
pub use status::Status;

/// Default FSCI UART baud rate.
pub const FSCI_BAUDRATE: u32 = 115_200;
