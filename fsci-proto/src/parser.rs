//! Byte-at-a-time FSCI receive state machine.
//!
//! The parser is fed one octet per call, as delivered by the UART receive
//! path, and hands back a reference to its internal packet buffer each time a
//! CRC byte completes a frame. The buffer is reused for the next frame.
//!
//! A start marker seen mid-frame is ordinary data; only the SYNC state looks
//! for it.

use crate::packet::{FsciPacket, FSCI_MAX_PAYLOAD, FSCI_START_MARKER};

/// Parser condition reported alongside the byte that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Declared payload length exceeds [`FSCI_MAX_PAYLOAD`].
    ///
    /// Not fatal: the parser still consumes `declared + 1` bytes and keeps
    /// only the first [`FSCI_MAX_PAYLOAD`] payload bytes.
    LengthOverflow { declared: u8 },
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LengthOverflow { declared } => write!(
                f,
                "declared length {} exceeds payload capacity {}",
                declared, FSCI_MAX_PAYLOAD
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Sync,
    OpGroup,
    OpCode,
    Len,
    Payload,
    Crc,
}

/// FSCI frame parser.
pub struct FsciParser {
    state: ParserState,
    offset: usize,
    packet: FsciPacket,
}

impl FsciParser {
    /// Create a new parser waiting for a start marker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ParserState::Sync,
            offset: 0,
            packet: FsciPacket::new(0, 0),
        }
    }

    /// Drop any partial frame and wait for the next start marker.
    pub fn reset(&mut self) {
        self.state = ParserState::Sync;
        self.offset = 0;
    }

    /// True while no frame is in progress.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == ParserState::Sync
    }

    /// Feed a byte to the parser.
    ///
    /// Returns `Ok(Some(packet))` when this byte was the checksum closing a
    /// frame.
    pub fn push_byte(&mut self, byte: u8) -> Result<Option<&FsciPacket>, ParseError> {
        match self.state {
            ParserState::Sync => {
                if byte == FSCI_START_MARKER {
                    self.state = ParserState::OpGroup;
                }
            }
            ParserState::OpGroup => {
                self.packet.op_group = byte;
                self.state = ParserState::OpCode;
            }
            ParserState::OpCode => {
                self.packet.op_code = byte;
                self.state = ParserState::Len;
            }
            ParserState::Len => {
                self.packet.len = byte;
                self.offset = 0;
                self.state = if byte == 0 {
                    ParserState::Crc
                } else {
                    ParserState::Payload
                };
                if byte as usize > FSCI_MAX_PAYLOAD {
                    return Err(ParseError::LengthOverflow { declared: byte });
                }
            }
            ParserState::Payload => {
                if let Some(slot) = self.packet.payload.get_mut(self.offset) {
                    *slot = byte;
                }
                self.offset += 1;
                if self.offset >= self.packet.len as usize {
                    self.state = ParserState::Crc;
                }
            }
            ParserState::Crc => {
                self.packet.checksum = byte;
                self.state = ParserState::Sync;
                return Ok(Some(&self.packet));
            }
        }
        Ok(None)
    }
}

impl Default for FsciParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    /// Feed `bytes` and collect every completed packet.
    fn feed_all(parser: &mut FsciParser, bytes: &[u8]) -> Vec<FsciPacket> {
        let mut out = Vec::new();
        for &b in bytes {
            if let Ok(Some(packet)) = parser.push_byte(b) {
                out.push(packet.clone());
            }
        }
        out
    }

    #[test]
    fn test_reset_request_example() {
        let mut parser = FsciParser::new();
        let packets = feed_all(&mut parser, &[0x02, 0x85, 0x06, 0x01, 0x01, 0x83]);
        assert_eq!(packets.len(), 1);
        let packet = &packets[0];
        assert!(packet.is(0x85, 0x06));
        assert_eq!(packet.payload(), &[0x01]);
        assert_eq!(packet.checksum(), 0x83);
        assert!(packet.checksum_valid());
        assert!(parser.is_idle());
    }

    #[test]
    fn test_round_trip() {
        let cases: [(u8, u8, &[u8]); 4] = [
            (0x84, 0x09, &[0x00, 0x21, 0x00]),
            (0x86, 0x01, &[0x02; 64]),
            (0x85, 0x03, &[]),
            (0x87, 0x00, &[0x55; FSCI_MAX_PAYLOAD]),
        ];
        let mut parser = FsciParser::new();
        for (group, code, payload) in cases {
            let sent = FsciPacket::with_payload(group, code, payload).unwrap();
            let received = feed_all(&mut parser, &sent.to_bytes());
            assert_eq!(received.len(), 1);
            assert_eq!(received[0].op_group(), group);
            assert_eq!(received[0].op_code(), code);
            assert_eq!(received[0].payload(), payload);
            assert!(received[0].checksum_valid());
        }
    }

    #[test]
    fn test_resync_after_garbage() {
        let sent = FsciPacket::with_payload(0x84, 0x06, &[0x00]).unwrap();
        let mut stream = Vec::from([0x00u8, 0xFF, 0x13, 0x85, 0x7E]);
        stream.extend_from_slice(&sent.to_bytes());

        let mut parser = FsciParser::new();
        let received = feed_all(&mut parser, &stream);
        assert_eq!(received, [sent]);
    }

    #[test]
    fn test_sentinel_in_garbage_desynchronizes() {
        // A stray 0x02 starts a bogus frame: 0x10 becomes the op group, the real
        // marker becomes the op code and 0x85 (133) the declared length, so the
        // real packet is swallowed as payload.
        let sent = FsciPacket::with_payload(0x85, 0x06, &[0x01]).unwrap();
        let mut stream = Vec::from([0x55u8, FSCI_START_MARKER, 0x10]);
        stream.extend_from_slice(&sent.to_bytes());

        let mut parser = FsciParser::new();
        assert!(feed_all(&mut parser, &stream).is_empty());
        assert!(!parser.is_idle());

        // Four payload bytes are already in; 129 more plus the CRC close it.
        let filler = [0u8; 133 - 4 + 1];
        let bogus = feed_all(&mut parser, &filler);
        assert_eq!(bogus.len(), 1);
        assert_eq!(bogus[0].op_group(), 0x10);
        assert!(parser.is_idle());
        assert_eq!(feed_all(&mut parser, &sent.to_bytes()), [sent]);
    }

    #[test]
    fn test_oversize_length_consumed_and_truncated() {
        const EXCESS: usize = 20;
        let declared = (FSCI_MAX_PAYLOAD + EXCESS) as u8;
        let mut parser = FsciParser::new();

        for b in [FSCI_START_MARKER, 0x86, 0x01] {
            assert_eq!(parser.push_byte(b), Ok(None));
        }
        assert_eq!(
            parser.push_byte(declared),
            Err(ParseError::LengthOverflow { declared })
        );

        for i in 0..declared as usize {
            let byte = if i < FSCI_MAX_PAYLOAD { 0x11 } else { 0xEE };
            assert_eq!(parser.push_byte(byte), Ok(None));
        }
        let packet = parser.push_byte(0x00).unwrap().unwrap();
        assert!(packet.is_truncated());
        assert_eq!(packet.declared_len(), declared);
        assert_eq!(packet.payload().len(), FSCI_MAX_PAYLOAD);
        assert!(packet.payload().iter().all(|&b| b == 0x11));

        // Next frame parses normally.
        let sent = FsciPacket::with_payload(0x84, 0x09, &[0x00]).unwrap();
        assert_eq!(feed_all(&mut parser, &sent.to_bytes()), [sent]);
    }

    #[test]
    fn test_short_frame_after_long_frame_compares_equal() {
        let mut parser = FsciParser::new();
        let long = FsciPacket::with_payload(0x86, 0x01, &[0xA5; 48]).unwrap();
        assert_eq!(feed_all(&mut parser, &long.to_bytes()), [long.clone()]);

        let short = FsciPacket::with_payload(0x85, 0x06, &[0x01]).unwrap();
        let received = feed_all(&mut parser, &short.to_bytes());
        assert_eq!(received, [short.clone()]);
        assert_ne!(received[0], long);
        assert_ne!(short, FsciPacket::with_payload(0x85, 0x06, &[0x01, 0x00]).unwrap());
    }

    #[test]
    fn test_zero_length_goes_to_crc() {
        let mut parser = FsciParser::new();
        let received = feed_all(&mut parser, &[0x02, 0x85, 0x03, 0x00, 0x86]);
        assert_eq!(received.len(), 1);
        assert!(received[0].payload().is_empty());
        assert!(received[0].checksum_valid());
    }

    #[test]
    fn test_checksum_not_enforced() {
        let mut parser = FsciParser::new();
        let received = feed_all(&mut parser, &[0x02, 0x84, 0x06, 0x01, 0x00, 0xFF]);
        assert_eq!(received.len(), 1);
        assert!(!received[0].checksum_valid());
    }

    #[test]
    fn test_reset_drops_partial_frame() {
        let mut parser = FsciParser::new();
        assert!(feed_all(&mut parser, &[0x02, 0x84, 0x06]).is_empty());
        parser.reset();
        assert!(parser.is_idle());
        let sent = FsciPacket::with_payload(0x84, 0x06, &[0x00]).unwrap();
        assert_eq!(feed_all(&mut parser, &sent.to_bytes()), [sent]);
    }
}
