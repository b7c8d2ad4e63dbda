//! UART receive pump and frame dispatch.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_io_async::Read;
use fsci_proto::opcodes::mcps;
use fsci_proto::{FsciParser, ParseError, OG_MCPS_NWK};

use crate::error::Error;
use crate::radio::FsciRadio;
use crate::rx::RadioRx;

/// Bytes pulled from the UART per read.
const READ_CHUNK: usize = 32;

/// Receive half of the FSCI link.
///
/// Data indications go to the radio's receive path; every other completed
/// frame is taken as the response to the outstanding request.
pub struct FsciReceiver {
    parser: FsciParser,
}

impl FsciReceiver {
    pub const fn new() -> Self {
        Self {
            parser: FsciParser::new(),
        }
    }

    /// Process one received byte.
    pub fn feed<M: RawMutex, W, R: RadioRx>(
        &mut self,
        radio: &FsciRadio<M, W>,
        byte: u8,
        rx: &mut R,
    ) {
        let packet = match self.parser.push_byte(byte) {
            Ok(Some(packet)) => packet,
            Ok(None) => return,
            Err(ParseError::LengthOverflow { declared }) => {
                warn!("FSCI frame length {} exceeds buffer, truncating", declared);
                return;
            }
        };

        if !packet.checksum_valid() {
            warn!(
                "FSCI checksum mismatch: got {}, expected {}",
                packet.checksum(),
                packet.compute_checksum()
            );
        }

        if packet.is(OG_MCPS_NWK, mcps::DATA_INDICATION) {
            radio.handle_indication(packet, rx);
        } else {
            radio.fsci().complete(packet);
        }
    }

    /// Pump bytes from `uart` until it fails.
    ///
    /// Only returns on a read error or end of stream, both reported as
    /// [`Error::Io`].
    pub async fn run<U: Read, M: RawMutex, W, R: RadioRx>(
        &mut self,
        uart: &mut U,
        radio: &FsciRadio<M, W>,
        rx: &mut R,
    ) -> Error {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match uart.read(&mut buf).await {
                Ok(0) => {
                    error!("FSCI UART closed");
                    return Error::Io;
                }
                Ok(n) => {
                    for &byte in &buf[..n] {
                        self.feed(radio, byte, rx);
                    }
                }
                Err(_) => {
                    error!("FSCI UART read failed");
                    return Error::Io;
                }
            }
        }
    }
}

impl Default for FsciReceiver {
    fn default() -> Self {
        Self::new()
    }
}
