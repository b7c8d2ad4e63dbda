//! UART halves as `embedded-io-async` streams for the FSCI driver.
//!
//! # Pins
//!
//! Uses UART0 by default:
//! - GPIO 0: TX
//! - GPIO 1: RX

use embassy_rp::uart::{Async, Error as UartError, UartRx, UartTx};
use embedded_io_async::{ErrorKind, ErrorType, Read, Write};

/// UART failure surfaced through `embedded-io`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct UartIoError(pub UartError);

impl embedded_io_async::Error for UartIoError {
    fn kind(&self) -> ErrorKind {
        match self.0 {
            UartError::Framing | UartError::Parity => ErrorKind::InvalidData,
            _ => ErrorKind::Other,
        }
    }
}

/// Transmit half carrying FSCI requests.
pub struct FsciUartTx<'d> {
    tx: UartTx<'d, Async>,
}

impl<'d> FsciUartTx<'d> {
    #[must_use]
    pub fn new(tx: UartTx<'d, Async>) -> Self {
        Self { tx }
    }
}

impl ErrorType for FsciUartTx<'_> {
    type Error = UartIoError;
}

impl Write for FsciUartTx<'_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.tx.write(buf).await.map_err(UartIoError)?;
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Receive half feeding the FSCI parser.
///
/// Reads one byte per call: a DMA read only completes once its whole buffer
/// is filled, and FSCI frames have no fixed size.
pub struct FsciUartRx<'d> {
    rx: UartRx<'d, Async>,
}

impl<'d> FsciUartRx<'d> {
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self { rx }
    }
}

impl ErrorType for FsciUartRx<'_> {
    type Error = UartIoError;
}

impl Read for FsciUartRx<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let Some(first) = buf.first_mut() else {
            return Ok(0);
        };
        let mut byte = [0u8; 1];
        self.rx.read(&mut byte).await.map_err(UartIoError)?;
        *first = byte[0];
        Ok(1)
    }
}
