//! Host test doubles for the UART halves and the network stack.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_futures::yield_now;
use embedded_io_async::{ErrorKind, ErrorType, Read, Write};
use fsci_proto::MAX_FRAME_LEN;

use crate::rx::RadioRx;

pub type RawMutexImpl = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Transmit half of a UART that records everything written to it.
///
/// Every write yields once so concurrent requesters get a chance to run.
#[derive(Clone, Default)]
pub struct MockWire {
    written: Rc<RefCell<Vec<u8>>>,
    fail: Rc<Cell<bool>>,
}

impl MockWire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) -> Vec<u8> {
        self.written.borrow().clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl ErrorType for MockWire {
    type Error = ErrorKind;
}

impl Write for MockWire {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        yield_now().await;
        if self.fail.get() {
            return Err(ErrorKind::BrokenPipe);
        }
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Network stack that keeps every delivered frame.
#[derive(Default)]
pub struct RecordingRx {
    pub frames: Vec<(Vec<u8>, u8)>,
    pub acks: Vec<Vec<u8>>,
    pub consume_acks: bool,
    pub out_of_buffers: bool,
    pub reject: bool,
    pub released: usize,
}

impl RadioRx for RecordingRx {
    type Packet = Vec<u8>;

    fn alloc_rx(&mut self) -> Option<Self::Packet> {
        (!self.out_of_buffers).then(|| vec![0u8; MAX_FRAME_LEN])
    }

    fn handle_ack(&mut self, frame: &[u8], _lqi: u8) -> bool {
        if self.consume_acks {
            self.acks.push(frame.to_vec());
        }
        self.consume_acks
    }

    fn receive(&mut self, mut packet: Self::Packet, len: usize, lqi: u8) -> Result<(), Self::Packet> {
        if self.reject {
            self.released += 1;
            return Err(packet);
        }
        packet.truncate(len);
        self.frames.push((packet, lqi));
        Ok(())
    }
}

/// Receive half of a UART that replays fixed chunks, then fails.
pub struct ScriptedUart {
    chunks: VecDeque<Vec<u8>>,
}

impl ScriptedUart {
    pub fn new(chunks: &[&[u8]]) -> Self {
        Self {
            chunks: chunks.iter().map(|chunk| chunk.to_vec()).collect(),
        }
    }
}

impl ErrorType for ScriptedUart {
    type Error = ErrorKind;
}

impl Read for ScriptedUart {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        yield_now().await;
        let Some(mut chunk) = self.chunks.pop_front() else {
            return Err(ErrorKind::Other);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.chunks.push_front(chunk.split_off(n));
        }
        Ok(n)
    }
}
