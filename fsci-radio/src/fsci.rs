//! Request/response engine.
//!
//! One command may be outstanding at a time. The transport mutex doubles as
//! the requester lock: it is held from the first byte written until the
//! response has been taken out of the signal, so concurrent callers queue up
//! behind it. The receive path completes the outstanding request through
//! [`Fsci::complete`].

use core::future::Future;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embedded_io_async::Write;
use fsci_proto::FsciPacket;
use portable_atomic::{AtomicBool, Ordering};

use crate::error::Error;

/// FSCI command channel to the co-processor.
pub struct Fsci<M: RawMutex, W> {
    tx: Mutex<M, W>,
    pending: AtomicBool,
    response: Signal<M, FsciPacket>,
}

impl<M: RawMutex, W> Fsci<M, W> {
    /// Wrap the transmit half of the co-processor transport.
    pub const fn new(tx: W) -> Self {
        Self {
            tx: Mutex::new(tx),
            pending: AtomicBool::new(false),
            response: Signal::new(),
        }
    }

    /// True while a request is waiting for its response.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Hand a received non-indication frame to the outstanding request.
    ///
    /// A frame that arrives with nothing outstanding is logged and dropped.
    pub(crate) fn complete(&self, packet: &FsciPacket) {
        if !self.pending.swap(false, Ordering::AcqRel) {
            debug!("unsolicited FSCI frame dropped: {:?}", packet);
            return;
        }
        self.response.signal(packet.clone());
    }
}

impl<M: RawMutex, W: Write> Fsci<M, W> {
    /// Send `packet` and wait for the co-processor's response.
    ///
    /// There is no timeout: if the co-processor never answers, neither does
    /// this future. Use [`Fsci::request_within`] to bound the wait.
    pub async fn request(&self, packet: &FsciPacket) -> Result<FsciPacket, Error> {
        let mut tx = self.tx.lock().await;
        self.send(&mut *tx, packet).await?;
        Ok(self.response.wait().await)
    }

    /// Like [`Fsci::request`], giving up with [`Error::Timeout`] once
    /// `deadline` resolves.
    ///
    /// A response arriving after the deadline is dropped as unsolicited.
    pub async fn request_within<D: Future>(
        &self,
        packet: &FsciPacket,
        deadline: D,
    ) -> Result<FsciPacket, Error> {
        let mut tx = self.tx.lock().await;
        self.send(&mut *tx, packet).await?;
        match select(self.response.wait(), deadline).await {
            Either::First(response) => Ok(response),
            Either::Second(_) => {
                self.pending.store(false, Ordering::Release);
                self.response.reset();
                warn!(
                    "FSCI request {:?}/{:?} timed out",
                    packet.op_group(),
                    packet.op_code()
                );
                Err(Error::Timeout)
            }
        }
    }

    async fn send(&self, tx: &mut W, packet: &FsciPacket) -> Result<(), Error> {
        // A late response from a previous timed-out request must not satisfy this one
        self.response.reset();
        self.pending.store(true, Ordering::Release);

        trace!("FSCI request: {:?}", packet);
        let bytes = packet.to_bytes();
        let written = match tx.write_all(&bytes).await {
            Ok(()) => tx.flush().await,
            Err(e) => Err(e),
        };
        if written.is_err() {
            self.pending.store(false, Ordering::Release);
            error!("FSCI transport write failed");
            return Err(Error::Io);
        }
        Ok(())
    }
}
