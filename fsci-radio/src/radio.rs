//! IEEE 802.15.4 radio driver API.
//!
//! Every operation is a proxied MAC primitive: configuration goes out as
//! MLME-SET, transmission as MCPS-DATA, and received frames come back as
//! unsolicited MCPS-DATA indications routed here by the
//! [`FsciReceiver`](crate::FsciReceiver).

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embedded_io_async::Write;
use fsci_proto::tx_power::level_for_dbm;
use fsci_proto::{
    mlme, DataConfirm, DataIndication, FsciPacket, PibAttribute, BROADCAST_ADDRESS,
    BROADCAST_PAN_ID,
};

use crate::error::Error;
use crate::fsci::Fsci;
use crate::rx::RadioRx;
use crate::translate;

/// Lowest 2.4 GHz O-QPSK channel.
pub const CHANNEL_MIN: u8 = 11;

/// Highest 2.4 GHz O-QPSK channel.
pub const CHANNEL_MAX: u8 = 26;

/// Runtime view of the co-processor MAC configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    pub channel: u8,
    pub pan_id: u16,
    pub short_address: u16,
    pub extended_address: u64,
    /// Requested output power in dBm.
    pub tx_power: i8,
    /// Link quality of the last frame delivered to the network stack.
    pub lqi: u8,
    pub rx_on: bool,
    msdu_handle: u8,
}

impl DeviceState {
    /// State of a freshly reset MAC.
    pub const INIT: Self = Self {
        channel: CHANNEL_MIN,
        pan_id: BROADCAST_PAN_ID,
        short_address: BROADCAST_ADDRESS,
        extended_address: 0,
        tx_power: 0,
        lqi: 0,
        rx_on: false,
        msdu_handle: 0,
    };
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::INIT
    }
}

/// Radio backed by an FSCI MAC co-processor.
pub struct FsciRadio<M: RawMutex, W> {
    fsci: Fsci<M, W>,
    state: BlockingMutex<M, Cell<DeviceState>>,
}

impl<M: RawMutex, W> FsciRadio<M, W> {
    /// Create a driver writing requests to `tx`.
    pub const fn new(tx: W) -> Self {
        Self {
            fsci: Fsci::new(tx),
            state: BlockingMutex::new(Cell::new(DeviceState::INIT)),
        }
    }

    /// Underlying command channel.
    pub fn fsci(&self) -> &Fsci<M, W> {
        &self.fsci
    }

    /// Snapshot of the runtime state.
    pub fn state(&self) -> DeviceState {
        self.state.lock(Cell::get)
    }

    pub fn channel(&self) -> u8 {
        self.state().channel
    }

    pub fn pan_id(&self) -> u16 {
        self.state().pan_id
    }

    pub fn short_address(&self) -> u16 {
        self.state().short_address
    }

    pub fn extended_address(&self) -> u64 {
        self.state().extended_address
    }

    pub fn tx_power(&self) -> i8 {
        self.state().tx_power
    }

    /// Link quality of the last received frame.
    pub fn last_lqi(&self) -> u8 {
        self.state().lqi
    }

    /// Clear channel assessment. The co-processor runs CSMA-CA itself, so the
    /// channel is always reported clear.
    pub fn cca(&self) -> Result<(), Error> {
        Ok(())
    }

    fn update_state(&self, f: impl FnOnce(&mut DeviceState)) {
        self.state.lock(|cell| {
            let mut state = cell.get();
            f(&mut state);
            cell.set(state);
        });
    }

    fn next_msdu_handle(&self) -> u8 {
        self.state.lock(|cell| {
            let mut state = cell.get();
            let handle = state.msdu_handle;
            state.msdu_handle = handle.wrapping_add(1);
            cell.set(state);
            handle
        })
    }

    /// Deliver an MCPS-DATA indication to the network stack.
    pub(crate) fn handle_indication<R: RadioRx>(&self, packet: &FsciPacket, rx: &mut R) {
        let indication = match DataIndication::decode(packet.payload()) {
            Ok(indication) => indication,
            Err(e) => {
                warn!("malformed data indication: {:?}", e);
                return;
            }
        };

        if indication.security_level != 0 {
            warn!(
                "secured frame (level {}) from {:?} dropped",
                indication.security_level, indication.src_addr
            );
            return;
        }

        let Some(mut buf) = rx.alloc_rx() else {
            warn!("no rx buffer, frame dropped");
            return;
        };
        let len = match translate::frame_from_indication(&indication, buf.as_mut()) {
            Ok(len) => len,
            Err(e) => {
                warn!("cannot rebuild received frame: {:?}", e);
                return;
            }
        };

        let lqi = indication.link_quality;
        if rx.handle_ack(&buf.as_mut()[..len], lqi) {
            return;
        }
        if rx.receive(buf, len, lqi).is_err() {
            debug!("network stack rejected frame");
        }
        self.update_state(|state| state.lqi = lqi);
    }
}

impl<M: RawMutex, W: Write> FsciRadio<M, W> {
    /// Reset the co-processor MAC, restoring default PIB values.
    pub async fn init(&self) -> Result<(), Error> {
        let response = self.fsci.request(&mlme::reset_request(true)).await?;
        expect_success(&response, "MLME-RESET")?;
        self.state.lock(|cell| cell.set(DeviceState::INIT));
        info!("FSCI co-processor reset");
        Ok(())
    }

    /// Turn the receiver on while idle.
    pub async fn start(&self) -> Result<(), Error> {
        self.set_pib(PibAttribute::RxOnWhenIdle, &[1]).await?;
        self.update_state(|state| state.rx_on = true);
        Ok(())
    }

    /// Turn the receiver off while idle.
    pub async fn stop(&self) -> Result<(), Error> {
        self.set_pib(PibAttribute::RxOnWhenIdle, &[0]).await?;
        self.update_state(|state| state.rx_on = false);
        Ok(())
    }

    /// Tune to `channel`, which must lie in [`CHANNEL_MIN`]..=[`CHANNEL_MAX`].
    pub async fn set_channel(&self, channel: u8) -> Result<(), Error> {
        if !(CHANNEL_MIN..=CHANNEL_MAX).contains(&channel) {
            warn!("channel {} out of range", channel);
            return Err(Error::InvalidParameter);
        }
        self.set_pib(PibAttribute::LogicalChannel, &[channel]).await?;
        self.update_state(|state| state.channel = channel);
        Ok(())
    }

    pub async fn set_pan_id(&self, pan_id: u16) -> Result<(), Error> {
        self.set_pib(PibAttribute::PanId, &pan_id.to_le_bytes()).await?;
        self.update_state(|state| state.pan_id = pan_id);
        Ok(())
    }

    pub async fn set_short_address(&self, short_address: u16) -> Result<(), Error> {
        self.set_pib(PibAttribute::ShortAddress, &short_address.to_le_bytes())
            .await?;
        self.update_state(|state| state.short_address = short_address);
        Ok(())
    }

    pub async fn set_extended_address(&self, extended_address: u64) -> Result<(), Error> {
        self.set_pib(
            PibAttribute::ExtendedAddress,
            &extended_address.to_le_bytes(),
        )
        .await?;
        self.update_state(|state| state.extended_address = extended_address);
        Ok(())
    }

    /// Set the output power. Values between supported levels round down.
    pub async fn set_tx_power(&self, dbm: i8) -> Result<(), Error> {
        self.set_pib(PibAttribute::TxPower, &[level_for_dbm(dbm)])
            .await?;
        self.update_state(|state| state.tx_power = dbm);
        Ok(())
    }

    /// Transmit a MAC frame (without FCS).
    ///
    /// The co-processor handles CSMA-CA and retransmission; any status other
    /// than success is reported as [`Error::Io`].
    pub async fn transmit(&self, frame: &[u8]) -> Result<(), Error> {
        let request = translate::data_request_from_frame(frame, self.next_msdu_handle())?;
        let packet = request.to_packet().map_err(|e| {
            warn!("frame does not fit a data request: {:?}", e);
            Error::InvalidParameter
        })?;

        let response = self.fsci.request(&packet).await?;
        let confirm = DataConfirm::decode(response.payload()).map_err(|e| {
            warn!("malformed data confirm: {:?}", e);
            Error::Io
        })?;
        if !confirm.status.is_success() {
            warn!(
                "MCPS-DATA handle {} failed: {:?}",
                confirm.msdu_handle, confirm.status
            );
            return Err(Error::Io);
        }
        Ok(())
    }

    async fn set_pib(&self, attribute: PibAttribute, value: &[u8]) -> Result<(), Error> {
        let request =
            mlme::set_request(attribute, value).map_err(|_| Error::InvalidParameter)?;
        let response = self.fsci.request(&request).await?;
        expect_success(&response, "MLME-SET")
    }
}

fn expect_success(response: &FsciPacket, primitive: &str) -> Result<(), Error> {
    match mlme::confirm_status(response) {
        Some(status) if status.is_success() => Ok(()),
        Some(status) => {
            warn!("{} failed: {:?}", primitive, status);
            Err(Error::Io)
        }
        None => {
            warn!("{} confirm carried no status", primitive);
            Err(Error::Io)
        }
    }
}
