//! RP2040 host for an FSCI IEEE 802.15.4 MAC co-processor.
//!
//! The co-processor runs the 802.15.4 MAC and exposes it over UART as FSCI
//! MLME/MCPS primitives; this firmware drives it through [`fsci_radio`].
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART0 TX | 0    | FSCI requests to the co-processor |
//! | UART0 RX | 1    | FSCI responses and indications |
//! | LED      | 25   | On-board LED (toggles per received frame) |
//!
//! # Architecture
//!
//! - **Main Task**: Configures the radio, then transmits a frame periodically
//! - **Rx Task**: Pumps UART bytes through [`FsciReceiver`](fsci_radio::FsciReceiver)
//! - **Net Task**: Drains received frames from a [`Channel`](embassy_sync::channel::Channel)
//!
//! # Modules
//!
//! - [`uart`]: `embedded-io-async` adapters over the DMA UART halves
//! - [`net`]: network stack stand-in ([`ChannelRx`], [`RxFrame`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

pub mod net;
pub mod uart;

pub use net::{ChannelRx, RxFrame, RX_QUEUE_DEPTH};
pub use uart::{FsciUartRx, FsciUartTx, UartIoError};
