//! IEEE 802.15.4 radio driver for an FSCI MAC co-processor.
//!
//! The host keeps no MAC of its own. Every radio operation is proxied as an
//! MLME or MCPS primitive over a UART to a co-processor running the MAC, and
//! received frames come back as unsolicited data indications.
//!
//! # Overview
//!
//! - [`fsci`]: request/response engine, one command in flight ([`Fsci`])
//! - [`receiver`]: UART receive pump and frame dispatch ([`FsciReceiver`])
//! - [`translate`]: MAC frame to MCPS primitive conversion
//! - [`radio`]: driver API ([`FsciRadio`])
//! - [`rx`]: network stack receive trait ([`RadioRx`])
//!
//! # Wiring
//!
//! The radio owns the UART transmit half. The receive half is pumped by
//! [`FsciReceiver::run`] in its own task, sharing the radio by reference:
//!
//! ```ignore
//! let radio: &'static FsciRadio<CriticalSectionRawMutex, UartTx> = RADIO.init(FsciRadio::new(tx));
//! spawner.spawn(rx_task(uart_rx, radio, net_rx))?;
//! radio.init().await?;
//! radio.set_channel(15).await?;
//! radio.start().await?;
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt
//! - **`log`**: Log through the `log` facade

#![cfg_attr(not(any(test, feature = "std")), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod error;
pub mod fsci;
pub mod radio;
pub mod receiver;
pub mod rx;
pub mod translate;

#[cfg(test)]
mod testing;

pub use error::Error;
pub use fsci::Fsci;
pub use radio::{DeviceState, FsciRadio, CHANNEL_MAX, CHANNEL_MIN};
pub use receiver::FsciReceiver;
pub use rx::RadioRx;
