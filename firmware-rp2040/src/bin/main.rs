#![no_std]
#![no_main]

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use embassy_time::Timer;
use fsci_proto::{Address, FrameControl, LinkFrame, BROADCAST_ADDRESS, FSCI_BAUDRATE, MAX_FRAME_LEN};
use fsci_radio::{Error, FsciRadio, FsciReceiver};
use fsci_radio_rp2040::{ChannelRx, FsciUartRx, FsciUartTx, RxFrame, RX_QUEUE_DEPTH};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => embassy_rp::uart::InterruptHandler<UART0>;
});

type Radio = FsciRadio<CriticalSectionRawMutex, FsciUartTx<'static>>;

/// Radio configuration applied at startup.
const CHANNEL: u8 = 15;
const PAN_ID: u16 = 0xABCD;
const SHORT_ADDRESS: u16 = 0x0001;
const TX_POWER_DBM: i8 = 0;

/// Pause after a UART error before the receive pump restarts.
const RESYNC_DELAY_MS: u64 = 10;

static RADIO: StaticCell<Radio> = StaticCell::new();

/// Received frames, rx task to net task.
static RX_FRAMES: Channel<CriticalSectionRawMutex, RxFrame, RX_QUEUE_DEPTH> = Channel::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("FSCI radio host starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = FSCI_BAUDRATE;

    let uart = Uart::new(
        p.UART0,
        p.PIN_0, // TX
        p.PIN_1, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();

    let radio: &'static Radio = RADIO.init(FsciRadio::new(FsciUartTx::new(tx)));
    let led = Output::new(p.PIN_25, Level::Low);

    // The receive pump must run before the first request can complete
    spawner.spawn(rx_task(FsciUartRx::new(rx), radio).unwrap());
    spawner.spawn(net_task(RX_FRAMES.receiver(), led).unwrap());

    if let Err(e) = configure(radio).await {
        error!("Radio setup failed: {:?} (errno {})", e, e.errno());
        return;
    }
    info!(
        "Radio up on channel {} PAN {:#x} address {:#x}",
        radio.channel(),
        radio.pan_id(),
        radio.short_address()
    );

    let mut sequence: u8 = 0;
    loop {
        Timer::after_secs(5).await;
        if let Err(e) = send_hello(radio, sequence).await {
            warn!("Transmit failed: {:?}", e);
        }
        sequence = sequence.wrapping_add(1);
    }
}

async fn configure(radio: &Radio) -> Result<(), Error> {
    radio.init().await?;
    radio.set_channel(CHANNEL).await?;
    radio.set_pan_id(PAN_ID).await?;
    radio.set_short_address(SHORT_ADDRESS).await?;
    radio.set_tx_power(TX_POWER_DBM).await?;
    radio.start().await
}

/// Broadcast a short data frame from our short address.
async fn send_hello(radio: &Radio, sequence: u8) -> Result<(), Error> {
    let frame = LinkFrame {
        frame_control: FrameControl::data(),
        sequence,
        dst_pan_id: Some(radio.pan_id()),
        dst_addr: Address::Short(BROADCAST_ADDRESS),
        src_pan_id: Some(radio.pan_id()),
        src_addr: Address::Short(radio.short_address()),
        payload: b"hello",
    };
    let mut buf = [0u8; MAX_FRAME_LEN];
    let len = frame.write(&mut buf).map_err(|_| Error::InvalidParameter)?;
    radio.transmit(&buf[..len]).await
}

/// Rx task - pumps co-processor bytes into the driver.
#[embassy_executor::task]
async fn rx_task(mut uart: FsciUartRx<'static>, radio: &'static Radio) {
    let mut receiver = FsciReceiver::new();
    let mut net = ChannelRx::new(RX_FRAMES.sender());
    loop {
        let e = receiver.run(&mut uart, radio, &mut net).await;
        error!("FSCI receive error: {:?}, resyncing", e);
        Timer::after_millis(RESYNC_DELAY_MS).await;
        receiver = FsciReceiver::new();
    }
}

/// Net task - stands in for the network stack and logs every frame.
#[embassy_executor::task]
async fn net_task(
    frames: Receiver<'static, CriticalSectionRawMutex, RxFrame, RX_QUEUE_DEPTH>,
    mut led: Output<'static>,
) {
    loop {
        let frame = frames.receive().await;
        led.toggle();
        match LinkFrame::parse(frame.frame()) {
            Ok(link) => info!(
                "Frame seq {} from {:?} lqi {}: {=[u8]:x}",
                link.sequence,
                link.src_addr,
                frame.lqi,
                link.payload
            ),
            Err(e) => warn!("Unparseable frame: {:?}", e),
        }
    }
}
