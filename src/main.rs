//! spi2usb embedded entry point (nRF52840).
//!
//! Boot sequence: HAL init, motion-line and SPI pin setup, sensor
//! bring-up (power-up reset + optional SROM upload), protocol
//! configuration, USB bring-up, then the control loop runs forever as an
//! Embassy task alongside the USB device and report writer tasks.

#![no_std]
#![no_main]

use defmt::{info, unwrap, warn};
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Instant, Timer};

use spi2usb::config;
use spi2usb::control::{ControlLoop, MotionLine, SensorSlot};
use spi2usb::protocol::{info as info_page, FunctionPage, ProtocolConfig};
use spi2usb::sensor::{PixartPmw, TickSource};
use spi2usb::transport::spi::{SpiBus, SpiTransport};
use spi2usb::usb::{self, ChannelHidPort, ReportChannel, UsbDriver};

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

/// Loop→endpoint report queue.
static REPORT_CHANNEL: ReportChannel = ReportChannel::new();

/// Function IDs advertised on the Info page.
static INFO_FUNCTIONS: &[u8] = &[
    info_page::VERSION,
    info_page::FW_INFO,
    info_page::SUPPORTED_FUNCTION_PAGES,
    info_page::SUPPORTED_FUNCTIONS,
];

/// Dedicated SPIM peripheral plus its chip-select line (active low).
struct BoardSpi {
    spim: Spim<'static, peripherals::SPI3>,
    cs: Output<'static>,
}

impl SpiBus for BoardSpi {
    fn select(&mut self, active: bool) {
        if active {
            self.cs.set_low();
        } else {
            self.cs.set_high();
        }
    }

    fn transfer_byte(&mut self, byte: u8) -> u8 {
        let mut rx = [0u8; 1];
        if self.spim.blocking_transfer(&mut rx, &[byte]).is_err() {
            warn!("SPI transfer failed");
        }
        rx[0]
    }
}

/// Monotonic milliseconds from the Embassy time driver.
struct EmbassyTicks;

impl TickSource for EmbassyTicks {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Active-low motion-indicator line.
struct NrfMotionLine(Input<'static>);

impl MotionLine for NrfMotionLine {
    fn asserted(&mut self) -> bool {
        self.0.is_low()
    }
}

#[embassy_executor::task]
async fn usb_device_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    usb::run_usb_device(device).await
}

#[embassy_executor::task]
async fn report_writer_task(
    writer: embassy_usb::class::hid::HidWriter<'static, UsbDriver, 8>,
) -> ! {
    usb::hid_writer_task(writer, &REPORT_CHANNEL).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("spi2usb starting");

    // Motion line: input with pull-up, sensor drives it low on motion.
    let motion_line = NrfMotionLine(Input::new(p.P0_08, Pull::Up));

    // Sensor SPI: mode 3, 2 MHz.
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M2;
    spi_config.mode = spim::MODE_3;
    let spim = Spim::new(p.SPI3, Irqs, p.P0_13, p.P0_14, p.P0_15, spi_config);
    let cs = Output::new(p.P0_16, Level::High, OutputDrive::Standard);
    let transport = SpiTransport::new(BoardSpi { spim, cs });

    // Sensor bring-up.  A board without a working sensor still enumerates
    // as a USB device; the loop just has nothing to report.
    let mut driver = PixartPmw::new(config::SENSOR_FIRMWARE_BLOB, transport, EmbassyTicks);
    let sensor = match driver.initialize() {
        Ok(()) => {
            info!("sensor initialised");
            SensorSlot::Present {
                driver,
                motion_line,
            }
        }
        Err(e) => {
            warn!("sensor bring-up failed: {}", e);
            SensorSlot::Absent
        }
    };

    // Boot-time protocol configuration, handed to the USB collaborator.
    let mut protocol = ProtocolConfig::new(config::DEVICE_NAME);
    protocol.set_functions(FunctionPage::Info, INFO_FUNCTIONS);

    let usb_dev = usb::init(p.USBD, &protocol);
    unwrap!(spawner.spawn(usb_device_task(usb_dev.device)));
    unwrap!(spawner.spawn(report_writer_task(usb_dev.mouse_writer)));

    let mut control = ControlLoop::new(sensor, ChannelHidPort::new(&REPORT_CHANNEL));
    loop {
        control.step();
        // Yield so the USB tasks get scheduled; 125 us keeps the motion
        // poll rate well above the 1 ms HID interval.
        Timer::after_micros(125).await;
    }
}
