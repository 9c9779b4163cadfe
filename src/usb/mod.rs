//! USB HID mouse device (embedded only).
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one HID mouse endpoint.  Reports travel from
//! the control loop to the endpoint through a static channel; channel
//! fullness doubles as the endpoint-readiness signal the loop polls.

use crate::config;
use crate::control::HidPort;
use crate::hid::{MOUSE_REPORT_DESCRIPTOR, MOUSE_REPORT_SIZE};
use crate::protocol::ProtocolConfig;
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Depth of the loop→endpoint report queue.
pub const REPORT_QUEUE_DEPTH: usize = 8;

/// Channel carrying serialised mouse reports to the writer task.
pub type ReportChannel =
    Channel<CriticalSectionRawMutex, [u8; MOUSE_REPORT_SIZE], REPORT_QUEUE_DEPTH>;

static MOUSE_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Build result containing the USB device runner and the mouse writer.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub mouse_writer: HidWriter<'static, UsbDriver, 8>,
}

/// Initialise the USB stack and create the HID mouse device.
///
/// The device name comes from the boot-time protocol configuration.
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD, protocol: &ProtocolConfig) -> UsbHidDevice {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(protocol.device_name());
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    // Build the USB device.
    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let mouse_state = MOUSE_STATE.init(State::new());
    let mouse_config = HidConfig {
        report_descriptor: MOUSE_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let mouse_writer = HidWriter::new(&mut builder, mouse_state, mouse_config);

    let device = builder.build();

    info!("USB HID mouse device initialised");

    UsbHidDevice {
        device,
        mouse_writer,
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Report forwarding task - drains the report channel into the mouse
/// HID endpoint.
pub async fn hid_writer_task(
    mut mouse: HidWriter<'static, UsbDriver, 8>,
    reports: &'static ReportChannel,
) -> ! {
    info!("HID writer task started - waiting for reports");

    loop {
        let buf = reports.receive().await;
        if mouse.write(&buf).await.is_err() {
            warn!("USB mouse write failed");
        }
    }
}

/// [`HidPort`] backed by the report channel.
///
/// The USB stack is serviced by its own task, so `service` is a no-op
/// here; readiness is free queue space.  Only one HID interface exists,
/// the interface index is accepted for contract parity and ignored.
pub struct ChannelHidPort {
    channel: &'static ReportChannel,
}

impl ChannelHidPort {
    pub fn new(channel: &'static ReportChannel) -> Self {
        Self { channel }
    }
}

impl HidPort for ChannelHidPort {
    fn service(&mut self) {}

    fn ready(&mut self, _interface: u8) -> bool {
        !self.channel.is_full()
    }

    fn submit(&mut self, _interface: u8, report: &[u8]) {
        let mut buf = [0u8; MOUSE_REPORT_SIZE];
        let len = report.len().min(MOUSE_REPORT_SIZE);
        buf[..len].copy_from_slice(&report[..len]);
        let _ = self.channel.try_send(buf);
    }
}
