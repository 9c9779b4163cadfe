//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "spi2usb";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms). 1 ms = 1000 Hz for lowest latency.
pub const USB_HID_POLL_MS: u8 = 1;

/// HID interface index the mouse reports go out on.
pub const MOUSE_INTERFACE: u8 = 0;

// Protocol

/// Device name advertised through the vendor protocol and as the USB
/// product string.
pub const DEVICE_NAME: &str = "spi2usb Device";

// Sensor / GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Motion line (active low) → P0.08
//   SPI SCK                  → P0.13
//   SPI MOSI                 → P0.15
//   SPI MISO                 → P0.14
//   SPI CS                   → P0.16

/// SROM firmware blob uploaded to the sensor at bring-up.  Vendor blobs
/// are not redistributable; an empty slice skips the upload and runs the
/// sensor on its mask ROM.
pub const SENSOR_FIRMWARE_BLOB: &[u8] = &[];
