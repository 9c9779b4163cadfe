//! Device-control core for spi2usb.
//!
//! Everything in this library is pure logic that runs identically on the
//! host and on target: the transport capability with its two bus
//! adapters, the PixArt sensor driver state machine, the mouse report
//! builder, the vendor protocol configuration, and the control loop that
//! ties them together.
//!
//! Usage: `cargo test` for the host test suite.
//!
//! The embedded binary (`src/main.rs`, `--features embedded`) wires these
//! pieces to the nRF52840 SPIM peripheral, a GPIO motion line, and an
//! embassy-usb HID endpoint.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod error;
pub mod hid;
pub mod protocol;
pub mod sensor;
pub mod transport;

#[cfg(feature = "embedded")]
pub mod usb;
