//! HID report types for the USB mouse endpoint.

pub mod mouse;

pub use mouse::{MouseReport, MOUSE_REPORT_DESCRIPTOR, MOUSE_REPORT_ID, MOUSE_REPORT_SIZE};
