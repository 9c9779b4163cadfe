//! USB HID mouse report with 16-bit displacement fields.
//!
//! Layout (7 bytes):
//! ```text
//! Byte 0:   Report ID (always MOUSE_REPORT_ID)
//! Byte 1:   Button bitfield
//!           Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle
//! Byte 2-3: X displacement (signed, little-endian)
//! Byte 4-5: Y displacement (signed, little-endian)
//! Byte 6:   Scroll wheel (signed)
//! ```

use crate::sensor::Deltas;

/// Report ID carried in byte 0 of every mouse report.
pub const MOUSE_REPORT_ID: u8 = 0x02;

/// Mouse report size in bytes.
pub const MOUSE_REPORT_SIZE: usize = 7;

/// Wide-range HID mouse report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Report identifier.
    pub id: u8,
    /// Button bitfield (bit 0 = left, bit 1 = right, bit 2 = middle).
    pub buttons: u8,
    /// Relative X movement (signed).
    pub x: i16,
    /// Relative Y movement (signed).
    pub y: i16,
    /// Scroll wheel delta (signed).
    pub wheel: i8,
}

impl MouseReport {
    /// Create an all-zero report (no ID, no movement, no buttons).
    pub const fn empty() -> Self {
        Self {
            id: 0,
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
        }
    }

    /// Build a report from accumulated sensor deltas.
    ///
    /// Starts from a fully zeroed value so fields not set here can never
    /// carry stale data, then stamps the report ID and the delta pair.
    /// No clamping or scaling; resolution mapping is the sensor's job.
    pub fn from_deltas(deltas: Deltas) -> Self {
        let mut report = Self::empty();
        report.id = MOUSE_REPORT_ID;
        report.x = deltas.dx;
        report.y = deltas.dy;
        report
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (always 7), or 0 if the buffer
    /// is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.id;
        buf[1] = self.buttons;
        buf[2..4].copy_from_slice(&self.x.to_le_bytes());
        buf[4..6].copy_from_slice(&self.y.to_le_bytes());
        buf[6] = self.wheel as u8;
        MOUSE_REPORT_SIZE
    }
}

/// USB HID Report Descriptor for a 3-button mouse with 16-bit X/Y and a
/// scroll wheel, reported under `MOUSE_REPORT_ID`.
pub const MOUSE_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x85, MOUSE_REPORT_ID, //   Report ID
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    //
    //   - Buttons (3 bits + 5 padding) -
    0x05, 0x09, //     Usage Page (Buttons)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x03, //     Usage Maximum (Button 3)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x03, //     Report Count (3)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x05, //     Report Size (5)
    0x81, 0x01, //     Input (Constant) - padding
    //
    //   - X, Y displacement (16-bit) -
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x16, 0x01, 0x80, //  Logical Minimum (-32767)
    0x26, 0xFF, 0x7F, //  Logical Maximum (32767)
    0x75, 0x10, //     Report Size (16)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    //   - Scroll wheel -
    0x09, 0x38, //     Usage (Wheel)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    0xC0, //   End Collection (Physical)
    0xC0, // End Collection (Application)
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_deltas_sets_id_and_deltas_only() {
        let report = MouseReport::from_deltas(Deltas { dx: 3, dy: -2 });
        assert_eq!(report.id, MOUSE_REPORT_ID);
        assert_eq!(report.x, 3);
        assert_eq!(report.y, -2);
        assert_eq!(report.buttons, 0);
        assert_eq!(report.wheel, 0);
    }

    #[test]
    fn from_deltas_zero_motion_is_zero_report_plus_id() {
        let report = MouseReport::from_deltas(Deltas::default());
        let mut buf = [0xFFu8; MOUSE_REPORT_SIZE];
        assert_eq!(report.serialize(&mut buf), MOUSE_REPORT_SIZE);
        assert_eq!(buf, [MOUSE_REPORT_ID, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn serialize_little_endian_layout() {
        let report = MouseReport {
            id: MOUSE_REPORT_ID,
            buttons: 0x05,
            x: -260,
            y: 300,
            wheel: -1,
        };
        let mut buf = [0u8; MOUSE_REPORT_SIZE];
        assert_eq!(report.serialize(&mut buf), MOUSE_REPORT_SIZE);
        assert_eq!(buf[0], MOUSE_REPORT_ID);
        assert_eq!(buf[1], 0x05);
        assert_eq!(i16::from_le_bytes([buf[2], buf[3]]), -260);
        assert_eq!(i16::from_le_bytes([buf[4], buf[5]]), 300);
        assert_eq!(buf[6] as i8, -1);
    }

    #[test]
    fn serialize_buffer_too_small() {
        let report = MouseReport::empty();
        let mut buf = [0u8; 4];
        assert_eq!(report.serialize(&mut buf), 0);
    }

    #[test]
    fn descriptor_carries_report_id() {
        // Report ID item: 0x85, id.
        let found = MOUSE_REPORT_DESCRIPTOR
            .windows(2)
            .any(|w| w == [0x85, MOUSE_REPORT_ID]);
        assert!(found);
    }
}
