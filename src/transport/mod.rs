//! Serial transport capability shared by all sensor wirings.
//!
//! A motion sensor may hang off a dedicated SPI peripheral or share a
//! Quad-SPI controller with other devices.  The driver above must not care
//! which: it sees one capability with two operations, bound once at boot
//! and never rebound.  Adding a new bus kind means adding one more adapter
//! implementing [`Transport`], not touching the sensor driver or the loop.

pub mod qspi;
pub mod spi;

pub use qspi::QspiTransport;
pub use spi::SpiTransport;

/// Register-address write bit for PixArt-style SPI devices.
const REG_WRITE_BIT: u8 = 0x80;

/// One bound serial transport: a chip-select line plus a full-duplex
/// byte-exchange primitive.
///
/// Contract:
/// - `select(true)` must be asserted before any `transfer` and released
///   with `select(false)` afterwards.  Redundant calls are harmless.
/// - `transfer` assumes the bus clock and mode were configured when the
///   underlying bus was initialised; it completes synchronously.
pub trait Transport {
    /// Assert (`true`) or release (`false`) chip-select for the bound device.
    fn select(&mut self, active: bool);

    /// Exchange one byte on the bus, returning the byte clocked in.
    fn transfer(&mut self, byte: u8) -> u8;
}

/// Read a single device register: address phase, then a dummy byte to
/// clock the value out.  Caller frames the access with `select`.
pub fn read_reg<T: Transport>(t: &mut T, addr: u8) -> u8 {
    t.transfer(addr & !REG_WRITE_BIT);
    t.transfer(0x00)
}

/// Write a single device register: address with the write bit, then data.
/// Caller frames the access with `select`.
pub fn write_reg<T: Transport>(t: &mut T, addr: u8, value: u8) {
    t.transfer(addr | REG_WRITE_BIT);
    t.transfer(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LogTransport {
        selects: std::vec::Vec<bool>,
        sent: std::vec::Vec<u8>,
        reply: u8,
    }

    impl Transport for LogTransport {
        fn select(&mut self, active: bool) {
            self.selects.push(active);
        }

        fn transfer(&mut self, byte: u8) -> u8 {
            self.sent.push(byte);
            self.reply
        }
    }

    #[test]
    fn read_reg_masks_write_bit_and_clocks_dummy() {
        let mut t = LogTransport {
            selects: Vec::new(),
            sent: Vec::new(),
            reply: 0xA5,
        };
        let value = read_reg(&mut t, 0x82);
        assert_eq!(value, 0xA5);
        assert_eq!(t.sent, vec![0x02, 0x00]);
    }

    #[test]
    fn write_reg_sets_write_bit() {
        let mut t = LogTransport {
            selects: Vec::new(),
            sent: Vec::new(),
            reply: 0x00,
        };
        write_reg(&mut t, 0x3A, 0x5A);
        assert_eq!(t.sent, vec![0xBA, 0x5A]);
    }
}
