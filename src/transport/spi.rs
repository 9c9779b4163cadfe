//! Direct-bus adapter: one sensor on a dedicated SPI peripheral.

use super::Transport;

/// Collaborator contract of a single-peripheral SPI driver.
///
/// The driver owns the chip-select line and the bus clocking state; only
/// one device ever sits behind it, so no addressing is needed.
pub trait SpiBus {
    /// Drive chip-select for the one attached device.
    fn select(&mut self, active: bool);

    /// Full-duplex single-byte exchange.
    fn transfer_byte(&mut self, byte: u8) -> u8;
}

/// [`Transport`] over a dedicated SPI peripheral.
///
/// Owns the bus handle for the lifetime of the device; constructed once at
/// boot and never rebound.
pub struct SpiTransport<B: SpiBus> {
    bus: B,
}

impl<B: SpiBus> SpiTransport<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B: SpiBus> Transport for SpiTransport<B> {
    fn select(&mut self, active: bool) {
        self.bus.select(active);
    }

    fn transfer(&mut self, byte: u8) -> u8 {
        self.bus.transfer_byte(byte)
    }
}
