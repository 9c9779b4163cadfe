//! Quad-bus adapter: sensors multiplexed on a shared Quad-SPI controller.

use super::Transport;

/// Collaborator contract of a shared Quad-SPI controller.
///
/// Unlike [`super::spi::SpiBus`], several devices hang off one controller,
/// so every call carries the device index.  Chip-select polarity is the
/// controller's business; the index is all the adapter knows.
pub trait QspiBus {
    /// Drive chip-select for the addressed device.
    fn select(&mut self, device: u8, active: bool);

    /// Full-duplex single-byte exchange with the addressed device.
    fn transfer_byte(&mut self, device: u8, byte: u8) -> u8;
}

/// [`Transport`] over one device slot of a shared Quad-SPI controller.
///
/// Closes over the device index chosen at boot; the higher layers never
/// see it.
pub struct QspiTransport<B: QspiBus> {
    bus: B,
    device: u8,
}

impl<B: QspiBus> QspiTransport<B> {
    pub fn new(bus: B, device: u8) -> Self {
        Self { bus, device }
    }
}

impl<B: QspiBus> Transport for QspiTransport<B> {
    fn select(&mut self, active: bool) {
        self.bus.select(self.device, active);
    }

    fn transfer(&mut self, byte: u8) -> u8 {
        self.bus.transfer_byte(self.device, byte)
    }
}
