//! Unified error type for spi2usb.
//!
//! Only boot-time bring-up reports errors; every loop-time operation is a
//! total function.  All variants carry fixed-size data - no `alloc`.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// SPI/QSPI bus bring-up failed.
    Spi,

    /// Sensor identified itself with an unexpected product ID.
    InvalidProductId(u8),

    /// USB stack returned an error.
    Usb,
}
