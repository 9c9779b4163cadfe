//! PixArt PMW33xx register map subset used by this firmware.
//!
//! Only the registers touched by bring-up and motion reads are listed;
//! the rest of the datasheet stays out of the tree.

pub const PRODUCT_ID: u8 = 0x00;
pub const MOTION: u8 = 0x02;
pub const DELTA_X_L: u8 = 0x03;
pub const DELTA_X_H: u8 = 0x04;
pub const DELTA_Y_L: u8 = 0x05;
pub const DELTA_Y_H: u8 = 0x06;
pub const POWER_UP_RESET: u8 = 0x3A;
pub const SROM_ENABLE: u8 = 0x13;
pub const SROM_LOAD_BURST: u8 = 0x62;

/// Expected PRODUCT_ID readback for the PMW3360.
pub const PRODUCT_ID_PMW3360: u8 = 0x42;

/// Magic value that triggers a full power-up reset.
pub const POWER_UP_RESET_VAL: u8 = 0x5A;

/// SROM_ENABLE phases of the firmware-blob upload.
pub const SROM_ENABLE_INIT: u8 = 0x1D;
pub const SROM_ENABLE_START: u8 = 0x18;

/// MOTION register: motion-occurred status bit.
pub const MOTION_MOT: u8 = 0x80;
