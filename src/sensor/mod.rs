//! PixArt PMW33xx motion-sensor driver.
//!
//! The driver is a three-state machine driven entirely by the control
//! loop's single execution context:
//!
//! - **Idle**: no motion pending.
//! - **Motion-Pending**: the motion line was seen asserted and
//!   [`PixartPmw::motion_event`] latched the flag; deltas not yet read.
//! - **Data-Ready**: [`PixartPmw::read_motion`] fetched the delta
//!   registers and folded them into the accumulators.
//!
//! [`PixartPmw::take_deltas`] returns to Idle.  Loop-time operations are
//! total: whatever bytes the bus hands back are accumulated as-is, and
//! recovery from a wedged device is the register layer's problem, not the
//! loop's.

pub mod regs;

use crate::error::Error;
use crate::transport::{read_reg, write_reg, Transport};

/// Monotonic millisecond time source.
///
/// Only consulted during bring-up; the steady-state loop never waits.
pub trait TickSource {
    fn now_ms(&self) -> u64;
}

/// Accumulated motion since the last report, device coordinates.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deltas {
    pub dx: i16,
    pub dy: i16,
}

/// Driver state for one PMW33xx bound to one transport.
///
/// Exactly one instance exists per sensor; all mutation happens from the
/// control loop, so no interior synchronisation is needed.
pub struct PixartPmw<T: Transport, C: TickSource> {
    firmware: &'static [u8],
    transport: T,
    ticks: C,
    motion_flag: bool,
    dx: i16,
    dy: i16,
}

impl<T: Transport, C: TickSource> PixartPmw<T, C> {
    /// Bind a driver to its transport and firmware blob.  The device is
    /// untouched until [`Self::initialize`].
    pub fn new(firmware: &'static [u8], transport: T, ticks: C) -> Self {
        Self {
            firmware,
            transport,
            ticks,
            motion_flag: false,
            dx: 0,
            dy: 0,
        }
    }

    /// Boot-time bring-up: power-up reset, SROM upload, product-ID check.
    ///
    /// The only operation allowed to busy-wait; must complete before the
    /// control loop starts.
    pub fn initialize(&mut self) -> Result<(), Error> {
        self.transport.select(true);
        write_reg(&mut self.transport, regs::POWER_UP_RESET, regs::POWER_UP_RESET_VAL);
        self.transport.select(false);
        self.wait_ms(50);

        // Reading the motion block once clears any stale residue.
        self.transport.select(true);
        for addr in regs::MOTION..=regs::DELTA_Y_H {
            read_reg(&mut self.transport, addr);
        }
        self.transport.select(false);

        if !self.firmware.is_empty() {
            self.upload_firmware();
        }

        self.transport.select(true);
        let id = read_reg(&mut self.transport, regs::PRODUCT_ID);
        self.transport.select(false);
        if id != regs::PRODUCT_ID_PMW3360 {
            return Err(Error::InvalidProductId(id));
        }
        Ok(())
    }

    /// Latch a motion-line assertion (Idle → Motion-Pending).
    pub fn motion_event(&mut self) {
        self.motion_flag = true;
    }

    /// True while a latched motion event awaits [`Self::read_motion`].
    pub fn motion_pending(&self) -> bool {
        self.motion_flag
    }

    /// Fetch the delta registers and fold them into the accumulators
    /// (Motion-Pending → Data-Ready).  Clears the motion flag; it stays
    /// clear until the motion line is next seen asserted.
    pub fn read_motion(&mut self) {
        self.transport.select(true);
        read_reg(&mut self.transport, regs::MOTION);
        let x_l = read_reg(&mut self.transport, regs::DELTA_X_L);
        let x_h = read_reg(&mut self.transport, regs::DELTA_X_H);
        let y_l = read_reg(&mut self.transport, regs::DELTA_Y_L);
        let y_h = read_reg(&mut self.transport, regs::DELTA_Y_H);
        self.transport.select(false);

        // Coalesce: reports deferred by a busy host keep accumulating,
        // saturating rather than wrapping.
        self.dx = self.dx.saturating_add(i16::from_le_bytes([x_l, x_h]));
        self.dy = self.dy.saturating_add(i16::from_le_bytes([y_l, y_h]));
        self.motion_flag = false;
    }

    /// Hand the accumulated deltas to the consumer and reset the baseline
    /// (Data-Ready → Idle).
    pub fn take_deltas(&mut self) -> Deltas {
        let deltas = Deltas {
            dx: self.dx,
            dy: self.dy,
        };
        self.dx = 0;
        self.dy = 0;
        deltas
    }

    fn upload_firmware(&mut self) {
        self.transport.select(true);
        write_reg(&mut self.transport, regs::SROM_ENABLE, regs::SROM_ENABLE_INIT);
        self.transport.select(false);
        self.wait_ms(10);

        self.transport.select(true);
        write_reg(&mut self.transport, regs::SROM_ENABLE, regs::SROM_ENABLE_START);
        self.transport.select(false);

        // Burst upload: select held for the whole blob.
        self.transport.select(true);
        self.transport.transfer(regs::SROM_LOAD_BURST | 0x80);
        for &byte in self.firmware {
            self.transport.transfer(byte);
        }
        self.transport.select(false);
        self.wait_ms(10);
    }

    fn wait_ms(&self, ms: u64) {
        let start = self.ticks.now_ms();
        while self.ticks.now_ms().wrapping_sub(start) < ms {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Clock that advances a fixed step on every read, so busy-waits
    /// terminate instantly on the host.
    struct SteppingClock(Cell<u64>);

    impl TickSource for &SteppingClock {
        fn now_ms(&self) -> u64 {
            let t = self.0.get();
            self.0.set(t + 1);
            t
        }
    }

    /// Transport that replies from a script, one byte per transfer.
    struct ScriptedTransport {
        script: std::vec::Vec<u8>,
        cursor: usize,
        sent: std::vec::Vec<u8>,
    }

    impl ScriptedTransport {
        fn new(script: std::vec::Vec<u8>) -> Self {
            Self {
                script,
                cursor: 0,
                sent: Vec::new(),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn select(&mut self, _active: bool) {}

        fn transfer(&mut self, byte: u8) -> u8 {
            self.sent.push(byte);
            let reply = self.script.get(self.cursor).copied().unwrap_or(0);
            self.cursor += 1;
            reply
        }
    }

    /// Script one read_motion burst: motion status then the four delta
    /// bytes, each register read being [addr, dummy] on the wire.
    fn motion_script(dx: i16, dy: i16) -> std::vec::Vec<u8> {
        let x = dx.to_le_bytes();
        let y = dy.to_le_bytes();
        vec![
            0, regs::MOTION_MOT, // MOTION
            0, x[0], // DELTA_X_L
            0, x[1], // DELTA_X_H
            0, y[0], // DELTA_Y_L
            0, y[1], // DELTA_Y_H
        ]
    }

    fn driver(script: std::vec::Vec<u8>, clock: &SteppingClock) -> PixartPmw<ScriptedTransport, &SteppingClock> {
        PixartPmw::new(&[], ScriptedTransport::new(script), clock)
    }

    #[test]
    fn motion_event_latches_flag() {
        let clock = SteppingClock(Cell::new(0));
        let mut d = driver(vec![], &clock);
        assert!(!d.motion_pending());
        d.motion_event();
        assert!(d.motion_pending());
    }

    #[test]
    fn read_motion_clears_flag_until_next_event() {
        let clock = SteppingClock(Cell::new(0));
        let mut d = driver(motion_script(3, -2), &clock);
        d.motion_event();
        d.read_motion();
        assert!(!d.motion_pending());
        assert_eq!(d.take_deltas(), Deltas { dx: 3, dy: -2 });
    }

    #[test]
    fn take_deltas_resets_baseline() {
        let clock = SteppingClock(Cell::new(0));
        let mut d = driver(motion_script(7, 1), &clock);
        d.motion_event();
        d.read_motion();
        assert_eq!(d.take_deltas(), Deltas { dx: 7, dy: 1 });
        assert_eq!(d.take_deltas(), Deltas::default());
    }

    #[test]
    fn consecutive_reads_accumulate() {
        let clock = SteppingClock(Cell::new(0));
        let mut script = motion_script(3, -2);
        script.extend(motion_script(1, 5));
        let mut d = driver(script, &clock);
        d.motion_event();
        d.read_motion();
        d.motion_event();
        d.read_motion();
        assert_eq!(d.take_deltas(), Deltas { dx: 4, dy: 3 });
    }

    #[test]
    fn accumulation_saturates() {
        let clock = SteppingClock(Cell::new(0));
        let mut script = motion_script(i16::MAX, i16::MIN);
        script.extend(motion_script(100, -100));
        let mut d = driver(script, &clock);
        d.motion_event();
        d.read_motion();
        d.motion_event();
        d.read_motion();
        assert_eq!(
            d.take_deltas(),
            Deltas {
                dx: i16::MAX,
                dy: i16::MIN
            }
        );
    }

    #[test]
    fn initialize_rejects_wrong_product_id() {
        let clock = SteppingClock(Cell::new(0));
        // Reset write (2 bytes), residue reads (5 regs * 2), then product
        // id read replying 0x00.
        let mut script = vec![0u8; 12];
        script.extend([0, 0x00]);
        let mut d = driver(script, &clock);
        assert!(matches!(d.initialize(), Err(Error::InvalidProductId(0x00))));
    }

    /// Transport that rejects traffic outside a select frame: any byte
    /// clocked while deselected is recorded as a contract violation.
    struct CsTrackingTransport {
        selected: bool,
        script: std::vec::Vec<u8>,
        cursor: usize,
        deselected_bytes: std::vec::Vec<u8>,
    }

    impl Transport for CsTrackingTransport {
        fn select(&mut self, active: bool) {
            self.selected = active;
        }

        fn transfer(&mut self, byte: u8) -> u8 {
            if !self.selected {
                self.deselected_bytes.push(byte);
            }
            let reply = self.script.get(self.cursor).copied().unwrap_or(0);
            self.cursor += 1;
            reply
        }
    }

    #[test]
    fn initialize_frames_every_transfer_with_chip_select() {
        static BLOB: &[u8] = &[0xAA, 0xBB];
        let clock = SteppingClock(Cell::new(0));
        // Reset write (2), residue reads (10), SROM enable writes (2 + 2),
        // burst address + blob (3), then the product-ID read.
        let mut script = vec![0u8; 20];
        script.push(regs::PRODUCT_ID_PMW3360);
        let transport = CsTrackingTransport {
            selected: false,
            script,
            cursor: 0,
            deselected_bytes: Vec::new(),
        };
        let mut d = PixartPmw::new(BLOB, transport, &clock);
        assert!(d.initialize().is_ok());
        assert_eq!(d.transport.deselected_bytes, Vec::<u8>::new());
    }

    #[test]
    fn initialize_accepts_pmw3360_id() {
        let clock = SteppingClock(Cell::new(0));
        let mut script = vec![0u8; 12];
        script.extend([0, regs::PRODUCT_ID_PMW3360]);
        let mut d = driver(script, &clock);
        assert!(d.initialize().is_ok());
    }
}
