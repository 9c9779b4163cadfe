//! Top-level control loop.
//!
//! One cooperative, single-threaded scheduler iteration:
//!
//! 1. service the USB stack,
//! 2. poll the motion line and latch a motion event,
//! 3. read pending motion into the driver's accumulators,
//! 4. when the HID endpoint is ready and new data is pending, emit one
//!    report and clear the new-data flag.
//!
//! Nothing here blocks: a report is deferred while the host is not ready,
//! never dropped, and the driver keeps accumulating deltas across the
//! deferred iterations.

use crate::config;
use crate::hid::{MouseReport, MOUSE_REPORT_SIZE};
use crate::sensor::{PixartPmw, TickSource};
use crate::transport::Transport;

/// Polled level of the motion-indicator line.
pub trait MotionLine {
    /// True while the sensor signals pending motion data.
    fn asserted(&mut self) -> bool;
}

/// Non-blocking face of the USB/HID collaborator.
pub trait HidPort {
    /// Drive the USB protocol state machine; must not stall.
    fn service(&mut self);

    /// Whether `interface` can accept a new report right now.
    fn ready(&mut self, interface: u8) -> bool;

    /// Hand a serialised report to `interface`.  Only called after
    /// `ready` returned true in the same iteration.
    fn submit(&mut self, interface: u8, report: &[u8]);
}

/// Construction-time sensor presence.
///
/// Boards without a sensor populate `Absent`; the loop body stays free of
/// conditional compilation because the absent variant turns the sensor
/// steps into no-ops.
pub enum SensorSlot<T: Transport, C: TickSource, L: MotionLine> {
    Present {
        driver: PixartPmw<T, C>,
        motion_line: L,
    },
    Absent,
}

/// The firmware's main scheduler.  Owns all recurring state; there is
/// exactly one execution context, so no locking anywhere.
pub struct ControlLoop<T: Transport, C: TickSource, L: MotionLine, H: HidPort> {
    sensor: SensorSlot<T, C, L>,
    hid: H,
    new_data: bool,
}

impl<T: Transport, C: TickSource, L: MotionLine, H: HidPort> ControlLoop<T, C, L, H> {
    pub fn new(sensor: SensorSlot<T, C, L>, hid: H) -> Self {
        Self {
            sensor,
            hid,
            new_data: false,
        }
    }

    /// Run exactly one loop iteration.
    pub fn step(&mut self) {
        self.hid.service();

        let SensorSlot::Present {
            driver,
            motion_line,
        } = &mut self.sensor
        else {
            return;
        };

        if motion_line.asserted() {
            driver.motion_event();
        }

        if driver.motion_pending() {
            driver.read_motion();
            self.new_data = true;
        }

        if self.new_data && self.hid.ready(config::MOUSE_INTERFACE) {
            let report = MouseReport::from_deltas(driver.take_deltas());
            let mut buf = [0u8; MOUSE_REPORT_SIZE];
            let len = report.serialize(&mut buf);
            self.hid.submit(config::MOUSE_INTERFACE, &buf[..len]);
            self.new_data = false;
        }
    }

    /// Iterate forever.  Bare-metal entry for targets driving the loop
    /// directly rather than from an async task.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }
}
