//! Traffic light state machine
//!
//! A two-phase countdown: one axis runs green then yellow while the other
//! holds red, then they swap. Vehicles only ever see the tick countdown; the
//! green/yellow distinction is display-only.

use log::debug;

use super::config::SimConfig;
use super::types::{Axis, LightColor};

/// The signal controller for both axes
#[derive(Debug, Clone)]
pub struct SignalController {
    active_axis: Axis,
    /// Ticks until the active axis goes red
    ticks_remaining: u32,
    /// Displayed color per axis, indexed NorthSouth = 0, EastWest = 1
    colors: [LightColor; 2],
    green: [u32; 2],
    yellow: [u32; 2],
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::NorthSouth => 0,
        Axis::EastWest => 1,
    }
}

impl SignalController {
    /// East-West starts green with its full window; North-South starts red
    /// with nothing remaining.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            active_axis: Axis::EastWest,
            ticks_remaining: config.green_east_west + config.yellow_east_west,
            colors: [LightColor::Red, LightColor::Green],
            green: [config.green_north_south, config.green_east_west],
            yellow: [config.yellow_north_south, config.yellow_east_west],
        }
    }

    pub fn active_axis(&self) -> Axis {
        self.active_axis
    }

    /// Ticks left before the active axis goes red. This is the decision
    /// budget the crossing phase checks vehicles against.
    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    pub fn color(&self, axis: Axis) -> LightColor {
        self.colors[axis_index(axis)]
    }

    /// Apply the per-tick transition, evaluated after the movement phases.
    /// At zero the axes flip and the new axis gets its full green + yellow
    /// window; when the countdown reaches the yellow duration the displayed
    /// color changes but the countdown just keeps decrementing.
    pub fn advance(&mut self) {
        if self.ticks_remaining == 0 {
            let next = self.active_axis.other();
            self.colors[axis_index(self.active_axis)] = LightColor::Red;
            self.colors[axis_index(next)] = LightColor::Green;
            self.active_axis = next;
            self.ticks_remaining = self.green[axis_index(next)] + self.yellow[axis_index(next)];
            debug!("Signal flip: {:?} now green for {} ticks", next, self.ticks_remaining);
        } else {
            if self.ticks_remaining == self.yellow[axis_index(self.active_axis)] {
                self.colors[axis_index(self.active_axis)] = LightColor::Yellow;
            }
            debug_assert!(self.ticks_remaining > 0);
            self.ticks_remaining -= 1;
        }
    }
}
