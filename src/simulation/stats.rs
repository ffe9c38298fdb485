//! Run counters for the simulation
//!
//! Tracks spawn and exit totals so a headless run can report what happened.

use super::types::Direction;
use super::vehicle::VehicleClass;

/// Counters accumulated over a run
#[derive(Debug, Clone, Default)]
pub struct SimStats {
    /// Vehicles created, indexed by `Direction::index()`
    pub spawned_by_direction: [usize; 4],
    /// Vehicles created, indexed car/SUV/truck
    pub spawned_by_class: [usize; 3],
    /// Vehicles that fully left the grid
    pub exited: usize,
    /// Ticks where a left-turner was held back by predicted oncoming traffic
    pub left_turn_waits: usize,
    /// Ticks simulated so far
    pub ticks: u64,
}

impl SimStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_spawn(&mut self, direction: Direction, class: VehicleClass) {
        self.spawned_by_direction[direction.index()] += 1;
        let class_index = match class {
            VehicleClass::Car => 0,
            VehicleClass::Suv => 1,
            VehicleClass::Truck => 2,
        };
        self.spawned_by_class[class_index] += 1;
    }

    pub fn total_spawned(&self) -> usize {
        self.spawned_by_direction.iter().sum()
    }

    /// One-line summary for logging at the end of a run
    pub fn summary(&self) -> String {
        format!(
            "Ticks: {} | Spawned: {} (N {}, S {}, E {}, W {} / cars {}, SUVs {}, trucks {}) | Exited: {} | Left-turn waits: {}",
            self.ticks,
            self.total_spawned(),
            self.spawned_by_direction[0],
            self.spawned_by_direction[1],
            self.spawned_by_direction[2],
            self.spawned_by_direction[3],
            self.spawned_by_class[0],
            self.spawned_by_class[1],
            self.spawned_by_class[2],
            self.exited,
            self.left_turn_waits,
        )
    }
}
