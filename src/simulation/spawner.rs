//! Arrival generation
//!
//! Each tick runs two passes. The plan pass draws, per direction, a
//! Bernoulli arrival trial and (on success) a categorical class draw. The
//! admit pass then feeds each lane's entry slot: either the tail of a
//! multi-section vehicle still streaming in, or a freshly created vehicle
//! with its turn intent drawn on the spot. The draw order (plan N,S,E,W,
//! then admit N,S,E,W) is fixed; changing it breaks seed reproducibility.

use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashMap;

use super::config::SimConfig;
use super::lane::Lane;
use super::types::{Direction, VehicleId};
use super::vehicle::{Turn, Vehicle, VehicleClass};

/// Per-direction entry bookkeeping for multi-section vehicles
#[derive(Debug, Clone, Default)]
pub struct ArrivalGenerator {
    /// Body sections still waiting to stream into each lane's entry slot
    pending: [usize; 4],
}

impl ArrivalGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sections of a partially entered vehicle still off-grid for this
    /// direction. Part of the vehicle's effective length at the stop line.
    pub fn pending(&self, direction: Direction) -> usize {
        self.pending[direction.index()]
    }

    /// Overwrite the pending body counter for a direction. Used when
    /// seeding lanes by hand rather than through the arrival draws.
    pub(crate) fn set_pending(&mut self, direction: Direction, sections: usize) {
        self.pending[direction.index()] = sections;
    }

    /// Plan pass: one arrival trial per direction in north, south, east,
    /// west order, with a class draw for each success. Draws happen whether
    /// or not the entry slot can accept the vehicle, so the RNG stream only
    /// depends on the configuration.
    pub fn plan(rng: &mut StdRng, config: &SimConfig) -> [Option<VehicleClass>; 4] {
        let mut planned = [None; 4];
        for direction in Direction::ALL {
            let d = direction.index();
            if rng.random::<f64>() < config.arrival_probability[d] {
                let class_rand = rng.random::<f64>();
                planned[d] = Some(if class_rand < config.proportion_of_cars {
                    VehicleClass::Car
                } else if class_rand < config.proportion_of_cars + config.proportion_of_suvs {
                    VehicleClass::Suv
                } else {
                    VehicleClass::Truck
                });
            }
        }
        planned
    }

    /// Admit pass for one lane. A pending body section takes precedence over
    /// a planned arrival; a blocked entry slot drops the arrival entirely.
    /// Returns the id of a newly created vehicle, if any.
    pub fn admit(
        &mut self,
        planned: Option<VehicleClass>,
        lane: &mut Lane,
        vehicles: &mut HashMap<VehicleId, Vehicle>,
        next_id: &mut usize,
        rng: &mut StdRng,
        config: &SimConfig,
    ) -> Option<VehicleId> {
        let direction = lane.direction;
        let d = direction.index();

        if lane.slots[0].is_some() {
            return None;
        }

        if self.pending[d] != 0 {
            // The head advanced out of the entry slot last phase; the next
            // body section takes its place.
            lane.slots[0] = lane.slots[1];
            self.pending[d] -= 1;
            return None;
        }

        let class = planned?;
        let turn_rand = rng.random::<f64>();
        let (right, left) = match class {
            VehicleClass::Car => config.turn_proportions_cars,
            VehicleClass::Suv => config.turn_proportions_suvs,
            VehicleClass::Truck => config.turn_proportions_trucks,
        };
        let turn = if turn_rand < right {
            Turn::Right
        } else if turn_rand < right + left {
            Turn::Left
        } else {
            Turn::Straight
        };

        let id = VehicleId(*next_id);
        *next_id += 1;
        vehicles.insert(id, Vehicle::new(id, class, direction, turn));
        lane.slots[0] = Some(id);
        self.pending[d] = class.footprint() - 1;
        Some(id)
    }
}
