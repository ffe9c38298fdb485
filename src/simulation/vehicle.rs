//! Vehicle records
//!
//! A vehicle is created once by the arrival generator and never mutated.
//! Lane slots reference it by id; the `SimWorld` pool owns the record until
//! the last slot of its footprint leaves the grid.

use super::types::{Direction, VehicleId};

/// Class of vehicle, which fixes its footprint length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleClass {
    Car,
    Suv,
    Truck,
}

impl VehicleClass {
    /// Number of consecutive slots the vehicle body occupies
    pub fn footprint(self) -> usize {
        match self {
            VehicleClass::Car => 1,
            VehicleClass::Suv => 2,
            VehicleClass::Truck => 3,
        }
    }

    /// Single-letter glyph used by the ASCII renderer
    pub fn glyph(self) -> char {
        match self {
            VehicleClass::Car => 'c',
            VehicleClass::Suv => 's',
            VehicleClass::Truck => 't',
        }
    }
}

/// The turn a vehicle will make at the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
    Straight,
}

/// A vehicle in the simulation, immutable after creation
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub class: VehicleClass,
    /// The direction of the lane the vehicle entered from
    pub origin: Direction,
    pub turn: Turn,
}

impl Vehicle {
    pub fn new(id: VehicleId, class: VehicleClass, origin: Direction, turn: Turn) -> Self {
        Self {
            id,
            class,
            origin,
            turn,
        }
    }
}
