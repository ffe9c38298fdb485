//! Standalone intersection simulation
//!
//! This module contains all the core simulation logic and can run
//! independently of any renderer. It can be tested via the library API
//! without parsing a config file or drawing a frame.

mod config;
mod lane;
mod signal;
mod spawner;
mod stats;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
pub use config::SimConfig;
pub use lane::Lane;
pub use signal::SignalController;
pub use spawner::ArrivalGenerator;
pub use stats::SimStats;
pub use types::{Axis, Direction, LightColor, VehicleId};
pub use vehicle::{Turn, Vehicle, VehicleClass};
pub use world::{Frame, SimWorld, VehicleView};
