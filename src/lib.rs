//! Intersection Simulation Library
//!
//! Simulates vehicle flow through a single four-way signalized
//! intersection, with an ASCII renderer for headless runs.

pub mod render;
pub mod simulation;
