//! Simulation parameters and the key:value file loader
//!
//! The engine itself only ever sees an immutable `SimConfig`; parsing the
//! input specification lives here so `SimWorld` stays free of I/O.

use anyhow::{anyhow, Context, Result};
use log::warn;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// All parameters for one simulation run, loaded once and immutable
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Total number of ticks to simulate
    pub maximum_simulated_time: u32,
    /// Number of approach sections per lane (`S`); lanes hold `2S+2` slots
    pub sections_before_intersection: usize,
    pub green_north_south: u32,
    pub yellow_north_south: u32,
    pub green_east_west: u32,
    pub yellow_east_west: u32,
    /// Per-tick arrival probability, indexed by `Direction::index()`
    pub arrival_probability: [f64; 4],
    pub proportion_of_cars: f64,
    pub proportion_of_suvs: f64,
    /// Right and left turn proportions per class: (right, left)
    pub turn_proportions_cars: (f64, f64),
    pub turn_proportions_suvs: (f64, f64),
    pub turn_proportions_trucks: (f64, f64),
}

impl Default for SimConfig {
    /// A small but busy intersection, handy for tests and demo runs
    fn default() -> Self {
        Self {
            maximum_simulated_time: 100,
            sections_before_intersection: 8,
            green_north_south: 12,
            yellow_north_south: 3,
            green_east_west: 10,
            yellow_east_west: 3,
            arrival_probability: [0.15; 4],
            proportion_of_cars: 0.7,
            proportion_of_suvs: 0.2,
            turn_proportions_cars: (0.1, 0.1),
            turn_proportions_suvs: (0.1, 0.1),
            turn_proportions_trucks: (0.1, 0.1),
        }
    }
}

impl SimConfig {
    /// Load a configuration from a `key: value` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Unable to open config file {}", path.display()))?;
        Self::from_str_contents(&text)
    }

    /// Parse configuration text. Lines are `key: value`; all whitespace is
    /// ignored and blank lines are skipped. Keys may appear in any order.
    pub fn from_str_contents(text: &str) -> Result<Self> {
        let mut values: HashMap<String, f64> = HashMap::new();

        for (line_no, raw_line) in text.lines().enumerate() {
            let line: String = raw_line.chars().filter(|c| !c.is_whitespace()).collect();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("Line {}: expected 'key: value'", line_no + 1))?;
            let value: f64 = value
                .parse()
                .with_context(|| format!("Line {}: bad numeric value for '{}'", line_no + 1, key))?;
            values.insert(key.to_string(), value);
        }

        let config = Self {
            maximum_simulated_time: get(&values, "maximum_simulated_time")? as u32,
            sections_before_intersection: get(&values, "number_of_sections_before_intersection")?
                as usize,
            green_north_south: get(&values, "green_north_south")? as u32,
            yellow_north_south: get(&values, "yellow_north_south")? as u32,
            green_east_west: get(&values, "green_east_west")? as u32,
            yellow_east_west: get(&values, "yellow_east_west")? as u32,
            arrival_probability: [
                get(&values, "prob_new_vehicle_northbound")?,
                get(&values, "prob_new_vehicle_southbound")?,
                get(&values, "prob_new_vehicle_eastbound")?,
                get(&values, "prob_new_vehicle_westbound")?,
            ],
            proportion_of_cars: get(&values, "proportion_of_cars")?,
            proportion_of_suvs: get(&values, "proportion_of_SUVs")?,
            turn_proportions_cars: (
                get(&values, "proportion_right_turn_cars")?,
                get(&values, "proportion_left_turn_cars")?,
            ),
            turn_proportions_suvs: (
                get(&values, "proportion_right_turn_SUVs")?,
                get(&values, "proportion_left_turn_SUVs")?,
            ),
            turn_proportions_trucks: (
                get(&values, "proportion_right_turn_trucks")?,
                get(&values, "proportion_left_turn_trucks")?,
            ),
        };

        for key in values.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                warn!("Ignoring unknown config key '{}'", key);
            }
        }

        Ok(config)
    }
}

const KNOWN_KEYS: [&str; 18] = [
    "maximum_simulated_time",
    "number_of_sections_before_intersection",
    "green_north_south",
    "yellow_north_south",
    "green_east_west",
    "yellow_east_west",
    "prob_new_vehicle_northbound",
    "prob_new_vehicle_southbound",
    "prob_new_vehicle_eastbound",
    "prob_new_vehicle_westbound",
    "proportion_of_cars",
    "proportion_of_SUVs",
    "proportion_right_turn_cars",
    "proportion_left_turn_cars",
    "proportion_right_turn_SUVs",
    "proportion_left_turn_SUVs",
    "proportion_right_turn_trucks",
    "proportion_left_turn_trucks",
];

fn get(values: &HashMap<String, f64>, key: &str) -> Result<f64> {
    values
        .get(key)
        .copied()
        .ok_or_else(|| anyhow!("Missing config key '{}'", key))
}
