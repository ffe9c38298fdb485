//! Main simulation world that ties everything together
//!
//! `SimWorld` owns the four lanes, the signal, the vehicle pool and the RNG,
//! and applies the ordered tick phases: clear-passed, cross-intersection,
//! advance-pre-queue, advance-signal, generate-arrivals. The phase order is
//! the concurrency discipline; every phase finishes (with its own
//! back-to-front traversal) before the next one reads state.

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

use super::config::SimConfig;
use super::lane::Lane;
use super::signal::SignalController;
use super::spawner::ArrivalGenerator;
use super::stats::SimStats;
use super::types::{Axis, Direction, LightColor, VehicleId};
use super::vehicle::{Turn, Vehicle, VehicleClass};

/// Read-only copy of one vehicle for rendering and inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleView {
    pub id: VehicleId,
    pub class: VehicleClass,
    pub origin: Direction,
    pub turn: Turn,
}

/// Snapshot of the world published at the end of each tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tick: u64,
    /// Number of approach sections per lane (`S`)
    pub sections: usize,
    /// Lane snapshots indexed by `Direction::index()`
    pub lanes: [Vec<Option<VehicleView>>; 4],
    pub north_south: LightColor,
    pub east_west: LightColor,
}

/// The main simulation world
pub struct SimWorld {
    pub config: SimConfig,
    /// Lanes indexed by `Direction::index()`
    pub lanes: [Lane; 4],
    pub signal: SignalController,
    pub arrivals: ArrivalGenerator,
    /// Pool of live vehicles; lane slots reference into it by id
    pub vehicles: HashMap<VehicleId, Vehicle>,
    pub stats: SimStats,
    next_id: usize,
    tick_count: u64,
    rng: StdRng,
}

impl SimWorld {
    /// Create a world from a configuration and an RNG seed. Two worlds built
    /// from the same arguments produce identical frame sequences.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let sections = config.sections_before_intersection;
        let signal = SignalController::new(&config);
        Self {
            config,
            lanes: [
                Lane::new(Direction::North, sections),
                Lane::new(Direction::South, sections),
                Lane::new(Direction::East, sections),
                Lane::new(Direction::West, sections),
            ],
            signal,
            arrivals: ArrivalGenerator::new(),
            vehicles: HashMap::new(),
            stats: SimStats::new(),
            next_id: 0,
            tick_count: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn lane(&self, direction: Direction) -> &Lane {
        &self.lanes[direction.index()]
    }

    /// Advance the simulation by one second
    pub fn tick(&mut self) {
        // Phase 1: clear passed vehicles on every lane, then retire any
        // vehicle whose last body section just left the grid
        let mut dropped = Vec::new();
        for direction in Direction::ALL {
            if let Some(id) = self.lanes[direction.index()].advance_post() {
                dropped.push(id);
            }
        }
        for id in dropped {
            self.retire_if_exited(id);
        }

        // Phase 2: cross the intersection, active axis only. The decision
        // budget is the countdown before this tick's signal transition.
        let time_left = self.signal.ticks_remaining();
        for direction in self.signal.active_axis().directions() {
            self.cross_intersection(direction, time_left);
        }

        // Phase 3: pack the approach queues
        for direction in Direction::ALL {
            self.lanes[direction.index()].advance_pre();
        }

        // Phase 4: signal transition
        self.signal.advance();

        // Phase 5: arrivals
        let planned = ArrivalGenerator::plan(&mut self.rng, &self.config);
        for direction in Direction::ALL {
            let d = direction.index();
            let created = self.arrivals.admit(
                planned[d],
                &mut self.lanes[d],
                &mut self.vehicles,
                &mut self.next_id,
                &mut self.rng,
                &self.config,
            );
            if let Some(id) = created {
                let class = self.vehicles[&id].class;
                self.stats.record_spawn(direction, class);
                debug!("Tick {}: spawned {:?} {:?}bound", self.tick_count, class, direction);
            }
        }

        // Phase 6: the frame for this tick is now available via `frame()`
        self.tick_count += 1;
        self.stats.ticks = self.tick_count;
    }

    /// Turn resolution for one active lane.
    ///
    /// The vehicle section in the first intersection slot is past the point
    /// of no return and completes its move unconditionally: straight into
    /// the exiting slot, right into the receiving lane's `S+2` (a right turn
    /// finishes one tick sooner), left into the receiving lane's `S+1`. The
    /// vehicle at the stop line only enters if its whole remaining length
    /// clears before red, and a left-turner additionally needs an accepted
    /// gap in oncoming traffic.
    fn cross_intersection(&mut self, direction: Direction, time_left: u32) {
        let s = self.config.sections_before_intersection;
        let v = direction.index();

        if let Some(id) = self.lanes[v].slots[s] {
            let (target, target_slot) = match self.vehicles[&id].turn {
                Turn::Straight => (direction, s + 1),
                Turn::Right => (direction.right_exit(), s + 2),
                Turn::Left => (direction.left_exit(), s + 1),
            };
            let t = target.index();
            debug_assert!(
                self.lanes[t].slots[target_slot].is_none(),
                "intersection exit slot already occupied"
            );
            self.lanes[t].slots[target_slot] = Some(id);
            self.lanes[v].slots[s] = None;
        }

        if let Some(id) = self.lanes[v].slots[s - 1] {
            let turn = self.vehicles[&id].turn;
            let length_left = self.effective_length_left(direction, s - 1);
            let budget = time_left as usize;

            let may_cross = match turn {
                Turn::Straight => length_left + 2 <= budget,
                Turn::Right => length_left + 1 <= budget,
                Turn::Left => {
                    if length_left + 2 > budget {
                        false
                    } else if self.predicts_collision(direction, length_left, time_left) {
                        self.stats.left_turn_waits += 1;
                        false
                    } else {
                        self.lanes[direction.right_exit().index()].slots[s + 1].is_none()
                    }
                }
            };

            if may_cross {
                debug_assert!(self.lanes[v].slots[s].is_none());
                self.lanes[v].slots[s] = Some(id);
                self.lanes[v].slots[s - 1] = None;
            }
        }
    }

    /// Remaining body length behind `head`: the in-lane trailing run plus
    /// any sections still streaming in through the entry slot
    pub fn effective_length_left(&self, direction: Direction, head: usize) -> usize {
        let lane = &self.lanes[direction.index()];
        let mut length = lane.trailing_run(head);
        if lane.run_reaches_entry(head) {
            length += self.arrivals.pending(direction);
        }
        length
    }

    /// Left-turn gap acceptance. Scans the opposing lane from the exiting
    /// slot back toward `S - length_left - 2` (clamped at the lane start)
    /// for the nearest oncoming vehicle that would reach the intersection
    /// while we are still turning.
    ///
    /// In a head-on left/left conflict, north and east origins have
    /// right-of-way over south and west; opposing left-turners never both
    /// go. An oncoming vehicle whose time to clear exceeds the remaining
    /// signal time cannot enter before red and is skipped.
    fn predicts_collision(&self, direction: Direction, length_left: usize, time_left: u32) -> bool {
        let s = self.config.sections_before_intersection as isize;
        let opposing = direction.opposite();
        let lane_o = &self.lanes[opposing.index()];
        let has_priority = matches!(direction, Direction::North | Direction::East);

        let low = (s - length_left as isize - 2).max(0);
        let mut j = s + 1;
        while j >= low {
            let slot = j as usize;
            let id = match lane_o.slots[slot] {
                Some(id) => id,
                None => {
                    j -= 1;
                    continue;
                }
            };

            let oncoming_turn = self.vehicles[&id].turn;
            if oncoming_turn == Turn::Left && has_priority {
                return false;
            }

            let opp_length_left = self.effective_length_left(opposing, slot) as isize;
            let crossing_cost: isize = if oncoming_turn == Turn::Right { 1 } else { 2 };
            let opp_time = opp_length_left + crossing_cost + (s - j - 1);
            if opp_time > time_left as isize {
                // Cannot enter before the light turns; skip its footprint
                j -= lane_o.trailing_run(slot) as isize + 1;
                continue;
            }

            return true;
        }
        false
    }

    /// Retire a vehicle once no lane slot references it any longer
    fn retire_if_exited(&mut self, id: VehicleId) {
        if self.lanes.iter().any(|lane| lane.contains(id)) {
            return;
        }
        if self.vehicles.remove(&id).is_some() {
            self.stats.exited += 1;
            debug!("Tick {}: vehicle {:?} exited", self.tick_count, id);
        }
    }

    /// Place a fully specified vehicle by hand: the head at `head_slot`,
    /// body sections filling backward, and any remainder left to stream in
    /// through the entry slot. Intended for seeding scenarios.
    pub fn insert_vehicle(
        &mut self,
        direction: Direction,
        class: VehicleClass,
        turn: Turn,
        head_slot: usize,
    ) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        self.vehicles.insert(id, Vehicle::new(id, class, direction, turn));

        let lane = &mut self.lanes[direction.index()];
        let mut remaining = class.footprint();
        let mut slot = head_slot as isize;
        while remaining > 0 && slot >= 0 {
            debug_assert!(lane.slots[slot as usize].is_none(), "slot already occupied");
            lane.slots[slot as usize] = Some(id);
            remaining -= 1;
            slot -= 1;
        }
        if remaining > 0 {
            self.arrivals.set_pending(direction, remaining);
        }
        self.stats.record_spawn(direction, class);
        id
    }

    /// Snapshot of the current lanes and lights for the renderer
    pub fn frame(&self) -> Frame {
        let lanes = std::array::from_fn(|i| {
            self.lanes[i]
                .slots
                .iter()
                .map(|slot| {
                    slot.map(|id| {
                        let vehicle = &self.vehicles[&id];
                        VehicleView {
                            id,
                            class: vehicle.class,
                            origin: vehicle.origin,
                            turn: vehicle.turn,
                        }
                    })
                })
                .collect()
        });

        Frame {
            tick: self.tick_count,
            sections: self.config.sections_before_intersection,
            lanes,
            north_south: self.signal.color(Axis::NorthSouth),
            east_west: self.signal.color(Axis::EastWest),
        }
    }
}
