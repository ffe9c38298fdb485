//! Lane slot arrays and the per-tick shift phases
//!
//! A lane is `2S+2` slots: `[0, S-1]` approach the stop line, `S` is the
//! first intersection section, `S+1` the exiting/turned section, and
//! `[S+2, 2S+1]` lead off the grid. Each slot holds at most one vehicle id;
//! a multi-section vehicle is a contiguous run of slots with the same id.

use super::types::{Direction, VehicleId};

/// One travel lane through the intersection
#[derive(Debug, Clone)]
pub struct Lane {
    pub direction: Direction,
    pub slots: Vec<Option<VehicleId>>,
    sections: usize,
}

impl Lane {
    pub fn new(direction: Direction, sections: usize) -> Self {
        Self {
            direction,
            slots: vec![None; sections * 2 + 2],
            sections,
        }
    }

    /// Number of approach sections (`S`)
    pub fn sections(&self) -> usize {
        self.sections
    }

    /// Index of the last approach slot, right at the stop line
    pub fn stop_line(&self) -> usize {
        self.sections - 1
    }

    /// Index of the first intersection slot
    pub fn entering(&self) -> usize {
        self.sections
    }

    /// Index of the exiting/turned slot
    pub fn exiting(&self) -> usize {
        self.sections + 1
    }

    /// Index of the final slot before a vehicle leaves the grid
    pub fn last(&self) -> usize {
        self.slots.len() - 1
    }

    /// Clear-passed phase: drop whatever occupies the last slot and shift
    /// every post-intersection slot one position outward, far end first so a
    /// vehicle never overwrites a not-yet-moved neighbor. Slot `S` is left
    /// alone; it belongs to the crossing phase. Returns the dropped id.
    pub fn advance_post(&mut self) -> Option<VehicleId> {
        let last = self.last();
        let dropped = self.slots[last].take();
        for i in (self.exiting()..self.last()).rev() {
            self.slots[i + 1] = self.slots[i].take();
        }
        dropped
    }

    /// Advance-pre-queue phase: approach vehicles move up one slot wherever
    /// the next slot is empty, nearest the stop line first, so queues pack
    /// bumper to bumper without gaps opening inside a footprint.
    pub fn advance_pre(&mut self) {
        for i in (0..self.stop_line()).rev() {
            if self.slots[i + 1].is_none() {
                self.slots[i + 1] = self.slots[i].take();
            }
        }
    }

    /// Whether any slot still references the given vehicle
    pub fn contains(&self, id: VehicleId) -> bool {
        self.slots.iter().any(|slot| *slot == Some(id))
    }

    /// Count contiguous slots behind `head` still holding the same id: the
    /// body length not yet at `head`'s position. Footprint cells that have
    /// not streamed onto the grid yet are the caller's concern (the arrival
    /// generator's pending counter).
    pub fn trailing_run(&self, head: usize) -> usize {
        let id = match self.slots[head] {
            Some(id) => id,
            None => return 0,
        };
        let mut count = 0;
        let mut i = head;
        while i > 0 && self.slots[i - 1] == Some(id) {
            count += 1;
            i -= 1;
        }
        count
    }

    /// Whether the trailing run starting at `head` reaches the entry slot,
    /// meaning the vehicle's tail may still be streaming in
    pub fn run_reaches_entry(&self, head: usize) -> bool {
        self.slots[head].is_some() && self.trailing_run(head) == head
    }
}
