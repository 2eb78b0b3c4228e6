//! Spawn scheduling: deadline records instead of host timers.
//!
//! Every pending action is a record with an absolute due time in ms; the
//! session fires due records from its event pump. Cancellation is explicit
//! (pause, restart, and session end disarm everything), and every placement
//! gets a fresh `spawn_id` so a record can never act on a later occupant of
//! the same cell.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::level::{LevelLogic, TargetKind};
use crate::session::board::Board;

/// A pending unhit-target expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpiryRecord {
    pub cell: usize,
    pub kind: TargetKind,
    pub spawn_id: u64,
    pub due: f64,
}

/// Owns the spawn cadence deadline, pending expiries, and the session RNG.
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    rng: Pcg32,
    next_spawn_due: Option<f64>,
    expiries: Vec<ExpiryRecord>,
    next_spawn_id: u64,
}

impl SpawnScheduler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_spawn_due: None,
            expiries: Vec::new(),
            next_spawn_id: 1,
        }
    }

    /// Arms the spawn cycle so the first tick fires immediately.
    pub fn arm_spawning(&mut self, now: f64) {
        self.next_spawn_due = Some(now);
    }

    /// Clears the spawn deadline and every pending expiry.
    pub fn disarm(&mut self) {
        self.next_spawn_due = None;
        self.expiries.clear();
    }

    pub fn spawn_due(&self, now: f64) -> bool {
        self.next_spawn_due.is_some_and(|due| due <= now)
    }

    /// Re-arms the cadence relative to `now`, not the missed deadline, so a
    /// late frame never produces a spawn burst.
    pub fn rearm_spawn(&mut self, now: f64, interval_ms: f64) {
        self.next_spawn_due = Some(now + interval_ms);
    }

    /// Fires one spawn tick: uniform empty cell, weighted kind, fresh id,
    /// expiry registered at `now + duration_ms`. A full board skips the tick.
    pub fn spawn_into(
        &mut self,
        board: &mut Board,
        logic: &LevelLogic,
        duration_ms: f64,
        now: f64,
    ) -> Option<(usize, TargetKind)> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let cell = empty[self.rng.random_range(0..empty.len())];
        let kind = weighted_draw(&mut self.rng, &logic.target_weights);
        let spawn_id = self.next_spawn_id;
        self.next_spawn_id += 1;
        board.place(cell, kind, spawn_id);
        self.track_expiry(cell, kind, spawn_id, now + duration_ms);
        Some((cell, kind))
    }

    /// Registers an expiry record directly (used on resume to give surviving
    /// targets a fresh lifetime).
    pub fn track_expiry(&mut self, cell: usize, kind: TargetKind, spawn_id: u64, due: f64) {
        self.expiries.push(ExpiryRecord { cell, kind, spawn_id, due });
    }

    /// Removes the pending expiry for one activation (the target was hit).
    pub fn cancel_expiry(&mut self, cell: usize, spawn_id: u64) {
        self.expiries
            .retain(|e| !(e.cell == cell && e.spawn_id == spawn_id));
    }

    /// Removes and returns all records due at `now`, in registration order.
    pub fn take_due_expiries(&mut self, now: f64) -> Vec<ExpiryRecord> {
        let mut due = Vec::new();
        self.expiries.retain(|e| {
            if e.due <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn pending_expiries(&self) -> usize {
        self.expiries.len()
    }
}

/// Weighted kind draw over the level's weight table.
///
/// Walks entries in kind order with `r = random * total`, selecting when
/// `r < w` and subtracting otherwise. The first kind in the table is the
/// fallback when nothing selects (all-zero weights); an empty table falls
/// back to Dog.
pub fn weighted_draw(rng: &mut Pcg32, weights: &BTreeMap<TargetKind, u32>) -> TargetKind {
    let fallback = weights.keys().next().copied().unwrap_or(TargetKind::Dog);
    let total: f64 = weights.values().map(|w| f64::from(*w)).sum();
    if total <= 0.0 {
        return fallback;
    }
    let mut r = rng.random::<f64>() * total;
    for (kind, weight) in weights {
        let w = f64::from(*weight);
        if r < w {
            return *kind;
        }
        r -= w;
    }
    fallback
}
