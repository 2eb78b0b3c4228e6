//! Board state: a square grid of cells, each empty or holding one active
//! target.

use serde::{Deserialize, Serialize};

use crate::level::TargetKind;

/// One placed target. `spawn_id` identifies this activation; expiry records
/// carry the same id so a stale timer can never act on a newer occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTarget {
    pub kind: TargetKind,
    pub spawn_id: u64,
}

/// Square cell grid, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid_size: usize,
    cells: Vec<Option<ActiveTarget>>,
}

impl Board {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            cells: vec![None; grid_size * grid_size],
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn target_at(&self, cell: usize) -> Option<ActiveTarget> {
        self.cells.get(cell).copied().flatten()
    }

    /// Places a target. Out-of-range or occupied cells are left untouched;
    /// callers pick cells from `empty_cells`.
    pub fn place(&mut self, cell: usize, kind: TargetKind, spawn_id: u64) {
        if let Some(slot) = self.cells.get_mut(cell) {
            if slot.is_none() {
                *slot = Some(ActiveTarget { kind, spawn_id });
            }
        }
    }

    /// Clears a cell. No-op when empty or out of range.
    pub fn clear(&mut self, cell: usize) {
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = None;
        }
    }

    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|slot| slot.is_some()).count()
    }

    /// Occupied cells with their targets, in cell order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, ActiveTarget)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|t| (i, t)))
    }
}
