//! Authoritative tower state management utilities.

use std::collections::{BTreeMap, HashSet};

use lane_defence_core::{CellCoord, TowerId, TowerKind, Vec2};

/// Snapshot of a tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Cell occupied by the tower.
    pub(crate) cell: CellCoord,
    /// Centre of the occupied cell.
    pub(crate) position: Vec2,
    /// Seconds until the tower may fire again.
    pub(crate) cooldown: f32,
    /// Angle of the most recent shot.
    pub(crate) aim: Option<f32>,
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    occupied: HashSet<CellCoord>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            occupied: HashSet::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Inserts a ready-to-fire tower and returns its identifier.
    pub(crate) fn insert(&mut self, kind: TowerKind, cell: CellCoord, position: Vec2) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self.occupied.insert(cell);
        let _ = self.entries.insert(
            id,
            TowerState {
                id,
                kind,
                cell,
                position,
                cooldown: 0.0,
                aim: None,
            },
        );
        id
    }

    pub(crate) fn is_occupied(&self, cell: CellCoord) -> bool {
        self.occupied.contains(&cell)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TowerState> {
        self.entries.values_mut()
    }

    pub(crate) fn occupied_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.entries.values().map(|tower| tower.cell)
    }
}
