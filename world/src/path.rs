//! Waypoint path model and its rasterization into blocked grid cells.

use lane_defence_core::{CellCoord, ConfigurationError, PathConfig, TileGrid, Vec2};

/// Waypoint path converted to world space together with the cells it blocks.
#[derive(Clone, Debug)]
pub(crate) struct PathModel {
    columns: u32,
    rows: u32,
    waypoints: Vec<Vec2>,
    blocked: Vec<bool>,
}

impl PathModel {
    /// Validates the path against the grid and marks every cell within
    /// `half_width` tiles of a segment as blocked.
    pub(crate) fn rasterize(grid: &TileGrid, path: &PathConfig) -> Result<Self, ConfigurationError> {
        if grid.columns() == 0 || grid.rows() == 0 {
            return Err(ConfigurationError::EmptyGrid);
        }
        if !(grid.tile_length() > 0.0) {
            return Err(ConfigurationError::InvalidValue {
                subject: "grid",
                field: "tile_length",
            });
        }
        if path.waypoints.len() < 2 {
            return Err(ConfigurationError::TooFewWaypoints(path.waypoints.len()));
        }
        for (index, cell) in path.waypoints.iter().copied().enumerate() {
            if !grid.contains(cell) {
                return Err(ConfigurationError::WaypointOutOfBounds { index, cell });
            }
        }

        let capacity = usize::try_from(u64::from(grid.columns()) * u64::from(grid.rows()))
            .unwrap_or(0);
        let mut model = Self {
            columns: grid.columns(),
            rows: grid.rows(),
            waypoints: path
                .waypoints
                .iter()
                .map(|cell| grid.cell_center(*cell))
                .collect(),
            blocked: vec![false; capacity],
        };

        let half_width = i32::try_from(path.half_width).unwrap_or(i32::MAX);
        for (index, segment) in path.waypoints.windows(2).enumerate() {
            let (from, to) = (segment[0], segment[1]);
            if from.column() == to.column() {
                let column = from.column();
                for row in from.row().min(to.row())..=from.row().max(to.row()) {
                    for offset in -half_width..=half_width {
                        model.block(CellCoord::new(column.saturating_add(offset), row));
                    }
                }
            } else if from.row() == to.row() {
                let row = from.row();
                for column in from.column().min(to.column())..=from.column().max(to.column()) {
                    for offset in -half_width..=half_width {
                        model.block(CellCoord::new(column, row.saturating_add(offset)));
                    }
                }
            } else {
                return Err(ConfigurationError::DiagonalSegment { index, from, to });
            }
        }

        Ok(model)
    }

    /// Waypoint centres in world coordinates.
    pub(crate) fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Reports whether the cell is covered by the path.
    pub(crate) fn is_blocked(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.blocked.get(index).copied())
            .unwrap_or(false)
    }

    /// Enumerates the in-grid cells covered by the path in row-major order.
    pub(crate) fn blocked_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let columns = self.columns;
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, blocked)| **blocked)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                let column = i32::try_from(index % columns).ok()?;
                let row = i32::try_from(index / columns).ok()?;
                Some(CellCoord::new(column, row))
            })
    }

    fn block(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.blocked.get_mut(index) {
                *slot = true;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        let column = u32::try_from(cell.column()).ok()?;
        let row = u32::try_from(cell.row()).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        Some(usize::try_from(row).ok()? * width + usize::try_from(column).ok()?)
    }
}
