use crate::viewport::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default grid cell size in logical canvas units
pub const GRID_SIZE: i32 = 20;

/// A grid-aligned position in logical canvas units.
///
/// Node positions are always stored as `GridPos`; both coordinates are
/// multiples of the grid cell they were snapped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Snap a logical position to the nearest multiple of `cell` on both axes.
///
/// A non-positive `cell` is treated as 1, which only rounds to whole units.
/// Positions beyond the `i32` range saturate to the outermost grid line.
pub fn snap_to_grid(pos: Point, cell: i32) -> GridPos {
    let cell = cell.max(1);
    GridPos {
        x: snap_axis(pos.x, cell),
        y: snap_axis(pos.y, cell),
    }
}

fn snap_axis(v: f32, cell: i32) -> i32 {
    // `as` saturates (NaN becomes 0); clamping the cell count keeps the
    // product in range and on the grid
    let cells = (v / cell as f32).round() as i32;
    cells.clamp(i32::MIN / cell, i32::MAX / cell) * cell
}
