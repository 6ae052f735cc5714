//! Conversion between continuous world positions and discrete cells.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Axis, Cell, Footprint, FootprintCells, FootprintSize};

/// Maps world-space positions onto the placement grid and back.
pub trait CoordinateMapper {
    /// Returns the cell containing the provided world position.
    fn world_to_cell(&self, point: Vec3) -> Cell;

    /// Returns the world-space center of a single cell.
    fn cell_to_world_center(&self, cell: Cell) -> Vec3;

    /// Returns the world-space center of the box anchored at `origin` with `size`.
    fn box_to_world_center(&self, origin: Cell, size: FootprintSize) -> Vec3;

    /// Reports whether the cell lies within the grid bounds.
    fn is_inside(&self, cell: Cell) -> bool;

    /// Enumerates the cells of a box in ascending x, y, z order.
    fn cells_in_box(&self, origin: Cell, size: FootprintSize) -> FootprintCells {
        Footprint::new(origin, size).cells()
    }
}

/// Serializable description of a [`UniformGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Edge length of a single cubic cell in world units.
    pub cell_length: f32,
    /// Number of cells along x, y and z.
    pub dimensions: [u32; 3],
    /// World position of the grid anchor: centre of the x/z extent, bottom of y.
    #[serde(default)]
    pub center: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_length: 1.0,
            dimensions: [50, 50, 50],
            center: [0.0; 3],
        }
    }
}

/// Bounded grid of cubic cells centred on an anchor in the horizontal plane.
///
/// The x/z extent is centred on the anchor while y starts at the anchor's
/// height, so cell `y = 0` sits directly on the anchor plane.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformGrid {
    cell_length: f32,
    dimensions: [u32; 3],
    origin: Vec3,
}

impl UniformGrid {
    /// Creates a grid from the provided configuration.
    ///
    /// Non-positive cell lengths are replaced by `1.0` so conversions never divide by zero.
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        let cell_length = if config.cell_length > 0.0 {
            config.cell_length
        } else {
            1.0
        };
        let [columns, _, depth] = config.dimensions;
        let center = Vec3::from_array(config.center);
        let horizontal = Vec3::new(columns as f32, 0.0, depth as f32) * cell_length;
        let mut origin = center - horizontal * 0.5;
        origin.y = center.y;

        Self {
            cell_length,
            dimensions: config.dimensions,
            origin,
        }
    }

    /// Edge length of a single cell in world units.
    #[must_use]
    pub const fn cell_length(&self) -> f32 {
        self.cell_length
    }

    /// Number of cells along each axis.
    #[must_use]
    pub const fn dimensions(&self) -> [u32; 3] {
        self.dimensions
    }

    /// World position of the minimum corner of cell `(0, 0, 0)`.
    #[must_use]
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }
}

impl Default for UniformGrid {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl CoordinateMapper for UniformGrid {
    fn world_to_cell(&self, point: Vec3) -> Cell {
        let local = (point - self.origin) / self.cell_length;
        let floored = local.floor();
        Cell::new(floored.x as i32, floored.y as i32, floored.z as i32)
    }

    fn cell_to_world_center(&self, cell: Cell) -> Vec3 {
        let index = Vec3::new(cell.x() as f32, cell.y() as f32, cell.z() as f32);
        self.origin + (index + Vec3::splat(0.5)) * self.cell_length
    }

    fn box_to_world_center(&self, origin: Cell, size: FootprintSize) -> Vec3 {
        let index = Vec3::new(origin.x() as f32, origin.y() as f32, origin.z() as f32);
        let extent = Vec3::new(size.x() as f32, size.y() as f32, size.z() as f32);
        self.origin + (index + extent * 0.5) * self.cell_length
    }

    fn is_inside(&self, cell: Cell) -> bool {
        Axis::ALL
            .into_iter()
            .zip(self.dimensions)
            .all(|(axis, bound)| {
                let value = cell.along(axis);
                value >= 0 && i64::from(value) < i64::from(bound)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> UniformGrid {
        UniformGrid::new(GridConfig {
            cell_length: 2.0,
            dimensions: [10, 4, 6],
            center: [0.0, 1.0, 0.0],
        })
    }

    #[test]
    fn origin_centres_horizontal_extent_and_keeps_floor() {
        assert_eq!(grid().origin(), Vec3::new(-10.0, 1.0, -6.0));
    }

    #[test]
    fn world_to_cell_floors_negative_offsets() {
        let grid = grid();
        assert_eq!(grid.world_to_cell(Vec3::new(-10.0, 1.0, -6.0)), Cell::new(0, 0, 0));
        assert_eq!(grid.world_to_cell(Vec3::new(-10.5, 0.9, -6.0)), Cell::new(-1, -1, 0));
        assert_eq!(grid.world_to_cell(Vec3::new(-7.9, 4.0, 5.9)), Cell::new(1, 1, 5));
    }

    #[test]
    fn cell_center_round_trips_through_world_to_cell() {
        let grid = grid();
        let cell = Cell::new(3, 2, 4);
        let center = grid.cell_to_world_center(cell);
        assert_eq!(center, Vec3::new(-3.0, 6.0, 3.0));
        assert_eq!(grid.world_to_cell(center), cell);
    }

    #[test]
    fn box_center_accounts_for_size() {
        let grid = grid();
        let size = FootprintSize::new(2, 1, 2).expect("valid size");
        let center = grid.box_to_world_center(Cell::new(0, 0, 0), size);
        assert_eq!(center, Vec3::new(-8.0, 2.0, -4.0));
    }

    #[test]
    fn bounds_are_half_open() {
        let grid = grid();
        assert!(grid.is_inside(Cell::new(0, 0, 0)));
        assert!(grid.is_inside(Cell::new(9, 3, 5)));
        assert!(!grid.is_inside(Cell::new(10, 0, 0)));
        assert!(!grid.is_inside(Cell::new(0, -1, 0)));
        assert!(!grid.is_inside(Cell::new(0, 0, 6)));
    }

    #[test]
    fn non_positive_cell_length_falls_back_to_unit() {
        let grid = UniformGrid::new(GridConfig {
            cell_length: 0.0,
            ..GridConfig::default()
        });
        assert_eq!(grid.cell_length(), 1.0);
    }
}
