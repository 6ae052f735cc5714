//! Line gesture geometry on the horizontal x/z plane.
//!
//! Both generators are lazy, so callers can stop at the grid boundary without
//! materialising the rest of an arbitrarily long segment.

use blockyard_core::{Axis, Cell, FootprintSize};

/// Rasterizes the segment from `anchor` to `current` across x and z.
///
/// Uses integer Bresenham stepping: every cell the ideal line passes through
/// is emitted once, from `anchor` to `current` inclusive. The y coordinate of
/// `anchor` is used for every cell. Footprint size is ignored.
#[must_use]
pub fn diagonal_cells(anchor: Cell, current: Cell) -> DiagonalCells {
    let (x, z) = (i64::from(anchor.x()), i64::from(anchor.z()));
    let (x1, z1) = (i64::from(current.x()), i64::from(current.z()));
    let dx = (x1 - x).abs();
    let dz = (z1 - z).abs();

    DiagonalCells {
        y: anchor.y(),
        x,
        z,
        x1,
        z1,
        dx,
        dz,
        step_x: if x < x1 { 1 } else { -1 },
        step_z: if z < z1 { 1 } else { -1 },
        error: dx - dz,
        done: false,
    }
}

/// Cells of a rasterized segment, produced by [`diagonal_cells`].
#[derive(Clone, Debug)]
pub struct DiagonalCells {
    y: i32,
    x: i64,
    z: i64,
    x1: i64,
    z1: i64,
    dx: i64,
    dz: i64,
    step_x: i64,
    step_z: i64,
    error: i64,
    done: bool,
}

impl Iterator for DiagonalCells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.done {
            return None;
        }

        let cell = Cell::new(narrow(self.x), self.y, narrow(self.z));
        if self.x == self.x1 && self.z == self.z1 {
            self.done = true;
            return Some(cell);
        }

        let doubled = 2 * self.error;
        if doubled > -self.dz {
            self.error -= self.dz;
            self.x += self.step_x;
        }
        if doubled < self.dx {
            self.error += self.dx;
            self.z += self.step_z;
        }
        Some(cell)
    }
}

/// Emits cells along the dominant horizontal axis, strided by footprint size.
///
/// The axis with the larger delta wins (x on ties) and the other coordinate is
/// pinned to the anchor. Starting at `anchor`, `|delta| / stride` further cells
/// are emitted, where the stride is the footprint's extent along the dominant
/// axis, so consecutive footprints sit flush without overlapping.
pub fn orthogonal_cells(
    anchor: Cell,
    current: Cell,
    size: FootprintSize,
) -> impl Iterator<Item = Cell> {
    let dx = i64::from(current.x()) - i64::from(anchor.x());
    let dz = i64::from(current.z()) - i64::from(anchor.z());
    let (axis, delta) = if dx.abs() >= dz.abs() {
        (Axis::X, dx)
    } else {
        (Axis::Z, dz)
    };

    let stride = i64::from(size.along(axis).max(1));
    let direction = if delta > 0 { 1 } else { -1 };
    let steps = delta.abs() / stride;
    let start = i64::from(anchor.along(axis));

    (0..=steps).map(move |index| anchor.with(axis, narrow(start + direction * stride * index)))
}

// Every coordinate produced above lies between two i32 endpoints.
fn narrow(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(cells: impl IntoIterator<Item = Cell>) -> Vec<(i32, i32)> {
        cells.into_iter().map(|cell| (cell.x(), cell.z())).collect()
    }

    #[test]
    fn shallow_line_alternates_steps() {
        let cells = diagonal_cells(Cell::new(0, 0, 0), Cell::new(4, 0, 2));
        assert_eq!(flat(cells), vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]);
    }

    #[test]
    fn reversed_line_runs_from_anchor_toward_smaller_coordinates() {
        let cells = diagonal_cells(Cell::new(4, 0, 2), Cell::new(0, 0, 0));
        assert_eq!(
            flat(cells),
            vec![(4, 2), (3, 2), (2, 1), (1, 1), (0, 0)],
            "cells must be ordered from the anchor to the current cell",
        );
    }

    #[test]
    fn steep_line_steps_along_z_every_cell() {
        let cells = diagonal_cells(Cell::new(0, 0, 0), Cell::new(2, 0, 5));
        assert_eq!(
            flat(cells),
            vec![(0, 0), (0, 1), (1, 2), (1, 3), (2, 4), (2, 5)]
        );
    }

    #[test]
    fn single_point_line_emits_anchor_once() {
        let anchor = Cell::new(3, 2, -4);
        assert_eq!(diagonal_cells(anchor, anchor).collect::<Vec<_>>(), vec![anchor]);
        assert_eq!(
            orthogonal_cells(anchor, anchor, FootprintSize::UNIT).collect::<Vec<_>>(),
            vec![anchor]
        );
    }

    #[test]
    fn far_endpoint_is_generated_lazily() {
        let far = Cell::new(i32::MAX, 0, 5);
        let head: Vec<_> = diagonal_cells(Cell::new(0, 0, 0), far).take(3).collect();
        assert_eq!(head.len(), 3);

        let strided: Vec<_> = orthogonal_cells(Cell::new(0, 0, 0), far, FootprintSize::UNIT)
            .take(3)
            .collect();
        assert_eq!(flat(strided), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn orthogonal_line_pins_minor_axis_to_anchor() {
        let cells = orthogonal_cells(Cell::new(1, 0, 1), Cell::new(2, 0, -3), FootprintSize::UNIT);
        assert_eq!(flat(cells), vec![(1, 1), (1, 0), (1, -1), (1, -2), (1, -3)]);
    }

    #[test]
    fn orthogonal_stride_drops_partial_trailing_step() {
        let size = FootprintSize::new(1, 1, 3).expect("valid size");
        let cells = orthogonal_cells(Cell::new(0, 0, 0), Cell::new(0, 0, 7), size);
        assert_eq!(flat(cells), vec![(0, 0), (0, 3), (0, 6)]);
    }

    #[test]
    fn orthogonal_tie_prefers_x_axis() {
        let size = FootprintSize::new(2, 1, 2).expect("valid size");
        let cells = orthogonal_cells(Cell::new(0, 0, 0), Cell::new(-4, 0, 4), size);
        assert_eq!(flat(cells), vec![(0, 0), (-2, 0), (-4, 0)]);
    }
}
