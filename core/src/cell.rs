//! Discrete grid coordinates and the axis-aligned boxes objects occupy.

use std::fmt;

use glam::IVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// Horizontal axis running east-west.
    X,
    /// Vertical axis.
    Y,
    /// Horizontal axis running north-south.
    Z,
}

impl Axis {
    /// All axes in comparison priority order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Location of a single grid cell expressed as integer coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    x: i32,
    y: i32,
    z: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along the x axis.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Coordinate along the y axis.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Coordinate along the z axis.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Coordinate along the provided axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Returns a copy of the cell with the coordinate on `axis` replaced.
    #[must_use]
    pub const fn with(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => Self { x: value, ..self },
            Axis::Y => Self { y: value, ..self },
            Axis::Z => Self { z: value, ..self },
        }
    }

    /// Returns the cell displaced by the provided per-axis offsets.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }
}

impl From<IVec3> for Cell {
    fn from(value: IVec3) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Cell> for IVec3 {
    fn from(value: Cell) -> Self {
        IVec3::new(value.x, value.y, value.z)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Error returned when a footprint size contains a zero extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("footprint size {x}x{y}x{z} must be at least one cell along every axis")]
pub struct InvalidFootprintSize {
    /// Requested extent along x.
    pub x: u32,
    /// Requested extent along y.
    pub y: u32,
    /// Requested extent along z.
    pub z: u32,
}

/// Extent of a footprint measured in whole cells, at least one along every axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u32; 3]", into = "[u32; 3]")]
pub struct FootprintSize {
    x: u32,
    y: u32,
    z: u32,
}

impl FootprintSize {
    /// Footprint of a single cell.
    pub const UNIT: Self = Self { x: 1, y: 1, z: 1 };

    /// Creates a footprint size, rejecting zero extents.
    pub const fn new(x: u32, y: u32, z: u32) -> Result<Self, InvalidFootprintSize> {
        if x == 0 || y == 0 || z == 0 {
            return Err(InvalidFootprintSize { x, y, z });
        }
        Ok(Self { x, y, z })
    }

    /// Extent along the x axis.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Extent along the y axis.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Extent along the z axis.
    #[must_use]
    pub const fn z(&self) -> u32 {
        self.z
    }

    /// Extent along the provided axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Extent along `axis` as a signed cell delta.
    #[must_use]
    pub fn span(&self, axis: Axis) -> i32 {
        i32::try_from(self.along(axis)).unwrap_or(i32::MAX)
    }

    /// Number of cells covered by a footprint of this size.
    #[must_use]
    pub const fn volume(&self) -> u64 {
        self.x as u64 * self.y as u64 * self.z as u64
    }
}

impl Default for FootprintSize {
    fn default() -> Self {
        Self::UNIT
    }
}

impl TryFrom<[u32; 3]> for FootprintSize {
    type Error = InvalidFootprintSize;

    fn try_from([x, y, z]: [u32; 3]) -> Result<Self, Self::Error> {
        Self::new(x, y, z)
    }
}

impl From<FootprintSize> for [u32; 3] {
    fn from(value: FootprintSize) -> Self {
        [value.x, value.y, value.z]
    }
}

impl fmt::Display for FootprintSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// Axis-aligned box of cells anchored at its minimum corner.
///
/// Footprints never rotate; the covered cells are
/// `origin + (i, j, k)` for `0 <= i < size.x`, `0 <= j < size.y`, `0 <= k < size.z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Footprint {
    origin: Cell,
    size: FootprintSize,
}

impl Footprint {
    /// Constructs a footprint from an origin cell and size.
    #[must_use]
    pub const fn new(origin: Cell, size: FootprintSize) -> Self {
        Self { origin, size }
    }

    /// Minimum corner of the box.
    #[must_use]
    pub const fn origin(&self) -> Cell {
        self.origin
    }

    /// Extent of the box in cells.
    #[must_use]
    pub const fn size(&self) -> FootprintSize {
        self.size
    }

    /// First coordinate past the box on `axis` (the far face).
    #[must_use]
    pub fn far_face(&self, axis: Axis) -> i32 {
        self.origin
            .along(axis)
            .saturating_add(self.size.span(axis))
    }

    /// Reports whether the cell lies inside the box.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            let value = cell.along(axis);
            value >= self.origin.along(axis) && value < self.far_face(axis)
        })
    }

    /// Reports whether the two boxes share at least one cell.
    #[must_use]
    pub fn overlaps(&self, other: &Footprint) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            self.origin.along(axis) < other.far_face(axis)
                && other.origin.along(axis) < self.far_face(axis)
        })
    }

    /// Iterates the covered cells with x outermost, then y, then z, all ascending.
    #[must_use]
    pub const fn cells(&self) -> FootprintCells {
        FootprintCells {
            footprint: *self,
            cursor: [0, 0, 0],
            done: false,
        }
    }
}

impl IntoIterator for Footprint {
    type Item = Cell;
    type IntoIter = FootprintCells;

    fn into_iter(self) -> Self::IntoIter {
        self.cells()
    }
}

/// Restartable iterator over the cells of a [`Footprint`].
#[derive(Clone, Debug)]
pub struct FootprintCells {
    footprint: Footprint,
    cursor: [u32; 3],
    done: bool,
}

impl Iterator for FootprintCells {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let [i, j, k] = self.cursor;
        let origin = self.footprint.origin;
        let cell = origin.offset(to_delta(i), to_delta(j), to_delta(k));

        let size = self.footprint.size;
        if k + 1 < size.z {
            self.cursor[2] = k + 1;
        } else if j + 1 < size.y {
            self.cursor = [i, j + 1, 0];
        } else if i + 1 < size.x {
            self.cursor = [i + 1, 0, 0];
        } else {
            self.done = true;
        }

        Some(cell)
    }
}

fn to_delta(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
