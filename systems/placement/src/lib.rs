#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement solver translating surface picks into grid cells.
//!
//! Single picks resolve to a placement origin (snapped flush against the
//! face of a picked object, or pinned to the ground level) or to a removal
//! cell. Line gestures expand an anchor and an end cell into the ordered cells
//! that should each receive an independent placement. Nothing here touches the
//! occupancy map: every emitted cell still has to be validated by the caller.

mod line;

use blockyard_core::{
    Axis, Cell, CoordinateMapper, Footprint, FootprintSize, LineMode, ObjectId, PickResult,
    PlacementError,
};
use glam::Vec3;

pub use line::{diagonal_cells, orthogonal_cells, DiagonalCells};

/// Distance used to nudge a hit point into the surface it lies on.
pub const DEFAULT_SURFACE_EPSILON: f32 = 0.01;

/// Parameters shared by every resolution performed by the solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    ground_level: i32,
    surface_epsilon: f32,
}

impl Config {
    /// Creates a solver configuration.
    #[must_use]
    pub const fn new(ground_level: i32, surface_epsilon: f32) -> Self {
        Self {
            ground_level,
            surface_epsilon,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(0, DEFAULT_SURFACE_EPSILON)
    }
}

/// Axis-aligned unit normal derived from an arbitrary surface normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceNormal {
    axis: Axis,
    positive: bool,
}

impl FaceNormal {
    /// Selects the axis with the largest absolute component and takes its sign.
    ///
    /// Ties resolve in favour of x, then y, then z. A zero component counts as
    /// positive.
    #[must_use]
    pub fn from_normal(normal: Vec3) -> Self {
        let magnitude = normal.abs();
        let axis = if magnitude.x >= magnitude.y && magnitude.x >= magnitude.z {
            Axis::X
        } else if magnitude.y >= magnitude.z {
            Axis::Y
        } else {
            Axis::Z
        };
        let component = match axis {
            Axis::X => normal.x,
            Axis::Y => normal.y,
            Axis::Z => normal.z,
        };

        Self {
            axis,
            positive: component >= 0.0,
        }
    }

    /// Axis the face is perpendicular to.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Whether the face points toward increasing coordinates.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.positive
    }

    /// Unit vector pointing out of the face.
    #[must_use]
    pub fn to_vec3(self) -> Vec3 {
        let sign = if self.positive { 1.0 } else { -1.0 };
        match self.axis {
            Axis::X => Vec3::new(sign, 0.0, 0.0),
            Axis::Y => Vec3::new(0.0, sign, 0.0),
            Axis::Z => Vec3::new(0.0, 0.0, sign),
        }
    }
}

/// Stateless solver resolving picks and gestures into cells.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlacementSolver {
    config: Config,
}

impl PlacementSolver {
    /// Creates a solver using the provided configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolves the origin cell for placing a footprint of `size` at `pick`.
    ///
    /// When the pick hit a placed object whose footprint `footprint_of` knows,
    /// the new footprint is snapped flush against the hit face. Otherwise the
    /// hit point is treated as ground and pinned to the ground level.
    pub fn resolve_place<M, F>(
        &self,
        mapper: Option<&M>,
        pick: &PickResult,
        size: FootprintSize,
        mut footprint_of: F,
    ) -> Result<Cell, PlacementError>
    where
        M: CoordinateMapper + ?Sized,
        F: FnMut(ObjectId) -> Option<Footprint>,
    {
        let mapper = mapper.ok_or(PlacementError::NoGrid)?;
        let face = FaceNormal::from_normal(pick.normal);

        if let Some(target) = pick.object.and_then(&mut footprint_of) {
            return Ok(self.snap_against(mapper, target, size, face, pick.point));
        }

        let cell = mapper.world_to_cell(pick.point);
        Ok(cell.with(Axis::Y, self.config.ground_level))
    }

    /// Resolves the cell targeted for removal by `pick`.
    ///
    /// The hit point is nudged into the surface along the raw normal so a
    /// click on a face selects the cell behind it.
    pub fn resolve_remove<M>(
        &self,
        mapper: Option<&M>,
        pick: &PickResult,
    ) -> Result<Cell, PlacementError>
    where
        M: CoordinateMapper + ?Sized,
    {
        let mapper = mapper.ok_or(PlacementError::NoGrid)?;
        let inside = pick.point - pick.normal * self.config.surface_epsilon;
        Ok(mapper.world_to_cell(inside))
    }

    /// Expands a line gesture into its placement cells using `mode`.
    ///
    /// Both endpoints are pinned to the ground level first. `size` is the
    /// footprint being placed and only affects orthogonal lines.
    ///
    /// An anchor outside the grid fails with [`PlacementError::OutOfBounds`].
    /// Otherwise the line is cut at the first cell that leaves the grid: both
    /// coordinates move monotonically, so no later cell can re-enter it and the
    /// work stays bounded by the grid dimensions however far `current` lies.
    pub fn resolve_line<M>(
        &self,
        mapper: Option<&M>,
        mode: LineMode,
        anchor: Cell,
        current: Cell,
        size: FootprintSize,
    ) -> Result<Vec<Cell>, PlacementError>
    where
        M: CoordinateMapper + ?Sized,
    {
        let mapper = mapper.ok_or(PlacementError::NoGrid)?;
        let ground = self.config.ground_level;
        let anchor = anchor.with(Axis::Y, ground);
        let current = current.with(Axis::Y, ground);
        if !mapper.is_inside(anchor) {
            return Err(PlacementError::OutOfBounds { cell: anchor });
        }

        let inside = |cell: &Cell| mapper.is_inside(*cell);
        let cells: Vec<Cell> = match mode {
            LineMode::Diagonal => diagonal_cells(anchor, current).take_while(inside).collect(),
            LineMode::Orthogonal => orthogonal_cells(anchor, current, size)
                .take_while(inside)
                .collect(),
        };

        if cells.is_empty() {
            return Err(PlacementError::EmptyLine);
        }
        Ok(cells)
    }

    fn snap_against<M>(
        &self,
        mapper: &M,
        target: Footprint,
        size: FootprintSize,
        face: FaceNormal,
        point: Vec3,
    ) -> Cell
    where
        M: CoordinateMapper + ?Sized,
    {
        let inside = mapper.world_to_cell(point - face.to_vec3() * self.config.surface_epsilon);
        let axis = face.axis();
        let coordinate = if face.is_positive() {
            target.far_face(axis)
        } else {
            target.origin().along(axis).saturating_sub(size.span(axis))
        };
        inside.with(axis, coordinate)
    }
}
