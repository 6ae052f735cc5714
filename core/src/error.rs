use thiserror::Error;

use crate::{Cell, ObjectId, ObjectTypeId};

/// Reasons a placement or removal request may be rejected.
///
/// Every variant aborts only the current operation; the occupancy map and
/// tool state are left exactly as they were before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum PlacementError {
    /// No coordinate mapper is configured, so no cell math is possible.
    #[error("no grid is configured")]
    NoGrid,
    /// A cell of the candidate footprint lies outside the grid.
    #[error("cell {cell} is outside the grid")]
    OutOfBounds {
        /// First offending cell in x, y, z iteration order.
        cell: Cell,
    },
    /// A cell of the candidate footprint is already claimed.
    #[error("cell {cell} is occupied by object {by}")]
    Occupied {
        /// First offending cell in x, y, z iteration order.
        cell: Cell,
        /// Object currently owning the cell.
        by: ObjectId,
    },
    /// The selected object type is not present in the catalog.
    #[error("object type {id} is not in the catalog")]
    UnknownObjectType {
        /// Identifier that failed to resolve.
        id: ObjectTypeId,
    },
    /// The object type exists but carries no creation template.
    #[error("object type {id} has no creation template")]
    MissingTemplate {
        /// Identifier of the incomplete descriptor.
        id: ObjectTypeId,
    },
    /// A line gesture resolved to no cells.
    #[error("line gesture produced no cells")]
    EmptyLine,
}
