#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Blockyard placement engine.
//!
//! This crate defines the grid vocabulary ([`Cell`], [`Footprint`]), the
//! collaborator contracts the engine consumes ([`CoordinateMapper`],
//! [`ObjectCatalog`], [`PickSource`], [`EntityHost`]), and the message surface
//! the builder controller reports through: hosts feed [`InputEvent`] values in
//! and receive [`Event`] values describing every placement, removal, and tool
//! transition that resulted.

mod catalog;
mod cell;
mod entity;
mod error;
mod grid;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use catalog::{Catalog, ObjectCatalog, ObjectTypeDescriptor, ObjectTypeId, Template};
pub use cell::{Axis, Cell, Footprint, FootprintCells, FootprintSize, InvalidFootprintSize};
pub use entity::{EntityHost, FootprintTag, PickResult, PickSource};
pub use error::PlacementError;
pub use grid::{CoordinateMapper, GridConfig, UniformGrid};

/// Opaque handle identifying a placed object.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates a new object handle with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Placement tool currently driving primary clicks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceTool {
    /// Every click places one object; holding the button drags.
    #[default]
    Single,
    /// Two clicks define a line of objects.
    Line,
}

impl PlaceTool {
    /// Returns the other tool.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Single => Self::Line,
            Self::Line => Self::Single,
        }
    }
}

/// Geometry used to expand a line gesture into cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMode {
    /// Rasterized segment; every cell receives an independent placement.
    #[default]
    Diagonal,
    /// Locked to the dominant horizontal axis, strided by footprint size.
    Orthogonal,
}

/// Discrete input events fed to the builder controller each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// Primary pointer button pressed.
    PointerPrimaryDown,
    /// Primary pointer button released.
    PointerPrimaryUp,
    /// Secondary pointer button pressed.
    PointerSecondaryDown,
    /// Secondary pointer button released.
    PointerSecondaryUp,
    /// Pointer moved while over the interactive surface.
    PointerMoved,
    /// Pointer left the interactive surface (e.g. entered a UI panel).
    PointerLeftSurface,
    /// Switch between the single and line tools.
    ToggleTool,
    /// Select the next catalog entry.
    NextItem,
    /// Select the previous catalog entry.
    PreviousItem,
}

/// Outcomes reported by the builder controller after processing input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// An object was spawned and its footprint registered.
    ObjectPlaced {
        /// Identity and footprint of the new object.
        tag: FootprintTag,
    },
    /// A placement request was rejected without touching any state.
    PlacementRejected {
        /// Object type requested for placement.
        kind: ObjectTypeId,
        /// Resolved origin cell, when resolution got that far.
        origin: Option<Cell>,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// An object was destroyed and its footprint cleared.
    ObjectRemoved {
        /// Identity and footprint of the removed object.
        tag: FootprintTag,
    },
    /// A cell owned by an object without footprint metadata was cleared.
    StrayCellCleared {
        /// Cell that was released.
        cell: Cell,
        /// Owner recorded for the cell.
        object: ObjectId,
    },
    /// A removal request found no owner; nothing changed.
    NothingRemoved {
        /// Cell that was inspected, when one was resolved.
        cell: Option<Cell>,
    },
    /// A removal request could not resolve a cell.
    RemovalRejected {
        /// Specific reason the removal failed.
        reason: PlacementError,
    },
    /// The active placement tool changed.
    ToolChanged {
        /// Tool that became active.
        tool: PlaceTool,
    },
    /// The selected object type changed.
    SelectionChanged {
        /// Newly selected object type.
        id: ObjectTypeId,
    },
    /// The first click of a line gesture recorded its anchor.
    LineStarted {
        /// Anchor cell of the gesture.
        anchor: Cell,
    },
    /// A pending line gesture was abandoned.
    LineCancelled {
        /// Anchor that was discarded.
        anchor: Cell,
    },
    /// A line gesture finished; individual cells were reported separately.
    LineCommitted {
        /// Anchor cell of the gesture.
        anchor: Cell,
        /// Cell resolved by the committing click.
        end: Cell,
        /// Number of objects placed along the line.
        placed: usize,
        /// Number of line cells rejected by validation.
        rejected: usize,
    },
}
