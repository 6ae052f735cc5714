#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Placement tool state machine.
//!
//! Tracks the active tool, the selected object type, and the anchor of a
//! pending line gesture. Every transition that could invalidate the anchor's
//! assumptions (tool or selection changes) clears it and hands the discarded
//! anchor back so callers can report the cancellation.

use blockyard_core::{Cell, LineMode, ObjectTypeId, PlaceTool};
use thiserror::Error;

/// Reasons a line gesture cannot begin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BeginLineError {
    /// The active tool does not draw lines.
    #[error("the line tool is not active")]
    NotLineTool,
    /// A gesture is already in progress; its anchor is left untouched.
    #[error("a line gesture is already anchored at {anchor}")]
    AnchorPending {
        /// Anchor of the gesture in progress.
        anchor: Cell,
    },
}

/// Active tool, selection, and pending line anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolState {
    tool: PlaceTool,
    selection: ObjectTypeId,
    line_mode: LineMode,
    anchor: Option<Cell>,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(PlaceTool::Single, ObjectTypeId::new(0), LineMode::Diagonal)
    }
}

impl ToolState {
    /// Creates a tool state with no pending gesture.
    #[must_use]
    pub const fn new(tool: PlaceTool, selection: ObjectTypeId, line_mode: LineMode) -> Self {
        Self {
            tool,
            selection,
            line_mode,
            anchor: None,
        }
    }

    /// Tool currently driving primary clicks.
    #[must_use]
    pub const fn tool(&self) -> PlaceTool {
        self.tool
    }

    /// Object type placed by the next click.
    #[must_use]
    pub const fn selection(&self) -> ObjectTypeId {
        self.selection
    }

    /// Geometry used when committing a line.
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Anchor of the pending line gesture, if any.
    #[must_use]
    pub const fn anchor(&self) -> Option<Cell> {
        self.anchor
    }

    /// Activates `tool`, returning the anchor that was discarded.
    pub fn set_tool(&mut self, tool: PlaceTool) -> Option<Cell> {
        self.tool = tool;
        self.anchor.take()
    }

    /// Switches between the single and line tools, returning the discarded anchor.
    pub fn toggle_tool(&mut self) -> Option<Cell> {
        self.set_tool(self.tool.toggled())
    }

    /// Changes the line geometry. A pending anchor stays valid.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }

    /// Selects `id`, returning the discarded anchor.
    pub fn select_object_type(&mut self, id: ObjectTypeId) -> Option<Cell> {
        self.selection = id;
        self.anchor.take()
    }

    /// Moves the selection by `delta` within `count` catalog entries.
    ///
    /// Stepping past either end wraps to the opposite end. With an empty
    /// catalog the selection is kept. The pending anchor is discarded in
    /// every case and returned.
    pub fn step_selection(&mut self, delta: i32, count: usize) -> Option<Cell> {
        if count > 0 {
            let count = i64::try_from(count).unwrap_or(i64::MAX);
            let stepped = i64::from(self.selection.get()) + i64::from(delta);
            let wrapped = if stepped < 0 {
                count - 1
            } else if stepped >= count {
                0
            } else {
                stepped
            };
            self.selection = ObjectTypeId::new(u32::try_from(wrapped).unwrap_or(0));
        }
        self.anchor.take()
    }

    /// Records the first click of a line gesture.
    ///
    /// Only valid while the line tool is active and no anchor is pending; a
    /// rejected call never overwrites the existing anchor.
    pub fn begin_line(&mut self, cell: Cell) -> Result<(), BeginLineError> {
        if self.tool != PlaceTool::Line {
            return Err(BeginLineError::NotLineTool);
        }
        if let Some(anchor) = self.anchor {
            return Err(BeginLineError::AnchorPending { anchor });
        }
        self.anchor = Some(cell);
        Ok(())
    }

    /// Ends the pending gesture, returning its anchor for commitment.
    ///
    /// The anchor is cleared whether or not the caller's commit succeeds, so
    /// a gesture never spans more than two picks.
    pub fn take_anchor(&mut self) -> Option<Cell> {
        self.anchor.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_state() -> ToolState {
        ToolState::new(PlaceTool::Line, ObjectTypeId::new(1), LineMode::Diagonal)
    }

    #[test]
    fn begin_line_records_anchor() {
        let mut state = line_state();
        assert_eq!(state.begin_line(Cell::new(1, 0, 2)), Ok(()));
        assert_eq!(state.anchor(), Some(Cell::new(1, 0, 2)));
    }

    #[test]
    fn begin_line_never_overwrites_pending_anchor() {
        let mut state = line_state();
        state.begin_line(Cell::new(1, 0, 2)).expect("first anchor");

        assert_eq!(
            state.begin_line(Cell::new(5, 0, 5)),
            Err(BeginLineError::AnchorPending {
                anchor: Cell::new(1, 0, 2),
            })
        );
        assert_eq!(state.anchor(), Some(Cell::new(1, 0, 2)));
    }

    #[test]
    fn begin_line_requires_line_tool() {
        let mut state = ToolState::default();
        assert_eq!(
            state.begin_line(Cell::new(0, 0, 0)),
            Err(BeginLineError::NotLineTool)
        );
        assert_eq!(state.anchor(), None);
    }

    #[test]
    fn tool_changes_discard_anchor() {
        let mut state = line_state();
        state.begin_line(Cell::new(3, 0, 3)).expect("anchor");
        assert_eq!(state.set_tool(PlaceTool::Line), Some(Cell::new(3, 0, 3)));
        assert_eq!(state.anchor(), None);

        state.begin_line(Cell::new(4, 0, 4)).expect("fresh anchor");
        assert_eq!(state.toggle_tool(), Some(Cell::new(4, 0, 4)));
        assert_eq!(state.tool(), PlaceTool::Single);
        assert_eq!(state.anchor(), None);
    }

    #[test]
    fn selection_changes_discard_anchor() {
        let mut state = line_state();
        state.begin_line(Cell::new(0, 0, 0)).expect("anchor");
        assert_eq!(
            state.select_object_type(ObjectTypeId::new(2)),
            Some(Cell::new(0, 0, 0))
        );
        assert_eq!(state.selection(), ObjectTypeId::new(2));

        state.begin_line(Cell::new(1, 0, 0)).expect("anchor");
        assert_eq!(state.step_selection(1, 0), Some(Cell::new(1, 0, 0)));
        assert_eq!(state.selection(), ObjectTypeId::new(2), "empty catalog keeps selection");
    }

    #[test]
    fn step_selection_wraps_to_opposite_end() {
        let mut state = ToolState::default();
        let _ = state.step_selection(-1, 3);
        assert_eq!(state.selection(), ObjectTypeId::new(2));
        let _ = state.step_selection(1, 3);
        assert_eq!(state.selection(), ObjectTypeId::new(0));
        let _ = state.step_selection(1, 3);
        assert_eq!(state.selection(), ObjectTypeId::new(1));
    }

    #[test]
    fn line_mode_change_keeps_anchor() {
        let mut state = line_state();
        state.begin_line(Cell::new(2, 0, 2)).expect("anchor");
        state.set_line_mode(LineMode::Orthogonal);
        assert_eq!(state.line_mode(), LineMode::Orthogonal);
        assert_eq!(state.take_anchor(), Some(Cell::new(2, 0, 2)));
        assert_eq!(state.take_anchor(), None);
    }
}
