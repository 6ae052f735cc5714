#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Builder controller wiring picks, tools, occupancy, and spawning together.
//!
//! The [`Builder`] owns the occupancy map and the tool state, routes each
//! [`InputEvent`] to a placement, removal, or tool transition, and reports the
//! result as [`Event`] values. Every rejected request leaves the occupancy map
//! and the host untouched.

use blockyard_core::{
    Cell, CoordinateMapper, EntityHost, Event, Footprint, FootprintTag, InputEvent, LineMode,
    ObjectCatalog, ObjectId, ObjectTypeDescriptor, ObjectTypeId, PickResult, PickSource,
    PlaceTool, PlacementError,
};
use blockyard_system_placement::{Config, PlacementSolver, DEFAULT_SURFACE_EPSILON};
use blockyard_system_spawner::Spawner;
use blockyard_system_tools::{BeginLineError, ToolState};
use blockyard_world::OccupancyMap;
use serde::Deserialize;
use thiserror::Error;

/// Settings applied when a builder is created.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Vertical cell used for ground placements and line gestures.
    pub ground_level: i32,
    /// Distance a hit point is pushed into a surface before mapping it to a cell.
    pub surface_epsilon: f32,
    /// Tool active at startup.
    pub initial_tool: PlaceTool,
    /// Object type selected at startup.
    pub initial_selection: ObjectTypeId,
    /// Geometry used when committing lines.
    pub line_mode: LineMode,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            ground_level: 0,
            surface_epsilon: DEFAULT_SURFACE_EPSILON,
            initial_tool: PlaceTool::Single,
            initial_selection: ObjectTypeId::new(0),
            line_mode: LineMode::Diagonal,
        }
    }
}

/// Declarative placement preview describing a potential construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementPreview {
    /// Object type proposed for placement.
    pub kind: ObjectTypeId,
    /// Cells the object would claim if placed.
    pub footprint: Footprint,
    /// Indicates whether the preview represents a valid placement location.
    pub placeable: bool,
    /// Validation failure when the location is not placeable.
    pub rejection: Option<PlacementError>,
}

/// Result of a removal request that resolved a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The object was destroyed and its whole footprint released.
    Removed(FootprintTag),
    /// The owner carried no footprint metadata; only the looked-up cell was released.
    StrayCleared {
        /// Cell that was released.
        cell: Cell,
        /// Owner that was recorded for the cell.
        object: ObjectId,
    },
    /// No object owned the resolved cell.
    Nothing {
        /// Cell that was inspected.
        cell: Cell,
    },
}

/// Cells placed and rejected by a committed line gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineReport {
    /// First cell of the gesture.
    pub anchor: Cell,
    /// Cell resolved by the committing pick.
    pub end: Cell,
    /// Objects placed, in line order.
    pub placed: Vec<FootprintTag>,
    /// Line cells that failed validation, in line order.
    pub rejected: Vec<(Cell, PlacementError)>,
}

/// Reasons the first click of a line gesture was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LineStartError {
    /// The tool state does not accept a new anchor.
    #[error(transparent)]
    Tool(#[from] BeginLineError),
    /// The anchor pick could not be resolved to a cell.
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragKind {
    Place,
    Remove,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Drag {
    kind: Option<DragKind>,
    last_cell: Option<Cell>,
    last_failure: Option<PlacementError>,
}

impl Drag {
    fn start(&mut self, kind: DragKind) {
        *self = Self {
            kind: Some(kind),
            ..Self::default()
        };
    }

    fn end(&mut self, kind: DragKind) {
        if self.kind == Some(kind) {
            *self = Self::default();
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records `cell`, returning `false` when it repeats the last touched cell.
    fn touch(&mut self, cell: Cell) -> bool {
        if self.last_cell == Some(cell) {
            return false;
        }
        self.last_cell = Some(cell);
        self.last_failure = None;
        true
    }

    /// Records a resolution failure, returning `false` when it repeats the last one.
    fn fail(&mut self, reason: PlacementError) -> bool {
        if self.last_failure == Some(reason) {
            return false;
        }
        self.last_failure = Some(reason);
        self.last_cell = None;
        true
    }
}

/// Controller translating picks and input events into placements and removals.
#[derive(Debug)]
pub struct Builder<M, C, H> {
    grid: Option<M>,
    catalog: C,
    host: H,
    occupancy: OccupancyMap,
    tools: ToolState,
    solver: PlacementSolver,
    spawner: Spawner,
    drag: Drag,
}

impl<M, C, H> Builder<M, C, H>
where
    M: CoordinateMapper,
    C: ObjectCatalog,
    H: EntityHost,
{
    /// Creates a builder with an empty occupancy map.
    ///
    /// Passing `None` for `grid` is allowed; every request that needs cell
    /// math then fails with [`PlacementError::NoGrid`].
    pub fn new(grid: Option<M>, catalog: C, host: H, config: BuilderConfig) -> Self {
        Self {
            grid,
            catalog,
            host,
            occupancy: OccupancyMap::new(),
            tools: ToolState::new(
                config.initial_tool,
                config.initial_selection,
                config.line_mode,
            ),
            solver: PlacementSolver::new(Config::new(
                config.ground_level,
                config.surface_epsilon,
            )),
            spawner: Spawner::new(),
            drag: Drag::default(),
        }
    }

    /// Coordinate mapper in use, if one is configured.
    pub fn grid(&self) -> Option<&M> {
        self.grid.as_ref()
    }

    /// Catalog consulted for the selected object type.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Host owning the spawned entities.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to advance its own simulation.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Authoritative record of which object owns each cell.
    pub fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    /// Active tool, selection, and pending line anchor.
    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    /// Spawner used for every placement; hooks can be added through it.
    pub fn spawner_mut(&mut self) -> &mut Spawner {
        &mut self.spawner
    }

    /// Activates `tool`. Any pending line gesture and drag are abandoned.
    pub fn set_tool(&mut self, tool: PlaceTool, out: &mut Vec<Event>) {
        let discarded = self.tools.set_tool(tool);
        self.drag.reset();
        Self::report_cancelled(discarded, out);
        log::debug!("tool changed to {tool:?}");
        out.push(Event::ToolChanged { tool });
    }

    /// Switches between the single and line tools.
    pub fn toggle_tool(&mut self, out: &mut Vec<Event>) {
        self.set_tool(self.tools.tool().toggled(), out);
    }

    /// Changes the line geometry. A pending anchor stays valid.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.tools.set_line_mode(line_mode);
    }

    /// Selects `id` for the following placements, abandoning any line gesture.
    pub fn select_object_type(&mut self, id: ObjectTypeId, out: &mut Vec<Event>) {
        let discarded = self.tools.select_object_type(id);
        Self::report_cancelled(discarded, out);
        log::debug!("selected object type {id}");
        out.push(Event::SelectionChanged { id });
    }

    /// Steps the selection by `delta` catalog entries, wrapping at either end.
    pub fn step_selection(&mut self, delta: i32, out: &mut Vec<Event>) {
        let before = self.tools.selection();
        let discarded = self.tools.step_selection(delta, self.catalog.len());
        Self::report_cancelled(discarded, out);

        let id = self.tools.selection();
        if id != before {
            log::debug!("selected object type {id}");
            out.push(Event::SelectionChanged { id });
        }
    }

    /// Describes where the selected object would land for `pick`.
    pub fn preview(&self, pick: &PickResult) -> Result<PlacementPreview, PlacementError> {
        let (descriptor, origin) = self.resolve_origin(pick)?;
        let footprint = Footprint::new(origin, descriptor.size);
        let grid = self.grid.as_ref().ok_or(PlacementError::NoGrid)?;
        let rejection = self.occupancy.validate(grid, footprint).err();

        Ok(PlacementPreview {
            kind: descriptor.id,
            footprint,
            placeable: rejection.is_none(),
            rejection,
        })
    }

    /// Places the selected object at the origin resolved from `pick`.
    pub fn try_place(&mut self, pick: &PickResult) -> Result<FootprintTag, PlacementError> {
        let (descriptor, origin) = self.resolve_origin(pick)?;
        self.place_at(origin, &descriptor)
    }

    /// Removes whatever `pick` designates.
    ///
    /// A direct hit on a tagged object removes that object regardless of the
    /// resolved cell. Otherwise the pick is resolved to a cell and its owner,
    /// if any, is removed.
    pub fn try_remove(&mut self, pick: &PickResult) -> Result<RemovalOutcome, PlacementError> {
        if self.grid.is_none() {
            return Err(PlacementError::NoGrid);
        }
        if let Some(tag) = pick
            .object
            .and_then(|object| self.host.footprint_tag(object))
        {
            return Ok(self.remove_tagged(tag));
        }

        let cell = self.solver.resolve_remove(self.grid.as_ref(), pick)?;
        Ok(self.remove_at_cell(cell))
    }

    /// Removes the owner of `cell`.
    ///
    /// When the owner carries no footprint metadata only `cell` itself is
    /// released, since the rest of its footprint is unknown.
    pub fn remove_at_cell(&mut self, cell: Cell) -> RemovalOutcome {
        let Some(object) = self.occupancy.lookup(cell) else {
            return RemovalOutcome::Nothing { cell };
        };

        if let Some(tag) = self.host.footprint_tag(object) {
            return self.remove_tagged(tag);
        }

        log::warn!("{object} owns {cell} but carries no footprint; clearing that cell only");
        let _ = self.occupancy.clear_cell(cell);
        let _ = self.host.destroy(object);
        RemovalOutcome::StrayCleared { cell, object }
    }

    /// Records the anchor of a line gesture at the origin resolved from `pick`.
    pub fn begin_line(&mut self, pick: &PickResult) -> Result<Cell, LineStartError> {
        let (_, anchor) = self.resolve_origin(pick)?;
        self.tools.begin_line(anchor)?;
        log::debug!("line anchored at {anchor}");
        Ok(anchor)
    }

    /// Finishes the pending line gesture at the origin resolved from `pick`.
    ///
    /// Every line cell is validated and placed independently, in order, so a
    /// blocked cell never prevents the others. The anchor is cleared whether
    /// or not the commit succeeds. Without a pending anchor the commit fails
    /// with [`PlacementError::EmptyLine`].
    pub fn commit_line(&mut self, pick: &PickResult) -> Result<LineReport, PlacementError> {
        let anchor = self.tools.take_anchor().ok_or(PlacementError::EmptyLine)?;
        let (descriptor, end) = self.resolve_origin(pick)?;
        let cells = self.solver.resolve_line(
            self.grid.as_ref(),
            self.tools.line_mode(),
            anchor,
            end,
            descriptor.size,
        )?;

        let mut report = LineReport {
            anchor,
            end,
            placed: Vec::with_capacity(cells.len()),
            rejected: Vec::new(),
        };
        for cell in cells {
            match self.place_at(cell, &descriptor) {
                Ok(tag) => report.placed.push(tag),
                Err(reason) => report.rejected.push((cell, reason)),
            }
        }

        log::debug!(
            "line {anchor} -> {end} placed {} rejected {}",
            report.placed.len(),
            report.rejected.len()
        );
        Ok(report)
    }

    /// Consumes one input event, querying `picks` as needed, and reports outcomes.
    pub fn handle<P>(&mut self, event: InputEvent, picks: &P, out: &mut Vec<Event>)
    where
        P: PickSource + ?Sized,
    {
        match event {
            InputEvent::PointerPrimaryDown => self.primary_down(picks, out),
            InputEvent::PointerPrimaryUp => self.drag.end(DragKind::Place),
            InputEvent::PointerSecondaryDown => {
                self.drag.start(DragKind::Remove);
                if let Some(pick) = picks.pick_for_remove() {
                    self.drag_remove(&pick, out);
                }
            }
            InputEvent::PointerSecondaryUp => self.drag.end(DragKind::Remove),
            InputEvent::PointerMoved => match self.drag.kind {
                Some(DragKind::Place) => {
                    if let Some(pick) = picks.pick_for_place() {
                        self.drag_place(&pick, out);
                    }
                }
                Some(DragKind::Remove) => {
                    if let Some(pick) = picks.pick_for_remove() {
                        self.drag_remove(&pick, out);
                    }
                }
                None => {}
            },
            InputEvent::PointerLeftSurface => {
                self.drag.reset();
                Self::report_cancelled(self.tools.take_anchor(), out);
            }
            InputEvent::ToggleTool => self.toggle_tool(out),
            InputEvent::NextItem => self.step_selection(1, out),
            InputEvent::PreviousItem => self.step_selection(-1, out),
        }
    }

    fn primary_down<P>(&mut self, picks: &P, out: &mut Vec<Event>)
    where
        P: PickSource + ?Sized,
    {
        match self.tools.tool() {
            PlaceTool::Single => {
                self.drag.start(DragKind::Place);
                if let Some(pick) = picks.pick_for_place() {
                    self.drag_place(&pick, out);
                }
            }
            PlaceTool::Line => {
                let Some(pick) = picks.pick_for_place() else {
                    return;
                };
                match self.tools.anchor() {
                    None => self.start_line(&pick, out),
                    Some(anchor) => self.finish_line(anchor, &pick, out),
                }
            }
        }
    }

    fn start_line(&mut self, pick: &PickResult, out: &mut Vec<Event>) {
        match self.begin_line(pick) {
            Ok(anchor) => out.push(Event::LineStarted { anchor }),
            Err(LineStartError::Placement(reason)) => self.report_rejected(None, reason, out),
            Err(LineStartError::Tool(error)) => log::debug!("line not started: {error}"),
        }
    }

    fn finish_line(&mut self, anchor: Cell, pick: &PickResult, out: &mut Vec<Event>) {
        match self.commit_line(pick) {
            Ok(report) => {
                let kind = self.tools.selection();
                for tag in &report.placed {
                    out.push(Event::ObjectPlaced { tag: *tag });
                }
                for &(cell, reason) in &report.rejected {
                    out.push(Event::PlacementRejected {
                        kind,
                        origin: Some(cell),
                        reason,
                    });
                }
                out.push(Event::LineCommitted {
                    anchor: report.anchor,
                    end: report.end,
                    placed: report.placed.len(),
                    rejected: report.rejected.len(),
                });
            }
            Err(reason) => {
                self.report_rejected(None, reason, out);
                out.push(Event::LineCancelled { anchor });
            }
        }
    }

    fn drag_place(&mut self, pick: &PickResult, out: &mut Vec<Event>) {
        let (descriptor, origin) = match self.resolve_origin(pick) {
            Ok(resolved) => resolved,
            Err(reason) => {
                if self.drag.fail(reason) {
                    self.report_rejected(None, reason, out);
                }
                return;
            }
        };
        if !self.drag.touch(origin) {
            return;
        }

        match self.place_at(origin, &descriptor) {
            Ok(tag) => out.push(Event::ObjectPlaced { tag }),
            Err(reason) => self.report_rejected(Some(origin), reason, out),
        }
    }

    fn drag_remove(&mut self, pick: &PickResult, out: &mut Vec<Event>) {
        let cell = match self.solver.resolve_remove(self.grid.as_ref(), pick) {
            Ok(cell) => cell,
            Err(reason) => {
                if self.drag.fail(reason) {
                    log::debug!("removal rejected: {reason}");
                    out.push(Event::RemovalRejected { reason });
                }
                return;
            }
        };
        if !self.drag.touch(cell) {
            return;
        }

        match self.try_remove(pick) {
            Ok(RemovalOutcome::Removed(tag)) => out.push(Event::ObjectRemoved { tag }),
            Ok(RemovalOutcome::StrayCleared { cell, object }) => {
                out.push(Event::StrayCellCleared { cell, object });
            }
            Ok(RemovalOutcome::Nothing { cell }) => {
                out.push(Event::NothingRemoved { cell: Some(cell) });
            }
            Err(reason) => {
                log::debug!("removal rejected: {reason}");
                out.push(Event::RemovalRejected { reason });
            }
        }
    }

    fn selected_descriptor(&self) -> Result<&ObjectTypeDescriptor, PlacementError> {
        let id = self.tools.selection();
        let descriptor = self
            .catalog
            .by_id(id)
            .ok_or(PlacementError::UnknownObjectType { id })?;
        if descriptor.template.is_none() {
            return Err(PlacementError::MissingTemplate { id });
        }
        Ok(descriptor)
    }

    fn resolve_origin(
        &self,
        pick: &PickResult,
    ) -> Result<(ObjectTypeDescriptor, Cell), PlacementError> {
        let descriptor = self.selected_descriptor()?;
        let host = &self.host;
        let origin = self
            .solver
            .resolve_place(self.grid.as_ref(), pick, descriptor.size, |object| {
                host.footprint_tag(object).map(|tag| tag.footprint)
            })?;
        Ok((descriptor.clone(), origin))
    }

    fn place_at(
        &mut self,
        origin: Cell,
        descriptor: &ObjectTypeDescriptor,
    ) -> Result<FootprintTag, PlacementError> {
        let grid = self.grid.as_ref().ok_or(PlacementError::NoGrid)?;
        self.occupancy
            .validate(grid, Footprint::new(origin, descriptor.size))?;
        let tag = self
            .spawner
            .spawn(grid, &mut self.host, origin, descriptor)?;
        self.occupancy.register(tag.footprint, tag.object);
        Ok(tag)
    }

    fn remove_tagged(&mut self, tag: FootprintTag) -> RemovalOutcome {
        let _ = self.occupancy.clear_footprint(tag.footprint);
        let _ = self.host.destroy(tag.object);
        RemovalOutcome::Removed(tag)
    }

    fn report_rejected(&self, origin: Option<Cell>, reason: PlacementError, out: &mut Vec<Event>) {
        let kind = self.tools.selection();
        match origin {
            Some(origin) => log::debug!("placement of {kind} at {origin} rejected: {reason}"),
            None => log::debug!("placement of {kind} rejected: {reason}"),
        }
        out.push(Event::PlacementRejected {
            kind,
            origin,
            reason,
        });
    }

    fn report_cancelled(discarded: Option<Cell>, out: &mut Vec<Event>) {
        if let Some(anchor) = discarded {
            log::debug!("line anchored at {anchor} cancelled");
            out.push(Event::LineCancelled { anchor });
        }
    }
}
