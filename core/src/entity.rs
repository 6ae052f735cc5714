//! Contracts shared with the host engine: surface picks and entity lifecycle.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Footprint, ObjectId, ObjectTypeId, Template};

/// Resolved ray/surface intersection consumed once by the placement solver.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickResult {
    /// World-space point where the ray met the surface.
    pub point: Vec3,
    /// Surface normal at the hit point; not necessarily axis aligned.
    pub normal: Vec3,
    /// Placed object whose surface was hit, or `None` for bare ground.
    #[serde(default)]
    pub object: Option<ObjectId>,
}

impl PickResult {
    /// Creates a pick against bare ground.
    #[must_use]
    pub const fn ground(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal,
            object: None,
        }
    }

    /// Creates a pick against the surface of a placed object.
    #[must_use]
    pub const fn object(point: Vec3, normal: Vec3, object: ObjectId) -> Self {
        Self {
            point,
            normal,
            object: Some(object),
        }
    }
}

/// Source of pointer picks, queried at most once per input event.
///
/// Placement picks may hit placed objects or ground while removal picks only
/// consider placed objects, mirroring the separate layer masks hosts use.
pub trait PickSource {
    /// Pick used to resolve placement and previews.
    fn pick_for_place(&self) -> Option<PickResult>;

    /// Pick used to resolve removal.
    fn pick_for_remove(&self) -> Option<PickResult>;
}

/// Identity and footprint record attached to every spawned object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FootprintTag {
    /// Handle of the spawned object.
    pub object: ObjectId,
    /// Catalog type the object was created from.
    pub kind: ObjectTypeId,
    /// Cells claimed by the object.
    pub footprint: Footprint,
}

/// Entity lifecycle owned by the host engine.
pub trait EntityHost {
    /// Creates an entity from `template` at `position` and returns its handle.
    ///
    /// Handles are never reused for the lifetime of the host.
    fn instantiate(&mut self, template: &Template, name: String, position: Vec3) -> ObjectId;

    /// Attaches footprint metadata to a previously instantiated entity.
    fn attach_tag(&mut self, tag: FootprintTag);

    /// Returns the footprint metadata attached to `object`, if still available.
    fn footprint_tag(&self, object: ObjectId) -> Option<FootprintTag>;

    /// Destroys the entity, returning whether it existed.
    fn destroy(&mut self, object: ObjectId) -> bool;
}
