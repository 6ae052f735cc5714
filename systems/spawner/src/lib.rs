#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Thin adapter that instantiates catalog objects through the host.
//!
//! The spawner never touches the occupancy map: it creates the entity at the
//! center of its footprint box, tags it with its identity and footprint, and
//! hands that tag back so the caller can register it.

use std::fmt;

use blockyard_core::{
    Cell, CoordinateMapper, EntityHost, Footprint, FootprintTag, ObjectTypeDescriptor,
    PlacementError,
};

/// Callback observing every tag produced by [`Spawner::spawn`].
pub type PostSpawnHook = Box<dyn FnMut(&FootprintTag)>;

/// Creates entities from catalog descriptors.
#[derive(Default)]
pub struct Spawner {
    hooks: Vec<PostSpawnHook>,
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Spawner {
    /// Creates a spawner without hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook run after each successful spawn, in registration order.
    pub fn add_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&FootprintTag) + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Instantiates `descriptor` with its footprint anchored at `origin`.
    ///
    /// Fails with [`PlacementError::MissingTemplate`] before touching the host
    /// when the descriptor carries no template.
    pub fn spawn<M, H>(
        &mut self,
        mapper: &M,
        host: &mut H,
        origin: Cell,
        descriptor: &ObjectTypeDescriptor,
    ) -> Result<FootprintTag, PlacementError>
    where
        M: CoordinateMapper + ?Sized,
        H: EntityHost + ?Sized,
    {
        let template = descriptor
            .template
            .as_ref()
            .ok_or(PlacementError::MissingTemplate { id: descriptor.id })?;

        let position = mapper.box_to_world_center(origin, descriptor.size);
        let object = host.instantiate(template, entity_name(descriptor, origin), position);
        let tag = FootprintTag {
            object,
            kind: descriptor.id,
            footprint: Footprint::new(origin, descriptor.size),
        };
        host.attach_tag(tag);
        log::trace!(
            "spawned {} as {object} at {origin} ({position})",
            descriptor.name
        );

        for hook in &mut self.hooks {
            hook(&tag);
        }
        Ok(tag)
    }
}

/// Display name given to spawned entities: `{name}_ID{type}_{x}_{y}_{z}`.
#[must_use]
pub fn entity_name(descriptor: &ObjectTypeDescriptor, origin: Cell) -> String {
    format!(
        "{}_ID{}_{}_{}_{}",
        descriptor.name,
        descriptor.id,
        origin.x(),
        origin.y(),
        origin.z()
    )
}
