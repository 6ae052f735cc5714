//! In-memory entity arena implementing the host lifecycle contract.

use std::collections::BTreeMap;

use blockyard_core::{EntityHost, FootprintTag, ObjectId, Template};
use glam::Vec3;

/// Entity instantiated into a [`Scene`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEntity {
    name: String,
    template: Template,
    position: Vec3,
    tag: Option<FootprintTag>,
}

impl SceneEntity {
    /// Display name assigned at instantiation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template the entity was created from.
    #[must_use]
    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// World-space position of the entity's center.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Footprint metadata attached after spawning, if still present.
    #[must_use]
    pub const fn tag(&self) -> Option<FootprintTag> {
        self.tag
    }
}

/// Registry that stores entities and manages handle allocation.
///
/// Handles increase monotonically and are never reused, so a stale handle held
/// by the occupancy map can never alias a newer entity.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    entities: BTreeMap<ObjectId, SceneEntity>,
    next_object_id: u32,
}

impl Scene {
    /// Creates an empty scene with a reset handle counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entity registered under `object`.
    #[must_use]
    pub fn entity(&self, object: ObjectId) -> Option<&SceneEntity> {
        self.entities.get(&object)
    }

    /// Iterator over live entities in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneEntity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    /// Removes the footprint metadata from an entity while keeping it alive.
    ///
    /// Hosts use this when an entity stops being a grid object, for example
    /// after it has been picked up by another system.
    pub fn detach_tag(&mut self, object: ObjectId) -> Option<FootprintTag> {
        self.entities
            .get_mut(&object)
            .and_then(|entity| entity.tag.take())
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Reports whether the scene holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityHost for Scene {
    fn instantiate(&mut self, template: &Template, name: String, position: Vec3) -> ObjectId {
        let id = ObjectId::new(self.next_object_id);
        self.next_object_id = self.next_object_id.saturating_add(1);
        let _ = self.entities.insert(
            id,
            SceneEntity {
                name,
                template: template.clone(),
                position,
                tag: None,
            },
        );
        id
    }

    fn attach_tag(&mut self, tag: FootprintTag) {
        if let Some(entity) = self.entities.get_mut(&tag.object) {
            entity.tag = Some(tag);
        } else {
            log::warn!("dropping footprint tag for unknown entity {}", tag.object);
        }
    }

    fn footprint_tag(&self, object: ObjectId) -> Option<FootprintTag> {
        self.entities.get(&object).and_then(SceneEntity::tag)
    }

    fn destroy(&mut self, object: ObjectId) -> bool {
        self.entities.remove(&object).is_some()
    }
}
