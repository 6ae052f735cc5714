//! Immutable catalog of object types available for placement.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FootprintSize;

/// Identifier of an object type within the catalog.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ObjectTypeId(u32);

impl ObjectTypeId {
    /// Creates a new object type identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle the host uses to instantiate an object (a prefab or asset key).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    /// Wraps the provided asset key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Asset key understood by the host.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Catalog entry describing how an object type is placed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectTypeDescriptor {
    /// Identifier used to select the type.
    pub id: ObjectTypeId,
    /// Human readable name.
    pub name: String,
    /// Footprint claimed by each placed instance.
    #[serde(default)]
    pub size: FootprintSize,
    /// Creation template; a descriptor without one cannot be spawned.
    #[serde(default)]
    pub template: Option<Template>,
}

/// Lookup surface over the available object types.
pub trait ObjectCatalog {
    /// Returns the descriptor registered under `id`.
    fn by_id(&self, id: ObjectTypeId) -> Option<&ObjectTypeDescriptor>;

    /// Number of entries, used when cycling through the selection.
    fn len(&self) -> usize;

    /// Reports whether the catalog holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Catalog backed by an ordered list of descriptors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<ObjectTypeDescriptor>,
}

impl Catalog {
    /// Creates a catalog from the provided descriptors.
    ///
    /// When several descriptors share an id the first one wins on lookup.
    #[must_use]
    pub fn new(entries: Vec<ObjectTypeDescriptor>) -> Self {
        Self { entries }
    }

    /// Iterator over the descriptors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectTypeDescriptor> {
        self.entries.iter()
    }
}

impl ObjectCatalog for Catalog {
    fn by_id(&self, id: ObjectTypeId) -> Option<&ObjectTypeDescriptor> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
