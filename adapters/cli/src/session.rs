//! Session files: grid layout, builder settings, and the object catalog.

use std::{collections::BTreeSet, fs, path::Path};

use anyhow::{bail, Context, Result};
use blockyard_core::{Catalog, GridConfig, ObjectTypeDescriptor};
use blockyard_system_builder::BuilderConfig;
use serde::Deserialize;

/// Everything needed to construct a builder.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Session {
    /// Grid layout. Without one every request is rejected with `NoGrid`.
    pub(crate) grid: Option<GridConfig>,
    #[serde(default)]
    pub(crate) builder: BuilderConfig,
    #[serde(default)]
    pub(crate) objects: Vec<ObjectTypeDescriptor>,
}

impl Session {
    /// Reads and validates the session stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid session file {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let session: Self =
            toml::from_str(contents).context("failed to parse session toml contents")?;

        let mut seen = BTreeSet::new();
        for object in &session.objects {
            if !seen.insert(object.id.get()) {
                bail!("catalog contains duplicate object type id {}", object.id);
            }
        }

        // Item cycling walks ids 0..len.
        let contiguous = seen.iter().copied().eq(0..session.objects.len() as u32);
        if !contiguous {
            log::warn!(
                "object type ids are not numbered 0..{}; cycling may select missing types",
                session.objects.len()
            );
        }
        if session.grid.is_none() {
            log::warn!("session has no [grid]; every placement will be rejected");
        }
        Ok(session)
    }

    pub(crate) fn catalog(&self) -> Catalog {
        Catalog::new(self.objects.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockyard_core::{FootprintSize, LineMode, ObjectCatalog, ObjectTypeId, PlaceTool};

    #[test]
    fn sample_session_parses() {
        let session = Session::parse(include_str!("../assets/session.toml"))
            .expect("bundled session is valid");

        assert_eq!(
            session.grid.map(|grid| grid.dimensions),
            Some([16, 8, 16])
        );
        assert_eq!(session.builder.line_mode, LineMode::Orthogonal);
        let catalog = session.catalog();
        assert_eq!(catalog.len(), 3);
        let wall = catalog.by_id(ObjectTypeId::new(1)).expect("wall is listed");
        assert_eq!(wall.size, FootprintSize::new(2, 1, 2).expect("valid size"));
    }

    #[test]
    fn builder_section_is_optional() {
        let session = Session::parse(
            "[grid]\ncell_length = 0.5\ndimensions = [4, 4, 4]\n\n[[objects]]\nid = 0\nname = \"crate\"\ntemplate = \"crate\"\n",
        )
        .expect("valid session");

        assert_eq!(session.builder, BuilderConfig::default());
        assert_eq!(session.builder.initial_tool, PlaceTool::Single);
        assert_eq!(session.objects[0].size, FootprintSize::UNIT, "size defaults to one cell");
    }

    #[test]
    fn duplicate_object_ids_are_rejected() {
        let error = Session::parse(
            "[[objects]]\nid = 4\nname = \"a\"\n\n[[objects]]\nid = 4\nname = \"b\"\n",
        )
        .expect_err("duplicate ids must fail");

        assert!(
            error.to_string().contains("duplicate object type id 4"),
            "unexpected error: {error:#}"
        );
    }

    #[test]
    fn zero_sized_objects_are_rejected() {
        let result = Session::parse("[[objects]]\nid = 0\nname = \"flat\"\nsize = [1, 0, 1]\n");
        assert!(result.is_err(), "zero extents must not deserialize");
    }
}
