//! Scripted input replayed against a session.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use blockyard_core::{InputEvent, PickResult, PickSource};
use serde::Deserialize;

/// Ordered input steps.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Script {
    #[serde(default)]
    pub(crate) steps: Vec<Step>,
}

/// One input event together with the picks the pointer produced for it.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Step {
    pub(crate) input: InputEvent,
    #[serde(default)]
    pub(crate) place: Option<PickResult>,
    #[serde(default)]
    pub(crate) remove: Option<PickResult>,
}

impl PickSource for Step {
    fn pick_for_place(&self) -> Option<PickResult> {
        self.place
    }

    fn pick_for_remove(&self) -> Option<PickResult> {
        self.remove
    }
}

impl Script {
    /// Reads the script stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read script file at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid script file {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse script toml contents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockyard_core::ObjectId;
    use glam::Vec3;

    #[test]
    fn steps_carry_optional_picks() {
        let script = Script::parse(
            r#"
[[steps]]
input = "pointer_secondary_down"
remove = { point = [2.5, 1.0, 1.5], normal = [0.0, 1.0, 0.0], object = 7 }

[[steps]]
input = "toggle_tool"
"#,
        )
        .expect("valid script");

        assert_eq!(
            script.steps,
            vec![
                Step {
                    input: InputEvent::PointerSecondaryDown,
                    place: None,
                    remove: Some(PickResult::object(
                        Vec3::new(2.5, 1.0, 1.5),
                        Vec3::Y,
                        ObjectId::new(7),
                    )),
                },
                Step {
                    input: InputEvent::ToggleTool,
                    place: None,
                    remove: None,
                },
            ]
        );
        assert_eq!(script.steps[0].pick_for_place(), None);
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert!(Script::parse("[[steps]]\ninput = \"jump\"\n").is_err());
    }
}
