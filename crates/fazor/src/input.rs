//! Declarative diagram input.
//!
//! A diagram is described as a list of groups, each a flat array of
//! `[magnitude, angle°, label, color]` tuples closed by a bare unit string,
//! plus optional angle links between group resultants. This is the shape
//! the CLI deserializes from JSON; library users can also build the struct
//! directly.

use serde::Deserialize;

use fazor_core::{
    color::Color,
    model::{AngleLink, Group, GroupItem, ModelError},
};

use crate::diagram::Diagram;
use crate::error::FazorError;

/// Deserialized diagram description.
///
/// ```
/// # use fazor::input::DiagramInput;
/// let input: DiagramInput = serde_json::from_str(
///     r#"{
///         "title": "RL circuit",
///         "groups": [[[3.0, 0.0, "U_R", "green"], [4.0, 90.0, "U_L", "blue"],
///                     [5.0, 53.13, "U", "pink"], "V"]],
///         "angle_links": []
///     }"#,
/// )
/// .unwrap();
/// let diagram = input.into_diagram().unwrap();
/// assert_eq!(diagram.title(), "RL circuit");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DiagramInput {
    /// Title drawn above the plot; empty means no title.
    #[serde(default)]
    title: String,

    /// Vector groups, one inner list per group.
    groups: Vec<Vec<GroupItem>>,

    /// Angle links as `[group_a, group_b, color]` triples.
    #[serde(default)]
    angle_links: Vec<(usize, usize, String)>,
}

impl DiagramInput {
    /// Validates the description and builds a [`Diagram`] from it.
    ///
    /// # Errors
    ///
    /// Malformed groups and unknown colors surface as
    /// [`FazorError::Model`]; angle links pointing at nonexistent groups as
    /// [`FazorError::InvalidReference`].
    pub fn into_diagram(self) -> Result<Diagram, FazorError> {
        let groups = Group::from_list(&self.groups)?;

        let links = self
            .angle_links
            .iter()
            .map(|(a, b, color)| {
                let color = Color::new(color)
                    .map_err(|err| ModelError::InvalidColor(format!("{color}: {err}")))?;
                Ok(AngleLink::new(*a, *b, color))
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        Diagram::new(groups, self.title).with_angle_links(links)
    }
}
