//! Straight arrows with per-color head markers.
//!
//! Phasors are drawn as straight segments with a filled triangular head at
//! the tip. SVG markers are defined once per distinct color and referenced
//! from every path of that color.

use svg::node::element::{Definitions, Marker, Path};

use crate::{color::Color, geometry::Point};

/// Creates marker definitions for arrow heads, one per color in use.
pub fn arrow_marker_definitions<'a, I>(colors: I) -> Definitions
where
    I: Iterator<Item = &'a Color>,
{
    let mut defs = Definitions::new();

    for color in colors {
        let head = Marker::new()
            .set("id", format!("arrow-head-{}", color.to_id_safe_string()))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 7)
            .set("markerHeight", 7)
            .set("orient", "auto")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color.to_string()),
            );

        defs = defs.add(head);
    }

    defs
}

/// Returns the `marker-end` reference for the given color's arrow head.
pub fn arrow_marker_reference(color: &Color) -> String {
    format!("url(#arrow-head-{})", color.to_id_safe_string())
}

/// Creates a straight arrow path from `start` to `end` with a colored head.
///
/// Coordinates are in SVG space; the caller is responsible for any world
/// to viewport mapping.
pub fn arrow_path(start: Point, end: Point, color: &Color, width: f32) -> Path {
    let path_data = format!(
        "M {} {} L {} {}",
        start.x(),
        start.y(),
        end.x(),
        end.y()
    );

    Path::new()
        .set("d", path_data)
        .set("fill", "none")
        .set("stroke", color.to_string())
        .set("stroke-width", width)
        .set("marker-end", arrow_marker_reference(color))
}
