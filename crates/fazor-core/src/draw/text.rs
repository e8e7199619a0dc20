//! Text nodes for annotations, with subscript support.
//!
//! The annotation heuristics in the layout pass decide *where* a label
//! goes; these helpers only decide how it is typeset. Subscripts render as
//! a smaller, baseline-shifted `tspan` following the base symbol.

use svg::node::element as svg_element;
use svg::node::element::TSpan;

use crate::{color::Color, geometry::Point, label::Label};

const FONT_FAMILY: &str = "Arial";

/// Ratio of subscript font size to base font size.
const SUBSCRIPT_RATIO: f32 = 0.75;

/// Builds a text node for a formatted [`Label`] at the given position.
pub fn label_text_node(
    label: &Label,
    position: Point,
    color: &Color,
    font_size: u16,
) -> svg_element::Text {
    let mut text = svg_element::Text::new(label.base().to_string())
        .set("x", position.x())
        .set("y", position.y())
        .set("font-family", FONT_FAMILY)
        .set("font-size", font_size)
        .set("fill", color.to_string());

    if let Some(subscript) = label.subscript() {
        let sub = TSpan::new(subscript.to_string())
            .set("baseline-shift", "sub")
            .set("font-size", (font_size as f32 * SUBSCRIPT_RATIO).round());
        text = text.add(sub);
    }

    text
}

/// Builds a plain text node without subscript handling.
pub fn plain_text_node(
    content: &str,
    position: Point,
    color: &Color,
    font_size: u16,
) -> svg_element::Text {
    svg_element::Text::new(content.to_string())
        .set("x", position.x())
        .set("y", position.y())
        .set("font-family", FONT_FAMILY)
        .set("font-size", font_size)
        .set("fill", color.to_string())
}
