//! Drawable primitives for phasor diagram rendering.
//!
//! Everything in this module builds SVG nodes from already-placed geometry;
//! no layout decisions happen here. The [`LayeredOutput`] collector keeps
//! z-ordering deterministic regardless of the order elements are produced
//! during the layout pass.

mod arrow;
mod layer;
mod sector;
mod text;

pub use arrow::{arrow_marker_definitions, arrow_marker_reference, arrow_path};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use sector::sector_path_data;
pub use text::{label_text_node, plain_text_node};
