//! Layer-based rendering system for SVG output.
//!
//! Drawable components specify which z-order layer their SVG elements
//! belong to; the collector emits layers bottom-to-top so grid lines never
//! cover arrows and labels never hide under wedges.
//!
//! # Example
//!
//! ```
//! # use fazor_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::Rectangle;
//! let mut output = LayeredOutput::new();
//!
//! let bg = Rectangle::new().set("fill", "white");
//! output.add_to_layer(RenderLayer::Background, Box::new(bg));
//!
//! let text = svg::node::element::Text::new("U");
//! output.add_to_layer(RenderLayer::Text, Box::new(text));
//!
//! // Render all layers in order
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant
/// declaration. The `Ord` derive uses declaration order, so the first
/// variant renders first (bottom), and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Background fill - renders first
    Background,
    /// Dashed grid lines
    Grid,
    /// Axis lines through the origin
    Axis,
    /// Angle wedges between resultants (translucent sectors)
    Wedge,
    /// Phasor arrows
    Arrow,
    /// Scale legend line
    Legend,
    /// Text labels and annotations
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Axis => "axis",
            Self::Wedge => "wedge",
            Self::Arrow => "arrow",
            Self::Legend => "legend",
            Self::Text => "text",
        }
    }
}

/// Represents SVG nodes grouped by rendering layer.
///
/// Nodes are collected in any order; [`render`](Self::render) emits them in
/// layer order (bottom to top), one SVG `<g>` element per non-empty layer,
/// tagged with a `data-layer` attribute.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes are appended to the layer in the order they are added.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped. The sort
    /// is stable, so insertion order is preserved within a layer.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
