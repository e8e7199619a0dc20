//! SVG document construction from a computed layout.
//!
//! World coordinates follow the math convention with y pointing up; SVG
//! pixel coordinates are y-down. The [`Viewport`] owns that mapping, so
//! everything downstream of it works purely in pixels.

use std::f32::consts::PI;

use log::debug;
use svg::Document;
use svg::node::element::{Line, Path, Rectangle, Text};

use fazor_core::{
    color::Color,
    draw::{
        LayeredOutput, RenderLayer, arrow_marker_definitions, arrow_path, label_text_node,
        plain_text_node, sector_path_data,
    },
    geometry::{Bounds, Point, Size},
};

use crate::config::StyleConfig;
use crate::export::ExportError;
use crate::layout::Layout;

/// Pixel size of the longer plot axis.
const PLOT_PX: f32 = 500.0;

/// Outer margin around the plot area.
const MARGIN_PX: f32 = 40.0;

/// Horizontal padding inside the legend panel.
const LEGEND_PAD_PX: f32 = 12.0;

/// Vertical distance between legend rows.
const LEGEND_ROW_PX: f32 = 20.0;

/// Target number of grid intervals along the longer axis.
const GRID_TARGET: f32 = 6.0;

const GRID_COLOR: &str = "#cccccc";
const AXIS_COLOR: &str = "black";
const WEDGE_OPACITY: f32 = 0.2;

/// Maps world coordinates into the SVG pixel space.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Viewport {
    bounds: Bounds,
    px_per_unit: f32,
}

impl Viewport {
    pub(crate) fn new(bounds: Bounds) -> Self {
        // Bounds spans are clamped during layout, never zero.
        let px_per_unit = PLOT_PX / bounds.width().max(bounds.height());
        Self {
            bounds,
            px_per_unit,
        }
    }

    /// Converts a world point to pixels, flipping the y axis.
    pub(crate) fn to_svg(&self, point: Point) -> Point {
        Point::new(
            MARGIN_PX + (point.x() - self.bounds.min_x()) * self.px_per_unit,
            MARGIN_PX + (self.bounds.max_y() - point.y()) * self.px_per_unit,
        )
    }

    pub(crate) fn px_per_unit(&self) -> f32 {
        self.px_per_unit
    }

    fn plot_width(&self) -> f32 {
        self.bounds.width() * self.px_per_unit
    }

    fn plot_height(&self) -> f32 {
        self.bounds.height() * self.px_per_unit
    }
}

/// Builds the complete SVG document for a layout.
pub(crate) fn render_document(
    layout: &Layout,
    style: &StyleConfig,
) -> Result<(Document, Size), ExportError> {
    let viewport = Viewport::new(layout.bounds());

    let legend_width = if layout.legend().is_empty() {
        0.0
    } else {
        viewport.px_per_unit().max(120.0) + 2.0 * LEGEND_PAD_PX
    };

    let canvas = Size::new(
        2.0 * MARGIN_PX + viewport.plot_width() + legend_width,
        2.0 * MARGIN_PX + viewport.plot_height() + legend_height(layout),
    );

    let mut output = LayeredOutput::new();

    let background = style
        .background_color()
        .map_err(ExportError::InvalidStyle)?;
    if let Some(color) = &background {
        let rect = Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", canvas.width())
            .set("height", canvas.height())
            .set("fill", color.to_string());
        output.add_to_layer(RenderLayer::Background, Box::new(rect));
    }

    add_grid(&mut output, &viewport);
    add_axes(&mut output, &viewport);
    add_wedges(&mut output, &viewport, layout, style);
    add_arrows(&mut output, &viewport, layout, style);
    add_legend(&mut output, &viewport, layout, style);
    add_title(&mut output, &viewport, layout, style);

    let colors = distinct_colors(layout);
    let mut doc = Document::new()
        .set("viewBox", format!("0 0 {} {}", canvas.width(), canvas.height()))
        .set("width", canvas.width())
        .set("height", canvas.height())
        .add(arrow_marker_definitions(colors.iter()));

    for node in output.render() {
        doc = doc.add(node);
    }

    debug!(
        width = canvas.width(),
        height = canvas.height();
        "SVG document assembled"
    );

    Ok((doc, canvas))
}

fn legend_height(layout: &Layout) -> f32 {
    if layout.legend().is_empty() {
        0.0
    } else {
        // Reference segment row plus one row per group.
        (layout.legend().len() as f32 + 1.0) * LEGEND_ROW_PX
    }
}

/// Distinct arrow and wedge colors, in first-use order.
fn distinct_colors(layout: &Layout) -> Vec<Color> {
    let mut colors: Vec<Color> = Vec::new();
    for color in layout
        .arrows()
        .iter()
        .map(|a| a.color())
        .chain(layout.wedges().iter().map(|w| w.color()))
    {
        if !colors.contains(color) {
            colors.push(color.clone());
        }
    }
    colors
}

fn add_grid(output: &mut LayeredOutput, viewport: &Viewport) {
    let bounds = viewport.bounds;
    let step = nice_step(bounds.width().max(bounds.height()) / GRID_TARGET);

    let first = |min: f32| (min / step).ceil() as i32;
    let last = |max: f32| (max / step).floor() as i32;

    for k in first(bounds.min_x())..=last(bounds.max_x()) {
        // The y axis already marks zero.
        if k == 0 {
            continue;
        }
        let x = k as f32 * step;
        let top = viewport.to_svg(Point::new(x, bounds.max_y()));
        let bottom = viewport.to_svg(Point::new(x, bounds.min_y()));
        output.add_to_layer(RenderLayer::Grid, Box::new(grid_line(top, bottom)));
    }

    for k in first(bounds.min_y())..=last(bounds.max_y()) {
        if k == 0 {
            continue;
        }
        let y = k as f32 * step;
        let left = viewport.to_svg(Point::new(bounds.min_x(), y));
        let right = viewport.to_svg(Point::new(bounds.max_x(), y));
        output.add_to_layer(RenderLayer::Grid, Box::new(grid_line(left, right)));
    }
}

fn grid_line(from: Point, to: Point) -> Line {
    Line::new()
        .set("x1", from.x())
        .set("y1", from.y())
        .set("x2", to.x())
        .set("y2", to.y())
        .set("stroke", GRID_COLOR)
        .set("stroke-width", 0.5)
        .set("stroke-dasharray", "4 2")
}

/// Rounds a raw interval to the nearest 1/2/5 decade step.
fn nice_step(raw: f32) -> f32 {
    let magnitude = 10f32.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let base = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    base * magnitude
}

fn add_axes(output: &mut LayeredOutput, viewport: &Viewport) {
    let bounds = viewport.bounds;

    let x_from = viewport.to_svg(Point::new(bounds.min_x(), 0.0));
    let x_to = viewport.to_svg(Point::new(bounds.max_x(), 0.0));
    let y_from = viewport.to_svg(Point::new(0.0, bounds.min_y()));
    let y_to = viewport.to_svg(Point::new(0.0, bounds.max_y()));

    for (from, to) in [(x_from, x_to), (y_from, y_to)] {
        let line = Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
            .set("stroke", AXIS_COLOR)
            .set("stroke-width", 1);
        output.add_to_layer(RenderLayer::Axis, Box::new(line));
    }
}

fn add_wedges(
    output: &mut LayeredOutput,
    viewport: &Viewport,
    layout: &Layout,
    style: &StyleConfig,
) {
    for wedge in layout.wedges() {
        if wedge.radius() > 0.0 {
            // Start the arc at the larger world angle and draw towards the
            // smaller one. After the y flip that direction is clockwise on
            // screen, which is SVG sweep flag 1. When the two angles are
            // more than a half turn apart the short sector wraps through
            // zero, so the endpoints swap.
            let hi = wedge.start_angle().max(wedge.end_angle());
            let lo = wedge.start_angle().min(wedge.end_angle());
            let (from, to) = if hi - lo <= PI { (hi, lo) } else { (lo, hi) };

            let data = sector_path_data(
                viewport.to_svg(Point::default()),
                viewport.to_svg(Point::from_polar(wedge.radius(), from)),
                viewport.to_svg(Point::from_polar(wedge.radius(), to)),
                wedge.radius() * viewport.px_per_unit(),
                false,
                true,
            );

            let sector = Path::new()
                .set("d", data)
                .set("fill", wedge.color().to_string())
                .set("fill-opacity", WEDGE_OPACITY)
                .set("stroke", "none");
            output.add_to_layer(RenderLayer::Wedge, Box::new(sector));
        }

        let text = plain_text_node(
            wedge.text(),
            viewport.to_svg(wedge.label_anchor()),
            wedge.color(),
            style.font_size(),
        );
        output.add_to_layer(RenderLayer::Text, Box::new(text));
    }
}

fn add_arrows(
    output: &mut LayeredOutput,
    viewport: &Viewport,
    layout: &Layout,
    style: &StyleConfig,
) {
    for arrow in layout.arrows() {
        let path = arrow_path(
            viewport.to_svg(arrow.start()),
            viewport.to_svg(arrow.end()),
            arrow.color(),
            style.stroke_width(),
        );
        output.add_to_layer(RenderLayer::Arrow, Box::new(path));

        let text = label_text_node(
            arrow.label(),
            viewport.to_svg(arrow.label_anchor()),
            arrow.color(),
            style.font_size(),
        );
        output.add_to_layer(RenderLayer::Text, Box::new(text));
    }
}

fn add_legend(
    output: &mut LayeredOutput,
    viewport: &Viewport,
    layout: &Layout,
    style: &StyleConfig,
) {
    if layout.legend().is_empty() {
        return;
    }

    let black = Color::default();
    let panel_x = 2.0 * MARGIN_PX + viewport.plot_width() + LEGEND_PAD_PX;
    let top = MARGIN_PX;

    // Reference segment: one rendered unit of chart length.
    let line = Line::new()
        .set("x1", panel_x)
        .set("y1", top)
        .set("x2", panel_x + viewport.px_per_unit())
        .set("y2", top)
        .set("stroke", AXIS_COLOR)
        .set("stroke-width", 1.5);
    output.add_to_layer(RenderLayer::Legend, Box::new(line));

    for (row, entry) in layout.legend().iter().enumerate() {
        let y = top + (row as f32 + 1.0) * LEGEND_ROW_PX;
        let text = format!(
            "{} {}",
            format_quantity(entry.magnitude()),
            entry.unit()
        );
        let node = plain_text_node(
            &text,
            Point::new(panel_x, y),
            &black,
            style.font_size(),
        );
        output.add_to_layer(RenderLayer::Text, Box::new(node));
    }
}

fn add_title(
    output: &mut LayeredOutput,
    viewport: &Viewport,
    layout: &Layout,
    style: &StyleConfig,
) {
    if layout.title().is_empty() {
        return;
    }

    let node: Text = plain_text_node(
        layout.title(),
        Point::new(MARGIN_PX + viewport.plot_width() / 2.0, MARGIN_PX / 2.0),
        &Color::default(),
        style.font_size() + 4,
    )
    .set("text-anchor", "middle")
    .set("font-weight", "bold");
    output.add_to_layer(RenderLayer::Text, Box::new(node));
}

/// Formats a physical quantity, trimming insignificant trailing zeros.
fn format_quantity(value: f32) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fazor_core::model::{Group, GroupItem};
    use float_cmp::approx_eq;

    fn square_viewport() -> Viewport {
        Viewport::new(Bounds::new(-1.0, -1.0, 1.0, 1.0))
    }

    #[test]
    fn test_viewport_flips_y() {
        let viewport = square_viewport();

        let top = viewport.to_svg(Point::new(0.0, 1.0));
        let bottom = viewport.to_svg(Point::new(0.0, -1.0));
        assert!(top.y() < bottom.y());
    }

    #[test]
    fn test_viewport_maps_corners_to_margins() {
        let viewport = square_viewport();

        let top_left = viewport.to_svg(Point::new(-1.0, 1.0));
        assert!(approx_eq!(f32, top_left.x(), MARGIN_PX));
        assert!(approx_eq!(f32, top_left.y(), MARGIN_PX));

        let bottom_right = viewport.to_svg(Point::new(1.0, -1.0));
        assert!(approx_eq!(f32, bottom_right.x(), MARGIN_PX + PLOT_PX));
        assert!(approx_eq!(f32, bottom_right.y(), MARGIN_PX + PLOT_PX));
    }

    #[test]
    fn test_viewport_longer_axis_gets_full_plot_size() {
        let viewport = Viewport::new(Bounds::new(0.0, 0.0, 2.0, 1.0));
        assert!(approx_eq!(f32, viewport.plot_width(), PLOT_PX));
        assert!(approx_eq!(f32, viewport.plot_height(), PLOT_PX / 2.0));
    }

    #[test]
    fn test_nice_step_snaps_to_decade_steps() {
        assert!(approx_eq!(f32, nice_step(0.9), 1.0));
        assert!(approx_eq!(f32, nice_step(1.8), 2.0));
        assert!(approx_eq!(f32, nice_step(4.0), 5.0));
        assert!(approx_eq!(f32, nice_step(8.0), 10.0));
        assert!(approx_eq!(f32, nice_step(0.3), 0.2));
    }

    #[test]
    fn test_document_contains_arrows_and_markers() {
        let groups = Group::from_list(&[vec![
            GroupItem::Entry(3.0, 0.0, "A".to_string(), "green".to_string()),
            GroupItem::Entry(4.0, 90.0, "B".to_string(), "blue".to_string()),
            GroupItem::Entry(5.0, 53.13, "R".to_string(), "pink".to_string()),
            GroupItem::Unit("V".to_string()),
        ]])
        .unwrap();
        let layout = crate::layout::compute(&groups, "Voltages", &[]);

        let (doc, _) = render_document(&layout, &StyleConfig::default()).unwrap();
        let text = doc.to_string();

        assert!(text.contains("<svg"));
        assert!(text.contains("marker-end"));
        assert!(text.contains("data-layer=\"arrow\""));
        assert!(text.contains("data-layer=\"legend\""));
        assert!(text.contains("Voltages"));
    }

    #[test]
    fn test_background_rect_only_when_configured() {
        let groups = Group::from_list(&[vec![
            GroupItem::Entry(1.0, 0.0, "A".to_string(), "red".to_string()),
            GroupItem::Unit("V".to_string()),
        ]])
        .unwrap();
        let layout = crate::layout::compute(&groups, "", &[]);

        let (doc, _) = render_document(&layout, &StyleConfig::default()).unwrap();
        assert!(!doc.to_string().contains("data-layer=\"background\""));

        let style: StyleConfig =
            serde_json::from_str(r#"{"background_color": "white"}"#).unwrap();
        let (doc, _) = render_document(&layout, &style).unwrap();
        assert!(doc.to_string().contains("data-layer=\"background\""));
    }

    #[test]
    fn test_invalid_background_color_is_reported() {
        let groups = Group::from_list(&[vec![
            GroupItem::Entry(1.0, 0.0, "A".to_string(), "red".to_string()),
            GroupItem::Unit("V".to_string()),
        ]])
        .unwrap();
        let layout = crate::layout::compute(&groups, "", &[]);

        let style: StyleConfig =
            serde_json::from_str(r#"{"background_color": "no-such-color"}"#).unwrap();
        let err = render_document(&layout, &style).unwrap_err();
        assert!(matches!(err, ExportError::InvalidStyle(_)));
    }

    #[test]
    fn test_format_quantity_trims_zeros() {
        assert_eq!(format_quantity(200.0), "200");
        assert_eq!(format_quantity(0.53), "0.53");
        assert_eq!(format_quantity(66.27), "66.27");
    }
}
