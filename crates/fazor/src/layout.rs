//! Deterministic placement of phasor arrows, annotations, wedges, and
//! plot bounds.
//!
//! Each group draws as a tip-to-tail chain starting at the origin, followed
//! by its resultant, which always starts at the origin again: the resultant
//! is the chain's vector sum and must visually originate from the reference
//! point no matter where the chain ended.
//!
//! Every group gets its own scale factor `1 / max(magnitude)`, so the
//! longest vector of every group renders with unit length. This puts
//! visually disparate quantities (volts next to amperes) on comparable
//! chart scales; the scale legend maps rendered lengths back to physical
//! values.
//!
//! All mutable state of a layout pass (pen position, coordinate-range
//! accumulator, wedge label counter) lives in a [`LayoutState`] local to
//! [`compute`], so repeated layouts of the same diagram are independent.

use log::debug;

use fazor_core::{
    color::Color,
    geometry::{Bounds, Point},
    label::Label,
    model::{AngleLink, Group, VectorEntry},
};

/// Fraction of the midpoint coordinates used for annotation offsets.
const LABEL_NUDGE: f32 = 0.1;

/// Vertical lift for labels of arrows lying on the x-axis.
const AXIS_LABEL_LIFT: f32 = 0.01;

/// Divisor applied to the scaled-resultant length difference to obtain the
/// wedge radius.
const WEDGE_RADIUS_DIVISOR: f32 = 8.0;

/// Multiplicative margin applied to the coordinate range on both axes.
const BOUNDS_MARGIN: f32 = 1.1;

/// Smallest span an axis may have; degenerate single-point diagrams are
/// widened to this instead of producing a zero-area viewport.
const MIN_VISIBLE_SPAN: f32 = 0.5;

/// A phasor arrow with absolute coordinates and an annotation anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedArrow {
    start: Point,
    end: Point,
    color: Color,
    label: Label,
    label_anchor: Point,
}

impl PlacedArrow {
    /// Tail of the arrow.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Tip of the arrow.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Arrow and annotation color.
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// The formatted annotation label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Where the annotation is anchored.
    pub fn label_anchor(&self) -> Point {
        self.label_anchor
    }
}

/// A phase-angle wedge between two resultants, centered at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWedge {
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    color: Color,
    text: String,
    label_anchor: Point,
}

impl PlacedWedge {
    /// Sector radius in world units.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Angle the sector starts from (radians, larger resultant).
    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    /// Angle the sector ends at (radians, smaller resultant).
    pub fn end_angle(&self) -> f32 {
        self.end_angle
    }

    /// Wedge and label color.
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// The rendered label text, e.g. `φ = 30°`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the label is anchored.
    pub fn label_anchor(&self) -> Point {
        self.label_anchor
    }
}

/// One scale legend row: the physical magnitude one rendered unit length
/// represents, next to the group's unit.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    magnitude: f32,
    unit: Label,
}

impl LegendEntry {
    /// Physical magnitude of one rendered unit length (`1 / scale`).
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// The group's unit label.
    pub fn unit(&self) -> &Label {
        &self.unit
    }
}

/// The complete result of a layout pass.
#[derive(Debug, Clone)]
pub struct Layout {
    arrows: Vec<PlacedArrow>,
    wedges: Vec<PlacedWedge>,
    bounds: Bounds,
    legend: Vec<LegendEntry>,
    title: String,
}

impl Layout {
    /// All placed arrows, in draw order.
    pub fn arrows(&self) -> &[PlacedArrow] {
        &self.arrows
    }

    /// All placed angle wedges.
    pub fn wedges(&self) -> &[PlacedWedge] {
        &self.wedges
    }

    /// Plot bounds with the margin applied.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Scale legend rows, one per group.
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Diagram title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Per-pass mutable layout state.
///
/// Never stored on the diagram: a fresh state is created for every call to
/// [`compute`].
struct LayoutState {
    pen: Point,
    range: Bounds,
    wedge_counter: usize,
}

impl LayoutState {
    fn new() -> Self {
        Self {
            pen: Point::default(),
            // The origin is always part of the plot.
            range: Bounds::at_point(Point::default()),
            wedge_counter: 1,
        }
    }
}

/// Runs a full layout pass over the given groups and angle links.
///
/// Angle link indices must already be validated against the group list.
pub fn compute(groups: &[Group], title: &str, links: &[AngleLink]) -> Layout {
    let scales: Vec<f32> = groups.iter().map(group_scale).collect();

    let mut state = LayoutState::new();
    let mut arrows = Vec::new();

    for (group, &scale) in groups.iter().zip(&scales) {
        state.pen = Point::default();
        for entry in group.chain() {
            arrows.push(place_entry(&mut state, scale, entry));
        }

        // The resultant starts at the origin regardless of where the
        // chain's pen ended up.
        state.pen = Point::default();
        arrows.push(place_entry(&mut state, scale, group.resultant()));
    }

    let wedges = place_wedges(groups, &scales, links, &mut state);
    let bounds = axis_bounds(state.range);

    let legend = groups
        .iter()
        .zip(&scales)
        .map(|(group, &scale)| LegendEntry {
            magnitude: 1.0 / scale,
            unit: group.unit().clone(),
        })
        .collect();

    debug!(
        arrows = arrows.len(),
        wedges = wedges.len();
        "Layout pass complete"
    );

    Layout {
        arrows,
        wedges,
        bounds,
        legend,
        title: title.to_string(),
    }
}

/// Returns the render scale for a group: `1 / max(magnitude)`.
///
/// A group whose vectors all have zero magnitude renders unscaled.
pub fn group_scale(group: &Group) -> f32 {
    let max = group.max_magnitude();
    if max > 0.0 { 1.0 / max } else { 1.0 }
}

/// Places one entry from the current pen position and advances the pen.
fn place_entry(state: &mut LayoutState, scale: f32, entry: &VectorEntry) -> PlacedArrow {
    let start = state.pen;
    let end = start.add_point(Point::from_polar(entry.magnitude() * scale, entry.angle()));

    state.range = state.range.include(start).include(end);
    state.pen = end;

    PlacedArrow {
        start,
        end,
        color: entry.color().clone(),
        label: entry.label().clone(),
        label_anchor: annotation_anchor(start.midpoint(end), entry.angle(), scale),
    }
}

/// Picks the annotation anchor for an arrow with the given midpoint.
///
/// Three cases, in priority order:
/// - near-vertical arrows (angle mod 180° strictly between 45° and 135°)
///   get a negative vertical nudge so the label clears the arrow head;
/// - arrows lying on the x-axis get a constant lift off the axis line;
/// - everything else nudges outward proportionally to its own midpoint.
///
/// The offsets are tuned presentation constants, not exact typesetting.
fn annotation_anchor(mid: Point, angle: f32, scale: f32) -> Point {
    let angle_degrees = angle.to_degrees().rem_euclid(180.0);

    if angle_degrees > 45.0 && angle_degrees < 135.0 {
        Point::new(
            mid.x() + mid.x() * LABEL_NUDGE,
            mid.y() - mid.y() * LABEL_NUDGE,
        )
    } else if mid.y() == 0.0 {
        Point::new(
            mid.x() + mid.x() * LABEL_NUDGE,
            mid.y() + AXIS_LABEL_LIFT * scale.max(1.0),
        )
    } else {
        Point::new(
            mid.x() + mid.x() * LABEL_NUDGE,
            mid.y() + mid.y() * LABEL_NUDGE,
        )
    }
}

/// Radius of the wedge between two scaled resultant lengths.
fn wedge_radius(length_a: f32, scale_a: f32, length_b: f32, scale_b: f32) -> f32 {
    ((length_a * scale_a - length_b * scale_b) / WEDGE_RADIUS_DIVISOR).abs()
}

/// Places one wedge per registered angle link.
///
/// The sector spans from the larger scaled resultant's angle to the
/// smaller's, centered at the origin. Labels read `φ = X°`, or `φ_N = X°`
/// when three or more groups make a bare φ ambiguous.
fn place_wedges(
    groups: &[Group],
    scales: &[f32],
    links: &[AngleLink],
    state: &mut LayoutState,
) -> Vec<PlacedWedge> {
    links
        .iter()
        .map(|link| {
            let resultant_a = groups[link.a()].resultant();
            let resultant_b = groups[link.b()].resultant();
            let scaled_a = resultant_a.magnitude() * scales[link.a()];
            let scaled_b = resultant_b.magnitude() * scales[link.b()];

            let radius = wedge_radius(
                resultant_a.magnitude(),
                scales[link.a()],
                resultant_b.magnitude(),
                scales[link.b()],
            );

            let (start_angle, end_angle) = if scaled_a >= scaled_b {
                (resultant_a.angle(), resultant_b.angle())
            } else {
                (resultant_b.angle(), resultant_a.angle())
            };

            let difference = format_degrees((resultant_a.angle() - resultant_b.angle()).to_degrees());

            // With three or more groups a single φ would be ambiguous, so
            // links get numbered in declaration order.
            let (text, label_anchor) = if groups.len() < 3 {
                (
                    format!("φ = {difference}°"),
                    Point::new(radius, radius),
                )
            } else {
                let text = format!("φ_{} = {difference}°", state.wedge_counter);
                state.wedge_counter += 1;
                (
                    text,
                    Point::new(0.25 * radius + 0.2, 0.25 * radius + 0.1),
                )
            };

            PlacedWedge {
                radius,
                start_angle,
                end_angle,
                color: link.color().clone(),
                text,
                label_anchor,
            }
        })
        .collect()
}

/// Computes plot bounds from the accumulated coordinate range.
///
/// Both axes get the multiplicative margin; since the origin is always part
/// of the range, `min <= 0 <= max` holds and the margin widens both ends.
/// Degenerate single-point ranges are clamped to a minimum visible span
/// instead of producing a zero-area plot.
fn axis_bounds(range: Bounds) -> Bounds {
    range.scale(BOUNDS_MARGIN).clamp_min_span(MIN_VISIBLE_SPAN)
}

/// Formats a degree value, trimming insignificant trailing zeros.
fn format_degrees(value: f32) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
