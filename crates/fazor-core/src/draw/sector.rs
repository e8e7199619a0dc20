//! Circular-sector (pie wedge) path construction.

use crate::geometry::Point;

/// Builds the path data string for a filled circular sector.
///
/// The sector is the pie slice between `arc_start` and `arc_end`, both of
/// which must lie on the circle of the given `radius` around `center`. The
/// caller decides arc direction: `sweep` selects the SVG sweep flag
/// (`true` draws the arc in the positive-angle direction of the SVG
/// coordinate system, which is clockwise on screen), and `large_arc` picks
/// the long way around.
///
/// Coordinates are in SVG space; the caller is responsible for mapping from
/// world coordinates, including the y-axis flip.
pub fn sector_path_data(
    center: Point,
    arc_start: Point,
    arc_end: Point,
    radius: f32,
    large_arc: bool,
    sweep: bool,
) -> String {
    format!(
        "M {} {} L {} {} A {} {} 0 {} {} {} {} Z",
        center.x(),
        center.y(),
        arc_start.x(),
        arc_start.y(),
        radius,
        radius,
        large_arc as u8,
        sweep as u8,
        arc_end.x(),
        arc_end.y(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_path_structure() {
        let data = sector_path_data(
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(0.0, 2.0),
            2.0,
            false,
            true,
        );

        assert_eq!(data, "M 0 0 L 2 0 A 2 2 0 0 1 0 2 Z");
    }

    #[test]
    fn test_sector_path_flags() {
        let data = sector_path_data(
            Point::new(1.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(1.0, 3.0),
            2.0,
            true,
            false,
        );

        assert!(data.contains("A 2 2 0 1 0"));
    }
}
