#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a point from polar coordinates (radius, angle in radians).
    ///
    /// Angles follow the mathematical convention: counter-clockwise from
    /// the positive x-axis.
    pub fn from_polar(radius: f32, angle: f32) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// A degenerate bounds containing only the given point.
    pub fn at_point(point: Point) -> Self {
        Self {
            min_x: point.x(),
            min_y: point.y(),
            max_x: point.x(),
            max_y: point.y(),
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Grows the bounds so that the given point is contained in it.
    pub fn include(self, point: Point) -> Self {
        Self {
            min_x: self.min_x.min(point.x()),
            min_y: self.min_y.min(point.y()),
            max_x: self.max_x.max(point.x()),
            max_y: self.max_y.max(point.y()),
        }
    }

    /// Returns `true` if the point lies inside the bounds (edges included).
    pub fn contains(self, point: Point) -> bool {
        point.x() >= self.min_x
            && point.x() <= self.max_x
            && point.y() >= self.min_y
            && point.y() <= self.max_y
    }

    /// Multiplies every coordinate by the given factor.
    ///
    /// With `min <= 0 <= max` on an axis, a factor above one pushes both
    /// ends outward, which is how plot margins are produced.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            min_x: self.min_x * factor,
            min_y: self.min_y * factor,
            max_x: self.max_x * factor,
            max_y: self.max_y * factor,
        }
    }

    /// Widens any axis whose span is below `min_span`, keeping its center.
    ///
    /// A diagram whose coordinates collapse to a single point would
    /// otherwise produce a zero-area viewport.
    pub fn clamp_min_span(self, min_span: f32) -> Self {
        let mut bounds = self;
        if bounds.width() < min_span {
            let center = (bounds.min_x + bounds.max_x) / 2.0;
            bounds.min_x = center - min_span / 2.0;
            bounds.max_x = center + min_span / 2.0;
        }
        if bounds.height() < min_span {
            let center = (bounds.min_y + bounds.max_y) / 2.0;
            bounds.min_y = center - min_span / 2.0;
            bounds.max_y = center + min_span / 2.0;
        }
        bounds
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::at_point(Point::default())
    }
}
