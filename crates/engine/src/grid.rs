//! Sample points of the complex plane inside a `[-max_x, max_x] x [-max_y, max_y]` window.

use std::{f64::consts::PI, ops::RangeInclusive};

use num_complex::Complex64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridShape {
    /// Lattice with `distance` between neighbours.
    Square { distance: f64 },
    /// Concentric circles `radial` apart, with points every `angle` degrees.
    ConstantAngle { radial: f64, angle: f64 },
    /// Concentric circles `distance` apart, with points about `distance` apart along each circle.
    ApproximateDistance { distance: f64 },
}

/// Accepted spacing between neighbouring points or circles.
pub const DISTANCE_RANGE: RangeInclusive<f64> = 0.5..=5.0;
/// Accepted angle in degrees between points on a circle.
pub const ANGLE_RANGE: RangeInclusive<f64> = 5.0..=180.0;
/// Largest grid [`GridGenerator::generate`] builds.
pub const MAX_POINTS: usize = 100_000;

impl GridShape {
    /// Checks the shape parameters against [`DISTANCE_RANGE`] and [`ANGLE_RANGE`].
    pub fn check(&self) -> Result<(), String> {
        let (spacing, angle) = match *self {
            Self::Square { distance } | Self::ApproximateDistance { distance } => (distance, None),
            Self::ConstantAngle { radial, angle } => (radial, Some(angle)),
        };
        if !DISTANCE_RANGE.contains(&spacing) {
            return Err(format!(
                "Distance {spacing} is outside {}..={}",
                DISTANCE_RANGE.start(),
                DISTANCE_RANGE.end()
            ));
        }
        match angle {
            Some(angle) if !ANGLE_RANGE.contains(&angle) => Err(format!(
                "Angle {angle} is outside {}..={} degrees",
                ANGLE_RANGE.start(),
                ANGLE_RANGE.end()
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGenerator {
    max_x: f64,
    max_y: f64,
}

fn usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl GridGenerator {
    pub fn new(max_x: f64, max_y: f64) -> Self {
        Self { max_x, max_y }
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    fn has_window(&self) -> bool {
        self.max_x.is_finite() && self.max_y.is_finite() && self.max_x >= 0.0 && self.max_y >= 0.0
    }

    /// Builds the grid for `shape`, or nothing when it would exceed [`MAX_POINTS`].
    pub fn generate(&self, shape: GridShape) -> Vec<Complex64> {
        if self.estimate(shape) > MAX_POINTS as f64 {
            return Vec::new();
        }
        match shape {
            GridShape::Square { distance } => self.square(distance),
            GridShape::ConstantAngle { radial, angle } => {
                self.angular_from_constant_angle(radial, angle)
            }
            GridShape::ApproximateDistance { distance } => {
                self.angular_from_approximate_distance(distance)
            }
        }
    }

    pub fn square(&self, distance: f64) -> Vec<Complex64> {
        if !self.has_window() || !usable(distance) {
            return Vec::new();
        }
        let steps_x = (self.max_x / distance).floor() as i64;
        let steps_y = (self.max_y / distance).floor() as i64;
        (-steps_x..=steps_x)
            .flat_map(|x| {
                (-steps_y..=steps_y)
                    .map(move |y| Complex64::new(x as f64 * distance, y as f64 * distance))
            })
            .collect()
    }

    pub fn angular_from_constant_angle(&self, radial: f64, angle: f64) -> Vec<Complex64> {
        if !self.has_window() || !usable(radial) || !usable(angle) {
            return Vec::new();
        }
        let mut points = vec![Complex64::new(0.0, 0.0)];
        for circle in 1..=self.circles(radial) {
            points.extend(self.points_on_circle(circle as f64 * radial, angle));
        }
        points
    }

    pub fn angular_from_approximate_distance(&self, distance: f64) -> Vec<Complex64> {
        if !self.has_window() || !usable(distance) {
            return Vec::new();
        }
        let mut points = vec![Complex64::new(0.0, 0.0)];
        for circle in 1..=self.circles(distance) {
            // Chord of length `distance` on a circle of radius `circle * distance`
            let alpha = 2.0 * (0.5 / circle as f64).asin();
            let count = (2.0 * PI / alpha).floor() as usize;
            points.extend(self.spread_on_circle(circle as f64 * distance, count));
        }
        points
    }

    /// `⌊360 / angle⌋` points starting on the positive real axis, limited to the window.
    pub fn points_on_circle(&self, radius: f64, angle: f64) -> Vec<Complex64> {
        if !self.has_window() || !radius.is_finite() || !usable(angle) {
            return Vec::new();
        }
        let count = (360.0 / angle).floor() as usize;
        (0..count)
            .map(|step| Complex64::from_polar(radius, step as f64 * angle / 180.0 * PI))
            .filter(|point| self.contains(*point))
            .collect()
    }

    fn spread_on_circle(&self, radius: f64, count: usize) -> Vec<Complex64> {
        (0..count)
            .map(|step| Complex64::from_polar(radius, 2.0 * PI * step as f64 / count as f64))
            .filter(|point| self.contains(*point))
            .collect()
    }

    /// Upper bound on the number of points `shape` yields in this window.
    pub fn estimate(&self, shape: GridShape) -> f64 {
        match shape {
            GridShape::Square { distance } | GridShape::ApproximateDistance { distance } => {
                (2.0 * self.max_x / distance + 1.0) * (2.0 * self.max_y / distance + 1.0) * 2.0
            }
            GridShape::ConstantAngle { radial, angle } => {
                (self.max_x.hypot(self.max_y) / radial).floor() * (360.0 / angle).floor() + 1.0
            }
        }
    }

    /// Circles needed to reach the window corners.
    fn circles(&self, step: f64) -> usize {
        (self.max_x.hypot(self.max_y) / step).floor() as usize
    }

    fn contains(&self, point: Complex64) -> bool {
        point.re.abs() <= self.max_x && point.im.abs() <= self.max_y
    }
}
