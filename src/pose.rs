//! Pose and target computation helpers
//!
//! Field frame: x/y in inches, heading in degrees with 0 along the +y axis
//! and clockwise positive (compass convention, matching the odometry source).

/// 2D field point (inches)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Robot pose: 2D position plus heading
///
/// Owned by the chassis collaborator; the sequencer only reads copies and
/// writes it once per routine through the explicit pose reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// X position (inches)
    pub x: f32,
    /// Y position (inches)
    pub y: f32,
    /// Heading (degrees, 0 = +y axis, clockwise positive)
    pub heading: f32,
}

impl Pose {
    /// Create a new pose
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self { x, y, heading }
    }

    /// Position component of the pose
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Straight-line distance to a point
    pub fn distance_to(&self, target: Point) -> f32 {
        (target.x - self.x).hypot(target.y - self.y)
    }

    /// Compass heading from this pose to a point, in degrees
    pub fn heading_to(&self, target: Point) -> f32 {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        normalize_heading(dx.atan2(dy).to_degrees())
    }
}

/// Normalize a heading into (-180, 180] degrees
pub fn normalize_heading(degrees: f32) -> f32 {
    let mut h = degrees % 360.0;
    if h > 180.0 {
        h -= 360.0;
    } else if h <= -180.0 {
        h += 360.0;
    }
    h
}

/// Smallest signed angle from `from` to `to`, in degrees
pub fn heading_error(from: f32, to: f32) -> f32 {
    normalize_heading(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_heading() {
        assert_eq!(normalize_heading(0.0), 0.0);
        assert_eq!(normalize_heading(90.0), 90.0);
        assert_eq!(normalize_heading(270.0), -90.0);
        assert_eq!(normalize_heading(-270.0), 90.0);
        assert_eq!(normalize_heading(540.0), 180.0);
        assert_eq!(normalize_heading(-180.0), 180.0);
    }

    #[test]
    fn test_heading_to_compass_convention() {
        let origin = Pose::new(0.0, 0.0, 0.0);

        // Straight ahead along +y
        assert!((origin.heading_to(Point::new(0.0, 10.0))).abs() < 1e-4);
        // +x is 90 degrees clockwise
        assert!((origin.heading_to(Point::new(10.0, 0.0)) - 90.0).abs() < 1e-4);
        // -x is 90 degrees counter-clockwise
        assert!((origin.heading_to(Point::new(-10.0, 0.0)) + 90.0).abs() < 1e-4);
        // Straight behind
        assert!((origin.heading_to(Point::new(0.0, -10.0)) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_distance_to() {
        let pose = Pose::new(3.0, 4.0, 0.0);
        assert!((pose.distance_to(Point::new(0.0, 0.0)) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_heading_error_wraparound() {
        // -179 to +179 is a 2 degree move, not 358
        assert!((heading_error(-179.0, 179.0) + 2.0).abs() < 1e-4);
        assert!((heading_error(170.0, -170.0) - 20.0).abs() < 1e-4);
    }
}
