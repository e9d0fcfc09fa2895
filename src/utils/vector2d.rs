use std::iter::Sum;
use std::ops::{Add, Div, Mul};

/// Planar vector; `x` is horizontal (downrange), `y` is vertical (altitude axis).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    pub fn zero() -> Self {
        Vector2D::new(0.0, 0.0)
    }

    /// Vector of the given magnitude tilted `angle_deg` from vertical
    /// towards +x.
    pub fn from_attitude(angle_deg: f64, magnitude: f64) -> Self {
        let angle = angle_deg.to_radians();
        Vector2D::new(magnitude * angle.sin(), magnitude * angle.cos())
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }
}

impl Sum for Vector2D {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Vector2D::zero(), |a, b| a + b)
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f64> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Vector2D::new(self.x / scalar, self.y / scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_vertical_attitude_points_up() {
        let thrust = Vector2D::from_attitude(0.0, 1000.0);
        assert_abs_diff_eq!(thrust.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(thrust.y, 1000.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tilted_attitude_splits_components() {
        let thrust = Vector2D::from_attitude(30.0, 100.0);
        assert_abs_diff_eq!(thrust.x, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(thrust.y, 86.602_540_378_443_86, epsilon = 1e-9);
        assert_abs_diff_eq!(thrust.magnitude(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sum_of_forces() {
        let total: Vector2D = [
            Vector2D::new(1.0, 2.0),
            Vector2D::new(-3.0, 4.0),
            Vector2D::new(0.5, -10.0),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Vector2D::new(-1.5, -4.0));
    }
}
