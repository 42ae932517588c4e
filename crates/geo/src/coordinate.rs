use approx::{AbsDiffEq, RelativeEq};

use crate::Point;

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn latlon(latitude: f64, longitude: f64) -> Self {
        Coordinate { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<Point> for Coordinate {
    fn from(point: Point) -> Self {
        Coordinate::latlon(point.y(), point.x())
    }
}

impl From<Coordinate> for Point {
    fn from(coord: Coordinate) -> Self {
        Point::new(coord.longitude, coord.latitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

impl AbsDiffEq for Coordinate {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.latitude.abs_diff_eq(&other.latitude, epsilon) && self.longitude.abs_diff_eq(&other.longitude, epsilon)
    }
}

impl RelativeEq for Coordinate {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.latitude.relative_eq(&other.latitude, epsilon, max_relative)
            && self.longitude.relative_eq(&other.longitude, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_validity() {
        assert!(Coordinate::latlon(51.05, 4.52).is_valid());
        assert!(Coordinate::latlon(-90.0, 180.0).is_valid());
        assert!(!Coordinate::latlon(91.0, 0.0).is_valid());
        assert!(!Coordinate::latlon(0.0, -181.0).is_valid());
        assert!(!Coordinate::latlon(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn point_conversion_swaps_axis_order() {
        let coord: Coordinate = Point::new(4.52, 51.05).into();
        assert_eq!(coord, Coordinate::latlon(51.05, 4.52));

        let point: Point = Coordinate::latlon(51.05, 4.52).into();
        assert_eq!(point, Point::new(4.52, 51.05));
    }
}
