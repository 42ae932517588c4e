use approx::{AbsDiffEq, RelativeEq};

use crate::Coordinate;

/// Geographic bounding box spanned by its southwest and northeast corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLonBounds {
    southwest: Coordinate,
    northeast: Coordinate,
}

impl LatLonBounds {
    pub fn world() -> Self {
        Self::hull(Coordinate::latlon(-90.0, -180.0), Coordinate::latlon(90.0, 180.0))
    }

    /// The smallest bounds containing both coordinates, regardless of their order.
    pub fn hull(a: Coordinate, b: Coordinate) -> Self {
        LatLonBounds {
            southwest: Coordinate::latlon(a.latitude.min(b.latitude), a.longitude.min(b.longitude)),
            northeast: Coordinate::latlon(a.latitude.max(b.latitude), a.longitude.max(b.longitude)),
        }
    }

    pub fn north(&self) -> f64 {
        self.northeast.latitude
    }

    pub fn south(&self) -> f64 {
        self.southwest.latitude
    }

    pub fn east(&self) -> f64 {
        self.northeast.longitude
    }

    pub fn west(&self) -> f64 {
        self.southwest.longitude
    }

    pub fn northwest(&self) -> Coordinate {
        Coordinate::latlon(self.north(), self.west())
    }

    pub fn northeast(&self) -> Coordinate {
        self.northeast
    }

    pub fn southwest(&self) -> Coordinate {
        self.southwest
    }

    pub fn southeast(&self) -> Coordinate {
        Coordinate::latlon(self.south(), self.east())
    }

    /// Longitudinal extent in degrees.
    pub fn width(&self) -> f64 {
        self.east() - self.west()
    }

    /// Latitudinal extent in degrees.
    pub fn height(&self) -> f64 {
        self.north() - self.south()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    pub fn is_valid(&self) -> bool {
        self.southwest.is_valid() && self.northeast.is_valid()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        (self.south()..=self.north()).contains(&coord.latitude) && (self.west()..=self.east()).contains(&coord.longitude)
    }

    /// Bounds as [west, south, east, north].
    pub fn array(&self) -> [f64; 4] {
        [self.west(), self.south(), self.east(), self.north()]
    }
}

impl std::fmt::Display for LatLonBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} - {}]", self.southwest, self.northeast)
    }
}

impl AbsDiffEq for LatLonBounds {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.southwest.abs_diff_eq(&other.southwest, epsilon) && self.northeast.abs_diff_eq(&other.northeast, epsilon)
    }
}

impl RelativeEq for LatLonBounds {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.southwest.relative_eq(&other.southwest, epsilon, max_relative)
            && self.northeast.relative_eq(&other.northeast, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hull_accepts_corners_in_any_order() {
        let bounds = LatLonBounds::hull(Coordinate::latlon(51.50, 2.52), Coordinate::latlon(50.67, 5.91));
        assert_eq!(bounds.north(), 51.50);
        assert_eq!(bounds.south(), 50.67);
        assert_eq!(bounds.west(), 2.52);
        assert_eq!(bounds.east(), 5.91);

        let flipped = LatLonBounds::hull(bounds.southeast(), bounds.northwest());
        assert_eq!(bounds, flipped);
    }

    #[test]
    fn array_order_is_west_south_east_north() {
        let bounds = LatLonBounds::hull(Coordinate::latlon(50.67, 2.52), Coordinate::latlon(51.50, 5.91));
        assert_eq!(bounds.array(), [2.52, 50.67, 5.91, 51.50]);
    }

    #[test]
    fn contains_checks_both_axes() {
        let bounds = LatLonBounds::hull(Coordinate::latlon(50.0, 2.0), Coordinate::latlon(52.0, 6.0));
        assert!(bounds.contains(Coordinate::latlon(51.0, 4.0)));
        assert!(bounds.contains(bounds.southwest()));
        assert!(!bounds.contains(Coordinate::latlon(49.0, 4.0)));
        assert!(!bounds.contains(Coordinate::latlon(51.0, 6.5)));
    }
}
