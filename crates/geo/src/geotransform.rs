use std::fmt::Debug;

use approx::{AbsDiffEq, RelativeEq};

use crate::{Cell, CellSize, Error, Point, Result};

#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoTransform([f64; 6]);

impl GeoTransform {
    /// Creates a new `GeoTransform` from the provided coefficients.
    ///
    /// The coefficients are in the order: [top left x, pixel width, rotation (0 if north is up), top left y, rotation (0 if north is up), pixel height].
    pub const fn new(coefficients: [f64; 6]) -> Self {
        GeoTransform(coefficients)
    }

    pub fn from_top_left_and_cell_size(top_left: Point, cell_size: CellSize) -> Self {
        Self::new([top_left.x(), cell_size.x(), 0.0, top_left.y(), 0.0, cell_size.y()])
    }

    pub fn apply_to_cell(&self, cell: Cell) -> Point<f64> {
        self.apply(cell.col as f64, cell.row as f64)
    }

    /// Translates a cell to a point in the raster.
    /// Cell (0, 0) is the top left corner of the raster.
    pub fn apply(&self, col: f64, row: f64) -> Point<f64> {
        let x = self.0[0] + self.0[1] * col + self.0[2] * row;
        let y = self.0[3] + self.0[4] * col + self.0[5] * row;
        Point::new(x, y)
    }

    /// Translates a point to fractional (col, row) pixel coordinates.
    ///
    /// Only supported for north up transforms, the general inverse is not needed
    /// as rotated rasters are rejected on input.
    pub fn pixel_at(&self, point: Point) -> Result<(f64, f64)> {
        if !self.is_north_up() {
            return Err(Error::Runtime(
                "GeoTransform::pixel_at: only north up transforms are supported".to_string(),
            ));
        }

        let col = (point.x() - self.0[0]) / self.0[1];
        let row = (point.y() - self.0[3]) / self.0[5];
        Ok((col, row))
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.0[0], self.0[3])
    }

    /// The horizontal cell size
    pub fn cell_size_x(&self) -> f64 {
        self.0[1]
    }

    /// The vertical cell size
    pub fn cell_size_y(&self) -> f64 {
        self.0[5]
    }

    pub fn cell_size(&self) -> CellSize {
        CellSize::new(self.0[1], self.0[5])
    }

    /// True when the raster has no rotation terms and row indices increase towards the south.
    pub fn is_north_up(&self) -> bool {
        self.0[2] == 0.0 && self.0[4] == 0.0 && self.0[1] > 0.0 && self.0[5] < 0.0
    }

    /// Returns the coefficients of the transformation.
    pub fn coefficients(&self) -> [f64; 6] {
        self.0
    }
}

impl From<[f64; 6]> for GeoTransform {
    fn from(coefficients: [f64; 6]) -> Self {
        GeoTransform(coefficients)
    }
}

impl From<GeoTransform> for [f64; 6] {
    fn from(geo_trans: GeoTransform) -> [f64; 6] {
        geo_trans.0
    }
}

impl Debug for GeoTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GeoTransform(topleft: ({}, {}), pixel_width: {}, pixel_height: {})",
            self.0[0],
            self.0[3],
            self.cell_size_x(),
            self.cell_size_y()
        )
    }
}

impl AbsDiffEq for GeoTransform {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl RelativeEq for GeoTransform {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn apply_and_pixel_at_roundtrip() {
        let transform = GeoTransform::from_top_left_and_cell_size(Point::new(11.0, 46.0), CellSize::new(0.001, -0.001));

        let point = transform.apply(250.0, 125.0);
        assert_relative_eq!(point, Point::new(11.25, 45.875));

        let (col, row) = transform.pixel_at(point).unwrap();
        assert_relative_eq!(col, 250.0);
        assert_relative_eq!(row, 125.0);
    }

    #[test]
    fn north_up_detection() {
        assert!(GeoTransform::new([11.0, 0.001, 0.0, 46.0, 0.0, -0.001]).is_north_up());
        assert!(!GeoTransform::new([11.0, 0.001, 0.5, 46.0, 0.0, -0.001]).is_north_up());
        assert!(!GeoTransform::new([11.0, 0.001, 0.0, 46.0, 0.0, 0.001]).is_north_up());
    }

    #[test]
    fn pixel_at_rejects_rotated_transform() {
        let rotated = GeoTransform::new([11.0, 0.001, 0.2, 46.0, 0.1, -0.001]);
        assert!(rotated.pixel_at(Point::new(11.0, 46.0)).is_err());
    }
}
