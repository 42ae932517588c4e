use approx::{AbsDiffEq, RelativeEq};

use crate::{GeoTransform, LatLonBounds, Point, RasterSize, Window};

/// Size of a raster cell in geographic units.
///
/// The y size is negative for north up rasters, matching the sign of the
/// corresponding geotransform coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSize {
    x: f64,
    y: f64,
}

impl CellSize {
    pub const fn new(x: f64, y: f64) -> Self {
        CellSize { x, y }
    }

    /// Square cell size for a north up raster.
    pub const fn square(size: f64) -> Self {
        CellSize { x: size, y: -size }
    }

    pub const fn x(&self) -> f64 {
        self.x
    }

    pub const fn y(&self) -> f64 {
        self.y
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x != 0.0 && self.y != 0.0
    }
}

impl AbsDiffEq for CellSize {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for CellSize {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative) && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

/// Describes the georeferencing of a raster: its size, the transformation
/// from pixel space to geographic space and the projection the geographic
/// coordinates are expressed in.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoReference {
    projection: String,
    size: RasterSize,
    geo_transform: GeoTransform,
    nodata: Option<f64>,
}

impl GeoReference {
    pub fn new(projection: String, size: RasterSize, geo_transform: GeoTransform, nodata: Option<f64>) -> Self {
        GeoReference {
            projection,
            size,
            geo_transform,
            nodata,
        }
    }

    pub fn with_top_left_origin(
        projection: String,
        size: RasterSize,
        top_left: Point,
        cell_size: CellSize,
        nodata: Option<f64>,
    ) -> Self {
        GeoReference::new(
            projection,
            size,
            GeoTransform::from_top_left_and_cell_size(top_left, cell_size),
            nodata,
        )
    }

    pub fn with_bottom_left_origin(
        projection: String,
        size: RasterSize,
        bottom_left: Point,
        cell_size: CellSize,
        nodata: Option<f64>,
    ) -> Self {
        let top_left = Point::new(bottom_left.x(), bottom_left.y() - size.rows.count() as f64 * cell_size.y());
        Self::with_top_left_origin(projection, size, top_left, cell_size, nodata)
    }

    pub fn raster_size(&self) -> RasterSize {
        self.size
    }

    pub fn rows(&self) -> crate::Rows {
        self.size.rows
    }

    pub fn columns(&self) -> crate::Columns {
        self.size.cols
    }

    pub fn projection(&self) -> &str {
        &self.projection
    }

    pub fn geo_transform(&self) -> &GeoTransform {
        &self.geo_transform
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    pub fn cell_size(&self) -> CellSize {
        self.geo_transform.cell_size()
    }

    pub fn top_left(&self) -> Point {
        self.geo_transform.apply(0.0, 0.0)
    }

    pub fn bottom_right(&self) -> Point {
        self.geo_transform
            .apply(self.size.cols.count() as f64, self.size.rows.count() as f64)
    }

    pub fn is_north_up(&self) -> bool {
        self.geo_transform.is_north_up()
    }

    /// Geographic bounds of the full raster.
    pub fn latlon_bounds(&self) -> LatLonBounds {
        LatLonBounds::hull(self.top_left().into(), self.bottom_right().into())
    }

    /// Geographic bounds of a pixel window within the raster.
    ///
    /// The edges are evaluated on the cell borders of the geotransform, so
    /// adjacent windows get bit identical shared edges.
    pub fn window_bounds(&self, window: &Window) -> LatLonBounds {
        let top_left = self.geo_transform.apply(window.col_off as f64, window.row_off as f64);
        let bottom_right = self.geo_transform.apply(window.right() as f64, window.bottom() as f64);
        LatLonBounds::hull(top_left.into(), bottom_right.into())
    }

    /// The same geographic extent described on a different pixel grid.
    pub fn scaled_to(&self, size: RasterSize) -> GeoReference {
        let scale_x = self.size.cols.count() as f64 / size.cols.count() as f64;
        let scale_y = self.size.rows.count() as f64 / size.rows.count() as f64;

        let c = self.geo_transform.coefficients();
        GeoReference::new(
            self.projection.clone(),
            size,
            GeoTransform::new([c[0], c[1] * scale_x, c[2] * scale_y, c[3], c[4] * scale_x, c[5] * scale_y]),
            self.nodata,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{Columns, Rows};

    fn reference_1000x800() -> GeoReference {
        GeoReference::with_top_left_origin(
            "EPSG:4326".to_string(),
            RasterSize::with_rows_cols(Rows(800), Columns(1000)),
            Point::new(4.0, 52.0),
            CellSize::square(0.001),
            None,
        )
    }

    #[test]
    fn origin_constructors_agree() {
        let size = RasterSize::with_rows_cols(Rows(800), Columns(1000));
        let from_top = GeoReference::with_top_left_origin(
            "EPSG:4326".to_string(),
            size,
            Point::new(4.0, 52.0),
            CellSize::square(0.001),
            None,
        );
        let from_bottom = GeoReference::with_bottom_left_origin(
            "EPSG:4326".to_string(),
            size,
            Point::new(4.0, 51.2),
            CellSize::square(0.001),
            None,
        );

        assert_relative_eq!(from_top.geo_transform(), from_bottom.geo_transform(), epsilon = 1e-12);
    }

    #[test]
    fn latlon_bounds_of_north_up_raster() {
        let bounds = reference_1000x800().latlon_bounds();
        assert_relative_eq!(bounds.west(), 4.0);
        assert_relative_eq!(bounds.north(), 52.0);
        assert_relative_eq!(bounds.east(), 5.0);
        assert_relative_eq!(bounds.south(), 51.2);
    }

    #[test]
    fn scaled_to_preserves_the_extent() {
        let reference = reference_1000x800();
        let scaled = reference.scaled_to(RasterSize::with_rows_cols(Rows(123), Columns(339)));

        let bounds = reference.latlon_bounds();
        let scaled_bounds = scaled.latlon_bounds();
        assert_relative_eq!(bounds.west(), scaled_bounds.west(), epsilon = 1e-9);
        assert_relative_eq!(bounds.north(), scaled_bounds.north(), epsilon = 1e-9);
        assert_relative_eq!(bounds.east(), scaled_bounds.east(), epsilon = 1e-9);
        assert_relative_eq!(bounds.south(), scaled_bounds.south(), epsilon = 1e-9);
    }

    #[test]
    fn adjacent_windows_share_exact_edges() {
        let reference = reference_1000x800();
        let size = RasterSize::with_rows_cols(Rows(800), Columns(300));

        let left = reference.window_bounds(&Window::new(0, 0, size));
        let right = reference.window_bounds(&Window::new(300, 0, size));
        assert_eq!(left.east(), right.west());

        let tile_size = RasterSize::with_rows_cols(Rows(400), Columns(1000));
        let top = reference.window_bounds(&Window::new(0, 0, tile_size));
        let bottom = reference.window_bounds(&Window::new(0, 400, tile_size));
        assert_eq!(top.south(), bottom.north());
    }
}
