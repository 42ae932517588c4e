use image::{GrayImage, Rgb, RgbImage};
use inf::Error;

use crate::resample::{self, SourceRect};
use crate::{crs, GeoReference, LatLonBounds, Point, RasterSize, Result};

/// Source of georeferenced pixel data.
///
/// Implementations hand out RGB pixels for arbitrary geographic regions at an
/// arbitrary target resolution. They are shared across worker threads, so all
/// reads go through shared references.
pub trait RasterProvider: Send + Sync {
    /// Georeferencing of the source raster.
    fn describe(&self) -> &GeoReference;
    /// Display name of the raster, used as the layer name in exports.
    fn layer_name(&self) -> &str;
    /// Reads the given geographic region resampled to `size` pixels.
    fn read_window(&self, bounds: &LatLonBounds, size: RasterSize) -> Result<RgbImage>;
}

/// Raster provider backed by an in memory image.
pub struct MemoryRasterProvider {
    name: String,
    georeference: GeoReference,
    pixels: RgbImage,
}

impl MemoryRasterProvider {
    pub fn new(name: impl Into<String>, georeference: GeoReference, pixels: RgbImage) -> Result<Self> {
        let size = georeference.raster_size();
        if size.is_empty() {
            return Err(Error::InvalidParameter("raster does not contain any pixels".to_string()));
        }

        if pixels.dimensions() != (size.cols.count() as u32, size.rows.count() as u32) {
            return Err(Error::SizeMismatch {
                size1: (pixels.width() as usize, pixels.height() as usize),
                size2: (size.cols.count() as usize, size.rows.count() as usize),
            });
        }

        if !georeference.is_north_up() {
            return Err(Error::InvalidParameter(
                "only north up rasters without rotation are supported".to_string(),
            ));
        }

        let projection = georeference.projection();
        if projection.is_empty() {
            log::warn!("Raster has no projection information, assuming geographic WGS84 coordinates");
        } else if !crs::projection_is_wgs84(projection) {
            return Err(Error::InvalidParameter(format!(
                "raster must be georeferenced in geographic WGS84 coordinates (got '{projection}')"
            )));
        }

        if !georeference.latlon_bounds().is_valid() {
            log::warn!(
                "Raster bounds {} exceed the valid geographic coordinate range",
                georeference.latlon_bounds()
            );
        }

        Ok(MemoryRasterProvider {
            name: name.into(),
            georeference,
            pixels,
        })
    }

    /// Builds a provider from single band pixels.
    ///
    /// The value range is stretched to full contrast and replicated over the
    /// rgb channels, so low dynamic range data stays readable on the device.
    pub fn from_gray(name: impl Into<String>, georeference: GeoReference, pixels: GrayImage) -> Result<Self> {
        Self::new(name, georeference, gray_to_rgb(&pixels))
    }
}

fn gray_to_rgb(gray: &GrayImage) -> RgbImage {
    let (min, max) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(min, max), p| (min.min(p[0]), max.max(p[0])));

    // Constant images map to black, like any other zero range band.
    let scale = if max > min { 255.0 / f64::from(max - min) } else { 0.0 };
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = (f64::from(gray.get_pixel(x, y)[0] - min) * scale) as u8;
        Rgb([value, value, value])
    })
}

impl RasterProvider for MemoryRasterProvider {
    fn describe(&self) -> &GeoReference {
        &self.georeference
    }

    fn layer_name(&self) -> &str {
        &self.name
    }

    fn read_window(&self, bounds: &LatLonBounds, size: RasterSize) -> Result<RgbImage> {
        let transform = self.georeference.geo_transform();
        let (x0, y0) = transform.pixel_at(Point::new(bounds.west(), bounds.north()))?;
        let (x1, y1) = transform.pixel_at(Point::new(bounds.east(), bounds.south()))?;

        let rect = SourceRect::new(x0, y0, x1, y1).clamped(self.pixels.width(), self.pixels.height());
        if rect.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "requested window {bounds} lies outside the raster extent {}",
                self.georeference.latlon_bounds()
            )));
        }

        resample::resample_rgb(&self.pixels, rect, size)
    }
}
