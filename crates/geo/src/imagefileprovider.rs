use std::path::{Path, PathBuf};

use image::RgbImage;
use inf::Error;

use crate::{crs, Columns, GeoReference, LatLonBounds, MemoryRasterProvider, RasterProvider, RasterSize, Result, Rows, WorldFile};

/// Raster provider reading a plain image file (png, jpeg, tiff or bmp) that
/// is georeferenced through an ESRI world file.
pub struct ImageFileProvider {
    path: PathBuf,
    inner: MemoryRasterProvider,
}

impl ImageFileProvider {
    /// Opens an image, locating the world file next to it.
    pub fn open(path: &Path) -> Result<Self> {
        let world_path = WorldFile::sidecar_for(path).ok_or_else(|| {
            Error::Runtime(format!(
                "No world file found next to '{}' (tried the .pgw/.jgw/.tfw and .wld conventions)",
                path.display()
            ))
        })?;

        Self::open_with_world_file(path, &world_path)
    }

    /// Opens an image using an explicit world file.
    pub fn open_with_world_file(path: &Path, world_path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }

        let world = WorldFile::from_file(world_path)?;
        let transform = world.to_geo_transform()?;

        let decoded = image::open(path)
            .map_err(|e| Error::Runtime(format!("Failed to read image '{}' ({e})", path.display())))?;

        let size = RasterSize::with_rows_cols(Rows(decoded.height() as i32), Columns(decoded.width() as i32));
        // World files carry no projection information, geographic WGS84 is assumed.
        let reference = GeoReference::new(crs::epsg::WGS84.to_string(), size, transform, None);

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?
            .to_string();

        log::debug!("Opened '{}': {} px, bounds {}", path.display(), size, reference.latlon_bounds());

        let inner = if decoded.color().has_color() {
            MemoryRasterProvider::new(name, reference, decoded.to_rgb8())?
        } else {
            MemoryRasterProvider::from_gray(name, reference, decoded.to_luma8())?
        };

        Ok(ImageFileProvider {
            path: path.to_path_buf(),
            inner,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RasterProvider for ImageFileProvider {
    fn describe(&self) -> &GeoReference {
        self.inner.describe()
    }

    fn layer_name(&self) -> &str {
        self.inner.layer_name()
    }

    fn read_window(&self, bounds: &LatLonBounds, size: RasterSize) -> Result<RgbImage> {
        self.inner.read_window(bounds, size)
    }
}
