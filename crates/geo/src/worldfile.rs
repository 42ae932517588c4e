use std::path::{Path, PathBuf};

use inf::Error;

use crate::{CellSize, GeoTransform, Point, Result};

/// ESRI world file describing the georeferencing of a plain image file.
///
/// A world file contains six numbers, one per line: the x cell size, two
/// rotation terms, the y cell size (negative for north up images) and the
/// geographic x and y position of the center of the top left pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldFile {
    pub cell_size: CellSize,
    /// Rotation term applied to the y coordinate (second line).
    pub rotation_y: f64,
    /// Rotation term applied to the x coordinate (third line).
    pub rotation_x: f64,
    /// Geographic position of the center of the top left pixel.
    pub center: Point,
}

impl WorldFile {
    pub fn parse(content: &str) -> Result<WorldFile> {
        let values = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::parse::<f64>)
            .collect::<std::result::Result<Vec<f64>, _>>()?;

        if values.len() != 6 {
            return Err(Error::Runtime(format!(
                "World file should contain 6 values, got {}",
                values.len()
            )));
        }

        Ok(WorldFile {
            cell_size: CellSize::new(values[0], values[3]),
            rotation_y: values[1],
            rotation_x: values[2],
            center: Point::new(values[4], values[5]),
        })
    }

    pub fn from_file(path: &Path) -> Result<WorldFile> {
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }

        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// The geotransform of the image, shifted from the pixel center to the
    /// top left pixel corner convention.
    pub fn to_geo_transform(&self) -> Result<GeoTransform> {
        if self.rotation_x != 0.0 || self.rotation_y != 0.0 {
            return Err(Error::InvalidParameter(
                "rotated world files are not supported".to_string(),
            ));
        }

        if !self.cell_size.is_valid() || self.cell_size.x() <= 0.0 || self.cell_size.y() >= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "world file cell size ({}, {}) does not describe a north up image",
                self.cell_size.x(),
                self.cell_size.y()
            )));
        }

        let top_left = Point::new(
            self.center.x() - self.cell_size.x() / 2.0,
            self.center.y() - self.cell_size.y() / 2.0,
        );
        Ok(GeoTransform::from_top_left_and_cell_size(top_left, self.cell_size))
    }

    /// Locates the world file next to a raster image.
    ///
    /// Tries the abbreviated extension (image.pgw for image.png), the full
    /// extension with a w appended (image.pngw) and the generic image.wld.
    pub fn sidecar_for(raster_path: &Path) -> Option<PathBuf> {
        let ext = raster_path.extension()?.to_str()?.to_ascii_lowercase();

        let mut candidates = Vec::with_capacity(3);
        if ext.len() >= 2 {
            let first = ext.chars().next()?;
            let last = ext.chars().last()?;
            candidates.push(format!("{first}{last}w"));
        }
        candidates.push(format!("{ext}w"));
        candidates.push("wld".to_string());

        candidates
            .into_iter()
            .map(|candidate| raster_path.with_extension(candidate))
            .find(|path| path.is_file())
    }
}
