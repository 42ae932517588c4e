use geo::{Cell, Columns, LatLonBounds, RasterSize, Rows};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::RgbImage;
use inf::Error;

use crate::tilerenderer::RenderedTile;
use crate::Result;

/// Upper bound on the encoded size of a single tile.
pub const MAX_TILE_BYTES: usize = 3 * 1024 * 1024;
/// Highest jpeg quality the devices render reliably.
pub const MAX_JPEG_QUALITY: u8 = 75;

/// Knobs for the jpeg encoding stage.
///
/// When a tile does not fit in `max_bytes` at the configured quality the
/// encoder first walks the quality down in `quality_step` decrements and,
/// once `min_quality` is reached, halves the tile dimensions and starts the
/// quality ladder over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    pub quality: u8,
    pub min_quality: u8,
    pub quality_step: u8,
    pub max_bytes: usize,
    pub max_shrink_rounds: u32,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            quality: MAX_JPEG_QUALITY,
            min_quality: 10,
            quality_step: 10,
            max_bytes: MAX_TILE_BYTES,
            max_shrink_rounds: 10,
        }
    }
}

impl EncoderOptions {
    pub fn validate(&self) -> Result {
        if self.quality == 0 || self.quality > MAX_JPEG_QUALITY {
            return Err(Error::InvalidParameter(format!(
                "jpeg quality must lie in [1, {}] (got {})",
                MAX_JPEG_QUALITY, self.quality
            )));
        }

        if self.min_quality == 0 || self.min_quality > self.quality {
            return Err(Error::InvalidParameter(format!(
                "minimum jpeg quality must lie in [1, {}] (got {})",
                self.quality, self.min_quality
            )));
        }

        if self.quality_step == 0 {
            return Err(Error::InvalidParameter("jpeg quality step must be at least 1".into()));
        }

        if self.max_bytes == 0 {
            return Err(Error::InvalidParameter("tile byte budget must be at least 1".into()));
        }

        Ok(())
    }
}

/// A tile encoded as baseline jpeg, ready to be stored in the archive.
#[derive(Debug, Clone)]
pub struct EncodedTile {
    pub cell: Cell,
    pub bounds: LatLonBounds,
    pub data: Vec<u8>,
    pub quality_used: u8,
    pub pixel_size: RasterSize,
}

/// Encodes rendered tiles as baseline jpeg within the device byte budget.
pub struct TileEncoder {
    options: EncoderOptions,
}

impl TileEncoder {
    pub fn new(options: EncoderOptions) -> Self {
        TileEncoder { options }
    }

    pub fn encode(&self, tile: RenderedTile) -> Result<EncodedTile> {
        let RenderedTile { cell, bounds, pixels } = tile;

        let mut image = pixels;
        let mut quality = self.options.quality;
        let mut shrink_rounds = 0;

        loop {
            let data = encode_jpeg(&image, quality)?;
            if data.len() <= self.options.max_bytes {
                return Ok(EncodedTile {
                    cell,
                    bounds,
                    quality_used: quality,
                    pixel_size: RasterSize::with_rows_cols(Rows(image.height() as i32), Columns(image.width() as i32)),
                    data,
                });
            }

            if quality > self.options.min_quality {
                quality = quality
                    .saturating_sub(self.options.quality_step)
                    .max(self.options.min_quality);
            } else if shrink_rounds < self.options.max_shrink_rounds && (image.width() > 1 || image.height() > 1) {
                shrink_rounds += 1;
                let (width, height) = ((image.width() / 2).max(1), (image.height() / 2).max(1));
                log::debug!("Tile {cell} exceeds {} bytes at quality {quality}, shrinking to {width}x{height}", self.options.max_bytes);
                image = imageops::resize(&image, width, height, FilterType::Lanczos3);
                quality = self.options.quality;
            } else {
                return Err(Error::Encoding(format!(
                    "tile {cell} cannot be encoded within {} bytes",
                    self.options.max_bytes
                )));
            }
        }
    }
}

fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, quality)
        .encode_image(image)
        .map_err(|e| Error::Runtime(format!("Failed to encode jpeg tile: {e}")))?;

    Ok(data)
}
