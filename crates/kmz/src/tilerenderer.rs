use geo::{Cell, GeoReference, LatLonBounds, RasterProvider};
use image::RgbImage;
use inf::Error;

use crate::{Result, TilePlan};

/// The pixels of one grid cell together with its geographic bounds.
#[derive(Debug, Clone)]
pub struct RenderedTile {
    pub cell: Cell,
    pub bounds: LatLonBounds,
    pub pixels: RgbImage,
}

/// Renders the grid cells of a tile plan by reading them from a raster provider.
///
/// The geographic bounds of every tile are evaluated on the scaled output
/// grid, so neighbouring tiles share bit identical edges and the tiles cover
/// the source extent without gaps or overlaps.
pub struct TileRenderer<'a, P: RasterProvider + ?Sized> {
    provider: &'a P,
    plan: &'a TilePlan,
    output_reference: GeoReference,
}

impl<'a, P: RasterProvider + ?Sized> TileRenderer<'a, P> {
    pub fn new(provider: &'a P, plan: &'a TilePlan) -> Self {
        let output_reference = provider.describe().scaled_to(plan.output_size);
        TileRenderer {
            provider,
            plan,
            output_reference,
        }
    }

    /// Georeferencing of the scaled output raster the tile windows are cut from.
    pub fn output_reference(&self) -> &GeoReference {
        &self.output_reference
    }

    pub fn render(&self, cell: Cell) -> Result<RenderedTile> {
        if !self.plan.contains(cell) {
            return Err(Error::InvalidParameter(format!(
                "cell {cell} lies outside the {} tile grid",
                self.plan.grid
            )));
        }

        let window = self.plan.cell_window(cell);
        let bounds = self.output_reference.window_bounds(&window);
        let pixels = self.provider.read_window(&bounds, window.size)?;

        let expected = (window.size.cols.count() as u32, window.size.rows.count() as u32);
        if pixels.dimensions() != expected {
            return Err(Error::SizeMismatch {
                size1: (pixels.width() as usize, pixels.height() as usize),
                size2: (expected.0 as usize, expected.1 as usize),
            });
        }

        log::trace!("Rendered tile {cell}: {} px at {bounds}", window.size);
        Ok(RenderedTile { cell, bounds, pixels })
    }
}

#[cfg(test)]
mod tests {
    use geo::{CellSize, Columns, MemoryRasterProvider, Point, RasterSize, Rows};
    use image::Rgb;

    use super::*;

    fn size(rows: i32, cols: i32) -> RasterSize {
        RasterSize::with_rows_cols(Rows(rows), Columns(cols))
    }

    fn provider(rows: i32, cols: i32) -> MemoryRasterProvider {
        let reference = geo::GeoReference::with_top_left_origin(
            "EPSG:4326".to_string(),
            size(rows, cols),
            Point::new(4.0, 52.0),
            CellSize::square(0.001),
            None,
        );
        let pixels = RgbImage::from_fn(cols as u32, rows as u32, |x, y| Rgb([(x % 251) as u8, (y % 251) as u8, 9]));
        MemoryRasterProvider::new("test", reference, pixels).unwrap()
    }

    fn unscaled_plan() -> TilePlan {
        TilePlan {
            output_size: size(100, 150),
            grid: size(2, 3),
            tile_size: size(50, 50),
            scale_factor: 1.0,
        }
    }

    #[test]
    fn rendered_tile_matches_the_source_window() {
        let provider = provider(100, 150);
        let plan = unscaled_plan();
        let renderer = TileRenderer::new(&provider, &plan);

        let tile = renderer.render(Cell::from_row_col(1, 2)).unwrap();
        assert_eq!(tile.pixels.dimensions(), (50, 50));
        for y in 0..50u32 {
            for x in 0..50u32 {
                assert_eq!(tile.pixels.get_pixel(x, y), &Rgb([((x + 100) % 251) as u8, ((y + 50) % 251) as u8, 9]));
            }
        }
    }

    #[test]
    fn neighbouring_tiles_share_their_edges() {
        let provider = provider(100, 150);
        let plan = unscaled_plan();
        let renderer = TileRenderer::new(&provider, &plan);

        let left = renderer.render(Cell::from_row_col(0, 0)).unwrap();
        let right = renderer.render(Cell::from_row_col(0, 1)).unwrap();
        let below = renderer.render(Cell::from_row_col(1, 0)).unwrap();

        assert_eq!(left.bounds.east(), right.bounds.west());
        assert_eq!(left.bounds.north(), right.bounds.north());
        assert_eq!(left.bounds.south(), below.bounds.north());
        assert_eq!(left.bounds.west(), below.bounds.west());
    }

    #[test]
    fn scaled_plan_renders_resampled_pixels() {
        let provider = provider(100, 150);
        let plan = TilePlan {
            output_size: size(50, 75),
            grid: size(1, 1),
            tile_size: size(50, 75),
            scale_factor: 0.5,
        };
        let renderer = TileRenderer::new(&provider, &plan);

        let tile = renderer.render(Cell::from_row_col(0, 0)).unwrap();
        assert_eq!(tile.pixels.dimensions(), (75, 50));
        // Blue stays untouched by the downscale of the red/green gradient.
        assert!(tile.pixels.pixels().all(|p| p[2] == 9));
    }

    #[test]
    fn cells_outside_the_grid_are_rejected() {
        let provider = provider(100, 150);
        let plan = unscaled_plan();
        let renderer = TileRenderer::new(&provider, &plan);

        assert!(matches!(
            renderer.render(Cell::from_row_col(2, 0)),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            renderer.render(Cell::from_row_col(0, 3)),
            Err(Error::InvalidParameter(_))
        ));
    }
}
