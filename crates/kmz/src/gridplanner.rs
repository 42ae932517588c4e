use geo::{Cell, CellIterator, Columns, RasterSize, Rows, Window};
use inf::Error;

use crate::Result;

/// Maximum number of pixels in a single Custom Map tile.
pub const MAX_TILE_PIXELS: usize = 1_000_000;

/// Placement of the output tile grid: how much the source is scaled down and
/// how the scaled output is cut into tiles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePlan {
    /// Pixel size of the rendered output raster.
    pub output_size: RasterSize,
    /// Tile grid dimensions, rows and columns of tiles.
    pub grid: RasterSize,
    /// Pixel size of a full (non edge) tile.
    pub tile_size: RasterSize,
    /// Factor the source resolution was scaled by, 1.0 when it fits unscaled.
    pub scale_factor: f64,
}

impl TilePlan {
    pub fn tile_count(&self) -> usize {
        self.grid.cell_count()
    }

    /// The grid cells in row major order.
    pub fn cells(&self) -> CellIterator {
        CellIterator::for_raster_with_size(self.grid)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.is_valid() && cell.row < self.grid.rows.count() && cell.col < self.grid.cols.count()
    }

    /// True when the output resolution was reduced to fit the tile budget.
    pub fn is_scaled(&self) -> bool {
        self.scale_factor < 1.0
    }

    /// Pixel window of a grid cell within the output raster.
    ///
    /// Windows in the rightmost column and bottom row are clipped to the
    /// output size, so the windows of all cells partition the output exactly.
    pub fn cell_window(&self, cell: Cell) -> Window {
        let col_off = cell.col * self.tile_size.cols.count();
        let row_off = cell.row * self.tile_size.rows.count();
        let cols = (self.output_size.cols.count() - col_off).min(self.tile_size.cols.count());
        let rows = (self.output_size.rows.count() - row_off).min(self.tile_size.rows.count());

        Window::new(col_off, row_off, RasterSize::with_rows_cols(Rows(rows), Columns(cols)))
    }
}

/// Plans the tile layout for a raster under a device tile budget.
///
/// The planner first tries to keep the source resolution. When no grid of at
/// most `max_tiles` tiles of at most [`MAX_TILE_PIXELS`] pixels each covers
/// the raster, the output is scaled down as little as possible: a binary
/// search over the length of the longest output axis finds the largest output
/// that still fits the budget.
pub fn plan(source_size: RasterSize, max_tiles: u32) -> Result<TilePlan> {
    if source_size.is_empty() {
        return Err(Error::Planning(format!(
            "raster {source_size} does not contain any pixels"
        )));
    }

    if max_tiles == 0 {
        return Err(Error::Planning("device tile budget must be at least 1".to_string()));
    }

    let tile_plan = if let Some(grid) = smallest_grid(source_size, max_tiles) {
        build_plan(source_size, grid, 1.0)
    } else {
        // The longest output axis is the search variable, the other axis
        // scales along proportionally. A single pixel output always fits,
        // so the search space is never empty.
        let longest = source_size.max_dimension() as i64;
        let mut fitting = 1i64;
        let mut too_large = longest; // the full size is known not to fit
        while too_large - fitting > 1 {
            let middle = fitting + (too_large - fitting) / 2;
            if smallest_grid(scaled_size(source_size, middle), max_tiles).is_some() {
                fitting = middle;
            } else {
                too_large = middle;
            }
        }

        let output_size = scaled_size(source_size, fitting);
        let grid = smallest_grid(output_size, max_tiles).ok_or_else(|| {
            Error::Planning(format!(
                "no grid of at most {max_tiles} tiles covers a {output_size} raster"
            ))
        })?;

        build_plan(output_size, grid, fitting as f64 / longest as f64)
    };

    log::debug!(
        "Tile plan for {} with budget {}: {} tiles (grid {}, tile size {}, scale {:.4})",
        source_size,
        max_tiles,
        tile_plan.tile_count(),
        tile_plan.grid,
        tile_plan.tile_size,
        tile_plan.scale_factor
    );

    Ok(tile_plan)
}

fn build_plan(output_size: RasterSize, grid: RasterSize, scale_factor: f64) -> TilePlan {
    let tile_size = RasterSize::with_rows_cols(
        Rows((output_size.rows.count() as i64).div_ceil(grid.rows.count() as i64) as i32),
        Columns((output_size.cols.count() as i64).div_ceil(grid.cols.count() as i64) as i32),
    );

    TilePlan {
        output_size,
        grid,
        tile_size,
        scale_factor,
    }
}

/// Scales a raster size so its longest axis becomes `longest` pixels, keeping
/// the aspect ratio. Axes never drop below a single pixel.
fn scaled_size(source: RasterSize, longest: i64) -> RasterSize {
    let rows = source.rows.count() as i64;
    let cols = source.cols.count() as i64;
    let scale = longest as f64 / rows.max(cols) as f64;

    if cols >= rows {
        RasterSize::with_rows_cols(Rows(scaled_dimension(rows as f64 * scale)), Columns(longest as i32))
    } else {
        RasterSize::with_rows_cols(Rows(longest as i32), Columns(scaled_dimension(cols as f64 * scale)))
    }
}

fn scaled_dimension(value: f64) -> i32 {
    (value.round() as i32).max(1)
}

/// The grid with the fewest tiles covering `size`, subject to the tile budget
/// and the per tile pixel limit. Among grids with the same tile count the one
/// with the squarest tiles wins, keeping tile shapes display friendly;
/// remaining ties go to the lowest column count.
fn smallest_grid(size: RasterSize, max_tiles: u32) -> Option<RasterSize> {
    let rows = size.rows.count() as i64;
    let cols = size.cols.count() as i64;

    // Each tile covers at most MAX_TILE_PIXELS pixels, which bounds the
    // smallest tile count worth trying.
    let lower_bound = (rows * cols).div_ceil(MAX_TILE_PIXELS as i64).max(1);

    for total in lower_bound..=i64::from(max_tiles) {
        let mut best: Option<(RasterSize, (i64, i64))> = None;

        let mut divisor = 1;
        while divisor * divisor <= total {
            if total % divisor == 0 {
                for grid_cols in [divisor, total / divisor] {
                    if let Some(candidate) = evaluate_grid(rows, cols, total / grid_cols, grid_cols) {
                        if best.is_none_or(|(_, rank)| candidate.1 < rank) {
                            best = Some(candidate);
                        }
                    }
                }
            }

            divisor += 1;
        }

        if let Some((grid, _)) = best {
            return Some(grid);
        }
    }

    None
}

fn evaluate_grid(rows: i64, cols: i64, grid_rows: i64, grid_cols: i64) -> Option<(RasterSize, (i64, i64))> {
    if grid_rows > rows || grid_cols > cols {
        return None;
    }

    let tile_rows = rows.div_ceil(grid_rows);
    let tile_cols = cols.div_ceil(grid_cols);
    if tile_rows * tile_cols > MAX_TILE_PIXELS as i64 {
        return None;
    }

    Some((
        RasterSize::with_rows_cols(Rows(grid_rows as i32), Columns(grid_cols as i32)),
        ((tile_cols - tile_rows).abs(), grid_cols),
    ))
}
