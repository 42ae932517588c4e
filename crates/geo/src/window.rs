use crate::RasterSize;

/// Rectangular pixel region within a raster, offsets are relative to the top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub col_off: i32,
    pub row_off: i32,
    pub size: RasterSize,
}

impl Window {
    pub const fn new(col_off: i32, row_off: i32, size: RasterSize) -> Self {
        Window { col_off, row_off, size }
    }

    /// Column just past the right edge of the window.
    pub fn right(&self) -> i32 {
        self.col_off + self.size.cols.count()
    }

    /// Row just past the bottom edge of the window.
    pub fn bottom(&self) -> i32 {
        self.row_off + self.size.rows.count()
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    pub fn pixel_count(&self) -> usize {
        self.size.cell_count()
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(col: {}, row: {}, size: {})", self.col_off, self.row_off, self.size)
    }
}
