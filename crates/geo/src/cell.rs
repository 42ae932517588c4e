use crate::{Columns, RasterSize, Rows};

/// Represents a point in the raster using row, col coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn from_row_col(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    pub const fn is_valid(&self) -> bool {
        self.row >= 0 && self.col >= 0
    }

    pub fn increment(&mut self, cols_in_grid: i32) {
        self.col += 1;
        if self.col >= cols_in_grid {
            self.col = 0;
            self.row += 1;
        }
    }

    pub fn index_in_raster(&self, cols_in_grid: i32) -> usize {
        assert!(self.is_valid());
        (self.row * cols_in_grid + self.col) as usize
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Iterator over the cells in a raster
/// The iterator will yield each cell in the raster based on the specified number of rows and columns.
/// Iteration will occur from the top-left cell to the bottom-right cell in row-major order.
pub struct CellIterator {
    rows: Rows,
    cols: Columns,
    current: Cell,
}

impl CellIterator {
    pub fn for_rows_cols(rows: Rows, cols: Columns) -> Self {
        CellIterator {
            rows,
            cols,
            current: Cell::from_row_col(0, 0),
        }
    }

    pub fn for_raster_with_size(size: RasterSize) -> Self {
        CellIterator {
            rows: size.rows,
            cols: size.cols,
            current: Cell::from_row_col(0, 0),
        }
    }
}

impl Iterator for CellIterator {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.row >= self.rows.count() {
            return None;
        }

        let current = self.current;
        self.current.increment(self.cols.count());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_iterator_is_row_major() {
        let cells: Vec<Cell> = CellIterator::for_rows_cols(Rows(2), Columns(3)).collect();
        assert_eq!(
            cells,
            vec![
                Cell::from_row_col(0, 0),
                Cell::from_row_col(0, 1),
                Cell::from_row_col(0, 2),
                Cell::from_row_col(1, 0),
                Cell::from_row_col(1, 1),
                Cell::from_row_col(1, 2),
            ]
        );
    }

    #[test]
    fn cell_iterator_matches_raster_index() {
        for (index, cell) in CellIterator::for_raster_with_size(RasterSize::square(4)).enumerate() {
            assert_eq!(cell.index_in_raster(4), index);
        }
    }

    #[test]
    fn cell_iterator_empty_raster() {
        assert_eq!(CellIterator::for_raster_with_size(RasterSize::empty()).count(), 0);
    }
}
