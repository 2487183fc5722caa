//! Raster storage with content identity, windowing and compositing
//!
//! A raster is a dense row-major grid of integer cells. Zero is background;
//! generators draw with 255 but all arithmetic is general. Identity is defined
//! purely by content: two rasters are equal when their dimensions and every
//! cell agree, and the content hash is derived from the cells alone so it is
//! consistent with that equality.

use ndarray::{Array2, s};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::io::configuration::BACKGROUND;
use crate::io::error::{Result, dimension_mismatch, invalid_data};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Owned rectangular grid of integer cells indexed by `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    cells: Array2<i32>,
}

impl Default for Raster {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Raster {
    /// Create an all-background raster
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::from_elem((rows, cols), BACKGROUND),
        }
    }

    /// Create a raster with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: i32) -> Self {
        Self {
            cells: Array2::from_elem((rows, cols), value),
        }
    }

    /// Wrap an existing array
    pub fn from_array(cells: Array2<i32>) -> Self {
        Self { cells }
    }

    /// Build a raster from row vectors
    ///
    /// # Errors
    ///
    /// Returns an error if the rows have differing lengths
    pub fn from_rows(rows: &[Vec<i32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(invalid_data(&format!(
                "row {index} has {} cells, expected {cols}",
                row.len()
            )));
        }
        let flat = rows.iter().flatten().copied().collect();
        Self::from_flat(rows.len(), cols, flat)
    }

    /// Build a raster from row-major cells
    ///
    /// # Errors
    ///
    /// Returns an error if `cells.len()` differs from `rows * cols`
    pub fn from_flat(rows: usize, cols: usize, cells: Vec<i32>) -> Result<Self> {
        let found = cells.len();
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| invalid_data(&format!("{rows}x{cols} raster is too large")))?;
        Array2::from_shape_vec((rows, cols), cells)
            .map(Self::from_array)
            .map_err(|_shape_error| {
                invalid_data(&format!(
                    "{rows}x{cols} raster needs {expected} cells, found {found}"
                ))
            })
    }

    /// Number of rows (height)
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns (width)
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// True when the raster has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Borrow the underlying array
    pub const fn cells(&self) -> &Array2<i32> {
        &self.cells
    }

    /// Unwrap into the underlying array
    pub fn into_cells(self) -> Array2<i32> {
        self.cells
    }

    /// Cell value, or `None` outside the raster
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        self.cells.get([row, col]).copied()
    }

    /// True when the cell exists and is not background
    pub fn is_foreground(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(|value| value != BACKGROUND)
    }

    /// Write a cell
    ///
    /// A write outside the raster is a no-op and returns `false`.
    pub fn set(&mut self, row: usize, col: usize, value: i32) -> bool {
        self.cells.get_mut([row, col]).is_some_and(|cell| {
            *cell = value;
            true
        })
    }

    /// Row-major copy of all cells
    pub fn to_flat(&self) -> Vec<i32> {
        self.cells.iter().copied().collect()
    }

    /// Copy a rectangular window
    ///
    /// Ends are clamped to the raster. An empty window yields a 0x0 raster
    /// rather than an error.
    pub fn slice(&self, row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        let row_end = row_end.min(self.rows());
        let col_end = col_end.min(self.cols());
        if row_start >= row_end || col_start >= col_end {
            return Self::new(0, 0);
        }
        Self::from_array(
            self.cells
                .slice(s![row_start..row_end, col_start..col_end])
                .to_owned(),
        )
    }

    /// Copy a band of rows spanning all columns
    pub fn slice_rows(&self, start: usize, end: usize) -> Self {
        self.slice(start, end, 0, self.cols())
    }

    /// Copy a band of columns spanning all rows
    pub fn slice_cols(&self, start: usize, end: usize) -> Self {
        self.slice(0, self.rows(), start, end)
    }

    /// Set every cell of a row
    pub fn set_row(&mut self, row: usize, value: i32) {
        if row < self.rows() {
            self.cells.row_mut(row).fill(value);
        }
    }

    /// Set every cell of a column
    pub fn set_col(&mut self, col: usize, value: i32) {
        if col < self.cols() {
            self.cells.column_mut(col).fill(value);
        }
    }

    /// True when the row exists and every cell equals `value`
    pub fn row_equals(&self, row: usize, value: i32) -> bool {
        row < self.rows() && self.cells.row(row).iter().all(|&cell| cell == value)
    }

    /// True when the column exists and every cell equals `value`
    pub fn col_equals(&self, col: usize, value: i32) -> bool {
        col < self.cols() && self.cells.column(col).iter().all(|&cell| cell == value)
    }

    /// In-bounds 4-connected neighbours of a cell
    pub fn neighbors4(&self, row: usize, col: usize) -> impl Iterator<Item = [usize; 2]> + use<> {
        let (rows, cols) = self.dim();
        let candidates = [
            row.checked_sub(1).map(|r| [r, col]),
            (row + 1 < rows).then_some([row + 1, col]),
            col.checked_sub(1).map(|c| [row, c]),
            (col + 1 < cols).then_some([row, col + 1]),
        ];
        candidates.into_iter().flatten()
    }

    /// Count 4-connected neighbours holding the same value as the cell
    pub fn count_neighbors(&self, row: usize, col: usize) -> usize {
        let Some(value) = self.get(row, col) else {
            return 0;
        };
        self.neighbors4(row, col)
            .filter(|&[r, c]| self.get(r, c) == Some(value))
            .count()
    }

    /// The unique foreground 4-neighbour of a cell, if exactly one exists
    pub fn single_foreground_neighbor(&self, row: usize, col: usize) -> Option<[usize; 2]> {
        let mut found = self
            .neighbors4(row, col)
            .filter(|&[r, c]| self.is_foreground(r, c));
        let first = found.next()?;
        found.next().is_none().then_some(first)
    }

    /// Number of non-background cells
    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != BACKGROUND).count()
    }

    /// Count cells that disagree between two equally sized rasters
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ
    pub fn diff(&self, other: &Self) -> Result<usize> {
        if self.dim() != other.dim() {
            return Err(dimension_mismatch("diff", self.dim(), other.dim()));
        }
        Ok(self
            .cells
            .iter()
            .zip(other.cells.iter())
            .filter(|(a, b)| a != b)
            .count())
    }

    /// FNV-1a over the little-endian bytes of every cell, finalised with an
    /// avalanche mix
    pub fn content_hash(&self) -> u32 {
        let mut hash = FNV_OFFSET_BASIS;
        for &cell in &self.cells {
            for byte in cell.to_le_bytes() {
                hash = (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME);
            }
        }

        hash = hash.wrapping_add(hash << 13);
        hash ^= hash >> 7;
        hash = hash.wrapping_add(hash << 3);
        hash ^= hash >> 17;
        hash.wrapping_add(hash << 5)
    }

    /// Smallest window containing every foreground cell
    ///
    /// Returns the trimmed raster and the number of rows and columns removed
    /// from the top and left. A raster with no foreground trims to 0x0.
    pub fn trim_background(&self) -> (Self, [usize; 2]) {
        let (rows, cols) = self.dim();
        let row_start = (0..rows).find(|&r| !self.row_equals(r, BACKGROUND));
        let col_start = (0..cols).find(|&c| !self.col_equals(c, BACKGROUND));
        let (Some(row_start), Some(col_start)) = (row_start, col_start) else {
            return (Self::new(0, 0), [0, 0]);
        };
        let row_end = (0..rows)
            .rev()
            .find(|&r| !self.row_equals(r, BACKGROUND))
            .map_or(rows, |r| r + 1);
        let col_end = (0..cols)
            .rev()
            .find(|&c| !self.col_equals(c, BACKGROUND))
            .map_or(cols, |c| c + 1);

        (
            self.slice(row_start, row_end, col_start, col_end),
            [row_start, col_start],
        )
    }

    /// Copy `patch` over this raster with its top-left at `offset`
    ///
    /// Every patch cell inside the bounds overwrites the destination,
    /// background included.
    #[must_use]
    pub fn paste(&self, patch: &Self, offset: [usize; 2]) -> Self {
        self.composite(patch, offset, |_, value| Some(value))
    }

    /// Draw the foreground of `patch` over this raster
    #[must_use]
    pub fn overlay(&self, patch: &Self, offset: [usize; 2]) -> Self {
        self.composite(patch, offset, |_, value| {
            (value != BACKGROUND).then_some(value)
        })
    }

    /// Clear every cell covered by the foreground of `patch`
    #[must_use]
    pub fn subtract(&self, patch: &Self, offset: [usize; 2]) -> Self {
        self.composite(patch, offset, |_, value| {
            (value != BACKGROUND).then_some(BACKGROUND)
        })
    }

    fn composite<F>(&self, patch: &Self, offset: [usize; 2], mut blend: F) -> Self
    where
        F: FnMut(i32, i32) -> Option<i32>,
    {
        let mut out = self.clone();
        for ((row, col), &value) in patch.cells.indexed_iter() {
            if let Some(cell) = out.cells.get_mut([row + offset[0], col + offset[1]]) {
                if let Some(next) = blend(*cell, value) {
                    *cell = next;
                }
            }
        }
        out
    }
}

impl Hash for Raster {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.content_hash());
    }
}

impl fmt::Display for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", line.join(", "))?;
        }
        Ok(())
    }
}
