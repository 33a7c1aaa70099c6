// src/page.rs

//! The page buffer: a row-major grid of 7-bit teletext codes.
//!
//! The on-disk form of a page is the same bytes dumped row by row with no
//! header, one byte per cell. Values 128 and above are tolerated; the renderer
//! masks them to seven bits.

use std::fs;
use std::ops::{Index, IndexMut};
use std::path::Path;

use log::{debug, info};

use crate::error::PageError;

/// Columns on a teletext page.
pub const PAGE_WIDTH: usize = 40;
/// Rows on a teletext page.
pub const PAGE_HEIGHT: usize = 25;

/// The space code, used to blank cells.
pub const SPACE: u8 = 32;

/// A W x H grid of teletext codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBuffer {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl PageBuffer {
    /// A standard 40x25 page filled with spaces.
    pub fn blank() -> Self {
        Self::filled(PAGE_WIDTH, PAGE_HEIGHT, SPACE)
    }

    /// A page of arbitrary dimensions with every cell set to `code`.
    pub fn filled(width: usize, height: usize, code: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![code; width * height],
        }
    }

    /// Wraps row-major `bytes` as a `width` x `height` page.
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, PageError> {
        let expected = width * height;
        if bytes.len() != expected {
            return Err(PageError::WrongSize {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells: bytes.to_vec(),
        })
    }

    /// Reads a raw 40x25 dump. A short file is rejected; trailing bytes past
    /// one page are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PageError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let expected = PAGE_WIDTH * PAGE_HEIGHT;
        if bytes.len() < expected {
            return Err(PageError::WrongSize {
                expected,
                actual: bytes.len(),
            });
        }
        info!("Loaded page from {}", path.display());
        Self::from_bytes(PAGE_WIDTH, PAGE_HEIGHT, &bytes[..expected])
    }

    /// Writes the page as a raw row-major dump.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PageError> {
        let path = path.as_ref();
        fs::write(path, &self.cells)?;
        info!("Saved {}x{} page to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// (width, height) in cells.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<u8> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut u8> {
        if col < self.width && row < self.height {
            Some(&mut self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// The codes of one row.
    ///
    /// # Panics
    /// Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = row * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// The whole page in dump order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Shifts the row right from `col`, dropping the last cell, and blanks `col`.
    pub fn insert_cell(&mut self, col: usize, row: usize) {
        if col >= self.width || row >= self.height {
            return;
        }
        let line = self.row_mut(row);
        line[col..].rotate_right(1);
        line[col] = SPACE;
    }

    /// Removes the cell at `col`, shifting the rest of the row left and
    /// padding the end with a space.
    pub fn delete_cell(&mut self, col: usize, row: usize) {
        if col >= self.width || row >= self.height {
            return;
        }
        let width = self.width;
        let line = self.row_mut(row);
        line[col..].rotate_left(1);
        line[width - 1] = SPACE;
    }

    /// Pushes rows from `row` down by one, dropping the bottom row, and blanks `row`.
    pub fn insert_row(&mut self, row: usize) {
        if row >= self.height {
            return;
        }
        let start = row * self.width;
        self.cells[start..].rotate_right(self.width);
        self.row_mut(row).fill(SPACE);
        debug!("Inserted blank row at {}", row);
    }

    /// Removes `row`, pulling the rows below it up and blanking the bottom row.
    pub fn delete_row(&mut self, row: usize) {
        if row >= self.height {
            return;
        }
        let start = row * self.width;
        self.cells[start..].rotate_left(self.width);
        let last = self.height - 1;
        self.row_mut(last).fill(SPACE);
        debug!("Deleted row {}", row);
    }
}

impl Default for PageBuffer {
    fn default() -> Self {
        Self::blank()
    }
}

/// Indexing by `(col, row)`.
impl Index<(usize, usize)> for PageBuffer {
    type Output = u8;

    fn index(&self, (col, row): (usize, usize)) -> &u8 {
        assert!(col < self.width && row < self.height, "cell ({col}, {row}) out of range");
        &self.cells[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for PageBuffer {
    fn index_mut(&mut self, (col, row): (usize, usize)) -> &mut u8 {
        assert!(col < self.width && row < self.height, "cell ({col}, {row}) out of range");
        &mut self.cells[row * self.width + col]
    }
}
