//! Dense rectangular grid storage.
//!
//! A `Grid<T>` always has at least one row and one column, and every row has
//! the same length. The only way to build one from outside the crate is
//! [`Grid::from_rows`], which enforces that shape.

use std::ops::Index;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::error::GridError;

// =============================================================================
// Grid: 2D values (dense storage, row-major)
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Grid<T> {
    /// Build a grid from nested rows, rejecting empty or jagged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let cols = match rows.first() {
            None => return Err(GridError::Empty),
            Some(first) => first.len(),
        };

        for (row, values) in rows.iter().enumerate() {
            if values.is_empty() {
                return Err(GridError::EmptyRow { row });
            }
            if values.len() != cols {
                return Err(GridError::Jagged { row, expected: cols, found: values.len() });
            }
        }

        let row_count = rows.len();
        let mut data = Vec::with_capacity(row_count * cols);
        for values in rows {
            data.extend(values);
        }

        Ok(Self { data, rows: row_count, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Never true for a grid built through `from_rows`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            Some(&self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.data[start..start + self.cols])
        } else {
            None
        }
    }

    /// Rows in order, each as a slice.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.cols)
    }

    /// Every cell as `(row, col, &value)`, row-major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (i / cols, i % cols, v))
    }

    /// New grid of the same shape, one output per cell.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            data: self.data.iter().map(&mut f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Like [`Grid::map`], with the cell coordinates passed in.
    pub fn map_indexed<U>(&self, mut f: impl FnMut(usize, usize, &T) -> U) -> Grid<U> {
        Grid {
            data: self.iter_cells().map(|(r, c, v)| f(r, c, v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.dims() == other.dims()
    }
}

impl<T: Clone> Grid<T> {
    /// Nested-row copy, the shape callers built the grid from.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

// Serialized as an array of row arrays, e.g. [[1.0, 2.0], [3.0, 4.0]]
impl<T: Serialize> Serialize for Grid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter_rows())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Grid<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<T>>::deserialize(deserializer)?;
        Grid::from_rows(rows).map_err(de::Error::custom)
    }
}
