//! Dense QUBO matrix.
//!
//! Cell `(i, j)` holds the coefficient of `x_i * x_j`; diagonal cells hold the
//! linear coefficient of `x_i` since `x_i^2 = x_i` for binary variables.
//! Cells are accumulators: the compiler only ever adds to them.

use std::fmt;
use std::ops::Range;

use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut2, Axis, Zip};

use crate::error::{QuboError, Result};

/// Square matrix of `f64` coefficients backed by an [`Array2`].
///
/// # Example
///
/// ```
/// use quboforge_core::QuboMatrix;
///
/// let mut q = QuboMatrix::zeros(2);
/// q.add(0, 0, -1.0);
/// q.add(1, 1, -1.0);
/// q.add(0, 1, 2.0);
///
/// assert_eq!(q.energy(&[true, false]).unwrap(), -1.0);
/// assert_eq!(q.energy(&[true, true]).unwrap(), 0.0);
/// assert!(q.is_upper_triangular());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuboMatrix {
    values: Array2<f64>,
}

impl QuboMatrix {
    /// Creates an all-zero matrix of side `dimension`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension * dimension` overflows `usize`. The compiler
    /// checks this before allocating.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            values: Array2::zeros((dimension, dimension)),
        }
    }

    /// Wraps an existing square array.
    ///
    /// # Errors
    ///
    /// Returns [`QuboError::DimensionMismatch`] if the array is not square.
    pub fn from_array(values: Array2<f64>) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows != cols {
            return Err(QuboError::DimensionMismatch {
                expected: rows,
                actual: cols,
            });
        }
        Ok(Self { values })
    }

    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`QuboError::DimensionMismatch`] if any row length differs
    /// from the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let dimension = rows.len();
        let mut values = Array2::zeros((dimension, dimension));
        for (mut target, row) in values.outer_iter_mut().zip(rows) {
            if row.len() != dimension {
                return Err(QuboError::DimensionMismatch {
                    expected: dimension,
                    actual: row.len(),
                });
            }
            target.assign(&ArrayView1::from(row.as_slice()));
        }
        Ok(Self { values })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.values.nrows()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[[row, col]]
    }

    /// Adds `value` to cell `(row, col)`.
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.values[[row, col]] += value;
    }

    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.values.row(row)
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn into_array(self) -> Array2<f64> {
        self.values
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.outer_iter().map(|row| row.to_vec()).collect()
    }

    /// Iterates `(row, col, value)` in row-major order over cells that are
    /// not exactly zero.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.values
            .indexed_iter()
            .filter(|(_, &v)| v != 0.0)
            .map(|((row, col), &v)| (row, col, v))
    }

    pub fn nonzero_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    pub fn transpose(&self) -> Self {
        Self {
            values: self.values.t().to_owned(),
        }
    }

    /// True if every cell below the diagonal is exactly zero.
    pub fn is_upper_triangular(&self) -> bool {
        self.values
            .indexed_iter()
            .all(|((row, col), &v)| row <= col || v == 0.0)
    }

    /// Folds every lower cell `(j, i)` into `(i, j)`.
    ///
    /// The result describes the same energy function as `self`.
    pub fn to_upper_triangular(&self) -> Self {
        let mut upper = Array2::zeros(self.values.raw_dim());
        Zip::indexed(&mut upper)
            .and(&self.values)
            .and(&self.values.t())
            .for_each(|(row, col), out, &value, &mirrored| {
                if row < col {
                    *out = value + mirrored;
                } else if row == col {
                    *out = value;
                }
            });
        Self { values: upper }
    }

    /// Evaluates `xᵗQx` for a binary assignment.
    ///
    /// # Errors
    ///
    /// Returns [`QuboError::DimensionMismatch`] if the assignment length is
    /// not the matrix dimension.
    pub fn energy(&self, assignment: &[bool]) -> Result<f64> {
        if assignment.len() != self.dimension() {
            return Err(QuboError::DimensionMismatch {
                expected: self.dimension(),
                actual: assignment.len(),
            });
        }
        let x: Array1<f64> = assignment
            .iter()
            .map(|&bit| if bit { 1.0 } else { 0.0 })
            .collect();
        Ok(x.dot(&self.values.dot(&x)))
    }

    /// Largest absolute cell difference, or `None` if dimensions differ.
    pub fn max_abs_difference(&self, other: &Self) -> Option<f64> {
        if self.dimension() != other.dimension() {
            return None;
        }
        Some(
            Zip::from(&self.values)
                .and(&other.values)
                .fold(0.0, |max, &a, &b| f64::max(max, (a - b).abs())),
        )
    }

    /// Element-wise comparison within an absolute tolerance.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.max_abs_difference(other)
            .is_some_and(|difference| difference <= tolerance)
    }

    /// Splits the matrix into disjoint bands of `rows_per_block` consecutive
    /// rows. The last band may be shorter.
    ///
    /// Bands can be filled independently, including from different threads.
    pub fn row_blocks_mut(&mut self, rows_per_block: usize) -> impl Iterator<Item = RowBlock<'_>> {
        let rows_per_block = rows_per_block.max(1);
        self.values
            .axis_chunks_iter_mut(Axis(0), rows_per_block)
            .enumerate()
            .map(move |(block, values)| RowBlock {
                first_row: block * rows_per_block,
                values,
            })
    }
}

/// A writable band of consecutive matrix rows.
#[derive(Debug)]
pub struct RowBlock<'a> {
    first_row: usize,
    values: ArrayViewMut2<'a, f64>,
}

impl RowBlock<'_> {
    #[inline]
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    pub fn rows(&self) -> Range<usize> {
        self.first_row..self.first_row + self.values.nrows()
    }

    /// Adds `value` to cell `(row, col)` of the full matrix.
    ///
    /// `row` must lie in [`rows`](Self::rows).
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(
            self.rows().contains(&row),
            "row {row} outside block {:?}",
            self.rows()
        );
        self.values[[row - self.first_row, col]] += value;
    }
}

impl fmt::Display for QuboMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values.outer_iter() {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>8.2}")).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn test_zero_dimension() {
        let mut q = QuboMatrix::zeros(0);
        assert_eq!(q.dimension(), 0);
        assert!(q.is_zero());
        assert_eq!(q.row_blocks_mut(3).count(), 0);
        assert_eq!(q.energy(&[]).unwrap(), 0.0);
    }

    #[test]
    fn test_fold_to_upper_triangular() {
        let mut q = QuboMatrix::zeros(3);
        q.add(0, 2, 1.0);
        q.add(2, 0, 2.5);
        q.add(1, 1, -4.0);

        let upper = q.to_upper_triangular();
        assert!(!q.is_upper_triangular());
        assert!(upper.is_upper_triangular());
        assert_eq!(upper.get(0, 2), 3.5);
        assert_eq!(upper.get(2, 0), 0.0);
        assert_eq!(upper.get(1, 1), -4.0);

        let x = [true, true, true];
        assert_eq!(q.energy(&x).unwrap(), upper.energy(&x).unwrap());
    }

    #[test]
    fn test_transpose() {
        let mut q = QuboMatrix::zeros(2);
        q.add(0, 1, 5.0);
        let t = q.transpose();
        assert_eq!(t.get(1, 0), 5.0);
        assert_eq!(t.get(0, 1), 0.0);
    }

    #[test]
    fn test_energy_counts_both_triangles() {
        let q = QuboMatrix::from_array(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(q.energy(&[true, true]).unwrap(), 10.0);
        assert_eq!(q.energy(&[false, true]).unwrap(), 4.0);
    }

    #[test]
    fn test_energy_dimension_mismatch() {
        let q = QuboMatrix::zeros(2);
        assert_eq!(
            q.energy(&[true]),
            Err(QuboError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_row_blocks_are_disjoint() {
        let mut q = QuboMatrix::zeros(4);
        for mut block in q.row_blocks_mut(2) {
            let first = block.first_row();
            assert_eq!(block.rows(), first..first + 2);
            block.add(first + 1, 3, first as f64 + 1.0);
        }
        assert_eq!(q.get(1, 3), 1.0);
        assert_eq!(q.get(3, 3), 3.0);
        assert_eq!(q.nonzero_count(), 2);
    }

    #[test]
    fn test_row_blocks_last_band_is_short() {
        let mut q = QuboMatrix::zeros(5);
        let rows: Vec<_> = q.row_blocks_mut(2).map(|block| block.rows()).collect();
        assert_eq!(rows, vec![0..2, 2..4, 4..5]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside block")]
    fn test_row_block_rejects_foreign_row() {
        let mut q = QuboMatrix::zeros(4);
        let mut blocks: Vec<_> = q.row_blocks_mut(2).collect();
        blocks[0].add(2, 0, 1.0);
    }

    #[test]
    fn test_from_rows_and_approx_eq() {
        let a = QuboMatrix::from_rows(&[vec![1.0, 2.0], vec![0.0, 3.0]]).unwrap();
        let b = QuboMatrix::from_rows(&[vec![1.0, 2.0 + 1e-12], vec![0.0, 3.0]]).unwrap();
        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&QuboMatrix::zeros(3), 1e-9));
        assert!(QuboMatrix::from_rows(&[vec![1.0], vec![1.0]]).is_err());
        assert_eq!(a.to_rows()[1], vec![0.0, 3.0]);
        assert_eq!(a.as_array(), &array![[1.0, 2.0], [0.0, 3.0]]);
    }

    #[test]
    fn test_from_array_rejects_non_square() {
        assert_eq!(
            QuboMatrix::from_array(Array2::zeros((2, 3))),
            Err(QuboError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }
}
