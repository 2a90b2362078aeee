//! Quadratic pseudo-Boolean polynomials.
//!
//! Reference formulations are written as sums of products of binary
//! variables, then exported as upper-triangular matrices. Constant offsets
//! are kept for energy evaluation but dropped on export.

use std::collections::BTreeMap;

use quboforge_core::QuboMatrix;

/// `offset + sum c_ij * x_i * x_j` with `x_i * x_i = x_i`.
///
/// # Example
///
/// ```
/// use quboforge_test::Polynomial;
///
/// // 2 * (1 - x0 - x1)^2
/// let mut h = Polynomial::new();
/// h.add_squared_one_hot(&[0, 1], 2.0);
///
/// let q = h.to_matrix(2);
/// assert_eq!(q.to_rows(), vec![vec![-2.0, 4.0], vec![0.0, -2.0]]);
/// assert_eq!(h.offset(), 2.0);
/// assert_eq!(h.energy(&[true, false]), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polynomial {
    offset: f64,
    terms: BTreeMap<(usize, usize), f64>,
}

impl Polynomial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn add_constant(&mut self, value: f64) {
        self.offset += value;
    }

    pub fn add_linear(&mut self, var: usize, coefficient: f64) {
        *self.terms.entry((var, var)).or_insert(0.0) += coefficient;
    }

    /// Adds `coefficient * x_a * x_b`. Order of `a` and `b` does not matter.
    pub fn add_product(&mut self, a: usize, b: usize, coefficient: f64) {
        *self.terms.entry((a.min(b), a.max(b))).or_insert(0.0) += coefficient;
    }

    /// Adds `scale * (1 - sum x_v)^2`, the "exactly one of" penalty.
    pub fn add_squared_one_hot(&mut self, vars: &[usize], scale: f64) {
        self.add_constant(scale);
        for (i, &a) in vars.iter().enumerate() {
            self.add_linear(a, -scale);
            for &b in &vars[i + 1..] {
                self.add_product(a, b, 2.0 * scale);
            }
        }
    }

    /// Exports the coefficients as an upper-triangular matrix.
    pub fn to_matrix(&self, dimension: usize) -> QuboMatrix {
        let mut q = QuboMatrix::zeros(dimension);
        for (&(a, b), &coefficient) in &self.terms {
            q.add(a, b, coefficient);
        }
        q
    }

    /// Value of the polynomial for a binary assignment, offset included.
    pub fn energy(&self, assignment: &[bool]) -> f64 {
        self.offset
            + self
                .terms
                .iter()
                .filter(|(&(a, b), _)| assignment[a] && assignment[b])
                .map(|(_, &c)| c)
                .sum::<f64>()
    }
}
