//! Matrix assertions.

use ndarray::Zip;
use quboforge_core::QuboMatrix;

/// Absolute tolerance of [`matrices_close`].
pub const ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Relative tolerance of [`matrices_close`].
pub const RELATIVE_TOLERANCE: f64 = 1e-5;

/// Element-wise `|a - b| <= atol + rtol * |b|` over equally sized matrices.
pub fn matrices_close(a: &QuboMatrix, b: &QuboMatrix) -> bool {
    a.dimension() == b.dimension()
        && Zip::from(a.as_array())
            .and(b.as_array())
            .all(|&x, &y| (x - y).abs() <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * y.abs())
}

/// Asserts that `compiled` encodes the same energy function as `reference`.
///
/// Both sides are folded to their upper-triangular form first, so a
/// compiled matrix that mirrors terms into the lower triangle still matches
/// an upper-triangular reference.
///
/// # Panics
///
/// Panics with both matrices and their difference when they disagree.
pub fn assert_equivalent(reference: &QuboMatrix, compiled: &QuboMatrix) {
    let expected = reference.to_upper_triangular();
    let actual = compiled.to_upper_triangular();
    if !matrices_close(&actual, &expected) {
        let difference = match expected.max_abs_difference(&actual) {
            Some(d) => format!("max abs difference {d}"),
            None => format!(
                "dimension {} vs {}",
                expected.dimension(),
                actual.dimension()
            ),
        };
        panic!("matrices differ ({difference})\nreference:\n{expected}\ncompiled:\n{actual}");
    }
}

/// Asserts that no cell below the diagonal is non-zero.
pub fn assert_upper_triangular(matrix: &QuboMatrix) {
    if let Some((row, col, value)) = matrix.iter_nonzero().find(|&(row, col, _)| row > col) {
        panic!("lower cell ({row}, {col}) = {value}\n{matrix}");
    }
}
