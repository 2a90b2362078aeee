//! Mapping between `(node, position)` pairs and matrix indices.
//!
//! [`variable_index`] is the single place the row/column formula lives. The
//! compiler, the matrix helpers and the reference oracles all go through it.

use crate::error::{QuboError, Result};

/// Returns the matrix index of the binary variable `x(node, position)`.
///
/// # Example
///
/// ```
/// use quboforge_core::variable_index;
///
/// assert_eq!(variable_index(0, 0, 4), 0);
/// assert_eq!(variable_index(2, 3, 4), 11);
/// ```
#[inline]
pub const fn variable_index(node: usize, position: usize, positions: usize) -> usize {
    node * positions + position
}

/// Inverse of [`variable_index`].
#[inline]
pub const fn variable_of(index: usize, positions: usize) -> Variable {
    Variable {
        node: index / positions,
        position: index % positions,
    }
}

/// A binary decision variable: `node` occupies `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    pub node: usize,
    pub position: usize,
}

/// Bijection between `(node, position)` pairs and matrix indices for a fixed
/// number of positions.
///
/// # Example
///
/// ```
/// use quboforge_core::{IndexMapper, Variable};
///
/// let mapper = IndexMapper::new(3).unwrap();
/// assert_eq!(mapper.index(1, 2), 5);
/// assert_eq!(mapper.variable(5), Variable { node: 1, position: 2 });
/// assert_eq!(mapper.dimension(4).unwrap(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexMapper {
    positions: usize,
}

impl IndexMapper {
    /// Creates a mapper for `positions` slots per node.
    ///
    /// # Errors
    ///
    /// Returns [`QuboError::InvalidConfiguration`] if `positions` is zero.
    pub fn new(positions: usize) -> Result<Self> {
        if positions == 0 {
            return Err(QuboError::InvalidConfiguration(
                "positions must be at least 1".to_string(),
            ));
        }
        Ok(Self { positions })
    }

    /// Number of positions per node.
    #[inline]
    pub fn positions(&self) -> usize {
        self.positions
    }

    /// The last position, used by terminal scores and cyclic wraparound.
    #[inline]
    pub fn last_position(&self) -> usize {
        self.positions - 1
    }

    #[inline]
    pub fn index(&self, node: usize, position: usize) -> usize {
        variable_index(node, position, self.positions)
    }

    #[inline]
    pub fn variable(&self, index: usize) -> Variable {
        variable_of(index, self.positions)
    }

    /// Side length of the matrix for a graph with `node_count` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`QuboError::InvalidConfiguration`] if the side length or the
    /// cell count does not fit in `usize`.
    pub fn dimension(&self, node_count: usize) -> Result<usize> {
        node_count
            .checked_mul(self.positions)
            .filter(|dimension| dimension.checked_mul(*dimension).is_some())
            .ok_or_else(|| {
                QuboError::InvalidConfiguration(format!(
                    "{node_count} nodes with {} positions is too large a matrix",
                    self.positions
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_positions_rejected() {
        assert!(matches!(
            IndexMapper::new(0),
            Err(QuboError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_single_position_is_identity() {
        let mapper = IndexMapper::new(1).unwrap();
        for node in 0..5 {
            assert_eq!(mapper.index(node, 0), node);
        }
        assert_eq!(mapper.last_position(), 0);
    }

    #[test]
    fn test_dimension_overflow_rejected() {
        let mapper = IndexMapper::new(1 << 31).unwrap();
        assert_eq!(mapper.dimension(1).unwrap(), 1 << 31);
        assert!(matches!(
            mapper.dimension(4),
            Err(QuboError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            IndexMapper::new(usize::MAX).unwrap().dimension(2),
            Err(QuboError::InvalidConfiguration(_))
        ));
    }

    proptest! {
        #[test]
        fn test_index_roundtrip(node in 0usize..64, positions in 1usize..16, offset in 0usize..16) {
            let position = offset % positions;
            let mapper = IndexMapper::new(positions).unwrap();
            let index = mapper.index(node, position);
            prop_assert!(index < mapper.dimension(node + 1).unwrap());
            prop_assert_eq!(mapper.variable(index), Variable { node, position });
        }
    }
}
