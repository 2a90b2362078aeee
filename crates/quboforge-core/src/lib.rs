//! QuboForge Core - graph, indexing and matrix types for QUBO compilation
//!
//! This crate provides the leaf abstractions the compiler is built on:
//! - [`GraphModel`]: canonicalised graph with direction-aware neighbour queries
//! - [`IndexMapper`]: the `(node, position) -> index` bijection
//! - [`QuboMatrix`]: the dense accumulator handed to solvers
//! - [`QuboError`]: the shared error type

pub mod error;
pub mod graph;
pub mod index;
pub mod matrix;

pub use error::{QuboError, Result};
pub use graph::{Adjacency, Edge, GraphBuilder, GraphModel};
pub use index::{variable_index, variable_of, IndexMapper, Variable};
pub use matrix::{QuboMatrix, RowBlock};
