//! Generic constraint-to-QUBO compiler.
//!
//! Given a [`GraphModel`](quboforge_core::GraphModel), a position count and a
//! [`ConstraintConfig`](quboforge_config::ConstraintConfig), [`QuboCompiler`]
//! produces the QUBO matrix for any problem expressible with the configured
//! penalty families: longest path, graph coloring, traveling salesperson,
//! Hamiltonian cycle, clique cover, max-cut, vertex cover, independent set.
//!
//! Pairwise terms are written to the upper triangle. A family's
//! `double_count_*` flag additionally writes pairs with `v > w` into the
//! lower triangle, giving an explicitly symmetric contribution.

mod compiler;
mod plan;


pub use compiler::{generate, QuboCompiler};
