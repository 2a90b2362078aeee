//! QuboForge - compile graph problems into QUBO matrices
//!
//! Describe a graph, pick the penalty families that encode your problem, and
//! let the compiler produce the matrix. Common problems are available as
//! ready-made presets in [`problems`].
//!
//! # Example
//!
//! ```rust
//! use quboforge::prelude::*;
//!
//! let graph = GraphModel::from_edges(false, 3, [(0, 1, None), (1, 2, None)]).unwrap();
//! let q = MaxCut.to_qubo(&graph).unwrap();
//!
//! // cutting both edges
//! assert_eq!(q.energy(&[true, false, true]).unwrap(), -2.0);
//! ```

// Graph model, indexing and matrix types
pub use quboforge_core::{
    variable_index, variable_of, Adjacency, Edge, GraphBuilder, GraphModel, IndexMapper,
    QuboError, QuboMatrix, Result, RowBlock, Variable,
};

// Configuration
pub use quboforge_config::{ConfigError, ConstraintConfig, GraphDescription, JobConfig, Penalty};

// Compiler
pub use quboforge_compiler::{generate, QuboCompiler};

pub mod problems;

mod job;
pub use job::{run_job, run_job_file};

pub mod prelude {
    pub use super::problems::{
        CliqueCover, DensestKSubgraph, GraphColoring, GraphProblem, HamiltonianCycle, LongestPath,
        MaxCut, MaximumIndependentSet, MinimumVertexCover, TravelingSalesperson,
    };
    pub use super::{ConstraintConfig, GraphModel, Penalty, QuboCompiler, QuboMatrix};
}
