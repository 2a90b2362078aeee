//! Error types for QuboForge

use thiserror::Error;

/// Main error type for QuboForge operations.
///
/// Every failure is raised before a matrix is handed to the caller; there is
/// no partial-result mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuboError {
    /// A node index (start node, terminal node, edge endpoint) outside `0..node_count`.
    #[error("node {node} is outside the graph's node range 0..{node_count}")]
    InvalidNode { node: usize, node_count: usize },

    /// Malformed or incomplete constraint configuration.
    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    /// An edge-weight dependent penalty was requested but the edge has no weight.
    #[error("edge ({from}, {to}) has no weight")]
    MissingWeight { from: usize, to: usize },

    /// An edge lookup was made for a pair that is not connected.
    #[error("no edge from {from} to {to}")]
    MissingEdge { from: usize, to: usize },

    /// Structurally invalid graph input.
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// An assignment or matrix does not match the expected dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Result type alias for QuboForge operations
pub type Result<T> = std::result::Result<T, QuboError>;
