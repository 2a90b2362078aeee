//! Single-position problems: each node is either selected or not.

use quboforge_config::{ConstraintConfig, Penalty};
use quboforge_core::{GraphModel, Result};

use super::GraphProblem;

/// Split the nodes in two so that as many edges as possible cross.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxCut;

impl GraphProblem for MaxCut {
    fn name(&self) -> &'static str {
        "max_cut"
    }

    fn positions(&self, _graph: &GraphModel) -> usize {
        1
    }

    fn configuration(&self, _graph: &GraphModel) -> Result<ConstraintConfig> {
        Ok(ConstraintConfig::new()
            .with(Penalty::NodesWithEdges, -1.0)
            .with(Penalty::Edges, 2.0))
    }
}

/// Largest set of pairwise non-adjacent nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaximumIndependentSet;

impl GraphProblem for MaximumIndependentSet {
    fn name(&self) -> &'static str {
        "maximum_independent_set"
    }

    fn positions(&self, _graph: &GraphModel) -> usize {
        1
    }

    fn configuration(&self, _graph: &GraphModel) -> Result<ConstraintConfig> {
        Ok(ConstraintConfig::new()
            .with(Penalty::Diagonal, -1.0)
            .with(Penalty::Edges, 2.0))
    }
}

/// Smallest set of nodes touching every edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimumVertexCover;

impl GraphProblem for MinimumVertexCover {
    fn name(&self) -> &'static str {
        "minimum_vertex_cover"
    }

    fn positions(&self, _graph: &GraphModel) -> usize {
        1
    }

    fn configuration(&self, _graph: &GraphModel) -> Result<ConstraintConfig> {
        Ok(ConstraintConfig::new()
            .with(Penalty::Diagonal, 1.0)
            .with(Penalty::NodesWithEdges, -2.0)
            .with(Penalty::Edges, 2.0))
    }
}

/// `k` nodes inducing as many edges as possible.
///
/// Built for undirected graphs: an edge stored in both directions of a
/// directed graph is counted once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensestKSubgraph {
    pub k: usize,
}

impl DensestKSubgraph {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl GraphProblem for DensestKSubgraph {
    fn name(&self) -> &'static str {
        "densest_k_subgraph"
    }

    fn positions(&self, _graph: &GraphModel) -> usize {
        1
    }

    /// `n (sum x - k)^2` keeps the size at `k`, without its constant `n k^2`.
    fn configuration(&self, graph: &GraphModel) -> Result<ConstraintConfig> {
        let n = graph.node_count() as f64;
        let k = self.k as f64;
        Ok(ConstraintConfig::new()
            .with(Penalty::Diagonal, n - 2.0 * n * k)
            .with(Penalty::OnePositionManyNodes, 2.0 * n)
            .with(Penalty::Edges, -1.0))
    }
}
