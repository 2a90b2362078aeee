use quboforge_config::{ConstraintConfig, Penalty};
use quboforge_core::{GraphModel, Result};

use super::GraphProblem;

/// Proper coloring with `colors` colors: one color per node, adjacent nodes
/// differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphColoring {
    pub colors: usize,
}

impl GraphColoring {
    pub fn new(colors: usize) -> Self {
        Self { colors }
    }
}

impl GraphProblem for GraphColoring {
    fn name(&self) -> &'static str {
        "graph_coloring"
    }

    fn positions(&self, _graph: &GraphModel) -> usize {
        self.colors
    }

    fn configuration(&self, _graph: &GraphModel) -> Result<ConstraintConfig> {
        Ok(ConstraintConfig::new()
            .with(Penalty::Diagonal, -4.0)
            .with(Penalty::OneNodeManyPositions, 8.0)
            .with(Penalty::Edges, 4.0))
    }
}

/// Partition into `colors` cliques: one color per node, same-colored nodes
/// must be adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliqueCover {
    pub colors: usize,
}

impl CliqueCover {
    pub fn new(colors: usize) -> Self {
        Self { colors }
    }
}

impl GraphProblem for CliqueCover {
    fn name(&self) -> &'static str {
        "clique_cover"
    }

    fn positions(&self, _graph: &GraphModel) -> usize {
        self.colors
    }

    fn configuration(&self, _graph: &GraphModel) -> Result<ConstraintConfig> {
        Ok(ConstraintConfig::new()
            .with(Penalty::Diagonal, -1.0)
            .with(Penalty::OneNodeManyPositions, 2.0)
            .with(Penalty::NonEdges, 2.0))
    }
}
