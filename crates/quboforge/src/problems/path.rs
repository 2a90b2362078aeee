use quboforge_config::{ConstraintConfig, Penalty};
use quboforge_core::{GraphModel, Result};

use super::GraphProblem;

/// Heaviest path from `start_node` to `terminal_node` taking exactly `steps`
/// steps.
///
/// Edge weights are rewarded; every constraint violation costs
/// `a = steps * max weight`, which outweighs any single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongestPath {
    pub start_node: usize,
    pub terminal_node: usize,
    pub steps: usize,
}

impl LongestPath {
    pub fn new(start_node: usize, terminal_node: usize, steps: usize) -> Self {
        Self {
            start_node,
            terminal_node,
            steps,
        }
    }
}

impl GraphProblem for LongestPath {
    fn name(&self) -> &'static str {
        "longest_path"
    }

    fn positions(&self, _graph: &GraphModel) -> usize {
        self.steps + 1
    }

    fn start_node(&self) -> Option<usize> {
        Some(self.start_node)
    }

    fn terminal_node(&self) -> Option<usize> {
        Some(self.terminal_node)
    }

    fn configuration(&self, graph: &GraphModel) -> Result<ConstraintConfig> {
        let a = self.steps as f64 * graph.max_weight()?;
        Ok(ConstraintConfig::new()
            .with(Penalty::Diagonal, -a)
            .with(Penalty::StartNodeScore, -a)
            .with(Penalty::TerminalNodeScore, -a)
            .with(Penalty::OnePositionManyNodes, 2.0 * a)
            .with(Penalty::OneNodeManyPositions, a)
            .with(Penalty::EdgeWeightsFactor, -1.0)
            .with(Penalty::InvalidTraversal, a)
            .with(Penalty::InvalidTraversalSelf, a))
    }
}
