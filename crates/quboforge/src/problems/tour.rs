use quboforge_config::{ConstraintConfig, Penalty};
use quboforge_core::{GraphModel, Result};

use super::GraphProblem;

/// Permutation constraints plus invalid-traversal penalties of strength `a`,
/// mirrored so that both directions of every transition are covered.
fn tour_configuration(a: f64) -> ConstraintConfig {
    ConstraintConfig::new()
        .with_double_count_edges(true)
        .with_double_count_edges_cycles(true)
        .with(Penalty::Diagonal, -2.0 * a)
        .with(Penalty::OneNodeManyPositions, 2.0 * a)
        .with(Penalty::OnePositionManyNodes, 2.0 * a)
        .with(Penalty::InvalidTraversal, a)
        .with(Penalty::InvalidTraversalCycles, a)
}

/// Shortest closed tour visiting every node once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelingSalesperson {
    /// Factor on the tour length.
    pub length_factor: f64,
}

impl Default for TravelingSalesperson {
    fn default() -> Self {
        Self { length_factor: 1.0 }
    }
}

impl GraphProblem for TravelingSalesperson {
    fn name(&self) -> &'static str {
        "traveling_salesperson"
    }

    fn positions(&self, graph: &GraphModel) -> usize {
        graph.node_count().max(1)
    }

    fn configuration(&self, graph: &GraphModel) -> Result<ConstraintConfig> {
        let b = self.length_factor;
        let a = b * graph.max_weight()? + 1.0;
        Ok(tour_configuration(a)
            .with(Penalty::EdgeWeightsFactor, b)
            .with(Penalty::EdgeWeightsCyclesFactor, b))
    }
}

/// Any closed tour visiting every node once. Edge weights are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HamiltonianCycle;

impl GraphProblem for HamiltonianCycle {
    fn name(&self) -> &'static str {
        "hamiltonian_cycle"
    }

    fn positions(&self, graph: &GraphModel) -> usize {
        graph.node_count().max(1)
    }

    fn configuration(&self, _graph: &GraphModel) -> Result<ConstraintConfig> {
        Ok(tour_configuration(1.0))
    }
}
