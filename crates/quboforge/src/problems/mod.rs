//! Ready-made formulations of common graph problems.
//!
//! A preset only chooses the position count, the start and terminal nodes,
//! and the penalty weights. The matrix itself always comes from the generic
//! [`QuboCompiler`].
//!
//! | Preset | Positions | Meaning of `x(v, p)` |
//! |---|---|---|
//! | [`LongestPath`] | `steps + 1` | `v` is the `p`-th node of the path |
//! | [`TravelingSalesperson`], [`HamiltonianCycle`] | `n` | `v` is visited `p`-th |
//! | [`GraphColoring`], [`CliqueCover`] | colors | `v` has color `p` |
//! | [`MaxCut`] | 1 | `v` is on the cut side |
//! | [`MaximumIndependentSet`], [`MinimumVertexCover`], [`DensestKSubgraph`] | 1 | `v` is selected |

use quboforge_compiler::QuboCompiler;
use quboforge_config::ConstraintConfig;
use quboforge_core::{GraphModel, QuboMatrix, Result};
use tracing::debug;

mod coloring;
mod path;
mod selection;
mod tour;


pub use coloring::{CliqueCover, GraphColoring};
pub use path::LongestPath;
pub use selection::{DensestKSubgraph, MaxCut, MaximumIndependentSet, MinimumVertexCover};
pub use tour::{HamiltonianCycle, TravelingSalesperson};

/// A graph problem expressed as a compiler configuration.
pub trait GraphProblem {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    fn positions(&self, graph: &GraphModel) -> usize;

    fn start_node(&self) -> Option<usize> {
        None
    }

    fn terminal_node(&self) -> Option<usize> {
        None
    }

    /// Penalty weights for `graph`.
    ///
    /// Presets whose weights depend on edge weights fail with
    /// [`QuboError::MissingWeight`](quboforge_core::QuboError::MissingWeight)
    /// on graphs with unweighted edges.
    fn configuration(&self, graph: &GraphModel) -> Result<ConstraintConfig>;

    /// Compiler set up with this problem's layout.
    fn compiler<'g>(&self, graph: &'g GraphModel) -> QuboCompiler<'g> {
        let mut compiler = QuboCompiler::new(graph).with_positions(self.positions(graph));
        if let Some(node) = self.start_node() {
            compiler = compiler.with_start_node(node);
        }
        if let Some(node) = self.terminal_node() {
            compiler = compiler.with_terminal_node(node);
        }
        compiler
    }

    fn to_qubo(&self, graph: &GraphModel) -> Result<QuboMatrix> {
        let config = self.configuration(graph)?;
        debug!(
            event = "problem_configured",
            problem = self.name(),
            penalties = config.enabled().count(),
        );
        self.compiler(graph).generate(&config)
    }
}
