//! The QUBO compiler.
//!
//! Logging levels:
//! - **INFO**: compile start/end with problem scale
//! - **DEBUG**: enabled and skipped penalty families
//! - **TRACE**: per-node progress

use quboforge_config::ConstraintConfig;
use quboforge_core::{GraphModel, IndexMapper, QuboMatrix, Result};
use rayon::prelude::*;
use tracing::{info, trace};

use crate::plan::CompilePlan;

/// Compiles a graph and a [`ConstraintConfig`] into a [`QuboMatrix`].
///
/// The output has dimension `node_count * positions`; variable `i` stands
/// for node `i / positions` occupying position `i % positions`.
///
/// # Example
///
/// ```
/// use quboforge_compiler::QuboCompiler;
/// use quboforge_config::{ConstraintConfig, Penalty};
/// use quboforge_core::GraphModel;
///
/// // Max-Cut on a single edge
/// let graph = GraphModel::from_edges(false, 2, [(0, 1, None)]).unwrap();
/// let config = ConstraintConfig::new()
///     .with(Penalty::NodesWithEdges, -1.0)
///     .with(Penalty::Edges, 2.0);
///
/// let q = QuboCompiler::new(&graph).generate(&config).unwrap();
/// assert_eq!(q.to_rows(), vec![vec![-1.0, 2.0], vec![0.0, -1.0]]);
/// assert_eq!(q.energy(&[true, false]).unwrap(), -1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QuboCompiler<'g> {
    graph: &'g GraphModel,
    positions: usize,
    start_node: Option<usize>,
    terminal_node: Option<usize>,
}

impl<'g> QuboCompiler<'g> {
    /// Creates a compiler for `graph` with a single position and no start or
    /// terminal node.
    pub fn new(graph: &'g GraphModel) -> Self {
        Self {
            graph,
            positions: 1,
            start_node: None,
            terminal_node: None,
        }
    }

    pub fn with_positions(mut self, positions: usize) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_start_node(mut self, node: usize) -> Self {
        self.start_node = Some(node);
        self
    }

    pub fn with_terminal_node(mut self, node: usize) -> Self {
        self.terminal_node = Some(node);
        self
    }

    pub fn positions(&self) -> usize {
        self.positions
    }

    /// Side length of the matrix this compiler produces.
    ///
    /// # Errors
    ///
    /// Fails with [`QuboError::InvalidConfiguration`](quboforge_core::QuboError::InvalidConfiguration)
    /// if `positions` is zero or the matrix would not fit in memory addressing.
    pub fn dimension(&self) -> Result<usize> {
        IndexMapper::new(self.positions)?.dimension(self.graph.node_count())
    }

    fn plan(&self, config: &ConstraintConfig) -> Result<CompilePlan<'g>> {
        CompilePlan::new(
            self.graph,
            self.positions,
            self.start_node,
            self.terminal_node,
            config,
        )
    }

    /// Compiles `config` into a matrix on the calling thread.
    ///
    /// # Errors
    ///
    /// - [`QuboError::InvalidConfiguration`](quboforge_core::QuboError::InvalidConfiguration)
    ///   if `positions < 1`, a weight is not finite, a start/terminal score
    ///   is enabled without its node, or `node_count * positions` squared
    ///   overflows `usize`
    /// - [`QuboError::InvalidNode`](quboforge_core::QuboError::InvalidNode) if the
    ///   start or terminal node is outside the graph
    /// - [`QuboError::MissingWeight`](quboforge_core::QuboError::MissingWeight) if
    ///   an edge-weight penalty is enabled and some edge has no weight
    pub fn generate(&self, config: &ConstraintConfig) -> Result<QuboMatrix> {
        self.compile(config, false)
    }

    /// Like [`generate`](Self::generate), but fills the row blocks of
    /// different nodes on the rayon thread pool.
    ///
    /// Each cell is written by exactly one node, in the same order as the
    /// sequential path, so the result is bit-identical.
    pub fn generate_parallel(&self, config: &ConstraintConfig) -> Result<QuboMatrix> {
        self.compile(config, true)
    }

    /// Number of accumulation steps a compilation of `config` will take.
    ///
    /// Runs the same validation as [`generate`](Self::generate).
    pub fn estimate_work(&self, config: &ConstraintConfig) -> Result<u64> {
        Ok(self.plan(config)?.work())
    }

    fn compile(&self, config: &ConstraintConfig, parallel: bool) -> Result<QuboMatrix> {
        let plan = self.plan(config)?;

        info!(
            event = "compile_start",
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            directed = self.graph.is_directed(),
            positions = self.positions,
            dimension = plan.dimension(),
            penalties = plan.terms().len(),
            parallel,
        );

        let mut matrix = QuboMatrix::zeros(plan.dimension());
        let blocks = matrix.row_blocks_mut(plan.positions());
        if parallel {
            blocks
                .collect::<Vec<_>>()
                .into_par_iter()
                .enumerate()
                .try_for_each(|(node, mut block)| {
                    trace!(event = "node_block", node, first_row = block.first_row());
                    plan.compile_node(node, &mut block)
                })?;
        } else {
            for (node, mut block) in blocks.enumerate() {
                trace!(event = "node_block", node, first_row = block.first_row());
                plan.compile_node(node, &mut block)?;
            }
        }

        info!(event = "compile_end", nonzero = matrix.nonzero_count());
        Ok(matrix)
    }
}

/// Compiles `config` for `graph` in one call.
///
/// `start_node` and `terminal_node` are only required when the matching
/// score is enabled. `None` means "no such node", distinct from node `0`.
pub fn generate(
    graph: &GraphModel,
    positions: usize,
    start_node: Option<usize>,
    terminal_node: Option<usize>,
    config: &ConstraintConfig,
) -> Result<QuboMatrix> {
    let mut compiler = QuboCompiler::new(graph).with_positions(positions);
    compiler.start_node = start_node;
    compiler.terminal_node = terminal_node;
    compiler.generate(config)
}
