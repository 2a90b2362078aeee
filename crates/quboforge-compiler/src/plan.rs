//! Validated compile plan and per-node accumulation.
//!
//! Every cell written while visiting node `v` lies in the rows
//! `idx(v, 0)..idx(v, positions)`. The compiler relies on this to hand each
//! node its own [`RowBlock`].

use quboforge_config::{ConstraintConfig, Penalty};
use quboforge_core::{Adjacency, GraphModel, IndexMapper, QuboError, Result, RowBlock};
use tracing::debug;

/// One enabled penalty family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Term {
    pub penalty: Penalty,
    pub weight: f64,
    /// Whether pairs with `v > w` are written to the lower triangle.
    pub mirrored: bool,
}

/// Inputs that have passed validation.
#[derive(Debug)]
pub(crate) struct CompilePlan<'g> {
    graph: &'g GraphModel,
    mapper: IndexMapper,
    dimension: usize,
    start_node: Option<usize>,
    terminal_node: Option<usize>,
    terms: Vec<Term>,
}

/// Pair filter shared by every pairwise family: `(v, w)` is written when
/// `v < w`, or when `v > w` and the family is mirrored.
#[inline]
fn admits(node: usize, other: usize, mirrored: bool) -> bool {
    node < other || (mirrored && node > other)
}

/// Neighbour lists of one node, gathered once per row block.
struct Neighborhood {
    adjacent: Vec<usize>,
    non_adjacent: Vec<usize>,
    successors: Vec<(usize, Option<f64>)>,
    non_successors: Vec<usize>,
    self_loop: bool,
}

impl Neighborhood {
    fn of(graph: &GraphModel, node: usize) -> Self {
        Self {
            adjacent: graph.neighbors(node, Adjacency::Any),
            non_adjacent: graph.non_neighbors(node, Adjacency::Any).collect(),
            successors: graph.weighted_successors(node),
            non_successors: graph.non_neighbors(node, Adjacency::Outgoing).collect(),
            self_loop: graph.has_self_loop(node),
        }
    }
}

impl<'g> CompilePlan<'g> {
    pub fn new(
        graph: &'g GraphModel,
        positions: usize,
        start_node: Option<usize>,
        terminal_node: Option<usize>,
        config: &ConstraintConfig,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|e| QuboError::InvalidConfiguration(e.to_string()))?;
        let mapper = IndexMapper::new(positions)?;
        let dimension = mapper.dimension(graph.node_count())?;

        for node in [start_node, terminal_node].into_iter().flatten() {
            graph.check_node(node)?;
        }
        if config.is_enabled(Penalty::StartNodeScore) && start_node.is_none() {
            return Err(QuboError::InvalidConfiguration(
                "start_node_score requires a start node".to_string(),
            ));
        }
        if config.is_enabled(Penalty::TerminalNodeScore) && terminal_node.is_none() {
            return Err(QuboError::InvalidConfiguration(
                "terminal_node_score requires a terminal node".to_string(),
            ));
        }
        let mut terms = Vec::new();
        for (penalty, weight) in config.enabled() {
            if penalty.is_cyclic() && positions == 1 {
                debug!(event = "penalty_skipped", penalty = %penalty, reason = "single position");
                continue;
            }
            let mirrored = config.double_counts(penalty);
            debug!(event = "penalty_enabled", penalty = %penalty, weight, mirrored);
            terms.push(Term {
                penalty,
                weight,
                mirrored,
            });
        }

        if terms.iter().any(|term| term.penalty.needs_edge_weights()) {
            if let Some((from, to)) = graph.first_unweighted_edge() {
                return Err(QuboError::MissingWeight { from, to });
            }
        }

        Ok(Self {
            graph,
            mapper,
            dimension,
            start_node,
            terminal_node,
            terms,
        })
    }

    #[inline]
    pub fn positions(&self) -> usize {
        self.mapper.positions()
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Accumulates every term for `node` into its row block.
    pub fn compile_node(&self, node: usize, block: &mut RowBlock<'_>) -> Result<()> {
        let local = Neighborhood::of(self.graph, node);
        for position in 0..self.positions() {
            let row = self.mapper.index(node, position);
            for term in &self.terms {
                self.accumulate(term, node, position, row, &local, block)?;
            }
        }
        Ok(())
    }

    fn accumulate(
        &self,
        term: &Term,
        node: usize,
        position: usize,
        row: usize,
        local: &Neighborhood,
        block: &mut RowBlock<'_>,
    ) -> Result<()> {
        let mapper = &self.mapper;
        let last = mapper.last_position();
        let weight = term.weight;

        match term.penalty {
            Penalty::StartNodeScore => {
                if self.start_node == Some(node) && position == 0 {
                    block.add(row, row, weight);
                }
            }
            Penalty::TerminalNodeScore => {
                if self.terminal_node == Some(node) && position == last {
                    block.add(row, row, weight);
                }
            }
            Penalty::Diagonal => block.add(row, row, weight),
            Penalty::NodesWithEdges => {
                for _ in &local.adjacent {
                    block.add(row, row, weight);
                }
            }
            Penalty::OneNodeManyPositions => {
                for later in position + 1..=last {
                    block.add(row, mapper.index(node, later), weight);
                }
            }
            Penalty::OnePositionManyNodes => {
                for other in node + 1..self.graph.node_count() {
                    block.add(row, mapper.index(other, position), weight);
                }
            }
            Penalty::Edges => {
                for &other in &local.adjacent {
                    if node == other || admits(node, other, term.mirrored) {
                        block.add(row, mapper.index(other, position), weight);
                    }
                }
            }
            Penalty::NonEdges => {
                for &other in &local.non_adjacent {
                    if admits(node, other, term.mirrored) {
                        block.add(row, mapper.index(other, position), weight);
                    }
                }
            }
            Penalty::EdgeWeightsFactor | Penalty::EdgeWeightsCyclesFactor => {
                let Some(next) = self.next_position(term.penalty, position) else {
                    return Ok(());
                };
                for &(other, edge) in &local.successors {
                    if node == other || admits(node, other, term.mirrored) {
                        let edge = edge.ok_or(QuboError::MissingWeight {
                            from: node,
                            to: other,
                        })?;
                        let col = mapper.index(other, next);
                        // a self loop stays inside the node's rows; keep it upper
                        let (row, col) = if node == other {
                            (row.min(col), row.max(col))
                        } else {
                            (row, col)
                        };
                        block.add(row, col, edge * weight);
                    }
                }
            }
            Penalty::InvalidTraversal | Penalty::InvalidTraversalCycles => {
                let Some(next) = self.next_position(term.penalty, position) else {
                    return Ok(());
                };
                for &other in &local.non_successors {
                    if admits(node, other, term.mirrored) {
                        block.add(row, mapper.index(other, next), weight);
                    }
                }
            }
            Penalty::InvalidTraversalSelf => {
                if position < last && !local.self_loop {
                    block.add(row, mapper.index(node, position + 1), weight);
                }
            }
        }
        Ok(())
    }

    /// Position a traversal from `position` lands on, if the penalty applies there.
    fn next_position(&self, penalty: Penalty, position: usize) -> Option<usize> {
        let last = self.mapper.last_position();
        if penalty.is_cyclic() {
            (position == last).then_some(0)
        } else {
            (position < last).then_some(position + 1)
        }
    }

    /// Number of inner accumulation steps [`compile_node`](Self::compile_node)
    /// performs over the whole graph.
    ///
    /// Saturates at `u64::MAX`.
    pub fn work(&self) -> u64 {
        let graph = self.graph;
        let n = graph.node_count() as u64;
        let p = self.positions() as u64;
        let sum = |count: &dyn Fn(usize) -> usize| -> u64 {
            graph
                .nodes()
                .fold(0u64, |total, v| total.saturating_add(count(v) as u64))
        };
        let any_degree = sum(&|v| graph.degree(v));
        let out_degree = sum(&|v| graph.neighbors(v, Adjacency::Outgoing).len());
        let any_missing = sum(&|v| graph.non_neighbors(v, Adjacency::Any).count());
        let out_missing = sum(&|v| graph.non_neighbors(v, Adjacency::Outgoing).count());
        let pairs = |k: u64| k.saturating_mul(k.saturating_sub(1)) / 2;

        self.terms
            .iter()
            .map(|term| match term.penalty {
                Penalty::StartNodeScore | Penalty::TerminalNodeScore => 1,
                Penalty::Diagonal => n.saturating_mul(p),
                Penalty::NodesWithEdges | Penalty::Edges => any_degree.saturating_mul(p),
                Penalty::OneNodeManyPositions => n.saturating_mul(pairs(p)),
                Penalty::OnePositionManyNodes => p.saturating_mul(pairs(n)),
                Penalty::NonEdges => any_missing.saturating_mul(p),
                Penalty::EdgeWeightsFactor => out_degree.saturating_mul(p - 1),
                Penalty::EdgeWeightsCyclesFactor => out_degree,
                Penalty::InvalidTraversal => out_missing.saturating_mul(p - 1),
                Penalty::InvalidTraversalCycles => out_missing,
                Penalty::InvalidTraversalSelf => n.saturating_mul(p - 1),
            })
            .fold(0u64, u64::saturating_add)
    }
}
