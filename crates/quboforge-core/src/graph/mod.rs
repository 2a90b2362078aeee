//! Immutable, canonicalised view of a problem graph.
//!
//! Nodes live in a dense `0..node_count` index space that never changes once
//! the model is built. Neighbour queries take an explicit [`Adjacency`] so the
//! caller decides whether edge direction matters.

mod builder;

#[cfg(test)]
mod tests;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::{QuboError, Result};

pub use builder::GraphBuilder;

/// Which edges count when asking for the neighbours of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjacency {
    /// Successors only (`v -> w`). Used by traversal penalties.
    Outgoing,
    /// Any edge between the two nodes, regardless of direction.
    Any,
}

/// An edge as stored in the model. Undirected edges have `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: Option<f64>,
}

/// Directed or undirected graph with optional per-edge weights.
///
/// Backed by a petgraph [`DiGraph`] whose node indices are the dense
/// `0..node_count` range. Undirected edges are stored once, oriented from the
/// smaller index to the larger.
///
/// # Example
///
/// ```
/// use quboforge_core::{Adjacency, GraphModel};
///
/// let graph = GraphModel::from_edges(
///     false,
///     3,
///     [(0, 1, Some(2.0)), (1, 2, None)],
/// ).unwrap();
///
/// assert_eq!(graph.node_count(), 3);
/// assert!(graph.has_edge(1, 0));
/// assert_eq!(graph.edge_weight(1, 0).unwrap(), Some(2.0));
/// assert_eq!(graph.edge_weight(1, 2).unwrap(), None);
/// assert!(graph.edge_weight(0, 2).is_err());
/// assert_eq!(graph.non_neighbors(0, Adjacency::Any).collect::<Vec<_>>(), vec![2]);
/// ```
#[derive(Debug, Clone)]
pub struct GraphModel {
    directed: bool,
    graph: DiGraph<(), Option<f64>>,
}

impl GraphModel {
    /// Creates an empty graph with `node_count` isolated nodes.
    pub fn with_nodes(directed: bool, node_count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(node_count, 0);
        for _ in 0..node_count {
            graph.add_node(());
        }
        Self { directed, graph }
    }

    /// Builds a graph over the dense node range `0..node_count`.
    ///
    /// Adding the same edge twice keeps the last weight.
    ///
    /// # Errors
    ///
    /// - [`QuboError::InvalidNode`] if an endpoint is outside `0..node_count`
    /// - [`QuboError::InvalidGraph`] if a weight is negative or not finite
    pub fn from_edges<I>(directed: bool, node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, Option<f64>)>,
    {
        let mut graph = Self::with_nodes(directed, node_count);
        for (from, to, weight) in edges {
            graph.check_node(from)?;
            graph.check_node(to)?;
            if let Some(w) = weight {
                if !w.is_finite() || w < 0.0 {
                    return Err(QuboError::InvalidGraph(format!(
                        "edge ({from}, {to}) has invalid weight {w}"
                    )));
                }
            }
            let (a, b) = graph.edge_key(from, to);
            graph
                .graph
                .update_edge(NodeIndex::new(a), NodeIndex::new(b), weight);
        }
        Ok(graph)
    }

    /// Starts a [`GraphBuilder`] that canonicalises arbitrary node labels.
    pub fn builder<L>(directed: bool) -> GraphBuilder<L>
    where
        L: Eq + std::hash::Hash + Clone,
    {
        GraphBuilder::new(directed)
    }

    fn edge_key(&self, from: usize, to: usize) -> (usize, usize) {
        if self.directed {
            (from, to)
        } else {
            (from.min(to), from.max(to))
        }
    }

    fn find_edge(&self, from: usize, to: usize) -> Option<EdgeIndex> {
        let (a, b) = self.edge_key(from, to);
        self.graph.find_edge(NodeIndex::new(a), NodeIndex::new(b))
    }

    /// Fails with [`QuboError::InvalidNode`] unless `node < node_count`.
    pub fn check_node(&self, node: usize) -> Result<()> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(QuboError::InvalidNode {
                node,
                node_count: self.node_count(),
            })
        }
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Node indices in canonical order.
    #[inline]
    pub fn nodes(&self) -> std::ops::Range<usize> {
        0..self.node_count()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// All stored edges ordered by `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = Edge> {
        let mut edges: Vec<Edge> = self
            .graph
            .edge_references()
            .map(|edge| Edge {
                from: edge.source().index(),
                to: edge.target().index(),
                weight: *edge.weight(),
            })
            .collect();
        edges.sort_unstable_by_key(|edge| (edge.from, edge.to));
        edges.into_iter()
    }

    /// Neighbours of `node` under the given adjacency, ascending and without
    /// duplicates. Empty for nodes outside the node range.
    pub fn neighbors(&self, node: usize, adjacency: Adjacency) -> Vec<usize> {
        let index = NodeIndex::new(node);
        let mut neighbors: Vec<usize> = match adjacency {
            Adjacency::Outgoing if self.directed => self
                .graph
                .neighbors_directed(index, Direction::Outgoing)
                .map(|n| n.index())
                .collect(),
            _ => self
                .graph
                .neighbors_undirected(index)
                .map(|n| n.index())
                .collect(),
        };
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Successors of `node` with the weight of the connecting edge, ascending.
    pub fn weighted_successors(&self, node: usize) -> Vec<(usize, Option<f64>)> {
        self.neighbors(node, Adjacency::Outgoing)
            .into_iter()
            .filter_map(|other| {
                self.find_edge(node, other)
                    .map(|edge| (other, self.graph[edge]))
            })
            .collect()
    }

    /// Nodes other than `node` that are not neighbours under `adjacency`,
    /// ascending.
    pub fn non_neighbors(&self, node: usize, adjacency: Adjacency) -> impl Iterator<Item = usize> {
        let neighbors = self.neighbors(node, adjacency);
        self.nodes()
            .filter(move |&other| other != node && neighbors.binary_search(&other).is_err())
    }

    /// Whether an edge `from -> to` exists. Direction is ignored for undirected graphs.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        let (a, b) = self.edge_key(from, to);
        self.graph.contains_edge(NodeIndex::new(a), NodeIndex::new(b))
    }

    pub fn is_adjacent(&self, a: usize, b: usize, adjacency: Adjacency) -> bool {
        match adjacency {
            Adjacency::Outgoing => self.has_edge(a, b),
            Adjacency::Any => self
                .graph
                .find_edge_undirected(NodeIndex::new(a), NodeIndex::new(b))
                .is_some(),
        }
    }

    pub fn has_self_loop(&self, node: usize) -> bool {
        self.has_edge(node, node)
    }

    /// Number of distinct nodes joined to `node` by an edge in either direction.
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node, Adjacency::Any).len()
    }

    /// Weight of the edge `from -> to`, or `None` if the edge carries no weight.
    ///
    /// # Errors
    ///
    /// - [`QuboError::InvalidNode`] if either node is outside the node range
    /// - [`QuboError::MissingEdge`] if there is no such edge; check adjacency first
    pub fn edge_weight(&self, from: usize, to: usize) -> Result<Option<f64>> {
        self.check_node(from)?;
        self.check_node(to)?;
        self.find_edge(from, to)
            .map(|edge| self.graph[edge])
            .ok_or(QuboError::MissingEdge { from, to })
    }

/// First edge without a weight, in key order.
    pub fn first_unweighted_edge(&self) -> Option<(usize, usize)> {
        self.edges()
            .find(|edge| edge.weight.is_none())
            .map(|edge| (edge.from, edge.to))
    }

    /// Largest edge weight, `0.0` for a graph without edges.
    ///
    /// # Errors
    ///
    /// Returns [`QuboError::MissingWeight`] if any edge has no weight.
    pub fn max_weight(&self) -> Result<f64> {
        self.edges().try_fold(0.0_f64, |max, edge| match edge.weight {
            Some(w) => Ok(max.max(w)),
            None => Err(QuboError::MissingWeight {
                from: edge.from,
                to: edge.to,
            }),
        })
    }
}

impl PartialEq for GraphModel {
    fn eq(&self, other: &Self) -> bool {
        self.directed == other.directed
            && self.node_count() == other.node_count()
            && self.edges().eq(other.edges())
    }
}
