//! Label canonicalisation for [`GraphModel`].

use std::hash::Hash;

use indexmap::IndexSet;

use super::GraphModel;
use crate::error::Result;

/// Collects nodes and edges under arbitrary labels and assigns dense indices
/// in first-appearance order.
///
/// # Example
///
/// ```
/// use quboforge_core::GraphBuilder;
///
/// let (graph, labels) = GraphBuilder::new(false)
///     .weighted_edge("a", "b", 8.0)
///     .weighted_edge("a", "c", 7.0)
///     .node("d")
///     .build_labeled()
///     .unwrap();
///
/// assert_eq!(labels, vec!["a", "b", "c", "d"]);
/// assert_eq!(graph.edge_weight(2, 0).unwrap(), Some(7.0));
/// assert_eq!(graph.degree(3), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder<L> {
    directed: bool,
    labels: IndexSet<L>,
    edges: Vec<(usize, usize, Option<f64>)>,
}

impl<L> GraphBuilder<L>
where
    L: Eq + Hash + Clone,
{
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            labels: IndexSet::new(),
            edges: Vec::new(),
        }
    }

    /// Returns the dense index for `label`, allocating one on first sight.
    pub fn add_node(&mut self, label: L) -> usize {
        self.labels.insert_full(label).0
    }

    pub fn add_edge(&mut self, from: L, to: L, weight: Option<f64>) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.edges.push((from, to, weight));
    }

    pub fn node(mut self, label: L) -> Self {
        self.add_node(label);
        self
    }

    pub fn edge(mut self, from: L, to: L) -> Self {
        self.add_edge(from, to, None);
        self
    }

    pub fn weighted_edge(mut self, from: L, to: L, weight: f64) -> Self {
        self.add_edge(from, to, Some(weight));
        self
    }

    /// Index assigned to `label`, if it has been seen.
    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    pub fn build(self) -> Result<GraphModel> {
        self.build_labeled().map(|(graph, _)| graph)
    }

    /// Builds the model and returns the labels indexed by node.
    pub fn build_labeled(self) -> Result<(GraphModel, Vec<L>)> {
        let graph = GraphModel::from_edges(self.directed, self.labels.len(), self.edges)?;
        Ok((graph, self.labels.into_iter().collect()))
    }
}
