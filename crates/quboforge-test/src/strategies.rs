//! Proptest strategies for random problem instances.
//!
//! Graphs contain self loops only when a strategy says so. Weights, when
//! present, are drawn from `[1, 1000)` so no edge has weight zero.

use proptest::collection::vec;
use proptest::prelude::*;
use quboforge_core::GraphModel;

/// Random graph with `min_nodes..=max_nodes` nodes.
///
/// Every candidate node pair (ordered for directed graphs) is an edge with
/// probability one half.
pub fn graphs(
    min_nodes: usize,
    max_nodes: usize,
    weighted: bool,
    directed: bool,
) -> impl Strategy<Value = GraphModel> {
    random_graphs(min_nodes, max_nodes, weighted, directed, false)
}

/// Like [`graphs`], but every node also carries a self loop with probability
/// one half.
pub fn graphs_with_self_loops(
    min_nodes: usize,
    max_nodes: usize,
    weighted: bool,
    directed: bool,
) -> impl Strategy<Value = GraphModel> {
    random_graphs(min_nodes, max_nodes, weighted, directed, true)
}

fn random_graphs(
    min_nodes: usize,
    max_nodes: usize,
    weighted: bool,
    directed: bool,
    self_loops: bool,
) -> impl Strategy<Value = GraphModel> {
    (min_nodes..=max_nodes)
        .prop_flat_map(move |n| {
            let pairs: Vec<(usize, usize)> = (0..n)
                .flat_map(|u| (0..n).map(move |v| (u, v)))
                .filter(|&(u, v)| {
                    (self_loops && u == v) || if directed { u != v } else { u < v }
                })
                .collect();
            let len = pairs.len();
            (
                Just(n),
                Just(pairs),
                vec(any::<bool>(), len),
                vec(1.0f64..1000.0, len),
            )
        })
        .prop_map(move |(n, pairs, present, weights)| {
            let edges = pairs
                .into_iter()
                .zip(present)
                .zip(weights)
                .filter(|((_, present), _)| *present)
                .map(|(((u, v), _), w)| (u, v, weighted.then_some(w)));
            GraphModel::from_edges(directed, n, edges).expect("generated graph is valid")
        })
}

/// `(graph, steps, start, terminal)` with `1 <= steps < n` and `start != terminal`.
pub fn longest_path_params() -> impl Strategy<Value = (GraphModel, usize, usize, usize)> {
    graphs(2, 8, true, false)
        .prop_flat_map(|graph| {
            let n = graph.node_count();
            (Just(graph), 1..n, 0..n, 0..n)
        })
        .prop_filter("start and terminal differ", |(_, _, start, terminal)| {
            start != terminal
        })
}

/// `(graph, colors)` with `2 <= colors <= 16`.
pub fn graph_coloring_params() -> impl Strategy<Value = (GraphModel, usize)> {
    (graphs(2, 8, false, false), 2usize..=16)
}

/// Weighted undirected graphs for tour problems.
pub fn traveling_salesperson_params() -> impl Strategy<Value = GraphModel> {
    graphs(2, 8, true, false)
}
