//! Hand-written graphs used across the test-suites.

use quboforge_core::GraphModel;

/// The weighted four-node graph used by the regression scenarios:
/// `{(0,1,w=8), (0,2,w=7), (1,3,w=2), (2,3,w=8)}`.
pub fn example_graph() -> GraphModel {
    GraphModel::from_edges(
        false,
        4,
        [
            (0, 1, Some(8.0)),
            (0, 2, Some(7.0)),
            (1, 3, Some(2.0)),
            (2, 3, Some(8.0)),
        ],
    )
    .expect("example graph is valid")
}

/// Directed version of [`example_graph`] with one arc per edge, oriented
/// from the smaller to the larger node, plus the arc `3 -> 0`.
pub fn example_digraph() -> GraphModel {
    GraphModel::from_edges(
        true,
        4,
        [
            (0, 1, Some(8.0)),
            (0, 2, Some(7.0)),
            (1, 3, Some(2.0)),
            (2, 3, Some(8.0)),
            (3, 0, Some(5.0)),
        ],
    )
    .expect("example digraph is valid")
}

/// Unweighted path `0 - 1 - ... - (n-1)`.
pub fn path_graph(n: usize) -> GraphModel {
    GraphModel::from_edges(false, n, (1..n).map(|v| (v - 1, v, None))).expect("path graph is valid")
}

/// `n` isolated nodes.
pub fn edgeless_graph(n: usize) -> GraphModel {
    GraphModel::with_nodes(false, n)
}

pub fn single_node() -> GraphModel {
    edgeless_graph(1)
}
