//! Tests for the graph model.

use super::*;

fn example_graph() -> GraphModel {
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
    .unwrap()
}

#[test]
fn test_undirected_neighbors_are_symmetric() {
    let graph = example_graph();
    for node in graph.nodes() {
        for other in graph.neighbors(node, Adjacency::Outgoing) {
            assert!(graph.neighbors(other, Adjacency::Outgoing).contains(&node));
        }
        assert_eq!(
            graph.neighbors(node, Adjacency::Outgoing),
            graph.neighbors(node, Adjacency::Any)
        );
    }
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn test_directed_neighbors_respect_direction() {
    let graph = GraphModel::from_edges(true, 3, [(0, 1, None), (2, 1, None)]).unwrap();

    assert!(graph.is_directed());
    assert!(graph.has_edge(0, 1));
    assert!(!graph.has_edge(1, 0));
    assert!(graph.neighbors(1, Adjacency::Outgoing).is_empty());
    assert_eq!(
        graph.neighbors(1, Adjacency::Any),
        vec![0, 2]
    );
    assert!(graph.is_adjacent(1, 0, Adjacency::Any));
    assert!(!graph.is_adjacent(1, 0, Adjacency::Outgoing));
    assert_eq!(
        graph.non_neighbors(0, Adjacency::Outgoing).collect::<Vec<_>>(),
        vec![2]
    );
}

#[test]
fn test_edge_weight_lookup() {
    let graph = example_graph();
    assert_eq!(graph.edge_weight(3, 1).unwrap(), Some(2.0));
    assert_eq!(
        graph.edge_weight(0, 3),
        Err(QuboError::MissingEdge { from: 0, to: 3 })
    );
    assert_eq!(
        graph.edge_weight(0, 9),
        Err(QuboError::InvalidNode {
            node: 9,
            node_count: 4
        })
    );
}

#[test]
fn test_directed_weight_is_per_arc() {
    let graph =
        GraphModel::from_edges(true, 2, [(0, 1, Some(3.0)), (1, 0, Some(5.0))]).unwrap();
    assert_eq!(graph.edge_weight(0, 1).unwrap(), Some(3.0));
    assert_eq!(graph.edge_weight(1, 0).unwrap(), Some(5.0));
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.degree(0), 1);
}

#[test]
fn test_duplicate_edge_keeps_last_weight() {
    let graph =
        GraphModel::from_edges(false, 2, [(0, 1, Some(1.0)), (1, 0, Some(4.0))]).unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge_weight(0, 1).unwrap(), Some(4.0));
}

#[test]
fn test_invalid_endpoints_and_weights() {
    assert_eq!(
        GraphModel::from_edges(false, 2, [(0, 2, None)]),
        Err(QuboError::InvalidNode {
            node: 2,
            node_count: 2
        })
    );
    assert!(matches!(
        GraphModel::from_edges(false, 2, [(0, 1, Some(-1.0))]),
        Err(QuboError::InvalidGraph(_))
    ));
    assert!(matches!(
        GraphModel::from_edges(false, 2, [(0, 1, Some(f64::NAN))]),
        Err(QuboError::InvalidGraph(_))
    ));
}

#[test]
fn test_max_weight() {
    assert_eq!(example_graph().max_weight().unwrap(), 8.0);
    assert_eq!(GraphModel::with_nodes(false, 3).max_weight().unwrap(), 0.0);

    let partial = GraphModel::from_edges(false, 3, [(0, 1, Some(1.0)), (1, 2, None)]).unwrap();
    assert_eq!(
        partial.max_weight(),
        Err(QuboError::MissingWeight { from: 1, to: 2 })
    );
    assert_eq!(partial.first_unweighted_edge(), Some((1, 2)));
}

#[test]
fn test_self_loop() {
    let graph = GraphModel::from_edges(false, 2, [(1, 1, None)]).unwrap();
    assert!(graph.has_self_loop(1));
    assert!(!graph.has_self_loop(0));
    assert_eq!(graph.non_neighbors(1, Adjacency::Any).collect::<Vec<_>>(), vec![0]);
    assert_eq!(graph.neighbors(1, Adjacency::Any), vec![1]);
    assert_eq!(graph.degree(1), 1);
}

#[test]
fn test_directed_self_loop_listed_once() {
    let graph = GraphModel::from_edges(true, 2, [(0, 0, Some(3.0)), (0, 1, Some(1.0))]).unwrap();
    assert_eq!(graph.neighbors(0, Adjacency::Outgoing), vec![0, 1]);
    assert_eq!(graph.neighbors(0, Adjacency::Any), vec![0, 1]);
    assert_eq!(
        graph.weighted_successors(0),
        vec![(0, Some(3.0)), (1, Some(1.0))]
    );
    assert!(graph.weighted_successors(1).is_empty());
}

#[test]
fn test_undirected_successor_weights_from_either_end() {
    let graph = example_graph();
    assert_eq!(
        graph.weighted_successors(3),
        vec![(1, Some(2.0)), (2, Some(8.0))]
    );
}

#[test]
fn test_edges_sorted_and_canonical() {
    let graph = GraphModel::from_edges(false, 3, [(2, 1, None), (1, 0, Some(1.0))]).unwrap();
    let edges: Vec<_> = graph.edges().map(|edge| (edge.from, edge.to)).collect();
    assert_eq!(edges, vec![(0, 1), (1, 2)]);
}

#[test]
fn test_equality_ignores_insertion_order() {
    let a = GraphModel::from_edges(false, 3, [(0, 1, None), (1, 2, Some(2.0))]).unwrap();
    let b = GraphModel::from_edges(false, 3, [(2, 1, Some(2.0)), (1, 0, None)]).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, GraphModel::from_edges(true, 3, [(0, 1, None), (1, 2, Some(2.0))]).unwrap());
}

#[test]
fn test_out_of_range_queries() {
    let graph = example_graph();
    assert!(graph.neighbors(9, Adjacency::Any).is_empty());
    assert!(!graph.has_edge(9, 0));
    assert!(!graph.is_adjacent(0, 9, Adjacency::Any));
}

#[test]
fn test_builder_canonicalises_labels() {
    let mut builder = GraphBuilder::new(true);
    builder.add_edge("x", "y", Some(1.5));
    builder.add_edge("z", "x", None);
    assert_eq!(builder.index_of(&"z"), Some(2));
    assert_eq!(builder.index_of(&"w"), None);

    let (graph, labels) = builder.build_labeled().unwrap();
    assert_eq!(labels, vec!["x", "y", "z"]);
    assert!(graph.has_edge(2, 0));
    assert!(!graph.has_edge(0, 2));
    assert_eq!(graph.edge_weight(0, 1).unwrap(), Some(1.5));
}

#[test]
fn test_builder_isolated_nodes() {
    let graph = GraphModel::builder::<u32>(false)
        .node(10)
        .node(20)
        .node(10)
        .build()
        .unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
}
