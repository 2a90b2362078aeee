//! Presets compared against closed-form formulations and brute-force optima.

use proptest::prelude::*;
use quboforge::prelude::*;
use quboforge::variable_index;
use quboforge_test::strategies::{
    graph_coloring_params, graphs, graphs_with_self_loops, longest_path_params,
};
use quboforge_test::{assert_equivalent, example_digraph, example_graph, init_test_tracing, reference};

/// Lowest energy over every assignment.
fn brute_force_minimum(q: &QuboMatrix) -> f64 {
    let n = q.dimension();
    assert!(n <= 20, "too many variables for brute force: {n}");
    (0u32..1 << n)
        .map(|bits| {
            let assignment: Vec<bool> = (0..n).map(|i| bits & (1 << i) != 0).collect();
            q.energy(&assignment).unwrap()
        })
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn longest_path_matches_reference() {
    init_test_tracing();
    let graph = example_graph();
    let q = LongestPath::new(0, 1, 3).to_qubo(&graph).unwrap();
    assert_equivalent(&reference::longest_path(&graph, 0, 1, 3).unwrap(), &q);
}

#[test]
fn graph_coloring_matches_reference() {
    let graph = example_graph();
    let q = GraphColoring::new(2).to_qubo(&graph).unwrap();
    assert_equivalent(&reference::graph_coloring(&graph, 2), &q);

    // the 4-cycle is bipartite
    assert_eq!(brute_force_minimum(&q), -16.0);
}

#[test]
fn traveling_salesperson_matches_reference() {
    for graph in [example_graph(), example_digraph()] {
        let q = TravelingSalesperson::default().to_qubo(&graph).unwrap();
        assert_equivalent(&reference::traveling_salesperson(&graph).unwrap(), &q);
    }
}

#[test]
fn traveling_salesperson_finds_shortest_tour() {
    let graph = example_graph();
    let q = TravelingSalesperson::default().to_qubo(&graph).unwrap();

    // the only tour is 0 -> 1 -> 3 -> 2 -> 0 with length 25, offset 2 * 9 * 4
    assert_eq!(brute_force_minimum(&q), 25.0 - 72.0);

    let mut tour = vec![false; q.dimension()];
    for (position, node) in [1, 3, 2, 0].into_iter().enumerate() {
        tour[variable_index(node, position, 4)] = true;
    }
    assert_eq!(q.energy(&tour).unwrap(), 25.0 - 72.0);
}

#[test]
fn hamiltonian_cycle_matches_reference() {
    let graph = example_graph();
    let q = HamiltonianCycle.to_qubo(&graph).unwrap();
    assert_equivalent(&reference::hamiltonian_cycle(&graph).unwrap(), &q);
    assert_eq!(brute_force_minimum(&q), -8.0);
}

#[test]
fn max_cut_matches_reference() {
    let graph = example_graph();
    let q = MaxCut.to_qubo(&graph).unwrap();
    assert_equivalent(&reference::max_cut(&graph), &q);
    assert_eq!(brute_force_minimum(&q), -4.0);
}

#[test]
fn maximum_independent_set_matches_reference() {
    let graph = example_graph();
    let q = MaximumIndependentSet.to_qubo(&graph).unwrap();
    assert_equivalent(&reference::maximum_independent_set(&graph), &q);
    assert_eq!(brute_force_minimum(&q), -2.0);
}

#[test]
fn minimum_vertex_cover_matches_reference() {
    let graph = example_graph();
    let q = MinimumVertexCover.to_qubo(&graph).unwrap();
    assert_equivalent(&reference::minimum_vertex_cover(&graph), &q);

    // two cover nodes, constant 2 * 4 dropped
    assert_eq!(brute_force_minimum(&q), 2.0 - 8.0);
}

#[test]
fn clique_cover_matches_reference() {
    let graph = example_graph();
    let q = CliqueCover::new(2).to_qubo(&graph).unwrap();
    assert_equivalent(&reference::clique_cover(&graph, 2), &q);

    // {0, 1} and {2, 3}
    assert_eq!(brute_force_minimum(&q), -4.0);
}

#[test]
fn densest_k_subgraph_matches_reference() {
    let graph = example_graph();
    let q = DensestKSubgraph::new(2).to_qubo(&graph).unwrap();
    assert_equivalent(&reference::densest_k_subgraph(&graph, 2), &q);

    // any edge of the 4-cycle, constant 4 * 2^2 dropped
    assert_eq!(brute_force_minimum(&q), -1.0 - 16.0);
    assert_eq!(q.energy(&[true, true, false, false]).unwrap(), -17.0);
    assert_eq!(q.energy(&[true, false, false, true]).unwrap(), -16.0);
}

#[test]
fn longest_path_rewards_self_loop() {
    let graph = GraphModel::from_edges(
        false,
        3,
        [(0, 1, Some(4.0)), (1, 1, Some(3.0)), (1, 2, Some(5.0))],
    )
    .unwrap();
    let q = LongestPath::new(0, 2, 2).to_qubo(&graph).unwrap();
    assert_equivalent(&reference::longest_path(&graph, 0, 2, 2).unwrap(), &q);
}

#[test]
fn parallel_generation_matches_preset() {
    let graph = example_graph();
    let problem = TravelingSalesperson::default();
    let config = problem.configuration(&graph).unwrap();
    assert_eq!(
        problem.compiler(&graph).generate_parallel(&config).unwrap(),
        problem.to_qubo(&graph).unwrap()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn longest_path_preset_matches_reference((graph, steps, start, terminal) in longest_path_params()) {
        let q = LongestPath::new(start, terminal, steps).to_qubo(&graph).unwrap();
        assert_equivalent(&reference::longest_path(&graph, start, terminal, steps).unwrap(), &q);
    }

    #[test]
    fn graph_coloring_preset_matches_reference((graph, colors) in graph_coloring_params()) {
        let q = GraphColoring::new(colors).to_qubo(&graph).unwrap();
        assert_equivalent(&reference::graph_coloring(&graph, colors), &q);
    }

    #[test]
    fn clique_cover_preset_matches_reference((graph, colors) in graph_coloring_params()) {
        let q = CliqueCover::new(colors).to_qubo(&graph).unwrap();
        assert_equivalent(&reference::clique_cover(&graph, colors), &q);
    }

    #[test]
    fn tour_presets_match_reference(graph in graphs(2, 7, true, false)) {
        let q = TravelingSalesperson::default().to_qubo(&graph).unwrap();
        assert_equivalent(&reference::traveling_salesperson(&graph).unwrap(), &q);

        let q = HamiltonianCycle.to_qubo(&graph).unwrap();
        assert_equivalent(&reference::hamiltonian_cycle(&graph).unwrap(), &q);
    }

    #[test]
    fn tour_presets_match_reference_with_self_loops(graph in graphs_with_self_loops(2, 6, true, true)) {
        let q = TravelingSalesperson::default().to_qubo(&graph).unwrap();
        assert_equivalent(&reference::traveling_salesperson(&graph).unwrap(), &q);
    }

    #[test]
    fn densest_k_subgraph_preset_matches_reference(
        (graph, k) in graphs(1, 10, false, false)
            .prop_flat_map(|graph| {
                let n = graph.node_count();
                (Just(graph), 0..=n)
            })
    ) {
        let q = DensestKSubgraph::new(k).to_qubo(&graph).unwrap();
        assert_equivalent(&reference::densest_k_subgraph(&graph, k), &q);
    }

    #[test]
    fn selection_presets_match_reference(graph in graphs(1, 12, false, false)) {
        assert_equivalent(&reference::max_cut(&graph), &MaxCut.to_qubo(&graph).unwrap());
        assert_equivalent(
            &reference::maximum_independent_set(&graph),
            &MaximumIndependentSet.to_qubo(&graph).unwrap(),
        );
        assert_equivalent(
            &reference::minimum_vertex_cover(&graph),
            &MinimumVertexCover.to_qubo(&graph).unwrap(),
        );
    }
}
