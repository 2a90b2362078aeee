//! Closed-form QUBO formulations.
//!
//! Each builder writes its problem's Hamiltonian term by term with
//! [`Polynomial`] and exports an upper-triangular matrix. They share nothing
//! with the generic compiler except [`variable_index`], so agreement between
//! the two is meaningful.

use quboforge_core::{variable_index, Adjacency, GraphModel, QuboMatrix, Result};

use crate::polynomial::Polynomial;

/// Longest path from `start` to `terminal` in exactly `steps` steps.
///
/// Positions are `steps + 1`; `a = steps * max weight`. Traversal rewards and
/// penalties only cover node pairs `i <= j`.
pub fn longest_path(
    graph: &GraphModel,
    start: usize,
    terminal: usize,
    steps: usize,
) -> Result<QuboMatrix> {
    let n = graph.node_count();
    let k = steps + 1;
    let a = steps as f64 * graph.max_weight()?;
    let x = |node: usize, position: usize| variable_index(node, position, k);

    let mut h = Polynomial::new();
    h.add_linear(x(start, 0), -a);
    h.add_linear(x(terminal, steps), -a);

    // one node per position
    for p in 0..k {
        for i in 0..n {
            h.add_linear(x(i, p), -a);
            for j in i + 1..n {
                h.add_product(x(i, p), x(j, p), 2.0 * a);
            }
        }
    }

    // one position per node
    for i in 0..n {
        for p in 0..k {
            for q in p + 1..k {
                h.add_product(x(i, p), x(i, q), a);
            }
        }
    }

    // weighted traversals and invalid traversals
    for i in 0..n {
        for j in i..n {
            for p in 0..k - 1 {
                if graph.has_edge(i, j) {
                    let w = graph.edge_weight(i, j)?.unwrap_or(0.0);
                    h.add_product(x(i, p), x(j, p + 1), -w);
                } else {
                    h.add_product(x(i, p), x(j, p + 1), a);
                }
            }
        }
    }

    Ok(h.to_matrix(n * k))
}

/// Graph coloring with `colors` colors, `a = 4`, `c = 2`.
pub fn graph_coloring(graph: &GraphModel, colors: usize) -> QuboMatrix {
    let n = graph.node_count();
    let (a, c) = (4.0, 2.0);
    let x = |node: usize, color: usize| variable_index(node, color, colors);

    let mut h = Polynomial::new();
    for v in 0..n {
        let vars: Vec<usize> = (0..colors).map(|i| x(v, i)).collect();
        h.add_squared_one_hot(&vars, a);
    }
    for v in 0..n {
        for w in graph.neighbors(v, Adjacency::Any) {
            for j in 0..colors {
                h.add_product(x(v, j), x(w, j), c);
            }
        }
    }
    h.to_matrix(n * colors)
}

/// Shared body of the tour problems: permutation constraints with strength
/// `a`, invalid traversals with strength `a`, and optional weighted tour length.
fn tour(graph: &GraphModel, a: f64, length_factor: Option<f64>) -> Result<QuboMatrix> {
    let n = graph.node_count();
    let x = |node: usize, position: usize| variable_index(node, position, n);

    let mut h = Polynomial::new();
    for v in 0..n {
        let vars: Vec<usize> = (0..n).map(|j| x(v, j)).collect();
        h.add_squared_one_hot(&vars, a);
    }
    for j in 0..n {
        let vars: Vec<usize> = (0..n).map(|v| x(v, j)).collect();
        h.add_squared_one_hot(&vars, a);
    }

    for u in 0..n {
        for v in 0..n {
            // a self loop is a traversal; its absence is not
            if u == v && !graph.has_edge(u, v) {
                continue;
            }
            for j in 0..n {
                let next = (j + 1) % n;
                if !graph.has_edge(u, v) {
                    h.add_product(x(u, j), x(v, next), a);
                } else if let Some(b) = length_factor {
                    let w = graph.edge_weight(u, v)?.unwrap_or(0.0);
                    h.add_product(x(u, j), x(v, next), b * w);
                }
            }
        }
    }

    Ok(h.to_matrix(n * n))
}

/// Traveling salesperson with `b = 1`, `a = b * max weight + 1`.
pub fn traveling_salesperson(graph: &GraphModel) -> Result<QuboMatrix> {
    let b = 1.0;
    let a = b * graph.max_weight()? + 1.0;
    tour(graph, a, Some(b))
}

/// Hamiltonian cycle with `a = 1`.
pub fn hamiltonian_cycle(graph: &GraphModel) -> Result<QuboMatrix> {
    tour(graph, 1.0, None)
}

/// Max-Cut: `-sum over edges (x_u + x_v - 2 x_u x_v)`.
pub fn max_cut(graph: &GraphModel) -> QuboMatrix {
    let mut h = Polynomial::new();
    for edge in graph.edges() {
        h.add_linear(edge.from, -1.0);
        h.add_linear(edge.to, -1.0);
        h.add_product(edge.from, edge.to, 2.0);
    }
    h.to_matrix(graph.node_count())
}

/// Maximum independent set: `-a sum x_v + b sum over edges x_u x_v`, `a = 1`, `b = 2`.
pub fn maximum_independent_set(graph: &GraphModel) -> QuboMatrix {
    let (a, b) = (1.0, 2.0);
    let mut h = Polynomial::new();
    for v in graph.nodes() {
        h.add_linear(v, -a);
    }
    for edge in graph.edges() {
        h.add_product(edge.from, edge.to, b);
    }
    h.to_matrix(graph.node_count())
}

/// Minimum vertex cover: `sum x_v + a sum over edges (1 - x_u)(1 - x_v)`, `a = 2`.
pub fn minimum_vertex_cover(graph: &GraphModel) -> QuboMatrix {
    let a = 2.0;
    let mut h = Polynomial::new();
    for v in graph.nodes() {
        h.add_linear(v, 1.0);
    }
    for edge in graph.edges() {
        h.add_constant(a);
        h.add_linear(edge.from, -a);
        h.add_linear(edge.to, -a);
        h.add_product(edge.from, edge.to, a);
    }
    h.to_matrix(graph.node_count())
}

/// Clique cover with `colors` cliques, `a = 1`, `b = 2`.
///
/// Per color `i` the penalty is `b * (S_i (S_i - 1) / 2 - edges inside color i)`
/// with `S_i = sum_v x(v, i)`.
pub fn clique_cover(graph: &GraphModel, colors: usize) -> QuboMatrix {
    let n = graph.node_count();
    let (a, b) = (1.0, 2.0);
    let x = |node: usize, color: usize| variable_index(node, color, colors);

    let mut h = Polynomial::new();
    for v in 0..n {
        let vars: Vec<usize> = (0..colors).map(|i| x(v, i)).collect();
        h.add_squared_one_hot(&vars, a);
    }
    for i in 0..colors {
        for u in 0..n {
            h.add_linear(x(u, i), -0.5 * b);
            for v in 0..n {
                h.add_product(x(u, i), x(v, i), 0.5 * b);
            }
        }
        for edge in graph.edges() {
            h.add_product(x(edge.from, i), x(edge.to, i), -b);
        }
    }
    h.to_matrix(n * colors)
}

/// Densest `k`-subgraph: `n (sum x_v - k)^2 - sum over edges x_u x_v`.
///
/// The squared term keeps the selection at `k` nodes; among those, every
/// induced edge lowers the energy by one.
pub fn densest_k_subgraph(graph: &GraphModel, k: usize) -> QuboMatrix {
    let n = graph.node_count();
    let scale = n as f64;
    let mut h = Polynomial::new();
    h.add_constant(scale * (k * k) as f64);
    for u in 0..n {
        h.add_linear(u, scale - 2.0 * scale * k as f64);
        for v in u + 1..n {
            h.add_product(u, v, 2.0 * scale);
        }
    }
    for edge in graph.edges() {
        h.add_product(edge.from, edge.to, -1.0);
    }
    h.to_matrix(n)
}
