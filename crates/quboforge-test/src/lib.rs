//! Shared test fixtures for QuboForge crates.
//!
//! - [`fixtures`] - small hand-written graphs
//! - [`polynomial`] - quadratic pseudo-Boolean polynomials with matrix export
//! - [`reference`] - closed-form QUBO formulations used as oracles
//! - [`strategies`] - proptest strategies for random graphs and problem parameters
//! - [`assert`] - matrix equivalence assertions
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! quboforge-test = { workspace = true }
//! ```
//!
//! Then compare a compiled matrix with its closed form:
//!
//! ```ignore
//! use quboforge_test::{assert_equivalent, example_graph, reference};
//!
//! let graph = example_graph();
//! assert_equivalent(&reference::max_cut(&graph), &compiled);
//! ```

pub mod assert;
pub mod fixtures;
pub mod polynomial;
pub mod reference;
pub mod strategies;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub use assert::{assert_equivalent, assert_upper_triangular, matrices_close};
pub use fixtures::{edgeless_graph, example_digraph, example_graph, path_graph, single_node};
pub use polynomial::Polynomial;

/// Installs a test-friendly tracing subscriber once per process.
///
/// Honours `RUST_LOG`, defaulting to `warn`.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
