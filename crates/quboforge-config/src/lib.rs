//! Configuration system for QuboForge.
//!
//! A [`ConstraintConfig`] names which penalty families the compiler should
//! emit and how strongly. Every option is optional; an unset or zero weight
//! disables its family completely.
//!
//! # Examples
//!
//! Load a graph coloring configuration from TOML:
//!
//! ```
//! use quboforge_config::{ConstraintConfig, Penalty};
//!
//! let config = ConstraintConfig::from_toml_str(r#"
//!     diagonal = -4.0
//!     one_node_many_positions = 8.0
//!     edges = 4.0
//! "#).unwrap();
//!
//! assert_eq!(config.weight(Penalty::Edges), Some(4.0));
//! assert_eq!(config.weight(Penalty::NonEdges), None);
//! assert_eq!(config.enabled().count(), 3);
//! ```
//!
//! Misspelled options are rejected instead of being silently ignored:
//!
//! ```
//! use quboforge_config::ConstraintConfig;
//!
//! assert!(ConstraintConfig::from_toml_str("edgez = 1.0").is_err());
//! ```

mod job;


use std::fmt;
use std::path::Path;
use std::str::FromStr;

use quboforge_core::QuboError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use job::{EdgeDescription, GraphDescription, JobConfig};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown penalty: {0}")]
    UnknownPenalty(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid graph: {0}")]
    Graph(#[from] QuboError),
}

/// The closed set of penalty families the compiler understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Penalty {
    /// Diagonal cell of `(start_node, 0)`.
    StartNodeScore,
    /// Diagonal cell of `(terminal_node, positions - 1)`.
    TerminalNodeScore,
    /// Every diagonal cell.
    Diagonal,
    /// Diagonal cell of `(v, p)` once per neighbour of `v`.
    NodesWithEdges,
    /// A node occupying two positions.
    OneNodeManyPositions,
    /// A position occupied by two nodes.
    OnePositionManyNodes,
    /// Adjacent nodes sharing a position.
    Edges,
    /// Traversing an edge from one position to the next, scaled by its weight.
    EdgeWeightsFactor,
    /// Traversing an edge from the last position back to the first.
    EdgeWeightsCyclesFactor,
    /// Non-adjacent nodes sharing a position.
    NonEdges,
    /// Moving between non-adjacent nodes from one position to the next.
    InvalidTraversal,
    /// Moving between non-adjacent nodes from the last position to the first.
    InvalidTraversalCycles,
    /// A node without a self loop occupying consecutive positions.
    InvalidTraversalSelf,
}

impl Penalty {
    /// All penalties in declaration order.
    pub const ALL: [Penalty; 13] = [
        Penalty::StartNodeScore,
        Penalty::TerminalNodeScore,
        Penalty::Diagonal,
        Penalty::NodesWithEdges,
        Penalty::OneNodeManyPositions,
        Penalty::OnePositionManyNodes,
        Penalty::Edges,
        Penalty::EdgeWeightsFactor,
        Penalty::EdgeWeightsCyclesFactor,
        Penalty::NonEdges,
        Penalty::InvalidTraversal,
        Penalty::InvalidTraversalCycles,
        Penalty::InvalidTraversalSelf,
    ];

    /// The configuration key for this penalty.
    pub fn name(&self) -> &'static str {
        match self {
            Penalty::StartNodeScore => "start_node_score",
            Penalty::TerminalNodeScore => "terminal_node_score",
            Penalty::Diagonal => "diagonal",
            Penalty::NodesWithEdges => "nodes_with_edges",
            Penalty::OneNodeManyPositions => "one_node_many_positions",
            Penalty::OnePositionManyNodes => "one_position_many_nodes",
            Penalty::Edges => "edges",
            Penalty::EdgeWeightsFactor => "edge_weights_factor",
            Penalty::EdgeWeightsCyclesFactor => "edge_weights_cycles_factor",
            Penalty::NonEdges => "non_edges",
            Penalty::InvalidTraversal => "invalid_traversal",
            Penalty::InvalidTraversalCycles => "invalid_traversal_cycles",
            Penalty::InvalidTraversalSelf => "invalid_traversal_self",
        }
    }

    /// Whether the penalty acts on the wraparound from the last position to the first.
    pub fn is_cyclic(&self) -> bool {
        matches!(
            self,
            Penalty::EdgeWeightsCyclesFactor | Penalty::InvalidTraversalCycles
        )
    }

    /// Whether the penalty reads edge weights.
    pub fn needs_edge_weights(&self) -> bool {
        matches!(
            self,
            Penalty::EdgeWeightsFactor | Penalty::EdgeWeightsCyclesFactor
        )
    }
}

impl fmt::Display for Penalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Penalty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Penalty::ALL
            .into_iter()
            .find(|penalty| penalty.name() == s)
            .ok_or_else(|| ConfigError::UnknownPenalty(s.to_string()))
    }
}

/// Penalty weights and mirroring flags for one compilation.
///
/// Each weight is either set or unset. A weight of exactly zero is treated
/// the same as unset: the family is not compiled at all.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct ConstraintConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_node_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_node_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonal: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_with_edges: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_node_many_positions: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_position_many_nodes: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_weights_factor: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_weights_cycles_factor: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_edges: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_traversal: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_traversal_cycles: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_traversal_self: Option<f64>,

    /// Mirror same-position and traversal terms into the lower triangle.
    #[serde(default)]
    pub double_count_edges: bool,

    /// Mirror wraparound traversal terms into the lower triangle.
    #[serde(default)]
    pub double_count_edges_cycles: bool,
}

impl ConstraintConfig {
    /// Creates an empty configuration. Compiling it yields the zero matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing YAML for `.yaml`/`.yml`
    /// and TOML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from `(name, value)` pairs.
    ///
    /// The two mirroring flags are accepted by name and are switched on by
    /// any non-zero value.
    ///
    /// # Examples
    ///
    /// ```
    /// use quboforge_config::{ConstraintConfig, Penalty};
    ///
    /// let config = ConstraintConfig::from_pairs([
    ///     ("nodes_with_edges", -1.0),
    ///     ("edges", 2.0),
    ///     ("double_count_edges", 1.0),
    /// ]).unwrap();
    /// assert_eq!(config.weight(Penalty::NodesWithEdges), Some(-1.0));
    /// assert!(config.double_count_edges);
    ///
    /// assert!(ConstraintConfig::from_pairs([("diagonl", 1.0)]).is_err());
    /// ```
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut config = Self::new();
        for (name, value) in pairs {
            match name.as_ref() {
                "double_count_edges" => config.double_count_edges = value != 0.0,
                "double_count_edges_cycles" => config.double_count_edges_cycles = value != 0.0,
                other => config.set(other.parse()?, value),
            }
        }
        config.validate()?;
        Ok(config)
    }

    fn slot(&self, penalty: Penalty) -> &Option<f64> {
        match penalty {
            Penalty::StartNodeScore => &self.start_node_score,
            Penalty::TerminalNodeScore => &self.terminal_node_score,
            Penalty::Diagonal => &self.diagonal,
            Penalty::NodesWithEdges => &self.nodes_with_edges,
            Penalty::OneNodeManyPositions => &self.one_node_many_positions,
            Penalty::OnePositionManyNodes => &self.one_position_many_nodes,
            Penalty::Edges => &self.edges,
            Penalty::EdgeWeightsFactor => &self.edge_weights_factor,
            Penalty::EdgeWeightsCyclesFactor => &self.edge_weights_cycles_factor,
            Penalty::NonEdges => &self.non_edges,
            Penalty::InvalidTraversal => &self.invalid_traversal,
            Penalty::InvalidTraversalCycles => &self.invalid_traversal_cycles,
            Penalty::InvalidTraversalSelf => &self.invalid_traversal_self,
        }
    }

    fn slot_mut(&mut self, penalty: Penalty) -> &mut Option<f64> {
        match penalty {
            Penalty::StartNodeScore => &mut self.start_node_score,
            Penalty::TerminalNodeScore => &mut self.terminal_node_score,
            Penalty::Diagonal => &mut self.diagonal,
            Penalty::NodesWithEdges => &mut self.nodes_with_edges,
            Penalty::OneNodeManyPositions => &mut self.one_node_many_positions,
            Penalty::OnePositionManyNodes => &mut self.one_position_many_nodes,
            Penalty::Edges => &mut self.edges,
            Penalty::EdgeWeightsFactor => &mut self.edge_weights_factor,
            Penalty::EdgeWeightsCyclesFactor => &mut self.edge_weights_cycles_factor,
            Penalty::NonEdges => &mut self.non_edges,
            Penalty::InvalidTraversal => &mut self.invalid_traversal,
            Penalty::InvalidTraversalCycles => &mut self.invalid_traversal_cycles,
            Penalty::InvalidTraversalSelf => &mut self.invalid_traversal_self,
        }
    }

    /// Effective weight of `penalty`: `None` when unset or zero.
    pub fn weight(&self, penalty: Penalty) -> Option<f64> {
        (*self.slot(penalty)).filter(|&w| w != 0.0)
    }

    pub fn is_enabled(&self, penalty: Penalty) -> bool {
        self.weight(penalty).is_some()
    }

    /// Enabled penalties and their weights, in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = (Penalty, f64)> + '_ {
        Penalty::ALL
            .into_iter()
            .filter_map(|penalty| self.weight(penalty).map(|w| (penalty, w)))
    }

    /// True if no penalty is enabled.
    pub fn is_empty(&self) -> bool {
        self.enabled().next().is_none()
    }

    pub fn set(&mut self, penalty: Penalty, weight: f64) {
        *self.slot_mut(penalty) = Some(weight);
    }

    pub fn clear(&mut self, penalty: Penalty) {
        *self.slot_mut(penalty) = None;
    }

    /// Sets the weight of `penalty`.
    pub fn with(mut self, penalty: Penalty, weight: f64) -> Self {
        self.set(penalty, weight);
        self
    }

    pub fn with_double_count_edges(mut self, enabled: bool) -> Self {
        self.double_count_edges = enabled;
        self
    }

    pub fn with_double_count_edges_cycles(mut self, enabled: bool) -> Self {
        self.double_count_edges_cycles = enabled;
        self
    }

    /// The mirroring flag that governs `penalty`.
    pub fn double_counts(&self, penalty: Penalty) -> bool {
        match penalty {
            Penalty::Edges
            | Penalty::NonEdges
            | Penalty::EdgeWeightsFactor
            | Penalty::InvalidTraversal => self.double_count_edges,
            Penalty::EdgeWeightsCyclesFactor | Penalty::InvalidTraversalCycles => {
                self.double_count_edges_cycles
            }
            _ => false,
        }
    }

    /// Rejects weights that are NaN or infinite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for penalty in Penalty::ALL {
            if let Some(w) = *self.slot(penalty) {
                if !w.is_finite() {
                    return Err(ConfigError::Invalid(format!(
                        "{penalty} has non-finite weight {w}"
                    )));
                }
            }
        }
        Ok(())
    }
}
