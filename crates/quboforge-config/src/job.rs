//! Job files: a graph, the position layout and a constraint configuration
//! bundled into one document.

use std::path::Path;

use quboforge_core::GraphModel;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConstraintConfig};

fn default_positions() -> usize {
    1
}

/// Everything needed for one compilation.
///
/// # Examples
///
/// ```
/// use quboforge_config::JobConfig;
///
/// let job = JobConfig::from_toml_str(r#"
///     positions = 2
///
///     [constraints]
///     diagonal = -4.0
///     one_node_many_positions = 8.0
///     edges = 4.0
///
///     [graph]
///     edges = [
///         { from = 0, to = 1 },
///         { from = 1, to = 2 },
///     ]
/// "#).unwrap();
///
/// let graph = job.graph.to_graph().unwrap();
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(job.positions, 2);
/// assert_eq!(job.start_node, None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default = "default_positions")]
    pub positions: usize,

    #[serde(default)]
    pub start_node: Option<usize>,

    #[serde(default)]
    pub terminal_node: Option<usize>,

    #[serde(default)]
    pub constraints: ConstraintConfig,

    pub graph: GraphDescription,
}

impl JobConfig {
    /// Loads a job from a file, choosing YAML for `.yaml`/`.yml` and TOML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let job: Self = toml::from_str(s)?;
        job.constraints.validate()?;
        Ok(job)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let job: Self = serde_yaml::from_str(s)?;
        job.constraints.validate()?;
        Ok(job)
    }
}

/// Serialized form of a graph over dense node indices.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct GraphDescription {
    #[serde(default)]
    pub directed: bool,

    /// Number of nodes. Defaults to one past the largest edge endpoint.
    #[serde(default)]
    pub node_count: Option<usize>,

    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EdgeDescription {
    pub from: usize,
    pub to: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl GraphDescription {
    fn inferred_node_count(&self) -> usize {
        self.edges
            .iter()
            .map(|edge| edge.from.max(edge.to) + 1)
            .max()
            .unwrap_or(0)
    }

    /// Builds the graph model.
    ///
    /// # Errors
    ///
    /// Fails if an endpoint is outside the declared node count or a weight is invalid.
    pub fn to_graph(&self) -> Result<GraphModel, ConfigError> {
        let node_count = self
            .node_count
            .unwrap_or_else(|| self.inferred_node_count());
        let edges = self
            .edges
            .iter()
            .map(|edge| (edge.from, edge.to, edge.weight));
        Ok(GraphModel::from_edges(self.directed, node_count, edges)?)
    }
}

impl From<&GraphModel> for GraphDescription {
    fn from(graph: &GraphModel) -> Self {
        Self {
            directed: graph.is_directed(),
            node_count: Some(graph.node_count()),
            edges: graph
                .edges()
                .map(|edge| EdgeDescription {
                    from: edge.from,
                    to: edge.to,
                    weight: edge.weight,
                })
                .collect(),
        }
    }
}
