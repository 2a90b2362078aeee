//! Job entry point that hides the compiler wiring.

use std::path::Path;

use quboforge_compiler::QuboCompiler;
use quboforge_config::{ConfigError, JobConfig};
use quboforge_core::QuboMatrix;
use tracing::info;

/// Jobs estimated above this many accumulation steps compile in parallel.
const PARALLEL_WORK_THRESHOLD: u64 = 1 << 20;

/// Compiles a loaded job.
///
/// Small jobs run on the calling thread; larger ones use the rayon pool.
/// Both paths produce identical matrices.
pub fn run_job(job: &JobConfig) -> Result<QuboMatrix, ConfigError> {
    let graph = job.graph.to_graph()?;

    let mut compiler = QuboCompiler::new(&graph).with_positions(job.positions);
    if let Some(node) = job.start_node {
        compiler = compiler.with_start_node(node);
    }
    if let Some(node) = job.terminal_node {
        compiler = compiler.with_terminal_node(node);
    }

    let work = compiler.estimate_work(&job.constraints)?;
    let parallel = work > PARALLEL_WORK_THRESHOLD;
    info!(event = "job_start", work, parallel);

    let q = if parallel {
        compiler.generate_parallel(&job.constraints)?
    } else {
        compiler.generate(&job.constraints)?
    };
    Ok(q)
}

/// Loads a job file (YAML for `.yaml`/`.yml`, TOML otherwise) and compiles it.
pub fn run_job_file(path: impl AsRef<Path>) -> Result<QuboMatrix, ConfigError> {
    let job = JobConfig::load(path)?;
    run_job(&job)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_job_graph_coloring() {
        let job = JobConfig::from_toml_str(
            r#"
            positions = 2

            [constraints]
            diagonal = -4.0
            one_node_many_positions = 8.0
            edges = 4.0

            [graph]
            edges = [{ from = 0, to = 1 }]
            "#,
        )
        .unwrap();

        let q = run_job(&job).unwrap();
        assert_eq!(q.dimension(), 4);
        assert_eq!(q.get(0, 0), -4.0);
        assert_eq!(q.get(0, 1), 8.0);
        assert_eq!(q.get(0, 2), 4.0);
        assert_eq!(q.get(1, 3), 4.0);
    }

    #[test]
    fn test_run_job_reports_compiler_errors() {
        let job = JobConfig::from_yaml_str(
            r#"
start_node: 5
graph:
  node_count: 2
  edges: []
"#,
        )
        .unwrap();

        assert!(matches!(
            run_job(&job),
            Err(ConfigError::Graph(quboforge_core::QuboError::InvalidNode { node: 5, .. }))
        ));
    }

    #[test]
    fn test_run_job_file_missing() {
        assert!(matches!(
            run_job_file("does/not/exist.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
