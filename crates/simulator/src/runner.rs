//! Main simulator runner.
//!
//! Resolves the graph source, drives the simulation runner and exports
//! snapshots when asked to.

use crate::config::{GraphSource, SimulatorConfig};
use crate::export::JsonLinesSink;
use crate::generators::{Cycle, GraphGenerator, RandomGraph};
use crate::report::SimulationReport;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use selfstab_simulation::{NullSink, SimulationError, SimulationRunner};
use selfstab_types::{Graph, GraphError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Main simulator: one graph, one configuration, one run.
pub struct Simulator {
    /// Graph resolved from the configured source.
    graph: Graph,

    /// Configuration.
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a new simulator, loading or generating its graph.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        let graph = load_graph(&config.graph)?;
        info!(
            source = ?config.graph,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Graph ready"
        );
        Ok(Self { graph, config })
    }

    /// The graph being colored.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Configuration of this simulator.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run the simulation and build the report.
    ///
    /// Failing to converge is reported, not an error.
    pub fn run(&mut self) -> Result<SimulationReport, SimulatorError> {
        let mut runner =
            SimulationRunner::new(self.graph.clone(), self.config.to_simulation_config())?;

        let outcome = match &self.config.snapshots {
            Some(path) => {
                let mut sink = JsonLinesSink::create(path).map_err(|source| {
                    SimulatorError::Export {
                        path: path.clone(),
                        source,
                    }
                })?;
                let outcome = runner.run(&mut sink);
                let written = sink.written();
                sink.finish().map_err(|source| SimulatorError::Export {
                    path: path.clone(),
                    source,
                })?;
                info!(path = %path.display(), snapshots = written, "Snapshots written");
                outcome
            }
            None => runner.run(&mut NullSink),
        };

        Ok(SimulationReport::new(&self.graph, outcome))
    }
}

/// Resolve a graph source.
pub fn load_graph(source: &GraphSource) -> Result<Graph, SimulatorError> {
    match source {
        GraphSource::Reference => Ok(Graph::reference()),
        GraphSource::File(path) => read_graph_file(path),
        GraphSource::Cycle(nodes) => {
            let mut rng = ChaCha8Rng::seed_from_u64(0);
            Ok(Cycle { nodes: *nodes }.generate(&mut rng)?)
        }
        GraphSource::Random {
            nodes,
            edge_probability,
            seed,
        } => {
            if !(0.0..=1.0).contains(edge_probability) {
                return Err(SimulatorError::InvalidEdgeProbability(*edge_probability));
            }
            let mut rng = ChaCha8Rng::seed_from_u64(*seed);
            let generator = RandomGraph {
                nodes: *nodes,
                edge_probability: *edge_probability,
            };
            Ok(generator.generate(&mut rng)?)
        }
    }
}

fn read_graph_file(path: &Path) -> Result<Graph, SimulatorError> {
    let text = std::fs::read_to_string(path).map_err(|source| SimulatorError::ReadGraph {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SimulatorError::ParseGraph {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur while setting up or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Failed to read graph file {}: {source}", .path.display())]
    ReadGraph {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid graph file {}: {source}", .path.display())]
    ParseGraph {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Edge probability must be within [0, 1], got {0}")]
    InvalidEdgeProbability(f64),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Failed to write snapshots to {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use selfstab_simulation::InitialColoring;
    use selfstab_test_helpers::fixtures;
    use std::io::Write;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_default_run_converges_on_reference() {
        let mut simulator = Simulator::new(SimulatorConfig::default()).unwrap();
        let report = simulator.run().unwrap();

        assert!(report.converged());
        assert_eq!(report.nodes, 12);
        assert_eq!(
            report.outcome.raw_colors(),
            fixtures::REFERENCE_FINAL_COLORS.to_vec()
        );
    }

    #[traced_test]
    #[test]
    fn test_reference_source_loads_builtin_graph() {
        let graph = load_graph(&GraphSource::Reference).unwrap();
        assert_eq!(graph, fixtures::reference());
        assert_eq!(graph.edge_count(), 14);
    }

    #[traced_test]
    #[test]
    fn test_graph_file_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"nodes": 3, "adjacency": [[1], [0, 2], [1]]}}"#).unwrap();

        let graph = load_graph(&GraphSource::File(path)).unwrap();
        assert_eq!(graph, fixtures::path(3));
    }

    #[traced_test]
    #[test]
    fn test_malformed_graph_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        std::fs::write(&path, r#"{"nodes": 2, "adjacency": [[1], [0], []]}"#).unwrap();

        let err = load_graph(&GraphSource::File(path)).unwrap_err();
        assert!(matches!(err, SimulatorError::ParseGraph { .. }));
    }

    #[traced_test]
    #[test]
    fn test_missing_graph_file() {
        let err = load_graph(&GraphSource::File("/nonexistent/graph.json".into())).unwrap_err();
        assert!(matches!(err, SimulatorError::ReadGraph { .. }));
    }

    #[traced_test]
    #[test]
    fn test_edge_probability_checked() {
        let source = GraphSource::Random {
            nodes: 4,
            edge_probability: 1.2,
            seed: 1,
        };
        assert!(matches!(
            load_graph(&source),
            Err(SimulatorError::InvalidEdgeProbability(_))
        ));
    }

    #[traced_test]
    #[test]
    fn test_snapshots_exported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let config = SimulatorConfig::new(GraphSource::File(write_pair(dir.path())))
            .with_rounds(10)
            .with_stop_at_fixpoint(true)
            .with_snapshots(&path);

        let report = Simulator::new(config).unwrap().run().unwrap();
        assert_eq!(report.outcome.rounds, 6);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], r#"{"round":1,"colors":[1,1]}"#);
        assert_eq!(lines[5], r#"{"round":6,"colors":[2,1]}"#);
    }

    #[traced_test]
    #[test]
    fn test_non_convergence_is_a_report() {
        let config = SimulatorConfig::new(GraphSource::Cycle(2))
            .with_rounds(0)
            .with_initial(InitialColoring::Uniform(1));

        let report = Simulator::new(config).unwrap().run().unwrap();
        assert!(!report.converged());
        assert!(!report.conflicts.is_empty());
    }

    #[traced_test]
    #[test]
    fn test_bad_initial_coloring_is_an_error() {
        let config = SimulatorConfig::new(GraphSource::Cycle(3))
            .with_initial(InitialColoring::Explicit(vec![1, 2]));

        let err = Simulator::new(config).unwrap().run().unwrap_err();
        assert!(matches!(
            err,
            SimulatorError::Simulation(SimulationError::ColorCountMismatch { .. })
        ));
    }

    fn write_pair(dir: &Path) -> PathBuf {
        let path = dir.join("pair.json");
        std::fs::write(&path, r#"{"nodes": 2, "adjacency": [[1], [0]]}"#).unwrap();
        path
    }
}
