//! Scenario catalog: the graphs the harness steps through.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use stepview_core::{Edge, Graph, GraphError};

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// The default demo graph: 3 vertices, 4 edges, one negative edge
    Classic,

    /// 3-vertex ring with total cycle weight -1
    NegativeCycle,

    /// 5-vertex path with mixed-sign weights, plus a shortcut to relax away
    Chain,

    /// A vertex no edge ever reaches
    Unreachable,

    /// Seeded random graph; expected outcome decided by the oracle
    Random,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Classic,
            ScenarioId::NegativeCycle,
            ScenarioId::Chain,
            ScenarioId::Unreachable,
            ScenarioId::Random,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Classic => "classic",
            ScenarioId::NegativeCycle => "negative_cycle",
            ScenarioId::Chain => "chain",
            ScenarioId::Unreachable => "unreachable",
            ScenarioId::Random => "random",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Classic => "default demo graph, completes with dist = [0, -1, 2]",
            ScenarioId::NegativeCycle => "reachable cycle of weight -1, must be detected",
            ScenarioId::Chain => "path graph with negative edges but no cycle",
            ScenarioId::Unreachable => "isolated vertex stays at infinity",
            ScenarioId::Random => "seeded random graph checked against the oracle",
        }
    }

    /// Builds the scenario graph. Only `Random` consumes the seed.
    ///
    /// The literal graphs are valid by construction, so the
    /// `Graph::new` results here can only fail on a catalog typo.
    pub fn graph(&self, seed: u64) -> Result<Graph, GraphError> {
        match self {
            ScenarioId::Classic => Graph::new(
                vec![
                    Edge::new(0, 1, -1),
                    Edge::new(0, 2, 4),
                    Edge::new(1, 2, 3),
                    Edge::new(2, 0, 2),
                ],
                3,
                4,
            ),
            ScenarioId::NegativeCycle => Graph::new(
                vec![
                    Edge::new(0, 1, 1),
                    Edge::new(1, 2, -3),
                    Edge::new(2, 0, 1),
                ],
                3,
                3,
            ),
            ScenarioId::Chain => Graph::new(
                vec![
                    Edge::new(0, 1, 6),
                    Edge::new(1, 2, -2),
                    Edge::new(2, 3, 3),
                    Edge::new(3, 4, -1),
                    Edge::new(0, 3, 9),
                ],
                5,
                5,
            ),
            ScenarioId::Unreachable => Graph::new(
                vec![Edge::new(0, 1, 2), Edge::new(1, 0, 5)],
                3,
                2,
            ),
            ScenarioId::Random => Ok(random_graph(seed)),
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(ScenarioId::Classic),
            "negative_cycle" | "negativecycle" => Ok(ScenarioId::NegativeCycle),
            "chain" => Ok(ScenarioId::Chain),
            "unreachable" => Ok(ScenarioId::Unreachable),
            "random" => Ok(ScenarioId::Random),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

/// Generates a small random graph from a seed.
///
/// Weights skew positive but negative edges (and occasionally negative
/// cycles) do occur - the runner asks the oracle which terminal state
/// to expect rather than assuming one.
pub fn random_graph(seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let vertex_count = rng.gen_range(3..=8);
    let edge_count = rng.gen_range(vertex_count..=vertex_count * 2);

    let edges: Vec<Edge> = (0..edge_count)
        .map(|_| {
            Edge::new(
                rng.gen_range(0..vertex_count),
                rng.gen_range(0..vertex_count),
                rng.gen_range(-5..=15),
            )
        })
        .collect();

    // Endpoints are drawn in range, so validation cannot fail here.
    Graph::new(edges, vertex_count, edge_count)
        .unwrap_or_else(|e| unreachable!("random graph invalid: {e}"))
}

/// On-disk graph schema for `--graph <file>`.
#[derive(Debug, Deserialize)]
struct GraphFile {
    vertices: usize,
    edges: Vec<Edge>,
}

/// Errors loading a graph from a JSON file.
#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("failed to read graph file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse graph file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("graph file rejected: {0}")]
    Invalid(#[from] GraphError),
}

/// Loads and validates a graph from a JSON file of the form
/// `{"vertices": 3, "edges": [{"source": 0, "target": 1, "weight": -1}, ...]}`.
pub fn load_graph_file(path: impl AsRef<Path>) -> Result<Graph, GraphFileError> {
    let text = std::fs::read_to_string(path)?;
    let file: GraphFile = serde_json::from_str(&text)?;
    let edge_count = file.edges.len();
    Ok(Graph::new(file.edges, file.vertices, edge_count)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_catalog_graphs_are_valid() {
        for scenario in ScenarioId::all() {
            let graph = scenario.graph(42).unwrap();
            assert!(graph.vertex_count() >= 1, "{} has no vertices", scenario);
        }
    }

    #[test]
    fn test_scenario_round_trips_through_names() {
        for scenario in ScenarioId::all() {
            let parsed: ScenarioId = scenario.name().parse().unwrap();
            assert_eq!(parsed, scenario);
        }
        assert!("no_such_scenario".parse::<ScenarioId>().is_err());
    }

    #[test]
    fn test_random_graph_is_deterministic() {
        let a = random_graph(7);
        let b = random_graph(7);
        assert_eq!(a.vertex_count(), b.vertex_count());
        assert_eq!(a.edges(), b.edges());

        let c = random_graph(8);
        // Different seed, (almost certainly) different graph; at
        // minimum the generator must not panic.
        let _ = c.edge_count();
    }

    #[test]
    fn test_graph_file_parsing() {
        let dir = std::env::temp_dir().join("stepview_graph_file_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("graph.json");
        std::fs::write(
            &path,
            r#"{"vertices": 2, "edges": [{"source": 0, "target": 1, "weight": -4}]}"#,
        )
        .unwrap();

        let graph = load_graph_file(&path).unwrap();
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge(0), Some(Edge::new(0, 1, -4)));

        std::fs::write(&path, r#"{"vertices": 1, "edges": [{"source": 0, "target": 9, "weight": 1}]}"#).unwrap();
        assert!(matches!(
            load_graph_file(&path),
            Err(GraphFileError::Invalid(_))
        ));
    }
}
