//! Ground truth oracle for engine verification.
//!
//! The Oracle runs the textbook whole-loop Bellman-Ford over the same
//! graph - no stepping, no state machine - and the runner compares the
//! engine's terminal state against it.

use stepview_core::{Graph, Weight, INFINITY, SOURCE};

/// Reference answer for a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroundTruth {
    /// Shortest distances from the source (INFINITY = unreachable)
    Distances(Vec<Weight>),

    /// A negative-weight cycle is reachable from the source
    NegativeCycle,
}

/// Computes reference results independently of the stepping engine.
pub struct Oracle {
    graph: Graph,
}

impl Oracle {
    /// Creates an oracle over the given graph.
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Runs plain Bellman-Ford to a final answer.
    pub fn solve(&self) -> GroundTruth {
        let v = self.graph.vertex_count();
        let mut dist = vec![INFINITY; v];
        dist[SOURCE] = 0;

        for _ in 1..v {
            for edge in self.graph.edges() {
                if dist[edge.source] != INFINITY
                    && dist[edge.source] + edge.weight < dist[edge.target]
                {
                    dist[edge.target] = dist[edge.source] + edge.weight;
                }
            }
        }

        for edge in self.graph.edges() {
            if dist[edge.source] != INFINITY
                && dist[edge.source] + edge.weight < dist[edge.target]
            {
                return GroundTruth::NegativeCycle;
            }
        }

        GroundTruth::Distances(dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepview_core::Edge;

    #[test]
    fn test_oracle_classic_graph() {
        let graph = Graph::new(
            vec![
                Edge::new(0, 1, -1),
                Edge::new(0, 2, 4),
                Edge::new(1, 2, 3),
                Edge::new(2, 0, 2),
            ],
            3,
            4,
        )
        .unwrap();

        assert_eq!(
            Oracle::new(graph).solve(),
            GroundTruth::Distances(vec![0, -1, 2])
        );
    }

    #[test]
    fn test_oracle_negative_cycle() {
        let graph = Graph::new(
            vec![
                Edge::new(0, 1, 1),
                Edge::new(1, 2, -3),
                Edge::new(2, 0, 1),
            ],
            3,
            3,
        )
        .unwrap();

        assert_eq!(Oracle::new(graph).solve(), GroundTruth::NegativeCycle);
    }

    #[test]
    fn test_oracle_unreachable_vertex() {
        let graph = Graph::new(vec![Edge::new(0, 1, 2)], 3, 1).unwrap();

        assert_eq!(
            Oracle::new(graph).solve(),
            GroundTruth::Distances(vec![0, 2, INFINITY])
        );
    }

    #[test]
    fn test_oracle_ignores_unreachable_negative_cycle() {
        // Cycle 1->2->1 has weight -1 but nothing reaches it from 0.
        let graph = Graph::new(
            vec![Edge::new(1, 2, -3), Edge::new(2, 1, 2)],
            3,
            2,
        )
        .unwrap();

        assert_eq!(
            Oracle::new(graph).solve(),
            GroundTruth::Distances(vec![0, INFINITY, INFINITY])
        );
    }
}
