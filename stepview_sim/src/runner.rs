//! Drives an engine to a terminal state and verifies the result.
//!
//! The runner is the harness's inner loop: build the scenario graph,
//! step the engine while checking the monotonic non-increase invariant,
//! enforce the termination bound, then compare the terminal state
//! against the oracle.

use tracing::{debug, trace};

use stepview_core::{EngineMetrics, Graph, Outcome, SteppingEngine, Weight};

use crate::exporter::StepTrace;
use crate::oracle::{GroundTruth, Oracle};
use crate::scenarios::ScenarioId;

/// Result of one verified scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub scenario: ScenarioId,
    pub seed: u64,
    pub passed: bool,

    /// Micro-steps taken to reach a terminal state
    pub steps: u64,

    /// Terminal state reached, if any
    pub outcome: Option<Outcome>,

    /// Final distance table
    pub final_dist: Vec<Weight>,

    pub failure_reason: Option<String>,

    /// Final engine counters
    pub metrics: EngineMetrics,
}

/// Runs scenarios to a terminal state under invariant checks.
pub struct ScenarioRunner {
    seed: u64,
    max_steps: u64,
}

impl ScenarioRunner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            // Replaced per-graph in run(); this is only the fallback cap.
            max_steps: 1_000_000,
        }
    }

    /// Overrides the step cap.
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Runs one scenario from the catalog.
    pub fn run(&self, scenario: ScenarioId) -> ScenarioResult {
        let graph = match scenario.graph(self.seed) {
            Ok(graph) => graph,
            Err(e) => {
                return ScenarioResult {
                    scenario,
                    seed: self.seed,
                    passed: false,
                    steps: 0,
                    outcome: None,
                    final_dist: Vec::new(),
                    failure_reason: Some(format!("graph construction failed: {}", e)),
                    metrics: EngineMetrics::default(),
                }
            }
        };
        self.run_graph(scenario, graph, None)
    }

    /// Runs one scenario, recording every frame into `trace`.
    pub fn run_with_trace(&self, scenario: ScenarioId, trace: &mut StepTrace) -> ScenarioResult {
        match scenario.graph(self.seed) {
            Ok(graph) => self.run_graph(scenario, graph, Some(trace)),
            Err(e) => ScenarioResult {
                scenario,
                seed: self.seed,
                passed: false,
                steps: 0,
                outcome: None,
                final_dist: Vec::new(),
                failure_reason: Some(format!("graph construction failed: {}", e)),
                metrics: EngineMetrics::default(),
            },
        }
    }

    /// Runs an arbitrary graph (catalog scenario or `--graph` file).
    pub fn run_graph(
        &self,
        scenario: ScenarioId,
        graph: Graph,
        mut trace: Option<&mut StepTrace>,
    ) -> ScenarioResult {
        let expected = Oracle::new(graph.clone()).solve();
        let mut engine = SteppingEngine::new(graph);

        let step_cap = self.step_cap(&engine);
        debug!(
            scenario = scenario.name(),
            seed = self.seed,
            vertices = engine.graph().vertex_count(),
            edges = engine.graph().edge_count(),
            step_cap,
            "running scenario"
        );

        if let Some(trace) = trace.as_deref_mut() {
            trace.add_frame(0, engine.snapshot());
        }

        let mut steps: u64 = 0;
        let mut failure: Option<String> = None;
        let mut previous = engine.dist().to_vec();

        while !engine.is_terminal() {
            if steps >= step_cap {
                failure = Some(format!(
                    "termination bound exceeded: {} steps without reaching a terminal state",
                    step_cap
                ));
                break;
            }
            engine.step();
            steps += 1;

            if let Some(vertex) = first_increased_vertex(&previous, engine.dist()) {
                failure = Some(format!(
                    "distance for vertex {} increased at step {}",
                    vertex, steps
                ));
                break;
            }
            previous.clear();
            previous.extend_from_slice(engine.dist());

            let snapshot = engine.snapshot();
            trace!(
                step = steps,
                line = snapshot.line,
                i = snapshot.i,
                j = snapshot.j,
                was_relaxed = snapshot.was_relaxed,
                "micro-step"
            );
            if let Some(trace) = trace.as_deref_mut() {
                trace.add_frame(steps, snapshot);
            }
        }

        if failure.is_none() {
            failure = verify_against_oracle(&engine, &expected);
        }

        let passed = failure.is_none();
        let result = ScenarioResult {
            scenario,
            seed: self.seed,
            passed,
            steps,
            outcome: engine.outcome(),
            final_dist: engine.dist().to_vec(),
            failure_reason: failure,
            metrics: engine.metrics(),
        };
        if let Some(trace) = trace {
            trace.finalize(passed, engine.outcome(), engine.metrics());
        }
        result
    }

    /// Termination bound for a graph.
    ///
    /// The full run is bounded by the preamble, V init steps, (V-1)
    /// rounds of E edges with at most three steps per edge, and E cycle
    /// checks. A small constant slack covers the loop-exit tests.
    fn step_cap(&self, engine: &SteppingEngine) -> u64 {
        let v = engine.graph().vertex_count() as u64;
        let e = engine.graph().edge_count() as u64;
        let structural = 16 + v + v * (3 * e + 2) + e;
        structural.min(self.max_steps)
    }
}

fn first_increased_vertex(before: &[Weight], after: &[Weight]) -> Option<usize> {
    before
        .iter()
        .zip(after)
        .position(|(b, a)| a > b)
}

fn verify_against_oracle(engine: &SteppingEngine, expected: &GroundTruth) -> Option<String> {
    match (engine.outcome(), expected) {
        (Some(Outcome::Complete), GroundTruth::Distances(dist)) => {
            if engine.dist() == dist.as_slice() {
                None
            } else {
                Some(format!(
                    "distance mismatch: engine {:?}, oracle {:?}",
                    engine.dist(),
                    dist
                ))
            }
        }
        (Some(Outcome::NegativeCycle), GroundTruth::NegativeCycle) => None,
        (outcome, expected) => Some(format!(
            "outcome mismatch: engine {:?}, oracle expected {:?}",
            outcome,
            match expected {
                GroundTruth::Distances(_) => "complete",
                GroundTruth::NegativeCycle => "negative_cycle",
            }
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stepview_core::{Edge, INFINITY};

    #[test]
    fn test_classic_scenario_passes() {
        let result = ScenarioRunner::new(42).run(ScenarioId::Classic);

        assert!(result.passed, "{:?}", result.failure_reason);
        assert_eq!(result.outcome, Some(Outcome::Complete));
        assert_eq!(result.final_dist, vec![0, -1, 2]);
    }

    #[test]
    fn test_negative_cycle_scenario_passes() {
        let result = ScenarioRunner::new(42).run(ScenarioId::NegativeCycle);

        assert!(result.passed, "{:?}", result.failure_reason);
        assert_eq!(result.outcome, Some(Outcome::NegativeCycle));
    }

    #[test]
    fn test_unreachable_scenario_leaves_infinity() {
        let result = ScenarioRunner::new(42).run(ScenarioId::Unreachable);

        assert!(result.passed, "{:?}", result.failure_reason);
        assert_eq!(result.final_dist[2], INFINITY);
    }

    #[test]
    fn test_all_scenarios_pass_over_several_seeds() {
        for seed in 0..20 {
            let runner = ScenarioRunner::new(seed);
            for scenario in ScenarioId::all() {
                let result = runner.run(scenario);
                assert!(
                    result.passed,
                    "{} seed={} failed: {:?}",
                    scenario, seed, result.failure_reason
                );
            }
        }
    }

    #[test]
    fn test_step_cap_is_enforced() {
        let runner = ScenarioRunner::new(1).with_max_steps(3);
        let result = runner.run(ScenarioId::Classic);

        assert!(!result.passed);
        assert_eq!(result.steps, 3);
        assert!(result
            .failure_reason
            .unwrap()
            .contains("termination bound"));
    }

    #[test]
    fn test_trace_records_every_step() {
        let mut trace = StepTrace::new("classic", 42);
        let result = ScenarioRunner::new(42).run_with_trace(ScenarioId::Classic, &mut trace);

        assert!(result.passed);
        // One frame for the initial state plus one per step.
        assert_eq!(trace.frames.len() as u64, result.steps + 1);
        assert!(trace.passed);
        assert_eq!(trace.frames.last().unwrap().snapshot.line, 20);
    }

    fn arb_graph() -> impl Strategy<Value = Graph> {
        (2usize..=7).prop_flat_map(|vertex_count| {
            proptest::collection::vec(
                (0..vertex_count, 0..vertex_count, -6i64..=12i64),
                1..=vertex_count * 2,
            )
            .prop_map(move |triples| {
                let edges: Vec<Edge> = triples
                    .into_iter()
                    .map(|(s, t, w)| Edge::new(s, t, w))
                    .collect();
                let edge_count = edges.len();
                Graph::new(edges, vertex_count, edge_count).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn prop_engine_matches_oracle(graph in arb_graph()) {
            let runner = ScenarioRunner::new(0);
            let result = runner.run_graph(ScenarioId::Random, graph, None);
            prop_assert!(result.passed, "{:?}", result.failure_reason);
        }

        #[test]
        fn prop_terminal_state_is_stable(graph in arb_graph()) {
            let mut engine = SteppingEngine::new(graph);
            for _ in 0..200_000 {
                if engine.is_terminal() {
                    break;
                }
                engine.step();
            }
            prop_assert!(engine.is_terminal());

            let before = engine.snapshot();
            engine.step();
            let after = engine.snapshot();
            prop_assert_eq!(before.line, after.line);
            prop_assert_eq!(before.dist, after.dist);
        }
    }
}
