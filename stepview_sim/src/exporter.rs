//! JSON exporter for external visualization.
//!
//! Writes one frame per micro-step so a renderer (or a notebook) can
//! replay the run: highlighted line, distance table, inspected edge,
//! relaxation flag.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

use stepview_core::{EngineMetrics, Outcome, Snapshot};

/// A single micro-step frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Step index (0 = state before the first step)
    pub step: u64,

    /// Engine state after that step
    pub snapshot: Snapshot,
}

/// Complete trace of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepTrace {
    /// Scenario name
    pub scenario: String,

    /// Seed used
    pub seed: u64,

    /// All frames, in step order
    pub frames: Vec<TraceFrame>,

    /// Verification verdict
    pub passed: bool,

    /// How the run ended, if it reached a terminal state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,

    /// Final engine counters
    pub metrics: EngineMetrics,
}

impl StepTrace {
    /// Creates a new trace container.
    pub fn new(scenario: &str, seed: u64) -> Self {
        Self {
            scenario: scenario.to_string(),
            seed,
            frames: Vec::new(),
            passed: false,
            outcome: None,
            metrics: EngineMetrics::default(),
        }
    }

    /// Adds a frame.
    pub fn add_frame(&mut self, step: u64, snapshot: Snapshot) {
        self.frames.push(TraceFrame { step, snapshot });
    }

    /// Finalizes the trace.
    pub fn finalize(&mut self, passed: bool, outcome: Option<Outcome>, metrics: EngineMetrics) {
        self.passed = passed;
        self.outcome = outcome;
        self.metrics = metrics;
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepview_core::{Edge, Graph, SteppingEngine};

    #[test]
    fn test_trace_round_trips_through_json() {
        let graph = Graph::new(vec![Edge::new(0, 1, 3)], 2, 1).unwrap();
        let mut engine = SteppingEngine::new(graph);

        let mut trace = StepTrace::new("classic", 42);
        trace.add_frame(0, engine.snapshot());
        engine.step();
        trace.add_frame(1, engine.snapshot());
        trace.finalize(true, engine.outcome(), engine.metrics());

        let json = serde_json::to_string(&trace).unwrap();
        let back: StepTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(back.frames.len(), 2);
        assert_eq!(back.frames[1].snapshot.line, 1);
        assert!(back.passed);
    }
}
