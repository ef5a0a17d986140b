//! StepView Core - Line-Level Bellman-Ford Stepping Engine
//!
//! This library is the algorithmic half of an interactive Bellman-Ford
//! visualizer. It owns the algorithm state (distance table, loop
//! registers, current pseudocode line) and advances it one micro-step
//! per [`SteppingEngine::step`] call, mirroring the textbook listing at
//! line granularity:
//! 1. **Initialize**: every distance to the infinity sentinel, source to 0
//! 2. **Relax**: all edges, `V - 1` rounds
//! 3. **Check**: one more scan to detect a negative-weight cycle
//!
//! The engine knows nothing about time, rendering, or input. A driver
//! (see `stepview_sim`) decides *when* to call `step()`; a renderer
//! reads the [`Snapshot`] it exposes afterward.

pub mod engine;
pub mod graph;
pub mod listing;
pub mod metrics;

// Re-export key types for convenience
pub use engine::{Outcome, Snapshot, StepState, SteppingEngine, SOURCE};
pub use graph::{Edge, Graph, GraphError, Weight, INFINITY};
pub use listing::{line_text, PSEUDOCODE};
pub use metrics::EngineMetrics;
