//! Step counters for the debug panel and JSON export.
//!
//! Display-only derived data: the algorithm never reads these back.

use serde::{Deserialize, Serialize};

/// Counters maintained across a single engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetrics {
    /// Total `step()` calls that mutated state (terminal no-ops excluded)
    pub steps: u64,

    /// Edges fetched for inspection during the relaxation phase
    pub edges_examined: u64,

    /// Relaxations actually applied (`dist[v]` lowered)
    pub relaxations: u64,

    /// Relaxation rounds entered (at most `V - 1`)
    pub rounds_started: u64,

    /// Edges examined by the negative-cycle scan (at most `E`)
    pub cycle_checks: u64,
}
