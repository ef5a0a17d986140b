//! StepView deterministic driver harness.
//!
//! The engine in `stepview_core` has no clock, no I/O, and no opinion
//! about when `step()` happens. This crate is the driver that the real
//! visualizer's window loop would be, minus the pixels:
//!
//! - **Scenarios**: a catalog of fixed graphs plus seeded random ones
//! - **Oracle**: whole-loop Bellman-Ford ground truth to check against
//! - **Pacer**: play/pause/speed state translating wall-clock (or
//!   virtual) time into `step()` calls
//! - **Runner**: drives an engine to a terminal state under invariant
//!   checks and verifies the result
//! - **Exporter**: per-micro-step JSON frames for an external renderer
//!
//! All entropy derives from a single 64-bit seed, so any failure is
//! reproducible from its seed number.

pub mod exporter;
pub mod oracle;
pub mod pacer;
pub mod runner;
pub mod scenarios;

pub use exporter::{StepTrace, TraceFrame};
pub use oracle::{GroundTruth, Oracle};
pub use pacer::{Clock, Command, ManualClock, Pacer, SystemClock};
pub use runner::{ScenarioResult, ScenarioRunner};
pub use scenarios::{load_graph_file, GraphFileError, ScenarioId};
