//! The micro-step state machine.
//!
//! `SteppingEngine` emulates a program counter walking the Bellman-Ford
//! listing: one `step()` call executes one pseudocode line. Control
//! flow is an explicit finite-state machine with named states rather
//! than raw line numbers; each state carries a display mapping back to
//! its listing line so a renderer can highlight it.

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, Weight, INFINITY};
use crate::metrics::EngineMetrics;

/// The fixed source vertex.
///
/// The visualizer always computes distances from vertex 0; the listing's
/// `src` parameter is cosmetic.
pub const SOURCE: usize = 0;

/// Named states of the stepping state machine.
///
/// Loop-test states (`InitAssign`, `CycleScan`) are re-entrant: the
/// engine stays on them across consecutive `step()` calls while the loop
/// runs. `Complete` and `NegativeCycle` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepState {
    /// Function signature
    FnEntry,
    /// `int dist[V];`
    DistDecl,
    /// Comment above the initialization loop
    InitComment,
    /// Initialization loop header
    InitLoopHead,
    /// `dist[i] = INT_MAX;` - repeats V times
    InitAssign,
    /// `dist[src] = 0;`
    SeedSource,
    /// Comment above the relaxation rounds
    RelaxComment,
    /// Outer relaxation loop header
    RelaxLoopHead,
    /// Outer loop test `i <= V - 1`
    OuterTest,
    /// Inner loop test + edge load `j < E`
    EdgeFetch,
    /// Relaxation condition
    RelaxTest,
    /// `dist[v] = dist[u] + weight;`
    RelaxAssign,
    /// Comment above the negative-cycle check
    CycleComment,
    /// Cycle-check loop header
    CycleLoopHead,
    /// Cycle-check scan - repeats up to E times
    CycleScan,
    /// Terminal: all rounds done, no violating edge found
    Complete,
    /// Terminal: a violating edge survived V - 1 rounds
    NegativeCycle,
}

impl StepState {
    /// Listing line id this state highlights (index into
    /// [`crate::listing::PSEUDOCODE`]).
    ///
    /// Terminal states keep the highlight inside the check block:
    /// line 20 for a completed scan, line 23 for a detected cycle.
    pub fn line(self) -> usize {
        match self {
            StepState::FnEntry => 0,
            StepState::DistDecl => 1,
            StepState::InitComment => 2,
            StepState::InitLoopHead => 3,
            StepState::InitAssign => 4,
            StepState::SeedSource => 5,
            StepState::RelaxComment => 6,
            StepState::RelaxLoopHead => 7,
            StepState::OuterTest => 8,
            StepState::EdgeFetch => 9,
            StepState::RelaxTest => 10,
            StepState::RelaxAssign => 11,
            StepState::CycleComment => 17,
            StepState::CycleLoopHead => 18,
            StepState::CycleScan => 19,
            StepState::Complete => 20,
            StepState::NegativeCycle => 23,
        }
    }

    /// True for the two absorbing states.
    pub fn is_terminal(self) -> bool {
        matches!(self, StepState::Complete | StepState::NegativeCycle)
    }
}

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Shortest distances are final
    Complete,
    /// A negative-weight cycle is reachable from the source
    NegativeCycle,
}

/// Owned snapshot of the engine's public state, taken after a `step()`.
///
/// This is everything a renderer needs: the line to highlight, the
/// distance table, the loop registers for the debug panel, and the
/// edge/vertices to mark on the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Listing line id to highlight
    pub line: usize,

    /// Named state behind that line
    pub state: StepState,

    /// Distance table (INFINITY sentinel included)
    pub dist: Vec<Weight>,

    /// Outer loop register (initialization index, then round number)
    pub i: usize,

    /// Inner loop register (edge index)
    pub j: usize,

    /// Source vertex of the edge under inspection, if any
    pub u: Option<usize>,

    /// Target vertex of the edge under inspection, if any
    pub v: Option<usize>,

    /// Weight of the edge under inspection
    pub weight: Weight,

    /// Did the just-examined edge get relaxed? Valid only immediately
    /// after the `step()` that produced this snapshot.
    pub was_relaxed: bool,

    /// Current state is absorbing
    pub is_terminal: bool,
}

/// Deterministic line-level Bellman-Ford interpreter.
///
/// Single-driver contract: exactly one logical thread calls `step()`;
/// interleaving two drivers on one engine is not supported.
pub struct SteppingEngine {
    graph: Graph,
    state: StepState,
    dist: Vec<Weight>,
    i: usize,
    j: usize,
    u: Option<usize>,
    v: Option<usize>,
    weight: Weight,
    was_relaxed: bool,
    metrics: EngineMetrics,
}

impl SteppingEngine {
    /// Creates an engine positioned on the first listing line.
    ///
    /// The distance table starts all-INFINITY; the initialization loop
    /// will visibly re-walk it anyway, exactly like the listing says.
    pub fn new(graph: Graph) -> Self {
        let dist = vec![INFINITY; graph.vertex_count()];
        Self {
            graph,
            state: StepState::FnEntry,
            dist,
            i: 0,
            j: 0,
            u: None,
            v: None,
            weight: 0,
            was_relaxed: false,
            metrics: EngineMetrics::default(),
        }
    }

    /// Executes one pseudocode line.
    ///
    /// Terminal policy: once the engine reaches `Complete` or
    /// `NegativeCycle`, further calls are strict no-ops - no field
    /// (metrics included) mutates.
    pub fn step(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.was_relaxed = false;
        self.metrics.steps += 1;

        let vertex_count = self.graph.vertex_count();
        let edge_count = self.graph.edge_count();

        self.state = match self.state {
            StepState::FnEntry => StepState::DistDecl,
            StepState::DistDecl => StepState::InitComment,

            StepState::InitComment => {
                self.i = 0;
                StepState::InitLoopHead
            }
            StepState::InitLoopHead => {
                self.i = 0;
                StepState::InitAssign
            }
            StepState::InitAssign => {
                if self.i < vertex_count {
                    self.dist[self.i] = INFINITY;
                    self.i += 1;
                    StepState::InitAssign
                } else {
                    StepState::SeedSource
                }
            }
            StepState::SeedSource => {
                self.dist[SOURCE] = 0;
                StepState::RelaxComment
            }

            StepState::RelaxComment => {
                self.i = 1;
                StepState::RelaxLoopHead
            }
            StepState::RelaxLoopHead => {
                self.i = 1;
                StepState::OuterTest
            }
            StepState::OuterTest => {
                if self.i <= vertex_count - 1 {
                    self.metrics.rounds_started += 1;
                    self.j = 0;
                    StepState::EdgeFetch
                } else {
                    StepState::CycleComment
                }
            }
            StepState::EdgeFetch => {
                if let Some(edge) = self.graph.edge(self.j) {
                    self.metrics.edges_examined += 1;
                    self.u = Some(edge.source);
                    self.v = Some(edge.target);
                    self.weight = edge.weight;
                    StepState::RelaxTest
                } else {
                    self.i += 1;
                    StepState::OuterTest
                }
            }
            StepState::RelaxTest => {
                if self.inspected_edge_relaxable() {
                    self.was_relaxed = true;
                    StepState::RelaxAssign
                } else {
                    self.j += 1;
                    StepState::EdgeFetch
                }
            }
            StepState::RelaxAssign => {
                // u is always set here: RelaxAssign is only reachable
                // through a successful RelaxTest.
                let (u, v) = (self.u.unwrap_or(SOURCE), self.v.unwrap_or(SOURCE));
                self.dist[v] = self.dist[u] + self.weight;
                self.metrics.relaxations += 1;
                self.j += 1;
                StepState::EdgeFetch
            }

            StepState::CycleComment => {
                self.j = 0;
                StepState::CycleLoopHead
            }
            StepState::CycleLoopHead => {
                self.j = 0;
                StepState::CycleScan
            }
            StepState::CycleScan => {
                if let Some(edge) = self.graph.edge(self.j) {
                    self.metrics.cycle_checks += 1;
                    self.u = Some(edge.source);
                    self.v = Some(edge.target);
                    self.weight = edge.weight;
                    if self.inspected_edge_relaxable() {
                        // First violating edge; j stays pointing at it.
                        StepState::NegativeCycle
                    } else {
                        self.j += 1;
                        StepState::CycleScan
                    }
                } else {
                    debug_assert_eq!(self.j, edge_count);
                    StepState::Complete
                }
            }

            StepState::Complete | StepState::NegativeCycle => unreachable!(),
        };
    }

    fn inspected_edge_relaxable(&self) -> bool {
        match (self.u, self.v) {
            (Some(u), Some(v)) => {
                self.dist[u] != INFINITY && self.dist[u] + self.weight < self.dist[v]
            }
            _ => false,
        }
    }

    /// The graph this engine runs on.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Current named state.
    pub fn state(&self) -> StepState {
        self.state
    }

    /// Listing line id for the current state.
    pub fn current_line(&self) -> usize {
        self.state.line()
    }

    /// The distance table.
    pub fn dist(&self) -> &[Weight] {
        &self.dist
    }

    /// True once the run has ended either way.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// How the run ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            StepState::Complete => Some(Outcome::Complete),
            StepState::NegativeCycle => Some(Outcome::NegativeCycle),
            _ => None,
        }
    }

    /// Counters for the debug panel.
    pub fn metrics(&self) -> EngineMetrics {
        self.metrics
    }

    /// Takes an owned snapshot of the public state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            line: self.state.line(),
            state: self.state,
            dist: self.dist.clone(),
            i: self.i,
            j: self.j,
            u: self.u,
            v: self.v,
            weight: self.weight,
            was_relaxed: self.was_relaxed,
            is_terminal: self.state.is_terminal(),
        }
    }
}
