//! Edge-by-edge execution engine for stimulus scripts.
//!
//! ## Execution Model
//!
//! 1. Create a fresh counter core from the supplied configuration.
//! 2. Walk statements in source order, keeping the driven inputs between
//!    statements the way a testbench keeps signal assignments.
//! 3. Evaluate each `expect` against the core without advancing it.
//! 4. Report every expectation; a failure does not stop the script.

use std::fmt;

use counter_core::{ControlWord, CoreConfig, CounterCore, TraceEvent, TraceSink};

use crate::script::{Assignment, Expectation, Probe, Script, Statement};

/// Result of evaluating a single expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationResult {
    /// 1-indexed script line of the `expect` statement.
    pub line: usize,
    /// The expectation that was evaluated.
    pub expectation: Expectation,
    /// Value observed.
    pub actual: u8,
    /// Edge index at which the observation was made.
    pub edge: u64,
    /// Whether the expectation held.
    pub passed: bool,
}

/// Result of running a whole script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Expectation results in script order.
    pub results: Vec<ExpectationResult>,
    /// Total edges applied.
    pub edges: u64,
}

impl RunReport {
    /// Returns true when every expectation held.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Returns counts for summary reporting.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let passed = self.results.iter().filter(|r| r.passed).count();
        RunSummary {
            passed,
            failed: self.results.len() - passed,
            total: self.results.len(),
        }
    }

    /// Failed expectations only.
    pub fn failures(&self) -> impl Iterator<Item = &ExpectationResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// Summary counts for run reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of expectations that held.
    pub passed: usize,
    /// Number of expectations that failed.
    pub failed: usize,
    /// Total number of expectations.
    pub total: usize,
}

/// Inputs currently driven onto the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drive {
    control: ControlWord,
    data: u8,
}

impl Default for Drive {
    fn default() -> Self {
        Self {
            control: ControlWord::hold(),
            data: 0,
        }
    }
}

impl Drive {
    const fn apply(&mut self, assignment: Assignment) {
        match assignment {
            Assignment::En(en) => self.control.en = en,
            Assignment::Load(load) => self.control.load = load,
            Assignment::Up(up) => self.control.up = up,
            Assignment::Oe(oe) => self.control.oe = oe,
            Assignment::Data(data) => self.data = data,
            Assignment::Ctrl(bits) => self.control = ControlWord::from_bits(bits),
        }
    }
}

struct Discard;

impl TraceSink for Discard {
    fn on_event(&mut self, _event: TraceEvent) {}
}

/// Runs `script` against a fresh core.
#[must_use]
pub fn run_script(script: &Script, config: CoreConfig) -> RunReport {
    run_script_traced(script, config, &mut Discard)
}

/// Runs `script`, forwarding core trace events to `sink`.
///
/// Events are only produced when `config.tracing_enabled` is set.
pub fn run_script_traced(
    script: &Script,
    config: CoreConfig,
    sink: &mut dyn TraceSink,
) -> RunReport {
    let mut core = CounterCore::with_config(config);
    let mut drive = Drive::default();
    let mut results = Vec::with_capacity(script.expectation_count());

    for line in &script.lines {
        match &line.statement {
            Statement::Reset { edges } => {
                core.reset(true);
                advance(&mut core, drive, *edges, sink);
                core.reset(false);
            }
            Statement::Set(assignments) => {
                for assignment in assignments {
                    drive.apply(*assignment);
                }
            }
            Statement::Tick { edges } => advance(&mut core, drive, *edges, sink),
            Statement::Expect(expectation) => {
                results.push(evaluate(&core, line.line, *expectation));
            }
        }
    }

    RunReport {
        results,
        edges: core.edges(),
    }
}

fn advance(core: &mut CounterCore, drive: Drive, edges: u32, sink: &mut dyn TraceSink) {
    for _ in 0..edges {
        core.tick_traced(drive.control, drive.data, sink);
    }
}

fn evaluate(core: &CounterCore, line: usize, expectation: Expectation) -> ExpectationResult {
    let actual = match expectation.probe {
        Probe::Out => core.output(),
        Probe::Count => core.count(),
    };

    ExpectationResult {
        line,
        expectation,
        actual,
        edge: core.edges(),
        passed: expectation.operator.holds(actual, expectation.expected),
    }
}

impl fmt::Display for ExpectationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            write!(f, "PASS line {}: {}", self.line, self.expectation)
        } else {
            write!(
                f,
                "FAIL line {}: {} (got {:#04X} after edge {})",
                self.line, self.expectation, self.actual, self.edge
            )
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} passed, {} failed", self.passed, self.failed)
    }
}
