//! Edge update pipeline: next-state function, output gate, and stepping.
//!
//! Every edge runs the same three stages:
//! 1. Resolve the effective control/data inputs (direct or via the latch).
//! 2. Evaluate [`next_count`] in strict priority order.
//! 3. Commit the outcome and the effective output-enable.

use crate::{
    ControlLatency, ControlWord, CoreConfig, CoreState, CountRegister, EdgeOutcome, RunOutcome,
    TickInputs, TraceEvent, TraceSink,
};

/// Pure next-state function for one edge.
///
/// Priority: reset, then load, then count-enable (direction from `up`),
/// otherwise hold. Total over all inputs.
#[must_use]
pub const fn next_count(
    count: u8,
    reset_active: bool,
    control: ControlWord,
    data: u8,
) -> EdgeOutcome {
    if reset_active {
        EdgeOutcome::Reset
    } else if control.load {
        EdgeOutcome::Loaded { value: data }
    } else if control.en {
        let register = CountRegister::new(count);
        if control.up {
            EdgeOutcome::Incremented {
                from: count,
                to: register.incremented(),
            }
        } else {
            EdgeOutcome::Decremented {
                from: count,
                to: register.decremented(),
            }
        }
    } else {
        EdgeOutcome::Held
    }
}

/// Combinational output gate: the stored value when `oe`, otherwise zero.
#[must_use]
pub const fn gate_output(count: u8, oe: bool) -> u8 {
    if oe {
        count
    } else {
        0
    }
}

struct NoTrace;

impl TraceSink for NoTrace {
    fn on_event(&mut self, _event: TraceEvent) {}
}

/// Advances the state by exactly one edge.
pub fn step_one(state: &mut CoreState, inputs: &TickInputs, config: &CoreConfig) -> EdgeOutcome {
    step_traced(state, inputs, config, &mut NoTrace)
}

/// Advances the state by one edge, reporting trace events to `sink` when
/// [`CoreConfig::tracing_enabled`] is set.
pub fn step_traced(
    state: &mut CoreState,
    inputs: &TickInputs,
    config: &CoreConfig,
    sink: &mut dyn TraceSink,
) -> EdgeOutcome {
    let edge = state.edges;
    if config.tracing_enabled {
        sink.on_event(TraceEvent::EdgeSampled {
            edge,
            inputs: *inputs,
        });
    }

    let (control, data) = effective_inputs(state, inputs, config.control_latency);
    let before = state.count();
    let outcome = next_count(before, inputs.reset_active, control, data);
    commit_edge(state, outcome, inputs.reset_active, control.oe);

    if config.tracing_enabled {
        sink.on_event(TraceEvent::EdgeCommitted {
            edge,
            before,
            after: state.count(),
            outcome,
        });
        sink.on_event(TraceEvent::OutputDriven {
            edge,
            oe: state.output_enable,
            value: state.output(),
        });
    }

    outcome
}

/// Runs every input vector in order.
pub fn run_inputs(state: &mut CoreState, inputs: &[TickInputs], config: &CoreConfig) -> RunOutcome {
    let mut final_outcome = None;
    for tick in inputs {
        final_outcome = Some(step_one(state, tick, config));
    }

    RunOutcome {
        edges: inputs.len(),
        final_outcome,
    }
}

fn effective_inputs(
    state: &mut CoreState,
    inputs: &TickInputs,
    latency: ControlLatency,
) -> (ControlWord, u8) {
    match latency {
        ControlLatency::SameEdge => (inputs.control, inputs.data),
        ControlLatency::Registered => {
            if inputs.reset_active {
                state.latch.clear();
                (ControlWord::IDLE, 0)
            } else {
                let applied = state.latch.swap(inputs.control, inputs.data);
                (applied.control, applied.data)
            }
        }
    }
}

fn commit_edge(state: &mut CoreState, outcome: EdgeOutcome, reset_active: bool, oe: bool) {
    state.register.load(outcome.next_count(state.count()));
    state.reset_active = reset_active;
    state.output_enable = oe;
    state.edges = state.edges.wrapping_add(1);
}

/// Owning wrapper exposing the counter as `reset` / `tick` / `read`.
///
/// `reset` sets a level that persists across edges until changed, the way a
/// reset pin is held by a testbench.
#[derive(Debug, Clone, Default)]
pub struct CounterCore {
    state: CoreState,
    config: CoreConfig,
}

impl CounterCore {
    /// Creates a core with default configuration and a zeroed register.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a core with the given configuration.
    #[must_use]
    pub fn with_config(config: CoreConfig) -> Self {
        Self {
            state: CoreState::default(),
            config,
        }
    }

    /// Resumes from a previously captured state.
    #[must_use]
    pub const fn from_state(state: CoreState, config: CoreConfig) -> Self {
        Self { state, config }
    }

    /// Drives the logical reset level sampled by subsequent edges.
    pub const fn reset(&mut self, active: bool) {
        self.state.reset_active = active;
    }

    /// Advances one rising edge with the given control word and data byte.
    pub fn tick(&mut self, control: ControlWord, data: u8) -> EdgeOutcome {
        let inputs = self.inputs(control, data);
        step_one(&mut self.state, &inputs, &self.config)
    }

    /// Like [`tick`](Self::tick), reporting trace events to `sink`.
    pub fn tick_traced(
        &mut self,
        control: ControlWord,
        data: u8,
        sink: &mut dyn TraceSink,
    ) -> EdgeOutcome {
        let inputs = self.inputs(control, data);
        step_traced(&mut self.state, &inputs, &self.config, sink)
    }

    /// Reads the register through the output gate. Has no side effects.
    #[must_use]
    pub const fn read(&self, oe: bool) -> u8 {
        gate_output(self.state.count(), oe)
    }

    /// Output byte as driven by the most recent edge.
    #[must_use]
    pub const fn output(&self) -> u8 {
        self.state.output()
    }

    /// Raw register value.
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.state.count()
    }

    /// Number of edges committed so far.
    #[must_use]
    pub const fn edges(&self) -> u64 {
        self.state.edges
    }

    /// Current host-visible state.
    #[must_use]
    pub const fn state(&self) -> &CoreState {
        &self.state
    }

    /// Configuration this core was created with.
    #[must_use]
    pub const fn config(&self) -> &CoreConfig {
        &self.config
    }

    const fn inputs(&self, control: ControlWord, data: u8) -> TickInputs {
        TickInputs::new(control, data).with_reset(self.state.reset_active)
    }
}
