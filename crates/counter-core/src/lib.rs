//! Edge-driven model of an 8-bit up/down counter with parallel load,
//! count-enable, direction control, and a gated output.

/// Control word and its packed byte encoding.
pub mod control;
pub use control::{
    ControlWord, CONTROL_BITS_MASK, CONTROL_BIT_EN, CONTROL_BIT_LOAD, CONTROL_BIT_OE,
    CONTROL_BIT_UP,
};

/// Count register and control pipeline latch.
pub mod state;
pub use state::{ControlLatch, CountRegister, COUNT_MAX, RESET_VALUE};

/// Snapshot import error.
pub mod error;
pub use error::SnapshotLayoutError;

/// Public host-facing API contract and integration types.
pub mod api;
pub use api::{
    ControlLatency, CoreConfig, CoreSnapshot, CoreState, EdgeOutcome, RunOutcome,
    SnapshotVersion, TickInputs, TraceEvent, TraceSink,
};

/// Edge update pipeline and the owning core wrapper.
pub mod execute;
pub use execute::{gate_output, next_count, run_inputs, step_one, step_traced, CounterCore};

/// Pin-level adapter with active-low reset and packed control port.
pub mod pins;
pub use pins::{PinAdapter, PinInputs, PinOutputs};

/// Deterministic replay from snapshots.
pub mod replay;
pub use replay::{replay_from_snapshot, ReplayResult};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
