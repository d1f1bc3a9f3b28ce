//! Public host-facing API contracts for embedding the counter model.

use crate::{gate_output, ControlLatch, ControlWord, CountRegister, SnapshotLayoutError};

/// When control and data inputs take effect relative to the edge that
/// samples them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ControlLatency {
    /// Inputs sampled on an edge are applied on that same edge.
    #[default]
    SameEdge,
    /// Inputs pass through a one-edge pipeline register first. Reset is not
    /// pipelined.
    Registered,
}

/// Top-level immutable configuration for a core instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreConfig {
    /// Control input latency model.
    pub control_latency: ControlLatency,
    /// Enables deterministic trace callback dispatch.
    pub tracing_enabled: bool,
}

impl CoreConfig {
    /// Configuration with tracing switched on and everything else default.
    #[must_use]
    pub const fn traced() -> Self {
        Self {
            control_latency: ControlLatency::SameEdge,
            tracing_enabled: true,
        }
    }
}

/// Everything the harness drives for one clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TickInputs {
    /// Logical reset level (already translated from any pin polarity).
    pub reset_active: bool,
    /// Control word sampled at this edge.
    pub control: ControlWord,
    /// Data bus byte sampled at this edge.
    pub data: u8,
}

impl TickInputs {
    /// Inputs for a normal (non-reset) edge.
    #[must_use]
    pub const fn new(control: ControlWord, data: u8) -> Self {
        Self {
            reset_active: false,
            control,
            data,
        }
    }

    /// Inputs for an edge with reset held active.
    #[must_use]
    pub const fn reset() -> Self {
        Self {
            reset_active: true,
            control: ControlWord::hold(),
            data: 0,
        }
    }

    /// Returns a copy with the reset level replaced.
    #[must_use]
    pub const fn with_reset(self, reset_active: bool) -> Self {
        Self {
            reset_active,
            ..self
        }
    }
}

/// Which branch of the edge update rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum EdgeOutcome {
    /// Reset was active; the register was forced to zero.
    Reset,
    /// The data bus was captured.
    Loaded {
        /// Captured byte.
        value: u8,
    },
    /// The register counted up.
    Incremented {
        /// Value before the edge.
        from: u8,
        /// Value after the edge.
        to: u8,
    },
    /// The register counted down.
    Decremented {
        /// Value before the edge.
        from: u8,
        /// Value after the edge.
        to: u8,
    },
    /// Count-enable was low; the register kept its value.
    Held,
}

impl EdgeOutcome {
    /// Register value this outcome commits, given the value before the edge.
    #[must_use]
    pub const fn next_count(self, current: u8) -> u8 {
        match self {
            Self::Reset => crate::RESET_VALUE,
            Self::Loaded { value } => value,
            Self::Incremented { to, .. } | Self::Decremented { to, .. } => to,
            Self::Held => current,
        }
    }

    /// Returns `true` when the outcome wrapped past either end of the range.
    #[must_use]
    pub const fn wrapped(self) -> bool {
        match self {
            Self::Incremented { from, .. } => from == crate::COUNT_MAX,
            Self::Decremented { from, .. } => from == 0,
            Self::Reset | Self::Loaded { .. } | Self::Held => false,
        }
    }
}

/// Complete host-visible counter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreState {
    /// The count register.
    pub register: CountRegister,
    /// Current level of the logical reset input.
    pub reset_active: bool,
    /// Output-enable that was in effect on the most recent edge.
    pub output_enable: bool,
    /// Control pipeline latch, used only with registered control latency.
    pub latch: ControlLatch,
    /// Number of edges committed since construction.
    pub edges: u64,
}

impl CoreState {
    /// Creates a state whose register already holds `count`.
    #[must_use]
    pub const fn with_count(count: u8) -> Self {
        Self {
            register: CountRegister::new(count),
            reset_active: false,
            output_enable: true,
            latch: ControlLatch::CLEARED,
            edges: 0,
        }
    }

    /// Reads the raw register value.
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.register.value()
    }

    /// Output byte as driven by the most recent edge's output-enable.
    #[must_use]
    pub const fn output(&self) -> u8 {
        gate_output(self.count(), self.output_enable)
    }
}

/// Aggregated outcome from running a batch of edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Number of edges committed during this run call.
    pub edges: usize,
    /// Outcome of the last edge, or `None` when no edges were supplied.
    pub final_outcome: Option<EdgeOutcome>,
}

/// Stable snapshot wire-version identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u16)]
pub enum SnapshotVersion {
    /// Initial schema revision for counter-core v0.1.x.
    V1 = 1,
}

impl SnapshotVersion {
    /// Converts wire value to known snapshot version.
    #[must_use]
    pub const fn from_u16(version: u16) -> Option<Self> {
        match version {
            1 => Some(Self::V1),
            _ => None,
        }
    }

    /// Converts a known version to its wire value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

/// Serializable full-state snapshot used for import/export and replay fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreSnapshot {
    /// Raw snapshot schema version, validated on import.
    pub version: u16,
    /// Full host-visible core state.
    pub state: CoreState,
}

impl CoreSnapshot {
    /// Captures `state` under a known schema version.
    #[must_use]
    pub const fn from_core_state(version: SnapshotVersion, state: &CoreState) -> Self {
        Self {
            version: version.as_u16(),
            state: *state,
        }
    }

    /// Validates the schema version and returns the captured state.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotLayoutError::UnsupportedVersion`] when the snapshot
    /// was written by an unknown schema revision.
    pub const fn try_into_core_state(self) -> Result<CoreState, SnapshotLayoutError> {
        match SnapshotVersion::from_u16(self.version) {
            Some(SnapshotVersion::V1) => Ok(self.state),
            None => Err(SnapshotLayoutError::UnsupportedVersion(self.version)),
        }
    }
}

/// Deterministic trace events emitted at edge boundaries when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// Inputs observed at the start of an edge.
    EdgeSampled {
        /// Zero-based index of the edge.
        edge: u64,
        /// Inputs exactly as supplied by the host.
        inputs: TickInputs,
    },
    /// Register update committed by an edge.
    EdgeCommitted {
        /// Zero-based index of the edge.
        edge: u64,
        /// Register value before the edge.
        before: u8,
        /// Register value after the edge.
        after: u8,
        /// Branch of the update rule that fired.
        outcome: EdgeOutcome,
    },
    /// Output byte driven after an edge.
    OutputDriven {
        /// Zero-based index of the edge.
        edge: u64,
        /// Output-enable in effect.
        oe: bool,
        /// Gated output value.
        value: u8,
    },
}

/// Sink trait for deterministic trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn on_event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}
