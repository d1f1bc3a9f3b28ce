//! Deterministic replay of recorded input vectors from a snapshot.

use crate::{
    step_one, CoreConfig, CoreSnapshot, CoreState, EdgeOutcome, SnapshotLayoutError, TickInputs,
};

/// Result of replaying a vector stream from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    /// Number of edges replayed.
    pub edges: usize,
    /// Outcome of the final edge, `None` for an empty stream.
    pub final_outcome: Option<EdgeOutcome>,
    /// State after the last edge.
    pub final_state: CoreState,
    /// Output byte observed after each edge, in order.
    pub outputs: Vec<u8>,
}

/// Restores `snapshot` and applies `inputs` one edge at a time.
///
/// # Errors
///
/// Returns [`SnapshotLayoutError`] when the snapshot cannot be imported.
pub fn replay_from_snapshot(
    snapshot: CoreSnapshot,
    inputs: &[TickInputs],
    config: &CoreConfig,
) -> Result<ReplayResult, SnapshotLayoutError> {
    let mut state = snapshot.try_into_core_state()?;
    let mut outputs = Vec::with_capacity(inputs.len());
    let mut final_outcome = None;

    for tick in inputs {
        final_outcome = Some(step_one(&mut state, tick, config));
        outputs.push(state.output());
    }

    Ok(ReplayResult {
        edges: inputs.len(),
        final_outcome,
        final_state: state,
        outputs,
    })
}
