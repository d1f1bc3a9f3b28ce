//! Deterministic replay fingerprint generator used by CI cross-host comparison.

use counter_core::{
    replay_from_snapshot, ControlLatency, ControlWord, CoreConfig, CoreSnapshot, CoreState,
    EdgeOutcome, SnapshotVersion, TickInputs,
};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn stimulus() -> Vec<TickInputs> {
    let mut vectors = vec![TickInputs::reset(); 10];
    vectors.extend([TickInputs::new(ControlWord::hold(), 0); 2]);
    vectors.push(TickInputs::new(ControlWord::load(), 0x05));
    vectors.extend([TickInputs::new(ControlWord::count_up(), 0); 3]);
    vectors.extend([TickInputs::new(ControlWord::count_down(), 0); 2]);
    vectors.push(TickInputs::new(ControlWord::count_up().with_oe(false), 0));
    vectors.push(TickInputs::new(ControlWord::hold(), 0));
    vectors.push(TickInputs::new(ControlWord::load(), 0xFE));
    vectors.extend([TickInputs::new(ControlWord::count_up(), 0); 3]);
    vectors.push(TickInputs::new(ControlWord::load(), 0x01));
    vectors.extend([TickInputs::new(ControlWord::count_down(), 0); 2]);
    vectors
}

fn fingerprint(control_latency: ControlLatency) -> String {
    let snapshot = CoreSnapshot::from_core_state(SnapshotVersion::V1, &CoreState::default());
    let config = CoreConfig {
        control_latency,
        ..CoreConfig::default()
    };

    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    let replay = match replay_from_snapshot(snapshot, &stimulus(), &config) {
        Ok(replay) => replay,
        Err(error) => return format!("error: {error}"),
    };

    hash_bytes(&mut hash, &(replay.edges as u64).to_le_bytes());
    match replay.final_outcome {
        Some(EdgeOutcome::Reset) => hash_bytes(&mut hash, &[0x10]),
        Some(EdgeOutcome::Loaded { value }) => hash_bytes(&mut hash, &[0x11, value]),
        Some(EdgeOutcome::Incremented { from, to }) => hash_bytes(&mut hash, &[0x12, from, to]),
        Some(EdgeOutcome::Decremented { from, to }) => hash_bytes(&mut hash, &[0x13, from, to]),
        Some(EdgeOutcome::Held) => hash_bytes(&mut hash, &[0x14]),
        None => hash_bytes(&mut hash, &[0x15]),
    }
    hash_bytes(&mut hash, &replay.final_state.edges.to_le_bytes());
    hash_bytes(&mut hash, &[replay.final_state.count()]);
    hash_bytes(&mut hash, &replay.outputs);

    format!("{hash:016x}")
}

fn main() {
    println!("same-edge  {}", fingerprint(ControlLatency::SameEdge));
    println!("registered {}", fingerprint(ControlLatency::Registered));
}
