#![no_main]

use counter_core::{
    gate_output, step_one, ControlLatency, ControlWord, CoreConfig, CoreState, TickInputs,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&mode, vectors)) = data.split_first() else {
        return;
    };

    let config = CoreConfig {
        control_latency: if mode & 1 == 0 {
            ControlLatency::SameEdge
        } else {
            ControlLatency::Registered
        },
        ..CoreConfig::default()
    };
    let mut state = CoreState::default();

    for chunk in vectors.chunks_exact(2) {
        let inputs = TickInputs {
            reset_active: chunk[0] & 0x80 != 0,
            control: ControlWord::from_bits(chunk[0]),
            data: chunk[1],
        };
        let before = state.count();
        let outcome = step_one(&mut state, &inputs, &config);
        assert_eq!(state.count(), outcome.next_count(before));
        assert_eq!(gate_output(state.count(), false), 0);
        if inputs.reset_active {
            assert_eq!(state.count(), 0);
        }
    }
});
