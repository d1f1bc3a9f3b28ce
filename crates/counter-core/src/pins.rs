//! Pin-level adapter for a Tiny Tapeout style tile.
//!
//! Translates electrical conventions (active-low reset, tile enable, packed
//! control port) into [`TickInputs`] and drives the dedicated outputs from
//! the gated count. Bidirectional pins are used as inputs only, so their
//! output and output-enable lines are always driven low.

use crate::{
    ControlWord, CoreConfig, CoreState, CounterCore, EdgeOutcome, TickInputs, TraceSink,
};

/// Input pins sampled at a rising clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PinInputs {
    /// Active-low reset.
    pub rst_n: bool,
    /// Tile enable. When low, control inputs read as deasserted.
    pub ena: bool,
    /// Dedicated inputs, wired to the data bus.
    pub ui_in: u8,
    /// Bidirectional pins in input mode, carrying the packed control byte.
    pub uio_in: u8,
}

impl Default for PinInputs {
    fn default() -> Self {
        Self {
            rst_n: true,
            ena: true,
            ui_in: 0,
            uio_in: 0,
        }
    }
}

impl PinInputs {
    /// Translates pin levels into logical edge inputs.
    #[must_use]
    pub const fn to_tick_inputs(self) -> TickInputs {
        let control = if self.ena {
            ControlWord::from_bits(self.uio_in)
        } else {
            ControlWord::IDLE
        };

        TickInputs {
            reset_active: !self.rst_n,
            control,
            data: self.ui_in,
        }
    }
}

/// Output pins driven after an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PinOutputs {
    /// Dedicated outputs: the gated count.
    pub uo_out: u8,
    /// Bidirectional output values (unused, always zero).
    pub uio_out: u8,
    /// Bidirectional output enables (all pins are inputs, always zero).
    pub uio_oe: u8,
}

/// Counter core wrapped behind its pin interface.
#[derive(Debug, Clone, Default)]
pub struct PinAdapter {
    core: CounterCore,
}

impl PinAdapter {
    /// Creates an adapter around a fresh core with `config`.
    #[must_use]
    pub fn new(config: CoreConfig) -> Self {
        Self {
            core: CounterCore::with_config(config),
        }
    }

    /// Wraps a core resumed from `state`.
    #[must_use]
    pub const fn from_state(state: CoreState, config: CoreConfig) -> Self {
        Self {
            core: CounterCore::from_state(state, config),
        }
    }

    /// Applies one rising clock edge and returns the resulting outputs.
    pub fn clock(&mut self, pins: &PinInputs) -> PinOutputs {
        self.apply(pins);
        self.outputs()
    }

    /// Applies one edge, reporting trace events to `sink`.
    pub fn clock_traced(&mut self, pins: &PinInputs, sink: &mut dyn TraceSink) -> EdgeOutcome {
        let inputs = pins.to_tick_inputs();
        self.core.reset(inputs.reset_active);
        self.core.tick_traced(inputs.control, inputs.data, sink)
    }

    /// Applies one edge and returns which update branch fired.
    pub fn apply(&mut self, pins: &PinInputs) -> EdgeOutcome {
        let inputs = pins.to_tick_inputs();
        self.core.reset(inputs.reset_active);
        self.core.tick(inputs.control, inputs.data)
    }

    /// Current output pin levels, without advancing the clock.
    #[must_use]
    pub const fn outputs(&self) -> PinOutputs {
        PinOutputs {
            uo_out: self.core.output(),
            uio_out: 0,
            uio_oe: 0,
        }
    }

    /// The wrapped core.
    #[must_use]
    pub const fn core(&self) -> &CounterCore {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::{PinAdapter, PinInputs, PinOutputs};
    use crate::{ControlWord, CoreConfig, EdgeOutcome};

    const fn pins(rst_n: bool, ui_in: u8, control: ControlWord) -> PinInputs {
        PinInputs {
            rst_n,
            ena: true,
            ui_in,
            uio_in: control.to_bits(),
        }
    }

    #[test]
    fn active_low_reset_is_translated() {
        let inputs = pins(false, 0x12, ControlWord::load()).to_tick_inputs();
        assert!(inputs.reset_active);

        let inputs = pins(true, 0x12, ControlWord::load()).to_tick_inputs();
        assert!(!inputs.reset_active);
        assert_eq!(inputs.control, ControlWord::load());
        assert_eq!(inputs.data, 0x12);
    }

    #[test]
    fn deselected_tile_holds_but_still_resets() {
        let mut adapter = PinAdapter::new(CoreConfig::default());
        adapter.clock(&pins(true, 0x44, ControlWord::load()));
        assert_eq!(adapter.outputs().uo_out, 0x44);

        let deselected = PinInputs {
            ena: false,
            ..pins(true, 0x00, ControlWord::count_up())
        };
        assert_eq!(adapter.apply(&deselected), EdgeOutcome::Held);
        assert_eq!(adapter.core().count(), 0x44);

        let reset = PinInputs {
            ena: false,
            ..pins(false, 0x00, ControlWord::hold())
        };
        assert_eq!(adapter.apply(&reset), EdgeOutcome::Reset);
        assert_eq!(adapter.core().count(), 0x00);
    }

    #[test]
    fn bidirectional_pins_are_never_driven() {
        let mut adapter = PinAdapter::default();
        let outputs = adapter.clock(&pins(true, 0xFF, ControlWord::load()));
        assert_eq!(
            outputs,
            PinOutputs {
                uo_out: 0xFF,
                uio_out: 0,
                uio_oe: 0,
            }
        );
    }

    #[test]
    fn upper_control_bits_do_not_disturb_the_counter() {
        let mut adapter = PinAdapter::default();
        adapter.clock(&pins(true, 0x10, ControlWord::load()));

        let noisy = PinInputs {
            uio_in: 0xF0 | ControlWord::hold().to_bits(),
            ..PinInputs::default()
        };
        adapter.clock(&noisy);
        assert_eq!(adapter.outputs().uo_out, 0x10);
    }
}
