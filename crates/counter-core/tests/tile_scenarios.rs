//! End-to-end scenarios driven through the pin adapter, following the
//! cocotb testbench sequence for the tile.

#![allow(clippy::pedantic, clippy::nursery)]

use counter_core::{
    ControlLatency, ControlWord, CoreConfig, PinAdapter, PinInputs, CONTROL_BIT_EN,
    CONTROL_BIT_LOAD, CONTROL_BIT_OE, CONTROL_BIT_UP,
};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

/// Packs control bits the same way the testbench does.
const fn ctrl_val(en: u8, load: u8, up: u8, oe: u8) -> u8 {
    (oe << CONTROL_BIT_OE)
        | (up << CONTROL_BIT_UP)
        | (load << CONTROL_BIT_LOAD)
        | (en << CONTROL_BIT_EN)
}

struct Bench {
    tile: PinAdapter,
    pins: PinInputs,
}

impl Bench {
    fn new(config: CoreConfig) -> Self {
        Self {
            tile: PinAdapter::new(config),
            pins: PinInputs {
                rst_n: false,
                ena: true,
                ui_in: 0,
                uio_in: ctrl_val(0, 0, 1, 1),
            },
        }
    }

    fn clock_cycles(&mut self, cycles: usize) {
        for _ in 0..cycles {
            self.tile.clock(&self.pins);
        }
    }

    fn uo_out(&self) -> u8 {
        self.tile.outputs().uo_out
    }

    fn reset_sequence(&mut self) {
        self.pins.rst_n = false;
        self.clock_cycles(10);
        self.pins.rst_n = true;
        self.clock_cycles(2);
    }
}

#[test]
fn testbench_sequence_with_held_count_while_gated() {
    let mut dut = Bench::new(CoreConfig::default());
    dut.reset_sequence();
    assert_eq!(dut.uo_out(), 0x00, "after reset");

    dut.pins.ui_in = 0x05;
    dut.pins.uio_in = ctrl_val(0, 1, 1, 1);
    dut.clock_cycles(1);
    dut.pins.uio_in = ctrl_val(0, 0, 1, 1);
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x05, "after load");

    dut.pins.uio_in = ctrl_val(1, 0, 1, 1);
    dut.clock_cycles(3);
    assert_eq!(dut.uo_out(), 0x08, "after count up");

    dut.pins.uio_in = ctrl_val(1, 0, 0, 1);
    dut.clock_cycles(2);
    assert_eq!(dut.uo_out(), 0x06, "after count down");

    dut.pins.uio_in = ctrl_val(0, 0, 1, 0);
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x00, "with oe low");

    dut.pins.uio_in = ctrl_val(0, 0, 1, 1);
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x06, "after oe re-enable");

    dut.pins.ui_in = 0xFE;
    dut.pins.uio_in = ctrl_val(0, 1, 1, 1);
    dut.clock_cycles(1);
    dut.pins.uio_in = ctrl_val(1, 0, 1, 1);
    dut.clock_cycles(3);
    assert_eq!(dut.uo_out(), 0x01, "wrap up");

    dut.pins.ui_in = 0x01;
    dut.pins.uio_in = ctrl_val(0, 1, 0, 1);
    dut.clock_cycles(1);
    dut.pins.uio_in = ctrl_val(1, 0, 0, 1);
    dut.clock_cycles(2);
    assert_eq!(dut.uo_out(), 0xFF, "wrap down");
}

#[test]
fn gated_edge_keeps_counting_and_reveals_increment() {
    let mut dut = Bench::new(CoreConfig::default());
    dut.reset_sequence();

    dut.pins.ui_in = 0x05;
    dut.pins.uio_in = ControlWord::load().to_bits();
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x05);

    dut.pins.uio_in = ControlWord::count_up().to_bits();
    dut.clock_cycles(3);
    assert_eq!(dut.uo_out(), 0x08);

    dut.pins.uio_in = ControlWord::count_down().to_bits();
    dut.clock_cycles(2);
    assert_eq!(dut.uo_out(), 0x06);

    dut.pins.uio_in = ControlWord::count_up().with_oe(false).to_bits();
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x00);

    dut.pins.uio_in = ControlWord::hold().to_bits();
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x07);
}

#[test]
fn registered_control_needs_one_settle_edge_per_change() {
    let config = CoreConfig {
        control_latency: ControlLatency::Registered,
        ..CoreConfig::default()
    };
    let mut dut = Bench::new(config);
    dut.reset_sequence();
    assert_eq!(dut.uo_out(), 0x00);

    dut.pins.ui_in = 0x05;
    dut.pins.uio_in = ctrl_val(0, 1, 1, 1);
    dut.clock_cycles(1);
    dut.pins.uio_in = ctrl_val(0, 0, 1, 1);
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x05);

    dut.pins.uio_in = ctrl_val(1, 0, 1, 1);
    dut.clock_cycles(3);
    assert_eq!(dut.uo_out(), 0x07, "first enabled edge only latches");

    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x08);
}

#[test]
fn registered_output_enable_gates_one_edge_late() {
    let config = CoreConfig {
        control_latency: ControlLatency::Registered,
        ..CoreConfig::default()
    };
    let mut dut = Bench::new(config);
    dut.reset_sequence();

    dut.pins.ui_in = 0x05;
    dut.pins.uio_in = ctrl_val(0, 1, 1, 1);
    dut.clock_cycles(1);
    dut.pins.uio_in = ctrl_val(0, 0, 1, 1);
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x05);

    dut.pins.uio_in = ctrl_val(0, 0, 1, 0);
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x05, "oe low is only latched");

    dut.pins.uio_in = ctrl_val(0, 0, 1, 1);
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x00, "latched oe low gates the output");
    assert_eq!(dut.tile.core().read(true), 0x05);
    assert_eq!(dut.tile.core().count(), 0x05);

    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x05);
}

#[test]
fn reset_mid_count_returns_to_zero() {
    let mut dut = Bench::new(CoreConfig::default());
    dut.reset_sequence();

    dut.pins.uio_in = ControlWord::count_up().to_bits();
    dut.clock_cycles(40);
    assert_eq!(dut.uo_out(), 40);

    dut.pins.rst_n = false;
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x00);

    dut.pins.rst_n = true;
    dut.clock_cycles(1);
    assert_eq!(dut.uo_out(), 0x01);
}
