//! Stateful elements of the counter: the count register and the optional
//! control pipeline latch.

/// The 8-bit count register.
pub mod register;
/// One-edge pipeline latch in front of the control inputs.
pub mod latch;

pub use latch::ControlLatch;
pub use register::{CountRegister, COUNT_MAX, RESET_VALUE};
