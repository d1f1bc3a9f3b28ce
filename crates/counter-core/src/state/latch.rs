use crate::ControlWord;

/// Control and data inputs captured on one edge for use on the next.
///
/// Only consulted when the core runs with
/// [`ControlLatency::Registered`](crate::ControlLatency::Registered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ControlLatch {
    /// Latched control word.
    pub control: ControlWord,
    /// Latched data bus byte.
    pub data: u8,
}

impl ControlLatch {
    /// Latch contents after reset: all controls deasserted, data zero.
    pub const CLEARED: Self = Self {
        control: ControlWord::IDLE,
        data: 0,
    };

    /// Stores new inputs and returns the previously latched ones.
    pub const fn swap(&mut self, control: ControlWord, data: u8) -> Self {
        let previous = *self;
        self.control = control;
        self.data = data;
        previous
    }

    /// Drops any latched inputs.
    pub const fn clear(&mut self) {
        *self = Self::CLEARED;
    }
}
