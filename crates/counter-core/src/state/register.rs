/// Value the register takes while reset is sampled active.
pub const RESET_VALUE: u8 = 0x00;
/// Largest value the register can hold before wrapping.
pub const COUNT_MAX: u8 = u8::MAX;

/// The sole stateful element of the counter: an 8-bit register with
/// modulo-256 arithmetic.
///
/// Every value of the backing `u8` is a legal register value, so the
/// register can never hold an undefined state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CountRegister(u8);

impl CountRegister {
    /// Creates a register holding `value`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Reads the stored value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Captures a byte from the data bus.
    pub const fn load(&mut self, data: u8) {
        self.0 = data;
    }

    /// Value after one up-count, wrapping `0xFF` to `0x00`.
    #[must_use]
    pub const fn incremented(self) -> u8 {
        self.0.wrapping_add(1)
    }

    /// Value after one down-count, wrapping `0x00` to `0xFF`.
    #[must_use]
    pub const fn decremented(self) -> u8 {
        self.0.wrapping_sub(1)
    }
}

impl From<u8> for CountRegister {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<CountRegister> for u8 {
    fn from(register: CountRegister) -> Self {
        register.0
    }
}

#[cfg(test)]
mod tests {
    use super::{CountRegister, COUNT_MAX, RESET_VALUE};

    #[test]
    fn default_register_holds_reset_value() {
        assert_eq!(CountRegister::default().value(), RESET_VALUE);
    }

    #[test]
    fn increment_wraps_at_top_of_range() {
        assert_eq!(CountRegister::new(COUNT_MAX).incremented(), 0x00);
        assert_eq!(CountRegister::new(0xFE).incremented(), 0xFF);
    }

    #[test]
    fn decrement_wraps_at_bottom_of_range() {
        assert_eq!(CountRegister::new(0x00).decremented(), COUNT_MAX);
        assert_eq!(CountRegister::new(0x01).decremented(), 0x00);
    }

    #[test]
    fn load_overwrites_stored_value() {
        let mut register = CountRegister::new(0x42);
        register.load(0xA5);
        assert_eq!(register.value(), 0xA5);

        register.load(RESET_VALUE);
        assert_eq!(register, CountRegister::default());
    }
}
