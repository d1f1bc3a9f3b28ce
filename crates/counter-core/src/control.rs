//! Control word sampled at every edge, plus its packed byte encoding.
//!
//! The core only ever sees the four named booleans. The packed form exists
//! for harnesses that drive the control inputs through a single 8-bit port.

/// Bit position of the count-enable input in a packed control byte.
pub const CONTROL_BIT_EN: u8 = 0;
/// Bit position of the parallel-load input in a packed control byte.
pub const CONTROL_BIT_LOAD: u8 = 1;
/// Bit position of the direction input in a packed control byte.
pub const CONTROL_BIT_UP: u8 = 2;
/// Bit position of the output-enable input in a packed control byte.
pub const CONTROL_BIT_OE: u8 = 3;
/// Mask of the bits that carry control inputs; the upper nibble is ignored.
pub const CONTROL_BITS_MASK: u8 = 0x0F;

/// The set of boolean control inputs sampled at one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ControlWord {
    /// Count-enable. When false (and `load` is false) the register holds.
    pub en: bool,
    /// Parallel load. Overrides `en` and `up`.
    pub load: bool,
    /// Direction: true counts up, false counts down.
    pub up: bool,
    /// Output-enable. Gates the output path only; never touches the register.
    pub oe: bool,
}

impl ControlWord {
    /// All inputs deasserted: the register holds and the output reads zero.
    pub const IDLE: Self = Self {
        en: false,
        load: false,
        up: false,
        oe: false,
    };

    /// Counting up with the output visible.
    #[must_use]
    pub const fn count_up() -> Self {
        Self {
            en: true,
            load: false,
            up: true,
            oe: true,
        }
    }

    /// Counting down with the output visible.
    #[must_use]
    pub const fn count_down() -> Self {
        Self {
            en: true,
            load: false,
            up: false,
            oe: true,
        }
    }

    /// Parallel load with the output visible.
    #[must_use]
    pub const fn load() -> Self {
        Self {
            en: false,
            load: true,
            up: true,
            oe: true,
        }
    }

    /// Holding the current value with the output visible.
    #[must_use]
    pub const fn hold() -> Self {
        Self {
            en: false,
            load: false,
            up: true,
            oe: true,
        }
    }

    /// Returns a copy with `oe` replaced.
    #[must_use]
    pub const fn with_oe(self, oe: bool) -> Self {
        Self { oe, ..self }
    }

    /// Unpacks a control byte. Bits above [`CONTROL_BITS_MASK`] are ignored.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            en: bits & (1 << CONTROL_BIT_EN) != 0,
            load: bits & (1 << CONTROL_BIT_LOAD) != 0,
            up: bits & (1 << CONTROL_BIT_UP) != 0,
            oe: bits & (1 << CONTROL_BIT_OE) != 0,
        }
    }

    /// Packs the control inputs into their byte positions.
    #[must_use]
    pub const fn to_bits(self) -> u8 {
        ((self.en as u8) << CONTROL_BIT_EN)
            | ((self.load as u8) << CONTROL_BIT_LOAD)
            | ((self.up as u8) << CONTROL_BIT_UP)
            | ((self.oe as u8) << CONTROL_BIT_OE)
    }
}

impl From<u8> for ControlWord {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<ControlWord> for u8 {
    fn from(control: ControlWord) -> Self {
        control.to_bits()
    }
}
