bitflags::bitflags! {
    /// Flag bits in the F register.
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    /// - bits 0–3 are always zero.
    ///
    /// `Flags` is a value, not a general register: it cannot be incremented
    /// or rotated, and any raw byte is truncated to the four named bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const ZERO = 0b1000_0000;
        const SUBTRACT = 0b0100_0000;
        const HALF_CARRY = 0b0010_0000;
        const CARRY = 0b0001_0000;
    }
}

impl Flags {
    /// Build flags from a raw F byte, discarding the low nibble.
    #[inline]
    pub const fn from_byte(value: u8) -> Self {
        Self::from_bits_truncate(value)
    }

    #[inline]
    pub const fn to_byte(self) -> u8 {
        self.bits()
    }

    #[inline]
    pub fn zero(self) -> bool {
        self.contains(Flags::ZERO)
    }

    #[inline]
    pub fn subtract(self) -> bool {
        self.contains(Flags::SUBTRACT)
    }

    #[inline]
    pub fn half_carry(self) -> bool {
        self.contains(Flags::HALF_CARRY)
    }

    #[inline]
    pub fn carry(self) -> bool {
        self.contains(Flags::CARRY)
    }

    #[inline]
    pub fn set_zero(&mut self, value: bool) {
        self.set(Flags::ZERO, value);
    }

    #[inline]
    pub fn set_subtract(&mut self, value: bool) {
        self.set(Flags::SUBTRACT, value);
    }

    #[inline]
    pub fn set_half_carry(&mut self, value: bool) {
        self.set(Flags::HALF_CARRY, value);
    }

    #[inline]
    pub fn set_carry(&mut self, value: bool) {
        self.set(Flags::CARRY, value);
    }
}
